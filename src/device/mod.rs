//! Controller profile abstraction
//!
//! Each firmware binary is built for one controller profile. A profile
//! decides how the adapter enumerates on USB, whether the keypad half of
//! the port is scanned, and which output mode every channel starts in.

pub mod atari;
pub mod colecovision;
pub mod superaction;

use crate::config::{USB_MANUFACTURER, USB_VID};
use crate::mode::ModeConfig;

pub use atari::Atari2600Config;
pub use colecovision::{ColecoKeyboardConfig, ColecoVisionConfig};
pub use superaction::SuperActionConfig;

/// USB identity of a profile
#[derive(Debug, Clone, Copy)]
pub struct UsbConfig {
    /// USB Vendor ID (shared by every profile)
    pub vid: u16,
    /// USB Product ID (profile-specific)
    pub pid: u16,
    /// USB product name
    pub product_name: &'static str,
    /// USB manufacturer name
    pub manufacturer: &'static str,
}

impl UsbConfig {
    pub const fn new(pid: u16, product_name: &'static str) -> Self {
        Self {
            vid: USB_VID,
            pid,
            product_name,
            manufacturer: USB_MANUFACTURER,
        }
    }
}

/// HID interfaces a profile needs at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HostInterfaces {
    pub joystick: bool,
    pub keyboard: bool,
}

/// Complete profile configuration trait
pub trait ProfileConfig {
    /// Profile name for identification
    fn profile_name(&self) -> &'static str;

    /// USB identity
    fn usb_config(&self) -> UsbConfig;

    /// Whether the keypad half of the port is multiplexed in every frame
    fn scans_keypad(&self) -> bool;

    /// Channel modes the controller starts with
    fn default_modes(&self) -> ModeConfig;

    /// Interfaces used by the default modes
    fn interfaces(&self) -> HostInterfaces {
        let modes = self.default_modes();
        let keyboard = modes.direction().is_keyboard()
            || modes.fire().is_keyboard()
            || modes.extra_fire().is_keyboard()
            || modes.keypad().is_keyboard();
        HostInterfaces {
            joystick: modes.any_joystick(),
            keyboard,
        }
    }
}

/// Enum-based profile selection for no_std builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerProfile {
    ColecoVision,
    ColecoKeyboard,
    SuperAction,
    Atari2600,
}

impl ControllerProfile {
    pub const ALL: [ControllerProfile; 4] = [
        ControllerProfile::ColecoVision,
        ControllerProfile::ColecoKeyboard,
        ControllerProfile::SuperAction,
        ControllerProfile::Atari2600,
    ];

    /// Get profile by USB PID
    pub fn from_pid(pid: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|profile| profile.pid() == pid)
    }

    pub fn pid(&self) -> u16 {
        self.usb_config().pid
    }

    fn config(&self) -> &'static dyn ProfileConfig {
        match self {
            ControllerProfile::ColecoVision => &ColecoVisionConfig,
            ControllerProfile::ColecoKeyboard => &ColecoKeyboardConfig,
            ControllerProfile::SuperAction => &SuperActionConfig,
            ControllerProfile::Atari2600 => &Atari2600Config,
        }
    }
}

impl ProfileConfig for ControllerProfile {
    fn profile_name(&self) -> &'static str {
        self.config().profile_name()
    }

    fn usb_config(&self) -> UsbConfig {
        self.config().usb_config()
    }

    fn scans_keypad(&self) -> bool {
        self.config().scans_keypad()
    }

    fn default_modes(&self) -> ModeConfig {
        self.config().default_modes()
    }
}
