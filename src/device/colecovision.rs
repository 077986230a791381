//! ColecoVision hand controller profiles
//!
//! Supports the controller as a joystick (PID 0xC1A5) and as a keyboard
//! (PID 0xC1A6), e.g. for emulators that only take key input.

use super::{ProfileConfig, UsbConfig};
use crate::config::USB_PID;
use crate::keypad::KeypadLayout;
use crate::mode::{DirectionKeys, ExtraFireMapping, FireMapping, ModeConfig};

/// ColecoVision controller as a USB joystick (PID: 0xC1A5)
pub struct ColecoVisionConfig;

impl ProfileConfig for ColecoVisionConfig {
    fn profile_name(&self) -> &'static str {
        "ColecoVision"
    }

    fn usb_config(&self) -> UsbConfig {
        UsbConfig::new(USB_PID, "ColecoVision Controller")
    }

    fn scans_keypad(&self) -> bool {
        true
    }

    fn default_modes(&self) -> ModeConfig {
        ModeConfig::new()
    }
}

/// ColecoVision controller as a USB keyboard (PID: 0xC1A6)
pub struct ColecoKeyboardConfig;

impl ProfileConfig for ColecoKeyboardConfig {
    fn profile_name(&self) -> &'static str {
        "ColecoVision (keyboard)"
    }

    fn usb_config(&self) -> UsbConfig {
        UsbConfig::new(0xC1A6, "ColecoVision Keyboard")
    }

    fn scans_keypad(&self) -> bool {
        true
    }

    fn default_modes(&self) -> ModeConfig {
        let mut modes = ModeConfig::new();
        modes.set_direction_keyboard(DirectionKeys::default());
        modes.set_fire_keyboard(FireMapping::default());
        modes.set_extra_fire_keyboard(ExtraFireMapping::default());
        modes.set_keypad_keyboard(KeypadLayout::default());
        modes
    }
}
