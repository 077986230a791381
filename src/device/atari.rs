//! Atari 2600 style joystick profile (PID 0xC1A8)
//!
//! Atari joysticks have one fire button and no keypad, so only the
//! direction half of the port is sampled. The single fire button reads as
//! the left fire button.

use super::{ProfileConfig, UsbConfig};
use crate::mode::ModeConfig;

pub struct Atari2600Config;

impl ProfileConfig for Atari2600Config {
    fn profile_name(&self) -> &'static str {
        "Atari 2600 Joystick"
    }

    fn usb_config(&self) -> UsbConfig {
        UsbConfig::new(0xC1A8, "Atari Joystick Adapter")
    }

    fn scans_keypad(&self) -> bool {
        false
    }

    fn default_modes(&self) -> ModeConfig {
        ModeConfig::new()
    }
}
