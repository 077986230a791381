//! Coleco SuperAction controller profile (PID 0xC1A7)
//!
//! The SuperAction adds purple and blue fire buttons, reported through
//! keypad codes 7 and 11. They appear as joystick buttons 2 and 3
//! (zero-based), the default extra fire mapping.

use super::{ProfileConfig, UsbConfig};
use crate::mode::ModeConfig;

pub struct SuperActionConfig;

impl ProfileConfig for SuperActionConfig {
    fn profile_name(&self) -> &'static str {
        "Coleco SuperAction"
    }

    fn usb_config(&self) -> UsbConfig {
        UsbConfig::new(0xC1A7, "SuperAction Controller")
    }

    fn scans_keypad(&self) -> bool {
        true
    }

    fn default_modes(&self) -> ModeConfig {
        ModeConfig::new()
    }
}
