//! Application supervisor and monitoring
//!
//! Prints the startup banner and a periodic status line with uptime,
//! polling rate and USB state.

use embassy_time::{Duration, Timer};
use portable_atomic::Ordering;

use crate::config::{FRAME_INTERVAL_MS, STATUS_INTERVAL_SECS};
use crate::device::{ControllerProfile, ProfileConfig};
use crate::input::frame_count;
use crate::types::APP_VERSION;
use crate::usb::{KEYBOARD_LEDS, USB_CONFIGURED};

/// Seconds between supervisor ticks.
const TICK_SECS: u32 = 10;

/// Application supervisor responsible for monitoring and lifecycle management
pub struct AppSupervisor {
    profile: ControllerProfile,
    uptime_seconds: u32,
    last_status: u32,
    last_frame_count: u32,
}

impl AppSupervisor {
    pub fn new_for_profile(profile: ControllerProfile) -> Self {
        Self {
            profile,
            uptime_seconds: 0,
            last_status: 0,
            last_frame_count: 0,
        }
    }

    /// Print application startup banner with profile information
    pub fn print_startup_banner(&self) {
        let profile = self.profile;
        let usb_config = profile.usb_config();
        let interfaces = profile.interfaces();

        info!("========================================");
        info!(
            "ClassicPad v{}.{}.{}",
            APP_VERSION.major, APP_VERSION.minor, APP_VERSION.patch
        );
        info!("Classic Controller to USB Adapter");
        info!("========================================");
        info!("Hardware: RP2040 (Raspberry Pi Pico)");
        info!("Profile: {}", profile.profile_name());
        info!(
            "USB: VID=0x{:04X} PID=0x{:04X}",
            usb_config.vid, usb_config.pid
        );
        info!(
            "Default output: joystick={} keyboard={}",
            interfaces.joystick, interfaces.keyboard
        );
        info!(
            "Frame interval: {}ms, keypad scan: {}",
            FRAME_INTERVAL_MS,
            profile.scans_keypad()
        );
        info!("========================================");
    }

    /// Print successful initialization message
    pub fn print_init_success(&self) {
        let usb_config = self.profile.usb_config();
        info!("ClassicPad initialized successfully");
        info!(
            "USB VID:PID = {:04X}:{:04X}",
            usb_config.vid, usb_config.pid
        );
        info!("Waiting for USB connection...");
    }

    /// Run the main supervisor loop
    pub async fn run(&mut self) -> ! {
        info!("Application supervisor started");

        loop {
            Timer::after(Duration::from_secs(TICK_SECS as u64)).await;
            self.uptime_seconds += TICK_SECS;

            if self.uptime_seconds - self.last_status >= STATUS_INTERVAL_SECS {
                self.print_status();
                self.last_status = self.uptime_seconds;
            }
        }
    }

    fn print_status(&mut self) {
        let minutes = self.uptime_seconds / 60;
        let hours = minutes / 60;
        let remaining_minutes = minutes % 60;

        let frames = frame_count();
        let elapsed = (self.uptime_seconds - self.last_status).max(1);
        let rate = frames.wrapping_sub(self.last_frame_count) / elapsed;
        self.last_frame_count = frames;

        if hours > 0 {
            info!("Status: Uptime {}h{}m, {} frames/s", hours, remaining_minutes, rate);
        } else {
            info!("Status: Uptime {}m, {} frames/s", minutes, rate);
        }
        info!(
            "USB configured: {}, host LEDs: 0x{:02X}",
            USB_CONFIGURED.load(Ordering::Relaxed),
            KEYBOARD_LEDS.load(Ordering::Relaxed)
        );
    }

    /// Get current uptime in seconds
    pub fn uptime(&self) -> u32 {
        self.uptime_seconds
    }
}
