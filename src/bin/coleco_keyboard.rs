//! ClassicPad - ColecoVision Keyboard Firmware
//!
//! Builds firmware for a ColecoVision hand controller presented as a USB
//! keyboard:
//! - direction on the arrow keys, fire on Left Alt / Left Ctrl
//! - keypad on the numeric keypad (* as Del, # as Enter)
//! - USB VID:PID 0x1209:0xC1A6

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use panic_halt as _;
use defmt_rtt as _;

use classicpad::device::ControllerProfile;
use classicpad::{hardware, supervisor};

// Compile-time profile selection
const PROFILE: ControllerProfile = ControllerProfile::ColecoKeyboard;

/// Main application entry point for the ColecoVision Keyboard profile
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut supervisor = supervisor::AppSupervisor::new_for_profile(PROFILE);
    supervisor.print_startup_banner();

    match hardware::init_hardware_tasks_for_profile(&spawner, p, PROFILE).await {
        Ok(()) => {
            info!("ColecoVision Keyboard firmware initialized successfully");
            supervisor.print_init_success();
        }
        Err(e) => {
            error!("Failed to spawn hardware tasks: {:?}", e);
            core::panic!("Hardware initialization failed");
        }
    }

    supervisor.run().await
}
