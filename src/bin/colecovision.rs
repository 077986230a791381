//! ClassicPad - ColecoVision Firmware
//!
//! Builds firmware for a ColecoVision hand controller presented as a USB
//! joystick:
//! - direction on the X/Y axes, fire on buttons 1 and 2
//! - keypad 1-9, *, 0, # on buttons 5-16
//! - USB VID:PID 0x1209:0xC1A5

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use panic_halt as _;
use defmt_rtt as _;

use classicpad::device::ControllerProfile;
use classicpad::{hardware, supervisor};

// Compile-time profile selection
const PROFILE: ControllerProfile = ControllerProfile::ColecoVision;

/// Main application entry point for the ColecoVision profile
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut supervisor = supervisor::AppSupervisor::new_for_profile(PROFILE);
    supervisor.print_startup_banner();

    match hardware::init_hardware_tasks_for_profile(&spawner, p, PROFILE).await {
        Ok(()) => {
            info!("ColecoVision firmware initialized successfully");
            supervisor.print_init_success();
        }
        Err(e) => {
            error!("Failed to spawn hardware tasks: {:?}", e);
            core::panic!("Hardware initialization failed");
        }
    }

    supervisor.run().await
}
