//! ClassicPad - Atari 2600 Firmware
//!
//! Builds firmware for Atari 2600 style joysticks:
//! - direction on the X/Y axes, single fire on button 1
//! - keypad phase not scanned
//! - USB VID:PID 0x1209:0xC1A8

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use panic_halt as _;
use defmt_rtt as _;

use classicpad::device::ControllerProfile;
use classicpad::{hardware, supervisor};

// Compile-time profile selection
const PROFILE: ControllerProfile = ControllerProfile::Atari2600;

/// Main application entry point for the Atari 2600 profile
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut supervisor = supervisor::AppSupervisor::new_for_profile(PROFILE);
    supervisor.print_startup_banner();

    match hardware::init_hardware_tasks_for_profile(&spawner, p, PROFILE).await {
        Ok(()) => {
            info!("Atari 2600 firmware initialized successfully");
            supervisor.print_init_success();
        }
        Err(e) => {
            error!("Failed to spawn hardware tasks: {:?}", e);
            core::panic!("Hardware initialization failed");
        }
    }

    supervisor.run().await
}
