//! ClassicPad - SuperAction Firmware
//!
//! Builds firmware for the Coleco SuperAction controller:
//! - everything the ColecoVision profile provides
//! - purple and blue fire on buttons 3 and 4
//! - USB VID:PID 0x1209:0xC1A7

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use panic_halt as _;
use defmt_rtt as _;

use classicpad::device::ControllerProfile;
use classicpad::{hardware, supervisor};

// Compile-time profile selection
const PROFILE: ControllerProfile = ControllerProfile::SuperAction;

/// Main application entry point for the SuperAction profile
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    let mut supervisor = supervisor::AppSupervisor::new_for_profile(PROFILE);
    supervisor.print_startup_banner();

    match hardware::init_hardware_tasks_for_profile(&spawner, p, PROFILE).await {
        Ok(()) => {
            info!("SuperAction firmware initialized successfully");
            supervisor.print_init_success();
        }
        Err(e) => {
            error!("Failed to spawn hardware tasks: {:?}", e);
            core::panic!("Hardware initialization failed");
        }
    }

    supervisor.run().await
}
