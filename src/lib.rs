//! ClassicPad - Classic Controller to USB Adapter for RP2040
//!
//! This library reads time-multiplexed classic game controllers
//! (ColecoVision, Coleco SuperAction, Atari 2600 style joysticks) and
//! presents them to the host as a USB joystick, a USB keyboard, or a mix
//! of both on a per-channel basis.
//!
//! ## Pipeline
//! - **Sampling**: repeated active-low pin reads counted per frame
//! - **Debounce**: fixed-threshold vote per line
//! - **Diff**: previous/current frame snapshots and edge detection
//! - **Decode**: 4-bit keypad code, keypad symbols and SuperAction fire flags
//! - **Dispatch**: joystick axes/buttons or keyboard press/release per channel
//!
//! ## Architecture
//! - **Core**: `no_std`, hardware independent, testable on the host
//! - **Firmware** (`rp2040` feature): Embassy tasks for polling and USB HID
//! - **Profiles**: compile-time controller selection, one binary per profile

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

// Core pipeline
pub mod config;
pub mod controller;
pub mod device;
pub mod dispatch;
pub mod hid;
pub mod keypad;
pub mod keys;
pub mod mode;
pub mod poller;
pub mod sampler;
pub mod state;
pub mod types;

// Firmware tasks
#[cfg(feature = "rp2040")]
pub mod channels;
#[cfg(feature = "rp2040")]
pub mod hardware;
#[cfg(feature = "rp2040")]
pub mod input;
#[cfg(feature = "rp2040")]
pub mod supervisor;
#[cfg(feature = "rp2040")]
pub mod usb;

pub use controller::ClassicController;
pub use dispatch::{JoystickOutput, KeyboardOutput};
pub use sampler::DigitalInput;

#[cfg(feature = "rp2040")]
use embassy_rp::usb::InterruptHandler;
#[cfg(feature = "rp2040")]
use embassy_rp::{bind_interrupts, peripherals};

// USB interrupt binding - shared by all binaries
#[cfg(feature = "rp2040")]
bind_interrupts!(pub struct Irqs {
    USBCTRL_IRQ => InterruptHandler<peripherals::USB>;
});
