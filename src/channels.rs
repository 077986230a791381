//! Inter-task communication channels
//!
//! The controller task produces HID reports; the USB task consumes them.

use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use usbd_hid::descriptor::KeyboardReport;

use crate::config::KEYBOARD_QUEUE_DEPTH;
use crate::hid::JoystickReport;

/// Latest joystick report. A newer report replaces one not yet sent.
pub static JOYSTICK_SIGNAL: Signal<ThreadModeRawMutex, JoystickReport> = Signal::new();

/// Keyboard reports in event order. Every report is its own press/release.
pub static KEYBOARD_CHANNEL: Channel<ThreadModeRawMutex, KeyboardReport, KEYBOARD_QUEUE_DEPTH> =
    Channel::new();
