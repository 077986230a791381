//! Hardware configuration for ClassicPad
//! RP2040-based classic controller to USB adapter

use crate::types::PinId;

// ===================================================================
// USB Configuration
// ===================================================================

pub const USB_VID: u16 = 0x1209; // pid.codes shared VID
pub const USB_PID: u16 = 0xC1A5; // ClassicPad
pub const USB_MANUFACTURER: &str = "ClassicPad";
pub const USB_SERIAL: &str = "CLASSICPAD01";
pub const USB_BCD_DEVICE: u16 = 0x0100;

pub const USB_POLL_RATE_MS: u64 = 1; // 1ms USB polling (1000Hz)
pub const USB_MAX_POWER_MA: u16 = 100;

// ===================================================================
// Sampling and Debounce
// ===================================================================

/// Active samples a line needs within one frame to resolve as pressed.
pub const PIN_LOW_THRESHOLD: u16 = 5;

/// Samples taken per multiplexing phase per frame (majority of nine).
pub const DEFAULT_SAMPLES_PER_PHASE: u16 = 9;

/// Settling time after switching the mode-select lines.
pub const MODE_SETTLE_US: u32 = 50;

/// Time between the start of two polling frames.
pub const FRAME_INTERVAL_MS: u64 = 5;

// ===================================================================
// Joystick Emulation
// ===================================================================

/// Axis magnitude used for a fully deflected direction.
pub const AXIS_MAX: i8 = 127;
/// HID convention: negative Y is up.
pub const AXIS_UP: i8 = -AXIS_MAX;
pub const AXIS_DOWN: i8 = AXIS_MAX;
pub const AXIS_LEFT: i8 = -AXIS_MAX;
pub const AXIS_RIGHT: i8 = AXIS_MAX;
pub const AXIS_CENTER: i8 = 0;

/// Number of buttons exposed by the joystick report.
pub const JOYSTICK_BUTTONS: u8 = 16;

/// Pending keyboard reports buffered between polling and USB.
pub const KEYBOARD_QUEUE_DEPTH: usize = 16;

// ===================================================================
// GPIO Pin Assignments - Raspberry Pi Pico
// ===================================================================
//
// DE-9 controller port, numbered as on the controller connector.

pub const PIN_UP: PinId = 2; // DE-9 pin 1
pub const PIN_DOWN: PinId = 3; // DE-9 pin 2
pub const PIN_LEFT: PinId = 4; // DE-9 pin 3
pub const PIN_RIGHT: PinId = 5; // DE-9 pin 4
pub const PIN_KEYPAD_MODE: PinId = 6; // DE-9 pin 5 (keypad common)
pub const PIN_FIRE: PinId = 7; // DE-9 pin 6
pub const PIN_DIRECTION_MODE: PinId = 9; // DE-9 pin 8 (joystick common)

// Status LEDs
pub const LED_STATUS_PIN: u8 = 25; // Built-in LED on Pico
pub const LED_USB_PIN: u8 = 20; // USB status LED

// ===================================================================
// Supervisor
// ===================================================================

pub const STATUS_INTERVAL_SECS: u32 = 60;
