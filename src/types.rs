//! Common types and data structures used across the ClassicPad application
//!
//! This module contains shared types and enums that are used by both the
//! core pipeline and the firmware tasks.

/// GPIO number of a controller line.
pub type PinId = u8;

/// Zero-based joystick button index.
pub type ButtonIndex = u8;

/// Physical lines whose samples are counted during a frame.
///
/// The fire button is sampled in both multiplexing phases: in the
/// direction phase it is the left fire button, in the keypad phase it is
/// the right fire button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    Up,
    Down,
    Left,
    Right,
    LeftFire,
    RightFire,
    Bit0,
    Bit1,
    Bit2,
    Bit3,
}

impl Line {
    pub const COUNT: usize = 10;

    pub const ALL: [Line; Line::COUNT] = [
        Line::Up,
        Line::Down,
        Line::Left,
        Line::Right,
        Line::LeftFire,
        Line::RightFire,
        Line::Bit0,
        Line::Bit1,
        Line::Bit2,
        Line::Bit3,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Multiplexing phase selected by the mode lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplePhase {
    /// Joystick common active: direction lines and left fire.
    Direction,
    /// Keypad common active: keypad bit lines and right fire.
    Keypad,
}

/// Boolean signals compared frame to frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    Up,
    Down,
    Left,
    Right,
    LeftFire,
    RightFire,
    PurpleFire,
    BlueFire,
}

/// Transition of a signal between the previous and the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Unchanged,
    Rising,
    Falling,
}

impl Edge {
    pub const fn between(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::Unchanged,
        }
    }
}

/// Joystick axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// Application version information
pub struct AppVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl AppVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self { major, minor, patch }
    }
}

/// Current application version
pub const APP_VERSION: AppVersion = AppVersion::new(0, 1, 0);
