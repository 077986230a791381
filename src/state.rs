//! Frame snapshots and edge detection
//!
//! Each resolved frame is captured as an immutable [`FrameState`]. The
//! [`StateDiff`] engine keeps the snapshot of the previous frame next to the
//! current one and answers which signals rose or fell in between.

use crate::keypad::{KeypadCode, KeypadSymbol, SpecialFlags};
use crate::sampler::LineLevels;
use crate::types::{Edge, Line, Signal};

/// Debounced controller state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub left_fire: bool,
    pub right_fire: bool,
    pub keypad: KeypadCode,
}

impl FrameState {
    /// Build a snapshot from debounced line levels. The keypad code is
    /// always recomputed from the four bit lines.
    pub fn from_levels(levels: &LineLevels) -> Self {
        Self {
            up: levels.get(Line::Up),
            down: levels.get(Line::Down),
            left: levels.get(Line::Left),
            right: levels.get(Line::Right),
            left_fire: levels.get(Line::LeftFire),
            right_fire: levels.get(Line::RightFire),
            keypad: KeypadCode::from_bit_array(levels.keypad_bits()),
        }
    }

    pub const fn special_flags(&self) -> SpecialFlags {
        self.keypad.special_flags()
    }

    pub const fn symbol(&self) -> Option<KeypadSymbol> {
        self.keypad.symbol()
    }

    pub const fn signal(&self, signal: Signal) -> bool {
        match signal {
            Signal::Up => self.up,
            Signal::Down => self.down,
            Signal::Left => self.left,
            Signal::Right => self.right,
            Signal::LeftFire => self.left_fire,
            Signal::RightFire => self.right_fire,
            Signal::PurpleFire => self.keypad.special_flags().purple_fire,
            Signal::BlueFire => self.keypad.special_flags().blue_fire,
        }
    }
}

/// Previous/current snapshot pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StateDiff {
    previous: FrameState,
    current: FrameState,
}

impl StateDiff {
    pub const fn new() -> Self {
        Self {
            previous: FrameState {
                up: false,
                down: false,
                left: false,
                right: false,
                left_fire: false,
                right_fire: false,
                keypad: KeypadCode::NONE,
            },
            current: FrameState {
                up: false,
                down: false,
                left: false,
                right: false,
                left_fire: false,
                right_fire: false,
                keypad: KeypadCode::NONE,
            },
        }
    }

    /// Capture the last resolved frame as the comparison baseline.
    pub fn begin_frame(&mut self) {
        self.previous = self.current;
    }

    /// Install a freshly resolved frame.
    pub fn update(&mut self, resolved: FrameState) {
        self.current = resolved;
    }

    /// Mark the current frame as delivered, so it is no longer a change.
    pub fn commit(&mut self) {
        self.previous = self.current;
    }

    pub const fn previous(&self) -> &FrameState {
        &self.previous
    }

    pub const fn current(&self) -> &FrameState {
        &self.current
    }

    pub const fn edge(&self, signal: Signal) -> Edge {
        Edge::between(self.previous.signal(signal), self.current.signal(signal))
    }

    pub const fn changed(&self, signal: Signal) -> bool {
        !matches!(self.edge(signal), Edge::Unchanged)
    }

    pub const fn direction_changed(&self) -> bool {
        self.changed(Signal::Up)
            || self.changed(Signal::Down)
            || self.changed(Signal::Left)
            || self.changed(Signal::Right)
    }

    pub const fn fire_changed(&self) -> bool {
        self.changed(Signal::LeftFire) || self.changed(Signal::RightFire)
    }

    pub const fn extra_fire_changed(&self) -> bool {
        self.changed(Signal::PurpleFire) || self.changed(Signal::BlueFire)
    }

    /// `(previous, current)` codes when the keypad code changed.
    pub fn keypad_change(&self) -> Option<(KeypadCode, KeypadCode)> {
        if self.previous.keypad == self.current.keypad {
            None
        } else {
            Some((self.previous.keypad, self.current.keypad))
        }
    }
}
