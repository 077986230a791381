//! Pin sampling and debounce
//!
//! Classic controllers are read by repeatedly sampling a handful of
//! active-low lines during one frame. Every active sample increments a
//! per-line counter; at the end of the frame each counter is voted against
//! a fixed threshold to give the debounced level.

use embedded_hal::digital::InputPin;
use heapless::LinearMap;

use crate::config::{
    DEFAULT_SAMPLES_PER_PHASE, PIN_DIRECTION_MODE, PIN_DOWN, PIN_FIRE, PIN_KEYPAD_MODE, PIN_LEFT,
    PIN_LOW_THRESHOLD, PIN_RIGHT, PIN_UP,
};
use crate::types::{Line, PinId, SamplePhase};

// ===================================================================
// Digital Input Capability
// ===================================================================

/// Source of raw controller pin reads.
pub trait DigitalInput {
    /// Returns `true` when the line is asserted, i.e. electrically low.
    fn read_pin(&mut self, pin: PinId) -> bool;
}

impl<T: DigitalInput + ?Sized> DigitalInput for &mut T {
    fn read_pin(&mut self, pin: PinId) -> bool {
        (**self).read_pin(pin)
    }
}

/// Maximum number of input pins an adapter can hold.
pub const MAX_INPUT_PINS: usize = 8;

/// [`DigitalInput`] over a set of `embedded-hal` input pins keyed by GPIO number.
///
/// Pins are expected to be pulled up; a low level means asserted. Reads of
/// unknown pins and read errors both count as not asserted.
pub struct HalInputs<P> {
    pins: LinearMap<PinId, P, MAX_INPUT_PINS>,
}

impl<P: InputPin> HalInputs<P> {
    pub const fn new() -> Self {
        Self {
            pins: LinearMap::new(),
        }
    }

    /// Register a pin under its GPIO number. Returns `false` when the map is full.
    pub fn insert(&mut self, id: PinId, pin: P) -> bool {
        match self.pins.insert(id, pin) {
            Ok(_) => true,
            Err(_) => {
                warn!("Input pin table full, GPIO {} ignored", id);
                false
            }
        }
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

impl<P: InputPin> Default for HalInputs<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: InputPin> DigitalInput for HalInputs<P> {
    fn read_pin(&mut self, pin: PinId) -> bool {
        match self.pins.get_mut(&pin) {
            Some(input) => input.is_low().unwrap_or(false),
            None => false,
        }
    }
}

// ===================================================================
// Pin Assignment and Scan Configuration
// ===================================================================

/// Controller port wiring.
///
/// The keypad bit lines share the direction wires: bit 0 is up, bit 1 is
/// right, bit 2 is down and bit 3 is left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    pub up: PinId,
    pub down: PinId,
    pub left: PinId,
    pub right: PinId,
    pub fire: PinId,
    /// Output that selects the keypad half of the controller.
    pub keypad_mode: PinId,
    /// Output that selects the joystick half of the controller.
    pub direction_mode: PinId,
}

impl PinAssignment {
    pub const fn keypad_bits(&self) -> [PinId; 4] {
        [self.up, self.right, self.down, self.left]
    }

    /// Lines read as inputs.
    pub const fn input_pins(&self) -> [PinId; 5] {
        [self.up, self.down, self.left, self.right, self.fire]
    }
}

impl Default for PinAssignment {
    fn default() -> Self {
        Self {
            up: PIN_UP,
            down: PIN_DOWN,
            left: PIN_LEFT,
            right: PIN_RIGHT,
            fire: PIN_FIRE,
            keypad_mode: PIN_KEYPAD_MODE,
            direction_mode: PIN_DIRECTION_MODE,
        }
    }
}

/// Debounce threshold and samples taken per multiplexing phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    threshold: u16,
    samples_per_phase: u16,
}

impl ScanConfig {
    /// The threshold is at least 1 and the sample count never drops below
    /// the threshold, so a held line can always resolve as pressed.
    pub fn new(threshold: u16, samples_per_phase: u16) -> Self {
        let threshold = threshold.max(1);
        if samples_per_phase < threshold {
            warn!(
                "{} samples per phase cannot reach threshold {}, using {}",
                samples_per_phase, threshold, threshold
            );
        }
        Self {
            threshold,
            samples_per_phase: samples_per_phase.max(threshold),
        }
    }

    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    pub const fn samples_per_phase(&self) -> u16 {
        self.samples_per_phase
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold: PIN_LOW_THRESHOLD,
            samples_per_phase: DEFAULT_SAMPLES_PER_PHASE,
        }
    }
}

// ===================================================================
// Debounce
// ===================================================================

/// Fixed-threshold vote, identical for every line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceResolver {
    threshold: u16,
}

impl DebounceResolver {
    pub const fn new(threshold: u16) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> u16 {
        self.threshold
    }

    #[inline]
    pub const fn resolve(&self, active_count: u16) -> bool {
        active_count >= self.threshold
    }
}

impl Default for DebounceResolver {
    fn default() -> Self {
        Self::new(PIN_LOW_THRESHOLD)
    }
}

/// Debounced level of every counted line for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineLevels {
    levels: [bool; Line::COUNT],
}

impl LineLevels {
    pub const fn get(&self, line: Line) -> bool {
        self.levels[line.index()]
    }

    /// Keypad bit lines, least significant first.
    pub const fn keypad_bits(&self) -> [bool; 4] {
        [
            self.get(Line::Bit0),
            self.get(Line::Bit1),
            self.get(Line::Bit2),
            self.get(Line::Bit3),
        ]
    }
}

// ===================================================================
// Sampler
// ===================================================================

/// Per-frame active sample counters.
#[derive(Debug)]
pub struct PinSampler {
    pins: PinAssignment,
    counts: [u16; Line::COUNT],
    direction_samples: u16,
    keypad_samples: u16,
}

impl PinSampler {
    pub const fn new(pins: PinAssignment) -> Self {
        Self {
            pins,
            counts: [0; Line::COUNT],
            direction_samples: 0,
            keypad_samples: 0,
        }
    }

    pub const fn pins(&self) -> &PinAssignment {
        &self.pins
    }

    /// Zero every counter.
    pub fn begin_frame(&mut self) {
        self.counts = [0; Line::COUNT];
        self.direction_samples = 0;
        self.keypad_samples = 0;
    }

    /// Read each pin of `phase` once and count the asserted ones.
    pub fn sample<I: DigitalInput>(&mut self, input: &mut I, phase: SamplePhase) {
        let pins = self.pins;
        match phase {
            SamplePhase::Direction => {
                self.direction_samples = self.direction_samples.saturating_add(1);
                self.count(input, pins.fire, Line::LeftFire);
                self.count(input, pins.up, Line::Up);
                self.count(input, pins.down, Line::Down);
                self.count(input, pins.left, Line::Left);
                self.count(input, pins.right, Line::Right);
            }
            SamplePhase::Keypad => {
                self.keypad_samples = self.keypad_samples.saturating_add(1);
                self.count(input, pins.fire, Line::RightFire);
                let [bit0, bit1, bit2, bit3] = pins.keypad_bits();
                self.count(input, bit0, Line::Bit0);
                self.count(input, bit1, Line::Bit1);
                self.count(input, bit2, Line::Bit2);
                self.count(input, bit3, Line::Bit3);
            }
        }
    }

    fn count<I: DigitalInput>(&mut self, input: &mut I, pin: PinId, line: Line) {
        if input.read_pin(pin) {
            let slot = &mut self.counts[line.index()];
            *slot = slot.saturating_add(1);
        }
    }

    pub const fn active_count(&self, line: Line) -> u16 {
        self.counts[line.index()]
    }

    pub const fn samples_taken(&self, phase: SamplePhase) -> u16 {
        match phase {
            SamplePhase::Direction => self.direction_samples,
            SamplePhase::Keypad => self.keypad_samples,
        }
    }

    /// Vote every counter against the resolver's threshold.
    pub fn resolve(&self, resolver: &DebounceResolver) -> LineLevels {
        let mut levels = LineLevels::default();
        for line in Line::ALL {
            levels.levels[line.index()] = resolver.resolve(self.counts[line.index()]);
        }
        levels
    }
}
