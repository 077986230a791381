//! Classic controller facade
//!
//! [`ClassicController`] owns one controller port: the pin sampler, the
//! previous/current frame snapshots and the per-channel output modes. The
//! caller drives it one frame at a time:
//!
//! ```text
//! begin_frame -> read_direction/read_keypad (N times) -> write_to_host
//! ```
//!
//! `write_to_host` resolves the frame, dispatches every channel and commits
//! the frame, so dispatching again without new samples emits nothing.

use crate::dispatch::{JoystickOutput, KeyboardOutput, OutputDispatcher};
use crate::keypad::{KeypadLayout, KeypadSymbol};
use crate::keys::KeyCode;
use crate::mode::{DirectionKeys, ExtraFireMapping, FireMapping, ModeConfig};
use crate::sampler::{DebounceResolver, DigitalInput, PinAssignment, PinSampler, ScanConfig};
use crate::state::{FrameState, StateDiff};
use crate::types::{ButtonIndex, SamplePhase};

pub struct ClassicController<I> {
    input: I,
    sampler: PinSampler,
    resolver: DebounceResolver,
    scan: ScanConfig,
    diff: StateDiff,
    modes: ModeConfig,
    /// Which host joystick this port feeds. The caller picks the
    /// `JoystickOutput` by it; dispatch never reads it.
    joystick_index: u8,
    resolved: bool,
}

impl<I: DigitalInput> ClassicController<I> {
    pub fn new(input: I, pins: PinAssignment, joystick_index: u8) -> Self {
        Self::with_scan_config(input, pins, joystick_index, ScanConfig::default())
    }

    pub fn with_scan_config(input: I, pins: PinAssignment, joystick_index: u8, scan: ScanConfig) -> Self {
        Self {
            input,
            sampler: PinSampler::new(pins),
            resolver: DebounceResolver::new(scan.threshold()),
            scan,
            diff: StateDiff::new(),
            modes: ModeConfig::new(),
            joystick_index,
            resolved: false,
        }
    }

    // ---------------------------------------------------------------
    // Frame cycle
    // ---------------------------------------------------------------

    /// Start a frame: the last resolved state becomes the baseline and all
    /// sample counters are cleared.
    pub fn begin_frame(&mut self) {
        self.diff.begin_frame();
        self.sampler.begin_frame();
        self.resolved = false;
    }

    /// Sample the direction lines and left fire once.
    pub fn read_direction(&mut self) {
        self.sampler.sample(&mut self.input, SamplePhase::Direction);
    }

    /// Sample the keypad bit lines and right fire once.
    pub fn read_keypad(&mut self) {
        self.sampler.sample(&mut self.input, SamplePhase::Keypad);
    }

    /// Debounce the counters and decode the keypad code. Only the first call
    /// after `begin_frame` has an effect.
    pub fn resolve(&mut self) -> &FrameState {
        if !self.resolved {
            let levels = self.sampler.resolve(&self.resolver);
            self.diff.update(FrameState::from_levels(&levels));
            self.resolved = true;
        }
        self.diff.current()
    }

    /// Resolve the frame if needed, emit every channel's changes and commit
    /// the frame. Returns `true` when the joystick was flushed.
    pub fn write_to_host<J, K>(&mut self, joystick: &mut J, keyboard: &mut K) -> bool
    where
        J: JoystickOutput + ?Sized,
        K: KeyboardOutput + ?Sized,
    {
        self.resolve();
        let flushed = OutputDispatcher::new(&self.diff, &self.modes).dispatch(joystick, keyboard);
        self.diff.commit();
        flushed
    }

    // ---------------------------------------------------------------
    // Configuration
    // ---------------------------------------------------------------

    pub fn set_direction_joystick(&mut self) {
        self.modes.set_direction_joystick();
    }

    pub fn set_direction_keyboard(&mut self, keys: DirectionKeys) {
        self.modes.set_direction_keyboard(keys);
    }

    pub fn set_fire_joystick(&mut self, buttons: FireMapping<ButtonIndex>) {
        self.modes.set_fire_joystick(buttons);
    }

    pub fn set_fire_keyboard(&mut self, keys: FireMapping<KeyCode>) {
        self.modes.set_fire_keyboard(keys);
    }

    pub fn set_extra_fire_joystick(&mut self, buttons: ExtraFireMapping<ButtonIndex>) {
        self.modes.set_extra_fire_joystick(buttons);
    }

    pub fn set_extra_fire_keyboard(&mut self, keys: ExtraFireMapping<KeyCode>) {
        self.modes.set_extra_fire_keyboard(keys);
    }

    pub fn set_keypad_joystick(&mut self, buttons: KeypadLayout<ButtonIndex>) {
        self.modes.set_keypad_joystick(buttons);
    }

    pub fn set_keypad_keyboard(&mut self, keys: KeypadLayout<KeyCode>) {
        self.modes.set_keypad_keyboard(keys);
    }

    /// Replace all four channel modes at once.
    pub fn set_modes(&mut self, modes: ModeConfig) {
        self.modes = modes;
    }

    pub const fn modes(&self) -> &ModeConfig {
        &self.modes
    }

    pub const fn scan_config(&self) -> &ScanConfig {
        &self.scan
    }

    pub const fn pins(&self) -> &PinAssignment {
        self.sampler.pins()
    }

    /// Host joystick instance the caller should route this port's output to.
    pub const fn joystick_index(&self) -> u8 {
        self.joystick_index
    }

    // ---------------------------------------------------------------
    // Queries (last resolved frame)
    // ---------------------------------------------------------------

    pub const fn state(&self) -> &FrameState {
        self.diff.current()
    }

    pub const fn up(&self) -> bool {
        self.diff.current().up
    }

    pub const fn down(&self) -> bool {
        self.diff.current().down
    }

    pub const fn left(&self) -> bool {
        self.diff.current().left
    }

    pub const fn right(&self) -> bool {
        self.diff.current().right
    }

    pub const fn left_fire(&self) -> bool {
        self.diff.current().left_fire
    }

    pub const fn right_fire(&self) -> bool {
        self.diff.current().right_fire
    }

    pub const fn purple_fire(&self) -> bool {
        self.diff.current().special_flags().purple_fire
    }

    pub const fn blue_fire(&self) -> bool {
        self.diff.current().special_flags().blue_fire
    }

    pub const fn keypad(&self) -> Option<KeypadSymbol> {
        self.diff.current().symbol()
    }

    pub fn keypad_char(&self) -> Option<char> {
        self.keypad().map(KeypadSymbol::as_char)
    }
}
