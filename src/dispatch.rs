//! Output dispatch
//!
//! After a frame is resolved, every channel compares its signals against the
//! previous frame and writes only the differences to the joystick or the
//! keyboard backend, depending on the channel's mode. Joystick writes are
//! batched and published with a single [`JoystickOutput::flush`].

use crate::config::{AXIS_CENTER, AXIS_DOWN, AXIS_LEFT, AXIS_RIGHT, AXIS_UP};
use crate::keys::KeyCode;
use crate::mode::{ChannelMode, ModeConfig};
use crate::state::{FrameState, StateDiff};
use crate::types::{Axis, ButtonIndex, Edge, Signal};

// ===================================================================
// Output Backends
// ===================================================================

/// Joystick emulation backend. Writes are batched until `flush`.
pub trait JoystickOutput {
    fn set_axis(&mut self, axis: Axis, value: i8);
    fn set_button(&mut self, button: ButtonIndex, pressed: bool);
    /// Publish every batched write as one report.
    fn flush(&mut self);
}

/// Keyboard emulation backend. Every call is an independent event.
pub trait KeyboardOutput {
    fn press(&mut self, key: KeyCode);
    fn release(&mut self, key: KeyCode);
}

impl<T: JoystickOutput + ?Sized> JoystickOutput for &mut T {
    fn set_axis(&mut self, axis: Axis, value: i8) {
        (**self).set_axis(axis, value)
    }

    fn set_button(&mut self, button: ButtonIndex, pressed: bool) {
        (**self).set_button(button, pressed)
    }

    fn flush(&mut self) {
        (**self).flush()
    }
}

impl<T: KeyboardOutput + ?Sized> KeyboardOutput for &mut T {
    fn press(&mut self, key: KeyCode) {
        (**self).press(key)
    }

    fn release(&mut self, key: KeyCode) {
        (**self).release(key)
    }
}

// ===================================================================
// Dispatcher
// ===================================================================

/// Writes one resolved frame to the output backends.
pub struct OutputDispatcher<'a> {
    diff: &'a StateDiff,
    modes: &'a ModeConfig,
}

impl<'a> OutputDispatcher<'a> {
    pub const fn new(diff: &'a StateDiff, modes: &'a ModeConfig) -> Self {
        Self { diff, modes }
    }

    /// Emit every channel's changes. Returns `true` when a joystick channel
    /// changed, in which case `flush` has been called exactly once.
    pub fn dispatch<J, K>(&self, joystick: &mut J, keyboard: &mut K) -> bool
    where
        J: JoystickOutput + ?Sized,
        K: KeyboardOutput + ?Sized,
    {
        let mut dirty = false;
        dirty |= self.direction(joystick, keyboard);
        dirty |= self.fire(joystick, keyboard);
        dirty |= self.extra_fire(joystick, keyboard);
        dirty |= self.keypad(joystick, keyboard);

        if dirty {
            joystick.flush();
        }
        dirty
    }

    fn direction<J, K>(&self, joystick: &mut J, keyboard: &mut K) -> bool
    where
        J: JoystickOutput + ?Sized,
        K: KeyboardOutput + ?Sized,
    {
        match self.modes.direction() {
            ChannelMode::Joystick(()) => {
                if !self.diff.direction_changed() {
                    return false;
                }
                let (x, y) = axis_vector(self.diff.current());
                trace!("Direction axes x={} y={}", x, y);
                joystick.set_axis(Axis::X, x);
                joystick.set_axis(Axis::Y, y);
                true
            }
            ChannelMode::Keyboard(keys) => {
                self.key_edge(keyboard, Signal::Up, keys.up);
                self.key_edge(keyboard, Signal::Down, keys.down);
                self.key_edge(keyboard, Signal::Left, keys.left);
                self.key_edge(keyboard, Signal::Right, keys.right);
                false
            }
        }
    }

    fn fire<J, K>(&self, joystick: &mut J, keyboard: &mut K) -> bool
    where
        J: JoystickOutput + ?Sized,
        K: KeyboardOutput + ?Sized,
    {
        match self.modes.fire() {
            ChannelMode::Joystick(buttons) => {
                if !self.diff.fire_changed() {
                    return false;
                }
                let current = self.diff.current();
                joystick.set_button(buttons.left, current.left_fire);
                joystick.set_button(buttons.right, current.right_fire);
                true
            }
            ChannelMode::Keyboard(keys) => {
                self.key_edge(keyboard, Signal::LeftFire, keys.left);
                self.key_edge(keyboard, Signal::RightFire, keys.right);
                false
            }
        }
    }

    fn extra_fire<J, K>(&self, joystick: &mut J, keyboard: &mut K) -> bool
    where
        J: JoystickOutput + ?Sized,
        K: KeyboardOutput + ?Sized,
    {
        match self.modes.extra_fire() {
            ChannelMode::Joystick(buttons) => {
                if !self.diff.extra_fire_changed() {
                    return false;
                }
                let flags = self.diff.current().special_flags();
                joystick.set_button(buttons.purple, flags.purple_fire);
                joystick.set_button(buttons.blue, flags.blue_fire);
                true
            }
            ChannelMode::Keyboard(keys) => {
                self.key_edge(keyboard, Signal::PurpleFire, keys.purple);
                self.key_edge(keyboard, Signal::BlueFire, keys.blue);
                false
            }
        }
    }

    fn keypad<J, K>(&self, joystick: &mut J, keyboard: &mut K) -> bool
    where
        J: JoystickOutput + ?Sized,
        K: KeyboardOutput + ?Sized,
    {
        let Some((previous, current)) = self.diff.keypad_change() else {
            return false;
        };

        match self.modes.keypad() {
            ChannelMode::Joystick(table) => {
                let (old, new) = (table.lookup(previous), table.lookup(current));
                if old == new {
                    return false;
                }
                if let Some(button) = old {
                    joystick.set_button(button, false);
                }
                if let Some(button) = new {
                    joystick.set_button(button, true);
                }
                debug!("Keypad code {} -> {}", previous.value(), current.value());
                true
            }
            ChannelMode::Keyboard(table) => {
                let (old, new) = (table.lookup(previous), table.lookup(current));
                if old == new {
                    return false;
                }
                if let Some(key) = old {
                    keyboard.release(key);
                }
                if let Some(key) = new {
                    keyboard.press(key);
                }
                debug!("Keypad code {} -> {}", previous.value(), current.value());
                false
            }
        }
    }

    fn key_edge<K: KeyboardOutput + ?Sized>(&self, keyboard: &mut K, signal: Signal, key: KeyCode) {
        match self.diff.edge(signal) {
            Edge::Rising => keyboard.press(key),
            Edge::Falling => keyboard.release(key),
            Edge::Unchanged => {}
        }
    }
}

/// Axis values for a frame. Up wins over down and left wins over right.
pub const fn axis_vector(state: &FrameState) -> (i8, i8) {
    let y = if state.up {
        AXIS_UP
    } else if state.down {
        AXIS_DOWN
    } else {
        AXIS_CENTER
    };
    let x = if state.left {
        AXIS_LEFT
    } else if state.right {
        AXIS_RIGHT
    } else {
        AXIS_CENTER
    };
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::{KeypadCode, KeypadLayout};
    use crate::mode::{DirectionKeys, ExtraFireMapping, FireMapping};

    #[derive(Debug, PartialEq, Eq)]
    enum Call {
        Axis(Axis, i8),
        Button(ButtonIndex, bool),
        Flush,
        Press(KeyCode),
        Release(KeyCode),
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    impl JoystickOutput for Recorder {
        fn set_axis(&mut self, axis: Axis, value: i8) {
            self.calls.push(Call::Axis(axis, value));
        }

        fn set_button(&mut self, button: ButtonIndex, pressed: bool) {
            self.calls.push(Call::Button(button, pressed));
        }

        fn flush(&mut self) {
            self.calls.push(Call::Flush);
        }
    }

    impl KeyboardOutput for Recorder {
        fn press(&mut self, key: KeyCode) {
            self.calls.push(Call::Press(key));
        }

        fn release(&mut self, key: KeyCode) {
            self.calls.push(Call::Release(key));
        }
    }

    fn run(diff: &StateDiff, modes: &ModeConfig) -> (Vec<Call>, Vec<Call>, bool) {
        let mut joystick = Recorder::default();
        let mut keyboard = Recorder::default();
        let flushed = OutputDispatcher::new(diff, modes).dispatch(&mut joystick, &mut keyboard);
        (joystick.calls, keyboard.calls, flushed)
    }

    fn diff_of(previous: FrameState, current: FrameState) -> StateDiff {
        let mut diff = StateDiff::new();
        diff.update(previous);
        diff.commit();
        diff.update(current);
        diff
    }

    fn keypad(code: u8) -> FrameState {
        FrameState {
            keypad: KeypadCode::from_raw(code),
            ..FrameState::default()
        }
    }

    #[test]
    fn up_sets_vertical_axis_and_flushes_once() {
        let up = FrameState {
            up: true,
            ..FrameState::default()
        };
        let (joystick, keyboard, flushed) = run(&diff_of(FrameState::default(), up), &ModeConfig::new());
        assert!(flushed);
        assert_eq!(
            joystick,
            vec![Call::Axis(Axis::X, AXIS_CENTER), Call::Axis(Axis::Y, AXIS_UP), Call::Flush]
        );
        assert!(keyboard.is_empty());
    }

    #[test]
    fn opposing_directions_resolve_to_up_and_left() {
        let all = FrameState {
            up: true,
            down: true,
            left: true,
            right: true,
            ..FrameState::default()
        };
        assert_eq!(axis_vector(&all), (AXIS_LEFT, AXIS_UP));

        let down_right = FrameState {
            down: true,
            right: true,
            ..FrameState::default()
        };
        assert_eq!(axis_vector(&down_right), (AXIS_RIGHT, AXIS_DOWN));
    }

    #[test]
    fn direction_keyboard_follows_edges() {
        let mut modes = ModeConfig::new();
        modes.set_direction_keyboard(DirectionKeys::default());
        let previous = FrameState {
            left: true,
            ..FrameState::default()
        };
        let current = FrameState {
            up: true,
            ..FrameState::default()
        };
        let (joystick, keyboard, flushed) = run(&diff_of(previous, current), &modes);
        assert!(!flushed);
        assert!(joystick.is_empty());
        assert_eq!(keyboard, vec![Call::Press(KeyCode::Up), Call::Release(KeyCode::Left)]);
    }

    #[test]
    fn fire_joystick_writes_both_buttons() {
        let current = FrameState {
            right_fire: true,
            ..FrameState::default()
        };
        let (joystick, _, flushed) = run(&diff_of(FrameState::default(), current), &ModeConfig::new());
        assert!(flushed);
        assert_eq!(
            joystick,
            vec![Call::Button(0, false), Call::Button(1, true), Call::Flush]
        );
    }

    #[test]
    fn fire_keyboard_uses_modifier_defaults() {
        let mut modes = ModeConfig::new();
        modes.set_fire_keyboard(FireMapping::default());
        let current = FrameState {
            left_fire: true,
            ..FrameState::default()
        };
        let (joystick, keyboard, flushed) = run(&diff_of(FrameState::default(), current), &modes);
        assert!(!flushed);
        assert!(joystick.is_empty());
        assert_eq!(keyboard, vec![Call::Press(KeyCode::LAlt)]);
    }

    #[test]
    fn purple_to_blue_swaps_extra_fire_buttons() {
        let (joystick, keyboard, flushed) = run(&diff_of(keypad(7), keypad(11)), &ModeConfig::new());
        assert!(flushed);
        // Neither code has a keypad button, so only the extra fire channel writes
        assert_eq!(
            joystick,
            vec![Call::Button(2, false), Call::Button(3, true), Call::Flush]
        );
        assert!(keyboard.is_empty());
    }

    #[test]
    fn extra_fire_keyboard_presses_mapped_keys() {
        let mut modes = ModeConfig::new();
        modes.set_extra_fire_keyboard(ExtraFireMapping::default());
        let (_, keyboard, _) = run(&diff_of(keypad(0), keypad(11)), &modes);
        assert_eq!(keyboard, vec![Call::Press(KeyCode::KpPlus)]);
    }

    #[test]
    fn keypad_joystick_releases_old_then_presses_new() {
        // '1' (code 2) -> '5' (code 12)
        let (joystick, _, flushed) = run(&diff_of(keypad(2), keypad(12)), &ModeConfig::new());
        assert!(flushed);
        assert_eq!(
            joystick,
            vec![Call::Button(4, false), Call::Button(8, true), Call::Flush]
        );
    }

    #[test]
    fn keypad_keyboard_press_without_release_from_idle() {
        let mut modes = ModeConfig::new();
        modes.set_keypad_keyboard(KeypadLayout::default());
        let (joystick, keyboard, flushed) = run(&diff_of(keypad(0), keypad(12)), &modes);
        assert_eq!(keyboard, vec![Call::Press(KeyCode::Kp5)]);
        assert!(joystick.is_empty());
        assert!(!flushed);
    }

    #[test]
    fn keypad_change_to_same_mapping_emits_nothing() {
        let mut modes = ModeConfig::new();
        modes.set_keypad_keyboard(KeypadLayout::from_array([KeyCode::A; 12]));
        modes.set_extra_fire_keyboard(ExtraFireMapping::default());
        let (_, keyboard, _) = run(&diff_of(keypad(2), keypad(8)), &modes);
        assert!(keyboard.is_empty());
    }

    #[test]
    fn unchanged_frame_emits_nothing() {
        let held = FrameState {
            up: true,
            left_fire: true,
            keypad: KeypadCode::from_raw(12),
            ..FrameState::default()
        };
        let (joystick, keyboard, flushed) = run(&diff_of(held, held), &ModeConfig::new());
        assert!(!flushed);
        assert!(joystick.is_empty());
        assert!(keyboard.is_empty());
    }

    #[test]
    fn keyboard_only_frame_never_flushes() {
        let mut modes = ModeConfig::new();
        modes.set_direction_keyboard(DirectionKeys::default());
        modes.set_fire_keyboard(FireMapping::default());
        let current = FrameState {
            down: true,
            right_fire: true,
            ..FrameState::default()
        };
        let (joystick, keyboard, flushed) = run(&diff_of(FrameState::default(), current), &modes);
        assert!(!flushed);
        assert!(joystick.is_empty());
        assert_eq!(keyboard.len(), 2);
    }
}
