// End-to-end frames through ClassicController
// cargo test --test controller_scenarios

use std::cell::RefCell;
use std::rc::Rc;

use classicpad::config::{AXIS_CENTER, AXIS_UP, PIN_LOW_THRESHOLD};
use classicpad::keypad::KeypadLayout;
use classicpad::keys::KeyCode;
use classicpad::mode::{DirectionKeys, ExtraFireMapping, FireMapping};
use classicpad::sampler::PinAssignment;
use classicpad::types::{Axis, ButtonIndex, PinId};
use classicpad::{ClassicController, DigitalInput, JoystickOutput, KeyboardOutput};

/// Pins currently asserted on the port, shared with the test body.
#[derive(Clone, Default)]
struct Port {
    held: Rc<RefCell<Vec<PinId>>>,
}

impl Port {
    fn hold(&self, pins: &[PinId]) {
        *self.held.borrow_mut() = pins.to_vec();
    }
}

impl DigitalInput for Port {
    fn read_pin(&mut self, pin: PinId) -> bool {
        self.held.borrow().contains(&pin)
    }
}

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

struct Rig {
    port: Port,
    pins: PinAssignment,
    controller: ClassicController<Port>,
}

impl Rig {
    fn new() -> Self {
        let port = Port::default();
        let pins = PinAssignment::default();
        let controller = ClassicController::new(port.clone(), pins, 0);
        Self {
            port,
            pins,
            controller,
        }
    }

    /// Run one frame with the given pins held in each half and dispatch it.
    fn frame(&mut self, direction: &[PinId], keypad: &[PinId]) -> (Vec<Call>, Vec<Call>, bool) {
        self.controller.begin_frame();
        self.port.hold(direction);
        for _ in 0..PIN_LOW_THRESHOLD {
            self.controller.read_direction();
        }
        self.port.hold(keypad);
        for _ in 0..PIN_LOW_THRESHOLD {
            self.controller.read_keypad();
        }
        self.dispatch()
    }

    fn dispatch(&mut self) -> (Vec<Call>, Vec<Call>, bool) {
        let mut joystick = Recorder::default();
        let mut keyboard = Recorder::default();
        let flushed = self.controller.write_to_host(&mut joystick, &mut keyboard);
        (joystick.calls, keyboard.calls, flushed)
    }

    /// Keypad bit lines for a code, bit 0 first.
    fn code_pins(&self, code: u8) -> Vec<PinId> {
        self.pins
            .keypad_bits()
            .iter()
            .enumerate()
            .filter(|(bit, _)| code & (1 << *bit) != 0)
            .map(|(_, &pin)| pin)
            .collect()
    }
}

#[cfg(test)]
mod controller_scenarios {
    use super::*;

    #[test]
    fn fresh_controller_reports_up_on_the_vertical_axis() {
        let mut rig = Rig::new();
        let up = [rig.pins.up];
        let (joystick, keyboard, flushed) = rig.frame(&up, &[]);

        assert!(flushed, "A direction change must flush the joystick");
        assert_eq!(
            joystick,
            vec![
                Call::Axis(Axis::X, AXIS_CENTER),
                Call::Axis(Axis::Y, AXIS_UP),
                Call::Flush
            ]
        );
        assert!(keyboard.is_empty(), "Joystick mode must not touch the keyboard");
        assert_eq!(
            joystick.iter().filter(|c| **c == Call::Flush).count(),
            1,
            "Flush is called exactly once per frame"
        );
    }

    #[test]
    fn keypad_five_in_keyboard_mode_presses_once() {
        let mut rig = Rig::new();
        rig.controller.set_keypad_keyboard(KeypadLayout::default());

        let five = rig.code_pins(12);
        let (joystick, keyboard, flushed) = rig.frame(&[], &five);

        assert_eq!(rig.controller.keypad_char(), Some('5'));
        assert_eq!(keyboard, vec![Call::Press(KeyCode::Kp5)]);
        assert!(joystick.is_empty());
        assert!(!flushed);
    }

    #[test]
    fn purple_to_blue_swaps_extra_fire_buttons() {
        let mut rig = Rig::new();
        let purple = rig.code_pins(7);
        let blue = rig.code_pins(11);

        let (joystick, _, _) = rig.frame(&[], &purple);
        assert_eq!(joystick, vec![Call::Button(2, true), Call::Button(3, false), Call::Flush]);
        assert!(rig.controller.purple_fire());

        let (joystick, keyboard, flushed) = rig.frame(&[], &blue);
        assert!(flushed);
        assert_eq!(joystick, vec![Call::Button(2, false), Call::Button(3, true), Call::Flush]);
        assert!(keyboard.is_empty());
        assert!(rig.controller.blue_fire());
        assert!(!rig.controller.purple_fire());
        assert_eq!(rig.controller.keypad(), None, "Extra fire codes have no keypad symbol");
    }

    #[test]
    fn second_dispatch_without_new_frame_is_silent() {
        let mut rig = Rig::new();
        let held = [rig.pins.up, rig.pins.fire];
        let (first, _, flushed) = rig.frame(&held, &[]);
        assert!(flushed);
        assert!(!first.is_empty());

        let (joystick, keyboard, flushed) = rig.dispatch();
        assert!(!flushed);
        assert!(joystick.is_empty());
        assert!(keyboard.is_empty());
    }

    #[test]
    fn held_input_over_several_frames_is_reported_once() {
        let mut rig = Rig::new();
        let held = [rig.pins.left];
        let (joystick, _, _) = rig.frame(&held, &[]);
        assert!(!joystick.is_empty());

        for _ in 0..3 {
            let (joystick, keyboard, flushed) = rig.frame(&held, &[]);
            assert!(!flushed);
            assert!(joystick.is_empty());
            assert!(keyboard.is_empty());
        }

        let (joystick, _, flushed) = rig.frame(&[], &[]);
        assert!(flushed, "Release must be reported");
        assert_eq!(joystick[1], Call::Axis(Axis::Y, AXIS_CENTER));
    }

    #[test]
    fn up_and_down_together_resolve_to_up() {
        let mut rig = Rig::new();
        let both = [rig.pins.up, rig.pins.down];
        let (joystick, _, _) = rig.frame(&both, &[]);

        assert!(rig.controller.up());
        assert!(rig.controller.down());
        assert!(joystick.contains(&Call::Axis(Axis::Y, AXIS_UP)));
    }

    #[test]
    fn switching_back_to_joystick_silences_the_keyboard() {
        let mut rig = Rig::new();
        rig.controller.set_fire_keyboard(FireMapping::default());
        rig.controller.set_fire_joystick(FireMapping { left: 0, right: 1 });
        assert!(rig.controller.modes().fire().is_joystick());

        let fire = [rig.pins.fire];
        let (joystick, keyboard, flushed) = rig.frame(&fire, &[]);
        assert!(keyboard.is_empty());
        assert!(flushed);
        assert_eq!(joystick, vec![Call::Button(0, true), Call::Button(1, false), Call::Flush]);
    }

    #[test]
    fn keyboard_directions_press_and_release_per_line() {
        let mut rig = Rig::new();
        rig.controller.set_direction_keyboard(DirectionKeys::default());
        rig.controller.set_extra_fire_keyboard(ExtraFireMapping::default());

        let right = [rig.pins.right];
        let down = [rig.pins.down];
        let (_, keyboard, _) = rig.frame(&right, &[]);
        assert_eq!(keyboard, vec![Call::Press(KeyCode::Right)]);

        let (_, keyboard, _) = rig.frame(&down, &[]);
        assert_eq!(
            keyboard,
            vec![Call::Press(KeyCode::Down), Call::Release(KeyCode::Right)]
        );
    }

    #[test]
    fn dispatch_before_sampling_is_all_released() {
        let mut rig = Rig::new();
        rig.controller.begin_frame();
        let (joystick, keyboard, flushed) = rig.dispatch();
        assert!(!flushed);
        assert!(joystick.is_empty());
        assert!(keyboard.is_empty());
        assert!(!rig.controller.up());
        assert_eq!(rig.controller.keypad_char(), None);
    }
}
