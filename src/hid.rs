//! HID report state for the joystick and keyboard interfaces
//!
//! [`JoystickState`] and [`KeyboardState`] are the output backends the
//! dispatcher writes to. They turn axis/button/key calls into `usbd-hid`
//! reports that the USB task sends to the host.

use heapless::Deque;
use usbd_hid::descriptor::generator_prelude::*;
use usbd_hid::descriptor::KeyboardReport;

use crate::config::{AXIS_CENTER, JOYSTICK_BUTTONS, KEYBOARD_QUEUE_DEPTH};
use crate::dispatch::{JoystickOutput, KeyboardOutput};
use crate::keys::KeyCode;
use crate::types::{Axis, ButtonIndex};

// ===================================================================
// Joystick
// ===================================================================

/// Two 8-bit axes and sixteen buttons.
#[gen_hid_descriptor(
    (collection = APPLICATION, usage_page = GENERIC_DESKTOP, usage = 0x04) = {
        (collection = PHYSICAL, usage = POINTER) = {
            (usage = X,) = {
                #[item_settings data,variable,absolute] x=input;
            };
            (usage = Y,) = {
                #[item_settings data,variable,absolute] y=input;
            };
        };
        (usage_page = BUTTON, usage_min = BUTTON_1, usage_max = 0x10) = {
            #[packed_bits 16] #[item_settings data,variable,absolute] buttons=input;
        };
    }
)]
#[derive(Default)]
pub struct JoystickReport {
    pub x: i8,
    pub y: i8,
    /// Button bits, little-endian: button 0 is bit 0 of `buttons[0]`.
    pub buttons: [u8; 2],
}

/// Joystick values as last written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoystickSnapshot {
    pub x: i8,
    pub y: i8,
    pub buttons: u16,
}

impl JoystickSnapshot {
    pub const fn centered() -> Self {
        Self {
            x: AXIS_CENTER,
            y: AXIS_CENTER,
            buttons: 0,
        }
    }

    pub const fn button(&self, button: ButtonIndex) -> bool {
        button < JOYSTICK_BUTTONS && self.buttons & (1 << button) != 0
    }

    pub const fn to_report(&self) -> JoystickReport {
        JoystickReport {
            x: self.x,
            y: self.y,
            buttons: self.buttons.to_le_bytes(),
        }
    }
}

/// Batches joystick writes; `flush` publishes them as one report.
#[derive(Debug, Default)]
pub struct JoystickState {
    pending: JoystickSnapshot,
    published: Option<JoystickSnapshot>,
}

impl JoystickState {
    pub const fn new() -> Self {
        Self {
            pending: JoystickSnapshot::centered(),
            published: None,
        }
    }

    pub const fn pending(&self) -> &JoystickSnapshot {
        &self.pending
    }

    /// Take the report published by the last `flush`, if not taken yet.
    pub fn take_published(&mut self) -> Option<JoystickReport> {
        self.published.take().map(|snapshot| snapshot.to_report())
    }
}

impl JoystickOutput for JoystickState {
    fn set_axis(&mut self, axis: Axis, value: i8) {
        match axis {
            Axis::X => self.pending.x = value,
            Axis::Y => self.pending.y = value,
        }
    }

    fn set_button(&mut self, button: ButtonIndex, pressed: bool) {
        if button >= JOYSTICK_BUTTONS {
            warn!("Joystick button {} out of range", button);
            return;
        }
        if pressed {
            self.pending.buttons |= 1 << button;
        } else {
            self.pending.buttons &= !(1 << button);
        }
    }

    fn flush(&mut self) {
        self.published = Some(self.pending);
    }
}

// ===================================================================
// Keyboard
// ===================================================================

/// Boot keyboard state: modifier bits plus up to six keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyboardSnapshot {
    pub modifier: u8,
    pub keycodes: [u8; 6],
}

impl KeyboardSnapshot {
    pub fn contains(&self, key: KeyCode) -> bool {
        if key.is_modifier() {
            self.modifier & key.modifier_bit() != 0
        } else {
            self.keycodes.contains(&key.usage())
        }
    }

    pub fn is_empty(&self) -> bool {
        self.modifier == 0 && self.keycodes.iter().all(|&k| k == 0)
    }

    pub fn to_report(&self) -> KeyboardReport {
        KeyboardReport {
            modifier: self.modifier,
            reserved: 0,
            leds: 0,
            keycodes: self.keycodes,
        }
    }
}

/// 6KRO keyboard state. Every press or release queues one report.
#[derive(Debug, Default)]
pub struct KeyboardState {
    current: KeyboardSnapshot,
    queue: Deque<KeyboardSnapshot, KEYBOARD_QUEUE_DEPTH>,
}

impl KeyboardState {
    pub const fn new() -> Self {
        Self {
            current: KeyboardSnapshot {
                modifier: 0,
                keycodes: [0; 6],
            },
            queue: Deque::new(),
        }
    }

    pub const fn current(&self) -> &KeyboardSnapshot {
        &self.current
    }

    /// Oldest report not yet sent.
    pub fn pop_report(&mut self) -> Option<KeyboardReport> {
        self.queue.pop_front().map(|snapshot| snapshot.to_report())
    }

    pub fn pending_reports(&self) -> usize {
        self.queue.len()
    }

    fn enqueue(&mut self) {
        if self.queue.is_full() {
            warn!("Keyboard report queue full, dropping oldest report");
            self.queue.pop_front();
        }
        // Cannot fail after making room
        let _ = self.queue.push_back(self.current);
    }
}

impl KeyboardOutput for KeyboardState {
    fn press(&mut self, key: KeyCode) {
        if key.is_modifier() {
            self.current.modifier |= key.modifier_bit();
        } else if !self.current.keycodes.contains(&key.usage()) {
            match self.current.keycodes.iter_mut().find(|slot| **slot == 0) {
                Some(slot) => *slot = key.usage(),
                None => {
                    warn!("Keyboard rollover exceeded, key {} dropped", key.usage());
                    return;
                }
            }
        }
        self.enqueue();
    }

    fn release(&mut self, key: KeyCode) {
        if key.is_modifier() {
            self.current.modifier &= !key.modifier_bit();
        } else if let Some(slot) = self
            .current
            .keycodes
            .iter_mut()
            .find(|slot| **slot == key.usage())
        {
            *slot = 0;
        }
        self.enqueue();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joystick_publishes_only_on_flush() {
        let mut joystick = JoystickState::new();
        joystick.set_axis(Axis::Y, -127);
        joystick.set_button(3, true);
        assert!(joystick.take_published().is_none());

        joystick.flush();
        let report = joystick.take_published().unwrap();
        assert_eq!(report.y, -127);
        assert_eq!(report.x, 0);
        assert_eq!(report.buttons, [0b1000, 0]);
        // Taken once
        assert!(joystick.take_published().is_none());
    }

    #[test]
    fn joystick_report_packs_buttons_little_endian() {
        let mut joystick = JoystickState::new();
        joystick.set_button(0, true);
        joystick.set_button(9, true);
        joystick.set_axis(Axis::X, 127);
        joystick.flush();

        let report = joystick.take_published().unwrap();
        assert_eq!(report.x, 127);
        assert_eq!(report.buttons, [0x01, 0x02]);

        let centered = JoystickSnapshot::centered().to_report();
        assert_eq!(centered.buttons, [0, 0]);
        assert_eq!(centered.x, 0);
        assert_eq!(centered.y, 0);
    }

    #[test]
    fn joystick_ignores_out_of_range_buttons() {
        let mut joystick = JoystickState::new();
        joystick.set_button(16, true);
        joystick.set_button(15, true);
        assert_eq!(joystick.pending().buttons, 0x8000);
        assert!(joystick.pending().button(15));
        assert!(!joystick.pending().button(16));

        joystick.set_button(15, false);
        assert_eq!(joystick.pending().buttons, 0);
    }

    #[test]
    fn keyboard_queues_one_report_per_event() {
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::Kp5);
        keyboard.press(KeyCode::LCtrl);
        keyboard.release(KeyCode::Kp5);
        assert_eq!(keyboard.pending_reports(), 3);

        let first = keyboard.pop_report().unwrap();
        assert_eq!(first.keycodes, [0x5D, 0, 0, 0, 0, 0]);
        assert_eq!(first.modifier, 0);

        let second = keyboard.pop_report().unwrap();
        assert_eq!(second.modifier, 0x01);
        assert_eq!(second.keycodes[0], 0x5D);

        let third = keyboard.pop_report().unwrap();
        assert_eq!(third.modifier, 0x01);
        assert_eq!(third.keycodes, [0; 6]);
        assert!(keyboard.pop_report().is_none());
    }

    #[test]
    fn keyboard_drops_seventh_key() {
        let mut keyboard = KeyboardState::new();
        let keys = [
            KeyCode::A,
            KeyCode::B,
            KeyCode::C,
            KeyCode::D,
            KeyCode::E,
            KeyCode::F,
            KeyCode::G,
        ];
        for key in keys {
            keyboard.press(key);
        }
        assert!(keyboard.current().contains(KeyCode::F));
        assert!(!keyboard.current().contains(KeyCode::G));
        assert_eq!(keyboard.pending_reports(), 6);
    }

    #[test]
    fn keyboard_queue_keeps_latest_reports() {
        let mut keyboard = KeyboardState::new();
        for _ in 0..KEYBOARD_QUEUE_DEPTH {
            keyboard.press(KeyCode::Up);
            keyboard.release(KeyCode::Up);
        }
        assert_eq!(keyboard.pending_reports(), KEYBOARD_QUEUE_DEPTH);
        let mut last = None;
        while let Some(report) = keyboard.pop_report() {
            last = Some(report);
        }
        assert_eq!(last.map(|r| r.keycodes), Some([0; 6]));
        assert!(keyboard.current().is_empty());
    }

    #[test]
    fn repeated_press_does_not_duplicate_key() {
        let mut keyboard = KeyboardState::new();
        keyboard.press(KeyCode::Space);
        keyboard.press(KeyCode::Space);
        assert_eq!(
            keyboard.current().keycodes.iter().filter(|&&k| k == KeyCode::Space.usage()).count(),
            1
        );
    }
}
