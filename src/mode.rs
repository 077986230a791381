//! Per-channel output mode configuration
//!
//! Every controller channel is emulated either as joystick axes/buttons or
//! as keyboard keys. The mode and its mapping travel together in one
//! [`ChannelMode`] value, so a channel can never be tagged joystick while
//! holding a keyboard mapping.

use crate::keypad::{KeypadLayout, KeypadTable};
use crate::keys::KeyCode;
use crate::types::ButtonIndex;

/// Output mode of one channel together with its mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelMode<J, K> {
    Joystick(J),
    Keyboard(K),
}

impl<J, K> ChannelMode<J, K> {
    pub const fn is_joystick(&self) -> bool {
        matches!(self, ChannelMode::Joystick(_))
    }

    pub const fn is_keyboard(&self) -> bool {
        matches!(self, ChannelMode::Keyboard(_))
    }
}

// ===================================================================
// Channel Mappings
// ===================================================================

/// Keys emitted for the four directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: KeyCode,
    pub down: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
}

impl Default for DirectionKeys {
    fn default() -> Self {
        Self {
            up: KeyCode::Up,
            down: KeyCode::Down,
            left: KeyCode::Left,
            right: KeyCode::Right,
        }
    }
}

/// Mapping of the left and right fire buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FireMapping<T> {
    pub left: T,
    pub right: T,
}

impl Default for FireMapping<ButtonIndex> {
    fn default() -> Self {
        Self { left: 0, right: 1 }
    }
}

impl Default for FireMapping<KeyCode> {
    fn default() -> Self {
        Self {
            left: KeyCode::LAlt,
            right: KeyCode::LCtrl,
        }
    }
}

/// Mapping of the SuperAction purple and blue fire buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtraFireMapping<T> {
    pub purple: T,
    pub blue: T,
}

impl Default for ExtraFireMapping<ButtonIndex> {
    fn default() -> Self {
        Self { purple: 2, blue: 3 }
    }
}

impl Default for ExtraFireMapping<KeyCode> {
    fn default() -> Self {
        Self {
            purple: KeyCode::KpMinus,
            blue: KeyCode::KpPlus,
        }
    }
}

impl Default for KeypadLayout<ButtonIndex> {
    fn default() -> Self {
        Self {
            one: 4,
            two: 5,
            three: 6,
            four: 7,
            five: 8,
            six: 9,
            seven: 10,
            eight: 11,
            nine: 12,
            star: 13,
            zero: 14,
            pound: 15,
        }
    }
}

impl Default for KeypadLayout<KeyCode> {
    fn default() -> Self {
        Self {
            one: KeyCode::Kp1,
            two: KeyCode::Kp2,
            three: KeyCode::Kp3,
            four: KeyCode::Kp4,
            five: KeyCode::Kp5,
            six: KeyCode::Kp6,
            seven: KeyCode::Kp7,
            eight: KeyCode::Kp8,
            nine: KeyCode::Kp9,
            zero: KeyCode::Kp0,
            star: KeyCode::KpDot,
            pound: KeyCode::KpEnter,
        }
    }
}

pub type DirectionMode = ChannelMode<(), DirectionKeys>;
pub type FireMode = ChannelMode<FireMapping<ButtonIndex>, FireMapping<KeyCode>>;
pub type ExtraFireMode = ChannelMode<ExtraFireMapping<ButtonIndex>, ExtraFireMapping<KeyCode>>;
pub type KeypadMode = ChannelMode<KeypadTable<ButtonIndex>, KeypadTable<KeyCode>>;

// ===================================================================
// Mode Configuration
// ===================================================================

/// Output mode of all four channels.
///
/// Every channel starts in joystick mode with its default mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeConfig {
    direction: DirectionMode,
    fire: FireMode,
    extra_fire: ExtraFireMode,
    keypad: KeypadMode,
}

impl ModeConfig {
    pub fn new() -> Self {
        Self {
            direction: ChannelMode::Joystick(()),
            fire: ChannelMode::Joystick(FireMapping::default()),
            extra_fire: ChannelMode::Joystick(ExtraFireMapping::default()),
            keypad: ChannelMode::Joystick(KeypadTable::from_layout(&KeypadLayout::default())),
        }
    }

    /// Directions drive the joystick X/Y axes.
    pub fn set_direction_joystick(&mut self) {
        self.direction = ChannelMode::Joystick(());
    }

    /// Directions press and release keys.
    pub fn set_direction_keyboard(&mut self, keys: DirectionKeys) {
        self.direction = ChannelMode::Keyboard(keys);
    }

    pub fn set_fire_joystick(&mut self, buttons: FireMapping<ButtonIndex>) {
        self.fire = ChannelMode::Joystick(buttons);
    }

    pub fn set_fire_keyboard(&mut self, keys: FireMapping<KeyCode>) {
        self.fire = ChannelMode::Keyboard(keys);
    }

    pub fn set_extra_fire_joystick(&mut self, buttons: ExtraFireMapping<ButtonIndex>) {
        self.extra_fire = ChannelMode::Joystick(buttons);
    }

    pub fn set_extra_fire_keyboard(&mut self, keys: ExtraFireMapping<KeyCode>) {
        self.extra_fire = ChannelMode::Keyboard(keys);
    }

    pub fn set_keypad_joystick(&mut self, buttons: KeypadLayout<ButtonIndex>) {
        self.keypad = ChannelMode::Joystick(KeypadTable::from_layout(&buttons));
    }

    pub fn set_keypad_keyboard(&mut self, keys: KeypadLayout<KeyCode>) {
        self.keypad = ChannelMode::Keyboard(KeypadTable::from_layout(&keys));
    }

    pub const fn direction(&self) -> &DirectionMode {
        &self.direction
    }

    pub const fn fire(&self) -> &FireMode {
        &self.fire
    }

    pub const fn extra_fire(&self) -> &ExtraFireMode {
        &self.extra_fire
    }

    pub const fn keypad(&self) -> &KeypadMode {
        &self.keypad
    }

    pub const fn any_joystick(&self) -> bool {
        self.direction.is_joystick()
            || self.fire.is_joystick()
            || self.extra_fire.is_joystick()
            || self.keypad.is_joystick()
    }
}

impl Default for ModeConfig {
    fn default() -> Self {
        Self::new()
    }
}
