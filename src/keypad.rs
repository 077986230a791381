//! Keypad decoding
//!
//! The keypad half of a ColecoVision style controller reports a 4-bit code
//! on the direction wires. Twelve of the sixteen codes are telephone keys;
//! the SuperAction controller reuses codes 7 and 11 for its purple and blue
//! fire buttons. The code-to-key assignment is fixed by the controller's
//! wiring and is not contiguous.

/// Decoded 4-bit keypad code, always in `0..=15`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadCode(u8);

/// Code reported by the SuperAction purple fire button.
pub const PURPLE_FIRE_CODE: KeypadCode = KeypadCode(7);
/// Code reported by the SuperAction blue fire button.
pub const BLUE_FIRE_CODE: KeypadCode = KeypadCode(11);

impl KeypadCode {
    pub const NONE: KeypadCode = KeypadCode(0);

    /// Pack the debounced bit lines, `bit0` least significant.
    pub const fn from_bits(bit0: bool, bit1: bool, bit2: bool, bit3: bool) -> Self {
        KeypadCode((bit3 as u8) << 3 | (bit2 as u8) << 2 | (bit1 as u8) << 1 | bit0 as u8)
    }

    pub const fn from_bit_array(bits: [bool; 4]) -> Self {
        Self::from_bits(bits[0], bits[1], bits[2], bits[3])
    }

    /// Build from a raw value, keeping only the low four bits.
    pub const fn from_raw(value: u8) -> Self {
        KeypadCode(value & 0x0F)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn special_flags(self) -> SpecialFlags {
        SpecialFlags {
            purple_fire: self.0 == PURPLE_FIRE_CODE.0,
            blue_fire: self.0 == BLUE_FIRE_CODE.0,
        }
    }

    pub const fn symbol(self) -> Option<KeypadSymbol> {
        KeypadSymbol::from_code(self)
    }
}

/// SuperAction extra fire buttons hidden in the keypad code space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpecialFlags {
    pub purple_fire: bool,
    pub blue_fire: bool,
}

/// Telephone keypad key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeypadSymbol {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Zero,
    Star,
    Pound,
}

/// Code → symbol, as wired in the controller.
const CODE_TABLE: [Option<KeypadSymbol>; 16] = [
    None,
    Some(KeypadSymbol::Six),
    Some(KeypadSymbol::One),
    Some(KeypadSymbol::Three),
    Some(KeypadSymbol::Nine),
    Some(KeypadSymbol::Zero),
    Some(KeypadSymbol::Star),
    None, // purple fire
    Some(KeypadSymbol::Two),
    Some(KeypadSymbol::Pound),
    Some(KeypadSymbol::Seven),
    None, // blue fire
    Some(KeypadSymbol::Five),
    Some(KeypadSymbol::Four),
    Some(KeypadSymbol::Eight),
    None,
];

impl KeypadSymbol {
    /// Every key, in the order 1–9, 0, `*`, `#`.
    pub const ALL: [KeypadSymbol; 12] = [
        KeypadSymbol::One,
        KeypadSymbol::Two,
        KeypadSymbol::Three,
        KeypadSymbol::Four,
        KeypadSymbol::Five,
        KeypadSymbol::Six,
        KeypadSymbol::Seven,
        KeypadSymbol::Eight,
        KeypadSymbol::Nine,
        KeypadSymbol::Zero,
        KeypadSymbol::Star,
        KeypadSymbol::Pound,
    ];

    pub const fn from_code(code: KeypadCode) -> Option<Self> {
        CODE_TABLE[code.index()]
    }

    pub const fn code(self) -> KeypadCode {
        KeypadCode(match self {
            KeypadSymbol::One => 2,
            KeypadSymbol::Two => 8,
            KeypadSymbol::Three => 3,
            KeypadSymbol::Four => 13,
            KeypadSymbol::Five => 12,
            KeypadSymbol::Six => 1,
            KeypadSymbol::Seven => 10,
            KeypadSymbol::Eight => 14,
            KeypadSymbol::Nine => 4,
            KeypadSymbol::Zero => 5,
            KeypadSymbol::Star => 6,
            KeypadSymbol::Pound => 9,
        })
    }

    pub const fn as_char(self) -> char {
        match self {
            KeypadSymbol::One => '1',
            KeypadSymbol::Two => '2',
            KeypadSymbol::Three => '3',
            KeypadSymbol::Four => '4',
            KeypadSymbol::Five => '5',
            KeypadSymbol::Six => '6',
            KeypadSymbol::Seven => '7',
            KeypadSymbol::Eight => '8',
            KeypadSymbol::Nine => '9',
            KeypadSymbol::Zero => '0',
            KeypadSymbol::Star => '*',
            KeypadSymbol::Pound => '#',
        }
    }
}

// ===================================================================
// Mapping Tables
// ===================================================================

/// One value per keypad key, named after the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeypadLayout<T> {
    pub one: T,
    pub two: T,
    pub three: T,
    pub four: T,
    pub five: T,
    pub six: T,
    pub seven: T,
    pub eight: T,
    pub nine: T,
    pub zero: T,
    pub star: T,
    pub pound: T,
}

impl<T: Copy> KeypadLayout<T> {
    /// Build from twelve values in the order 1–9, 0, `*`, `#`.
    pub fn from_array(values: [T; 12]) -> Self {
        Self {
            one: values[0],
            two: values[1],
            three: values[2],
            four: values[3],
            five: values[4],
            six: values[5],
            seven: values[6],
            eight: values[7],
            nine: values[8],
            zero: values[9],
            star: values[10],
            pound: values[11],
        }
    }

    pub fn get(&self, symbol: KeypadSymbol) -> T {
        match symbol {
            KeypadSymbol::One => self.one,
            KeypadSymbol::Two => self.two,
            KeypadSymbol::Three => self.three,
            KeypadSymbol::Four => self.four,
            KeypadSymbol::Five => self.five,
            KeypadSymbol::Six => self.six,
            KeypadSymbol::Seven => self.seven,
            KeypadSymbol::Eight => self.eight,
            KeypadSymbol::Nine => self.nine,
            KeypadSymbol::Zero => self.zero,
            KeypadSymbol::Star => self.star,
            KeypadSymbol::Pound => self.pound,
        }
    }
}

/// Sixteen-entry lookup from keypad code to a button or key.
///
/// Codes without a keypad key (0, 7, 11 and 15) are always `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeypadTable<T> {
    entries: [Option<T>; 16],
}

impl<T: Copy> KeypadTable<T> {
    pub fn empty() -> Self {
        Self { entries: [None; 16] }
    }

    pub fn from_layout(layout: &KeypadLayout<T>) -> Self {
        let mut table = Self::empty();
        for symbol in KeypadSymbol::ALL {
            table.entries[symbol.code().index()] = Some(layout.get(symbol));
        }
        table
    }

    #[inline]
    pub fn lookup(&self, code: KeypadCode) -> Option<T> {
        self.entries[code.index()]
    }
}

impl<T: Copy> From<KeypadLayout<T>> for KeypadTable<T> {
    fn from(layout: KeypadLayout<T>) -> Self {
        Self::from_layout(&layout)
    }
}
