//! Pin numbering and pin functions.
//!
//! This module defines strong types for GPIO line numbers and the functions a line can
//! perform. It provides the following:
//! 1. **Type Safety:** `PinIndex` can only hold a line that exists on the block.
//! 2. **Register Geometry:** Bank, bit mask and function-select position of a line.
//! 3. **Function Codes:** The 3-bit function-select encoding as an enum.

use std::fmt;

use super::constants::{FSEL_FIELD_BITS, FSEL_FIELD_MASK, NUM_PINS, PINS_PER_BANK, PINS_PER_FSEL};
use super::error::PinError;

/// A GPIO line number in `0..54`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PinIndex(u8);

impl PinIndex {
    /// Creates a pin index, rejecting lines the block does not have.
    ///
    /// # Arguments
    ///
    /// * `pin` - Native BCM line number.
    ///
    /// # Returns
    ///
    /// The validated index, or `PinError::OutOfRange` for `pin >= 54`.
    pub fn new(pin: u32) -> Result<Self, PinError> {
        if (pin as usize) < NUM_PINS {
            Ok(Self(pin as u8))
        } else {
            Err(PinError::OutOfRange {
                pin,
                limit: NUM_PINS as u32,
            })
        }
    }

    /// Iterates over every line of the block in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_PINS as u8).map(Self)
    }

    /// Returns the raw line number.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0 as u32
    }

    /// Returns the bank register (0 or 1) holding this line's bit.
    #[inline(always)]
    pub const fn bank(self) -> usize {
        self.0 as usize / PINS_PER_BANK
    }

    /// Returns the single-bit mask of this line inside its bank register.
    #[inline(always)]
    pub const fn mask(self) -> u32 {
        1 << (self.0 as usize % PINS_PER_BANK)
    }

    /// Returns which `GPFSELn` register encodes this line.
    #[inline(always)]
    pub const fn fsel_register(self) -> usize {
        self.0 as usize / PINS_PER_FSEL
    }

    /// Returns the bit position of this line's field inside its `GPFSELn` register.
    #[inline(always)]
    pub const fn fsel_shift(self) -> u32 {
        (self.0 as usize % PINS_PER_FSEL) as u32 * FSEL_FIELD_BITS
    }
}

impl TryFrom<u32> for PinIndex {
    type Error = PinError;

    fn try_from(pin: u32) -> Result<Self, Self::Error> {
        Self::new(pin)
    }
}

impl fmt::Display for PinIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GPIO{}", self.0)
    }
}

/// Function selected for a line by its 3-bit `GPFSELn` field.
///
/// Codes 0 and 1 are plain input and output; 2..=6 are the alternate functions in
/// field order, and 7 is kept as a reserved code so every field value decodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PinFunction {
    /// `0b000`: the line is sampled into `GPLEVn`.
    Input,
    /// `0b001`: the line follows `GPSETn`/`GPCLRn`.
    Output,
    /// `0b010`.
    Alt1,
    /// `0b011`.
    Alt2,
    /// `0b100`.
    Alt3,
    /// `0b101`.
    Alt4,
    /// `0b110`.
    Alt5,
    /// `0b111`.
    Reserved,
}

impl PinFunction {
    /// Decodes a function-select field; only the low three bits are looked at.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & FSEL_FIELD_MASK {
            0 => Self::Input,
            1 => Self::Output,
            2 => Self::Alt1,
            3 => Self::Alt2,
            4 => Self::Alt3,
            5 => Self::Alt4,
            6 => Self::Alt5,
            _ => Self::Reserved,
        }
    }

    /// Returns the 3-bit field value for this function.
    pub const fn bits(self) -> u32 {
        match self {
            Self::Input => 0,
            Self::Output => 1,
            Self::Alt1 => 2,
            Self::Alt2 => 3,
            Self::Alt3 => 4,
            Self::Alt4 => 5,
            Self::Alt5 => 6,
            Self::Reserved => 7,
        }
    }

    /// Short name used by the inspection tools.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Input => "In",
            Self::Output => "Out",
            Self::Alt1 => "Alt1",
            Self::Alt2 => "Alt2",
            Self::Alt3 => "Alt3",
            Self::Alt4 => "Alt4",
            Self::Alt5 => "Alt5",
            Self::Reserved => "Rsvd",
        }
    }
}

impl fmt::Display for PinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
