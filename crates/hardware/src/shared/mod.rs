//! Shared GPIO segment.
//!
//! The device publishes its pin configuration and output state to a small record that
//! unrelated host processes map at the same time: indicator and button front-ends,
//! inspection tools, latency probes. This module defines that record and the ways to
//! reach it:
//! 1. **Layout:** `SharedState`, ten `u32` words in a fixed order.
//! 2. **Ports:** `SharedStatePort`, the narrow load/store interface every backing implements.
//! 3. **Backings:** `ShmSegment` (System V shared memory) and `LocalSegment` (in-process).
//! 4. **Pin Map:** `PIN_MAP`, the narrow 0-7 numbering used by the external front-ends.
//!
//! Nothing here synchronizes: readers may observe a record mid-update.

/// Narrow-to-native pin translation for the external front-ends.
pub mod pin_map;

/// Port trait and the in-process backing.
pub mod port;

/// System V shared memory backing.
pub mod segment;

use serde::{Deserialize, Serialize};

use crate::common::constants::{NUM_BANKS, NUM_FSEL};
use crate::common::pin::{PinFunction, PinIndex};
use crate::soc::devices::gpio::function::function_from_fsel;

pub use pin_map::{PIN_MAP, native_pin};
pub use port::{LocalSegment, SharedStatePort};
pub use segment::ShmSegment;

/// Number of 32-bit words in the shared record.
pub const SHARED_WORDS: usize = 10;

/// One word of the shared record, numbered by its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum SharedField {
    /// `GPFSEL0`, pins 0-9.
    Fsel0 = 0,
    /// `GPFSEL1`, pins 10-19.
    Fsel1 = 1,
    /// `GPFSEL2`, pins 20-29.
    Fsel2 = 2,
    /// `GPFSEL3`, pins 30-39.
    Fsel3 = 3,
    /// `GPFSEL4`, pins 40-49.
    Fsel4 = 4,
    /// `GPFSEL5`, pins 50-53.
    Fsel5 = 5,
    /// `GPLEV0`, input levels of pins 0-31.
    Level0 = 6,
    /// `GPLEV1`, input levels of pins 32-53.
    Level1 = 7,
    /// Derived output state of pins 0-31.
    OutState0 = 8,
    /// Derived output state of pins 32-53.
    OutState1 = 9,
}

impl SharedField {
    /// Every field in record order.
    pub const ALL: [Self; SHARED_WORDS] = [
        Self::Fsel0,
        Self::Fsel1,
        Self::Fsel2,
        Self::Fsel3,
        Self::Fsel4,
        Self::Fsel5,
        Self::Level0,
        Self::Level1,
        Self::OutState0,
        Self::OutState1,
    ];

    /// Function-select fields, indexed by register number.
    pub const FSEL: [Self; NUM_FSEL] = [
        Self::Fsel0,
        Self::Fsel1,
        Self::Fsel2,
        Self::Fsel3,
        Self::Fsel4,
        Self::Fsel5,
    ];

    /// Level fields, indexed by bank.
    pub const LEVEL: [Self; NUM_BANKS] = [Self::Level0, Self::Level1];

    /// Output state fields, indexed by bank.
    pub const OUTSTATE: [Self; NUM_BANKS] = [Self::OutState0, Self::OutState1];

    /// Word index of the field inside the record.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The shared record, laid out exactly as every attaching process expects it.
///
/// Field order and widths are an ABI: ten native-endian `u32` words, 40 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct SharedState {
    /// `GPFSEL0`..`GPFSEL5` as last pushed by the device.
    pub fsel: [u32; NUM_FSEL],
    /// Input levels; written by external injectors, pulled by the device.
    pub level: [u32; NUM_BANKS],
    /// Derived output state as last pushed by the device.
    pub outstate: [u32; NUM_BANKS],
}

/// Size in bytes of the shared record.
pub const SHARED_STATE_SIZE: usize = size_of::<SharedState>();

impl SharedState {
    /// Returns the word stored in `field`.
    pub const fn get(&self, field: SharedField) -> u32 {
        match field {
            SharedField::Fsel0 => self.fsel[0],
            SharedField::Fsel1 => self.fsel[1],
            SharedField::Fsel2 => self.fsel[2],
            SharedField::Fsel3 => self.fsel[3],
            SharedField::Fsel4 => self.fsel[4],
            SharedField::Fsel5 => self.fsel[5],
            SharedField::Level0 => self.level[0],
            SharedField::Level1 => self.level[1],
            SharedField::OutState0 => self.outstate[0],
            SharedField::OutState1 => self.outstate[1],
        }
    }

    /// Decodes the function of `pin` from the published function-select words.
    pub fn function(&self, pin: PinIndex) -> PinFunction {
        function_from_fsel(&self.fsel, pin)
    }

    /// Returns the input level bit of `pin`.
    pub const fn level(&self, pin: PinIndex) -> bool {
        self.level[pin.bank()] & pin.mask() != 0
    }

    /// Returns the derived output bit of `pin`.
    pub const fn output(&self, pin: PinIndex) -> bool {
        self.outstate[pin.bank()] & pin.mask() != 0
    }

    /// Returns whether the configuration a consumer watches (functions and outputs) differs.
    pub fn config_differs(&self, other: &Self) -> bool {
        self.fsel != other.fsel || self.outstate != other.outstate
    }
}
