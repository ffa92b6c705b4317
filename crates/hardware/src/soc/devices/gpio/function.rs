//! Pin function decoding.
//!
//! Each pin owns a 3-bit field in one of the six `GPFSELn` registers: pins 0-9 live in
//! `GPFSEL0`, 10-19 in `GPFSEL1`, and so on up to 50-53 in `GPFSEL5`. The decoder is
//! evaluated on every access and never caches, since the guest can rewrite a
//! function-select register at any time.

use crate::common::constants::{FSEL_FIELD_MASK, NUM_FSEL};
use crate::common::pin::{PinFunction, PinIndex};

use super::regs::RegisterFile;

/// Decodes the function of `pin` from a bare set of function-select words.
///
/// Shared by the device and by host-side consumers reading the segment, so both sides
/// agree on the field layout.
#[inline]
pub fn function_from_fsel(fsel: &[u32; NUM_FSEL], pin: PinIndex) -> PinFunction {
    PinFunction::from_bits((fsel[pin.fsel_register()] >> pin.fsel_shift()) & FSEL_FIELD_MASK)
}

/// Returns the function currently selected for `pin`.
#[inline]
pub fn function_of(regs: &RegisterFile, pin: PinIndex) -> PinFunction {
    function_from_fsel(regs.fsel(), pin)
}

/// Returns `current` with the field of `pin` replaced by `function`.
///
/// `current` must be the `GPFSELn` word that encodes `pin`; other fields are preserved.
pub const fn encode_function(current: u32, pin: PinIndex, function: PinFunction) -> u32 {
    let shift = pin.fsel_shift();
    (current & !(FSEL_FIELD_MASK << shift)) | (function.bits() << shift)
}

/// Iterates over the pins whose current function is `function`.
pub fn pins_with(regs: &RegisterFile, function: PinFunction) -> impl Iterator<Item = PinIndex> + '_ {
    PinIndex::all().filter(move |&pin| function_of(regs, pin) == function)
}
