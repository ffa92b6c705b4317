//! Narrow external pin numbering.
//!
//! The indicator and button front-ends, and the tools built on them, only know eight
//! lines numbered 0-7 (the wiringPi numbering of the header). Every one of them must
//! translate through this table before touching a bit of the shared record.

use crate::common::error::PinError;
use crate::common::pin::PinIndex;

/// Native BCM line for each narrow pin number 0-7.
pub const PIN_MAP: [u8; 8] = [17, 18, 21, 22, 23, 24, 25, 4];

/// Translates a narrow pin number into the native line it drives.
///
/// # Arguments
///
/// * `narrow` - Front-end pin number in `0..8`.
///
/// # Returns
///
/// The native pin, or `PinError::OutOfRange` for `narrow >= 8`.
pub fn native_pin(narrow: u32) -> Result<PinIndex, PinError> {
    let native = PIN_MAP
        .get(narrow as usize)
        .ok_or(PinError::OutOfRange {
            pin: narrow,
            limit: PIN_MAP.len() as u32,
        })?;
    PinIndex::new(u32::from(*native))
}

/// Translates a native line back to its narrow number, if the front-ends expose it.
pub fn narrow_pin(native: PinIndex) -> Option<u32> {
    PIN_MAP
        .iter()
        .position(|&p| u32::from(p) == native.val())
        .map(|i| i as u32)
}
