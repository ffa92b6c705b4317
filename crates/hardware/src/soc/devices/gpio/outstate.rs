//! Output state derivation.
//!
//! `GPSETn` and `GPCLRn` are one-shot: a written bit applies its effect once and then
//! reads back as zero. This module folds them into the persistent `OUTSTATE` pair after
//! every bus write.

use crate::common::pin::{PinFunction, PinIndex};

use super::function::function_from_fsel;
use super::regs::RegisterFile;

/// Applies pending set/clear requests of Output pins to `OUTSTATE`.
///
/// For each Output pin a pending SET sets the output bit; otherwise a pending CLR
/// clears it. When SET and CLR are pending together, SET wins and the CLR bit is
/// consumed with it, so a combined request leaves the pin high and nothing pending.
/// Pins with any other function are skipped entirely, so their one-shot bits stay
/// pending until the pin becomes an output.
///
/// # Returns
///
/// The number of pins whose one-shot bits were consumed.
pub fn derive_output_state(regs: &mut RegisterFile) -> usize {
    let fsel = *regs.fsel();
    let mut applied = 0;

    for pin in PinIndex::all() {
        if function_from_fsel(&fsel, pin) != PinFunction::Output {
            continue;
        }
        let (bank, mask) = (pin.bank(), pin.mask());
        if regs.set[bank] & mask != 0 {
            regs.outstate[bank] |= mask;
            regs.set[bank] &= !mask;
            regs.clr[bank] &= !mask;
            applied += 1;
        } else if regs.clr[bank] & mask != 0 {
            regs.outstate[bank] &= !mask;
            regs.clr[bank] &= !mask;
            applied += 1;
        }
    }

    applied
}
