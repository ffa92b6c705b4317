//! External line interface.
//!
//! The surrounding framework drives 54 input lines (voltages asserted from outside the
//! SoC) and sees 54 output lines. Inputs only reach `GPLEVn` for pins configured as
//! Input; asserting a line on any other pin is ignored. Output lines are declared for
//! symmetry with the bus wiring and are never driven by the device.

use crate::common::constants::NUM_PINS;
use crate::common::error::PinError;
use crate::common::pin::{PinFunction, PinIndex};

use super::function::function_of;
use super::regs::RegisterFile;

/// The declared external lines of one GPIO block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lines {
    inputs: usize,
    outputs: Vec<bool>,
}

impl Lines {
    /// Declares `count` input and `count` output lines, capped at the pins of the block.
    pub fn new(count: usize) -> Self {
        let count = count.min(NUM_PINS);
        Self {
            inputs: count,
            outputs: vec![false; count],
        }
    }

    /// Number of declared input lines.
    pub const fn input_count(&self) -> usize {
        self.inputs
    }

    /// Number of declared output lines.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Resolves an input line number to the pin it feeds.
    pub fn input(&self, line: u32) -> Result<PinIndex, PinError> {
        if (line as usize) < self.inputs {
            PinIndex::new(line)
        } else {
            Err(PinError::OutOfRange {
                pin: line,
                limit: self.inputs as u32,
            })
        }
    }

    /// Returns the level of an output line; `None` if the line is not declared.
    pub fn output(&self, line: u32) -> Option<bool> {
        self.outputs.get(line as usize).copied()
    }
}

/// Applies an external level to `pin`.
///
/// # Returns
///
/// `true` if the pin is an Input and its level bit now follows `high`; `false` if the
/// pin has another function and nothing changed.
pub fn apply_input(regs: &mut RegisterFile, pin: PinIndex, high: bool) -> bool {
    if function_of(regs, pin) != PinFunction::Input {
        return false;
    }
    let (bank, mask) = (pin.bank(), pin.mask());
    if high {
        regs.lev[bank] |= mask;
    } else {
        regs.lev[bank] &= !mask;
    }
    true
}
