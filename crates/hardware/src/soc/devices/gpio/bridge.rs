//! Register file to shared segment bridge.
//!
//! Strictly one-way in each direction:
//! * **push** (after every accepted write) copies `GPFSELn` and `OUTSTATE` out;
//! * **pull** (before every read) copies the level bit of each Input pin in.
//!
//! The bridge may be detached when the segment could not be attached at start-up. A
//! detached bridge skips every operation and says so in the log instead of touching an
//! invalid mapping.

use crate::common::error::SegmentError;
use crate::common::pin::{PinFunction, PinIndex};
use crate::shared::SharedStatePort;

use super::function::function_from_fsel;
use super::regs::RegisterFile;

/// Connection between the device and the shared record.
pub struct SharedBridge {
    port: Option<Box<dyn SharedStatePort>>,
    skipped: u64,
}

impl std::fmt::Debug for SharedBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBridge")
            .field("attached", &self.port.is_some())
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl SharedBridge {
    /// Creates a bridge over an attached port.
    pub fn attached(port: Box<dyn SharedStatePort>) -> Self {
        Self {
            port: Some(port),
            skipped: 0,
        }
    }

    /// Creates a bridge with no segment behind it.
    pub fn detached() -> Self {
        Self {
            port: None,
            skipped: 0,
        }
    }

    /// Creates a bridge from the outcome of attaching a segment, logging a failure.
    pub fn from_attach<P>(result: Result<P, SegmentError>) -> Self
    where
        P: SharedStatePort + 'static,
    {
        match result {
            Ok(port) => Self::attached(Box::new(port)),
            Err(err) => {
                tracing::error!(error = %err, "shared GPIO segment unavailable, bridge detached");
                Self::detached()
            }
        }
    }

    /// Returns whether a segment is attached.
    pub const fn is_attached(&self) -> bool {
        self.port.is_some()
    }

    /// Returns the attached port, if any.
    pub fn port(&self) -> Option<&dyn SharedStatePort> {
        self.port.as_deref()
    }

    /// Returns how many push/pull operations were skipped for lack of a segment.
    pub const fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Publishes function selects and derived output state.
    ///
    /// Never touches the level registers.
    pub fn push(&mut self, regs: &RegisterFile) {
        let Some(port) = self.port.as_deref() else {
            self.skip("push");
            return;
        };
        port.push(regs.fsel(), regs.outstate());
        tracing::trace!(fsel = ?regs.fsel(), outstate = ?regs.outstate(), "pushed GPIO state");
    }

    /// Refreshes the level bits of Input pins from the shared record.
    ///
    /// Pins with any other function keep their level bit. Function selects and output
    /// state are never modified.
    pub fn pull(&mut self, regs: &mut RegisterFile) {
        let Some(port) = self.port.as_deref() else {
            self.skip("pull");
            return;
        };
        let shared = port.pull_levels();
        let fsel = *regs.fsel();
        for pin in PinIndex::all() {
            if function_from_fsel(&fsel, pin) != PinFunction::Input {
                continue;
            }
            let (bank, mask) = (pin.bank(), pin.mask());
            if shared[bank] & mask != 0 {
                regs.lev[bank] |= mask;
            } else {
                regs.lev[bank] &= !mask;
            }
        }
        tracing::trace!(levels = ?regs.levels(), "pulled GPIO levels");
    }

    fn skip(&mut self, op: &'static str) {
        if self.skipped == 0 {
            tracing::warn!(op, "shared GPIO segment not attached, skipping");
        } else {
            tracing::trace!(op, skipped = self.skipped, "shared GPIO segment not attached, skipping");
        }
        self.skipped += 1;
    }
}
