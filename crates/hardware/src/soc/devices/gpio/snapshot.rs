//! Register snapshot for host save/restore.
//!
//! Only bus-addressable registers are captured. `OUTSTATE` and the write counter are
//! device bookkeeping and survive a restore unchanged; the shared segment is not
//! touched until the next accepted write pushes.

use serde::{Deserialize, Serialize};

use crate::common::constants::{NUM_BANKS, NUM_FSEL};
use crate::common::error::SnapshotError;

use super::regs::RegisterFile;

/// Layout version written by this build.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Serializable copy of the bus-addressable GPIO registers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpioSnapshot {
    /// Layout version; must equal `SNAPSHOT_VERSION` to be restored.
    pub version: u32,
    /// `GPFSEL0`..`GPFSEL5`.
    pub fsel: [u32; NUM_FSEL],
    /// Pending `GPSETn` bits.
    pub set: [u32; NUM_BANKS],
    /// Pending `GPCLRn` bits.
    pub clr: [u32; NUM_BANKS],
    /// `GPLEVn`.
    pub lev: [u32; NUM_BANKS],
    /// `GPEDSn`.
    pub eds: [u32; NUM_BANKS],
    /// `GPRENn`.
    pub ren: [u32; NUM_BANKS],
    /// `GPFENn`.
    pub fen: [u32; NUM_BANKS],
    /// `GPHENn`.
    pub hen: [u32; NUM_BANKS],
    /// `GPLENn`.
    pub len: [u32; NUM_BANKS],
    /// `GPARENn`.
    pub aren: [u32; NUM_BANKS],
    /// `GPAFENn`.
    pub afen: [u32; NUM_BANKS],
    /// `GPPUD`.
    pub pud: u32,
    /// `GPPUDCLKn`.
    pub pudclk: [u32; NUM_BANKS],
}

impl GpioSnapshot {
    /// Captures the bus-addressable registers of `regs`.
    pub fn capture(regs: &RegisterFile) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            fsel: regs.fsel,
            set: regs.set,
            clr: regs.clr,
            lev: regs.lev,
            eds: regs.eds,
            ren: regs.ren,
            fen: regs.fen,
            hen: regs.hen,
            len: regs.len,
            aren: regs.aren,
            afen: regs.afen,
            pud: regs.pud,
            pudclk: regs.pudclk,
        }
    }

    /// Loads the captured registers into `regs`.
    ///
    /// # Returns
    ///
    /// `SnapshotError::Version` if the snapshot has a different layout; `regs` is then
    /// left untouched.
    pub fn apply(&self, regs: &mut RegisterFile) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }
        regs.fsel = self.fsel;
        regs.set = self.set;
        regs.clr = self.clr;
        regs.lev = self.lev;
        regs.eds = self.eds;
        regs.ren = self.ren;
        regs.fen = self.fen;
        regs.hen = self.hen;
        regs.len = self.len;
        regs.aren = self.aren;
        regs.afen = self.afen;
        regs.pud = self.pud;
        regs.pudclk = self.pudclk;
        Ok(())
    }
}
