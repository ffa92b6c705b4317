//! GPIO register file and register map.
//!
//! This module holds the architectural state of the block and the single table that
//! places each register in the MMIO window. It provides:
//! 1. **Storage:** Every bus-visible register plus the derived `OUTSTATE` pair and a write counter.
//! 2. **Identification:** `Reg` names one bus-visible register independently of its offset.
//! 3. **Register Map:** `REGISTER_MAP` pairs offsets with registers and access classes; both
//!    the read and the write path decode through it.
//!
//! # Memory Map
//!
//! * `0x00`-`0x14`: `GPFSEL0`-`GPFSEL5` (R/W)
//! * `0x1c`, `0x20`: `GPSET0`/`GPSET1` (W)
//! * `0x28`, `0x2c`: `GPCLR0`/`GPCLR1` (W)
//! * `0x34`, `0x38`: `GPLEV0`/`GPLEV1` (R)
//! * `0x40`-`0x8c`: event detect status and enables (R/W)
//! * `0x94`-`0x9c`: `GPPUD`, `GPPUDCLK0`/`GPPUDCLK1` (R/W)

use crate::common::constants::{NUM_BANKS, NUM_FSEL, REGISTER_BYTES};
use crate::common::data::AccessType;
use crate::common::error::AccessError;

/// A bus-visible GPIO register.
///
/// Banked registers carry the bank index (0 or 1); function-select registers carry
/// their number (0 to 5).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    /// `GPFSELn`: function select, 3 bits per pin.
    Fsel(usize),
    /// `GPSETn`: one-shot output set.
    Set(usize),
    /// `GPCLRn`: one-shot output clear.
    Clr(usize),
    /// `GPLEVn`: pin level.
    Lev(usize),
    /// `GPEDSn`: event detect status.
    Eds(usize),
    /// `GPRENn`: rising edge detect enable.
    Ren(usize),
    /// `GPFENn`: falling edge detect enable.
    Fen(usize),
    /// `GPHENn`: high level detect enable.
    Hen(usize),
    /// `GPLENn`: low level detect enable.
    Len(usize),
    /// `GPARENn`: async rising edge detect enable.
    Aren(usize),
    /// `GPAFENn`: async falling edge detect enable.
    Afen(usize),
    /// `GPPUD`: pull-up/down control.
    Pud,
    /// `GPPUDCLKn`: pull-up/down clock.
    PudClk(usize),
}

impl Reg {
    /// Returns whether the register exists in the block.
    ///
    /// `Reg::Set(2)` or `Reg::Fsel(6)` can be spelled but name nothing; such registers
    /// read as zero and ignore writes.
    pub const fn is_mapped(self) -> bool {
        match self {
            Self::Fsel(n) => n < NUM_FSEL,
            Self::Pud => true,
            Self::Set(n)
            | Self::Clr(n)
            | Self::Lev(n)
            | Self::Eds(n)
            | Self::Ren(n)
            | Self::Fen(n)
            | Self::Hen(n)
            | Self::Len(n)
            | Self::Aren(n)
            | Self::Afen(n)
            | Self::PudClk(n) => n < NUM_BANKS,
        }
    }

    /// Returns the datasheet mnemonic of the register, or `"unmapped"`.
    pub const fn name(self) -> &'static str {
        const FSEL: [&str; NUM_FSEL] = [
            "GPFSEL0", "GPFSEL1", "GPFSEL2", "GPFSEL3", "GPFSEL4", "GPFSEL5",
        ];
        const fn banked(names: [&'static str; NUM_BANKS], n: usize) -> &'static str {
            if n < NUM_BANKS { names[n] } else { "unmapped" }
        }
        match self {
            Self::Fsel(n) => {
                if n < NUM_FSEL {
                    FSEL[n]
                } else {
                    "unmapped"
                }
            }
            Self::Set(n) => banked(["GPSET0", "GPSET1"], n),
            Self::Clr(n) => banked(["GPCLR0", "GPCLR1"], n),
            Self::Lev(n) => banked(["GPLEV0", "GPLEV1"], n),
            Self::Eds(n) => banked(["GPEDS0", "GPEDS1"], n),
            Self::Ren(n) => banked(["GPREN0", "GPREN1"], n),
            Self::Fen(n) => banked(["GPFEN0", "GPFEN1"], n),
            Self::Hen(n) => banked(["GPHEN0", "GPHEN1"], n),
            Self::Len(n) => banked(["GPLEN0", "GPLEN1"], n),
            Self::Aren(n) => banked(["GPAREN0", "GPAREN1"], n),
            Self::Afen(n) => banked(["GPAFEN0", "GPAFEN1"], n),
            Self::Pud => "GPPUD",
            Self::PudClk(n) => banked(["GPPUDCLK0", "GPPUDCLK1"], n),
        }
    }
}

/// Guest-facing access class of a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Plain storage, readable and writable.
    ReadWrite,
    /// Guest writes are rejected as bad offsets.
    ReadOnly,
    /// Guest reads are rejected as bad offsets.
    WriteOnly,
}

impl Access {
    /// Returns whether the guest may read through this class.
    pub const fn readable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::ReadOnly)
    }

    /// Returns whether the guest may write through this class.
    pub const fn writable(self) -> bool {
        matches!(self, Self::ReadWrite | Self::WriteOnly)
    }
}

/// One entry of the register map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RegisterDescriptor {
    /// Byte offset inside the MMIO window.
    pub offset: u64,
    /// Register width in bytes.
    pub bytes: u64,
    /// Guest access class.
    pub access: Access,
    /// Register behind the offset.
    pub reg: Reg,
}

const fn rw(offset: u64, reg: Reg) -> RegisterDescriptor {
    RegisterDescriptor {
        offset,
        bytes: REGISTER_BYTES,
        access: Access::ReadWrite,
        reg,
    }
}

const fn ro(offset: u64, reg: Reg) -> RegisterDescriptor {
    RegisterDescriptor {
        offset,
        bytes: REGISTER_BYTES,
        access: Access::ReadOnly,
        reg,
    }
}

const fn wo(offset: u64, reg: Reg) -> RegisterDescriptor {
    RegisterDescriptor {
        offset,
        bytes: REGISTER_BYTES,
        access: Access::WriteOnly,
        reg,
    }
}

/// Every addressable register of the block, in offset order.
///
/// Offsets absent from this table (the reserved words at `0x18`, `0x24`, ... `0xa0`, the
/// `0xb0` test word, and anything unaligned or past the map) are bad offsets in both
/// directions.
pub const REGISTER_MAP: [RegisterDescriptor; 29] = [
    rw(0x00, Reg::Fsel(0)),
    rw(0x04, Reg::Fsel(1)),
    rw(0x08, Reg::Fsel(2)),
    rw(0x0c, Reg::Fsel(3)),
    rw(0x10, Reg::Fsel(4)),
    rw(0x14, Reg::Fsel(5)),
    wo(0x1c, Reg::Set(0)),
    wo(0x20, Reg::Set(1)),
    wo(0x28, Reg::Clr(0)),
    wo(0x2c, Reg::Clr(1)),
    ro(0x34, Reg::Lev(0)),
    ro(0x38, Reg::Lev(1)),
    rw(0x40, Reg::Eds(0)),
    rw(0x44, Reg::Eds(1)),
    rw(0x4c, Reg::Ren(0)),
    rw(0x50, Reg::Ren(1)),
    rw(0x58, Reg::Fen(0)),
    rw(0x5c, Reg::Fen(1)),
    rw(0x64, Reg::Hen(0)),
    rw(0x68, Reg::Hen(1)),
    rw(0x70, Reg::Len(0)),
    rw(0x74, Reg::Len(1)),
    rw(0x7c, Reg::Aren(0)),
    rw(0x80, Reg::Aren(1)),
    rw(0x88, Reg::Afen(0)),
    rw(0x8c, Reg::Afen(1)),
    rw(0x94, Reg::Pud),
    rw(0x98, Reg::PudClk(0)),
    rw(0x9c, Reg::PudClk(1)),
];

/// Finds the register map entry at `offset`, if any.
pub fn lookup(offset: u64) -> Option<&'static RegisterDescriptor> {
    REGISTER_MAP.iter().find(|d| d.offset == offset)
}

/// Returns the byte offset of `reg` in the MMIO window.
pub fn offset_of(reg: Reg) -> Option<u64> {
    REGISTER_MAP.iter().find(|d| d.reg == reg).map(|d| d.offset)
}

/// Resolves a guest access to the register it targets.
///
/// # Arguments
///
/// * `offset` - Device-relative byte offset.
/// * `access` - Direction of the access.
///
/// # Returns
///
/// The addressed register, or the reason the access is a bad offset.
pub fn decode(offset: u64, access: AccessType) -> Result<Reg, AccessError> {
    let desc = lookup(offset).ok_or(AccessError::BadOffset { offset, access })?;
    match access {
        AccessType::Read if !desc.access.readable() => Err(AccessError::WriteOnly {
            offset,
            name: desc.reg.name(),
        }),
        AccessType::Write if !desc.access.writable() => Err(AccessError::ReadOnly {
            offset,
            name: desc.reg.name(),
        }),
        _ => Ok(desc.reg),
    }
}

/// Architectural state of the GPIO block.
///
/// All registers start at zero. `outstate` is not bus-addressable: it is derived from
/// `GPSETn`/`GPCLRn`, survives `clear`, and only leaves the device through the shared
/// segment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    pub(super) fsel: [u32; NUM_FSEL],
    pub(super) set: [u32; NUM_BANKS],
    pub(super) clr: [u32; NUM_BANKS],
    pub(super) lev: [u32; NUM_BANKS],
    pub(super) eds: [u32; NUM_BANKS],
    pub(super) ren: [u32; NUM_BANKS],
    pub(super) fen: [u32; NUM_BANKS],
    pub(super) hen: [u32; NUM_BANKS],
    pub(super) len: [u32; NUM_BANKS],
    pub(super) aren: [u32; NUM_BANKS],
    pub(super) afen: [u32; NUM_BANKS],
    pub(super) pud: u32,
    pub(super) pudclk: [u32; NUM_BANKS],
    pub(super) outstate: [u32; NUM_BANKS],
    pub(super) write_count: u64,
}

impl RegisterFile {
    /// Creates a register file with every register at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, reg: Reg) -> Option<&u32> {
        match reg {
            Reg::Fsel(n) => self.fsel.get(n),
            Reg::Set(n) => self.set.get(n),
            Reg::Clr(n) => self.clr.get(n),
            Reg::Lev(n) => self.lev.get(n),
            Reg::Eds(n) => self.eds.get(n),
            Reg::Ren(n) => self.ren.get(n),
            Reg::Fen(n) => self.fen.get(n),
            Reg::Hen(n) => self.hen.get(n),
            Reg::Len(n) => self.len.get(n),
            Reg::Aren(n) => self.aren.get(n),
            Reg::Afen(n) => self.afen.get(n),
            Reg::Pud => Some(&self.pud),
            Reg::PudClk(n) => self.pudclk.get(n),
        }
    }

    fn slot_mut(&mut self, reg: Reg) -> Option<&mut u32> {
        match reg {
            Reg::Fsel(n) => self.fsel.get_mut(n),
            Reg::Set(n) => self.set.get_mut(n),
            Reg::Clr(n) => self.clr.get_mut(n),
            Reg::Lev(n) => self.lev.get_mut(n),
            Reg::Eds(n) => self.eds.get_mut(n),
            Reg::Ren(n) => self.ren.get_mut(n),
            Reg::Fen(n) => self.fen.get_mut(n),
            Reg::Hen(n) => self.hen.get_mut(n),
            Reg::Len(n) => self.len.get_mut(n),
            Reg::Aren(n) => self.aren.get_mut(n),
            Reg::Afen(n) => self.afen.get_mut(n),
            Reg::Pud => Some(&mut self.pud),
            Reg::PudClk(n) => self.pudclk.get_mut(n),
        }
    }

    /// Reads a register regardless of its guest access class.
    ///
    /// An unmapped register (see `Reg::is_mapped`) reads as zero.
    pub fn read(&self, reg: Reg) -> u32 {
        self.slot(reg).copied().unwrap_or(0)
    }

    /// Writes a register regardless of its guest access class.
    ///
    /// No side effects: deriving `OUTSTATE` is the dispatcher's job. Writes to an
    /// unmapped register are dropped.
    pub fn write(&mut self, reg: Reg, val: u32) {
        if let Some(slot) = self.slot_mut(reg) {
            *slot = val;
        }
    }

    /// Returns the six function-select registers.
    pub const fn fsel(&self) -> &[u32; NUM_FSEL] {
        &self.fsel
    }

    /// Returns the two level registers.
    pub const fn levels(&self) -> &[u32; NUM_BANKS] {
        &self.lev
    }

    /// Returns the derived output state of both banks.
    pub const fn outstate(&self) -> &[u32; NUM_BANKS] {
        &self.outstate
    }

    /// Returns the number of bus writes seen since the last reset.
    pub const fn write_count(&self) -> u64 {
        self.write_count
    }

    /// Counts one bus write attempt.
    pub(super) fn count_write(&mut self) -> u64 {
        self.write_count = self.write_count.wrapping_add(1);
        self.write_count
    }

    /// Zeroes every bus-addressable register and the write counter.
    ///
    /// `OUTSTATE` is kept: it is the last level each output drove, and the next push
    /// republishes it alongside the cleared function selects.
    pub fn clear(&mut self) {
        *self = Self {
            outstate: self.outstate,
            ..Self::default()
        };
    }
}
