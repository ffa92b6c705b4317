//! BCM2835 GPIO controller.
//!
//! This module implements the GPIO block of the SoC as a bus device and bridges its
//! state to host processes through the shared segment. It provides:
//! 1. **Dispatch:** Guest reads and writes decoded through the register map.
//! 2. **Output State:** `GPSETn`/`GPCLRn` folded into the persistent `OUTSTATE` after each write.
//! 3. **Bridge:** Function selects and `OUTSTATE` pushed after each accepted write; input
//!    levels pulled before each read.
//! 4. **Lines:** Levels asserted by the surrounding framework on Input pins.
//! 5. **Lifecycle:** Reset and register snapshots.
//!
//! Bad guest accesses are logged under the `guest_error` target and otherwise ignored:
//! reads return 0 and writes are dropped.

/// Shared segment bridge.
pub mod bridge;

/// Pin function decoding.
pub mod function;

/// External line interface.
pub mod lines;

/// `OUTSTATE` derivation.
pub mod outstate;

/// Register file and register map.
pub mod regs;

/// Register snapshots.
pub mod snapshot;

use crate::common::data::{AccessType, AccessWidth};
use crate::common::error::SnapshotError;
use crate::common::pin::{PinFunction, PinIndex};
use crate::config::GpioConfig;
use crate::soc::traits::Device;

pub use bridge::SharedBridge;
pub use lines::Lines;
pub use regs::{Reg, RegisterFile};
pub use snapshot::{GpioSnapshot, SNAPSHOT_VERSION};

/// GPIO device state.
#[derive(Debug)]
pub struct Gpio {
    base: u64,
    size: u64,
    regs: RegisterFile,
    bridge: SharedBridge,
    lines: Lines,
}

impl Gpio {
    /// Creates a GPIO block with every register at zero.
    ///
    /// # Arguments
    ///
    /// * `config` - MMIO placement and line count.
    /// * `bridge` - Connection to the shared segment, possibly detached.
    pub fn new(config: &GpioConfig, bridge: SharedBridge) -> Self {
        Self {
            base: config.base,
            size: config.size,
            regs: RegisterFile::new(),
            bridge,
            lines: Lines::new(config.lines),
        }
    }

    /// Handles a guest read.
    ///
    /// Input levels are pulled from the shared segment first, so a read of `GPLEVn`
    /// observes the latest external state.
    ///
    /// # Arguments
    ///
    /// * `offset` - Device-relative byte offset.
    /// * `width` - Declared access width; every register is handled as a full word.
    ///
    /// # Returns
    ///
    /// The whole 32-bit register, or 0 for a bad offset. Narrowing to the access size
    /// happens at the bus boundary.
    pub fn read(&mut self, offset: u64, width: AccessWidth) -> u64 {
        self.bridge.pull(&mut self.regs);
        match regs::decode(offset, AccessType::Read) {
            Ok(reg) => u64::from(self.regs.read(reg)),
            Err(err) => {
                tracing::warn!(target: "guest_error", %err, width = width.bytes(), "GPIO read rejected");
                0
            }
        }
    }

    /// Handles a guest write.
    ///
    /// Every attempt counts towards the write counter. An accepted write updates the
    /// register, derives `OUTSTATE` and pushes to the shared segment; a rejected one
    /// changes nothing else.
    ///
    /// # Arguments
    ///
    /// * `offset` - Device-relative byte offset.
    /// * `width` - Declared access width.
    /// * `val` - Value written; only the low 32 bits are kept.
    pub fn write(&mut self, offset: u64, width: AccessWidth, val: u64) {
        let count = self.regs.count_write();
        match regs::decode(offset, AccessType::Write) {
            Ok(reg) => {
                self.regs.write(reg, val as u32);
                let applied = outstate::derive_output_state(&mut self.regs);
                self.bridge.push(&self.regs);
                tracing::debug!(
                    reg = reg.name(),
                    val,
                    width = width.bytes(),
                    applied,
                    count,
                    "GPIO write"
                );
            }
            Err(err) => {
                tracing::warn!(target: "guest_error", %err, count, "GPIO write rejected");
            }
        }
    }

    /// Asserts an external level on input line `line`.
    ///
    /// # Returns
    ///
    /// `true` if the line feeds an Input pin and its level bit changed accordingly.
    pub fn set_line(&mut self, line: u32, high: bool) -> bool {
        match self.lines.input(line) {
            Ok(pin) => lines::apply_input(&mut self.regs, pin, high),
            Err(err) => {
                tracing::warn!(%err, "GPIO input line ignored");
                false
            }
        }
    }

    /// Returns the level of output line `line`, or `None` if it is not declared.
    pub fn output_line(&self, line: u32) -> Option<bool> {
        self.lines.output(line)
    }

    /// Zeroes every bus-addressable register and the write counter.
    ///
    /// `OUTSTATE` keeps its value. The shared segment keeps its contents until the next
    /// accepted write, which republishes the retained `OUTSTATE`.
    pub fn reset(&mut self) {
        self.regs.clear();
        tracing::debug!("GPIO reset");
    }

    /// Returns the register file.
    pub const fn registers(&self) -> &RegisterFile {
        &self.regs
    }

    /// Returns the current function of `pin`.
    pub fn function(&self, pin: PinIndex) -> PinFunction {
        function::function_of(&self.regs, pin)
    }

    /// Returns the number of bus writes since the last reset.
    pub const fn write_count(&self) -> u64 {
        self.regs.write_count()
    }

    /// Returns the shared segment bridge.
    pub const fn bridge(&self) -> &SharedBridge {
        &self.bridge
    }

    /// Returns the declared external lines.
    pub const fn lines(&self) -> &Lines {
        &self.lines
    }

    /// Captures the bus-addressable registers.
    pub fn save_state(&self) -> GpioSnapshot {
        GpioSnapshot::capture(&self.regs)
    }

    /// Loads a snapshot taken with `save_state`.
    ///
    /// Neither `OUTSTATE` nor the write counter change, and nothing is pushed.
    pub fn restore_state(&mut self, snapshot: &GpioSnapshot) -> Result<(), SnapshotError> {
        snapshot.apply(&mut self.regs)
    }
}

impl Device for Gpio {
    fn name(&self) -> &str {
        "GPIO"
    }

    fn address_range(&self) -> (u64, u64) {
        (self.base, self.size)
    }

    fn read_u8(&mut self, offset: u64) -> u8 {
        self.read(offset, AccessWidth::Byte) as u8
    }

    fn read_u16(&mut self, offset: u64) -> u16 {
        self.read(offset, AccessWidth::Half) as u16
    }

    fn read_u32(&mut self, offset: u64) -> u32 {
        self.read(offset, AccessWidth::Word) as u32
    }

    fn read_u64(&mut self, offset: u64) -> u64 {
        self.read(offset, AccessWidth::Double)
    }

    fn write_u8(&mut self, offset: u64, val: u8) {
        self.write(offset, AccessWidth::Byte, u64::from(val));
    }

    fn write_u16(&mut self, offset: u64, val: u16) {
        self.write(offset, AccessWidth::Half, u64::from(val));
    }

    fn write_u32(&mut self, offset: u64, val: u32) {
        self.write(offset, AccessWidth::Word, u64::from(val));
    }

    fn write_u64(&mut self, offset: u64, val: u64) {
        self.write(offset, AccessWidth::Double, val);
    }

    fn reset(&mut self) {
        Gpio::reset(self);
    }

    fn as_gpio_mut(&mut self) -> Option<&mut Gpio> {
        Some(self)
    }
}
