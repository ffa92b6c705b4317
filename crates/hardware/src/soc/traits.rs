//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached components. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Byte, half, word, and doubleword read/write at device-relative offsets.
//! 3. **Lifecycle:** Optional `reset` to return to power-on state.
//! 4. **Downcasting:** Optional cast to `Gpio` for line assertions and inspection.
//!
//! All implementors must be `Send + Sync` so a `System` can be moved to the thread that drives it.

use crate::soc::devices::Gpio;

/// Trait for memory-mapped I/O devices attached to the system bus.
///
/// Devices provide a name, address range, and read/write methods. Optional methods support
/// reset and type-specific access.
pub trait Device: Send + Sync {
    /// Returns a short name for this device (e.g., `"GPIO"`).
    fn name(&self) -> &str;
    /// Returns (base_address, size_in_bytes) for this device's MMIO region.
    fn address_range(&self) -> (u64, u64);
    /// Reads one byte at the given device-relative offset.
    fn read_u8(&mut self, offset: u64) -> u8;
    /// Reads two bytes at the given offset.
    fn read_u16(&mut self, offset: u64) -> u16;
    /// Reads four bytes at the given offset.
    fn read_u32(&mut self, offset: u64) -> u32;
    /// Reads eight bytes at the given offset.
    fn read_u64(&mut self, offset: u64) -> u64;
    /// Writes one byte at the given offset.
    fn write_u8(&mut self, offset: u64, val: u8);
    /// Writes two bytes at the given offset.
    fn write_u16(&mut self, offset: u64, val: u16);
    /// Writes four bytes at the given offset.
    fn write_u32(&mut self, offset: u64, val: u32);
    /// Writes eight bytes at the given offset.
    fn write_u64(&mut self, offset: u64, val: u64);

    /// Returns the device to its power-on state (default: no state to reset).
    fn reset(&mut self) {}

    /// Returns a mutable reference as `Gpio` if this device is the GPIO block; otherwise `None`.
    fn as_gpio_mut(&mut self) -> Option<&mut Gpio> {
        None
    }
}
