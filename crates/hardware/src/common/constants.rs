//! Global GPIO Constants.
//!
//! This module defines the numbers that shape the emulated GPIO block. It includes:
//! 1. **Pin Geometry:** Line count, bank width and function-select field layout.
//! 2. **Memory Map:** The default SoC base address and the size of the MMIO window.
//! 3. **Rendezvous:** The well-known path and project id used to derive the shared segment key.

/// Number of GPIO lines exposed by the block (BCM2835 has 54).
pub const NUM_PINS: usize = 54;

/// Number of pins controlled by one 32-bit bank register (SET/CLR/LEV/...).
pub const PINS_PER_BANK: usize = 32;

/// Number of 32-bit banks needed to cover every pin.
pub const NUM_BANKS: usize = 2;

/// Number of pins encoded in one function-select register.
pub const PINS_PER_FSEL: usize = 10;

/// Number of function-select registers (`GPFSEL0`..`GPFSEL5`).
pub const NUM_FSEL: usize = 6;

/// Width in bits of one function-select field.
pub const FSEL_FIELD_BITS: u32 = 3;

/// Mask for one function-select field after shifting.
pub const FSEL_FIELD_MASK: u32 = 0x7;

/// Physical base address of the GPIO block on the BCM2835 peripheral bus.
pub const GPIO_BASE: u64 = 0x2020_0000;

/// Size of the MMIO window registered with the bus (covers the `0xb0` test word).
pub const GPIO_MMIO_SIZE: u64 = 0xB1;

/// Width in bytes of every GPIO register.
pub const REGISTER_BYTES: u64 = 4;

/// File used to derive the shared segment key; present on every Linux host.
pub const SHM_KEY_PATH: &str = "/proc/cpuinfo";

/// Project identifier passed to `ftok` together with [`SHM_KEY_PATH`].
pub const SHM_PROJECT_ID: u8 = 0x84;

/// Permission bits for a freshly created segment (world read/write).
pub const SHM_MODE: u32 = 0o666;
