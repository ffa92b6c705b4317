//! BCM2835 GPIO peripheral model with a shared-memory host bridge.
//!
//! This crate emulates the GPIO block of the SoC as a bus device and mirrors its state to
//! host processes with the following:
//! 1. **Device:** Register file, MMIO dispatch, pin function decoding, and `OUTSTATE` derivation.
//! 2. **Bridge:** One-way push of functions and outputs, one-way pull of input levels.
//! 3. **Shared Segment:** The fixed-layout record and its System V and in-process backings.
//! 4. **SoC:** Bus, `Device` trait, and the `System` builder.
//! 5. **Configuration:** Placement and rendezvous parameters.

/// Common types and constants (pins, access types, errors).
pub mod common;
/// Bridge configuration (defaults and JSON loading).
pub mod config;
/// Shared GPIO record, ports, and pin map.
pub mod shared;
/// System-on-chip (builder, bus, devices, traits).
pub mod soc;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Fixed-layout record shared with host processes.
pub use crate::shared::SharedState;
/// The GPIO device.
pub use crate::soc::devices::Gpio;
/// Top-level system (bus and devices); construct with `System::new`.
pub use crate::soc::System;
