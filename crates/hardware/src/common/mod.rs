//! Common utilities and types used throughout the GPIO bridge.
//!
//! This module provides the building blocks shared by the device model, the shared
//! segment and the host tool. It includes:
//! 1. **Constants:** Pin geometry, memory map and rendezvous defaults.
//! 2. **Bus Access:** Access direction and width definitions.
//! 3. **Error Handling:** Access, pin, segment, configuration and snapshot errors.
//! 4. **Pins:** Validated pin numbers and decoded pin functions.

/// Common constants used throughout the bridge.
pub mod constants;

/// Bus access type definitions.
pub mod data;

/// Error types.
pub mod error;

/// Pin numbering and function codes.
pub mod pin;

pub use constants::{NUM_PINS, PINS_PER_BANK};
pub use data::{AccessType, AccessWidth};
pub use error::{AccessError, ConfigError, PinError, SegmentError, SnapshotError};
pub use pin::{PinFunction, PinIndex};
