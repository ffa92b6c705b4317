//! Error definitions.
//!
//! This module defines the error handling vocabulary of the GPIO bridge. It provides:
//! 1. **Bus Access Errors:** Guest accesses that hit no register or the wrong direction.
//! 2. **Pin Errors:** Pin numbers outside the 54 lines of the block.
//! 3. **Segment Errors:** Failures deriving the key for, creating or attaching the shared segment.
//! 4. **Configuration Errors:** Unreadable or malformed configuration files.
//! 5. **Snapshot Errors:** Register snapshots from an incompatible layout.
//!
//! Bus access errors never reach the guest; the dispatcher logs them and carries on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::data::AccessType;

/// A guest access the register map does not accept.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No register lives at this offset (reserved words and anything past the map).
    #[error("bad offset {offset:#x} on {access}")]
    BadOffset {
        /// Device-relative byte offset.
        offset: u64,
        /// Direction of the rejected access.
        access: AccessType,
    },
    /// Write to a read-only register (`GPLEVn`).
    #[error("bad offset {offset:#x} on write: {name} is read-only")]
    ReadOnly {
        /// Device-relative byte offset.
        offset: u64,
        /// Register mnemonic.
        name: &'static str,
    },
    /// Read of a write-only register (`GPSETn`, `GPCLRn`).
    #[error("bad offset {offset:#x} on read: {name} is write-only")]
    WriteOnly {
        /// Device-relative byte offset.
        offset: u64,
        /// Register mnemonic.
        name: &'static str,
    },
}

impl AccessError {
    /// Returns the offending offset.
    pub const fn offset(&self) -> u64 {
        match self {
            Self::BadOffset { offset, .. }
            | Self::ReadOnly { offset, .. }
            | Self::WriteOnly { offset, .. } => *offset,
        }
    }
}

/// A pin number outside the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PinError {
    /// The pin is not in `0..54` (or `0..8` for the narrow external numbering).
    #[error("pin {pin} out of range (limit {limit})")]
    OutOfRange {
        /// The rejected pin number.
        pin: u32,
        /// Exclusive upper bound that was violated.
        limit: u32,
    },
}

/// Failure to reach the shared GPIO segment.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// The key path cannot be passed to the C library (embedded NUL).
    #[error("key path {path} is not a valid C string")]
    KeyPath {
        /// Offending path.
        path: PathBuf,
    },
    /// `ftok` failed, usually because the key path does not exist.
    #[error("cannot derive segment key from {path} (project id {project_id:#x})")]
    Key {
        /// Path the key was derived from.
        path: PathBuf,
        /// Project identifier.
        project_id: u8,
        /// Underlying errno.
        #[source]
        source: io::Error,
    },
    /// `shmget` failed to find or create the segment.
    #[error("cannot get shared segment for key {key:#x}")]
    Create {
        /// Rendezvous key.
        key: i32,
        /// Underlying errno.
        #[source]
        source: io::Error,
    },
    /// `shmat` failed to map the segment.
    #[error("cannot attach shared segment {id}")]
    Attach {
        /// Segment identifier returned by `shmget`.
        id: i32,
        /// Underlying errno.
        #[source]
        source: io::Error,
    },
    /// `shmctl(IPC_RMID)` failed.
    #[error("cannot remove shared segment {id}")]
    Remove {
        /// Segment identifier.
        id: i32,
        /// Underlying errno.
        #[source]
        source: io::Error,
    },
}

/// Failure to load a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The contents are not a valid configuration document.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A register snapshot the device cannot load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The snapshot was produced by an incompatible layout.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version {
        /// Version found in the snapshot.
        found: u32,
        /// Version this build understands.
        expected: u32,
    },
}
