//! Configuration system for the GPIO bridge.
//!
//! This module defines the configuration structures used to place the GPIO block on the
//! bus and to locate the shared segment. It provides:
//! 1. **Defaults:** The BCM2835 memory map and the well-known rendezvous key inputs.
//! 2. **Structures:** `GpioConfig` for the device and `SharedMemoryConfig` for the segment.
//! 3. **Loading:** JSON parsing from a string or a file.
//!
//! Every field has a default, so `{}` is a complete configuration document.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the bridge.
mod defaults {
    use crate::common::constants;

    /// Base address of the GPIO block on the peripheral bus.
    pub const GPIO_BASE: u64 = constants::GPIO_BASE;

    /// Size of the MMIO window.
    pub const GPIO_SIZE: u64 = constants::GPIO_MMIO_SIZE;

    /// Number of external lines declared in each direction.
    pub const LINES: usize = constants::NUM_PINS;

    /// Path passed to `ftok`.
    pub const KEY_PATH: &str = constants::SHM_KEY_PATH;

    /// Project id passed to `ftok`.
    pub const PROJECT_ID: u8 = constants::SHM_PROJECT_ID;

    /// Creation mode of the segment.
    pub const MODE: u32 = constants::SHM_MODE;
}

/// Root configuration object.
///
/// # Examples
///
/// ```
/// use pibridge_core::config::Config;
///
/// let json = r#"{
///     "gpio": { "base": 1059061760 },
///     "shared": { "key_path": "/tmp", "project_id": 7 }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.gpio.base, 0x3F20_0000);
/// assert_eq!(config.gpio.size, 0xB1);
/// assert_eq!(config.shared.project_id, 7);
/// assert!(config.shared.create);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Device placement
    #[serde(default)]
    pub gpio: GpioConfig,
    /// Shared segment rendezvous
    #[serde(default)]
    pub shared: SharedMemoryConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Arguments
    ///
    /// * `json` - The JSON document.
    ///
    /// # Returns
    ///
    /// The parsed configuration, or `ConfigError::Parse`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path of the configuration file.
    ///
    /// # Returns
    ///
    /// The parsed configuration, `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` if it is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// Placement of the GPIO block on the system bus.
#[derive(Debug, Clone, Deserialize)]
pub struct GpioConfig {
    /// MMIO base address
    #[serde(default = "GpioConfig::default_base")]
    pub base: u64,

    /// MMIO window size in bytes
    #[serde(default = "GpioConfig::default_size")]
    pub size: u64,

    /// Number of external input (and output) lines declared
    #[serde(default = "GpioConfig::default_lines")]
    pub lines: usize,
}

impl GpioConfig {
    /// Returns the default MMIO base address.
    fn default_base() -> u64 {
        defaults::GPIO_BASE
    }

    /// Returns the default MMIO window size.
    fn default_size() -> u64 {
        defaults::GPIO_SIZE
    }

    /// Returns the default line count.
    fn default_lines() -> usize {
        defaults::LINES
    }
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            base: defaults::GPIO_BASE,
            size: defaults::GPIO_SIZE,
            lines: defaults::LINES,
        }
    }
}

/// Rendezvous parameters for the shared segment.
///
/// Every process that wants to see the same GPIO state must agree on `key_path` and
/// `project_id`; nothing else is exchanged between them.
#[derive(Debug, Clone, Deserialize)]
pub struct SharedMemoryConfig {
    /// Existing file the key is derived from
    #[serde(default = "SharedMemoryConfig::default_key_path")]
    pub key_path: PathBuf,

    /// Low byte mixed into the key
    #[serde(default = "SharedMemoryConfig::default_project_id")]
    pub project_id: u8,

    /// Permission bits applied when the segment is created
    #[serde(default = "SharedMemoryConfig::default_mode")]
    pub mode: u32,

    /// Create the segment if it does not exist yet (the device does, consumers do not)
    #[serde(default = "SharedMemoryConfig::default_create")]
    pub create: bool,
}

impl SharedMemoryConfig {
    /// Returns the default key path.
    fn default_key_path() -> PathBuf {
        PathBuf::from(defaults::KEY_PATH)
    }

    /// Returns the default project id.
    fn default_project_id() -> u8 {
        defaults::PROJECT_ID
    }

    /// Returns the default creation mode.
    fn default_mode() -> u32 {
        defaults::MODE
    }

    /// Segments are created on demand by default.
    fn default_create() -> bool {
        true
    }
}

impl Default for SharedMemoryConfig {
    fn default() -> Self {
        Self {
            key_path: PathBuf::from(defaults::KEY_PATH),
            project_id: defaults::PROJECT_ID,
            mode: defaults::MODE,
            create: true,
        }
    }
}
