//! System-on-Chip construction and top-level `System` type.
//!
//! This module builds the SoC from configuration. It performs:
//! 1. **Segment attach:** Finds or creates the shared GPIO segment; a failure leaves the
//!    bridge detached instead of aborting.
//! 2. **Bus setup:** Creates the interconnect.
//! 3. **Device registration:** Instantiates the GPIO block at its configured base.

use crate::config::Config;
use crate::shared::{SharedStatePort, ShmSegment};
use crate::soc::devices::Gpio;
use crate::soc::devices::gpio::SharedBridge;
use crate::soc::interconnect::Bus;

/// Top-level system instance containing the bus.
pub struct System {
    /// System interconnect; routes accesses to MMIO devices.
    pub bus: Bus,
}

impl System {
    /// Builds a new system from configuration, attaching the System V segment.
    ///
    /// # Arguments
    ///
    /// * `config` - Device placement and rendezvous parameters.
    ///
    /// # Returns
    ///
    /// A fully constructed `System`. If the segment cannot be attached the GPIO block
    /// still works, with its bridge detached.
    pub fn new(config: &Config) -> Self {
        let bridge = SharedBridge::from_attach(ShmSegment::attach(&config.shared));
        Self::with_bridge(config, bridge)
    }

    /// Builds a new system whose GPIO block talks to `port` instead of the System V segment.
    ///
    /// # Arguments
    ///
    /// * `config` - Device placement; the rendezvous parameters are ignored.
    /// * `port` - Backing for the shared record (e.g., a `LocalSegment`).
    pub fn with_port(config: &Config, port: Box<dyn SharedStatePort>) -> Self {
        Self::with_bridge(config, SharedBridge::attached(port))
    }

    /// Builds a new system around an already constructed bridge.
    pub fn with_bridge(config: &Config, bridge: SharedBridge) -> Self {
        let mut bus = Bus::new();
        let gpio = Gpio::new(&config.gpio, bridge);
        bus.add_device(Box::new(gpio));
        tracing::info!(base = config.gpio.base, size = config.gpio.size, "system ready");
        Self { bus }
    }

    /// Returns the GPIO block.
    pub fn gpio_mut(&mut self) -> Option<&mut Gpio> {
        self.bus.gpio_mut()
    }

    /// Resets every device on the bus.
    pub fn reset(&mut self) {
        self.bus.reset();
    }
}
