//! System interconnect (bus) for MMIO access.
//!
//! This module implements the bus that routes physical address accesses to devices. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** Read/write by address with last-device hint for throughput.
//! 3. **Lifecycle:** Reset fan-out to every device.
//! 4. **Downcasting:** Lookup of the GPIO block for line assertions.
//!
//! Unclaimed addresses read as 0 and swallow writes.

use super::devices::{Device, Gpio};

/// System bus; routes accesses by physical address.
pub struct Bus {
    /// Registered MMIO devices (boxed for dynamic dispatch; `Send + Sync` for thread safety).
    devices: Vec<Box<dyn Device + Send + Sync>>,
    last_device_idx: usize,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    /// Creates an empty bus; add devices with `add_device`.
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            last_device_idx: 0,
        }
    }

    /// Registers a device on the bus; devices are sorted by base address for lookup.
    ///
    /// # Arguments
    ///
    /// * `dev` - The device to add (must implement `Device` and be `Send + Sync`).
    pub fn add_device(&mut self, dev: Box<dyn Device + Send + Sync>) {
        let (base, size) = dev.address_range();
        tracing::debug!(name = dev.name(), base, size, "device attached to bus");
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
        self.last_device_idx = 0;
    }

    /// Returns the number of registered devices.
    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Returns whether the given physical address is backed by any device.
    ///
    /// # Arguments
    ///
    /// * `paddr` - Physical address to check.
    ///
    /// # Returns
    ///
    /// `true` if some device's range contains `paddr`.
    pub fn is_valid_address(&self, paddr: u64) -> bool {
        self.devices.iter().any(|dev| {
            let (start, size) = dev.address_range();
            paddr >= start && paddr < start + size
        })
    }

    /// Resets every registered device.
    pub fn reset(&mut self) {
        for dev in &mut self.devices {
            dev.reset();
        }
    }

    /// Returns the GPIO block, if one is registered.
    pub fn gpio_mut(&mut self) -> Option<&mut Gpio> {
        for dev in &mut self.devices {
            if let Some(gpio) = dev.as_gpio_mut() {
                return Some(gpio);
            }
        }
        None
    }

    fn find_device(&mut self, paddr: u64) -> Option<(&mut Box<dyn Device + Send + Sync>, u64)> {
        if self.last_device_idx < self.devices.len() {
            let (start, size) = self.devices[self.last_device_idx].address_range();
            if paddr >= start && paddr < start + size {
                return Some((&mut self.devices[self.last_device_idx], paddr - start));
            }
        }

        for (i, dev) in self.devices.iter_mut().enumerate() {
            let (start, size) = dev.address_range();
            if paddr >= start && paddr < start + size {
                self.last_device_idx = i;
                return Some((dev, paddr - start));
            }
        }
        tracing::trace!(paddr, "unclaimed bus access");
        None
    }

    /// Reads one byte at the given physical address; returns 0 if no device claims the address.
    pub fn read_u8(&mut self, paddr: u64) -> u8 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u8(offset)
        } else {
            0
        }
    }
    /// Reads two bytes at the given physical address; returns 0 if unclaimed.
    pub fn read_u16(&mut self, paddr: u64) -> u16 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u16(offset)
        } else {
            0
        }
    }
    /// Reads four bytes at the given physical address; returns 0 if unclaimed.
    pub fn read_u32(&mut self, paddr: u64) -> u32 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u32(offset)
        } else {
            0
        }
    }
    /// Reads eight bytes at the given physical address; returns 0 if unclaimed.
    pub fn read_u64(&mut self, paddr: u64) -> u64 {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.read_u64(offset)
        } else {
            0
        }
    }
    /// Writes one byte at the given physical address; no-op if no device claims it.
    pub fn write_u8(&mut self, paddr: u64, val: u8) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u8(offset, val);
        }
    }
    /// Writes two bytes at the given physical address; no-op if unclaimed.
    pub fn write_u16(&mut self, paddr: u64, val: u16) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u16(offset, val);
        }
    }
    /// Writes four bytes at the given physical address; no-op if unclaimed.
    pub fn write_u32(&mut self, paddr: u64, val: u32) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u32(offset, val);
        }
    }
    /// Writes eight bytes at the given physical address; no-op if unclaimed.
    pub fn write_u64(&mut self, paddr: u64, val: u64) {
        if let Some((dev, offset)) = self.find_device(paddr) {
            dev.write_u64(offset, val);
        }
    }
}
