//! Memory-Mapped IO Devices.
//!
//! This module contains the devices found in the SoC model. Currently that is the GPIO
//! controller, whose state is mirrored to host processes through the shared segment.

/// BCM2835 GPIO controller.
pub mod gpio;

pub use gpio::Gpio;

pub use crate::soc::traits::Device;
