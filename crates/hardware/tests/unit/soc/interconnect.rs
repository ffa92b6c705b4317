//! # Interconnect Tests
//!
//! Tests for routing physical addresses to devices on the bus.

use super::gpio::create_test_gpio;
use crate::common::mocks::bus::{MockBusDevice, SyncBusDevice};
use mockall::predicate::eq;
use pibridge_core::soc::devices::gpio::Reg;
use pibridge_core::soc::interconnect::Bus;

const GPIO_BASE: u64 = 0x2020_0000;

fn create_test_bus() -> Bus {
    let mut bus = Bus::new();
    let (gpio, _) = create_test_gpio();
    bus.add_device(Box::new(gpio));
    bus
}

#[test]
fn test_empty_bus_reads_zero() {
    let mut bus = Bus::default();
    assert_eq!(bus.device_count(), 0);
    assert_eq!(bus.read_u32(GPIO_BASE), 0);
    bus.write_u32(GPIO_BASE, 1);
    assert!(bus.gpio_mut().is_none());
}

#[test]
fn test_address_map_bounds() {
    let bus = create_test_bus();
    assert!(bus.is_valid_address(GPIO_BASE));
    assert!(bus.is_valid_address(GPIO_BASE + 0xB0));
    assert!(!bus.is_valid_address(GPIO_BASE + 0xB1));
    assert!(!bus.is_valid_address(GPIO_BASE - 1));
}

#[test]
fn test_routes_to_gpio_with_relative_offset() {
    let mut bus = create_test_bus();
    bus.write_u32(GPIO_BASE + 0x4c, 0xCAFE);
    assert_eq!(bus.read_u32(GPIO_BASE + 0x4c), 0xCAFE);
    assert_eq!(bus.read_u16(GPIO_BASE + 0x4c), 0xCAFE);
    let gpio = bus.gpio_mut().unwrap();
    assert_eq!(gpio.registers().read(Reg::Ren(0)), 0xCAFE);
}

#[test]
fn test_unclaimed_access_does_not_reach_devices() {
    let mut mock = MockBusDevice::new();
    let _ = mock.expect_read_u32().never();
    let _ = mock.expect_write_u32().never();

    let mut bus = create_test_bus();
    bus.add_device(Box::new(SyncBusDevice::new(mock, "SCRATCH", (0x1000, 0x100))));

    assert_eq!(bus.read_u32(0x2000), 0);
    bus.write_u32(0x0800, 5);
    assert_eq!(bus.device_count(), 2);
}

#[test]
fn test_routes_between_devices() {
    let mut mock = MockBusDevice::new();
    let _ = mock
        .expect_read_u32()
        .with(eq(0x10))
        .times(2)
        .return_const(0x55u32);
    let _ = mock
        .expect_write_u64()
        .with(eq(0x20), eq(7))
        .times(1)
        .return_const(());

    let mut bus = create_test_bus();
    bus.add_device(Box::new(SyncBusDevice::new(mock, "SCRATCH", (0x1000, 0x100))));

    assert_eq!(bus.read_u32(0x1010), 0x55);
    bus.write_u32(GPIO_BASE + 0x40, 3);
    assert_eq!(bus.read_u32(0x1010), 0x55);
    bus.write_u64(0x1020, 7);
    assert_eq!(bus.read_u32(GPIO_BASE + 0x40), 3);
}

#[test]
fn test_reset_reaches_every_device() {
    let mut mock = MockBusDevice::new();
    let _ = mock.expect_reset().times(1).return_const(());

    let mut bus = create_test_bus();
    bus.add_device(Box::new(SyncBusDevice::new(mock, "SCRATCH", (0x1000, 0x100))));
    bus.write_u32(GPIO_BASE + 0x40, 3);

    bus.reset();
    assert_eq!(bus.read_u32(GPIO_BASE + 0x40), 0);
    assert_eq!(bus.gpio_mut().unwrap().write_count(), 0);
}
