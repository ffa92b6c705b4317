//! # MMIO Dispatch Tests
//!
//! Tests that every offset of the window is classified the same way on the read
//! and the write path, that bad accesses are dropped, and that the write counter
//! sees every attempt.

use super::create_test_gpio;
use crate::common::harness::capture_logs;
use pibridge_core::common::data::{AccessType, AccessWidth};
use pibridge_core::common::error::AccessError;
use pibridge_core::soc::devices::Device;
use pibridge_core::soc::devices::gpio::RegisterFile;
use pibridge_core::soc::devices::gpio::regs::{self, Access, REGISTER_MAP, Reg};
use rstest::rstest;

#[test]
fn test_gpio_name_and_range() {
    let (gpio, _) = create_test_gpio();
    assert_eq!(gpio.name(), "GPIO");
    assert_eq!(gpio.address_range(), (0x2020_0000, 0xB1));
}

#[test]
fn test_register_map_covers_every_register_once() {
    assert_eq!(REGISTER_MAP.len(), 29);
    for (i, a) in REGISTER_MAP.iter().enumerate() {
        for b in &REGISTER_MAP[i + 1..] {
            assert_ne!(a.reg, b.reg);
        }
    }
}

#[rstest]
#[case(0x00, Reg::Fsel(0), Access::ReadWrite)]
#[case(0x14, Reg::Fsel(5), Access::ReadWrite)]
#[case(0x1c, Reg::Set(0), Access::WriteOnly)]
#[case(0x20, Reg::Set(1), Access::WriteOnly)]
#[case(0x28, Reg::Clr(0), Access::WriteOnly)]
#[case(0x2c, Reg::Clr(1), Access::WriteOnly)]
#[case(0x34, Reg::Lev(0), Access::ReadOnly)]
#[case(0x38, Reg::Lev(1), Access::ReadOnly)]
#[case(0x44, Reg::Eds(1), Access::ReadWrite)]
#[case(0x4c, Reg::Ren(0), Access::ReadWrite)]
#[case(0x5c, Reg::Fen(1), Access::ReadWrite)]
#[case(0x64, Reg::Hen(0), Access::ReadWrite)]
#[case(0x74, Reg::Len(1), Access::ReadWrite)]
#[case(0x7c, Reg::Aren(0), Access::ReadWrite)]
#[case(0x8c, Reg::Afen(1), Access::ReadWrite)]
#[case(0x94, Reg::Pud, Access::ReadWrite)]
#[case(0x9c, Reg::PudClk(1), Access::ReadWrite)]
fn test_lookup(#[case] offset: u64, #[case] reg: Reg, #[case] access: Access) {
    let desc = regs::lookup(offset).unwrap();
    assert_eq!(desc.reg, reg);
    assert_eq!(desc.access, access);
    assert_eq!(desc.bytes, 4);
    assert_eq!(regs::offset_of(reg), Some(offset));
}

#[rstest]
#[case(0x18)]
#[case(0x24)]
#[case(0x30)]
#[case(0x3c)]
#[case(0x48)]
#[case(0x54)]
#[case(0x60)]
#[case(0x6c)]
#[case(0x78)]
#[case(0x84)]
#[case(0x90)]
#[case(0xa0)]
#[case(0xb0)]
#[case(0x01)]
#[case(0x36)]
#[case(0xb4)]
#[case(0x1000)]
fn test_bad_offsets_rejected_both_ways(#[case] offset: u64) {
    assert_eq!(
        regs::decode(offset, AccessType::Read),
        Err(AccessError::BadOffset {
            offset,
            access: AccessType::Read
        })
    );
    assert_eq!(
        regs::decode(offset, AccessType::Write),
        Err(AccessError::BadOffset {
            offset,
            access: AccessType::Write
        })
    );

    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(0x00, 0b001);
    let before = gpio.save_state();
    let outstate = *gpio.registers().outstate();

    gpio.write_u32(offset, 0xFFFF_FFFF);
    assert_eq!(gpio.read_u32(offset), 0);
    assert_eq!(gpio.save_state(), before);
    assert_eq!(*gpio.registers().outstate(), outstate);
}

#[rstest]
#[case(0x00)]
#[case(0x0c)]
#[case(0x40)]
#[case(0x50)]
#[case(0x58)]
#[case(0x68)]
#[case(0x70)]
#[case(0x80)]
#[case(0x88)]
#[case(0x94)]
#[case(0x98)]
fn test_read_write_registers_hold_values(#[case] offset: u64) {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(offset, 0x1234_5678);
    assert_eq!(gpio.read_u32(offset), 0x1234_5678);
}

#[rstest]
#[case(0x1c)]
#[case(0x20)]
#[case(0x28)]
#[case(0x2c)]
fn test_write_only_registers_read_as_zero(#[case] offset: u64) {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(offset, 0xFFFF_FFFF);
    assert_eq!(gpio.read_u32(offset), 0);
}

#[test]
fn test_level_register_ignores_writes() {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(0x34, 0xFFFF_FFFF);
    gpio.write_u32(0x38, 0xFFFF_FFFF);
    assert_eq!(*gpio.registers().levels(), [0, 0]);
    assert_eq!(gpio.read_u32(0x34), 0);
    assert_eq!(gpio.write_count(), 2);
}

#[test]
fn test_write_counter_counts_every_attempt() {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(0x00, 1);
    gpio.write_u32(0x18, 1);
    gpio.write_u32(0x34, 1);
    gpio.write_u8(0x1c, 1);
    assert_eq!(gpio.write_count(), 4);

    let _ = gpio.read_u32(0x00);
    let _ = gpio.read_u32(0x18);
    assert_eq!(gpio.write_count(), 4);
}

#[rstest]
#[case(AccessWidth::Byte)]
#[case(AccessWidth::Half)]
#[case(AccessWidth::Word)]
#[case(AccessWidth::Double)]
fn test_read_returns_full_register_for_any_width(#[case] width: AccessWidth) {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(0x40, 0x1234_5678);
    assert_eq!(gpio.read(0x40, width), 0x1234_5678);
}

#[test]
fn test_bus_reads_narrow_at_the_boundary() {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(0x40, 0x1234_5678);
    assert_eq!(gpio.read_u8(0x40), 0x78);
    assert_eq!(gpio.read_u16(0x40), 0x5678);
    assert_eq!(gpio.read_u32(0x40), 0x1234_5678);
    assert_eq!(gpio.read_u64(0x40), 0x1234_5678);
}

#[test]
fn test_narrow_and_wide_writes_fill_whole_register() {
    let (mut gpio, _) = create_test_gpio();
    gpio.write_u32(0x4c, 0xFFFF_FFFF);
    gpio.write_u8(0x4c, 0xAB);
    assert_eq!(gpio.read_u32(0x4c), 0xAB);

    gpio.write_u64(0x4c, 0xDEAD_0000_0000_BEEF);
    assert_eq!(gpio.read_u32(0x4c), 0xBEEF);
}

#[test]
fn test_bad_offset_logs_guest_error() {
    let (mut gpio, _) = create_test_gpio();
    let (value, logs) = capture_logs(|| {
        gpio.write_u32(0x18, 1);
        gpio.read_u32(0x1c)
    });
    assert_eq!(value, 0);
    assert!(logs.contains("guest_error"));
    assert!(logs.contains("bad offset 0x18 on write"));
    assert!(logs.contains("GPSET0 is write-only"));
}

#[rstest]
#[case(Reg::Fsel(6))]
#[case(Reg::Set(2))]
#[case(Reg::Lev(7))]
#[case(Reg::PudClk(usize::MAX))]
fn test_unmapped_register_is_inert(#[case] reg: Reg) {
    let mut file = RegisterFile::new();
    assert!(!reg.is_mapped());
    assert_eq!(regs::offset_of(reg), None);

    file.write(reg, 0xFFFF_FFFF);

    assert_eq!(file.read(reg), 0);
    assert_eq!(file, RegisterFile::new());
}
