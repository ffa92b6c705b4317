//! # Function Decoding Tests
//!
//! Tests for the 3-bit function-select fields, including properties that the
//! decoder depends on the `GPFSELn` words alone.

use pibridge_core::common::pin::{PinFunction, PinIndex};
use pibridge_core::soc::devices::gpio::function::{
    encode_function, function_from_fsel, function_of, pins_with,
};
use pibridge_core::soc::devices::gpio::regs::{Reg, RegisterFile};
use proptest::prelude::*;

const OTHER_REGS: [Reg; 12] = [
    Reg::Set(0),
    Reg::Clr(1),
    Reg::Lev(0),
    Reg::Lev(1),
    Reg::Eds(0),
    Reg::Ren(1),
    Reg::Fen(0),
    Reg::Hen(1),
    Reg::Len(0),
    Reg::Aren(1),
    Reg::Afen(0),
    Reg::PudClk(1),
];

fn regs_with_fsel(fsel: [u32; 6]) -> RegisterFile {
    let mut regs = RegisterFile::new();
    for (n, word) in fsel.into_iter().enumerate() {
        regs.write(Reg::Fsel(n), word);
    }
    regs
}

#[test]
fn test_default_function_is_input() {
    let regs = RegisterFile::new();
    for pin in PinIndex::all() {
        assert_eq!(function_of(&regs, pin), PinFunction::Input);
    }
}

#[test]
fn test_decode_known_fields() {
    // pin 17: GPFSEL1 bits 21-23; pin 4: GPFSEL0 bits 12-14; pin 53: GPFSEL5 bits 9-11
    let regs = regs_with_fsel([0b100 << 12, 0b001 << 21, 0, 0, 0, 0b111 << 9]);
    assert_eq!(function_of(&regs, PinIndex::new(4).unwrap()), PinFunction::Alt3);
    assert_eq!(function_of(&regs, PinIndex::new(17).unwrap()), PinFunction::Output);
    assert_eq!(function_of(&regs, PinIndex::new(53).unwrap()), PinFunction::Reserved);
    assert_eq!(function_of(&regs, PinIndex::new(16).unwrap()), PinFunction::Input);
    assert_eq!(function_of(&regs, PinIndex::new(18).unwrap()), PinFunction::Input);
}

#[test]
fn test_pins_with_lists_matching_pins() {
    let regs = regs_with_fsel([0, 0b001 << 21 | 0b001 << 24, 0, 0, 0b001, 0]);
    let outputs: Vec<u32> = pins_with(&regs, PinFunction::Output).map(PinIndex::val).collect();
    assert_eq!(outputs, vec![17, 18, 40]);
    assert_eq!(pins_with(&regs, PinFunction::Input).count(), 51);
}

#[test]
fn test_encode_preserves_neighbours() {
    let pin = PinIndex::new(22).unwrap();
    let word = 0x3FFF_FFFF;
    let encoded = encode_function(word, pin, PinFunction::Input);
    assert_eq!(encoded, word & !(0b111 << 6));
    assert_eq!(encode_function(encoded, pin, PinFunction::Alt5), encoded | 0b110 << 6);
}

proptest! {
    #[test]
    fn prop_function_depends_only_on_fsel(
        fsel in prop::array::uniform6(any::<u32>()),
        noise in prop::array::uniform12(any::<u32>()),
        pin in 0u32..54,
    ) {
        let pin = PinIndex::new(pin).unwrap();
        let clean = regs_with_fsel(fsel);
        let mut noisy = regs_with_fsel(fsel);
        for (reg, val) in OTHER_REGS.into_iter().zip(noise) {
            noisy.write(reg, val);
        }
        noisy.write(Reg::Pud, noise[0]);

        prop_assert_eq!(function_of(&clean, pin), function_of(&noisy, pin));
        prop_assert_eq!(function_of(&clean, pin), function_from_fsel(&fsel, pin));
    }

    #[test]
    fn prop_encode_then_decode(
        fsel in prop::array::uniform6(any::<u32>()),
        pin in 0u32..54,
        bits in 0u32..8,
    ) {
        let pin = PinIndex::new(pin).unwrap();
        let function = PinFunction::from_bits(bits);
        let mut updated = fsel;
        let n = pin.fsel_register();
        updated[n] = encode_function(fsel[n], pin, function);

        prop_assert_eq!(function_from_fsel(&updated, pin), function);
        for other in PinIndex::all().filter(|&p| p != pin) {
            prop_assert_eq!(function_from_fsel(&updated, other), function_from_fsel(&fsel, other));
        }
    }
}
