//! # Pin Map Tests
//!
//! Tests for the narrow 0-7 numbering used by the external front-ends.

use pibridge_core::common::error::PinError;
use pibridge_core::common::pin::PinIndex;
use pibridge_core::shared::pin_map::narrow_pin;
use pibridge_core::shared::{PIN_MAP, native_pin};
use rstest::rstest;

#[rstest]
#[case(0, 17)]
#[case(1, 18)]
#[case(2, 21)]
#[case(3, 22)]
#[case(4, 23)]
#[case(5, 24)]
#[case(6, 25)]
#[case(7, 4)]
fn test_native_pin(#[case] narrow: u32, #[case] native: u32) {
    assert_eq!(native_pin(narrow).unwrap().val(), native);
    assert_eq!(narrow_pin(PinIndex::new(native).unwrap()), Some(narrow));
}

#[test]
fn test_native_pin_rejects_wide_numbers() {
    assert_eq!(native_pin(8), Err(PinError::OutOfRange { pin: 8, limit: 8 }));
}

#[test]
fn test_unmapped_native_pin_has_no_narrow_number() {
    assert_eq!(narrow_pin(PinIndex::new(0).unwrap()), None);
    assert_eq!(narrow_pin(PinIndex::new(53).unwrap()), None);
}

#[test]
fn test_pin_map_entries_are_distinct_bank0_lines() {
    for (i, a) in PIN_MAP.iter().enumerate() {
        assert!(*a < 32);
        assert!(!PIN_MAP[i + 1..].contains(a));
    }
}
