//! # Error Tests
//!
//! Tests for the messages and accessors of the error types.

use pibridge_core::common::data::AccessType;
use pibridge_core::common::error::{AccessError, PinError, SnapshotError};

#[test]
fn test_bad_offset_message() {
    let err = AccessError::BadOffset {
        offset: 0x18,
        access: AccessType::Write,
    };
    assert_eq!(err.to_string(), "bad offset 0x18 on write");
    assert_eq!(err.offset(), 0x18);
}

#[test]
fn test_direction_errors_name_the_register() {
    let err = AccessError::ReadOnly {
        offset: 0x34,
        name: "GPLEV0",
    };
    assert!(err.to_string().contains("GPLEV0 is read-only"));

    let err = AccessError::WriteOnly {
        offset: 0x2c,
        name: "GPCLR1",
    };
    assert!(err.to_string().contains("GPCLR1 is write-only"));
    assert_eq!(err.offset(), 0x2c);
}

#[test]
fn test_pin_error_message() {
    let err = PinError::OutOfRange { pin: 8, limit: 8 };
    assert_eq!(err.to_string(), "pin 8 out of range (limit 8)");
}

#[test]
fn test_snapshot_error_message() {
    let err = SnapshotError::Version {
        found: 3,
        expected: 0,
    };
    assert_eq!(err.to_string(), "unsupported snapshot version 3 (expected 0)");
}
