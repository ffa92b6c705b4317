//! # Shared Record Tests
//!
//! Tests for the ABI of `SharedState` and its decoding helpers.

use pibridge_core::common::pin::{PinFunction, PinIndex};
use pibridge_core::shared::{SHARED_STATE_SIZE, SHARED_WORDS, SharedField, SharedState};
use std::mem::offset_of;

#[test]
fn test_record_is_ten_words() {
    assert_eq!(SHARED_STATE_SIZE, 40);
    assert_eq!(SHARED_WORDS, 10);
    assert_eq!(std::mem::align_of::<SharedState>(), 4);
}

#[test]
fn test_field_offsets_match_indices() {
    assert_eq!(offset_of!(SharedState, fsel), 0);
    assert_eq!(offset_of!(SharedState, level), 4 * SharedField::Level0.index());
    assert_eq!(offset_of!(SharedState, outstate), 4 * SharedField::OutState0.index());
    for (i, field) in SharedField::ALL.iter().enumerate() {
        assert_eq!(field.index(), i);
    }
}

#[test]
fn test_get_reads_each_word() {
    let state = SharedState {
        fsel: [1, 2, 3, 4, 5, 6],
        level: [7, 8],
        outstate: [9, 10],
    };
    for field in SharedField::ALL {
        assert_eq!(state.get(field), field.index() as u32 + 1);
    }
}

#[test]
fn test_decoders() {
    let pin17 = PinIndex::new(17).unwrap();
    let pin40 = PinIndex::new(40).unwrap();
    let mut state = SharedState::default();
    state.fsel[1] = 0b001 << 21;
    state.outstate[0] = 1 << 17;
    state.level[1] = 1 << 8;

    assert_eq!(state.function(pin17), PinFunction::Output);
    assert!(state.output(pin17));
    assert!(!state.level(pin17));
    assert_eq!(state.function(pin40), PinFunction::Input);
    assert!(state.level(pin40));
}

#[test]
fn test_config_differs_ignores_levels() {
    let a = SharedState::default();
    let mut b = a;
    b.level = [u32::MAX, u32::MAX];
    assert!(!a.config_differs(&b));

    b.outstate[1] = 1;
    assert!(a.config_differs(&b));

    let mut c = a;
    c.fsel[5] = 0b010;
    assert!(a.config_differs(&c));
}

#[test]
fn test_record_serializes_by_field() {
    let state = SharedState {
        fsel: [0, 0, 0, 0, 0, 0],
        level: [1, 0],
        outstate: [0, 2],
    };
    let json = serde_json::to_value(state).unwrap();
    assert_eq!(json["level"][0], 1);
    assert_eq!(json["outstate"][1], 2);
    let back: SharedState = serde_json::from_value(json).unwrap();
    assert_eq!(back, state);
}
