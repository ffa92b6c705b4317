//! Unit tests for the shared segment.


/// Narrow pin translation.
pub mod pin_map;


/// Record layout and decoding helpers.
pub mod state;
