//! Mock implementations of the bridge's collaborators.


/// Mock shared state port.
pub mod port;
