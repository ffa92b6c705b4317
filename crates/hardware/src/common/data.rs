//! Bus Access Types.
//!
//! This module defines how a bus transaction is classified before it reaches a register:
//! 1. **Direction:** Whether the guest is reading or writing.
//! 2. **Width:** The declared size of the access, accepted but not used to narrow registers.

/// Direction of a bus access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Guest load from a device register.
    Read,
    /// Guest store to a device register.
    Write,
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Declared width of a bus access.
///
/// GPIO registers are always handled as full 32-bit words; the width is carried for
/// diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessWidth {
    /// 8-bit access.
    Byte,
    /// 16-bit access.
    Half,
    /// 32-bit access.
    Word,
    /// 64-bit access.
    Double,
}

impl AccessWidth {
    /// Returns the access size in bytes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Half => 2,
            Self::Word => 4,
            Self::Double => 8,
        }
    }

}
