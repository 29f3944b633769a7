//! Disassembly error types.

use thiserror::Error;

/// Error type for instruction decoding.
///
/// Malformed encodings and unknown opcodes are not errors: they are rendered
/// into the instruction text. These variants cover the cases where no text
/// can be produced at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Instruction was truncated (not enough bytes).
    #[error("truncated instruction at {address:#x}: need {needed} bytes, have {available}")]
    Truncated {
        address: u64,
        needed: usize,
        available: usize,
    },

    /// The instruction would exceed the architectural length limit.
    #[error("instruction at {address:#x} exceeds {limit} bytes")]
    TooLong { address: u64, limit: usize },

    /// Invalid instruction encoding.
    #[error("invalid encoding at {address:#x}: {reason}")]
    InvalidEncoding { address: u64, reason: String },
}

impl DecodeError {
    /// Creates a new Truncated error.
    pub fn truncated(address: u64, needed: usize, available: usize) -> Self {
        Self::Truncated {
            address,
            needed,
            available,
        }
    }

    /// Creates a new TooLong error.
    pub fn too_long(address: u64, limit: usize) -> Self {
        Self::TooLong { address, limit }
    }

    /// Creates a new InvalidEncoding error.
    pub fn invalid_encoding(address: u64, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            address,
            reason: reason.into(),
        }
    }

    /// Address of the instruction that failed to decode.
    pub fn address(&self) -> u64 {
        match self {
            Self::Truncated { address, .. }
            | Self::TooLong { address, .. }
            | Self::InvalidEncoding { address, .. } => *address,
        }
    }
}
