//! Error types for dasmkit-core.

use thiserror::Error;

/// Core error type, raised when parsing configuration values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown architecture: {0}")]
    UnknownArchitecture(String),

    #[error("invalid bitness {0:?}, expected 16, 32 or 64")]
    InvalidBitness(String),

    #[error("unknown syntax {0:?}, expected intel or att")]
    UnknownSyntax(String),
}
