//! # dasmkit-core
//!
//! Core vocabulary shared by the dasmkit decoders: target architecture and
//! bitness, output syntax, and the rendered instruction record that every
//! decoder produces.

pub mod arch;
pub mod error;
pub mod instruction;
pub mod syntax;

pub use arch::{Architecture, Bitness, Endianness};
pub use error::Error;
pub use instruction::{ControlFlow, Encoding, Instruction, InstructionFlags};
pub use syntax::Syntax;
