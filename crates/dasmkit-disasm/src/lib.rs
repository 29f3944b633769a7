//! # dasmkit-disasm
//!
//! Instruction decoders that render machine code as assembly text.
//!
//! This crate provides two independent backends:
//! - x86 in 16-, 32- and 64-bit modes, including VEX/XOP/EVEX encodings,
//!   x87 and 3DNow!, rendered in Intel or AT&T syntax
//! - 32-bit PowerPC as found in the Gekko/Broadway cores, including
//!   paired-single instructions
//!
//! Every decode call is a pure function of its inputs: the opcode tables are
//! immutable statics and no state survives between calls.

pub mod error;
pub mod traits;

#[cfg(feature = "x86")]
pub mod x86;

#[cfg(feature = "ppc")]
pub mod ppc;

pub use error::DecodeError;
pub use traits::{DecodedInstruction, Disassembler};

#[cfg(feature = "x86")]
pub use x86::{DecoderOptions, X86Disassembler};

#[cfg(feature = "ppc")]
pub use ppc::PpcDisassembler;
