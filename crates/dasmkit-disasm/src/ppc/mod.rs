//! PowerPC (Gekko/Broadway) instruction decoder.
//!
//! PowerPC uses fixed 32-bit big-endian instructions. This module decodes
//! the 32-bit user and supervisor instruction set, the 64-bit-only forms
//! (flagged as such), and the Gekko paired-single extension:
//! - integer arithmetic, logical, rotate and shift, with `o`/`.` forms
//! - branches with the simplified `beq`/`bdnz`/`blr` mnemonics
//! - loads and stores, including quantized `psq_*`
//! - floating point and paired-single arithmetic
//! - special-purpose register moves with named SPRs

mod decoder;
mod names;
mod render;

pub use decoder::{decode_ppc, PpcDisassembler, PpcFlags, PpcInfo, PpcInstruction, PpcKind};
