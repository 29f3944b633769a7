//! x86 / x86-64 decoder.
//!
//! One instruction is decoded in a single forward pass:
//!
//! 1. legacy prefixes and REX ([`prefix`])
//! 2. the `0F`, `0F 38`/`0F 3A` and VEX/XOP/EVEX escapes ([`vex`])
//! 3. ModRM, SIB and displacement ([`modrm`])
//! 4. the opcode-table group walk ([`dispatch`] over [`tables`])
//! 5. operand rendering, which also fetches immediates ([`operand`]), and
//!    the Intel/AT&T front end ([`format`])
//!
//! The result is available as a plain `(length, text)` pair through
//! [`decode`], or as an [`Instruction`](dasmkit_core::Instruction) record
//! through [`X86Disassembler`].

mod cursor;
mod decoder;
mod dispatch;
mod format;
mod insn;
mod modrm;
mod operand;
mod prefix;
mod regs;
mod tables;
mod vex;

pub use cursor::MAX_INSTRUCTION_LEN;
pub use decoder::{decode, DecoderOptions, X86Disassembler, X86Instruction};
pub use tables::Feature;
