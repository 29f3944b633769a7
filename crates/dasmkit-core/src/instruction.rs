//! Architecture-agnostic record of one rendered instruction.

use std::fmt;

/// A decoded and rendered instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Address (instruction pointer) of the first byte.
    pub address: u64,
    /// Size in bytes.
    pub size: usize,
    /// Raw bytes of the instruction.
    pub bytes: Vec<u8>,
    /// Mnemonic in the requested syntax (e.g. "mov", "movl", "bdnz+").
    pub mnemonic: String,
    /// Rendered operand list, already ordered for the requested syntax.
    pub operands: String,
    /// How the instruction was encoded.
    pub encoding: Encoding,
    /// Control flow information.
    pub control_flow: ControlFlow,
    /// Decode diagnostics.
    pub flags: InstructionFlags,
}

impl Instruction {
    /// Creates a new instruction with minimal fields.
    pub fn new(address: u64, bytes: Vec<u8>, mnemonic: impl Into<String>) -> Self {
        Self {
            address,
            size: bytes.len(),
            bytes,
            mnemonic: mnemonic.into(),
            operands: String::new(),
            encoding: Encoding::Legacy,
            control_flow: ControlFlow::Sequential,
            flags: InstructionFlags::default(),
        }
    }

    pub fn with_operands(mut self, operands: impl Into<String>) -> Self {
        self.operands = operands.into();
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_control_flow(mut self, cf: ControlFlow) -> Self {
        self.control_flow = cf;
        self
    }

    pub fn with_flags(mut self, flags: InstructionFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the end address (address + size).
    pub fn end_address(&self) -> u64 {
        self.address.wrapping_add(self.size as u64)
    }

    /// Mnemonic and operands as one line, separated by a single space.
    pub fn text(&self) -> String {
        self.to_string()
    }

    /// Returns true if this instruction can transfer control.
    pub fn is_branch(&self) -> bool {
        !matches!(self.control_flow, ControlFlow::Sequential)
    }

    /// Statically known branch target, if any.
    pub fn branch_target(&self) -> Option<u64> {
        match self.control_flow {
            ControlFlow::Jump { target }
            | ControlFlow::ConditionalJump { target }
            | ControlFlow::Call { target } => target,
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            f.write_str(&self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, self.operands)
        }
    }
}

/// Instruction encoding family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Legacy x86 encoding (optional prefixes, REX, 0F escapes).
    #[default]
    Legacy,
    Vex,
    Xop,
    Evex,
    /// Fixed-width 32-bit word (PowerPC).
    Word,
}

/// Control flow effect of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlFlow {
    #[default]
    Sequential,
    Jump { target: Option<u64> },
    ConditionalJump { target: Option<u64> },
    Call { target: Option<u64> },
    Return,
}

/// Diagnostics attached by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstructionFlags {
    /// A VEX/XOP/EVEX escape carried a reserved bit pattern.
    pub malformed: bool,
    /// The word or opcode does not name an instruction.
    pub illegal: bool,
    /// Only executable in supervisor mode.
    pub privileged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_mnemonic_and_operands() {
        let insn = Instruction::new(0x1000, vec![0x90], "nop");
        assert_eq!(insn.text(), "nop");
        let insn = Instruction::new(0x1000, vec![0x31, 0xc0], "xor").with_operands("eax, eax");
        assert_eq!(insn.to_string(), "xor eax, eax");
        assert_eq!(insn.end_address(), 0x1002);
    }

    #[test]
    fn test_branch_target() {
        let insn = Instruction::new(0, vec![0xeb, 0x00], "jmp")
            .with_control_flow(ControlFlow::Jump { target: Some(2) });
        assert!(insn.is_branch());
        assert_eq!(insn.branch_target(), Some(2));
        let ret = Instruction::new(0, vec![0xc3], "ret").with_control_flow(ControlFlow::Return);
        assert_eq!(ret.branch_target(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_shape() {
        let insn = Instruction::new(0x10, vec![0x90], "nop");
        let json = serde_json::to_string(&insn).unwrap();
        assert!(json.contains("\"mnemonic\":\"nop\""));
    }
}
