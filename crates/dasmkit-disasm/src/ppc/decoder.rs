//! PowerPC entry points and the `Disassembler` implementation.

use std::fmt;

use dasmkit_core::{Architecture, ControlFlow, Encoding, Instruction, InstructionFlags};
use log::trace;

use super::render::{self, Render};
use crate::{DecodeError, DecodedInstruction, Disassembler};

/// What the metadata of a decoded word describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PpcKind {
    #[default]
    Other,
    /// Branch; `target` is set for direct branches.
    Branch,
    /// Load or store; `displacement` and `base_register` describe the address.
    LoadStore,
    /// 16-bit immediate operand, held in `displacement`.
    Immediate,
}

/// Properties of a decoded word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PpcFlags {
    /// The word does not name an instruction.
    pub illegal: bool,
    /// The immediate operand is zero-extended.
    pub unsigned_immediate: bool,
    /// Only executable in supervisor mode.
    pub supervisor: bool,
    /// Only defined on 64-bit implementations.
    pub only_64bit: bool,
}

impl PpcFlags {
    pub(super) const NONE: Self = Self {
        illegal: false,
        unsigned_immediate: false,
        supervisor: false,
        only_64bit: false,
    };

    pub(super) const SUPERVISOR: Self = Self {
        supervisor: true,
        ..Self::NONE
    };

    pub(super) const ONLY_64BIT: Self = Self {
        only_64bit: true,
        ..Self::NONE
    };

    pub(super) const SUPERVISOR_64BIT: Self = Self {
        supervisor: true,
        only_64bit: true,
        ..Self::NONE
    };

    pub(super) fn union(self, other: Self) -> Self {
        Self {
            illegal: self.illegal || other.illegal,
            unsigned_immediate: self.unsigned_immediate || other.unsigned_immediate,
            supervisor: self.supervisor || other.supervisor,
            only_64bit: self.only_64bit || other.only_64bit,
        }
    }
}

/// Metadata reported alongside the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PpcInfo {
    pub kind: PpcKind,
    pub flags: PpcFlags,
    /// Destination of a direct branch.
    pub target: Option<u32>,
    /// Branch displacement, load/store offset or immediate value.
    pub displacement: i32,
    /// Base register of a load/store.
    pub base_register: Option<u8>,
}

/// One rendered PowerPC instruction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PpcInstruction {
    pub mnemonic: String,
    pub operands: String,
    pub info: PpcInfo,
}

impl fmt::Display for PpcInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            f.write_str(&self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, self.operands)
        }
    }
}

/// Decodes one big-endian-order instruction word located at `address`.
///
/// Every word renders: unknown encodings come back as `( ill )` with the
/// illegal flag set.
pub fn decode_ppc(word: u32, address: u32) -> PpcInstruction {
    let mut render = Render::new(word, address);
    render.decode();
    render.finish()
}

/// Control-flow kind of a decoded word.
fn control_flow(word: u32, insn: &PpcInstruction) -> ControlFlow {
    if insn.info.kind != PpcKind::Branch {
        return ControlFlow::Sequential;
    }
    let target = insn.info.target.map(u64::from);
    let link = word & 1 != 0;
    let always = render::rd(word) & 0x14 == 0x14;

    if link {
        return ControlFlow::Call { target };
    }
    match render::primary(word) {
        18 => ControlFlow::Jump { target },
        16 if always => ControlFlow::Jump { target },
        19 if always && render::xo(word) == 16 => ControlFlow::Return,
        19 if always => ControlFlow::Jump { target: None },
        _ => ControlFlow::ConditionalJump { target },
    }
}

/// PowerPC (Gekko/Broadway) disassembler over big-endian 32-bit words.
#[derive(Debug, Clone, Copy, Default)]
pub struct PpcDisassembler;

impl PpcDisassembler {
    /// Creates a new PowerPC disassembler.
    pub fn new() -> Self {
        Self
    }

    /// Decodes the word at the start of `bytes`.
    ///
    /// Addresses are 32-bit; the upper half of `address` is ignored when
    /// computing branch targets.
    pub fn decode(&self, bytes: &[u8], address: u64) -> Result<DecodedInstruction, DecodeError> {
        let Some(raw) = bytes.get(..4) else {
            return Err(DecodeError::invalid_encoding(
                address,
                format!("need a 4-byte word, have {} byte(s)", bytes.len()),
            ));
        };
        let word = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let decoded = decode_ppc(word, address as u32);
        trace!("{address:#010x}: {word:08x} {decoded}");

        let flags = InstructionFlags {
            malformed: false,
            illegal: decoded.info.flags.illegal,
            privileged: decoded.info.flags.supervisor,
        };
        let control_flow = control_flow(word, &decoded);
        let instruction = Instruction::new(address, raw.to_vec(), decoded.mnemonic)
            .with_operands(decoded.operands)
            .with_encoding(Encoding::Word)
            .with_control_flow(control_flow)
            .with_flags(flags);
        Ok(DecodedInstruction { instruction, size: 4 })
    }
}

impl Disassembler for PpcDisassembler {
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> Result<DecodedInstruction, DecodeError> {
        self.decode(bytes, address)
    }

    fn min_instruction_size(&self) -> usize {
        4
    }

    fn max_instruction_size(&self) -> usize {
        4
    }

    fn is_fixed_width(&self) -> bool {
        true
    }

    fn architecture(&self) -> Architecture {
        Architecture::PowerPc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(word: u32) -> String {
        decode_ppc(word, 0x8000_3000).to_string()
    }

    fn parts(word: u32, address: u32) -> (String, String) {
        let insn = decode_ppc(word, address);
        (insn.mnemonic, insn.operands)
    }

    #[test]
    fn test_immediates() {
        let li = decode_ppc(0x3860_0001, 0);
        assert_eq!(li.to_string(), "li r3, 1");
        assert_eq!(li.info.kind, PpcKind::Immediate);
        assert_eq!(li.info.displacement, 1);
        assert!(!li.info.flags.unsigned_immediate);

        let lis = decode_ppc(0x3c60_8000, 0);
        assert_eq!(lis.to_string(), "lis r3, 0x8000");
        assert!(lis.info.flags.unsigned_immediate);

        assert_eq!(text(0x3861_fff8), "subi r3, sp, 8");
        assert_eq!(text(0x3863_0010), "addi r3, r3, 16");
        assert_eq!(text(0x6083_1234), "ori r3, r4, 0x1234");
        assert_eq!(text(0x6000_0000), "nop");
        assert_eq!(text(0x2f83_0000), "cmpwi cr7, r3, 0");
        assert_eq!(text(0x1c63_fffe), "mulli r3, r3, -2");
    }

    #[test]
    fn test_branches() {
        assert_eq!(parts(0x4800_0101, 0x8000_3000), ("bl".into(), "->0x80003100".into()));
        assert_eq!(parts(0x4bff_fffc, 0x1000), ("b".into(), "->0x00000FFC".into()));
        assert_eq!(parts(0x4800_0102, 0x1000), ("ba".into(), "->0x00000100".into()));
        assert_eq!(parts(0x4182_0008, 0x1000), ("beq-".into(), "->0x00001008".into()));
        assert_eq!(parts(0x4086_fff0, 0x2000), ("bne+".into(), "cr1, ->0x00001FF0".into()));
        assert_eq!(parts(0x4200_fff8, 0x1000), ("bdnz+".into(), "->0x00000FF8".into()));
        assert_eq!(parts(0x4e80_0020, 0), ("blr".into(), String::new()));
        assert_eq!(parts(0x4e80_0420, 0), ("bctr".into(), String::new()));
        assert_eq!(parts(0x4e80_0021, 0), ("blrl".into(), String::new()));

        let beq = decode_ppc(0x4182_0008, 0x1000);
        assert_eq!(beq.info.kind, PpcKind::Branch);
        assert_eq!(beq.info.target, Some(0x1008));
        assert_eq!(beq.info.displacement, 8);
    }

    #[test]
    fn test_control_flow() {
        let cases = [
            (0x4800_0101, ControlFlow::Call { target: Some(0x1100) }),
            (0x4bff_fffc, ControlFlow::Jump { target: Some(0xffc) }),
            (0x4182_0008, ControlFlow::ConditionalJump { target: Some(0x1008) }),
            (0x4e80_0020, ControlFlow::Return),
            (0x4e80_0420, ControlFlow::Jump { target: None }),
            (0x6000_0000, ControlFlow::Sequential),
        ];
        for (word, expected) in cases {
            let insn = decode_ppc(word, 0x1000);
            assert_eq!(control_flow(word, &insn), expected, "{word:08x}");
        }
    }

    #[test]
    fn test_illegal_words() {
        let zero = decode_ppc(0, 0);
        assert_eq!(zero.mnemonic, "");
        assert_eq!(zero.operands, "---");
        assert!(zero.info.flags.illegal);

        let ill = decode_ppc(0x0000_0001, 0);
        assert_eq!(ill.mnemonic, "( ill )");
        assert_eq!(ill.operands, "00000001");
        assert!(ill.info.flags.illegal);

        // stwcx. without the record bit
        assert_eq!(text(0x7c60_212c), "( ill ) 7c60212c");
        // dcbz with a nonzero D field
        assert_eq!(text(0x7c63_27ec), "( ill ) 7c6327ec");
    }

    #[test]
    fn test_integer_x_forms() {
        assert_eq!(text(0x7c64_2a14), "add r3, r4, r5");
        assert_eq!(text(0x7c64_2e15), "addo. r3, r4, r5");
        assert_eq!(text(0x7c64_2850), "sub r3, r5, r4");
        assert_eq!(text(0x7c83_2378), "mr r3, r4");
        assert_eq!(text(0x7c03_2040), "cmplw r3, r4");
        assert_eq!(text(0x7c60_212d), "stwcx. r3, r0, r4");
        assert_eq!(text(0x7c03_27ec), "dcbz r3, r4");
        assert_eq!(text(0x7c64_44aa), "lswi r3, r4, 8");
        assert_eq!(text(0x7c83_1670), "srawi r3, r4, 2");
        assert_eq!(text(0x7fe0_0008), "trap");
    }

    #[test]
    fn test_rotates() {
        assert_eq!(text(0x5463_103a), "slwi r3, r3, 2");
        assert_eq!(text(0x5483_c23e), "srwi r3, r4, 8");
        assert_eq!(text(0x5463_043e), "clrlwi r3, r3, 16");
        assert_eq!(text(0x5463_003a), "rlwinm r3, r3, 0, 0, 29 (fffffffc)");
        assert_eq!(text(0x5083_442e), "rlwimi r3, r4, 8, 16, 23 (000000ff)");
    }

    #[test]
    fn test_special_registers() {
        assert_eq!(text(0x7c08_02a6), "mflr r0");
        let mtspr = decode_ppc(0x7c70_e3a6, 0);
        assert_eq!(mtspr.to_string(), "mtspr GQR0, r3");
        assert!(mtspr.info.flags.supervisor);
        assert_eq!(text(0x7c68_0120), "mtcrf 0x80, r3");
        assert_eq!(text(0x7c6f_f120), "mtcr r3");
        assert_eq!(text(0x7c6c_42e6), "mftbl r3");
        assert!(decode_ppc(0x7c60_00a6, 0).info.flags.supervisor);
        assert!(decode_ppc(0x4c00_0064, 0).info.flags.supervisor);
        assert_eq!(text(0x4400_0002), "sc");
    }

    #[test]
    fn test_condition_register_ops() {
        assert_eq!(text(0x4cc6_3182), "crclr 6, 6");
        assert_eq!(text(0x4c88_0000), "mcrf cr1, cr2");
    }

    #[test]
    fn test_load_store() {
        let lwz = decode_ppc(0x8061_0008, 0);
        assert_eq!(lwz.to_string(), "lwz r3, 0x0008 (sp)");
        assert_eq!(lwz.info.kind, PpcKind::LoadStore);
        assert_eq!(lwz.info.base_register, Some(1));
        assert_eq!(lwz.info.displacement, 8);

        let stw = decode_ppc(0x9001_fffc, 0);
        assert_eq!(stw.to_string(), "stw r0, -0x0004 (sp)");
        assert_eq!(stw.info.displacement, -4);

        assert_eq!(text(0xc023_0000), "lfs f1, 0 (r3)");
        let ld = decode_ppc(0xe861_0008, 0);
        assert_eq!(ld.to_string(), "ld r3, 0x0008 (sp)");
        assert!(ld.info.flags.only_64bit);
    }

    #[test]
    fn test_paired_singles() {
        assert_eq!(text(0x1022_182a), "ps_add p1, p2+p3");
        assert_eq!(text(0x1001_14a0), "ps_merge10 p0, p1[1], p2[0]");
        assert_eq!(text(0x1081_1040), "ps_cmpo0 cr1, p1, p2");
        assert_eq!(text(0xe023_2008), "psq_l p1, 0x0008(r3), 0, qr2");
        assert_eq!(text(0xf041_8ff0), "psq_st p2, -0x0010(r1), 1, qr0");
    }

    #[test]
    fn test_floating_point() {
        assert_eq!(text(0xfc22_182a), "fadd f1, f2, f3");
        assert_eq!(text(0xfc81_1000), "fcmpu cr1, f1, f2");
        assert_eq!(text(0xfc20_1090), "fmr f1, f2");
        assert_eq!(text(0xec22_00f2), "fmuls f1, f2, f3");
    }

    #[test]
    fn test_disassembler_trait() {
        let disasm = PpcDisassembler::new();
        let decoded = disasm.decode_instruction(&[0x38, 0x60, 0x00, 0x01], 0x8000_0000).unwrap();
        assert_eq!(decoded.size, 4);
        assert_eq!(decoded.instruction.text(), "li r3, 1");
        assert_eq!(decoded.instruction.encoding, Encoding::Word);
        assert!(disasm.is_fixed_width());

        let err = disasm.decode_instruction(&[0x38, 0x60], 0x10).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidEncoding { address: 0x10, .. }));

        let block = disasm.disassemble_block(&[0x60, 0, 0, 0, 0x4e, 0x80, 0, 0x20], 0);
        assert_eq!(block.len(), 2);
        assert_eq!(block[1].as_ref().unwrap().control_flow, ControlFlow::Return);
    }
}
