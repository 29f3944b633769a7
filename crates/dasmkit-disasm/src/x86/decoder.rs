//! x86 decoder entry points.

use dasmkit_core::{
    Architecture, Bitness, ControlFlow, Encoding, Instruction, InstructionFlags, Syntax,
};

use super::cursor::{Cursor, MAX_INSTRUCTION_LEN};
use super::dispatch;
use super::format::{self, Rendered};
use super::insn::{Insn, OpcodeSpace};
use super::modrm::{self, ModRm};
use super::operand::Context;
use super::prefix::{Prefixes, SsePrefix};
use super::regs::Width;
use super::tables::{self, Feature, OpcodeEntry};
use super::vex::{self, VectorPrefix};
use crate::error::DecodeError;
use crate::traits::{DecodedInstruction, Disassembler};

/// Per-decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Default operand and address width.
    pub bitness: Bitness,
    /// Output syntax.
    pub syntax: Syntax,
    /// Code-segment base added to branch targets. `None` leaves absolute
    /// targets out of the text.
    pub base_address: Option<u64>,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            bitness: Bitness::Bits64,
            syntax: Syntax::Intel,
            base_address: None,
        }
    }
}

impl DecoderOptions {
    pub fn new(bitness: Bitness) -> Self {
        Self { bitness, ..Self::default() }
    }

    pub fn bitness(mut self, bitness: Bitness) -> Self {
        self.bitness = bitness;
        self
    }

    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn base_address(mut self, base: u64) -> Self {
        self.base_address = Some(base);
        self
    }

    pub fn without_base_address(mut self) -> Self {
        self.base_address = None;
        self
    }

    pub fn build(self) -> X86Disassembler {
        X86Disassembler::with_options(self)
    }
}

impl From<DecoderOptions> for X86Disassembler {
    fn from(options: DecoderOptions) -> Self {
        Self::with_options(options)
    }
}

/// An x86 instruction with the details the generic record has no room for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct X86Instruction {
    pub instruction: Instruction,
    /// Extension the final table entry belongs to.
    pub feature: Feature,
}

/// x86 / x86-64 decoder.
#[derive(Debug, Clone, Default)]
pub struct X86Disassembler {
    options: DecoderOptions,
}

impl X86Disassembler {
    /// Creates a decoder for `bitness` with Intel syntax.
    pub fn new(bitness: Bitness) -> Self {
        Self::with_options(DecoderOptions::new(bitness))
    }

    pub fn with_options(options: DecoderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes one instruction at `address` with its x86-specific details.
    pub fn decode(&self, bytes: &[u8], address: u64) -> Result<X86Instruction, DecodeError> {
        let decoded = decode_one(&self.options, bytes, address)?;
        log::trace!(
            "{address:#x}: {} byte(s) {} {}",
            decoded.len,
            decoded.rendered.mnemonic,
            decoded.rendered.operands
        );
        let instruction = Instruction::new(address, decoded.bytes, decoded.rendered.mnemonic)
            .with_operands(decoded.rendered.operands)
            .with_encoding(decoded.encoding)
            .with_control_flow(decoded.control_flow)
            .with_flags(decoded.flags);
        Ok(X86Instruction { instruction, feature: decoded.feature })
    }
}

impl Disassembler for X86Disassembler {
    fn decode_instruction(&self, bytes: &[u8], address: u64) -> Result<DecodedInstruction, DecodeError> {
        let decoded = self.decode(bytes, address)?;
        let size = decoded.instruction.size;
        Ok(DecodedInstruction { instruction: decoded.instruction, size })
    }

    fn min_instruction_size(&self) -> usize {
        1
    }

    fn max_instruction_size(&self) -> usize {
        MAX_INSTRUCTION_LEN
    }

    fn is_fixed_width(&self) -> bool {
        false
    }

    fn architecture(&self) -> Architecture {
        Architecture::X86
    }
}

/// Decodes one instruction and returns its length and text.
///
/// `base_address` is the code-segment base used to print absolute branch
/// targets; `ip` is the address of the first byte.
pub fn decode(
    bitness: Bitness,
    base_address: Option<u64>,
    ip: u64,
    bytes: &[u8],
    syntax: Syntax,
) -> Result<(usize, String), DecodeError> {
    let options = DecoderOptions { bitness, syntax, base_address };
    let decoded = decode_one(&options, bytes, ip)?;
    let Rendered { mnemonic, operands } = decoded.rendered;
    let text = if operands.is_empty() {
        mnemonic
    } else {
        format!("{mnemonic} {operands}")
    };
    Ok((decoded.len, text))
}

struct Decoded {
    len: usize,
    bytes: Vec<u8>,
    rendered: Rendered,
    encoding: Encoding,
    control_flow: ControlFlow,
    flags: InstructionFlags,
    feature: Feature,
}

fn decode_one(options: &DecoderOptions, bytes: &[u8], ip: u64) -> Result<Decoded, DecodeError> {
    let mut cur = Cursor::new(bytes, ip);
    let is_64 = options.bitness.is_64();
    let (prefixes, lead) = Prefixes::scan(&mut cur, options.bitness)?;
    let mut insn = Insn::new(options.bitness, prefixes);

    insn.space = match lead {
        0x0F => {
            let op = cur.u8()?;
            match tables::three_byte_map(op) {
                Some(map) => OpcodeSpace::ThreeByte { map, op: cur.u8()? },
                None => OpcodeSpace::TwoByte(op),
            }
        }
        0xC5 if vex::is_vex_escape(is_64, cur.peek()) => {
            let vector = VectorPrefix::from_vex2(cur.u8()?);
            vector_space(&mut insn, vector, &mut cur)?
        }
        0xC4 if vex::is_vex_escape(is_64, cur.peek()) => {
            let (b1, b2) = (cur.u8()?, cur.u8()?);
            vector_space(&mut insn, VectorPrefix::from_vex3(b1, b2), &mut cur)?
        }
        0x8F if vex::is_xop_escape(is_64, cur.peek()) => {
            let (b1, b2) = (cur.u8()?, cur.u8()?);
            vector_space(&mut insn, VectorPrefix::from_xop(b1, b2), &mut cur)?
        }
        0x62 if vex::is_evex_escape(is_64, cur.peek()) => {
            let (p0, p1, p2) = (cur.u8()?, cur.u8()?, cur.u8()?);
            vector_space(&mut insn, VectorPrefix::from_evex(p0, p1, p2), &mut cur)?
        }
        op => OpcodeSpace::OneByte(op),
    };

    let malformed = insn.malformed();
    if malformed {
        log::debug!(
            "{ip:#x}: malformed {:?} prefix, slot {:#x}",
            insn.encoding(),
            insn.space.slot()
        );
    }

    if malformed || tables::has_modrm(insn.space) {
        let mut byte = cur.u8()?;
        // Control and debug register moves are register-direct whatever mod says.
        if matches!(insn.space, OpcodeSpace::TwoByte(0x20..=0x23)) {
            byte |= 0xC0;
        }
        let modrm = ModRm::parse(byte, &insn);
        insn.modrm = Some(modrm);
        if !modrm.is_register() {
            insn.mem = Some(modrm::resolve(&insn, modrm, &mut cur)?);
        }
    }

    let entry = if malformed {
        &tables::BAD_ENCODING
    } else {
        root_entry(&insn)
    };
    let info = dispatch::walk(entry, &mut insn, &mut cur)?;
    let ctx = Context { syntax: options.syntax, base: options.base_address };
    let rendered = format::render(info, &mut insn, &mut cur, &ctx)?;

    Ok(Decoded {
        len: cur.len(),
        bytes: cur.consumed().to_vec(),
        rendered,
        encoding: insn.encoding(),
        control_flow: format::control_flow(info, insn.branch_target),
        flags: InstructionFlags {
            malformed,
            illegal: info.is_invalid(),
            privileged: info.feature == Feature::System,
        },
        feature: info.feature,
    })
}

/// Reads the opcode byte after a VEX/XOP/EVEX escape.
fn vector_space(insn: &mut Insn, vector: VectorPrefix, cur: &mut Cursor<'_>) -> Result<OpcodeSpace, DecodeError> {
    insn.apply_vector(vector);
    let op = cur.u8()?;
    let map = vector.map;
    Ok(match vector.kind {
        vex::EscapeKind::Vex => OpcodeSpace::Vex { map, op },
        vex::EscapeKind::Xop => OpcodeSpace::Xop { map, op },
        vex::EscapeKind::Evex => OpcodeSpace::Evex { map, op },
    })
}

/// Table root, with the one-byte special cases that depend on prefixes
/// rather than on ModRM.
fn root_entry(insn: &Insn) -> &'static OpcodeEntry {
    match insn.space {
        OpcodeSpace::OneByte(0x90) if insn.rex_b != 0 => &tables::XCHG_R8,
        OpcodeSpace::OneByte(0x90) if insn.sse == SsePrefix::F3 => &tables::PAUSE,
        OpcodeSpace::OneByte(0xE3) if insn.asz == Width::W32 => &tables::JECXZ,
        space => tables::root(space, insn.is_64()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intel(bitness: Bitness, bytes: &[u8]) -> (usize, String) {
        decode(bitness, None, 0, bytes, Syntax::Intel).unwrap()
    }

    fn att(bitness: Bitness, bytes: &[u8]) -> (usize, String) {
        decode(bitness, None, 0, bytes, Syntax::Att).unwrap()
    }

    #[test]
    fn test_mov_immediate() {
        let bytes = [0xB8, 0x01, 0x00, 0x00, 0x00];
        assert_eq!(intel(Bitness::Bits32, &bytes), (5, "mov eax, 0x00000001".to_string()));
        assert_eq!(att(Bitness::Bits32, &bytes), (5, "movl $0x00000001, %eax".to_string()));
        assert_eq!(intel(Bitness::Bits16, &bytes[..3]), (3, "mov ax, 0x0001".to_string()));
    }

    #[test]
    fn test_multibyte_nop_and_operand_size() {
        assert_eq!(intel(Bitness::Bits32, &[0x0F, 0x1F, 0x00]), (3, "nop dword ptr ds:[eax]".to_string()));
        assert_eq!(intel(Bitness::Bits32, &[0x66, 0x0F, 0x1F, 0x00]), (4, "nop word ptr ds:[eax]".to_string()));
        assert_eq!(att(Bitness::Bits32, &[0x0F, 0x1F, 0x00]), (3, "nopl %ds:(%eax)".to_string()));
    }

    #[test]
    fn test_vex_move() {
        let d = X86Disassembler::new(Bitness::Bits64);
        let out = d.decode(&[0xC5, 0xF8, 0x10, 0xC1], 0).unwrap();
        assert_eq!(out.instruction.size, 4);
        assert_eq!(out.instruction.text(), "vmovups xmm0, xmm1");
        assert_eq!(out.instruction.encoding, Encoding::Vex);
        assert!(!out.instruction.flags.malformed);
        assert_eq!(out.feature, Feature::Avx);
    }

    #[test]
    fn test_pop_is_not_xop_without_escape_pattern() {
        assert_eq!(intel(Bitness::Bits32, &[0x8F, 0x40, 0x08]), (3, "pop dword ptr ds:[eax+8]".to_string()));
        // Register form, but the map field is below 8.
        assert_eq!(intel(Bitness::Bits32, &[0x8F, 0xC0]), (2, "pop eax".to_string()));
    }

    #[test]
    fn test_les_lds_outside_long_mode() {
        assert_eq!(intel(Bitness::Bits32, &[0xC5, 0x06]), (2, "lds eax, fword ptr ds:[esi]".to_string()));
    }

    #[test]
    fn test_nop_pause_and_xchg_r8() {
        assert_eq!(intel(Bitness::Bits64, &[0x90]), (1, "nop".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0xF3, 0x90]), (2, "pause".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0x41, 0x90]), (2, "xchg r8d, eax".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0x49, 0x90]), (2, "xchg r8, rax".to_string()));
        assert_eq!(intel(Bitness::Bits32, &[0x91]), (1, "xchg ecx, eax".to_string()));
    }

    #[test]
    fn test_jcxz_family() {
        assert_eq!(intel(Bitness::Bits16, &[0xE3, 0x00]), (2, "jcxz .+0".to_string()));
        assert_eq!(intel(Bitness::Bits32, &[0xE3, 0x00]), (2, "jecxz .+0".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0xE3, 0x00]), (2, "jrcxz .+0".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0x67, 0xE3, 0x00]), (3, "jecxz .+0".to_string()));
    }

    #[test]
    fn test_control_register_forces_register_form() {
        assert_eq!(intel(Bitness::Bits32, &[0x0F, 0x20, 0x00]), (3, "mov eax, cr0".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0x0F, 0x22, 0xD8]), (3, "mov cr3, rax".to_string()));
    }

    #[test]
    fn test_branch_targets() {
        let (len, text) = decode(Bitness::Bits32, Some(0), 0x1000, &[0xE8, 0x10, 0x00, 0x00, 0x00], Syntax::Intel)
            .unwrap();
        assert_eq!(len, 5);
        assert_eq!(text, "call .+16 (0x00001015)");

        let (_, text) = decode(Bitness::Bits64, Some(0), 0x1000, &[0xEB, 0xFE], Syntax::Intel).unwrap();
        assert_eq!(text, "jmp .-2 (0x0000000000001000)");

        let d = DecoderOptions::new(Bitness::Bits32).base_address(0).build();
        let out = d.decode(&[0x75, 0x02], 0x40).unwrap().instruction;
        assert_eq!(out.control_flow, ControlFlow::ConditionalJump { target: Some(0x44) });
    }

    #[test]
    fn test_att_indirect_call() {
        assert_eq!(att(Bitness::Bits64, &[0xFF, 0xD0]), (2, "call *%rax".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0xFF, 0xD0]), (2, "call rax".to_string()));
    }

    #[test]
    fn test_rip_relative() {
        let bytes = [0x48, 0x8B, 0x05, 0x10, 0x00, 0x00, 0x00];
        assert_eq!(intel(Bitness::Bits64, &bytes), (7, "mov rax, qword ptr ds:[rip+16]".to_string()));
        assert_eq!(att(Bitness::Bits64, &bytes), (7, "movq %ds:0x10(%rip), %rax".to_string()));
    }

    #[test]
    fn test_sib_with_segment_default() {
        // mov eax, [esp+8]
        assert_eq!(intel(Bitness::Bits32, &[0x8B, 0x44, 0x24, 0x08]), (4, "mov eax, dword ptr ss:[esp+8]".to_string()));
        assert_eq!(att(Bitness::Bits32, &[0x8B, 0x44, 0x24, 0x08]), (4, "movl %ss:0x8(%esp), %eax".to_string()));
        // explicit override wins
        assert_eq!(intel(Bitness::Bits32, &[0x64, 0x8B, 0x00]), (3, "mov eax, dword ptr fs:[eax]".to_string()));
    }

    #[test]
    fn test_rep_string() {
        assert_eq!(intel(Bitness::Bits32, &[0xF3, 0xA4]), (2, "rep movsb byte ptr es:[edi], byte ptr ds:[esi]".to_string()));
        assert_eq!(intel(Bitness::Bits32, &[0xF2, 0xAE]), (2, "repne scasb al, byte ptr es:[edi]".to_string()));
    }

    #[test]
    fn test_lock_prefix() {
        assert_eq!(intel(Bitness::Bits32, &[0xF0, 0x01, 0x08]), (3, "lock add dword ptr ds:[eax], ecx".to_string()));
    }

    #[test]
    fn test_sse_prefix_selects_column() {
        assert_eq!(intel(Bitness::Bits64, &[0x0F, 0x58, 0xC1]), (3, "addps xmm0, xmm1".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0x66, 0x0F, 0x58, 0xC1]), (4, "addpd xmm0, xmm1".to_string()));
        assert_eq!(intel(Bitness::Bits64, &[0xF3, 0x0F, 0x58, 0xC1]), (4, "addss xmm0, xmm1".to_string()));
        // first of F2/F3 wins
        assert_eq!(intel(Bitness::Bits64, &[0xF2, 0xF3, 0x0F, 0x58, 0xC1]), (5, "addsd xmm0, xmm1".to_string()));
    }

    #[test]
    fn test_x87() {
        assert_eq!(intel(Bitness::Bits32, &[0xD9, 0xE8]), (2, "fld1".to_string()));
        assert_eq!(intel(Bitness::Bits32, &[0xD9, 0xC1]), (2, "fld st(1)".to_string()));
    }

    #[test]
    fn test_malformed_vex_map_still_has_length() {
        // map 0 is reserved
        let d = X86Disassembler::new(Bitness::Bits64);
        let out = d.decode(&[0xC4, 0xE0, 0x78, 0x10, 0xC1], 0).unwrap().instruction;
        assert_eq!(out.size, 5);
        assert!(out.flags.malformed);
        assert_eq!(out.text(), "(invalid) (bad vex)");
    }

    #[test]
    fn test_three_byte_opcode() {
        // pshufb xmm0, xmm1
        assert_eq!(intel(Bitness::Bits64, &[0x66, 0x0F, 0x38, 0x00, 0xC1]), (5, "pshufb xmm0, xmm1".to_string()));
        // palignr xmm0, xmm1, 4
        assert_eq!(
            intel(Bitness::Bits64, &[0x66, 0x0F, 0x3A, 0x0F, 0xC1, 0x04]),
            (6, "palignr xmm0, xmm1, 0x04".to_string())
        );
    }

    #[test]
    fn test_truncated_and_too_long() {
        assert!(matches!(
            decode(Bitness::Bits32, None, 0, &[0xB8, 0x01], Syntax::Intel),
            Err(DecodeError::Truncated { .. })
        ));
        let prefixes = [0x66u8; 16];
        assert!(matches!(
            decode(Bitness::Bits32, None, 0, &prefixes, Syntax::Intel),
            Err(DecodeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_disassemble_block_skips_errors() {
        let d = X86Disassembler::new(Bitness::Bits32);
        let out = d.disassemble_block(&[0x90, 0xC3, 0xB8], 0x100);
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].as_ref().unwrap().control_flow, ControlFlow::Return);
        assert!(out[2].is_err());
    }
}
