//! End-to-end decoding of short byte sequences through the public API.

use dasmkit_core::{Bitness, ControlFlow, Encoding, Syntax};
use dasmkit_disasm::ppc::{decode_ppc, PpcKind};
use dasmkit_disasm::traits::Disassembler;
use dasmkit_disasm::x86::decode;
use dasmkit_disasm::{DecodeError, DecoderOptions, PpcDisassembler, X86Disassembler};

fn intel(bits: Bitness, bytes: &[u8]) -> (usize, String) {
    decode(bits, None, 0, bytes, Syntax::Intel).unwrap()
}

fn att(bits: Bitness, bytes: &[u8]) -> (usize, String) {
    decode(bits, None, 0, bytes, Syntax::Att).unwrap()
}

// =============================================================================
// x86
// =============================================================================

#[test]
fn test_mov_eax_immediate() {
    let bytes = [0xB8, 0x01, 0x00, 0x00, 0x00];
    assert_eq!(intel(Bitness::Bits32, &bytes), (5, "mov eax, 0x00000001".to_string()));
    assert_eq!(att(Bitness::Bits32, &bytes), (5, "movl $0x00000001, %eax".to_string()));
}

#[test]
fn test_multibyte_nop_with_memory_operand() {
    let disasm = X86Disassembler::new(Bitness::Bits32);
    let insn = disasm.decode(&[0x0F, 0x1F, 0x00], 0).unwrap().instruction;
    assert_eq!(insn.size, 3);
    assert_eq!(insn.text(), "nop dword ptr ds:[eax]");
    assert!(!insn.flags.illegal);
    assert!(!insn.flags.malformed);
}

#[test]
fn test_vex_vector_move() {
    let disasm = X86Disassembler::new(Bitness::Bits64);
    let insn = disasm.decode(&[0xC5, 0xF8, 0x10, 0xC1], 0).unwrap().instruction;
    assert_eq!(insn.size, 4);
    assert_eq!(insn.text(), "vmovups xmm0, xmm1");
    assert_eq!(insn.encoding, Encoding::Vex);
    assert!(!insn.flags.malformed);
}

#[test]
fn test_operand_size_prefix_narrows_nop() {
    let (len, text) = intel(Bitness::Bits32, &[0x66, 0x0F, 0x1F, 0x00]);
    assert_eq!(len, 4);
    assert_eq!(text, "nop word ptr ds:[eax]");
    assert_ne!(text, intel(Bitness::Bits32, &[0x0F, 0x1F, 0x00]).1);
}

#[test]
fn test_8f_without_xop_pattern_is_pop() {
    assert_eq!(intel(Bitness::Bits32, &[0x8F, 0x40, 0x08]), (3, "pop dword ptr ds:[eax+8]".to_string()));
    assert_eq!(intel(Bitness::Bits32, &[0x8F, 0xC0]), (2, "pop eax".to_string()));
}

#[test]
fn test_prefix_ordering() {
    // Repeat and SSE selection: the first of F2/F3 wins.
    assert_eq!(intel(Bitness::Bits64, &[0xF2, 0xF3, 0x0F, 0x58, 0xC1]), (5, "addsd xmm0, xmm1".to_string()));
    assert_eq!(intel(Bitness::Bits64, &[0xF3, 0xF2, 0x0F, 0x58, 0xC1]), (5, "addss xmm0, xmm1".to_string()));
    // Segment overrides: the last one wins.
    assert_eq!(intel(Bitness::Bits32, &[0x2E, 0x64, 0x8B, 0x00]), (4, "mov eax, dword ptr fs:[eax]".to_string()));
    assert_eq!(intel(Bitness::Bits32, &[0x64, 0x64, 0x8B, 0x00]), (4, "mov eax, dword ptr fs:[eax]".to_string()));
}

#[test]
fn test_prologue_in_both_syntaxes() {
    let cases: [(&[u8], &str, &str); 6] = [
        (&[0x55], "push rbp", "pushq %rbp"),
        (&[0x48, 0x89, 0xE5], "mov rbp, rsp", "movq %rsp, %rbp"),
        (&[0x48, 0x83, 0xEC, 0x20], "sub rsp, 0x0000000000000020", "subq $0x0000000000000020, %rsp"),
        (&[0x31, 0xC0], "xor eax, eax", "xorl %eax, %eax"),
        (&[0x5D], "pop rbp", "popq %rbp"),
        (&[0xC3], "ret", "ret"),
    ];
    for (bytes, want_intel, want_att) in cases {
        assert_eq!(intel(Bitness::Bits64, bytes), (bytes.len(), want_intel.to_string()));
        assert_eq!(att(Bitness::Bits64, bytes), (bytes.len(), want_att.to_string()));
    }
}

#[test]
fn test_branch_with_base_address() {
    let (len, text) = decode(Bitness::Bits32, Some(0x1000), 0, &[0xE8, 0x10, 0x00, 0x00, 0x00], Syntax::Intel).unwrap();
    assert_eq!((len, text.as_str()), (5, "call .+16 (0x00001015)"));

    let disasm = DecoderOptions::new(Bitness::Bits64).base_address(0).build();
    let insn = disasm.decode(&[0xEB, 0xFE], 0x2000).unwrap().instruction;
    assert_eq!(insn.control_flow, ControlFlow::Jump { target: Some(0x2000) });
    assert!(insn.is_branch());
}

#[test]
fn test_truncated_input_is_an_error() {
    let err = decode(Bitness::Bits32, None, 0x40, &[0xB8, 0x01], Syntax::Intel).unwrap_err();
    assert!(matches!(err, DecodeError::Truncated { address: 0x40, .. }));
}

#[test]
fn test_x86_block_listing() {
    let code = [0x55, 0x48, 0x89, 0xE5, 0x5D, 0xC3];
    let disasm = X86Disassembler::new(Bitness::Bits64);
    let listing: Vec<String> = disasm
        .disassemble_block(&code, 0x1000)
        .into_iter()
        .map(|r| {
            let insn = r.unwrap();
            format!("{:#x} {}", insn.address, insn.text())
        })
        .collect();
    assert_eq!(listing, ["0x1000 push rbp", "0x1001 mov rbp, rsp", "0x1004 pop rbp", "0x1005 ret"]);
}

#[test]
fn test_push_immediate_uses_stack_width() {
    let bytes = [0x68, 0x00, 0x00, 0x00, 0x80];
    assert_eq!(intel(Bitness::Bits64, &bytes), (5, "push 0xffffffff80000000".to_string()));
    assert_eq!(att(Bitness::Bits64, &bytes), (5, "pushq $0xffffffff80000000".to_string()));
    assert_eq!(intel(Bitness::Bits32, &[0x68, 0x78, 0x56, 0x34, 0x12]), (5, "push 0x12345678".to_string()));
    assert_eq!(intel(Bitness::Bits16, &[0x68, 0x34, 0x12]), (3, "push 0x1234".to_string()));
    assert_eq!(intel(Bitness::Bits64, &[0x66, 0x68, 0x34, 0x12]), (4, "push 0x1234".to_string()));
}

#[test]
fn test_swapgs_only_in_long_mode() {
    let bytes = [0x0F, 0x01, 0xF8];
    assert_eq!(intel(Bitness::Bits64, &bytes), (3, "swapgs".to_string()));
    for bits in [Bitness::Bits32, Bitness::Bits16] {
        let insn = X86Disassembler::new(bits).decode(&bytes, 0).unwrap().instruction;
        assert_eq!(insn.size, 3);
        assert_eq!(insn.text(), "(invalid)");
        assert!(insn.flags.illegal);
    }
    // The rest of the group is mode independent.
    assert_eq!(intel(Bitness::Bits32, &[0x0F, 0x01, 0xF9]), (3, "rdtscp".to_string()));
}

#[test]
fn test_opmask_instructions() {
    assert_eq!(intel(Bitness::Bits64, &[0xC5, 0xEC, 0x41, 0xCB]), (4, "kandw k1, k2, k3".to_string()));
    assert_eq!(intel(Bitness::Bits64, &[0xC5, 0xF8, 0x90, 0xCA]), (4, "kmovw k1, k2".to_string()));
    assert_eq!(intel(Bitness::Bits64, &[0xC5, 0xF8, 0x90, 0x08]), (4, "kmovw k1, word ptr ds:[rax]".to_string()));
    assert_eq!(intel(Bitness::Bits64, &[0xC5, 0xF8, 0x93, 0xC1]), (4, "kmovw eax, k1".to_string()));
    assert_eq!(intel(Bitness::Bits64, &[0xC4, 0xE1, 0xFB, 0x93, 0xC1]), (5, "kmovq rax, k1".to_string()));
    assert_eq!(att(Bitness::Bits64, &[0xC4, 0xE1, 0xFB, 0x93, 0xC1]), (5, "kmovq %k1, %rax".to_string()));
    // kand has no 128-bit form.
    assert_eq!(intel(Bitness::Bits64, &[0xC5, 0xE8, 0x41, 0xCB]), (4, "(invalid)".to_string()));
}

// =============================================================================
// EVEX and XOP
// =============================================================================

#[test]
fn test_evex_opmask_and_zeroing() {
    let disasm = X86Disassembler::new(Bitness::Bits64);
    let insn = disasm.decode(&[0x62, 0xF1, 0x7C, 0x49, 0x10, 0xC1], 0).unwrap().instruction;
    assert_eq!(insn.size, 6);
    assert_eq!(insn.text(), "vmovups zmm0{k1}, zmm1");
    assert_eq!(insn.encoding, Encoding::Evex);
    assert!(!insn.flags.malformed);

    assert_eq!(
        att(Bitness::Bits64, &[0x62, 0xF1, 0x7C, 0x49, 0x10, 0xC1]),
        (6, "vmovups %zmm1, %zmm0{%k1}".to_string())
    );
    assert_eq!(
        intel(Bitness::Bits64, &[0x62, 0xF1, 0x7C, 0xC9, 0x10, 0xC1]),
        (6, "vmovups zmm0{k1}{z}, zmm1".to_string())
    );
}

#[test]
fn test_evex_broadcast_and_compressed_disp() {
    // disp8 scaled by the 8-byte broadcast element.
    let (len, text) = intel(Bitness::Bits64, &[0x62, 0xF1, 0xFD, 0x58, 0x58, 0x40, 0x01]);
    assert_eq!(len, 7);
    assert!(text.starts_with("vaddpd zmm0, zmm0, "), "{text}");
    assert!(text.ends_with("[rax+8]{1to8}"), "{text}");

    // disp8 scaled by the full 64-byte operand.
    let (len, text) = intel(Bitness::Bits64, &[0x62, 0xF1, 0x7C, 0x48, 0x58, 0x40, 0x01]);
    assert_eq!(len, 7);
    assert!(text.starts_with("vaddps zmm0, zmm0, "), "{text}");
    assert!(text.ends_with("[rax+64]"), "{text}");
    assert!(!text.contains("{1to"), "{text}");
}

#[test]
fn test_evex_rounding_position() {
    let bytes = [0x62, 0xF1, 0x7C, 0x18, 0x58, 0xC2];
    assert_eq!(intel(Bitness::Bits64, &bytes), (6, "vaddps zmm0, zmm0, zmm2, {rn-sae}".to_string()));
    assert_eq!(att(Bitness::Bits64, &bytes), (6, "vaddps {rn-sae}, %zmm2, %zmm0, %zmm0".to_string()));

    // L'L selects the mode: 11 is round toward zero.
    let (_, text) = intel(Bitness::Bits64, &[0x62, 0xF1, 0x7C, 0x78, 0x58, 0xC2]);
    assert!(text.ends_with(", {rz-sae}"), "{text}");
}

#[test]
fn test_evex_high_registers() {
    // EVEX.R and EVEX.R' both inverted to 1: zmm8 + zmm16.
    let (len, text) = intel(Bitness::Bits64, &[0x62, 0x61, 0x7C, 0x48, 0x58, 0xC2]);
    assert_eq!(len, 6);
    assert_eq!(text, "vaddps zmm24, zmm0, zmm2");
}

#[test]
fn test_xop_vpcmov() {
    let disasm = X86Disassembler::new(Bitness::Bits64);
    let insn = disasm.decode(&[0x8F, 0xE8, 0x78, 0xA2, 0xC1, 0x10], 0).unwrap().instruction;
    assert_eq!(insn.size, 6);
    assert_eq!(insn.encoding, Encoding::Xop);
    assert_eq!(insn.text(), "vpcmov xmm0, xmm0, xmm1, xmm1");
}

#[test]
fn test_vsib_gather() {
    let (len, text) = intel(Bitness::Bits64, &[0xC4, 0xE2, 0x7D, 0x90, 0x04, 0x88]);
    assert_eq!(len, 6);
    assert!(text.starts_with("vpgatherdd ymm0, "), "{text}");
    assert!(text.contains("[rax+ymm1*4]"), "{text}");
    assert!(text.ends_with(", ymm0"), "{text}");
}

#[test]
fn test_malformed_xop_and_evex() {
    let disasm = X86Disassembler::new(Bitness::Bits64);

    // XOP map 11 does not exist.
    let xop = disasm.decode(&[0x8F, 0xEB, 0x78, 0xA2, 0xC1], 0).unwrap().instruction;
    assert_eq!(xop.size, 5);
    assert!(xop.flags.malformed);
    assert!(xop.text().ends_with("(bad xop)"), "{}", xop.text());

    // EVEX P1 bit 2 must be set.
    let evex = disasm.decode(&[0x62, 0xF1, 0x78, 0x48, 0x10, 0xC1], 0).unwrap().instruction;
    assert_eq!(evex.size, 6);
    assert!(evex.flags.malformed);
    assert!(evex.text().ends_with("(bad evex)"), "{}", evex.text());
}

// =============================================================================
// PowerPC
// =============================================================================

#[test]
fn test_ppc_function() {
    let words = [0x7c08_02a6u32, 0x9001_fffc, 0x3860_0001, 0x8061_0008, 0x4e80_0020];
    let texts: Vec<String> = words.iter().map(|&w| decode_ppc(w, 0x8000_3000).to_string()).collect();
    assert_eq!(
        texts,
        ["mflr r0", "stw r0, -0x0004 (sp)", "li r3, 1", "lwz r3, 0x0008 (sp)", "blr"]
    );
}

#[test]
fn test_ppc_metadata() {
    let branch = decode_ppc(0x4182_0008, 0x1000);
    assert_eq!(branch.to_string(), "beq- ->0x00001008");
    assert_eq!(branch.info.kind, PpcKind::Branch);
    assert_eq!(branch.info.target, Some(0x1008));

    let load = decode_ppc(0x8061_0008, 0);
    assert_eq!(load.info.kind, PpcKind::LoadStore);
    assert_eq!(load.info.base_register, Some(1));

    let illegal = decode_ppc(0x0000_0001, 0);
    assert_eq!(illegal.to_string(), "( ill ) 00000001");
    assert!(illegal.info.flags.illegal);
}

#[test]
fn test_ppc_block_is_big_endian() {
    let disasm = PpcDisassembler::new();
    let block = disasm.disassemble_block(&[0x38, 0x60, 0x00, 0x01, 0x4e, 0x80, 0x00, 0x20], 0x8000_0000);
    let texts: Vec<String> = block.iter().map(|r| r.as_ref().unwrap().text()).collect();
    assert_eq!(texts, ["li r3, 1", "blr"]);
    assert_eq!(block[1].as_ref().unwrap().address, 0x8000_0004);
}
