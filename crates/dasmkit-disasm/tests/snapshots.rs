//! Snapshot tests for rendered listings.
//!
//! To update snapshots after an intentional output change, run:
//! ```bash
//! cargo insta review
//! ```

use dasmkit_core::{Bitness, Syntax};
use dasmkit_disasm::ppc::decode_ppc;
use dasmkit_disasm::traits::Disassembler;
use dasmkit_disasm::DecoderOptions;

/// A small x86-64 function: prologue, a stack spill, a compare and branch.
const X86_64_CODE: &[u8] = &[
    0x55, // push rbp
    0x48, 0x89, 0xe5, // mov rbp, rsp
    0x48, 0x83, 0xec, 0x20, // sub rsp, 0x20
    0x48, 0x89, 0x7d, 0xf8, // mov [rbp-8], rdi
    0x48, 0x83, 0x7d, 0xf8, 0x0a, // cmp qword [rbp-8], 10
    0x7e, 0x02, // jle +2
    0x31, 0xc0, // xor eax, eax
    0x5d, // pop rbp
    0xc3, // ret
];

fn x86_listing(syntax: Syntax) -> String {
    let disasm = DecoderOptions::new(Bitness::Bits64).syntax(syntax).build();
    disasm
        .disassemble_block(X86_64_CODE, 0x1000)
        .into_iter()
        .map(|r| match r {
            Ok(insn) => format!("{:04x}  {}", insn.address, insn.text()),
            Err(e) => format!("error: {e}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_x86_64_intel_listing() {
    insta::assert_snapshot!(x86_listing(Syntax::Intel), @r###"
    1000  push rbp
    1001  mov rbp, rsp
    1004  sub rsp, 0x0000000000000020
    1008  mov qword ptr ss:[rbp-8], rdi
    100c  cmp qword ptr ss:[rbp-8], 0x000000000000000a
    1011  jle .+2
    1013  xor eax, eax
    1015  pop rbp
    1016  ret
    "###);
}

#[test]
fn test_x86_64_att_listing() {
    insta::assert_snapshot!(x86_listing(Syntax::Att), @r###"
    1000  pushq %rbp
    1001  movq %rsp, %rbp
    1004  subq $0x0000000000000020, %rsp
    1008  movq %rdi, %ss:-0x8(%rbp)
    100c  cmpq $0x000000000000000a, %ss:-0x8(%rbp)
    1011  jle .+2
    1013  xorl %eax, %eax
    1015  popq %rbp
    1016  ret
    "###);
}

#[test]
fn test_ppc_listing() {
    let words = [
        0x7c08_02a6u32, // mflr r0
        0x9001_fffc,    // stw r0, -4(r1)
        0x5463_103a,    // slwi r3, r3, 2
        0x7c64_2a14,    // add r3, r4, r5
        0x4086_fff0,    // bne+ cr1, -16
        0xf041_8ff0,    // psq_st
        0x0000_0001,    // illegal
        0x4e80_0020,    // blr
    ];
    let listing = words
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let address = 0x2000 + 4 * i as u32;
            format!("{address:08X}  {w:08x}  {}", decode_ppc(w, address))
        })
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(listing, @r###"
    00002000  7c0802a6  mflr r0
    00002004  9001fffc  stw r0, -0x0004 (sp)
    00002008  5463103a  slwi r3, r3, 2
    0000200C  7c642a14  add r3, r4, r5
    00002010  4086fff0  bne+ cr1, ->0x00002000
    00002014  f0418ff0  psq_st p2, -0x0010(r1), 1, qr0
    00002018  00000001  ( ill ) 00000001
    0000201C  4e800020  blr
    "###);
}
