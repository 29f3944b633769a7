//! Property-based tests for the instruction decoders.
//!
//! These tests verify invariants that should hold for every input:
//! - Decoding never panics on arbitrary bytes
//! - Decoded length is within architectural bounds
//! - Decoding is deterministic and syntax-independent in length
//! - AT&T output lists register operands in reverse Intel order

use proptest::prelude::*;

use dasmkit_core::{Bitness, Syntax};
use dasmkit_disasm::ppc::decode_ppc;
use dasmkit_disasm::traits::Disassembler;
use dasmkit_disasm::x86::{decode, MAX_INSTRUCTION_LEN};
use dasmkit_disasm::{PpcDisassembler, X86Disassembler};

fn bitness() -> impl Strategy<Value = Bitness> {
    prop_oneof![Just(Bitness::Bits16), Just(Bitness::Bits32), Just(Bitness::Bits64)]
}

// =============================================================================
// x86 Decoder Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// Decoding arbitrary bytes should never panic in any mode.
    #[test]
    fn x86_decode_never_panics(bits in bitness(), bytes in prop::collection::vec(any::<u8>(), 0..32)) {
        let _ = decode(bits, Some(0x1000), 0x1000, &bytes, Syntax::Intel);
        let _ = decode(bits, None, 0x1000, &bytes, Syntax::Att);
    }

    /// Successfully decoded instructions have a valid length.
    #[test]
    fn x86_decoded_size_is_valid(bits in bitness(), bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        if let Ok((len, _)) = decode(bits, None, 0, &bytes, Syntax::Intel) {
            prop_assert!(len >= 1, "Instruction size must be at least 1");
            prop_assert!(len <= MAX_INSTRUCTION_LEN, "Instruction size must be at most 15");
            prop_assert!(len <= bytes.len(), "Instruction size cannot exceed input length");
        }
    }

    /// Decoding is deterministic: same input always produces same output.
    #[test]
    fn x86_decode_is_deterministic(bits in bitness(), bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        let first = decode(bits, Some(0x400000), 0x10, &bytes, Syntax::Att);
        let second = decode(bits, Some(0x400000), 0x10, &bytes, Syntax::Att);
        prop_assert_eq!(first, second);
    }

    /// Syntax only changes the text, never the length or the outcome.
    #[test]
    fn x86_length_is_syntax_independent(bits in bitness(), bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        let intel = decode(bits, None, 0, &bytes, Syntax::Intel);
        let att = decode(bits, None, 0, &bytes, Syntax::Att);
        match (&intel, &att) {
            (Ok((a, _)), Ok((b, _))) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "Syntaxes disagree: {:?} vs {:?}", intel, att),
        }
    }

    /// The record view agrees with the plain `(length, text)` view.
    #[test]
    fn x86_record_matches_text(bytes in prop::collection::vec(any::<u8>(), 1..32)) {
        let disasm = X86Disassembler::new(Bitness::Bits64);
        let record = disasm.decode_instruction(&bytes, 0x1000);
        let plain = decode(Bitness::Bits64, None, 0x1000, &bytes, Syntax::Intel);
        match (record, plain) {
            (Ok(record), Ok((len, text))) => {
                prop_assert_eq!(record.size, len);
                prop_assert_eq!(record.instruction.text(), text);
                prop_assert_eq!(&record.instruction.bytes[..], &bytes[..len]);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "Views disagree: {:?} vs {:?}", a, b),
        }
    }

    /// `mov r/m32, r32` in register form: AT&T lists the operands reversed.
    #[test]
    fn x86_att_reverses_register_operands(rm in 0u8..8, reg in 0u8..8) {
        const NAMES: [&str; 8] = ["eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi"];
        let bytes = [0x89, 0xC0 | (reg << 3) | rm];
        let intel = decode(Bitness::Bits32, None, 0, &bytes, Syntax::Intel).unwrap();
        let att = decode(Bitness::Bits32, None, 0, &bytes, Syntax::Att).unwrap();
        let (dst, src) = (NAMES[rm as usize], NAMES[reg as usize]);
        prop_assert_eq!(intel, (2, format!("mov {dst}, {src}")));
        prop_assert_eq!(att, (2, format!("movl %{src}, %{dst}")));
    }

    /// Repeating a segment override adds a byte but changes nothing else.
    #[test]
    fn x86_repeated_segment_prefix(seg in prop::sample::select(vec![0x26u8, 0x2E, 0x36, 0x3E, 0x64, 0x65])) {
        let once = [seg, 0x8B, 0x00];
        let twice = [seg, seg, 0x8B, 0x00];
        let (len1, text1) = decode(Bitness::Bits32, None, 0, &once, Syntax::Intel).unwrap();
        let (len2, text2) = decode(Bitness::Bits32, None, 0, &twice, Syntax::Intel).unwrap();
        prop_assert_eq!(len1 + 1, len2);
        prop_assert_eq!(text1, text2);
    }

    /// Block disassembly covers the whole input.
    #[test]
    fn x86_block_covers_input(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let disasm = X86Disassembler::new(Bitness::Bits32);
        let covered: usize = disasm
            .disassemble_block(&bytes, 0)
            .iter()
            .map(|r| r.as_ref().map_or(1, |i| i.size))
            .sum();
        prop_assert_eq!(covered, bytes.len());
    }
}

// =============================================================================
// PowerPC Decoder Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    /// Every word decodes to some text without panicking.
    #[test]
    fn ppc_decode_never_panics(word in any::<u32>(), address in any::<u32>()) {
        let insn = decode_ppc(word, address);
        prop_assert!(!insn.to_string().is_empty());
    }

    /// Illegal words carry the marker text.
    #[test]
    fn ppc_illegal_words_are_marked(word in 1u32..) {
        let insn = decode_ppc(word, 0);
        if insn.info.flags.illegal {
            prop_assert_eq!(insn.mnemonic, "( ill )");
            prop_assert_eq!(insn.operands, format!("{word:08x}"));
        }
    }

    /// The decoder always consumes exactly one word.
    #[test]
    fn ppc_size_is_fixed(bytes in prop::collection::vec(any::<u8>(), 4..16)) {
        let disasm = PpcDisassembler::new();
        let decoded = disasm.decode_instruction(&bytes, 0x8000_0000).unwrap();
        prop_assert_eq!(decoded.size, 4);
        prop_assert_eq!(decoded.instruction.bytes.len(), 4);
    }

    /// Relative branch targets wrap around the 32-bit address space.
    #[test]
    fn ppc_branch_target_is_relative(offset in -0x0080_0000i32..0x0080_0000, address in any::<u32>()) {
        let word = 0x4800_0000 | ((offset as u32) << 2 & 0x03FF_FFFC);
        let insn = decode_ppc(word, address);
        prop_assert_eq!(insn.info.target, Some(address.wrapping_add((offset << 2) as u32)));
    }
}
