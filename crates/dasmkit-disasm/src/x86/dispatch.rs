//! Group walk: from a root table slot down to a terminal entry.

use super::cursor::Cursor;
use super::insn::{Insn, OpcodeSpace};
use super::modrm::ModRm;
use super::regs::Width;
use super::tables::{x87, Group, OpcodeEntry, OpcodeInfo, INVALID, NOW3D};
use crate::DecodeError;

/// No table nests deeper than opcode, prefix, reg, mod, W.
const MAX_DEPTH: usize = 8;

#[cold]
fn inconsistent(space: OpcodeSpace, what: &str) -> ! {
    panic!("opcode table inconsistency at slot {:#x}: {what}", space.slot())
}

fn modrm_for(insn: &Insn) -> ModRm {
    match insn.modrm {
        Some(modrm) => modrm,
        None => inconsistent(insn.space, "ModRM group on an opcode without ModRM"),
    }
}

/// Resolves `entry` to its terminal.
///
/// The 3DNow! group fetches its suffix byte here, after the ModRM and
/// displacement were consumed.
pub(crate) fn walk(
    mut entry: &'static OpcodeEntry,
    insn: &mut Insn,
    cur: &mut Cursor<'_>,
) -> Result<&'static OpcodeInfo, DecodeError> {
    for _ in 0..MAX_DEPTH {
        let group = match entry {
            OpcodeEntry::Insn(info) => return Ok(info),
            OpcodeEntry::Group(group) => *group,
        };
        entry = match group {
            Group::Reg(table) => &table[modrm_for(insn).nnn() as usize],
            Group::Mod(table) => &table[usize::from(!modrm_for(insn).is_register())],
            Group::Rm(table) => &table[modrm_for(insn).rm_low() as usize],
            Group::Sse(table) => {
                insn.sse_dispatched = true;
                &table[insn.sse.index()]
            }
            Group::SseOnly(prefix, only) => {
                insn.sse_dispatched = true;
                if insn.sse == prefix {
                    only
                } else {
                    &INVALID
                }
            }
            Group::W(table) => &table[usize::from(insn.w)],
            Group::VexL(table) => &table[usize::from(insn.vector_len() != 0)],
            Group::LongMode(table) => &table[usize::from(insn.is_64())],
            Group::OperandSize(table) => match insn.os {
                Width::W16 => &table[0],
                Width::W32 => &table[1],
                Width::W64 => &table[2],
                Width::W8 => inconsistent(insn.space, "byte operand size"),
            },
            Group::X87(memory) => {
                let modrm = modrm_for(insn);
                if !modrm.is_register() {
                    &memory[modrm.nnn() as usize]
                } else {
                    let escape = match insn.space {
                        OpcodeSpace::OneByte(op @ 0xD8..=0xDF) => (op - 0xD8) as usize,
                        _ => inconsistent(insn.space, "x87 group outside D8-DF"),
                    };
                    &x87::X87_REGISTER[escape * 64 + (modrm.raw & 0x3F) as usize]
                }
            }
            Group::Now3d => &NOW3D[cur.u8()? as usize],
        };
    }
    inconsistent(insn.space, "group nesting too deep")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::prefix::{Prefixes, SsePrefix};
    use crate::x86::tables;
    use dasmkit_core::Bitness;

    fn insn_with(space: OpcodeSpace, modrm: Option<u8>, sse: SsePrefix) -> Insn {
        let mut insn = Insn::new(Bitness::Bits32, Prefixes::default());
        insn.space = space;
        insn.sse = sse;
        insn.modrm = modrm.map(|b| ModRm::parse(b, &insn));
        insn
    }

    fn resolve(space: OpcodeSpace, modrm: Option<u8>, sse: SsePrefix) -> &'static str {
        let mut insn = insn_with(space, modrm, sse);
        let mut cur = Cursor::new(&[], 0);
        walk(tables::root(space, false), &mut insn, &mut cur).unwrap().intel
    }

    #[test]
    fn test_reg_group() {
        assert_eq!(resolve(OpcodeSpace::OneByte(0x80), Some(0xF8), SsePrefix::None), "cmp");
        assert_eq!(resolve(OpcodeSpace::OneByte(0xFF), Some(0x30), SsePrefix::None), "push");
    }

    #[test]
    fn test_sse_group_marks_prefix_consumed() {
        let space = OpcodeSpace::TwoByte(0x58);
        let mut insn = insn_with(space, Some(0xC1), SsePrefix::F3);
        let mut cur = Cursor::new(&[], 0);
        let info = walk(tables::root(space, false), &mut insn, &mut cur).unwrap();
        assert_eq!(info.intel, "addss");
        assert!(insn.sse_dispatched);
    }

    #[test]
    fn test_sse_only_rejects_other_prefixes() {
        assert_eq!(resolve(OpcodeSpace::TwoByte(0x6C), Some(0xC1), SsePrefix::P66), "punpcklqdq");
        assert_eq!(resolve(OpcodeSpace::TwoByte(0x6C), Some(0xC1), SsePrefix::None), "(invalid)");
    }

    #[test]
    fn test_nested_mod_and_rm_groups() {
        // 0F 01 F8: G7 /7, register form, rm 0
        assert_eq!(resolve(OpcodeSpace::TwoByte(0x01), Some(0xF8), SsePrefix::None), "swapgs");
        assert_eq!(resolve(OpcodeSpace::TwoByte(0x01), Some(0x38), SsePrefix::None), "invlpg");
        assert_eq!(resolve(OpcodeSpace::TwoByte(0xAE), Some(0xF0), SsePrefix::None), "mfence");
    }

    #[test]
    fn test_x87_register_and_memory_forms() {
        assert_eq!(resolve(OpcodeSpace::OneByte(0xD9), Some(0xE8), SsePrefix::None), "fld1");
        assert_eq!(resolve(OpcodeSpace::OneByte(0xD9), Some(0x28), SsePrefix::None), "fldcw");
    }

    #[test]
    fn test_3dnow_suffix_is_fetched() {
        let space = OpcodeSpace::TwoByte(0x0F);
        let mut insn = insn_with(space, Some(0xC1), SsePrefix::None);
        let mut cur = Cursor::new(&[0x9E], 0);
        let info = walk(tables::root(space, false), &mut insn, &mut cur).unwrap();
        assert_eq!(info.intel, "pfadd");
        assert_eq!(cur.len(), 1);
    }

    #[test]
    #[should_panic(expected = "opcode table inconsistency")]
    fn test_group_without_modrm_panics() {
        resolve(OpcodeSpace::OneByte(0x80), None, SsePrefix::None);
    }
}
