//! Opcode tables.
//!
//! Every table is plain constant data. A slot is either a terminal
//! [`OpcodeInfo`] or a [`Group`] that selects a sub-table by some property
//! of the instruction (ModRM fields, mandatory prefix, W, vector length,
//! operand size). The dispatcher walks groups until it reaches a terminal.

use super::insn::OpcodeSpace;
use super::operand::Op;
use super::prefix::SsePrefix;

/// Builds a terminal entry.
///
/// `op!(V "add", Eb, Gb)` is `add` in Intel syntax and `add` plus the
/// operand-size suffix in AT&T. `op!("cwde" / "cwtl")` gives the two
/// syntaxes different mnemonics. A leading `@Feature` tags the entry.
macro_rules! op {
    (@$feat:ident $sfx:ident $intel:literal / $att:literal $(, $o:ident)* $(,)?) => {
        $crate::x86::tables::OpcodeEntry::Insn($crate::x86::tables::OpcodeInfo {
            intel: $intel,
            att: $att,
            suffix: $crate::x86::tables::Suffix::$sfx,
            operands: &[$($crate::x86::operand::Op::$o),*],
            feature: $crate::x86::tables::Feature::$feat,
        })
    };
    (@$feat:ident $intel:literal / $att:literal $(, $o:ident)* $(,)?) => {
        op!(@$feat None $intel / $att $(, $o)*)
    };
    (@$feat:ident $sfx:ident $intel:literal $(, $o:ident)* $(,)?) => {
        op!(@$feat $sfx $intel / $intel $(, $o)*)
    };
    (@$feat:ident $intel:literal $(, $o:ident)* $(,)?) => {
        op!(@$feat None $intel / $intel $(, $o)*)
    };
    ($($rest:tt)*) => {
        op!(@Base $($rest)*)
    };
}

/// Builds a group entry: `grp!(Reg, G1_EB)`, `grp!(Sse, [a, b, c, d])`,
/// `grp!(SseOnly, P66, op!(...))`.
macro_rules! grp {
    (SseOnly, $p:ident, $e:expr) => {
        $crate::x86::tables::OpcodeEntry::Group($crate::x86::tables::Group::SseOnly(
            $crate::x86::prefix::SsePrefix::$p,
            &$e,
        ))
    };
    (Now3d) => {
        $crate::x86::tables::OpcodeEntry::Group($crate::x86::tables::Group::Now3d)
    };
    ($kind:ident, $t:expr) => {
        $crate::x86::tables::OpcodeEntry::Group($crate::x86::tables::Group::$kind(&$t))
    };
}

mod evex;
mod now3d;
mod one_byte;
mod three_byte;
mod two_byte;
mod vex;
pub(crate) mod x87;
mod xop;

/// Instruction-set extension an opcode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Base,
    System,
    X87,
    Mmx,
    Now3d,
    Sse,
    Sse2,
    Sse3,
    Ssse3,
    Sse41,
    Sse42,
    Aes,
    Pclmul,
    Avx,
    Avx2,
    Fma,
    F16c,
    Bmi,
    Xop,
    Avx512,
}

/// How the AT&T mnemonic gets its size suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    None,
    B,
    W,
    /// By operand size.
    V,
    /// By stack width.
    S,
    /// `l` or `q` by W.
    Y,
}

/// A terminal table entry.
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    pub intel: &'static str,
    pub att: &'static str,
    pub suffix: Suffix,
    pub operands: &'static [Op],
    pub feature: Feature,
}

impl OpcodeInfo {
    pub fn is_invalid(&self) -> bool {
        self.intel == INVALID_MNEMONIC
    }
}

#[derive(Debug, Clone, Copy)]
pub enum OpcodeEntry {
    Insn(OpcodeInfo),
    Group(Group),
}

/// Sub-table selectors.
#[derive(Debug, Clone, Copy)]
pub enum Group {
    /// ModRM.reg (unextended).
    Reg(&'static [OpcodeEntry; 8]),
    /// ModRM.mod: `[register, memory]`.
    Mod(&'static [OpcodeEntry; 2]),
    /// ModRM.rm (unextended).
    Rm(&'static [OpcodeEntry; 8]),
    /// Mandatory prefix: `[none, 66, F2, F3]`.
    Sse(&'static [OpcodeEntry; 4]),
    /// Valid under one mandatory prefix only.
    SseOnly(SsePrefix, &'static OpcodeEntry),
    /// REX.W / VEX.W: `[W0, W1]`.
    W(&'static [OpcodeEntry; 2]),
    /// Vector length: `[128, 256 or wider]`.
    VexL(&'static [OpcodeEntry; 2]),
    /// Processor mode: `[16/32-bit, 64-bit]`.
    LongMode(&'static [OpcodeEntry; 2]),
    /// Operand size: `[16, 32, 64]`.
    OperandSize(&'static [OpcodeEntry; 3]),
    /// x87 escape: memory forms by ModRM.reg; register forms come from
    /// [`x87::X87_REGISTER`].
    X87(&'static [OpcodeEntry; 8]),
    /// 3DNow!: the real opcode is the byte after the operands.
    Now3d,
}

pub const INVALID_MNEMONIC: &str = "(invalid)";

/// Placeholder for every undefined slot.
pub const INVALID: OpcodeEntry = op!("(invalid)");

/// Sets the feature tag of every terminal in a table.
pub(crate) const fn tagged<const N: usize>(mut table: [OpcodeEntry; N], feature: Feature) -> [OpcodeEntry; N] {
    let mut i = 0;
    while i < N {
        table[i] = with_feature(table[i], feature);
        i += 1;
    }
    table
}

pub(crate) const fn with_feature(entry: OpcodeEntry, feature: Feature) -> OpcodeEntry {
    match entry {
        OpcodeEntry::Insn(mut info) => {
            if info.intel.as_bytes()[0] != b'(' {
                info.feature = feature;
            }
            OpcodeEntry::Insn(info)
        }
        other => other,
    }
}

/// ModRM presence for the one-byte (first half) and 0F (second half) maps.
#[rustfmt::skip]
const HAS_MODRM: [u8; 512] = [
    //       0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f
    /* 00 */ 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0,
    /* 10 */ 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0,
    /* 20 */ 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0,
    /* 30 */ 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0,
    /* 40 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 50 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 60 */ 0, 0, 1, 1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 0, 0,
    /* 70 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 80 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* 90 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* a0 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* b0 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* c0 */ 1, 1, 0, 0, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0,
    /* d0 */ 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1,
    /* e0 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* f0 */ 0, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1,
    //       0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f
    /* 00 */ 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 0, 1,
    /* 10 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* 20 */ 1, 1, 1, 1, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 1, 1,
    /* 30 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 40 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* 50 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* 60 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* 70 */ 1, 1, 1, 1, 1, 1, 1, 0, 1, 1, 0, 0, 1, 1, 1, 1,
    /* 80 */ 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    /* 90 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* a0 */ 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1,
    /* b0 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* c0 */ 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0,
    /* d0 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* e0 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    /* f0 */ 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
];

/// Whether the opcode in `space` is followed by a ModRM byte.
///
/// Three-byte maps, XOP maps and EVEX always carry one. VEX map 1 follows
/// the 0F map, so `vzeroupper`/`vzeroall` (77) are the only exception.
pub(crate) fn has_modrm(space: OpcodeSpace) -> bool {
    match space {
        OpcodeSpace::OneByte(op) => HAS_MODRM[op as usize] != 0,
        OpcodeSpace::TwoByte(op) => HAS_MODRM[0x100 | op as usize] != 0,
        OpcodeSpace::Vex { map: 1, op } => HAS_MODRM[0x100 | op as usize] != 0,
        OpcodeSpace::ThreeByte { .. } | OpcodeSpace::Vex { .. } | OpcodeSpace::Evex { .. } => true,
        OpcodeSpace::Xop { .. } => true,
    }
}

pub(crate) static BAD_ENCODING: OpcodeEntry = INVALID;

/// Root entry for an opcode.
pub(crate) fn root(space: OpcodeSpace, is_64: bool) -> &'static OpcodeEntry {
    match space {
        OpcodeSpace::OneByte(op) if is_64 => &one_byte::ONE_BYTE_64[op as usize],
        OpcodeSpace::OneByte(op) => &one_byte::ONE_BYTE_32[op as usize],
        OpcodeSpace::TwoByte(op) => &two_byte::TWO_BYTE[op as usize],
        OpcodeSpace::ThreeByte { map: 2, op } => &three_byte::THREE_BYTE_38[op as usize],
        OpcodeSpace::ThreeByte { map: 3, op } => &three_byte::THREE_BYTE_3A[op as usize],
        OpcodeSpace::Vex { map: 1, op } => &vex::VEX_0F[op as usize],
        OpcodeSpace::Vex { map: 2, op } => &vex::VEX_0F38[op as usize],
        OpcodeSpace::Vex { map: 3, op } => &vex::VEX_0F3A[op as usize],
        OpcodeSpace::Xop { map: 8, op } => &xop::XOP_MAP8[op as usize],
        OpcodeSpace::Xop { map: 9, op } => &xop::XOP_MAP9[op as usize],
        OpcodeSpace::Xop { map: 10, op } => &xop::XOP_MAPA[op as usize],
        OpcodeSpace::Evex { map: 1, op } => &evex::EVEX_0F[op as usize],
        OpcodeSpace::Evex { map: 2, op } => &evex::EVEX_0F38[op as usize],
        OpcodeSpace::Evex { map: 3, op } => &evex::EVEX_0F3A[op as usize],
        _ => &BAD_ENCODING,
    }
}

/// Map number of a three-byte escape in the 0F map (`0F 38`, `0F 3A`).
pub(crate) fn three_byte_map(op: u8) -> Option<u8> {
    match op {
        0x38 => Some(2),
        0x3A => Some(3),
        _ => None,
    }
}

pub(crate) use now3d::NOW3D;
pub(crate) use one_byte::{JECXZ, PAUSE, XCHG_R8};

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(entry: &OpcodeEntry) -> &OpcodeInfo {
        match entry {
            OpcodeEntry::Insn(info) => info,
            OpcodeEntry::Group(g) => panic!("expected terminal, found {g:?}"),
        }
    }

    #[test]
    fn test_invalid_placeholder() {
        let info = terminal(&INVALID);
        assert!(info.is_invalid());
        assert!(info.operands.is_empty());
    }

    #[test]
    fn test_op_macro_forms() {
        let info = *terminal(&op!(V "add", Eb, Gb));
        assert_eq!(info.intel, "add");
        assert_eq!(info.att, "add");
        assert_eq!(info.suffix, Suffix::V);
        assert_eq!(info.operands, &[Op::Eb, Op::Gb]);

        let info = *terminal(&op!("cwde" / "cwtl"));
        assert_eq!(info.att, "cwtl");
        assert_eq!(info.suffix, Suffix::None);
    }

    #[test]
    fn test_feature_tagging_skips_placeholders() {
        let table = tagged([INVALID, op!("emms")], Feature::Mmx);
        assert_eq!(terminal(&table[0]).feature, Feature::Base);
        assert_eq!(terminal(&table[1]).feature, Feature::Mmx);
    }

    #[test]
    fn test_modrm_map() {
        assert!(has_modrm(OpcodeSpace::OneByte(0x00)));
        assert!(!has_modrm(OpcodeSpace::OneByte(0x90)));
        assert!(has_modrm(OpcodeSpace::OneByte(0xFF)));
        assert!(has_modrm(OpcodeSpace::TwoByte(0x1F)));
        assert!(!has_modrm(OpcodeSpace::TwoByte(0x05)));
        assert!(!has_modrm(OpcodeSpace::Vex { map: 1, op: 0x77 }));
        assert!(has_modrm(OpcodeSpace::Vex { map: 2, op: 0x00 }));
    }

    #[test]
    fn test_three_byte_escapes() {
        assert_eq!(three_byte_map(0x38), Some(2));
        assert_eq!(three_byte_map(0x3A), Some(3));
        assert_eq!(three_byte_map(0x39), None);
        assert!(has_modrm(OpcodeSpace::ThreeByte { map: 2, op: 0xF0 }));
    }
}
