//! Per-call decode state.

use dasmkit_core::{Bitness, Encoding};

use super::modrm::{MemRef, ModRm};
use super::prefix::{Prefixes, SsePrefix};
use super::regs::Width;
use super::vex::{EscapeKind, EvexExtra, VectorPrefix};

/// Which opcode table row applies: the opcode byte tagged by the escape
/// that led to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpcodeSpace {
    OneByte(u8),
    /// After `0F`.
    TwoByte(u8),
    /// After `0F 38` (map 2) or `0F 3A` (map 3).
    ThreeByte { map: u8, op: u8 },
    Vex { map: u8, op: u8 },
    Xop { map: u8, op: u8 },
    Evex { map: u8, op: u8 },
}

impl OpcodeSpace {
    /// Flat numbering: one-byte opcodes, then `0F xx` from 0x100, then
    /// map-shifted extended opcodes from 0x200.
    pub fn slot(self) -> u32 {
        match self {
            Self::OneByte(op) => op as u32,
            Self::TwoByte(op) => 0x100 | op as u32,
            Self::ThreeByte { map, op } | Self::Vex { map, op } | Self::Evex { map, op } => {
                map as u32 * 0x100 + op as u32
            }
            Self::Xop { map, op } => (map as u32).saturating_sub(6) * 0x100 + op as u32,
        }
    }
}

/// The instruction being decoded.
///
/// Created fresh for every decode call and filled in top to bottom:
/// prefixes, escape, ModRM/SIB, then operands as they are rendered.
#[derive(Debug, Clone)]
pub(crate) struct Insn {
    pub bitness: Bitness,
    pub prefixes: Prefixes,
    pub space: OpcodeSpace,
    pub vector: Option<VectorPrefix>,
    /// Effective operand size.
    pub os: Width,
    /// Effective address size.
    pub asz: Width,
    /// REX.W or VEX/XOP/EVEX.W.
    pub w: bool,
    /// Register-number extensions, already shifted into bit 3.
    pub rex_r: u8,
    pub rex_x: u8,
    pub rex_b: u8,
    /// Any REX byte was present (selects spl/bpl/sil/dil).
    pub rex_present: bool,
    /// Active mandatory-prefix selector.
    pub sse: SsePrefix,
    /// The selector was consumed by an SSE-style group.
    pub sse_dispatched: bool,
    pub modrm: Option<ModRm>,
    pub mem: Option<MemRef>,
    /// Absolute target computed by a branch operand.
    pub branch_target: Option<u64>,
}

impl Insn {
    pub fn new(bitness: Bitness, prefixes: Prefixes) -> Self {
        let rex = prefixes.rex.unwrap_or_default();
        let w = rex.w;
        let os = match bitness {
            Bitness::Bits16 if prefixes.operand_size => Width::W32,
            Bitness::Bits16 => Width::W16,
            Bitness::Bits32 if prefixes.operand_size => Width::W16,
            Bitness::Bits32 => Width::W32,
            Bitness::Bits64 if w => Width::W64,
            Bitness::Bits64 if prefixes.operand_size => Width::W16,
            Bitness::Bits64 => Width::W32,
        };
        let asz = match bitness {
            Bitness::Bits16 if prefixes.address_size => Width::W32,
            Bitness::Bits16 => Width::W16,
            Bitness::Bits32 if prefixes.address_size => Width::W16,
            Bitness::Bits32 => Width::W32,
            Bitness::Bits64 if prefixes.address_size => Width::W32,
            Bitness::Bits64 => Width::W64,
        };
        Self {
            bitness,
            prefixes,
            space: OpcodeSpace::OneByte(0),
            vector: None,
            os,
            asz,
            w,
            rex_r: if rex.r { 8 } else { 0 },
            rex_x: if rex.x { 8 } else { 0 },
            rex_b: if rex.b { 8 } else { 0 },
            rex_present: prefixes.rex.is_some(),
            sse: prefixes.sse,
            sse_dispatched: false,
            modrm: None,
            mem: None,
            branch_target: None,
        }
    }

    /// Switches to a VEX/XOP/EVEX encoding: any REX is discarded and the
    /// escape's own fields replace the legacy-prefix derived state.
    pub fn apply_vector(&mut self, mut vector: VectorPrefix) {
        if !self.is_64() {
            vector.clamp_to_legacy();
        }
        self.rex_present = false;
        self.rex_r = if vector.r { 8 } else { 0 };
        self.rex_x = if vector.x { 8 } else { 0 };
        self.rex_b = if vector.b { 8 } else { 0 };
        self.w = vector.w;
        self.sse = vector.pp;
        self.os = if self.is_64() && vector.w { Width::W64 } else { Width::W32 };
        self.vector = Some(vector);
    }

    pub fn is_64(&self) -> bool {
        self.bitness.is_64()
    }

    pub fn encoding(&self) -> Encoding {
        match self.vector.map(|v| v.kind) {
            None => Encoding::Legacy,
            Some(EscapeKind::Vex) => Encoding::Vex,
            Some(EscapeKind::Xop) => Encoding::Xop,
            Some(EscapeKind::Evex) => Encoding::Evex,
        }
    }

    pub fn malformed(&self) -> bool {
        self.vector.is_some_and(|v| v.malformed)
    }

    pub fn evex(&self) -> Option<EvexExtra> {
        self.vector.and_then(|v| v.evex)
    }

    /// 0 = 128-bit, 1 = 256-bit, 2 = 512-bit.
    pub fn vector_len(&self) -> u8 {
        match (self.vector, self.evex()) {
            // With embedded rounding on a register form L'L is the rounding mode.
            (Some(_), Some(e)) if e.b && self.is_register_form() => 2,
            (Some(v), _) => v.l.min(2),
            (None, _) => 0,
        }
    }

    /// Width used by push/pop and near branches: 64-bit in long mode unless
    /// overridden by 0x66.
    pub fn stack_width(&self) -> Width {
        if self.is_64() {
            if self.prefixes.operand_size && !self.w {
                Width::W16
            } else {
                Width::W64
            }
        } else {
            self.os
        }
    }

    /// `W ? 64 : 32` for the `y`-sized operands.
    pub fn width_y(&self) -> Width {
        if self.is_64() && self.w {
            Width::W64
        } else {
            Width::W32
        }
    }

    pub fn is_register_form(&self) -> bool {
        self.modrm.is_some_and(|m| m.is_register())
    }

    pub fn modrm(&self) -> ModRm {
        self.modrm.unwrap_or_default()
    }

    /// Extra vector source register from vvvv.
    pub fn vvvv(&self) -> u8 {
        self.vector.map_or(0, |v| v.source_register())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::prefix::Rex;

    fn prefixes(operand_size: bool, address_size: bool, rex: Option<u8>) -> Prefixes {
        Prefixes {
            operand_size,
            address_size,
            rex: rex.map(Rex::from_byte),
            ..Prefixes::default()
        }
    }

    #[test]
    fn test_operand_size_states() {
        assert_eq!(Insn::new(Bitness::Bits16, prefixes(false, false, None)).os, Width::W16);
        assert_eq!(Insn::new(Bitness::Bits16, prefixes(true, false, None)).os, Width::W32);
        assert_eq!(Insn::new(Bitness::Bits32, prefixes(true, false, None)).os, Width::W16);
        assert_eq!(Insn::new(Bitness::Bits64, prefixes(false, false, None)).os, Width::W32);
        assert_eq!(Insn::new(Bitness::Bits64, prefixes(true, false, Some(0x48))).os, Width::W64);
    }

    #[test]
    fn test_long_mode_address_size_never_16() {
        assert_eq!(Insn::new(Bitness::Bits64, prefixes(false, false, None)).asz, Width::W64);
        assert_eq!(Insn::new(Bitness::Bits64, prefixes(false, true, None)).asz, Width::W32);
        assert_eq!(Insn::new(Bitness::Bits32, prefixes(false, true, None)).asz, Width::W16);
    }

    #[test]
    fn test_stack_width() {
        assert_eq!(Insn::new(Bitness::Bits64, prefixes(false, false, None)).stack_width(), Width::W64);
        assert_eq!(Insn::new(Bitness::Bits64, prefixes(true, false, None)).stack_width(), Width::W16);
        assert_eq!(Insn::new(Bitness::Bits32, prefixes(true, false, None)).stack_width(), Width::W16);
    }

    #[test]
    fn test_vector_escape_discards_rex() {
        let mut insn = Insn::new(Bitness::Bits64, prefixes(true, false, Some(0x4C)));
        insn.apply_vector(VectorPrefix::from_vex2(0xF8));
        assert!(!insn.rex_present);
        assert_eq!(insn.rex_r, 0);
        assert_eq!(insn.sse, SsePrefix::None);
        assert_eq!(insn.encoding(), Encoding::Vex);
    }

    #[test]
    fn test_slots() {
        assert_eq!(OpcodeSpace::OneByte(0x90).slot(), 0x90);
        assert_eq!(OpcodeSpace::TwoByte(0x1F).slot(), 0x11F);
        assert_eq!(OpcodeSpace::Vex { map: 2, op: 0x00 }.slot(), 0x200);
        assert_eq!(OpcodeSpace::ThreeByte { map: 3, op: 0x0F }.slot(), 0x30F);
        assert_eq!(OpcodeSpace::Xop { map: 8, op: 0xA2 }.slot(), 0x2A2);
    }
}
