//! ModR/M and SIB resolution.

use super::cursor::Cursor;
use super::insn::Insn;
use super::prefix::Segment;
use super::regs::Width;
use crate::DecodeError;

/// ModR/M byte with the register extensions folded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModRm {
    pub raw: u8,
    /// Addressing mode (0-3).
    pub mod_: u8,
    /// Register field, extended by REX.R / EVEX.R'.
    pub reg: u8,
    /// R/M field, extended by REX.B (and EVEX.X for register forms).
    pub rm: u8,
}

impl ModRm {
    pub fn parse(byte: u8, insn: &Insn) -> Self {
        let mod_ = byte >> 6;
        let mut reg = ((byte >> 3) & 7) | insn.rex_r;
        let mut rm = (byte & 7) | insn.rex_b;
        if let Some(v) = insn.vector.filter(|v| v.evex.is_some()) {
            if v.r2 {
                reg |= 16;
            }
            if mod_ == 3 && v.x {
                rm |= 16;
            }
        }
        Self { raw: byte, mod_, reg, rm }
    }

    /// Returns true if the operand is a register (mod == 3).
    pub fn is_register(&self) -> bool {
        self.mod_ == 3
    }

    /// Register field without extensions (group selector).
    pub fn nnn(&self) -> u8 {
        (self.raw >> 3) & 7
    }

    /// R/M field without extensions.
    pub fn rm_low(&self) -> u8 {
        self.raw & 7
    }
}

/// SIB byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sib {
    pub scale: u8,
    pub index: u8,
    pub base: u8,
}

impl Sib {
    pub fn parse(byte: u8) -> Self {
        Self {
            scale: byte >> 6,
            index: (byte >> 3) & 7,
            base: byte & 7,
        }
    }

    pub fn scale_factor(&self) -> u8 {
        1 << self.scale
    }
}

/// A resolved memory operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemRef {
    pub base: Option<u8>,
    pub index: Option<u8>,
    pub scale: u8,
    /// Sign-extended displacement.
    pub disp: i64,
    /// Encoded displacement size in bytes (0, 1, 2 or 4).
    pub disp_size: u8,
    /// RIP/EIP-relative (long mode, mod=00 rm=101).
    pub rip_relative: bool,
    /// Address width the registers are named at.
    pub width: Width,
    /// Explicit override, or SS for stack/frame based forms, else DS.
    pub segment: Segment,
    /// SIB index taken verbatim (with X and V'), for VSIB operands.
    pub vsib_index: u8,
}

impl MemRef {
    fn new(width: Width) -> Self {
        Self {
            base: None,
            index: None,
            scale: 1,
            disp: 0,
            disp_size: 0,
            rip_relative: false,
            width,
            segment: Segment::DS,
            vsib_index: 0,
        }
    }
}

/// Reads the SIB and displacement bytes of a memory-form ModR/M.
pub(crate) fn resolve(insn: &Insn, modrm: ModRm, cur: &mut Cursor<'_>) -> Result<MemRef, DecodeError> {
    let mut mem = match insn.asz {
        Width::W16 => resolve16(modrm, cur)?,
        width => resolve32(insn, modrm, width, cur)?,
    };
    if let Some(seg) = insn.prefixes.segment {
        mem.segment = seg;
    }
    Ok(mem)
}

/// base/index pairs for 16-bit addressing, by rm.
const RM16: [(Option<u8>, Option<u8>); 8] = [
    (Some(3), Some(6)), // bx+si
    (Some(3), Some(7)), // bx+di
    (Some(5), Some(6)), // bp+si
    (Some(5), Some(7)), // bp+di
    (Some(6), None),    // si
    (Some(7), None),    // di
    (Some(5), None),    // bp
    (Some(3), None),    // bx
];

fn resolve16(modrm: ModRm, cur: &mut Cursor<'_>) -> Result<MemRef, DecodeError> {
    let mut mem = MemRef::new(Width::W16);
    let rm = modrm.rm_low();

    if modrm.mod_ == 0 && rm == 6 {
        mem.disp = cur.u16()? as i16 as i64;
        mem.disp_size = 2;
        return Ok(mem);
    }

    let (base, index) = RM16[rm as usize];
    mem.base = base;
    mem.index = index;
    if base == Some(5) {
        mem.segment = Segment::SS;
    }
    match modrm.mod_ {
        1 => {
            mem.disp = cur.u8()? as i8 as i64;
            mem.disp_size = 1;
        }
        2 => {
            mem.disp = cur.u16()? as i16 as i64;
            mem.disp_size = 2;
        }
        _ => {}
    }
    Ok(mem)
}

fn resolve32(insn: &Insn, modrm: ModRm, width: Width, cur: &mut Cursor<'_>) -> Result<MemRef, DecodeError> {
    let mut mem = MemRef::new(width);
    let rm = modrm.rm_low();
    let mut disp32_only = false;

    if rm == 4 {
        let sib = Sib::parse(cur.u8()?);
        let index = sib.index | insn.rex_x;
        let v2 = insn.vector.is_some_and(|v| v.evex.is_some() && v.v2);
        mem.vsib_index = index | if v2 { 16 } else { 0 };
        mem.scale = sib.scale_factor();
        if index != 4 {
            mem.index = Some(index);
        }
        if sib.base == 5 && modrm.mod_ == 0 {
            disp32_only = true;
        } else {
            mem.base = Some(sib.base | insn.rex_b);
        }
    } else if rm == 5 && modrm.mod_ == 0 {
        disp32_only = true;
        mem.rip_relative = insn.is_64();
    } else {
        mem.base = Some(rm | insn.rex_b);
    }

    if matches!(mem.base, Some(4) | Some(5)) {
        mem.segment = Segment::SS;
    }

    if disp32_only || modrm.mod_ == 2 {
        mem.disp = cur.u32()? as i32 as i64;
        mem.disp_size = 4;
    } else if modrm.mod_ == 1 {
        mem.disp = cur.u8()? as i8 as i64;
        mem.disp_size = 1;
    }
    Ok(mem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::prefix::{Prefixes, Rex};
    use dasmkit_core::Bitness;

    fn insn(bitness: Bitness, rex: Option<u8>) -> Insn {
        let prefixes = Prefixes {
            rex: rex.map(Rex::from_byte),
            ..Prefixes::default()
        };
        Insn::new(bitness, prefixes)
    }

    fn run(insn: &Insn, bytes: &[u8]) -> (MemRef, usize) {
        let mut cur = Cursor::new(bytes, 0);
        let modrm = ModRm::parse(cur.u8().unwrap(), insn);
        let mem = resolve(insn, modrm, &mut cur).unwrap();
        (mem, cur.len())
    }

    #[test]
    fn test_modrm_fields() {
        let i = insn(Bitness::Bits64, Some(0x45));
        let m = ModRm::parse(0xC8, &i);
        assert_eq!(m.mod_, 3);
        assert_eq!(m.reg, 9);
        assert_eq!(m.rm, 8);
        assert_eq!(m.nnn(), 1);
        assert!(m.is_register());
    }

    #[test]
    fn test_16bit_forms() {
        let i = insn(Bitness::Bits16, None);
        // [bp+si+0x10]
        let (m, len) = run(&i, &[0x42, 0x10]);
        assert_eq!((m.base, m.index, m.disp), (Some(5), Some(6), 0x10));
        assert_eq!(m.segment, Segment::SS);
        assert_eq!(len, 2);
        // [0x1234]
        let (m, len) = run(&i, &[0x06, 0x34, 0x12]);
        assert_eq!((m.base, m.index, m.disp), (None, None, 0x1234));
        assert_eq!(m.segment, Segment::DS);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_32bit_sib_and_absolute() {
        let i = insn(Bitness::Bits32, None);
        // [eax+ecx*4-8]
        let (m, len) = run(&i, &[0x44, 0x88, 0xF8]);
        assert_eq!((m.base, m.index, m.scale, m.disp), (Some(0), Some(1), 4, -8));
        assert_eq!(len, 3);
        // [esp]: index 4 means none, SS default
        let (m, _) = run(&i, &[0x04, 0x24]);
        assert_eq!((m.base, m.index), (Some(4), None));
        assert_eq!(m.segment, Segment::SS);
        // disp32 with no base (SIB base 5, mod 0)
        let (m, len) = run(&i, &[0x04, 0x8D, 0x00, 0x10, 0x00, 0x00]);
        assert_eq!((m.base, m.index, m.scale, m.disp), (None, Some(1), 4, 0x1000));
        assert_eq!(len, 6);
        // absolute in 32-bit mode
        let (m, _) = run(&i, &[0x05, 0x78, 0x56, 0x34, 0x12]);
        assert!(!m.rip_relative);
        assert_eq!(m.disp, 0x1234_5678);
    }

    #[test]
    fn test_64bit_rip_relative_and_rex() {
        let i = insn(Bitness::Bits64, None);
        let (m, _) = run(&i, &[0x05, 0x10, 0x00, 0x00, 0x00]);
        assert!(m.rip_relative);
        assert_eq!(m.base, None);

        // REX.X makes index 4 a real register (r12).
        let i = insn(Bitness::Bits64, Some(0x42));
        let (m, _) = run(&i, &[0x04, 0x20]);
        assert_eq!(m.index, Some(12));
        assert_eq!(m.base, Some(0));

        // REX.B on rm=5 mod=1 is r13, not rip-relative.
        let i = insn(Bitness::Bits64, Some(0x41));
        let (m, _) = run(&i, &[0x45, 0x08]);
        assert_eq!(m.base, Some(13));
        assert!(!m.rip_relative);
        assert_eq!(m.segment, Segment::DS);
    }
}
