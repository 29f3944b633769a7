//! VEX, XOP and EVEX escape decoding.
//!
//! The three escapes are mutually exclusive and all reduce to the same
//! [`VectorPrefix`]: register-extension bits, the implied SSE prefix, the
//! vector length and an opcode map number. Field extraction is pure; the
//! decoder decides whether a lead byte is an escape at all.

use super::prefix::SsePrefix;

/// Which escape produced a [`VectorPrefix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeKind {
    Vex,
    Xop,
    Evex,
}

impl EscapeKind {
    /// Diagnostic appended to the text of a malformed encoding.
    pub fn diagnostic(self) -> &'static str {
        match self {
            Self::Vex => "(bad vex)",
            Self::Xop => "(bad xop)",
            Self::Evex => "(bad evex)",
        }
    }
}

/// EVEX-only payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvexExtra {
    /// Zeroing (rather than merging) masking.
    pub z: bool,
    /// Broadcast for memory forms, embedded rounding/SAE for register forms.
    pub b: bool,
    /// Opmask register k0-k7 (k0 means unmasked).
    pub aaa: u8,
    /// Raw L'L, which doubles as the rounding mode when `b` is set.
    pub ll: u8,
}

/// Decoded VEX/XOP/EVEX fields, with the inverted bits already flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorPrefix {
    pub kind: EscapeKind,
    pub r: bool,
    pub x: bool,
    pub b: bool,
    /// EVEX.R' (fifth bit of ModRM.reg).
    pub r2: bool,
    /// EVEX.V' (fifth bit of vvvv).
    pub v2: bool,
    pub w: bool,
    /// Extra source register, 0-15.
    pub vvvv: u8,
    /// Vector length: 0 = 128, 1 = 256, 2 = 512 bits.
    pub l: u8,
    pub pp: SsePrefix,
    /// Opcode map (1-3 for VEX/EVEX, 8-10 for XOP).
    pub map: u8,
    pub evex: Option<EvexExtra>,
    /// Reserved bits or map number do not name a valid encoding.
    pub malformed: bool,
}

/// `C4`/`C5` are VEX in long mode, or when the next byte could not be the
/// ModRM of `LES`/`LDS` (those require a memory operand, so mod != 11).
pub fn is_vex_escape(is_64: bool, next: Option<u8>) -> bool {
    is_64 || next.is_some_and(|b| b & 0xC0 == 0xC0)
}

/// `62` follows the same rule against `BOUND`.
pub fn is_evex_escape(is_64: bool, next: Option<u8>) -> bool {
    is_vex_escape(is_64, next)
}

/// `8F` is XOP when the map field is at least 8; `POP Ev` only uses /0.
pub fn is_xop_escape(is_64: bool, next: Option<u8>) -> bool {
    next.is_some_and(|b| (is_64 || b & 0xC0 == 0xC0) && b & 0x08 != 0)
}

impl VectorPrefix {
    /// Two-byte VEX: `C5 RvvvvLpp`.
    pub fn from_vex2(byte1: u8) -> Self {
        Self {
            kind: EscapeKind::Vex,
            r: byte1 & 0x80 == 0,
            x: false,
            b: false,
            r2: false,
            v2: false,
            w: false,
            vvvv: (!byte1 >> 3) & 0x0F,
            l: (byte1 >> 2) & 1,
            pp: SsePrefix::from_pp(byte1),
            map: 1,
            evex: None,
            malformed: false,
        }
    }

    /// Three-byte VEX: `C4 RXBmmmmm WvvvvLpp`.
    pub fn from_vex3(byte1: u8, byte2: u8) -> Self {
        let map = byte1 & 0x1F;
        Self {
            kind: EscapeKind::Vex,
            r: byte1 & 0x80 == 0,
            x: byte1 & 0x40 == 0,
            b: byte1 & 0x20 == 0,
            r2: false,
            v2: false,
            w: byte2 & 0x80 != 0,
            vvvv: (!byte2 >> 3) & 0x0F,
            l: (byte2 >> 2) & 1,
            pp: SsePrefix::from_pp(byte2),
            map,
            evex: None,
            malformed: !(1..=3).contains(&map),
        }
    }

    /// XOP: `8F RXBmmmmm WvvvvLpp`, maps 8 to 10.
    pub fn from_xop(byte1: u8, byte2: u8) -> Self {
        let vex = Self::from_vex3(byte1, byte2);
        Self {
            kind: EscapeKind::Xop,
            malformed: !(8..=10).contains(&vex.map),
            ..vex
        }
    }

    /// EVEX: `62 RXBR'00mm Wvvvv1pp zL'LbV'aaa`.
    pub fn from_evex(p0: u8, p1: u8, p2: u8) -> Self {
        let map = p0 & 0x03;
        let reserved_ok = p0 & 0x0C == 0 && p1 & 0x04 != 0;
        Self {
            kind: EscapeKind::Evex,
            r: p0 & 0x80 == 0,
            x: p0 & 0x40 == 0,
            b: p0 & 0x20 == 0,
            r2: p0 & 0x10 == 0,
            v2: p2 & 0x08 == 0,
            w: p1 & 0x80 != 0,
            vvvv: (!p1 >> 3) & 0x0F,
            l: (p2 >> 5) & 3,
            pp: SsePrefix::from_pp(p1),
            map,
            evex: Some(EvexExtra {
                z: p2 & 0x80 != 0,
                b: p2 & 0x10 != 0,
                aaa: p2 & 0x07,
                ll: (p2 >> 5) & 3,
            }),
            malformed: !reserved_ok || map == 0,
        }
    }

    /// Outside long mode only eight registers exist: the high extension
    /// bits are ignored.
    pub fn clamp_to_legacy(&mut self) {
        self.r = false;
        self.x = false;
        self.b = false;
        self.r2 = false;
        self.v2 = false;
        self.vvvv &= 7;
    }

    /// Full source register number from vvvv and V'.
    pub fn source_register(&self) -> u8 {
        self.vvvv | if self.v2 { 16 } else { 0 }
    }
}
