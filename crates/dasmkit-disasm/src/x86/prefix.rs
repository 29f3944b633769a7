//! Legacy prefix and REX scanning.

use dasmkit_core::Bitness;

use super::cursor::Cursor;
use crate::DecodeError;

/// Segment registers, in encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    ES,
    CS,
    SS,
    DS,
    FS,
    GS,
}

impl Segment {
    pub fn from_prefix(byte: u8) -> Option<Self> {
        match byte {
            0x26 => Some(Self::ES),
            0x2E => Some(Self::CS),
            0x36 => Some(Self::SS),
            0x3E => Some(Self::DS),
            0x64 => Some(Self::FS),
            0x65 => Some(Self::GS),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ES => "es",
            Self::CS => "cs",
            Self::SS => "ss",
            Self::DS => "ds",
            Self::FS => "fs",
            Self::GS => "gs",
        }
    }
}

/// The mandatory-prefix selector used by SSE-style opcode groups.
///
/// Discriminants are the column order of the four-way group tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SsePrefix {
    #[default]
    None = 0,
    P66 = 1,
    F2 = 2,
    F3 = 3,
}

impl SsePrefix {
    /// Maps the two-bit `pp` field of VEX/XOP/EVEX.
    pub fn from_pp(pp: u8) -> Self {
        match pp & 3 {
            0 => Self::None,
            1 => Self::P66,
            2 => Self::F3,
            _ => Self::F2,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// REX prefix fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rex {
    /// REX.W - 64-bit operand size
    pub w: bool,
    /// REX.R - extends ModR/M reg field
    pub r: bool,
    /// REX.X - extends SIB index field
    pub x: bool,
    /// REX.B - extends ModR/M r/m, SIB base, or opcode reg
    pub b: bool,
}

impl Rex {
    /// Parse a REX byte.
    pub fn from_byte(byte: u8) -> Self {
        Self {
            w: byte & 0x08 != 0,
            r: byte & 0x04 != 0,
            x: byte & 0x02 != 0,
            b: byte & 0x01 != 0,
        }
    }
}

/// Everything the prefix loop learned before the opcode byte.
#[derive(Debug, Clone, Copy, Default)]
pub struct Prefixes {
    /// Last honoured segment override.
    pub segment: Option<Segment>,
    /// 0x66 seen.
    pub operand_size: bool,
    /// 0x67 seen.
    pub address_size: bool,
    /// 0xF0 seen.
    pub lock: bool,
    /// First of F2/F3, or 66 when neither came first.
    pub sse: SsePrefix,
    /// REX byte immediately preceding the opcode (64-bit mode only).
    pub rex: Option<Rex>,
    /// Number of prefix bytes consumed.
    pub count: usize,
}

impl Prefixes {
    /// Consumes prefix bytes and returns them with the first byte that is
    /// not a prefix (the opcode or escape byte).
    pub fn scan(cursor: &mut Cursor<'_>, bitness: Bitness) -> Result<(Self, u8), DecodeError> {
        let mut prefixes = Self::default();
        let is_64 = bitness.is_64();

        loop {
            let byte = cursor.u8()?;
            match byte {
                0x40..=0x4F if is_64 => {
                    // Only the last REX counts.
                    prefixes.rex = Some(Rex::from_byte(byte));
                    prefixes.count += 1;
                    continue;
                }
                0x26 | 0x2E | 0x36 | 0x3E => {
                    // ES/CS/SS/DS overrides are consumed but ignored in long mode.
                    if !is_64 {
                        prefixes.segment = Segment::from_prefix(byte);
                    }
                }
                0x64 | 0x65 => prefixes.segment = Segment::from_prefix(byte),
                0x66 => {
                    prefixes.operand_size = true;
                    if prefixes.sse == SsePrefix::None {
                        prefixes.sse = SsePrefix::P66;
                    }
                }
                0x67 => prefixes.address_size = true,
                0xF0 => prefixes.lock = true,
                0xF2 | 0xF3 => {
                    if !matches!(prefixes.sse, SsePrefix::F2 | SsePrefix::F3) {
                        prefixes.sse = if byte == 0xF2 { SsePrefix::F2 } else { SsePrefix::F3 };
                    }
                }
                _ => return Ok((prefixes, byte)),
            }
            // A legacy prefix after REX cancels it.
            prefixes.rex = None;
            prefixes.count += 1;
        }
    }
}
