//! Architecture identification and properties.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Supported instruction set families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Architecture {
    /// IA-32 and its 16-bit and 64-bit modes.
    X86,
    /// 32-bit PowerPC (Gekko/Broadway flavour, with paired singles).
    PowerPc,
}

impl Architecture {
    /// Returns the name of this architecture.
    pub fn name(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::PowerPc => "powerpc",
        }
    }

    /// Returns the byte order instructions are stored in.
    pub fn endianness(&self) -> Endianness {
        match self {
            Self::X86 => Endianness::Little,
            Self::PowerPc => Endianness::Big,
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Architecture {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "i386" | "x86_64" | "amd64" => Ok(Self::X86),
            "ppc" | "powerpc" | "gekko" => Ok(Self::PowerPc),
            _ => Err(Error::UnknownArchitecture(s.to_string())),
        }
    }
}

/// Execution mode width: selects default operand and address sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bitness {
    Bits16,
    #[default]
    Bits32,
    Bits64,
}

impl Bitness {
    /// Width in bits.
    pub fn bits(&self) -> u32 {
        match self {
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    pub fn is_64(&self) -> bool {
        matches!(self, Self::Bits64)
    }
}

impl fmt::Display for Bitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for Bitness {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16" => Ok(Self::Bits16),
            "32" => Ok(Self::Bits32),
            "64" => Ok(Self::Bits64),
            _ => Err(Error::InvalidBitness(s.to_string())),
        }
    }
}

/// Byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Endianness {
    Little,
    Big,
}
