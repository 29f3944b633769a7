//! Register name tables.

pub const GPR8: [&str; 8] = ["al", "cl", "dl", "bl", "ah", "ch", "dh", "bh"];

/// Byte registers when any REX prefix is present.
pub const GPR8_REX: [&str; 16] = [
    "al", "cl", "dl", "bl", "spl", "bpl", "sil", "dil", "r8b", "r9b", "r10b", "r11b", "r12b", "r13b", "r14b", "r15b",
];

pub const GPR16: [&str; 16] = [
    "ax", "cx", "dx", "bx", "sp", "bp", "si", "di", "r8w", "r9w", "r10w", "r11w", "r12w", "r13w", "r14w", "r15w",
];

pub const GPR32: [&str; 16] = [
    "eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi", "r8d", "r9d", "r10d", "r11d", "r12d", "r13d", "r14d",
    "r15d",
];

pub const GPR64: [&str; 16] = [
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15",
];

pub const SEGMENT: [&str; 8] = ["es", "cs", "ss", "ds", "fs", "gs", "??", "??"];

pub const MMX: [&str; 8] = ["mm0", "mm1", "mm2", "mm3", "mm4", "mm5", "mm6", "mm7"];

pub const ST: [&str; 8] = ["st(0)", "st(1)", "st(2)", "st(3)", "st(4)", "st(5)", "st(6)", "st(7)"];

pub const OPMASK: [&str; 8] = ["k0", "k1", "k2", "k3", "k4", "k5", "k6", "k7"];

/// Width of a general purpose register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub fn bytes(self) -> u32 {
        match self {
            Self::W8 => 1,
            Self::W16 => 2,
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }
}

/// Name of general register `n` at `width`; `rex` selects the uniform
/// byte-register set (`spl`..`dil` instead of `ah`..`bh`).
pub fn gpr(n: u8, width: Width, rex: bool) -> &'static str {
    let n = (n & 15) as usize;
    match width {
        Width::W8 if rex || n >= 8 => GPR8_REX[n],
        Width::W8 => GPR8[n],
        Width::W16 => GPR16[n],
        Width::W32 => GPR32[n],
        Width::W64 => GPR64[n],
    }
}

/// `xmm`, `ymm` or `zmm` register by vector length (0, 1, 2).
pub fn vector(n: u8, len: u8) -> String {
    let prefix = match len {
        0 => "xmm",
        1 => "ymm",
        _ => "zmm",
    };
    format!("{prefix}{}", n & 31)
}

pub fn control(n: u8) -> String {
    format!("cr{}", n & 15)
}

pub fn debug(n: u8) -> String {
    format!("dr{}", n & 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_registers_depend_on_rex() {
        assert_eq!(gpr(4, Width::W8, false), "ah");
        assert_eq!(gpr(4, Width::W8, true), "spl");
        assert_eq!(gpr(12, Width::W8, false), "r12b");
    }

    #[test]
    fn test_wide_registers() {
        assert_eq!(gpr(0, Width::W32, false), "eax");
        assert_eq!(gpr(9, Width::W64, true), "r9");
        assert_eq!(gpr(13, Width::W16, true), "r13w");
        assert_eq!(vector(17, 2), "zmm17");
        assert_eq!(vector(3, 1), "ymm3");
        assert_eq!(control(8), "cr8");
    }
}
