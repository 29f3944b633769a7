//! One-byte opcode map, legacy and long mode.

use super::x87;
use super::{OpcodeEntry, INVALID};

const G1_EB_IB: [OpcodeEntry; 8] = [
    op!(B "add", Eb, Ib),
    op!(B "or", Eb, Ib),
    op!(B "adc", Eb, Ib),
    op!(B "sbb", Eb, Ib),
    op!(B "and", Eb, Ib),
    op!(B "sub", Eb, Ib),
    op!(B "xor", Eb, Ib),
    op!(B "cmp", Eb, Ib),
];

const G1_EV_IZ: [OpcodeEntry; 8] = [
    op!(V "add", Ev, Iz),
    op!(V "or", Ev, Iz),
    op!(V "adc", Ev, Iz),
    op!(V "sbb", Ev, Iz),
    op!(V "and", Ev, Iz),
    op!(V "sub", Ev, Iz),
    op!(V "xor", Ev, Iz),
    op!(V "cmp", Ev, Iz),
];

const G1_EV_IB: [OpcodeEntry; 8] = [
    op!(V "add", Ev, Ibs),
    op!(V "or", Ev, Ibs),
    op!(V "adc", Ev, Ibs),
    op!(V "sbb", Ev, Ibs),
    op!(V "and", Ev, Ibs),
    op!(V "sub", Ev, Ibs),
    op!(V "xor", Ev, Ibs),
    op!(V "cmp", Ev, Ibs),
];

const G1A: [OpcodeEntry; 8] = [op!(S "pop", Evs), INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID];

macro_rules! shift_group {
    ($name:ident, $sfx:ident, $($o:ident),+) => {
        const $name: [OpcodeEntry; 8] = [
            op!($sfx "rol" $(, $o)+),
            op!($sfx "ror" $(, $o)+),
            op!($sfx "rcl" $(, $o)+),
            op!($sfx "rcr" $(, $o)+),
            op!($sfx "shl" $(, $o)+),
            op!($sfx "shr" $(, $o)+),
            op!($sfx "shl" $(, $o)+),
            op!($sfx "sar" $(, $o)+),
        ];
    };
}

shift_group!(G2_EB_IB, B, Eb, Ib);
shift_group!(G2_EV_IB, V, Ev, Ib);
shift_group!(G2_EB_1, B, Eb, One);
shift_group!(G2_EV_1, V, Ev, One);
shift_group!(G2_EB_CL, B, Eb, Cl);
shift_group!(G2_EV_CL, V, Ev, Cl);

const G3_EB: [OpcodeEntry; 8] = [
    op!(B "test", Eb, Ib),
    op!(B "test", Eb, Ib),
    op!(B "not", Eb),
    op!(B "neg", Eb),
    op!(B "mul", Eb),
    op!(B "imul", Eb),
    op!(B "div", Eb),
    op!(B "idiv", Eb),
];

const G3_EV: [OpcodeEntry; 8] = [
    op!(V "test", Ev, Iz),
    op!(V "test", Ev, Iz),
    op!(V "not", Ev),
    op!(V "neg", Ev),
    op!(V "mul", Ev),
    op!(V "imul", Ev),
    op!(V "div", Ev),
    op!(V "idiv", Ev),
];

const G4: [OpcodeEntry; 8] = [op!(B "inc", Eb), op!(B "dec", Eb), INVALID, INVALID, INVALID, INVALID, INVALID, INVALID];

const G5: [OpcodeEntry; 8] = [
    op!(V "inc", Ev),
    op!(V "dec", Ev),
    op!("call", Evs),
    op!("call far" / "lcall", Mp),
    op!("jmp", Evs),
    op!("jmp far" / "ljmp", Mp),
    op!(S "push", Evs),
    INVALID,
];

const G11_EB: [OpcodeEntry; 8] = [op!(B "mov", Eb, Ib), INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID];
const G11_EV: [OpcodeEntry; 8] = [op!(V "mov", Ev, Iz), INVALID, INVALID, INVALID, INVALID, INVALID, INVALID, INVALID];

const PUSHA: [OpcodeEntry; 3] = [op!("pusha" / "pushaw"), op!("pushad" / "pushal"), INVALID];
const POPA: [OpcodeEntry; 3] = [op!("popa" / "popaw"), op!("popad" / "popal"), INVALID];
const CBW: [OpcodeEntry; 3] = [op!("cbw" / "cbtw"), op!("cwde" / "cwtl"), op!("cdqe" / "cltq")];
const CWD: [OpcodeEntry; 3] = [op!("cwd" / "cwtd"), op!("cdq" / "cltd"), op!("cqo" / "cqto")];
const PUSHF: [OpcodeEntry; 3] = [op!("pushf" / "pushfw"), op!("pushfd" / "pushfl"), op!("pushfq")];
const POPF: [OpcodeEntry; 3] = [op!("popf" / "popfw"), op!("popfd" / "popfl"), op!("popfq")];
const PUSHF_64: [OpcodeEntry; 3] = [op!("pushf" / "pushfw"), op!("pushfq"), op!("pushfq")];
const POPF_64: [OpcodeEntry; 3] = [op!("popf" / "popfw"), op!("popfq"), op!("popfq")];
const IRET: [OpcodeEntry; 3] = [op!("iret" / "iretw"), op!("iretd" / "iretl"), op!("iretq")];

const INS: [OpcodeEntry; 3] = [op!("insw", Yv, Dx), op!("insd" / "insl", Yv, Dx), op!("insd" / "insl", Yv, Dx)];
const OUTS: [OpcodeEntry; 3] = [op!("outsw", Dx, Xv), op!("outsd" / "outsl", Dx, Xv), op!("outsd" / "outsl", Dx, Xv)];
const MOVS: [OpcodeEntry; 3] = [op!("movsw", Yv, Xv), op!("movsd" / "movsl", Yv, Xv), op!("movsq", Yv, Xv)];
const CMPS: [OpcodeEntry; 3] = [op!("cmpsw", Xv, Yv), op!("cmpsd" / "cmpsl", Xv, Yv), op!("cmpsq", Xv, Yv)];
const STOS: [OpcodeEntry; 3] = [op!("stosw", Yv, Acc), op!("stosd" / "stosl", Yv, Acc), op!("stosq", Yv, Acc)];
const LODS: [OpcodeEntry; 3] = [op!("lodsw", Acc, Xv), op!("lodsd" / "lodsl", Acc, Xv), op!("lodsq", Acc, Xv)];
const SCAS: [OpcodeEntry; 3] = [op!("scasw", Acc, Yv), op!("scasd" / "scasl", Acc, Yv), op!("scasq", Acc, Yv)];

/// Eight ALU opcodes share the 00-05 layout at 00, 08, ..., 38.
macro_rules! alu_row {
    ($t:ident, $base:literal, $name:literal) => {
        $t[$base] = op!(B $name, Eb, Gb);
        $t[$base + 1] = op!(V $name, Ev, Gv);
        $t[$base + 2] = op!(B $name, Gb, Eb);
        $t[$base + 3] = op!(V $name, Gv, Ev);
        $t[$base + 4] = op!(B $name, Al, Ib);
        $t[$base + 5] = op!(V $name, Acc, Iz);
    };
}

#[rustfmt::skip]
const LEGACY: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    alu_row!(t, 0x00, "add");
    alu_row!(t, 0x08, "or");
    alu_row!(t, 0x10, "adc");
    alu_row!(t, 0x18, "sbb");
    alu_row!(t, 0x20, "and");
    alu_row!(t, 0x28, "sub");
    alu_row!(t, 0x30, "xor");
    alu_row!(t, 0x38, "cmp");

    t[0x06] = op!("push", SegEs);
    t[0x07] = op!("pop", SegEs);
    t[0x0E] = op!("push", SegCs);
    t[0x16] = op!("push", SegSs);
    t[0x17] = op!("pop", SegSs);
    t[0x1E] = op!("push", SegDs);
    t[0x1F] = op!("pop", SegDs);
    t[0x27] = op!("daa");
    t[0x2F] = op!("das");
    t[0x37] = op!("aaa");
    t[0x3F] = op!("aas");

    let mut r = 0;
    while r < 8 {
        t[0x40 + r] = op!(V "inc", Zv);
        t[0x48 + r] = op!(V "dec", Zv);
        t[0x50 + r] = op!(S "push", Zvs);
        t[0x58 + r] = op!(S "pop", Zvs);
        t[0xB0 + r] = op!(B "mov", Zb, Ib);
        t[0xB8 + r] = op!(V "mov", Zv, Iv);
        r += 1;
    }
    r = 1;
    while r < 8 {
        t[0x90 + r] = op!(V "xchg", Zv, Acc);
        r += 1;
    }

    t[0x60] = grp!(OperandSize, PUSHA);
    t[0x61] = grp!(OperandSize, POPA);
    t[0x62] = op!(V "bound", Gv, M);
    t[0x63] = op!(W "arpl", Ew, Gw);
    t[0x68] = op!(S "push", Izs);
    t[0x69] = op!(V "imul", Gv, Ev, Iz);
    t[0x6A] = op!(S "push", Ibss);
    t[0x6B] = op!(V "imul", Gv, Ev, Ibs);
    t[0x6C] = op!("insb", Yb, Dx);
    t[0x6D] = grp!(OperandSize, INS);
    t[0x6E] = op!("outsb", Dx, Xb);
    t[0x6F] = grp!(OperandSize, OUTS);

    t[0x70] = op!("jo", Jb);
    t[0x71] = op!("jno", Jb);
    t[0x72] = op!("jb", Jb);
    t[0x73] = op!("jnb", Jb);
    t[0x74] = op!("jz", Jb);
    t[0x75] = op!("jnz", Jb);
    t[0x76] = op!("jbe", Jb);
    t[0x77] = op!("jnbe", Jb);
    t[0x78] = op!("js", Jb);
    t[0x79] = op!("jns", Jb);
    t[0x7A] = op!("jp", Jb);
    t[0x7B] = op!("jnp", Jb);
    t[0x7C] = op!("jl", Jb);
    t[0x7D] = op!("jnl", Jb);
    t[0x7E] = op!("jle", Jb);
    t[0x7F] = op!("jnle", Jb);

    t[0x80] = grp!(Reg, G1_EB_IB);
    t[0x81] = grp!(Reg, G1_EV_IZ);
    t[0x82] = grp!(Reg, G1_EB_IB);
    t[0x83] = grp!(Reg, G1_EV_IB);
    t[0x84] = op!(B "test", Eb, Gb);
    t[0x85] = op!(V "test", Ev, Gv);
    t[0x86] = op!(B "xchg", Eb, Gb);
    t[0x87] = op!(V "xchg", Ev, Gv);
    t[0x88] = op!(B "mov", Eb, Gb);
    t[0x89] = op!(V "mov", Ev, Gv);
    t[0x8A] = op!(B "mov", Gb, Eb);
    t[0x8B] = op!(V "mov", Gv, Ev);
    t[0x8C] = op!(W "mov", Ew, Sw);
    t[0x8D] = op!(V "lea", Gv, M);
    t[0x8E] = op!(W "mov", Sw, Ew);
    t[0x8F] = grp!(Reg, G1A);

    t[0x90] = op!("nop");
    t[0x98] = grp!(OperandSize, CBW);
    t[0x99] = grp!(OperandSize, CWD);
    t[0x9A] = op!("call far" / "lcall", Ap);
    t[0x9B] = op!("fwait");
    t[0x9C] = grp!(OperandSize, PUSHF);
    t[0x9D] = grp!(OperandSize, POPF);
    t[0x9E] = op!("sahf");
    t[0x9F] = op!("lahf");

    t[0xA0] = op!(B "mov", Al, Ob);
    t[0xA1] = op!(V "mov", Acc, Ov);
    t[0xA2] = op!(B "mov", Ob, Al);
    t[0xA3] = op!(V "mov", Ov, Acc);
    t[0xA4] = op!("movsb", Yb, Xb);
    t[0xA5] = grp!(OperandSize, MOVS);
    t[0xA6] = op!("cmpsb", Xb, Yb);
    t[0xA7] = grp!(OperandSize, CMPS);
    t[0xA8] = op!(B "test", Al, Ib);
    t[0xA9] = op!(V "test", Acc, Iz);
    t[0xAA] = op!("stosb", Yb, Al);
    t[0xAB] = grp!(OperandSize, STOS);
    t[0xAC] = op!("lodsb", Al, Xb);
    t[0xAD] = grp!(OperandSize, LODS);
    t[0xAE] = op!("scasb", Al, Yb);
    t[0xAF] = grp!(OperandSize, SCAS);

    t[0xC0] = grp!(Reg, G2_EB_IB);
    t[0xC1] = grp!(Reg, G2_EV_IB);
    t[0xC2] = op!("ret", Iw);
    t[0xC3] = op!("ret");
    t[0xC4] = op!(V "les", Gv, Mp);
    t[0xC5] = op!(V "lds", Gv, Mp);
    t[0xC6] = grp!(Reg, G11_EB);
    t[0xC7] = grp!(Reg, G11_EV);
    t[0xC8] = op!("enter", Iw, Ib);
    t[0xC9] = op!("leave");
    t[0xCA] = op!("retf" / "lret", Iw);
    t[0xCB] = op!("retf" / "lret");
    t[0xCC] = op!("int3");
    t[0xCD] = op!("int", Ib);
    t[0xCE] = op!("into");
    t[0xCF] = grp!(OperandSize, IRET);

    t[0xD0] = grp!(Reg, G2_EB_1);
    t[0xD1] = grp!(Reg, G2_EV_1);
    t[0xD2] = grp!(Reg, G2_EB_CL);
    t[0xD3] = grp!(Reg, G2_EV_CL);
    t[0xD4] = op!("aam", Ib);
    t[0xD5] = op!("aad", Ib);
    t[0xD6] = op!("salc");
    t[0xD7] = op!("xlatb");
    t[0xD8] = grp!(X87, x87::FPU_D8);
    t[0xD9] = grp!(X87, x87::FPU_D9);
    t[0xDA] = grp!(X87, x87::FPU_DA);
    t[0xDB] = grp!(X87, x87::FPU_DB);
    t[0xDC] = grp!(X87, x87::FPU_DC);
    t[0xDD] = grp!(X87, x87::FPU_DD);
    t[0xDE] = grp!(X87, x87::FPU_DE);
    t[0xDF] = grp!(X87, x87::FPU_DF);

    t[0xE0] = op!("loopne", Jb);
    t[0xE1] = op!("loope", Jb);
    t[0xE2] = op!("loop", Jb);
    t[0xE3] = op!("jcxz", Jb);
    t[0xE4] = op!(B "in", Al, Ib);
    t[0xE5] = op!("in", AccZ, Ib);
    t[0xE6] = op!(B "out", Ib, Al);
    t[0xE7] = op!("out", Ib, AccZ);
    t[0xE8] = op!("call", Jz);
    t[0xE9] = op!("jmp", Jz);
    t[0xEA] = op!("jmp far" / "ljmp", Ap);
    t[0xEB] = op!("jmp", Jb);
    t[0xEC] = op!(B "in", Al, Dx);
    t[0xED] = op!("in", AccZ, Dx);
    t[0xEE] = op!(B "out", Dx, Al);
    t[0xEF] = op!("out", Dx, AccZ);

    t[0xF1] = op!("int1");
    t[0xF4] = op!("hlt");
    t[0xF5] = op!("cmc");
    t[0xF6] = grp!(Reg, G3_EB);
    t[0xF7] = grp!(Reg, G3_EV);
    t[0xF8] = op!("clc");
    t[0xF9] = op!("stc");
    t[0xFA] = op!("cli");
    t[0xFB] = op!("sti");
    t[0xFC] = op!("cld");
    t[0xFD] = op!("std");
    t[0xFE] = grp!(Reg, G4);
    t[0xFF] = grp!(Reg, G5);
    t
};

/// Opcodes with no meaning in 64-bit mode (REX and the VEX/EVEX escapes
/// are consumed before the table is consulted).
const INVALID_IN_LONG_MODE: [u8; 38] = [
    0x06, 0x07, 0x0E, 0x16, 0x17, 0x1E, 0x1F, 0x27, 0x2F, 0x37, 0x3F, 0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47,
    0x48, 0x49, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F, 0x60, 0x61, 0x62, 0x82, 0x9A, 0xC4, 0xC5, 0xCE, 0xD4, 0xD5, 0xD6,
];

const LONG_MODE: [OpcodeEntry; 256] = {
    let mut t = LEGACY;
    let mut i = 0;
    while i < INVALID_IN_LONG_MODE.len() {
        t[INVALID_IN_LONG_MODE[i] as usize] = INVALID;
        i += 1;
    }
    t[0xEA] = INVALID;
    t[0x63] = op!("movsxd" / "movslq", Gv, Ed);
    t[0x9C] = grp!(OperandSize, PUSHF_64);
    t[0x9D] = grp!(OperandSize, POPF_64);
    t[0xE3] = op!("jrcxz", Jb);
    t
};

/// Legacy (16/32-bit) one-byte map.
pub(crate) static ONE_BYTE_32: [OpcodeEntry; 256] = LEGACY;

/// 64-bit one-byte map.
pub(crate) static ONE_BYTE_64: [OpcodeEntry; 256] = LONG_MODE;

/// `90` with REX.B names r8, so it is a real exchange.
pub(crate) static XCHG_R8: OpcodeEntry = op!(V "xchg", Zv, Acc);
/// `F3 90`.
pub(crate) static PAUSE: OpcodeEntry = op!("pause");
/// `E3` under a 32-bit address size.
pub(crate) static JECXZ: OpcodeEntry = op!("jecxz", Jb);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::tables::{Group, OpcodeInfo};

    fn info(entry: &OpcodeEntry) -> Option<&OpcodeInfo> {
        match entry {
            OpcodeEntry::Insn(info) => Some(info),
            OpcodeEntry::Group(_) => None,
        }
    }

    #[test]
    fn test_long_mode_removes_legacy_opcodes() {
        for op in INVALID_IN_LONG_MODE {
            assert!(info(&ONE_BYTE_64[op as usize]).is_some_and(|i| i.is_invalid()), "{op:#04x}");
        }
        assert_eq!(info(&ONE_BYTE_64[0x63]).map(|i| i.intel), Some("movsxd"));
        assert_eq!(info(&ONE_BYTE_32[0x63]).map(|i| i.intel), Some("arpl"));
    }

    #[test]
    fn test_legacy_keeps_les_lds_bound() {
        assert_eq!(info(&ONE_BYTE_32[0xC4]).map(|i| i.intel), Some("les"));
        assert_eq!(info(&ONE_BYTE_32[0xC5]).map(|i| i.intel), Some("lds"));
        assert_eq!(info(&ONE_BYTE_32[0x62]).map(|i| i.intel), Some("bound"));
    }

    #[test]
    fn test_groups_by_reg() {
        assert!(matches!(ONE_BYTE_32[0xFF], OpcodeEntry::Group(Group::Reg(_))));
        assert!(matches!(ONE_BYTE_32[0xD9], OpcodeEntry::Group(Group::X87(_))));
        assert!(matches!(ONE_BYTE_64[0x9C], OpcodeEntry::Group(Group::OperandSize(_))));
    }
}
