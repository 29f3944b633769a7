//! AMD XOP maps 8, 9 and A.

use super::{OpcodeEntry, INVALID};

/// Multiply-accumulate with the addend register in imm8[7:4].
macro_rules! macc {
    ($name:literal) => {
        op!(@Xop $name, Vdq, Hdq, Wdq, Lx)
    };
}

/// Rotate/shift by register: W swaps the count and source operands.
macro_rules! xshift {
    ($name:literal) => {
        grp!(W, [op!(@Xop $name, Vdq, Wdq, Hdq), op!(@Xop $name, Vdq, Hdq, Wdq)])
    };
}

macro_rules! xcmp {
    ($name:literal) => {
        op!(@Xop $name, Vdq, Hdq, Wdq, Ib)
    };
}

macro_rules! xhadd {
    ($name:literal) => {
        op!(@Xop $name, Vdq, Wdq)
    };
}

#[rustfmt::skip]
const MAP8: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x85] = macc!("vpmacssww");
    t[0x86] = macc!("vpmacsswd");
    t[0x87] = macc!("vpmacssdql");
    t[0x8E] = macc!("vpmacssdd");
    t[0x8F] = macc!("vpmacssdqh");
    t[0x95] = macc!("vpmacsww");
    t[0x96] = macc!("vpmacswd");
    t[0x97] = macc!("vpmacsdql");
    t[0x9E] = macc!("vpmacsdd");
    t[0x9F] = macc!("vpmacsdqh");
    t[0xA2] = grp!(W, [op!(@Xop "vpcmov", Vx, Hx, Wx, Lx), op!(@Xop "vpcmov", Vx, Hx, Lx, Wx)]);
    t[0xA3] = grp!(W, [op!(@Xop "vpperm", Vdq, Hdq, Wdq, Lx), op!(@Xop "vpperm", Vdq, Hdq, Lx, Wdq)]);
    t[0xA6] = macc!("vpmadcsswd");
    t[0xB6] = macc!("vpmadcswd");
    t[0xC0] = op!(@Xop "vprotb", Vdq, Wdq, Ib);
    t[0xC1] = op!(@Xop "vprotw", Vdq, Wdq, Ib);
    t[0xC2] = op!(@Xop "vprotd", Vdq, Wdq, Ib);
    t[0xC3] = op!(@Xop "vprotq", Vdq, Wdq, Ib);
    t[0xCC] = xcmp!("vpcomb");
    t[0xCD] = xcmp!("vpcomw");
    t[0xCE] = xcmp!("vpcomd");
    t[0xCF] = xcmp!("vpcomq");
    t[0xEC] = xcmp!("vpcomub");
    t[0xED] = xcmp!("vpcomuw");
    t[0xEE] = xcmp!("vpcomud");
    t[0xEF] = xcmp!("vpcomuq");
    t
};

const TBM_G1: [OpcodeEntry; 8] = [
    INVALID,
    op!(@Xop "blcfill", By, Ey),
    op!(@Xop "blsfill", By, Ey),
    op!(@Xop "blcs", By, Ey),
    op!(@Xop "tzmsk", By, Ey),
    op!(@Xop "blcic", By, Ey),
    op!(@Xop "blsic", By, Ey),
    op!(@Xop "t1mskc", By, Ey),
];

const TBM_G2: [OpcodeEntry; 8] = [
    INVALID,
    op!(@Xop "blcmsk", By, Ey),
    INVALID,
    INVALID,
    INVALID,
    INVALID,
    op!(@Xop "blci", By, Ey),
    INVALID,
];

#[rustfmt::skip]
const MAP9: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x01] = grp!(Reg, TBM_G1);
    t[0x02] = grp!(Reg, TBM_G2);
    t[0x80] = op!(@Xop "vfrczps", Vx, Wx);
    t[0x81] = op!(@Xop "vfrczpd", Vx, Wx);
    t[0x82] = op!(@Xop "vfrczss", Vdq, Wd);
    t[0x83] = op!(@Xop "vfrczsd", Vdq, Wq);
    t[0x90] = xshift!("vprotb");
    t[0x91] = xshift!("vprotw");
    t[0x92] = xshift!("vprotd");
    t[0x93] = xshift!("vprotq");
    t[0x94] = xshift!("vpshlb");
    t[0x95] = xshift!("vpshlw");
    t[0x96] = xshift!("vpshld");
    t[0x97] = xshift!("vpshlq");
    t[0x98] = xshift!("vpshab");
    t[0x99] = xshift!("vpshaw");
    t[0x9A] = xshift!("vpshad");
    t[0x9B] = xshift!("vpshaq");
    t[0xC1] = xhadd!("vphaddbw");
    t[0xC2] = xhadd!("vphaddbd");
    t[0xC3] = xhadd!("vphaddbq");
    t[0xC6] = xhadd!("vphaddwd");
    t[0xC7] = xhadd!("vphaddwq");
    t[0xCB] = xhadd!("vphadddq");
    t[0xD1] = xhadd!("vphaddubw");
    t[0xD2] = xhadd!("vphaddubd");
    t[0xD3] = xhadd!("vphaddubq");
    t[0xD6] = xhadd!("vphadduwd");
    t[0xD7] = xhadd!("vphadduwq");
    t[0xDB] = xhadd!("vphaddudq");
    t[0xE1] = xhadd!("vphsubbw");
    t[0xE2] = xhadd!("vphsubwd");
    t[0xE3] = xhadd!("vphsubdq");
    t
};

const LWP: [OpcodeEntry; 8] = [
    op!(@Xop "lwpins", By, Ed, Id),
    op!(@Xop "lwpval", By, Ed, Id),
    INVALID,
    INVALID,
    INVALID,
    INVALID,
    INVALID,
    INVALID,
];

const MAPA: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x10] = op!(@Xop "bextr", Gy, Ey, Id);
    t[0x12] = grp!(Reg, LWP);
    t
};

pub(crate) static XOP_MAP8: [OpcodeEntry; 256] = MAP8;
pub(crate) static XOP_MAP9: [OpcodeEntry; 256] = MAP9;
pub(crate) static XOP_MAPA: [OpcodeEntry; 256] = MAPA;
