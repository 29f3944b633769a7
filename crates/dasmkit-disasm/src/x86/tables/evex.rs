//! EVEX (AVX-512 foundation) opcode maps 1-3.

use super::{OpcodeEntry, INVALID};

macro_rules! pp {
    ($none:expr, $p66:expr, $f2:expr, $f3:expr $(,)?) => {
        grp!(Sse, [$none, $p66, $f2, $f3])
    };
}

/// pp = 66, EVEX.W selecting the dword or qword form.
macro_rules! dq {
    ($d:literal, $q:literal $(, $o:ident)*) => {
        grp!(SseOnly, P66, grp!(W, [op!(@Avx512 $d $(, $o)*), op!(@Avx512 $q $(, $o)*)]))
    };
}

macro_rules! e66 {
    ($name:literal $(, $o:ident)*) => {
        grp!(SseOnly, P66, op!(@Avx512 $name $(, $o)*))
    };
}

macro_rules! efp {
    ($ps:literal, $pd:literal, $sd:literal, $ss:literal) => {
        pp!(
            op!(@Avx512 $ps, Vx, Hx, Wx),
            op!(@Avx512 $pd, Vx, Hx, Wx),
            op!(@Avx512 $sd, Vdq, Hdq, Wq),
            op!(@Avx512 $ss, Vdq, Hdq, Wd),
        )
    };
    ($ps:literal, $pd:literal) => {
        pp!(op!(@Avx512 $ps, Vx, Hx, Wx), op!(@Avx512 $pd, Vx, Hx, Wx), INVALID, INVALID)
    };
}

#[rustfmt::skip]
const MAP1: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x10] = pp!(
        op!(@Avx512 "vmovups", Vx, Wx),
        op!(@Avx512 "vmovupd", Vx, Wx),
        grp!(Mod, [op!(@Avx512 "vmovsd", Vdq, Hdq, Udq), op!(@Avx512 "vmovsd", Vdq, Mq)]),
        grp!(Mod, [op!(@Avx512 "vmovss", Vdq, Hdq, Udq), op!(@Avx512 "vmovss", Vdq, Md)]),
    );
    t[0x11] = pp!(
        op!(@Avx512 "vmovups", Wx, Vx),
        op!(@Avx512 "vmovupd", Wx, Vx),
        grp!(Mod, [op!(@Avx512 "vmovsd", Udq, Hdq, Vdq), op!(@Avx512 "vmovsd", Mq, Vdq)]),
        grp!(Mod, [op!(@Avx512 "vmovss", Udq, Hdq, Vdq), op!(@Avx512 "vmovss", Md, Vdq)]),
    );
    t[0x14] = efp!("vunpcklps", "vunpcklpd");
    t[0x15] = efp!("vunpckhps", "vunpckhpd");
    t[0x28] = pp!(op!(@Avx512 "vmovaps", Vx, Wx), op!(@Avx512 "vmovapd", Vx, Wx), INVALID, INVALID);
    t[0x29] = pp!(op!(@Avx512 "vmovaps", Wx, Vx), op!(@Avx512 "vmovapd", Wx, Vx), INVALID, INVALID);
    t[0x2E] = pp!(op!(@Avx512 "vucomiss", Vdq, Wd), op!(@Avx512 "vucomisd", Vdq, Wq), INVALID, INVALID);
    t[0x2F] = pp!(op!(@Avx512 "vcomiss", Vdq, Wd), op!(@Avx512 "vcomisd", Vdq, Wq), INVALID, INVALID);
    t[0x51] = pp!(
        op!(@Avx512 "vsqrtps", Vx, Wx),
        op!(@Avx512 "vsqrtpd", Vx, Wx),
        op!(@Avx512 "vsqrtsd", Vdq, Hdq, Wq),
        op!(@Avx512 "vsqrtss", Vdq, Hdq, Wd),
    );
    t[0x54] = efp!("vandps", "vandpd");
    t[0x55] = efp!("vandnps", "vandnpd");
    t[0x56] = efp!("vorps", "vorpd");
    t[0x57] = efp!("vxorps", "vxorpd");
    t[0x58] = efp!("vaddps", "vaddpd", "vaddsd", "vaddss");
    t[0x59] = efp!("vmulps", "vmulpd", "vmulsd", "vmulss");
    t[0x5A] = pp!(
        op!(@Avx512 "vcvtps2pd", Vx, Wh),
        op!(@Avx512 "vcvtpd2ps", Vx, Wx),
        op!(@Avx512 "vcvtsd2ss", Vdq, Hdq, Wq),
        op!(@Avx512 "vcvtss2sd", Vdq, Hdq, Wd),
    );
    t[0x5B] = pp!(
        op!(@Avx512 "vcvtdq2ps", Vx, Wx),
        op!(@Avx512 "vcvtps2dq", Vx, Wx),
        INVALID,
        op!(@Avx512 "vcvttps2dq", Vx, Wx),
    );
    t[0x5C] = efp!("vsubps", "vsubpd", "vsubsd", "vsubss");
    t[0x5D] = efp!("vminps", "vminpd", "vminsd", "vminss");
    t[0x5E] = efp!("vdivps", "vdivpd", "vdivsd", "vdivss");
    t[0x5F] = efp!("vmaxps", "vmaxpd", "vmaxsd", "vmaxss");

    t[0x66] = e66!("vpcmpgtd", Kg, Hx, Wx);
    t[0x6F] = pp!(
        INVALID,
        grp!(W, [op!(@Avx512 "vmovdqa32", Vx, Wx), op!(@Avx512 "vmovdqa64", Vx, Wx)]),
        grp!(W, [op!(@Avx512 "vmovdqu8", Vx, Wx), op!(@Avx512 "vmovdqu16", Vx, Wx)]),
        grp!(W, [op!(@Avx512 "vmovdqu32", Vx, Wx), op!(@Avx512 "vmovdqu64", Vx, Wx)]),
    );
    t[0x76] = e66!("vpcmpeqd", Kg, Hx, Wx);
    t[0x7F] = pp!(
        INVALID,
        grp!(W, [op!(@Avx512 "vmovdqa32", Wx, Vx), op!(@Avx512 "vmovdqa64", Wx, Vx)]),
        grp!(W, [op!(@Avx512 "vmovdqu8", Wx, Vx), op!(@Avx512 "vmovdqu16", Wx, Vx)]),
        grp!(W, [op!(@Avx512 "vmovdqu32", Wx, Vx), op!(@Avx512 "vmovdqu64", Wx, Vx)]),
    );
    t[0xC2] = pp!(
        op!(@Avx512 "vcmpps", Kg, Hx, Wx, Ib),
        op!(@Avx512 "vcmppd", Kg, Hx, Wx, Ib),
        op!(@Avx512 "vcmpsd", Kg, Hdq, Wq, Ib),
        op!(@Avx512 "vcmpss", Kg, Hdq, Wd, Ib),
    );
    t[0xC6] = pp!(
        op!(@Avx512 "vshufps", Vx, Hx, Wx, Ib),
        op!(@Avx512 "vshufpd", Vx, Hx, Wx, Ib),
        INVALID,
        INVALID,
    );
    t[0xD4] = e66!("vpaddq", Vx, Hx, Wx);
    t[0xDB] = dq!("vpandd", "vpandq", Vx, Hx, Wx);
    t[0xDF] = dq!("vpandnd", "vpandnq", Vx, Hx, Wx);
    t[0xEB] = dq!("vpord", "vporq", Vx, Hx, Wx);
    t[0xEF] = dq!("vpxord", "vpxorq", Vx, Hx, Wx);
    t[0xFA] = e66!("vpsubd", Vx, Hx, Wx);
    t[0xFB] = e66!("vpsubq", Vx, Hx, Wx);
    t[0xFE] = e66!("vpaddd", Vx, Hx, Wx);
    t
};

#[rustfmt::skip]
const MAP2: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x16] = dq!("vpermps", "vpermpd", Vx, Hx, Wx);
    t[0x18] = e66!("vbroadcastss", Vx, Wd);
    t[0x19] = e66!("vbroadcastsd", Vx, Wq);
    t[0x36] = dq!("vpermd", "vpermq", Vx, Hx, Wx);
    t[0x40] = dq!("vpmulld", "vpmullq", Vx, Hx, Wx);
    t[0x58] = e66!("vpbroadcastd", Vx, Wd);
    t[0x59] = e66!("vpbroadcastq", Vx, Wq);
    t[0x64] = dq!("vpblendmd", "vpblendmq", Vx, Hx, Wx);
    t[0x65] = dq!("vblendmps", "vblendmpd", Vx, Hx, Wx);
    t[0x7C] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx512 "vpbroadcastd", Vx, Ed),
        op!(@Avx512 "vpbroadcastq", Vx, Eq),
    ]));
    t[0x98] = dq!("vfmadd132ps", "vfmadd132pd", Vx, Hx, Wx);
    t[0x99] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx512 "vfmadd132ss", Vdq, Hdq, Wd),
        op!(@Avx512 "vfmadd132sd", Vdq, Hdq, Wq),
    ]));
    t[0xA8] = dq!("vfmadd213ps", "vfmadd213pd", Vx, Hx, Wx);
    t[0xA9] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx512 "vfmadd213ss", Vdq, Hdq, Wd),
        op!(@Avx512 "vfmadd213sd", Vdq, Hdq, Wq),
    ]));
    t[0xB8] = dq!("vfmadd231ps", "vfmadd231pd", Vx, Hx, Wx);
    t[0xB9] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx512 "vfmadd231ss", Vdq, Hdq, Wd),
        op!(@Avx512 "vfmadd231sd", Vdq, Hdq, Wq),
    ]));
    t
};

#[rustfmt::skip]
const MAP3: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x03] = dq!("valignd", "valignq", Vx, Hx, Wx, Ib);
    t[0x1A] = dq!("vinsertf32x8", "vinsertf64x4", Vx, Hx, Wh, Ib);
    t[0x1B] = dq!("vextractf32x8", "vextractf64x4", Wh, Vx, Ib);
    t[0x1E] = dq!("vpcmpud", "vpcmpuq", Kg, Hx, Wx, Ib);
    t[0x1F] = dq!("vpcmpd", "vpcmpq", Kg, Hx, Wx, Ib);
    t[0x3A] = dq!("vinserti32x8", "vinserti64x4", Vx, Hx, Wh, Ib);
    t[0x3B] = dq!("vextracti32x8", "vextracti64x4", Wh, Vx, Ib);
    t
};

pub(crate) static EVEX_0F: [OpcodeEntry; 256] = MAP1;
pub(crate) static EVEX_0F38: [OpcodeEntry; 256] = MAP2;
pub(crate) static EVEX_0F3A: [OpcodeEntry; 256] = MAP3;
