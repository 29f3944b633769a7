//! VEX opcode maps 1 (0F), 2 (0F 38) and 3 (0F 3A).
//!
//! The implied prefix carried in VEX.pp selects columns exactly like a
//! legacy mandatory prefix, so the same `Sse`/`SseOnly` groups apply.

use super::{OpcodeEntry, INVALID};

/// `[none, 66, F2, F3]` under VEX.pp.
macro_rules! pp {
    ($none:expr, $p66:expr, $f2:expr, $f3:expr $(,)?) => {
        grp!(Sse, [$none, $p66, $f2, $f3])
    };
}

/// AVX instruction valid only with pp = 66.
macro_rules! v66 {
    ($feat:ident $name:literal $(, $o:ident)*) => {
        grp!(SseOnly, P66, op!(@$feat $name $(, $o)*))
    };
    ($name:literal $(, $o:ident)*) => {
        v66!(Avx $name $(, $o)*)
    };
}

/// Three-operand packed integer op, 66 only.
macro_rules! vint {
    ($name:literal) => {
        v66!(Avx $name, Vx, Hx, Wx)
    };
}

/// Packed single, packed double and (optionally) scalar double, scalar
/// single forms of a three-operand floating-point op.
macro_rules! vfp {
    ($ps:literal, $pd:literal, $sd:literal, $ss:literal) => {
        pp!(
            op!(@Avx $ps, Vx, Hx, Wx),
            op!(@Avx $pd, Vx, Hx, Wx),
            op!(@Avx $sd, Vdq, Hdq, Wq),
            op!(@Avx $ss, Vdq, Hdq, Wd),
        )
    };
    ($ps:literal, $pd:literal) => {
        pp!(op!(@Avx $ps, Vx, Hx, Wx), op!(@Avx $pd, Vx, Hx, Wx), INVALID, INVALID)
    };
}

/// Shift-by-immediate: destination in vvvv, source in rm.
macro_rules! vshift {
    ($name:literal) => {
        grp!(Mod, [v66!(Avx $name, Hx, Ux, Ib), INVALID])
    };
}

/// FMA3 packed form, W selects single or double.
macro_rules! fma_packed {
    ($ps:literal, $pd:literal) => {
        grp!(SseOnly, P66, grp!(W, [op!(@Fma $ps, Vx, Hx, Wx), op!(@Fma $pd, Vx, Hx, Wx)]))
    };
}

/// FMA3 scalar form, W selects single or double.
macro_rules! fma_scalar {
    ($ss:literal, $sd:literal) => {
        grp!(SseOnly, P66, grp!(W, [op!(@Fma $ss, Vdq, Hdq, Wd), op!(@Fma $sd, Vdq, Hdq, Wq)]))
    };
}

/// Opmask register op over `[none, 66]` x `[W0, W1]`: word, quad, byte,
/// dword. Register form only.
macro_rules! kop {
    (@len 128, $e:expr) => { [$e, INVALID] };
    (@len 256, $e:expr) => { [INVALID, $e] };
    ($len:tt, $w:literal, $q:literal, $b:literal, $d:literal $(, $o:ident)*) => {
        grp!(Mod, [
            grp!(VexL, kop!(@len $len, pp!(
                grp!(W, [op!(@Avx512 $w $(, $o)*), op!(@Avx512 $q $(, $o)*)]),
                grp!(W, [op!(@Avx512 $b $(, $o)*), op!(@Avx512 $d $(, $o)*)]),
                INVALID,
                INVALID,
            ))),
            INVALID,
        ])
    };
}

/// `kmov` load form: opmask or memory source of the named width.
macro_rules! kmov_load {
    ($name:literal, $m:ident) => {
        grp!(Mod, [op!(@Avx512 $name, Kg, Kr), op!(@Avx512 $name, Kg, $m)])
    };
}

#[rustfmt::skip]
const VEX_G12: [OpcodeEntry; 8] = [
    INVALID, INVALID, vshift!("vpsrlw"), INVALID, vshift!("vpsraw"), INVALID, vshift!("vpsllw"), INVALID,
];

#[rustfmt::skip]
const VEX_G13: [OpcodeEntry; 8] = [
    INVALID, INVALID, vshift!("vpsrld"), INVALID, vshift!("vpsrad"), INVALID, vshift!("vpslld"), INVALID,
];

#[rustfmt::skip]
const VEX_G14: [OpcodeEntry; 8] = [
    INVALID, INVALID, vshift!("vpsrlq"), vshift!("vpsrldq"), INVALID, INVALID, vshift!("vpsllq"), vshift!("vpslldq"),
];

const VEX_G15: [OpcodeEntry; 8] = [
    INVALID,
    INVALID,
    grp!(Mod, [INVALID, grp!(SseOnly, None, op!(@Avx "vldmxcsr", Md))]),
    grp!(Mod, [INVALID, grp!(SseOnly, None, op!(@Avx "vstmxcsr", Md))]),
    INVALID,
    INVALID,
    INVALID,
    INVALID,
];

#[rustfmt::skip]
const MAP1: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x10] = pp!(
        op!(@Avx "vmovups", Vx, Wx),
        op!(@Avx "vmovupd", Vx, Wx),
        grp!(Mod, [op!(@Avx "vmovsd", Vdq, Hdq, Udq), op!(@Avx "vmovsd", Vdq, Mq)]),
        grp!(Mod, [op!(@Avx "vmovss", Vdq, Hdq, Udq), op!(@Avx "vmovss", Vdq, Md)]),
    );
    t[0x11] = pp!(
        op!(@Avx "vmovups", Wx, Vx),
        op!(@Avx "vmovupd", Wx, Vx),
        grp!(Mod, [op!(@Avx "vmovsd", Udq, Hdq, Vdq), op!(@Avx "vmovsd", Mq, Vdq)]),
        grp!(Mod, [op!(@Avx "vmovss", Udq, Hdq, Vdq), op!(@Avx "vmovss", Md, Vdq)]),
    );
    t[0x12] = pp!(
        grp!(Mod, [op!(@Avx "vmovhlps", Vdq, Hdq, Udq), op!(@Avx "vmovlps", Vdq, Hdq, Mq)]),
        op!(@Avx "vmovlpd", Vdq, Hdq, Mq),
        op!(@Avx "vmovddup", Vx, Wx),
        op!(@Avx "vmovsldup", Vx, Wx),
    );
    t[0x13] = pp!(op!(@Avx "vmovlps", Mq, Vdq), op!(@Avx "vmovlpd", Mq, Vdq), INVALID, INVALID);
    t[0x14] = vfp!("vunpcklps", "vunpcklpd");
    t[0x15] = vfp!("vunpckhps", "vunpckhpd");
    t[0x16] = pp!(
        grp!(Mod, [op!(@Avx "vmovlhps", Vdq, Hdq, Udq), op!(@Avx "vmovhps", Vdq, Hdq, Mq)]),
        op!(@Avx "vmovhpd", Vdq, Hdq, Mq),
        INVALID,
        op!(@Avx "vmovshdup", Vx, Wx),
    );
    t[0x17] = pp!(op!(@Avx "vmovhps", Mq, Vdq), op!(@Avx "vmovhpd", Mq, Vdq), INVALID, INVALID);

    t[0x28] = pp!(op!(@Avx "vmovaps", Vx, Wx), op!(@Avx "vmovapd", Vx, Wx), INVALID, INVALID);
    t[0x29] = pp!(op!(@Avx "vmovaps", Wx, Vx), op!(@Avx "vmovapd", Wx, Vx), INVALID, INVALID);
    t[0x2A] = pp!(INVALID, INVALID, op!(@Avx "vcvtsi2sd", Vdq, Hdq, Ey), op!(@Avx "vcvtsi2ss", Vdq, Hdq, Ey));
    t[0x2B] = pp!(op!(@Avx "vmovntps", Mx, Vx), op!(@Avx "vmovntpd", Mx, Vx), INVALID, INVALID);
    t[0x2C] = pp!(INVALID, INVALID, op!(@Avx "vcvttsd2si", Gy, Wq), op!(@Avx "vcvttss2si", Gy, Wd));
    t[0x2D] = pp!(INVALID, INVALID, op!(@Avx "vcvtsd2si", Gy, Wq), op!(@Avx "vcvtss2si", Gy, Wd));
    t[0x2E] = pp!(op!(@Avx "vucomiss", Vdq, Wd), op!(@Avx "vucomisd", Vdq, Wq), INVALID, INVALID);
    t[0x2F] = pp!(op!(@Avx "vcomiss", Vdq, Wd), op!(@Avx "vcomisd", Vdq, Wq), INVALID, INVALID);

    t[0x41] = kop!(256, "kandw", "kandq", "kandb", "kandd", Kg, Kh, Kr);
    t[0x42] = kop!(256, "kandnw", "kandnq", "kandnb", "kandnd", Kg, Kh, Kr);
    t[0x44] = kop!(128, "knotw", "knotq", "knotb", "knotd", Kg, Kr);
    t[0x45] = kop!(256, "korw", "korq", "korb", "kord", Kg, Kh, Kr);
    t[0x46] = kop!(256, "kxnorw", "kxnorq", "kxnorb", "kxnord", Kg, Kh, Kr);
    t[0x47] = kop!(256, "kxorw", "kxorq", "kxorb", "kxord", Kg, Kh, Kr);
    t[0x4A] = kop!(256, "kaddw", "kaddq", "kaddb", "kaddd", Kg, Kh, Kr);
    t[0x4B] = grp!(Mod, [
        grp!(VexL, [INVALID, pp!(
            grp!(W, [op!(@Avx512 "kunpckwd", Kg, Kh, Kr), op!(@Avx512 "kunpckdq", Kg, Kh, Kr)]),
            grp!(W, [op!(@Avx512 "kunpckbw", Kg, Kh, Kr), INVALID]),
            INVALID,
            INVALID,
        )]),
        INVALID,
    ]);

    t[0x50] = pp!(op!(@Avx "vmovmskps", Gd, Ux), op!(@Avx "vmovmskpd", Gd, Ux), INVALID, INVALID);
    t[0x51] = pp!(
        op!(@Avx "vsqrtps", Vx, Wx),
        op!(@Avx "vsqrtpd", Vx, Wx),
        op!(@Avx "vsqrtsd", Vdq, Hdq, Wq),
        op!(@Avx "vsqrtss", Vdq, Hdq, Wd),
    );
    t[0x52] = pp!(op!(@Avx "vrsqrtps", Vx, Wx), INVALID, INVALID, op!(@Avx "vrsqrtss", Vdq, Hdq, Wd));
    t[0x53] = pp!(op!(@Avx "vrcpps", Vx, Wx), INVALID, INVALID, op!(@Avx "vrcpss", Vdq, Hdq, Wd));
    t[0x54] = vfp!("vandps", "vandpd");
    t[0x55] = vfp!("vandnps", "vandnpd");
    t[0x56] = vfp!("vorps", "vorpd");
    t[0x57] = vfp!("vxorps", "vxorpd");
    t[0x58] = vfp!("vaddps", "vaddpd", "vaddsd", "vaddss");
    t[0x59] = vfp!("vmulps", "vmulpd", "vmulsd", "vmulss");
    t[0x5A] = pp!(
        op!(@Avx "vcvtps2pd", Vx, Wh),
        op!(@Avx "vcvtpd2ps", Vdq, Wx),
        op!(@Avx "vcvtsd2ss", Vdq, Hdq, Wq),
        op!(@Avx "vcvtss2sd", Vdq, Hdq, Wd),
    );
    t[0x5B] = pp!(
        op!(@Avx "vcvtdq2ps", Vx, Wx),
        op!(@Avx "vcvtps2dq", Vx, Wx),
        INVALID,
        op!(@Avx "vcvttps2dq", Vx, Wx),
    );
    t[0x5C] = vfp!("vsubps", "vsubpd", "vsubsd", "vsubss");
    t[0x5D] = vfp!("vminps", "vminpd", "vminsd", "vminss");
    t[0x5E] = vfp!("vdivps", "vdivpd", "vdivsd", "vdivss");
    t[0x5F] = vfp!("vmaxps", "vmaxpd", "vmaxsd", "vmaxss");

    t[0x60] = vint!("vpunpcklbw");
    t[0x61] = vint!("vpunpcklwd");
    t[0x62] = vint!("vpunpckldq");
    t[0x63] = vint!("vpacksswb");
    t[0x64] = vint!("vpcmpgtb");
    t[0x65] = vint!("vpcmpgtw");
    t[0x66] = vint!("vpcmpgtd");
    t[0x67] = vint!("vpackuswb");
    t[0x68] = vint!("vpunpckhbw");
    t[0x69] = vint!("vpunpckhwd");
    t[0x6A] = vint!("vpunpckhdq");
    t[0x6B] = vint!("vpackssdw");
    t[0x6C] = vint!("vpunpcklqdq");
    t[0x6D] = vint!("vpunpckhqdq");
    t[0x6E] = grp!(SseOnly, P66, grp!(W, [op!(@Avx "vmovd", Vdq, Ed), op!(@Avx "vmovq", Vdq, Eq)]));
    t[0x6F] = pp!(INVALID, op!(@Avx "vmovdqa", Vx, Wx), INVALID, op!(@Avx "vmovdqu", Vx, Wx));

    t[0x70] = pp!(
        INVALID,
        op!(@Avx "vpshufd", Vx, Wx, Ib),
        op!(@Avx "vpshuflw", Vx, Wx, Ib),
        op!(@Avx "vpshufhw", Vx, Wx, Ib),
    );
    t[0x71] = grp!(Reg, VEX_G12);
    t[0x72] = grp!(Reg, VEX_G13);
    t[0x73] = grp!(Reg, VEX_G14);
    t[0x74] = vint!("vpcmpeqb");
    t[0x75] = vint!("vpcmpeqw");
    t[0x76] = vint!("vpcmpeqd");
    t[0x77] = grp!(SseOnly, None, grp!(VexL, [op!(@Avx "vzeroupper"), op!(@Avx "vzeroall")]));
    t[0x7C] = pp!(INVALID, op!(@Avx "vhaddpd", Vx, Hx, Wx), op!(@Avx "vhaddps", Vx, Hx, Wx), INVALID);
    t[0x7D] = pp!(INVALID, op!(@Avx "vhsubpd", Vx, Hx, Wx), op!(@Avx "vhsubps", Vx, Hx, Wx), INVALID);
    t[0x7E] = pp!(
        INVALID,
        grp!(W, [op!(@Avx "vmovd", Ed, Vdq), op!(@Avx "vmovq", Eq, Vdq)]),
        INVALID,
        op!(@Avx "vmovq", Vdq, Wq),
    );
    t[0x7F] = pp!(INVALID, op!(@Avx "vmovdqa", Wx, Vx), INVALID, op!(@Avx "vmovdqu", Wx, Vx));

    t[0x90] = grp!(VexL, [
        pp!(
            grp!(W, [kmov_load!("kmovw", Mw), kmov_load!("kmovq", Mq)]),
            grp!(W, [kmov_load!("kmovb", Mb), kmov_load!("kmovd", Md)]),
            INVALID,
            INVALID,
        ),
        INVALID,
    ]);
    t[0x91] = grp!(Mod, [
        INVALID,
        grp!(VexL, [
            pp!(
                grp!(W, [op!(@Avx512 "kmovw", Mw, Kg), op!(@Avx512 "kmovq", Mq, Kg)]),
                grp!(W, [op!(@Avx512 "kmovb", Mb, Kg), op!(@Avx512 "kmovd", Md, Kg)]),
                INVALID,
                INVALID,
            ),
            INVALID,
        ]),
    ]);
    t[0x92] = grp!(Mod, [
        grp!(VexL, [
            pp!(
                grp!(W, [op!(@Avx512 "kmovw", Kg, Ed), INVALID]),
                grp!(W, [op!(@Avx512 "kmovb", Kg, Ed), INVALID]),
                grp!(W, [op!(@Avx512 "kmovd", Kg, Ed), op!(@Avx512 "kmovq", Kg, Eq)]),
                INVALID,
            ),
            INVALID,
        ]),
        INVALID,
    ]);
    t[0x93] = grp!(Mod, [
        grp!(VexL, [
            pp!(
                grp!(W, [op!(@Avx512 "kmovw", Gd, Kr), INVALID]),
                grp!(W, [op!(@Avx512 "kmovb", Gd, Kr), INVALID]),
                grp!(W, [op!(@Avx512 "kmovd", Gd, Kr), op!(@Avx512 "kmovq", Gq, Kr)]),
                INVALID,
            ),
            INVALID,
        ]),
        INVALID,
    ]);
    t[0x98] = kop!(128, "kortestw", "kortestq", "kortestb", "kortestd", Kg, Kr);
    t[0x99] = kop!(128, "ktestw", "ktestq", "ktestb", "ktestd", Kg, Kr);

    t[0xAE] = grp!(Reg, VEX_G15);
    t[0xC2] = pp!(
        op!(@Avx "vcmpps", Vx, Hx, Wx, Ib),
        op!(@Avx "vcmppd", Vx, Hx, Wx, Ib),
        op!(@Avx "vcmpsd", Vdq, Hdq, Wq, Ib),
        op!(@Avx "vcmpss", Vdq, Hdq, Wd, Ib),
    );
    t[0xC4] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Avx "vpinsrw", Vdq, Hdq, Ed, Ib),
        op!(@Avx "vpinsrw", Vdq, Hdq, Mw, Ib),
    ]));
    t[0xC5] = v66!("vpextrw", Gd, Udq, Ib);
    t[0xC6] = pp!(op!(@Avx "vshufps", Vx, Hx, Wx, Ib), op!(@Avx "vshufpd", Vx, Hx, Wx, Ib), INVALID, INVALID);

    t[0xD0] = pp!(INVALID, op!(@Avx "vaddsubpd", Vx, Hx, Wx), op!(@Avx "vaddsubps", Vx, Hx, Wx), INVALID);
    t[0xD1] = v66!("vpsrlw", Vx, Hx, Wdq);
    t[0xD2] = v66!("vpsrld", Vx, Hx, Wdq);
    t[0xD3] = v66!("vpsrlq", Vx, Hx, Wdq);
    t[0xD4] = vint!("vpaddq");
    t[0xD5] = vint!("vpmullw");
    t[0xD6] = v66!("vmovq", Wq, Vdq);
    t[0xD7] = v66!("vpmovmskb", Gd, Ux);
    t[0xD8] = vint!("vpsubusb");
    t[0xD9] = vint!("vpsubusw");
    t[0xDA] = vint!("vpminub");
    t[0xDB] = vint!("vpand");
    t[0xDC] = vint!("vpaddusb");
    t[0xDD] = vint!("vpaddusw");
    t[0xDE] = vint!("vpmaxub");
    t[0xDF] = vint!("vpandn");

    t[0xE0] = vint!("vpavgb");
    t[0xE1] = v66!("vpsraw", Vx, Hx, Wdq);
    t[0xE2] = v66!("vpsrad", Vx, Hx, Wdq);
    t[0xE3] = vint!("vpavgw");
    t[0xE4] = vint!("vpmulhuw");
    t[0xE5] = vint!("vpmulhw");
    t[0xE6] = pp!(
        INVALID,
        op!(@Avx "vcvttpd2dq", Vdq, Wx),
        op!(@Avx "vcvtpd2dq", Vdq, Wx),
        op!(@Avx "vcvtdq2pd", Vx, Wh),
    );
    t[0xE7] = v66!("vmovntdq", Mx, Vx);
    t[0xE8] = vint!("vpsubsb");
    t[0xE9] = vint!("vpsubsw");
    t[0xEA] = vint!("vpminsw");
    t[0xEB] = vint!("vpor");
    t[0xEC] = vint!("vpaddsb");
    t[0xED] = vint!("vpaddsw");
    t[0xEE] = vint!("vpmaxsw");
    t[0xEF] = vint!("vpxor");

    t[0xF0] = grp!(SseOnly, F2, op!(@Avx "vlddqu", Vx, Mx));
    t[0xF1] = v66!("vpsllw", Vx, Hx, Wdq);
    t[0xF2] = v66!("vpslld", Vx, Hx, Wdq);
    t[0xF3] = v66!("vpsllq", Vx, Hx, Wdq);
    t[0xF4] = vint!("vpmuludq");
    t[0xF5] = vint!("vpmaddwd");
    t[0xF6] = vint!("vpsadbw");
    t[0xF7] = v66!("vmaskmovdqu", Vdq, Udq);
    t[0xF8] = vint!("vpsubb");
    t[0xF9] = vint!("vpsubw");
    t[0xFA] = vint!("vpsubd");
    t[0xFB] = vint!("vpsubq");
    t[0xFC] = vint!("vpaddb");
    t[0xFD] = vint!("vpaddw");
    t[0xFE] = vint!("vpaddd");
    t
};

const BMI_G17: [OpcodeEntry; 8] = [
    INVALID,
    op!(@Bmi "blsr", By, Ey),
    op!(@Bmi "blsmsk", By, Ey),
    op!(@Bmi "blsi", By, Ey),
    INVALID,
    INVALID,
    INVALID,
    INVALID,
];

#[rustfmt::skip]
const MAP2: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x00] = vint!("vpshufb");
    t[0x01] = vint!("vphaddw");
    t[0x02] = vint!("vphaddd");
    t[0x03] = vint!("vphaddsw");
    t[0x04] = vint!("vpmaddubsw");
    t[0x05] = vint!("vphsubw");
    t[0x06] = vint!("vphsubd");
    t[0x07] = vint!("vphsubsw");
    t[0x08] = vint!("vpsignb");
    t[0x09] = vint!("vpsignw");
    t[0x0A] = vint!("vpsignd");
    t[0x0B] = vint!("vpmulhrsw");
    t[0x0C] = vint!("vpermilps");
    t[0x0D] = vint!("vpermilpd");
    t[0x0E] = v66!("vtestps", Vx, Wx);
    t[0x0F] = v66!("vtestpd", Vx, Wx);
    t[0x13] = v66!(F16c "vcvtph2ps", Vx, Wh);
    t[0x16] = v66!(Avx2 "vpermps", Vx, Hx, Wx);
    t[0x17] = v66!("vptest", Vx, Wx);
    t[0x18] = v66!("vbroadcastss", Vx, Wd);
    t[0x19] = v66!("vbroadcastsd", Vqq, Wq);
    t[0x1A] = v66!("vbroadcastf128", Vqq, Mdq);
    t[0x1C] = v66!("vpabsb", Vx, Wx);
    t[0x1D] = v66!("vpabsw", Vx, Wx);
    t[0x1E] = v66!("vpabsd", Vx, Wx);

    t[0x20] = v66!("vpmovsxbw", Vx, Wh);
    t[0x21] = v66!("vpmovsxbd", Vx, Wd);
    t[0x22] = v66!("vpmovsxbq", Vx, Ww);
    t[0x23] = v66!("vpmovsxwd", Vx, Wh);
    t[0x24] = v66!("vpmovsxwq", Vx, Wd);
    t[0x25] = v66!("vpmovsxdq", Vx, Wh);
    t[0x28] = vint!("vpmuldq");
    t[0x29] = vint!("vpcmpeqq");
    t[0x2A] = v66!("vmovntdqa", Vx, Mx);
    t[0x2B] = vint!("vpackusdw");
    t[0x2C] = v66!("vmaskmovps", Vx, Hx, Mx);
    t[0x2D] = v66!("vmaskmovpd", Vx, Hx, Mx);
    t[0x2E] = v66!("vmaskmovps", Mx, Hx, Vx);
    t[0x2F] = v66!("vmaskmovpd", Mx, Hx, Vx);

    t[0x30] = v66!("vpmovzxbw", Vx, Wh);
    t[0x31] = v66!("vpmovzxbd", Vx, Wd);
    t[0x32] = v66!("vpmovzxbq", Vx, Ww);
    t[0x33] = v66!("vpmovzxwd", Vx, Wh);
    t[0x34] = v66!("vpmovzxwq", Vx, Wd);
    t[0x35] = v66!("vpmovzxdq", Vx, Wh);
    t[0x36] = v66!(Avx2 "vpermd", Vx, Hx, Wx);
    t[0x37] = vint!("vpcmpgtq");
    t[0x38] = vint!("vpminsb");
    t[0x39] = vint!("vpminsd");
    t[0x3A] = vint!("vpminuw");
    t[0x3B] = vint!("vpminud");
    t[0x3C] = vint!("vpmaxsb");
    t[0x3D] = vint!("vpmaxsd");
    t[0x3E] = vint!("vpmaxuw");
    t[0x3F] = vint!("vpmaxud");
    t[0x40] = vint!("vpmulld");
    t[0x41] = v66!("vphminposuw", Vdq, Wdq);
    t[0x45] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vpsrlvd", Vx, Hx, Wx),
        op!(@Avx2 "vpsrlvq", Vx, Hx, Wx),
    ]));
    t[0x46] = v66!(Avx2 "vpsravd", Vx, Hx, Wx);
    t[0x47] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vpsllvd", Vx, Hx, Wx),
        op!(@Avx2 "vpsllvq", Vx, Hx, Wx),
    ]));
    t[0x58] = v66!(Avx2 "vpbroadcastd", Vx, Wd);
    t[0x59] = v66!(Avx2 "vpbroadcastq", Vx, Wq);
    t[0x5A] = v66!(Avx2 "vbroadcasti128", Vqq, Mdq);
    t[0x78] = v66!(Avx2 "vpbroadcastb", Vx, Wb);
    t[0x79] = v66!(Avx2 "vpbroadcastw", Vx, Ww);
    t[0x8C] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vpmaskmovd", Vx, Hx, Mx),
        op!(@Avx2 "vpmaskmovq", Vx, Hx, Mx),
    ]));
    t[0x8E] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vpmaskmovd", Mx, Hx, Vx),
        op!(@Avx2 "vpmaskmovq", Mx, Hx, Vx),
    ]));

    t[0x90] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vpgatherdd", Vx, Vsib, Hx),
        op!(@Avx2 "vpgatherdq", Vx, Vsib, Hx),
    ]));
    t[0x91] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vpgatherqd", Vx, Vsib, Hx),
        op!(@Avx2 "vpgatherqq", Vx, Vsib, Hx),
    ]));
    t[0x92] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vgatherdps", Vx, Vsib, Hx),
        op!(@Avx2 "vgatherdpd", Vx, Vsib, Hx),
    ]));
    t[0x93] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx2 "vgatherqps", Vx, Vsib, Hx),
        op!(@Avx2 "vgatherqpd", Vx, Vsib, Hx),
    ]));

    t[0x96] = fma_packed!("vfmaddsub132ps", "vfmaddsub132pd");
    t[0x97] = fma_packed!("vfmsubadd132ps", "vfmsubadd132pd");
    t[0x98] = fma_packed!("vfmadd132ps", "vfmadd132pd");
    t[0x99] = fma_scalar!("vfmadd132ss", "vfmadd132sd");
    t[0x9A] = fma_packed!("vfmsub132ps", "vfmsub132pd");
    t[0x9B] = fma_scalar!("vfmsub132ss", "vfmsub132sd");
    t[0x9C] = fma_packed!("vfnmadd132ps", "vfnmadd132pd");
    t[0x9D] = fma_scalar!("vfnmadd132ss", "vfnmadd132sd");
    t[0x9E] = fma_packed!("vfnmsub132ps", "vfnmsub132pd");
    t[0x9F] = fma_scalar!("vfnmsub132ss", "vfnmsub132sd");
    t[0xA6] = fma_packed!("vfmaddsub213ps", "vfmaddsub213pd");
    t[0xA7] = fma_packed!("vfmsubadd213ps", "vfmsubadd213pd");
    t[0xA8] = fma_packed!("vfmadd213ps", "vfmadd213pd");
    t[0xA9] = fma_scalar!("vfmadd213ss", "vfmadd213sd");
    t[0xAA] = fma_packed!("vfmsub213ps", "vfmsub213pd");
    t[0xAB] = fma_scalar!("vfmsub213ss", "vfmsub213sd");
    t[0xAC] = fma_packed!("vfnmadd213ps", "vfnmadd213pd");
    t[0xAD] = fma_scalar!("vfnmadd213ss", "vfnmadd213sd");
    t[0xAE] = fma_packed!("vfnmsub213ps", "vfnmsub213pd");
    t[0xAF] = fma_scalar!("vfnmsub213ss", "vfnmsub213sd");
    t[0xB6] = fma_packed!("vfmaddsub231ps", "vfmaddsub231pd");
    t[0xB7] = fma_packed!("vfmsubadd231ps", "vfmsubadd231pd");
    t[0xB8] = fma_packed!("vfmadd231ps", "vfmadd231pd");
    t[0xB9] = fma_scalar!("vfmadd231ss", "vfmadd231sd");
    t[0xBA] = fma_packed!("vfmsub231ps", "vfmsub231pd");
    t[0xBB] = fma_scalar!("vfmsub231ss", "vfmsub231sd");
    t[0xBC] = fma_packed!("vfnmadd231ps", "vfnmadd231pd");
    t[0xBD] = fma_scalar!("vfnmadd231ss", "vfnmadd231sd");
    t[0xBE] = fma_packed!("vfnmsub231ps", "vfnmsub231pd");
    t[0xBF] = fma_scalar!("vfnmsub231ss", "vfnmsub231sd");

    t[0xDB] = v66!(Aes "vaesimc", Vdq, Wdq);
    t[0xDC] = v66!(Aes "vaesenc", Vx, Hx, Wx);
    t[0xDD] = v66!(Aes "vaesenclast", Vx, Hx, Wx);
    t[0xDE] = v66!(Aes "vaesdec", Vx, Hx, Wx);
    t[0xDF] = v66!(Aes "vaesdeclast", Vx, Hx, Wx);

    t[0xF2] = grp!(SseOnly, None, op!(@Bmi "andn", Gy, By, Ey));
    t[0xF3] = grp!(SseOnly, None, grp!(Reg, BMI_G17));
    t[0xF5] = pp!(
        op!(@Bmi "bzhi", Gy, Ey, By),
        INVALID,
        op!(@Bmi "pdep", Gy, By, Ey),
        op!(@Bmi "pext", Gy, By, Ey),
    );
    t[0xF6] = grp!(SseOnly, F2, op!(@Bmi "mulx", Gy, By, Ey));
    t[0xF7] = pp!(
        op!(@Bmi "bextr", Gy, Ey, By),
        op!(@Bmi "shlx", Gy, Ey, By),
        op!(@Bmi "shrx", Gy, Ey, By),
        op!(@Bmi "sarx", Gy, Ey, By),
    );
    t
};

#[rustfmt::skip]
const MAP3: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x00] = v66!(Avx2 "vpermq", Vx, Wx, Ib);
    t[0x01] = v66!(Avx2 "vpermpd", Vx, Wx, Ib);
    t[0x02] = v66!(Avx2 "vpblendd", Vx, Hx, Wx, Ib);
    t[0x04] = v66!("vpermilps", Vx, Wx, Ib);
    t[0x05] = v66!("vpermilpd", Vx, Wx, Ib);
    t[0x06] = v66!("vperm2f128", Vx, Hx, Wx, Ib);
    t[0x08] = v66!("vroundps", Vx, Wx, Ib);
    t[0x09] = v66!("vroundpd", Vx, Wx, Ib);
    t[0x0A] = v66!("vroundss", Vdq, Hdq, Wd, Ib);
    t[0x0B] = v66!("vroundsd", Vdq, Hdq, Wq, Ib);
    t[0x0C] = v66!("vblendps", Vx, Hx, Wx, Ib);
    t[0x0D] = v66!("vblendpd", Vx, Hx, Wx, Ib);
    t[0x0E] = v66!("vpblendw", Vx, Hx, Wx, Ib);
    t[0x0F] = v66!("vpalignr", Vx, Hx, Wx, Ib);

    t[0x14] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Avx "vpextrb", Ed, Vdq, Ib),
        op!(@Avx "vpextrb", Mb, Vdq, Ib),
    ]));
    t[0x15] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Avx "vpextrw", Ed, Vdq, Ib),
        op!(@Avx "vpextrw", Mw, Vdq, Ib),
    ]));
    t[0x16] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx "vpextrd", Ed, Vdq, Ib),
        op!(@Avx "vpextrq", Eq, Vdq, Ib),
    ]));
    t[0x17] = v66!("vextractps", Ed, Vdq, Ib);
    t[0x18] = v66!("vinsertf128", Vx, Hx, Wdq, Ib);
    t[0x19] = v66!("vextractf128", Wdq, Vx, Ib);
    t[0x1D] = v66!(F16c "vcvtps2ph", Wh, Vx, Ib);
    t[0x20] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Avx "vpinsrb", Vdq, Hdq, Ed, Ib),
        op!(@Avx "vpinsrb", Vdq, Hdq, Mb, Ib),
    ]));
    t[0x21] = v66!("vinsertps", Vdq, Hdq, Wd, Ib);
    t[0x22] = grp!(SseOnly, P66, grp!(W, [
        op!(@Avx "vpinsrd", Vdq, Hdq, Ed, Ib),
        op!(@Avx "vpinsrq", Vdq, Hdq, Eq, Ib),
    ]));
    t[0x38] = v66!(Avx2 "vinserti128", Vx, Hx, Wdq, Ib);
    t[0x39] = v66!(Avx2 "vextracti128", Wdq, Vx, Ib);

    t[0x40] = v66!("vdpps", Vx, Hx, Wx, Ib);
    t[0x41] = v66!("vdppd", Vdq, Hdq, Wdq, Ib);
    t[0x42] = v66!("vmpsadbw", Vx, Hx, Wx, Ib);
    t[0x44] = v66!(Pclmul "vpclmulqdq", Vdq, Hdq, Wdq, Ib);
    t[0x46] = v66!(Avx2 "vperm2i128", Vx, Hx, Wx, Ib);
    t[0x4A] = v66!("vblendvps", Vx, Hx, Wx, Lx);
    t[0x4B] = v66!("vblendvpd", Vx, Hx, Wx, Lx);
    t[0x4C] = v66!("vpblendvb", Vx, Hx, Wx, Lx);
    t[0x60] = v66!("vpcmpestrm", Vdq, Wdq, Ib);
    t[0x61] = v66!("vpcmpestri", Vdq, Wdq, Ib);
    t[0x62] = v66!("vpcmpistrm", Vdq, Wdq, Ib);
    t[0x63] = v66!("vpcmpistri", Vdq, Wdq, Ib);
    t[0xDF] = v66!(Aes "vaeskeygenassist", Vdq, Wdq, Ib);
    t[0xF0] = grp!(SseOnly, F2, op!(@Bmi "rorx", Gy, Ey, Ib));
    t
};

pub(crate) static VEX_0F: [OpcodeEntry; 256] = MAP1;
pub(crate) static VEX_0F38: [OpcodeEntry; 256] = MAP2;
pub(crate) static VEX_0F3A: [OpcodeEntry; 256] = MAP3;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::tables::Group;

    #[test]
    fn test_map1_vmovups_column() {
        match VEX_0F[0x10] {
            OpcodeEntry::Group(Group::Sse(cols)) => {
                assert!(matches!(cols[0], OpcodeEntry::Insn(info) if info.intel == "vmovups"));
            }
            _ => panic!("VEX 0F 10 is not a prefix group"),
        }
    }

    #[test]
    fn test_gathers_split_on_w() {
        match VEX_0F38[0x92] {
            OpcodeEntry::Group(Group::SseOnly(_, OpcodeEntry::Group(Group::W(cols)))) => {
                assert!(matches!(cols[1], OpcodeEntry::Insn(info) if info.intel == "vgatherdpd"));
            }
            _ => panic!("VEX 0F 38 92 is not a W group"),
        }
    }
}
