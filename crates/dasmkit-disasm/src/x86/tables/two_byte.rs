//! Two-byte (0F) opcode map.

use super::{OpcodeEntry, INVALID};

/// Mandatory-prefix group, `[none, 66, F2, F3]`.
macro_rules! sse {
    ($none:expr, $p66:expr, $f2:expr, $f3:expr $(,)?) => {
        grp!(Sse, [$none, $p66, $f2, $f3])
    };
}

/// MMX instruction with an SSE2 twin under 66.
macro_rules! mmx_sse {
    ($name:literal) => {
        sse!(op!(@Mmx $name, Pq, Qq), op!(@Sse2 $name, Vdq, Wdq), INVALID, INVALID)
    };
    ($name:literal, low) => {
        sse!(op!(@Mmx $name, Pq, Qd), op!(@Sse2 $name, Vdq, Wdq), INVALID, INVALID)
    };
}

/// Packed single, packed double, scalar double, scalar single.
macro_rules! fp_arith {
    ($ps:literal, $pd:literal, $sd:literal, $ss:literal) => {
        sse!(
            op!(@Sse $ps, Vx, Wx),
            op!(@Sse2 $pd, Vx, Wx),
            op!(@Sse2 $sd, Vdq, Wq),
            op!(@Sse $ss, Vdq, Wd),
        )
    };
    ($ps:literal, $pd:literal) => {
        sse!(op!(@Sse $ps, Vx, Wx), op!(@Sse2 $pd, Vx, Wx), INVALID, INVALID)
    };
}

/// MMX/SSE2 shift by immediate, register forms only.
macro_rules! shift_imm {
    ($name:literal) => {
        grp!(Mod, [sse!(op!(@Mmx $name, Nq, Ib), op!(@Sse2 $name, Udq, Ib), INVALID, INVALID), INVALID])
    };
}

const G6: [OpcodeEntry; 8] = [
    op!(@System "sldt", Ew),
    op!(@System "str", Ew),
    op!(@System "lldt", Ew),
    op!(@System "ltr", Ew),
    op!(@System "verr", Ew),
    op!(@System "verw", Ew),
    INVALID,
    INVALID,
];

const G7_VMX: [OpcodeEntry; 8] = [
    INVALID,
    op!(@System "vmcall"),
    op!(@System "vmlaunch"),
    op!(@System "vmresume"),
    op!(@System "vmxoff"),
    INVALID,
    INVALID,
    INVALID,
];

const G7_MONITOR: [OpcodeEntry; 8] = [
    op!(@Sse3 "monitor"),
    op!(@Sse3 "mwait"),
    op!(@System "clac"),
    op!(@System "stac"),
    INVALID,
    INVALID,
    INVALID,
    INVALID,
];

const G7_XCR: [OpcodeEntry; 8] = [
    op!(@System "xgetbv"),
    op!(@System "xsetbv"),
    INVALID,
    INVALID,
    op!(@System "vmfunc"),
    op!("xend"),
    op!("xtest"),
    INVALID,
];

const G7_SVM: [OpcodeEntry; 8] = [
    op!(@System "vmrun"),
    op!(@System "vmmcall"),
    op!(@System "vmload"),
    op!(@System "vmsave"),
    op!(@System "stgi"),
    op!(@System "clgi"),
    op!(@System "skinit"),
    op!(@System "invlpga"),
];

const G7_SWAPGS: [OpcodeEntry; 8] = [
    grp!(LongMode, [INVALID, op!(@System "swapgs")]),
    op!("rdtscp"),
    op!("monitorx"),
    op!("mwaitx"),
    op!("clzero"),
    INVALID,
    INVALID,
    INVALID,
];

const G7: [OpcodeEntry; 8] = [
    grp!(Mod, [grp!(Rm, G7_VMX), op!(@System "sgdt", M)]),
    grp!(Mod, [grp!(Rm, G7_MONITOR), op!(@System "sidt", M)]),
    grp!(Mod, [grp!(Rm, G7_XCR), op!(@System "lgdt", M)]),
    grp!(Mod, [grp!(Rm, G7_SVM), op!(@System "lidt", M)]),
    op!(@System "smsw", Ew),
    INVALID,
    op!(@System "lmsw", Ew),
    grp!(Mod, [grp!(Rm, G7_SWAPGS), op!(@System "invlpg", Mb)]),
];

const PREFETCH_3DNOW: [OpcodeEntry; 8] = [
    op!(@Now3d "prefetch", Mb),
    op!(@Now3d "prefetchw", Mb),
    op!("prefetchwt1", Mb),
    op!(@Now3d "prefetch", Mb),
    op!(@Now3d "prefetch", Mb),
    op!(@Now3d "prefetch", Mb),
    op!(@Now3d "prefetch", Mb),
    op!(@Now3d "prefetch", Mb),
];

const G16: [OpcodeEntry; 8] = [
    op!(@Sse "prefetchnta", Mb),
    op!(@Sse "prefetcht0", Mb),
    op!(@Sse "prefetcht1", Mb),
    op!(@Sse "prefetcht2", Mb),
    op!(V "nop", Ev),
    op!(V "nop", Ev),
    op!(V "nop", Ev),
    op!(V "nop", Ev),
];

const G12: [OpcodeEntry; 8] = [
    INVALID,
    INVALID,
    shift_imm!("psrlw"),
    INVALID,
    shift_imm!("psraw"),
    INVALID,
    shift_imm!("psllw"),
    INVALID,
];

const G13: [OpcodeEntry; 8] = [
    INVALID,
    INVALID,
    shift_imm!("psrld"),
    INVALID,
    shift_imm!("psrad"),
    INVALID,
    shift_imm!("pslld"),
    INVALID,
];

const G14: [OpcodeEntry; 8] = [
    INVALID,
    INVALID,
    shift_imm!("psrlq"),
    grp!(Mod, [grp!(SseOnly, P66, op!(@Sse2 "psrldq", Udq, Ib)), INVALID]),
    INVALID,
    INVALID,
    shift_imm!("psllq"),
    grp!(Mod, [grp!(SseOnly, P66, op!(@Sse2 "pslldq", Udq, Ib)), INVALID]),
];

const G15: [OpcodeEntry; 8] = [
    grp!(Mod, [grp!(SseOnly, F3, op!("rdfsbase", Ry)), op!("fxsave", M)]),
    grp!(Mod, [grp!(SseOnly, F3, op!("rdgsbase", Ry)), op!("fxrstor", M)]),
    grp!(Mod, [grp!(SseOnly, F3, op!("wrfsbase", Ry)), op!(@Sse "ldmxcsr", Md)]),
    grp!(Mod, [grp!(SseOnly, F3, op!("wrgsbase", Ry)), op!(@Sse "stmxcsr", Md)]),
    grp!(Mod, [INVALID, op!("xsave", M)]),
    grp!(Mod, [op!(@Sse2 "lfence"), op!("xrstor", M)]),
    grp!(Mod, [op!(@Sse2 "mfence"), op!("xsaveopt", M)]),
    grp!(Mod, [op!(@Sse "sfence"), op!(@Sse2 "clflush", Mb)]),
];

const G8: [OpcodeEntry; 8] = [
    INVALID,
    INVALID,
    INVALID,
    INVALID,
    op!(V "bt", Ev, Ib),
    op!(V "bts", Ev, Ib),
    op!(V "btr", Ev, Ib),
    op!(V "btc", Ev, Ib),
];

const G9: [OpcodeEntry; 8] = [
    INVALID,
    grp!(Mod, [INVALID, grp!(W, [op!("cmpxchg8b", Mq), op!("cmpxchg16b", Mdq)])]),
    INVALID,
    INVALID,
    INVALID,
    INVALID,
    grp!(
        Mod,
        [
            op!(V "rdrand", Ev),
            sse!(op!(@System "vmptrld", Mq), op!(@System "vmclear", Mq), INVALID, op!(@System "vmxon", Mq)),
        ]
    ),
    grp!(Mod, [op!(V "rdseed", Ev), op!(@System "vmptrst", Mq)]),
];

#[rustfmt::skip]
const TWO_BYTE_MAP: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x00] = grp!(Reg, G6);
    t[0x01] = grp!(Reg, G7);
    t[0x02] = op!(@System V "lar", Gv, Ew);
    t[0x03] = op!(@System V "lsl", Gv, Ew);
    t[0x05] = op!(@System "syscall");
    t[0x06] = op!(@System "clts");
    t[0x07] = op!(@System "sysret");
    t[0x08] = op!(@System "invd");
    t[0x09] = op!(@System "wbinvd");
    t[0x0B] = op!("ud2");
    t[0x0D] = grp!(Reg, PREFETCH_3DNOW);
    t[0x0E] = op!(@Now3d "femms");
    t[0x0F] = grp!(Now3d);

    t[0x10] = sse!(
        op!(@Sse "movups", Vx, Wx),
        op!(@Sse2 "movupd", Vx, Wx),
        op!(@Sse2 "movsd", Vdq, Wq),
        op!(@Sse "movss", Vdq, Wd),
    );
    t[0x11] = sse!(
        op!(@Sse "movups", Wx, Vx),
        op!(@Sse2 "movupd", Wx, Vx),
        op!(@Sse2 "movsd", Wq, Vdq),
        op!(@Sse "movss", Wd, Vdq),
    );
    t[0x12] = sse!(
        grp!(Mod, [op!(@Sse "movhlps", Vdq, Udq), op!(@Sse "movlps", Vdq, Mq)]),
        op!(@Sse2 "movlpd", Vdq, Mq),
        op!(@Sse3 "movddup", Vdq, Wq),
        op!(@Sse3 "movsldup", Vdq, Wdq),
    );
    t[0x13] = sse!(op!(@Sse "movlps", Mq, Vdq), op!(@Sse2 "movlpd", Mq, Vdq), INVALID, INVALID);
    t[0x14] = fp_arith!("unpcklps", "unpcklpd");
    t[0x15] = fp_arith!("unpckhps", "unpckhpd");
    t[0x16] = sse!(
        grp!(Mod, [op!(@Sse "movlhps", Vdq, Udq), op!(@Sse "movhps", Vdq, Mq)]),
        op!(@Sse2 "movhpd", Vdq, Mq),
        INVALID,
        op!(@Sse3 "movshdup", Vdq, Wdq),
    );
    t[0x17] = sse!(op!(@Sse "movhps", Mq, Vdq), op!(@Sse2 "movhpd", Mq, Vdq), INVALID, INVALID);
    t[0x18] = grp!(Reg, G16);
    let mut i = 0x19;
    while i < 0x20 {
        t[i] = op!(V "nop", Ev);
        i += 1;
    }

    t[0x20] = op!(@System "mov", Ry, Cr);
    t[0x21] = op!(@System "mov", Ry, Dr);
    t[0x22] = op!(@System "mov", Cr, Ry);
    t[0x23] = op!(@System "mov", Dr, Ry);
    t[0x28] = sse!(op!(@Sse "movaps", Vx, Wx), op!(@Sse2 "movapd", Vx, Wx), INVALID, INVALID);
    t[0x29] = sse!(op!(@Sse "movaps", Wx, Vx), op!(@Sse2 "movapd", Wx, Vx), INVALID, INVALID);
    t[0x2A] = sse!(
        op!(@Sse "cvtpi2ps", Vdq, Qq),
        op!(@Sse2 "cvtpi2pd", Vdq, Qq),
        op!(@Sse2 Y "cvtsi2sd", Vdq, Ey),
        op!(@Sse Y "cvtsi2ss", Vdq, Ey),
    );
    t[0x2B] = sse!(op!(@Sse "movntps", Mx, Vx), op!(@Sse2 "movntpd", Mx, Vx), INVALID, INVALID);
    t[0x2C] = sse!(
        op!(@Sse "cvttps2pi", Pq, Wq),
        op!(@Sse2 "cvttpd2pi", Pq, Wdq),
        op!(@Sse2 "cvttsd2si", Gy, Wq),
        op!(@Sse "cvttss2si", Gy, Wd),
    );
    t[0x2D] = sse!(
        op!(@Sse "cvtps2pi", Pq, Wq),
        op!(@Sse2 "cvtpd2pi", Pq, Wdq),
        op!(@Sse2 "cvtsd2si", Gy, Wq),
        op!(@Sse "cvtss2si", Gy, Wd),
    );
    t[0x2E] = sse!(op!(@Sse "ucomiss", Vdq, Wd), op!(@Sse2 "ucomisd", Vdq, Wq), INVALID, INVALID);
    t[0x2F] = sse!(op!(@Sse "comiss", Vdq, Wd), op!(@Sse2 "comisd", Vdq, Wq), INVALID, INVALID);

    t[0x30] = op!(@System "wrmsr");
    t[0x31] = op!("rdtsc");
    t[0x32] = op!(@System "rdmsr");
    t[0x33] = op!("rdpmc");
    t[0x34] = op!(@System "sysenter");
    t[0x35] = op!(@System "sysexit");
    t[0x37] = op!(@System "getsec");

    t[0x40] = op!(V "cmovo", Gv, Ev);
    t[0x41] = op!(V "cmovno", Gv, Ev);
    t[0x42] = op!(V "cmovb", Gv, Ev);
    t[0x43] = op!(V "cmovnb", Gv, Ev);
    t[0x44] = op!(V "cmovz", Gv, Ev);
    t[0x45] = op!(V "cmovnz", Gv, Ev);
    t[0x46] = op!(V "cmovbe", Gv, Ev);
    t[0x47] = op!(V "cmovnbe", Gv, Ev);
    t[0x48] = op!(V "cmovs", Gv, Ev);
    t[0x49] = op!(V "cmovns", Gv, Ev);
    t[0x4A] = op!(V "cmovp", Gv, Ev);
    t[0x4B] = op!(V "cmovnp", Gv, Ev);
    t[0x4C] = op!(V "cmovl", Gv, Ev);
    t[0x4D] = op!(V "cmovnl", Gv, Ev);
    t[0x4E] = op!(V "cmovle", Gv, Ev);
    t[0x4F] = op!(V "cmovnle", Gv, Ev);

    t[0x50] = sse!(op!(@Sse "movmskps", Gd, Ux), op!(@Sse2 "movmskpd", Gd, Ux), INVALID, INVALID);
    t[0x51] = fp_arith!("sqrtps", "sqrtpd", "sqrtsd", "sqrtss");
    t[0x52] = sse!(op!(@Sse "rsqrtps", Vx, Wx), INVALID, INVALID, op!(@Sse "rsqrtss", Vdq, Wd));
    t[0x53] = sse!(op!(@Sse "rcpps", Vx, Wx), INVALID, INVALID, op!(@Sse "rcpss", Vdq, Wd));
    t[0x54] = fp_arith!("andps", "andpd");
    t[0x55] = fp_arith!("andnps", "andnpd");
    t[0x56] = fp_arith!("orps", "orpd");
    t[0x57] = fp_arith!("xorps", "xorpd");
    t[0x58] = fp_arith!("addps", "addpd", "addsd", "addss");
    t[0x59] = fp_arith!("mulps", "mulpd", "mulsd", "mulss");
    t[0x5A] = sse!(
        op!(@Sse2 "cvtps2pd", Vdq, Wq),
        op!(@Sse2 "cvtpd2ps", Vdq, Wdq),
        op!(@Sse2 "cvtsd2ss", Vdq, Wq),
        op!(@Sse2 "cvtss2sd", Vdq, Wd),
    );
    t[0x5B] = sse!(
        op!(@Sse2 "cvtdq2ps", Vx, Wx),
        op!(@Sse2 "cvtps2dq", Vx, Wx),
        INVALID,
        op!(@Sse2 "cvttps2dq", Vx, Wx),
    );
    t[0x5C] = fp_arith!("subps", "subpd", "subsd", "subss");
    t[0x5D] = fp_arith!("minps", "minpd", "minsd", "minss");
    t[0x5E] = fp_arith!("divps", "divpd", "divsd", "divss");
    t[0x5F] = fp_arith!("maxps", "maxpd", "maxsd", "maxss");

    t[0x60] = mmx_sse!("punpcklbw", low);
    t[0x61] = mmx_sse!("punpcklwd", low);
    t[0x62] = mmx_sse!("punpckldq", low);
    t[0x63] = mmx_sse!("packsswb");
    t[0x64] = mmx_sse!("pcmpgtb");
    t[0x65] = mmx_sse!("pcmpgtw");
    t[0x66] = mmx_sse!("pcmpgtd");
    t[0x67] = mmx_sse!("packuswb");
    t[0x68] = mmx_sse!("punpckhbw");
    t[0x69] = mmx_sse!("punpckhwd");
    t[0x6A] = mmx_sse!("punpckhdq");
    t[0x6B] = mmx_sse!("packssdw");
    t[0x6C] = grp!(SseOnly, P66, op!(@Sse2 "punpcklqdq", Vdq, Wdq));
    t[0x6D] = grp!(SseOnly, P66, op!(@Sse2 "punpckhqdq", Vdq, Wdq));
    t[0x6E] = sse!(
        grp!(W, [op!(@Mmx "movd", Pq, Ed), op!(@Mmx "movq", Pq, Eq)]),
        grp!(W, [op!(@Sse2 "movd", Vdq, Ed), op!(@Sse2 "movq", Vdq, Eq)]),
        INVALID,
        INVALID,
    );
    t[0x6F] = sse!(
        op!(@Mmx "movq", Pq, Qq),
        op!(@Sse2 "movdqa", Vdq, Wdq),
        INVALID,
        op!(@Sse2 "movdqu", Vdq, Wdq),
    );

    t[0x70] = sse!(
        op!(@Sse "pshufw", Pq, Qq, Ib),
        op!(@Sse2 "pshufd", Vdq, Wdq, Ib),
        op!(@Sse2 "pshuflw", Vdq, Wdq, Ib),
        op!(@Sse2 "pshufhw", Vdq, Wdq, Ib),
    );
    t[0x71] = grp!(Reg, G12);
    t[0x72] = grp!(Reg, G13);
    t[0x73] = grp!(Reg, G14);
    t[0x74] = mmx_sse!("pcmpeqb");
    t[0x75] = mmx_sse!("pcmpeqw");
    t[0x76] = mmx_sse!("pcmpeqd");
    t[0x77] = op!(@Mmx "emms");
    t[0x78] = op!(@System "vmread", Ey, Gy);
    t[0x79] = op!(@System "vmwrite", Gy, Ey);
    t[0x7C] = sse!(INVALID, op!(@Sse3 "haddpd", Vdq, Wdq), op!(@Sse3 "haddps", Vdq, Wdq), INVALID);
    t[0x7D] = sse!(INVALID, op!(@Sse3 "hsubpd", Vdq, Wdq), op!(@Sse3 "hsubps", Vdq, Wdq), INVALID);
    t[0x7E] = sse!(
        grp!(W, [op!(@Mmx "movd", Ed, Pq), op!(@Mmx "movq", Eq, Pq)]),
        grp!(W, [op!(@Sse2 "movd", Ed, Vdq), op!(@Sse2 "movq", Eq, Vdq)]),
        INVALID,
        op!(@Sse2 "movq", Vdq, Wq),
    );
    t[0x7F] = sse!(
        op!(@Mmx "movq", Qq, Pq),
        op!(@Sse2 "movdqa", Wdq, Vdq),
        INVALID,
        op!(@Sse2 "movdqu", Wdq, Vdq),
    );

    t[0x80] = op!("jo", Jz);
    t[0x81] = op!("jno", Jz);
    t[0x82] = op!("jb", Jz);
    t[0x83] = op!("jnb", Jz);
    t[0x84] = op!("jz", Jz);
    t[0x85] = op!("jnz", Jz);
    t[0x86] = op!("jbe", Jz);
    t[0x87] = op!("jnbe", Jz);
    t[0x88] = op!("js", Jz);
    t[0x89] = op!("jns", Jz);
    t[0x8A] = op!("jp", Jz);
    t[0x8B] = op!("jnp", Jz);
    t[0x8C] = op!("jl", Jz);
    t[0x8D] = op!("jnl", Jz);
    t[0x8E] = op!("jle", Jz);
    t[0x8F] = op!("jnle", Jz);

    t[0x90] = op!("seto", Eb);
    t[0x91] = op!("setno", Eb);
    t[0x92] = op!("setb", Eb);
    t[0x93] = op!("setnb", Eb);
    t[0x94] = op!("setz", Eb);
    t[0x95] = op!("setnz", Eb);
    t[0x96] = op!("setbe", Eb);
    t[0x97] = op!("setnbe", Eb);
    t[0x98] = op!("sets", Eb);
    t[0x99] = op!("setns", Eb);
    t[0x9A] = op!("setp", Eb);
    t[0x9B] = op!("setnp", Eb);
    t[0x9C] = op!("setl", Eb);
    t[0x9D] = op!("setnl", Eb);
    t[0x9E] = op!("setle", Eb);
    t[0x9F] = op!("setnle", Eb);

    t[0xA0] = op!(S "push", SegFs);
    t[0xA1] = op!(S "pop", SegFs);
    t[0xA2] = op!("cpuid");
    t[0xA3] = op!(V "bt", Ev, Gv);
    t[0xA4] = op!(V "shld", Ev, Gv, Ib);
    t[0xA5] = op!(V "shld", Ev, Gv, Cl);
    t[0xA8] = op!(S "push", SegGs);
    t[0xA9] = op!(S "pop", SegGs);
    t[0xAA] = op!(@System "rsm");
    t[0xAB] = op!(V "bts", Ev, Gv);
    t[0xAC] = op!(V "shrd", Ev, Gv, Ib);
    t[0xAD] = op!(V "shrd", Ev, Gv, Cl);
    t[0xAE] = grp!(Reg, G15);
    t[0xAF] = op!(V "imul", Gv, Ev);

    t[0xB0] = op!(B "cmpxchg", Eb, Gb);
    t[0xB1] = op!(V "cmpxchg", Ev, Gv);
    t[0xB2] = op!(V "lss", Gv, Mp);
    t[0xB3] = op!(V "btr", Ev, Gv);
    t[0xB4] = op!(V "lfs", Gv, Mp);
    t[0xB5] = op!(V "lgs", Gv, Mp);
    t[0xB6] = op!(V "movzx" / "movzb", Gv, Eb);
    t[0xB7] = op!(V "movzx" / "movzw", Gv, Ew);
    t[0xB8] = grp!(SseOnly, F3, op!(V "popcnt", Gv, Ev));
    t[0xB9] = op!("ud1", Gv, Ev);
    t[0xBA] = grp!(Reg, G8);
    t[0xBB] = op!(V "btc", Ev, Gv);
    t[0xBC] = sse!(op!(V "bsf", Gv, Ev), op!(V "bsf", Gv, Ev), op!(V "bsf", Gv, Ev), op!(@Bmi V "tzcnt", Gv, Ev));
    t[0xBD] = sse!(op!(V "bsr", Gv, Ev), op!(V "bsr", Gv, Ev), op!(V "bsr", Gv, Ev), op!(@Bmi V "lzcnt", Gv, Ev));
    t[0xBE] = op!(V "movsx" / "movsb", Gv, Eb);
    t[0xBF] = op!(V "movsx" / "movsw", Gv, Ew);

    t[0xC0] = op!(B "xadd", Eb, Gb);
    t[0xC1] = op!(V "xadd", Ev, Gv);
    t[0xC2] = sse!(
        op!(@Sse "cmpps", Vx, Wx, Ib),
        op!(@Sse2 "cmppd", Vx, Wx, Ib),
        op!(@Sse2 "cmpsd", Vdq, Wq, Ib),
        op!(@Sse "cmpss", Vdq, Wd, Ib),
    );
    t[0xC3] = op!(@Sse2 Y "movnti", Ey, Gy);
    t[0xC4] = sse!(
        grp!(Mod, [op!(@Sse "pinsrw", Pq, Ed, Ib), op!(@Sse "pinsrw", Pq, Mw, Ib)]),
        grp!(Mod, [op!(@Sse2 "pinsrw", Vdq, Ed, Ib), op!(@Sse2 "pinsrw", Vdq, Mw, Ib)]),
        INVALID,
        INVALID,
    );
    t[0xC5] = sse!(op!(@Sse "pextrw", Gd, Nq, Ib), op!(@Sse2 "pextrw", Gd, Udq, Ib), INVALID, INVALID);
    t[0xC6] = sse!(op!(@Sse "shufps", Vx, Wx, Ib), op!(@Sse2 "shufpd", Vx, Wx, Ib), INVALID, INVALID);
    t[0xC7] = grp!(Reg, G9);
    i = 0xC8;
    while i < 0xD0 {
        t[i] = op!("bswap", Zy);
        i += 1;
    }

    t[0xD0] = sse!(INVALID, op!(@Sse3 "addsubpd", Vdq, Wdq), op!(@Sse3 "addsubps", Vdq, Wdq), INVALID);
    t[0xD1] = mmx_sse!("psrlw");
    t[0xD2] = mmx_sse!("psrld");
    t[0xD3] = mmx_sse!("psrlq");
    t[0xD4] = mmx_sse!("paddq");
    t[0xD5] = mmx_sse!("pmullw");
    t[0xD6] = sse!(
        INVALID,
        op!(@Sse2 "movq", Wq, Vdq),
        op!(@Sse2 "movdq2q", Pq, Udq),
        op!(@Sse2 "movq2dq", Vdq, Nq),
    );
    t[0xD7] = sse!(op!(@Sse "pmovmskb", Gd, Nq), op!(@Sse2 "pmovmskb", Gd, Udq), INVALID, INVALID);
    t[0xD8] = mmx_sse!("psubusb");
    t[0xD9] = mmx_sse!("psubusw");
    t[0xDA] = mmx_sse!("pminub");
    t[0xDB] = mmx_sse!("pand");
    t[0xDC] = mmx_sse!("paddusb");
    t[0xDD] = mmx_sse!("paddusw");
    t[0xDE] = mmx_sse!("pmaxub");
    t[0xDF] = mmx_sse!("pandn");

    t[0xE0] = mmx_sse!("pavgb");
    t[0xE1] = mmx_sse!("psraw");
    t[0xE2] = mmx_sse!("psrad");
    t[0xE3] = mmx_sse!("pavgw");
    t[0xE4] = mmx_sse!("pmulhuw");
    t[0xE5] = mmx_sse!("pmulhw");
    t[0xE6] = sse!(
        INVALID,
        op!(@Sse2 "cvttpd2dq", Vdq, Wdq),
        op!(@Sse2 "cvtpd2dq", Vdq, Wdq),
        op!(@Sse2 "cvtdq2pd", Vdq, Wq),
    );
    t[0xE7] = sse!(op!(@Sse "movntq", Mq, Pq), op!(@Sse2 "movntdq", Mdq, Vdq), INVALID, INVALID);
    t[0xE8] = mmx_sse!("psubsb");
    t[0xE9] = mmx_sse!("psubsw");
    t[0xEA] = mmx_sse!("pminsw");
    t[0xEB] = mmx_sse!("por");
    t[0xEC] = mmx_sse!("paddsb");
    t[0xED] = mmx_sse!("paddsw");
    t[0xEE] = mmx_sse!("pmaxsw");
    t[0xEF] = mmx_sse!("pxor");

    t[0xF0] = grp!(SseOnly, F2, op!(@Sse3 "lddqu", Vdq, Mdq));
    t[0xF1] = mmx_sse!("psllw");
    t[0xF2] = mmx_sse!("pslld");
    t[0xF3] = mmx_sse!("psllq");
    t[0xF4] = mmx_sse!("pmuludq");
    t[0xF5] = mmx_sse!("pmaddwd");
    t[0xF6] = mmx_sse!("psadbw");
    t[0xF7] = sse!(op!(@Sse "maskmovq", Pq, Nq), op!(@Sse2 "maskmovdqu", Vdq, Udq), INVALID, INVALID);
    t[0xF8] = mmx_sse!("psubb");
    t[0xF9] = mmx_sse!("psubw");
    t[0xFA] = mmx_sse!("psubd");
    t[0xFB] = mmx_sse!("psubq");
    t[0xFC] = mmx_sse!("paddb");
    t[0xFD] = mmx_sse!("paddw");
    t[0xFE] = mmx_sse!("paddd");
    t[0xFF] = op!("ud0", Gv, Ev);
    t
};

pub(crate) static TWO_BYTE: [OpcodeEntry; 256] = TWO_BYTE_MAP;
