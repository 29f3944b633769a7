//! x87 escape opcodes D8-DF.
//!
//! Memory forms are selected by ModRM.reg. Register forms (mod == 3) use
//! one flat table of 8 x 64 entries indexed by escape and the low six
//! ModRM bits.

use super::{tagged, Feature, OpcodeEntry, INVALID};

pub(crate) const FPU_D8: [OpcodeEntry; 8] = tagged(
    [
        op!("fadd" / "fadds", Md),
        op!("fmul" / "fmuls", Md),
        op!("fcom" / "fcoms", Md),
        op!("fcomp" / "fcomps", Md),
        op!("fsub" / "fsubs", Md),
        op!("fsubr" / "fsubrs", Md),
        op!("fdiv" / "fdivs", Md),
        op!("fdivr" / "fdivrs", Md),
    ],
    Feature::X87,
);

pub(crate) const FPU_D9: [OpcodeEntry; 8] = tagged(
    [
        op!("fld" / "flds", Md),
        INVALID,
        op!("fst" / "fsts", Md),
        op!("fstp" / "fstps", Md),
        op!("fldenv", M),
        op!("fldcw", Mw),
        op!("fnstenv", M),
        op!("fnstcw", Mw),
    ],
    Feature::X87,
);

pub(crate) const FPU_DA: [OpcodeEntry; 8] = tagged(
    [
        op!("fiadd" / "fiaddl", Md),
        op!("fimul" / "fimull", Md),
        op!("ficom" / "ficoml", Md),
        op!("ficomp" / "ficompl", Md),
        op!("fisub" / "fisubl", Md),
        op!("fisubr" / "fisubrl", Md),
        op!("fidiv" / "fidivl", Md),
        op!("fidivr" / "fidivrl", Md),
    ],
    Feature::X87,
);

pub(crate) const FPU_DB: [OpcodeEntry; 8] = tagged(
    [
        op!("fild" / "fildl", Md),
        op!("fisttp" / "fisttpl", Md),
        op!("fist" / "fistl", Md),
        op!("fistp" / "fistpl", Md),
        INVALID,
        op!("fld" / "fldt", Mt),
        INVALID,
        op!("fstp" / "fstpt", Mt),
    ],
    Feature::X87,
);

pub(crate) const FPU_DC: [OpcodeEntry; 8] = tagged(
    [
        op!("fadd" / "faddl", Mq),
        op!("fmul" / "fmull", Mq),
        op!("fcom" / "fcoml", Mq),
        op!("fcomp" / "fcompl", Mq),
        op!("fsub" / "fsubl", Mq),
        op!("fsubr" / "fsubrl", Mq),
        op!("fdiv" / "fdivl", Mq),
        op!("fdivr" / "fdivrl", Mq),
    ],
    Feature::X87,
);

pub(crate) const FPU_DD: [OpcodeEntry; 8] = tagged(
    [
        op!("fld" / "fldl", Mq),
        op!("fisttp" / "fisttpll", Mq),
        op!("fst" / "fstl", Mq),
        op!("fstp" / "fstpl", Mq),
        op!("frstor", M),
        INVALID,
        op!("fnsave", M),
        op!("fnstsw", Mw),
    ],
    Feature::X87,
);

pub(crate) const FPU_DE: [OpcodeEntry; 8] = tagged(
    [
        op!("fiadd" / "fiadds", Mw),
        op!("fimul" / "fimuls", Mw),
        op!("ficom" / "ficoms", Mw),
        op!("ficomp" / "ficomps", Mw),
        op!("fisub" / "fisubs", Mw),
        op!("fisubr" / "fisubrs", Mw),
        op!("fidiv" / "fidivs", Mw),
        op!("fidivr" / "fidivrs", Mw),
    ],
    Feature::X87,
);

pub(crate) const FPU_DF: [OpcodeEntry; 8] = tagged(
    [
        op!("fild" / "filds", Mw),
        op!("fisttp" / "fisttps", Mw),
        op!("fist" / "fists", Mw),
        op!("fistp" / "fistps", Mw),
        op!("fbld", Mt),
        op!("fild" / "fildll", Mq),
        op!("fbstp", Mt),
        op!("fistp" / "fistpll", Mq),
    ],
    Feature::X87,
);

/// Slot of a register form: escape byte and full ModRM byte.
const fn at(escape: usize, modrm: usize) -> usize {
    (escape - 0xD8) * 64 + (modrm & 0x3F)
}

#[rustfmt::skip]
const REGISTER_FORMS: [OpcodeEntry; 512] = {
    let mut t = [INVALID; 512];
    let mut i = 0;
    while i < 8 {
        t[at(0xD8, 0xC0 + i)] = op!("fadd", St0, Sti);
        t[at(0xD8, 0xC8 + i)] = op!("fmul", St0, Sti);
        t[at(0xD8, 0xD0 + i)] = op!("fcom", St0, Sti);
        t[at(0xD8, 0xD8 + i)] = op!("fcomp", St0, Sti);
        t[at(0xD8, 0xE0 + i)] = op!("fsub", St0, Sti);
        t[at(0xD8, 0xE8 + i)] = op!("fsubr", St0, Sti);
        t[at(0xD8, 0xF0 + i)] = op!("fdiv", St0, Sti);
        t[at(0xD8, 0xF8 + i)] = op!("fdivr", St0, Sti);

        t[at(0xD9, 0xC0 + i)] = op!("fld", Sti);
        t[at(0xD9, 0xC8 + i)] = op!("fxch", Sti);

        t[at(0xDA, 0xC0 + i)] = op!("fcmovb", St0, Sti);
        t[at(0xDA, 0xC8 + i)] = op!("fcmove", St0, Sti);
        t[at(0xDA, 0xD0 + i)] = op!("fcmovbe", St0, Sti);
        t[at(0xDA, 0xD8 + i)] = op!("fcmovu", St0, Sti);

        t[at(0xDB, 0xC0 + i)] = op!("fcmovnb", St0, Sti);
        t[at(0xDB, 0xC8 + i)] = op!("fcmovne", St0, Sti);
        t[at(0xDB, 0xD0 + i)] = op!("fcmovnbe", St0, Sti);
        t[at(0xDB, 0xD8 + i)] = op!("fcmovnu", St0, Sti);
        t[at(0xDB, 0xE8 + i)] = op!("fucomi", St0, Sti);
        t[at(0xDB, 0xF0 + i)] = op!("fcomi", St0, Sti);

        t[at(0xDC, 0xC0 + i)] = op!("fadd", Sti, St0);
        t[at(0xDC, 0xC8 + i)] = op!("fmul", Sti, St0);
        t[at(0xDC, 0xE0 + i)] = op!("fsubr", Sti, St0);
        t[at(0xDC, 0xE8 + i)] = op!("fsub", Sti, St0);
        t[at(0xDC, 0xF0 + i)] = op!("fdivr", Sti, St0);
        t[at(0xDC, 0xF8 + i)] = op!("fdiv", Sti, St0);

        t[at(0xDD, 0xC0 + i)] = op!("ffree", Sti);
        t[at(0xDD, 0xD0 + i)] = op!("fst", Sti);
        t[at(0xDD, 0xD8 + i)] = op!("fstp", Sti);
        t[at(0xDD, 0xE0 + i)] = op!("fucom", Sti);
        t[at(0xDD, 0xE8 + i)] = op!("fucomp", Sti);

        t[at(0xDE, 0xC0 + i)] = op!("faddp", Sti, St0);
        t[at(0xDE, 0xC8 + i)] = op!("fmulp", Sti, St0);
        t[at(0xDE, 0xE0 + i)] = op!("fsubrp", Sti, St0);
        t[at(0xDE, 0xE8 + i)] = op!("fsubp", Sti, St0);
        t[at(0xDE, 0xF0 + i)] = op!("fdivrp", Sti, St0);
        t[at(0xDE, 0xF8 + i)] = op!("fdivp", Sti, St0);

        t[at(0xDF, 0xC0 + i)] = op!("ffreep", Sti);
        t[at(0xDF, 0xE8 + i)] = op!("fucomip", St0, Sti);
        t[at(0xDF, 0xF0 + i)] = op!("fcomip", St0, Sti);
        i += 1;
    }

    t[at(0xD9, 0xD0)] = op!("fnop");
    t[at(0xD9, 0xE0)] = op!("fchs");
    t[at(0xD9, 0xE1)] = op!("fabs");
    t[at(0xD9, 0xE4)] = op!("ftst");
    t[at(0xD9, 0xE5)] = op!("fxam");
    t[at(0xD9, 0xE8)] = op!("fld1");
    t[at(0xD9, 0xE9)] = op!("fldl2t");
    t[at(0xD9, 0xEA)] = op!("fldl2e");
    t[at(0xD9, 0xEB)] = op!("fldpi");
    t[at(0xD9, 0xEC)] = op!("fldlg2");
    t[at(0xD9, 0xED)] = op!("fldln2");
    t[at(0xD9, 0xEE)] = op!("fldz");
    t[at(0xD9, 0xF0)] = op!("f2xm1");
    t[at(0xD9, 0xF1)] = op!("fyl2x");
    t[at(0xD9, 0xF2)] = op!("fptan");
    t[at(0xD9, 0xF3)] = op!("fpatan");
    t[at(0xD9, 0xF4)] = op!("fxtract");
    t[at(0xD9, 0xF5)] = op!("fprem1");
    t[at(0xD9, 0xF6)] = op!("fdecstp");
    t[at(0xD9, 0xF7)] = op!("fincstp");
    t[at(0xD9, 0xF8)] = op!("fprem");
    t[at(0xD9, 0xF9)] = op!("fyl2xp1");
    t[at(0xD9, 0xFA)] = op!("fsqrt");
    t[at(0xD9, 0xFB)] = op!("fsincos");
    t[at(0xD9, 0xFC)] = op!("frndint");
    t[at(0xD9, 0xFD)] = op!("fscale");
    t[at(0xD9, 0xFE)] = op!("fsin");
    t[at(0xD9, 0xFF)] = op!("fcos");

    t[at(0xDA, 0xE9)] = op!("fucompp");

    t[at(0xDB, 0xE0)] = op!("feni");
    t[at(0xDB, 0xE1)] = op!("fdisi");
    t[at(0xDB, 0xE2)] = op!("fnclex");
    t[at(0xDB, 0xE3)] = op!("fninit");
    t[at(0xDB, 0xE4)] = op!("fsetpm");

    t[at(0xDE, 0xD9)] = op!("fcompp");

    t[at(0xDF, 0xE0)] = op!("fnstsw", Ax);
    t
};

/// Register forms of D8-DF, indexed by `(escape - 0xD8) * 64 + (modrm & 0x3F)`.
pub(crate) static X87_REGISTER: [OpcodeEntry; 512] = tagged(REGISTER_FORMS, Feature::X87);
