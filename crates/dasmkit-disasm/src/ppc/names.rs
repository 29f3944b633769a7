//! Name tables for the PowerPC renderer.

use std::borrow::Cow;

/// General-purpose register names; r1 and r2 carry their ABI roles.
pub(super) const GPR: [&str; 32] = [
    "r0", "sp", "rtoc", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13", "r14",
    "r15", "r16", "r17", "r18", "r19", "r20", "r21", "r22", "r23", "r24", "r25", "r26", "r27", "r28",
    "r29", "r30", "r31",
];

/// Trap conditions by TO field. Unnamed combinations are `None`.
pub(super) const TRAP_CONDITION: [Option<&str>; 32] = {
    let mut t = [None; 32];
    t[1] = Some("lgt");
    t[2] = Some("llt");
    t[4] = Some("eq");
    t[5] = Some("lge");
    t[6] = Some("lle");
    t[8] = Some("gt");
    t[12] = Some("ge");
    t[16] = Some("lt");
    t[20] = Some("le");
    t[24] = Some("ne");
    t
};

/// Indexed by `logical * 2 + L`.
pub(super) const CMP: [&str; 4] = ["cmpw", "cmpd", "cmplw", "cmpld"];

pub(super) const PS_CMP: [&str; 4] = ["ps_cmpu0", "ps_cmpo0", "ps_cmpu1", "ps_cmpo1"];

/// Branch suffix by `AA * 2 + LK`.
pub(super) const BRANCH_EXT: [&str; 4] = ["", "l", "a", "la"];

/// Condition by `(BO & 8) >> 1 | (BI & 3)`: the first four test a clear bit.
pub(super) const BRANCH_CONDITION: [&str; 8] = ["ge", "le", "ne", "ns", "lt", "gt", "eq", "so"];

/// Decrement-and-test forms by `BO >> 1`. Only reachable indices are named.
pub(super) const BRANCH_DECREMENT: [&str; 16] = [
    "nzf", "zf", "", "", "nzt", "zt", "", "", "nz", "z", "", "", "nz", "z", "", "",
];

/// D-form integer and float loads/stores, primary opcodes 32 to 55.
pub(super) const LOAD_STORE: [&str; 24] = [
    "lwz", "lwzu", "lbz", "lbzu", "stw", "stwu", "stb", "stbu", "lhz", "lhzu", "lha", "lhau", "sth",
    "sthu", "lmw", "stmw", "lfs", "lfsu", "lfd", "lfdu", "stfs", "stfsu", "stfd", "stfdu",
];

/// Special-purpose register name, or its number when the register is unnamed.
pub(super) fn spr(n: u32) -> Cow<'static, str> {
    let name = match n {
        1 => "XER",
        8 => "LR",
        9 => "CTR",
        18 => "DSISR",
        19 => "DAR",
        22 => "DEC",
        25 => "SDR1",
        26 => "SRR0",
        27 => "SRR1",
        268 => "TBLr",
        269 => "TBUr",
        272..=275 => return Cow::Owned(format!("SPRG{}", n - 272)),
        282 => "EAR",
        284 => "TBLw",
        285 => "TBUw",
        287 => "PVR",
        528..=535 => return Cow::Owned(bat("IBAT", n - 528)),
        536..=543 => return Cow::Owned(bat("DBAT", n - 536)),
        560..=567 => return Cow::Owned(bat("IBAT", n - 560 + 8)),
        568..=575 => return Cow::Owned(bat("DBAT", n - 568 + 8)),
        912..=919 => return Cow::Owned(format!("GQR{}", n - 912)),
        920 => "HID2",
        921 => "WPAR",
        922 => "DMA_U",
        923 => "DMA_L",
        924 => "ECID_U",
        925 => "ECID_M",
        926 => "ECID_L",
        936 => "UMMCR0",
        937 => "UPMC1",
        938 => "UPMC2",
        939 => "USIA",
        940 => "UMMCR1",
        941 => "UPMC3",
        942 => "UPMC4",
        943 => "USDA",
        952 => "MMCR0",
        953 => "PMC1",
        954 => "PMC2",
        955 => "SIA",
        956 => "MMCR1",
        957 => "PMC3",
        958 => "PMC4",
        959 => "SDA",
        1008 => "HID0",
        1009 => "HID1",
        1010 => "IABR",
        1011 => "HID4",
        1012 => "TDCL",
        1013 => "DABR",
        1017 => "L2CR",
        1018 => "TDCH",
        1019 => "ICTC",
        1020 => "THRM1",
        1021 => "THRM2",
        1022 => "THRM3",
        _ => return Cow::Owned(n.to_string()),
    };
    Cow::Borrowed(name)
}

/// BAT registers come in upper/lower pairs; `slot` counts halves.
fn bat(prefix: &str, slot: u32) -> String {
    let half = if slot % 2 == 0 { 'U' } else { 'L' };
    format!("{prefix}{}{half}", slot / 2)
}
