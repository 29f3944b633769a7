//! Three-byte maps 0F 38 and 0F 3A.

use super::{OpcodeEntry, INVALID};

/// SSSE3 instruction: MMX form without prefix, XMM form under 66.
macro_rules! ssse3 {
    ($name:literal $(, $extra:ident)?) => {
        grp!(
            Sse,
            [
                op!(@Ssse3 $name, Pq, Qq $(, $extra)?),
                op!(@Ssse3 $name, Vdq, Wdq $(, $extra)?),
                INVALID,
                INVALID,
            ]
        )
    };
}

/// Valid only under a 66 prefix.
macro_rules! p66 {
    ($feat:ident $name:literal $(, $o:ident)*) => {
        grp!(SseOnly, P66, op!(@$feat $name $(, $o)*))
    };
}

#[rustfmt::skip]
const MAP_0F38: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x00] = ssse3!("pshufb");
    t[0x01] = ssse3!("phaddw");
    t[0x02] = ssse3!("phaddd");
    t[0x03] = ssse3!("phaddsw");
    t[0x04] = ssse3!("pmaddubsw");
    t[0x05] = ssse3!("phsubw");
    t[0x06] = ssse3!("phsubd");
    t[0x07] = ssse3!("phsubsw");
    t[0x08] = ssse3!("psignb");
    t[0x09] = ssse3!("psignw");
    t[0x0A] = ssse3!("psignd");
    t[0x0B] = ssse3!("pmulhrsw");
    t[0x10] = p66!(Sse41 "pblendvb", Vdq, Wdq, Xmm0);
    t[0x14] = p66!(Sse41 "blendvps", Vdq, Wdq, Xmm0);
    t[0x15] = p66!(Sse41 "blendvpd", Vdq, Wdq, Xmm0);
    t[0x17] = p66!(Sse41 "ptest", Vdq, Wdq);
    t[0x1C] = ssse3!("pabsb");
    t[0x1D] = ssse3!("pabsw");
    t[0x1E] = ssse3!("pabsd");

    t[0x20] = p66!(Sse41 "pmovsxbw", Vdq, Wq);
    t[0x21] = p66!(Sse41 "pmovsxbd", Vdq, Wd);
    t[0x22] = p66!(Sse41 "pmovsxbq", Vdq, Ww);
    t[0x23] = p66!(Sse41 "pmovsxwd", Vdq, Wq);
    t[0x24] = p66!(Sse41 "pmovsxwq", Vdq, Wd);
    t[0x25] = p66!(Sse41 "pmovsxdq", Vdq, Wq);
    t[0x28] = p66!(Sse41 "pmuldq", Vdq, Wdq);
    t[0x29] = p66!(Sse41 "pcmpeqq", Vdq, Wdq);
    t[0x2A] = p66!(Sse41 "movntdqa", Vdq, Mdq);
    t[0x2B] = p66!(Sse41 "packusdw", Vdq, Wdq);
    t[0x30] = p66!(Sse41 "pmovzxbw", Vdq, Wq);
    t[0x31] = p66!(Sse41 "pmovzxbd", Vdq, Wd);
    t[0x32] = p66!(Sse41 "pmovzxbq", Vdq, Ww);
    t[0x33] = p66!(Sse41 "pmovzxwd", Vdq, Wq);
    t[0x34] = p66!(Sse41 "pmovzxwq", Vdq, Wd);
    t[0x35] = p66!(Sse41 "pmovzxdq", Vdq, Wq);
    t[0x37] = p66!(Sse42 "pcmpgtq", Vdq, Wdq);
    t[0x38] = p66!(Sse41 "pminsb", Vdq, Wdq);
    t[0x39] = p66!(Sse41 "pminsd", Vdq, Wdq);
    t[0x3A] = p66!(Sse41 "pminuw", Vdq, Wdq);
    t[0x3B] = p66!(Sse41 "pminud", Vdq, Wdq);
    t[0x3C] = p66!(Sse41 "pmaxsb", Vdq, Wdq);
    t[0x3D] = p66!(Sse41 "pmaxsd", Vdq, Wdq);
    t[0x3E] = p66!(Sse41 "pmaxuw", Vdq, Wdq);
    t[0x3F] = p66!(Sse41 "pmaxud", Vdq, Wdq);
    t[0x40] = p66!(Sse41 "pmulld", Vdq, Wdq);
    t[0x41] = p66!(Sse41 "phminposuw", Vdq, Wdq);

    t[0x80] = p66!(System "invept", Gy, Mdq);
    t[0x81] = p66!(System "invvpid", Gy, Mdq);
    t[0x82] = p66!(System "invpcid", Gy, Mdq);

    t[0xDB] = p66!(Aes "aesimc", Vdq, Wdq);
    t[0xDC] = p66!(Aes "aesenc", Vdq, Wdq);
    t[0xDD] = p66!(Aes "aesenclast", Vdq, Wdq);
    t[0xDE] = p66!(Aes "aesdec", Vdq, Wdq);
    t[0xDF] = p66!(Aes "aesdeclast", Vdq, Wdq);

    t[0xF0] = grp!(Sse, [
        op!(V "movbe", Gv, Ev),
        op!(V "movbe", Gv, Ev),
        op!(@Sse42 B "crc32", Gd, Eb),
        INVALID,
    ]);
    t[0xF1] = grp!(Sse, [
        op!(V "movbe", Ev, Gv),
        op!(V "movbe", Ev, Gv),
        op!(@Sse42 V "crc32", Gy, Ev),
        INVALID,
    ]);
    t
};

#[rustfmt::skip]
const MAP_0F3A: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x08] = p66!(Sse41 "roundps", Vdq, Wdq, Ib);
    t[0x09] = p66!(Sse41 "roundpd", Vdq, Wdq, Ib);
    t[0x0A] = p66!(Sse41 "roundss", Vdq, Wd, Ib);
    t[0x0B] = p66!(Sse41 "roundsd", Vdq, Wq, Ib);
    t[0x0C] = p66!(Sse41 "blendps", Vdq, Wdq, Ib);
    t[0x0D] = p66!(Sse41 "blendpd", Vdq, Wdq, Ib);
    t[0x0E] = p66!(Sse41 "pblendw", Vdq, Wdq, Ib);
    t[0x0F] = ssse3!("palignr", Ib);

    t[0x14] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Sse41 "pextrb", Ed, Vdq, Ib),
        op!(@Sse41 "pextrb", Mb, Vdq, Ib),
    ]));
    t[0x15] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Sse41 "pextrw", Ed, Vdq, Ib),
        op!(@Sse41 "pextrw", Mw, Vdq, Ib),
    ]));
    t[0x16] = grp!(SseOnly, P66, grp!(W, [
        op!(@Sse41 "pextrd", Ed, Vdq, Ib),
        op!(@Sse41 "pextrq", Eq, Vdq, Ib),
    ]));
    t[0x17] = p66!(Sse41 "extractps", Ed, Vdq, Ib);
    t[0x20] = grp!(SseOnly, P66, grp!(Mod, [
        op!(@Sse41 "pinsrb", Vdq, Ed, Ib),
        op!(@Sse41 "pinsrb", Vdq, Mb, Ib),
    ]));
    t[0x21] = p66!(Sse41 "insertps", Vdq, Wd, Ib);
    t[0x22] = grp!(SseOnly, P66, grp!(W, [
        op!(@Sse41 "pinsrd", Vdq, Ed, Ib),
        op!(@Sse41 "pinsrq", Vdq, Eq, Ib),
    ]));

    t[0x40] = p66!(Sse41 "dpps", Vdq, Wdq, Ib);
    t[0x41] = p66!(Sse41 "dppd", Vdq, Wdq, Ib);
    t[0x42] = p66!(Sse41 "mpsadbw", Vdq, Wdq, Ib);
    t[0x44] = p66!(Pclmul "pclmulqdq", Vdq, Wdq, Ib);
    t[0x60] = p66!(Sse42 "pcmpestrm", Vdq, Wdq, Ib);
    t[0x61] = p66!(Sse42 "pcmpestri", Vdq, Wdq, Ib);
    t[0x62] = p66!(Sse42 "pcmpistrm", Vdq, Wdq, Ib);
    t[0x63] = p66!(Sse42 "pcmpistri", Vdq, Wdq, Ib);
    t[0xDF] = p66!(Aes "aeskeygenassist", Vdq, Wdq, Ib);
    t
};

pub(crate) static THREE_BYTE_38: [OpcodeEntry; 256] = MAP_0F38;
pub(crate) static THREE_BYTE_3A: [OpcodeEntry; 256] = MAP_0F3A;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x86::prefix::SsePrefix;
    use crate::x86::tables::Group;

    #[test]
    fn test_sse41_entries_require_66() {
        match THREE_BYTE_38[0x17] {
            OpcodeEntry::Group(Group::SseOnly(prefix, OpcodeEntry::Insn(info))) => {
                assert_eq!(prefix, SsePrefix::P66);
                assert_eq!(info.intel, "ptest");
            }
            _ => panic!("0F 38 17 is not a 66-only entry"),
        }
    }

    #[test]
    fn test_crc32_under_f2() {
        match THREE_BYTE_38[0xF1] {
            OpcodeEntry::Group(Group::Sse(cols)) => {
                assert!(matches!(cols[2], OpcodeEntry::Insn(info) if info.intel == "crc32"));
            }
            _ => panic!("0F 38 F1 is not a prefix group"),
        }
    }
}
