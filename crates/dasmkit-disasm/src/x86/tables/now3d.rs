//! 3DNow! (0F 0F /r ib), keyed by the trailing suffix byte.

use super::{OpcodeEntry, INVALID};

#[rustfmt::skip]
const SUFFIX_MAP: [OpcodeEntry; 256] = {
    let mut t = [INVALID; 256];
    t[0x0C] = op!(@Now3d "pi2fw", Pq, Qq);
    t[0x0D] = op!(@Now3d "pi2fd", Pq, Qq);
    t[0x1C] = op!(@Now3d "pf2iw", Pq, Qq);
    t[0x1D] = op!(@Now3d "pf2id", Pq, Qq);
    t[0x8A] = op!(@Now3d "pfnacc", Pq, Qq);
    t[0x8E] = op!(@Now3d "pfpnacc", Pq, Qq);
    t[0x90] = op!(@Now3d "pfcmpge", Pq, Qq);
    t[0x94] = op!(@Now3d "pfmin", Pq, Qq);
    t[0x96] = op!(@Now3d "pfrcp", Pq, Qq);
    t[0x97] = op!(@Now3d "pfrsqrt", Pq, Qq);
    t[0x9A] = op!(@Now3d "pfsub", Pq, Qq);
    t[0x9E] = op!(@Now3d "pfadd", Pq, Qq);
    t[0xA0] = op!(@Now3d "pfcmpgt", Pq, Qq);
    t[0xA4] = op!(@Now3d "pfmax", Pq, Qq);
    t[0xA6] = op!(@Now3d "pfrcpit1", Pq, Qq);
    t[0xA7] = op!(@Now3d "pfrsqit1", Pq, Qq);
    t[0xAA] = op!(@Now3d "pfsubr", Pq, Qq);
    t[0xAE] = op!(@Now3d "pfacc", Pq, Qq);
    t[0xB0] = op!(@Now3d "pfcmpeq", Pq, Qq);
    t[0xB4] = op!(@Now3d "pfmul", Pq, Qq);
    t[0xB6] = op!(@Now3d "pfrcpit2", Pq, Qq);
    t[0xB7] = op!(@Now3d "pmulhrw", Pq, Qq);
    t[0xBB] = op!(@Now3d "pswapd", Pq, Qq);
    t[0xBF] = op!(@Now3d "pavgb", Pq, Qq);
    t
};

pub(crate) static NOW3D: [OpcodeEntry; 256] = SUFFIX_MAP;
