//! Operand kinds and their formatters.
//!
//! Each table entry lists up to four [`Op`]s in Intel (destination first)
//! order. Formatting walks them in that order regardless of the output
//! syntax, because immediates and branch displacements are fetched from the
//! byte stream as their operand is rendered.

use dasmkit_core::Syntax;

use super::cursor::Cursor;
use super::insn::{Insn, OpcodeSpace};
use super::modrm::MemRef;
use super::regs::{self, Width};
use crate::DecodeError;

/// Operand encoding kinds.
///
/// Letter codes follow the usual opcode-map convention: `E` ModRM.rm as
/// register or memory, `G` ModRM.reg, `I` immediate, `J` relative branch,
/// `M` memory only, `V`/`W`/`U` vector register by reg / by rm or memory /
/// by rm register only, `H` vector register from vvvv, `P`/`Q`/`N` the MMX
/// counterparts, `Z` register from the low opcode bits. Size letters: `b`
/// byte, `w` word, `d` dword, `q` qword, `v` operand size, `y` dword or
/// qword by W, `z` word or dword, `x` by vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    // Fixed registers
    Al,
    Cl,
    /// `dx` as an I/O port.
    Dx,
    Ax,
    /// Accumulator at operand size.
    Acc,
    /// Accumulator, at most 32 bits (`in`/`out`).
    AccZ,
    SegEs,
    SegCs,
    SegSs,
    SegDs,
    SegFs,
    SegGs,
    St0,
    Sti,
    /// Implicit `xmm0` (SSE4.1 blends).
    Xmm0,
    /// Implicit shift count of one.
    One,

    // Register in the low three opcode bits
    Zb,
    Zv,
    /// Stack-sized (push/pop).
    Zvs,
    Zy,

    // ModRM.reg
    Gb,
    Gw,
    Gd,
    Gq,
    Gv,
    Gy,
    Sw,
    Cr,
    Dr,
    Pq,
    Vx,
    Vdq,
    Vqq,
    Kg,

    // VEX/EVEX.vvvv
    Hx,
    Hdq,
    By,
    Kh,

    // ModRM.rm, register or memory
    Eb,
    Ew,
    Ed,
    Eq,
    Ev,
    Ey,
    /// Stack-sized (push/pop/near branch targets).
    Evs,
    Qq,
    Qd,
    Wx,
    Wdq,
    Wq,
    Wd,
    Ww,
    Wb,
    /// Half the vector length (xmm/m64 for 128-bit, xmm/m128 for 256-bit).
    Wh,

    // ModRM.rm, register only
    /// Opmask register.
    Kr,
    /// Control/debug register moves: 32 or 64 bits by mode.
    Ry,
    Nq,
    Ux,
    Udq,

    // ModRM.rm, memory only
    M,
    Mb,
    Mw,
    Md,
    Mq,
    Mt,
    Mdq,
    Mx,
    /// Far pointer.
    Mp,
    Vsib,

    // Immediates
    Ib,
    /// Byte sign-extended to the operand size.
    Ibs,
    /// Byte sign-extended to the stack width.
    Ibss,
    Iw,
    Id,
    /// Word or dword; dword sign-extended under REX.W.
    Iz,
    /// Word or dword sign-extended to the stack width (`push imm`).
    Izs,
    /// Full operand-size immediate (`mov r64, imm64`).
    Iv,
    /// Vector register in imm8[7:4].
    Lx,

    // Direct offsets and string operands
    Ob,
    Ov,
    Xb,
    Xv,
    Yb,
    Yv,

    // Branches
    Jb,
    Jz,
    /// Direct far pointer `seg:offset`.
    Ap,
}

impl Op {
    /// String-instruction operands, which make F2/F3 print as `rep`.
    pub fn is_string(self) -> bool {
        matches!(self, Self::Xb | Self::Xv | Self::Yb | Self::Yv)
    }
}

/// Memory operand sizes, for the Intel `ptr` annotation and EVEX disp8*N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemSize {
    Byte,
    Word,
    Dword,
    Fword,
    Qword,
    Tbyte,
    Xmm,
    Ymm,
    Zmm,
}

impl MemSize {
    fn keyword(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Word => "word",
            Self::Dword => "dword",
            Self::Fword => "fword",
            Self::Qword => "qword",
            Self::Tbyte => "tbyte",
            Self::Xmm => "xmmword",
            Self::Ymm => "ymmword",
            Self::Zmm => "zmmword",
        }
    }

    fn bytes(self) -> i64 {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Dword => 4,
            Self::Fword => 6,
            Self::Qword => 8,
            Self::Tbyte => 10,
            Self::Xmm => 16,
            Self::Ymm => 32,
            Self::Zmm => 64,
        }
    }

    fn from_width(width: Width) -> Self {
        match width {
            Width::W8 => Self::Byte,
            Width::W16 => Self::Word,
            Width::W32 => Self::Dword,
            Width::W64 => Self::Qword,
        }
    }

    fn vector(len: u8) -> Self {
        match len {
            0 => Self::Xmm,
            1 => Self::Ymm,
            _ => Self::Zmm,
        }
    }
}

/// Rendering context for one decode call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Context {
    pub syntax: Syntax,
    /// Code-segment base for absolute branch targets; `None` hides them.
    pub base: Option<u64>,
}

impl Context {
    fn reg(&self, name: &str) -> String {
        match self.syntax {
            Syntax::Intel => name.to_string(),
            Syntax::Att => format!("%{name}"),
        }
    }

    fn imm(&self, value: u64, digits: usize) -> String {
        match self.syntax {
            Syntax::Intel => format!("0x{value:0digits$x}"),
            Syntax::Att => format!("$0x{value:0digits$x}"),
        }
    }
}

fn hex_digits(width: Width) -> usize {
    width.bytes() as usize * 2
}

fn truncate(value: u64, width: Width) -> u64 {
    match width {
        Width::W8 => value & 0xFF,
        Width::W16 => value & 0xFFFF,
        Width::W32 => value & 0xFFFF_FFFF,
        Width::W64 => value,
    }
}

/// Renders one operand, consuming any immediate bytes it owns.
pub(crate) fn format(op: Op, insn: &mut Insn, cur: &mut Cursor<'_>, ctx: &Context) -> Result<String, DecodeError> {
    let modrm = insn.modrm();
    let vlen = insn.vector_len();
    let text = match op {
        Op::Al => ctx.reg("al"),
        Op::Cl => ctx.reg("cl"),
        Op::Dx => ctx.reg("dx"),
        Op::Ax => ctx.reg("ax"),
        Op::Acc => ctx.reg(regs::gpr(0, insn.os, false)),
        Op::AccZ => ctx.reg(regs::gpr(0, insn.os.min(Width::W32), false)),
        Op::SegEs => ctx.reg("es"),
        Op::SegCs => ctx.reg("cs"),
        Op::SegSs => ctx.reg("ss"),
        Op::SegDs => ctx.reg("ds"),
        Op::SegFs => ctx.reg("fs"),
        Op::SegGs => ctx.reg("gs"),
        Op::St0 => ctx.reg(regs::ST[0]),
        Op::Sti => ctx.reg(regs::ST[modrm.rm_low() as usize]),
        Op::Xmm0 => ctx.reg("xmm0"),
        Op::One => match ctx.syntax {
            Syntax::Intel => "1".to_string(),
            Syntax::Att => "$1".to_string(),
        },

        Op::Zb => ctx.reg(regs::gpr(opcode_reg(insn), Width::W8, insn.rex_present)),
        Op::Zv => ctx.reg(regs::gpr(opcode_reg(insn), insn.os, false)),
        Op::Zvs => ctx.reg(regs::gpr(opcode_reg(insn), insn.stack_width(), false)),
        Op::Zy => ctx.reg(regs::gpr(opcode_reg(insn), insn.width_y(), false)),

        Op::Gb => ctx.reg(regs::gpr(modrm.reg, Width::W8, insn.rex_present)),
        Op::Gw => ctx.reg(regs::gpr(modrm.reg, Width::W16, false)),
        Op::Gd => ctx.reg(regs::gpr(modrm.reg, Width::W32, false)),
        Op::Gq => ctx.reg(regs::gpr(modrm.reg, Width::W64, false)),
        Op::Gv => ctx.reg(regs::gpr(modrm.reg, insn.os, false)),
        Op::Gy => ctx.reg(regs::gpr(modrm.reg, insn.width_y(), false)),
        Op::Sw => ctx.reg(regs::SEGMENT[modrm.nnn() as usize]),
        Op::Cr => ctx.reg(&regs::control(modrm.reg)),
        Op::Dr => ctx.reg(&regs::debug(modrm.reg)),
        Op::Pq => ctx.reg(regs::MMX[modrm.nnn() as usize]),
        Op::Vx => ctx.reg(&regs::vector(modrm.reg, vlen)),
        Op::Vdq => ctx.reg(&regs::vector(modrm.reg, 0)),
        Op::Vqq => ctx.reg(&regs::vector(modrm.reg, 1)),
        Op::Kg => ctx.reg(regs::OPMASK[modrm.nnn() as usize]),

        Op::Hx => ctx.reg(&regs::vector(insn.vvvv(), vlen)),
        Op::Hdq => ctx.reg(&regs::vector(insn.vvvv(), 0)),
        Op::By => ctx.reg(regs::gpr(insn.vvvv(), insn.width_y(), false)),
        Op::Kh => ctx.reg(regs::OPMASK[(insn.vvvv() & 7) as usize]),

        Op::Eb => general(insn, ctx, Width::W8),
        Op::Ew => general(insn, ctx, Width::W16),
        Op::Ed => general(insn, ctx, Width::W32),
        Op::Eq => general(insn, ctx, Width::W64),
        Op::Ev => general(insn, ctx, insn.os),
        Op::Ey => general(insn, ctx, insn.width_y()),
        Op::Evs => general(insn, ctx, insn.stack_width()),
        Op::Qq => mmx(insn, ctx, MemSize::Qword),
        Op::Qd => mmx(insn, ctx, MemSize::Dword),
        Op::Wx => vector(insn, ctx, vlen, MemSize::vector(vlen)),
        Op::Wdq => vector(insn, ctx, 0, MemSize::Xmm),
        Op::Wq => vector(insn, ctx, 0, MemSize::Qword),
        Op::Wd => vector(insn, ctx, 0, MemSize::Dword),
        Op::Ww => vector(insn, ctx, 0, MemSize::Word),
        Op::Wb => vector(insn, ctx, 0, MemSize::Byte),
        Op::Wh => {
            let half = match vlen {
                0 => MemSize::Qword,
                1 => MemSize::Xmm,
                _ => MemSize::Ymm,
            };
            vector(insn, ctx, vlen.saturating_sub(1), half)
        }

        Op::Kr => ctx.reg(regs::OPMASK[modrm.rm_low() as usize]),
        Op::Ry => ctx.reg(regs::gpr(modrm.rm, if insn.is_64() { Width::W64 } else { Width::W32 }, false)),
        Op::Nq => ctx.reg(regs::MMX[modrm.rm_low() as usize]),
        Op::Ux => ctx.reg(&regs::vector(modrm.rm, vlen)),
        Op::Udq => ctx.reg(&regs::vector(modrm.rm, 0)),

        Op::M => memory(insn, ctx, None),
        Op::Mb => memory(insn, ctx, Some(MemSize::Byte)),
        Op::Mw => memory(insn, ctx, Some(MemSize::Word)),
        Op::Md => memory(insn, ctx, Some(MemSize::Dword)),
        Op::Mq => memory(insn, ctx, Some(MemSize::Qword)),
        Op::Mt => memory(insn, ctx, Some(MemSize::Tbyte)),
        Op::Mdq => memory(insn, ctx, Some(MemSize::Xmm)),
        Op::Mx => memory(insn, ctx, Some(MemSize::vector(vlen))),
        Op::Mp => {
            let size = match insn.os {
                Width::W16 => MemSize::Dword,
                Width::W64 => MemSize::Tbyte,
                _ => MemSize::Fword,
            };
            memory(insn, ctx, Some(size))
        }
        Op::Vsib => vsib(insn, ctx, vlen),

        Op::Ib => ctx.imm(cur.u8()? as u64, 2),
        Op::Ibs => {
            let value = cur.u8()? as i8 as i64 as u64;
            ctx.imm(truncate(value, insn.os), hex_digits(insn.os))
        }
        Op::Ibss => {
            let width = insn.stack_width();
            let value = cur.u8()? as i8 as i64 as u64;
            ctx.imm(truncate(value, width), hex_digits(width))
        }
        Op::Iw => ctx.imm(cur.u16()? as u64, 4),
        Op::Id => ctx.imm(cur.u32()? as u64, 8),
        Op::Iz => match insn.os {
            Width::W16 => ctx.imm(cur.u16()? as u64, 4),
            Width::W64 => ctx.imm(cur.u32()? as i32 as i64 as u64, 16),
            _ => ctx.imm(cur.u32()? as u64, 8),
        },
        Op::Izs => match insn.stack_width() {
            Width::W16 => ctx.imm(cur.u16()? as u64, 4),
            Width::W64 => ctx.imm(cur.u32()? as i32 as i64 as u64, 16),
            _ => ctx.imm(cur.u32()? as u64, 8),
        },
        Op::Iv => match insn.os {
            Width::W16 => ctx.imm(cur.u16()? as u64, 4),
            Width::W64 => ctx.imm(cur.u64()?, 16),
            _ => ctx.imm(cur.u32()? as u64, 8),
        },
        Op::Lx => ctx.reg(&regs::vector(cur.u8()? >> 4, vlen)),

        Op::Ob => offset(insn, cur, ctx, MemSize::Byte)?,
        Op::Ov => offset(insn, cur, ctx, MemSize::from_width(insn.os))?,
        Op::Xb => string(insn, ctx, MemSize::Byte, false),
        Op::Xv => string(insn, ctx, MemSize::from_width(insn.os), false),
        Op::Yb => string(insn, ctx, MemSize::Byte, true),
        Op::Yv => string(insn, ctx, MemSize::from_width(insn.os), true),

        Op::Jb => {
            let disp = cur.u8()? as i8 as i64;
            branch(insn, cur, ctx, disp)
        }
        Op::Jz => {
            let disp = if insn.os == Width::W16 && !insn.is_64() {
                cur.u16()? as i16 as i64
            } else {
                cur.u32()? as i32 as i64
            };
            branch(insn, cur, ctx, disp)
        }
        Op::Ap => {
            let offset = if insn.os == Width::W16 {
                format!("0x{:04x}", cur.u16()?)
            } else {
                format!("0x{:08x}", cur.u32()?)
            };
            let selector = cur.u16()?;
            match ctx.syntax {
                Syntax::Intel => format!("0x{selector:04x}:{offset}"),
                Syntax::Att => format!("$0x{selector:04x}, ${offset}"),
            }
        }
    };
    Ok(text)
}

/// Register number in the low three opcode bits, extended by REX.B.
fn opcode_reg(insn: &Insn) -> u8 {
    let op = match insn.space {
        OpcodeSpace::OneByte(op) | OpcodeSpace::TwoByte(op) => op,
        OpcodeSpace::ThreeByte { op, .. }
        | OpcodeSpace::Vex { op, .. }
        | OpcodeSpace::Xop { op, .. }
        | OpcodeSpace::Evex { op, .. } => op,
    };
    (op & 7) | insn.rex_b
}

fn general(insn: &Insn, ctx: &Context, width: Width) -> String {
    if insn.is_register_form() {
        ctx.reg(regs::gpr(insn.modrm().rm, width, insn.rex_present))
    } else {
        memory(insn, ctx, Some(MemSize::from_width(width)))
    }
}

fn mmx(insn: &Insn, ctx: &Context, size: MemSize) -> String {
    if insn.is_register_form() {
        ctx.reg(regs::MMX[insn.modrm().rm_low() as usize])
    } else {
        memory(insn, ctx, Some(size))
    }
}

fn vector(insn: &Insn, ctx: &Context, len: u8, size: MemSize) -> String {
    if insn.is_register_form() {
        ctx.reg(&regs::vector(insn.modrm().rm, len))
    } else {
        memory(insn, ctx, Some(size))
    }
}

/// Element size used by EVEX embedded broadcast.
fn element_size(insn: &Insn) -> i64 {
    if insn.w {
        8
    } else {
        4
    }
}

fn memory(insn: &Insn, ctx: &Context, size: Option<MemSize>) -> String {
    let Some(mut mem) = insn.mem else {
        // Memory-only operand with a register ModRM: show the register.
        return ctx.reg(regs::gpr(insn.modrm().rm, insn.os, insn.rex_present));
    };

    let broadcast = insn.evex().filter(|e| e.b).map(|_| element_size(insn));
    if insn.evex().is_some() && mem.disp_size == 1 {
        // Compressed disp8*N.
        let n = broadcast.or(size.map(MemSize::bytes)).unwrap_or(1);
        mem.disp *= n;
    }

    let mut text = render_memory(&mem, ctx, size);
    if let (Some(elem), Some(size)) = (broadcast, size) {
        let count = (MemSize::vector(insn.vector_len()).bytes() / elem).max(size.bytes() / elem).max(1);
        text.push_str(&format!("{{1to{count}}}"));
    }
    text
}

fn vsib(insn: &Insn, ctx: &Context, len: u8) -> String {
    let Some(mem) = insn.mem else {
        return ctx.reg(&regs::vector(insn.modrm().rm, len));
    };
    let index = regs::vector(mem.vsib_index, len);
    let base = mem.base.map(|b| regs::gpr(b, mem.width, false));
    let seg = mem.segment.name();
    match ctx.syntax {
        Syntax::Intel => {
            let mut inner = String::new();
            if let Some(base) = base {
                inner.push_str(base);
                inner.push('+');
            }
            inner.push_str(&index);
            if mem.scale > 1 {
                inner.push_str(&format!("*{}", mem.scale));
            }
            push_signed_decimal(&mut inner, mem.disp);
            format!("{seg}:[{inner}]")
        }
        Syntax::Att => {
            let base = base.map(|b| format!("%{b}")).unwrap_or_default();
            format!("%{seg}:{}({base},%{index},{})", att_disp(mem.disp), mem.scale)
        }
    }
}

fn push_signed_decimal(out: &mut String, disp: i64) {
    if disp > 0 {
        out.push_str(&format!("+{disp}"));
    } else if disp < 0 {
        out.push_str(&format!("-{}", disp.unsigned_abs()));
    }
}

fn att_disp(disp: i64) -> String {
    match disp {
        0 => String::new(),
        d if d < 0 => format!("-0x{:x}", d.unsigned_abs()),
        d => format!("0x{d:x}"),
    }
}

/// Intel: `size ptr seg:[base+index*scale+disp]`.
/// AT&T: `%seg:disp(%base,%index,scale)`.
fn render_memory(mem: &MemRef, ctx: &Context, size: Option<MemSize>) -> String {
    let seg = mem.segment.name();
    let base = if mem.rip_relative {
        Some(if mem.width == Width::W64 { "rip" } else { "eip" })
    } else {
        mem.base.map(|b| regs::gpr(b, mem.width, false))
    };
    let index = mem.index.map(|i| regs::gpr(i, mem.width, false));

    match ctx.syntax {
        Syntax::Intel => {
            let mut text = String::new();
            if let Some(size) = size {
                text.push_str(size.keyword());
                text.push_str(" ptr ");
            }
            text.push_str(seg);
            text.push(':');
            if base.is_none() && index.is_none() {
                let digits = hex_digits(mem.width);
                text.push_str(&format!("0x{:0digits$x}", truncate(mem.disp as u64, mem.width)));
                return text;
            }
            text.push('[');
            if let Some(base) = base {
                text.push_str(base);
            }
            if let Some(index) = index {
                if base.is_some() {
                    text.push('+');
                }
                text.push_str(index);
                if mem.scale > 1 {
                    text.push_str(&format!("*{}", mem.scale));
                }
            }
            push_signed_decimal(&mut text, mem.disp);
            text.push(']');
            text
        }
        Syntax::Att => {
            if base.is_none() && index.is_none() {
                let digits = hex_digits(mem.width);
                return format!("%{seg}:0x{:0digits$x}", truncate(mem.disp as u64, mem.width));
            }
            let mut text = format!("%{seg}:{}(", att_disp(mem.disp));
            if let Some(base) = base {
                text.push('%');
                text.push_str(base);
            }
            if let Some(index) = index {
                text.push_str(&format!(",%{index},{}", mem.scale));
            }
            text.push(')');
            text
        }
    }
}

/// `moffs` operand of `mov al/eAX <-> [offset]`.
fn offset(insn: &Insn, cur: &mut Cursor<'_>, ctx: &Context, size: MemSize) -> Result<String, DecodeError> {
    let value = match insn.asz {
        Width::W16 => cur.u16()? as u64,
        Width::W64 => cur.u64()?,
        _ => cur.u32()? as u64,
    };
    let mut mem = MemRef {
        base: None,
        index: None,
        scale: 1,
        disp: value as i64,
        disp_size: insn.asz.bytes() as u8,
        rip_relative: false,
        width: insn.asz,
        segment: insn.prefixes.segment.unwrap_or(super::prefix::Segment::DS),
        vsib_index: 0,
    };
    if insn.asz != Width::W64 {
        mem.disp = truncate(value, insn.asz) as i64;
    }
    Ok(render_memory(&mem, ctx, Some(size)))
}

/// `ds:[esi]` / `es:[edi]` string operands. Only the source honours a
/// segment override.
fn string(insn: &Insn, ctx: &Context, size: MemSize, destination: bool) -> String {
    use super::prefix::Segment;
    let (reg, segment) = if destination {
        (7, Segment::ES)
    } else {
        (6, insn.prefixes.segment.unwrap_or(Segment::DS))
    };
    let mem = MemRef {
        base: Some(reg),
        index: None,
        scale: 1,
        disp: 0,
        disp_size: 0,
        rip_relative: false,
        width: insn.asz,
        segment,
        vsib_index: 0,
    };
    render_memory(&mem, ctx, Some(size))
}

/// Relative branch: `.+disp`, plus the absolute target when a code base
/// was supplied.
fn branch(insn: &mut Insn, cur: &Cursor<'_>, ctx: &Context, disp: i64) -> String {
    let width = if insn.is_64() {
        Width::W64
    } else if insn.os == Width::W16 {
        Width::W16
    } else {
        Width::W32
    };
    let target = truncate(cur.ip().wrapping_add(disp as u64), width);
    let absolute = ctx.base.unwrap_or(0).wrapping_add(target);
    insn.branch_target = Some(absolute);

    let mut text = if disp < 0 {
        format!(".-{}", disp.unsigned_abs())
    } else {
        format!(".+{disp}")
    };
    if ctx.base.is_some() {
        if width == Width::W64 {
            text.push_str(&format!(" (0x{absolute:016x})"));
        } else {
            text.push_str(&format!(" (0x{:08x})", absolute & 0xFFFF_FFFF));
        }
    }
    text
}
