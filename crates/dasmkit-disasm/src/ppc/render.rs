//! Word-level renderer: primary opcode dispatch and the operand formats of
//! each instruction family.

use super::decoder::{PpcFlags, PpcInstruction, PpcKind};
use super::names::{self, GPR};

const OE: u32 = 0x0000_0400;
const D_MASK: u32 = 0x03e0_0000;
const A_MASK: u32 = 0x001f_0000;
const B_MASK: u32 = 0x0000_f800;

pub(super) fn primary(w: u32) -> u32 {
    w >> 26
}

/// Ten-bit extended opcode of X/XL/XFX forms.
pub(super) fn xo(w: u32) -> u32 {
    (w >> 1) & 0x3ff
}

fn xo5(w: u32) -> u32 {
    (w >> 1) & 0x1f
}

pub(super) fn rd(w: u32) -> u32 {
    (w >> 21) & 0x1f
}

fn ra(w: u32) -> u32 {
    (w >> 16) & 0x1f
}

fn rb(w: u32) -> u32 {
    (w >> 11) & 0x1f
}

fn rc(w: u32) -> u32 {
    (w >> 6) & 0x1f
}

fn crfd(w: u32) -> u32 {
    (w >> 23) & 7
}

fn crfs(w: u32) -> u32 {
    (w >> 18) & 7
}

fn gpr(n: u32) -> &'static str {
    GPR[(n & 0x1f) as usize]
}

fn dot(w: u32) -> &'static str {
    if w & 1 != 0 {
        "."
    } else {
        ""
    }
}

/// Exchanges the D and A fields, for forms written `rA, rS, ...`.
fn swap_da(w: u32) -> u32 {
    (w & 0xfc00_ffff) | ((w & A_MASK) << 5) | ((w & D_MASK) >> 5)
}

/// Exchanges the A and B fields, for the `sub` simplified forms.
fn swap_ab(w: u32) -> u32 {
    (w & 0xffe0_07ff) | ((w & B_MASK) << 5) | ((w & A_MASK) >> 5)
}

fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}

/// Rotate-and-mask result mask, expressed relative to the source register.
fn rotate_mask(sh: u32, mb: u32, me: u32) -> u32 {
    let begin = u32::MAX >> mb;
    let end = if me < 31 { u32::MAX >> (me + 1) } else { 0 };
    let mask = begin ^ end;
    let mask = if me < mb { !mask } else { mask };
    mask.rotate_right(sh)
}

fn ldst_offset(d: u32) -> String {
    if d == 0 {
        "0".to_string()
    } else if d & 0x8000 != 0 {
        format!("-0x{:04X}", (!d & 0xffff) + 1)
    } else {
        format!("0x{d:04X}")
    }
}

fn psq_offset(d: u32) -> String {
    if d == 0 {
        "0".to_string()
    } else if d & 0x800 != 0 {
        format!("-0x{:04X}", (!d & 0xfff) + 1)
    } else {
        format!("0x{d:04X}")
    }
}

/// Register layout of a 16-bit immediate form.
#[derive(Debug, Clone, Copy)]
enum ImmLayout {
    /// `rD, rA, imm`
    DestSource,
    /// `rA, rS, imm`
    SourceDest,
    /// `rA, imm`
    Source,
    /// `rD, imm`
    Dest,
}

/// Record-bit rule of an X-form entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RcBit {
    /// Rc must be clear.
    Clear,
    /// Rc must be set; the mnemonic already carries the dot.
    Set,
    /// Rc selects the dotted form.
    Optional,
}

/// A register-only X/XO-form instruction.
#[derive(Debug, Clone, Copy)]
struct XForm {
    name: &'static str,
    /// Printed registers: 4 for D, 2 for A, 1 for B.
    regs: u8,
    /// Written `rA, rS, rB`.
    swap: bool,
    oe: bool,
    rc: RcBit,
    /// Fields that must be zero.
    reserved: u32,
    /// The B field is an immediate byte count appended after the registers.
    count: bool,
    flags: PpcFlags,
}

impl XForm {
    fn new(name: &'static str, regs: u8) -> Self {
        Self {
            name,
            regs,
            swap: false,
            oe: false,
            rc: RcBit::Clear,
            reserved: 0,
            count: false,
            flags: PpcFlags::NONE,
        }
    }

    fn swapped(mut self) -> Self {
        self.swap = true;
        self
    }

    fn oe(mut self) -> Self {
        self.oe = true;
        self
    }

    fn rc(mut self) -> Self {
        self.rc = RcBit::Optional;
        self
    }

    fn rc_set(mut self) -> Self {
        self.rc = RcBit::Set;
        self
    }

    fn reserved(mut self, mask: u32) -> Self {
        self.reserved = mask;
        self
    }

    fn count(mut self) -> Self {
        self.count = true;
        self
    }

    fn flags(mut self, flags: PpcFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Renderer state for one word.
pub(super) struct Render {
    word: u32,
    address: u32,
    out: PpcInstruction,
}

impl Render {
    pub(super) fn new(word: u32, address: u32) -> Self {
        Self {
            word,
            address,
            out: PpcInstruction::default(),
        }
    }

    pub(super) fn finish(self) -> PpcInstruction {
        self.out
    }

    fn set(&mut self, mnemonic: impl Into<String>, operands: impl Into<String>) {
        self.out.mnemonic = mnemonic.into();
        self.out.operands = operands.into();
    }

    fn add_flags(&mut self, flags: PpcFlags) {
        self.out.info.flags = self.out.info.flags.union(flags);
    }

    /// Marks the word as not naming an instruction. Clears anything a
    /// partially matched family already wrote.
    fn illegal(&mut self) {
        let w = self.word;
        self.out.info.kind = PpcKind::Other;
        self.out.info.target = None;
        self.out.info.base_register = None;
        self.out.info.displacement = 0;
        if w == 0 {
            self.set("", "---");
        } else {
            self.set("( ill )", format!("{w:08x}"));
        }
        self.out.info.flags.illegal = true;
    }

    pub(super) fn decode(&mut self) {
        let w = self.word;
        match primary(w) {
            2 => self.trap_immediate(true),
            3 => self.trap_immediate(false),
            4 => self.paired_single(),
            7 => {
                let ops = self.immediate(w, false, ImmLayout::DestSource, false);
                self.set("mulli", ops);
            }
            8 => {
                let ops = self.immediate(w, false, ImmLayout::DestSource, false);
                self.set("subfic", ops);
            }
            10 => self.compare_immediate(true),
            11 => self.compare_immediate(false),
            12 => self.add_immediate("ic"),
            13 => self.add_immediate("ic."),
            14 => self.add_immediate("i"),
            15 => self.add_immediate("is"),
            16 => self.branch_conditional(),
            17 if w & 0x03ff_ffff == 2 => self.set("sc", ""),
            18 => self.branch_long(),
            19 => self.opcode19(),
            20 => self.rotate("imi", false),
            21 => self.rotate("inm", false),
            23 => self.rotate("nm", true),
            24 if w & 0x03ff_ffff == 0 => self.set("nop", ""),
            24 => self.logical_immediate("ori"),
            25 => self.logical_immediate("oris"),
            26 => self.logical_immediate("xori"),
            27 => self.logical_immediate("xoris"),
            28 => self.logical_immediate("andi."),
            29 => self.logical_immediate("andis."),
            30 => self.rotate_doubleword(),
            31 => self.opcode31(),
            op @ 32..=47 => self.load_store(w, names::LOAD_STORE[(op - 32) as usize], 'r', PpcFlags::NONE),
            op @ 48..=55 => self.load_store(w, names::LOAD_STORE[(op - 32) as usize], 'f', PpcFlags::NONE),
            56 | 57 | 60 | 61 => self.paired_memory(),
            58 => match w & 3 {
                0 => self.load_store(w & !3, "ld", 'r', PpcFlags::ONLY_64BIT),
                1 => self.load_store(w & !3, "ldu", 'r', PpcFlags::ONLY_64BIT),
                2 => self.load_store(w & !3, "lwa", 'r', PpcFlags::ONLY_64BIT),
                _ => self.illegal(),
            },
            59 => self.opcode59(),
            62 => match w & 3 {
                0 => self.load_store(w & !3, "std", 'r', PpcFlags::ONLY_64BIT),
                1 => self.load_store(w & !3, "stdu", 'r', PpcFlags::ONLY_64BIT),
                _ => self.illegal(),
            },
            63 => self.opcode63(),
            _ => self.illegal(),
        }
    }

    /// Renders a 16-bit immediate and records it in the metadata.
    fn immediate(&mut self, w: u32, unsigned: bool, layout: ImmLayout, hex: bool) -> String {
        let raw = w & 0xffff;
        let value = if unsigned { raw as i32 } else { sign_extend(raw, 16) };
        self.out.info.kind = PpcKind::Immediate;
        self.out.info.displacement = value;
        if unsigned {
            self.out.info.flags.unsigned_immediate = true;
        }
        let text = if hex {
            format!("0x{value:04X}")
        } else {
            value.to_string()
        };
        match layout {
            ImmLayout::DestSource => format!("{}, {}, {text}", gpr(rd(w)), gpr(ra(w))),
            ImmLayout::SourceDest => format!("{}, {}, {text}", gpr(ra(w)), gpr(rd(w))),
            ImmLayout::Source => format!("{}, {text}", gpr(ra(w))),
            ImmLayout::Dest => format!("{}, {text}", gpr(rd(w))),
        }
    }

    fn trap_immediate(&mut self, doubleword: bool) {
        let w = self.word;
        let to = rd(w);
        let width = if doubleword { 'd' } else { 'w' };
        if doubleword {
            self.add_flags(PpcFlags::ONLY_64BIT);
        }
        let ops = self.immediate(w, false, ImmLayout::Source, false);
        match names::TRAP_CONDITION[to as usize] {
            Some(cond) => self.set(format!("t{width}{cond}i"), ops),
            None => self.set(format!("t{width}i"), format!("{to}, {ops}")),
        }
    }

    fn compare_immediate(&mut self, logical: bool) {
        let w = self.word;
        let l = (w >> 21) & 3;
        if l >= 2 {
            return self.illegal();
        }
        if l == 1 {
            self.add_flags(PpcFlags::ONLY_64BIT);
        }
        let name = names::CMP[logical as usize * 2 + l as usize];
        let mut ops = match crfd(w) {
            0 => String::new(),
            cr => format!("cr{cr}, "),
        };
        ops.push_str(&self.immediate(w, logical, ImmLayout::Source, false));
        self.set(format!("{name}i"), ops);
    }

    /// `addi` family, with the `li`/`lis` and `subi` simplified forms.
    fn add_immediate(&mut self, ext: &str) {
        let w = self.word;
        if w & 0x0800_0000 != 0 && ra(w) == 0 {
            let ops = if ext == "i" {
                self.immediate(w, false, ImmLayout::Dest, false)
            } else {
                self.immediate(w, true, ImmLayout::Dest, true)
            };
            self.set(format!("l{ext}"), ops);
        } else if w & 0x8000 != 0 {
            let negated = (w ^ 0xffff).wrapping_add(1);
            let ops = self.immediate(negated, true, ImmLayout::DestSource, false);
            self.set(format!("sub{ext}"), ops);
        } else {
            let ops = self.immediate(w, true, ImmLayout::DestSource, false);
            self.set(format!("add{ext}"), ops);
        }
    }

    /// Builds the mnemonic of a conditional branch and returns its leading
    /// condition operand, if the simplified form needs one.
    fn branch_mnemonic(&mut self, target_reg: &str, absolute: bool, disp: i32) -> Option<String> {
        let w = self.word;
        let bo = rd(w);
        let bi = ra(w);
        let mut taken = bo & 1 != 0;
        if disp < 0 {
            taken = !taken;
        }
        let hint = if taken { '+' } else { '-' };
        let ext = names::BRANCH_EXT[absolute as usize * 2 + (w & 1) as usize];
        self.out.info.kind = PpcKind::Branch;

        if bo & 4 != 0 {
            if bo & 16 != 0 {
                if primary(w) != 16 {
                    self.out.mnemonic = format!("b{target_reg}{ext}");
                    None
                } else {
                    self.out.mnemonic = format!("bc{ext}");
                    Some(format!("{bo}, {bi}"))
                }
            } else {
                let cond = names::BRANCH_CONDITION[(((bo & 8) >> 1) | (bi & 3)) as usize];
                self.out.mnemonic = format!("b{cond}{target_reg}{ext}{hint}");
                (bi >= 4).then(|| format!("cr{}", bi >> 2))
            }
        } else {
            let decrement = names::BRANCH_DECREMENT[(bo >> 1) as usize];
            self.out.mnemonic = format!("bd{decrement}{target_reg}{ext}{hint}");
            (bo & 16 == 0).then(|| bi.to_string())
        }
    }

    fn branch_conditional(&mut self) {
        let w = self.word;
        let disp = sign_extend(w & 0xfffc, 16);
        let absolute = w & 2 != 0;
        let cond = self.branch_mnemonic("", absolute, disp);
        let target = if absolute {
            disp as u32
        } else {
            self.address.wrapping_add(disp as u32)
        };
        self.out.operands = match cond {
            Some(cond) => format!("{cond}, ->0x{target:08X}"),
            None => format!("->0x{target:08X}"),
        };
        self.out.info.target = Some(target);
        self.out.info.displacement = disp;
    }

    fn branch_long(&mut self) {
        let w = self.word;
        let disp = sign_extend(w & 0x03ff_fffc, 26);
        let target = if w & 2 != 0 {
            disp as u32
        } else {
            self.address.wrapping_add(disp as u32)
        };
        self.set(format!("b{}", names::BRANCH_EXT[(w & 3) as usize]), format!("->0x{target:08X}"));
        self.out.info.kind = PpcKind::Branch;
        self.out.info.target = Some(target);
        self.out.info.displacement = disp;
    }

    fn branch_register(&mut self, target_reg: &str) {
        let cond = self.branch_mnemonic(target_reg, false, 0);
        self.out.operands = cond.unwrap_or_default();
    }

    fn move_cr_field(&mut self, suffix: &str) {
        let w = self.word;
        if w & 0x0063_f801 != 0 {
            return self.illegal();
        }
        self.set(format!("mcrf{suffix}"), format!("cr{}, cr{}", crfd(w), crfs(w)));
    }

    /// Condition register logic; `same` names the form used when both
    /// sources are the same bit.
    fn cr_logic(&mut self, name: &str, same: Option<&str>) {
        let w = self.word;
        if w & 1 != 0 {
            return self.illegal();
        }
        let (d, a, b) = (rd(w), ra(w), rb(w));
        match same {
            Some(short) if a == b => self.set(format!("cr{short}"), format!("{d}, {a}")),
            _ => self.set(format!("cr{name}"), format!("{d}, {a}, {b}")),
        }
    }

    fn no_operands(&mut self, name: &str, flags: PpcFlags) {
        if self.word & (D_MASK | A_MASK | B_MASK | 1) != 0 {
            return self.illegal();
        }
        self.add_flags(flags);
        self.set(name, "");
    }

    fn opcode19(&mut self) {
        match xo(self.word) {
            0 => self.move_cr_field(""),
            16 => self.branch_register("lr"),
            33 => self.cr_logic("nor", Some("not")),
            50 => self.no_operands("rfi", PpcFlags::SUPERVISOR),
            129 => self.cr_logic("andc", None),
            150 => self.no_operands("isync", PpcFlags::NONE),
            193 => self.cr_logic("xor", Some("clr")),
            225 => self.cr_logic("nand", None),
            257 => self.cr_logic("and", None),
            289 => self.cr_logic("eqv", Some("set")),
            417 => self.cr_logic("orc", None),
            449 => self.cr_logic("or", Some("move")),
            528 => self.branch_register("ctr"),
            _ => self.illegal(),
        }
    }

    /// `rlwimi`, `rlwinm` and `rlwnm`; `rlwinm` prefers its simplified forms.
    fn rotate(&mut self, name: &str, register_shift: bool) {
        let w = self.word;
        let (s, a, sh, mb, me) = (rd(w), ra(w), rb(w), rc(w), xo5(w));
        let rc = dot(w);

        if name == "inm" {
            let simplified = if mb == 0 && me == 31 {
                Some(("rotlwi", sh))
            } else if mb == 0 && me == 31 - sh {
                Some(("slwi", sh))
            } else if me == 31 && sh != 0 && sh == 32 - mb {
                Some(("srwi", mb))
            } else if sh == 0 && me == 31 {
                Some(("clrlwi", mb))
            } else {
                None
            };
            if let Some((short, n)) = simplified {
                return self.set(format!("{short}{rc}"), format!("{}, {}, {n}", gpr(a), gpr(s)));
            }
        }

        let (shift, mask) = if register_shift {
            (format!("r{sh}"), rotate_mask(0, mb, me))
        } else {
            (sh.to_string(), rotate_mask(sh, mb, me))
        };
        self.set(
            format!("rlw{name}{rc}"),
            format!("{}, {}, {shift}, {mb}, {me} ({mask:08x})", gpr(a), gpr(s)),
        );
    }

    fn logical_immediate(&mut self, name: &str) {
        let ops = self.immediate(self.word, true, ImmLayout::SourceDest, true);
        self.set(name, ops);
    }

    /// 64-bit MD/MDS-form rotates.
    fn rotate_doubleword(&mut self) {
        let w = self.word;
        let (s, a) = (rd(w), ra(w));
        let rc = dot(w);
        let mb_field = (w >> 5) & 0x3f;
        let mb = (mb_field >> 1) | ((mb_field & 1) << 5);
        let sh = rb(w) | ((w & 2) << 4);
        let name = match (w >> 2) & 7 {
            0 => "icl",
            1 => "icr",
            2 => "ic",
            3 => "imi",
            4 => {
                let name = if w & 2 == 0 { "cl" } else { "cr" };
                self.add_flags(PpcFlags::ONLY_64BIT);
                return self.set(format!("rld{name}{rc}"), format!("{}, {}, r{}, {mb}", gpr(a), gpr(s), rb(w)));
            }
            _ => return self.illegal(),
        };
        self.add_flags(PpcFlags::ONLY_64BIT);
        self.set(format!("rld{name}{rc}"), format!("{}, {}, {sh}, {mb}", gpr(a), gpr(s)));
    }

    fn compare(&mut self) {
        let w = self.word;
        let l = (w >> 21) & 3;
        if w & 1 != 0 || l >= 2 {
            return self.illegal();
        }
        if l == 1 {
            self.add_flags(PpcFlags::ONLY_64BIT);
        }
        let logical = xo(w) != 0;
        let mut ops = match crfd(w) {
            0 => String::new(),
            cr => format!("cr{cr}, "),
        };
        ops.push_str(&format!("{}, {}", gpr(ra(w)), gpr(rb(w))));
        self.set(names::CMP[logical as usize * 2 + l as usize], ops);
    }

    fn trap(&mut self, doubleword: bool) {
        let w = self.word;
        if w & 1 != 0 {
            return self.illegal();
        }
        let to = rd(w);
        let width = if doubleword { 'd' } else { 'w' };
        match names::TRAP_CONDITION[to as usize] {
            Some(cond) => {
                if doubleword {
                    self.add_flags(PpcFlags::ONLY_64BIT);
                }
                self.set(format!("t{width}{cond}"), format!("{}, {}", gpr(ra(w)), gpr(rb(w))));
            }
            None if to == 31 && doubleword => {
                self.add_flags(PpcFlags::ONLY_64BIT);
                self.set("td", format!("31, {}, {}", gpr(ra(w)), gpr(rb(w))));
            }
            None if to == 31 => self.set("trap", ""),
            None => self.illegal(),
        }
    }

    /// Renders an X/XO-form entry from `w`, which may have had fields swapped
    /// for a simplified mnemonic.
    fn x_form(&mut self, w: u32, x: XForm) {
        if self.word & x.reserved != 0 {
            return self.illegal();
        }
        match x.rc {
            RcBit::Clear if w & 1 != 0 => return self.illegal(),
            RcBit::Set if w & 1 == 0 => return self.illegal(),
            _ => {}
        }
        self.add_flags(x.flags);
        let w = if x.swap { swap_da(w) } else { w };
        let oe = if x.oe && w & OE != 0 { "o" } else { "" };
        let rc = if x.rc == RcBit::Optional { dot(w) } else { "" };

        let mut regs = Vec::with_capacity(3);
        if x.regs & 4 != 0 {
            regs.push(gpr(rd(w)).to_string());
        }
        if x.regs & 2 != 0 {
            regs.push(gpr(ra(w)).to_string());
        }
        if x.regs & 1 != 0 {
            regs.push(gpr(rb(w)).to_string());
        }
        if x.count {
            regs.push(rb(w).to_string());
        }
        self.set(format!("{}{oe}{rc}", x.name), regs.join(", "));
    }

    fn move_to_crf(&mut self) {
        let w = self.word;
        if w & 0x0010_0801 != 0 {
            return self.illegal();
        }
        let crm = (w >> 12) & 0xff;
        if crm == 0xff {
            self.set("mtcr", gpr(rd(w)));
        } else {
            self.set("mtcrf", format!("0x{crm:02x}, {}", gpr(rd(w))));
        }
    }

    fn segment_register(&mut self, to: bool) {
        let w = self.word;
        if w & 0x0010_f801 != 0 {
            return self.illegal();
        }
        self.add_flags(PpcFlags::SUPERVISOR);
        let sr = (w >> 16) & 0xf;
        if to {
            self.set("mtsr", format!("{sr}, {}", gpr(rd(w))));
        } else {
            self.set("mfsr", format!("{}, {sr}", gpr(rd(w))));
        }
    }

    fn special_register(&mut self, to: bool) {
        let w = self.word;
        if w & 1 != 0 {
            return self.illegal();
        }
        let spr = (rb(w) << 5) | ra(w);
        let dir = if to { 't' } else { 'f' };
        let reg = gpr(rd(w));
        let short = match spr {
            1 => Some("xer"),
            8 => Some("lr"),
            9 => Some("ctr"),
            _ => None,
        };
        match short {
            Some(name) => self.set(format!("m{dir}{name}"), reg),
            None => {
                self.add_flags(PpcFlags::SUPERVISOR);
                let name = names::spr(spr);
                if to {
                    self.set("mtspr", format!("{name}, {reg}"));
                } else {
                    self.set("mfspr", format!("{reg}, {name}"));
                }
            }
        }
    }

    fn move_from_time_base(&mut self) {
        let w = self.word;
        if w & 1 != 0 {
            return self.illegal();
        }
        let tbr = (rb(w) << 5) | ra(w);
        let reg = gpr(rd(w));
        match tbr {
            268 => self.set("mftbl", reg),
            269 => self.set("mftbu", reg),
            _ => {
                self.add_flags(PpcFlags::SUPERVISOR);
                self.set("mftb", format!("{reg}, {tbr}"));
            }
        }
    }

    fn shift_right_doubleword_immediate(&mut self) {
        let w = self.word;
        let sh = rb(w) | ((w & 2) << 4);
        self.add_flags(PpcFlags::ONLY_64BIT);
        self.set(format!("sradi{}", dot(w)), format!("{}, {}, {sh}", gpr(ra(w)), gpr(rd(w))));
    }

    /// Indexed float load/store: `fD, rA, rB`.
    fn float_indexed(&mut self, name: &str) {
        let w = self.word;
        self.set(name, format!("f{}, {}, {}", rd(w), gpr(ra(w)), gpr(rb(w))));
    }

    fn opcode31(&mut self) {
        let w = self.word;
        let x = XForm::new;
        match xo(w) {
            0 | 32 => self.compare(),
            4 => self.trap(false),
            8 | 520 => self.x_form(swap_ab(w), x("subc", 7).oe().rc()),
            9 => self.x_form(w, x("mulhdu", 7).rc().flags(PpcFlags::ONLY_64BIT)),
            10 | 522 => self.x_form(w, x("addc", 7).oe().rc()),
            11 => self.x_form(w, x("mulhwu", 7).rc()),
            19 => self.x_form(w, x("mfcr", 4).reserved(A_MASK | B_MASK)),
            20 => self.x_form(w, x("lwarx", 7)),
            21 => self.x_form(w, x("ldx", 7).flags(PpcFlags::ONLY_64BIT)),
            23 => self.x_form(w, x("lwzx", 7)),
            24 => self.x_form(w, x("slw", 7).swapped().rc()),
            26 => self.x_form(w, x("cntlzw", 6).swapped().rc().reserved(B_MASK)),
            27 => self.x_form(w, x("sld", 7).swapped().rc().flags(PpcFlags::ONLY_64BIT)),
            28 => self.x_form(w, x("and", 7).swapped().rc()),
            40 | 552 => self.x_form(swap_ab(w), x("sub", 7).oe().rc()),
            53 => self.x_form(w, x("ldux", 7).flags(PpcFlags::ONLY_64BIT)),
            54 => self.x_form(w, x("dcbst", 3).reserved(D_MASK)),
            55 => self.x_form(w, x("lwzux", 7)),
            58 => self.x_form(w, x("cntlzd", 6).swapped().rc().reserved(B_MASK).flags(PpcFlags::ONLY_64BIT)),
            60 => self.x_form(w, x("andc", 7).swapped().rc()),
            68 => self.trap(true),
            73 => self.x_form(w, x("mulhd", 7).rc().flags(PpcFlags::ONLY_64BIT)),
            75 => self.x_form(w, x("mulhw", 7).rc()),
            83 => self.x_form(w, x("mfmsr", 4).reserved(A_MASK | B_MASK).flags(PpcFlags::SUPERVISOR)),
            84 => self.x_form(w, x("ldarx", 7).flags(PpcFlags::ONLY_64BIT)),
            86 => self.x_form(w, x("dcbf", 3).reserved(D_MASK)),
            87 => self.x_form(w, x("lbzx", 7)),
            104 | 616 => self.x_form(w, x("neg", 6).oe().rc().reserved(B_MASK)),
            119 => self.x_form(w, x("lbzux", 7)),
            124 if rd(w) == rb(w) => self.x_form(w, x("not", 6).swapped().rc()),
            124 => self.x_form(w, x("nor", 7).swapped().rc()),
            136 | 648 => self.x_form(w, x("subfe", 7).oe().rc()),
            138 | 650 => self.x_form(w, x("adde", 7).oe().rc()),
            144 => self.move_to_crf(),
            146 => self.x_form(w, x("mtmsr", 4).reserved(A_MASK | B_MASK).flags(PpcFlags::SUPERVISOR)),
            149 => self.x_form(w, x("stdx", 7).flags(PpcFlags::ONLY_64BIT)),
            150 => self.x_form(w, x("stwcx.", 7).rc_set()),
            151 => self.x_form(w, x("stwx", 7)),
            181 => self.x_form(w, x("stdux", 7).flags(PpcFlags::ONLY_64BIT)),
            183 => self.x_form(w, x("stwux", 7)),
            200 | 712 => self.x_form(w, x("subfze", 6).oe().rc().reserved(B_MASK)),
            202 | 714 => self.x_form(w, x("addze", 6).oe().rc().reserved(B_MASK)),
            210 => self.segment_register(true),
            214 => self.x_form(w, x("stdcx.", 7).rc_set().flags(PpcFlags::ONLY_64BIT)),
            215 => self.x_form(w, x("stbx", 7)),
            232 | 744 => self.x_form(w, x("subfme", 6).oe().rc().reserved(B_MASK)),
            233 | 745 => self.x_form(w, x("mulld", 7).oe().rc().flags(PpcFlags::ONLY_64BIT)),
            234 | 746 => self.x_form(w, x("addme", 6).oe().rc().reserved(B_MASK)),
            235 | 747 => self.x_form(w, x("mullw", 7).oe().rc()),
            242 => self.x_form(w, x("mtsrin", 5).reserved(A_MASK).flags(PpcFlags::SUPERVISOR)),
            246 => self.x_form(w, x("dcbtst", 3).reserved(D_MASK)),
            247 => self.x_form(w, x("stbux", 7)),
            266 | 778 => self.x_form(w, x("add", 7).oe().rc()),
            278 => self.x_form(w, x("dcbt", 3).reserved(D_MASK)),
            279 => self.x_form(w, x("lhzx", 7)),
            284 => self.x_form(w, x("eqv", 7).swapped().rc()),
            306 => self.x_form(w, x("tlbie", 1).reserved(D_MASK | A_MASK).flags(PpcFlags::SUPERVISOR)),
            310 => self.x_form(w, x("eciwx", 7)),
            311 => self.x_form(w, x("lhzux", 7)),
            316 => self.x_form(w, x("xor", 7).swapped().rc()),
            339 => self.special_register(false),
            341 => self.x_form(w, x("lwax", 7).flags(PpcFlags::ONLY_64BIT)),
            343 => self.x_form(w, x("lhax", 7)),
            370 => self.no_operands("tlbia", PpcFlags::SUPERVISOR),
            371 => self.move_from_time_base(),
            373 => self.x_form(w, x("lwaux", 7).flags(PpcFlags::ONLY_64BIT)),
            375 => self.x_form(w, x("lhaux", 7)),
            407 => self.x_form(w, x("sthx", 7)),
            412 => self.x_form(w, x("orc", 7).swapped().rc()),
            434 => self.x_form(w, x("slbie", 1).reserved(D_MASK | A_MASK).flags(PpcFlags::SUPERVISOR_64BIT)),
            438 => self.x_form(w, x("ecowx", 7)),
            439 => self.x_form(w, x("sthux", 7)),
            444 if rd(w) == rb(w) => self.x_form(w, x("mr", 6).swapped().rc()),
            444 => self.x_form(w, x("or", 7).swapped().rc()),
            457 | 969 => self.x_form(w, x("divdu", 7).oe().rc().flags(PpcFlags::ONLY_64BIT)),
            459 | 971 => self.x_form(w, x("divwu", 7).oe().rc()),
            467 => self.special_register(true),
            470 => self.x_form(w, x("dcbi", 3).reserved(D_MASK).flags(PpcFlags::SUPERVISOR)),
            476 => self.x_form(w, x("nand", 7).swapped().rc()),
            489 | 1001 => self.x_form(w, x("divd", 7).oe().rc().flags(PpcFlags::ONLY_64BIT)),
            491 | 1003 => self.x_form(w, x("divw", 7).oe().rc()),
            498 => self.no_operands("slbia", PpcFlags::SUPERVISOR_64BIT),
            512 => {
                if w & 0x007f_f801 != 0 {
                    return self.illegal();
                }
                self.set("mcrxr", format!("cr{}", crfd(w)));
            }
            533 => self.x_form(w, x("lswx", 7)),
            534 => self.x_form(w, x("lwbrx", 7)),
            535 => self.float_indexed("lfsx"),
            536 => self.x_form(w, x("srw", 7).swapped().rc()),
            539 => self.x_form(w, x("srd", 7).swapped().rc().flags(PpcFlags::ONLY_64BIT)),
            566 => self.no_operands("tlbsync", PpcFlags::SUPERVISOR),
            567 => self.float_indexed("lfsux"),
            595 => self.segment_register(false),
            597 => self.x_form(w, x("lswi", 6).count()),
            598 => self.no_operands("sync", PpcFlags::NONE),
            599 => self.float_indexed("lfdx"),
            631 => self.float_indexed("lfdux"),
            659 => self.x_form(w, x("mfsrin", 5).reserved(A_MASK).flags(PpcFlags::SUPERVISOR)),
            661 => self.x_form(w, x("stswx", 7)),
            662 => self.x_form(w, x("stwbrx", 7)),
            663 => self.float_indexed("stfsx"),
            695 => self.float_indexed("stfsux"),
            725 => self.x_form(w, x("stswi", 6).count()),
            727 => self.float_indexed("stfdx"),
            759 => self.float_indexed("stfdux"),
            790 => self.x_form(w, x("lhbrx", 7)),
            792 => self.x_form(w, x("sraw", 7).swapped().rc()),
            794 => self.x_form(w, x("srad", 7).swapped().rc().flags(PpcFlags::ONLY_64BIT)),
            824 => self.x_form(w, x("srawi", 6).swapped().rc().count()),
            826 | 827 => self.shift_right_doubleword_immediate(),
            854 => self.no_operands("eieio", PpcFlags::NONE),
            918 => self.x_form(w, x("sthbrx", 7)),
            922 => self.x_form(w, x("extsh", 6).swapped().rc().reserved(B_MASK)),
            954 => self.x_form(w, x("extsb", 6).swapped().rc().reserved(B_MASK)),
            982 => self.x_form(w, x("icbi", 3).reserved(D_MASK)),
            983 => self.float_indexed("stfiwx"),
            986 => self.x_form(w, x("extsw", 6).swapped().rc().reserved(B_MASK).flags(PpcFlags::ONLY_64BIT)),
            1014 => self.x_form(w, x("dcbz", 3).reserved(D_MASK)),
            _ => self.illegal(),
        }
    }

    /// D-form load/store: `rS, offset (rA)`, or `fS, ...` for floats.
    fn load_store(&mut self, w: u32, name: &str, reg: char, flags: PpcFlags) {
        let (s, a, d) = (rd(w), ra(w), w & 0xffff);
        self.add_flags(flags);
        self.out.info.kind = PpcKind::LoadStore;
        self.out.info.base_register = Some(a as u8);
        self.out.info.displacement = sign_extend(d, 16);
        let dest = if reg == 'r' {
            gpr(s).to_string()
        } else {
            format!("{reg}{s}")
        };
        self.set(name, format!("{dest}, {} ({})", ldst_offset(d), gpr(a)));
    }

    /// Quantized paired-single load/store with a 12-bit displacement.
    fn paired_memory(&mut self) {
        let w = self.word;
        let name = match primary(w) {
            56 => "psq_l",
            57 => "psq_lu",
            60 => "psq_st",
            _ => "psq_stu",
        };
        let (s, a, d) = (rd(w), ra(w), w & 0xfff);
        let wide = (w >> 15) & 1;
        let qr = (w >> 12) & 7;
        self.out.info.kind = PpcKind::LoadStore;
        self.out.info.base_register = Some(a as u8);
        self.out.info.displacement = sign_extend(d, 12);
        self.set(name, format!("p{s}, {}(r{a}), {wide}, qr{qr}", psq_offset(d)));
    }

    /// Primary opcode 4: paired-single arithmetic, compares, merges and the
    /// indexed quantized loads/stores.
    fn paired_single(&mut self) {
        let w = self.word;
        let (d, a, b, c) = (rd(w), ra(w), rb(w), rc(w));
        let (name, ops) = match xo5(w) {
            6 | 7 => {
                let name = match (xo5(w), w & 0x40 != 0) {
                    (6, false) => "psq_lx",
                    (6, true) => "psq_lux",
                    (_, false) => "psq_stx",
                    (_, true) => "psq_stux",
                };
                let wide = (w >> 10) & 1;
                let qr = (w >> 7) & 7;
                self.out.info.kind = PpcKind::LoadStore;
                self.out.info.base_register = Some(a as u8);
                return self.set(name, format!("p{d}, r{a}, r{b}, {wide}, qr{qr}"));
            }
            10 => ("ps_sum0", format!("p{d}, 0=p{a}+p{b}, 1=p{c}")),
            11 => ("ps_sum1", format!("p{d}, 0=p{c}, 1=p{a}+p{b}")),
            12 => ("ps_muls0", format!("p{d}, p{a}*p{c}[0]")),
            13 => ("ps_muls1", format!("p{d}, p{a}*p{c}[1]")),
            14 => ("ps_madds0", format!("p{d}, p{a}*p{c}[0]+p{b}")),
            15 => ("ps_madds1", format!("p{d}, p{a}*p{c}[1]+p{b}")),
            18 => ("ps_div", format!("p{d}, p{a}/p{b}")),
            20 => ("ps_sub", format!("p{d}, p{a}-p{b}")),
            21 => ("ps_add", format!("p{d}, p{a}+p{b}")),
            23 => ("ps_sel", format!("p{d}, p{a}>=0?p{c}:p{b}")),
            24 => ("ps_res", format!("p{d}, (1/p{b})")),
            25 => ("ps_mul", format!("p{d}, p{a}*p{c}")),
            26 => ("ps_rsqrte", format!("p{d}, p{b}")),
            28 => ("ps_msub", format!("p{d}, p{a}*p{c}-p{b}")),
            29 => ("ps_madd", format!("p{d}, p{a}*p{c}+p{b}")),
            30 => ("ps_nmsub", format!("p{d}, -(p{a}*p{c}-p{b})")),
            31 => ("ps_nmadd", format!("p{d}, -(p{a}*p{c}+p{b})")),
            _ => match xo(w) {
                0 | 32 | 64 | 96 => {
                    let mut ops = match crfd(w) {
                        0 => String::new(),
                        cr => format!("cr{cr}, "),
                    };
                    ops.push_str(&format!("p{a}, p{b}"));
                    (names::PS_CMP[((w >> 6) & 3) as usize], ops)
                }
                40 => ("ps_neg", format!("p{d}, -p{b}")),
                72 => ("ps_mr", format!("p{d}, p{b}")),
                136 => ("ps_nabs", format!("p{d}, -|p{b}|")),
                264 => ("ps_abs", format!("p{d}, |p{b}|")),
                528 => ("ps_merge00", format!("p{d}, p{a}[0], p{b}[0]")),
                560 => ("ps_merge01", format!("p{d}, p{a}[0], p{b}[1]")),
                592 => ("ps_merge10", format!("p{d}, p{a}[1], p{b}[0]")),
                624 => ("ps_merge11", format!("p{d}, p{a}[1], p{b}[1]")),
                1014 => return self.x_form(w, XForm::new("dcbz_l", 3).reserved(D_MASK)),
                _ => return self.illegal(),
            },
        };
        self.set(name, ops);
    }

    /// Floating-point A-form: `fD[, fA][, fC][, fB]`. Fields not printed
    /// must be zero.
    fn float_arith(&mut self, name: &str, regs: u8, flags: PpcFlags) {
        let w = self.word;
        let mut ops = format!("f{}", rd(w));
        let mut stray = 0;
        for (bit, field) in [(4, ra(w)), (2, rc(w)), (1, rb(w))] {
            if regs & bit != 0 {
                ops.push_str(&format!(", f{field}"));
            } else {
                stray |= field;
            }
        }
        if stray != 0 {
            return self.illegal();
        }
        self.add_flags(flags);
        self.set(format!("f{name}{}", dot(w)), ops);
    }

    fn opcode59(&mut self) {
        let f = PpcFlags::NONE;
        match xo5(self.word) {
            18 => self.float_arith("divs", 5, f),
            20 => self.float_arith("subs", 5, f),
            21 => self.float_arith("adds", 5, f),
            22 => self.float_arith("sqrts", 1, f),
            24 => self.float_arith("res", 1, f),
            25 => self.float_arith("muls", 6, f),
            28 => self.float_arith("msubs", 7, f),
            29 => self.float_arith("madds", 7, f),
            30 => self.float_arith("nmsubs", 7, f),
            31 => self.float_arith("nmadds", 7, f),
            _ => self.illegal(),
        }
    }

    fn float_compare(&mut self, kind: char) {
        let w = self.word;
        if w & 0x0060_0001 != 0 {
            return self.illegal();
        }
        self.set(format!("fcmp{kind}"), format!("cr{}, f{}, f{}", crfd(w), ra(w), rb(w)));
    }

    fn fpscr_bit(&mut self, value: u8) {
        let w = self.word;
        if w & (A_MASK | B_MASK) != 0 {
            return self.illegal();
        }
        self.set(format!("mtfsb{value}{}", dot(w)), rd(w).to_string());
    }

    fn opcode63(&mut self) {
        let w = self.word;
        let f = PpcFlags::NONE;
        if w & 32 != 0 {
            return match xo5(w) {
                18 => self.float_arith("div", 5, f),
                20 => self.float_arith("sub", 5, f),
                21 => self.float_arith("add", 5, f),
                22 => self.float_arith("sqrt", 1, f),
                23 => self.float_arith("sel", 7, f),
                25 => self.float_arith("mul", 6, f),
                26 => self.float_arith("rsqrte", 1, f),
                28 => self.float_arith("msub", 7, f),
                29 => self.float_arith("madd", 7, f),
                30 => self.float_arith("nmsub", 7, f),
                31 => self.float_arith("nmadd", 7, f),
                _ => self.illegal(),
            };
        }
        match xo(w) {
            0 => self.float_compare('u'),
            12 => self.float_arith("rsp", 1, f),
            14 => self.float_arith("ctiw", 1, f),
            15 => self.float_arith("ctiwz", 1, f),
            32 => self.float_compare('o'),
            38 => self.fpscr_bit(1),
            40 => self.float_arith("neg", 1, f),
            64 => self.move_cr_field("s"),
            70 => self.fpscr_bit(0),
            72 => {
                if ra(w) != 0 {
                    return self.illegal();
                }
                self.set(format!("fmr{}", dot(w)), format!("f{}, f{}", rd(w), rb(w)));
            }
            134 => {
                if w & 0x006f_0800 != 0 {
                    return self.illegal();
                }
                self.set(format!("mtfsfi{}", dot(w)), format!("cr{}, {}", crfd(w), (w >> 12) & 0xf));
            }
            136 => self.float_arith("nabs", 1, f),
            264 => self.float_arith("abs", 1, f),
            583 => {
                if w & (A_MASK | B_MASK) != 0 {
                    return self.illegal();
                }
                self.set(format!("mffs{}", dot(w)), format!("f{}", rd(w)));
            }
            711 => {
                if w & 0x0201_0000 != 0 {
                    return self.illegal();
                }
                self.set(format!("mtfsf{}", dot(w)), format!("0x{:x}, f{}", (w >> 17) & 0xff, rb(w)));
            }
            814 => self.float_arith("ctid", 1, PpcFlags::ONLY_64BIT),
            815 => self.float_arith("ctidz", 1, PpcFlags::ONLY_64BIT),
            846 => self.float_arith("cfid", 1, PpcFlags::ONLY_64BIT),
            _ => self.illegal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_mask() {
        assert_eq!(rotate_mask(0, 0, 29), 0xffff_fffc);
        assert_eq!(rotate_mask(0, 16, 31), 0x0000_ffff);
        assert_eq!(rotate_mask(8, 16, 23), 0x0000_00ff);
        // wrap-around mask
        assert_eq!(rotate_mask(0, 5, 2), 0xe7ff_ffff);
        assert_eq!(rotate_mask(0, 5, 4), u32::MAX);
    }

    #[test]
    fn test_offsets() {
        assert_eq!(ldst_offset(0), "0");
        assert_eq!(ldst_offset(8), "0x0008");
        assert_eq!(ldst_offset(0xfffc), "-0x0004");
        assert_eq!(psq_offset(0xff0), "-0x0010");
        assert_eq!(psq_offset(0x7ff), "0x07FF");
    }

    #[test]
    fn test_field_swaps() {
        // subf r3, r4, r5
        let w = 0x7c64_2850;
        let swapped = swap_ab(w);
        assert_eq!((rd(swapped), ra(swapped), rb(swapped)), (3, 5, 4));
        let swapped = swap_da(w);
        assert_eq!((rd(swapped), ra(swapped), rb(swapped)), (4, 3, 5));
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(sign_extend(0xfff8, 16), -8);
        assert_eq!(sign_extend(0x7fff, 16), 0x7fff);
        assert_eq!(sign_extend(0x03ff_fffc, 26), -4);
        assert_eq!(sign_extend(0x800, 12), -2048);
    }
}
