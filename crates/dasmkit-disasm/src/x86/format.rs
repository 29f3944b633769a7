//! Syntax front end: mnemonic decoration and operand ordering.

use dasmkit_core::{ControlFlow, Syntax};

use super::cursor::Cursor;
use super::insn::Insn;
use super::operand::{self, Context, Op};
use super::prefix::SsePrefix;
use super::regs::{self, Width};
use super::tables::{OpcodeInfo, Suffix};
use crate::DecodeError;

/// Mnemonic and operand text of one instruction, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Rendered {
    pub mnemonic: String,
    pub operands: String,
}

/// Renders `info` for the decoded `insn`.
///
/// Operands are formatted in table (Intel) order because immediates are
/// fetched as they are rendered; AT&T then reverses the finished list.
pub(crate) fn render(
    info: &OpcodeInfo,
    insn: &mut Insn,
    cur: &mut Cursor<'_>,
    ctx: &Context,
) -> Result<Rendered, DecodeError> {
    let mut operands = Vec::with_capacity(info.operands.len() + 1);
    for &op in info.operands {
        operands.push(operand::format(op, insn, cur, ctx)?);
    }
    decorate_evex(insn, ctx, &mut operands);

    if ctx.syntax == Syntax::Att {
        if is_indirect_branch(info) {
            if let Some(target) = operands.first_mut() {
                target.insert(0, '*');
            }
        }
        operands.reverse();
    }

    let mut mnemonic = prefix_text(info, insn);
    match ctx.syntax {
        Syntax::Intel => mnemonic.push_str(info.intel),
        Syntax::Att => {
            mnemonic.push_str(info.att);
            if let Some(c) = suffix_char(info.suffix, insn) {
                mnemonic.push(c);
            }
        }
    }

    let mut operands = operands.join(", ");
    if insn.malformed() {
        if let Some(kind) = insn.vector.map(|v| v.kind) {
            if !operands.is_empty() {
                operands.push(' ');
            }
            operands.push_str(kind.diagnostic());
        }
    }
    Ok(Rendered { mnemonic, operands })
}

/// `lock` and the repeat prefixes, which print ahead of the mnemonic.
fn prefix_text(info: &OpcodeInfo, insn: &Insn) -> String {
    let mut text = String::new();
    if insn.prefixes.lock {
        text.push_str("lock ");
    }
    if !insn.sse_dispatched && insn.vector.is_none() && info.operands.iter().any(|op| op.is_string()) {
        let compares = info.intel.starts_with("cmps") || info.intel.starts_with("scas");
        match insn.sse {
            SsePrefix::F3 if compares => text.push_str("repe "),
            SsePrefix::F3 => text.push_str("rep "),
            SsePrefix::F2 => text.push_str("repne "),
            _ => {}
        }
    }
    text
}

fn suffix_char(suffix: Suffix, insn: &Insn) -> Option<char> {
    let width = match suffix {
        Suffix::None => return None,
        Suffix::B => Width::W8,
        Suffix::W => Width::W16,
        Suffix::V => insn.os,
        Suffix::S => insn.stack_width(),
        Suffix::Y => insn.width_y(),
    };
    Some(match width {
        Width::W8 => 'b',
        Width::W16 => 'w',
        Width::W32 => 'l',
        Width::W64 => 'q',
    })
}

/// `call`/`jmp` through a register or memory take a `*` in AT&T.
fn is_indirect_branch(info: &OpcodeInfo) -> bool {
    let branch = info.intel.starts_with("call") || info.intel.starts_with("jmp");
    branch && matches!(info.operands.first(), Some(Op::Evs | Op::Mp))
}

/// Opmask and zeroing go on the destination; embedded rounding becomes a
/// trailing pseudo-operand.
fn decorate_evex(insn: &Insn, ctx: &Context, operands: &mut Vec<String>) {
    let Some(evex) = insn.evex() else {
        return;
    };
    if let Some(dest) = operands.first_mut() {
        if evex.aaa != 0 {
            let mask = regs::OPMASK[evex.aaa as usize];
            match ctx.syntax {
                Syntax::Intel => dest.push_str(&format!("{{{mask}}}")),
                Syntax::Att => dest.push_str(&format!("{{%{mask}}}")),
            }
        }
        if evex.z {
            dest.push_str("{z}");
        }
    }
    if evex.b && insn.is_register_form() && !operands.is_empty() {
        let rounding = match evex.ll {
            0 => "{rn-sae}",
            1 => "{rd-sae}",
            2 => "{ru-sae}",
            _ => "{rz-sae}",
        };
        operands.push(rounding.to_string());
    }
}

/// Control-flow kind implied by the mnemonic.
pub(crate) fn control_flow(info: &OpcodeInfo, target: Option<u64>) -> ControlFlow {
    let name = info.intel;
    if name.starts_with("call") {
        ControlFlow::Call { target }
    } else if name.starts_with("jmp") {
        ControlFlow::Jump { target }
    } else if name.starts_with('j') || name.starts_with("loop") {
        ControlFlow::ConditionalJump { target }
    } else if name.starts_with("ret") || name.starts_with("iret") {
        ControlFlow::Return
    } else {
        ControlFlow::Sequential
    }
}
