//! Compare instructions whose mnemonic encodes the predicate immediate.
//!
//! `vpcom` (XOP) and `vpcmp` (AVX-512) take a condition code as their
//! trailing immediate. When the code is one with a name, the printer
//! folds it into the mnemonic (`vpcomltb`, `vpcmpnleud`) and drops the
//! immediate. [`plan`] decides whether that applies and which operands
//! to print; reserved or out-of-range codes return `None`, and the
//! generic template prints the immediate instead.

use core::fmt;

use crate::desc::{CmpElem, Form, InstrDesc, Opcode, TsFlags};

/// Which compare family a mnemonic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// XOP `vpcom`.
    Vpcom,
    /// AVX-512 `vpcmp`.
    Vpcmp,
}

/// A resolved mnemonic: family, condition and element suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareMnemonic {
    /// Family prefix.
    pub family: Family,
    /// Condition name (`lt`, `neq`, …).
    pub cond: &'static str,
    /// Element type.
    pub elem: CmpElem,
}

impl fmt::Display for CompareMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.family {
            Family::Vpcom => "vpcom",
            Family::Vpcmp => "vpcmp",
        };
        write!(f, "{}{}{}", prefix, self.cond, self.elem.suffix())
    }
}

/// Where the printed second source comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// A plain register operand.
    Operand(usize),
    /// A full-width memory group.
    Mem {
        /// First operand of the group.
        op: usize,
    },
    /// A broadcast memory element, followed by `{1toN}`.
    Broadcast {
        /// First operand of the group.
        op: usize,
        /// Number of lanes.
        count: u8,
    },
}

/// Operands to print after the folded mnemonic, in output order:
/// `src, src2, dst` then ` {mask}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparePlan {
    /// The mnemonic.
    pub mnemonic: CompareMnemonic,
    /// First printed operand.
    pub src: Source,
    /// Second printed operand.
    pub src2: usize,
    /// Destination operand.
    pub dst: usize,
    /// Mask register operand, if the form is masked.
    pub mask: Option<usize>,
}

const VPCOM_CONDS: [&str; 8] = ["lt", "le", "gt", "ge", "eq", "neq", "false", "true"];
const VPCMP_CONDS: [Option<&str>; 8] = [
    Some("eq"),
    Some("lt"),
    Some("le"),
    None,
    Some("neq"),
    Some("nlt"),
    Some("nle"),
    None,
];

/// Condition name for a `vpcom` immediate, 0 through 7.
pub fn vpcom_cond(imm: i64) -> Option<&'static str> {
    usize::try_from(imm)
        .ok()
        .and_then(|i| VPCOM_CONDS.get(i))
        .copied()
}

/// Condition name for a `vpcmp` immediate; 3 and 7 are reserved.
pub fn vpcmp_cond(imm: i64) -> Option<&'static str> {
    usize::try_from(imm)
        .ok()
        .and_then(|i| VPCMP_CONDS.get(i))
        .copied()
        .flatten()
}

/// Plan the folded rendering of `opcode` with trailing immediate `imm`.
///
/// Returns `None` for opcodes outside both families and for immediates
/// without a condition name.
pub fn plan(opcode: Opcode, desc: &InstrDesc, imm: i64) -> Option<ComparePlan> {
    match opcode {
        Opcode::Vpcom { elem, .. } => {
            let cond = vpcom_cond(imm)?;
            let src = if desc.form == Form::MrmSrcMem {
                Source::Mem { op: 2 }
            } else {
                Source::Operand(2)
            };
            Some(ComparePlan {
                mnemonic: CompareMnemonic {
                    family: Family::Vpcom,
                    cond,
                    elem,
                },
                src,
                src2: 1,
                dst: 0,
                mask: None,
            })
        }
        Opcode::Vpcmp { elem, .. } => {
            let cond = vpcmp_cond(imm)?;
            let flags = desc.flags;
            // Operands past the destination are consumed from the end:
            // source, first source, then the mask if one remains.
            let mut cursor = if flags.contains(TsFlags::EVEX_K) { 3 } else { 2 };
            let src = if desc.form == Form::MrmSrcMem {
                if flags.contains(TsFlags::EVEX_B) {
                    Source::Broadcast {
                        op: cursor,
                        count: desc.broadcast_count(),
                    }
                } else {
                    Source::Mem { op: cursor }
                }
            } else {
                Source::Operand(cursor)
            };
            cursor -= 1;
            let src2 = cursor;
            cursor -= 1;
            Some(ComparePlan {
                mnemonic: CompareMnemonic {
                    family: Family::Vpcmp,
                    cond,
                    elem,
                },
                src,
                src2,
                dst: 0,
                mask: (cursor > 0).then_some(cursor),
            })
        }
        _ => None,
    }
}
