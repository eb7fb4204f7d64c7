//! Preferred alternate spellings.
//!
//! Some encodings have a shorter or more conventional spelling when their
//! operands take a particular form: `fxch %st(1)` is written `fxch`,
//! `aam $10` is `aam`, `imull $3, %eax, %eax` is `imull $3, %eax`. The
//! table is scanned in order and the first entry whose opcode matches and
//! whose condition holds replaces the generic template, so entries are
//! listed most specific first.

use crate::desc::{Opcode, Print};
use crate::ir::{FeatureBits, Instruction, Register};

use Print::*;

/// When an alias applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasCond {
    /// Unconditionally.
    Always,
    /// When every given feature bit is set.
    Feature(FeatureBits),
    /// When operand `.0` is register `.1`.
    RegIs(u8, Register),
    /// When operand `.0` is immediate `.1`.
    ImmIs(u8, i64),
    /// When operands `.0` and `.1` are the same register.
    SameOperand(u8, u8),
    /// When every nested condition holds.
    All(&'static [AliasCond]),
}

impl AliasCond {
    /// Evaluate against an instruction and the active features.
    pub fn holds(&self, inst: &Instruction, features: FeatureBits) -> bool {
        let reg = |i: u8| inst.operands.get(usize::from(i)).and_then(|op| op.reg());
        match *self {
            AliasCond::Always => true,
            AliasCond::Feature(bits) => features.contains(bits),
            AliasCond::RegIs(i, r) => reg(i) == Some(r),
            AliasCond::ImmIs(i, v) => {
                inst.operands.get(usize::from(i)).and_then(|op| op.imm()) == Some(v)
            }
            AliasCond::SameOperand(a, b) => match (reg(a), reg(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
            AliasCond::All(conds) => conds.iter().all(|c| c.holds(inst, features)),
        }
    }
}

/// One alias: the opcode it applies to, its condition and what to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasEntry {
    /// Opcode the entry applies to.
    pub opcode: Opcode,
    /// Condition on operands and features.
    pub cond: AliasCond,
    /// Replacement mnemonic.
    pub mnemonic: &'static str,
    /// Operands to print, in AT&T order.
    pub operands: &'static [Print],
}

const fn alias(
    opcode: Opcode,
    cond: AliasCond,
    mnemonic: &'static str,
    operands: &'static [Print],
) -> AliasEntry {
    AliasEntry {
        opcode,
        cond,
        mnemonic,
        operands,
    }
}

/// The default alias table.
pub static ALIASES: &[AliasEntry] = &[
    // x87: the implicit `%st(1)` operand is left out.
    alias(Opcode::XCHF, AliasCond::RegIs(0, Register::St1), "fxch", &[]),
    alias(Opcode::COMFST0r, AliasCond::RegIs(0, Register::St1), "fcom", &[]),
    alias(Opcode::COMPFST0r, AliasCond::RegIs(0, Register::St1), "fcomp", &[]),
    alias(Opcode::UCOMFr, AliasCond::RegIs(0, Register::St1), "fucom", &[]),
    alias(Opcode::UCOMFPr, AliasCond::RegIs(0, Register::St1), "fucomp", &[]),
    // BCD adjust with the default base 10.
    alias(Opcode::AAM8i8, AliasCond::ImmIs(0, 10), "aam", &[]),
    alias(Opcode::AAD8i8, AliasCond::ImmIs(0, 10), "aad", &[]),
    // Operand-size suffix is implied by the mode.
    alias(Opcode::IRET16, AliasCond::Feature(FeatureBits::MODE_16BIT), "iret", &[]),
    alias(Opcode::IRET32, AliasCond::Feature(FeatureBits::MODE_32BIT), "iret", &[]),
    alias(Opcode::POPF16, AliasCond::Feature(FeatureBits::MODE_16BIT), "popf", &[]),
    alias(Opcode::PUSHF16, AliasCond::Feature(FeatureBits::MODE_16BIT), "pushf", &[]),
    // Two-operand multiply when source and destination coincide.
    alias(Opcode::IMUL32rri, AliasCond::SameOperand(0, 1), "imull", &[Op(2), Op(0)]),
    alias(Opcode::IMUL64rri8, AliasCond::SameOperand(0, 1), "imulq", &[Op(2), Op(0)]),
];

/// First entry of `table` that applies to `inst`.
pub fn find<'t>(
    table: &'t [AliasEntry],
    inst: &Instruction,
    features: FeatureBits,
) -> Option<&'t AliasEntry> {
    table
        .iter()
        .find(|e| e.opcode == inst.opcode && e.cond.holds(inst, features))
}
