//! Operand-shape errors.
//!
//! The printer works on trusted, already-decoded input, so it has no
//! recoverable error taxonomy of its own. A [`ShapeError`] describes an
//! instruction whose operand list does not match its opcode's template.
//! [`Instruction::validate`](crate::Instruction::validate) returns it;
//! the printer aborts with its `Display` text.

use core::fmt;

use crate::desc::Opcode;

/// The kind tag carried by an [`Operand`](crate::Operand).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OperandKind {
    /// A register (including the absent register `NoReg`).
    Register,
    /// A 64-bit signed immediate.
    Immediate,
    /// A symbolic expression.
    Expression,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperandKind::Register => write!(f, "register"),
            OperandKind::Immediate => write!(f, "immediate"),
            OperandKind::Expression => write!(f, "expression"),
        }
    }
}

/// What a template slot requires of the operand it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expected {
    /// Must be a register.
    Register,
    /// Must be an immediate.
    Immediate,
    /// An immediate or a symbolic expression (displacements, branch targets).
    ImmOrExpr,
}

impl Expected {
    /// Whether an operand of kind `kind` satisfies this requirement.
    #[must_use]
    pub fn accepts(self, kind: OperandKind) -> bool {
        match self {
            Expected::Register => kind == OperandKind::Register,
            Expected::Immediate => kind == OperandKind::Immediate,
            Expected::ImmOrExpr => {
                matches!(kind, OperandKind::Immediate | OperandKind::Expression)
            }
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Register => write!(f, "a register"),
            Expected::Immediate => write!(f, "an immediate"),
            Expected::ImmOrExpr => write!(f, "an immediate or expression"),
        }
    }
}

/// An instruction's operands do not match its opcode's declared shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeError {
    /// The operand list has the wrong length.
    OperandCount {
        /// The instruction's opcode.
        opcode: Opcode,
        /// Operand count declared by the descriptor.
        expected: usize,
        /// Operand count actually present.
        found: usize,
    },

    /// A template slot refers past the end of the operand list.
    MissingOperand {
        /// The instruction's opcode.
        opcode: Opcode,
        /// The operand index that was requested.
        index: usize,
    },

    /// The opcode names an instruction form that does not exist, such as
    /// a broadcast byte compare.
    UndefinedForm {
        /// The instruction's opcode.
        opcode: Opcode,
    },

    /// An operand has the wrong kind for the slot that reads it.
    OperandKind {
        /// The instruction's opcode.
        opcode: Opcode,
        /// Index of the offending operand.
        index: usize,
        /// What the slot requires.
        expected: Expected,
        /// What was found.
        found: OperandKind,
    },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeError::OperandCount {
                opcode,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{:?}: expected {} operands, found {}",
                    opcode, expected, found
                )
            }
            ShapeError::UndefinedForm { opcode } => {
                write!(f, "{:?}: no such instruction form", opcode)
            }
            ShapeError::MissingOperand { opcode, index } => {
                write!(f, "{:?}: operand {} is missing", opcode, index)
            }
            ShapeError::OperandKind {
                opcode,
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "{:?}: operand {} must be {}, found {}",
                    opcode, index, expected, found
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShapeError {}
