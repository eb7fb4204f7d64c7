//! # att-rs: AT&T-Syntax x86 Instruction Printer
//!
//! `att-rs` renders decoded x86 instructions as AT&T (GAS) assembly text:
//! `%`-prefixed registers, `$`-prefixed immediates, source before
//! destination, `seg:disp(base,index,scale)` memory references.
//!
//! ## Quick Start
//!
//! ```rust
//! use att_rs::{print_inst, FeatureBits, Instruction, Opcode, Register};
//!
//! let inst = Instruction::builder(Opcode::MOV32rm)
//!     .reg(Register::Eax)
//!     .mem(Register::Rbx, 4, Register::Rcx, -8, Register::NoReg)
//!     .build();
//! assert_eq!(print_inst(&inst, FeatureBits::MODE_64BIT), "\tmovl\t-8(%rbx,%rcx,4), %eax");
//! ```
//!
//! ## Features
//!
//! - **Alias spellings**: `fxch`, `aam`, two-operand `imul` and friends.
//! - **Folded compare predicates**: `vpcomltb`, `vpcmpnleud … {%k1}`.
//! - **Verbose comments**: shuffle lane decoding and `imm = 0x…` for
//!   large immediates, written to a separate comment sink.
//! - **Markup**: optional `<reg:…>` / `<imm:…>` / `<mem:…>` markers.
//! - **`no_std` + `alloc`**: the printer writes to any `core::fmt::Write`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// The printer reinterprets immediates at several widths (i64→u16/u32/u64
// for hex comments, i64→u8 lanes) and the descriptor table repeats the
// same template across many opcodes. The lints below are expected.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::match_same_arms,
    clippy::redundant_closure_for_method_calls,
    clippy::wildcard_imports,
    clippy::enum_glob_use,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

extern crate alloc;

/// Alias table: preferred spellings selected by operand or mode conditions.
pub mod alias;
/// Compare families whose predicate immediate is folded into the mnemonic.
pub mod compare;
/// Instruction comments and immediate hex comments.
pub mod comments;
/// Opcodes and their static descriptors (mnemonic, operand count, template).
pub mod desc;
/// Operand-shape errors.
pub mod error;
/// Instruction representation: registers, operands, memory groups, flags.
pub mod ir;
/// The AT&T printer.
pub mod printer;

// Re-exports
pub use alias::{AliasCond, AliasEntry, ALIASES};
pub use comments::{InstComments, NoComments, ShuffleComments};
pub use desc::{CmpElem, InstrDesc, Opcode, VecWidth, VpcmpForm, VpcomForm};
pub use error::{Expected, OperandKind, ShapeError};
pub use ir::{Expr, FeatureBits, InstFlags, Instruction, InstructionBuilder, MemRef, Operand, Register};
pub use printer::{AttPrinter, PrintOptions};

use alloc::string::String;

/// Print one instruction with default options.
///
/// # Panics
///
/// If `inst` does not match its opcode's descriptor; see
/// [`Instruction::validate`].
///
/// # Examples
///
/// ```rust
/// use att_rs::{print_inst, FeatureBits, Instruction, Opcode, Register};
///
/// let inst = Instruction::new(Opcode::PUSH64r, vec![Register::Rbp.into()]);
/// assert_eq!(print_inst(&inst, FeatureBits::MODE_64BIT), "\tpushq\t%rbp");
/// ```
pub fn print_inst(inst: &Instruction, features: FeatureBits) -> String {
    AttPrinter::new().print_to_string(inst, features)
}

/// Print one instruction with explicit options, collecting comments.
///
/// Returns the instruction text and the comment lines (each ending in
/// `\n`, possibly empty).
///
/// # Panics
///
/// If `inst` does not match its opcode's descriptor.
///
/// # Examples
///
/// ```rust
/// use att_rs::{print_inst_with, FeatureBits, Instruction, Opcode, PrintOptions, Register};
///
/// let inst = Instruction::new(Opcode::MOV32ri, vec![Register::Ecx.into(), 70000i64.into()]);
/// let (text, comments) = print_inst_with(&inst, FeatureBits::MODE_64BIT, PrintOptions::default());
/// assert_eq!(text, "\tmovl\t$70000, %ecx");
/// assert_eq!(comments, "imm = 0x11170\n");
/// ```
pub fn print_inst_with(
    inst: &Instruction,
    features: FeatureBits,
    options: PrintOptions,
) -> (String, String) {
    let mut text = String::new();
    let mut comments = String::new();
    // Writing to a String cannot fail.
    let _ = AttPrinter::with_options(options).print_inst(
        inst,
        features,
        "",
        &mut text,
        Some(&mut comments),
    );
    (text, comments)
}
