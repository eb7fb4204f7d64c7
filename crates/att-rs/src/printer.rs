//! AT&T-syntax rendering.
//!
//! [`AttPrinter`] turns one [`Instruction`] into one line of text:
//!
//! ```text
//! \t[prefixes]<mnemonic>\t<operand>, <operand>, ...
//! ```
//!
//! Dispatch runs in a fixed order and exactly one path prints the body:
//! the mode-dependent special cases, the alias table, the folded compare
//! mnemonics, then the opcode's generic template. Comments (instruction
//! comments, hex values of large immediates, the caller's annotation) go
//! to an optional second sink.
//!
//! Instructions are expected to match their opcode's descriptor. A
//! mismatch is a bug in whatever built the instruction and panics with a
//! [`ShapeError`] message; use [`Instruction::validate`] to check first.

use alloc::string::String;
use core::fmt;

use crate::alias::{self, AliasEntry, ALIASES};
use crate::comments::{self, InstComments, ShuffleComments};
use crate::compare::{self, ComparePlan, Source};
use crate::desc::{self, InstrDesc, Opcode, Print, TsFlags};
use crate::error::{Expected, ShapeError};
use crate::ir::{Expr, FeatureBits, InstFlags, Instruction, MemRef, Operand, Register};

/// Output options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintOptions {
    /// Print immediates and displacements in hex (`$0x1f`, `-0x8(%rbp)`).
    pub print_imm_hex: bool,
    /// Wrap registers, immediates and memory references in `<reg:…>`,
    /// `<imm:…>` and `<mem:…>` markers.
    pub use_markup: bool,
}

/// The AT&T instruction printer.
///
/// Holds only configuration and references to static tables; every call
/// to [`print_inst`](Self::print_inst) is independent.
///
/// # Examples
///
/// ```
/// use att_rs::{AttPrinter, FeatureBits, Instruction, Opcode, Register};
///
/// let inst = Instruction::builder(Opcode::ADD32ri)
///     .reg(Register::Eax)
///     .reg(Register::Eax)
///     .imm(1000)
///     .build();
///
/// let mut printer = AttPrinter::new();
/// printer.print_imm_hex(true);
///
/// let mut line = String::new();
/// let mut notes = String::new();
/// printer.print_inst(&inst, FeatureBits::MODE_64BIT, "", &mut line, Some(&mut notes))?;
/// assert_eq!(line, "\taddl\t$0x3e8, %eax");
/// assert_eq!(notes, "imm = 0x3E8\n");
/// # Ok::<(), core::fmt::Error>(())
/// ```
#[derive(Clone, Copy)]
pub struct AttPrinter<'t> {
    options: PrintOptions,
    aliases: &'t [AliasEntry],
    comments: &'t (dyn InstComments + Sync),
}

impl fmt::Debug for AttPrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttPrinter")
            .field("options", &self.options)
            .field("aliases", &self.aliases.len())
            .finish_non_exhaustive()
    }
}

impl AttPrinter<'static> {
    /// A printer with default options, the built-in alias table and
    /// shuffle comments.
    pub fn new() -> Self {
        Self::with_options(PrintOptions::default())
    }

    /// A printer with the given options.
    pub fn with_options(options: PrintOptions) -> Self {
        Self {
            options,
            aliases: ALIASES,
            comments: &ShuffleComments,
        }
    }
}

impl Default for AttPrinter<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> AttPrinter<'t> {
    /// Print immediates in hex.
    pub fn print_imm_hex(&mut self, on: bool) -> &mut Self {
        self.options.print_imm_hex = on;
        self
    }

    /// Emit `<reg:>`/`<imm:>`/`<mem:>` markup.
    pub fn use_markup(&mut self, on: bool) -> &mut Self {
        self.options.use_markup = on;
        self
    }

    /// Replace the alias table. An empty slice disables aliases.
    pub fn aliases(&mut self, table: &'t [AliasEntry]) -> &mut Self {
        self.aliases = table;
        self
    }

    /// Replace the instruction-comment generator.
    pub fn comments(&mut self, generator: &'t (dyn InstComments + Sync)) -> &mut Self {
        self.comments = generator;
        self
    }

    /// The current options.
    pub fn options(&self) -> PrintOptions {
        self.options
    }

    /// Print `inst` to `out`.
    ///
    /// When `comments` is attached it receives the instruction comment,
    /// hex comments for immediates outside `[-256, 255]` and the
    /// annotation, one `\n`-terminated line each. Without it a non-empty
    /// `annot` is appended to `out` as ` # annot`.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    ///
    /// # Panics
    ///
    /// If `inst` does not match its opcode's descriptor.
    pub fn print_inst(
        &self,
        inst: &Instruction,
        features: FeatureBits,
        annot: &str,
        out: &mut dyn fmt::Write,
        comments: Option<&mut dyn fmt::Write>,
    ) -> fmt::Result {
        let desc = inst.opcode.desc();
        contract(desc.check(inst));

        let mut ctx = PrintCtx {
            options: self.options,
            inst,
            desc,
            out,
            comments,
            has_custom_comment: false,
        };

        if let Some(sink) = ctx.comments.as_deref_mut() {
            ctx.has_custom_comment = self.comments.emit(inst, sink)?;
        }

        ctx.print_inst_flags()?;

        if inst.opcode == Opcode::CALLpcrel32 && features.contains(FeatureBits::MODE_64BIT) {
            ctx.out.write_str("\tcallq\t")?;
            ctx.print_pc_rel_imm(0)?;
        } else if inst.opcode == Opcode::DATA16PREFIX && features.contains(FeatureBits::MODE_16BIT)
        {
            ctx.out.write_str("\tdata32")?;
        } else if let Some(entry) = alias::find(self.aliases, inst, features) {
            contract(desc::check_slots(inst, entry.operands));
            ctx.print_template(entry.mnemonic, entry.operands)?;
        } else if let Some(plan) = inst
            .trailing_imm()
            .and_then(|imm| compare::plan(inst.opcode, &desc, imm))
        {
            ctx.print_compare(&plan)?;
        } else {
            ctx.print_template(desc.mnemonic, desc.print)?;
        }

        ctx.print_annotation(annot)
    }

    /// Print `inst` into a new `String`, without comments.
    ///
    /// # Panics
    ///
    /// If `inst` does not match its opcode's descriptor.
    pub fn print_to_string(&self, inst: &Instruction, features: FeatureBits) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.print_inst(inst, features, "", &mut out, None);
        out
    }
}

fn contract<T>(r: Result<T, ShapeError>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

/// State for one `print_inst` call.
struct PrintCtx<'a, 'o, 'c> {
    options: PrintOptions,
    inst: &'a Instruction,
    desc: InstrDesc,
    out: &'o mut dyn fmt::Write,
    comments: Option<&'c mut dyn fmt::Write>,
    /// Set when the instruction-comment generator wrote something;
    /// suppresses hex comments.
    has_custom_comment: bool,
}

impl PrintCtx<'_, '_, '_> {
    fn markup(&mut self, tag: &str) -> fmt::Result {
        if self.options.use_markup {
            self.out.write_str(tag)
        } else {
            Ok(())
        }
    }

    // ── Dispatch paths ──────────────────────────────────────────────────

    fn print_inst_flags(&mut self) -> fmt::Result {
        let ts = self.desc.flags;
        let flags = self.inst.flags;
        if ts.contains(TsFlags::LOCK) || flags.contains(InstFlags::LOCK) {
            self.out.write_str("\tlock\t")?;
        }
        if ts.contains(TsFlags::NOTRACK) || flags.contains(InstFlags::NOTRACK) {
            self.out.write_str("\tnotrack\t")?;
        }
        if flags.contains(InstFlags::REPNE) {
            self.out.write_str("\trepne\t")?;
        } else if flags.contains(InstFlags::REP) {
            self.out.write_str("\trep\t")?;
        }
        Ok(())
    }

    fn print_template(&mut self, mnemonic: &str, slots: &[Print]) -> fmt::Result {
        write!(self.out, "\t{}", mnemonic)?;
        let mut first = true;
        for &slot in slots {
            if !slot.is_glued() {
                self.out.write_str(if first { "\t" } else { ", " })?;
                first = false;
            }
            self.print_slot(slot)?;
        }
        Ok(())
    }

    fn print_slot(&mut self, slot: Print) -> fmt::Result {
        match slot {
            Print::Op(i) => self.print_operand(usize::from(i)),
            Print::Mem(i) => self.print_memory(usize::from(i)),
            Print::SrcIdx(i) => self.print_src_idx(usize::from(i)),
            Print::DstIdx(i) => self.print_dst_idx(usize::from(i)),
            Print::MemOffs(i) => self.print_mem_offset(usize::from(i)),
            Print::U8Imm(i) => self.print_u8_imm(usize::from(i)),
            Print::STi(i) => self.print_sti(usize::from(i)),
            Print::PcRel(i) => self.print_pc_rel_imm(usize::from(i)),
            Print::Ind(i) => {
                self.out.write_char('*')?;
                self.print_operand(usize::from(i))
            }
            Print::Lit(text) | Print::Suffix(text) => self.out.write_str(text),
            Print::Mask(i) => self.print_mask(usize::from(i)),
            Print::Broadcast => write!(self.out, "{{1to{}}}", self.desc.broadcast_count()),
        }
    }

    fn print_compare(&mut self, plan: &ComparePlan) -> fmt::Result {
        write!(self.out, "\t{}\t", plan.mnemonic)?;
        match plan.src {
            Source::Operand(i) => self.print_operand(i)?,
            Source::Mem { op } => self.print_memory(op)?,
            Source::Broadcast { op, count } => {
                self.print_memory(op)?;
                write!(self.out, "{{1to{}}}", count)?;
            }
        }
        self.out.write_str(", ")?;
        self.print_operand(plan.src2)?;
        self.out.write_str(", ")?;
        self.print_operand(plan.dst)?;
        if let Some(k) = plan.mask {
            self.print_mask(k)?;
        }
        Ok(())
    }

    fn print_annotation(&mut self, annot: &str) -> fmt::Result {
        if annot.is_empty() {
            return Ok(());
        }
        match self.comments.as_deref_mut() {
            Some(sink) => {
                sink.write_str(annot)?;
                if !annot.ends_with('\n') {
                    sink.write_char('\n')?;
                }
                Ok(())
            }
            None => write!(self.out, " # {}", annot),
        }
    }

    // ── Operand formatters ──────────────────────────────────────────────

    fn print_reg_name(&mut self, reg: Register) -> fmt::Result {
        self.markup("<reg:")?;
        write!(self.out, "%{}", reg.name())?;
        self.markup(">")
    }

    fn format_imm(&mut self, value: i64) -> fmt::Result {
        if !self.options.print_imm_hex {
            write!(self.out, "{}", value)
        } else if value < 0 {
            write!(self.out, "-0x{:x}", value.unsigned_abs())
        } else {
            write!(self.out, "0x{:x}", value)
        }
    }

    fn print_expr(&mut self, expr: &Expr) -> fmt::Result {
        write!(self.out, "{}", expr)
    }

    fn print_operand(&mut self, index: usize) -> fmt::Result {
        let inst = self.inst;
        match contract(inst.operand(index)) {
            Operand::Register(reg) => self.print_reg_name(*reg),
            Operand::Immediate(value) => {
                self.markup("<imm:")?;
                self.out.write_char('$')?;
                self.format_imm(*value)?;
                self.markup(">")?;
                if !self.has_custom_comment && !comments::is_small_imm(*value) {
                    if let Some(sink) = self.comments.as_deref_mut() {
                        comments::write_imm_comment(sink, *value)?;
                    }
                }
                Ok(())
            }
            Operand::Expression(expr) => {
                self.markup("<imm:")?;
                self.out.write_char('$')?;
                self.print_expr(expr)?;
                self.markup(">")
            }
        }
    }

    fn print_optional_seg_reg(&mut self, seg: Register) -> fmt::Result {
        if seg.is_none() {
            return Ok(());
        }
        self.print_reg_name(seg)?;
        self.out.write_char(':')
    }

    /// Displacement of a memory group or absolute offset. Immediates are
    /// printed only when `always` or nonzero; expressions always are.
    fn print_disp(&mut self, disp: &Operand, always: bool) -> fmt::Result {
        match disp {
            Operand::Immediate(value) if *value != 0 || always => self.format_imm(*value),
            Operand::Expression(expr) => self.print_expr(expr),
            // Zero with a base or index present.
            _ => Ok(()),
        }
    }

    fn print_memory(&mut self, op: usize) -> fmt::Result {
        let inst = self.inst;
        let mem = contract(MemRef::read(inst, op));

        self.markup("<mem:")?;
        self.print_optional_seg_reg(mem.segment)?;
        self.print_disp(mem.disp, mem.is_absolute())?;

        if !mem.is_absolute() {
            self.out.write_char('(')?;
            if !mem.base.is_none() {
                self.print_reg_name(mem.base)?;
            }
            if !mem.index.is_none() {
                self.out.write_char(',')?;
                self.print_reg_name(mem.index)?;
                if mem.scale != 1 {
                    self.out.write_char(',')?;
                    self.markup("<imm:")?;
                    write!(self.out, "{}", mem.scale)?;
                    self.markup(">")?;
                }
            }
            self.out.write_char(')')?;
        }
        self.markup(">")
    }

    fn print_src_idx(&mut self, op: usize) -> fmt::Result {
        let reg = contract(self.inst.reg_at(op));
        let seg = contract(self.inst.reg_at(op + 1));
        self.markup("<mem:")?;
        self.print_optional_seg_reg(seg)?;
        self.out.write_char('(')?;
        self.print_reg_name(reg)?;
        self.out.write_char(')')?;
        self.markup(">")
    }

    fn print_dst_idx(&mut self, op: usize) -> fmt::Result {
        let reg = contract(self.inst.reg_at(op));
        self.markup("<mem:")?;
        self.out.write_str("%es:(")?;
        self.print_reg_name(reg)?;
        self.out.write_char(')')?;
        self.markup(">")
    }

    fn print_mem_offset(&mut self, op: usize) -> fmt::Result {
        let inst = self.inst;
        let disp = contract(inst.operand(op));
        let seg = contract(inst.reg_at(op + 1));
        self.markup("<mem:")?;
        self.print_optional_seg_reg(seg)?;
        self.print_disp(disp, true)?;
        self.markup(">")
    }

    fn print_u8_imm(&mut self, op: usize) -> fmt::Result {
        let inst = self.inst;
        match contract(inst.operand_as(op, Expected::ImmOrExpr)) {
            Operand::Immediate(value) => {
                self.markup("<imm:")?;
                self.out.write_char('$')?;
                self.format_imm(*value & 0xff)?;
                self.markup(">")
            }
            _ => self.print_operand(op),
        }
    }

    fn print_sti(&mut self, op: usize) -> fmt::Result {
        let reg = contract(self.inst.reg_at(op));
        if reg == Register::St0 {
            self.markup("<reg:")?;
            self.out.write_str("%st(0)")?;
            self.markup(">")
        } else {
            self.print_reg_name(reg)
        }
    }

    fn print_pc_rel_imm(&mut self, op: usize) -> fmt::Result {
        let inst = self.inst;
        let target = contract(inst.operand_as(op, Expected::ImmOrExpr));
        match (target.imm(), target.expr()) {
            (Some(value), _) => self.format_imm(value),
            // A branch target folded to a constant is an address.
            (_, Some(Expr::Const(addr))) => write!(self.out, "0x{:x}", *addr as u64),
            (_, Some(expr)) => self.print_expr(expr),
            (None, None) => Ok(()),
        }
    }

    fn print_mask(&mut self, op: usize) -> fmt::Result {
        self.out.write_str(" {")?;
        self.print_operand(op)?;
        self.out.write_char('}')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::NoComments;
    use alloc::vec;

    struct Always;

    impl InstComments for Always {
        fn emit(&self, _inst: &Instruction, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
            out.write_str("custom\n")?;
            Ok(true)
        }
    }

    fn print(inst: &Instruction) -> String {
        AttPrinter::new().print_to_string(inst, FeatureBits::MODE_64BIT)
    }

    fn print_with_comments(printer: &AttPrinter<'_>, inst: &Instruction) -> (String, String) {
        let mut out = String::new();
        let mut notes = String::new();
        printer
            .print_inst(inst, FeatureBits::MODE_64BIT, "", &mut out, Some(&mut notes))
            .unwrap();
        (out, notes)
    }

    fn mov_ri(v: i64) -> Instruction {
        Instruction::new(Opcode::MOV32ri, vec![Register::Eax.into(), v.into()])
    }

    #[test]
    fn register_move() {
        let inst = Instruction::new(
            Opcode::MOV32rr,
            vec![Register::Eax.into(), Register::Ebx.into()],
        );
        assert_eq!(print(&inst), "\tmovl\t%ebx, %eax");
    }

    #[test]
    fn nullary_has_no_tab() {
        assert_eq!(print(&Instruction::new(Opcode::NOOP, vec![])), "\tnop");
    }

    #[test]
    fn hex_immediates() {
        let mut printer = AttPrinter::new();
        printer.print_imm_hex(true);
        let out = printer.print_to_string(&mov_ri(-31), FeatureBits::NONE);
        assert_eq!(out, "\tmovl\t$-0x1f, %eax");
        let out = printer.print_to_string(&mov_ri(i64::MIN), FeatureBits::NONE);
        assert_eq!(out, "\tmovl\t$-0x8000000000000000, %eax");
    }

    #[test]
    fn hex_comment_thresholds() {
        let printer = AttPrinter::new();
        assert_eq!(print_with_comments(&printer, &mov_ri(255)).1, "");
        assert_eq!(print_with_comments(&printer, &mov_ri(-256)).1, "");
        assert_eq!(print_with_comments(&printer, &mov_ri(256)).1, "imm = 0x100\n");
        assert_eq!(print_with_comments(&printer, &mov_ri(-257)).1, "imm = 0xFEFF\n");
    }

    #[test]
    fn custom_comment_suppresses_hex_comment() {
        let mut printer = AttPrinter::new();
        printer.comments(&Always);
        let (out, notes) = print_with_comments(&printer, &mov_ri(300));
        assert_eq!(out, "\tmovl\t$300, %eax");
        assert_eq!(notes, "custom\n");
    }

    #[test]
    fn masked_immediate_gets_no_hex_comment() {
        let inst = Instruction::new(
            Opcode::PSHUFDri,
            vec![Register::Xmm0.into(), Register::Xmm1.into(), 0x11bi64.into()],
        );
        let mut printer = AttPrinter::new();
        printer.comments(&NoComments);
        let (out, notes) = print_with_comments(&printer, &inst);
        assert_eq!(out, "\tpshufd\t$27, %xmm1, %xmm0");
        assert_eq!(notes, "");
    }

    #[test]
    fn no_comment_generator() {
        let mut printer = AttPrinter::new();
        printer.comments(&NoComments);
        let inst = Instruction::new(
            Opcode::PSHUFDri,
            vec![Register::Xmm0.into(), Register::Xmm1.into(), 0x1bi64.into()],
        );
        assert_eq!(print_with_comments(&printer, &inst).1, "");
    }

    #[test]
    fn markup_wraps_units() {
        let mut printer = AttPrinter::new();
        printer.use_markup(true);
        let inst = Instruction::builder(Opcode::MOV32rm)
            .reg(Register::Eax)
            .mem(Register::Rbx, 4, Register::Rcx, 8, Register::NoReg)
            .build();
        assert_eq!(
            printer.print_to_string(&inst, FeatureBits::NONE),
            "\tmovl\t<mem:8(<reg:%rbx>,<reg:%rcx>,<imm:4>)>, <reg:%eax>"
        );
        assert_eq!(
            printer.print_to_string(&mov_ri(5), FeatureBits::NONE),
            "\tmovl\t<imm:$5>, <reg:%eax>"
        );
    }

    #[test]
    fn annotation_without_sink_is_inline() {
        let mut out = String::new();
        AttPrinter::new()
            .print_inst(
                &Instruction::new(Opcode::NOOP, vec![]),
                FeatureBits::NONE,
                "padding",
                &mut out,
                None,
            )
            .unwrap();
        assert_eq!(out, "\tnop # padding");
    }

    #[test]
    fn annotation_goes_to_sink() {
        let mut out = String::new();
        let mut notes = String::new();
        let nop = Instruction::new(Opcode::NOOP, vec![]);
        let printer = AttPrinter::new();
        printer
            .print_inst(&nop, FeatureBits::NONE, "a", &mut out, Some(&mut notes))
            .unwrap();
        printer
            .print_inst(&nop, FeatureBits::NONE, "b\n", &mut out, Some(&mut notes))
            .unwrap();
        assert_eq!(out, "\tnop\tnop");
        assert_eq!(notes, "a\nb\n");
    }

    #[test]
    fn empty_alias_table_uses_template() {
        let inst = Instruction::new(Opcode::XCHF, vec![Register::St1.into()]);
        assert_eq!(print(&inst), "\tfxch");
        let mut printer = AttPrinter::new();
        printer.aliases(&[]);
        assert_eq!(
            printer.print_to_string(&inst, FeatureBits::NONE),
            "\tfxch\t%st(1)"
        );
    }

    #[test]
    #[should_panic(expected = "MOV32rm: operand 1 must be a register, found immediate")]
    fn memory_shape_mismatch_panics() {
        let inst = Instruction::new(
            Opcode::MOV32rm,
            vec![
                Register::Eax.into(),
                1i64.into(),
                1i64.into(),
                Register::NoReg.into(),
                0i64.into(),
                Register::NoReg.into(),
            ],
        );
        let _ = print(&inst);
    }

    #[test]
    #[should_panic(expected = "MOV32rr: expected 2 operands, found 1")]
    fn operand_count_mismatch_panics() {
        let inst = Instruction::new(Opcode::MOV32rr, vec![Register::Eax.into()]);
        let _ = print(&inst);
    }

    fn print_with_alias(table: &'static [AliasEntry], inst: &Instruction) -> String {
        let mut printer = AttPrinter::new();
        printer.aliases(table);
        printer.print_to_string(inst, FeatureBits::MODE_64BIT)
    }

    fn push_rbp() -> Instruction {
        Instruction::new(Opcode::PUSH64r, vec![Register::Rbp.into()])
    }

    #[test]
    #[should_panic(expected = "PUSH64r: operand 0 must be an immediate or expression, found register")]
    fn alias_pc_relative_slot_rejects_register() {
        static TABLE: &[AliasEntry] = &[AliasEntry {
            opcode: Opcode::PUSH64r,
            cond: crate::alias::AliasCond::Always,
            mnemonic: "jmp",
            operands: &[Print::PcRel(0)],
        }];
        let _ = print_with_alias(TABLE, &push_rbp());
    }

    #[test]
    #[should_panic(expected = "PUSH64r: operand 0 must be an immediate or expression, found register")]
    fn alias_u8_slot_rejects_register() {
        static TABLE: &[AliasEntry] = &[AliasEntry {
            opcode: Opcode::PUSH64r,
            cond: crate::alias::AliasCond::Always,
            mnemonic: "int",
            operands: &[Print::U8Imm(0)],
        }];
        let _ = print_with_alias(TABLE, &push_rbp());
    }

    #[test]
    #[should_panic(expected = "PUSH64r: operand 3 is missing")]
    fn alias_slot_past_operand_list_panics() {
        static TABLE: &[AliasEntry] = &[AliasEntry {
            opcode: Opcode::PUSH64r,
            cond: crate::alias::AliasCond::Always,
            mnemonic: "pushq",
            operands: &[Print::Op(3)],
        }];
        let _ = print_with_alias(TABLE, &push_rbp());
    }

    #[test]
    fn alias_with_matching_slots_prints() {
        static TABLE: &[AliasEntry] = &[AliasEntry {
            opcode: Opcode::PUSH64r,
            cond: crate::alias::AliasCond::Always,
            mnemonic: "push",
            operands: &[Print::Op(0)],
        }];
        assert_eq!(print_with_alias(TABLE, &push_rbp()), "\tpush\t%rbp");
    }

    #[test]
    #[should_panic(expected = "no such instruction form")]
    fn word_broadcast_compare_panics() {
        let inst = Instruction::builder(Opcode::Vpcmp {
            elem: crate::desc::CmpElem::W,
            width: crate::desc::VecWidth::Z512,
            form: crate::desc::VpcmpForm::Rmib,
        })
        .reg(Register::K1)
        .reg(Register::Zmm0)
        .mem(Register::Rdi, 1, Register::NoReg, 0, Register::NoReg)
        .imm(1)
        .build();
        let _ = print(&inst);
    }

    #[test]
    fn printer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AttPrinter<'static>>();
    }

    #[test]
    fn options_round_trip_through_setters() {
        let mut printer = AttPrinter::new();
        printer.print_imm_hex(true).use_markup(true);
        assert_eq!(
            printer.options(),
            PrintOptions {
                print_imm_hex: true,
                use_markup: true
            }
        );
        assert!(alloc::format!("{:?}", printer).starts_with("AttPrinter"));
        assert_eq!(AttPrinter::default().options(), PrintOptions::default());
    }
}
