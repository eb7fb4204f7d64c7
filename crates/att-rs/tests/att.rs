//! AT&T dialect coverage.
//!
//! One test per rendering rule: operand order, memory addressing forms,
//! string and absolute-offset operands, x87 stack registers, prefixes,
//! aliases, mode-dependent spellings and AVX-512 decorations.

use att_rs::{
    print_inst, AttPrinter, Expr, FeatureBits, InstFlags, Instruction, Opcode, Operand, Register,
};

use Register::*;

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn p64(inst: &Instruction) -> String {
    print_inst(inst, FeatureBits::MODE_64BIT)
}

fn hex(inst: &Instruction) -> String {
    let mut printer = AttPrinter::new();
    printer.print_imm_hex(true);
    printer.print_to_string(inst, FeatureBits::MODE_64BIT)
}

fn regs(opcode: Opcode, rs: &[Register]) -> Instruction {
    Instruction::new(opcode, rs.iter().map(|&r| Operand::from(r)).collect())
}

fn load(
    opcode: Opcode,
    dst: Register,
    base: Register,
    scale: i64,
    index: Register,
    disp: i64,
) -> Instruction {
    Instruction::builder(opcode)
        .reg(dst)
        .mem(base, scale, index, disp, NoReg)
        .build()
}

// ─── Plain operands ───────────────────────────────────────────────────────────

#[test]
fn nullary_instructions() {
    for (op, text) in [
        (Opcode::NOOP, "\tnop"),
        (Opcode::HLT, "\thlt"),
        (Opcode::INT3, "\tint3"),
        (Opcode::CPUID, "\tcpuid"),
        (Opcode::SYSCALL, "\tsyscall"),
        (Opcode::LEAVE64, "\tleave"),
        (Opcode::RETQ, "\tretq"),
        (Opcode::CDQE, "\tcltq"),
        (Opcode::CQO, "\tcqto"),
        (Opcode::CBW, "\tcbtw"),
        (Opcode::LDF1, "\tfld1"),
    ] {
        assert_eq!(p64(&Instruction::new(op, vec![])), text, "{:?}", op);
    }
}

#[test]
fn register_to_register_is_source_first() {
    assert_eq!(p64(&regs(Opcode::MOV32rr, &[Eax, Ebx])), "\tmovl\t%ebx, %eax");
    assert_eq!(p64(&regs(Opcode::MOV8rr, &[Al, Sil])), "\tmovb\t%sil, %al");
    assert_eq!(p64(&regs(Opcode::MOV64rr, &[R8, Rsp])), "\tmovq\t%rsp, %r8");
    assert_eq!(p64(&regs(Opcode::MOVZX32rr8, &[Eax, Cl])), "\tmovzbl\t%cl, %eax");
    assert_eq!(p64(&regs(Opcode::MOVSX64rr32, &[Rax, Ecx])), "\tmovslq\t%ecx, %rax");
}

#[test]
fn tied_destination_prints_once() {
    assert_eq!(p64(&regs(Opcode::ADD64rr, &[Rax, Rax, Rbx])), "\taddq\t%rbx, %rax");
    assert_eq!(p64(&regs(Opcode::XOR32rr, &[Eax, Eax, Eax])), "\txorl\t%eax, %eax");
    assert_eq!(p64(&regs(Opcode::INC32r, &[Ecx, Ecx])), "\tincl\t%ecx");
    assert_eq!(p64(&regs(Opcode::SHL32r1, &[Eax, Eax])), "\tshll\t%eax");
}

#[test]
fn special_registers() {
    assert_eq!(p64(&regs(Opcode::MOV32rs, &[Eax, Ds])), "\tmovl\t%ds, %eax");
    assert_eq!(p64(&regs(Opcode::MOV64rc, &[Rax, Cr3])), "\tmovq\t%cr3, %rax");
    assert_eq!(p64(&regs(Opcode::KMOVWkk, &[K0, K1])), "\tkmovw\t%k1, %k0");
    assert_eq!(p64(&regs(Opcode::MOV64toPQIrr, &[Xmm3, Rdi])), "\tmovq\t%rdi, %xmm3");
}

#[test]
fn immediates_are_dollar_prefixed() {
    let mov = Instruction::new(Opcode::MOV32ri, vec![Eax.into(), 42i64.into()]);
    assert_eq!(p64(&mov), "\tmovl\t$42, %eax");

    let neg = Instruction::new(Opcode::ADD64ri8, vec![Rsp.into(), Rsp.into(), (-8i64).into()]);
    assert_eq!(p64(&neg), "\taddq\t$-8, %rsp");

    let abs = Instruction::new(Opcode::MOV64ri, vec![Rax.into(), 0x1_2345_6789i64.into()]);
    assert_eq!(p64(&abs), "\tmovabsq\t$4886718345, %rax");
    assert_eq!(hex(&abs), "\tmovabsq\t$0x123456789, %rax");
}

#[test]
fn hex_immediates_keep_sign() {
    let neg = Instruction::new(Opcode::SUB64ri8, vec![Rsp.into(), Rsp.into(), (-31i64).into()]);
    assert_eq!(hex(&neg), "\tsubq\t$-0x1f, %rsp");
}

#[test]
fn expression_immediates() {
    let inst = Instruction::new(
        Opcode::MOV32ri,
        vec![Eax.into(), Expr::sym("table").plus(Expr::Const(4)).into()],
    );
    assert_eq!(p64(&inst), "\tmovl\t$table+4, %eax");
}

#[test]
fn three_operand_multiply() {
    let inst = Instruction::new(Opcode::IMUL32rri, vec![Eax.into(), Ecx.into(), 10i64.into()]);
    assert_eq!(p64(&inst), "\timull\t$10, %ecx, %eax");
}

// ─── Memory references ────────────────────────────────────────────────────────

#[test]
fn memory_base_and_displacement() {
    assert_eq!(p64(&load(Opcode::MOV32rm, Eax, Rbp, 1, NoReg, -8)), "\tmovl\t-8(%rbp), %eax");
    assert_eq!(p64(&load(Opcode::MOV64rm, Rax, Rdi, 1, NoReg, 0)), "\tmovq\t(%rdi), %rax");
}

#[test]
fn memory_index_and_scale() {
    assert_eq!(
        p64(&load(Opcode::LEA64r, Rax, Rdi, 2, Rsi, 8)),
        "\tleaq\t8(%rdi,%rsi,2), %rax"
    );
    // Scale 1 is implied.
    assert_eq!(p64(&load(Opcode::LEA64r, Rax, Rdi, 1, Rsi, 0)), "\tleaq\t(%rdi,%rsi), %rax");
    // No base.
    assert_eq!(p64(&load(Opcode::LEA64r, Rax, NoReg, 8, Rcx, 0)), "\tleaq\t(,%rcx,8), %rax");
}

#[test]
fn memory_absolute_zero_prints_zero() {
    assert_eq!(p64(&load(Opcode::MOV32rm, Eax, NoReg, 1, NoReg, 0)), "\tmovl\t0, %eax");
    assert_eq!(p64(&load(Opcode::MOV32rm, Eax, NoReg, 1, NoReg, 4096)), "\tmovl\t4096, %eax");
}

#[test]
fn memory_hex_displacement_decimal_scale() {
    assert_eq!(
        hex(&load(Opcode::MOV32rm, Eax, Rbp, 8, Rcx, -16)),
        "\tmovl\t-0x10(%rbp,%rcx,8), %eax"
    );
}

#[test]
fn memory_segment_override() {
    let inst = Instruction::builder(Opcode::MOV64rm)
        .reg(Rax)
        .mem(NoReg, 1, NoReg, 40, Fs)
        .build();
    assert_eq!(p64(&inst), "\tmovq\t%fs:40, %rax");

    let inst = Instruction::builder(Opcode::MOV32rm)
        .reg(Eax)
        .mem(Rax, 1, NoReg, 0, Gs)
        .build();
    assert_eq!(p64(&inst), "\tmovl\t%gs:(%rax), %eax");
}

#[test]
fn memory_symbolic_displacement() {
    let inst = Instruction::builder(Opcode::MOV32rm)
        .reg(Eax)
        .mem_expr(Rip, 1, NoReg, Expr::sym("counter"), NoReg)
        .build();
    assert_eq!(p64(&inst), "\tmovl\tcounter(%rip), %eax");

    // An expression displacement prints even when it is the constant 0.
    let inst = Instruction::builder(Opcode::MOV32rm)
        .reg(Eax)
        .mem_expr(Rax, 1, NoReg, Expr::Const(0), NoReg)
        .build();
    assert_eq!(p64(&inst), "\tmovl\t0(%rax), %eax");
}

#[test]
fn memory_destination() {
    let store = Instruction::builder(Opcode::MOV32mr)
        .mem(Rsp, 1, NoReg, 16, NoReg)
        .reg(Ecx)
        .build();
    assert_eq!(p64(&store), "\tmovl\t%ecx, 16(%rsp)");

    let imm = Instruction::builder(Opcode::MOV32mi)
        .mem(Rdi, 1, NoReg, 0, NoReg)
        .imm(1)
        .build();
    assert_eq!(p64(&imm), "\tmovl\t$1, (%rdi)");

    let cmp = Instruction::builder(Opcode::CMP64mi8)
        .mem(Rbx, 1, NoReg, 8, NoReg)
        .imm(-1)
        .build();
    assert_eq!(p64(&cmp), "\tcmpq\t$-1, 8(%rbx)");
}

#[test]
fn memory_source_with_tied_destination() {
    let inst = Instruction::builder(Opcode::ADD32rm)
        .reg(Eax)
        .reg(Eax)
        .mem(Rbx, 1, NoReg, 4, NoReg)
        .build();
    assert_eq!(p64(&inst), "\taddl\t4(%rbx), %eax");
}

// ─── Strings and absolute offsets ─────────────────────────────────────────────

#[test]
fn string_operands() {
    let movs = Instruction::builder(Opcode::MOVSB)
        .dst_idx(Rdi)
        .src_idx(Rsi, NoReg)
        .build();
    assert_eq!(p64(&movs), "\tmovsb\t(%rsi), %es:(%rdi)");

    let stos = Instruction::builder(Opcode::STOSQ).dst_idx(Rdi).build();
    assert_eq!(p64(&stos), "\tstosq\t%rax, %es:(%rdi)");

    let lods = Instruction::builder(Opcode::LODSB).src_idx(Esi, NoReg).build();
    assert_eq!(p64(&lods), "\tlodsb\t(%esi), %al");

    let cmps = Instruction::builder(Opcode::CMPSB)
        .dst_idx(Rdi)
        .src_idx(Rsi, NoReg)
        .build();
    assert_eq!(p64(&cmps), "\tcmpsb\t%es:(%rdi), (%rsi)");
}

#[test]
fn source_index_segment_override() {
    let movs = Instruction::builder(Opcode::MOVSL)
        .dst_idx(Rdi)
        .src_idx(Rsi, Fs)
        .build();
    assert_eq!(p64(&movs), "\tmovsl\t%fs:(%rsi), %es:(%rdi)");
}

#[test]
fn repeat_prefixes() {
    let movs = Instruction::builder(Opcode::MOVSQ)
        .dst_idx(Rdi)
        .src_idx(Rsi, NoReg)
        .flags(InstFlags::REP)
        .build();
    assert_eq!(p64(&movs), "\trep\t\tmovsq\t(%rsi), %es:(%rdi)");

    let scas = Instruction::builder(Opcode::SCASB)
        .dst_idx(Rdi)
        .flags(InstFlags::REPNE | InstFlags::REP)
        .build();
    assert_eq!(p64(&scas), "\trepne\t\tscasb\t%es:(%rdi), %al");

    let stos = Instruction::builder(Opcode::STOSB)
        .dst_idx(Edi)
        .flags(InstFlags::REP)
        .build();
    assert_eq!(p64(&stos), "\trep\t\tstosb\t%al, %es:(%edi)");
}

#[test]
fn absolute_offsets() {
    let zero = Instruction::builder(Opcode::MOV8o32a).offset(0, NoReg).build();
    assert_eq!(p64(&zero), "\tmovb\t0, %al");

    let seg = Instruction::builder(Opcode::MOV8o32a).offset(16, Gs).build();
    assert_eq!(p64(&seg), "\tmovb\t%gs:16, %al");

    let store = Instruction::builder(Opcode::MOV32ao32).offset(4096, NoReg).build();
    assert_eq!(p64(&store), "\tmovl\t%eax, 4096");

    let abs = Instruction::builder(Opcode::MOV64o64a)
        .offset(0x7fff_0000_1000, NoReg)
        .build();
    assert_eq!(hex(&abs), "\tmovabsq\t0x7fff00001000, %rax");

    let sym = Instruction::new(
        Opcode::MOV32o32a,
        vec![Expr::sym("flag").into(), NoReg.into()],
    );
    assert_eq!(p64(&sym), "\tmovl\tflag, %eax");
}

// ─── 8-bit immediates ─────────────────────────────────────────────────────────

#[test]
fn u8_immediates_are_masked() {
    let shl = Instruction::new(Opcode::SHL32ri, vec![Eax.into(), Eax.into(), 0x1ffi64.into()]);
    assert_eq!(p64(&shl), "\tshll\t$255, %eax");

    let int = Instruction::new(Opcode::INT, vec![0x180i64.into()]);
    assert_eq!(p64(&int), "\tint\t$128");

    let neg = Instruction::new(Opcode::SAR32ri, vec![Eax.into(), Eax.into(), (-1i64).into()]);
    assert_eq!(p64(&neg), "\tsarl\t$255, %eax");
}

#[test]
fn u8_expressions_are_not_masked() {
    let shl = Instruction::new(
        Opcode::SHL32ri,
        vec![Eax.into(), Eax.into(), Expr::sym("shift").into()],
    );
    assert_eq!(p64(&shl), "\tshll\t$shift, %eax");
}

#[test]
fn fixed_operands() {
    assert_eq!(p64(&regs(Opcode::SHL32rCL, &[Eax, Eax])), "\tshll\t%cl, %eax");

    let out = Instruction::new(Opcode::OUT8ir, vec![0x60i64.into()]);
    assert_eq!(p64(&out), "\toutb\t%al, $96");

    let inb = Instruction::new(Opcode::IN8ri, vec![0x60i64.into()]);
    assert_eq!(p64(&inb), "\tinb\t$96, %al");

    let enter = Instruction::new(Opcode::ENTER, vec![16i64.into(), 0i64.into()]);
    assert_eq!(p64(&enter), "\tenter\t$16, $0");
}

// ─── Branches ─────────────────────────────────────────────────────────────────

#[test]
fn pc_relative_targets_have_no_dollar() {
    let jmp = Instruction::new(Opcode::JMP1, vec![16i64.into()]);
    assert_eq!(p64(&jmp), "\tjmp\t16");
    assert_eq!(hex(&Instruction::new(Opcode::JMP1, vec![(-2i64).into()])), "\tjmp\t-0x2");

    let je = Instruction::new(Opcode::JE1, vec![Expr::sym(".Ltmp0").into()]);
    assert_eq!(p64(&je), "\tje\t.Ltmp0");
}

#[test]
fn constant_branch_target_is_hex_address() {
    let jmp = Instruction::new(Opcode::JMP4, vec![Expr::Const(0x40_1000).into()]);
    assert_eq!(p64(&jmp), "\tjmp\t0x401000");

    let wrap = Instruction::new(Opcode::JMP4, vec![Expr::Const(-1).into()]);
    assert_eq!(p64(&wrap), "\tjmp\t0xffffffffffffffff");
}

#[test]
fn indirect_branches() {
    assert_eq!(p64(&regs(Opcode::CALL64r, &[Rax])), "\tcallq\t*%rax");
    assert_eq!(p64(&regs(Opcode::JMP64r, &[R11])), "\tjmpq\t*%r11");
}

#[test]
fn notrack_prefix() {
    assert_eq!(
        p64(&regs(Opcode::JMP64rNT, &[Rax])),
        "\tnotrack\t\tjmpq\t*%rax"
    );
    let flagged = Instruction::builder(Opcode::JMP64r)
        .reg(Rdx)
        .flags(InstFlags::NOTRACK)
        .build();
    assert_eq!(p64(&flagged), "\tnotrack\t\tjmpq\t*%rdx");
}

#[test]
fn call_pcrel32_depends_on_mode() {
    let call = Instruction::new(Opcode::CALLpcrel32, vec![Expr::sym("foo").into()]);
    assert_eq!(print_inst(&call, FeatureBits::MODE_32BIT), "\tcalll\tfoo");
    assert_eq!(print_inst(&call, FeatureBits::MODE_64BIT), "\tcallq\tfoo");

    let abs = Instruction::new(Opcode::CALLpcrel32, vec![Expr::Const(0x1000).into()]);
    assert_eq!(print_inst(&abs, FeatureBits::MODE_64BIT), "\tcallq\t0x1000");
}

// ─── Prefixes ─────────────────────────────────────────────────────────────────

#[test]
fn lock_prefix_from_descriptor_or_flags() {
    let locked = Instruction::builder(Opcode::LOCKADD32mr)
        .mem(Rbx, 1, NoReg, 0, NoReg)
        .reg(Eax)
        .build();
    assert_eq!(p64(&locked), "\tlock\t\taddl\t%eax, (%rbx)");

    let flagged = Instruction::builder(Opcode::ADD32mr)
        .mem(Rbx, 1, NoReg, 0, NoReg)
        .reg(Eax)
        .flags(InstFlags::LOCK)
        .build();
    assert_eq!(p64(&flagged), p64(&locked));
}

#[test]
fn data16_prefix_depends_on_mode() {
    let inst = Instruction::new(Opcode::DATA16PREFIX, vec![]);
    assert_eq!(print_inst(&inst, FeatureBits::MODE_16BIT), "\tdata32");
    assert_eq!(print_inst(&inst, FeatureBits::MODE_32BIT), "\tdata16");
    assert_eq!(print_inst(&inst, FeatureBits::MODE_64BIT), "\tdata16");
}

// ─── x87 ──────────────────────────────────────────────────────────────────────

#[test]
fn st_operands() {
    assert_eq!(p64(&regs(Opcode::ADDFST0r, &[St0])), "\tfadd\t%st(0), %st");
    assert_eq!(p64(&regs(Opcode::ADDFST0r, &[St3])), "\tfadd\t%st(3), %st");
    assert_eq!(p64(&regs(Opcode::ADDFrST0, &[St2])), "\tfadd\t%st, %st(2)");
    assert_eq!(p64(&regs(Opcode::LDFrr, &[St0])), "\tfld\t%st(0)");
    assert_eq!(p64(&regs(Opcode::STFPrr, &[St1])), "\tfstp\t%st(1)");
}

#[test]
fn plain_register_st0_uses_table_name() {
    assert_eq!(p64(&regs(Opcode::FFREE, &[St0])), "\tffree\t%st");
    assert_eq!(p64(&regs(Opcode::FFREE, &[St5])), "\tffree\t%st(5)");
}

// ─── Aliases ──────────────────────────────────────────────────────────────────

#[test]
fn x87_aliases_drop_st1() {
    assert_eq!(p64(&regs(Opcode::XCHF, &[St1])), "\tfxch");
    assert_eq!(p64(&regs(Opcode::XCHF, &[St2])), "\tfxch\t%st(2)");
    assert_eq!(p64(&regs(Opcode::COMFST0r, &[St1])), "\tfcom");
    assert_eq!(p64(&regs(Opcode::UCOMFPr, &[St1])), "\tfucomp");
    assert_eq!(p64(&regs(Opcode::UCOMFr, &[St0])), "\tfucom\t%st(0)");
}

#[test]
fn bcd_aliases() {
    assert_eq!(p64(&Instruction::new(Opcode::AAM8i8, vec![10i64.into()])), "\taam");
    assert_eq!(p64(&Instruction::new(Opcode::AAD8i8, vec![10i64.into()])), "\taad");
    assert_eq!(p64(&Instruction::new(Opcode::AAM8i8, vec![16i64.into()])), "\taam\t$16");
}

#[test]
fn mode_aliases() {
    let iret = Instruction::new(Opcode::IRET16, vec![]);
    assert_eq!(print_inst(&iret, FeatureBits::MODE_16BIT), "\tiret");
    assert_eq!(print_inst(&iret, FeatureBits::MODE_64BIT), "\tiretw");

    let iretl = Instruction::new(Opcode::IRET32, vec![]);
    assert_eq!(print_inst(&iretl, FeatureBits::MODE_32BIT), "\tiret");
    assert_eq!(print_inst(&iretl, FeatureBits::MODE_16BIT), "\tiretl");

    let pushf = Instruction::new(Opcode::PUSHF16, vec![]);
    assert_eq!(print_inst(&pushf, FeatureBits::MODE_16BIT), "\tpushf");
    assert_eq!(print_inst(&pushf, FeatureBits::MODE_32BIT), "\tpushfw");
}

#[test]
fn two_operand_multiply_alias() {
    let same = Instruction::new(Opcode::IMUL32rri, vec![Eax.into(), Eax.into(), 10i64.into()]);
    assert_eq!(p64(&same), "\timull\t$10, %eax");

    let q = Instruction::new(Opcode::IMUL64rri8, vec![Rdx.into(), Rdx.into(), 3i64.into()]);
    assert_eq!(p64(&q), "\timulq\t$3, %rdx");
}

// ─── SSE / AVX / AVX-512 ──────────────────────────────────────────────────────

#[test]
fn sse_forms() {
    assert_eq!(p64(&regs(Opcode::MOVAPSrr, &[Xmm0, Xmm1])), "\tmovaps\t%xmm1, %xmm0");
    assert_eq!(p64(&regs(Opcode::PXORrr, &[Xmm2, Xmm2, Xmm3])), "\tpxor\t%xmm3, %xmm2");
    assert_eq!(
        p64(&load(Opcode::MOVUPSrm, Xmm4, Rsi, 1, NoReg, 32)),
        "\tmovups\t32(%rsi), %xmm4"
    );

    let store = Instruction::builder(Opcode::MOVAPSmr)
        .mem(Rsp, 1, NoReg, 0, NoReg)
        .reg(Xmm7)
        .build();
    assert_eq!(p64(&store), "\tmovaps\t%xmm7, (%rsp)");
}

#[test]
fn shuffle_immediates() {
    let pshufd = Instruction::builder(Opcode::PSHUFDmi)
        .reg(Xmm0)
        .mem(Rax, 1, NoReg, 0, NoReg)
        .imm(27)
        .build();
    assert_eq!(p64(&pshufd), "\tpshufd\t$27, (%rax), %xmm0");

    let pshuflw = Instruction::builder(Opcode::PSHUFLWmi)
        .reg(Xmm2)
        .mem(Rdi, 4, Rcx, 8, NoReg)
        .imm(0x1b)
        .build();
    assert_eq!(p64(&pshuflw), "\tpshuflw\t$27, 8(%rdi,%rcx,4), %xmm2");

    let pshufhw = Instruction::builder(Opcode::PSHUFHWmi)
        .reg(Xmm3)
        .mem(Rax, 1, NoReg, 0, NoReg)
        .imm(0xb1)
        .build();
    assert_eq!(p64(&pshufhw), "\tpshufhw\t$177, (%rax), %xmm3");

    let shufps = Instruction::new(
        Opcode::SHUFPSrri,
        vec![Xmm0.into(), Xmm0.into(), Xmm1.into(), 0x4ei64.into()],
    );
    assert_eq!(p64(&shufps), "\tshufps\t$78, %xmm1, %xmm0");
}

#[test]
fn avx_three_operand() {
    assert_eq!(
        p64(&regs(Opcode::VADDPSYrr, &[Ymm0, Ymm1, Ymm2])),
        "\tvaddps\t%ymm2, %ymm1, %ymm0"
    );
    let mem = Instruction::builder(Opcode::VADDPSrm)
        .reg(Xmm0)
        .reg(Xmm1)
        .mem(Rdi, 1, NoReg, 0, NoReg)
        .build();
    assert_eq!(p64(&mem), "\tvaddps\t(%rdi), %xmm1, %xmm0");
}

#[test]
fn avx512_masking() {
    let merge = regs(Opcode::VADDPSZrrk, &[Zmm0, Zmm0, K1, Zmm1, Zmm2]);
    assert_eq!(p64(&merge), "\tvaddps\t%zmm2, %zmm1, %zmm0 {%k1}");

    let zero = regs(Opcode::VADDPSZrrkz, &[Zmm3, K2, Zmm4, Zmm5]);
    assert_eq!(p64(&zero), "\tvaddps\t%zmm5, %zmm4, %zmm3 {%k2} {z}");
}

#[test]
fn avx512_broadcast() {
    let ps = Instruction::builder(Opcode::VADDPSZrmb)
        .reg(Zmm0)
        .reg(Zmm1)
        .mem(Rax, 1, NoReg, 0, NoReg)
        .build();
    assert_eq!(p64(&ps), "\tvaddps\t(%rax){1to16}, %zmm1, %zmm0");

    let pd = Instruction::builder(Opcode::VADDPDZ128rmb)
        .reg(Xmm0)
        .reg(Xmm1)
        .mem(Rax, 1, NoReg, 8, NoReg)
        .build();
    assert_eq!(p64(&pd), "\tvaddpd\t8(%rax){1to2}, %xmm1, %xmm0");
}

// ─── Markup ───────────────────────────────────────────────────────────────────

#[test]
fn markup_matches_plain_text_minus_markers() {
    let insts = [
        load(Opcode::LEA64r, Rax, Rdi, 2, Rsi, 8),
        Instruction::builder(Opcode::MOVSB)
            .dst_idx(Rdi)
            .src_idx(Rsi, Fs)
            .build(),
        Instruction::builder(Opcode::MOV8o32a).offset(16, Gs).build(),
        regs(Opcode::ADDFST0r, &[St0]),
        regs(Opcode::VADDPSZrrk, &[Zmm0, Zmm0, K1, Zmm1, Zmm2]),
        Instruction::new(Opcode::SHL32ri, vec![Eax.into(), Eax.into(), 3i64.into()]),
    ];
    let mut marked = AttPrinter::new();
    marked.use_markup(true);
    for inst in &insts {
        let plain = p64(inst);
        let rich = marked.print_to_string(inst, FeatureBits::MODE_64BIT);
        let stripped = rich
            .replace("<reg:", "")
            .replace("<imm:", "")
            .replace("<mem:", "")
            .replace('>', "");
        assert_eq!(stripped, plain, "{}", rich);
        assert_ne!(rich, plain);
    }
}

#[test]
fn markup_string_operands() {
    let mut printer = AttPrinter::new();
    printer.use_markup(true);
    let movs = Instruction::builder(Opcode::MOVSB)
        .dst_idx(Rdi)
        .src_idx(Rsi, NoReg)
        .build();
    assert_eq!(
        printer.print_to_string(&movs, FeatureBits::MODE_64BIT),
        "\tmovsb\t<mem:(<reg:%rsi>)>, <mem:%es:(<reg:%rdi>)>"
    );
}
