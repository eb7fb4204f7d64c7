//! Basic printing example: demonstrates the one-shot and printer APIs.
//!
//! Run with: `cargo run --example basic`

use att_rs::{
    print_inst, print_inst_with, AttPrinter, CmpElem, Expr, FeatureBits, InstFlags, Instruction,
    Opcode, PrintOptions, Register, VecWidth, VpcmpForm,
};

use Register::*;

fn main() {
    println!("=== att_rs basic example ===\n");

    // --- One-shot printing ---
    println!("1. One-shot printing (function prologue):");
    let prologue = [
        Instruction::new(Opcode::PUSH64r, vec![Rbp.into()]),
        Instruction::new(Opcode::MOV64rr, vec![Rbp.into(), Rsp.into()]),
        Instruction::new(Opcode::SUB64ri8, vec![Rsp.into(), Rsp.into(), 32i64.into()]),
        Instruction::builder(Opcode::MOV32rm)
            .reg(Eax)
            .mem(Rbp, 1, NoReg, -8, NoReg)
            .build(),
        Instruction::builder(Opcode::LOCKADD32mr)
            .mem(Rdi, 4, Rcx, 0, Fs)
            .reg(Eax)
            .flags(InstFlags::LOCK)
            .build(),
        Instruction::new(Opcode::CALL64pcrel32, vec![Expr::sym("memcpy").into()]),
    ];
    for inst in &prologue {
        println!("{}", print_inst(inst, FeatureBits::MODE_64BIT));
    }

    // --- Comments ---
    println!("\n2. Verbose comments (hex immediates, shuffle lanes):");
    for inst in [
        Instruction::new(Opcode::MOV32ri, vec![Ecx.into(), 70000i64.into()]),
        Instruction::new(Opcode::PSHUFDri, vec![Xmm0.into(), Xmm1.into(), 0x1bi64.into()]),
    ] {
        let (text, comments) =
            print_inst_with(&inst, FeatureBits::MODE_64BIT, PrintOptions::default());
        for line in comments.lines() {
            println!("\t# {}", line);
        }
        println!("{}", text);
    }

    // --- Aliases and folded predicates ---
    println!("\n3. Aliases and folded compare predicates:");
    let fxch = Instruction::new(Opcode::XCHF, vec![St1.into()]);
    let vpcmp = Instruction::builder(Opcode::Vpcmp {
        elem: CmpElem::Ud,
        width: VecWidth::Z512,
        form: VpcmpForm::Rrik,
    })
    .reg(K1)
    .reg(K2)
    .reg(Zmm0)
    .reg(Zmm1)
    .imm(6)
    .build();
    println!("{}", print_inst(&fxch, FeatureBits::MODE_64BIT));
    println!("{}", print_inst(&vpcmp, FeatureBits::MODE_64BIT));

    // --- Printer options ---
    println!("\n4. Hex immediates and markup:");
    let mut printer = AttPrinter::new();
    printer.print_imm_hex(true).use_markup(true);
    let add = Instruction::new(Opcode::ADD32ri, vec![Eax.into(), Eax.into(), 1000i64.into()]);
    println!("{}", printer.print_to_string(&add, FeatureBits::MODE_64BIT));

    // --- Annotations ---
    println!("\n5. Inline annotation (no comment sink):");
    let mut line = String::new();
    if printer
        .print_inst(&add, FeatureBits::MODE_64BIT, "loop counter", &mut line, None)
        .is_ok()
    {
        println!("{}", line);
    }
}
