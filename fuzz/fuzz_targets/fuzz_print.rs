#![no_main]
use att_rs::{AttPrinter, FeatureBits, InstFlags, Instruction, Opcode, Operand, Register};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let opcodes: Vec<Opcode> = Opcode::all().collect();
    let opcode = opcodes[usize::from(head) * opcodes.len() / 256];

    // Three bytes per operand: a tag and a 16-bit payload.
    let mut operands = Vec::new();
    for chunk in rest.chunks_exact(3).take(usize::from(opcode.desc().num_operands)) {
        let payload = u16::from_le_bytes([chunk[1], chunk[2]]);
        let op = match chunk[0] % 3 {
            0 => Operand::Register(
                Register::from_id(payload % Register::ALL.len() as u16).unwrap_or(Register::NoReg),
            ),
            1 => Operand::Immediate(i64::from(payload as i16) << (chunk[0] >> 2)),
            _ => Operand::Expression(att_rs::Expr::sym("sym").plus(att_rs::Expr::Const(
                i64::from(payload),
            ))),
        };
        operands.push(op);
    }

    let flags = rest.last().copied().unwrap_or(0);
    let mut inst = Instruction::new(opcode, operands);
    inst.flags = InstFlags::from_bits(flags & 0x0f);

    // Shape-valid instructions must print without panicking, in any mode
    // and with any combination of output options.
    if inst.validate().is_err() {
        return;
    }
    for features in [
        FeatureBits::MODE_16BIT,
        FeatureBits::MODE_32BIT,
        FeatureBits::MODE_64BIT,
    ] {
        let mut printer = AttPrinter::new();
        printer.print_imm_hex(head & 1 != 0).use_markup(head & 2 != 0);
        let mut out = String::new();
        let mut comments = String::new();
        let _ = printer.print_inst(&inst, features, "fuzz", &mut out, Some(&mut comments));
        assert!(out.starts_with('\t'));
    }
});
