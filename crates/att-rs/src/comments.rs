//! Verbose-assembly comments.
//!
//! Two kinds of comment go to the comment sink: instruction comments,
//! produced once per instruction by an [`InstComments`] generator, and the
//! hex value of large immediates, produced by the printer while it formats
//! operands. An instruction that received an instruction comment gets no
//! hex comments.

use alloc::vec::Vec;
use core::fmt;

use crate::desc::Opcode;
use crate::ir::{Instruction, Operand, Register};

/// Produces an opcode-specific comment for an instruction.
pub trait InstComments {
    /// Write the comment for `inst`, each line ending in `\n`.
    ///
    /// Returns `Ok(true)` if anything was written.
    ///
    /// # Errors
    ///
    /// Propagates sink write failures.
    fn emit(&self, inst: &Instruction, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error>;
}

/// A generator that never writes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoComments;

impl InstComments for NoComments {
    fn emit(&self, _inst: &Instruction, _out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        Ok(false)
    }
}

/// Describes the lane selection of shuffle instructions.
///
/// ```text
/// pshufd $27, %xmm1, %xmm0      # xmm0 = xmm1[3,2,1,0]
/// shufps $78, %xmm1, %xmm0      # xmm0 = xmm0[2,3],xmm1[0,1]
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ShuffleComments;

/// A shuffle decoded into destination, sources and lane mask. Mask values
/// `>= mask.len()` select from `src2`.
struct Shuffle<'a> {
    dst: Register,
    src1: Option<Register>,
    src2: Option<Register>,
    mask: &'a [u8],
}

impl InstComments for ShuffleComments {
    fn emit(&self, inst: &Instruction, out: &mut dyn fmt::Write) -> Result<bool, fmt::Error> {
        let reg = |i: usize| inst.operands.get(i).and_then(Operand::reg);
        let imm = |i: usize| inst.operands.get(i).and_then(Operand::imm);
        let mut mask = Vec::with_capacity(8);

        let (dst, src1, src2, imm) = match inst.opcode {
            Opcode::PSHUFDri | Opcode::PSHUFLWri | Opcode::PSHUFHWri => {
                (reg(0), reg(1), None, imm(2))
            }
            Opcode::PSHUFDmi | Opcode::PSHUFLWmi | Opcode::PSHUFHWmi => {
                (reg(0), None, None, imm(6))
            }
            Opcode::SHUFPSrri => (reg(0), reg(1), reg(2), imm(3)),
            _ => return Ok(false),
        };
        let (Some(dst), Some(imm)) = (dst, imm) else {
            return Ok(false);
        };
        let lane = |i: u32| ((imm >> (2 * i)) & 3) as u8;

        match inst.opcode {
            Opcode::PSHUFDri | Opcode::PSHUFDmi => mask.extend((0..4).map(lane)),
            Opcode::PSHUFLWri | Opcode::PSHUFLWmi => {
                mask.extend((0..4).map(lane));
                mask.extend(4..8);
            }
            Opcode::PSHUFHWri | Opcode::PSHUFHWmi => {
                mask.extend(0..4);
                mask.extend((0..4).map(|i| 4 + lane(i)));
            }
            _ => {
                mask.extend([lane(0), lane(1), 4 + lane(2), 4 + lane(3)]);
            }
        }

        Shuffle {
            dst,
            src1,
            src2,
            mask: &mask,
        }
        .write(out)?;
        Ok(true)
    }
}

impl Shuffle<'_> {
    fn write(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let n = self.mask.len();
        // Both sources the same register: one span per run, no split.
        let same = self.src2.is_none() || self.src1 == self.src2;
        let from_src1 = |m: u8| same || usize::from(m) < n;
        let name = |src: Option<Register>| src.map_or("mem", Register::name);

        write!(out, "{} = ", self.dst.name())?;
        let mut i = 0;
        while i < n {
            if i != 0 {
                out.write_char(',')?;
            }
            let first = from_src1(self.mask[i]);
            let src = if first { self.src1 } else { self.src2 };
            write!(out, "{}[", name(src))?;
            let start = i;
            while i < n && from_src1(self.mask[i]) == first {
                if i != start {
                    out.write_char(',')?;
                }
                write!(out, "{}", usize::from(self.mask[i]) % n)?;
                i += 1;
            }
            out.write_char(']')?;
        }
        out.write_char('\n')
    }
}

/// Whether `value` is small enough to need no hex comment.
pub fn is_small_imm(value: i64) -> bool {
    (-256..=255).contains(&value)
}

/// Narrowest of 16, 32 or 64 bits that sign-extends back to `value`.
pub fn hex_width(value: i64) -> u32 {
    if value == i64::from(value as i16) {
        16
    } else if value == i64::from(value as i32) {
        32
    } else {
        64
    }
}

/// Write `imm = 0x<HEX>\n` for `value` at its [`hex_width`].
///
/// # Errors
///
/// Propagates sink write failures.
pub fn write_imm_comment(out: &mut dyn fmt::Write, value: i64) -> fmt::Result {
    match hex_width(value) {
        16 => writeln!(out, "imm = 0x{:X}", value as u16),
        32 => writeln!(out, "imm = 0x{:X}", value as u32),
        _ => writeln!(out, "imm = 0x{:X}", value as u64),
    }
}
