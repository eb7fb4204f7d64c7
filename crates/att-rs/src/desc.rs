//! Instruction descriptor table.
//!
//! Every [`Opcode`] has a static [`InstrDesc`]: its AT&T mnemonic, the
//! number of operands the decoder produces for it, the print template
//! (operands already in AT&T order) and the encoding flags the printer
//! consults. Templates refer to operands by their index in
//! [`Instruction::operands`](crate::Instruction::operands).
//!
//! ## Adding an Instruction
//!
//! 1. Add a variant to [`Opcode`] and to [`Opcode::FLAT`].
//! 2. Add its descriptor in [`Opcode::desc`], reusing a shared template
//!    where one fits.
//! 3. Add a rendering test in `tests/att.rs`.

use crate::error::{Expected, ShapeError};
use crate::ir::{Instruction, MemRef};

// ─── Flags ──────────────────────────────────────────────────────────────

/// How the ModR/M byte is used. Only the distinction the printer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Form {
    /// Not a ModR/M source form.
    #[default]
    Other,
    /// Register source in ModR/M.rm.
    MrmSrcReg,
    /// Memory source in ModR/M.rm.
    MrmSrcMem,
}

/// Target-specific descriptor flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TsFlags(u32);

impl TsFlags {
    /// No flags.
    pub const NONE: Self = Self(0);
    /// The opcode always carries a `lock` prefix.
    pub const LOCK: Self = Self(1 << 0);
    /// The opcode always carries a `notrack` prefix.
    pub const NOTRACK: Self = Self(1 << 1);
    /// VEX/EVEX.W: 64-bit elements.
    pub const VEX_W: Self = Self(1 << 2);
    /// VEX/EVEX.L: 256-bit vector length.
    pub const VEX_L: Self = Self(1 << 3);
    /// EVEX.L': 512-bit vector length.
    pub const EVEX_L2: Self = Self(1 << 4);
    /// EVEX.aaa: a mask operand is present.
    pub const EVEX_K: Self = Self(1 << 5);
    /// EVEX.b on a memory form: embedded broadcast.
    pub const EVEX_B: Self = Self(1 << 6);

    /// Union of two flag sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

// ─── Print templates ────────────────────────────────────────────────────

/// One slot of a print template.
///
/// Slots other than [`Print::Mask`], [`Print::Broadcast`] and
/// [`Print::Suffix`] are separated by `\t` (first) or `, ` (rest); those
/// three attach to the preceding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Print {
    /// Plain operand: register, immediate or expression.
    Op(u8),
    /// General memory group `seg:disp(base,index,scale)`.
    Mem(u8),
    /// Source-index group `seg:(reg)`.
    SrcIdx(u8),
    /// Destination-index register, always `%es:(reg)`.
    DstIdx(u8),
    /// Absolute-offset group `seg:disp`.
    MemOffs(u8),
    /// Immediate masked to 8 bits.
    U8Imm(u8),
    /// x87 stack register; `st(0)` is spelled out.
    STi(u8),
    /// PC-relative branch target, no `$`.
    PcRel(u8),
    /// Indirect branch target, `*` + operand.
    Ind(u8),
    /// Fixed operand text such as `%cl` or `%st`.
    Lit(&'static str),
    /// Mask register in braces: ` {%k1}`.
    Mask(u8),
    /// Broadcast lane count `{1toN}`, derived from the descriptor flags.
    Broadcast,
    /// Fixed trailing text such as ` {z}`.
    Suffix(&'static str),
}

impl Print {
    /// Whether the slot attaches to the previous one without a separator.
    pub fn is_glued(self) -> bool {
        matches!(self, Print::Mask(_) | Print::Broadcast | Print::Suffix(_))
    }
}

use Print::*;

const NONE: &[Print] = &[];
/// `op0` (one operand, or a tied destination).
const R: &[Print] = &[Op(0)];
/// `src, dst`.
const RR: &[Print] = &[Op(1), Op(0)];
/// `src2, dst` with `src1` tied to `dst`.
const RRR_TIED: &[Print] = &[Op(2), Op(0)];
/// `src2, src1, dst`.
const RRR: &[Print] = &[Op(2), Op(1), Op(0)];
/// `mem, dst`.
const RM: &[Print] = &[Mem(1), Op(0)];
/// `mem, dst` with `src1` tied to `dst`.
const RRM_TIED: &[Print] = &[Mem(2), Op(0)];
/// `src2_mem, src1, dst`.
const RRM: &[Print] = &[Mem(2), Op(1), Op(0)];
/// `src, mem`.
const MR: &[Print] = &[Op(5), Mem(0)];
const SHIFT_RI: &[Print] = &[U8Imm(2), Op(0)];
const SHIFT_CL: &[Print] = &[Lit("%cl"), Op(0)];
const PCREL: &[Print] = &[PcRel(0)];
const IND: &[Print] = &[Ind(0)];
const U8: &[Print] = &[U8Imm(0)];
const STI: &[Print] = &[STi(0)];
const SHUF_RI: &[Print] = &[U8Imm(2), Op(1), Op(0)];
const SHUF_MI: &[Print] = &[U8Imm(6), Mem(1), Op(0)];

const CMP_RRI: &[Print] = &[U8Imm(3), Op(2), Op(1), Op(0)];
const CMP_RMI: &[Print] = &[U8Imm(7), Mem(2), Op(1), Op(0)];
const CMP_RRIK: &[Print] = &[U8Imm(4), Op(3), Op(2), Op(0), Mask(1)];
const CMP_RMIK: &[Print] = &[U8Imm(8), Mem(3), Op(2), Op(0), Mask(1)];
const CMP_RMIB: &[Print] = &[U8Imm(7), Mem(2), Broadcast, Op(1), Op(0)];
const CMP_RMIBK: &[Print] = &[U8Imm(8), Mem(3), Broadcast, Op(2), Op(0), Mask(1)];

// ─── Descriptors ────────────────────────────────────────────────────────

/// Static description of one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrDesc {
    /// AT&T mnemonic, size suffix included.
    pub mnemonic: &'static str,
    /// Number of operands the instruction carries.
    pub num_operands: u8,
    /// Print template, in AT&T operand order.
    pub print: &'static [Print],
    /// ModR/M form.
    pub form: Form,
    /// Encoding flags.
    pub flags: TsFlags,
}

const fn d(mnemonic: &'static str, num_operands: u8, print: &'static [Print]) -> InstrDesc {
    InstrDesc {
        mnemonic,
        num_operands,
        print,
        form: Form::Other,
        flags: TsFlags::NONE,
    }
}

impl InstrDesc {
    const fn form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }

    const fn flags(mut self, flags: TsFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    /// Number of broadcast lanes for an EVEX.b memory form.
    ///
    /// 512-bit: 8 qwords or 16 dwords; 256-bit: 4 or 8; 128-bit: 2 or 4.
    pub fn broadcast_count(&self) -> u8 {
        let w = self.flags.contains(TsFlags::VEX_W);
        if self.flags.contains(TsFlags::EVEX_L2) {
            if w {
                8
            } else {
                16
            }
        } else if self.flags.contains(TsFlags::VEX_L) {
            if w {
                4
            } else {
                8
            }
        } else if w {
            2
        } else {
            4
        }
    }

    /// Check `inst` against this descriptor: the opcode is a real form,
    /// the operand count matches, then the kind each template slot
    /// requires.
    ///
    /// # Errors
    ///
    /// [`ShapeError`] describing the first mismatch.
    pub fn check(&self, inst: &Instruction) -> Result<(), ShapeError> {
        if !inst.opcode.is_defined() {
            return Err(ShapeError::UndefinedForm {
                opcode: inst.opcode,
            });
        }
        if inst.operands.len() != usize::from(self.num_operands) {
            return Err(ShapeError::OperandCount {
                opcode: inst.opcode,
                expected: usize::from(self.num_operands),
                found: inst.operands.len(),
            });
        }
        check_slots(inst, self.print)
    }
}

/// Check that every operand `slots` reads exists and has the kind the
/// slot requires. Alias templates go through this before printing.
///
/// # Errors
///
/// [`ShapeError`] describing the first mismatch.
pub fn check_slots(inst: &Instruction, slots: &[Print]) -> Result<(), ShapeError> {
    for slot in slots {
        match *slot {
            Op(i) | Ind(i) => {
                inst.operand(usize::from(i))?;
            }
            Mem(i) => {
                MemRef::read(inst, usize::from(i))?;
            }
            SrcIdx(i) | MemOffs(i) => {
                let i = usize::from(i);
                let first = if matches!(slot, SrcIdx(_)) {
                    Expected::Register
                } else {
                    Expected::ImmOrExpr
                };
                inst.operand_as(i, first)?;
                inst.reg_at(i + 1)?;
            }
            DstIdx(i) | STi(i) | Mask(i) => {
                inst.reg_at(usize::from(i))?;
            }
            U8Imm(i) | PcRel(i) => {
                inst.operand_as(usize::from(i), Expected::ImmOrExpr)?;
            }
            Lit(_) | Broadcast | Suffix(_) => {}
        }
    }
    Ok(())
}

// ─── Opcodes ────────────────────────────────────────────────────────────

/// Element type of a `vpcom`/`vpcmp` compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CmpElem {
    /// Signed bytes.
    B,
    /// Signed words.
    W,
    /// Signed dwords.
    D,
    /// Signed qwords.
    Q,
    /// Unsigned bytes.
    Ub,
    /// Unsigned words.
    Uw,
    /// Unsigned dwords.
    Ud,
    /// Unsigned qwords.
    Uq,
}

impl CmpElem {
    /// Every element type.
    pub const ALL: [CmpElem; 8] = [
        CmpElem::B,
        CmpElem::W,
        CmpElem::D,
        CmpElem::Q,
        CmpElem::Ub,
        CmpElem::Uw,
        CmpElem::Ud,
        CmpElem::Uq,
    ];

    /// Mnemonic suffix (`b`, `uw`, …).
    pub fn suffix(self) -> &'static str {
        match self {
            CmpElem::B => "b",
            CmpElem::W => "w",
            CmpElem::D => "d",
            CmpElem::Q => "q",
            CmpElem::Ub => "ub",
            CmpElem::Uw => "uw",
            CmpElem::Ud => "ud",
            CmpElem::Uq => "uq",
        }
    }

    /// Whether the encoding sets VEX/EVEX.W.
    pub fn vex_w(self) -> bool {
        matches!(self, CmpElem::W | CmpElem::Q | CmpElem::Uw | CmpElem::Uq)
    }

    /// Whether EVEX embedded broadcast exists for this element type.
    /// Only dword and qword compares have `{1toN}` forms.
    pub fn has_broadcast(self) -> bool {
        matches!(self, CmpElem::D | CmpElem::Q | CmpElem::Ud | CmpElem::Uq)
    }

    fn vpcom(self) -> &'static str {
        match self {
            CmpElem::B => "vpcomb",
            CmpElem::W => "vpcomw",
            CmpElem::D => "vpcomd",
            CmpElem::Q => "vpcomq",
            CmpElem::Ub => "vpcomub",
            CmpElem::Uw => "vpcomuw",
            CmpElem::Ud => "vpcomud",
            CmpElem::Uq => "vpcomuq",
        }
    }

    fn vpcmp(self) -> &'static str {
        match self {
            CmpElem::B => "vpcmpb",
            CmpElem::W => "vpcmpw",
            CmpElem::D => "vpcmpd",
            CmpElem::Q => "vpcmpq",
            CmpElem::Ub => "vpcmpub",
            CmpElem::Uw => "vpcmpuw",
            CmpElem::Ud => "vpcmpud",
            CmpElem::Uq => "vpcmpuq",
        }
    }
}

/// EVEX vector length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VecWidth {
    /// 128-bit (`xmm`).
    Z128,
    /// 256-bit (`ymm`).
    Z256,
    /// 512-bit (`zmm`).
    Z512,
}

impl VecWidth {
    /// Every width.
    pub const ALL: [VecWidth; 3] = [VecWidth::Z128, VecWidth::Z256, VecWidth::Z512];

    /// Width in bits.
    pub fn bits(self) -> u16 {
        match self {
            VecWidth::Z128 => 128,
            VecWidth::Z256 => 256,
            VecWidth::Z512 => 512,
        }
    }

    fn flags(self) -> TsFlags {
        match self {
            VecWidth::Z128 => TsFlags::NONE,
            VecWidth::Z256 => TsFlags::VEX_L,
            VecWidth::Z512 => TsFlags::EVEX_L2,
        }
    }
}

/// Operand forms of the XOP `vpcom` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VpcomForm {
    /// `dst, src1, src2, imm`.
    Rri,
    /// `dst, src1, mem, imm`.
    Rmi,
}

/// Operand forms of the AVX-512 `vpcmp` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VpcmpForm {
    /// `dst, src1, src2, imm`.
    Rri,
    /// `dst, src1, mem, imm`.
    Rmi,
    /// `dst, mask, src1, src2, imm`.
    Rrik,
    /// `dst, mask, src1, mem, imm`.
    Rmik,
    /// `dst, src1, mem, imm` with broadcast.
    Rmib,
    /// `dst, mask, src1, mem, imm` with broadcast.
    Rmibk,
}

impl VpcmpForm {
    /// Every form.
    pub const ALL: [VpcmpForm; 6] = [
        VpcmpForm::Rri,
        VpcmpForm::Rmi,
        VpcmpForm::Rrik,
        VpcmpForm::Rmik,
        VpcmpForm::Rmib,
        VpcmpForm::Rmibk,
    ];

    /// Whether the memory source is a broadcast element.
    pub fn is_broadcast(self) -> bool {
        matches!(self, VpcmpForm::Rmib | VpcmpForm::Rmibk)
    }
}

/// Instruction variant.
///
/// Names follow the usual `<MNEMONIC><width><operand forms>` convention:
/// `r` register, `m` memory, `i` immediate, `k` mask, `b` broadcast.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Opcode {
    // -- no operands --
    /// `nop`
    NOOP,
    /// `hlt`
    HLT,
    /// `int3`
    INT3,
    /// `cpuid`
    CPUID,
    /// `syscall`
    SYSCALL,
    /// `clc`
    CLC,
    /// `stc`
    STC,
    /// `cmc`
    CMC,
    /// `cld`
    CLD,
    /// `std`
    STD,
    /// `pause`
    PAUSE,
    /// `leave` (64-bit)
    LEAVE64,
    /// `retq`
    RETQ,
    /// `retl`
    RETL,
    /// Bare 0x66 prefix byte.
    DATA16PREFIX,
    /// `iretw`
    IRET16,
    /// `iretl`
    IRET32,
    /// `popfw`
    POPF16,
    /// `pushfw`
    PUSHF16,
    /// `cbtw`
    CBW,
    /// `cwtl`
    CWDE,
    /// `cltd`
    CDQ,
    /// `cqto`
    CQO,
    /// `cltq`
    CDQE,
    /// `fldz`
    LDF0,
    /// `fld1`
    LDF1,

    // -- moves --
    /// `movb %r8, %r8`
    MOV8rr,
    /// `movw %r16, %r16`
    MOV16rr,
    /// `movl %r32, %r32`
    MOV32rr,
    /// `movq %r64, %r64`
    MOV64rr,
    /// `movl $imm, %r32`
    MOV32ri,
    /// `movabsq $imm64, %r64`
    MOV64ri,
    /// `movq $simm32, %r64`
    MOV64ri32,
    /// `movb $imm, mem`
    MOV8mi,
    /// `movl $imm, mem`
    MOV32mi,
    /// `movl mem, %r32`
    MOV32rm,
    /// `movq mem, %r64`
    MOV64rm,
    /// `movl %r32, mem`
    MOV32mr,
    /// `movq %r64, mem`
    MOV64mr,
    /// `movl %sreg, %r32`
    MOV32rs,
    /// `movq %crN, %r64`
    MOV64rc,
    /// `leal mem, %r32`
    LEA32r,
    /// `leaq mem, %r64`
    LEA64r,
    /// `movzbl %r8, %r32`
    MOVZX32rr8,
    /// `movsbl %r8, %r32`
    MOVSX32rr8,
    /// `movslq %r32, %r64`
    MOVSX64rr32,

    // -- integer ALU --
    /// `addl %r32, %r32`
    ADD32rr,
    /// `addq %r64, %r64`
    ADD64rr,
    /// `addl $imm32, %r32`
    ADD32ri,
    /// `addl $simm8, %r32`
    ADD32ri8,
    /// `addq $simm32, %r64`
    ADD64ri32,
    /// `addq $simm8, %r64`
    ADD64ri8,
    /// `addl mem, %r32`
    ADD32rm,
    /// `addl %r32, mem`
    ADD32mr,
    /// `addl $simm8, mem`
    ADD32mi8,
    /// `lock addl %r32, mem`
    LOCKADD32mr,
    /// `subl %r32, %r32`
    SUB32rr,
    /// `subq $simm8, %r64`
    SUB64ri8,
    /// `andl $imm32, %r32`
    AND32ri,
    /// `andq %r64, %r64`
    AND64rr,
    /// `orl %r32, %r32`
    OR32rr,
    /// `orl $simm8, %r32`
    OR32ri8,
    /// `xorl %r32, %r32`
    XOR32rr,
    /// `xorq %r64, %r64`
    XOR64rr,
    /// `cmpl %r32, %r32`
    CMP32rr,
    /// `cmpq %r64, %r64`
    CMP64rr,
    /// `cmpl $imm32, %r32`
    CMP32ri,
    /// `cmpl mem, %r32`
    CMP32rm,
    /// `cmpq $simm8, mem`
    CMP64mi8,
    /// `testl %r32, %r32`
    TEST32rr,
    /// `testb $imm8, %r8`
    TEST8ri,
    /// `imull %r32, %r32`
    IMUL32rr,
    /// `imull $imm32, %r32, %r32`
    IMUL32rri,
    /// `imulq $simm8, %r64, %r64`
    IMUL64rri8,
    /// `incl %r32`
    INC32r,
    /// `incq %r64`
    INC64r,
    /// `decl %r32`
    DEC32r,
    /// `negl %r32`
    NEG32r,
    /// `notq %r64`
    NOT64r,
    /// `bswapl %r32`
    BSWAP32r,
    /// `shll %r32` (by one)
    SHL32r1,
    /// `shll %cl, %r32`
    SHL32rCL,
    /// `shll $imm8, %r32`
    SHL32ri,
    /// `shrq $imm8, %r64`
    SHR64ri,
    /// `sarl $imm8, %r32`
    SAR32ri,
    /// `roll $imm8, %r32`
    ROL32ri,
    /// `rorq $imm8, %r64`
    ROR64ri,

    // -- stack and control flow --
    /// `pushl %r32`
    PUSH32r,
    /// `pushq %r64`
    PUSH64r,
    /// `popq %r64`
    POP64r,
    /// `pushq $simm8`
    PUSH64i8,
    /// `pushq $simm32`
    PUSH64i32,
    /// `jmp rel8`
    JMP1,
    /// `jmp rel32`
    JMP4,
    /// `je rel8`
    JE1,
    /// `jne rel8`
    JNE1,
    /// `calll rel32`; `callq` in 64-bit mode.
    CALLpcrel32,
    /// `callq rel32`
    CALL64pcrel32,
    /// `callq *%r64`
    CALL64r,
    /// `jmpq *%r64`
    JMP64r,
    /// `notrack jmpq *%r64`
    JMP64rNT,
    /// `int $imm8`
    INT,
    /// `aam $imm8`
    AAM8i8,
    /// `aad $imm8`
    AAD8i8,
    /// `enter $imm16, $imm8`
    ENTER,
    /// `inb $imm8, %al`
    IN8ri,
    /// `outb %al, $imm8`
    OUT8ir,

    // -- string operations --
    /// `movsb (src), %es:(dst)`
    MOVSB,
    /// `movsl (src), %es:(dst)`
    MOVSL,
    /// `movsq (src), %es:(dst)`
    MOVSQ,
    /// `stosb %al, %es:(dst)`
    STOSB,
    /// `stosq %rax, %es:(dst)`
    STOSQ,
    /// `lodsb (src), %al`
    LODSB,
    /// `scasb %es:(dst), %al`
    SCASB,
    /// `cmpsb %es:(dst), (src)`
    CMPSB,

    // -- absolute offsets (moffs) --
    /// `movb offs, %al`
    MOV8o32a,
    /// `movl offs, %eax`
    MOV32o32a,
    /// `movl %eax, offs`
    MOV32ao32,
    /// `movabsq offs64, %rax`
    MOV64o64a,

    // -- x87 --
    /// `fadd %st(i), %st`
    ADDFST0r,
    /// `fadd %st, %st(i)`
    ADDFrST0,
    /// `fxch %st(i)`
    XCHF,
    /// `fld %st(i)`
    LDFrr,
    /// `fst %st(i)`
    STFrr,
    /// `fstp %st(i)`
    STFPrr,
    /// `fcom %st(i)`
    COMFST0r,
    /// `fcomp %st(i)`
    COMPFST0r,
    /// `fucom %st(i)`
    UCOMFr,
    /// `fucomp %st(i)`
    UCOMFPr,
    /// `ffree %st(i)`, printed with the plain register name.
    FFREE,

    // -- SSE --
    /// `movaps %xmm, %xmm`
    MOVAPSrr,
    /// `movaps mem, %xmm`
    MOVAPSrm,
    /// `movaps %xmm, mem`
    MOVAPSmr,
    /// `movups mem, %xmm`
    MOVUPSrm,
    /// `addps %xmm, %xmm`
    ADDPSrr,
    /// `addps mem, %xmm`
    ADDPSrm,
    /// `mulps %xmm, %xmm`
    MULPSrr,
    /// `xorps %xmm, %xmm`
    XORPSrr,
    /// `pxor %xmm, %xmm`
    PXORrr,
    /// `movdqa %xmm, %xmm`
    MOVDQArr,
    /// `movq %r64, %xmm`
    MOV64toPQIrr,
    /// `pshufd $imm8, %xmm, %xmm`
    PSHUFDri,
    /// `pshufd $imm8, mem, %xmm`
    PSHUFDmi,
    /// `pshuflw $imm8, %xmm, %xmm`
    PSHUFLWri,
    /// `pshuflw $imm8, mem, %xmm`
    PSHUFLWmi,
    /// `pshufhw $imm8, %xmm, %xmm`
    PSHUFHWri,
    /// `pshufhw $imm8, mem, %xmm`
    PSHUFHWmi,
    /// `shufps $imm8, %xmm, %xmm`
    SHUFPSrri,

    // -- AVX / AVX-512 --
    /// `vaddps %xmm, %xmm, %xmm`
    VADDPSrr,
    /// `vaddps %ymm, %ymm, %ymm`
    VADDPSYrr,
    /// `vaddps mem, %xmm, %xmm`
    VADDPSrm,
    /// `vxorps %xmm, %xmm, %xmm`
    VXORPSrr,
    /// `vaddps %zmm, %zmm, %zmm`
    VADDPSZrr,
    /// `vaddps %zmm, %zmm, %zmm {%k}` (merge-masking)
    VADDPSZrrk,
    /// `vaddps %zmm, %zmm, %zmm {%k} {z}`
    VADDPSZrrkz,
    /// `vaddps mem{1to16}, %zmm, %zmm`
    VADDPSZrmb,
    /// `vaddpd mem{1to2}, %xmm, %xmm`
    VADDPDZ128rmb,
    /// `vmovaps mem, %zmm`
    VMOVAPSZrm,
    /// `kmovw %k, %k`
    KMOVWkk,
    /// `kortestw %k, %k`
    KORTESTWrr,

    // -- compare families whose mnemonic depends on the immediate --
    /// XOP `vpcom<cc><elem>`.
    Vpcom {
        /// Element type.
        elem: CmpElem,
        /// Register or memory source.
        form: VpcomForm,
    },
    /// AVX-512 `vpcmp<cc><elem>`.
    Vpcmp {
        /// Element type.
        elem: CmpElem,
        /// Vector length.
        width: VecWidth,
        /// Operand form.
        form: VpcmpForm,
    },
}

impl Opcode {
    /// Every opcode without parameters.
    pub const FLAT: &'static [Opcode] = &[
        Opcode::NOOP,
        Opcode::HLT,
        Opcode::INT3,
        Opcode::CPUID,
        Opcode::SYSCALL,
        Opcode::CLC,
        Opcode::STC,
        Opcode::CMC,
        Opcode::CLD,
        Opcode::STD,
        Opcode::PAUSE,
        Opcode::LEAVE64,
        Opcode::RETQ,
        Opcode::RETL,
        Opcode::DATA16PREFIX,
        Opcode::IRET16,
        Opcode::IRET32,
        Opcode::POPF16,
        Opcode::PUSHF16,
        Opcode::CBW,
        Opcode::CWDE,
        Opcode::CDQ,
        Opcode::CQO,
        Opcode::CDQE,
        Opcode::LDF0,
        Opcode::LDF1,
        Opcode::MOV8rr,
        Opcode::MOV16rr,
        Opcode::MOV32rr,
        Opcode::MOV64rr,
        Opcode::MOV32ri,
        Opcode::MOV64ri,
        Opcode::MOV64ri32,
        Opcode::MOV8mi,
        Opcode::MOV32mi,
        Opcode::MOV32rm,
        Opcode::MOV64rm,
        Opcode::MOV32mr,
        Opcode::MOV64mr,
        Opcode::MOV32rs,
        Opcode::MOV64rc,
        Opcode::LEA32r,
        Opcode::LEA64r,
        Opcode::MOVZX32rr8,
        Opcode::MOVSX32rr8,
        Opcode::MOVSX64rr32,
        Opcode::ADD32rr,
        Opcode::ADD64rr,
        Opcode::ADD32ri,
        Opcode::ADD32ri8,
        Opcode::ADD64ri32,
        Opcode::ADD64ri8,
        Opcode::ADD32rm,
        Opcode::ADD32mr,
        Opcode::ADD32mi8,
        Opcode::LOCKADD32mr,
        Opcode::SUB32rr,
        Opcode::SUB64ri8,
        Opcode::AND32ri,
        Opcode::AND64rr,
        Opcode::OR32rr,
        Opcode::OR32ri8,
        Opcode::XOR32rr,
        Opcode::XOR64rr,
        Opcode::CMP32rr,
        Opcode::CMP64rr,
        Opcode::CMP32ri,
        Opcode::CMP32rm,
        Opcode::CMP64mi8,
        Opcode::TEST32rr,
        Opcode::TEST8ri,
        Opcode::IMUL32rr,
        Opcode::IMUL32rri,
        Opcode::IMUL64rri8,
        Opcode::INC32r,
        Opcode::INC64r,
        Opcode::DEC32r,
        Opcode::NEG32r,
        Opcode::NOT64r,
        Opcode::BSWAP32r,
        Opcode::SHL32r1,
        Opcode::SHL32rCL,
        Opcode::SHL32ri,
        Opcode::SHR64ri,
        Opcode::SAR32ri,
        Opcode::ROL32ri,
        Opcode::ROR64ri,
        Opcode::PUSH32r,
        Opcode::PUSH64r,
        Opcode::POP64r,
        Opcode::PUSH64i8,
        Opcode::PUSH64i32,
        Opcode::JMP1,
        Opcode::JMP4,
        Opcode::JE1,
        Opcode::JNE1,
        Opcode::CALLpcrel32,
        Opcode::CALL64pcrel32,
        Opcode::CALL64r,
        Opcode::JMP64r,
        Opcode::JMP64rNT,
        Opcode::INT,
        Opcode::AAM8i8,
        Opcode::AAD8i8,
        Opcode::ENTER,
        Opcode::IN8ri,
        Opcode::OUT8ir,
        Opcode::MOVSB,
        Opcode::MOVSL,
        Opcode::MOVSQ,
        Opcode::STOSB,
        Opcode::STOSQ,
        Opcode::LODSB,
        Opcode::SCASB,
        Opcode::CMPSB,
        Opcode::MOV8o32a,
        Opcode::MOV32o32a,
        Opcode::MOV32ao32,
        Opcode::MOV64o64a,
        Opcode::ADDFST0r,
        Opcode::ADDFrST0,
        Opcode::XCHF,
        Opcode::LDFrr,
        Opcode::STFrr,
        Opcode::STFPrr,
        Opcode::COMFST0r,
        Opcode::COMPFST0r,
        Opcode::UCOMFr,
        Opcode::UCOMFPr,
        Opcode::FFREE,
        Opcode::MOVAPSrr,
        Opcode::MOVAPSrm,
        Opcode::MOVAPSmr,
        Opcode::MOVUPSrm,
        Opcode::ADDPSrr,
        Opcode::ADDPSrm,
        Opcode::MULPSrr,
        Opcode::XORPSrr,
        Opcode::PXORrr,
        Opcode::MOVDQArr,
        Opcode::MOV64toPQIrr,
        Opcode::PSHUFDri,
        Opcode::PSHUFDmi,
        Opcode::PSHUFLWri,
        Opcode::PSHUFLWmi,
        Opcode::PSHUFHWri,
        Opcode::PSHUFHWmi,
        Opcode::SHUFPSrri,
        Opcode::VADDPSrr,
        Opcode::VADDPSYrr,
        Opcode::VADDPSrm,
        Opcode::VXORPSrr,
        Opcode::VADDPSZrr,
        Opcode::VADDPSZrrk,
        Opcode::VADDPSZrrkz,
        Opcode::VADDPSZrmb,
        Opcode::VADDPDZ128rmb,
        Opcode::VMOVAPSZrm,
        Opcode::KMOVWkk,
        Opcode::KORTESTWrr,
    ];

    /// Every opcode, compare families expanded.
    pub fn all() -> impl Iterator<Item = Opcode> {
        let vpcom = CmpElem::ALL.into_iter().flat_map(|elem| {
            [VpcomForm::Rri, VpcomForm::Rmi]
                .into_iter()
                .map(move |form| Opcode::Vpcom { elem, form })
        });
        let vpcmp = CmpElem::ALL.into_iter().flat_map(|elem| {
            VecWidth::ALL.into_iter().flat_map(move |width| {
                VpcmpForm::ALL
                    .into_iter()
                    .map(move |form| Opcode::Vpcmp { elem, width, form })
            })
        });
        Self::FLAT
            .iter()
            .copied()
            .chain(vpcom)
            .chain(vpcmp.filter(|op| op.is_defined()))
    }

    /// Whether the opcode names a real instruction form. Byte and word
    /// `vpcmp` have no broadcast forms.
    pub fn is_defined(self) -> bool {
        match self {
            Opcode::Vpcmp { elem, form, .. } => !form.is_broadcast() || elem.has_broadcast(),
            _ => true,
        }
    }

    /// The opcode's descriptor.
    pub fn desc(self) -> InstrDesc {
        use Opcode::*;
        match self {
            NOOP => d("nop", 0, NONE),
            HLT => d("hlt", 0, NONE),
            INT3 => d("int3", 0, NONE),
            CPUID => d("cpuid", 0, NONE),
            SYSCALL => d("syscall", 0, NONE),
            CLC => d("clc", 0, NONE),
            STC => d("stc", 0, NONE),
            CMC => d("cmc", 0, NONE),
            CLD => d("cld", 0, NONE),
            STD => d("std", 0, NONE),
            PAUSE => d("pause", 0, NONE),
            LEAVE64 => d("leave", 0, NONE),
            RETQ => d("retq", 0, NONE),
            RETL => d("retl", 0, NONE),
            DATA16PREFIX => d("data16", 0, NONE),
            IRET16 => d("iretw", 0, NONE),
            IRET32 => d("iretl", 0, NONE),
            POPF16 => d("popfw", 0, NONE),
            PUSHF16 => d("pushfw", 0, NONE),
            CBW => d("cbtw", 0, NONE),
            CWDE => d("cwtl", 0, NONE),
            CDQ => d("cltd", 0, NONE),
            CQO => d("cqto", 0, NONE),
            CDQE => d("cltq", 0, NONE),
            LDF0 => d("fldz", 0, NONE),
            LDF1 => d("fld1", 0, NONE),

            MOV8rr => d("movb", 2, RR),
            MOV16rr => d("movw", 2, RR),
            MOV32rr => d("movl", 2, RR),
            MOV64rr => d("movq", 2, RR),
            MOV32ri => d("movl", 2, RR),
            MOV64ri => d("movabsq", 2, RR),
            MOV64ri32 => d("movq", 2, RR),
            MOV8mi => d("movb", 6, MR),
            MOV32mi => d("movl", 6, MR),
            MOV32rm => d("movl", 6, RM),
            MOV64rm => d("movq", 6, RM),
            MOV32mr => d("movl", 6, MR),
            MOV64mr => d("movq", 6, MR),
            MOV32rs => d("movl", 2, RR),
            MOV64rc => d("movq", 2, RR),
            LEA32r => d("leal", 6, RM),
            LEA64r => d("leaq", 6, RM),
            MOVZX32rr8 => d("movzbl", 2, RR),
            MOVSX32rr8 => d("movsbl", 2, RR),
            MOVSX64rr32 => d("movslq", 2, RR),

            ADD32rr => d("addl", 3, RRR_TIED),
            ADD64rr => d("addq", 3, RRR_TIED),
            ADD32ri | ADD32ri8 => d("addl", 3, RRR_TIED),
            ADD64ri32 | ADD64ri8 => d("addq", 3, RRR_TIED),
            ADD32rm => d("addl", 7, RRM_TIED),
            ADD32mr | ADD32mi8 => d("addl", 6, MR),
            LOCKADD32mr => d("addl", 6, MR).flags(TsFlags::LOCK),
            SUB32rr => d("subl", 3, RRR_TIED),
            SUB64ri8 => d("subq", 3, RRR_TIED),
            AND32ri => d("andl", 3, RRR_TIED),
            AND64rr => d("andq", 3, RRR_TIED),
            OR32rr | OR32ri8 => d("orl", 3, RRR_TIED),
            XOR32rr => d("xorl", 3, RRR_TIED),
            XOR64rr => d("xorq", 3, RRR_TIED),
            CMP32rr | CMP32ri => d("cmpl", 2, RR),
            CMP64rr => d("cmpq", 2, RR),
            CMP32rm => d("cmpl", 6, RM),
            CMP64mi8 => d("cmpq", 6, MR),
            TEST32rr => d("testl", 2, RR),
            TEST8ri => d("testb", 2, RR),
            IMUL32rr => d("imull", 3, RRR_TIED),
            IMUL32rri => d("imull", 3, RRR),
            IMUL64rri8 => d("imulq", 3, RRR),
            INC32r => d("incl", 2, R),
            INC64r => d("incq", 2, R),
            DEC32r => d("decl", 2, R),
            NEG32r => d("negl", 2, R),
            NOT64r => d("notq", 2, R),
            BSWAP32r => d("bswapl", 2, R),
            SHL32r1 => d("shll", 2, R),
            SHL32rCL => d("shll", 2, SHIFT_CL),
            SHL32ri => d("shll", 3, SHIFT_RI),
            SHR64ri => d("shrq", 3, SHIFT_RI),
            SAR32ri => d("sarl", 3, SHIFT_RI),
            ROL32ri => d("roll", 3, SHIFT_RI),
            ROR64ri => d("rorq", 3, SHIFT_RI),

            PUSH32r => d("pushl", 1, R),
            PUSH64r => d("pushq", 1, R),
            POP64r => d("popq", 1, R),
            PUSH64i8 | PUSH64i32 => d("pushq", 1, R),
            JMP1 | JMP4 => d("jmp", 1, PCREL),
            JE1 => d("je", 1, PCREL),
            JNE1 => d("jne", 1, PCREL),
            CALLpcrel32 => d("calll", 1, PCREL),
            CALL64pcrel32 => d("callq", 1, PCREL),
            CALL64r => d("callq", 1, IND),
            JMP64r => d("jmpq", 1, IND),
            JMP64rNT => d("jmpq", 1, IND).flags(TsFlags::NOTRACK),
            INT => d("int", 1, U8),
            AAM8i8 => d("aam", 1, U8),
            AAD8i8 => d("aad", 1, U8),
            ENTER => d("enter", 2, &[Op(0), Op(1)]),
            IN8ri => d("inb", 1, &[U8Imm(0), Lit("%al")]),
            OUT8ir => d("outb", 1, &[Lit("%al"), U8Imm(0)]),

            MOVSB => d("movsb", 3, &[SrcIdx(1), DstIdx(0)]),
            MOVSL => d("movsl", 3, &[SrcIdx(1), DstIdx(0)]),
            MOVSQ => d("movsq", 3, &[SrcIdx(1), DstIdx(0)]),
            STOSB => d("stosb", 1, &[Lit("%al"), DstIdx(0)]),
            STOSQ => d("stosq", 1, &[Lit("%rax"), DstIdx(0)]),
            LODSB => d("lodsb", 2, &[SrcIdx(0), Lit("%al")]),
            SCASB => d("scasb", 1, &[DstIdx(0), Lit("%al")]),
            CMPSB => d("cmpsb", 3, &[DstIdx(0), SrcIdx(1)]),

            MOV8o32a => d("movb", 2, &[MemOffs(0), Lit("%al")]),
            MOV32o32a => d("movl", 2, &[MemOffs(0), Lit("%eax")]),
            MOV32ao32 => d("movl", 2, &[Lit("%eax"), MemOffs(0)]),
            MOV64o64a => d("movabsq", 2, &[MemOffs(0), Lit("%rax")]),

            ADDFST0r => d("fadd", 1, &[STi(0), Lit("%st")]),
            ADDFrST0 => d("fadd", 1, &[Lit("%st"), STi(0)]),
            XCHF => d("fxch", 1, STI),
            LDFrr => d("fld", 1, STI),
            STFrr => d("fst", 1, STI),
            STFPrr => d("fstp", 1, STI),
            COMFST0r => d("fcom", 1, STI),
            COMPFST0r => d("fcomp", 1, STI),
            UCOMFr => d("fucom", 1, STI),
            UCOMFPr => d("fucomp", 1, STI),
            FFREE => d("ffree", 1, R),

            MOVAPSrr => d("movaps", 2, RR),
            MOVAPSrm => d("movaps", 6, RM),
            MOVAPSmr => d("movaps", 6, MR),
            MOVUPSrm => d("movups", 6, RM),
            ADDPSrr => d("addps", 3, RRR_TIED),
            ADDPSrm => d("addps", 7, RRM_TIED),
            MULPSrr => d("mulps", 3, RRR_TIED),
            XORPSrr => d("xorps", 3, RRR_TIED),
            PXORrr => d("pxor", 3, RRR_TIED),
            MOVDQArr => d("movdqa", 2, RR),
            MOV64toPQIrr => d("movq", 2, RR),
            PSHUFDri => d("pshufd", 3, SHUF_RI),
            PSHUFDmi => d("pshufd", 7, SHUF_MI),
            PSHUFLWri => d("pshuflw", 3, SHUF_RI),
            PSHUFLWmi => d("pshuflw", 7, SHUF_MI),
            PSHUFHWri => d("pshufhw", 3, SHUF_RI),
            PSHUFHWmi => d("pshufhw", 7, SHUF_MI),
            SHUFPSrri => d("shufps", 4, &[U8Imm(3), Op(2), Op(0)]),

            VADDPSrr => d("vaddps", 3, RRR),
            VADDPSYrr => d("vaddps", 3, RRR).flags(TsFlags::VEX_L),
            VADDPSrm => d("vaddps", 7, RRM).form(Form::MrmSrcMem),
            VXORPSrr => d("vxorps", 3, RRR),
            VADDPSZrr => d("vaddps", 3, RRR).flags(TsFlags::EVEX_L2),
            VADDPSZrrk => d("vaddps", 5, &[Op(4), Op(3), Op(0), Mask(2)])
                .flags(TsFlags::EVEX_L2.union(TsFlags::EVEX_K)),
            VADDPSZrrkz => d("vaddps", 4, &[Op(3), Op(2), Op(0), Mask(1), Suffix(" {z}")])
                .flags(TsFlags::EVEX_L2.union(TsFlags::EVEX_K)),
            VADDPSZrmb => d("vaddps", 7, &[Mem(2), Broadcast, Op(1), Op(0)])
                .form(Form::MrmSrcMem)
                .flags(TsFlags::EVEX_L2.union(TsFlags::EVEX_B)),
            VADDPDZ128rmb => d("vaddpd", 7, &[Mem(2), Broadcast, Op(1), Op(0)])
                .form(Form::MrmSrcMem)
                .flags(TsFlags::VEX_W.union(TsFlags::EVEX_B)),
            VMOVAPSZrm => d("vmovaps", 6, RM)
                .form(Form::MrmSrcMem)
                .flags(TsFlags::EVEX_L2),
            KMOVWkk => d("kmovw", 2, RR),
            KORTESTWrr => d("kortestw", 2, RR),

            Vpcom { elem, form } => match form {
                VpcomForm::Rri => d(elem.vpcom(), 4, CMP_RRI).form(Form::MrmSrcReg),
                VpcomForm::Rmi => d(elem.vpcom(), 8, CMP_RMI).form(Form::MrmSrcMem),
            },
            Vpcmp { elem, width, form } => {
                let (num_operands, print, form, flags) = match form {
                    VpcmpForm::Rri => (4, CMP_RRI, Form::MrmSrcReg, TsFlags::NONE),
                    VpcmpForm::Rmi => (8, CMP_RMI, Form::MrmSrcMem, TsFlags::NONE),
                    VpcmpForm::Rrik => (5, CMP_RRIK, Form::MrmSrcReg, TsFlags::EVEX_K),
                    VpcmpForm::Rmik => (9, CMP_RMIK, Form::MrmSrcMem, TsFlags::EVEX_K),
                    VpcmpForm::Rmib => (8, CMP_RMIB, Form::MrmSrcMem, TsFlags::EVEX_B),
                    VpcmpForm::Rmibk => (
                        9,
                        CMP_RMIBK,
                        Form::MrmSrcMem,
                        TsFlags::EVEX_B.union(TsFlags::EVEX_K),
                    ),
                };
                let w = if elem.vex_w() {
                    TsFlags::VEX_W
                } else {
                    TsFlags::NONE
                };
                d(elem.vpcmp(), num_operands, print)
                    .form(form)
                    .flags(flags.union(width.flags()).union(w))
            }
        }
    }
}
