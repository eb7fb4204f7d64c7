//! Instruction representation consumed by the printer.
//!
//! An [`Instruction`] is an [`Opcode`] plus a flat list of [`Operand`]s.
//! A memory reference is not a composite operand: it occupies a group of
//! five consecutive operands (base, scale, index, displacement, segment)
//! that is read back through the [`MemRef`] view.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::BitOr;

use crate::desc::Opcode;
use crate::error::{Expected, OperandKind, ShapeError};

/// x86 register.
///
/// The discriminant is the register id; `NoReg` (id 0) marks an absent
/// base, index or segment inside a memory operand group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Register {
    /// No register (id 0): an absent base, index or segment.
    NoReg,
    /// RAX: 64-bit accumulator.
    Rax,
    /// RCX: 64-bit counter.
    Rcx,
    /// RDX: 64-bit data.
    Rdx,
    /// RBX: 64-bit base.
    Rbx,
    /// RSP: 64-bit stack pointer.
    Rsp,
    /// RBP: 64-bit frame pointer.
    Rbp,
    /// RSI: 64-bit source index.
    Rsi,
    /// RDI: 64-bit destination index.
    Rdi,
    /// Extended 64-bit register.
    R8,
    /// Extended 64-bit register.
    R9,
    /// Extended 64-bit register.
    R10,
    /// Extended 64-bit register.
    R11,
    /// Extended 64-bit register.
    R12,
    /// Extended 64-bit register.
    R13,
    /// Extended 64-bit register.
    R14,
    /// Extended 64-bit register.
    R15,
    /// EAX: low 32 bits of RAX.
    Eax,
    /// ECX: low 32 bits of RCX.
    Ecx,
    /// EDX: low 32 bits of RDX.
    Edx,
    /// EBX: low 32 bits of RBX.
    Ebx,
    /// ESP: low 32 bits of RSP.
    Esp,
    /// EBP: low 32 bits of RBP.
    Ebp,
    /// ESI: low 32 bits of RSI.
    Esi,
    /// EDI: low 32 bits of RDI.
    Edi,
    /// Extended 32-bit register.
    R8d,
    /// Extended 32-bit register.
    R9d,
    /// Extended 32-bit register.
    R10d,
    /// Extended 32-bit register.
    R11d,
    /// Extended 32-bit register.
    R12d,
    /// Extended 32-bit register.
    R13d,
    /// Extended 32-bit register.
    R14d,
    /// Extended 32-bit register.
    R15d,
    /// AX: 16-bit register.
    Ax,
    /// CX: 16-bit register.
    Cx,
    /// DX: 16-bit register.
    Dx,
    /// BX: 16-bit register.
    Bx,
    /// SP: 16-bit register.
    Sp,
    /// BP: 16-bit register.
    Bp,
    /// SI: 16-bit register.
    Si,
    /// DI: 16-bit register.
    Di,
    /// Extended 16-bit register.
    R8w,
    /// Extended 16-bit register.
    R9w,
    /// Extended 16-bit register.
    R10w,
    /// Extended 16-bit register.
    R11w,
    /// Extended 16-bit register.
    R12w,
    /// Extended 16-bit register.
    R13w,
    /// Extended 16-bit register.
    R14w,
    /// Extended 16-bit register.
    R15w,
    /// AL: 8-bit register.
    Al,
    /// CL: 8-bit register.
    Cl,
    /// DL: 8-bit register.
    Dl,
    /// BL: 8-bit register.
    Bl,
    /// AH: 8-bit register.
    Ah,
    /// CH: 8-bit register.
    Ch,
    /// DH: 8-bit register.
    Dh,
    /// BH: 8-bit register.
    Bh,
    /// SPL: 8-bit register.
    Spl,
    /// BPL: 8-bit register.
    Bpl,
    /// SIL: 8-bit register.
    Sil,
    /// DIL: 8-bit register.
    Dil,
    /// Extended 8-bit register.
    R8b,
    /// Extended 8-bit register.
    R9b,
    /// Extended 8-bit register.
    R10b,
    /// Extended 8-bit register.
    R11b,
    /// Extended 8-bit register.
    R12b,
    /// Extended 8-bit register.
    R13b,
    /// Extended 8-bit register.
    R14b,
    /// Extended 8-bit register.
    R15b,
    /// Instruction pointer (64-bit).
    Rip,
    /// Instruction pointer (32-bit).
    Eip,
    /// Instruction pointer (16-bit).
    Ip,
    /// ES segment register.
    Es,
    /// CS segment register.
    Cs,
    /// SS segment register.
    Ss,
    /// DS segment register.
    Ds,
    /// FS segment register.
    Fs,
    /// GS segment register.
    Gs,
    /// x87 stack top. Its table name is `st`.
    St0,
    /// x87 stack register.
    St1,
    /// x87 stack register.
    St2,
    /// x87 stack register.
    St3,
    /// x87 stack register.
    St4,
    /// x87 stack register.
    St5,
    /// x87 stack register.
    St6,
    /// x87 stack register.
    St7,
    /// 128-bit vector register.
    Xmm0,
    /// 128-bit vector register.
    Xmm1,
    /// 128-bit vector register.
    Xmm2,
    /// 128-bit vector register.
    Xmm3,
    /// 128-bit vector register.
    Xmm4,
    /// 128-bit vector register.
    Xmm5,
    /// 128-bit vector register.
    Xmm6,
    /// 128-bit vector register.
    Xmm7,
    /// 128-bit vector register.
    Xmm8,
    /// 128-bit vector register.
    Xmm9,
    /// 128-bit vector register.
    Xmm10,
    /// 128-bit vector register.
    Xmm11,
    /// 128-bit vector register.
    Xmm12,
    /// 128-bit vector register.
    Xmm13,
    /// 128-bit vector register.
    Xmm14,
    /// 128-bit vector register.
    Xmm15,
    /// 128-bit vector register.
    Xmm16,
    /// 128-bit vector register.
    Xmm17,
    /// 128-bit vector register.
    Xmm18,
    /// 128-bit vector register.
    Xmm19,
    /// 128-bit vector register.
    Xmm20,
    /// 128-bit vector register.
    Xmm21,
    /// 128-bit vector register.
    Xmm22,
    /// 128-bit vector register.
    Xmm23,
    /// 128-bit vector register.
    Xmm24,
    /// 128-bit vector register.
    Xmm25,
    /// 128-bit vector register.
    Xmm26,
    /// 128-bit vector register.
    Xmm27,
    /// 128-bit vector register.
    Xmm28,
    /// 128-bit vector register.
    Xmm29,
    /// 128-bit vector register.
    Xmm30,
    /// 128-bit vector register.
    Xmm31,
    /// 256-bit vector register.
    Ymm0,
    /// 256-bit vector register.
    Ymm1,
    /// 256-bit vector register.
    Ymm2,
    /// 256-bit vector register.
    Ymm3,
    /// 256-bit vector register.
    Ymm4,
    /// 256-bit vector register.
    Ymm5,
    /// 256-bit vector register.
    Ymm6,
    /// 256-bit vector register.
    Ymm7,
    /// 256-bit vector register.
    Ymm8,
    /// 256-bit vector register.
    Ymm9,
    /// 256-bit vector register.
    Ymm10,
    /// 256-bit vector register.
    Ymm11,
    /// 256-bit vector register.
    Ymm12,
    /// 256-bit vector register.
    Ymm13,
    /// 256-bit vector register.
    Ymm14,
    /// 256-bit vector register.
    Ymm15,
    /// 256-bit vector register.
    Ymm16,
    /// 256-bit vector register.
    Ymm17,
    /// 256-bit vector register.
    Ymm18,
    /// 256-bit vector register.
    Ymm19,
    /// 256-bit vector register.
    Ymm20,
    /// 256-bit vector register.
    Ymm21,
    /// 256-bit vector register.
    Ymm22,
    /// 256-bit vector register.
    Ymm23,
    /// 256-bit vector register.
    Ymm24,
    /// 256-bit vector register.
    Ymm25,
    /// 256-bit vector register.
    Ymm26,
    /// 256-bit vector register.
    Ymm27,
    /// 256-bit vector register.
    Ymm28,
    /// 256-bit vector register.
    Ymm29,
    /// 256-bit vector register.
    Ymm30,
    /// 256-bit vector register.
    Ymm31,
    /// 512-bit vector register.
    Zmm0,
    /// 512-bit vector register.
    Zmm1,
    /// 512-bit vector register.
    Zmm2,
    /// 512-bit vector register.
    Zmm3,
    /// 512-bit vector register.
    Zmm4,
    /// 512-bit vector register.
    Zmm5,
    /// 512-bit vector register.
    Zmm6,
    /// 512-bit vector register.
    Zmm7,
    /// 512-bit vector register.
    Zmm8,
    /// 512-bit vector register.
    Zmm9,
    /// 512-bit vector register.
    Zmm10,
    /// 512-bit vector register.
    Zmm11,
    /// 512-bit vector register.
    Zmm12,
    /// 512-bit vector register.
    Zmm13,
    /// 512-bit vector register.
    Zmm14,
    /// 512-bit vector register.
    Zmm15,
    /// 512-bit vector register.
    Zmm16,
    /// 512-bit vector register.
    Zmm17,
    /// 512-bit vector register.
    Zmm18,
    /// 512-bit vector register.
    Zmm19,
    /// 512-bit vector register.
    Zmm20,
    /// 512-bit vector register.
    Zmm21,
    /// 512-bit vector register.
    Zmm22,
    /// 512-bit vector register.
    Zmm23,
    /// 512-bit vector register.
    Zmm24,
    /// 512-bit vector register.
    Zmm25,
    /// 512-bit vector register.
    Zmm26,
    /// 512-bit vector register.
    Zmm27,
    /// 512-bit vector register.
    Zmm28,
    /// 512-bit vector register.
    Zmm29,
    /// 512-bit vector register.
    Zmm30,
    /// 512-bit vector register.
    Zmm31,
    /// AVX-512 opmask register.
    K0,
    /// AVX-512 opmask register.
    K1,
    /// AVX-512 opmask register.
    K2,
    /// AVX-512 opmask register.
    K3,
    /// AVX-512 opmask register.
    K4,
    /// AVX-512 opmask register.
    K5,
    /// AVX-512 opmask register.
    K6,
    /// AVX-512 opmask register.
    K7,
    /// Control register.
    Cr0,
    /// Control register.
    Cr2,
    /// Control register.
    Cr3,
    /// Control register.
    Cr4,
    /// Control register.
    Cr8,
    /// Debug register.
    Dr0,
    /// Debug register.
    Dr1,
    /// Debug register.
    Dr2,
    /// Debug register.
    Dr3,
    /// Debug register.
    Dr4,
    /// Debug register.
    Dr5,
    /// Debug register.
    Dr6,
    /// Debug register.
    Dr7,
}

impl Register {
    /// Every register, indexed by id.
    pub const ALL: [Register; 203] = [
        Register::NoReg, Register::Rax, Register::Rcx, Register::Rdx, Register::Rbx,
        Register::Rsp, Register::Rbp, Register::Rsi, Register::Rdi, Register::R8, Register::R9,
        Register::R10, Register::R11, Register::R12, Register::R13, Register::R14,
        Register::R15, Register::Eax, Register::Ecx, Register::Edx, Register::Ebx,
        Register::Esp, Register::Ebp, Register::Esi, Register::Edi, Register::R8d,
        Register::R9d, Register::R10d, Register::R11d, Register::R12d, Register::R13d,
        Register::R14d, Register::R15d, Register::Ax, Register::Cx, Register::Dx, Register::Bx,
        Register::Sp, Register::Bp, Register::Si, Register::Di, Register::R8w, Register::R9w,
        Register::R10w, Register::R11w, Register::R12w, Register::R13w, Register::R14w,
        Register::R15w, Register::Al, Register::Cl, Register::Dl, Register::Bl, Register::Ah,
        Register::Ch, Register::Dh, Register::Bh, Register::Spl, Register::Bpl, Register::Sil,
        Register::Dil, Register::R8b, Register::R9b, Register::R10b, Register::R11b,
        Register::R12b, Register::R13b, Register::R14b, Register::R15b, Register::Rip,
        Register::Eip, Register::Ip, Register::Es, Register::Cs, Register::Ss, Register::Ds,
        Register::Fs, Register::Gs, Register::St0, Register::St1, Register::St2, Register::St3,
        Register::St4, Register::St5, Register::St6, Register::St7, Register::Xmm0,
        Register::Xmm1, Register::Xmm2, Register::Xmm3, Register::Xmm4, Register::Xmm5,
        Register::Xmm6, Register::Xmm7, Register::Xmm8, Register::Xmm9, Register::Xmm10,
        Register::Xmm11, Register::Xmm12, Register::Xmm13, Register::Xmm14, Register::Xmm15,
        Register::Xmm16, Register::Xmm17, Register::Xmm18, Register::Xmm19, Register::Xmm20,
        Register::Xmm21, Register::Xmm22, Register::Xmm23, Register::Xmm24, Register::Xmm25,
        Register::Xmm26, Register::Xmm27, Register::Xmm28, Register::Xmm29, Register::Xmm30,
        Register::Xmm31, Register::Ymm0, Register::Ymm1, Register::Ymm2, Register::Ymm3,
        Register::Ymm4, Register::Ymm5, Register::Ymm6, Register::Ymm7, Register::Ymm8,
        Register::Ymm9, Register::Ymm10, Register::Ymm11, Register::Ymm12, Register::Ymm13,
        Register::Ymm14, Register::Ymm15, Register::Ymm16, Register::Ymm17, Register::Ymm18,
        Register::Ymm19, Register::Ymm20, Register::Ymm21, Register::Ymm22, Register::Ymm23,
        Register::Ymm24, Register::Ymm25, Register::Ymm26, Register::Ymm27, Register::Ymm28,
        Register::Ymm29, Register::Ymm30, Register::Ymm31, Register::Zmm0, Register::Zmm1,
        Register::Zmm2, Register::Zmm3, Register::Zmm4, Register::Zmm5, Register::Zmm6,
        Register::Zmm7, Register::Zmm8, Register::Zmm9, Register::Zmm10, Register::Zmm11,
        Register::Zmm12, Register::Zmm13, Register::Zmm14, Register::Zmm15, Register::Zmm16,
        Register::Zmm17, Register::Zmm18, Register::Zmm19, Register::Zmm20, Register::Zmm21,
        Register::Zmm22, Register::Zmm23, Register::Zmm24, Register::Zmm25, Register::Zmm26,
        Register::Zmm27, Register::Zmm28, Register::Zmm29, Register::Zmm30, Register::Zmm31,
        Register::K0, Register::K1, Register::K2, Register::K3, Register::K4, Register::K5,
        Register::K6, Register::K7, Register::Cr0, Register::Cr2, Register::Cr3, Register::Cr4,
        Register::Cr8, Register::Dr0, Register::Dr1, Register::Dr2, Register::Dr3,
        Register::Dr4, Register::Dr5, Register::Dr6, Register::Dr7,
    ];

    /// The numeric register id.
    #[inline]
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Look a register up by id.
    #[must_use]
    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Whether this is the absent register.
    #[inline]
    pub fn is_none(self) -> bool {
        self == Register::NoReg
    }

    /// Whether this is one of the six segment registers.
    pub fn is_segment(self) -> bool {
        use Register::*;
        matches!(self, Es | Cs | Ss | Ds | Fs | Gs)
    }

    /// Whether this is an x87 stack register.
    pub fn is_st(self) -> bool {
        (Register::St0.id()..=Register::St7.id()).contains(&self.id())
    }

    /// Whether this is an AVX-512 opmask register.
    pub fn is_mask(self) -> bool {
        (Register::K0.id()..=Register::K7.id()).contains(&self.id())
    }

    /// `ST(n)`, `n` in 0..8.
    pub fn st(n: u8) -> Option<Self> {
        Self::nth(Register::St0, n, 8)
    }

    /// `XMMn`, `n` in 0..32.
    pub fn xmm(n: u8) -> Option<Self> {
        Self::nth(Register::Xmm0, n, 32)
    }

    /// `YMMn`, `n` in 0..32.
    pub fn ymm(n: u8) -> Option<Self> {
        Self::nth(Register::Ymm0, n, 32)
    }

    /// `ZMMn`, `n` in 0..32.
    pub fn zmm(n: u8) -> Option<Self> {
        Self::nth(Register::Zmm0, n, 32)
    }

    /// `Kn`, `n` in 0..8.
    pub fn k(n: u8) -> Option<Self> {
        Self::nth(Register::K0, n, 8)
    }

    fn nth(first: Register, n: u8, count: u8) -> Option<Self> {
        if n < count {
            Self::from_id(first.id() + u16::from(n))
        } else {
            None
        }
    }

    /// The architectural (table) name, without the `%` decoration.
    pub fn name(self) -> &'static str {
        use Register::*;
        match self {
            NoReg => "noreg",
            Rax => "rax",
            Rcx => "rcx",
            Rdx => "rdx",
            Rbx => "rbx",
            Rsp => "rsp",
            Rbp => "rbp",
            Rsi => "rsi",
            Rdi => "rdi",
            R8 => "r8",
            R9 => "r9",
            R10 => "r10",
            R11 => "r11",
            R12 => "r12",
            R13 => "r13",
            R14 => "r14",
            R15 => "r15",
            Eax => "eax",
            Ecx => "ecx",
            Edx => "edx",
            Ebx => "ebx",
            Esp => "esp",
            Ebp => "ebp",
            Esi => "esi",
            Edi => "edi",
            R8d => "r8d",
            R9d => "r9d",
            R10d => "r10d",
            R11d => "r11d",
            R12d => "r12d",
            R13d => "r13d",
            R14d => "r14d",
            R15d => "r15d",
            Ax => "ax",
            Cx => "cx",
            Dx => "dx",
            Bx => "bx",
            Sp => "sp",
            Bp => "bp",
            Si => "si",
            Di => "di",
            R8w => "r8w",
            R9w => "r9w",
            R10w => "r10w",
            R11w => "r11w",
            R12w => "r12w",
            R13w => "r13w",
            R14w => "r14w",
            R15w => "r15w",
            Al => "al",
            Cl => "cl",
            Dl => "dl",
            Bl => "bl",
            Ah => "ah",
            Ch => "ch",
            Dh => "dh",
            Bh => "bh",
            Spl => "spl",
            Bpl => "bpl",
            Sil => "sil",
            Dil => "dil",
            R8b => "r8b",
            R9b => "r9b",
            R10b => "r10b",
            R11b => "r11b",
            R12b => "r12b",
            R13b => "r13b",
            R14b => "r14b",
            R15b => "r15b",
            Rip => "rip",
            Eip => "eip",
            Ip => "ip",
            Es => "es",
            Cs => "cs",
            Ss => "ss",
            Ds => "ds",
            Fs => "fs",
            Gs => "gs",
            St0 => "st",
            St1 => "st(1)",
            St2 => "st(2)",
            St3 => "st(3)",
            St4 => "st(4)",
            St5 => "st(5)",
            St6 => "st(6)",
            St7 => "st(7)",
            Xmm0 => "xmm0",
            Xmm1 => "xmm1",
            Xmm2 => "xmm2",
            Xmm3 => "xmm3",
            Xmm4 => "xmm4",
            Xmm5 => "xmm5",
            Xmm6 => "xmm6",
            Xmm7 => "xmm7",
            Xmm8 => "xmm8",
            Xmm9 => "xmm9",
            Xmm10 => "xmm10",
            Xmm11 => "xmm11",
            Xmm12 => "xmm12",
            Xmm13 => "xmm13",
            Xmm14 => "xmm14",
            Xmm15 => "xmm15",
            Xmm16 => "xmm16",
            Xmm17 => "xmm17",
            Xmm18 => "xmm18",
            Xmm19 => "xmm19",
            Xmm20 => "xmm20",
            Xmm21 => "xmm21",
            Xmm22 => "xmm22",
            Xmm23 => "xmm23",
            Xmm24 => "xmm24",
            Xmm25 => "xmm25",
            Xmm26 => "xmm26",
            Xmm27 => "xmm27",
            Xmm28 => "xmm28",
            Xmm29 => "xmm29",
            Xmm30 => "xmm30",
            Xmm31 => "xmm31",
            Ymm0 => "ymm0",
            Ymm1 => "ymm1",
            Ymm2 => "ymm2",
            Ymm3 => "ymm3",
            Ymm4 => "ymm4",
            Ymm5 => "ymm5",
            Ymm6 => "ymm6",
            Ymm7 => "ymm7",
            Ymm8 => "ymm8",
            Ymm9 => "ymm9",
            Ymm10 => "ymm10",
            Ymm11 => "ymm11",
            Ymm12 => "ymm12",
            Ymm13 => "ymm13",
            Ymm14 => "ymm14",
            Ymm15 => "ymm15",
            Ymm16 => "ymm16",
            Ymm17 => "ymm17",
            Ymm18 => "ymm18",
            Ymm19 => "ymm19",
            Ymm20 => "ymm20",
            Ymm21 => "ymm21",
            Ymm22 => "ymm22",
            Ymm23 => "ymm23",
            Ymm24 => "ymm24",
            Ymm25 => "ymm25",
            Ymm26 => "ymm26",
            Ymm27 => "ymm27",
            Ymm28 => "ymm28",
            Ymm29 => "ymm29",
            Ymm30 => "ymm30",
            Ymm31 => "ymm31",
            Zmm0 => "zmm0",
            Zmm1 => "zmm1",
            Zmm2 => "zmm2",
            Zmm3 => "zmm3",
            Zmm4 => "zmm4",
            Zmm5 => "zmm5",
            Zmm6 => "zmm6",
            Zmm7 => "zmm7",
            Zmm8 => "zmm8",
            Zmm9 => "zmm9",
            Zmm10 => "zmm10",
            Zmm11 => "zmm11",
            Zmm12 => "zmm12",
            Zmm13 => "zmm13",
            Zmm14 => "zmm14",
            Zmm15 => "zmm15",
            Zmm16 => "zmm16",
            Zmm17 => "zmm17",
            Zmm18 => "zmm18",
            Zmm19 => "zmm19",
            Zmm20 => "zmm20",
            Zmm21 => "zmm21",
            Zmm22 => "zmm22",
            Zmm23 => "zmm23",
            Zmm24 => "zmm24",
            Zmm25 => "zmm25",
            Zmm26 => "zmm26",
            Zmm27 => "zmm27",
            Zmm28 => "zmm28",
            Zmm29 => "zmm29",
            Zmm30 => "zmm30",
            Zmm31 => "zmm31",
            K0 => "k0",
            K1 => "k1",
            K2 => "k2",
            K3 => "k3",
            K4 => "k4",
            K5 => "k5",
            K6 => "k6",
            K7 => "k7",
            Cr0 => "cr0",
            Cr2 => "cr2",
            Cr3 => "cr3",
            Cr4 => "cr4",
            Cr8 => "cr8",
            Dr0 => "dr0",
            Dr1 => "dr1",
            Dr2 => "dr2",
            Dr3 => "dr3",
            Dr4 => "dr4",
            Dr5 => "dr5",
            Dr6 => "dr6",
            Dr7 => "dr7",
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A symbolic value, resolved later by the linker.
///
/// Rendered the way GAS writes it: `sym`, `sym+8`, `sym-8`, `a-b`. Nested
/// binary operands are parenthesized.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// A numeric constant.
    Const(i64),
    /// A symbol reference.
    Symbol(String),
    /// Addition: left + right.
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction: left - right.
    Sub(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// A symbol reference.
    pub fn sym(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// `self + rhs`.
    #[must_use]
    pub fn plus(self, rhs: Expr) -> Self {
        Expr::Add(Box::new(self), Box::new(rhs))
    }

    /// `self - rhs`.
    #[must_use]
    pub fn minus(self, rhs: Expr) -> Self {
        Expr::Sub(Box::new(self), Box::new(rhs))
    }

    /// The value if this is a bare constant.
    pub fn as_const(&self) -> Option<i64> {
        match self {
            Expr::Const(v) => Some(*v),
            _ => None,
        }
    }

    fn is_leaf(&self) -> bool {
        matches!(self, Expr::Const(_) | Expr::Symbol(_))
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            write!(f, "{}", self)
        } else {
            write!(f, "({})", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(v) => write!(f, "{}", v),
            Expr::Symbol(name) => f.write_str(name),
            Expr::Add(l, r) => {
                l.fmt_operand(f)?;
                // `sym+-4` reads as `sym-4`.
                if let Expr::Const(v) = **r {
                    if v < 0 {
                        return write!(f, "{}", v);
                    }
                }
                f.write_str("+")?;
                r.fmt_operand(f)
            }
            Expr::Sub(l, r) => {
                l.fmt_operand(f)?;
                f.write_str("-")?;
                r.fmt_operand(f)
            }
        }
    }
}

/// One machine operand. Every operand carries exactly one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operand {
    /// A register (possibly `NoReg` inside a memory group).
    Register(Register),
    /// A 64-bit signed immediate.
    Immediate(i64),
    /// A symbolic expression.
    Expression(Expr),
}

impl Operand {
    /// The kind tag.
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Register(_) => OperandKind::Register,
            Operand::Immediate(_) => OperandKind::Immediate,
            Operand::Expression(_) => OperandKind::Expression,
        }
    }

    /// The register, if this is a register operand.
    pub fn reg(&self) -> Option<Register> {
        match self {
            Operand::Register(r) => Some(*r),
            _ => None,
        }
    }

    /// The value, if this is an immediate operand.
    pub fn imm(&self) -> Option<i64> {
        match self {
            Operand::Immediate(v) => Some(*v),
            _ => None,
        }
    }

    /// The expression, if this is an expression operand.
    pub fn expr(&self) -> Option<&Expr> {
        match self {
            Operand::Expression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Register> for Operand {
    fn from(r: Register) -> Self {
        Operand::Register(r)
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Immediate(v)
    }
}

impl From<Expr> for Operand {
    fn from(e: Expr) -> Self {
        Operand::Expression(e)
    }
}

// ─── Memory operand groups ──────────────────────────────────────────────

/// Offset of the base register within a memory group.
pub const ADDR_BASE_REG: usize = 0;
/// Offset of the scale immediate within a memory group.
pub const ADDR_SCALE_AMT: usize = 1;
/// Offset of the index register within a memory group.
pub const ADDR_INDEX_REG: usize = 2;
/// Offset of the displacement within a memory group.
pub const ADDR_DISP: usize = 3;
/// Offset of the segment register within a memory group.
pub const ADDR_SEGMENT_REG: usize = 4;
/// Number of operands in a memory group.
pub const ADDR_NUM_OPERANDS: usize = 5;

/// A memory operand group read out of an instruction's flat operand list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemRef<'a> {
    /// Base register, or `NoReg`.
    pub base: Register,
    /// Scale applied to the index register (1, 2, 4 or 8).
    pub scale: i64,
    /// Index register, or `NoReg`.
    pub index: Register,
    /// Displacement: an immediate or an expression.
    pub disp: &'a Operand,
    /// Segment override register, or `NoReg`.
    pub segment: Register,
}

impl<'a> MemRef<'a> {
    /// Read the group starting at operand `op`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError`] if any of the five operands is missing or has
    /// the wrong kind.
    pub fn read(inst: &'a Instruction, op: usize) -> Result<Self, ShapeError> {
        let disp = inst.operand_as(op + ADDR_DISP, Expected::ImmOrExpr)?;
        Ok(Self {
            base: inst.reg_at(op + ADDR_BASE_REG)?,
            scale: inst.imm_at(op + ADDR_SCALE_AMT)?,
            index: inst.reg_at(op + ADDR_INDEX_REG)?,
            disp,
            segment: inst.reg_at(op + ADDR_SEGMENT_REG)?,
        })
    }

    /// Whether neither a base nor an index register is present.
    pub fn is_absolute(&self) -> bool {
        self.base.is_none() && self.index.is_none()
    }
}

// ─── Feature and prefix bitsets ─────────────────────────────────────────

/// Subtarget feature bits supplied per print call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureBits(u64);

impl FeatureBits {
    /// No features.
    pub const NONE: Self = Self(0);
    /// 16-bit real/protected mode.
    pub const MODE_16BIT: Self = Self(1 << 0);
    /// 32-bit protected mode.
    pub const MODE_32BIT: Self = Self(1 << 1);
    /// 64-bit long mode.
    pub const MODE_64BIT: Self = Self(1 << 2);

    /// Build from raw bits.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw bits.
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FeatureBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Per-instruction prefix flags set by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstFlags(u8);

impl InstFlags {
    /// No prefixes.
    pub const NONE: Self = Self(0);
    /// `lock` prefix.
    pub const LOCK: Self = Self(1 << 0);
    /// `rep` / `repe` prefix.
    pub const REP: Self = Self(1 << 1);
    /// `repne` prefix.
    pub const REPNE: Self = Self(1 << 2);
    /// `notrack` prefix (CET indirect branch tracking).
    pub const NOTRACK: Self = Self(1 << 3);

    /// Flags from raw bits; unknown bits are kept and ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for InstFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ─── Instruction ────────────────────────────────────────────────────────

/// A decoded instruction: opcode, flat operand list and prefix flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Which instruction variant this is.
    pub opcode: Opcode,
    /// Operands in encoding (descriptor) order.
    pub operands: Vec<Operand>,
    /// Prefix flags.
    pub flags: InstFlags,
}

impl Instruction {
    /// Create an instruction with no prefix flags.
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            operands,
            flags: InstFlags::NONE,
        }
    }

    /// Start building an instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use att_rs::{Instruction, Opcode, Register};
    ///
    /// let inst = Instruction::builder(Opcode::MOV32rm)
    ///     .reg(Register::Eax)
    ///     .mem(Register::Rbx, 4, Register::Rcx, 16, Register::NoReg)
    ///     .build();
    /// assert_eq!(inst.operands.len(), 6);
    /// ```
    pub fn builder(opcode: Opcode) -> InstructionBuilder {
        InstructionBuilder {
            inst: Self::new(opcode, Vec::new()),
        }
    }

    /// Operand `index`.
    ///
    /// # Errors
    ///
    /// [`ShapeError::MissingOperand`] if there is no such operand.
    pub fn operand(&self, index: usize) -> Result<&Operand, ShapeError> {
        self.operands.get(index).ok_or(ShapeError::MissingOperand {
            opcode: self.opcode,
            index,
        })
    }

    /// Operand `index`, checked against `expected`.
    ///
    /// # Errors
    ///
    /// [`ShapeError`] if the operand is missing or has the wrong kind.
    pub fn operand_as(&self, index: usize, expected: Expected) -> Result<&Operand, ShapeError> {
        let op = self.operand(index)?;
        if expected.accepts(op.kind()) {
            Ok(op)
        } else {
            Err(ShapeError::OperandKind {
                opcode: self.opcode,
                index,
                expected,
                found: op.kind(),
            })
        }
    }

    /// Operand `index` as a register.
    ///
    /// # Errors
    ///
    /// [`ShapeError`] if the operand is missing or not a register.
    pub fn reg_at(&self, index: usize) -> Result<Register, ShapeError> {
        let op = self.operand_as(index, Expected::Register)?;
        Ok(op.reg().unwrap_or(Register::NoReg))
    }

    /// Operand `index` as an immediate.
    ///
    /// # Errors
    ///
    /// [`ShapeError`] if the operand is missing or not an immediate.
    pub fn imm_at(&self, index: usize) -> Result<i64, ShapeError> {
        let op = self.operand_as(index, Expected::Immediate)?;
        Ok(op.imm().unwrap_or_default())
    }

    /// The trailing operand's value when it is an immediate.
    pub fn trailing_imm(&self) -> Option<i64> {
        self.operands.last().and_then(Operand::imm)
    }

    /// Check the operand list against the opcode's descriptor.
    ///
    /// # Errors
    ///
    /// [`ShapeError`] describing the first mismatch.
    pub fn validate(&self) -> Result<(), ShapeError> {
        self.opcode.desc().check(self)
    }
}

/// Builder returned by [`Instruction::builder`].
#[derive(Debug, Clone)]
#[must_use]
pub struct InstructionBuilder {
    inst: Instruction,
}

impl InstructionBuilder {
    /// Append a register operand.
    pub fn reg(mut self, r: Register) -> Self {
        self.inst.operands.push(Operand::Register(r));
        self
    }

    /// Append an immediate operand.
    pub fn imm(mut self, v: i64) -> Self {
        self.inst.operands.push(Operand::Immediate(v));
        self
    }

    /// Append an expression operand.
    pub fn expr(mut self, e: Expr) -> Self {
        self.inst.operands.push(Operand::Expression(e));
        self
    }

    /// Append a memory group with an immediate displacement.
    pub fn mem(self, base: Register, scale: i64, index: Register, disp: i64, seg: Register) -> Self {
        self.mem_group(base, scale, index, Operand::Immediate(disp), seg)
    }

    /// Append a memory group with a symbolic displacement.
    pub fn mem_expr(
        self,
        base: Register,
        scale: i64,
        index: Register,
        disp: Expr,
        seg: Register,
    ) -> Self {
        self.mem_group(base, scale, index, Operand::Expression(disp), seg)
    }

    fn mem_group(
        mut self,
        base: Register,
        scale: i64,
        index: Register,
        disp: Operand,
        seg: Register,
    ) -> Self {
        // Order follows the ADDR_* offsets.
        self.inst.operands.extend([
            Operand::Register(base),
            Operand::Immediate(scale),
            Operand::Register(index),
            disp,
            Operand::Register(seg),
        ]);
        self
    }

    /// Append a source-index group (`seg:(reg)`).
    pub fn src_idx(self, reg: Register, seg: Register) -> Self {
        self.reg(reg).reg(seg)
    }

    /// Append a destination-index operand (`%es:(reg)`).
    pub fn dst_idx(self, reg: Register) -> Self {
        self.reg(reg)
    }

    /// Append an absolute-offset group (`seg:disp`).
    pub fn offset(self, disp: i64, seg: Register) -> Self {
        self.imm(disp).reg(seg)
    }

    /// Set prefix flags.
    pub fn flags(mut self, flags: InstFlags) -> Self {
        self.inst.flags = flags;
        self
    }

    /// Finish.
    #[must_use]
    pub fn build(self) -> Instruction {
        self.inst
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn register_ids_round_trip() {
        for (i, r) in Register::ALL.iter().enumerate() {
            assert_eq!(usize::from(r.id()), i, "{:?}", r);
            assert_eq!(Register::from_id(r.id()), Some(*r));
        }
        assert_eq!(Register::from_id(Register::ALL.len() as u16), None);
    }

    #[test]
    fn register_names() {
        assert_eq!(Register::Rax.name(), "rax");
        assert_eq!(Register::R8d.name(), "r8d");
        assert_eq!(Register::Sil.name(), "sil");
        assert_eq!(Register::St0.name(), "st");
        assert_eq!(Register::St3.name(), "st(3)");
        assert_eq!(Register::Zmm31.name(), "zmm31");
        assert_eq!(format!("{}", Register::K1), "k1");
    }

    #[test]
    fn register_ranges() {
        assert_eq!(Register::xmm(7), Some(Register::Xmm7));
        assert_eq!(Register::zmm(31), Some(Register::Zmm31));
        assert_eq!(Register::k(8), None);
        assert_eq!(Register::st(1), Some(Register::St1));
        assert!(Register::St7.is_st());
        assert!(!Register::Xmm0.is_st());
        assert!(Register::K3.is_mask());
        assert!(Register::Fs.is_segment());
        assert!(Register::NoReg.is_none());
    }

    #[test]
    fn expr_display() {
        assert_eq!(format!("{}", Expr::sym("foo")), "foo");
        assert_eq!(format!("{}", Expr::sym("foo").plus(Expr::Const(8))), "foo+8");
        assert_eq!(format!("{}", Expr::sym("foo").plus(Expr::Const(-8))), "foo-8");
        assert_eq!(format!("{}", Expr::sym("a").minus(Expr::sym("b"))), "a-b");
        assert_eq!(
            format!("{}", Expr::sym("a").minus(Expr::sym("b").plus(Expr::Const(1)))),
            "a-(b+1)"
        );
    }

    #[test]
    fn memref_reads_group_in_order() {
        let inst = Instruction::builder(Opcode::MOV32rm)
            .reg(Register::Eax)
            .mem(Register::Rbx, 8, Register::Rsi, -4, Register::Fs)
            .build();
        let m = MemRef::read(&inst, 1).unwrap();
        assert_eq!(m.base, Register::Rbx);
        assert_eq!(m.scale, 8);
        assert_eq!(m.index, Register::Rsi);
        assert_eq!(m.disp, &Operand::Immediate(-4));
        assert_eq!(m.segment, Register::Fs);
        assert!(!m.is_absolute());
    }

    #[test]
    fn memref_rejects_wrong_kind() {
        let inst = Instruction::new(
            Opcode::MOV32rm,
            vec![
                Operand::Register(Register::Eax),
                Operand::Register(Register::Rbx),
                Operand::Register(Register::Rcx),
                Operand::Register(Register::NoReg),
                Operand::Immediate(0),
                Operand::Register(Register::NoReg),
            ],
        );
        assert_eq!(
            MemRef::read(&inst, 1),
            Err(ShapeError::OperandKind {
                opcode: Opcode::MOV32rm,
                index: 2,
                expected: Expected::Immediate,
                found: OperandKind::Register,
            })
        );
    }

    #[test]
    fn feature_bits_contains() {
        let f = FeatureBits::MODE_64BIT | FeatureBits::from_bits(1 << 10);
        assert!(f.contains(FeatureBits::MODE_64BIT));
        assert!(!f.contains(FeatureBits::MODE_16BIT));
        assert!(f.contains(FeatureBits::NONE));
    }

    #[test]
    fn trailing_imm() {
        let inst = Instruction::builder(Opcode::SHL32ri)
            .reg(Register::Eax)
            .reg(Register::Eax)
            .imm(3)
            .build();
        assert_eq!(inst.trailing_imm(), Some(3));
        let inst = Instruction::builder(Opcode::MOV32rr)
            .reg(Register::Eax)
            .reg(Register::Ebx)
            .build();
        assert_eq!(inst.trailing_imm(), None);
    }
}
