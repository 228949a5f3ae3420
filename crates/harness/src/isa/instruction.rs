//! Instruction word fields.
//!
//! The register and function fields of a 32-bit instruction sit at the same bit positions
//! in every format, so they are read straight off the word. Immediates differ per format
//! and are assembled by the decoder.

use crate::common::bits::bits;

/// Fixed-position fields of an instruction word.
pub trait InstructionBits {
    /// Major opcode, bits 6..0.
    fn opcode(&self) -> u32;

    /// Destination register, bits 11..7.
    fn rd(&self) -> usize;

    /// First source register, bits 19..15. Carries `zimm` in the immediate CSR forms.
    fn rs1(&self) -> usize;

    /// Second source register, bits 24..20. Carries `shamt` in the immediate shifts.
    fn rs2(&self) -> usize;

    /// Minor opcode, bits 14..12.
    fn funct3(&self) -> u32;

    /// Bits 31..25 of R-type words.
    fn funct7(&self) -> u32;

    /// CSR number, bits 31..20.
    fn csr(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        bits(*self, 6, 0)
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        bits(*self, 11, 7) as usize
    }

    #[inline(always)]
    fn rs1(&self) -> usize {
        bits(*self, 19, 15) as usize
    }

    #[inline(always)]
    fn rs2(&self) -> usize {
        bits(*self, 24, 20) as usize
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        bits(*self, 14, 12)
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        bits(*self, 31, 25)
    }

    #[inline(always)]
    fn csr(&self) -> u32 {
        bits(*self, 31, 20)
    }
}

/// An instruction split into fields, immediate already extended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// The word as fetched.
    pub raw: u32,
    /// Major opcode.
    pub opcode: u32,
    /// Destination register.
    pub rd: usize,
    /// First source register.
    pub rs1: usize,
    /// Second source register.
    pub rs2: usize,
    /// Minor opcode.
    pub funct3: u32,
    /// R-type function bits.
    pub funct7: u32,
    /// Immediate, sign-extended to 32 bits and stored as a two's-complement word.
    pub imm: u32,
}
