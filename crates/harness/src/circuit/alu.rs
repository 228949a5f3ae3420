//! Arithmetic Logic Unit (ALU) of the reference core.
//!
//! Implements the RV32I register/immediate arithmetic and the M-extension
//! multiply/divide family on 32-bit operands. Division by zero and signed
//! overflow follow the RISC-V rules (no trap; fixed results).

use crate::isa::rv32i::{funct3 as f3, funct7 as f7};
use crate::isa::rv32m::funct3 as m3;

/// Bit mask for a shift amount (5 bits: 0-31).
const SHAMT_MASK: u32 = 0x1f;

/// Number of bits in a word (used for high-multiply shift).
const WORD_BITS: u32 = 32;

/// Integer operation selected by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Addition.
    Add,
    /// Subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set if less than (signed).
    Slt,
    /// Set if less than (unsigned).
    Sltu,
    /// Bitwise exclusive or.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise or.
    Or,
    /// Bitwise and.
    And,
    /// Multiply, low word.
    Mul,
    /// Multiply signed x signed, high word.
    Mulh,
    /// Multiply signed x unsigned, high word.
    Mulhsu,
    /// Multiply unsigned x unsigned, high word.
    Mulhu,
    /// Signed division.
    Div,
    /// Unsigned division.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

impl AluOp {
    /// Selects the operation of an `OP` (register-register) instruction.
    ///
    /// Returns `None` for encodings the core does not implement.
    pub const fn from_reg(funct3: u32, funct7: u32) -> Option<Self> {
        Some(match (funct7, funct3) {
            (f7::DEFAULT, f3::ADD_SUB) => Self::Add,
            (f7::ALT, f3::ADD_SUB) => Self::Sub,
            (f7::DEFAULT, f3::SLL) => Self::Sll,
            (f7::DEFAULT, f3::SLT) => Self::Slt,
            (f7::DEFAULT, f3::SLTU) => Self::Sltu,
            (f7::DEFAULT, f3::XOR) => Self::Xor,
            (f7::DEFAULT, f3::SRL_SRA) => Self::Srl,
            (f7::ALT, f3::SRL_SRA) => Self::Sra,
            (f7::DEFAULT, f3::OR) => Self::Or,
            (f7::DEFAULT, f3::AND) => Self::And,
            (crate::isa::rv32m::M_EXTENSION, funct3) => match funct3 {
                m3::MUL => Self::Mul,
                m3::MULH => Self::Mulh,
                m3::MULHSU => Self::Mulhsu,
                m3::MULHU => Self::Mulhu,
                m3::DIV => Self::Div,
                m3::DIVU => Self::Divu,
                m3::REM => Self::Rem,
                _ => Self::Remu,
            },
            _ => return None,
        })
    }

    /// Selects the operation of an `OP-IMM` instruction.
    ///
    /// Only the shift forms look at `funct7`; `SRAI` is told apart from `SRLI` by it.
    pub const fn from_imm(funct3: u32, funct7: u32) -> Option<Self> {
        Some(match funct3 {
            f3::ADD_SUB => Self::Add,
            f3::SLT => Self::Slt,
            f3::SLTU => Self::Sltu,
            f3::XOR => Self::Xor,
            f3::OR => Self::Or,
            f3::AND => Self::And,
            f3::SLL if funct7 == f7::DEFAULT => Self::Sll,
            f3::SRL_SRA if funct7 == f7::DEFAULT => Self::Srl,
            f3::SRL_SRA if funct7 == f7::ALT => Self::Sra,
            _ => return None,
        })
    }
}

/// Executes an integer operation on two 32-bit operands.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a << shamt,
        AluOp::Slt => ((a as i32) < (b as i32)) as u32,
        AluOp::Sltu => (a < b) as u32,
        AluOp::Xor => a ^ b,
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as u32,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mulh => ((a as i32 as i64 * b as i32 as i64) >> WORD_BITS) as u32,
        AluOp::Mulhsu => ((a as i32 as i64 * b as i64) >> WORD_BITS) as u32,
        AluOp::Mulhu => ((a as u64 * b as u64) >> WORD_BITS) as u32,
        AluOp::Div => {
            if b == 0 {
                u32::MAX
            } else {
                (a as i32).wrapping_div(b as i32) as u32
            }
        }
        AluOp::Divu => {
            if b == 0 {
                u32::MAX
            } else {
                a / b
            }
        }
        AluOp::Rem => {
            if b == 0 {
                a
            } else {
                (a as i32).wrapping_rem(b as i32) as u32
            }
        }
        AluOp::Remu => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }
    }
}
