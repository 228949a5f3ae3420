//! Instruction decoder.
//!
//! Splits a 32-bit word into a `Decoded` and rebuilds the immediate of its format. The
//! reference core executes from it; the encoder tests check against it.
//!
//! Immediate layouts (bit 0 of B and J offsets is implied zero):
//! - I: `imm[11:0]` in 31..20
//! - S: `imm[11:5]` in 31..25, `imm[4:0]` in 11..7
//! - B: `imm[12]` in 31, `imm[10:5]` in 30..25, `imm[4:1]` in 11..8, `imm[11]` in 7
//! - U: `imm[31:12]` in 31..12
//! - J: `imm[20]` in 31, `imm[10:1]` in 30..21, `imm[11]` in 20, `imm[19:12]` in 19..12

use crate::common::bits::{bits, bits_mask, sign_extend};
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Splits `inst` into fields. Opcodes without an immediate decode with `imm == 0`.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();
    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR | opcodes::OP_SYSTEM => i_imm(inst),
        opcodes::OP_STORE => s_imm(inst),
        opcodes::OP_BRANCH => b_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => inst & bits_mask(31, 12),
        opcodes::OP_JAL => j_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        imm,
    }
}

const fn i_imm(inst: u32) -> u32 {
    sign_extend(bits(inst, 31, 20), 12)
}

const fn s_imm(inst: u32) -> u32 {
    sign_extend((bits(inst, 31, 25) << 5) | bits(inst, 11, 7), 12)
}

const fn b_imm(inst: u32) -> u32 {
    let offset = (bits(inst, 31, 31) << 12)
        | (bits(inst, 7, 7) << 11)
        | (bits(inst, 30, 25) << 5)
        | (bits(inst, 11, 8) << 1);
    sign_extend(offset, 13)
}

const fn j_imm(inst: u32) -> u32 {
    let offset = (bits(inst, 31, 31) << 20)
        | (bits(inst, 19, 12) << 12)
        | (bits(inst, 20, 20) << 11)
        | (bits(inst, 30, 21) << 1);
    sign_extend(offset, 21)
}
