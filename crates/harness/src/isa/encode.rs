//! Instruction encoder.
//!
//! Pure functions packing instruction fields into 32-bit opcode words. Each
//! format packer masks its fields to their encoded width, so an immediate that
//! does not fit is truncated rather than rejected: the suites use this on
//! purpose to check masking (e.g. `lui` with low bits set, `auipc` with an
//! offset below 4096).
//!
//! Instruction helpers take operands in assembly order: destination first,
//! then sources, then the immediate (`addi(rd, rs1, imm)`,
//! `sw(rs2, rs1, imm)` for `sw rs2, imm(rs1)`, `beq(rs1, rs2, offset)`).

use crate::common::bits::bits;
use crate::isa::rv32i::{funct3 as f3, funct7 as f7, opcodes as op};
use crate::isa::rv32m::{M_EXTENSION, funct3 as m3};
use crate::isa::system;

/// Packs an R-type word: `funct7 | rs2 | rs1 | funct3 | rd | opcode`.
pub const fn r_type(funct7: u32, rs2: u32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
    ((funct7 & 0x7f) << 25)
        | ((rs2 & 0x1f) << 20)
        | ((rs1 & 0x1f) << 15)
        | ((funct3 & 0x7) << 12)
        | ((rd & 0x1f) << 7)
        | (opcode & 0x7f)
}

/// Packs an I-type word: `imm[11:0] | rs1 | funct3 | rd | opcode`.
pub const fn i_type(imm: i32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
    (((imm as u32) & 0xfff) << 20)
        | ((rs1 & 0x1f) << 15)
        | ((funct3 & 0x7) << 12)
        | ((rd & 0x1f) << 7)
        | (opcode & 0x7f)
}

/// Packs an S-type word: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
pub const fn s_type(imm: i32, rs2: u32, rs1: u32, funct3: u32, opcode: u32) -> u32 {
    let imm = imm as u32;
    ((imm & 0xfe0) << 20)
        | ((rs2 & 0x1f) << 20)
        | ((rs1 & 0x1f) << 15)
        | ((funct3 & 0x7) << 12)
        | ((imm & 0x1f) << 7)
        | (opcode & 0x7f)
}

/// Packs a B-type word from a byte offset (bit 0 is dropped).
///
/// Layout: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
pub const fn b_type(offset: i32, rs2: u32, rs1: u32, funct3: u32, opcode: u32) -> u32 {
    let imm = offset as u32;
    (bits(imm, 12, 12) << 31)
        | (bits(imm, 10, 5) << 25)
        | ((rs2 & 0x1f) << 20)
        | ((rs1 & 0x1f) << 15)
        | ((funct3 & 0x7) << 12)
        | (bits(imm, 4, 1) << 8)
        | (bits(imm, 11, 11) << 7)
        | (opcode & 0x7f)
}

/// Packs a U-type word; the low 12 bits of `imm` are discarded.
pub const fn u_type(imm: u32, rd: u32, opcode: u32) -> u32 {
    (imm & 0xffff_f000) | ((rd & 0x1f) << 7) | (opcode & 0x7f)
}

/// Packs a J-type word from a byte offset (bit 0 is dropped).
///
/// Layout: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
pub const fn j_type(offset: i32, rd: u32, opcode: u32) -> u32 {
    let imm = offset as u32;
    (bits(imm, 20, 20) << 31)
        | (bits(imm, 10, 1) << 21)
        | (bits(imm, 11, 11) << 20)
        | (bits(imm, 19, 12) << 12)
        | ((rd & 0x1f) << 7)
        | (opcode & 0x7f)
}

// --- Upper immediates and jumps ---

/// `lui rd, imm[31:12]`.
pub const fn lui(rd: u32, imm: u32) -> u32 {
    u_type(imm, rd, op::OP_LUI)
}

/// `auipc rd, imm[31:12]`.
pub const fn auipc(rd: u32, imm: u32) -> u32 {
    u_type(imm, rd, op::OP_AUIPC)
}

/// `jal rd, offset`.
pub const fn jal(rd: u32, offset: i32) -> u32 {
    j_type(offset, rd, op::OP_JAL)
}

/// `jalr rd, imm(rs1)`.
pub const fn jalr(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::JALR, rd, op::OP_JALR)
}

// --- Branches ---

/// `beq rs1, rs2, offset`.
pub const fn beq(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(offset, rs2, rs1, f3::BEQ, op::OP_BRANCH)
}

/// `bne rs1, rs2, offset`.
pub const fn bne(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(offset, rs2, rs1, f3::BNE, op::OP_BRANCH)
}

/// `blt rs1, rs2, offset`.
pub const fn blt(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(offset, rs2, rs1, f3::BLT, op::OP_BRANCH)
}

/// `bge rs1, rs2, offset`.
pub const fn bge(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(offset, rs2, rs1, f3::BGE, op::OP_BRANCH)
}

/// `bltu rs1, rs2, offset`.
pub const fn bltu(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(offset, rs2, rs1, f3::BLTU, op::OP_BRANCH)
}

/// `bgeu rs1, rs2, offset`.
pub const fn bgeu(rs1: u32, rs2: u32, offset: i32) -> u32 {
    b_type(offset, rs2, rs1, f3::BGEU, op::OP_BRANCH)
}

// --- Loads and stores ---

/// `lw rd, imm(rs1)`.
pub const fn lw(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::LW, rd, op::OP_LOAD)
}

/// `lh rd, imm(rs1)`.
pub const fn lh(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::LH, rd, op::OP_LOAD)
}

/// `lb rd, imm(rs1)`.
pub const fn lb(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::LB, rd, op::OP_LOAD)
}

/// `lhu rd, imm(rs1)`.
pub const fn lhu(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::LHU, rd, op::OP_LOAD)
}

/// `lbu rd, imm(rs1)`.
pub const fn lbu(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::LBU, rd, op::OP_LOAD)
}

/// `sw rs2, imm(rs1)`.
pub const fn sw(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(imm, rs2, rs1, f3::SW, op::OP_STORE)
}

/// `sh rs2, imm(rs1)`.
pub const fn sh(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(imm, rs2, rs1, f3::SH, op::OP_STORE)
}

/// `sb rs2, imm(rs1)`.
pub const fn sb(rs2: u32, rs1: u32, imm: i32) -> u32 {
    s_type(imm, rs2, rs1, f3::SB, op::OP_STORE)
}

// --- Register arithmetic ---

const fn alu(funct7: u32, funct3: u32, rd: u32, rs1: u32, rs2: u32) -> u32 {
    r_type(funct7, rs2, rs1, funct3, rd, op::OP_REG)
}

/// `add rd, rs1, rs2`.
pub const fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::ADD_SUB, rd, rs1, rs2)
}

/// `sub rd, rs1, rs2`.
pub const fn sub(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::ALT, f3::ADD_SUB, rd, rs1, rs2)
}

/// `sll rd, rs1, rs2`.
pub const fn sll(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::SLL, rd, rs1, rs2)
}

/// `slt rd, rs1, rs2`.
pub const fn slt(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::SLT, rd, rs1, rs2)
}

/// `sltu rd, rs1, rs2`.
pub const fn sltu(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::SLTU, rd, rs1, rs2)
}

/// `xor rd, rs1, rs2`.
pub const fn xor(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::XOR, rd, rs1, rs2)
}

/// `srl rd, rs1, rs2`.
pub const fn srl(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::SRL_SRA, rd, rs1, rs2)
}

/// `sra rd, rs1, rs2`.
pub const fn sra(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::ALT, f3::SRL_SRA, rd, rs1, rs2)
}

/// `or rd, rs1, rs2`.
pub const fn or(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::OR, rd, rs1, rs2)
}

/// `and rd, rs1, rs2`.
pub const fn and(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(f7::DEFAULT, f3::AND, rd, rs1, rs2)
}

// --- M extension ---

/// `mul rd, rs1, rs2`.
pub const fn mul(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::MUL, rd, rs1, rs2)
}

/// `mulh rd, rs1, rs2`.
pub const fn mulh(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::MULH, rd, rs1, rs2)
}

/// `mulhsu rd, rs1, rs2`.
pub const fn mulhsu(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::MULHSU, rd, rs1, rs2)
}

/// `mulhu rd, rs1, rs2`.
pub const fn mulhu(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::MULHU, rd, rs1, rs2)
}

/// `div rd, rs1, rs2`.
pub const fn div(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::DIV, rd, rs1, rs2)
}

/// `divu rd, rs1, rs2`.
pub const fn divu(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::DIVU, rd, rs1, rs2)
}

/// `rem rd, rs1, rs2`.
pub const fn rem(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::REM, rd, rs1, rs2)
}

/// `remu rd, rs1, rs2`.
pub const fn remu(rd: u32, rs1: u32, rs2: u32) -> u32 {
    alu(M_EXTENSION, m3::REMU, rd, rs1, rs2)
}

// --- Immediate arithmetic ---

/// `addi rd, rs1, imm`.
pub const fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::ADD_SUB, rd, op::OP_IMM)
}

/// `slti rd, rs1, imm`.
pub const fn slti(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::SLT, rd, op::OP_IMM)
}

/// `sltiu rd, rs1, imm` (the immediate is sign-extended, then compared unsigned).
pub const fn sltiu(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::SLTU, rd, op::OP_IMM)
}

/// `xori rd, rs1, imm`.
pub const fn xori(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::XOR, rd, op::OP_IMM)
}

/// `ori rd, rs1, imm`.
pub const fn ori(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::OR, rd, op::OP_IMM)
}

/// `andi rd, rs1, imm`.
pub const fn andi(rd: u32, rs1: u32, imm: i32) -> u32 {
    i_type(imm, rs1, f3::AND, rd, op::OP_IMM)
}

/// `slli rd, rs1, shamt`.
pub const fn slli(rd: u32, rs1: u32, shamt: u32) -> u32 {
    r_type(f7::DEFAULT, shamt, rs1, f3::SLL, rd, op::OP_IMM)
}

/// `srli rd, rs1, shamt`.
pub const fn srli(rd: u32, rs1: u32, shamt: u32) -> u32 {
    r_type(f7::DEFAULT, shamt, rs1, f3::SRL_SRA, rd, op::OP_IMM)
}

/// `srai rd, rs1, shamt`.
pub const fn srai(rd: u32, rs1: u32, shamt: u32) -> u32 {
    r_type(f7::ALT, shamt, rs1, f3::SRL_SRA, rd, op::OP_IMM)
}

/// `nop` (`addi x0, x0, 0`).
pub const fn nop() -> u32 {
    addi(0, 0, 0)
}

// --- Fences and system ---

/// `fence pred, succ` (4-bit IORW sets).
pub const fn fence(pred: u32, succ: u32) -> u32 {
    i_type((((pred & 0xf) << 4) | (succ & 0xf)) as i32, 0, f3::FENCE, 0, op::OP_MISC_MEM)
}

/// `fence.i`.
pub const fn fence_i() -> u32 {
    i_type(0, 0, f3::FENCE_I, 0, op::OP_MISC_MEM)
}

/// `ecall`.
pub const fn ecall() -> u32 {
    system::ECALL
}

/// `ebreak`.
pub const fn ebreak() -> u32 {
    system::EBREAK
}

const fn csr_op(funct3: u32, rd: u32, csr: u32, src: u32) -> u32 {
    i_type((csr & 0xfff) as i32, src, funct3, rd, op::OP_SYSTEM)
}

/// `csrrw rd, csr, rs1`.
pub const fn csrrw(rd: u32, csr: u32, rs1: u32) -> u32 {
    csr_op(system::CSRRW, rd, csr, rs1)
}

/// `csrrs rd, csr, rs1`.
pub const fn csrrs(rd: u32, csr: u32, rs1: u32) -> u32 {
    csr_op(system::CSRRS, rd, csr, rs1)
}

/// `csrrc rd, csr, rs1`.
pub const fn csrrc(rd: u32, csr: u32, rs1: u32) -> u32 {
    csr_op(system::CSRRC, rd, csr, rs1)
}

/// `csrrwi rd, csr, zimm`.
pub const fn csrrwi(rd: u32, csr: u32, zimm: u32) -> u32 {
    csr_op(system::CSRRWI, rd, csr, zimm)
}

/// `csrrsi rd, csr, zimm`.
pub const fn csrrsi(rd: u32, csr: u32, zimm: u32) -> u32 {
    csr_op(system::CSRRSI, rd, csr, zimm)
}

/// `csrrci rd, csr, zimm`.
pub const fn csrrci(rd: u32, csr: u32, zimm: u32) -> u32 {
    csr_op(system::CSRRCI, rd, csr, zimm)
}
