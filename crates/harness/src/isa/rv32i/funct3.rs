//! Minor opcodes (`funct3`, bits 14..12) of the base integer set.
//!
//! Values repeat across major opcodes; each group below is only meaningful under the
//! opcode named in its heading.

// OP_LOAD: width and extension of the loaded value.

/// `lb`, sign-extended byte.
pub const LB: u32 = 0b000;
/// `lh`, sign-extended halfword.
pub const LH: u32 = 0b001;
/// `lw`.
pub const LW: u32 = 0b010;
/// `lbu`, zero-extended byte.
pub const LBU: u32 = 0b100;
/// `lhu`, zero-extended halfword.
pub const LHU: u32 = 0b101;

// OP_STORE: width of the stored value.

/// `sb`.
pub const SB: u32 = 0b000;
/// `sh`.
pub const SH: u32 = 0b001;
/// `sw`.
pub const SW: u32 = 0b010;

// OP_BRANCH: comparison of rs1 with rs2.

/// `beq`.
pub const BEQ: u32 = 0b000;
/// `bne`.
pub const BNE: u32 = 0b001;
/// `blt`, signed.
pub const BLT: u32 = 0b100;
/// `bge`, signed.
pub const BGE: u32 = 0b101;
/// `bltu`.
pub const BLTU: u32 = 0b110;
/// `bgeu`.
pub const BGEU: u32 = 0b111;

// OP_REG and OP_IMM: ALU operation; funct7 picks the variant where two share a code.

/// `add`/`sub`/`addi`.
pub const ADD_SUB: u32 = 0b000;
/// `sll`/`slli`.
pub const SLL: u32 = 0b001;
/// `slt`/`slti`.
pub const SLT: u32 = 0b010;
/// `sltu`/`sltiu`.
pub const SLTU: u32 = 0b011;
/// `xor`/`xori`.
pub const XOR: u32 = 0b100;
/// `srl`/`sra`/`srli`/`srai`.
pub const SRL_SRA: u32 = 0b101;
/// `or`/`ori`.
pub const OR: u32 = 0b110;
/// `and`/`andi`.
pub const AND: u32 = 0b111;

/// `jalr`, the only encoding under OP_JALR.
pub const JALR: u32 = 0b000;

// OP_MISC_MEM.

/// `fence`.
pub const FENCE: u32 = 0b000;
/// `fence.i`.
pub const FENCE_I: u32 = 0b001;
