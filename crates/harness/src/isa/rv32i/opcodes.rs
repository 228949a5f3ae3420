//! Major opcodes (bits 6..0) the core under test implements.

/// `lb`, `lh`, `lw`, `lbu`, `lhu`.
pub const OP_LOAD: u32 = 0b0000011;

/// `fence`, `fence.i`.
pub const OP_MISC_MEM: u32 = 0b0001111;

/// Register-immediate ALU operations.
pub const OP_IMM: u32 = 0b0010011;

/// `auipc`.
pub const OP_AUIPC: u32 = 0b0010111;

/// `sb`, `sh`, `sw`.
pub const OP_STORE: u32 = 0b0100011;

/// Register-register ALU operations, including multiply and divide.
pub const OP_REG: u32 = 0b0110011;

/// `lui`.
pub const OP_LUI: u32 = 0b0110111;

/// Conditional branches.
pub const OP_BRANCH: u32 = 0b1100011;

/// `jalr`.
pub const OP_JALR: u32 = 0b1100111;

/// `jal`.
pub const OP_JAL: u32 = 0b1101111;

/// `ecall`, `ebreak`, and the Zicsr instructions.
pub const OP_SYSTEM: u32 = 0b1110011;
