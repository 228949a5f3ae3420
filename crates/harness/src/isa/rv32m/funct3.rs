//! Multiply/divide operation select, under `OP_REG` with `funct7 == M_EXTENSION`.

/// Low word of the product.
pub const MUL: u32 = 0b000;
/// High word, both operands signed.
pub const MULH: u32 = 0b001;
/// High word, rs1 signed and rs2 unsigned.
pub const MULHSU: u32 = 0b010;
/// High word, both operands unsigned.
pub const MULHU: u32 = 0b011;
/// Signed quotient, rounded toward zero.
pub const DIV: u32 = 0b100;
/// Unsigned quotient.
pub const DIVU: u32 = 0b101;
/// Signed remainder; takes the sign of the dividend.
pub const REM: u32 = 0b110;
/// Unsigned remainder.
pub const REMU: u32 = 0b111;
