//! Integer multiply and divide (M).
//!
//! Shares `OP_REG` with the base ALU operations; `funct7 == M_EXTENSION` selects it.

/// Operation select within the extension.
pub mod funct3;

/// `funct7` value marking a multiply/divide word.
pub const M_EXTENSION: u32 = 0b0000001;
