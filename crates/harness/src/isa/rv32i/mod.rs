//! Base integer instruction set (RV32I).
//!
//! - `opcodes`: major opcodes.
//! - `funct3`: minor opcodes, grouped by the major opcode they qualify.
//! - `funct7`: base/alternate select for R-type words and immediate shifts.

/// Minor opcodes.
pub mod funct3;

/// Base/alternate select.
pub mod funct7;

/// Major opcodes.
pub mod opcodes;
