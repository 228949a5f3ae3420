//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains opcodes, function codes, and the encoder/decoder pair, organized by
//! RISC-V extension.
//!
//! # Extensions
//!
//! * `rv32i`: Base Integer Instruction Set (32-bit).
//! * `rv32m`: Standard Extension for Integer Multiplication and Division.
//! * `system`: Environment calls and the Zicsr CSR instructions.

/// Instruction decoding logic for all RISC-V instruction formats.
pub mod decode;

/// Instruction encoder used to build stimulus words.
pub mod encode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Base integer instruction set (32-bit RISC-V core instructions).
pub mod rv32i;

/// Integer multiply/divide extension (MUL, DIV, REM instructions).
pub mod rv32m;

/// System instructions and CSR addresses.
pub mod system;
