//! `funct7` (bits 31..25) of R-type words and immediate shifts.

/// Base form: `add`, `srl`, `srli`, and every other single-variant operation.
pub const DEFAULT: u32 = 0b0000000;

/// Alternate form: `sub`, `sra`, `srai`.
pub const ALT: u32 = 0b0100000;
