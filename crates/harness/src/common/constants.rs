//! Global Harness Constants.
//!
//! This module defines constants shared by the harness engine and the reference circuits. It includes:
//! 1. **Architectural Constants:** Register count, instruction size, word geometry.
//! 2. **Bus Constants:** Byte-lane count, word-address shift, default address bus width.
//! 3. **Fault Codes:** Values a core reports on its fault port.
//! 4. **Run Constants:** Default trace path and system-scenario addresses.

/// Number of architectural integer registers (`x0`-`x31`).
pub const NUM_REGS: usize = 32;

/// Size of a (non-compressed) instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of byte lanes on the 32-bit data bus.
pub const BYTE_LANES: u32 = 4;

/// Width of one byte lane in bits.
pub const LANE_BITS: u32 = 8;

/// Mask of all four byte lanes in a write strobe.
pub const FULL_STROBE: u64 = 0xF;

/// Shift between a byte address and the word address carried on the address ports.
pub const WORD_SHIFT: u32 = 2;

/// Default width of the word-address bus (15 bits = 128 KiB of byte address space).
pub const DEFAULT_ADDR_BITS: u8 = 15;

/// Default RAM depth in 32-bit words.
pub const DEFAULT_RAM_WORDS: usize = 1 << DEFAULT_ADDR_BITS;

/// Fault code reported when no fault is pending.
pub const FAULT_NONE: u64 = 0;

/// Fault code for an instruction the core does not implement.
pub const FAULT_ILLEGAL_INSTRUCTION: u64 = 1;

/// Fault code for a load or store whose address is not aligned to its width.
pub const FAULT_MISALIGNED_ACCESS: u64 = 2;

/// Fault code for a jump or taken branch to a target that is not 4-byte aligned.
pub const FAULT_MISALIGNED_TARGET: u64 = 3;

/// Width of the fault port in bits.
pub const FAULT_BITS: u8 = 4;

/// Default waveform output path.
pub const DEFAULT_TRACE_PATH: &str = "simx.vcd";

/// Byte address of the first operand word in the system scenario.
pub const SYSTEM_OPERAND_A: u32 = 0x1_F000;

/// Byte address of the second operand word in the system scenario.
pub const SYSTEM_OPERAND_B: u32 = 0x1_F004;

/// Byte address of the result word in the system scenario.
pub const SYSTEM_RESULT: u32 = 0x1_F008;
