//! `OP_SYSTEM` words: environment calls and the Zicsr instructions.

/// CSR numbers the core implements.
pub mod csr;

/// `ecall`, as a complete word.
pub const ECALL: u32 = 0x0000_0073;

/// `ebreak`, as a complete word.
pub const EBREAK: u32 = 0x0010_0073;

/// `funct3` shared by `ecall` and `ebreak`.
pub const PRIV: u32 = 0b000;

// CSR access, by funct3. The `i` forms take a 5-bit zero-extended immediate in the rs1 field.

/// `csrrw`: swap.
pub const CSRRW: u32 = 0b001;
/// `csrrs`: read, then set the bits given in rs1.
pub const CSRRS: u32 = 0b010;
/// `csrrc`: read, then clear the bits given in rs1.
pub const CSRRC: u32 = 0b011;
/// `csrrwi`.
pub const CSRRWI: u32 = 0b101;
/// `csrrsi`.
pub const CSRRSI: u32 = 0b110;
/// `csrrci`.
pub const CSRRCI: u32 = 0b111;
