//! Control and Status Register addresses.
//!
//! The core implements the unprivileged counter CSRs (read-only, 64-bit
//! counters exposed as low/high halves) and one machine scratch register.

/// Cycle counter, low half.
pub const CYCLE: u32 = 0xC00;
/// Real-time counter, low half.
pub const TIME: u32 = 0xC01;
/// Instructions-retired counter, low half.
pub const INSTRET: u32 = 0xC02;
/// Cycle counter, high half.
pub const CYCLEH: u32 = 0xC80;
/// Real-time counter, high half.
pub const TIMEH: u32 = 0xC81;
/// Instructions-retired counter, high half.
pub const INSTRETH: u32 = 0xC82;

/// Machine scratch register (read/write).
pub const MSCRATCH: u32 = 0x340;

/// Returns `true` when bits 11:10 of the address mark the CSR read-only.
#[inline]
pub const fn is_read_only(addr: u32) -> bool {
    (addr >> 10) & 0b11 == 0b11
}
