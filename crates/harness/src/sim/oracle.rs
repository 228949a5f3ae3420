//! Architectural state oracle.
//!
//! Reads the register file and PC of a core through its `DebugSurface`, expresses expected
//! state as a `RegisterSnapshot`, and compares the two. Register 0 is normalized to zero on
//! every read, whatever the circuit's storage reports.

use std::fmt;
use std::ops::Index;

use tracing::error;

use super::session::Session;
use crate::circuit::{Circuit, DebugSurface};
use crate::common::constants::NUM_REGS;
use crate::common::error::HarnessResult;

/// The 32 integer registers plus the PC.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterSnapshot {
    regs: [u32; NUM_REGS],
    /// Program counter.
    pub pc: u32,
}

impl RegisterSnapshot {
    /// All registers and the PC at zero.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
            pc: 0,
        }
    }

    /// Value of register `idx`; register 0 is always zero.
    ///
    /// Indices wrap modulo 32, as they do on the core's debug port.
    #[inline]
    pub const fn get(&self, idx: usize) -> u32 {
        self.regs[idx % NUM_REGS]
    }

    /// Sets register `idx`, wrapping like [`get`](Self::get). Writes to register 0 are
    /// discarded.
    #[inline]
    pub const fn set(&mut self, idx: usize, value: u32) {
        let idx = idx % NUM_REGS;
        if idx != 0 {
            self.regs[idx] = value;
        }
    }
}

impl Index<usize> for RegisterSnapshot {
    type Output = u32;

    fn index(&self, idx: usize) -> &u32 {
        &self.regs[idx % NUM_REGS]
    }
}

impl fmt::Debug for RegisterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pc {:#010x}", self.pc)?;
        for (row, chunk) in self.regs.chunks(4).enumerate() {
            for (col, value) in chunk.iter().enumerate() {
                write!(f, "r{:<2} {value:#010x}  ", row * 4 + col)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Reads every register and the PC; register 0 is forced to zero.
pub fn grab<C: Circuit + DebugSurface>(session: &Session<C>) -> RegisterSnapshot {
    let core = session.circuit();
    let mut snapshot = RegisterSnapshot::new();
    for idx in 1..NUM_REGS {
        snapshot.regs[idx] = core.read_reg(idx);
    }
    snapshot.pc = core.pc();
    snapshot
}

/// Queues a direct write of registers 1..31, applied at the next step.
pub fn force_set<C: Circuit + DebugSurface>(session: &mut Session<C>, snapshot: &RegisterSnapshot) {
    let regs = snapshot.regs;
    session.push(move |core: &mut C| {
        for (idx, &value) in regs.iter().enumerate().skip(1) {
            core.write_reg(idx, value);
        }
    });
}

/// Indices of every register where `actual` differs from `expected`, lowest first.
pub fn mismatches(expected: &RegisterSnapshot, actual: &RegisterSnapshot) -> Vec<usize> {
    (0..NUM_REGS).filter(|&idx| actual[idx] != expected[idx]).collect()
}

/// Compares all 32 registers, logging every mismatch before failing.
pub fn compare<C: Circuit>(
    session: &mut Session<C>,
    expected: &RegisterSnapshot,
    actual: &RegisterSnapshot,
) -> HarnessResult<()> {
    let wrong = mismatches(expected, actual);
    for &idx in &wrong {
        error!("r{idx} 0x{:x} != expected 0x{:x}", actual[idx], expected[idx]);
    }
    crate::tb_assert!(session, wrong.is_empty());
    Ok(())
}

/// Reads the registers and compares them with `expected`.
pub fn check_regs<C: Circuit + DebugSurface>(
    session: &mut Session<C>,
    expected: &RegisterSnapshot,
) -> HarnessResult<()> {
    let actual = grab(session);
    compare(session, expected, &actual)
}

/// Reads the program counter.
pub fn pc<C: Circuit + DebugSurface>(session: &Session<C>) -> u32 {
    session.circuit().pc()
}
