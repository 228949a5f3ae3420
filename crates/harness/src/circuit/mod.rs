//! Simulated circuits.
//!
//! This module defines the boundary between the harness and a simulated design. It provides:
//! 1. **Signal access:** The `Circuit` trait (port set, schema, one evaluation).
//! 2. **Probe access:** The `DebugSurface` trait exposing the register file and PC.
//! 3. **Reference models:** `Rv32Core`, `Ram`, and `Soc`, behavioral stand-ins for the RTL.
//!
//! Any simulator backend can be driven by the harness by implementing these traits.

/// Integer ALU of the reference core.
pub mod alu;

/// Behavioral RV32IM core with a single-port memory bus.
pub mod core;

/// Single-port byte-strobed synchronous RAM.
pub mod ram;

/// Core plus shared dual-port RAM.
pub mod soc;

pub use self::core::Rv32Core;
pub use self::ram::Ram;
pub use self::soc::Soc;

use crate::signal::{Port, PortSchema, PortSet};

/// A clocked circuit the harness can drive.
///
/// The harness writes input ports, calls [`Circuit::eval`], and reads output ports.
/// Each `eval` settles the circuit for the current input values; sequential logic
/// reacts to the clock level it sees compared with the previous evaluation.
///
/// Circuits are owned outright by a session and receive queued closures, so they hold no
/// borrowed state.
pub trait Circuit: 'static {
    /// Port names, widths, clock order, and address shift of this variant.
    fn schema(&self) -> &PortSchema;

    /// Current port values.
    fn ports(&self) -> &PortSet;

    /// Mutable port values, for the harness to drive inputs.
    fn ports_mut(&mut self) -> &mut PortSet;

    /// Evaluates the circuit once for the current inputs.
    fn eval(&mut self);

    /// Drives `value` onto `port`, truncated to the port's width.
    fn poke(&mut self, port: Port, value: u64) {
        self.ports_mut().set(port, value);
    }

    /// Reads the current value of `port`.
    fn peek(&self, port: Port) -> u64 {
        self.ports().get(port)
    }
}

/// Debug access to the architectural state of a core.
///
/// Register reads return the raw storage, so register 0 may report stale bits;
/// the oracle normalizes it.
pub trait DebugSurface {
    /// Reads integer register `idx` (0..32).
    fn read_reg(&self, idx: usize) -> u32;

    /// Overwrites integer register `idx` (0..32), bypassing instruction execution.
    fn write_reg(&mut self, idx: usize, value: u32);

    /// Reads the program counter.
    fn pc(&self) -> u32;
}
