//! Cycle-accurate verification harness for an RV32IM core and its memory.
//!
//! This crate drives a simulated clocked circuit and checks its behavior against the
//! instruction set, with the following:
//! 1. **Engine:** Deferred stimulus queue, two-phase clock stepper, waveform tracing, and
//!    fail-fast reporting, all owned by one `Session`.
//! 2. **Oracle:** Register file and PC snapshots read through a debug surface and compared
//!    in full after every step.
//! 3. **Scenarios:** Plain, read-stalled, and write-stalled execution shapes composed into
//!    instruction, RAM, and system suites.
//! 4. **ISA:** Decoding and an instruction encoder for RV32I, M, Zicsr, and fences.
//! 5. **Circuits:** Behavioral reference models of the core, a RAM block, and the two
//!    together, usable wherever an RTL simulation would be.
//!
//! # Examples
//!
//! ```
//! use rv32tb_core::circuit::Rv32Core;
//! use rv32tb_core::isa::encode;
//! use rv32tb_core::scenario::{Scenario, Step, run_all};
//! use rv32tb_core::{Config, Session, sim};
//!
//! let scenarios = vec![Scenario::from_steps(
//!     "addi",
//!     vec![Step::op(encode::addi(1, 0, 5)).expect(1, 5)],
//! )];
//! let config = Config::default();
//! let session = Session::untraced(Rv32Core::new(&config.core));
//! let outcome = sim::run(session, &config.general, |s| run_all(s, &scenarios));
//! assert_eq!(outcome.exit_code(), 0);
//! ```

/// Simulated circuits (traits and reference models).
pub mod circuit;
/// Common types and constants (bus geometry, fault codes, bit helpers, errors).
pub mod common;
/// Run configuration (defaults and hierarchical config structures).
pub mod config;
/// Instruction set (decode, encode, RV32I/M, system and CSR definitions).
pub mod isa;
/// Scenario runner, execution shapes, and bundled suites.
pub mod scenario;
/// Signal ports and per-variant schemas.
pub mod signal;
/// Harness engine (session, stimulus, oracle, reporting, trace, image loading).
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load it from JSON.
pub use crate::config::Config;
/// Traits a simulated circuit implements to be driven by the harness.
pub use crate::circuit::{Circuit, DebugSurface};
/// Error type and result alias of every harness operation.
pub use crate::common::error::{HarnessError, HarnessResult};
/// Owner of one circuit under test; construct with `Session::from_config`.
pub use crate::sim::Session;

#[doc(hidden)]
pub mod __private {
    pub use tracing;
}
