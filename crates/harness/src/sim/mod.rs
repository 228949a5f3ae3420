//! Harness engine.
//!
//! Everything that drives and observes a circuit during a run:
//! 1. **Session:** Ownership of the circuit, virtual time, and the two-phase clock stepper.
//! 2. **Stimulus:** The deferred queue drained before each clock step.
//! 3. **Oracle:** Register/PC snapshots read through the debug surface.
//! 4. **Reporting:** The assertion macros and the top-level run loop with teardown.
//! 5. **Trace and images:** Waveform sinks and memory image loading.

/// Memory image parsing and streaming.
pub mod loader;

/// Architectural register/PC oracle.
pub mod oracle;

/// Assertion macros and the run loop.
pub mod report;

/// Session ownership and the clock stepper.
pub mod session;

/// Deferred stimulus queue.
pub mod stimulus;

/// Waveform sinks.
pub mod trace;

pub use loader::{ImageWord, MemoryImage, load_into};
pub use oracle::RegisterSnapshot;
pub use report::{RunOutcome, print_outcome, run};
pub use session::Session;
pub use stimulus::StimulusQueue;
pub use trace::{NullTrace, TraceSink, VcdTrace};
