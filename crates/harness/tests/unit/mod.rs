//! # Unit Components
//!
//! Tests grouped by the part of the harness they exercise: the clock stepper and its trace,
//! failure reporting, the register oracle and execution shapes, image loading, the
//! instruction encoder, and the bundled suites.

/// Bit helpers and strobe lane properties.
pub mod bits;

/// Configuration loading.
pub mod config;

/// Encoder and decoder agreement.
pub mod isa;

/// Memory image files and streaming.
pub mod loader;

/// Register comparison and its mismatch log.
pub mod oracle;

/// Run loop teardown and exit codes.
pub mod report;

/// Execution shapes against defective cores.
pub mod scenario;

/// Clock stepping, stimulus timing, and waveform output.
pub mod session;

/// Bundled suites on the reference circuits.
pub mod suites;
