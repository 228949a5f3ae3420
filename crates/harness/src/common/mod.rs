//! Common utilities and types used throughout the harness.
//!
//! This module provides the fundamental building blocks shared by the harness engine
//! and the reference circuits. It includes:
//! 1. **Constants:** Register, bus, and fault-code constants.
//! 2. **Bit Helpers:** Field masks, sign extension, and byte-lane strobe expansion.
//! 3. **Error Handling:** The harness error type and failure locations.

/// Bit-field masks, sign extension, and strobe lane helpers.
pub mod bits;

/// Common constants used throughout the harness.
pub mod constants;

/// Error types and failure locations.
pub mod error;

pub use bits::{lanes_match, sign_extend, strobe_lane_mask};
pub use constants::{NUM_REGS, WORD_SHIFT};
pub use error::{HarnessError, HarnessResult, Location};
