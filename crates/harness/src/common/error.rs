//! Harness error and failure-location definitions.
//!
//! This module defines the single error type threaded through every harness operation. It provides:
//! 1. **Assertion failures:** The terminal outcome of a failed check, carrying the checked
//!    expression text and its source location.
//! 2. **Input failures:** Malformed or misaligned memory image lines, kept apart from circuit
//!    misbehavior so the report says which side was wrong.
//! 3. **Environment failures:** Trace and image file I/O, configuration parsing, unknown suites.
//!
//! Whatever the kind, the first error ends the run: nothing in the harness retries or recovers.

use std::fmt;
use std::io;

use thiserror::Error;

/// Source location of a failed check (`file!()` / `line!()` at the assertion site).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Location {
    /// Source file path as reported by `file!()`.
    pub file: &'static str,
    /// Line number as reported by `line!()`.
    pub line: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Every way a harness run can end early.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A checked predicate did not hold: the circuit disagrees with the expected behavior.
    #[error("Assertion failed ({expression}) at {location}")]
    AssertionFailed {
        /// Source text of the predicate.
        expression: &'static str,
        /// Where the predicate was checked.
        location: Location,
    },

    /// A memory image line could not be used.
    #[error("memory image line {line}: {reason}")]
    MemoryImage {
        /// 1-based line (or record) number in the image source.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Trace output or image input failed at the OS level.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration document did not parse.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A suite or scenario name that the harness does not know.
    #[error("unknown suite or scenario '{0}'")]
    UnknownSuite(String),
}

impl HarnessError {
    /// Builds an assertion failure for `expression` checked at `file:line`.
    pub const fn assertion(expression: &'static str, file: &'static str, line: u32) -> Self {
        Self::AssertionFailed {
            expression,
            location: Location { file, line },
        }
    }

    /// Builds a memory image error for the given 1-based line.
    pub fn image(line: usize, reason: impl Into<String>) -> Self {
        Self::MemoryImage {
            line,
            reason: reason.into(),
        }
    }

    /// Returns `true` when this error is a circuit behavior mismatch rather than bad input.
    pub const fn is_assertion(&self) -> bool {
        matches!(self, Self::AssertionFailed { .. })
    }
}

/// Result alias used by every fallible harness operation.
pub type HarnessResult<T> = Result<T, HarnessError>;
