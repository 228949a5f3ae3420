//! # Harness Testing Library
//!
//! Entry point for the integration tests of the verification harness. It organizes the
//! shared test utilities and the unit tests that drive the engine, the scenario shapes, and
//! the bundled suites against the reference circuits.

/// Shared test infrastructure.
///
/// This module provides:
/// - **Harness**: Session builders and a quiet configuration for test runs.
/// - **Mocks**: A mock trace sink and circuit wrappers with injected defects.
pub mod common;

/// Unit tests for the harness components.
pub mod unit;
