/// Session builders and test configuration.
pub mod harness;

/// Mock trace sink and defective circuits.
pub mod mocks;
