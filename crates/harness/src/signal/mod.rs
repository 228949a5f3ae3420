//! Circuit signal ports.
//!
//! This module describes the wires at the circuit boundary. It provides:
//! 1. **Roles:** The `Port` enum naming what each wire is for.
//! 2. **Values:** `PortSet`, the width-masked current value of every port.
//! 3. **Schemas:** `PortSchema`, the per-variant names, widths, clock order, and address shift.

/// Port roles and the port value set.
pub mod port;

/// Per-variant port schema.
pub mod schema;

pub use port::{Port, PortSet};
pub use schema::{ClockOrder, PortSchema, PortSpec};
