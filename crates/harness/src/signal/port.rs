//! Signal ports and the port value set.
//!
//! Ports are identified by the role they play on the harness side of the circuit boundary.
//! Data ports are named from the memory's point of view, so the same role means the same
//! wire whether the circuit under test is a core (which drives `DataIn` and consumes
//! `DataOut`) or a RAM block (which consumes `DataIn` and drives `DataOut`).

use super::schema::PortSchema;

/// Role of a circuit port.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Port {
    /// Clock input.
    Clk,
    /// Active-low reset input.
    ResetN,
    /// Word address of the memory access.
    Addr,
    /// Data flowing into memory (store data from a core, write data into a RAM).
    DataIn,
    /// Data flowing out of memory (instruction/load data into a core, read data from a RAM).
    DataOut,
    /// Memory write enable.
    WrEn,
    /// Per-byte-lane write strobe (bit `i` enables byte lane `i`).
    WrStrobe,
    /// Halt/wait indicator: the core is stalled on a multi-cycle memory access.
    Halt,
    /// Fault code; zero when no fault is pending.
    Fault,
}

impl Port {
    /// Number of port roles.
    pub const COUNT: usize = 9;

    /// Every port role, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Clk,
        Self::ResetN,
        Self::Addr,
        Self::DataIn,
        Self::DataOut,
        Self::WrEn,
        Self::WrStrobe,
        Self::Halt,
        Self::Fault,
    ];

    /// Dense index of this role, for table storage.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Current value of every port a circuit exposes.
///
/// Values are stored as `u64` containers and masked to the port's declared width on every
/// write. Ports absent from the schema have width zero and always read as zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortSet {
    values: [u64; Port::COUNT],
    widths: [u8; Port::COUNT],
}

impl PortSet {
    /// Creates a port set with every port of `schema` at zero.
    pub fn new(schema: &PortSchema) -> Self {
        let mut widths = [0; Port::COUNT];
        for (port, spec) in schema.ports() {
            widths[port.index()] = spec.width;
        }
        Self {
            values: [0; Port::COUNT],
            widths,
        }
    }

    /// Reads the current value of `port`.
    #[inline]
    pub const fn get(&self, port: Port) -> u64 {
        self.values[port.index()]
    }

    /// Writes `value` to `port`, truncated to the port's width.
    #[inline]
    pub fn set(&mut self, port: Port, value: u64) {
        let width = self.widths[port.index()];
        self.values[port.index()] = value & width_mask(width);
    }

    /// Returns `true` when `port` is non-zero.
    #[inline]
    pub const fn is_high(&self, port: Port) -> bool {
        self.get(port) != 0
    }
}

/// Mask for a port of `width` bits.
#[inline]
const fn width_mask(width: u8) -> u64 {
    if width >= 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    }
}
