//! Per-variant port schema.
//!
//! A schema names a circuit variant's ports, fixes their widths, and records the two facts
//! the clock stepper and the scenario shapes need to drive it without variant-specific code:
//! which clock level comes first in a step, and how word addresses on the address port map
//! to byte addresses.

use super::port::Port;
use crate::common::constants::WORD_SHIFT;

/// Order of the two clock phases within one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClockOrder {
    /// Clock low for the first half-step, high for the second (rising edge at the end).
    #[default]
    LowFirst,
    /// Clock high for the first half-step, low for the second (rising edge at the start).
    HighFirst,
}

impl ClockOrder {
    /// Clock levels for the first and second half of a step.
    #[inline]
    pub const fn phases(self) -> [u64; 2] {
        match self {
            Self::LowFirst => [0, 1],
            Self::HighFirst => [1, 0],
        }
    }
}

/// Name and width of one port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PortSpec {
    /// Signal name as it appears in the design and in the waveform.
    pub name: &'static str,
    /// Width in bits (1..=64).
    pub width: u8,
}

/// Port layout and stepping conventions of one circuit variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortSchema {
    /// Top-level module name, used as the waveform scope.
    pub module: &'static str,
    /// Which clock level each step starts with.
    pub clock_order: ClockOrder,
    /// Shift from the address port's word address to a byte address.
    pub word_shift: u32,
    ports: [Option<PortSpec>; Port::COUNT],
}

impl PortSchema {
    /// Creates an empty schema for `module`.
    pub const fn new(module: &'static str, clock_order: ClockOrder) -> Self {
        Self {
            module,
            clock_order,
            word_shift: WORD_SHIFT,
            ports: [None; Port::COUNT],
        }
    }

    /// Declares `port` as `name` with `width` bits.
    #[must_use]
    pub const fn with_port(mut self, port: Port, name: &'static str, width: u8) -> Self {
        self.ports[port.index()] = Some(PortSpec { name, width });
        self
    }

    /// Overrides the word-address shift (zero for byte-addressed buses).
    #[must_use]
    pub const fn with_word_shift(mut self, shift: u32) -> Self {
        self.word_shift = shift;
        self
    }

    /// Returns the declaration of `port`, if the variant has it.
    pub const fn spec(&self, port: Port) -> Option<&PortSpec> {
        self.ports[port.index()].as_ref()
    }

    /// Iterates the declared ports in role order.
    pub fn ports(&self) -> impl Iterator<Item = (Port, &PortSpec)> + '_ {
        Port::ALL
            .iter()
            .filter_map(|&port| self.spec(port).map(|spec| (port, spec)))
    }

    /// Converts an address-port value to a byte address.
    #[inline]
    pub const fn byte_address(&self, word_addr: u64) -> u32 {
        (word_addr << self.word_shift) as u32
    }

    /// Converts a byte address to the value driven onto the address port.
    #[inline]
    pub const fn word_address(&self, byte_addr: u32) -> u64 {
        (byte_addr >> self.word_shift) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phases_alternate_in_both_orders() {
        assert_eq!(ClockOrder::LowFirst.phases(), [0, 1]);
        assert_eq!(ClockOrder::HighFirst.phases(), [1, 0]);
    }

    #[test]
    fn declared_ports_iterate_in_role_order() {
        let schema = PortSchema::new("ram", ClockOrder::HighFirst)
            .with_port(Port::WrEn, "wr_en", 1)
            .with_port(Port::Clk, "clk", 1);
        let names: Vec<_> = schema.ports().map(|(_, spec)| spec.name).collect();
        assert_eq!(names, ["clk", "wr_en"]);
        assert!(schema.spec(Port::Halt).is_none());
    }

    #[test]
    fn word_and_byte_addresses_convert() {
        let schema = PortSchema::new("core", ClockOrder::LowFirst);
        assert_eq!(schema.word_address(0x1_f008), 0x7c02);
        assert_eq!(schema.byte_address(0x7c02), 0x1_f008);

        let bytes = schema.with_word_shift(0);
        assert_eq!(bytes.word_address(0x1_f008), 0x1_f008);
        assert_eq!(bytes.byte_address(0xe13), 0xe13);
    }
}
