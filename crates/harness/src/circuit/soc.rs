//! Core and shared memory.
//!
//! The system model ties an `Rv32Core` to a dual-port RAM. The core owns port B; port A is
//! the external port the harness drives, used to preload images and to read results. Both
//! ports are read-first. The core's outputs `core_halt` and `core_fault` are brought out.

use super::ram::WordMemory;
use super::{Circuit, DebugSurface, Rv32Core};
use crate::common::constants::{BYTE_LANES, FAULT_BITS};
use crate::config::Config;
use crate::signal::{ClockOrder, Port, PortSchema, PortSet};

/// Reference system: core plus dual-port RAM.
#[derive(Debug)]
pub struct Soc {
    schema: PortSchema,
    ports: PortSet,
    core: Rv32Core,
    mem: WordMemory,
    last_clk: bool,
}

impl Soc {
    /// Port schema of the system's external port.
    pub fn port_schema(addr_bits: u8) -> PortSchema {
        PortSchema::new("soc", ClockOrder::HighFirst)
            .with_port(Port::Clk, "clk", 1)
            .with_port(Port::ResetN, "reset_n", 1)
            .with_port(Port::Addr, "a_addr", addr_bits)
            .with_port(Port::DataIn, "a_data_in", 32)
            .with_port(Port::DataOut, "a_data_out", 32)
            .with_port(Port::WrEn, "a_wr_en", 1)
            .with_port(Port::WrStrobe, "a_wr_strobe", BYTE_LANES as u8)
            .with_port(Port::Halt, "core_halt", 1)
            .with_port(Port::Fault, "core_fault", FAULT_BITS)
    }

    /// Creates the system with its core held in reset and memory zeroed.
    pub fn new(config: &Config) -> Self {
        let schema = Self::port_schema(config.core.addr_bits);
        let ports = PortSet::new(&schema);
        Self {
            schema,
            ports,
            core: Rv32Core::new(&config.core),
            mem: WordMemory::new(config.memory.words),
            last_clk: false,
        }
    }

    /// The embedded core.
    pub const fn core(&self) -> &Rv32Core {
        &self.core
    }

    /// Shared memory contents.
    pub const fn memory(&self) -> &WordMemory {
        &self.mem
    }

    fn port_a_edge(&mut self) {
        let addr = self.ports.get(Port::Addr);
        self.ports.set(Port::DataOut, u64::from(self.mem.read(addr)));
        if self.ports.is_high(Port::WrEn) {
            let data = self.ports.get(Port::DataIn) as u32;
            let strobe = self.ports.get(Port::WrStrobe) as u8;
            self.mem.write(addr, data, strobe);
        }
    }

    /// Commits the write the core registered on the previous edge, then presents the word
    /// at the core's current address.
    fn port_b_edge(&mut self) {
        let addr = self.core.peek(Port::Addr);
        if self.core.ports().is_high(Port::WrEn) {
            let data = self.core.peek(Port::DataIn) as u32;
            let strobe = self.core.peek(Port::WrStrobe) as u8;
            self.mem.write(addr, data, strobe);
        }
        self.core.poke(Port::DataOut, u64::from(self.mem.read(addr)));
    }
}

impl Default for Soc {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Circuit for Soc {
    fn schema(&self) -> &PortSchema {
        &self.schema
    }

    fn ports(&self) -> &PortSet {
        &self.ports
    }

    fn ports_mut(&mut self) -> &mut PortSet {
        &mut self.ports
    }

    fn eval(&mut self) {
        let clk = self.ports.get(Port::Clk);
        let rising = clk != 0 && !self.last_clk;
        self.last_clk = clk != 0;

        if rising {
            self.port_a_edge();
            self.port_b_edge();
        }

        self.core.poke(Port::Clk, clk);
        self.core.poke(Port::ResetN, self.ports.get(Port::ResetN));
        self.core.eval();

        self.ports.set(Port::Halt, self.core.peek(Port::Halt));
        self.ports.set(Port::Fault, self.core.peek(Port::Fault));
    }
}

impl DebugSurface for Soc {
    fn read_reg(&self, idx: usize) -> u32 {
        self.core.read_reg(idx)
    }

    fn write_reg(&mut self, idx: usize, value: u32) {
        self.core.write_reg(idx, value);
    }

    fn pc(&self) -> u32 {
        self.core.pc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isa::encode;

    fn step(soc: &mut Soc) {
        soc.poke(Port::Clk, 1);
        soc.eval();
        soc.poke(Port::Clk, 0);
        soc.eval();
    }

    fn preload(soc: &mut Soc, byte_addr: u32, word: u32) {
        soc.poke(Port::Addr, u64::from(byte_addr >> 2));
        soc.poke(Port::DataIn, u64::from(word));
        soc.poke(Port::WrStrobe, 0xf);
        soc.poke(Port::WrEn, 1);
        step(soc);
        soc.poke(Port::WrEn, 0);
    }

    #[test]
    fn core_runs_program_from_shared_memory() {
        let mut soc = Soc::default();
        preload(&mut soc, 0x0, encode::addi(1, 0, 0x40));
        preload(&mut soc, 0x4, encode::addi(2, 0, 9));
        preload(&mut soc, 0x8, encode::sw(2, 1, 0));
        preload(&mut soc, 0xc, encode::jal(0, 0));
        soc.poke(Port::ResetN, 1);
        for _ in 0..8 {
            step(&mut soc);
        }
        assert_eq!(soc.read_reg(2), 9);
        assert_eq!(soc.memory().read(0x10), 9);
        assert_eq!(soc.pc(), 0xc);
    }
}
