//! Single-port synchronous RAM.
//!
//! Word-addressed storage with a 4-bit byte-lane write strobe. On each rising edge the
//! block is read-first: `data_out` takes the word stored at `addr` before the write
//! enabled by `wr_en` lands.

use super::Circuit;
use crate::common::constants::{BYTE_LANES, FULL_STROBE};
use crate::common::strobe_lane_mask;
use crate::config::{CoreConfig, MemoryConfig};
use crate::signal::{ClockOrder, Port, PortSchema, PortSet};

/// Word storage shared by the RAM block and the system model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordMemory {
    words: Vec<u32>,
}

impl WordMemory {
    /// Creates `depth` zeroed words.
    pub fn new(depth: usize) -> Self {
        Self {
            words: vec![0; depth.max(1)],
        }
    }

    /// Number of words stored.
    pub fn depth(&self) -> usize {
        self.words.len()
    }

    /// Reads the word at `addr`; addresses wrap at the depth.
    pub fn read(&self, addr: u64) -> u32 {
        self.words[self.index(addr)]
    }

    /// Writes the lanes of `data` enabled by `strobe` into the word at `addr`.
    pub fn write(&mut self, addr: u64, data: u32, strobe: u8) {
        let idx = self.index(addr);
        let mask = strobe_lane_mask(strobe);
        self.words[idx] = (self.words[idx] & !mask) | (data & mask);
    }

    fn index(&self, addr: u64) -> usize {
        (addr % self.words.len() as u64) as usize
    }
}

/// Reference single-port RAM block.
#[derive(Debug)]
pub struct Ram {
    schema: PortSchema,
    ports: PortSet,
    mem: WordMemory,
    last_clk: bool,
}

impl Ram {
    /// Port schema of the RAM with an `addr_bits`-wide word-address bus.
    pub fn port_schema(addr_bits: u8) -> PortSchema {
        PortSchema::new("ram", ClockOrder::HighFirst)
            .with_port(Port::Clk, "clk", 1)
            .with_port(Port::Addr, "addr", addr_bits)
            .with_port(Port::DataIn, "data_in", 32)
            .with_port(Port::DataOut, "data_out", 32)
            .with_port(Port::WrEn, "wr_en", 1)
            .with_port(Port::WrStrobe, "wr_strobe", BYTE_LANES as u8)
    }

    /// Creates a zeroed RAM. The strobe port starts with every lane enabled.
    pub fn new(core: &CoreConfig, memory: &MemoryConfig) -> Self {
        let schema = Self::port_schema(core.addr_bits);
        let mut ports = PortSet::new(&schema);
        ports.set(Port::WrStrobe, FULL_STROBE);
        Self {
            schema,
            ports,
            mem: WordMemory::new(memory.words),
            last_clk: false,
        }
    }

    /// Backing storage.
    pub const fn memory(&self) -> &WordMemory {
        &self.mem
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new(&CoreConfig::default(), &MemoryConfig::default())
    }
}

impl Circuit for Ram {
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
        let clk = self.ports.is_high(Port::Clk);
        let rising = clk && !self.last_clk;
        self.last_clk = clk;
        if !rising {
            return;
        }

        let addr = self.ports.get(Port::Addr);
        self.ports.set(Port::DataOut, u64::from(self.mem.read(addr)));
        if self.ports.is_high(Port::WrEn) {
            let data = self.ports.get(Port::DataIn) as u32;
            let strobe = self.ports.get(Port::WrStrobe) as u8;
            self.mem.write(addr, data, strobe);
        }
    }
}
