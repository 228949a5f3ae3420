use rv32tb_core::circuit::{Circuit, DebugSurface, Rv32Core};
use rv32tb_core::signal::{Port, PortSchema, PortSet};

/// A single injected bug.
#[derive(Clone, Copy, Debug)]
pub enum Defect {
    /// The register never leaves zero.
    StuckRegister(usize),
    /// `core_halt` never rises.
    NoHalt,
    /// Bit `n` of store data is stuck high on the bus.
    StuckStoreBit(u32),
    /// Stores enable every byte lane.
    WideStrobe,
}

/// The reference core with one defect applied after every evaluation.
#[derive(Debug)]
pub struct DefectiveCore {
    inner: Rv32Core,
    defect: Defect,
}

impl DefectiveCore {
    pub fn new(defect: Defect) -> Self {
        Self {
            inner: Rv32Core::default(),
            defect,
        }
    }
}

impl Circuit for DefectiveCore {
    fn schema(&self) -> &PortSchema {
        self.inner.schema()
    }

    fn ports(&self) -> &PortSet {
        self.inner.ports()
    }

    fn ports_mut(&mut self) -> &mut PortSet {
        self.inner.ports_mut()
    }

    fn eval(&mut self) {
        self.inner.eval();
        let writing = self.inner.ports().is_high(Port::WrEn);
        match self.defect {
            Defect::StuckRegister(idx) => self.inner.write_reg(idx, 0),
            Defect::NoHalt => self.inner.poke(Port::Halt, 0),
            Defect::StuckStoreBit(bit) if writing => {
                let data = self.inner.peek(Port::DataIn) | (1 << bit);
                self.inner.poke(Port::DataIn, data);
            }
            Defect::WideStrobe if writing => self.inner.poke(Port::WrStrobe, 0xf),
            Defect::StuckStoreBit(_) | Defect::WideStrobe => {}
        }
    }
}

impl DebugSurface for DefectiveCore {
    fn read_reg(&self, idx: usize) -> u32 {
        self.inner.read_reg(idx)
    }

    fn write_reg(&mut self, idx: usize, value: u32) {
        self.inner.write_reg(idx, value);
    }

    fn pc(&self) -> u32 {
        self.inner.pc()
    }
}
