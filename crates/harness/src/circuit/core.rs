//! Behavioral RV32IM core.
//!
//! A multi-cycle reference model of the processor under test. It fetches over a single
//! word-addressed memory bus and reacts on the rising clock edge:
//! 1. **Fetch/execute:** The word on `ram_data_out` is the instruction at `ram_addr`; it
//!    executes in one edge unless it touches memory.
//! 2. **Loads:** One edge presents the read address with `core_halt` raised; the next edge
//!    takes the data from `ram_data_out` and extends it.
//! 3. **Stores:** One edge presents address, lane-shifted data, strobe, and write enable with
//!    `core_halt` raised; the next edge drops them.
//! 4. **Faults:** Illegal encodings and misaligned accesses or targets latch a code on
//!    `core_fault` and stop the core until reset.
//!
//! Reset is level-sensitive on `reset_n`.

use tracing::trace;

use super::alu::{self, AluOp};
use super::{Circuit, DebugSurface};
use crate::common::constants::{
    BYTE_LANES, FAULT_BITS, FAULT_ILLEGAL_INSTRUCTION, FAULT_MISALIGNED_ACCESS,
    FAULT_MISALIGNED_TARGET, FAULT_NONE, INSTRUCTION_SIZE, LANE_BITS, NUM_REGS,
};
use crate::common::sign_extend;
use crate::config::CoreConfig;
use crate::isa::decode::decode;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::{funct3 as f3, opcodes as op};
use crate::isa::system::{self, csr};
use crate::signal::{ClockOrder, Port, PortSchema, PortSet};

/// Memory access in flight across a stall edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MemOp {
    Load { rd: usize, funct3: u32, offset: u32 },
    Store,
}

/// Outcome of executing one instruction.
enum Flow {
    Next(u32),
    Stall,
}

/// Reference RV32IM core.
#[derive(Debug)]
pub struct Rv32Core {
    schema: PortSchema,
    ports: PortSet,
    regs: [u32; NUM_REGS],
    pc: u32,
    reset_pc: u32,
    cycle: u64,
    instret: u64,
    mscratch: u32,
    pending: Option<MemOp>,
    last_clk: bool,
}

impl Rv32Core {
    /// Port schema of the core with an `addr_bits`-wide word-address bus.
    pub fn port_schema(addr_bits: u8) -> PortSchema {
        PortSchema::new("rv32_core", ClockOrder::LowFirst)
            .with_port(Port::Clk, "clk", 1)
            .with_port(Port::ResetN, "reset_n", 1)
            .with_port(Port::Addr, "ram_addr", addr_bits)
            .with_port(Port::DataIn, "ram_data_in", 32)
            .with_port(Port::DataOut, "ram_data_out", 32)
            .with_port(Port::WrEn, "ram_wr_en", 1)
            .with_port(Port::WrStrobe, "ram_wr_strobe", BYTE_LANES as u8)
            .with_port(Port::Halt, "core_halt", 1)
            .with_port(Port::Fault, "core_fault", FAULT_BITS)
    }

    /// Creates a core held in reset.
    pub fn new(config: &CoreConfig) -> Self {
        let schema = Self::port_schema(config.addr_bits);
        let ports = PortSet::new(&schema);
        let mut core = Self {
            schema,
            ports,
            regs: [0; NUM_REGS],
            pc: config.reset_pc,
            reset_pc: config.reset_pc,
            cycle: 0,
            instret: 0,
            mscratch: 0,
            pending: None,
            last_clk: false,
        };
        core.reset();
        core
    }

    fn reset(&mut self) {
        self.regs = [0; NUM_REGS];
        self.pc = self.reset_pc;
        self.cycle = 0;
        self.instret = 0;
        self.mscratch = 0;
        self.pending = None;
        self.release_bus();
        self.ports.set(Port::Fault, FAULT_NONE);
    }

    fn rising_edge(&mut self) {
        if self.ports.get(Port::Fault) != FAULT_NONE {
            return;
        }
        self.cycle = self.cycle.wrapping_add(1);

        let seq = self.pc.wrapping_add(INSTRUCTION_SIZE);
        match self.pending.take() {
            Some(MemOp::Load { rd, funct3, offset }) => {
                let word = self.ports.get(Port::DataOut) as u32;
                self.write_rd(rd, extract_load(word, funct3, offset));
                self.retire(seq);
            }
            Some(MemOp::Store) => self.retire(seq),
            None => {
                let inst = decode(self.ports.get(Port::DataOut) as u32);
                trace!("execute {:#010x} at {:#010x}", inst.raw, self.pc);
                match self.execute(&inst) {
                    Ok(Flow::Next(next)) => self.retire(next),
                    Ok(Flow::Stall) => {}
                    Err(code) => {
                        trace!(code, "fault at {:#010x}", self.pc);
                        self.release_bus();
                        self.ports.set(Port::Fault, code);
                    }
                }
            }
        }
    }

    fn execute(&mut self, d: &Decoded) -> Result<Flow, u64> {
        let pc = self.pc;
        let seq = pc.wrapping_add(INSTRUCTION_SIZE);
        let rs1 = self.x(d.rs1);
        let rs2 = self.x(d.rs2);

        match d.opcode {
            op::OP_LUI => {
                self.write_rd(d.rd, d.imm);
                Ok(Flow::Next(seq))
            }
            op::OP_AUIPC => {
                self.write_rd(d.rd, pc.wrapping_add(d.imm));
                Ok(Flow::Next(seq))
            }
            op::OP_JAL => {
                let target = checked_target(pc.wrapping_add(d.imm))?;
                self.write_rd(d.rd, seq);
                Ok(Flow::Next(target))
            }
            op::OP_JALR if d.funct3 == f3::JALR => {
                let target = checked_target(rs1.wrapping_add(d.imm) & !1)?;
                self.write_rd(d.rd, seq);
                Ok(Flow::Next(target))
            }
            op::OP_BRANCH => {
                let taken = match d.funct3 {
                    f3::BEQ => rs1 == rs2,
                    f3::BNE => rs1 != rs2,
                    f3::BLT => (rs1 as i32) < (rs2 as i32),
                    f3::BGE => (rs1 as i32) >= (rs2 as i32),
                    f3::BLTU => rs1 < rs2,
                    f3::BGEU => rs1 >= rs2,
                    _ => return Err(FAULT_ILLEGAL_INSTRUCTION),
                };
                if taken {
                    Ok(Flow::Next(checked_target(pc.wrapping_add(d.imm))?))
                } else {
                    Ok(Flow::Next(seq))
                }
            }
            op::OP_LOAD => self.start_load(d, rs1),
            op::OP_STORE => self.start_store(d, rs1, rs2),
            op::OP_IMM => {
                let alu_op =
                    AluOp::from_imm(d.funct3, d.funct7).ok_or(FAULT_ILLEGAL_INSTRUCTION)?;
                self.write_rd(d.rd, alu::execute(alu_op, rs1, d.imm));
                Ok(Flow::Next(seq))
            }
            op::OP_REG => {
                let alu_op =
                    AluOp::from_reg(d.funct3, d.funct7).ok_or(FAULT_ILLEGAL_INSTRUCTION)?;
                self.write_rd(d.rd, alu::execute(alu_op, rs1, rs2));
                Ok(Flow::Next(seq))
            }
            op::OP_MISC_MEM if matches!(d.funct3, f3::FENCE | f3::FENCE_I) => Ok(Flow::Next(seq)),
            op::OP_SYSTEM => {
                self.system(d, rs1)?;
                Ok(Flow::Next(seq))
            }
            _ => Err(FAULT_ILLEGAL_INSTRUCTION),
        }
    }

    fn start_load(&mut self, d: &Decoded, base: u32) -> Result<Flow, u64> {
        let addr = base.wrapping_add(d.imm);
        let size = match d.funct3 {
            f3::LB | f3::LBU => 1,
            f3::LH | f3::LHU => 2,
            f3::LW => 4,
            _ => return Err(FAULT_ILLEGAL_INSTRUCTION),
        };
        if addr % size != 0 {
            return Err(FAULT_MISALIGNED_ACCESS);
        }
        self.ports.set(Port::Addr, self.schema.word_address(addr));
        self.ports.set(Port::WrEn, 0);
        self.ports.set(Port::Halt, 1);
        self.pending = Some(MemOp::Load {
            rd: d.rd,
            funct3: d.funct3,
            offset: addr % BYTE_LANES,
        });
        Ok(Flow::Stall)
    }

    fn start_store(&mut self, d: &Decoded, base: u32, value: u32) -> Result<Flow, u64> {
        let addr = base.wrapping_add(d.imm);
        let (size, lanes) = match d.funct3 {
            f3::SB => (1, 0b0001),
            f3::SH => (2, 0b0011),
            f3::SW => (4, 0b1111),
            _ => return Err(FAULT_ILLEGAL_INSTRUCTION),
        };
        if addr % size != 0 {
            return Err(FAULT_MISALIGNED_ACCESS);
        }
        let offset = addr % BYTE_LANES;
        self.ports.set(Port::Addr, self.schema.word_address(addr));
        self.ports.set(Port::DataIn, u64::from(value << (offset * LANE_BITS)));
        self.ports.set(Port::WrStrobe, lanes << offset);
        self.ports.set(Port::WrEn, 1);
        self.ports.set(Port::Halt, 1);
        self.pending = Some(MemOp::Store);
        Ok(Flow::Stall)
    }

    fn system(&mut self, d: &Decoded, rs1: u32) -> Result<(), u64> {
        if d.funct3 == system::PRIV {
            // ECALL and EBREAK retire without side effects; there is no trap handler.
            return match d.raw {
                system::ECALL | system::EBREAK => Ok(()),
                _ => Err(FAULT_ILLEGAL_INSTRUCTION),
            };
        }

        let addr = d.raw.csr();
        let (src, is_imm) = match d.funct3 {
            system::CSRRW | system::CSRRS | system::CSRRC => (rs1, false),
            system::CSRRWI | system::CSRRSI | system::CSRRCI => (d.rs1 as u32, true),
            _ => return Err(FAULT_ILLEGAL_INSTRUCTION),
        };
        let old = self.read_csr(addr).ok_or(FAULT_ILLEGAL_INSTRUCTION)?;

        // CSRRS/CSRRC with x0 (or a zero immediate) do not write.
        let writes = match d.funct3 {
            system::CSRRW | system::CSRRWI => true,
            _ if is_imm => src != 0,
            _ => d.rs1 != 0,
        };
        if writes {
            let new = match d.funct3 {
                system::CSRRW | system::CSRRWI => src,
                system::CSRRS | system::CSRRSI => old | src,
                _ => old & !src,
            };
            self.write_csr(addr, new)?;
        }
        self.write_rd(d.rd, old);
        Ok(())
    }

    fn read_csr(&self, addr: u32) -> Option<u32> {
        Some(match addr {
            csr::CYCLE | csr::TIME => self.cycle as u32,
            csr::CYCLEH | csr::TIMEH => (self.cycle >> 32) as u32,
            csr::INSTRET => self.instret as u32,
            csr::INSTRETH => (self.instret >> 32) as u32,
            csr::MSCRATCH => self.mscratch,
            _ => return None,
        })
    }

    fn write_csr(&mut self, addr: u32, value: u32) -> Result<(), u64> {
        if csr::is_read_only(addr) {
            return Err(FAULT_ILLEGAL_INSTRUCTION);
        }
        match addr {
            csr::MSCRATCH => {
                self.mscratch = value;
                Ok(())
            }
            _ => Err(FAULT_ILLEGAL_INSTRUCTION),
        }
    }

    fn retire(&mut self, next_pc: u32) {
        self.pc = next_pc;
        self.instret = self.instret.wrapping_add(1);
        self.release_bus();
    }

    /// Drops every bus request and points the fetch address at the PC.
    fn release_bus(&mut self) {
        self.ports.set(Port::Addr, self.schema.word_address(self.pc));
        self.ports.set(Port::DataIn, 0);
        self.ports.set(Port::WrEn, 0);
        self.ports.set(Port::WrStrobe, 0);
        self.ports.set(Port::Halt, 0);
    }

    /// Architectural register read; `x0` is hardwired to zero.
    #[inline]
    const fn x(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Register file write. Writes to `x0` land in storage but never reach an operand.
    #[inline]
    const fn write_rd(&mut self, rd: usize, value: u32) {
        self.regs[rd] = value;
    }
}

impl Default for Rv32Core {
    fn default() -> Self {
        Self::new(&CoreConfig::default())
    }
}

impl Circuit for Rv32Core {
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

        if !self.ports.is_high(Port::ResetN) {
            self.reset();
        } else if rising {
            self.rising_edge();
        }
    }
}

impl DebugSurface for Rv32Core {
    fn read_reg(&self, idx: usize) -> u32 {
        self.regs[idx % NUM_REGS]
    }

    fn write_reg(&mut self, idx: usize, value: u32) {
        self.regs[idx % NUM_REGS] = value;
    }

    fn pc(&self) -> u32 {
        self.pc
    }
}

/// Rejects jump and branch targets that are not instruction aligned.
const fn checked_target(target: u32) -> Result<u32, u64> {
    if target % INSTRUCTION_SIZE == 0 {
        Ok(target)
    } else {
        Err(FAULT_MISALIGNED_TARGET)
    }
}

/// Selects the addressed lanes of a loaded word and extends them to 32 bits.
const fn extract_load(word: u32, funct3: u32, offset: u32) -> u32 {
    let shifted = word >> (offset * LANE_BITS);
    match funct3 {
        f3::LB => sign_extend(shifted & 0xff, 8),
        f3::LBU => shifted & 0xff,
        f3::LH => sign_extend(shifted & 0xffff, 16),
        f3::LHU => shifted & 0xffff,
        _ => word,
    }
}
