//! Instruction execution shapes.
//!
//! Every instruction a core executes takes one of three timing shapes on its memory bus:
//! 1. **Plain:** Retires on the first clock step with the bus idle.
//! 2. **Read-stalled:** Raises `halt` with a read address on the first step, takes the data
//!    the harness supplies on the second.
//! 3. **Write-stalled:** Raises `halt` with address, data, strobe, and write enable on the
//!    first step, drops them on the second.
//!
//! Each shape queues the instruction word on the data-out port, steps the clock, and checks
//! the bus handshake. The register and PC effects are checked by the caller.

use tracing::debug;

use crate::circuit::Circuit;
use crate::common::bits::lanes_match;
use crate::common::constants::FAULT_NONE;
use crate::common::error::HarnessResult;
use crate::signal::Port;
use crate::sim::Session;
use crate::{tb_assert, tb_assert_eq};

/// Memory side effect an instruction is expected to have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Shape {
    /// No memory access.
    #[default]
    Plain,
    /// Reads the word at byte address `addr`; the harness answers with `data`.
    Read {
        /// Expected byte address on the bus.
        addr: u32,
        /// Word supplied on the data-out port during the stall.
        data: u32,
    },
    /// Writes `data` to byte address `addr` under `strobe`.
    Write {
        /// Expected byte address on the bus.
        addr: u32,
        /// Expected byte-lane strobe.
        strobe: u8,
        /// Expected data; lanes outside `strobe` are not checked.
        data: u32,
    },
}

/// Runs `insn` with the given shape.
pub fn run_shape<C: Circuit>(session: &mut Session<C>, insn: u32, shape: Shape) -> HarnessResult<()> {
    match shape {
        Shape::Plain => run_op(session, insn),
        Shape::Read { addr, data } => run_op_w_read(session, insn, addr, data),
        Shape::Write { addr, strobe, data } => run_op_w_write(session, insn, addr, strobe, data),
    }
}

/// Asserts reset for one step, then queues its release for the next.
pub fn run_reset<C: Circuit>(session: &mut Session<C>) -> HarnessResult<()> {
    debug!(time = session.time(), "reset");
    session.drive(Port::ResetN, 0);
    session.eval()?;
    session.drive(Port::ResetN, 1);
    Ok(())
}

/// Executes a single-cycle instruction.
pub fn run_op<C: Circuit>(session: &mut Session<C>, insn: u32) -> HarnessResult<()> {
    session.drive(Port::DataOut, u64::from(insn));
    session.eval()?;
    expect_idle(session)
}

/// Executes a load: one stalled step presenting `addr`, then one step consuming `data`.
pub fn run_op_w_read<C: Circuit>(
    session: &mut Session<C>,
    insn: u32,
    addr: u32,
    data: u32,
) -> HarnessResult<()> {
    session.drive(Port::DataOut, u64::from(insn));
    session.eval()?;
    tb_assert!(session, session.is_high(Port::Halt));
    tb_assert!(session, !session.is_high(Port::WrEn));
    tb_assert_eq!(session, bus_address(session), addr);
    tb_assert_eq!(session, session.peek(Port::Fault), FAULT_NONE);

    session.drive(Port::DataOut, u64::from(data));
    session.eval()?;
    expect_idle(session)
}

/// Executes a store: one stalled step presenting the write, then one step releasing it.
pub fn run_op_w_write<C: Circuit>(
    session: &mut Session<C>,
    insn: u32,
    addr: u32,
    strobe: u8,
    data: u32,
) -> HarnessResult<()> {
    session.drive(Port::DataOut, u64::from(insn));
    session.eval()?;
    tb_assert!(session, session.is_high(Port::Halt));
    tb_assert!(session, session.is_high(Port::WrEn));
    tb_assert_eq!(session, session.peek(Port::WrStrobe), u64::from(strobe));
    let written = session.peek(Port::DataIn) as u32;
    tb_assert!(
        session,
        lanes_match(written, data, strobe),
        "write data {written:#010x} differs from {data:#010x} under strobe {strobe:#x}"
    );
    tb_assert_eq!(session, bus_address(session), addr);
    tb_assert_eq!(session, session.peek(Port::Fault), FAULT_NONE);

    session.eval()?;
    expect_idle(session)
}

/// Checks that the bus is released and no fault is pending.
fn expect_idle<C: Circuit>(session: &mut Session<C>) -> HarnessResult<()> {
    tb_assert!(session, !session.is_high(Port::Halt));
    tb_assert!(session, !session.is_high(Port::WrEn));
    tb_assert_eq!(session, session.peek(Port::Fault), FAULT_NONE);
    Ok(())
}

/// Byte address currently on the address port.
fn bus_address<C: Circuit>(session: &Session<C>) -> u32 {
    session.schema().byte_address(session.peek(Port::Addr))
}
