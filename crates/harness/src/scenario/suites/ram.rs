//! Port checks for a single-port RAM block.
//!
//! The RAM registers its inputs on the rising edge, which a `HighFirst` schema places at the
//! start of each step, and reads before it writes: a write step returns the word the address
//! held before the write.

use crate::circuit::Circuit;
use crate::common::constants::FULL_STROBE;
use crate::common::error::HarnessResult;
use crate::scenario::Scenario;
use crate::signal::Port;
use crate::sim::Session;
use crate::tb_assert_eq;

/// Every RAM scenario, in run order.
pub fn scenarios<C: Circuit>() -> Vec<Scenario<C>> {
    vec![
        Scenario::custom("read_first", read_first::<C>),
        Scenario::custom("byte_lanes", byte_lanes::<C>),
    ]
}

/// Writes `data` to word `addr` in one step, then drops write enable in the next.
fn write_word<C: Circuit>(session: &mut Session<C>, addr: u64, data: u32) -> HarnessResult<()> {
    session.drive(Port::DataIn, u64::from(data));
    session.drive(Port::Addr, addr);
    session.drive(Port::WrEn, 1);
    session.eval()?;
    session.drive(Port::WrEn, 0);
    session.eval()
}

fn read_first<C: Circuit>(session: &mut Session<C>) -> HarnessResult<()> {
    session.drive(Port::WrEn, 0);
    session.drive(Port::DataIn, 0xab_cdef);
    session.drive(Port::Addr, 0x100);
    session.drive(Port::WrStrobe, FULL_STROBE);
    session.eval()?;
    session.drive(Port::WrEn, 1);
    session.eval()?;
    session.drive(Port::WrEn, 0);
    session.eval()?;

    write_word(session, 0x101, 0x123_4567)?;

    // Overwrites return the previous contents on the same edge.
    session.drive(Port::DataIn, 0x123_4567);
    session.drive(Port::Addr, 0x100);
    session.drive(Port::WrEn, 1);
    session.eval()?;
    tb_assert_eq!(session, session.peek(Port::DataOut), 0xab_cdef);
    session.drive(Port::WrEn, 0);
    session.eval()?;

    session.drive(Port::DataIn, 0xba_ddad);
    session.drive(Port::Addr, 0x101);
    session.drive(Port::WrEn, 1);
    session.eval()?;
    tb_assert_eq!(session, session.peek(Port::DataOut), 0x123_4567);
    session.drive(Port::WrEn, 0);
    session.eval()?;

    // Reads alone do not modify memory.
    session.drive(Port::Addr, 0x100);
    session.eval()?;
    tb_assert_eq!(session, session.peek(Port::DataOut), 0x123_4567);
    Ok(())
}

fn byte_lanes<C: Circuit>(session: &mut Session<C>) -> HarnessResult<()> {
    session.drive(Port::WrStrobe, FULL_STROBE);
    write_word(session, 0x200, 0x1122_3344)?;

    session.drive(Port::WrStrobe, 0b0101);
    write_word(session, 0x200, 0xaabb_ccdd)?;
    session.drive(Port::WrStrobe, 0b1000);
    write_word(session, 0x200, 0xee00_0000)?;

    session.drive(Port::WrStrobe, FULL_STROBE);
    session.drive(Port::Addr, 0x200);
    session.eval()?;
    tb_assert_eq!(session, session.peek(Port::DataOut), 0xeebb_33dd);
    Ok(())
}
