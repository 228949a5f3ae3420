//! Whole-program check for a core sharing a dual-port RAM.
//!
//! A program is streamed into memory through the external port while the core is held in
//! reset. Once released, the core loops forever: it loads two operand words, adds them, and
//! stores the sum. The harness writes operands through the external port and reads the sum
//! back a few steps later.

use tracing::debug;

use crate::circuit::Circuit;
use crate::common::constants::{
    FAULT_NONE, FULL_STROBE, SYSTEM_OPERAND_A, SYSTEM_OPERAND_B, SYSTEM_RESULT,
};
use crate::common::error::HarnessResult;
use crate::isa::encode::{add, jal, lui, lw, sw};
use crate::scenario::Scenario;
use crate::signal::Port;
use crate::sim::{MemoryImage, Session, load_into};
use crate::tb_assert_eq;

/// Steps after reset release before the first operands are written.
const BOOT_STEPS: usize = 20;

/// Steps allowed for one trip around the program loop to pick up new operands.
///
/// The loop takes eight steps; an operand written just after it was loaded needs most of a
/// second trip.
const SETTLE_STEPS: usize = 12;

/// Operand pairs checked in order.
const OPERANDS: [(u32, u32); 2] = [(0x2, 0x3), (0x20, 0x31)];

/// The bundled adder program, laid out from address 0.
pub fn adder_program() -> MemoryImage {
    MemoryImage::from_program(
        0,
        &[
            lui(1, SYSTEM_OPERAND_A),
            lw(2, 1, 0),
            lw(3, 1, (SYSTEM_OPERAND_B - SYSTEM_OPERAND_A) as i32),
            add(4, 2, 3),
            sw(4, 1, (SYSTEM_RESULT - SYSTEM_OPERAND_A) as i32),
            jal(0, -16),
        ],
    )
}

/// The system scenarios; `image` replaces the bundled program when given.
pub fn scenarios<C: Circuit>(image: Option<MemoryImage>) -> Vec<Scenario<C>> {
    let image = image.unwrap_or_else(adder_program);
    vec![Scenario::custom("adder", move |session: &mut Session<C>| {
        adder(session, &image)
    })]
}

/// Writes one word through the external port.
fn write_word<C: Circuit>(session: &mut Session<C>, byte_addr: u32, data: u32) -> HarnessResult<()> {
    let addr = session.schema().word_address(byte_addr);
    session.drive(Port::WrEn, 1);
    session.drive(Port::WrStrobe, FULL_STROBE);
    session.drive(Port::Addr, addr);
    session.drive(Port::DataIn, u64::from(data));
    session.eval()
}

/// Reads one word through the external port.
fn read_word<C: Circuit>(session: &mut Session<C>, byte_addr: u32) -> HarnessResult<u32> {
    let addr = session.schema().word_address(byte_addr);
    session.drive(Port::WrEn, 0);
    session.drive(Port::Addr, addr);
    session.eval()?;
    Ok(session.peek(Port::DataOut) as u32)
}

fn adder<C: Circuit>(session: &mut Session<C>, image: &MemoryImage) -> HarnessResult<()> {
    load_into(session, image)?;
    session.drive(Port::ResetN, 1);
    session.eval_n(BOOT_STEPS)?;

    for (a, b) in OPERANDS {
        debug!(a, b, "writing operands");
        write_word(session, SYSTEM_OPERAND_A, a)?;
        write_word(session, SYSTEM_OPERAND_B, b)?;
        session.drive(Port::WrEn, 0);
        session.eval_n(SETTLE_STEPS)?;

        let sum = read_word(session, SYSTEM_RESULT)?;
        tb_assert_eq!(session, sum, a.wrapping_add(b));
    }
    tb_assert_eq!(session, session.peek(Port::Fault), FAULT_NONE);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_addresses_fit_the_immediates() {
        let image = adder_program();
        assert_eq!(image.len(), 6);
        assert_eq!(image.words()[0].value, 0x0001_f0b7);
        assert_eq!(image.words()[5].addr, 0x14);
    }
}
