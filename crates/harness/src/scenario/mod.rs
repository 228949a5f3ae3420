//! Scenario runner.
//!
//! A scenario is a named check run against a fresh reset of the circuit. Most instruction
//! scenarios are plain data: an ordered list of [`Step`]s, each an instruction word, its
//! execution [`Shape`], register presets applied before it, and the [`Delta`]s it must leave
//! behind. The runner carries one expected
//! [`RegisterSnapshot`](crate::sim::RegisterSnapshot) through the whole list, so
//! every step checks the full register file, not only the registers it names.
//!
//! Checks that are not expressible as deltas (counter monotonicity, RAM port sequences,
//! whole-program runs) are written as custom bodies.

/// Instruction execution shapes.
pub mod shapes;

/// Bundled scenario suites.
pub mod suites;

use std::fmt;

use tracing::info;

use crate::circuit::{Circuit, DebugSurface};
use crate::common::error::HarnessResult;
use crate::sim::{Session, oracle};
use crate::tb_assert_eq;

pub use shapes::{Shape, run_op, run_op_w_read, run_op_w_write, run_reset, run_shape};
pub use suites::Suite;

/// Expected effect of a step on architectural state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delta {
    /// Register `idx` holds `value`.
    Reg(usize, u32),
    /// Register `idx` holds the PC the step started at, plus `offset`.
    RegFromPc(usize, i32),
    /// The PC moved by `offset` from where the step started.
    PcOffset(i32),
    /// The PC holds `target`.
    PcIs(u32),
}

/// One instruction of a scenario.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    /// Instruction word.
    pub insn: u32,
    /// Memory handshake the instruction performs.
    pub shape: Shape,
    /// Register values forced into the core before the step.
    pub presets: Vec<(usize, u32)>,
    /// State the step must leave behind.
    pub deltas: Vec<Delta>,
}

impl Step {
    /// A plain single-cycle step with no presets or deltas.
    pub const fn op(insn: u32) -> Self {
        Self {
            insn,
            shape: Shape::Plain,
            presets: Vec::new(),
            deltas: Vec::new(),
        }
    }

    /// A load that reads `data` from byte address `addr`.
    pub fn read(insn: u32, addr: u32, data: u32) -> Self {
        Self {
            shape: Shape::Read { addr, data },
            ..Self::op(insn)
        }
    }

    /// A store of `data` to byte address `addr` under `strobe`.
    pub fn write(insn: u32, addr: u32, strobe: u8, data: u32) -> Self {
        Self {
            shape: Shape::Write { addr, strobe, data },
            ..Self::op(insn)
        }
    }

    /// Forces register `idx` to `value` before the step.
    #[must_use]
    pub fn preset(mut self, idx: usize, value: u32) -> Self {
        self.presets.push((idx, value));
        self
    }

    /// Expects register `idx` to hold `value` afterwards.
    #[must_use]
    pub fn expect(mut self, idx: usize, value: u32) -> Self {
        self.deltas.push(Delta::Reg(idx, value));
        self
    }

    /// Expects register `idx` to hold the starting PC plus `offset` afterwards.
    #[must_use]
    pub fn expect_link(mut self, idx: usize, offset: i32) -> Self {
        self.deltas.push(Delta::RegFromPc(idx, offset));
        self
    }

    /// Expects the PC to have moved by `offset`.
    #[must_use]
    pub fn expect_pc_offset(mut self, offset: i32) -> Self {
        self.deltas.push(Delta::PcOffset(offset));
        self
    }

    /// Expects the PC to be `target`.
    #[must_use]
    pub fn expect_pc(mut self, target: u32) -> Self {
        self.deltas.push(Delta::PcIs(target));
        self
    }
}

type Body<C> = Box<dyn Fn(&mut Session<C>) -> HarnessResult<()>>;

/// A named check against circuit type `C`.
pub struct Scenario<C: Circuit> {
    name: &'static str,
    steps: usize,
    body: Body<C>,
}

impl<C: Circuit> Scenario<C> {
    /// Wraps an arbitrary body.
    pub fn custom(
        name: &'static str,
        body: impl Fn(&mut Session<C>) -> HarnessResult<()> + 'static,
    ) -> Self {
        Self {
            name,
            steps: 0,
            body: Box::new(body),
        }
    }

    /// Scenario name, as used by `--only`.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of instruction steps (zero for custom bodies).
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Runs the scenario once.
    pub fn run(&self, session: &mut Session<C>) -> HarnessResult<()> {
        (self.body)(session)
    }
}

impl<C: Circuit + DebugSurface> Scenario<C> {
    /// Builds a scenario that resets the core and runs `steps` in order.
    pub fn from_steps(name: &'static str, steps: Vec<Step>) -> Self {
        let count = steps.len();
        Self {
            name,
            steps: count,
            body: Box::new(move |session: &mut Session<C>| {
                run_reset(session)?;
                run_steps(session, &steps)
            }),
        }
    }
}

impl<C: Circuit> fmt::Debug for Scenario<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

/// Runs `steps` from the current state, checking every register and the PC after each.
///
/// The expected snapshot starts from the core's current registers. Presets are folded into
/// it and forced into the core, then the step's deltas are folded in and the whole file is
/// compared.
pub fn run_steps<C: Circuit + DebugSurface>(
    session: &mut Session<C>,
    steps: &[Step],
) -> HarnessResult<()> {
    let mut expected = oracle::grab(session);
    for step in steps {
        for &(idx, value) in &step.presets {
            expected.set(idx, value);
        }
        oracle::force_set(session, &expected);

        let start_pc = oracle::pc(session);
        run_shape(session, step.insn, step.shape)?;

        let mut target_pc = None;
        for delta in &step.deltas {
            match *delta {
                Delta::Reg(idx, value) => expected.set(idx, value),
                Delta::RegFromPc(idx, offset) => {
                    expected.set(idx, start_pc.wrapping_add_signed(offset));
                }
                Delta::PcOffset(offset) => target_pc = Some(start_pc.wrapping_add_signed(offset)),
                Delta::PcIs(target) => target_pc = Some(target),
            }
        }
        oracle::check_regs(session, &expected)?;
        if let Some(target) = target_pc {
            tb_assert_eq!(session, oracle::pc(session), target);
        }
    }
    Ok(())
}

/// Runs each scenario in order, stopping at the first failure.
pub fn run_all<C: Circuit>(session: &mut Session<C>, scenarios: &[Scenario<C>]) -> HarnessResult<()> {
    for scenario in scenarios {
        scenario.run(session)?;
        session.record_scenario();
        info!("{} tests passed!", scenario.name());
    }
    Ok(())
}

/// Keeps only the scenario named `name`.
pub fn select<C: Circuit>(scenarios: Vec<Scenario<C>>, name: &str) -> Option<Vec<Scenario<C>>> {
    let picked: Vec<_> = scenarios.into_iter().filter(|s| s.name == name).collect();
    if picked.is_empty() { None } else { Some(picked) }
}
