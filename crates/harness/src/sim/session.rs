//! Harness session and clock stepper.
//!
//! A `Session` is the single owner of everything a run touches: the circuit, the deferred
//! stimulus queue, the trace sink, virtual time, and run statistics. Every harness operation
//! takes `&mut Session`, so stimulus application, clocking, and observation never overlap.
//!
//! One [`Session::eval`] is one clock step:
//! 1. Drain the stimulus queue into the circuit.
//! 2. Drive the first clock level of the schema's order, advance time, evaluate, sample.
//! 3. Drive the second clock level, advance time, evaluate, sample.

use tracing::{debug, trace};

use super::stimulus::StimulusQueue;
use super::trace::{NullTrace, TraceSink, VcdTrace};
use crate::circuit::Circuit;
use crate::common::error::HarnessResult;
use crate::config::GeneralConfig;
use crate::signal::{Port, PortSchema};
use crate::stats::RunStats;

/// Owner of one circuit under test for the duration of a run.
pub struct Session<C: Circuit> {
    circuit: C,
    queue: StimulusQueue<C>,
    trace: Box<dyn TraceSink>,
    time: u64,
    stats: RunStats,
    closed: bool,
}

impl<C: Circuit> Session<C> {
    /// Wraps `circuit` with the given trace sink. Virtual time starts at zero.
    pub fn new(circuit: C, trace: Box<dyn TraceSink>) -> Self {
        Self {
            circuit,
            queue: StimulusQueue::new(),
            trace,
            time: 0,
            stats: RunStats::default(),
            closed: false,
        }
    }

    /// Wraps `circuit` without waveform output.
    pub fn untraced(circuit: C) -> Self {
        Self::new(circuit, Box::new(NullTrace))
    }

    /// Wraps `circuit`, opening the waveform file when `config` enables tracing.
    pub fn from_config(circuit: C, config: &GeneralConfig) -> HarnessResult<Self> {
        let trace: Box<dyn TraceSink> = if config.trace {
            Box::new(VcdTrace::create(&config.trace_path, circuit.schema())?)
        } else {
            Box::new(NullTrace)
        };
        Ok(Self::new(circuit, trace))
    }

    /// Advances the circuit by one full clock step.
    pub fn eval(&mut self) -> HarnessResult<()> {
        let applied = self.queue.drain(&mut self.circuit);
        self.stats.stimulus_ops += applied as u64;

        let phases = self.circuit.schema().clock_order.phases();
        for level in phases {
            self.circuit.poke(Port::Clk, level);
            self.time += 1;
            self.circuit.eval();
            self.stats.evaluations += 1;
            if !self.closed {
                self.trace.sample(self.time, self.circuit.ports())?;
                self.stats.trace_samples += 1;
            }
        }

        self.stats.steps += 1;
        trace!(time = self.time, applied, "step");
        Ok(())
    }

    /// Advances the circuit by `steps` clock steps.
    pub fn eval_n(&mut self, steps: usize) -> HarnessResult<()> {
        for _ in 0..steps {
            self.eval()?;
        }
        Ok(())
    }

    /// Queues an arbitrary operation for the next step.
    pub fn push(&mut self, op: impl FnOnce(&mut C) + 'static) {
        self.queue.push(op);
    }

    /// Queues a write of `value` to `port` for the next step.
    pub fn drive(&mut self, port: Port, value: u64) {
        self.queue.drive(port, value);
    }

    /// Reads the current value of `port`.
    pub fn peek(&self, port: Port) -> u64 {
        self.circuit.peek(port)
    }

    /// Returns `true` when `port` is non-zero.
    pub fn is_high(&self, port: Port) -> bool {
        self.peek(port) != 0
    }

    /// The circuit under test.
    pub const fn circuit(&self) -> &C {
        &self.circuit
    }

    /// Port schema of the circuit under test.
    pub fn schema(&self) -> &PortSchema {
        self.circuit.schema()
    }

    /// Current virtual time in half-step ticks.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Number of queued stimulus operations.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Run statistics so far.
    pub const fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Counts one evaluated assertion.
    pub fn record_assertion(&mut self) {
        self.stats.assertions += 1;
    }

    /// Counts one completed scenario.
    pub fn record_scenario(&mut self) {
        self.stats.scenarios_passed += 1;
    }

    /// Flushes and closes the trace. Later calls do nothing.
    pub fn close(&mut self) -> HarnessResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!(time = self.time, "closing trace");
        self.trace.close()
    }

    /// Returns `true` once the trace has been closed.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Closes the trace and releases the circuit, returning the final statistics.
    pub fn finish(mut self) -> HarnessResult<RunStats> {
        self.close()?;
        Ok(self.stats.clone())
    }
}

impl<C: Circuit> Drop for Session<C> {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.trace.close();
        }
    }
}

impl<C: Circuit + std::fmt::Debug> std::fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("circuit", &self.circuit)
            .field("queue", &self.queue)
            .field("time", &self.time)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Ram, Rv32Core};

    #[test]
    fn each_step_is_two_ticks() {
        let mut session = Session::untraced(Ram::default());
        session.eval_n(3).unwrap();
        assert_eq!(session.time(), 6);
        assert_eq!(session.stats().evaluations, 6);
        assert_eq!(session.stats().trace_samples, 6);
    }

    #[test]
    fn clock_ends_on_the_second_phase_level() {
        let mut core = Session::untraced(Rv32Core::default());
        core.eval().unwrap();
        assert_eq!(core.peek(Port::Clk), 1);

        let mut ram = Session::untraced(Ram::default());
        ram.eval().unwrap();
        assert_eq!(ram.peek(Port::Clk), 0);
    }

    #[test]
    fn stimulus_waits_for_the_next_step() {
        let mut session = Session::untraced(Ram::default());
        session.drive(Port::Addr, 9);
        assert_eq!(session.peek(Port::Addr), 0);
        assert_eq!(session.pending(), 1);
        session.eval().unwrap();
        assert_eq!(session.peek(Port::Addr), 9);
        assert_eq!(session.pending(), 0);
    }
}
