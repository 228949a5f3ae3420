//! Run statistics collection and reporting.
//!
//! This module tracks what a harness run did. It provides:
//! 1. **Clocking:** Clock steps, circuit evaluations, and trace samples.
//! 2. **Checking:** Assertions evaluated and scenarios passed.
//! 3. **Timing:** Host wall-clock time and derived step rate.

use std::time::Instant;

/// Counters accumulated by a session over one run.
#[derive(Clone, Debug)]
pub struct RunStats {
    start_time: Instant,
    /// Clock steps taken (`eval` calls).
    pub steps: u64,
    /// Circuit evaluations performed (two per step).
    pub evaluations: u64,
    /// Trace samples recorded.
    pub trace_samples: u64,
    /// Stimulus operations applied by drains.
    pub stimulus_ops: u64,
    /// Assertions evaluated, passing or not.
    pub assertions: u64,
    /// Scenarios that ran to completion.
    pub scenarios_passed: u64,
}

impl Default for RunStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            evaluations: 0,
            trace_samples: 0,
            stimulus_ops: 0,
            assertions: 0,
            scenarios_passed: 0,
        }
    }
}

impl RunStats {
    /// Host seconds elapsed since the counters were created.
    pub fn host_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Renders the statistics block.
    pub fn render(&self) -> String {
        let seconds = self.host_seconds();
        let rate = if seconds > 0.0 {
            self.steps as f64 / seconds / 1000.0
        } else {
            0.0
        };

        let mut out = String::new();
        out.push_str("==========================================================\n");
        out.push_str("HARNESS RUN STATISTICS\n");
        out.push_str("==========================================================\n");
        out.push_str(&format!("host_seconds             {seconds:.4} s\n"));
        out.push_str(&format!("sim_steps                {}\n", self.steps));
        out.push_str(&format!("sim_step_rate            {rate:.2} kHz\n"));
        out.push_str(&format!("sim_evals                {}\n", self.evaluations));
        out.push_str(&format!("trace_samples            {}\n", self.trace_samples));
        out.push_str("----------------------------------------------------------\n");
        out.push_str("CHECKING\n");
        out.push_str(&format!("  stimulus_ops           {}\n", self.stimulus_ops));
        out.push_str(&format!("  assertions             {}\n", self.assertions));
        out.push_str(&format!("  scenarios_passed       {}\n", self.scenarios_passed));
        out.push_str("==========================================================");
        out
    }

    /// Adds the counters of a later run; the start time stays this run's.
    pub const fn absorb(&mut self, later: &Self) {
        self.steps += later.steps;
        self.evaluations += later.evaluations;
        self.trace_samples += later.trace_samples;
        self.stimulus_ops += later.stimulus_ops;
        self.assertions += later.assertions;
        self.scenarios_passed += later.scenarios_passed;
    }

    /// Prints the statistics block to stdout.
    pub fn print(&self) {
        println!("\n{}", self.render());
    }
}
