//! Failure reporting and the top-level run loop.
//!
//! Checks are written with [`tb_assert!`](crate::tb_assert) and
//! [`tb_assert_eq!`](crate::tb_assert_eq). A failed check becomes
//! `HarnessError::AssertionFailed` carrying the predicate text and its source location, and
//! is propagated with `?`. [`run`] is the only place that interprets a failure: it stops the
//! run at the first error and then always tears down.

use std::io::Write;

use tracing::{debug, error, info};

use super::session::Session;
use crate::circuit::Circuit;
use crate::common::error::{HarnessError, HarnessResult};
use crate::config::GeneralConfig;
use crate::stats::RunStats;

/// Checks a predicate inside a function returning `HarnessResult`.
///
/// Counts the assertion on the session and returns `AssertionFailed` with the predicate text,
/// `file!()` and `line!()` when it does not hold. Extra arguments are logged as the failure
/// detail.
#[macro_export]
macro_rules! tb_assert {
    ($session:expr, $cond:expr $(,)?) => {{
        $session.record_assertion();
        if !($cond) {
            return ::core::result::Result::Err($crate::common::error::HarnessError::assertion(
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!(),
            ));
        }
    }};
    ($session:expr, $cond:expr, $($detail:tt)+) => {{
        $session.record_assertion();
        if !($cond) {
            $crate::__private::tracing::error!($($detail)+);
            return ::core::result::Result::Err($crate::common::error::HarnessError::assertion(
                ::core::stringify!($cond),
                ::core::file!(),
                ::core::line!(),
            ));
        }
    }};
}

/// Checks that two values are equal, logging both (in hex) on failure.
#[macro_export]
macro_rules! tb_assert_eq {
    ($session:expr, $left:expr, $right:expr $(,)?) => {{
        $session.record_assertion();
        let (left, right) = (&$left, &$right);
        if *left != *right {
            $crate::__private::tracing::error!(
                "{} = {:#x}, expected {:#x}",
                ::core::stringify!($left),
                left,
                right
            );
            return ::core::result::Result::Err($crate::common::error::HarnessError::assertion(
                ::core::concat!(::core::stringify!($left), " == ", ::core::stringify!($right)),
                ::core::file!(),
                ::core::line!(),
            ));
        }
    }};
}

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Result of a complete run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The first error, if the run failed.
    pub error: Option<HarnessError>,
    /// Counters at teardown.
    pub stats: RunStats,
}

impl RunOutcome {
    /// Returns `true` when every check passed.
    pub const fn passed(&self) -> bool {
        self.error.is_none()
    }

    /// Process exit status: 0 on pass, 1 on failure.
    pub const fn exit_code(&self) -> i32 {
        if self.passed() { 0 } else { 1 }
    }

    /// Pass/fail banner text, optionally colored.
    pub fn banner(&self, color: bool) -> String {
        let (paint, text) = match &self.error {
            None => (GREEN, "Simulation Successful!".to_string()),
            Some(err) => (RED, err.to_string()),
        };
        if color {
            format!("{paint}{text}{RESET}")
        } else {
            text
        }
    }
}

/// Runs `body` against `session`, stopping at the first error, then tears down.
///
/// Teardown always happens, pass or fail:
/// 1. One final settle step, so the last checked values appear in the waveform. Its own
///    errors are ignored.
/// 2. The trace is flushed and closed exactly once.
/// 3. The circuit is released.
///
/// The returned outcome holds the first error; a trace close failure is reported only when
/// the body itself passed.
pub fn run<C, F>(mut session: Session<C>, config: &GeneralConfig, body: F) -> RunOutcome
where
    C: Circuit,
    F: FnOnce(&mut Session<C>) -> HarnessResult<()>,
{
    let result = body(&mut session);

    if config.final_settle {
        if let Err(err) = session.eval() {
            debug!("final settle step failed: {err}");
        }
    }
    let closed = session.close();
    let stats = session.stats().clone();
    drop(session);

    let error = match (result, closed) {
        (Err(err), _) | (Ok(()), Err(err)) => Some(err),
        (Ok(()), Ok(())) => None,
    };
    match &error {
        None => info!(scenarios = stats.scenarios_passed, "run passed"),
        Some(err) => error!("run failed: {err}"),
    }
    RunOutcome { error, stats }
}

/// Prints the banner (stdout on pass, stderr on failure) and the statistics block.
pub fn print_outcome(outcome: &RunOutcome, color: bool) {
    let banner = outcome.banner(color);
    if outcome.passed() {
        println!("{banner}");
    } else {
        eprintln!("{banner}");
    }
    outcome.stats.print();
    let _ = std::io::stdout().flush();
}
