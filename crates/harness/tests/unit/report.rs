//! # Run Loop Tests
//!
//! Exit codes, the final settle step, and trace teardown on pass and on failure.

use std::io;

use rv32tb_core::circuit::Ram;
use rv32tb_core::isa::encode;
use rv32tb_core::scenario::{Scenario, Step, run_all};
use rv32tb_core::signal::Port;
use rv32tb_core::sim::{self, RunOutcome};
use rv32tb_core::{HarnessError, HarnessResult, Session, tb_assert_eq};

use crate::common::harness::{core_session, quiet_general};
use crate::common::mocks::trace::{MockTrace, closed_once};

fn expect_data_out_one(session: &mut Session<Ram>) -> HarnessResult<()> {
    session.eval()?;
    tb_assert_eq!(session, session.peek(Port::DataOut), 1u64);
    Ok(())
}

#[test]
fn failing_body_still_closes_the_trace_once() {
    let session = Session::new(Ram::default(), Box::new(closed_once()));
    let outcome = sim::run(session, &quiet_general(), expect_data_out_one);

    assert_eq!(outcome.exit_code(), 1);
    assert!(outcome.error.as_ref().is_some_and(HarnessError::is_assertion));
    // Body step plus the final settle step.
    assert_eq!(outcome.stats.steps, 2);
    assert_eq!(outcome.stats.assertions, 1);
}

#[test]
fn final_settle_can_be_disabled() {
    let mut general = quiet_general();
    general.final_settle = false;
    let session = Session::new(Ram::default(), Box::new(closed_once()));
    let outcome = sim::run(session, &general, |s| s.eval_n(4));
    assert!(outcome.passed());
    assert_eq!(outcome.stats.steps, 4);
}

#[test]
fn close_failure_fails_a_passing_run() {
    let mut trace = MockTrace::new();
    let _ = trace.expect_sample().returning(|_, _| Ok(()));
    let _ = trace
        .expect_close()
        .times(1)
        .returning(|| Err(io::Error::other("disk full").into()));

    let session = Session::new(Ram::default(), Box::new(trace));
    let outcome = sim::run(session, &quiet_general(), |s| s.eval());
    assert_eq!(outcome.exit_code(), 1);
    assert!(matches!(outcome.error, Some(HarnessError::Io(_))));
}

#[test]
fn body_error_wins_over_close_error() {
    let mut trace = MockTrace::new();
    let _ = trace.expect_sample().returning(|_, _| Ok(()));
    let _ = trace
        .expect_close()
        .times(1)
        .returning(|| Err(io::Error::other("disk full").into()));

    let session = Session::new(Ram::default(), Box::new(trace));
    let outcome = sim::run(session, &quiet_general(), expect_data_out_one);
    assert!(outcome.error.as_ref().is_some_and(HarnessError::is_assertion));
}

#[test]
fn sample_failure_stops_the_body() {
    let mut trace = MockTrace::new();
    let _ = trace
        .expect_sample()
        .returning(|_, _| Err(io::Error::other("broken pipe").into()));
    let _ = trace.expect_close().times(1).returning(|| Ok(()));

    let session = Session::new(Ram::default(), Box::new(trace));
    let outcome = sim::run(session, &quiet_general(), |s| s.eval_n(10));
    assert!(matches!(outcome.error, Some(HarnessError::Io(_))));
    assert_eq!(outcome.stats.steps, 0);
}

#[test]
fn first_failing_scenario_stops_the_run() {
    let scenarios = vec![
        Scenario::from_steps("good", vec![Step::op(encode::addi(1, 0, 1)).expect(1, 1)]),
        Scenario::from_steps("bad", vec![Step::op(encode::addi(1, 0, 2)).expect(1, 3)]),
        Scenario::from_steps("never", vec![Step::op(encode::nop())]),
    ];
    let outcome: RunOutcome =
        sim::run(core_session(), &quiet_general(), |s| run_all(s, &scenarios));
    assert_eq!(outcome.exit_code(), 1);
    assert_eq!(outcome.stats.scenarios_passed, 1);
}

#[test]
fn banner_reports_the_failed_expression() {
    let outcome = sim::run(
        Session::untraced(Ram::default()),
        &quiet_general(),
        expect_data_out_one,
    );
    let banner = outcome.banner(false);
    assert!(banner.starts_with("Assertion failed (session.peek(Port::DataOut) == 1u64) at "));
    assert!(banner.contains("report.rs:"));
    assert!(outcome.banner(true).starts_with("\x1b[31m"));
}
