//! # Session Tests
//!
//! Clock phase order per schema, stimulus timing relative to the edge, and the samples a
//! trace sink receives.

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use rv32tb_core::Session;
use rv32tb_core::circuit::{Circuit, DebugSurface, Ram, Rv32Core};
use rv32tb_core::signal::Port;
use rv32tb_core::sim::VcdTrace;

use crate::common::harness::{core_session, quiet_general, ram_session};
use crate::common::mocks::trace::{MockTrace, closed_once};

#[test]
fn high_first_commits_a_write_within_the_step() {
    let mut session = ram_session();
    session.drive(Port::Addr, 0x40);
    session.drive(Port::DataIn, 0xcafe_f00d);
    session.drive(Port::WrEn, 1);
    session.eval().unwrap();
    assert_eq!(session.circuit().memory().read(0x40), 0xcafe_f00d);
}

#[test]
fn low_first_executes_at_the_end_of_the_step() {
    let mut session = core_session();
    session.drive(Port::ResetN, 1);
    session.drive(Port::DataOut, 0x0050_0093); // addi x1, x0, 5
    session.eval().unwrap();
    assert_eq!(session.circuit().pc(), 4);
    assert_eq!(session.peek(Port::Clk), 1);
}

#[test]
fn stimulus_queued_after_a_step_waits_for_the_next() {
    let mut session = core_session();
    session.drive(Port::ResetN, 1);
    session.drive(Port::DataOut, 0x0000_0013); // nop
    session.eval().unwrap();
    session.drive(Port::DataOut, 0x0050_0093);
    assert_eq!(session.circuit().pc(), 4);
    assert_eq!(session.circuit().read_reg(1), 0);
    session.eval().unwrap();
    assert_eq!(session.circuit().pc(), 8);
    assert_eq!(session.circuit().read_reg(1), 5);
}

#[test]
fn every_half_step_is_sampled_in_time_order() {
    let times = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&times);

    let mut trace = MockTrace::new();
    let _ = trace.expect_sample().times(6).returning(move |time, _| {
        seen.lock().unwrap().push(time);
        Ok(())
    });
    let _ = trace.expect_close().times(1).returning(|| Ok(()));

    let mut session = Session::new(Ram::default(), Box::new(trace));
    session.eval_n(3).unwrap();
    let stats = session.finish().unwrap();

    assert_eq!(*times.lock().unwrap(), [1, 2, 3, 4, 5, 6]);
    assert_eq!(stats.trace_samples, 6);
}

#[test]
fn close_is_idempotent() {
    let mut session = Session::new(Ram::default(), Box::new(closed_once()));
    session.eval().unwrap();
    session.close().unwrap();
    session.close().unwrap();
    assert!(session.is_closed());
}

#[test]
fn no_samples_after_close() {
    let mut trace = MockTrace::new();
    let _ = trace.expect_sample().times(2).returning(|_, _| Ok(()));
    let _ = trace.expect_close().times(1).returning(|| Ok(()));

    let mut session = Session::new(Rv32Core::default(), Box::new(trace));
    session.eval().unwrap();
    session.close().unwrap();
    session.eval().unwrap();
    assert_eq!(session.stats().steps, 2);
}

#[test]
fn configured_trace_writes_a_vcd_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.vcd");
    let mut general = quiet_general();
    general.trace = true;
    general.trace_path.clone_from(&path);

    let mut session = Session::from_config(Ram::default(), &general).unwrap();
    session.drive(Port::Addr, 3);
    session.eval_n(2).unwrap();
    let _ = session.finish().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("$timescale 1ns $end\n"));
    assert!(text.contains("$var wire 15 \" addr $end"));
    assert!(text.contains("#4\n"));
    assert!(!text.contains("#5\n"));
}

#[test]
fn unwritable_trace_path_fails_before_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let mut general = quiet_general();
    general.trace = true;
    general.trace_path = dir.path().join("missing").join("run.vcd");

    let err = Session::from_config(Ram::default(), &general).unwrap_err();
    assert!(!err.is_assertion());
}

#[test]
fn vcd_header_names_the_module() {
    let ram = Ram::default();
    let vcd = VcdTrace::new(Vec::new(), ram.schema()).unwrap();
    let text = String::from_utf8(vcd.get_ref().clone()).unwrap();
    assert!(text.contains("$scope module ram $end"));
    assert!(text.ends_with("$enddefinitions $end\n"));
}
