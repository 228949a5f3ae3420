//! # Suite Tests
//!
//! Every bundled suite passes on its reference circuit; scenario selection, replacement
//! images, and the per-run trace path behave as the command line expects.

use rv32tb_core::HarnessError;
use rv32tb_core::common::constants::SYSTEM_OPERAND_A;
use rv32tb_core::isa::encode::{add, addi, jal, lui, lw, sw};
use rv32tb_core::scenario::Suite;
use rv32tb_core::scenario::suites::RunOptions;
use rv32tb_core::scenario::suites::system::adder_program;
use rv32tb_core::sim::MemoryImage;

use crate::common::harness::{init_tracing, quiet_config};

#[test]
fn every_suite_passes_on_the_reference_circuits() {
    init_tracing();
    for suite in Suite::ALL {
        let outcome = suite.run(&quiet_config(), &RunOptions::default()).unwrap();
        assert!(outcome.passed(), "{suite}: {:?}", outcome.error);
        assert_eq!(
            outcome.stats.scenarios_passed,
            suite.scenario_names().len() as u64,
            "{suite}"
        );
    }
}

#[test]
fn only_runs_the_named_scenario() {
    init_tracing();
    let options = RunOptions {
        only: Some("bxx".to_string()),
        ..RunOptions::default()
    };
    let outcome = Suite::Instructions.run(&quiet_config(), &options).unwrap();
    assert!(outcome.passed());
    assert_eq!(outcome.stats.scenarios_passed, 1);
}

#[test]
fn unknown_scenario_is_rejected_before_running() {
    let options = RunOptions {
        only: Some("bxx".to_string()),
        ..RunOptions::default()
    };
    let err = Suite::Ram.run(&quiet_config(), &options).unwrap_err();
    assert!(matches!(err, HarnessError::UnknownSuite(name) if name == "bxx"));
}

#[test]
fn system_runs_an_image_loaded_from_disk() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("adder.dhex");
    std::fs::write(&path, adder_program().to_dhex()).unwrap();

    let options = RunOptions {
        image: Some(MemoryImage::load(&path).unwrap()),
        ..RunOptions::default()
    };
    let outcome = Suite::System.run(&quiet_config(), &options).unwrap();
    assert!(outcome.passed(), "{:?}", outcome.error);
}

#[test]
fn system_catches_a_wrong_program() {
    init_tracing();
    let off_by_one = MemoryImage::from_program(
        0,
        &[
            lui(1, SYSTEM_OPERAND_A),
            lw(2, 1, 0),
            lw(3, 1, 4),
            add(4, 2, 3),
            addi(4, 4, 1),
            sw(4, 1, 8),
            jal(0, -20),
        ],
    );
    let options = RunOptions {
        image: Some(off_by_one),
        ..RunOptions::default()
    };
    let outcome = Suite::System.run(&quiet_config(), &options).unwrap();
    assert_eq!(outcome.exit_code(), 1);
    assert!(outcome.error.as_ref().is_some_and(HarnessError::is_assertion));
}

#[test]
fn trace_path_option_overrides_the_config() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ram.vcd");
    let mut config = quiet_config();
    config.general.trace = true;

    let options = RunOptions {
        trace_path: Some(path.clone()),
        ..RunOptions::default()
    };
    let outcome = Suite::Ram.run(&config, &options).unwrap();
    assert!(outcome.passed());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("$scope module ram $end"));
    assert!(outcome.stats.trace_samples > 0);
}
