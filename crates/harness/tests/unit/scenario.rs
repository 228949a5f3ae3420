//! # Scenario Tests
//!
//! The execution shapes and the register oracle must pass the reference core and catch a
//! core with one injected defect.

use rstest::rstest;
use rv32tb_core::Session;
use rv32tb_core::circuit::{Circuit, DebugSurface, Rv32Core};
use rv32tb_core::isa::encode::{addi, bne, jal, lb, sb, sh, sw};
use rv32tb_core::scenario::{Scenario, Step, run_reset, run_steps};

use crate::common::harness::init_tracing;
use crate::common::mocks::circuit::{Defect, DefectiveCore};

const BASE: u32 = 0x7000_0e00;

/// One step of each shape, with the bus traffic the reference core produces.
fn mixed_steps() -> Vec<Step> {
    vec![
        Step::op(addi(1, 0, 5)).expect(1, 5),
        Step::read(lb(2, 3, 1), 0xe00, 0x0000_8000)
            .preset(3, BASE)
            .expect(2, 0xffff_ff80),
        Step::write(sw(4, 3, 0x10), 0xe10, 0xf, 0x1234_abcd).preset(4, 0x1234_abcd),
        Step::write(sb(4, 3, 2), 0xe00, 0b0100, 0x00cd_0000),
        Step::op(bne(1, 0, -16)).expect_pc_offset(-16),
        Step::op(jal(7, 64)).expect_link(7, 4).expect_pc_offset(64),
    ]
}

fn run_mixed<C: Circuit + DebugSurface>(circuit: C) -> rv32tb_core::HarnessResult<()> {
    init_tracing();
    let mut session = Session::untraced(circuit);
    Scenario::from_steps("mixed", mixed_steps()).run(&mut session)
}

#[test]
fn reference_core_passes_every_shape() {
    run_mixed(Rv32Core::default()).unwrap();
}

#[rstest]
#[case::stuck_register(Defect::StuckRegister(1))]
#[case::stuck_load_target(Defect::StuckRegister(2))]
#[case::missing_halt(Defect::NoHalt)]
#[case::corrupt_store_data(Defect::StuckStoreBit(31))]
#[case::wide_strobe(Defect::WideStrobe)]
fn defective_core_is_caught(#[case] defect: Defect) {
    let err = run_mixed(DefectiveCore::new(defect)).unwrap_err();
    assert!(err.is_assertion(), "{defect:?}: {err}");
}

#[test]
fn store_data_outside_the_strobe_is_not_checked() {
    // Bit 31 lies outside the halfword lanes of `sh` at offset 0.
    init_tracing();
    let mut session = Session::untraced(DefectiveCore::new(Defect::StuckStoreBit(31)));
    run_reset(&mut session).unwrap();
    let steps = [Step::write(sh(4, 3, 0), 0xe00, 0b0011, 0x0000_abcd)
        .preset(3, BASE)
        .preset(4, 0xffff_abcd)];
    run_steps(&mut session, &steps).unwrap();
}

#[test]
fn presets_survive_into_later_steps() {
    init_tracing();
    let mut session = Session::untraced(Rv32Core::default());
    run_reset(&mut session).unwrap();
    let steps = [
        Step::op(addi(5, 6, 1)).preset(6, 41).expect(5, 42),
        Step::op(addi(7, 6, 0)).expect(7, 41),
    ];
    run_steps(&mut session, &steps).unwrap();
    assert_eq!(session.circuit().read_reg(6), 41);
}

#[test]
fn pc_expectation_is_checked() {
    init_tracing();
    let mut session = Session::untraced(Rv32Core::default());
    run_reset(&mut session).unwrap();
    let err = run_steps(&mut session, &[Step::op(jal(0, 8)).expect_pc_offset(4)]).unwrap_err();
    assert!(err.to_string().contains("oracle::pc(session) == target"));
}
