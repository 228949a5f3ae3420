//! Single-instruction checks for a core.
//!
//! Every scenario resets the core and feeds it instruction words directly on the data-out
//! port, one step at a time, so no memory model is involved. Loads and stores are answered
//! and checked by the read- and write-stalled shapes.

use crate::circuit::{Circuit, DebugSurface};
use crate::common::error::HarnessResult;
use crate::isa::encode::{
    add, addi, and, andi, auipc, beq, bge, bgeu, blt, bltu, bne, csrrc, csrrci, csrrs, csrrsi,
    csrrw, csrrwi, div, divu, ebreak, ecall, fence, fence_i, jal, jalr, lb, lbu, lh, lhu, lui,
    lw, mul, mulh, mulhsu, mulhu, nop, or, ori, rem, remu, sb, sh, sll, slli, slt, slti, sltiu,
    sltu, sra, srai, srl, srli, sub, sw, xor, xori,
};
use crate::isa::system::csr;
use crate::scenario::{Scenario, Step, run_op, run_reset};
use crate::sim::{Session, oracle};
use crate::{tb_assert, tb_assert_eq};

/// Branch offset used by the predicate tables (bit 11 of the B immediate).
const BRANCH_OFFSET: i32 = 1 << 11;

/// Base address register value for the load and store checks.
const MEM_BASE: u32 = 0x7000_0e00;

/// Byte address the load and store checks hit (`MEM_BASE + 0x10` on a 15-bit word bus).
const MEM_ADDR: u32 = 0xe10;

/// Every instruction scenario, in run order.
pub fn scenarios<C: Circuit + DebugSurface>() -> Vec<Scenario<C>> {
    vec![
        Scenario::from_steps("lui", lui_steps()),
        Scenario::from_steps("auipc", auipc_steps()),
        Scenario::from_steps("jal", jal_steps()),
        Scenario::from_steps("jalr", jalr_steps()),
        Scenario::from_steps("bxx", branches()),
        Scenario::from_steps("arith", arith()),
        Scenario::from_steps("muldiv", muldiv()),
        Scenario::from_steps("arith_i", arith_imm()),
        Scenario::from_steps("fence_esys", fence_esys()),
        Scenario::custom("csr", counters::<C>),
        Scenario::from_steps("mscratch", mscratch()),
        Scenario::from_steps("load", loads()),
        Scenario::from_steps("store", stores()),
    ]
}

fn lui_steps() -> Vec<Step> {
    vec![
        Step::op(lui(1, 0x7000_0000)).expect(1, 0x7000_0000).expect_pc_offset(4),
        // Low 12 bits are not encodable.
        Step::op(lui(4, 0x4000_ff01)).expect(4, 0x4000_f000),
        // Writes to r0 are dropped.
        Step::op(lui(0, 0xffff_ffff)),
        Step::op(add(5, 0, 0)).expect(5, 0),
    ]
}

fn auipc_steps() -> Vec<Step> {
    vec![
        Step::op(auipc(1, 1 << 12)).expect_link(1, 1 << 12).expect_pc_offset(4),
        // Offset below 4096 encodes as zero.
        Step::op(auipc(1, 1 << 11)).expect_link(1, 0).expect_pc_offset(4),
    ]
}

fn jal_steps() -> Vec<Step> {
    let mut steps = vec![
        Step::op(jal(1, -16)).expect_link(1, 4).expect_pc_offset(-16),
        Step::op(jal(2, 1024)).expect_link(2, 4).expect_pc_offset(1024),
    ];
    // Every immediate bit boundary; bit 20 is the sign, covered above.
    for bit in [2, 10, 11, 12, 19] {
        steps.push(
            Step::op(jal(3, 1 << bit))
                .expect_link(3, 4)
                .expect_pc_offset(1 << bit),
        );
    }
    steps
}

fn jalr_steps() -> Vec<Step> {
    vec![
        Step::op(jalr(2, 1, 1 << 10))
            .preset(1, 0x100)
            .expect_link(2, 4)
            .expect_pc(0x500),
        // Immediate bit 11 sign-extends.
        Step::op(jalr(2, 1, -(1 << 11)))
            .preset(1, 0x100)
            .expect_link(2, 4)
            .expect_pc(0xffff_f900),
        // Bit 0 of the sum is cleared.
        Step::op(jalr(2, 1, 0x3ff))
            .preset(1, 0x101)
            .expect_link(2, 4)
            .expect_pc(0x500),
    ]
}

/// One branch check: `r1 = a`, `r2 = b`, then `insn` either jumps or falls through.
fn branch(insn: u32, a: u32, b: u32, taken: bool) -> Step {
    Step::op(insn)
        .preset(1, a)
        .preset(2, b)
        .expect_pc_offset(if taken { BRANCH_OFFSET } else { 4 })
}

fn branches() -> Vec<Step> {
    const NEG1: u32 = u32::MAX;
    let off = BRANCH_OFFSET;
    let table: [(u32, u32, u32, bool); 24] = [
        (beq(1, 2, off), 0x100, 0x100, true),
        (beq(1, 2, off), 0x100, 0x200, false),
        (bne(1, 2, off), 0x100, 0x200, true),
        (bne(1, 2, off), 0x100, 0x100, false),
        (blt(1, 2, off), 1, 2, true),
        (blt(1, 2, off), NEG1, 1, true),
        (blt(1, 2, off), 1, 1, false),
        (blt(1, 2, off), 1, NEG1, false),
        (blt(1, 2, off), 2, 1, false),
        (bge(1, 2, off), 1, 2, false),
        (bge(1, 2, off), NEG1, 1, false),
        (bge(1, 2, off), 1, 1, true),
        (bge(1, 2, off), 1, NEG1, true),
        (bge(1, 2, off), 2, 1, true),
        (bltu(1, 2, off), 1, 2, true),
        (bltu(1, 2, off), NEG1, 1, false),
        (bltu(1, 2, off), 1, 1, false),
        (bltu(1, 2, off), 1, NEG1, true),
        (bltu(1, 2, off), 2, 1, false),
        (bgeu(1, 2, off), 1, 2, false),
        (bgeu(1, 2, off), NEG1, 1, true),
        (bgeu(1, 2, off), 1, 1, true),
        (bgeu(1, 2, off), 1, NEG1, false),
        (bgeu(1, 2, off), 2, 1, true),
    ];
    let mut steps: Vec<_> = table
        .iter()
        .map(|&(insn, a, b, taken)| branch(insn, a, b, taken))
        .collect();
    steps.push(
        Step::op(bne(1, 2, -8))
            .preset(1, 1)
            .preset(2, 2)
            .expect_pc_offset(-8),
    );
    steps
}

fn arith() -> Vec<Step> {
    let mut steps = vec![
        Step::op(add(2, 1, 0)).preset(1, 0x7000_0000).expect(2, 0x7000_0000),
        // Destination r0 is discarded.
        Step::op(add(0, 2, 1)),
        // Source r0 reads as zero.
        Step::op(add(3, 2, 0)).expect(3, 0x7000_0000),
        Step::op(add(4, 3, 2)).preset(2, 0x7000_0001).expect(4, 0xe000_0001),
        Step::op(sub(4, 9, 7))
            .preset(7, 0x7000_0000)
            .preset(9, 0x8000_0000)
            .expect(4, 0x1000_0000),
        Step::op(sll(4, 9, 7)).preset(7, 3).preset(9, 1).expect(4, 8),
        // Only the low five bits of the shift amount count.
        Step::op(sll(4, 9, 7)).preset(7, 0x23).preset(9, 1).expect(4, 8),
    ];

    // `r4 = r9 < r7`, signed then unsigned.
    let slt_cases: [(u32, u32, u32); 5] = [
        (3, 5, 0),
        (9, 5, 1),
        (u32::MAX, 5, 0),
        (5, (-5i32) as u32, 1),
        (6, 6, 0),
    ];
    for (r7, r9, expected) in slt_cases {
        steps.push(Step::op(slt(4, 9, 7)).preset(7, r7).preset(9, r9).expect(4, expected));
    }
    let sltu_cases: [(u32, u32, u32); 5] = [
        (3, 5, 0),
        (9, 5, 1),
        (u32::MAX, 5, 1),
        (5, 0xffff_fffb, 0),
        (6, 6, 0),
    ];
    for (r7, r9, expected) in sltu_cases {
        steps.push(Step::op(sltu(4, 9, 7)).preset(7, r7).preset(9, r9).expect(4, expected));
    }

    steps.extend([
        Step::op(srl(4, 7, 9)).preset(7, 0x8000_0000).preset(9, 5).expect(4, 0x0400_0000),
        Step::op(sra(4, 7, 9)).preset(7, 0x8000_0000).preset(9, 5).expect(4, 0xfc00_0000),
        Step::op(xor(4, 7, 9)).preset(7, 0x80aa_0000).preset(9, 0x00aa_0008).expect(4, 0x8000_0008),
        Step::op(or(4, 7, 9)).preset(7, 0x80aa_0000).preset(9, 0x00aa_0008).expect(4, 0x80aa_0008),
        Step::op(and(4, 7, 9)).preset(7, 0x80aa_0000).preset(9, 0x00aa_0008).expect(4, 0x00aa_0000),
    ]);
    steps
}

fn muldiv() -> Vec<Step> {
    /// `rd = rs1 op rs2` with `rs1 = r2`, `rs2 = r3`, `rd = r4`.
    fn binary(insn: u32, a: u32, b: u32, expected: u32) -> Step {
        Step::op(insn).preset(2, a).preset(3, b).expect(4, expected)
    }

    vec![
        Step::op(mul(2, 1, 0)).preset(1, 0x7000_0000).expect(2, 0),
        binary(mul(4, 2, 3), 0x7000_0002, 0x7000_0005, 0x1000_000a),
        binary(mulhu(4, 2, 3), 0x7000_0002, 0x7000_0005, 0x3100_0003),
        binary(mulhu(4, 2, 3), 0xc000_0000, 0xe000_0000, 0xa800_0000),
        binary(mulh(4, 2, 3), 0xc000_0002, 0xe000_0005, 0x07ff_fffe),
        binary(mulh(4, 2, 3), 0xc000_0000, 0xe000_0000, 0x0800_0000),
        // rs1 signed, rs2 unsigned.
        binary(mulhsu(4, 2, 3), 0x5000_0000, 0x7000_0000, 0x2300_0000),
        binary(mulhsu(4, 2, 3), 0x5000_0000, 0x9000_0000, 0x2d00_0000),
        binary(mulhsu(4, 2, 3), 0xf000_0000, 0xf000_0000, 0xf100_0000),
        binary(div(4, 2, 3), (-20i32) as u32, 6, (-3i32) as u32),
        binary(rem(4, 2, 3), (-20i32) as u32, 6, (-2i32) as u32),
        binary(divu(4, 2, 3), 20, 6, 3),
        binary(remu(4, 2, 3), 20, 6, 2),
        // Division by zero and signed overflow do not trap.
        binary(div(4, 2, 3), 7, 0, u32::MAX),
        binary(divu(4, 2, 3), 7, 0, u32::MAX),
        binary(rem(4, 2, 3), 7, 0, 7),
        binary(remu(4, 2, 3), 7, 0, 7),
        binary(div(4, 2, 3), 0x8000_0000, u32::MAX, 0x8000_0000),
        binary(rem(4, 2, 3), 0x8000_0000, u32::MAX, 0),
    ]
}

fn arith_imm() -> Vec<Step> {
    let mut steps = vec![
        Step::op(addi(2, 1, 0x12)).preset(1, 0x7000_0000).expect(2, 0x7000_0012),
        Step::op(addi(2, 1, -22)).preset(1, 0x7000_0018).expect(2, 0x7000_0002),
    ];

    let slti_cases: [(u32, i32, u32); 5] = [
        (5, 3, 0),
        (5, 9, 1),
        (5, -1, 0),
        ((-5i32) as u32, 5, 1),
        (6, 6, 0),
    ];
    for (r9, imm, expected) in slti_cases {
        steps.push(Step::op(slti(4, 9, imm)).preset(9, r9).expect(4, expected));
    }
    // The immediate is sign-extended, then compared unsigned.
    let sltiu_cases: [(u32, i32, u32); 5] = [
        (5, 3, 0),
        (5, 9, 1),
        (5, -1, 1),
        (0xffff_fffb, 5, 0),
        (6, 6, 0),
    ];
    for (r9, imm, expected) in sltiu_cases {
        steps.push(Step::op(sltiu(4, 9, imm)).preset(9, r9).expect(4, expected));
    }

    steps.extend([
        Step::op(xori(4, 9, 0x70a)).preset(9, 0x08a).expect(4, 0x780),
        // 0x80a has bit 11 set and extends to 0xfffff80a.
        Step::op(xori(4, 9, 0x80a)).preset(9, 0x08a).expect(4, 0xffff_f880),
        Step::op(ori(4, 9, 0x80a)).preset(9, 0x08a).expect(4, 0xffff_f88a),
        Step::op(andi(4, 9, 0x80a)).preset(9, 0x08a).expect(4, 0x00a),
        Step::op(slli(4, 9, 3)).preset(9, 1).expect(4, 8),
        Step::op(srli(4, 7, 5)).preset(7, 0x8000_0000).expect(4, 0x0400_0000),
        Step::op(srai(4, 7, 5)).preset(7, 0x8000_0000).expect(4, 0xfc00_0000),
    ]);
    steps
}

fn fence_esys() -> Vec<Step> {
    [fence(0, 0), fence(0xf, 0xf), fence_i(), ecall(), ebreak()]
        .into_iter()
        .map(|insn| Step::op(insn).expect_pc_offset(4))
        .collect()
}

fn mscratch() -> Vec<Step> {
    vec![
        Step::op(csrrw(2, csr::MSCRATCH, 1)).preset(1, 0xdead_beef).expect(2, 0),
        Step::op(csrrs(3, csr::MSCRATCH, 0)).expect(3, 0xdead_beef),
        Step::op(csrrci(4, csr::MSCRATCH, 0xf)).expect(4, 0xdead_beef),
        Step::op(csrrsi(5, csr::MSCRATCH, 0x1)).expect(5, 0xdead_bee0),
        Step::op(csrrc(6, csr::MSCRATCH, 7)).preset(7, 0xffff_0000).expect(6, 0xdead_bee1),
        Step::op(csrrwi(8, csr::MSCRATCH, 0x15)).expect(8, 0x0000_bee1),
        Step::op(csrrs(9, csr::MSCRATCH, 0)).expect(9, 0x15),
    ]
}

fn loads() -> Vec<Step> {
    let load = |insn: u32, data: u32, expected: u32| {
        Step::read(insn, MEM_ADDR, data).preset(1, MEM_BASE).expect(2, expected)
    };
    vec![
        load(lw(2, 1, 0x10), 0x1234_5678, 0x1234_5678),
        load(lh(2, 1, 0x10), 0x1234_5678, 0x5678),
        load(lh(2, 1, 0x12), 0x1234_5678, 0x1234),
        load(lh(2, 1, 0x10), 0x9234_c678, 0xffff_c678),
        load(lh(2, 1, 0x12), 0x9234_c678, 0xffff_9234),
        load(lb(2, 1, 0x10), 0x1234_5678, 0x78),
        load(lb(2, 1, 0x11), 0x1234_5678, 0x56),
        load(lb(2, 1, 0x12), 0x1234_5678, 0x34),
        load(lb(2, 1, 0x13), 0x1234_5678, 0x12),
        load(lb(2, 1, 0x10), 0x92b4_d6e8, 0xffff_ffe8),
        load(lb(2, 1, 0x11), 0x92b4_d6e8, 0xffff_ffd6),
        load(lb(2, 1, 0x12), 0x92b4_d6e8, 0xffff_ffb4),
        load(lb(2, 1, 0x13), 0x92b4_d6e8, 0xffff_ff92),
        load(lhu(2, 1, 0x10), 0x9234_c678, 0xc678),
        load(lhu(2, 1, 0x12), 0x9234_c678, 0x9234),
        load(lbu(2, 1, 0x10), 0x92b4_d6e8, 0xe8),
        load(lbu(2, 1, 0x11), 0x92b4_d6e8, 0xd6),
        load(lbu(2, 1, 0x12), 0x92b4_d6e8, 0xb4),
        load(lbu(2, 1, 0x13), 0x92b4_d6e8, 0x92),
    ]
}

fn stores() -> Vec<Step> {
    let store = |insn: u32, strobe: u8, data: u32| {
        Step::write(insn, MEM_ADDR, strobe, data)
            .preset(1, MEM_BASE)
            .preset(2, 0x1234_abcd)
            .expect_pc_offset(4)
    };
    vec![
        store(sw(2, 1, 0x10), 0xf, 0x1234_abcd),
        store(sh(2, 1, 0x10), 0x3, 0xabcd),
        store(sh(2, 1, 0x12), 0xc, 0xabcd_0000),
        store(sb(2, 1, 0x10), 0x1, 0xcd),
        store(sb(2, 1, 0x11), 0x2, 0xcd00),
        store(sb(2, 1, 0x12), 0x4, 0x00cd_0000),
        store(sb(2, 1, 0x13), 0x8, 0xcd00_0000),
    ]
}

/// Runs a CSR read into r2 and returns the value.
fn read_counter<C: Circuit + DebugSurface>(session: &mut Session<C>, insn: u32) -> HarnessResult<u32> {
    run_op(session, insn)?;
    Ok(oracle::grab(session)[2])
}

/// Counter CSRs advance between reads under every read-only CSR form; high halves stay zero.
fn counters<C: Circuit + DebugSurface>(session: &mut Session<C>) -> HarnessResult<()> {
    run_reset(session)?;
    run_op(session, nop())?;

    let mut last = read_counter(session, csrrc(2, csr::CYCLE, 0))?;
    tb_assert!(session, last != 0);
    for insn in [
        csrrc(2, csr::CYCLE, 0),
        csrrs(2, csr::CYCLE, 0),
        csrrci(2, csr::CYCLE, 0),
        csrrsi(2, csr::CYCLE, 0),
    ] {
        let now = read_counter(session, insn)?;
        tb_assert!(session, now > last, "cycle went from {last} to {now}");
        last = now;
    }
    tb_assert_eq!(session, read_counter(session, csrrsi(2, csr::CYCLEH, 0))?, 0);

    for (low, high) in [(csr::TIME, csr::TIMEH), (csr::INSTRET, csr::INSTRETH)] {
        let first = read_counter(session, csrrc(2, low, 0))?;
        tb_assert!(session, first != 0);
        let second = read_counter(session, csrrc(2, low, 0))?;
        tb_assert!(session, second > first, "csr {low:#x} went from {first} to {second}");
        tb_assert_eq!(session, read_counter(session, csrrsi(2, high, 0))?, 0);
    }
    Ok(())
}
