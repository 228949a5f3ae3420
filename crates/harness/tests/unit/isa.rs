//! # Encoder Tests
//!
//! Known words checked against assembler output, branch fields per condition, and immediate
//! placement across every format.

use proptest::prelude::*;
use rstest::rstest;
use rv32tb_core::isa::decode::decode;
use rv32tb_core::isa::encode::{
    addi, beq, bge, bgeu, blt, bltu, bne, csrrs, jal, jalr, lui, mul, sw,
};
use rv32tb_core::isa::rv32i::{funct3, opcodes};

#[rstest]
#[case::addi(addi(1, 0, 5), 0x0050_0093)]
#[case::lui(lui(1, 0x1_f000), 0x0001_f0b7)]
#[case::jal_back(jal(0, -16), 0xff1f_f06f)]
#[case::sw(sw(4, 1, 8), 0x0040_a423)]
#[case::mul(mul(3, 1, 2), 0x0220_81b3)]
#[case::rdcycle(csrrs(2, 0xc00, 0), 0xc000_2173)]
#[case::beq_back(beq(1, 2, -8), 0xfe20_8ce3)]
fn matches_assembler_output(#[case] word: u32, #[case] expected: u32) {
    assert_eq!(word, expected, "{word:#010x} != {expected:#010x}");
}

#[rstest]
#[case::beq(beq(5, 6, 12), funct3::BEQ)]
#[case::bne(bne(5, 6, 12), funct3::BNE)]
#[case::blt(blt(5, 6, 12), funct3::BLT)]
#[case::bge(bge(5, 6, 12), funct3::BGE)]
#[case::bltu(bltu(5, 6, 12), funct3::BLTU)]
#[case::bgeu(bgeu(5, 6, 12), funct3::BGEU)]
fn branch_fields_follow_assembly_order(#[case] word: u32, #[case] expected_funct3: u32) {
    let d = decode(word);
    assert_eq!(d.opcode, opcodes::OP_BRANCH);
    assert_eq!(d.funct3, expected_funct3);
    assert_eq!((d.rs1, d.rs2), (5, 6));
    assert_eq!(d.imm, 12);
}

proptest! {
    #[test]
    fn i_type_immediate_is_sign_extended(rd in 0u32..32, rs1 in 0u32..32, imm in -2048i32..2048) {
        let d = decode(addi(rd, rs1, imm));
        prop_assert_eq!(d.imm, imm as u32);
        prop_assert_eq!((d.rd, d.rs1), (rd as usize, rs1 as usize));
    }

    #[test]
    fn s_type_immediate_is_split_and_rejoined(rs2 in 0u32..32, imm in -2048i32..2048) {
        let d = decode(sw(rs2, 1, imm));
        prop_assert_eq!(d.imm, imm as u32);
        prop_assert_eq!(d.rs2, rs2 as usize);
    }

    #[test]
    fn b_type_offsets_keep_their_sign(half in -2048i32..2048) {
        let offset = half * 2;
        prop_assert_eq!(decode(blt(1, 2, offset)).imm, offset as u32);
    }

    #[test]
    fn j_type_offsets_keep_their_sign(half in -(1i32 << 19)..(1 << 19)) {
        let offset = half * 2;
        let d = decode(jal(1, offset));
        prop_assert_eq!(d.imm, offset as u32);
        prop_assert_eq!(d.rd, 1);
    }

    #[test]
    fn jalr_immediate_is_sign_extended(imm in -2048i32..2048) {
        prop_assert_eq!(decode(jalr(0, 1, imm)).imm, imm as u32);
    }
}
