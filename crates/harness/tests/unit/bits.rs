//! # Bit Helper Properties

use proptest::prelude::*;
use rv32tb_core::common::bits::{bit_mask, bits, lanes_match, sign_extend, strobe_lane_mask};

proptest! {
    #[test]
    fn sign_extend_matches_arithmetic_shift(value: u32, width in 1u32..=32) {
        let shift = 32 - width;
        let expected = ((value << shift) as i32 >> shift) as u32;
        prop_assert_eq!(sign_extend(value & bit_mask(width), width), expected);
    }

    #[test]
    fn lanes_match_ignores_disabled_lanes(word: u32, noise: u32, strobe in 0u8..16) {
        let touched = noise & strobe_lane_mask(strobe) != 0;
        prop_assert_eq!(lanes_match(word ^ noise, word, strobe), !touched);
    }

    #[test]
    fn strobe_mask_has_eight_bits_per_lane(strobe in 0u8..16) {
        prop_assert_eq!(strobe_lane_mask(strobe).count_ones(), strobe.count_ones() * 8);
    }

    #[test]
    fn field_extraction_recombines(value: u32, split in 1u32..32) {
        let high = bits(value, 31, split);
        let low = bits(value, split - 1, 0);
        prop_assert_eq!((high << split) | low, value);
    }
}
