//! Bit-field helpers.
//!
//! Masks and extractions shared by the encoder, the reference core, and the
//! byte-lane comparisons in the scenario runner.

use super::constants::{BYTE_LANES, LANE_BITS};

/// Mask with the low `bits` bits set. `bit_mask(32)` is `0xffff_ffff`.
#[inline]
pub const fn bit_mask(bits: u32) -> u32 {
    if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 }
}

/// Mask covering bits `lsb..=msb`.
#[inline]
pub const fn bits_mask(msb: u32, lsb: u32) -> u32 {
    bit_mask(msb + 1) ^ bit_mask(lsb)
}

/// Extracts bits `lsb..=msb` of `val`, right-aligned.
#[inline]
pub const fn bits(val: u32, msb: u32, lsb: u32) -> u32 {
    (val & bits_mask(msb, lsb)) >> lsb
}

/// Sign-extends the low `width` bits of `val` to 32 bits.
#[inline]
pub const fn sign_extend(val: u32, width: u32) -> u32 {
    let shift = 32 - width;
    (((val << shift) as i32) >> shift) as u32
}

/// Expands a 4-bit write strobe into the 32-bit mask of the byte lanes it enables.
///
/// Bit `i` of the strobe enables bits `8i..=8i+7` of the data word.
pub const fn strobe_lane_mask(strobe: u8) -> u32 {
    let mut mask = 0;
    let mut lane = 0;
    while lane < BYTE_LANES {
        if strobe & (1 << lane) != 0 {
            mask |= bits_mask(lane * LANE_BITS + LANE_BITS - 1, lane * LANE_BITS);
        }
        lane += 1;
    }
    mask
}

/// Compares two data words on the lanes enabled by `strobe` only.
#[inline]
pub const fn lanes_match(observed: u32, expected: u32, strobe: u8) -> bool {
    let mask = strobe_lane_mask(strobe);
    observed & mask == expected & mask
}
