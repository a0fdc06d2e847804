//! Fixed-point base-2 exponentials
//!
//! [`exp`] inverts the logarithms in [`crate::log`]: it takes `-log2(v)`
//! with 16 fractional bits and four integer bits, and returns `v` as a
//! 32-bit fraction. The top four fractional bits index a table; the next
//! six each multiply in a correction factor; the low six bits share one
//! linear correction, since the factors have all converged by then.

/// `2^(-i/16)` for `i` in `0..16`, as 32-bit fractions.
///
/// The first entry is 1.0, saturated to `u32::MAX`.
pub(crate) const EXP_32BIT: [u32; 16] = [
    4294967295, 4112874773, 3938502376, 3771522796, 3611622603, 3458501653,
    3311872529, 3171459999, 3037000500, 2908241642, 2784941738, 2666869345,
    2553802834, 2445529972, 2341847524, 2242560872,
];

/// `(bit, multiplier, rounding, shift)` for fractional bits 11 down to 6.
///
/// Each subtracts `e * (1 - 2^(-bit/65536))` using a multiplier close to
/// the limit 45426 scaled by the bit position.
const BIT_CORRECTIONS: [(i32, u32, u32, u32); 6] = [
    (0x800, 44_938, 16, 5),
    (0x400, 45_181, 32, 6),
    (0x200, 45_303, 64, 7),
    (0x100, 45_365, 128, 8),
    (0x080, 45_395, 256, 9),
    (0x040, 45_410, 512, 10),
];

/// `2^(-x / 65536)` as a 32-bit fraction.
///
/// Non-positive input saturates to `u32::MAX`; input above `0xfffff`
/// underflows to 0.
pub fn exp(x: i32) -> u32 {
    if x <= 0 {
        return EXP_32BIT[0];
    }
    if x > 0xfffff {
        return 0;
    }

    let mut e = EXP_32BIT[((x >> 12) & 0xf) as usize];
    for &(bit, multiplier, rounding, shift) in &BIT_CORRECTIONS {
        if x & bit != 0 {
            e -= ((e >> 16) * multiplier + rounding) >> shift;
        }
    }

    let low = (x & 0x3f) as u32;
    e -= ((e >> 16) * 355 * low + 256) >> 9;

    e >> (x >> 16)
}

/// [`exp`] scaled to `0..=255`.
///
/// Subtracting `x >> 8` multiplies by 255/256 before the rounding shift.
pub fn exp8bit(lg2: i32) -> u8 {
    let mut x = exp(lg2);
    x -= x >> 8;
    ((x + 0x7f_ffff) >> 24) as u8
}

/// [`exp`] scaled to `0..=65535`.
pub fn exp16bit(lg2: i32) -> u16 {
    let mut x = exp(lg2);
    x -= x >> 16;
    ((x + 32_767) >> 16) as u16
}
