//! Single-sample gamma correction
//!
//! `correct(v) = max * (v / max) ^ gamma`, rounded. Two implementations
//! are always compiled: the fixed-point one multiplies the sample's
//! logarithm by the gamma and exponentiates, the floating-point one calls
//! `powf`. They agree to within one unit; the `floating-arithmetic`
//! feature picks which one [`gamma_8bit_correct`] and
//! [`gamma_16bit_correct`] use.
//!
//! Zero and full scale are fixed points of every gamma and are returned
//! unchanged.

use crate::exp::{exp8bit, exp16bit};
use crate::log::{log8bit, log16bit};
use pngtran_core::{FixedPoint, muldiv};

/// Deviation from 1.0 below which gamma correction is skipped (0.05).
pub const GAMMA_THRESHOLD_FIXED: i32 = 5_000;

/// Input bits kept by a 16-bit table whose output is reduced to 8 bits.
pub const MAX_GAMMA_8: u8 = 11;

/// Whether `gamma` differs from 1.0 enough to be worth correcting.
pub fn gamma_significant(gamma: FixedPoint) -> bool {
    let g = gamma.raw();
    g < FixedPoint::SCALE - GAMMA_THRESHOLD_FIXED || g > FixedPoint::SCALE + GAMMA_THRESHOLD_FIXED
}

/// Fixed-point correction of an 8-bit sample.
///
/// A product that overflows maps the sample to 0.
pub fn gamma_8bit_correct_fixed(value: u8, gamma: FixedPoint) -> u8 {
    if value == 0 || value == u8::MAX {
        return value;
    }
    let Some(lg2) = log8bit(value) else {
        return value;
    };
    match muldiv(gamma.raw(), lg2, FixedPoint::SCALE) {
        Ok(scaled) => exp8bit(scaled),
        Err(err) => {
            tracing::debug!(value, %gamma, error = %err, "8-bit gamma correction overflowed");
            0
        }
    }
}

/// Fixed-point correction of a 16-bit sample.
pub fn gamma_16bit_correct_fixed(value: u16, gamma: FixedPoint) -> u16 {
    if value == 0 || value == u16::MAX {
        return value;
    }
    let Some(lg2) = log16bit(value) else {
        return value;
    };
    match muldiv(gamma.raw(), lg2, FixedPoint::SCALE) {
        Ok(scaled) => exp16bit(scaled),
        Err(err) => {
            tracing::debug!(value, %gamma, error = %err, "16-bit gamma correction overflowed");
            0
        }
    }
}

/// `floor(max * (value / max) ^ gamma + 0.5)`
fn powf_correct(value: f64, max: f64, gamma: FixedPoint) -> f64 {
    (max * (value / max).powf(f64::from(gamma.raw()) * 0.00001) + 0.5).floor()
}

/// Floating-point correction of an 8-bit sample.
pub fn gamma_8bit_correct_float(value: u8, gamma: FixedPoint) -> u8 {
    if value == 0 || value == u8::MAX {
        return value;
    }
    powf_correct(f64::from(value), 255.0, gamma) as u8
}

/// Floating-point correction of a 16-bit sample.
pub fn gamma_16bit_correct_float(value: u16, gamma: FixedPoint) -> u16 {
    if value == 0 || value == u16::MAX {
        return value;
    }
    powf_correct(f64::from(value), 65_535.0, gamma) as u16
}

/// Gamma-correct an 8-bit sample.
#[inline]
pub fn gamma_8bit_correct(value: u8, gamma: FixedPoint) -> u8 {
    if cfg!(feature = "floating-arithmetic") {
        gamma_8bit_correct_float(value, gamma)
    } else {
        gamma_8bit_correct_fixed(value, gamma)
    }
}

/// Gamma-correct a 16-bit sample.
#[inline]
pub fn gamma_16bit_correct(value: u16, gamma: FixedPoint) -> u16 {
    if cfg!(feature = "floating-arithmetic") {
        gamma_16bit_correct_float(value, gamma)
    } else {
        gamma_16bit_correct_fixed(value, gamma)
    }
}

/// Gamma-correct a sample of an 8-bit or 16-bit image.
///
/// For `bit_depth` 8 only the low byte of `value` is used and the result
/// fits in a byte; any other depth is treated as 16-bit.
pub fn gamma_correct(bit_depth: u8, value: u16, gamma: FixedPoint) -> u16 {
    if bit_depth == 8 {
        u16::from(gamma_8bit_correct((value & 0xff) as u8, gamma))
    } else {
        gamma_16bit_correct(value, gamma)
    }
}
