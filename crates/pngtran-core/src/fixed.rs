//! Scaled fixed-point arithmetic
//!
//! Gamma exponents, chromaticity coordinates and screen/file gamma values
//! are carried as signed 32-bit integers scaled by 100000, so `1.0` is
//! stored as `100000` and five decimal digits survive every conversion.
//!
//! All products go through [`muldiv`], which forms the exact product in a
//! 64-bit intermediate and rounds the quotient half away from zero. A
//! result that does not fit in `i32` is reported as
//! [`Error::ArithmeticOverflow`] instead of wrapping.
//!
//! # See also
//!
//! PNG specification, section 12.2 (gAMA and cHRM fixed-point encoding)

use crate::error::{Error, Result};
use std::fmt;

/// A real number scaled by [`FixedPoint::SCALE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedPoint(i32);

impl FixedPoint {
    /// Scale factor: the integer stored for the real value 1.0
    pub const SCALE: i32 = 100_000;

    /// 0.0
    pub const ZERO: FixedPoint = FixedPoint(0);

    /// 1.0
    pub const ONE: FixedPoint = FixedPoint(Self::SCALE);

    /// Conventional sRGB encoding gamma, 1/2.2
    pub const SRGB_GAMMA: FixedPoint = FixedPoint(45_455);

    /// Wrap an already-scaled value.
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        FixedPoint(raw)
    }

    /// The scaled integer.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert a floating-point value, rounding to the nearest 0.00001.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArithmeticOverflow`] if the scaled value does not
    /// fit in `i32` or `value` is not finite.
    pub fn from_f64(value: f64) -> Result<Self> {
        let r = (f64::from(Self::SCALE) * value + 0.5).floor();
        if !r.is_finite() || r > f64::from(i32::MAX) || r < f64::from(i32::MIN) {
            return Err(Error::ArithmeticOverflow {
                operation: "FixedPoint::from_f64",
            });
        }
        Ok(FixedPoint(r as i32))
    }

    /// The represented real value.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(Self::SCALE)
    }

    /// `round(self * times / divisor)` in fixed-point units.
    pub fn muldiv(self, times: i32, divisor: i32) -> Result<Self> {
        muldiv(self.0, times, divisor).map(FixedPoint)
    }

    /// `1 / self`
    pub fn reciprocal(self) -> Result<Self> {
        reciprocal(self)
    }
}

impl From<FixedPoint> for i32 {
    fn from(value: FixedPoint) -> Self {
        value.0
    }
}

/// Formats the value in plain decimal without trailing zeros, e.g.
/// `45455` as `0.45455` and `220000` as `2.2`.
impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let scale = Self::SCALE as u32;
        let integer = magnitude / scale;
        let fraction = magnitude % scale;

        if self.0 < 0 {
            f.write_str("-")?;
        }
        write!(f, "{integer}")?;
        if fraction != 0 {
            let digits = format!("{fraction:05}");
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        Ok(())
    }
}

/// Compute `round(a * times / divisor)`.
///
/// The product is formed exactly in 64 bits and the quotient is rounded
/// half away from zero. Zero operands short-circuit to an exact zero.
///
/// # Errors
///
/// - [`Error::DivideByZero`] if `divisor` is 0
/// - [`Error::ArithmeticOverflow`] if the rounded result does not fit in `i32`
pub fn muldiv(a: i32, times: i32, divisor: i32) -> Result<i32> {
    if divisor == 0 {
        return Err(Error::DivideByZero {
            operation: "muldiv",
        });
    }
    if a == 0 || times == 0 {
        return Ok(0);
    }

    let product = i64::from(a) * i64::from(times);
    let negative = (product < 0) != (divisor < 0);
    let p = product.unsigned_abs();
    let d = u64::from(divisor.unsigned_abs());

    let mut q = p / d;
    if (p % d) * 2 >= d {
        q += 1;
    }

    // |a * times| < 2^62, so the quotient always fits in i64
    let result = if negative { -(q as i64) } else { q as i64 };
    i32::try_from(result).map_err(|_| Error::ArithmeticOverflow {
        operation: "muldiv",
    })
}

/// [`muldiv`] using only 32-bit unsigned arithmetic.
///
/// The 64-bit product is assembled by 16-bit long multiplication into a
/// high and a low word, then divided one quotient bit at a time. The sign
/// is tracked separately and the arithmetic runs on magnitudes, so the
/// result is identical to [`muldiv`] for every input.
pub fn muldiv_narrow(a: i32, times: i32, divisor: i32) -> Result<i32> {
    let overflow = Error::ArithmeticOverflow {
        operation: "muldiv_narrow",
    };
    if divisor == 0 {
        return Err(Error::DivideByZero {
            operation: "muldiv_narrow",
        });
    }
    if a == 0 || times == 0 {
        return Ok(0);
    }

    let negative = (a < 0) ^ (times < 0) ^ (divisor < 0);
    let a = a.unsigned_abs();
    let t = times.unsigned_abs();
    let d = divisor.unsigned_abs();

    // Cross terms each stay below 2^31, so their sum fits in 32 bits.
    let mut s16 = (a >> 16) * (t & 0xffff) + (a & 0xffff) * (t >> 16);
    let mut s32 = (a >> 16) * (t >> 16) + (s16 >> 16);
    let mut s00 = (a & 0xffff) * (t & 0xffff);

    s16 = (s16 & 0xffff) << 16;
    s00 = s00.wrapping_add(s16);
    if s00 < s16 {
        s32 += 1;
    }

    // s32:s00 is the product; a quotient of 32 bits or more cannot fit.
    if s32 >= d {
        return Err(overflow);
    }

    let mut result: u32 = 0;
    for bitshift in (0..32u32).rev() {
        let (d32, d00) = if bitshift > 0 {
            (d >> (32 - bitshift), d << bitshift)
        } else {
            (0, d)
        };

        if s32 > d32 {
            if s00 < d00 {
                s32 -= 1;
            }
            s32 -= d32;
            s00 = s00.wrapping_sub(d00);
            result += 1 << bitshift;
        } else if s32 == d32 && s00 >= d00 {
            s32 = 0;
            s00 -= d00;
            result += 1 << bitshift;
        }
    }

    // s00 is now the remainder; round half away from zero.
    if s00 >= d - s00 {
        result = result.checked_add(1).ok_or(overflow.clone())?;
    }

    if negative {
        if result > 1 << 31 {
            return Err(overflow);
        }
        Ok((result as i32).wrapping_neg())
    } else {
        i32::try_from(result).map_err(|_| overflow)
    }
}

/// [`muldiv`] for callers that cannot act on an overflow.
///
/// Returns 0 and logs a warning when the result does not fit.
pub fn muldiv_warn(a: i32, times: i32, divisor: i32) -> i32 {
    match muldiv(a, times, divisor) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(a, times, divisor, error = %err, "fixed point overflow ignored");
            0
        }
    }
}

/// `1 / a` in fixed-point units.
///
/// # Errors
///
/// [`Error::DivideByZero`] for zero, [`Error::ArithmeticOverflow`] when the
/// reciprocal exceeds the representable range (|a| < 5).
pub fn reciprocal(a: FixedPoint) -> Result<FixedPoint> {
    muldiv(FixedPoint::SCALE, FixedPoint::SCALE, a.raw()).map(FixedPoint)
}

/// `a * b` in fixed-point units.
pub fn product2(a: FixedPoint, b: FixedPoint) -> Result<FixedPoint> {
    muldiv(a.raw(), b.raw(), FixedPoint::SCALE).map(FixedPoint)
}

/// `1 / (a * b)` in fixed-point units.
///
/// Evaluated as a single rounded division of 10^15 by the exact product,
/// so the result is rounded once rather than once per step.
pub fn reciprocal2(a: FixedPoint, b: FixedPoint) -> Result<FixedPoint> {
    const NUMERATOR: u64 = 1_000_000_000_000_000;

    let product = i64::from(a.raw()) * i64::from(b.raw());
    if product == 0 {
        return Err(Error::DivideByZero {
            operation: "reciprocal2",
        });
    }

    let d = product.unsigned_abs();
    // 2 * 10^15 + d and 2 * d both stay below 2^63
    let q = (2 * NUMERATOR + d) / (2 * d);
    let q = i64::try_from(q).map_err(|_| Error::ArithmeticOverflow {
        operation: "reciprocal2",
    })?;
    let result = if product < 0 { -q } else { q };

    i32::try_from(result)
        .map(FixedPoint)
        .map_err(|_| Error::ArithmeticOverflow {
            operation: "reciprocal2",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muldiv_rounding() {
        assert_eq!(muldiv(10, 1, 4).unwrap(), 3); // 2.5 -> 3
        assert_eq!(muldiv(-10, 1, 4).unwrap(), -3); // -2.5 -> -3
        assert_eq!(muldiv(7, 1, 3).unwrap(), 2); // 2.33 -> 2
        assert_eq!(muldiv(8, 1, 3).unwrap(), 3); // 2.67 -> 3
        assert_eq!(muldiv(1, 1, 3).unwrap(), 0);
        assert_eq!(muldiv(45455, 100000, -100000).unwrap(), -45455);
    }

    #[test]
    fn test_muldiv_zero_short_circuit() {
        assert_eq!(muldiv(0, i32::MAX, 1).unwrap(), 0);
        assert_eq!(muldiv(i32::MAX, 0, 1).unwrap(), 0);
        assert!(matches!(
            muldiv(0, 5, 0),
            Err(Error::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_muldiv_overflow() {
        assert!(matches!(
            muldiv(i32::MAX, 2, 1),
            Err(Error::ArithmeticOverflow { .. })
        ));
        assert_eq!(muldiv(i32::MIN, 1, 1).unwrap(), i32::MIN);
        assert!(muldiv(i32::MIN, -1, 1).is_err());
    }

    #[test]
    fn test_muldiv_narrow_matches_wide() {
        let samples = [
            1, -1, 3, 7, 255, 4095, 45455, 65535, 100000, 220000, -99999, 1 << 20,
            123_456_789, -987_654_321, i32::MAX, i32::MIN,
        ];
        for &a in &samples {
            for &t in &samples {
                for &d in &samples {
                    assert_eq!(
                        muldiv(a, t, d).ok(),
                        muldiv_narrow(a, t, d).ok(),
                        "mismatch for ({a}, {t}, {d})"
                    );
                }
            }
        }
    }

    #[test]
    fn test_muldiv_warn_returns_zero() {
        assert_eq!(muldiv_warn(i32::MAX, i32::MAX, 1), 0);
        assert_eq!(muldiv_warn(3, 4, 2), 6);
    }

    #[test]
    fn test_reciprocal() {
        assert_eq!(reciprocal(FixedPoint::ONE).unwrap(), FixedPoint::ONE);
        assert_eq!(
            reciprocal(FixedPoint::SRGB_GAMMA).unwrap().raw(),
            219_998
        );
        assert!(reciprocal(FixedPoint::ZERO).is_err());
        assert!(reciprocal(FixedPoint::from_raw(4)).is_err());
        assert_eq!(reciprocal(FixedPoint::from_raw(5)).unwrap().raw(), 2_000_000_000);
    }

    #[test]
    fn test_product2_and_reciprocal2() {
        let file = FixedPoint::SRGB_GAMMA;
        let screen = FixedPoint::from_raw(220_000);
        assert_eq!(product2(file, screen).unwrap().raw(), 100_001);
        assert_eq!(reciprocal2(file, screen).unwrap().raw(), 99_999);
        assert_eq!(
            reciprocal2(file, FixedPoint::ONE).unwrap().raw(),
            219_998
        );
        assert!(reciprocal2(FixedPoint::ZERO, screen).is_err());
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(FixedPoint::from_f64(1.0).unwrap(), FixedPoint::ONE);
        assert_eq!(FixedPoint::from_f64(1.0 / 2.2).unwrap().raw(), 45_455);
        assert_eq!(FixedPoint::from_f64(-0.5).unwrap().raw(), -50_000);
        assert!(FixedPoint::from_f64(1e6).is_err());
        assert!(FixedPoint::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(FixedPoint::from_raw(45_455).to_string(), "0.45455");
        assert_eq!(FixedPoint::from_raw(220_000).to_string(), "2.2");
        assert_eq!(FixedPoint::ONE.to_string(), "1");
        assert_eq!(FixedPoint::ZERO.to_string(), "0");
        assert_eq!(FixedPoint::from_raw(-5).to_string(), "-0.00005");
        assert_eq!(FixedPoint::from_raw(i32::MIN).to_string(), "-21474.83648");
    }
}
