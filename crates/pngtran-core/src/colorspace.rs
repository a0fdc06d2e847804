//! Chromaticity and tristimulus conversions
//!
//! Converts between the (x, y) chromaticities recorded for a color space's
//! end points and the CIE XYZ tristimulus values of its red, green and blue
//! primaries. All values are [`FixedPoint`] and every product goes through
//! [`muldiv`], so results are reproducible without floating point.
//!
//! The chromaticities lose one degree of freedom relative to XYZ; the
//! inverse conversion restores it by normalising white Y to 1.0.
//!
//! # See also
//!
//! PNG specification, section 11.3.3.1 (cHRM)

use crate::error::{Error, Result};
use crate::fixed::{FixedPoint, muldiv, reciprocal};

const FP_1: i32 = FixedPoint::SCALE;

/// One chromaticity coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Xy {
    pub x: FixedPoint,
    pub y: FixedPoint,
}

impl Xy {
    /// Build a coordinate pair from raw scaled values.
    pub const fn from_raw(x: i32, y: i32) -> Self {
        Xy {
            x: FixedPoint::from_raw(x),
            y: FixedPoint::from_raw(y),
        }
    }
}

/// White point and primaries of a color space, as chromaticities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chromaticities {
    pub white: Xy,
    pub red: Xy,
    pub green: Xy,
    pub blue: Xy,
}

impl Chromaticities {
    /// ITU-R BT.709 primaries with a D65 white point, as used by sRGB.
    pub const SRGB: Chromaticities = Chromaticities {
        white: Xy::from_raw(31_270, 32_900),
        red: Xy::from_raw(64_000, 33_000),
        green: Xy::from_raw(30_000, 60_000),
        blue: Xy::from_raw(15_000, 6_000),
    };
}

/// One CIE XYZ tristimulus value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Xyz {
    pub x: FixedPoint,
    pub y: FixedPoint,
    pub z: FixedPoint,
}

/// Tristimulus values of the three primaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tristimulus {
    pub red: Xyz,
    pub green: Xyz,
    pub blue: Xyz,
}

impl Tristimulus {
    /// Y coefficients of the primaries: the weights that give luminance
    /// from linear red, green and blue.
    pub fn luminance_coefficients(&self) -> [FixedPoint; 3] {
        [self.red.y, self.green.y, self.blue.y]
    }
}

/// Validate a set of chromaticities.
///
/// Every coordinate must be non-negative, white y must be positive, each
/// `x + y` must not exceed 1.0 and the red/green/blue triangle must have
/// non-zero area.
pub fn check_chromaticities(c: &Chromaticities) -> Result<()> {
    let points = [c.white, c.red, c.green, c.blue];
    if points.iter().any(|p| p.x.raw() < 0 || p.y.raw() < 0) {
        return Err(Error::InvalidChromaticity("negative chromaticity value"));
    }
    if c.white.y.raw() == 0 {
        return Err(Error::InvalidChromaticity("white point y is zero"));
    }

    let names = ["white point", "red point", "green point", "blue point"];
    for (p, name) in points.iter().zip(names) {
        if p.x.raw() > FP_1 - p.y.raw() {
            tracing::debug!(
                point = name,
                x = %p.x,
                y = %p.y,
                "chromaticity outside the unit triangle"
            );
            return Err(Error::InvalidChromaticity("x + y exceeds 1.0"));
        }
    }

    let (rx, ry) = (i64::from(c.red.x.raw()), i64::from(c.red.y.raw()));
    let (gx, gy) = (i64::from(c.green.x.raw()), i64::from(c.green.y.raw()));
    let (bx, by) = (i64::from(c.blue.x.raw()), i64::from(c.blue.y.raw()));
    if (gx - rx) * (by - ry) == (gy - ry) * (bx - rx) {
        return Err(Error::InvalidChromaticity("RGB triangle has zero area"));
    }

    Ok(())
}

/// Chromaticities of the primaries and of the white point implied by them.
///
/// The white point is the chromaticity of the sum of the three primaries.
pub fn xy_from_xyz(t: &Tristimulus) -> Result<Chromaticities> {
    let sum = |v: &Xyz| -> Result<i32> {
        v.x.raw()
            .checked_add(v.y.raw())
            .and_then(|s| s.checked_add(v.z.raw()))
            .ok_or(Error::ArithmeticOverflow {
                operation: "xy_from_xyz",
            })
    };
    let point = |v: &Xyz, d: i32| -> Result<Xy> {
        Ok(Xy::from_raw(
            muldiv(v.x.raw(), FP_1, d)?,
            muldiv(v.y.raw(), FP_1, d)?,
        ))
    };

    let mut white = Xyz::default();
    let mut white_sum: i32 = 0;
    let mut primaries = [Xy::default(); 3];
    for (slot, v) in primaries.iter_mut().zip([&t.red, &t.green, &t.blue]) {
        let d = sum(v)?;
        *slot = point(v, d)?;

        let overflow = Error::ArithmeticOverflow {
            operation: "xy_from_xyz",
        };
        white_sum = white_sum.checked_add(d).ok_or(overflow.clone())?;
        let x = white.x.raw().checked_add(v.x.raw()).ok_or(overflow.clone())?;
        let y = white.y.raw().checked_add(v.y.raw()).ok_or(overflow)?;
        white.x = FixedPoint::from_raw(x);
        white.y = FixedPoint::from_raw(y);
    }

    Ok(Chromaticities {
        white: point(&white, white_sum)?,
        red: primaries[0],
        green: primaries[1],
        blue: primaries[2],
    })
}

/// Tristimulus values of the primaries, with white Y normalised to 1.0.
///
/// Solves for the red, green and blue scale factors that make the primaries
/// sum to the white point, eliminating blue first. Products of differences
/// are divided by 7 to keep them inside the signed 32-bit range; the factor
/// cancels between numerator and denominator.
///
/// # Errors
///
/// - [`Error::InvalidChromaticity`] for out-of-range coordinates, or for
///   end points so extreme that a scale factor is non-positive
/// - [`Error::ArithmeticOverflow`] when an intermediate does not fit
pub fn xyz_from_xy(c: &Chromaticities) -> Result<Tristimulus> {
    for p in [c.red, c.green, c.blue, c.white] {
        let (x, y) = (p.x.raw(), p.y.raw());
        if !(0..=FP_1).contains(&x) || y < 0 || y > FP_1 - x {
            return Err(Error::InvalidChromaticity("coordinate out of range"));
        }
    }

    let (rx, ry) = (c.red.x.raw(), c.red.y.raw());
    let (gx, gy) = (c.green.x.raw(), c.green.y.raw());
    let (bx, by) = (c.blue.x.raw(), c.blue.y.raw());
    let (wx, wy) = (c.white.x.raw(), c.white.y.raw());

    let extreme = Error::InvalidChromaticity("extreme chromaticities cannot be converted to XYZ");
    let difference = |left: i32, right: i32| -> Result<i32> {
        left.checked_sub(right).ok_or(Error::ArithmeticOverflow {
            operation: "xyz_from_xy",
        })
    };

    let denominator = difference(
        muldiv(gx - bx, ry - by, 7)?,
        muldiv(gy - by, rx - bx, 7)?,
    )?;

    // Both of these are the reciprocal of the scale, which lets the white y
    // multiplication move into the (small) denominator.
    let red_num = difference(
        muldiv(gx - bx, wy - by, 7)?,
        muldiv(gy - by, wx - bx, 7)?,
    )?;
    let red_inverse = muldiv(wy, denominator, red_num).map_err(|_| extreme.clone())?;
    if red_inverse <= wy {
        return Err(extreme);
    }

    let green_num = difference(
        muldiv(ry - by, wx - bx, 7)?,
        muldiv(rx - bx, wy - by, 7)?,
    )?;
    let green_inverse = muldiv(wy, denominator, green_num).map_err(|_| extreme.clone())?;
    if green_inverse <= wy {
        return Err(extreme);
    }

    let blue_scale = reciprocal(c.white.y)?.raw()
        - reciprocal(FixedPoint::from_raw(red_inverse))?.raw()
        - reciprocal(FixedPoint::from_raw(green_inverse))?.raw();
    if blue_scale <= 0 {
        return Err(extreme);
    }

    let scaled_by_inverse = |x: i32, y: i32, inverse: i32| -> Result<Xyz> {
        Ok(Xyz {
            x: FixedPoint::from_raw(muldiv(x, FP_1, inverse)?),
            y: FixedPoint::from_raw(muldiv(y, FP_1, inverse)?),
            z: FixedPoint::from_raw(muldiv(FP_1 - x - y, FP_1, inverse)?),
        })
    };

    Ok(Tristimulus {
        red: scaled_by_inverse(rx, ry, red_inverse)?,
        green: scaled_by_inverse(gx, gy, green_inverse)?,
        blue: Xyz {
            x: FixedPoint::from_raw(muldiv(bx, blue_scale, FP_1)?),
            y: FixedPoint::from_raw(muldiv(by, blue_scale, FP_1)?),
            z: FixedPoint::from_raw(muldiv(FP_1 - bx - by, blue_scale, FP_1)?),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_srgb() {
        assert!(check_chromaticities(&Chromaticities::SRGB).is_ok());
    }

    #[test]
    fn test_check_rejects_degenerate() {
        let mut c = Chromaticities::SRGB;
        c.green = c.red;
        assert!(check_chromaticities(&c).is_err());

        let mut c = Chromaticities::SRGB;
        c.white.y = FixedPoint::ZERO;
        assert!(check_chromaticities(&c).is_err());

        let mut c = Chromaticities::SRGB;
        c.blue = Xy::from_raw(60_000, 50_000);
        assert!(check_chromaticities(&c).is_err());

        let mut c = Chromaticities::SRGB;
        c.red.x = FixedPoint::from_raw(-1);
        assert!(check_chromaticities(&c).is_err());
    }

    #[test]
    fn test_srgb_luminance_coefficients() {
        let t = xyz_from_xy(&Chromaticities::SRGB).unwrap();
        let [r, g, b] = t.luminance_coefficients();
        assert!((r.raw() - 21_264).abs() <= 2, "red Y {}", r);
        assert!((g.raw() - 71_517).abs() <= 2, "green Y {}", g);
        assert!((b.raw() - 7_219).abs() <= 2, "blue Y {}", b);
        // White Y is normalised to 1.0
        assert!((r.raw() + g.raw() + b.raw() - FP_1).abs() <= 3);
    }

    #[test]
    fn test_xyz_xy_roundtrip() {
        let t = xyz_from_xy(&Chromaticities::SRGB).unwrap();
        let c = xy_from_xyz(&t).unwrap();
        let pairs = [
            (c.white, Chromaticities::SRGB.white),
            (c.red, Chromaticities::SRGB.red),
            (c.green, Chromaticities::SRGB.green),
            (c.blue, Chromaticities::SRGB.blue),
        ];
        for (got, want) in pairs {
            assert!((got.x.raw() - want.x.raw()).abs() <= 1, "{got:?} vs {want:?}");
            assert!((got.y.raw() - want.y.raw()).abs() <= 1, "{got:?} vs {want:?}");
        }
    }

    #[test]
    fn test_xyz_from_xy_rejects_out_of_range() {
        let mut c = Chromaticities::SRGB;
        c.red.x = FixedPoint::from_raw(100_001);
        assert!(matches!(
            xyz_from_xy(&c),
            Err(Error::InvalidChromaticity(_))
        ));
    }
}
