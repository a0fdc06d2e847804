//! pngtran core - Fixed-point arithmetic and row geometry
//!
//! This crate provides the foundations shared by the pngtran transform
//! crates:
//!
//! - [`FixedPoint`] - Real values scaled by 100000, with exact rounded
//!   [`muldiv`] and reciprocal/product helpers
//! - [`Chromaticities`] / [`Tristimulus`] - Color space end points and
//!   their fixed-point conversions
//! - [`ColorType`] / [`RowDescriptor`] - Row layout that transform steps
//!   read and update
//! - [`SigBits`] - Per-channel significant-bit counts
//!
//! # See also
//!
//! PNG specification, sections 11.2.2 (IHDR), 11.3.3 (gAMA, cHRM, sBIT)

pub mod colorspace;
pub mod error;
pub mod fixed;
pub mod row;
pub mod sig_bit;

pub use colorspace::{
    Chromaticities, Tristimulus, Xy, Xyz, check_chromaticities, xy_from_xyz, xyz_from_xy,
};
pub use error::{Error, Result};
pub use fixed::{
    FixedPoint, muldiv, muldiv_narrow, muldiv_warn, product2, reciprocal, reciprocal2,
};
pub use row::{ColorType, RowDescriptor, VALID_BIT_DEPTHS, rowbytes_for};
pub use sig_bit::SigBits;
