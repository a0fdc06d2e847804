//! pngtran gamma - Gamma correction without floating point
//!
//! Gamma exponents arrive as [`FixedPoint`](pngtran_core::FixedPoint)
//! ratios. Samples are corrected through fixed-point base-2 logarithms and
//! exponentials accurate to one unit at 16 bits, and whole rows through
//! lookup tables built once per image:
//!
//! - [`log8bit`] / [`log16bit`] / [`exp`] - fixed-point log and exp
//! - [`gamma_8bit_correct`] / [`gamma_16bit_correct`] - one sample
//! - [`build_gamma_tables`] / [`GammaTables`] - per-image table sets
//! - [`apply_gamma`] - correct one row in place
//! - [`srgb_to_linear`] / [`linear_to_srgb`] - sRGB transfer tables
//!
//! # Features
//!
//! - `floating-arithmetic`: correct samples with `f64::powf`
//!
//! # Example
//!
//! ```
//! use pngtran_core::{ColorType, FixedPoint, RowDescriptor};
//! use pngtran_gamma::{GammaRequest, apply_gamma, build_gamma_tables};
//!
//! let request = GammaRequest::new(8, ColorType::Rgb, FixedPoint::SRGB_GAMMA)
//!     .with_screen_gamma(FixedPoint::ONE);
//! let tables = build_gamma_tables(&request).unwrap();
//!
//! let desc = RowDescriptor::new(1, ColorType::Rgb, 8).unwrap();
//! let mut row = [0, 128, 255];
//! apply_gamma(&mut row, &desc, &tables).unwrap();
//! assert_eq!(row, [0, 56, 255]);
//! ```

pub mod apply;
pub mod correct;
pub mod error;
pub mod exp;
pub mod log;
pub mod srgb;
pub mod table;

pub use apply::{apply_gamma, apply_gamma_palette};
pub use correct::{
    GAMMA_THRESHOLD_FIXED, MAX_GAMMA_8, gamma_16bit_correct, gamma_16bit_correct_fixed,
    gamma_16bit_correct_float, gamma_8bit_correct, gamma_8bit_correct_fixed,
    gamma_8bit_correct_float, gamma_correct, gamma_significant,
};
pub use error::{GammaError, GammaResult};
pub use exp::{exp, exp8bit, exp16bit};
pub use log::{log8bit, log16bit};
pub use srgb::{linear_to_srgb, srgb_decode, srgb_encode, srgb_from_scaled_linear, srgb_to_linear};
pub use table::{
    GammaRequest, GammaTable, GammaTableSet, GammaTables, TableBuild, build_16bit_table,
    build_16to8_table, build_8bit_table, build_gamma_tables, gamma_shift,
};
