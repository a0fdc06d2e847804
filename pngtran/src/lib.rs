//! pngtran - PNG row transforms for Rust
//!
//! The sample-level half of a PNG codec: gamma correction without floating
//! point, and the row conversions between PNG's sample layout and the
//! layouts applications keep in memory. Chunk parsing and compression live
//! elsewhere; everything here works on one row at a time.
//!
//! # Overview
//!
//! - Fixed-point ratios and row geometry (re-exported from `pngtran-core`)
//! - Gamma tables and sRGB transfer tables ([`gamma`])
//! - Filler, packing, significant bits, byte order and channel order
//!   ([`transform`])
//!
//! # Example
//!
//! ```
//! use pngtran::gamma::{GammaRequest, build_gamma_tables};
//! use pngtran::transform::{ReadTransforms, TransformFlags};
//! use pngtran::{ColorType, FixedPoint, RowDescriptor};
//!
//! let request = GammaRequest::new(8, ColorType::Rgba, FixedPoint::SRGB_GAMMA)
//!     .with_screen_gamma(FixedPoint::ONE);
//! let tables = build_gamma_tables(&request).unwrap();
//!
//! let read = ReadTransforms::with_flags(TransformFlags::GAMMA | TransformFlags::BGR);
//! let mut desc = RowDescriptor::new(1, ColorType::Rgba, 8).unwrap();
//! let mut row = [128, 0, 255, 128];
//! read.apply(&mut row, &mut desc, Some(&tables)).unwrap();
//! assert_eq!(row, [255, 0, 56, 128]);
//! ```

// Re-export core types (used by every crate)
pub use pngtran_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pngtran_gamma as gamma;
pub use pngtran_transform as transform;
