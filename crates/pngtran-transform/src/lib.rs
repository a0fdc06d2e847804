//! pngtran-transform - Row pixel-format conversions
//!
//! Converts rows between the caller's in-memory layout and PNG's sample
//! layout. Every function mutates a row buffer together with its
//! [`RowDescriptor`](pngtran_core::RowDescriptor):
//!
//! - Filler channels (RGBX / XRGB)
//! - Sub-byte packing and unpacking, packed pixel order
//! - Significant-bit scaling
//! - 16-bit byte order and 16 to 8 bit reduction
//! - Channel order (BGR, alpha first)
//! - Gray and alpha inversion
//!
//! [`WriteTransforms`] and [`ReadTransforms`] run a selection of these, in
//! a fixed order, on each row.
//!
//! # Example
//!
//! ```
//! use pngtran_core::{ColorType, RowDescriptor};
//! use pngtran_transform::{FillerPosition, TransformFlags, WriteTransforms};
//!
//! let transforms = WriteTransforms::with_flags(TransformFlags::BGR)
//!     .strip_filler(FillerPosition::After);
//! let mut desc = RowDescriptor::with_channels(1, ColorType::Rgb, 8, 4).unwrap();
//! let mut row = [10, 20, 30, 255];
//! transforms.apply(&mut row, &mut desc).unwrap();
//! assert_eq!(&row[..3], &[30, 20, 10]);
//! assert_eq!(desc.channels(), 3);
//! ```

mod error;
pub mod filler;
pub mod flags;
pub mod pack;
pub mod pipeline;
pub mod reorder;
pub mod shift;
pub mod swap;

pub use error::{TransformError, TransformResult};
pub use filler::{insert_filler, strip_filler};
pub use flags::{AlphaPosition, Filler, FillerPosition, TransformFlags};
pub use pack::{pack_bits, packswap, unpack_bits};
pub use pipeline::{ReadTransforms, WriteTransforms};
pub use reorder::{ChannelOrder, bgr, reorder_channels, restore_channel_order};
pub use shift::{shift_significant_bits, unshift_significant_bits};
pub use swap::{invert_alpha, invert_mono, scale_16_to_8, strip_16_to_8, swap_alpha, swap_bytes};
