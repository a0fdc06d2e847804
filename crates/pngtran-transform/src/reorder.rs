//! Channel order
//!
//! PNG stores color samples as R, G, B followed by alpha. Callers that
//! want another in-memory order describe it with a [`ChannelOrder`].

use crate::error::{TransformError, TransformResult};
use crate::flags::AlphaPosition;
use crate::swap::swap_alpha;
use pngtran_core::{ColorType, RowDescriptor};

/// In-memory sample order of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelOrder {
    /// Blue first instead of red
    pub bgr: bool,
    /// Alpha before the color samples instead of after them
    pub alpha_first: bool,
}

impl ChannelOrder {
    pub const PNG: ChannelOrder = ChannelOrder {
        bgr: false,
        alpha_first: false,
    };

    pub fn is_png(&self) -> bool {
        *self == Self::PNG
    }
}

/// Swap red and blue in every pixel of an RGB or RGBA row.
///
/// A trailing filler sample is carried along.
pub fn bgr(row: &mut [u8], desc: &RowDescriptor) -> TransformResult<()> {
    let color_ok = matches!(desc.color_type(), ColorType::Rgb | ColorType::Rgba);
    if !color_ok || desc.bit_depth() < 8 {
        return Err(TransformError::geometry("bgr", desc));
    }
    desc.check_buffer(row.len())?;

    let bps = usize::from(desc.bit_depth() / 8);
    let stride = usize::from(desc.channels()) * bps;
    for pixel in row[..desc.rowbytes()].chunks_exact_mut(stride) {
        for k in 0..bps {
            pixel.swap(k, 2 * bps + k);
        }
    }
    Ok(())
}

fn check_order(
    desc: &RowDescriptor,
    order: ChannelOrder,
    operation: &'static str,
) -> TransformResult<()> {
    let color_type = desc.color_type();
    let bgr_ok = !order.bgr || matches!(color_type, ColorType::Rgb | ColorType::Rgba);
    let alpha_ok = !order.alpha_first || color_type.has_alpha();
    if bgr_ok && alpha_ok {
        Ok(())
    } else {
        Err(TransformError::geometry(operation, desc))
    }
}

/// Rearrange a row from PNG order into `order`.
///
/// ```
/// use pngtran_core::{ColorType, RowDescriptor};
/// use pngtran_transform::{ChannelOrder, reorder_channels};
///
/// let desc = RowDescriptor::new(1, ColorType::Rgba, 8).unwrap();
/// let mut row = [10, 20, 30, 40];
/// let order = ChannelOrder { bgr: true, alpha_first: false };
/// reorder_channels(&mut row, &desc, order).unwrap();
/// assert_eq!(row, [30, 20, 10, 40]);
/// ```
pub fn reorder_channels(
    row: &mut [u8],
    desc: &RowDescriptor,
    order: ChannelOrder,
) -> TransformResult<()> {
    check_order(desc, order, "reorder_channels")?;
    if order.is_png() {
        return Ok(());
    }
    if order.bgr {
        bgr(row, desc)?;
    }
    if order.alpha_first {
        swap_alpha(row, desc, AlphaPosition::First)?;
    }
    Ok(())
}

/// Rearrange a row from `order` back into PNG order.
pub fn restore_channel_order(
    row: &mut [u8],
    desc: &RowDescriptor,
    order: ChannelOrder,
) -> TransformResult<()> {
    check_order(desc, order, "restore_channel_order")?;
    if order.is_png() {
        return Ok(());
    }
    if order.alpha_first {
        swap_alpha(row, desc, AlphaPosition::Last)?;
    }
    if order.bgr {
        bgr(row, desc)?;
    }
    Ok(())
}
