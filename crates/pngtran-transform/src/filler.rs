//! Filler channels
//!
//! A filler is a padding sample that turns RGB into RGBX / XRGB (or gray
//! into GX / XG) so that pixels sit on 32- or 64-bit boundaries in memory.
//! Writers strip it before the row is encoded; readers add it back.

use crate::error::{TransformError, TransformResult};
use crate::flags::{Filler, FillerPosition};
use pngtran_core::{ColorType, RowDescriptor};

/// Remove the filler sample from every pixel.
///
/// The row must carry one channel more than its gray or RGB color type,
/// at 8 or 16 bits per sample.
pub fn strip_filler(
    row: &mut [u8],
    desc: &mut RowDescriptor,
    position: FillerPosition,
) -> TransformResult<()> {
    let bit_depth = desc.bit_depth();
    if !desc.has_filler() || bit_depth < 8 {
        return Err(TransformError::geometry("strip_filler", desc));
    }
    desc.check_buffer(row.len())?;

    let bps = usize::from(bit_depth / 8);
    let channels = desc.channels();
    let src_stride = usize::from(channels) * bps;
    let dst_stride = src_stride - bps;
    let skip = match position {
        FillerPosition::Before => bps,
        FillerPosition::After => 0,
    };

    for i in 0..desc.width() as usize {
        let src = i * src_stride + skip;
        row.copy_within(src..src + dst_stride, i * dst_stride);
    }

    desc.set_layout(bit_depth, channels - 1)?;
    Ok(())
}

/// Add a filler sample to every pixel of a gray or RGB row.
///
/// `row` must already be long enough for the widened row.
pub fn insert_filler(
    row: &mut [u8],
    desc: &mut RowDescriptor,
    filler: Filler,
) -> TransformResult<()> {
    let bit_depth = desc.bit_depth();
    let color_ok = matches!(desc.color_type(), ColorType::Gray | ColorType::Rgb);
    if !color_ok || desc.has_filler() || bit_depth < 8 {
        return Err(TransformError::geometry("insert_filler", desc));
    }

    let mut widened = *desc;
    widened.set_layout(bit_depth, desc.channels() + 1)?;
    widened.check_buffer(row.len())?;

    let bps = usize::from(bit_depth / 8);
    let src_stride = usize::from(desc.channels()) * bps;
    let dst_stride = src_stride + bps;
    let be = filler.value.to_be_bytes();
    let pad: &[u8] = if bps == 1 { &be[1..] } else { &be };

    for i in (0..desc.width() as usize).rev() {
        let src = i * src_stride;
        let dst = i * dst_stride;
        match filler.position {
            FillerPosition::After => {
                row.copy_within(src..src + src_stride, dst);
                row[dst + src_stride..dst + dst_stride].copy_from_slice(pad);
            }
            FillerPosition::Before => {
                row.copy_within(src..src + src_stride, dst + bps);
                row[dst..dst + bps].copy_from_slice(pad);
            }
        }
    }

    *desc = widened;
    Ok(())
}
