//! Per-sample rewrites: byte order, inversion, alpha placement and 16-bit
//! reduction.

use crate::error::{TransformError, TransformResult};
use crate::flags::AlphaPosition;
use pngtran_core::{ColorType, RowDescriptor};

/// Swap the two bytes of every 16-bit sample.
pub fn swap_bytes(row: &mut [u8], desc: &RowDescriptor) -> TransformResult<()> {
    if desc.bit_depth() != 16 {
        return Err(TransformError::geometry("swap_bytes", desc));
    }
    desc.check_buffer(row.len())?;
    for sample in row[..desc.rowbytes()].chunks_exact_mut(2) {
        sample.swap(0, 1);
    }
    Ok(())
}

/// Invert gray samples, so that 0 becomes white.
///
/// Gray rows of any depth are inverted whole; gray+alpha rows keep their
/// alpha.
pub fn invert_mono(row: &mut [u8], desc: &RowDescriptor) -> TransformResult<()> {
    desc.check_buffer(row.len())?;
    let row = &mut row[..desc.rowbytes()];
    match (desc.color_type(), desc.has_filler()) {
        (ColorType::Gray, false) => {
            for byte in row.iter_mut() {
                *byte = !*byte;
            }
        }
        (ColorType::GrayAlpha, _) => {
            let bps = usize::from(desc.bit_depth() / 8);
            for pixel in row.chunks_exact_mut(2 * bps) {
                for byte in &mut pixel[..bps] {
                    *byte = !*byte;
                }
            }
        }
        _ => return Err(TransformError::geometry("invert_mono", desc)),
    }
    Ok(())
}

/// Replace alpha with `max - alpha`, turning opacity into transparency.
///
/// Alpha is the last sample of each pixel.
pub fn invert_alpha(row: &mut [u8], desc: &RowDescriptor) -> TransformResult<()> {
    if !desc.color_type().has_alpha() {
        return Err(TransformError::geometry("invert_alpha", desc));
    }
    desc.check_buffer(row.len())?;

    let bps = usize::from(desc.bit_depth() / 8);
    let stride = usize::from(desc.channels()) * bps;
    for pixel in row[..desc.rowbytes()].chunks_exact_mut(stride) {
        for byte in &mut pixel[stride - bps..] {
            *byte = !*byte;
        }
    }
    Ok(())
}

/// Move alpha to the front (RGBA to ARGB, GA to AG) or to the back.
pub fn swap_alpha(row: &mut [u8], desc: &RowDescriptor, to: AlphaPosition) -> TransformResult<()> {
    if !desc.color_type().has_alpha() {
        return Err(TransformError::geometry("swap_alpha", desc));
    }
    desc.check_buffer(row.len())?;

    let bps = usize::from(desc.bit_depth() / 8);
    let stride = usize::from(desc.channels()) * bps;
    for pixel in row[..desc.rowbytes()].chunks_exact_mut(stride) {
        match to {
            AlphaPosition::First => pixel.rotate_right(bps),
            AlphaPosition::Last => pixel.rotate_left(bps),
        }
    }
    Ok(())
}

/// Reduce 16-bit samples to 8 bits by dropping the low byte.
pub fn strip_16_to_8(row: &mut [u8], desc: &mut RowDescriptor) -> TransformResult<()> {
    reduce_16_to_8(row, desc, "strip_16_to_8", |hi, _| hi)
}

/// Reduce 16-bit samples to 8 bits with rounding: `round(v * 255 / 65535)`.
pub fn scale_16_to_8(row: &mut [u8], desc: &mut RowDescriptor) -> TransformResult<()> {
    reduce_16_to_8(row, desc, "scale_16_to_8", |hi, lo| {
        let v = u32::from(u16::from_be_bytes([hi, lo]));
        ((v + 128) / 257) as u8
    })
}

fn reduce_16_to_8(
    row: &mut [u8],
    desc: &mut RowDescriptor,
    operation: &'static str,
    reduce: impl Fn(u8, u8) -> u8,
) -> TransformResult<()> {
    if desc.bit_depth() != 16 {
        return Err(TransformError::geometry(operation, desc));
    }
    desc.check_buffer(row.len())?;

    let samples = desc.rowbytes() / 2;
    for i in 0..samples {
        row[i] = reduce(row[2 * i], row[2 * i + 1]);
    }
    desc.set_layout(8, desc.channels())?;
    Ok(())
}
