//! Significant-bit scaling
//!
//! A sample with `sig` significant bits at bit depth `depth` is written as
//! its value scaled to the full depth: the significant bits move to the top
//! and are repeated below themselves until the sample is filled (3 bits
//! `abc` at depth 8 become `abcabcab`). Reading undoes this by shifting the
//! sample right again.

use crate::error::{TransformError, TransformResult};
use pngtran_core::{RowDescriptor, SigBits};

/// Significant bits per sample for the row, in sample order.
fn channel_bits(
    desc: &RowDescriptor,
    sig_bits: &SigBits,
    operation: &'static str,
) -> TransformResult<([u8; 4], usize)> {
    let color_type = desc.color_type();
    if color_type.is_palette() || desc.has_filler() {
        return Err(TransformError::geometry(operation, desc));
    }
    sig_bits.validate(color_type, desc.bit_depth())?;
    Ok(sig_bits.channel_bits(color_type))
}

/// OR together copies of `v` shifted left by `start`, `start - bits`, ...
/// down to the first copy shifted right; right-shifted copies go through
/// `mask`.
fn replicate(v: u32, start: i32, bits: i32, mask: u32, max: u32) -> u32 {
    let mut out = 0;
    let mut j = start;
    while j > -bits {
        if j > 0 {
            out |= (v << j) & max;
        } else {
            out |= (v >> -j) & mask;
        }
        j -= bits;
    }
    out
}

/// Scale each sample up from its significant bits to the row's bit depth.
///
/// Samples are expected to hold values below `2^sig` for their channel.
/// Palette rows are not shifted: their entries are always 8 bits.
///
/// # Errors
///
/// - [`TransformError::InvalidGeometry`] for palette rows and rows with a
///   filler
/// - [`TransformError::Core`] when a count lies outside `1..=bit_depth`
pub fn shift_significant_bits(
    row: &mut [u8],
    desc: &RowDescriptor,
    sig_bits: &SigBits,
) -> TransformResult<()> {
    let (bits, channels) = channel_bits(desc, sig_bits, "shift_significant_bits")?;
    desc.check_buffer(row.len())?;

    let bit_depth = desc.bit_depth();
    let depth = i32::from(bit_depth);
    let row = &mut row[..desc.rowbytes()];

    match bit_depth {
        1 | 2 | 4 => {
            let sig = bits[0];
            if sig == bit_depth {
                return Ok(());
            }
            // Fragments shifted right must not spill into the neighbouring sample
            let mask = match (bit_depth, sig) {
                (2, 1) => 0x55,
                (4, 3) => 0x11,
                _ => 0xff,
            };
            let start = depth - i32::from(sig);
            for byte in row.iter_mut() {
                *byte = replicate(u32::from(*byte), start, i32::from(sig), mask, 0xff) as u8;
            }
        }
        8 => {
            for pixel in row.chunks_exact_mut(channels) {
                for (sample, &sig) in pixel.iter_mut().zip(&bits[..channels]) {
                    let start = depth - i32::from(sig);
                    let v = u32::from(*sample);
                    *sample = replicate(v, start, i32::from(sig), 0xff, 0xff) as u8;
                }
            }
        }
        _ => {
            for pixel in row.chunks_exact_mut(channels * 2) {
                for (sample, &sig) in pixel.chunks_exact_mut(2).zip(&bits[..channels]) {
                    let v = u32::from(u16::from_be_bytes([sample[0], sample[1]]));
                    let start = depth - i32::from(sig);
                    let value = replicate(v, start, i32::from(sig), 0xffff, 0xffff) as u16;
                    sample.copy_from_slice(&value.to_be_bytes());
                }
            }
        }
    }
    Ok(())
}

/// Shift each sample right from the row's bit depth down to its significant
/// bits.
///
/// A row whose counts all equal the bit depth is left alone.
pub fn unshift_significant_bits(
    row: &mut [u8],
    desc: &RowDescriptor,
    sig_bits: &SigBits,
) -> TransformResult<()> {
    let (bits, channels) = channel_bits(desc, sig_bits, "unshift_significant_bits")?;
    desc.check_buffer(row.len())?;

    let bit_depth = desc.bit_depth();
    let mut shifts = [0u8; 4];
    for (shift, &sig) in shifts.iter_mut().zip(&bits[..channels]) {
        *shift = bit_depth - sig;
    }
    if shifts.iter().all(|&s| s == 0) {
        return Ok(());
    }

    let row = &mut row[..desc.rowbytes()];
    match bit_depth {
        2 => {
            for byte in row.iter_mut() {
                *byte = (*byte >> 1) & 0x55;
            }
        }
        4 => {
            let s = shifts[0];
            let mask = (0x0f >> s) | ((0x0f >> s) << 4);
            for byte in row.iter_mut() {
                *byte = (*byte >> s) & mask;
            }
        }
        8 => {
            for pixel in row.chunks_exact_mut(channels) {
                for (sample, &s) in pixel.iter_mut().zip(&shifts[..channels]) {
                    *sample >>= s;
                }
            }
        }
        _ => {
            for pixel in row.chunks_exact_mut(channels * 2) {
                for (sample, &s) in pixel.chunks_exact_mut(2).zip(&shifts[..channels]) {
                    let value = u16::from_be_bytes([sample[0], sample[1]]) >> s;
                    sample.copy_from_slice(&value.to_be_bytes());
                }
            }
        }
    }
    Ok(())
}
