//! Per-row gamma correction
//!
//! Rows are corrected in place through a built table. Alpha samples are
//! left alone: gamma describes how light is encoded, and alpha is a
//! coverage fraction, not light.

use crate::error::{GammaError, GammaResult};
use crate::table::{GammaTable, GammaTableSet};
use pngtran_core::RowDescriptor;

/// Gamma-correct one row in place.
///
/// Handles gray rows of 2, 4, 8 and 16 bits, and gray+alpha, RGB and RGBA
/// rows of 8 and 16 bits. 1-bit rows are already at the extremes and are
/// left unchanged. Sub-byte samples are widened to 8 bits by bit
/// replication, looked up, and narrowed back to their high bits.
///
/// # Errors
///
/// - [`GammaError::UnsupportedRow`] for palette rows (correct the palette
///   with [`apply_gamma_palette`] instead) and rows carrying a filler
/// - [`GammaError::TableMismatch`] when the table was built for the other
///   sample size
/// - [`GammaError::Core`] when `row` is shorter than the descriptor says
pub fn apply_gamma(
    row: &mut [u8],
    desc: &RowDescriptor,
    tables: &GammaTableSet,
) -> GammaResult<()> {
    desc.check_buffer(row.len())?;

    let color_type = desc.color_type();
    if color_type.is_palette() {
        return Err(GammaError::UnsupportedRow(
            "palette rows are corrected through the palette".to_string(),
        ));
    }
    if desc.has_filler() {
        return Err(GammaError::UnsupportedRow(
            "gamma correction runs before filler insertion".to_string(),
        ));
    }

    let table = tables.table();
    let bit_depth = desc.bit_depth();
    if (bit_depth == 16) != table.is_16bit() {
        return Err(GammaError::TableMismatch {
            table: table.kind(),
            bit_depth,
        });
    }

    let row = &mut row[..desc.rowbytes()];
    let channels = usize::from(desc.channels());
    let value_channels = if color_type.has_alpha() {
        channels - 1
    } else {
        channels
    };

    match bit_depth {
        1 => {}
        2 | 4 => {
            if let Some(bytes) = table.as_bytes() {
                correct_packed(row, bit_depth, bytes);
            }
        }
        8 => {
            if let Some(bytes) = table.as_bytes() {
                for pixel in row.chunks_exact_mut(channels) {
                    for sample in &mut pixel[..value_channels] {
                        *sample = bytes[usize::from(*sample)];
                    }
                }
            }
        }
        _ => {
            for pixel in row.chunks_exact_mut(channels * 2) {
                for sample in pixel[..value_channels * 2].chunks_exact_mut(2) {
                    let v = u16::from_be_bytes([sample[0], sample[1]]);
                    sample.copy_from_slice(&table.lookup(v).to_be_bytes());
                }
            }
        }
    }

    tracing::trace!(
        width = desc.width(),
        bit_depth,
        channels,
        "gamma corrected row"
    );
    Ok(())
}

/// Correct packed 2- or 4-bit gray samples through an 8-bit table.
fn correct_packed(row: &mut [u8], bit_depth: u8, table: &[u8]) {
    let mask = (1u8 << bit_depth) - 1;
    for byte in row.iter_mut() {
        let mut out = 0u8;
        let mut shift = 8 - bit_depth;
        loop {
            let sample = (*byte >> shift) & mask;
            let mut wide = 0u8;
            let mut fill = 0u8;
            while fill < 8 {
                wide |= sample << (8 - bit_depth - fill);
                fill += bit_depth;
            }
            out |= (table[usize::from(wide)] >> (8 - bit_depth)) << shift;
            if shift == 0 {
                break;
            }
            shift -= bit_depth;
        }
        *byte = out;
    }
}

/// Gamma-correct RGB palette entries in place.
///
/// Requires an 8-bit table.
pub fn apply_gamma_palette(palette: &mut [[u8; 3]], table: &GammaTable) -> GammaResult<()> {
    let bytes = table.as_bytes().ok_or(GammaError::TableMismatch {
        table: table.kind(),
        bit_depth: 8,
    })?;
    for entry in palette.iter_mut() {
        for sample in entry.iter_mut() {
            *sample = bytes[usize::from(*sample)];
        }
    }
    Ok(())
}
