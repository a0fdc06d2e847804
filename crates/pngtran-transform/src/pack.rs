//! Sub-byte packing
//!
//! Gray and palette rows of 1, 2 or 4 bits per sample are handled one
//! sample per byte in memory. [`pack_bits`] squeezes them back into
//! most-significant-first packed bytes before writing, [`unpack_bits`]
//! spreads them out after reading. [`packswap`] flips the packed order to
//! least-significant-first.

use crate::error::{TransformError, TransformResult};
use pngtran_core::RowDescriptor;

/// Pack a one-sample-per-byte row down to `bit_depth` bits per sample.
///
/// For 1-bit output any nonzero byte becomes a set bit; for 2 and 4 bits
/// the low bits of each byte are kept. A trailing partial byte is padded
/// with zero bits. Packing to 8 bits leaves the row alone.
pub fn pack_bits(row: &mut [u8], desc: &mut RowDescriptor, bit_depth: u8) -> TransformResult<()> {
    if desc.bit_depth() != 8 || desc.channels() != 1 {
        return Err(TransformError::geometry("pack_bits", desc));
    }
    if !matches!(bit_depth, 1 | 2 | 4 | 8) {
        return Err(TransformError::InvalidParameter(format!(
            "cannot pack to {bit_depth} bits"
        )));
    }
    desc.check_buffer(row.len())?;
    if bit_depth == 8 {
        return Ok(());
    }

    let width = desc.width() as usize;
    let per_byte = usize::from(8 / bit_depth);
    let mask = (1u8 << bit_depth) - 1;
    let first_shift = 8 - bit_depth;

    let mut packed = 0u8;
    let mut shift = first_shift;
    for i in 0..width {
        let sample = if bit_depth == 1 {
            u8::from(row[i] != 0)
        } else {
            row[i] & mask
        };
        packed |= sample << shift;
        if shift == 0 {
            row[i / per_byte] = packed;
            packed = 0;
            shift = first_shift;
        } else {
            shift -= bit_depth;
        }
    }
    if shift != first_shift {
        row[width / per_byte] = packed;
    }

    desc.set_layout(bit_depth, 1)?;
    Ok(())
}

/// Expand a packed 1-, 2- or 4-bit row to one sample per byte.
///
/// Samples keep their values (a 1-bit row becomes 0s and 1s). `row` must be
/// at least `width` bytes long.
pub fn unpack_bits(row: &mut [u8], desc: &mut RowDescriptor) -> TransformResult<()> {
    let bit_depth = desc.bit_depth();
    if bit_depth >= 8 || desc.channels() != 1 {
        return Err(TransformError::geometry("unpack_bits", desc));
    }
    let mut widened = *desc;
    widened.set_layout(8, 1)?;
    widened.check_buffer(row.len())?;

    let per_byte = usize::from(8 / bit_depth);
    let mask = (1u8 << bit_depth) - 1;
    for i in (0..desc.width() as usize).rev() {
        let shift = 8 - bit_depth * (i % per_byte + 1) as u8;
        row[i] = (row[i / per_byte] >> shift) & mask;
    }

    *desc = widened;
    Ok(())
}

/// Reverse the order of the pixels packed in each byte.
pub fn packswap(row: &mut [u8], desc: &RowDescriptor) -> TransformResult<()> {
    let bit_depth = desc.bit_depth();
    if bit_depth >= 8 {
        return Err(TransformError::geometry("packswap", desc));
    }
    desc.check_buffer(row.len())?;

    for byte in &mut row[..desc.rowbytes()] {
        *byte = match bit_depth {
            1 => byte.reverse_bits(),
            2 => {
                let b = *byte;
                ((b & 0x03) << 6) | ((b & 0x0c) << 2) | ((b & 0x30) >> 2) | ((b & 0xc0) >> 6)
            }
            _ => byte.rotate_left(4),
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pngtran_core::ColorType;
    use pngtran_test::fixtures::random_samples;

    #[test]
    fn test_pack_1bit() {
        let mut desc = RowDescriptor::new(10, ColorType::Gray, 8).unwrap();
        let mut row = [1, 0, 0, 7, 1, 1, 0, 1, 255, 0];
        pack_bits(&mut row, &mut desc, 1).unwrap();
        assert_eq!(&row[..2], &[0b1001_1101, 0b1000_0000]);
        assert_eq!(desc.bit_depth(), 1);
        assert_eq!(desc.rowbytes(), 2);
    }

    #[test]
    fn test_pack_2bit_and_4bit() {
        let mut desc = RowDescriptor::new(5, ColorType::Palette, 8).unwrap();
        let mut row = [3, 2, 1, 0, 2];
        pack_bits(&mut row, &mut desc, 2).unwrap();
        assert_eq!(&row[..2], &[0b11_10_01_00, 0b10_00_00_00]);

        let mut desc = RowDescriptor::new(3, ColorType::Gray, 8).unwrap();
        let mut row = [0x0a, 0xf5, 0x03];
        pack_bits(&mut row, &mut desc, 4).unwrap();
        assert_eq!(&row[..2], &[0xa5, 0x30]);
        assert_eq!(desc.pixel_depth(), 4);
    }

    #[test]
    fn test_pack_round_trip() {
        for bit_depth in [1u8, 2, 4] {
            for width in [1u32, 7, 8, 9, 33] {
                let max = (1u8 << bit_depth) - 1;
                let samples = random_samples(width as usize, max, width + u32::from(bit_depth));
                let mut row = samples.clone();
                let mut desc = RowDescriptor::new(width, ColorType::Gray, 8).unwrap();

                pack_bits(&mut row, &mut desc, bit_depth).unwrap();
                assert_eq!(desc.bit_depth(), bit_depth);
                unpack_bits(&mut row, &mut desc).unwrap();
                assert_eq!(row, samples, "depth {bit_depth} width {width}");
                assert_eq!(desc.rowbytes(), width as usize);
            }
        }
    }

    #[test]
    fn test_packswap() {
        let desc = RowDescriptor::new(8, ColorType::Gray, 1).unwrap();
        let mut row = [0b1100_0001];
        packswap(&mut row, &desc).unwrap();
        assert_eq!(row, [0b1000_0011]);

        let desc = RowDescriptor::new(4, ColorType::Gray, 2).unwrap();
        let mut row = [0b00_01_10_11];
        packswap(&mut row, &desc).unwrap();
        assert_eq!(row, [0b11_10_01_00]);

        let desc = RowDescriptor::new(4, ColorType::Gray, 4).unwrap();
        let mut row = [0x12, 0x34];
        packswap(&mut row, &desc).unwrap();
        assert_eq!(row, [0x21, 0x43]);
    }

    #[test]
    fn test_rejections() {
        let mut desc = RowDescriptor::new(2, ColorType::Rgb, 8).unwrap();
        assert!(matches!(
            pack_bits(&mut [0; 6], &mut desc, 1),
            Err(TransformError::InvalidGeometry { .. })
        ));

        let mut desc = RowDescriptor::new(2, ColorType::Gray, 8).unwrap();
        assert!(matches!(
            pack_bits(&mut [0; 2], &mut desc, 3),
            Err(TransformError::InvalidParameter(_))
        ));
        assert!(unpack_bits(&mut [0; 2], &mut desc).is_err());
        assert!(packswap(&mut [0; 2], &desc).is_err());

        // Unpacking needs a byte per sample
        let mut desc = RowDescriptor::new(9, ColorType::Gray, 1).unwrap();
        assert!(matches!(
            unpack_bits(&mut [0; 2], &mut desc),
            Err(TransformError::Core(_))
        ));
        assert_eq!(desc.bit_depth(), 1);
    }
}
