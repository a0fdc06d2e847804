//! Row pipelines
//!
//! The order of the steps is fixed. Each step leaves the descriptor
//! describing the row it produced, so the next step sees the right layout.
//!
//! Writing, from the caller's in-memory layout to PNG sample layout:
//!
//! 1. strip filler
//! 2. packswap
//! 3. pack
//! 4. shift to significant bits
//! 5. swap bytes
//! 6. move alpha last
//! 7. invert alpha
//! 8. BGR
//! 9. invert gray
//!
//! Packswap only touches rows packed below 8 bits. When the row is still 8
//! bits or wider at that point it is skipped, so a row packed by the
//! pipeline is always written MSB-first.
//!
//! Reading runs the inverse steps in the opposite direction, with gamma
//! correction and 16-bit reduction first:
//!
//! 1. gamma
//! 2. strip 16 to 8
//! 3. invert gray
//! 4. invert alpha
//! 5. unshift
//! 6. unpack
//! 7. BGR
//! 8. packswap
//! 9. insert filler
//! 10. move alpha first
//! 11. swap bytes

use crate::error::{TransformError, TransformResult};
use crate::filler::{insert_filler, strip_filler};
use crate::flags::{AlphaPosition, Filler, FillerPosition, TransformFlags};
use crate::pack::{pack_bits, packswap, unpack_bits};
use crate::reorder::bgr;
use crate::shift::{shift_significant_bits, unshift_significant_bits};
use crate::swap::{invert_alpha, invert_mono, strip_16_to_8, swap_alpha, swap_bytes};
use pngtran_core::{RowDescriptor, SigBits};
use pngtran_gamma::{GammaTableSet, apply_gamma};

/// Transforms applied to each row before it is written.
///
/// Flags that only make sense when reading (`FILLER`, `GAMMA`, `STRIP_16`)
/// are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteTransforms {
    /// Steps to run
    pub flags: TransformFlags,
    /// Bit depth to pack to
    pub bit_depth: u8,
    /// Significant bits of the caller's samples
    pub sig_bits: SigBits,
    /// Where the filler to strip sits
    pub filler: FillerPosition,
}

impl Default for WriteTransforms {
    fn default() -> Self {
        Self {
            flags: TransformFlags::empty(),
            bit_depth: 8,
            sig_bits: SigBits::default(),
            filler: FillerPosition::After,
        }
    }
}

impl WriteTransforms {
    /// Create transforms running `flags` with default parameters
    pub fn with_flags(flags: TransformFlags) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    /// Pack to `bit_depth` bits per sample
    pub fn pack_to(mut self, bit_depth: u8) -> Self {
        self.flags |= TransformFlags::PACK;
        self.bit_depth = bit_depth;
        self
    }

    /// Scale samples up from `sig_bits`
    pub fn shift(mut self, sig_bits: SigBits) -> Self {
        self.flags |= TransformFlags::SHIFT;
        self.sig_bits = sig_bits;
        self
    }

    /// Strip a filler at `position`
    pub fn strip_filler(mut self, position: FillerPosition) -> Self {
        self.flags |= TransformFlags::STRIP_FILLER;
        self.filler = position;
        self
    }

    /// Run the enabled steps on one row.
    ///
    /// # Errors
    ///
    /// Fails on the first step that cannot handle the row's layout at that
    /// point; the row and descriptor then hold the output of the steps
    /// before it.
    pub fn apply(&self, row: &mut [u8], desc: &mut RowDescriptor) -> TransformResult<()> {
        let flags = self.flags;
        tracing::trace!(?flags, width = desc.width(), "write transforms");

        if flags.contains(TransformFlags::STRIP_FILLER) {
            strip_filler(row, desc, self.filler)?;
        }
        if flags.contains(TransformFlags::PACKSWAP) && desc.bit_depth() < 8 {
            packswap(row, desc)?;
        }
        if flags.contains(TransformFlags::PACK) {
            pack_bits(row, desc, self.bit_depth)?;
        }
        if flags.contains(TransformFlags::SHIFT) {
            shift_significant_bits(row, desc, &self.sig_bits)?;
        }
        if flags.contains(TransformFlags::SWAP_BYTES) {
            swap_bytes(row, desc)?;
        }
        if flags.contains(TransformFlags::SWAP_ALPHA) {
            swap_alpha(row, desc, AlphaPosition::Last)?;
        }
        if flags.contains(TransformFlags::INVERT_ALPHA) {
            invert_alpha(row, desc)?;
        }
        if flags.contains(TransformFlags::BGR) {
            bgr(row, desc)?;
        }
        if flags.contains(TransformFlags::INVERT_MONO) {
            invert_mono(row, desc)?;
        }
        Ok(())
    }
}

/// Transforms applied to each row after it is read.
///
/// `STRIP_FILLER` is ignored; `PACK` unpacks and `SHIFT` unshifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadTransforms {
    /// Steps to run
    pub flags: TransformFlags,
    /// Significant bits declared by the file
    pub sig_bits: SigBits,
    /// Filler to add
    pub filler: Filler,
}

impl ReadTransforms {
    pub fn with_flags(flags: TransformFlags) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    /// Shift samples down to `sig_bits`
    pub fn shift(mut self, sig_bits: SigBits) -> Self {
        self.flags |= TransformFlags::SHIFT;
        self.sig_bits = sig_bits;
        self
    }

    /// Add `filler` to every pixel
    pub fn filler(mut self, filler: Filler) -> Self {
        self.flags |= TransformFlags::FILLER;
        self.filler = filler;
        self
    }

    /// Run the enabled steps on one row.
    ///
    /// `gamma` must be given when `GAMMA` is set. Steps that widen the row
    /// (unpacking, filler insertion) need `row` to be long enough for the
    /// result.
    pub fn apply(
        &self,
        row: &mut [u8],
        desc: &mut RowDescriptor,
        gamma: Option<&GammaTableSet>,
    ) -> TransformResult<()> {
        let flags = self.flags;
        tracing::trace!(?flags, width = desc.width(), "read transforms");

        if flags.contains(TransformFlags::GAMMA) {
            let tables = gamma.ok_or_else(|| {
                TransformError::InvalidParameter("gamma requested without tables".to_string())
            })?;
            apply_gamma(row, desc, tables)?;
        }
        if flags.contains(TransformFlags::STRIP_16) {
            strip_16_to_8(row, desc)?;
        }
        if flags.contains(TransformFlags::INVERT_MONO) {
            invert_mono(row, desc)?;
        }
        if flags.contains(TransformFlags::INVERT_ALPHA) {
            invert_alpha(row, desc)?;
        }
        if flags.contains(TransformFlags::SHIFT) {
            unshift_significant_bits(row, desc, &self.sig_bits)?;
        }
        if flags.contains(TransformFlags::PACK) {
            unpack_bits(row, desc)?;
        }
        if flags.contains(TransformFlags::BGR) {
            bgr(row, desc)?;
        }
        if flags.contains(TransformFlags::PACKSWAP) && desc.bit_depth() < 8 {
            packswap(row, desc)?;
        }
        if flags.contains(TransformFlags::FILLER) {
            insert_filler(row, desc, self.filler)?;
        }
        if flags.contains(TransformFlags::SWAP_ALPHA) {
            swap_alpha(row, desc, AlphaPosition::First)?;
        }
        if flags.contains(TransformFlags::SWAP_BYTES) {
            swap_bytes(row, desc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pngtran_core::{ColorType, FixedPoint};
    use pngtran_gamma::{GammaRequest, build_gamma_tables};

    #[test]
    fn test_empty_pipelines_do_nothing() {
        let mut desc = RowDescriptor::new(2, ColorType::Rgb, 16).unwrap();
        let before = desc;
        let mut row = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        WriteTransforms::default().apply(&mut row, &mut desc).unwrap();
        ReadTransforms::default().apply(&mut row, &mut desc, None).unwrap();
        assert_eq!(row, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(desc, before);
    }

    #[test]
    fn test_write_rgbx_to_bgr() {
        let transforms = WriteTransforms::with_flags(TransformFlags::BGR)
            .strip_filler(FillerPosition::After);
        let mut desc = RowDescriptor::with_channels(2, ColorType::Rgb, 8, 4).unwrap();
        let mut row = [1, 2, 3, 0, 4, 5, 6, 0];
        transforms.apply(&mut row, &mut desc).unwrap();
        assert_eq!(&row[..6], &[3, 2, 1, 6, 5, 4]);
        assert_eq!(desc.rowbytes(), 6);
    }

    #[test]
    fn test_write_then_read_packed_gray() {
        let sig = SigBits::uniform(1, 0);
        let write = WriteTransforms::default().pack_to(2).shift(sig);
        let mut desc = RowDescriptor::new(4, ColorType::Gray, 8).unwrap();
        let mut row = [1, 0, 1, 1];
        write.apply(&mut row, &mut desc).unwrap();
        assert_eq!(row[0], 0b11_00_11_11);
        assert_eq!(desc.bit_depth(), 2);

        let read = ReadTransforms::with_flags(TransformFlags::PACK).shift(sig);
        read.apply(&mut row, &mut desc, None).unwrap();
        assert_eq!(row, [1, 0, 1, 1]);
        assert_eq!(desc.bit_depth(), 8);
    }

    #[test]
    fn test_write_packswap_with_pack_stays_msb_first() {
        let write = WriteTransforms::with_flags(TransformFlags::PACKSWAP).pack_to(1);
        let mut desc = RowDescriptor::new(8, ColorType::Gray, 8).unwrap();
        let mut row = [1, 1, 0, 0, 0, 0, 0, 0];
        write.apply(&mut row, &mut desc).unwrap();
        assert_eq!(row[0], 0b1100_0000);
        assert_eq!(desc.bit_depth(), 1);

        // A row the caller packed LSB-first is reversed
        let write = WriteTransforms::with_flags(TransformFlags::PACKSWAP);
        let mut desc = RowDescriptor::new(8, ColorType::Gray, 1).unwrap();
        let mut row = [0b0000_0011];
        write.apply(&mut row, &mut desc).unwrap();
        assert_eq!(row[0], 0b1100_0000);
    }

    #[test]
    fn test_read_packswap_skips_unpacked_rows() {
        let read = ReadTransforms::with_flags(TransformFlags::PACK | TransformFlags::PACKSWAP);
        let mut desc = RowDescriptor::new(4, ColorType::Gray, 2).unwrap();
        let mut row = [0b11_00_10_01, 0, 0, 0];
        read.apply(&mut row, &mut desc, None).unwrap();
        assert_eq!(row, [3, 0, 2, 1]);
        assert_eq!(desc.bit_depth(), 8);
    }

    #[test]
    fn test_read_gamma_then_strip_16() {
        let request = GammaRequest {
            reduce_to_8bit: true,
            ..GammaRequest::new(16, ColorType::Gray, FixedPoint::SRGB_GAMMA)
                .with_screen_gamma(FixedPoint::ONE)
        };
        let tables = build_gamma_tables(&request).unwrap();
        let read = ReadTransforms::with_flags(TransformFlags::GAMMA | TransformFlags::STRIP_16);

        let mut desc = RowDescriptor::new(3, ColorType::Gray, 16).unwrap();
        let mut row = [0x00, 0x00, 0x80, 0x00, 0xff, 0xff];
        read.apply(&mut row, &mut desc, Some(&tables)).unwrap();
        assert_eq!(&row[..3], &[0, 56, 255]);
        assert_eq!(desc.bit_depth(), 8);

        let mut desc = RowDescriptor::new(3, ColorType::Gray, 16).unwrap();
        assert!(matches!(
            read.apply(&mut row, &mut desc, None),
            Err(TransformError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_read_argb_with_filler() {
        let read = ReadTransforms::with_flags(TransformFlags::BGR).filler(Filler {
            value: 0xff,
            position: FillerPosition::Before,
        });
        let mut desc = RowDescriptor::new(2, ColorType::Rgb, 8).unwrap();
        let mut row = [1, 2, 3, 4, 5, 6, 0, 0];
        read.apply(&mut row, &mut desc, None).unwrap();
        assert_eq!(row, [0xff, 3, 2, 1, 0xff, 6, 5, 4]);
        assert!(desc.has_filler());
    }

    #[test]
    fn test_failing_step_is_reported() {
        let write = WriteTransforms::with_flags(TransformFlags::SWAP_BYTES);
        let mut desc = RowDescriptor::new(2, ColorType::Gray, 8).unwrap();
        assert_eq!(
            write.apply(&mut [0; 2], &mut desc),
            Err(TransformError::InvalidGeometry {
                operation: "swap_bytes",
                bit_depth: 8,
                channels: 1,
            })
        );
    }
}
