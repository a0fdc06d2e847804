//! Row geometry
//!
//! A [`RowDescriptor`] records the layout of one row of samples as it moves
//! through the transform steps: width, color type, bit depth, channel count
//! and the derived pixel depth and byte length. Transforms read the layout
//! from the descriptor and write the new layout back through
//! [`RowDescriptor::set_layout`] as soon as they change it.
//!
//! # See also
//!
//! PNG specification, section 11.2.2 (IHDR color type and bit depth)

use crate::error::{Error, Result};

/// Bit depths a sample may have.
pub const VALID_BIT_DEPTHS: [u8; 5] = [1, 2, 4, 8, 16];

/// PNG color type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColorType {
    /// Grayscale
    Gray = 0,
    /// Red, green, blue
    Rgb = 2,
    /// Palette indices
    Palette = 3,
    /// Grayscale with alpha
    GrayAlpha = 4,
    /// Red, green, blue, alpha
    Rgba = 6,
}

impl ColorType {
    /// Color type from its numeric code.
    pub fn from_u8(code: u8) -> Result<Self> {
        match code {
            0 => Ok(ColorType::Gray),
            2 => Ok(ColorType::Rgb),
            3 => Ok(ColorType::Palette),
            4 => Ok(ColorType::GrayAlpha),
            6 => Ok(ColorType::Rgba),
            _ => Err(Error::InvalidColorType(code)),
        }
    }

    /// Numeric code.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Number of samples per pixel.
    pub fn channels(self) -> u8 {
        match self {
            ColorType::Gray | ColorType::Palette => 1,
            ColorType::GrayAlpha => 2,
            ColorType::Rgb => 3,
            ColorType::Rgba => 4,
        }
    }

    /// Whether samples carry red, green and blue (palette entries do).
    pub fn is_color(self) -> bool {
        matches!(self, ColorType::Rgb | ColorType::Palette | ColorType::Rgba)
    }

    /// Whether the last sample of each pixel is alpha.
    pub fn has_alpha(self) -> bool {
        matches!(self, ColorType::GrayAlpha | ColorType::Rgba)
    }

    pub fn is_palette(self) -> bool {
        self == ColorType::Palette
    }

    /// Check that `bit_depth` is legal for this color type.
    ///
    /// Gray allows 1, 2, 4, 8 and 16; palette allows 1, 2, 4 and 8; the
    /// remaining types allow 8 and 16.
    pub fn check_bit_depth(self, bit_depth: u8) -> Result<()> {
        if !VALID_BIT_DEPTHS.contains(&bit_depth) {
            return Err(Error::InvalidBitDepth(bit_depth));
        }
        let ok = match self {
            ColorType::Gray => true,
            ColorType::Palette => bit_depth <= 8,
            ColorType::Rgb | ColorType::GrayAlpha | ColorType::Rgba => bit_depth >= 8,
        };
        if ok {
            Ok(())
        } else {
            Err(Error::InvalidColorDepth {
                color_type: self.code(),
                bit_depth,
            })
        }
    }
}

/// Bytes needed for `width` pixels of `pixel_depth` bits.
///
/// Pixels of a byte or more are counted whole; sub-byte pixels are rounded
/// up to the next byte boundary.
pub fn rowbytes_for(width: u32, pixel_depth: u8) -> Result<usize> {
    let overflow = || Error::InvalidGeometry(format!("{width} pixels of {pixel_depth} bits"));
    let bits = u64::from(width) * u64::from(pixel_depth);
    let bytes = if pixel_depth >= 8 {
        u64::from(width) * u64::from(pixel_depth >> 3)
    } else {
        bits.div_ceil(8)
    };
    usize::try_from(bytes).map_err(|_| overflow())
}

/// Layout of one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowDescriptor {
    width: u32,
    color_type: ColorType,
    bit_depth: u8,
    channels: u8,
    pixel_depth: u8,
    rowbytes: usize,
}

impl RowDescriptor {
    /// Describe a row of `width` pixels in the layout of `color_type`.
    ///
    /// # Errors
    ///
    /// Fails if the color type and bit depth cannot be combined.
    pub fn new(width: u32, color_type: ColorType, bit_depth: u8) -> Result<Self> {
        color_type.check_bit_depth(bit_depth)?;
        Self::build(width, color_type, bit_depth, color_type.channels())
    }

    /// Describe a row that carries an extra filler channel, or that has been
    /// widened some other way, beyond what `color_type` implies.
    ///
    /// `channels` may be the color type's own count, or one more when the
    /// color type has no alpha and the depth is 8 or 16.
    pub fn with_channels(
        width: u32,
        color_type: ColorType,
        bit_depth: u8,
        channels: u8,
    ) -> Result<Self> {
        color_type.check_bit_depth(bit_depth)?;
        let own = color_type.channels();
        let filler_ok = channels == own + 1
            && !color_type.has_alpha()
            && !color_type.is_palette()
            && bit_depth >= 8;
        if channels != own && !filler_ok {
            return Err(Error::InvalidGeometry(format!(
                "{channels} channels for color type {}",
                color_type.code()
            )));
        }
        Self::build(width, color_type, bit_depth, channels)
    }

    fn build(width: u32, color_type: ColorType, bit_depth: u8, channels: u8) -> Result<Self> {
        let mut desc = RowDescriptor {
            width,
            color_type,
            bit_depth,
            channels,
            pixel_depth: 0,
            rowbytes: 0,
        };
        desc.set_layout(bit_depth, channels)?;
        Ok(desc)
    }

    /// Record a new sample layout and recompute the derived fields.
    ///
    /// The color type is left alone: transforms change how samples are
    /// stored, never what they mean.
    pub fn set_layout(&mut self, bit_depth: u8, channels: u8) -> Result<()> {
        if !VALID_BIT_DEPTHS.contains(&bit_depth) {
            return Err(Error::InvalidBitDepth(bit_depth));
        }
        if !(1..=4).contains(&channels) {
            return Err(Error::InvalidGeometry(format!("{channels} channels")));
        }
        if bit_depth < 8 && channels != 1 {
            return Err(Error::InvalidGeometry(format!(
                "{channels} channels of {bit_depth} bits"
            )));
        }

        let pixel_depth = bit_depth * channels;
        self.rowbytes = rowbytes_for(self.width, pixel_depth)?;
        self.bit_depth = bit_depth;
        self.channels = channels;
        self.pixel_depth = pixel_depth;
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn color_type(&self) -> ColorType {
        self.color_type
    }

    /// Bits per sample.
    #[inline]
    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    /// Samples per pixel, including any filler.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Bits per pixel.
    #[inline]
    pub fn pixel_depth(&self) -> u8 {
        self.pixel_depth
    }

    /// Bytes occupied by the row in its current layout.
    #[inline]
    pub fn rowbytes(&self) -> usize {
        self.rowbytes
    }

    /// Bytes per pixel, rounded up to at least one.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        usize::from(self.pixel_depth).div_ceil(8)
    }

    /// Whether the row has one channel more than its color type.
    pub fn has_filler(&self) -> bool {
        self.channels > self.color_type.channels()
    }

    /// Fail unless a buffer of `len` bytes holds the whole row.
    pub fn check_buffer(&self, len: usize) -> Result<()> {
        if len < self.rowbytes {
            return Err(Error::BufferTooSmall {
                needed: self.rowbytes,
                actual: len,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_type_codes() {
        for code in [0, 2, 3, 4, 6] {
            assert_eq!(ColorType::from_u8(code).unwrap().code(), code);
        }
        assert_eq!(ColorType::from_u8(1), Err(Error::InvalidColorType(1)));
        assert_eq!(ColorType::from_u8(7), Err(Error::InvalidColorType(7)));
    }

    #[test]
    fn test_bit_depth_combinations() {
        assert!(ColorType::Gray.check_bit_depth(1).is_ok());
        assert!(ColorType::Gray.check_bit_depth(16).is_ok());
        assert!(ColorType::Palette.check_bit_depth(8).is_ok());
        assert!(ColorType::Palette.check_bit_depth(16).is_err());
        assert!(ColorType::Rgb.check_bit_depth(4).is_err());
        assert!(ColorType::GrayAlpha.check_bit_depth(16).is_ok());
        assert_eq!(
            ColorType::Rgba.check_bit_depth(3),
            Err(Error::InvalidBitDepth(3))
        );
    }

    #[test]
    fn test_rowbytes() {
        assert_eq!(rowbytes_for(10, 1).unwrap(), 2);
        assert_eq!(rowbytes_for(8, 1).unwrap(), 1);
        assert_eq!(rowbytes_for(3, 4).unwrap(), 2);
        assert_eq!(rowbytes_for(5, 24).unwrap(), 15);
        assert_eq!(rowbytes_for(5, 64).unwrap(), 40);
        assert_eq!(rowbytes_for(0, 8).unwrap(), 0);
    }

    #[test]
    fn test_descriptor_layout() {
        let mut desc = RowDescriptor::new(7, ColorType::Rgb, 16).unwrap();
        assert_eq!(desc.channels(), 3);
        assert_eq!(desc.pixel_depth(), 48);
        assert_eq!(desc.rowbytes(), 42);
        assert_eq!(desc.bytes_per_pixel(), 6);

        desc.set_layout(8, 4).unwrap();
        assert_eq!(desc.pixel_depth(), 32);
        assert_eq!(desc.rowbytes(), 28);
        assert!(desc.has_filler());
        assert_eq!(desc.color_type(), ColorType::Rgb);

        assert!(desc.set_layout(4, 3).is_err());
        // A failed update leaves the layout alone
        assert_eq!(desc.pixel_depth(), 32);
    }

    #[test]
    fn test_with_channels() {
        assert!(RowDescriptor::with_channels(4, ColorType::Rgb, 8, 4).is_ok());
        assert!(RowDescriptor::with_channels(4, ColorType::Gray, 16, 2).is_ok());
        assert!(RowDescriptor::with_channels(4, ColorType::Rgba, 8, 5).is_err());
        assert!(RowDescriptor::with_channels(4, ColorType::Gray, 4, 2).is_err());
        assert!(RowDescriptor::with_channels(4, ColorType::Palette, 8, 2).is_err());
    }

    #[test]
    fn test_check_buffer() {
        let desc = RowDescriptor::new(9, ColorType::Gray, 2).unwrap();
        assert_eq!(desc.rowbytes(), 3);
        assert!(desc.check_buffer(3).is_ok());
        assert_eq!(
            desc.check_buffer(2),
            Err(Error::BufferTooSmall {
                needed: 3,
                actual: 2
            })
        );
    }
}
