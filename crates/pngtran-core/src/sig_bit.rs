//! Significant-bit counts (sBIT)

use crate::error::{Error, Result};
use crate::row::ColorType;

/// Number of meaningful high bits in each channel.
///
/// Only the fields relevant to a row's color type are consulted: red,
/// green and blue for color rows, gray otherwise, alpha when the color
/// type carries alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SigBits {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub gray: u8,
    pub alpha: u8,
}

impl SigBits {
    /// Every channel fully significant at `bit_depth`.
    pub const fn full(bit_depth: u8) -> Self {
        SigBits {
            red: bit_depth,
            green: bit_depth,
            blue: bit_depth,
            gray: bit_depth,
            alpha: bit_depth,
        }
    }

    /// The same count for the gray channel and the color channels.
    pub const fn uniform(bits: u8, alpha: u8) -> Self {
        SigBits {
            red: bits,
            green: bits,
            blue: bits,
            gray: bits,
            alpha,
        }
    }

    /// Counts in sample order for a pixel of `color_type`, and how many of
    /// them apply.
    pub fn channel_bits(&self, color_type: ColorType) -> ([u8; 4], usize) {
        match color_type {
            ColorType::Gray => ([self.gray, 0, 0, 0], 1),
            ColorType::GrayAlpha => ([self.gray, self.alpha, 0, 0], 2),
            ColorType::Rgb | ColorType::Palette => ([self.red, self.green, self.blue, 0], 3),
            ColorType::Rgba => ([self.red, self.green, self.blue, self.alpha], 4),
        }
    }

    /// Largest count among the value channels, used to size gamma tables.
    pub fn value_bits(&self, color_type: ColorType) -> u8 {
        if color_type.is_color() {
            self.red.max(self.green).max(self.blue)
        } else {
            self.gray
        }
    }

    /// Check every relevant count lies in `1..=bit_depth`.
    ///
    /// Palette entries are always 8 bits, whatever the index depth.
    pub fn validate(&self, color_type: ColorType, bit_depth: u8) -> Result<()> {
        let depth = if color_type.is_palette() { 8 } else { bit_depth };
        let named: &[(&'static str, u8)] = match color_type {
            ColorType::Gray => &[("gray", self.gray)],
            ColorType::GrayAlpha => &[("gray", self.gray), ("alpha", self.alpha)],
            ColorType::Rgb | ColorType::Palette => &[
                ("red", self.red),
                ("green", self.green),
                ("blue", self.blue),
            ],
            ColorType::Rgba => &[
                ("red", self.red),
                ("green", self.green),
                ("blue", self.blue),
                ("alpha", self.alpha),
            ],
        };

        for &(channel, bits) in named {
            if bits == 0 || bits > depth {
                return Err(Error::InvalidSignificantBits {
                    channel,
                    bits,
                    bit_depth: depth,
                });
            }
        }
        Ok(())
    }
}
