//! Transform selection

bitflags::bitflags! {
    /// Row transforms to run.
    ///
    /// Each flag enables one step of [`WriteTransforms`](crate::WriteTransforms)
    /// or [`ReadTransforms`](crate::ReadTransforms). Steps whose flag is
    /// clear are skipped without touching the row.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TransformFlags: u32 {
        /// Swap red and blue
        const BGR           = 0x00001;
        /// Pack 8-bit samples into 1, 2 or 4 bits (write), or unpack them (read)
        const PACK          = 0x00004;
        /// Scale samples from their significant bits up to the bit depth
        /// (write), or back down (read)
        const SHIFT         = 0x00008;
        /// Swap the bytes of 16-bit samples
        const SWAP_BYTES    = 0x00010;
        /// Invert grayscale samples
        const INVERT_MONO   = 0x00020;
        /// Reduce 16-bit samples to 8 bits by keeping the high byte (read only)
        const STRIP_16      = 0x00400;
        /// Remove the filler channel (write only)
        const STRIP_FILLER  = 0x00800;
        /// Gamma-correct through a built table (read only)
        const GAMMA         = 0x02000;
        /// Add a filler channel (read only)
        const FILLER        = 0x08000;
        /// Reverse the order of packed pixels within each byte
        const PACKSWAP      = 0x10000;
        /// Move alpha between the first and last sample of each pixel
        const SWAP_ALPHA    = 0x20000;
        /// Store transparency instead of opacity
        const INVERT_ALPHA  = 0x80000;
    }
}

/// No transforms.
impl Default for TransformFlags {
    fn default() -> TransformFlags {
        TransformFlags::empty()
    }
}

/// Which side of the color samples a filler sample sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillerPosition {
    /// XRGB
    Before,
    /// RGBX
    #[default]
    After,
}

/// Filler channel: where it goes and what it holds.
///
/// 8-bit rows use the low byte of `value`; 16-bit rows store it big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filler {
    pub value: u16,
    pub position: FillerPosition,
}

impl Default for Filler {
    fn default() -> Self {
        Filler {
            value: 0xffff,
            position: FillerPosition::After,
        }
    }
}

/// Where alpha ends up when [`swap_alpha`](crate::swap_alpha) moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaPosition {
    /// ARGB / AG
    First,
    /// RGBA / GA
    Last,
}
