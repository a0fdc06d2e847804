//! Error types for pngtran-core
//!
//! Provides a unified error type for the fixed-point arithmetic, the
//! chromaticity conversions and the row geometry. Each variant captures
//! enough context to report the failing operation without exposing how
//! the arithmetic was carried out.

use thiserror::Error;

/// pngtran core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A fixed-point result does not fit the signed 32-bit representation
    #[error("fixed point overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    /// Division by zero in a fixed-point operation
    #[error("division by zero in {operation}")]
    DivideByZero { operation: &'static str },

    /// A table or row buffer could not be allocated
    #[error("memory allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },

    /// Bit depth is not one of 1, 2, 4, 8 or 16
    #[error("invalid bit depth: {0}")]
    InvalidBitDepth(u8),

    /// Color type is not one of 0, 2, 3, 4 or 6
    #[error("invalid color type: {0}")]
    InvalidColorType(u8),

    /// Color type and bit depth are individually valid but not together
    #[error("invalid color type/bit depth combination: color type {color_type}, bit depth {bit_depth}")]
    InvalidColorDepth { color_type: u8, bit_depth: u8 },

    /// Row layout does not describe a representable row
    #[error("invalid row geometry: {0}")]
    InvalidGeometry(String),

    /// Row buffer shorter than the row descriptor requires
    #[error("row buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    /// Significant-bit count outside 1..=bit_depth
    #[error("invalid significant bits for {channel}: {bits} (bit depth {bit_depth})")]
    InvalidSignificantBits {
        channel: &'static str,
        bits: u8,
        bit_depth: u8,
    },

    /// Chromaticity values that cannot describe a color space
    #[error("invalid chromaticities: {0}")]
    InvalidChromaticity(&'static str),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for pngtran core operations
pub type Result<T> = std::result::Result<T, Error>;
