//! Error types for pngtran-gamma

use thiserror::Error;

/// Errors that can occur while building or applying gamma tables
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GammaError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pngtran_core::Error),

    /// Gamma values must be positive
    #[error("invalid gamma: {0} (must be positive)")]
    InvalidGamma(i32),

    /// Table shape does not suit the row
    #[error("{table} table cannot correct {bit_depth}-bit samples")]
    TableMismatch { table: &'static str, bit_depth: u8 },

    /// Row layout that gamma correction does not handle
    #[error("unsupported row: {0}")]
    UnsupportedRow(String),
}

/// Result type for gamma operations
pub type GammaResult<T> = Result<T, GammaError>;
