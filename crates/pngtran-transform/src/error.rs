//! Error types for pngtran-transform

use pngtran_core::RowDescriptor;
use pngtran_gamma::GammaError;
use thiserror::Error;

/// Errors that can occur while converting row formats
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pngtran_core::Error),

    /// Gamma correction error
    #[error("gamma error: {0}")]
    Gamma(#[from] GammaError),

    /// The row's layout does not suit the requested step
    #[error("{operation} cannot handle {channels} channel(s) of {bit_depth} bits")]
    InvalidGeometry {
        operation: &'static str,
        bit_depth: u8,
        channels: u8,
    },

    /// Invalid transform parameter
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl TransformError {
    pub(crate) fn geometry(operation: &'static str, desc: &RowDescriptor) -> Self {
        TransformError::InvalidGeometry {
            operation,
            bit_depth: desc.bit_depth(),
            channels: desc.channels(),
        }
    }
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
