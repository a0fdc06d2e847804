//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// Value comparison failed
    #[error(
        "value comparison failed at index {index}: expected {expected}, got {actual}, delta {delta}"
    )]
    ValueMismatch {
        index: usize,
        expected: f64,
        actual: f64,
        delta: f64,
    },

    /// Byte comparison failed
    #[error("byte comparison failed at index {index}: first difference at offset {offset}")]
    ByteMismatch { index: usize, offset: usize },

    /// Lengths of compared buffers differ
    #[error("byte comparison failed at index {index}: lengths {expected} vs {actual}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Row descriptor comparison failed
    #[error("descriptor comparison failed at index {index}: expected {expected}, got {actual}")]
    DescriptorMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// A boolean check failed
    #[error("check failed at index {index}: {what}")]
    CheckFailed { index: usize, what: String },

    /// The test finished with recorded failures
    #[error("{test}_reg failed with {count} failure(s)")]
    Failed { test: String, count: usize },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
