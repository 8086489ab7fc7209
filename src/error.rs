//! Error types for the quince kernel suite.

use thiserror::Error;

/// Error type for buffer and audit operations
#[derive(Debug, Error)]
pub enum QuinceError {
    /// Aligned buffer allocation failed
    #[error("Buffer allocation failed: {bytes} bytes at {align}-byte alignment")]
    Allocation {
        /// Requested size in bytes
        bytes: usize,
        /// Requested alignment in bytes
        align: usize,
    },

    /// Two buffers that must be the same length are not
    #[error("Buffer length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first buffer
        left: usize,
        /// Length of the second buffer
        right: usize,
    },
}

/// Result type alias for quince operations
pub type Result<T> = std::result::Result<T, QuinceError>;
