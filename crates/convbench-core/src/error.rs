//! Error types for convbench-core
//!
//! Provides a unified error type for core data-structure construction.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// convbench-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel buffer length does not match the declared dimensions
    #[error("pixel count mismatch: expected {expected} bytes, got {actual}")]
    PixelCountMismatch { expected: usize, actual: usize },

    /// Image dimension mismatch between two buffers
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
