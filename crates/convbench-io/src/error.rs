//! I/O error types
//!
//! Provides a unified error type for bitmap decode and encode. All format
//! problems are detected at the codec boundary and reported immediately;
//! nothing is retried and no partial output is written.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for bitmap codec operations.
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input path does not resolve to a file
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// The magic signature is not `BM`
    #[error("not a BMP file")]
    NotABitmap,

    /// Fewer bytes available than the headers declare
    #[error("truncated input: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Structurally valid BMP, but a layout this codec does not handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The output could not be persisted
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    /// Any other read-side I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the core pixel container
    #[error("core error: {0}")]
    Core(#[from] convbench_core::Error),
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
