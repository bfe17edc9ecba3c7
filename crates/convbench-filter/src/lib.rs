//! convbench-filter - Image convolution
//!
//! This crate provides the convolution engine at the heart of the
//! benchmark:
//!
//! - [`Kernel`] - square, odd-sized, integer-weighted convolution kernels
//! - [`convolve`] - saturating per-channel convolution, parallel over rows
//! - [`BorderPolicy`] - explicit handling of the pixels a kernel cannot
//!   fully cover

pub mod convolve;
mod error;
pub mod kernel;

pub use convolve::{BorderPolicy, convolve};
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
