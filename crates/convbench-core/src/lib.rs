//! convbench-core - Basic data structures for the convolution benchmark
//!
//! This crate provides the fundamental pixel container used throughout
//! the convbench workspace:
//!
//! - [`RasterImage`] - An interleaved 3-channel, 8-bit pixel buffer

pub mod error;
pub mod raster;

pub use error::{Error, Result};
pub use raster::{CHANNELS, RasterImage};
