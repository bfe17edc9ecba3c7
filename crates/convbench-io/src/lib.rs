//! convbench-io - BMP image I/O
//!
//! Decodes and encodes the uncompressed 24-bit Windows Bitmap container
//! used by the convolution benchmark. Only this one format is supported;
//! anything else fails with an explicit error rather than being misread.

pub mod bmp;
mod error;

pub use bmp::{Bitmap, FileHeader, InfoHeader, decode, decode_file, encode, encode_file};
pub use error::{CodecError, CodecResult};
