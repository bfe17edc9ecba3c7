//! Raster image container
//!
//! A [`RasterImage`] holds an interleaved 3-channel, 8-bit pixel buffer in
//! row-major order with a stride of exactly `width * 3` bytes (no row
//! padding). Images are immutable once constructed: filters read an input
//! image and return a freshly allocated result.

use crate::{Error, Result};

/// Number of interleaved 8-bit samples per pixel.
pub const CHANNELS: usize = 3;

/// An interleaved 3-channel, 8-bit raster image.
///
/// Invariant: `pixels.len() == width * height * 3`, enforced on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create an image from an existing pixel buffer.
    ///
    /// The buffer must hold exactly `width * height * 3` bytes in row-major
    /// order; dimensions must be positive.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(Error::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create an image with every channel of every pixel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = width as usize * height as usize * CHANNELS;
        Self::from_pixels(width, height, vec![value; len])
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row (`width * 3`).
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// The raw pixel buffer, row-major, channels interleaved.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return its pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The three channel values at `(x, y)`, or `None` out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; CHANNELS]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * CHANNELS;
        Some([self.pixels[at], self.pixels[at + 1], self.pixels[at + 2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pixels_valid() {
        let img = RasterImage::from_pixels(4, 3, vec![7u8; 4 * 3 * 3]).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 3);
        assert_eq!(img.row_stride(), 12);
        assert_eq!(img.pixels().len(), 36);
    }

    #[test]
    fn test_from_pixels_wrong_length() {
        let err = RasterImage::from_pixels(4, 3, vec![0u8; 35]).unwrap_err();
        match err {
            Error::PixelCountMismatch { expected, actual } => {
                assert_eq!(expected, 36);
                assert_eq!(actual, 35);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(RasterImage::from_pixels(0, 3, Vec::new()).is_err());
        assert!(RasterImage::filled(3, 0, 0).is_err());
    }

    #[test]
    fn test_pixel_access() {
        let mut pixels = vec![0u8; 2 * 2 * 3];
        // Pixel (1, 0) = (10, 20, 30)
        pixels[3] = 10;
        pixels[4] = 20;
        pixels[5] = 30;
        let img = RasterImage::from_pixels(2, 2, pixels).unwrap();

        assert_eq!(img.pixel(1, 0), Some([10, 20, 30]));
        assert_eq!(img.pixel(0, 0), Some([0, 0, 0]));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 2), None);
    }

    #[test]
    fn test_filled() {
        let img = RasterImage::filled(5, 5, 128).unwrap();
        assert!(img.pixels().iter().all(|&b| b == 128));
    }
}
