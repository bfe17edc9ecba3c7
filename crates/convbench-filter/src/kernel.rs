//! Convolution kernels
//!
//! A kernel is a square grid of signed integer weights with odd side
//! length, stored row-major with the center at `(size/2, size/2)`.
//! Kernels are immutable once constructed, so the convolution loop can
//! index the weight table without bounds concerns.

use crate::{FilterError, FilterResult};

/// A square 2D convolution kernel with integer weights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    size: usize,
    weights: Vec<i32>,
}

impl Kernel {
    /// Create a kernel from an explicit side length and weight table.
    ///
    /// `size` must be odd and >= 1, and `weights` must hold exactly
    /// `size * size` row-major values.
    pub fn new(size: usize, weights: Vec<i32>) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "size {size} must be odd and >= 1"
            )));
        }
        if weights.len() != size * size {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} weights for size {size}, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    /// Create a kernel from a flat weight list, inferring the side length.
    ///
    /// The length must be a perfect square with an odd root; this is the
    /// shape the benchmark's invocation surface supplies.
    pub fn from_weights(weights: Vec<i32>) -> FilterResult<Self> {
        let len = weights.len();
        let root = (len as f64).sqrt().round() as usize;
        if root * root != len {
            return Err(FilterError::InvalidKernel(format!(
                "weight count {len} is not a perfect square"
            )));
        }
        Self::new(root, weights)
    }

    /// The 3x3 sharpening kernel used by the default benchmark mode.
    pub fn sharpen() -> Self {
        Self {
            size: 3,
            weights: vec![0, -1, 0, -1, 5, -1, 0, -1, 0],
        }
    }

    /// The 3x3 edge-detection kernel used by the explicit benchmark mode.
    pub fn edge_detect() -> Self {
        Self {
            size: 3,
            weights: vec![-1, -1, -1, -1, 8, -1, -1, -1, -1],
        }
    }

    /// An identity kernel of the given odd size: center weight 1, all
    /// other weights 0.
    pub fn identity(size: usize) -> FilterResult<Self> {
        let mut kernel = Self::new(size, vec![0; size * size])?;
        kernel.weights[(size / 2) * size + size / 2] = 1;
        Ok(kernel)
    }

    /// Side length of the kernel.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Half the side length, the interior margin the kernel needs.
    #[inline]
    pub fn half(&self) -> usize {
        self.size / 2
    }

    /// The row-major weight table, length `size * size`.
    #[inline]
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }
}
