//! Convolution engine
//!
//! Applies a square integer kernel to every interior pixel of a 3-channel
//! image. Each channel is accumulated independently in `i64` and clamped
//! to `[0, 255]` with saturation, so negative sums floor at 0 and large
//! sums ceil at 255 instead of wrapping.
//!
//! The loop over interior output rows runs on rayon's thread pool. Each
//! task owns a disjoint output row and reads only from the immutable
//! input, so the parallel region needs no locks or atomics; the call
//! joins all tasks before returning. Thread count never changes output
//! bytes.

use crate::{FilterResult, Kernel};
use convbench_core::{CHANNELS, RasterImage};
use rayon::prelude::*;

/// What happens to the pixels within `kernel.half()` of an edge, where
/// the kernel neighborhood would fall outside the image.
///
/// The reference behavior for these pixels was an accident of buffer
/// reuse; here it is a required input of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPolicy {
    /// Copy the corresponding input pixel through unchanged.
    #[default]
    CopyInput,
    /// Leave the border at zero (black).
    Zero,
}

/// Convolve a 3-channel image with a kernel.
///
/// Every output pixel whose full kernel neighborhood lies inside the
/// image gets the clamped weighted sum of that neighborhood, per channel;
/// the remaining border ring is filled per `border`. An image smaller
/// than the kernel has no interior and comes back as all border.
///
/// The output is freshly allocated on every call; the input is never
/// mutated.
pub fn convolve(
    input: &RasterImage,
    kernel: &Kernel,
    border: BorderPolicy,
) -> FilterResult<RasterImage> {
    let width = input.width() as usize;
    let height = input.height() as usize;
    let stride = input.row_stride();
    let size = kernel.size();
    let half = kernel.half();

    let mut out = match border {
        BorderPolicy::CopyInput => input.pixels().to_vec(),
        BorderPolicy::Zero => vec![0u8; input.pixels().len()],
    };

    if width >= size && height >= size {
        let src = input.pixels();
        let weights = kernel.weights();

        // Interior rows only; one task per output row keeps writes disjoint.
        let interior = &mut out[half * stride..(height - half) * stride];
        interior
            .par_chunks_exact_mut(stride)
            .enumerate()
            .for_each(|(i, row)| {
                let y = i + half;
                for x in half..width - half {
                    let mut sum = [0i64; CHANNELS];
                    for ky in 0..size {
                        let src_row = (y + ky - half) * stride;
                        let krow = ky * size;
                        for kx in 0..size {
                            let weight = weights[krow + kx] as i64;
                            let at = src_row + (x + kx - half) * CHANNELS;
                            for c in 0..CHANNELS {
                                sum[c] += src[at + c] as i64 * weight;
                            }
                        }
                    }
                    let at = x * CHANNELS;
                    for c in 0..CHANNELS {
                        row[at + c] = sum[c].clamp(0, 255) as u8;
                    }
                }
            });
    }

    Ok(RasterImage::from_pixels(input.width(), input.height(), out)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 37 + y * 11) as u8);
                pixels.push((x * 13 + y * 53) as u8);
                pixels.push((x * 7 + y * 29) as u8);
            }
        }
        RasterImage::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn test_identity_1x1() {
        let img = gradient_image(7, 5);
        let kernel = Kernel::from_weights(vec![1]).unwrap();
        let result = convolve(&img, &kernel, BorderPolicy::CopyInput).unwrap();
        // 1x1 kernel has no border ring; the whole image is interior
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_identity_3x3_interior() {
        let img = gradient_image(7, 5);
        let kernel = Kernel::identity(3).unwrap();
        let result = convolve(&img, &kernel, BorderPolicy::CopyInput).unwrap();

        for y in 1..4 {
            for x in 1..6 {
                assert_eq!(result.pixel(x, y), img.pixel(x, y), "at ({x}, {y})");
            }
        }
        // CopyInput border matches the input too, so the whole image agrees
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_saturation_high() {
        // 1x1 kernel {9} on value 200: raw sum 1800, must clamp to 255
        let img = RasterImage::filled(3, 3, 200).unwrap();
        let kernel = Kernel::from_weights(vec![9]).unwrap();
        let result = convolve(&img, &kernel, BorderPolicy::Zero).unwrap();
        assert!(result.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_saturation_low() {
        // 1x1 kernel {-1} on value 10: raw sum -10, must clamp to 0
        let img = RasterImage::filled(3, 3, 10).unwrap();
        let kernel = Kernel::from_weights(vec![-1]).unwrap();
        let result = convolve(&img, &kernel, BorderPolicy::Zero).unwrap();
        assert!(result.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_output_always_in_range() {
        let img = gradient_image(9, 9);
        let kernel = Kernel::from_weights(vec![-3, 7, -3, 7, -3, 7, -3, 7, -3]).unwrap();
        let result = convolve(&img, &kernel, BorderPolicy::CopyInput).unwrap();
        assert_eq!(result.pixels().len(), img.pixels().len());
        // u8 storage makes the range structural; the interesting part is
        // that the clamp produced plausible extremes rather than wrapping
        let edge = Kernel::edge_detect();
        let uniform = RasterImage::filled(5, 5, 128).unwrap();
        let flat = convolve(&uniform, &edge, BorderPolicy::Zero).unwrap();
        // Zero-sum kernel on a uniform interior gives exactly 0
        assert_eq!(flat.pixel(2, 2), Some([0, 0, 0]));
    }

    #[test]
    fn test_border_policy_copy_input() {
        let img = gradient_image(9, 9);
        for size in [3usize, 5] {
            let kernel = Kernel::identity(size).unwrap();
            let result = convolve(&img, &kernel, BorderPolicy::CopyInput).unwrap();
            let half = size as u32 / 2;
            for y in 0..9 {
                for x in 0..9 {
                    let in_border = x < half || x >= 9 - half || y < half || y >= 9 - half;
                    if in_border {
                        assert_eq!(result.pixel(x, y), img.pixel(x, y), "size {size} ({x},{y})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_border_policy_zero() {
        let img = gradient_image(9, 9);
        for size in [3usize, 5] {
            let kernel = Kernel::identity(size).unwrap();
            let result = convolve(&img, &kernel, BorderPolicy::Zero).unwrap();
            let half = size as u32 / 2;
            for y in 0..9 {
                for x in 0..9 {
                    let in_border = x < half || x >= 9 - half || y < half || y >= 9 - half;
                    if in_border {
                        assert_eq!(result.pixel(x, y), Some([0, 0, 0]), "size {size} ({x},{y})");
                    } else {
                        assert_eq!(result.pixel(x, y), img.pixel(x, y), "size {size} ({x},{y})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_image_smaller_than_kernel() {
        // No interior pixels: the result is all border, not an error
        let img = gradient_image(2, 2);
        let kernel = Kernel::identity(3).unwrap();

        let copied = convolve(&img, &kernel, BorderPolicy::CopyInput).unwrap();
        assert_eq!(copied.pixels(), img.pixels());

        let zeroed = convolve(&img, &kernel, BorderPolicy::Zero).unwrap();
        assert!(zeroed.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_sharpen_uniform_interior_is_fixpoint() {
        // Sharpening sums to 1, so a uniform neighborhood maps to itself
        let img = RasterImage::filled(5, 5, 128).unwrap();
        let result = convolve(&img, &Kernel::sharpen(), BorderPolicy::CopyInput).unwrap();
        assert!(result.pixels().iter().all(|&b| b == 128));
    }

    #[test]
    fn test_parallel_matches_single_thread() {
        let img = gradient_image(33, 21);
        let kernel = Kernel::edge_detect();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap();
        let single = pool
            .install(|| convolve(&img, &kernel, BorderPolicy::CopyInput))
            .unwrap();
        let parallel = convolve(&img, &kernel, BorderPolicy::CopyInput).unwrap();

        assert_eq!(single.pixels(), parallel.pixels());
    }

    #[test]
    fn test_known_3x3_sum() {
        // 3x3 all-ones kernel over a gradient: check one interior pixel
        // against a hand-computed neighborhood sum
        let img = gradient_image(5, 5);
        let kernel = Kernel::new(3, vec![1; 9]).unwrap();
        let result = convolve(&img, &kernel, BorderPolicy::Zero).unwrap();

        for c in 0..3 {
            let mut expected = 0i64;
            for y in 1..=3u32 {
                for x in 1..=3u32 {
                    expected += img.pixel(x, y).unwrap()[c] as i64;
                }
            }
            assert_eq!(
                result.pixel(2, 2).unwrap()[c],
                expected.clamp(0, 255) as u8
            );
        }
    }
}
