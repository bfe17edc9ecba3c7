//! Benchmark harness
//!
//! Drives repeated convolutions over one decoded image: a fixed number of
//! untimed warm-up runs to stabilize caches and the allocator, then a fixed
//! number of timed runs measured with [`Instant`], strictly sequential.
//! The statistics live in a [`RunStats`] returned to the caller; nothing is
//! accumulated in global state. The filtered image is persisted only after
//! every iteration has succeeded, so a failed run leaves no partial output.

use std::path::PathBuf;
use std::time::Instant;

use convbench_filter::{BorderPolicy, Kernel, convolve};
use thiserror::Error;
use tracing::{debug, info};

/// Warm-up iterations before measurement starts.
pub const WARMUP_RUNS: usize = 10;

/// Timed iterations per benchmark invocation.
pub const TIMED_RUNS: usize = 10;

/// Errors surfaced by a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Bitmap decode or encode failed
    #[error(transparent)]
    Codec(#[from] convbench_io::CodecError),

    /// Convolution failed
    #[error(transparent)]
    Filter(#[from] convbench_filter::FilterError),
}

/// Result alias for benchmark operations.
pub type BenchResult<T> = Result<T, BenchError>;

/// Elapsed-time samples of one benchmark invocation, in seconds, with
/// their arithmetic mean and population variance (divide by N, not N-1).
#[derive(Debug, Clone, PartialEq)]
pub struct RunStats {
    pub samples: Vec<f64>,
    pub mean: f64,
    pub variance: f64,
}

impl RunStats {
    /// Compute mean and population variance over a sample vector.
    pub fn from_samples(samples: Vec<f64>) -> Self {
        if samples.is_empty() {
            return Self {
                samples,
                mean: 0.0,
                variance: 0.0,
            };
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Self {
            samples,
            mean,
            variance,
        }
    }
}

/// One benchmark invocation: where to read, where to write, what to apply.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Input BMP path
    pub input: PathBuf,
    /// Output BMP path for the final convolution result
    pub output: PathBuf,
    /// Kernel applied on every iteration
    pub kernel: Kernel,
    /// Border handling for the convolution
    pub border: BorderPolicy,
    /// Untimed iterations run first
    pub warmup_runs: usize,
    /// Timed iterations contributing samples
    pub timed_runs: usize,
}

/// Outcome of a benchmark run.
#[derive(Debug, Clone)]
pub struct BenchReport {
    /// Timing statistics over the timed iterations
    pub stats: RunStats,
    /// Width of the benchmarked image in pixels
    pub image_width: u32,
    /// Height of the benchmarked image in pixels
    pub image_height: u32,
}

/// Run one benchmark invocation.
///
/// Decodes the input once, applies the kernel `warmup_runs` times untimed
/// and `timed_runs` times timed, writes the last result over the decoded
/// headers, and returns the timing statistics.
pub fn run(config: &BenchConfig) -> BenchResult<BenchReport> {
    let mut bitmap = convbench_io::decode_file(&config.input)?;
    let image_width = bitmap.image().width();
    let image_height = bitmap.image().height();
    info!(
        width = image_width,
        height = image_height,
        kernel_size = config.kernel.size(),
        "loaded input bitmap"
    );

    for _ in 0..config.warmup_runs {
        convolve(bitmap.image(), &config.kernel, config.border)?;
    }

    let mut samples = Vec::with_capacity(config.timed_runs);
    let mut result = None;
    for iteration in 0..config.timed_runs {
        let start = Instant::now();
        let output = convolve(bitmap.image(), &config.kernel, config.border)?;
        let elapsed = start.elapsed().as_secs_f64();
        debug!(iteration, seconds = elapsed, "timed convolution");
        samples.push(elapsed);
        result = Some(output);
    }

    if let Some(output) = result {
        bitmap.replace_image(output)?;
        convbench_io::encode_file(&bitmap, &config.output)?;
        info!(output = %config.output.display(), "wrote convolution result");
    }

    Ok(BenchReport {
        stats: RunStats::from_samples(samples),
        image_width,
        image_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_fixed_samples() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0];
        let stats = RunStats::from_samples(samples.clone());

        assert_eq!(stats.samples, samples);
        assert!((stats.mean - 0.55).abs() < 1e-12);
        // Population variance of 0.1..=1.0 step 0.1 is 0.0825
        assert!((stats.variance - 0.0825).abs() < 1e-12);
    }

    #[test]
    fn test_stats_constant_samples() {
        let stats = RunStats::from_samples(vec![0.25; 10]);
        assert!((stats.mean - 0.25).abs() < 1e-12);
        assert!(stats.variance.abs() < 1e-12);
    }

    #[test]
    fn test_stats_single_sample() {
        let stats = RunStats::from_samples(vec![2.5]);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_stats_empty() {
        let stats = RunStats::from_samples(Vec::new());
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 0.0);
    }
}
