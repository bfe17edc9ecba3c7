//! convbench - Parallel BMP convolution benchmark
//!
//! Measures the wall-clock cost of applying a square integer convolution
//! kernel to a 24-bit uncompressed BMP image, parallelized over image rows,
//! and reports mean and population variance over repeated runs.
//!
//! # Example
//!
//! ```no_run
//! use convbench::bench::{self, BenchConfig};
//! use convbench::filter::{BorderPolicy, Kernel};
//!
//! let config = BenchConfig {
//!     input: "test.bmp".into(),
//!     output: "output.bmp".into(),
//!     kernel: Kernel::sharpen(),
//!     border: BorderPolicy::CopyInput,
//!     warmup_runs: bench::WARMUP_RUNS,
//!     timed_runs: bench::TIMED_RUNS,
//! };
//! let report = bench::run(&config).unwrap();
//! println!("mean {} variance {}", report.stats.mean, report.stats.variance);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use convbench_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use convbench_filter as filter;
pub use convbench_io as io;

pub mod bench;

pub use bench::{BenchConfig, BenchError, BenchReport, RunStats};
