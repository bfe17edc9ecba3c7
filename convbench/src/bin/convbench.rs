use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use convbench::bench::{self, BenchConfig};
use convbench::filter::{BorderPolicy, Kernel};

/// Benchmark a square convolution filter over a 24-bit BMP image.
///
/// With no arguments, filters `test.bmp` into `output.bmp` with the
/// built-in sharpening kernel and reports a single timed run. With paths,
/// runs the full benchmark (10 warm-up + 10 timed iterations) using the
/// built-in edge-detection kernel, or the supplied weights.
#[derive(Parser, Debug)]
#[command(name = "convbench", version)]
struct Cli {
    /// Input BMP path (omit for the default `test.bmp` mode).
    input: Option<PathBuf>,

    /// Output BMP path (required when an input path is given).
    output: Option<PathBuf>,

    /// Flat row-major kernel weights; the count must be a perfect square
    /// with an odd root (e.g. 9 values for a 3x3 kernel).
    #[arg(allow_negative_numbers = true)]
    kernel: Vec<i32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.input {
        None => run_default(),
        Some(input) => {
            let output = cli
                .output
                .context("usage: convbench <input.bmp> <output.bmp> [kernel values...]")?;
            run_explicit(input, output, cli.kernel)
        }
    }
}

/// No-argument mode: default paths, sharpening kernel, one timed run.
fn run_default() -> anyhow::Result<()> {
    let config = BenchConfig {
        input: PathBuf::from("test.bmp"),
        output: PathBuf::from("output.bmp"),
        kernel: Kernel::sharpen(),
        border: BorderPolicy::CopyInput,
        warmup_runs: bench::WARMUP_RUNS,
        timed_runs: 1,
    };
    let report = bench::run(&config)?;
    println!("Time taken: {} s", report.stats.mean);
    Ok(())
}

/// Explicit mode: given paths, edge-detect or user kernel, full benchmark.
fn run_explicit(input: PathBuf, output: PathBuf, weights: Vec<i32>) -> anyhow::Result<()> {
    let kernel = if weights.is_empty() {
        Kernel::edge_detect()
    } else {
        Kernel::from_weights(weights)?
    };

    let config = BenchConfig {
        input,
        output,
        kernel,
        border: BorderPolicy::CopyInput,
        warmup_runs: bench::WARMUP_RUNS,
        timed_runs: bench::TIMED_RUNS,
    };
    let report = bench::run(&config)?;

    // Report line consumed by the external plotting collaborator
    println!(
        "Vrijeme: {} Varijansa: {}",
        report.stats.mean, report.stats.variance
    );
    Ok(())
}
