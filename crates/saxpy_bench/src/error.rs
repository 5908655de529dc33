// Errors reported by the benchmark harness.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("iteration count must be at least 1; cannot average zero trials")]
    ZeroIterations,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("kernel `{kernel}` produced {actual} values, expected {expected}")]
    LengthMismatch {
        kernel: String,
        expected: usize,
        actual: usize,
    },

    #[error(
        "kernel `{kernel}` disagrees with the reference at index {index}: {optimized} vs {reference}"
    )]
    Mismatch {
        kernel: String,
        index: usize,
        reference: f32,
        optimized: f32,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to write results: {0}")]
    Io(#[from] std::io::Error),
}
