// Timing trials and averaging them.

use std::time::Instant;

use crate::error::BenchError;

/// Elapsed seconds of each trial, in run order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingSample {
    seconds: Vec<f64>,
}

impl TimingSample {
    pub fn as_slice(&self) -> &[f64] {
        &self.seconds
    }

    pub fn len(&self) -> usize {
        self.seconds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seconds.is_empty()
    }

    pub fn fastest(&self) -> Option<f64> {
        self.seconds.iter().copied().reduce(f64::min)
    }
}

impl From<Vec<f64>> for TimingSample {
    fn from(seconds: Vec<f64>) -> Self {
        Self { seconds }
    }
}

/// Total and mean of a [`TimingSample`], in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub total: f64,
    pub average: f64,
}

/// Calls `trial` `iterations` times, timing each call on its own.
pub fn run_timed_trials<F: FnMut()>(mut trial: F, iterations: usize) -> TimingSample {
    let mut seconds = Vec::with_capacity(iterations);

    for i in 0..iterations {
        let start = Instant::now();
        trial();
        let elapsed = start.elapsed();

        log::trace!("trial {}: {:?}", i + 1, elapsed);
        seconds.push(elapsed.as_secs_f64());
    }

    TimingSample::from(seconds)
}

/// Sums the sample and divides by its length.
///
/// An empty sample is an error rather than a NaN average.
pub fn compute_average(sample: &TimingSample) -> Result<TimingSummary, BenchError> {
    if sample.is_empty() {
        return Err(BenchError::ZeroIterations);
    }

    let total: f64 = sample.as_slice().iter().sum();
    let average = total / sample.len() as f64;

    Ok(TimingSummary { total, average })
}
