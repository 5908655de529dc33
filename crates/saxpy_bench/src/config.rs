// Benchmark settings and their validation.

use crate::error::BenchError;

/// Scalar multiplier and vector length of one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarParams {
    pub a: f32,
    pub n: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    pub params: ScalarParams,
    /// Timed trials per kernel.
    pub iterations: usize,
    /// Inputs are drawn from `[min, max)`.
    pub min: f32,
    pub max: f32,
    /// Fixed generator seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Number of leading elements shown in the comparison table.
    pub rows: usize,
    /// Relative tolerance when comparing against the reference output.
    pub tolerance: f32,
    /// Worker threads for the parallel kernel.
    pub threads: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            params: ScalarParams { a: 2.0, n: 10 },
            iterations: 30,
            min: 0.0,
            max: 1.0,
            seed: None,
            rows: 10,
            tolerance: 1.0e-5,
            threads: num_cpus::get(),
        }
    }
}

impl BenchConfig {
    /// Rejects settings the harness cannot run with.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.iterations == 0 {
            return Err(BenchError::ZeroIterations);
        }
        if self.params.n == 0 {
            return Err(invalid("vector length must be at least 1"));
        }
        if !self.params.a.is_finite() {
            return Err(invalid(format!("scalar {} is not finite", self.params.a)));
        }
        if !(self.max - self.min).is_finite() {
            return Err(invalid(format!(
                "range [{}, {}) is not finite",
                self.min, self.max
            )));
        }
        if self.min >= self.max {
            return Err(invalid(format!(
                "range [{}, {}) is empty; min must be below max",
                self.min, self.max
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(invalid(format!(
                "tolerance {} must be positive",
                self.tolerance
            )));
        }
        if self.threads == 0 {
            return Err(invalid("thread count must be at least 1"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> BenchError {
    BenchError::InvalidConfig(message.into())
}
