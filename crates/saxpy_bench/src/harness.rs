// The benchmark procedure: generate inputs, time each kernel, compare outputs.

use std::hint::black_box;

use rand::rngs::StdRng;
use saxpy::{Reference, SaxpyKernel};

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::timing::{TimingSample, TimingSummary, compute_average, run_timed_trials};
use crate::vector::{generate_random_vector, seeded_rng};

/// Output and timings of one kernel.
#[derive(Debug, Clone)]
pub struct KernelRun {
    pub name: String,
    pub output: Vec<f32>,
    pub timings: TimingSample,
    pub summary: TimingSummary,
}

#[derive(Debug, Clone)]
pub struct BenchReport {
    pub reference: KernelRun,
    pub optimized: Vec<KernelRun>,
}

impl BenchReport {
    /// Reference average over the average of `optimized[index]`.
    ///
    /// `None` if there is no such kernel or it averaged zero seconds.
    pub fn speedup(&self, index: usize) -> Option<f64> {
        let optimized = self.optimized.get(index)?;
        if optimized.summary.average > 0.0 {
            Some(self.reference.summary.average / optimized.summary.average)
        } else {
            None
        }
    }
}

pub struct BenchmarkHarness {
    config: BenchConfig,
    rng: StdRng,
}

impl BenchmarkHarness {
    /// Validates `config` and seeds the input generator.
    pub fn new(config: BenchConfig) -> Result<Self, BenchError> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Draws fresh `x` and `y` vectors from the configured range.
    pub fn generate_inputs(&mut self) -> (Vec<f32>, Vec<f32>) {
        let BenchConfig { min, max, .. } = self.config;
        let n = self.config.params.n;

        let x = generate_random_vector(&mut self.rng, n, min, max);
        let y = generate_random_vector(&mut self.rng, n, min, max);
        (x, y)
    }

    /// Runs the configured number of timed trials of `kernel` on `x` and `y`.
    pub fn run_kernel(
        &self,
        kernel: &dyn SaxpyKernel,
        x: &[f32],
        y: &[f32],
    ) -> Result<KernelRun, BenchError> {
        if !kernel.is_native() {
            log::warn!(
                "kernel `{}` has no native path on this target; timing its fallback",
                kernel.name()
            );
        }

        let a = self.config.params.a;
        let mut output = vec![0.0_f32; x.len()];

        log::info!(
            "Timing {} trials of `{}` over {} elements.",
            self.config.iterations,
            kernel.name(),
            x.len()
        );

        let timings = run_timed_trials(
            || kernel.apply(black_box(a), black_box(x), black_box(y), black_box(&mut output)),
            self.config.iterations,
        );
        let summary = compute_average(&timings)?;

        log::debug!(
            "`{}`: total {:.9} s, average {:.9} s, fastest {:.9} s",
            kernel.name(),
            summary.total,
            summary.average,
            timings.fastest().unwrap_or_default()
        );

        Ok(KernelRun {
            name: kernel.name().to_string(),
            output,
            timings,
            summary,
        })
    }

    /// Generates inputs and runs the whole comparison.
    pub fn run(&mut self, optimized: &[&dyn SaxpyKernel]) -> Result<BenchReport, BenchError> {
        log::info!(
            "Generating two vectors of {} elements in [{}, {}).",
            self.config.params.n,
            self.config.min,
            self.config.max
        );
        let (x, y) = self.generate_inputs();

        self.run_with_inputs(&x, &y, optimized)
    }

    /// Times the reference kernel and then each optimized kernel on the given
    /// inputs, and checks every optimized output against the reference.
    pub fn run_with_inputs(
        &self,
        x: &[f32],
        y: &[f32],
        optimized: &[&dyn SaxpyKernel],
    ) -> Result<BenchReport, BenchError> {
        if x.len() != y.len() {
            return Err(BenchError::InvalidConfig(format!(
                "input vectors differ in length ({} vs {})",
                x.len(),
                y.len()
            )));
        }

        let reference = self.run_kernel(&Reference, x, y)?;

        let optimized = optimized
            .iter()
            .map(|kernel| -> Result<KernelRun, BenchError> {
                let run = self.run_kernel(*kernel, x, y)?;
                verify_outputs(&reference.output, &run, self.config.tolerance)?;
                Ok(run)
            })
            .collect::<Result<Vec<_>, BenchError>>()?;

        log::info!("All {} optimized kernel(s) match the reference.", optimized.len());

        Ok(BenchReport {
            reference,
            optimized,
        })
    }
}

/// Checks that `run` produced the reference values within a relative
/// `tolerance`; values near zero are compared with `tolerance` as an
/// absolute bound instead.
pub fn verify_outputs(reference: &[f32], run: &KernelRun, tolerance: f32) -> Result<(), BenchError> {
    if reference.len() != run.output.len() {
        return Err(BenchError::LengthMismatch {
            kernel: run.name.clone(),
            expected: reference.len(),
            actual: run.output.len(),
        });
    }

    let mismatch = reference
        .iter()
        .zip(&run.output)
        .position(|(r, o)| !approx_eq(*r, *o, tolerance));

    match mismatch {
        Some(index) => Err(BenchError::Mismatch {
            kernel: run.name.clone(),
            index,
            reference: reference[index],
            optimized: run.output[index],
        }),
        None => Ok(()),
    }
}

fn approx_eq(reference: f32, optimized: f32, tolerance: f32) -> bool {
    // identical results, including overflow to the same infinity
    if reference == optimized || reference.to_bits() == optimized.to_bits() {
        return true;
    }
    if !(reference.is_finite() && optimized.is_finite()) {
        return false;
    }

    let scale = reference.abs().max(optimized.abs()).max(1.0);
    (reference - optimized).abs() <= tolerance * scale
}
