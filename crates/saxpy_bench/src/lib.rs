// top-level library module

#[cfg(test)]
mod tests;

pub mod config;
pub mod error;
pub mod harness;
pub mod report;
pub mod timing;
pub mod vector;

pub use config::{BenchConfig, ScalarParams};
pub use error::BenchError;
pub use harness::{BenchReport, BenchmarkHarness, KernelRun, verify_outputs};
pub use report::{render_average, render_comparison_table, render_speedup};
pub use timing::{TimingSample, TimingSummary, compute_average, run_timed_trials};
pub use vector::{generate_random_vector, seeded_rng};

use std::io::Write;

/// Prints a finished run: one table and one average per optimized kernel,
/// after the reference average.
pub fn write_report<W: Write>(
    writer: &mut W,
    report: &BenchReport,
    rows: usize,
) -> Result<(), BenchError> {
    let reference = &report.reference;

    for (i, run) in report.optimized.iter().enumerate() {
        writeln!(writer)?;
        render_comparison_table(
            writer,
            (reference.name.as_str(), run.name.as_str()),
            &reference.output,
            &run.output,
            rows,
        )?;
        render_average(writer, &reference.name, &reference.summary)?;
        render_average(writer, &run.name, &run.summary)?;
        render_speedup(writer, &run.name, report.speedup(i))?;
    }

    if report.optimized.is_empty() {
        render_average(writer, &reference.name, &reference.summary)?;
    }

    Ok(())
}
