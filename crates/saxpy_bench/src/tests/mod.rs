// unit tests

use super::*;
use saxpy::{Asm, KernelKind, Reference, SaxpyKernel};

const TEST_X: [f32; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
const TEST_Y: [f32; 10] = [0.0; 10];
const TEST_Z: [f32; 10] = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0];

// random vectors

#[test]
fn random_vector_stays_in_range() {
    let mut rng = seeded_rng(Some(7));
    let v = generate_random_vector(&mut rng, 10_000, 0.0, 1.0);

    assert_eq!(v.len(), 10_000);
    assert!(v.iter().all(|x| (0.0..1.0).contains(x)));
    assert!(v.iter().any(|x| *x != v[0]));
}

#[test]
fn random_vector_respects_shifted_range() {
    let mut rng = seeded_rng(None);
    let v = generate_random_vector(&mut rng, 1000, -5.0, -2.5);
    assert!(v.iter().all(|x| (-5.0..-2.5).contains(x)));
}

#[test]
fn random_vector_is_reproducible_from_seed() {
    let a = generate_random_vector(&mut seeded_rng(Some(42)), 64, 0.0, 1.0);
    let b = generate_random_vector(&mut seeded_rng(Some(42)), 64, 0.0, 1.0);
    let c = generate_random_vector(&mut seeded_rng(Some(43)), 64, 0.0, 1.0);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

// timing

#[test]
fn timed_trials_run_each_iteration() {
    let mut calls = 0;
    let sample = run_timed_trials(|| calls += 1, 5);

    assert_eq!(calls, 5);
    assert_eq!(sample.len(), 5);
    assert!(sample.as_slice().iter().all(|s| *s >= 0.0));
}

#[test]
fn average_of_identical_values() {
    let sample = TimingSample::from(vec![0.125; 10]);
    let summary = compute_average(&sample).unwrap();

    assert_eq!(summary.total, 1.25);
    assert_eq!(summary.average, 0.125);
}

#[test]
fn average_of_mixed_values() {
    let sample = TimingSample::from(vec![1.0, 2.0, 4.0, 1.0]);
    let summary = compute_average(&sample).unwrap();

    assert_eq!(summary.total, 8.0);
    assert_eq!(summary.average, 2.0);
    assert_eq!(sample.fastest(), Some(1.0));
}

#[test]
fn average_of_zero_trials_is_an_error() {
    let sample = run_timed_trials(|| {}, 0);
    assert!(sample.is_empty());
    assert!(matches!(
        compute_average(&sample),
        Err(BenchError::ZeroIterations)
    ));
}

// configuration

#[test]
fn default_config_is_valid() {
    let config = BenchConfig::default();
    assert_eq!(config.params, ScalarParams { a: 2.0, n: 10 });
    assert!(config.validate().is_ok());
}

#[test]
fn zero_iterations_rejected_before_running() {
    let config = BenchConfig {
        iterations: 0,
        ..BenchConfig::default()
    };
    assert!(matches!(
        BenchmarkHarness::new(config),
        Err(BenchError::ZeroIterations)
    ));
}

#[test]
fn invalid_settings_rejected() {
    let invalid = [
        BenchConfig {
            params: ScalarParams { a: 2.0, n: 0 },
            ..BenchConfig::default()
        },
        BenchConfig {
            params: ScalarParams { a: f32::NAN, n: 10 },
            ..BenchConfig::default()
        },
        BenchConfig {
            min: 1.0,
            max: 1.0,
            ..BenchConfig::default()
        },
        BenchConfig {
            min: 0.0,
            max: f32::INFINITY,
            ..BenchConfig::default()
        },
        BenchConfig {
            tolerance: 0.0,
            ..BenchConfig::default()
        },
        BenchConfig {
            threads: 0,
            ..BenchConfig::default()
        },
    ];

    for config in invalid {
        assert!(
            matches!(config.validate(), Err(BenchError::InvalidConfig(_))),
            "{:?} should be rejected",
            config
        );
    }
}

// harness

fn test_harness() -> BenchmarkHarness {
    BenchmarkHarness::new(BenchConfig {
        iterations: 3,
        seed: Some(1),
        threads: 2,
        ..BenchConfig::default()
    })
    .unwrap()
}

#[test]
fn integer_inputs_match_exactly() {
    let harness = test_harness();
    let kernels: Vec<_> = KernelKind::ALL
        .iter()
        .map(|kind| kind.build(2).unwrap())
        .collect();
    let kernel_refs: Vec<&dyn SaxpyKernel> = kernels
        .iter()
        .map(|kernel| kernel.as_ref() as &dyn SaxpyKernel)
        .collect();

    let report = harness
        .run_with_inputs(&TEST_X, &TEST_Y, &kernel_refs)
        .unwrap();

    assert_eq!(report.reference.output, TEST_Z);
    assert_eq!(report.optimized.len(), 4);
    for run in &report.optimized {
        assert_eq!(run.output, TEST_Z, "kernel {}", run.name);
        assert_eq!(run.timings.len(), 3);
    }
}

#[test]
fn random_run_agrees_with_reference() {
    let mut harness = BenchmarkHarness::new(BenchConfig {
        params: ScalarParams { a: -3.5, n: 1003 },
        iterations: 2,
        min: -10.0,
        max: 10.0,
        seed: Some(99),
        threads: 2,
        ..BenchConfig::default()
    })
    .unwrap();
    let simd = saxpy::Simd::new();

    let report = harness.run(&[&Asm, &simd]).unwrap();

    assert_eq!(report.reference.name, "reference");
    assert_eq!(report.reference.output.len(), 1003);
    assert_eq!(report.optimized[0].name, "asm");
    assert_eq!(report.optimized[1].name, "simd");
    assert!(report.speedup(2).is_none());
}

#[test]
fn generated_inputs_use_configured_length() {
    let mut harness = test_harness();
    let (x, y) = harness.generate_inputs();

    assert_eq!(x.len(), harness.config().params.n);
    assert_eq!(y.len(), harness.config().params.n);
    assert_ne!(x, y);
}

#[test]
fn mismatched_inputs_rejected() {
    let harness = test_harness();
    let result = harness.run_with_inputs(&TEST_X, &TEST_Y[..9], &[&Reference]);
    assert!(matches!(result, Err(BenchError::InvalidConfig(_))));
}

fn test_run(name: &str, output: Vec<f32>) -> KernelRun {
    KernelRun {
        name: name.to_string(),
        output,
        timings: TimingSample::from(vec![0.5]),
        summary: TimingSummary {
            total: 0.5,
            average: 0.5,
        },
    }
}

#[test]
fn verification_reports_first_mismatch() {
    let run = test_run("broken", vec![2.0, 4.0, 6.5, 9.0]);

    match verify_outputs(&[2.0, 4.0, 6.0, 8.0], &run, 1.0e-5) {
        Err(BenchError::Mismatch {
            kernel,
            index,
            reference,
            optimized,
        }) => {
            assert_eq!(kernel, "broken");
            assert_eq!(index, 2);
            assert_eq!(reference, 6.0);
            assert_eq!(optimized, 6.5);
        }
        other => panic!("expected a mismatch, got {:?}", other),
    }
}

#[test]
fn verification_tolerates_rounding() {
    let run = test_run("close", vec![1000.001, 0.0000001]);
    assert!(verify_outputs(&[1000.0, 0.0], &run, 1.0e-5).is_ok());

    let short = test_run("short", vec![1.0]);
    assert!(matches!(
        verify_outputs(&[1.0, 2.0], &short, 1.0e-5),
        Err(BenchError::LengthMismatch { expected: 2, actual: 1, .. })
    ));
}

#[test]
fn overflowing_results_still_match() {
    let mut harness = BenchmarkHarness::new(BenchConfig {
        params: ScalarParams { a: 4.0, n: 16 },
        iterations: 1,
        min: 1.0e38,
        max: 3.0e38,
        seed: Some(5),
        threads: 2,
        ..BenchConfig::default()
    })
    .unwrap();
    let simd = saxpy::Simd::new();

    let report = harness.run(&[&Reference, &Asm, &simd]).unwrap();

    assert!(report.reference.output.iter().all(|z| *z == f32::INFINITY));
    for run in &report.optimized {
        assert_eq!(run.output, report.reference.output, "kernel {}", run.name);
    }
}

#[test]
fn verification_rejects_opposite_infinities() {
    let run = test_run("flipped", vec![f32::NEG_INFINITY]);
    assert!(matches!(
        verify_outputs(&[f32::INFINITY], &run, 1.0e-5),
        Err(BenchError::Mismatch { index: 0, .. })
    ));
}

#[test]
fn speedup_divides_averages() {
    let report = BenchReport {
        reference: test_run("reference", vec![]),
        optimized: vec![
            KernelRun {
                summary: TimingSummary {
                    total: 0.25,
                    average: 0.125,
                },
                ..test_run("fast", vec![])
            },
            KernelRun {
                summary: TimingSummary {
                    total: 0.0,
                    average: 0.0,
                },
                ..test_run("instant", vec![])
            },
        ],
    };

    assert_eq!(report.speedup(0), Some(4.0));
    assert_eq!(report.speedup(1), None);
}

// output

#[test]
fn comparison_table_layout() {
    let mut out = Vec::new();
    render_comparison_table(&mut out, ("reference", "asm"), &TEST_Z, &TEST_Z, 3).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // separator, header, separator, 3 rows, footer
    assert_eq!(lines.len(), 7);
    assert!(lines[0].chars().all(|c| c == '-'));
    assert!(lines[1].contains("Index"));
    assert!(lines[1].contains("Vector Z (reference)"));
    assert!(lines[1].contains("Vector Z (asm)"));
    assert!(lines[3].trim_start().starts_with("1 |"));
    assert!(lines[3].contains("2.000000"));
    assert!(lines[5].contains("6.000000"));
    assert!(lines[6].chars().all(|c| c == '='));
    assert!(lines.iter().all(|line| line.len() == lines[0].len()));
}

#[test]
fn comparison_table_clamps_rows() {
    let mut out = Vec::new();
    render_comparison_table(&mut out, ("reference", "simd"), &TEST_Z[..2], &TEST_Z[..2], 10)
        .unwrap();
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 6);
}

#[test]
fn average_line_format() {
    let mut out = Vec::new();
    let summary = TimingSummary {
        total: 0.75,
        average: 0.25,
    };
    render_average(&mut out, "asm", &summary).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Average time (for asm)\t: 0.250000000 s\n"
    );
}

#[test]
fn sub_microsecond_average_is_not_zero() {
    let mut out = Vec::new();
    let summary = TimingSummary {
        total: 2.5e-7,
        average: 2.5e-8,
    };
    render_average(&mut out, "simd", &summary).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Average time (for simd)\t: 0.000000025 s\n"
    );
}

#[test]
fn report_has_table_per_kernel() {
    let harness = test_harness();
    let report = harness
        .run_with_inputs(&TEST_X, &TEST_Y, &[&Asm, &Reference])
        .unwrap();

    let mut out = Vec::new();
    write_report(&mut out, &report, 10).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert_eq!(text.matches("Index").count(), 2);
    assert_eq!(text.matches("Speedup (for").count(), 2);
    assert!(text.contains("Average time (for asm)"));
}
