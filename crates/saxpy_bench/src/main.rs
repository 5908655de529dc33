// CLI for the SAXPY benchmark harness.

use clap::{Args, Parser, Subcommand};
use saxpy::{KernelKind, SaxpyKernel};
use saxpy_bench::{BenchConfig, BenchError, BenchmarkHarness, ScalarParams};

// setup command line args

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Time the reference kernel against optimized kernels.
    Run(RunArgs),
    /// List the kernels and whether they run natively here.
    Kernels,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[clap(long, default_value_t = 10)]
    length: usize,
    #[clap(long, default_value_t = 30)]
    iterations: usize,
    #[clap(long, default_value_t = 2.0, allow_negative_numbers = true)]
    scalar: f32,
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    min: f32,
    #[clap(long, default_value_t = 1.0, allow_negative_numbers = true)]
    max: f32,
    #[clap(long)]
    seed: Option<u64>,
    #[clap(long, default_value_t = 10)]
    rows: usize,
    #[clap(long, default_value_t = 1.0e-5)]
    tolerance: f32,
    /// Worker threads for the parallel kernel [default: number of CPUs]
    #[clap(long)]
    threads: Option<usize>,
    /// Optimized kernel(s) to compare against the reference.
    #[clap(long = "kernel", value_enum, default_values_t = [KernelKind::Asm])]
    kernels: Vec<KernelKind>,
}

impl RunArgs {
    fn to_config(&self) -> BenchConfig {
        let defaults = BenchConfig::default();
        BenchConfig {
            params: ScalarParams {
                a: self.scalar,
                n: self.length,
            },
            iterations: self.iterations,
            min: self.min,
            max: self.max,
            seed: self.seed,
            rows: self.rows,
            tolerance: self.tolerance,
            threads: self.threads.unwrap_or(defaults.threads),
        }
    }
}

fn run(args: RunArgs) -> Result<(), BenchError> {
    let config = args.to_config();
    let mut harness = BenchmarkHarness::new(config.clone())?;

    let kernels = args
        .kernels
        .iter()
        .map(|kind| kind.build(config.threads))
        .collect::<Result<Vec<_>, _>>()?;
    let kernel_refs: Vec<&dyn SaxpyKernel> = kernels
        .iter()
        .map(|kernel| kernel.as_ref() as &dyn SaxpyKernel)
        .collect();

    let report = harness.run(&kernel_refs)?;

    let mut stdout = std::io::stdout().lock();
    saxpy_bench::write_report(&mut stdout, &report, config.rows)
}

fn list_kernels() -> Result<(), BenchError> {
    for kind in KernelKind::ALL {
        let path = if kind.is_native() { "native" } else { "fallback" };
        println!("{:<10} {}", kind.name(), path);
    }
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = CliArgs::parse();

    let result = match args.command {
        Command::Run(args) => run(args),
        Command::Kernels => list_kernels(),
    };

    result.map_err(|e| e.to_string())
}
