// This file is a place to try out the SAXPY kernels.

use clap::Parser;
use ndarray::Array1;
use saxpy::KernelKind;

/// Scalar multiplier for the test vectors.
const SCALAR: f32 = 2.0;

#[derive(Parser)]
#[command(about, long_about = None)]
struct Args {
    #[arg(long, value_enum, default_value_t = KernelKind::Asm)]
    kernel: KernelKind,
    #[arg(long, default_value_t = 2)]
    threads: usize,
}

/// Runs one kernel on the test vectors x = [1, ..., 10], y = 0 and
/// outputs the inputs and the result.
fn main() -> Result<(), String> {
    let args = Args::parse();
    let kernel = args.kernel.build(args.threads).map_err(|e| e.to_string())?;

    let x = get_test_x();
    let y = Array1::<f32>::zeros(x.len());
    let mut z = Array1::<f32>::zeros(x.len());

    println!("x:         {}", x);
    println!("y:         {}", y);

    let (Some(x_slice), Some(y_slice), Some(z_slice)) =
        (x.as_slice(), y.as_slice(), z.as_slice_mut())
    else {
        return Err("test vectors are not contiguous".to_string());
    };
    kernel.apply(SCALAR, x_slice, y_slice, z_slice);

    println!("{} * x + y ({}): {}", SCALAR, kernel.name(), z);

    Ok(())
}

fn get_test_x() -> Array1<f32> {
    Array1::<f32>::from_iter((1..=10).map(|i| i as f32))
}
