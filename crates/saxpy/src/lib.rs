
// Home of the SAXPY kernels.

mod asm;
mod simd;

pub use asm::Asm;
pub use simd::Simd;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder, prelude::*};

/// Smallest number of elements handed to a single rayon job by [`Parallel`].
pub const MIN_PARALLEL_CHUNK: usize = 4096;

/// Reference SAXPY: returns `z` with `z[i] = a * x[i] + y[i]` for `i` in `[0, n)`.
///
/// __Arguments:__
///
/// + `n` - number of elements to compute
///
/// + `a` - the scalar multiplier
///
/// + `x`, `y` - input vectors; both must hold at least `n` entries
///
pub fn saxpy(n: usize, a: f32, x: &[f32], y: &[f32]) -> Vec<f32> {
    assert!(
        x.len() >= n && y.len() >= n,
        "SAXPY inputs must hold at least n = {n} entries."
    );

    let mut z = vec![0.0_f32; n];
    saxpy_into(a, &x[..n], &y[..n], &mut z);
    z
}

/// The portable scalar loop every other kernel is checked against.
///
/// All three slices must have the same length.
pub fn saxpy_into(a: f32, x: &[f32], y: &[f32], z: &mut [f32]) {
    assert_slice_lengths(x, y, z);

    for ((z, x), y) in z.iter_mut().zip(x).zip(y) {
        *z = a * *x + *y;
    }
}

fn assert_slice_lengths(x: &[f32], y: &[f32], z: &[f32]) {
    assert!(
        x.len() == y.len() && y.len() == z.len(),
        "SAXPY slices must have equal lengths (x: {}, y: {}, z: {}).",
        x.len(),
        y.len(),
        z.len()
    );
}

/// Something that computes SAXPY.
///
/// Implementations must produce the same values as [`saxpy_into`] for the
/// same inputs; the benchmark harness times them interchangeably.
pub trait SaxpyKernel {
    /// Short lowercase name used in tables and on the command line.
    fn name(&self) -> &'static str;

    /// Whether the optimized code path runs on this target, as opposed to a
    /// portable fallback.
    fn is_native(&self) -> bool {
        true
    }

    /// Writes `a * x + y` into `z`. All three slices must have the same length.
    fn apply(&self, a: f32, x: &[f32], y: &[f32], z: &mut [f32]);
}

/// The scalar loop, as a kernel.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reference;

impl SaxpyKernel for Reference {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn apply(&self, a: f32, x: &[f32], y: &[f32], z: &mut [f32]) {
        saxpy_into(a, x, y, z);
    }
}

// parallel implementation

/// Splits the vectors into equal chunks and runs the scalar loop on each
/// chunk in a dedicated rayon thread pool.
pub struct Parallel {
    thread_pool: ThreadPool,
}

impl Parallel {
    /// Builds the kernel with its own pool of `threads` workers.
    pub fn new(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let thread_pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(Self { thread_pool })
    }

    pub fn threads(&self) -> usize {
        self.thread_pool.current_num_threads()
    }

    fn chunk_size(&self, len: usize) -> usize {
        len.div_ceil(self.threads()).max(MIN_PARALLEL_CHUNK)
    }
}

impl SaxpyKernel for Parallel {
    fn name(&self) -> &'static str {
        "parallel"
    }

    fn apply(&self, a: f32, x: &[f32], y: &[f32], z: &mut [f32]) {
        assert_slice_lengths(x, y, z);

        let chunk_size = self.chunk_size(z.len());

        // each job for rayon is one chunk of all three vectors
        self.thread_pool.install(|| {
            z.par_chunks_mut(chunk_size)
                .zip(x.par_chunks(chunk_size))
                .zip(y.par_chunks(chunk_size))
                .for_each(|((z, x), y)| saxpy_into(a, x, y, z));
        });
    }
}

// kernel selection

/// The available kernels, for selecting one by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum KernelKind {
    Reference,
    Simd,
    Asm,
    Parallel,
}

impl KernelKind {
    pub const ALL: [KernelKind; 4] = [
        KernelKind::Reference,
        KernelKind::Simd,
        KernelKind::Asm,
        KernelKind::Parallel,
    ];

    /// Same as [`SaxpyKernel::name`] of the built kernel.
    pub fn name(self) -> &'static str {
        match self {
            KernelKind::Reference => "reference",
            KernelKind::Simd => "simd",
            KernelKind::Asm => "asm",
            KernelKind::Parallel => "parallel",
        }
    }

    /// Same as [`SaxpyKernel::is_native`] of the built kernel.
    pub fn is_native(self) -> bool {
        match self {
            KernelKind::Reference | KernelKind::Parallel => true,
            KernelKind::Simd | KernelKind::Asm => cfg!(target_arch = "x86_64"),
        }
    }

    /// Constructs the kernel; `threads` is only used by [`KernelKind::Parallel`].
    pub fn build(
        self,
        threads: usize,
    ) -> Result<Box<dyn SaxpyKernel + Send + Sync>, ThreadPoolBuildError> {
        Ok(match self {
            KernelKind::Reference => Box::new(Reference),
            KernelKind::Simd => Box::new(Simd::new()),
            KernelKind::Asm => Box::new(Asm),
            KernelKind::Parallel => Box::new(Parallel::new(threads)?),
        })
    }
}
