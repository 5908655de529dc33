// Random input vectors.

use rand::{Rng, SeedableRng, distributions::Uniform, rngs::StdRng};

/// Generator seeded from `seed`, or from OS entropy when there is none.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Fills a vector with `length` values uniformly distributed in `[min, max)`.
///
/// __Arguments:__
///
/// + `rng` - the generator to draw from; it advances by `length` samples
///
/// + `min`, `max` - bounds of the half-open range; `min` must be below `max`
///   and both finite (see `BenchConfig::validate`)
///
pub fn generate_random_vector<R: Rng>(
    rng: &mut R,
    length: usize,
    min: f32,
    max: f32,
) -> Vec<f32> {
    let range = Uniform::new(min, max);
    (0..length).map(|_| rng.sample(&range)).collect()
}
