//! Uniform sampling over an axis-aligned hypercube.

use num_traits::Float;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Number of points generated per batch. Batching caps the peak memory of a sampling task at
/// `O(CHUNK_SIZE * d)` regardless of the total sample count.
const CHUNK_SIZE: usize = 1000;

fn fill_point<T, R>(x: &mut [T], lows: &[T], highs: &[T], rng: &mut R)
where
    T: Float,
    R: Rng,
    Standard: Distribution<T>,
{
    for (v, (&low, &high)) in x.iter_mut().zip(lows.iter().zip(highs)) {
        *v = low + (high - low) * rng.gen();
    }
}

/// Draw `n` points uniformly from the box spanned by `lows` and `highs` and return
/// $\sum_j f(x^{(j)})$.
///
/// Component `i` is generated as `low + (high - low) * u` with `u` uniform in $[0, 1)$, so a
/// reversed pair (`lows[i] > highs[i]`) samples the same interval as the ordered one. Any sign
/// correction belongs to the caller through the volume factor, not to the sampler.
///
/// Points are generated and consumed in batches of `CHUNK_SIZE` points; the final batch holds the
/// remaining `n % CHUNK_SIZE` points.
pub fn sample_sum<T, F, R>(f: &F, lows: &[T], highs: &[T], n: usize, rng: &mut R) -> T
where
    T: Float,
    F: Fn(&[T]) -> T,
    R: Rng,
    Standard: Distribution<T>,
{
    debug_assert_eq!(lows.len(), highs.len());

    let dim = lows.len();
    let mut chunk = vec![vec![T::zero(); dim]; CHUNK_SIZE];
    let mut sum = T::zero();

    for _ in 0..n / CHUNK_SIZE {
        for point in &mut chunk {
            fill_point(point, lows, highs, rng);
        }

        sum = chunk.iter().fold(sum, |acc, point| acc + f(point));
    }

    let tail = &mut chunk[..n % CHUNK_SIZE];

    for point in tail.iter_mut() {
        fill_point(point, lows, highs, rng);
    }

    tail.iter().fold(sum, |acc, point| acc + f(point))
}
