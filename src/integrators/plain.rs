//! Plain Monte Carlo integration over hypercubes and limit-restricted domains.

use crate::core::limits::{CompiledLimits, CubeInfo, Limits};
use crate::core::{partition_calls, IntegrationError, Seeding};
use crate::dispatch::run_concurrently;
use crate::samplers::hypercube;

use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};

/// Estimate the integral of `f` over the domain described by `limits`, using `calls` uniform
/// samples spread across `cores` worker threads.
///
/// When every limit is constant the domain is rectangular and no `cube` is needed: the limits
/// themselves are the sampling hypercube, and reversed limit pairs produce the negated integral
/// through the signed volume. When any limit is function-valued, `cube` must be an axis-aligned
/// box enclosing the true domain (points outside it are never sampled and an undersized cube
/// silently undercounts). The integrand is then wrapped in a signed indicator that zeroes
/// contributions outside the limits and carries the reversal sign, so the volume enters as
/// $|V|$ to avoid double-counting the sign.
///
/// # Truncation
///
/// The requested `calls` is truncated to `(calls / cores) * cores`, the largest multiple of the
/// worker count. The remainder is dropped, not redistributed, so the effective sample count can
/// be smaller than requested. The scaling constant uses the effective count, so the estimate
/// stays unbiased.
///
/// # Errors
///
/// Fails with [`IntegrationError::InvalidDomain`] when a limit is function-valued and no `cube`
/// was provided, and with [`IntegrationError::DimensionMismatch`] when the cube's dimensionality
/// differs from the number of limits. Both are raised before any worker is dispatched.
pub fn integrate<T, F, R>(
    f: &F,
    limits: &Limits<T>,
    cube: Option<&[(T, T)]>,
    calls: usize,
    cores: usize,
    rng: &R,
    seeding: Seeding,
) -> Result<T, IntegrationError>
where
    T: Float + FromPrimitive + Send + Sync,
    F: Fn(&[T]) -> T + Send + Sync,
    R: Rng + SeedableRng + Clone + Send,
    Standard: Distribution<T>,
{
    let (calls_per_core, rectified) = partition_calls(calls, cores);

    match cube {
        None => {
            let info = CubeInfo::from_limits(limits)?;
            let scale = info.volume / T::from_usize(rectified).unwrap();
            let sum = dispatch_hypercube(f, &info, calls_per_core, cores, rng, seeding)?;

            Ok(sum * scale)
        }
        Some(cube) => {
            if cube.len() != limits.len() {
                return Err(IntegrationError::DimensionMismatch {
                    expected: limits.len(),
                    found: cube.len(),
                });
            }

            let info = CubeInfo::from_cube(cube);
            // the indicator carries the sign for exotic domains; the cube is only a sampling
            // box, so its orientation must not contribute
            let scale = (info.volume / T::from_usize(rectified).unwrap()).abs();
            let compiled = CompiledLimits::compile(limits);
            let wrapped = compiled.wrap(f);
            let sum = dispatch_hypercube(&wrapped, &info, calls_per_core, cores, rng, seeding)?;

            Ok(sum * scale)
        }
    }
}

/// Fan the sampling work out over `cores` independent tasks and sum their partial sums.
fn dispatch_hypercube<T, F, R>(
    f: &F,
    info: &CubeInfo<T>,
    calls_per_core: usize,
    cores: usize,
    rng: &R,
    seeding: Seeding,
) -> Result<T, IntegrationError>
where
    T: Float + Send + Sync,
    F: Fn(&[T]) -> T + Send + Sync,
    R: Rng + SeedableRng + Clone + Send,
    Standard: Distribution<T>,
{
    let tasks = (0..cores)
        .map(|_| {
            let mut rng = seeding.task_rng(rng);

            move || -> Result<T, IntegrationError> {
                Ok(hypercube::sample_sum(
                    f,
                    &info.lows,
                    &info.highs,
                    calls_per_core,
                    &mut rng,
                ))
            }
        })
        .collect::<Vec<_>>();

    let partial_sums = run_concurrently(tasks)?;

    Ok(partial_sums.into_iter().fold(T::zero(), |acc, sum| acc + sum))
}
