//! Self-normalized importance sampling driven by Metropolis-Hastings chains.

use crate::core::limits::{CompiledLimits, Limits};
use crate::core::proposal::{GaussianKernel, ProposalKernel};
use crate::core::{partition_calls, IntegrationError, Seeding};
use crate::dispatch::run_concurrently;
use crate::samplers::metropolis::MetropolisChain;

use num_traits::{Float, FromPrimitive};
use rand::distributions::{Distribution, Standard};
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// Workload and chain parameters for the importance sampling estimator.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ChainParams {
    /// Requested total number of scored draws across all workers. Truncated to a multiple of
    /// `cores`, see [`importance_sample`].
    pub calls: usize,
    /// Number of worker threads; each runs one independent chain.
    pub cores: usize,
    /// Transitions discarded at the start of every chain.
    pub burn_in: usize,
    /// Thinning factor: every `skip`-th post-burn-in state is scored. Must be at least one.
    pub skip: usize,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            calls: 10_000,
            cores: 1,
            burn_in: 1_000,
            skip: 1,
        }
    }
}

/// Estimate the integral of `integrand` over the domain described by `limits` by importance
/// sampling against `target`, using the default unit-covariance Gaussian random walk proposal.
///
/// See [`importance_sample_with`] for the full contract; this convenience wrapper merely
/// constructs a [`GaussianKernel`] matching the dimensionality of `limits`.
#[allow(clippy::too_many_arguments)]
pub fn importance_sample<T, F, G, I, R>(
    integrand: &F,
    target: &G,
    init: &I,
    limits: &Limits<T>,
    params: &ChainParams,
    rng: &R,
    seeding: Seeding,
) -> Result<T, IntegrationError>
where
    T: Float + FromPrimitive + Send + Sync,
    F: Fn(&[T]) -> T + Send + Sync,
    G: Fn(&[T]) -> T + Send + Sync,
    I: Fn(&mut R) -> Vec<T> + Send + Sync,
    R: Rng + SeedableRng + Clone + Send,
    Standard: Distribution<T>,
    StandardNormal: Distribution<T>,
{
    let proposal = GaussianKernel::new(limits.len());

    importance_sample_with(&proposal, integrand, target, init, limits, params, rng, seeding)
}

/// Estimate the integral of `integrand` over the domain described by `limits` by importance
/// sampling with a caller-supplied proposal kernel.
///
/// `target` is the (not necessarily normalized) density the chains draw from; it is assumed to
/// integrate to one over its support when normalized, so the estimate is the mean importance
/// weight without any volume factor. There is no separate sampling cube here: `limits` restrict
/// the integrand through the signed indicator, so reversed pairs negate the estimate.
///
/// Every worker calls `init` on its own random number stream and runs its own chain, so chains
/// never share a starting state. `init` must return points where `target` is positive, otherwise
/// the chain fails with [`IntegrationError::ZeroDensity`].
///
/// The requested `params.calls` is truncated to `(calls / cores) * cores` exactly as in
/// [`integrate`](crate::integrate); the divisor of the final estimate is the effective count.
///
/// # Errors
///
/// Fails with [`IntegrationError::DimensionMismatch`] when `init` produces points whose length
/// differs from the number of limits (checked before any worker is dispatched), and with
/// [`IntegrationError::ZeroDensity`] when a chain or an importance weight hits a zero target
/// density.
#[allow(clippy::too_many_arguments)]
pub fn importance_sample_with<T, F, G, I, P, R>(
    proposal: &P,
    integrand: &F,
    target: &G,
    init: &I,
    limits: &Limits<T>,
    params: &ChainParams,
    rng: &R,
    seeding: Seeding,
) -> Result<T, IntegrationError>
where
    T: Float + FromPrimitive + Send + Sync,
    F: Fn(&[T]) -> T + Send + Sync,
    G: Fn(&[T]) -> T + Send + Sync,
    I: Fn(&mut R) -> Vec<T> + Send + Sync,
    P: ProposalKernel<T>,
    R: Rng + SeedableRng + Clone + Send,
    Standard: Distribution<T>,
{
    let (calls_per_core, rectified) = partition_calls(params.calls, params.cores);
    let dim = limits.len();

    // probe the initializer once before spawning anything; workers draw their own start points
    let probe = init(&mut rng.clone());

    if probe.len() != dim {
        return Err(IntegrationError::DimensionMismatch {
            expected: dim,
            found: probe.len(),
        });
    }

    let compiled = CompiledLimits::compile(limits);
    let wrapped = compiled.wrap(integrand);
    let wrapped = &wrapped;
    let burn_in = params.burn_in;
    let skip = params.skip;

    let tasks = (0..params.cores)
        .map(|_| {
            let mut rng = seeding.task_rng(rng);

            move || -> Result<T, IntegrationError> {
                let start = init(&mut rng);
                let chain = MetropolisChain::new(
                    target,
                    proposal,
                    start,
                    calls_per_core,
                    burn_in,
                    skip,
                    rng,
                );

                let mut sum = T::zero();

                for state in chain {
                    let x = state?;
                    let density = target(&x);

                    if density <= T::zero() {
                        return Err(IntegrationError::ZeroDensity);
                    }

                    sum = sum + wrapped(&x) / density;
                }

                Ok(sum)
            }
        })
        .collect::<Vec<_>>();

    let partial_sums = run_concurrently(tasks)?;
    let total = partial_sums
        .into_iter()
        .fold(T::zero(), |acc, sum| acc + sum);

    Ok(total / T::from_usize(rectified).unwrap())
}
