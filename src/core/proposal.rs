//! Proposal kernels for the Metropolis-Hastings chain.

use num_traits::{Float, FromPrimitive};
use rand::distributions::Distribution;
use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

/// A Markov chain proposal kernel.
///
/// The kernel bundles the proposal sampler with its transition density, so that asymmetric
/// proposals stay correct: the chain always evaluates the density in both directions, even though
/// the two evaluations cancel for symmetric kernels such as [`GaussianKernel`].
pub trait ProposalKernel<T>: Send + Sync {
    /// Draw a candidate state conditioned on the current state `x`.
    fn propose<R: Rng>(&self, rng: &mut R, x: &[T]) -> Vec<T>;

    /// The density of proposing `to` while the chain sits at `from`.
    fn density(&self, from: &[T], to: &[T]) -> T;
}

/// The default proposal: a random walk with unit-covariance Gaussian steps.
///
/// The candidate is `x + z` with `z` drawn from a zero-mean normal with identity covariance, and
/// the transition density is
///
/// $$ q(x' \mid x) = (2\pi)^{-d/2} \exp\left( -\tfrac{1}{2} \lVert x' - x \rVert^2 \right) $$
///
/// The dimension $d$ is fixed at construction, once per estimator invocation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GaussianKernel {
    dim: usize,
}

impl GaussianKernel {
    /// Create a kernel for points of dimensionality `dim`.
    pub const fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl<T> ProposalKernel<T> for GaussianKernel
where
    T: Float + FromPrimitive,
    StandardNormal: Distribution<T>,
{
    fn propose<R: Rng>(&self, rng: &mut R, x: &[T]) -> Vec<T> {
        x.iter().map(|&xi| xi + rng.sample(StandardNormal)).collect()
    }

    fn density(&self, from: &[T], to: &[T]) -> T {
        let half = T::from_f64(0.5).unwrap();
        let two_pi = T::from_f64(2.0 * std::f64::consts::PI).unwrap();

        let distance_sq = from
            .iter()
            .zip(to)
            .fold(T::zero(), |acc, (&a, &b)| acc + (b - a) * (b - a));
        let dim = T::from_usize(self.dim).unwrap();

        two_pi.powf(-dim * half) * (-distance_sq * half).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn density_peaks_at_the_current_state() {
        let kernel = GaussianKernel::new(1);
        let peak: f64 = ProposalKernel::<f64>::density(&kernel, &[0.3], &[0.3]);

        // (2 pi)^(-1/2)
        assert_approx_eq!(peak, 0.3989422804014327, 1e-12);

        let kernel = GaussianKernel::new(2);
        let peak: f64 = ProposalKernel::<f64>::density(&kernel, &[0.0, 0.0], &[0.0, 0.0]);

        // (2 pi)^(-1)
        assert_approx_eq!(peak, 0.15915494309189535, 1e-12);
    }

    #[test]
    fn density_is_symmetric() {
        let kernel = GaussianKernel::new(2);
        let x = [0.1, -0.4];
        let y = [1.3, 0.2];

        let forward: f64 = kernel.density(&x, &y);
        let backward: f64 = kernel.density(&y, &x);

        assert_approx_eq!(forward, backward, 1e-15);
    }

    #[test]
    fn proposal_preserves_dimension() {
        use rand::SeedableRng;

        let kernel = GaussianKernel::new(3);
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let candidate: Vec<f64> = kernel.propose(&mut rng, &[0.0, 1.0, -1.0]);

        assert_eq!(candidate.len(), 3);
    }
}
