//! The Metropolis-Hastings Markov chain.

use crate::core::proposal::ProposalKernel;
use crate::core::IntegrationError;

use num_traits::Float;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// A lazy, single-pass, non-restartable sequence of states approximating draws from a target
/// density.
///
/// The chain performs `n * skip + burn_in` transitions in total. Starting with transition
/// `burn_in`, the current state is emitted every `skip`-th transition, which yields exactly `n`
/// states. Each transition proposes a candidate `x'` from the kernel and accepts it with
/// probability
///
/// $$ \min\left(1, \frac{f(x')}{f(x)} \cdot \frac{q(x \mid x')}{q(x' \mid x)}\right) $$
///
/// retaining the current state otherwise. Repeated states are a feature of the algorithm, not a
/// bug: a rejected transition emits the unchanged current state.
///
/// The target density must be positive at the initial state. A zero (or negative) density at the
/// current state would divide the acceptance ratio by zero; the chain reports this as
/// [`IntegrationError::ZeroDensity`] and terminates instead of producing non-finite states.
pub struct MetropolisChain<'a, T, F, P, R> {
    target: &'a F,
    proposal: &'a P,
    x: Vec<T>,
    step: usize,
    total_steps: usize,
    burn_in: usize,
    skip: usize,
    rng: R,
    poisoned: bool,
}

impl<'a, T, F, P, R> MetropolisChain<'a, T, F, P, R>
where
    T: Float,
    F: Fn(&[T]) -> T,
    P: ProposalKernel<T>,
    R: Rng,
    Standard: Distribution<T>,
{
    /// Start a chain at `init`, emitting `n` states after `burn_in` discarded transitions and
    /// with a thinning factor of `skip` (which must be at least one).
    pub fn new(
        target: &'a F,
        proposal: &'a P,
        init: Vec<T>,
        n: usize,
        burn_in: usize,
        skip: usize,
        rng: R,
    ) -> Self {
        debug_assert!(skip >= 1);

        Self {
            target,
            proposal,
            x: init,
            step: 0,
            total_steps: n * skip + burn_in,
            burn_in,
            skip,
            rng,
            poisoned: false,
        }
    }
}

impl<'a, T, F, P, R> Iterator for MetropolisChain<'a, T, F, P, R>
where
    T: Float,
    F: Fn(&[T]) -> T,
    P: ProposalKernel<T>,
    R: Rng,
    Standard: Distribution<T>,
{
    type Item = Result<Vec<T>, IntegrationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }

        while self.step < self.total_steps {
            let current_density = (self.target)(&self.x);

            if current_density <= T::zero() {
                self.poisoned = true;
                return Some(Err(IntegrationError::ZeroDensity));
            }

            let candidate = self.proposal.propose(&mut self.rng, &self.x);
            let ratio = (self.target)(&candidate) / current_density
                * self.proposal.density(&candidate, &self.x)
                / self.proposal.density(&self.x, &candidate);
            let acceptance = ratio.min(T::one());

            if self.rng.gen::<T>() < acceptance {
                self.x = candidate;
            }

            let step = self.step;
            self.step += 1;

            if step >= self.burn_in && (step - self.burn_in) % self.skip == 0 {
                return Some(Ok(self.x.clone()));
            }
        }

        None
    }
}

/// Generate `n` states of a Metropolis-Hastings chain targeting the (not necessarily normalized)
/// density `target`.
///
/// The initial state is drawn by `init`, which must return a point where `target` is positive;
/// see [`MetropolisChain`] for the burn-in, thinning and failure semantics.
pub fn metropolis_hastings<'a, T, F, I, P, R>(
    target: &'a F,
    init: I,
    proposal: &'a P,
    n: usize,
    burn_in: usize,
    skip: usize,
    mut rng: R,
) -> MetropolisChain<'a, T, F, P, R>
where
    T: Float,
    F: Fn(&[T]) -> T,
    I: FnOnce(&mut R) -> Vec<T>,
    P: ProposalKernel<T>,
    R: Rng,
    Standard: Distribution<T>,
{
    let init = init(&mut rng);

    MetropolisChain::new(target, proposal, init, n, burn_in, skip, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::proposal::GaussianKernel;
    use rand_pcg::Pcg64;

    fn rng() -> Pcg64 {
        Pcg64::new(0xcafef00dd15ea5e5, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
    }

    #[test]
    fn emits_exactly_n_states() {
        let target = |x: &[f64]| (-x[0] * x[0] / 2.0).exp();
        let kernel = GaussianKernel::new(1);
        let chain = MetropolisChain::new(&target, &kernel, vec![0.0], 5, 7, 3, rng());

        let states = chain.collect::<Result<Vec<_>, _>>().unwrap();

        assert_eq!(states.len(), 5);
    }

    #[test]
    fn support_is_never_violated() {
        // exponential-shaped target with support on the non-negative half line
        let target = |x: &[f64]| if x[0] >= 0.0 { 5.0 * (-x[0]).exp() } else { 0.0 };
        let kernel = GaussianKernel::new(1);
        let init = |r: &mut Pcg64| vec![r.gen::<f64>()];

        let states = metropolis_hastings(&target, init, &kernel, 10_000, 1_000, 1, rng())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(states.len(), 10_000);
        assert!(states.iter().all(|x| x[0] >= 0.0));
    }

    #[test]
    fn exponential_mass_below_one() {
        // about 1 - e^-1 of the exponential target's mass lies below one
        let target = |x: &[f64]| if x[0] >= 0.0 { 234.6432 * (-x[0]).exp() } else { 0.0 };
        let kernel = GaussianKernel::new(1);
        let init = |r: &mut Pcg64| vec![r.gen::<f64>()];

        let states = metropolis_hastings(&target, init, &kernel, 200_000, 10_000, 3, rng())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let below = states.iter().filter(|x| x[0] < 1.0).count();
        let fraction = below as f64 / states.len() as f64;
        let actual = 1.0 - (-1.0_f64).exp();

        assert!((fraction - actual).abs() < 0.01);
    }

    #[test]
    fn zero_density_start_fails_fast() {
        let target = |x: &[f64]| if x[0] >= 0.0 { (-x[0]).exp() } else { 0.0 };
        let kernel = GaussianKernel::new(1);
        let mut chain = MetropolisChain::new(&target, &kernel, vec![-1.0], 10, 0, 1, rng());

        assert_eq!(chain.next(), Some(Err(IntegrationError::ZeroDensity)));
        assert_eq!(chain.next(), None);
    }
}
