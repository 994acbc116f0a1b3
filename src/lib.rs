#![warn(clippy::all, clippy::cargo, clippy::nursery, clippy::pedantic)]
#![warn(missing_docs)]

//! The crate `mcintegrate` provides [Monte Carlo] estimation of definite
//! multi-dimensional [integrals] over bounded, possibly non-rectangular,
//! domains. Two estimators are implemented:
//!
//! - [`integrate`], which samples points uniformly from an axis-aligned
//!   hypercube enclosing the integration domain, and
//! - [`importance_sample`], a self-normalized importance sampling estimator
//!   whose draws come from a Metropolis-Hastings Markov chain targeting a
//!   caller-supplied density.
//!
//! # Features
//!
//! This library was designed with the following features as essential in mind:
//!
//! - **Generic numeric type**. The numeric type used in this library is not fixed, but instead a
//! generic parameter, so that the integration routines can be used with either `f32`, `f64`, or a
//! custom numeric type that implements the `Float` trait from the `num-traits` crate.
//! - **Generic random number generator**. Every random number generator that implements the `Rng`
//! and `SeedableRng` traits from the `rand` crate can be used with every estimator in this crate.
//! - **Reproducibility**. With [`Seeding::Ambient`] the results only depend on the chosen random
//! number generator and its seed, which makes runs repeatable in tests. With
//! [`Seeding::TaskEntropy`] every worker reseeds itself from operating system entropy, so
//! concurrent workers never share a random number stream.
//! - **Exotic domains**. Integration bounds may be functions of the other coordinates, which
//! allows integration over triangles, simplices and similar regions. Reversed bounds are
//! supported and contribute the sign demanded by $\int_a^b = -\int_b^a$.
//! - **Bounded memory**. The uniform sampler generates points in fixed-size batches, so the peak
//! memory of an integration does not grow with the number of samples.
//!
//! # What is ...?
//!
//! Given
//!
//! $$ I = \prod_{i=1}^d \int_{a_i}^{b_i} \mathrm{d} x_i f(x_1, x_2, \ldots, x_d) $$
//!
//! the plain estimator approximates $I$ with
//!
//! $$ I \approx \frac{V}{N} \sum_{j=1}^N f \left( x_1^{(j)}, x_2^{(j)}, \ldots, x_d^{(j)} \right) $$
//!
//! where $V$ is the (signed) volume of the sampling hypercube and the points are uniformly
//! distributed inside it. We use the following terms:
//!
//! - the number of *calls* is $N$, the number of times the integrand is evaluated. We assume this
//! is the expensive operation;
//! - the *integrand* is the function $f(x_1, x_2, \ldots, x_d)$ that is being integrated;
//! - the number of *dimensions*, $d$, is the number of dimensions of the integration domain and
//! is implied by the length of the limits;
//! - a *limit* is one side of a one-dimensional integration interval, either a constant or a
//! function of the point being sampled;
//! - the *target density* of the importance sampling estimator is the (not necessarily
//! normalized) density the Markov chain draws from.
//!
//! Note that the requested number of calls is truncated to a multiple of the worker count,
//! see [`integrate`] for details.
//!
//! [Monte Carlo]: https://en.wikipedia.org/wiki/Monte_Carlo_integration
//! [integrals]: https://en.wikipedia.org/wiki/Integral

pub mod core;
pub mod dispatch;
pub mod integrators;
pub mod samplers;

pub use crate::core::*;
pub use crate::integrators::{importance_sample, importance_sample_with, integrate, ChainParams};
pub use crate::samplers::metropolis::{metropolis_hastings, MetropolisChain};
