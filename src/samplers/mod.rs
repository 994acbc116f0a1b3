//! The sampling engines driving the estimators: chunked uniform hypercube sampling and the
//! Metropolis-Hastings Markov chain.

pub mod hypercube;
pub mod metropolis;
