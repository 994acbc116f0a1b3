//! Core data model shared by the estimators. You don't need to import this module since all its
//! public members are part of the crate namespace.

pub mod error;
pub mod limits;
pub mod proposal;

pub use error::IntegrationError;
pub use limits::{interval, Bound, CompiledLimits, CubeInfo, Limits};
pub use proposal::{GaussianKernel, ProposalKernel};

use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A coordinate in $\mathbb{R}^d$. The dimensionality is fixed per integration call and implied
/// by the length of the limits.
pub type Point<T> = Vec<T>;

/// Controls how each worker task obtains its random number stream.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Seeding {
    /// Every task reseeds itself from operating system entropy. Use this in production so that
    /// concurrent tasks do not inherit identical generator states from the caller.
    TaskEntropy,
    /// Every task clones the caller's generator state unmodified. Results then depend only on the
    /// ambient seed, which makes single-seed test runs reproducible.
    Ambient,
}

impl Seeding {
    /// Derive the random number generator for one worker task from the ambient one.
    pub(crate) fn task_rng<R>(self, ambient: &R) -> R
    where
        R: Rng + SeedableRng + Clone,
    {
        match self {
            Self::TaskEntropy => R::from_entropy(),
            Self::Ambient => ambient.clone(),
        }
    }
}

/// Split `calls` into equal per-worker shares. Returns the share together with the *rectified*
/// total, `(calls / cores) * cores`, which is the number of samples actually drawn. The remainder
/// is dropped, not redistributed; callers see this truncation through the documented contract of
/// the estimators.
pub(crate) fn partition_calls(calls: usize, cores: usize) -> (usize, usize) {
    debug_assert!(cores > 0);

    let calls_per_core = calls / cores;

    (calls_per_core, calls_per_core * cores)
}
