//! Error taxonomy of the estimators.

use std::error::Error;
use std::fmt;

/// Everything that can go wrong while setting up or running an estimate.
///
/// Validation errors are raised eagerly, before any worker task is dispatched. A numeric error
/// inside a worker aborts that worker and fails the whole estimate, since silently continuing
/// with fewer samples would bias the result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IntegrationError {
    /// A bound was function-valued in a place where only constant bounds are allowed, namely in
    /// the description of a sampling hypercube. Provide an explicit enclosing cube instead.
    InvalidDomain {
        /// The offending dimension (zero-based).
        dim: usize,
    },

    /// The dimensionality of two collaborating inputs disagrees, for example an initial chain
    /// point whose length differs from the number of limits.
    DimensionMismatch {
        /// The dimensionality implied by the limits.
        expected: usize,
        /// The dimensionality actually found.
        found: usize,
    },

    /// The target density evaluated to zero (or below) at a state the estimate depends on, which
    /// would require a division by zero in the acceptance ratio or the importance weight.
    ZeroDensity,
}

impl fmt::Display for IntegrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { dim } => write!(
                f,
                "bound in dimension {} is function-valued; a hypercube requires constant bounds",
                dim
            ),
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch: expected {} coordinates, found {}",
                expected, found
            ),
            Self::ZeroDensity => write!(f, "target density is zero at a sampled state"),
        }
    }
}

impl Error for IntegrationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            IntegrationError::InvalidDomain { dim: 1 }.to_string(),
            "bound in dimension 1 is function-valued; a hypercube requires constant bounds"
        );
        assert_eq!(
            IntegrationError::DimensionMismatch {
                expected: 2,
                found: 3
            }
            .to_string(),
            "dimension mismatch: expected 2 coordinates, found 3"
        );
        assert_eq!(
            IntegrationError::ZeroDensity.to_string(),
            "target density is zero at a sampled state"
        );
    }
}
