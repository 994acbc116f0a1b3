//! The estimator entry points.

pub mod importance;
pub mod plain;

pub use importance::{importance_sample, importance_sample_with, ChainParams};
pub use plain::integrate;
