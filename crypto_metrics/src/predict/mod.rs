//! Linear prediction of forward-looking percentage deviations.
//!
//! [`linear`] is a small ordinary-least-squares implementation; [`trainer`]
//! turns a [`MetricSeries`](crate::models::metrics::MetricSeries) into a
//! fitted model with a held-out score.

pub mod linear;
pub mod trainer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Normal-equations matrix is singular and cannot be factorized")]
    SingularMatrix,

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Not enough defined rows to fit a model: {rows}")]
    InsufficientData { rows: usize },

    #[error("Computation error: {0}")]
    Computation(String),
}
