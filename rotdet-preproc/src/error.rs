//! Input validation errors raised at the pipeline boundary.

use thiserror::Error;

/// Validation failures. They are wrapped into [anyhow::Error] when returned,
/// so callers can recover the kind with `downcast_ref`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreprocessError {
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
    #[error("invalid class label {0}, expect a non-negative integer")]
    InvalidLabel(f64),
}
