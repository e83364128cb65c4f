use std::time::Duration;

use thiserror::Error;

/// Error taxonomy for the matching subsystem.
///
/// Every external call (model services, embedding store, job lookup) is
/// translated into one of these variants — nothing panics or leaks a raw
/// transport error past the subsystem boundary. The HTTP layer maps variants
/// to status codes in `From<MatchError> for AppError`.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Job {0} not found")]
    JobNotFound(i64),

    #[error("No stored embedding for job {0}")]
    EmbeddingNotFound(i64),

    #[error("Vector length mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Cannot score a zero-magnitude vector")]
    DegenerateVector,

    #[error("Embedding store error: {0}")]
    Storage(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Model service timed out after {0:?}")]
    Timeout(Duration),
}
