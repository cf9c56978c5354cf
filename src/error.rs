// Error taxonomy for the derivation entry points.
//
// Only two outcomes ever reach a caller: the requested record is missing,
// or the store itself failed. Unparseable timestamps and missing fields are
// handled inside the scoring functions and never show up here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No record exists with the requested id.
    #[error("record {id} not found")]
    NotFound { id: i64 },

    /// The record store failed to answer the query.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl PipelineError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, PipelineError::NotFound { .. })
    }
}
