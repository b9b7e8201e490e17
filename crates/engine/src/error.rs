use crate::{retry::RetryError, sink::SinkError, source::SourceError};
use model::pagination::cursor::Cursor;
use state_store::error::StateStoreError;
use thiserror::Error;

/// Top-level errors for an extraction run.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Non-transient source failure, or a transient one that exhausted the
    /// retry budget.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// The state itself could not be read or recorded; fatal for the run,
    /// never silently downgraded to a from-scratch restart.
    #[error("state store error: {0}")]
    Store(#[from] StateStoreError),

    /// The source returned an empty page while claiming more data remains.
    #[error("empty page with has_more=true for {state_id} at {cursor}")]
    EmptyPageAnomaly { state_id: String, cursor: Cursor },
}

impl From<RetryError<SourceError>> for ExtractError {
    fn from(err: RetryError<SourceError>) -> Self {
        ExtractError::Source(err.into_inner())
    }
}
