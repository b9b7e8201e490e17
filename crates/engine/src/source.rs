use crate::retry::RetryDisposition;
use async_trait::async_trait;
use model::pagination::cursor::Cursor;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// One page of records handed back by a source client.
#[derive(Debug, Clone)]
pub struct Page {
    pub records: Vec<Value>,
    /// Position the next request should start from.
    pub next_cursor: Cursor,
    pub has_more: bool,
}

impl Page {
    /// Terminal empty page; sources return this when the data is exhausted.
    pub fn end(cursor: Cursor) -> Self {
        Page {
            records: Vec::new(),
            next_cursor: cursor,
            has_more: false,
        }
    }
}

/// Failures surfaced by a source client.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The API asked us to back off; the hint comes from its rate-limit
    /// headers when present.
    #[error("rate limited by source")]
    RateLimited { retry_after: Option<Duration> },

    /// Network timeout or similar recoverable failure.
    #[error("transient source failure: {0}")]
    Transient(String),

    /// Credentials rejected; retrying cannot help.
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// The response could not be parsed; retrying cannot help.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl SourceError {
    /// How the retry policy should treat this failure: rate limits retry
    /// with the hinted wait, transients retry on plain backoff, everything
    /// else aborts the run.
    pub fn retry_disposition(&self) -> RetryDisposition {
        match self {
            SourceError::RateLimited { retry_after } => {
                RetryDisposition::RetryAfter(retry_after.unwrap_or(Duration::ZERO))
            }
            SourceError::Transient(_) => RetryDisposition::Retry,
            SourceError::Auth(_) | SourceError::Malformed(_) => RetryDisposition::Stop,
        }
    }
}

/// Paginated API client, the external collaborator the drivers pull from.
///
/// Implementations own all HTTP concerns; the drivers only see pages and
/// cursors. Pagination is inherently sequential because each page's cursor
/// depends on the previous response.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Source name, the first segment of every state id (`github`, `lido`).
    fn name(&self) -> &str;

    /// Starting position for a resource that has never been extracted.
    fn initial_cursor(&self, resource: &str) -> Cursor;

    async fn fetch_page(
        &self,
        resource: &str,
        partition: Option<&str>,
        cursor: &Cursor,
    ) -> Result<Page, SourceError>;
}
