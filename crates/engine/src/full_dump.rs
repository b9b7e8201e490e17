use crate::{
    error::ExtractError,
    retry::RetryPolicy,
    sink::RecordSink,
    source::{Page, PageSource, SourceError},
};
use model::{pagination::cursor::Cursor, records::batch::RecordBatch};
use std::sync::Arc;
use tracing::info;

/// Outcome of a full-dump run.
#[derive(Debug, Clone)]
pub struct DumpSummary {
    pub resource: String,
    pub pages_fetched: u64,
    pub records_written: u64,
}

/// Full-replace extraction for sources with no incremental API (the official
/// fund-results sheets): every run re-fetches everything and replaces the
/// sink dataset wholesale. No state store involvement, no resume.
pub struct FullDumpDriver {
    sink: Arc<dyn RecordSink>,
    retry: RetryPolicy,
}

impl FullDumpDriver {
    pub fn new(sink: Arc<dyn RecordSink>, retry: RetryPolicy) -> Self {
        Self { sink, retry }
    }

    pub async fn run(
        &self,
        source: &dyn PageSource,
        resource: &str,
    ) -> Result<DumpSummary, ExtractError> {
        let mut cursor = source.initial_cursor(resource);
        let mut first_batch = true;
        let mut pages_fetched = 0u64;
        let mut records_written = 0u64;

        loop {
            let page = self.fetch_with_retry(source, resource, &cursor).await?;
            pages_fetched += 1;

            if page.records.is_empty() {
                if page.has_more {
                    return Err(ExtractError::EmptyPageAnomaly {
                        state_id: format!("{}:{resource}", source.name()),
                        cursor,
                    });
                }
                break;
            }

            // First page drops the previous dump, the rest append to it.
            let batch = if first_batch {
                RecordBatch::replace(resource, page.records)
            } else {
                RecordBatch::merge(resource, page.records)
            };
            first_batch = false;

            let batch_len = batch.len() as u64;
            self.sink.write_batch(&batch).await?;
            records_written += batch_len;

            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
        }

        info!(
            source = source.name(),
            resource,
            pages = pages_fetched,
            records = records_written,
            "full dump completed"
        );

        Ok(DumpSummary {
            resource: resource.to_string(),
            pages_fetched,
            records_written,
        })
    }

    async fn fetch_with_retry(
        &self,
        source: &dyn PageSource,
        resource: &str,
        cursor: &Cursor,
    ) -> Result<Page, ExtractError> {
        self.retry
            .run(
                || source.fetch_page(resource, None, cursor),
                SourceError::retry_disposition,
            )
            .await
            .map_err(ExtractError::from)
    }
}
