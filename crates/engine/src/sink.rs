use async_trait::async_trait;
use model::records::batch::RecordBatch;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Write(String),
}

/// Record sink, the second collaborator of the drivers.
///
/// Writes must be idempotent under replayed batches (natural-key upsert or
/// equivalent): the drivers guarantee at-least-once delivery, not
/// exactly-once, so the same page may arrive twice after a crash between
/// the sink write and the cursor commit.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn write_batch(&self, batch: &RecordBatch) -> Result<(), SinkError>;
}
