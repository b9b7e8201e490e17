use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a batch lands in the lake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteDisposition {
    /// Natural-key upsert; replayed batches are absorbed without duplicates.
    Merge,
    /// Drop whatever the resource currently holds, then write.
    Replace,
}

/// One page worth of raw records on its way to the sink.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    pub resource: String,
    pub disposition: WriteDisposition,
    pub records: Vec<Value>,
    pub ts: DateTime<Utc>,
}

impl RecordBatch {
    pub fn merge(resource: &str, records: Vec<Value>) -> Self {
        Self::with_disposition(resource, WriteDisposition::Merge, records)
    }

    pub fn replace(resource: &str, records: Vec<Value>) -> Self {
        Self::with_disposition(resource, WriteDisposition::Replace, records)
    }

    fn with_disposition(resource: &str, disposition: WriteDisposition, records: Vec<Value>) -> Self {
        RecordBatch {
            resource: resource.to_string(),
            disposition,
            records,
            ts: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
