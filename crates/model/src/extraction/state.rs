use crate::pagination::cursor::Cursor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Unique key of an extraction state row: `source:resource[:partition]`.
///
/// The partition carries things like a repository full name
/// (`github:pull_requests:input-output-hk/cardano-node`); unpartitioned
/// resources omit the third segment (`lido:funds`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

#[derive(Debug, Error)]
#[error("state id must be 'source:resource[:partition]', got '{0}'")]
pub struct StateIdError(String);

impl StateId {
    pub fn new(source: &str, resource: &str, partition: Option<&str>) -> Self {
        match partition {
            Some(part) => StateId(format!("{source}:{resource}:{part}")),
            None => StateId(format!("{source}:{resource}")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First segment, the source name.
    pub fn source(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StateId {
    type Err = StateIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut segments = s.splitn(2, ':');
        let source = segments.next().unwrap_or_default();
        let rest = segments.next().unwrap_or_default();
        if source.is_empty() || rest.is_empty() {
            return Err(StateIdError(s.to_string()));
        }
        Ok(StateId(s.to_string()))
    }
}

/// Outcome of the most recent run touching a state row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    InProgress,
    Succeeded,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::InProgress => "in_progress",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted state row per (source, resource, partition) tuple.
///
/// The cursor is only ever advanced after the sink acknowledged the batch it
/// covers, so a crash between write and commit re-fetches the same page on
/// the next run (at-least-once; the sink dedupes by natural key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionState {
    pub state_id: StateId,
    pub cursor: Cursor,
    pub last_run_at: DateTime<Utc>,
    pub last_status: RunStatus,
    /// Monotone counter for observability; never consulted for resume.
    pub records_processed_total: u64,
}

impl ExtractionState {
    /// Fresh row for a resource that has never been extracted.
    pub fn initial(state_id: StateId, cursor: Cursor) -> Self {
        ExtractionState {
            state_id,
            cursor,
            last_run_at: Utc::now(),
            last_status: RunStatus::InProgress,
            records_processed_total: 0,
        }
    }

    /// Advance past a durably written batch.
    pub fn advanced(mut self, next: Cursor, records: u64) -> Self {
        self.cursor = next;
        self.records_processed_total += records;
        self.last_status = RunStatus::InProgress;
        self.last_run_at = Utc::now();
        self
    }

    /// Close out a run, keeping the last committed cursor in place.
    pub fn finished(mut self, status: RunStatus) -> Self {
        self.last_status = status;
        self.last_run_at = Utc::now();
        self
    }
}
