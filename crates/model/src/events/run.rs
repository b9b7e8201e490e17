use crate::pagination::cursor::Cursor;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle events published while a driver runs one extraction.
///
/// `Completed` is the hook downstream wiring (scheduler notifications,
/// completion events for the transformation layer) subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractionEvent {
    /// A run started, resuming from the persisted cursor (or the source's
    /// initial cursor on first contact).
    Started {
        run_id: String,
        state_id: String,
        resumed_from: Cursor,
        timestamp: DateTime<Utc>,
    },

    /// A page was written to the sink and the cursor committed past it.
    PageLoaded {
        run_id: String,
        state_id: String,
        records: usize,
        cursor: Cursor,
        timestamp: DateTime<Utc>,
    },

    /// The source was exhausted and the final state persisted.
    Completed {
        run_id: String,
        state_id: String,
        records_total: u64,
        pages: u64,
        timestamp: DateTime<Utc>,
    },

    /// The run aborted; the last good cursor stays in place.
    Failed {
        run_id: String,
        state_id: String,
        error: String,
        timestamp: DateTime<Utc>,
    },
}
