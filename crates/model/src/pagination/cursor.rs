use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the extraction resume cursor.
///
/// The shape is source-specific: page-offset APIs (Catalyst) advance a plain
/// page number, incremental APIs (GitHub) advance an updated-at watermark,
/// and token-based APIs hand back an opaque continuation string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// Plain 1-based page offset.
    Page { page: u64 },

    /// Updated-at watermark; only records newer than this are fetched.
    Timestamp { ts: DateTime<Utc> },

    /// Opaque continuation token handed back by the source.
    Token { token: String },
}

impl Cursor {
    /// Starting cursor for page-offset sources.
    pub fn first_page() -> Self {
        Cursor::Page { page: 1 }
    }

    /// Starting cursor for watermark sources (everything since epoch).
    pub fn epoch() -> Self {
        Cursor::Timestamp {
            ts: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Page { page } => write!(f, "page={page}"),
            Cursor::Timestamp { ts } => write!(f, "ts={}", ts.to_rfc3339()),
            Cursor::Token { token } => write!(f, "token={token}"),
        }
    }
}
