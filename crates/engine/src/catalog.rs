use model::pagination::cursor::Cursor;
use serde::Serialize;

/// How a source paginates, which decides the shape of its cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorKind {
    /// Plain 1-based page offset.
    Page,
    /// Updated-at watermark.
    Timestamp,
}

impl CursorKind {
    pub fn initial_cursor(&self) -> Cursor {
        match self {
            CursorKind::Page => Cursor::first_page(),
            CursorKind::Timestamp => Cursor::epoch(),
        }
    }
}

/// Which driver a source goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadMode {
    Incremental,
    FullDump,
}

/// Static description of one extraction source and its resources.
#[derive(Debug, Clone, Serialize)]
pub struct SourceSpec {
    pub name: &'static str,
    pub resources: &'static [&'static str],
    pub cursor_kind: CursorKind,
    pub load_mode: LoadMode,
    /// Partition keys the source is scoped by (repository full names), if any.
    pub partitions: Option<&'static [&'static str]>,
}

/// Repositories tracked by the GitHub source.
pub const DEFAULT_REPOS: &[&str] = &[
    "cardano-foundation/cardano-wallet",
    "input-output-hk/cardano-node",
    "input-output-hk/plutus",
    "Emurgo/cardano-serialization-lib",
];

/// Every source the pipeline extracts, in scheduling order.
pub fn sources() -> Vec<SourceSpec> {
    vec![
        SourceSpec {
            name: "github",
            resources: &["repositories", "pull_requests", "releases", "issues"],
            cursor_kind: CursorKind::Timestamp,
            load_mode: LoadMode::Incremental,
            partitions: Some(DEFAULT_REPOS),
        },
        SourceSpec {
            name: "lido",
            resources: &["funds", "proposals"],
            cursor_kind: CursorKind::Page,
            load_mode: LoadMode::Incremental,
            partitions: None,
        },
        SourceSpec {
            name: "fund_results",
            resources: &["fund_results"],
            cursor_kind: CursorKind::Page,
            load_mode: LoadMode::FullDump,
            partitions: None,
        },
    ]
}
