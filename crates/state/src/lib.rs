use async_trait::async_trait;
use model::extraction::state::{ExtractionState, StateId};

pub mod backend;
pub mod error;
pub mod memory;
pub mod postgres_store;
pub mod sled_store;

use error::StateStoreError;

/// Durable key-value storage for [`ExtractionState`] rows.
///
/// Two interchangeable production backends sit behind this contract, a
/// file-embedded sled store for local single-process runs and a managed
/// Postgres table for concurrent deployments, so backend choice is a
/// deployment decision rather than a code fork in the drivers.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Returns the persisted state for `state_id`, or `None` if no run has
    /// ever been recorded. Backend I/O failures surface as
    /// [`StateStoreError::Unavailable`], never as `None`.
    async fn get(&self, state_id: &StateId) -> Result<Option<ExtractionState>, StateStoreError>;

    /// Upserts the row keyed on `state.state_id`, atomically per row.
    async fn put(&self, state: &ExtractionState) -> Result<(), StateStoreError>;

    /// All persisted rows for a source. Unordered; status reporting only.
    async fn list(&self, source: &str) -> Result<Vec<ExtractionState>, StateStoreError>;
}
