use crate::{
    StateStore, error::StateStoreError, memory::MemoryStateStore,
    postgres_store::PostgresStateStore, sled_store::SledStateStore,
};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

/// Which backend holds the extraction state, decided at process start from
/// configuration. The drivers only ever see `Arc<dyn StateStore>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateBackend {
    /// File-embedded store for local single-process runs.
    Sled { path: PathBuf },

    /// Managed key-value table for concurrent production runs.
    Postgres { url: String },

    /// Ephemeral store; tests only.
    Memory,
}

impl StateBackend {
    pub async fn connect(&self) -> Result<Arc<dyn StateStore>, StateStoreError> {
        match self {
            StateBackend::Sled { path } => {
                info!(path = %path.display(), "opening sled state store");
                Ok(Arc::new(SledStateStore::open(path)?))
            }
            StateBackend::Postgres { url } => {
                info!("connecting to postgres state store");
                Ok(Arc::new(PostgresStateStore::connect(url).await?))
            }
            StateBackend::Memory => Ok(Arc::new(MemoryStateStore::new())),
        }
    }
}
