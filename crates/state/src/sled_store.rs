use crate::{StateStore, error::StateStoreError};
use async_trait::async_trait;
use model::extraction::state::{ExtractionState, StateId};
use std::path::Path;

/// File-embedded state store for local and single-process runs.
pub struct SledStateStore {
    db: sled::Db,
}

impl SledStateStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StateStoreError> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    #[inline]
    fn state_key(state_id: &StateId) -> String {
        format!("state:{state_id}")
    }

    fn decode(bytes: &[u8]) -> Result<ExtractionState, StateStoreError> {
        bincode::deserialize(bytes).map_err(|e| StateStoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StateStore for SledStateStore {
    async fn get(&self, state_id: &StateId) -> Result<Option<ExtractionState>, StateStoreError> {
        match self.db.get(Self::state_key(state_id))? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, state: &ExtractionState) -> Result<(), StateStoreError> {
        let bytes =
            bincode::serialize(state).map_err(|e| StateStoreError::Encode(e.to_string()))?;
        self.db.insert(Self::state_key(&state.state_id), bytes)?;
        // The driver only advances past a batch once the row is durable.
        self.db.flush_async().await?;
        Ok(())
    }

    async fn list(&self, source: &str) -> Result<Vec<ExtractionState>, StateStoreError> {
        let prefix = format!("state:{source}:");
        let mut states = Vec::new();
        for item in self.db.scan_prefix(prefix) {
            let (_key, bytes) = item?;
            states.push(Self::decode(&bytes)?);
        }
        Ok(states)
    }
}
