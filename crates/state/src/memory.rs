use crate::{StateStore, error::StateStoreError};
use async_trait::async_trait;
use model::extraction::state::{ExtractionState, StateId};
use std::{
    collections::HashMap,
    sync::atomic::{AtomicBool, Ordering},
};
use tokio::sync::RwLock;

/// Ephemeral state store for tests. The outage flag lets tests exercise
/// the `Unavailable` paths without a real backend failure.
#[derive(Default)]
pub struct MemoryStateStore {
    rows: RwLock<HashMap<StateId, ExtractionState>>,
    unavailable: AtomicBool,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a backend outage; every operation fails until cleared.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StateStoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StateStoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get(&self, state_id: &StateId) -> Result<Option<ExtractionState>, StateStoreError> {
        self.check_available()?;
        Ok(self.rows.read().await.get(state_id).cloned())
    }

    async fn put(&self, state: &ExtractionState) -> Result<(), StateStoreError> {
        self.check_available()?;
        self.rows
            .write()
            .await
            .insert(state.state_id.clone(), state.clone());
        Ok(())
    }

    async fn list(&self, source: &str) -> Result<Vec<ExtractionState>, StateStoreError> {
        self.check_available()?;
        Ok(self
            .rows
            .read()
            .await
            .values()
            .filter(|state| state.state_id.source() == source)
            .cloned()
            .collect())
    }
}
