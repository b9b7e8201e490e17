use crate::{StateStore, error::StateStoreError};
use async_trait::async_trait;
use model::extraction::state::{ExtractionState, StateId};
use tokio_postgres::{Client, NoTls};
use tracing::error;

const ENSURE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS extraction_state (
    state_id TEXT PRIMARY KEY,
    doc      JSONB NOT NULL
)
"#;

const UPSERT: &str = r#"
INSERT INTO extraction_state (state_id, doc)
VALUES ($1, $2)
ON CONFLICT (state_id) DO UPDATE SET doc = EXCLUDED.doc
"#;

/// Managed-table state store for concurrent production deployments.
///
/// All state lives in a single key-value table; the per-row upsert keeps
/// concurrent writers on distinct `state_id`s from ever interfering.
/// Concurrent writers on the same `state_id` are last-writer-wins, which the
/// owning scheduler is expected to prevent.
pub struct PostgresStateStore {
    client: Client,
}

impl PostgresStateStore {
    /// Connects and ensures the backing table exists.
    pub async fn connect(url: &str) -> Result<Self, StateStoreError> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;
        tokio::spawn(async move {
            if let Err(err) = connection.await {
                error!(error = %err, "state store connection terminated");
            }
        });
        client.batch_execute(ENSURE_TABLE).await?;
        Ok(Self { client })
    }

    fn decode(doc: serde_json::Value) -> Result<ExtractionState, StateStoreError> {
        serde_json::from_value(doc).map_err(|e| StateStoreError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StateStore for PostgresStateStore {
    async fn get(&self, state_id: &StateId) -> Result<Option<ExtractionState>, StateStoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT doc FROM extraction_state WHERE state_id = $1",
                &[&state_id.as_str()],
            )
            .await?;

        match row {
            Some(row) => Ok(Some(Self::decode(row.get(0))?)),
            None => Ok(None),
        }
    }

    async fn put(&self, state: &ExtractionState) -> Result<(), StateStoreError> {
        let doc =
            serde_json::to_value(state).map_err(|e| StateStoreError::Encode(e.to_string()))?;
        self.client
            .execute(UPSERT, &[&state.state_id.as_str(), &doc])
            .await?;
        Ok(())
    }

    async fn list(&self, source: &str) -> Result<Vec<ExtractionState>, StateStoreError> {
        let pattern = format!("{source}:%");
        let rows = self
            .client
            .query(
                "SELECT doc FROM extraction_state WHERE state_id LIKE $1",
                &[&pattern],
            )
            .await?;

        rows.into_iter().map(|row| Self::decode(row.get(0))).collect()
    }
}
