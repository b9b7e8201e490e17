use crate::{
    config::ExtractorConfig,
    error::ExtractError,
    event_bus::EventBus,
    sink::RecordSink,
    source::{Page, PageSource, SourceError},
};
use chrono::Utc;
use model::{
    events::ExtractionEvent,
    extraction::state::{ExtractionState, RunStatus, StateId},
    pagination::cursor::Cursor,
    records::batch::RecordBatch,
};
use state_store::StateStore;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Outcome of a single driver run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub state_id: StateId,
    pub pages_fetched: u64,
    pub records_written: u64,
    pub status: RunStatus,
    /// The run was skipped because the data was still fresh.
    pub skipped_fresh: bool,
}

/// Orchestrates one full incremental pull for a single resource+partition,
/// resuming from the persisted cursor and leaving the next resume point
/// behind.
///
/// The one ordering invariant lives here: the cursor is advanced and
/// persisted strictly after the sink acknowledged the batch it covers.
/// A crash between the two replays the last page on the next run, which the
/// sink absorbs by natural-key upsert.
pub struct IncrementalDriver {
    store: Arc<dyn StateStore>,
    sink: Arc<dyn RecordSink>,
    events: EventBus,
    config: ExtractorConfig,
}

impl IncrementalDriver {
    pub fn new(
        store: Arc<dyn StateStore>,
        sink: Arc<dyn RecordSink>,
        events: EventBus,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            store,
            sink,
            events,
            config,
        }
    }

    pub async fn run(
        &self,
        source: &dyn PageSource,
        resource: &str,
        partition: Option<&str>,
    ) -> Result<RunSummary, ExtractError> {
        let state_id = StateId::new(source.name(), resource, partition);
        let run_id = Uuid::new_v4().to_string();

        let mut state = match self.store.get(&state_id).await? {
            Some(state) if self.is_fresh(&state) => {
                info!(
                    state_id = %state_id,
                    last_run_at = %state.last_run_at,
                    "data is fresh, skipping run"
                );
                return Ok(RunSummary {
                    state_id,
                    pages_fetched: 0,
                    records_written: 0,
                    status: state.last_status,
                    skipped_fresh: true,
                });
            }
            Some(state) => {
                // A persisted in_progress row means the previous run was
                // killed mid-flight; the cursor is still the last committed
                // position, so resume is identical to the succeeded case.
                info!(state_id = %state_id, cursor = %state.cursor, "resuming from persisted cursor");
                state
            }
            None => {
                let initial = source.initial_cursor(resource);
                info!(state_id = %state_id, cursor = %initial, "no prior state, starting from initial cursor");
                ExtractionState::initial(state_id.clone(), initial)
            }
        };

        self.events
            .publish(ExtractionEvent::Started {
                run_id: run_id.clone(),
                state_id: state_id.to_string(),
                resumed_from: state.cursor.clone(),
                timestamp: Utc::now(),
            })
            .await;

        let mut pages_fetched = 0u64;
        let mut records_written = 0u64;

        loop {
            if let Some(cap) = self.config.max_records_per_resource
                && records_written >= cap
            {
                info!(state_id = %state_id, cap, "record cap reached, finishing run");
                break;
            }

            let page = match self
                .fetch_with_retry(source, resource, partition, &state.cursor)
                .await
            {
                Ok(page) => page,
                Err(err) => return self.fail_run(&run_id, state, err).await,
            };
            pages_fetched += 1;

            if page.records.is_empty() {
                if page.has_more {
                    // API misbehavior; terminating beats looping forever.
                    let err = ExtractError::EmptyPageAnomaly {
                        state_id: state_id.to_string(),
                        cursor: state.cursor.clone(),
                    };
                    return self.fail_run(&run_id, state, err).await;
                }
                break;
            }

            let has_more = page.has_more;
            let next_cursor = page.next_cursor.clone();
            let batch = RecordBatch::merge(resource, page.records);
            let batch_len = batch.len() as u64;

            if let Err(err) = self.sink.write_batch(&batch).await {
                return self.fail_run(&run_id, state, ExtractError::Sink(err)).await;
            }

            // Only after the sink ack does the cursor move.
            state = state.advanced(next_cursor, batch_len);
            self.commit_state(&run_id, &state).await?;
            records_written += batch_len;

            self.events
                .publish(ExtractionEvent::PageLoaded {
                    run_id: run_id.clone(),
                    state_id: state_id.to_string(),
                    records: batch_len as usize,
                    cursor: state.cursor.clone(),
                    timestamp: Utc::now(),
                })
                .await;

            if !has_more {
                break;
            }
        }

        state = state.finished(RunStatus::Succeeded);
        self.commit_state(&run_id, &state).await?;

        self.events
            .publish(ExtractionEvent::Completed {
                run_id,
                state_id: state_id.to_string(),
                records_total: state.records_processed_total,
                pages: pages_fetched,
                timestamp: Utc::now(),
            })
            .await;

        info!(
            state_id = %state_id,
            pages = pages_fetched,
            records = records_written,
            "extraction run completed"
        );

        Ok(RunSummary {
            state_id,
            pages_fetched,
            records_written,
            status: RunStatus::Succeeded,
            skipped_fresh: false,
        })
    }

    /// Whether the persisted state is recent enough to skip this run.
    fn is_fresh(&self, state: &ExtractionState) -> bool {
        if self.config.force_refresh || state.last_status != RunStatus::Succeeded {
            return false;
        }
        Utc::now()
            .signed_duration_since(state.last_run_at)
            .to_std()
            .map(|age| age <= self.config.freshness_window)
            .unwrap_or(false)
    }

    async fn fetch_with_retry(
        &self,
        source: &dyn PageSource,
        resource: &str,
        partition: Option<&str>,
        cursor: &Cursor,
    ) -> Result<Page, ExtractError> {
        self.config
            .retry
            .run(
                || source.fetch_page(resource, partition, cursor),
                SourceError::retry_disposition,
            )
            .await
            .map_err(ExtractError::from)
    }

    /// Persist the state row. A failure here is fatal: the store cannot be
    /// trusted with a `failed` upsert either, so the run only announces the
    /// failure to subscribers and bubbles the error up. The persisted row
    /// still holds the last committed cursor, so the next run resumes there.
    async fn commit_state(
        &self,
        run_id: &str,
        state: &ExtractionState,
    ) -> Result<(), ExtractError> {
        let Err(store_err) = self.store.put(state).await else {
            return Ok(());
        };
        let err = ExtractError::Store(store_err);
        warn!(state_id = %state.state_id, error = %err, "could not persist run state");

        self.events
            .publish(ExtractionEvent::Failed {
                run_id: run_id.to_string(),
                state_id: state.state_id.to_string(),
                error: err.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Err(err)
    }

    /// Abort the run: persist `failed` with the last good cursor intact and
    /// surface the original error. The next scheduled run resumes from the
    /// persisted cursor, so a single failure is self-healing.
    async fn fail_run(
        &self,
        run_id: &str,
        state: ExtractionState,
        err: ExtractError,
    ) -> Result<RunSummary, ExtractError> {
        warn!(state_id = %state.state_id, error = %err, "extraction run failed");

        let failed = state.finished(RunStatus::Failed);
        if let Err(store_err) = self.store.put(&failed).await {
            warn!(error = %store_err, "could not persist failed run state");
        }

        self.events
            .publish(ExtractionEvent::Failed {
                run_id: run_id.to_string(),
                state_id: failed.state_id.to_string(),
                error: err.to_string(),
                timestamp: Utc::now(),
            })
            .await;

        Err(err)
    }
}
