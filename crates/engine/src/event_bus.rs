use model::events::ExtractionEvent;
use std::sync::Arc;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};

/// Fan-out bus for extraction lifecycle events.
///
/// Publishing never blocks the driver; a subscriber whose channel is full
/// drops the event rather than stalling extraction.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<Vec<mpsc::Sender<Arc<ExtractionEvent>>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscribe(&self, buffer: usize) -> mpsc::Receiver<Arc<ExtractionEvent>> {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        self.subscribers.write().await.push(tx);
        rx
    }

    pub async fn publish(&self, event: ExtractionEvent) {
        let event = Arc::new(event);
        let subscribers = self.subscribers.read().await;

        if subscribers.is_empty() {
            debug!("no subscribers for extraction event");
            return;
        }

        for sender in subscribers.iter() {
            if let Err(err) = sender.try_send(event.clone()) {
                warn!(error = ?err, "dropped extraction event for slow subscriber");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use model::pagination::cursor::Cursor;

    #[tokio::test]
    async fn events_reach_every_subscriber() {
        let bus = EventBus::new();
        let mut rx_a = bus.subscribe(8).await;
        let mut rx_b = bus.subscribe(8).await;

        bus.publish(ExtractionEvent::Started {
            run_id: "run-1".into(),
            state_id: "lido:funds".into(),
            resumed_from: Cursor::first_page(),
            timestamp: Utc::now(),
        })
        .await;

        assert!(matches!(
            rx_a.recv().await.as_deref(),
            Some(ExtractionEvent::Started { .. })
        ));
        assert!(matches!(
            rx_b.recv().await.as_deref(),
            Some(ExtractionEvent::Started { .. })
        ));
    }

    #[tokio::test]
    async fn full_subscriber_does_not_block_publish() {
        let bus = EventBus::new();
        let _rx = bus.subscribe(1).await;

        for _ in 0..3 {
            bus.publish(ExtractionEvent::Completed {
                run_id: "run-1".into(),
                state_id: "lido:funds".into(),
                records_total: 0,
                pages: 0,
                timestamp: Utc::now(),
            })
            .await;
        }
    }
}
