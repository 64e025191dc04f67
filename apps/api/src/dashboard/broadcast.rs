//! Dashboard room fan-out.
//!
//! Handlers publish through the `Broadcaster` they receive in `AppState`.
//! Delivery is best effort and at most once: events published with no
//! subscriber are dropped, and a subscriber that falls more than
//! `capacity` events behind loses the oldest ones.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::models::candidate::CandidateRow;

pub const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum DashboardEvent {
    CandidateAdded(CandidateRow),
    CandidateUpdated(CandidateRow),
    CandidateDeleted(Uuid),
    CandidateEvaluated(CandidateRow),
    CandidateContacted(CandidateRow),
}

impl DashboardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            DashboardEvent::CandidateAdded(_) => "candidate_added",
            DashboardEvent::CandidateUpdated(_) => "candidate_updated",
            DashboardEvent::CandidateDeleted(_) => "candidate_deleted",
            DashboardEvent::CandidateEvaluated(_) => "candidate_evaluated",
            DashboardEvent::CandidateContacted(_) => "candidate_contacted",
        }
    }
}

pub trait Broadcaster: Send + Sync {
    fn publish(&self, event: DashboardEvent);

    fn subscribe(&self) -> broadcast::Receiver<DashboardEvent>;
}

/// In-process dashboard room backed by a tokio broadcast channel.
pub struct DashboardHub {
    tx: broadcast::Sender<DashboardEvent>,
}

impl DashboardHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }
}

impl Default for DashboardHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Broadcaster for DashboardHub {
    fn publish(&self, event: DashboardEvent) {
        let name = event.name();
        match self.tx.send(event) {
            Ok(receivers) => debug!(event = name, receivers, "Published dashboard event"),
            Err(_) => debug!(event = name, "No dashboard subscribers, event dropped"),
        }
    }

    fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.tx.subscribe()
    }
}
