//! Change feed
//! 
//! Broadcasts a notification after every successful write so connected
//! clients can refresh the affected collection. Collections are independent:
//! nothing orders a job event relative to a user event.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Jobs,
    Vehicles,
    ActivityLogs,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Jobs => "jobs",
            Collection::Vehicles => "vehicles",
            Collection::ActivityLogs => "activity_logs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub collection: Collection,
    pub id: Uuid,
    pub kind: ChangeKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ChangeFeed {
    sender: Arc<broadcast::Sender<ChangeEvent>>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn publish(&self, collection: Collection, id: Uuid, kind: ChangeKind) {
        let event = ChangeEvent {
            collection,
            id,
            kind,
            timestamp: Utc::now(),
        };
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let feed = ChangeFeed::new(4);
        feed.publish(Collection::Jobs, Uuid::new_v4(), ChangeKind::Created);
        assert_eq!(feed.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribers_receive_events() {
        let feed = ChangeFeed::new(4);
        let mut rx = feed.subscribe();
        let id = Uuid::new_v4();

        feed.publish(Collection::Vehicles, id, ChangeKind::Deleted);

        let event = rx.try_recv().unwrap();
        assert_eq!(event.collection, Collection::Vehicles);
        assert_eq!(event.id, id);
        assert_eq!(event.kind, ChangeKind::Deleted);
    }

    #[test]
    fn test_slow_subscriber_lags() {
        let feed = ChangeFeed::new(2);
        let mut rx = feed.subscribe();

        for _ in 0..3 {
            feed.publish(Collection::Jobs, Uuid::new_v4(), ChangeKind::Updated);
        }

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert!(rx.try_recv().is_ok());
    }
}
