//! Event types for the Civitas event system
//!
//! Events are fanned out over a tokio broadcast channel. The mesh transport
//! subscribes through the hub's SSE endpoint and relays them to peers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Civitas event types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CivitasEvent {
    /// Alert pushed to the mesh for relay
    AlertBroadcast {
        broadcast_id: Uuid,
        alert_id: i64,
        title: String,
        message: String,
        severity: String,
        created_at: String,
        timestamp: DateTime<Utc>,
    },

    /// Free-form payload pushed to the mesh
    MeshBroadcast {
        broadcast_id: Uuid,
        kind: String,
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// A peer batch was merged into local storage
    ReportsSynced {
        peer_id: Option<String>,
        received: usize,
        inserted: u64,
        timestamp: DateTime<Utc>,
    },

    /// A report was filed on this node
    ReportCreated {
        report_id: i64,
        severity: String,
        timestamp: DateTime<Utc>,
    },
}

impl CivitasEvent {
    /// Event name used as the SSE `event:` field
    pub fn event_type(&self) -> &'static str {
        match self {
            CivitasEvent::AlertBroadcast { .. } => "AlertBroadcast",
            CivitasEvent::MeshBroadcast { .. } => "MeshBroadcast",
            CivitasEvent::ReportsSynced { .. } => "ReportsSynced",
            CivitasEvent::ReportCreated { .. } => "ReportCreated",
        }
    }

    /// Whether the mesh transport should relay this event to peers
    pub fn is_mesh_relay(&self) -> bool {
        matches!(
            self,
            CivitasEvent::AlertBroadcast { .. } | CivitasEvent::MeshBroadcast { .. }
        )
    }
}

/// Central event distribution bus
///
/// Cloning is cheap; all clones share one channel.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CivitasEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with specified channel capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Number of events to buffer before dropping old events
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<CivitasEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    /// Returns `Err` if no subscribers are listening.
    #[allow(clippy::result_large_err)]
    pub fn emit(
        &self,
        event: CivitasEvent,
    ) -> Result<usize, broadcast::error::SendError<CivitasEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring if no subscribers are listening
    pub fn emit_lossy(&self, event: CivitasEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Get the configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_event(message: &str) -> CivitasEvent {
        CivitasEvent::MeshBroadcast {
            broadcast_id: Uuid::new_v4(),
            kind: "test".to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_subscriber_receives_emitted_event() {
        let bus = EventBus::new(10);
        let mut rx = bus.subscribe();

        let event = mesh_event("hello mesh");
        assert_eq!(bus.emit(event.clone()).unwrap(), 1);

        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn test_emit_without_subscribers_errors_but_lossy_does_not() {
        let bus = EventBus::new(10);
        assert!(bus.emit(mesh_event("nobody")).is_err());
        bus.emit_lossy(mesh_event("nobody"));
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.capacity(), 10);
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_value(mesh_event("x")).unwrap();
        assert_eq!(json["type"], "MeshBroadcast");
        assert_eq!(json["kind"], "test");
    }

    #[test]
    fn test_mesh_relay_classification() {
        assert!(mesh_event("x").is_mesh_relay());
        let synced = CivitasEvent::ReportsSynced {
            peer_id: None,
            received: 1,
            inserted: 1,
            timestamp: Utc::now(),
        };
        assert!(!synced.is_mesh_relay());
        assert_eq!(synced.event_type(), "ReportsSynced");
    }
}
