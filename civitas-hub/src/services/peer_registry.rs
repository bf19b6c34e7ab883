//! Mesh peer registry
//!
//! Tracks peers that announced themselves through discovery or delivered a
//! sync batch. The transport itself lives outside the hub; this table only
//! backs the status and discovery endpoints.
//!
//! Peers older than the active window are dropped on every write, so the
//! table never holds more than the peers seen within one window.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Peers not seen within this window no longer count as connected
pub const ACTIVE_WINDOW_SECS: i64 = 300;

/// One known mesh peer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerInfo {
    pub id: String,
    pub role: Option<String>,
    /// Last reported signal strength in dBm
    pub signal: Option<i32>,
    pub last_seen: DateTime<Utc>,
    pub reports_received: u64,
}

/// Overall mesh health derived from active peer count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkHealth {
    /// Two or more active peers
    Good,
    /// Exactly one active peer
    Degraded,
    /// No active peers
    Isolated,
}

/// Snapshot returned by the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MeshStatus {
    pub mesh_available: bool,
    pub mesh_nodes: usize,
    pub connected_devices: Vec<PeerInfo>,
    pub network_health: NetworkHealth,
    pub last_sync: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    peers: HashMap<String, PeerInfo>,
    last_sync: Option<DateTime<Utc>>,
}

impl RegistryInner {
    fn prune_stale(&mut self, now: DateTime<Utc>) {
        let cutoff = now - Duration::seconds(ACTIVE_WINDOW_SECS);
        let before = self.peers.len();
        self.peers.retain(|_, peer| peer.last_seen >= cutoff);

        let pruned = before - self.peers.len();
        if pruned > 0 {
            tracing::debug!(pruned, remaining = self.peers.len(), "Pruned stale peers");
        }
    }

    fn entry(&mut self, peer_id: &str, now: DateTime<Utc>) -> &mut PeerInfo {
        self.peers
            .entry(peer_id.to_string())
            .or_insert_with(|| PeerInfo {
                id: peer_id.to_string(),
                role: None,
                signal: None,
                last_seen: now,
                reports_received: 0,
            })
    }
}

/// Blank ids are not peers
fn valid_peer_id(peer_id: &str) -> Option<&str> {
    let trimmed = peer_id.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Shared peer table
#[derive(Debug, Clone, Default)]
pub struct PeerRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl PeerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a discovery announcement; blank ids are ignored
    pub async fn announce(&self, peer_id: &str, role: Option<String>, signal: Option<i32>) {
        self.announce_at(peer_id, role, signal, Utc::now()).await;
    }

    async fn announce_at(
        &self,
        peer_id: &str,
        role: Option<String>,
        signal: Option<i32>,
        now: DateTime<Utc>,
    ) {
        let Some(peer_id) = valid_peer_id(peer_id) else {
            return;
        };

        let mut inner = self.inner.write().await;
        inner.prune_stale(now);
        let peer = inner.entry(peer_id, now);
        if role.is_some() {
            peer.role = role;
        }
        if signal.is_some() {
            peer.signal = signal;
        }
        peer.last_seen = now;
        tracing::debug!(peer_id = peer_id, "Peer announced");
    }

    /// Record a completed sync batch, attributed to `peer_id` when it is
    /// present and not blank
    pub async fn record_sync(&self, peer_id: Option<&str>, received: usize) {
        self.record_sync_at(peer_id, received, Utc::now()).await;
    }

    async fn record_sync_at(&self, peer_id: Option<&str>, received: usize, now: DateTime<Utc>) {
        let mut inner = self.inner.write().await;
        inner.last_sync = Some(now);
        inner.prune_stale(now);

        if let Some(peer_id) = peer_id.and_then(valid_peer_id) {
            let peer = inner.entry(peer_id, now);
            peer.last_seen = now;
            peer.reports_received += received as u64;
        }
    }

    /// Peers seen within the active window, most recent first
    pub async fn active_peers(&self) -> Vec<PeerInfo> {
        self.active_peers_at(Utc::now()).await
    }

    async fn active_peers_at(&self, now: DateTime<Utc>) -> Vec<PeerInfo> {
        let cutoff = now - Duration::seconds(ACTIVE_WINDOW_SECS);
        let inner = self.inner.read().await;
        let mut peers: Vec<PeerInfo> = inner
            .peers
            .values()
            .filter(|peer| peer.last_seen >= cutoff)
            .cloned()
            .collect();
        peers.sort_by(|a, b| b.last_seen.cmp(&a.last_seen).then_with(|| a.id.cmp(&b.id)));
        peers
    }

    /// Current mesh status
    pub async fn status(&self) -> MeshStatus {
        self.status_at(Utc::now()).await
    }

    async fn status_at(&self, now: DateTime<Utc>) -> MeshStatus {
        let connected_devices = self.active_peers_at(now).await;
        let last_sync = self.inner.read().await.last_sync;

        let network_health = match connected_devices.len() {
            0 => NetworkHealth::Isolated,
            1 => NetworkHealth::Degraded,
            _ => NetworkHealth::Good,
        };

        MeshStatus {
            mesh_available: true,
            mesh_nodes: connected_devices.len(),
            connected_devices,
            network_health,
            last_sync,
        }
    }
}
