use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

use super::event::OutboundPayload;

pub type ConnectionId = u64;

/// Lifecycle of a registered connection. `Closed` has no variant: a closed
/// connection is removed from the registry the instant it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Open,
    Closing,
}

/// Registry-side handle to one live client transport session. The registry
/// holds the only queue sender, so removing the entry closes the channel
/// and the socket task tears itself down.
#[derive(Debug)]
pub struct RegisteredConnection {
    pub id: ConnectionId,
    pub state: ConnectionState,
    pub tx: mpsc::Sender<OutboundPayload>,
}

/// Tracks every live client connection. Add/remove/snapshot are mutually
/// exclusive per map shard; no lock is held across transport I/O.
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, RegisteredConnection>,
    next_id: AtomicU64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Adds a connection in `Open` state and returns its identifier.
    pub fn register(&self, tx: mpsc::Sender<OutboundPayload>) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(
            id,
            RegisteredConnection {
                id,
                state: ConnectionState::Open,
                tx,
            },
        );
        id
    }

    /// Idempotent removal. Returns whether the connection was still present.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        self.connections.remove(&id).is_some()
    }

    /// Marks a connection `Closing` so in-flight broadcasts skip it while
    /// its socket task finishes teardown. No-op for unknown identifiers.
    pub fn begin_close(&self, id: ConnectionId) {
        if let Some(mut entry) = self.connections.get_mut(&id) {
            entry.state = ConnectionState::Closing;
        }
    }

    /// Point-in-time copy of the open connections for one broadcast pass.
    pub fn snapshot(&self) -> Vec<(ConnectionId, mpsc::Sender<OutboundPayload>)> {
        self.connections
            .iter()
            .filter(|entry| entry.state == ConnectionState::Open)
            .map(|entry| (entry.id, entry.tx.clone()))
            .collect()
    }

    /// Drains the registry, dropping every queue sender. Socket tasks
    /// observe the closed channel and shut their transports down.
    pub fn close_all(&self) {
        self.connections.clear();
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
