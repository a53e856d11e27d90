use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;

use super::event::Event;
use super::registry::ConnectionRegistry;

/// Fans inbound events out to every registered connection. Writes are
/// per-connection and isolated: one slow or dead client never delays or
/// blocks delivery to any other client.
pub struct Dispatcher {
    registry: Arc<ConnectionRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Queues `event` on every open connection and returns the number of
    /// connections it was queued for. Contains no await point: events
    /// submitted in order are enqueued in that order on every queue.
    ///
    /// A full queue means the client has stopped draining its socket; the
    /// policy is to evict it rather than buffer without bound. The evicted
    /// task notices its closed channel and shuts the transport down.
    pub fn broadcast(&self, event: &Event) -> usize {
        let targets = self.registry.snapshot();
        tracing::debug!("broadcasting event to {} client(s)", targets.len());

        let mut queued = 0;
        for (id, tx) in targets {
            match tx.try_send(event.payload.clone()) {
                Ok(()) => queued += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!("connection {id} outbound queue full, evicting");
                    self.registry.unregister(id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!("connection {id} gone mid-broadcast, unregistering");
                    self.registry.unregister(id);
                }
            }
        }
        queued
    }
}
