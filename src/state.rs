use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::gateway::dispatcher::Dispatcher;
use crate::gateway::registry::ConnectionRegistry;
use crate::snapshot::SnapshotClient;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub dispatcher: Arc<Dispatcher>,
    pub snapshots: Arc<SnapshotClient>,
    pub queue_capacity: usize,
    pub write_timeout: Duration,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_snapshot_url(config, config.snapshot_url())
    }

    /// Builds the state against an explicit upstream URL. Tests use this to
    /// point the relay at a mock backend.
    pub fn with_snapshot_url(config: &Config, snapshot_url: String) -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&registry)));

        Self {
            registry,
            dispatcher,
            snapshots: Arc::new(SnapshotClient::new(snapshot_url)),
            queue_capacity: config.queue_capacity,
            write_timeout: config.write_timeout,
        }
    }
}
