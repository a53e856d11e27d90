use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Frame queued for one connection. Shared across the whole fan-out so a
/// broadcast serializes its payload exactly once.
pub type OutboundPayload = Arc<str>;

/// One change notification submitted by a publisher. Lives for a single
/// dispatch cycle; never persisted.
#[derive(Debug, Clone)]
pub struct Event {
    pub payload: OutboundPayload,
    pub received_at: DateTime<Utc>,
}

impl Event {
    pub fn new(value: &serde_json::Value) -> Self {
        Self {
            payload: value.to_string().into(),
            received_at: Utc::now(),
        }
    }
}
