use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::gateway::event::Event;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct PublishRequest {
    /// Opaque payload to fan out. Absent and `null` are both rejected.
    pub message: Option<serde_json::Value>,
}

/// Publish endpoint for the backend-of-record. The 200 acknowledgment
/// confirms submission to the relay only; delivery to any specific client
/// is best-effort and fire-and-forget.
pub async fn publish(
    State(state): State<AppState>,
    Json(input): Json<PublishRequest>,
) -> Result<&'static str, AppError> {
    let Some(message) = input.message else {
        return Err(AppError::BadRequest(
            "Invalid payload. \"message\" property is required.".to_string(),
        ));
    };

    let event = Event::new(&message);
    let queued = state.dispatcher.broadcast(&event);
    tracing::info!(
        "event received at {} queued for {queued} client(s)",
        event.received_at.to_rfc3339()
    );

    Ok("Message broadcasted")
}
