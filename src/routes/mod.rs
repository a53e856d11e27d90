mod broadcast;
mod health;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(crate::gateway::ws_upgrade))
        .route("/broadcast", post(broadcast::publish))
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
