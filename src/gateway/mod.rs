pub mod dispatcher;
pub mod event;
pub mod registry;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::state::AppState;
use event::OutboundPayload;

pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_sink, mut ws_stream) = socket.split();

    let (tx, mut rx) = mpsc::channel::<OutboundPayload>(state.queue_capacity);
    let conn_id = state.registry.register(tx);
    tracing::info!(
        "client connected, connection {conn_id} registered ({} total)",
        state.registry.len()
    );

    // Initial snapshot push. Registration precedes the fetch, so any event
    // published while the fetch runs queues up behind the snapshot write.
    match state.snapshots.fetch().await {
        Ok(snapshot) => {
            let write = ws_sink.send(Message::Text(snapshot.to_string().into()));
            match tokio::time::timeout(state.write_timeout, write).await {
                Ok(Ok(())) => {
                    tracing::debug!("sent initial snapshot to connection {conn_id}");
                }
                Ok(Err(_)) | Err(_) => {
                    tracing::warn!("connection {conn_id} dropped during snapshot push");
                    state.registry.unregister(conn_id);
                    return;
                }
            }
        }
        Err(e) => {
            // The connection stays open without an initial message; the
            // next live event brings its view current.
            tracing::error!("snapshot fetch for connection {conn_id} failed: {e}");
        }
    }

    loop {
        tokio::select! {
            // Queued broadcast frames
            queued = rx.recv() => {
                match queued {
                    Some(frame) => {
                        let write = ws_sink.send(Message::Text(frame.as_ref().into()));
                        match tokio::time::timeout(state.write_timeout, write).await {
                            Ok(Ok(())) => {}
                            Ok(Err(_)) => break,
                            Err(_) => {
                                tracing::warn!("write to connection {conn_id} timed out");
                                break;
                            }
                        }
                    }
                    // Channel closed: evicted by the dispatcher or registry shutdown.
                    None => {
                        let _ = ws_sink.send(Message::Close(None)).await;
                        break;
                    }
                }
            }
            // Client side of the transport
            msg = ws_stream.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        state.registry.begin_close(conn_id);
                        break;
                    }
                    Some(Err(_)) => break,
                    // The relay only publishes; inbound frames are ignored.
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.registry.unregister(conn_id);
    tracing::info!(
        "client disconnected, connection {conn_id} removed ({} remaining)",
        state.registry.len()
    );
}
