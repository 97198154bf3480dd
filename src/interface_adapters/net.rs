// WebSocket stream of observer snapshots.

use crate::domain::StateSnapshot;
use crate::interface_adapters::protocol::BodyStateResponse;
use crate::interface_adapters::state::AppState;

use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::SinkExt;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

pub async fn body_state_ws(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let snapshot_rx = state.snapshot_tx.subscribe();
    ws.on_upgrade(move |socket| stream_body_state(socket, snapshot_rx))
}

fn encode(snapshot: StateSnapshot) -> Option<Utf8Bytes> {
    match serde_json::to_string(&BodyStateResponse::from(snapshot)) {
        Ok(txt) => Some(Utf8Bytes::from(txt)),
        Err(e) => {
            error!(error = ?e, "failed to serialize body state");
            None
        }
    }
}

async fn stream_body_state(
    mut socket: WebSocket,
    mut snapshot_rx: broadcast::Receiver<StateSnapshot>,
) {
    info!("body_state subscriber connected");

    loop {
        tokio::select! {
            // Clients only listen; anything but a close is ignored.
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        debug!(error = %e, "body_state socket error");
                        break;
                    }
                }
            }

            snapshot = snapshot_rx.recv() => {
                match snapshot {
                    Ok(snapshot) => {
                        let Some(bytes) = encode(snapshot) else { continue };
                        if socket.send(Message::Text(bytes)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        // Snapshots are full state, so skipping to the newest one is enough.
                        warn!(missed = n, "body_state subscriber lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        warn!("snapshot channel closed; ending body_state stream");
                        break;
                    }
                }
            }
        }
    }

    let _ = socket.close().await;
    info!("body_state subscriber disconnected");
}
