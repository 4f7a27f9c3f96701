//! WebSocket connection lifecycle.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use agrihub_app::hub::BroadcastHub;
use agrihub_domain::id::ConnectionId;

use crate::sink::WsSink;

/// Frames depth the writer channel buffers before the connection counts as
/// too slow.
const CHANNEL_CAPACITY: usize = 64;

/// Client→server frames. Topic filtering is not implemented; these are
/// accepted so well-behaved clients don't get disconnected for sending
/// them.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    Subscribe {
        #[serde(default)]
        topic: Option<String>,
    },
    Unsubscribe {
        #[serde(default)]
        topic: Option<String>,
    },
}

/// `GET /ws` — upgrade the connection and register it with the hub.
pub(crate) async fn upgrade(
    State(hub): State<Arc<BroadcastHub<WsSink>>>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, hub))
}

async fn handle_socket(socket: WebSocket, hub: Arc<BroadcastHub<WsSink>>) {
    let (tx, mut rx) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let Ok(id) = hub.register(WsSink::new(tx)) else {
        // The socket refused the handshake frame already.
        return;
    };

    let (mut writer, mut reader) = socket.split();
    let write_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if writer.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(message) = reader.next().await {
        match message {
            Ok(Message::Text(text)) => handle_client_frame(id, &text),
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => {}
        }
    }

    hub.unregister(id);
    write_task.abort();
}

fn handle_client_frame(id: ConnectionId, text: &str) {
    match serde_json::from_str::<ClientFrame>(text) {
        Ok(ClientFrame::Subscribe { topic }) => {
            tracing::debug!(client = %id, ?topic, "subscribe acknowledged");
        }
        Ok(ClientFrame::Unsubscribe { topic }) => {
            tracing::debug!(client = %id, ?topic, "unsubscribe acknowledged");
        }
        Err(error) => {
            tracing::debug!(client = %id, %error, "ignoring unknown client frame");
        }
    }
}
