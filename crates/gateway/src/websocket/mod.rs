//! WebSocket endpoint for live dashboard updates

pub mod hub;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::state::GatewayState;

pub use hub::{ClientEvent, RealtimeHub, ServerEvent};

/// Create all WebSocket routes
pub fn create_websocket_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/ws", get(realtime_websocket_handler))
}

pub async fn realtime_websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<GatewayState>>,
) -> Response {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| handle_realtime_socket(socket, hub))
}

async fn handle_realtime_socket(socket: WebSocket, hub: RealtimeHub) {
    let (connection_id, mut outbound) = hub.register().await;
    let (mut sender, mut receiver) = socket.split();

    hub.send_to(connection_id, ServerEvent::Connected { connection_id })
        .await;

    let mut send_task = tokio::spawn(async move {
        while let Some(event) = outbound.recv().await {
            let Ok(text) = serde_json::to_string(&event) else {
                continue;
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let reply_hub = hub.clone();
    let mut receive_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            match message {
                Message::Text(text) => {
                    let reply = reply_hub.reply_to(&text);
                    reply_hub.send_to(connection_id, reply).await;
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => receive_task.abort(),
        _ = &mut receive_task => send_task.abort(),
    }

    hub.unregister(connection_id).await;
}
