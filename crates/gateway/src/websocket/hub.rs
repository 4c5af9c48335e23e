//! In-memory registry of live dashboard sockets.
//!
//! Delivery is best effort: a connection whose buffer is full misses the
//! event, and one whose receiver is gone is dropped from the registry.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Events pushed to WebSocket clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// First frame on every connection
    Connected { connection_id: Uuid },
    Subscribed { channel: String },
    Unsubscribed { channel: String },
    Pong,
    /// A record changed through the REST surface
    EntityChanged {
        channel: String,
        action: String,
        id: i64,
    },
    Error { message: String },
}

/// Frames accepted from WebSocket clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    Subscribe { channel: String },
    Unsubscribe { channel: String },
    Ping,
}

#[derive(Clone)]
pub struct RealtimeHub {
    connections: Arc<RwLock<HashMap<Uuid, mpsc::Sender<ServerEvent>>>>,
    channel_capacity: usize,
}

impl RealtimeHub {
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Register a new connection and hand back its id and outbound queue.
    pub async fn register(&self) -> (Uuid, mpsc::Receiver<ServerEvent>) {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let id = Uuid::new_v4();
        self.connections.write().await.insert(id, tx);
        tracing::debug!(connection_id = %id, "realtime connection registered");
        (id, rx)
    }

    pub async fn unregister(&self, id: Uuid) {
        if self.connections.write().await.remove(&id).is_some() {
            tracing::debug!(connection_id = %id, "realtime connection removed");
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Queue an event for one connection. Returns false if it could not be queued.
    pub async fn send_to(&self, id: Uuid, event: ServerEvent) -> bool {
        let sender = self.connections.read().await.get(&id).cloned();
        match sender {
            Some(sender) => sender.try_send(event).is_ok(),
            None => false,
        }
    }

    /// Send an event to every registered connection and return how many accepted it.
    pub async fn broadcast(&self, event: &ServerEvent) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        {
            let connections = self.connections.read().await;
            for (id, sender) in connections.iter() {
                match sender.try_send(event.clone()) {
                    Ok(()) => delivered += 1,
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        tracing::warn!(connection_id = %id, "realtime buffer full, event skipped");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*id),
                }
            }
        }

        if !closed.is_empty() {
            let mut connections = self.connections.write().await;
            for id in closed {
                connections.remove(&id);
            }
        }

        delivered
    }

    /// Announce a create/update/delete on one of the REST collections.
    pub async fn publish_change(&self, channel: &str, action: &str, id: i64) -> usize {
        self.broadcast(&ServerEvent::EntityChanged {
            channel: channel.to_string(),
            action: action.to_string(),
            id,
        })
        .await
    }

    /// Reply for a raw text frame from a client.
    pub fn reply_to(&self, text: &str) -> ServerEvent {
        match serde_json::from_str::<ClientEvent>(text) {
            Ok(ClientEvent::Subscribe { channel }) => ServerEvent::Subscribed { channel },
            Ok(ClientEvent::Unsubscribe { channel }) => ServerEvent::Unsubscribed { channel },
            Ok(ClientEvent::Ping) => ServerEvent::Pong,
            Err(e) => ServerEvent::Error {
                message: format!("unrecognised message: {e}"),
            },
        }
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let hub = RealtimeHub::new(8);
        let (_a, mut rx_a) = hub.register().await;
        let (_b, mut rx_b) = hub.register().await;

        let delivered = hub.publish_change("campaigns", "created", 3).await;
        assert_eq!(delivered, 2);

        let expected = ServerEvent::EntityChanged {
            channel: "campaigns".into(),
            action: "created".into(),
            id: 3,
        };
        assert_eq!(rx_a.recv().await, Some(expected.clone()));
        assert_eq!(rx_b.recv().await, Some(expected));
    }

    #[tokio::test]
    async fn closed_connections_are_pruned_on_broadcast() {
        let hub = RealtimeHub::new(8);
        let (_open, _rx_open) = hub.register().await;
        let (_gone, rx_gone) = hub.register().await;
        drop(rx_gone);

        assert_eq!(hub.broadcast(&ServerEvent::Pong).await, 1);
        assert_eq!(hub.connection_count().await, 1);
    }

    #[tokio::test]
    async fn full_buffers_skip_without_disconnecting() {
        let hub = RealtimeHub::new(1);
        let (id, mut rx) = hub.register().await;

        assert_eq!(hub.broadcast(&ServerEvent::Pong).await, 1);
        assert_eq!(hub.broadcast(&ServerEvent::Pong).await, 0);
        assert_eq!(hub.connection_count().await, 1);

        assert_eq!(rx.recv().await, Some(ServerEvent::Pong));
        assert!(hub.send_to(id, ServerEvent::Pong).await);
    }

    #[tokio::test]
    async fn unregister_removes_connection() {
        let hub = RealtimeHub::default();
        let (id, _rx) = hub.register().await;
        hub.unregister(id).await;

        assert_eq!(hub.connection_count().await, 0);
        assert!(!hub.send_to(id, ServerEvent::Pong).await);
    }

    #[test]
    fn subscribe_and_unsubscribe_echo_the_channel() {
        let hub = RealtimeHub::default();

        assert_eq!(
            hub.reply_to(r#"{"type":"subscribe","channel":"invoices"}"#),
            ServerEvent::Subscribed { channel: "invoices".into() }
        );
        assert_eq!(
            hub.reply_to(r#"{"type":"unsubscribe","channel":"invoices"}"#),
            ServerEvent::Unsubscribed { channel: "invoices".into() }
        );
        assert_eq!(hub.reply_to(r#"{"type":"ping"}"#), ServerEvent::Pong);
        assert!(matches!(hub.reply_to("not json"), ServerEvent::Error { .. }));
    }

    #[test]
    fn events_serialise_with_type_tag() {
        let json = serde_json::to_value(ServerEvent::Subscribed { channel: "posts".into() }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "subscribed", "channel": "posts"}));
    }
}
