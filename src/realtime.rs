//! Change notifications from the hosted database.
//!
//! Speaks just enough of the Phoenix channel protocol to join one topic
//! filtered on the three catalog tables. Event payloads are discarded: every
//! change becomes a refresh trigger for the sync coordinator.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use crate::api::Table;
use crate::app::AsyncAction;
use crate::errors::BackendError;
use crate::sync::RefreshTrigger;

pub const CHANNEL_TOPIC: &str = "realtime:public:all_changes";
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
const RELEASE_TIMEOUT: Duration = Duration::from_secs(2);

/// One Phoenix v1 frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoenixMessage {
    pub topic: String,
    pub event: String,
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(rename = "ref", default)]
    pub msg_ref: Option<String>,
}

impl PhoenixMessage {
    fn new(topic: &str, event: &str, payload: serde_json::Value, msg_ref: u64) -> Self {
        Self {
            topic: topic.to_string(),
            event: event.to_string(),
            payload,
            msg_ref: Some(msg_ref.to_string()),
        }
    }

    pub fn to_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// What an incoming frame means to us
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    /// Insert/update/delete on the named table
    Change(String),
    JoinOk,
    JoinError(String),
    Closed,
    Other,
}

pub fn websocket_url(base_url: &str, anon_key: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{}", rest)
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{}", rest)
    } else {
        base.to_string()
    };
    format!("{}/realtime/v1/websocket?apikey={}&vsn=1.0.0", ws_base, anon_key)
}

pub fn join_message(anon_key: &str, msg_ref: u64) -> PhoenixMessage {
    let filters: Vec<serde_json::Value> = Table::all()
        .iter()
        .map(|t| json!({ "event": "*", "schema": "public", "table": t.name() }))
        .collect();
    PhoenixMessage::new(
        CHANNEL_TOPIC,
        "phx_join",
        json!({
            "config": {
                "broadcast": { "self": false },
                "presence": { "key": "" },
                "postgres_changes": filters,
            },
            "access_token": anon_key,
        }),
        msg_ref,
    )
}

pub fn heartbeat_message(msg_ref: u64) -> PhoenixMessage {
    PhoenixMessage::new("phoenix", "heartbeat", json!({}), msg_ref)
}

pub fn leave_message(msg_ref: u64) -> PhoenixMessage {
    PhoenixMessage::new(CHANNEL_TOPIC, "phx_leave", json!({}), msg_ref)
}

pub fn classify(msg: &PhoenixMessage, join_ref: &str) -> Incoming {
    if msg.topic != CHANNEL_TOPIC {
        return Incoming::Other;
    }
    match msg.event.as_str() {
        "postgres_changes" | "INSERT" | "UPDATE" | "DELETE" => {
            let table = msg
                .payload
                .pointer("/data/table")
                .or_else(|| msg.payload.get("table"))
                .and_then(|v| v.as_str())
                .unwrap_or("unknown");
            Incoming::Change(table.to_string())
        }
        "phx_reply" if msg.msg_ref.as_deref() == Some(join_ref) => {
            match msg.payload.get("status").and_then(|s| s.as_str()) {
                Some("ok") => Incoming::JoinOk,
                _ => Incoming::JoinError(msg.payload.get("response").map(|r| r.to_string()).unwrap_or_default()),
            }
        }
        "phx_close" | "phx_error" => Incoming::Closed,
        _ => Incoming::Other,
    }
}

/// Live subscription; must be released on shutdown
pub struct Subscription {
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Connect, join the change topic and start forwarding triggers.
    /// `status` hears `RealtimeStatus(true)` once joined and `false` when the
    /// task ends for any reason.
    pub async fn connect(
        base_url: &str,
        anon_key: &str,
        triggers: mpsc::Sender<RefreshTrigger>,
        status: mpsc::Sender<AsyncAction>,
    ) -> Result<Self, BackendError> {
        if base_url.trim().is_empty() {
            return Err(BackendError::NotConfigured);
        }

        let url = websocket_url(base_url, anon_key);
        let (ws, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (mut write, mut read) = ws.split();

        let mut next_ref: u64 = 1;
        let join = join_message(anon_key, next_ref);
        let join_ref = next_ref.to_string();
        next_ref += 1;
        write.send(Message::Text(join.to_text())).await?;
        info!("Realtime: joining {}", CHANNEL_TOPIC);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut heartbeat = tokio::time::interval_at(
                tokio::time::Instant::now() + HEARTBEAT_INTERVAL,
                HEARTBEAT_INTERVAL,
            );

            loop {
                tokio::select! {
                    frame = read.next() => {
                        let text = match frame {
                            Some(Ok(Message::Text(text))) => text,
                            Some(Ok(Message::Close(_))) | None => {
                                warn!("Realtime: connection closed by server");
                                break;
                            }
                            Some(Ok(_)) => continue,
                            Some(Err(e)) => {
                                warn!("Realtime: socket error: {}", e);
                                break;
                            }
                        };
                        let Ok(msg) = serde_json::from_str::<PhoenixMessage>(&text) else {
                            debug!("Realtime: unparseable frame ignored");
                            continue;
                        };
                        match classify(&msg, &join_ref) {
                            Incoming::Change(table) => {
                                debug!("Realtime: change on {}", table);
                                if triggers.send(RefreshTrigger::RemoteChange(table)).await.is_err() {
                                    break;
                                }
                            }
                            Incoming::JoinOk => {
                                info!("Realtime: subscribed");
                                let _ = status.send(AsyncAction::RealtimeStatus(true)).await;
                            }
                            Incoming::JoinError(reason) => {
                                warn!("Realtime: join rejected: {}", reason);
                                break;
                            }
                            Incoming::Closed => {
                                warn!("Realtime: channel closed");
                                break;
                            }
                            Incoming::Other => {}
                        }
                    }
                    _ = heartbeat.tick() => {
                        let hb = heartbeat_message(next_ref);
                        next_ref += 1;
                        if let Err(e) = write.send(Message::Text(hb.to_text())).await {
                            warn!("Realtime: heartbeat failed: {}", e);
                            break;
                        }
                    }
                    _ = &mut shutdown_rx => {
                        let leave = leave_message(next_ref);
                        let _ = write.send(Message::Text(leave.to_text())).await;
                        let _ = write.send(Message::Close(None)).await;
                        info!("Realtime: subscription released");
                        break;
                    }
                }
            }
            let _ = status.try_send(AsyncAction::RealtimeStatus(false));
        });

        Ok(Self {
            shutdown: Some(shutdown_tx),
            handle,
        })
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Leave the channel and close the socket
    pub async fn release(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if tokio::time::timeout(RELEASE_TIMEOUT, &mut self.handle).await.is_err() {
            self.handle.abort();
        }
    }
}
