//! WebSocket event feed from the LCU.
//!
//! The client exposes a WAMP-flavored socket on the same port as the REST
//! API. Subscriptions are `[5, "OnJsonApiEvent_<uri>"]` frames and events
//! arrive as `[8, "<subscription>", {"uri", "eventType", "data"}]`.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::Connector;

use super::client::{LcuError, Lockfile};

const SUBSCRIBE_OPCODE: u8 = 5;
const EVENT_OPCODE: u64 = 8;

/// URIs this app subscribes to.
const SUBSCRIBED_URIS: &[&str] = &[
    "/lol-gameflow/v1/session",
    "/lol-chat/v1/me",
    "/lol-champ-select/v1/session",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone)]
pub struct LcuEvent {
    pub uri: String,
    pub kind: EventKind,
    pub data: serde_json::Value,
}

/// Owns the socket and forwards decoded events over a channel. The channel
/// closes when the client shuts the socket (normally: the client exited).
pub struct EventSocket {
    rx: mpsc::UnboundedReceiver<LcuEvent>,
}

impl EventSocket {
    pub async fn connect(lockfile: &Lockfile) -> Result<Self, LcuError> {
        let mut request = lockfile.websocket_url().into_client_request()?;
        request.headers_mut().insert(
            AUTHORIZATION,
            lockfile
                .auth_header()
                .parse()
                .map_err(|_| LcuError::InvalidAuthHeader)?,
        );

        let tls = native_tls::TlsConnector::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        let (mut ws, _) = tokio_tungstenite::connect_async_tls_with_config(
            request,
            None,
            false,
            Some(Connector::NativeTls(tls)),
        )
        .await?;

        for uri in SUBSCRIBED_URIS {
            let topic = subscription_topic(uri);
            let frame = serde_json::json!([SUBSCRIBE_OPCODE, topic]);
            ws.send(Message::Text(frame.to_string())).await?;
            tracing::debug!("Subscribed to {}", topic);
        }

        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(message) = ws.next().await {
                let message = match message {
                    Ok(m) => m,
                    Err(e) => {
                        tracing::warn!("LCU WebSocket error: {}", e);
                        break;
                    }
                };

                let text = match message {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };

                match decode_event(&text) {
                    Some(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    None => tracing::trace!("Ignoring non-event frame: {:.80}", text),
                }
            }
            tracing::info!("LCU WebSocket closed");
        });

        Ok(Self { rx })
    }

    /// Next event, or `None` once the socket has closed.
    pub async fn recv(&mut self) -> Option<LcuEvent> {
        self.rx.recv().await
    }
}

fn subscription_topic(uri: &str) -> String {
    format!("OnJsonApiEvent{}", uri.replace('/', "_"))
}

fn decode_event(text: &str) -> Option<LcuEvent> {
    // Subscribe acks come through as empty frames.
    if text.is_empty() {
        return None;
    }

    let frame: serde_json::Value = serde_json::from_str(text).ok()?;
    let parts = frame.as_array()?;
    if parts.first().and_then(|v| v.as_u64()) != Some(EVENT_OPCODE) {
        return None;
    }

    let payload = parts.get(2)?.as_object()?;
    let uri = payload.get("uri")?.as_str()?.to_string();
    let kind = match payload.get("eventType")?.as_str()? {
        "Create" => EventKind::Create,
        "Update" => EventKind::Update,
        "Delete" => EventKind::Delete,
        other => {
            tracing::debug!("Unknown LCU event type '{}' on {}", other, uri);
            return None;
        }
    };
    let data = payload.get("data").cloned().unwrap_or(serde_json::Value::Null);

    Some(LcuEvent { uri, kind, data })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_topic_replaces_slashes() {
        assert_eq!(
            subscription_topic("/lol-gameflow/v1/session"),
            "OnJsonApiEvent_lol-gameflow_v1_session"
        );
    }

    #[test]
    fn decodes_an_update_event() {
        let event = decode_event(
            r#"[8,"OnJsonApiEvent_lol-gameflow_v1_session",{"data":{"phase":"Lobby"},"eventType":"Update","uri":"/lol-gameflow/v1/session"}]"#,
        )
        .unwrap();
        assert_eq!(event.uri, "/lol-gameflow/v1/session");
        assert_eq!(event.kind, EventKind::Update);
        assert_eq!(event.data["phase"], "Lobby");
    }

    #[test]
    fn decodes_a_delete_event_with_null_data() {
        let event = decode_event(
            r#"[8,"OnJsonApiEvent_lol-chat_v1_me",{"data":null,"eventType":"Delete","uri":"/lol-chat/v1/me"}]"#,
        )
        .unwrap();
        assert_eq!(event.kind, EventKind::Delete);
        assert!(event.data.is_null());
    }

    #[test]
    fn ignores_acks_and_noise() {
        assert!(decode_event("").is_none());
        assert!(decode_event("not json").is_none());
        assert!(decode_event("[3,\"something\"]").is_none());
        assert!(decode_event("{\"uri\":\"/x\"}").is_none());
        assert!(decode_event(r#"[8,"topic",{"uri":"/x","eventType":"Exploded"}]"#).is_none());
    }
}
