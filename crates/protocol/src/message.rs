//! Control channel message shapes.
//!
//! Every frame on the WebSocket control channel is a JSON object in one of
//! three shapes: a command (has `id` and `method`), a response (has `id`,
//! correlating to a prior command), or an unsolicited event (has `method`
//! but no `id`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Command sent to the browser over the control channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Command {
    /// Request ID for correlating the response. Assigned sequentially per
    /// connection, starting at 1.
    pub id: u64,
    /// Method name to invoke (e.g. `Page.navigate`)
    pub method: String,
    /// Method parameters as a JSON object, omitted when the method takes none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

/// Response to a previously sent [`Command`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Command ID this response correlates to
    pub id: u64,
    /// Success result (mutually exclusive with error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error result (mutually exclusive with result)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

/// Error payload carried in a failed [`Response`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandError {
    /// Numeric error code (JSON-RPC style, e.g. -32601 for unknown method)
    pub code: i64,
    /// Human-readable error message
    pub message: String,
    /// Additional error detail, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

/// Unsolicited event emitted by the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Event method name (e.g. `Page.loadEventFired`)
    pub method: String,
    /// Event parameters as a JSON object
    #[serde(default)]
    pub params: Value,
}

/// Discriminated union of inbound control channel messages.
///
/// Variants are tried in order: a message with an `id` field is a response,
/// one with only a `method` is an event, and anything else falls through to
/// the forward-compatible catch-all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// Response message (has `id` field)
    Response(Response),
    /// Event message (no `id` field)
    Event(Event),
    /// Unknown message type (forward-compatible catch-all)
    Unknown(Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_omits_missing_params() {
        let command = Command {
            id: 4,
            method: "Network.enable".to_string(),
            params: None,
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json, serde_json::json!({"id": 4, "method": "Network.enable"}));
    }

    #[test]
    fn command_serializes_params() {
        let command = Command {
            id: 3,
            method: "Page.navigate".to_string(),
            params: Some(serde_json::json!({"url": "https://example.com"})),
        };
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(json["params"]["url"], "https://example.com");
    }

    #[test]
    fn message_with_id_is_response() {
        let json = r#"{"id": 42, "result": {"frameId": "F1"}}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        match message {
            Message::Response(response) => {
                assert_eq!(response.id, 42);
                assert!(response.result.is_some());
                assert!(response.error.is_none());
            }
            _ => panic!("Expected Response"),
        }
    }

    #[test]
    fn message_with_error_is_response() {
        let json = r#"{"id": 7, "error": {"code": -32601, "message": "unknown method"}}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        match message {
            Message::Response(response) => {
                let error = response.error.unwrap();
                assert_eq!(error.code, -32601);
                assert_eq!(error.message, "unknown method");
            }
            _ => panic!("Expected Response"),
        }
    }

    #[test]
    fn message_without_id_is_event() {
        let json = r#"{"method": "Page.loadEventFired", "params": {"timestamp": 1.5}}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        match message {
            Message::Event(event) => {
                assert_eq!(event.method, "Page.loadEventFired");
                assert_eq!(event.params["timestamp"], 1.5);
            }
            _ => panic!("Expected Event"),
        }
    }

    #[test]
    fn event_params_default_to_null() {
        let json = r#"{"method": "Network.loadingFinished"}"#;
        let message: Message = serde_json::from_str(json).unwrap();

        match message {
            Message::Event(event) => {
                assert_eq!(event.method, "Network.loadingFinished");
                assert!(event.params.is_null());
            }
            _ => panic!("Expected Event"),
        }
    }

    #[test]
    fn unrecognized_shape_is_unknown() {
        let json = r#"{"something": "else"}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert!(matches!(message, Message::Unknown(_)));
    }
}
