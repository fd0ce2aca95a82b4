//! Error types for the CDP runtime.

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving the browser.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to launch the browser process.
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// The debug endpoint never reported a target within the attempt budget.
    #[error("Browser debug endpoint not ready after {attempts} attempts")]
    NotReady { attempts: u32 },

    /// The HTTP introspection endpoint could not be queried.
    #[error("Introspection request failed: {0}")]
    Introspection(String),

    /// The introspection endpoint reported no inspectable page.
    #[error("No page target exposed by the debug endpoint")]
    NoPageTarget,

    /// A channel open was attempted before an endpoint was resolved.
    #[error("No control channel endpoint resolved")]
    EmptyEndpoint,

    /// Failed to open the WebSocket control channel.
    #[error("Failed to connect to '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// Transport-level error (WebSocket framing).
    #[error("Transport error: {0}")]
    TransportError(String),

    /// Protocol-level error (malformed or unexpected message).
    #[error("Protocol error: {0}")]
    ProtocolError(String),

    /// Error payload returned by the browser for a command.
    #[error("DevTools error {code}: {message}")]
    Remote {
        /// Numeric error code from the browser
        code: i64,
        /// Human-readable error message
        message: String,
    },

    /// The evaluated expression threw a JavaScript exception.
    #[error("Evaluation threw: {0}")]
    Evaluation(String),

    /// Channel closed unexpectedly.
    #[error("Channel closed unexpectedly")]
    ChannelClosed,

    /// Timeout waiting for operation.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Navigation timeout.
    #[error("Navigation timeout after {duration_ms}ms navigating to '{url}'")]
    NavigationTimeout { url: String, duration_ms: u64 },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Error::Timeout(_) | Error::NavigationTimeout { .. }
        )
    }

    /// Returns true if this error originated in the browser rather than
    /// the client (a command error payload or a thrown expression).
    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. } | Error::Evaluation(_))
    }
}
