//! Per-operation control channel sessions.
//!
//! A [`Session`] holds the resolved WebSocket debugger URL and opens a
//! fresh [`Connection`] for each operation. Navigate subscribes to network
//! events and waits for a load-completion signal; evaluate is a plain
//! request/response exchange.

use cdp_protocol::{EvaluateReturn, RemoteObject};
use cdp_runtime::{Connection, Error, Result};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, info};

/// Default bound on the navigate load wait.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Either of these ends the navigate wait; they are treated as equivalent
/// completion signals and the first one wins.
const TERMINAL_EVENTS: [&str; 2] = ["Page.loadEventFired", "Network.loadingFinished"];

/// Client for one resolved page endpoint.
#[derive(Debug, Clone)]
pub struct Session {
    ws_url: String,
    load_timeout: Duration,
}

impl Session {
    /// Session against the given WebSocket debugger URL.
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Override the navigate load timeout.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Set the navigate load timeout in place.
    pub fn set_load_timeout(&mut self, timeout: Duration) {
        self.load_timeout = timeout;
    }

    /// The endpoint this session talks to.
    pub fn endpoint(&self) -> &str {
        &self.ws_url
    }

    /// The configured navigate load timeout.
    pub fn load_timeout(&self) -> Duration {
        self.load_timeout
    }

    async fn connect(&self) -> Result<Connection> {
        if self.ws_url.is_empty() {
            return Err(Error::EmptyEndpoint);
        }
        Connection::connect(&self.ws_url).await
    }

    /// Navigate the page to `url` and wait for a load-completion signal.
    ///
    /// Sends `Page.navigate`, enables the network event stream, then waits
    /// (bounded by the load timeout) for `Page.loadEventFired` or
    /// `Network.loadingFinished`. Unrelated events are logged and skipped.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        let connection = self.connect().await?;
        let outcome = self.navigate_on(&connection, url).await;
        connection.close().await;
        outcome
    }

    async fn navigate_on(&self, connection: &Connection, url: &str) -> Result<()> {
        info!(url, "navigating");

        let ack = connection
            .send_command("Page.navigate", Some(json!({ "url": url })))
            .await?;
        debug!(%ack, "Page.navigate acknowledged");
        if let Some(error_text) = ack.get("errorText").and_then(Value::as_str) {
            // Chromium reports e.g. net::ERR_NAME_NOT_RESOLVED here while
            // still acking the command; the load wait below decides the
            // operation's fate.
            debug!(error_text, "Page.navigate reported an error");
        }

        connection.send_command("Network.enable", None).await?;

        self.wait_for_load(connection, url).await
    }

    async fn wait_for_load(&self, connection: &Connection, url: &str) -> Result<()> {
        let wait = async {
            loop {
                let event = connection.next_event().await?;
                if TERMINAL_EVENTS.contains(&event.method.as_str()) {
                    info!(method = %event.method, "page load complete");
                    return Ok(());
                }
                debug!(method = %event.method, "ignoring event");
            }
        };

        match tokio::time::timeout(self.load_timeout, wait).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::NavigationTimeout {
                url: url.to_string(),
                duration_ms: self.load_timeout.as_millis() as u64,
            }),
        }
    }

    /// Evaluate a JavaScript expression in the page.
    ///
    /// Enables the page domain, sends `Runtime.evaluate`, and returns the
    /// resulting remote object. Exactly two request/response exchanges; no
    /// event wait.
    ///
    /// # Errors
    ///
    /// `Error::Evaluation` if the expression threw.
    pub async fn evaluate(&self, expression: &str) -> Result<RemoteObject> {
        let connection = self.connect().await?;
        let outcome = self.evaluate_on(&connection, expression).await;
        connection.close().await;
        outcome
    }

    async fn evaluate_on(
        &self,
        connection: &Connection,
        expression: &str,
    ) -> Result<RemoteObject> {
        connection.send_command("Page.enable", None).await?;

        let result = connection
            .send_command("Runtime.evaluate", Some(json!({ "expression": expression })))
            .await?;
        let evaluated: EvaluateReturn = serde_json::from_value(result)
            .map_err(|e| Error::ProtocolError(format!("unexpected Runtime.evaluate result: {}", e)))?;

        if let Some(details) = evaluated.exception_details {
            return Err(Error::Evaluation(details.describe().to_string()));
        }

        debug!(object_type = %evaluated.result.object_type, "evaluation complete");
        Ok(evaluated.result)
    }
}
