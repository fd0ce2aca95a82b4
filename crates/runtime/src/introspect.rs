//! HTTP introspection: readiness polling and endpoint resolution.
//!
//! Chromium serves a JSON list of inspectable targets at
//! `http://localhost:<port>/json`. Readiness means that list is non-empty;
//! resolution extracts the WebSocket debugger URL of the first page target.

use crate::error::{Error, Result};
use cdp_protocol::{Target, first_page_endpoint};
use std::time::Duration;

/// Default remote debugging port.
pub const DEFAULT_DEBUG_PORT: u16 = 9222;

/// Default readiness attempt budget (total wait ≈ 30s at the default cadence).
pub const READY_MAX_ATTEMPTS: u32 = 30;

/// Default fixed cadence between readiness attempts. No backoff.
pub const READY_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Per-request timeout for introspection GETs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Client for the browser's HTTP introspection endpoint.
#[derive(Debug, Clone)]
pub struct Introspector {
    client: reqwest::Client,
    base_url: String,
}

impl Introspector {
    /// Introspector for a browser listening on `localhost:<port>`.
    pub fn new(port: u16) -> Self {
        Self::with_base_url(format!("http://localhost:{}", port))
    }

    /// Introspector for an explicit base URL. Used by tests to point the
    /// poller at a stub server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetch the current target list.
    ///
    /// # Errors
    ///
    /// Returns `Error::Introspection` on transport failure, non-2xx status,
    /// or an unparseable body.
    pub async fn targets(&self) -> Result<Vec<Target>> {
        let url = format!("{}/json", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| Error::Introspection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Introspection(format!(
                "unexpected status {} from {}",
                status, url
            )));
        }

        response
            .json::<Vec<Target>>()
            .await
            .map_err(|e| Error::Introspection(e.to_string()))
    }

    /// Poll until the endpoint reports at least one target.
    ///
    /// Any transport error, bad status, parse failure, or empty list counts
    /// as "not yet ready": sleep one interval and retry. Returns `true` as
    /// soon as a non-empty list is observed, `false` once `max_attempts`
    /// have been exhausted; the caller decides whether that is fatal.
    pub async fn wait_until_ready(&self, max_attempts: u32, interval: Duration) -> bool {
        for attempt in 1..=max_attempts {
            match self.targets().await {
                Ok(targets) if !targets.is_empty() => {
                    tracing::debug!(attempt, targets = targets.len(), "debug endpoint is ready");
                    return true;
                }
                Ok(_) => {
                    tracing::debug!(attempt, "debug endpoint has no targets yet");
                }
                Err(e) => {
                    tracing::debug!(attempt, error = %e, "debug endpoint not reachable yet");
                }
            }
            if attempt < max_attempts {
                tokio::time::sleep(interval).await;
            }
        }
        false
    }

    /// Resolve the control channel address of the first page target.
    ///
    /// Single shot, no retry: readiness must already have been confirmed
    /// via [`wait_until_ready`](Self::wait_until_ready).
    ///
    /// # Errors
    ///
    /// Returns `Error::Introspection` if the request fails and
    /// `Error::NoPageTarget` if no page-type entry carries a debugger URL.
    pub async fn resolve_page_endpoint(&self) -> Result<String> {
        let targets = self.targets().await?;
        match first_page_endpoint(&targets) {
            Some(ws_url) => {
                tracing::debug!(ws_url, "resolved page debugger endpoint");
                Ok(ws_url.to_string())
            }
            None => Err(Error::NoPageTarget),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PAGE_BODY: &str = r#"[{"type":"page","webSocketDebuggerUrl":"ws://x/1"}]"#;

    /// Serves one scripted HTTP response per connection, repeating the last
    /// entry once the script is exhausted. Returns the base URL and a hit
    /// counter.
    async fn spawn_stub(responses: Vec<(u16, &'static str)>) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let (status, body) = responses[n.min(responses.len() - 1)];

                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        (format!("http://{}", addr), hits)
    }

    #[tokio::test]
    async fn ready_after_exactly_one_poll() {
        let (base_url, hits) = spawn_stub(vec![(200, PAGE_BODY)]).await;
        let introspector = Introspector::with_base_url(base_url);

        let ready = introspector
            .wait_until_ready(30, Duration::from_millis(5))
            .await;
        assert!(ready);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ready_on_last_allowed_attempt() {
        let mut responses = vec![(200, "[]"); 4];
        responses.push((200, PAGE_BODY));
        let (base_url, hits) = spawn_stub(responses).await;
        let introspector = Introspector::with_base_url(base_url);

        let ready = introspector
            .wait_until_ready(5, Duration::from_millis(5))
            .await;
        assert!(ready);
        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn not_ready_one_attempt_too_late() {
        let mut responses = vec![(200, "[]"); 5];
        responses.push((200, PAGE_BODY));
        let (base_url, hits) = spawn_stub(responses).await;
        let introspector = Introspector::with_base_url(base_url);

        let ready = introspector
            .wait_until_ready(5, Duration::from_millis(5))
            .await;
        assert!(!ready);
        assert_eq!(hits.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn non_2xx_counts_as_not_ready() {
        let (base_url, _) = spawn_stub(vec![(503, ""), (200, PAGE_BODY)]).await;
        let introspector = Introspector::with_base_url(base_url);

        let ready = introspector
            .wait_until_ready(3, Duration::from_millis(5))
            .await;
        assert!(ready);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_not_ready() {
        // Port from a listener we immediately drop, so nothing is serving.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let introspector = Introspector::with_base_url(base_url);
        let ready = introspector
            .wait_until_ready(2, Duration::from_millis(5))
            .await;
        assert!(!ready);
    }

    #[tokio::test]
    async fn resolves_first_page_target() {
        let body = r#"[
            {"type":"background_page","webSocketDebuggerUrl":"ws://x/bg"},
            {"type":"page","webSocketDebuggerUrl":"ws://x/1"},
            {"type":"page","webSocketDebuggerUrl":"ws://x/2"}
        ]"#;
        let (base_url, _) = spawn_stub(vec![(200, body)]).await;
        let introspector = Introspector::with_base_url(base_url);

        let endpoint = introspector.resolve_page_endpoint().await.unwrap();
        assert_eq!(endpoint, "ws://x/1");
    }

    #[tokio::test]
    async fn resolve_without_page_target_fails() {
        let body = r#"[{"type":"service_worker","webSocketDebuggerUrl":"ws://x/sw"}]"#;
        let (base_url, _) = spawn_stub(vec![(200, body)]).await;
        let introspector = Introspector::with_base_url(base_url);

        let result = introspector.resolve_page_endpoint().await;
        assert!(matches!(result, Err(Error::NoPageTarget)));
    }

    #[tokio::test]
    async fn resolve_does_not_retry() {
        let (base_url, hits) = spawn_stub(vec![(503, ""), (200, PAGE_BODY)]).await;
        let introspector = Introspector::with_base_url(base_url);

        let result = introspector.resolve_page_endpoint().await;
        assert!(matches!(result, Err(Error::Introspection(_))));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
