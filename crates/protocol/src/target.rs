//! Target records from the HTTP introspection endpoint.

use serde::{Deserialize, Serialize};

/// One inspectable surface reported by `GET http://localhost:<port>/json`.
///
/// The endpoint returns a JSON array of these; only entries with
/// `type == "page"` carry a control channel we can drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// Target kind: `"page"`, `"background_page"`, `"service_worker"`, ...
    #[serde(rename = "type")]
    pub target_type: String,
    /// Opaque target identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Page title, if any
    #[serde(default)]
    pub title: Option<String>,
    /// URL currently loaded in the target
    #[serde(default)]
    pub url: Option<String>,
    /// WebSocket address of the target's control channel. Absent when
    /// another client is already attached.
    #[serde(default)]
    pub web_socket_debugger_url: Option<String>,
}

impl Target {
    /// Returns true if this target is an inspectable page.
    pub fn is_page(&self) -> bool {
        self.target_type == "page"
    }
}

/// Returns the control channel address of the first page-type target.
///
/// Non-page entries are skipped regardless of position. `None` if no page
/// target exists, or if the first page target carries no debugger URL.
pub fn first_page_endpoint(targets: &[Target]) -> Option<&str> {
    targets
        .iter()
        .find(|target| target.is_page())
        .and_then(|target| target.web_socket_debugger_url.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(target_type: &str, ws_url: Option<&str>) -> Target {
        Target {
            target_type: target_type.to_string(),
            id: None,
            title: None,
            url: None,
            web_socket_debugger_url: ws_url.map(str::to_string),
        }
    }

    #[test]
    fn parses_introspection_entry() {
        let json = r#"{
            "type": "page",
            "id": "A1B2",
            "title": "Example Domain",
            "url": "https://example.com/",
            "webSocketDebuggerUrl": "ws://localhost:9222/devtools/page/A1B2"
        }"#;
        let parsed: Target = serde_json::from_str(json).unwrap();
        assert!(parsed.is_page());
        assert_eq!(
            parsed.web_socket_debugger_url.as_deref(),
            Some("ws://localhost:9222/devtools/page/A1B2")
        );
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let parsed: Target = serde_json::from_str(r#"{"type": "service_worker"}"#).unwrap();
        assert!(!parsed.is_page());
        assert!(parsed.web_socket_debugger_url.is_none());
    }

    #[test]
    fn picks_first_page_target() {
        let targets = vec![
            target("background_page", Some("ws://x/bg")),
            target("page", Some("ws://x/1")),
            target("page", Some("ws://x/2")),
        ];
        assert_eq!(first_page_endpoint(&targets), Some("ws://x/1"));
    }

    #[test]
    fn no_page_target_yields_none() {
        let targets = vec![
            target("service_worker", Some("ws://x/sw")),
            target("background_page", None),
        ];
        assert_eq!(first_page_endpoint(&targets), None);
        assert_eq!(first_page_endpoint(&[]), None);
    }

    #[test]
    fn page_without_debugger_url_yields_none() {
        // An attached page exposes no webSocketDebuggerUrl.
        let targets = vec![target("page", None), target("page", Some("ws://x/2"))];
        assert_eq!(first_page_endpoint(&targets), None);
    }
}
