//! Result shapes for `Runtime.evaluate`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result payload of a `Runtime.evaluate` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateReturn {
    /// The evaluation result (or the thrown value, mirrored here)
    pub result: RemoteObject,
    /// Present when the expression threw
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_details: Option<ExceptionDetails>,
}

/// A value living in the page's JavaScript heap.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    /// JavaScript type: `"string"`, `"number"`, `"object"`, `"undefined"`, ...
    #[serde(rename = "type")]
    pub object_type: String,
    /// The value itself, for primitives and plain JSON-representable objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Human-readable description, for values with no JSON representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Detail about an exception thrown during evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    /// Short exception summary (e.g. "Uncaught")
    pub text: String,
    /// Line number of the throw site (0-based)
    #[serde(default)]
    pub line_number: Option<i64>,
    /// Column number of the throw site (0-based)
    #[serde(default)]
    pub column_number: Option<i64>,
    /// The thrown value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception: Option<RemoteObject>,
}

impl ExceptionDetails {
    /// Best human-readable rendering of the exception: the thrown value's
    /// description when available, the summary text otherwise.
    pub fn describe(&self) -> &str {
        self.exception
            .as_ref()
            .and_then(|exception| exception.description.as_deref())
            .unwrap_or(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_primitive_result() {
        let json = r#"{"result": {"type": "number", "value": 3, "description": "3"}}"#;
        let parsed: EvaluateReturn = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.result.object_type, "number");
        assert_eq!(parsed.result.value, Some(serde_json::json!(3)));
        assert!(parsed.exception_details.is_none());
    }

    #[test]
    fn parses_thrown_exception() {
        let json = r#"{
            "result": {"type": "object", "description": "ReferenceError: x is not defined"},
            "exceptionDetails": {
                "text": "Uncaught",
                "lineNumber": 0,
                "columnNumber": 0,
                "exception": {"type": "object", "description": "ReferenceError: x is not defined"}
            }
        }"#;
        let parsed: EvaluateReturn = serde_json::from_str(json).unwrap();
        let details = parsed.exception_details.unwrap();
        assert_eq!(details.describe(), "ReferenceError: x is not defined");
    }

    #[test]
    fn describe_falls_back_to_text() {
        let details = ExceptionDetails {
            text: "Uncaught".to_string(),
            line_number: None,
            column_number: None,
            exception: None,
        };
        assert_eq!(details.describe(), "Uncaught");
    }
}
