//! `cdp eval` - launch, optionally navigate, evaluate, print, close.

use crate::cli::Cli;
use anyhow::bail;
use cdp::{Browser, Launched, RemoteObject};
use std::time::Duration;
use tracing::warn;

pub async fn run(cli: &Cli, expression: &str, url: Option<&str>) -> anyhow::Result<()> {
    let config = super::launch_config(cli, url.unwrap_or("about:blank"), false)?;

    let Launched::Ready(mut browser) = Browser::launch(config).await? else {
        bail!("unexpected setup-mode launch");
    };
    browser.set_load_timeout(Duration::from_secs(cli.timeout));

    let outcome = async {
        if let Some(url) = url {
            browser.navigate(url).await?;
        }
        browser.evaluate(expression).await
    }
    .await;

    if let Err(e) = browser.close().await {
        warn!(error = %e, "failed to close browser");
    }

    println!("{}", render(&outcome?));
    Ok(())
}

/// Render an evaluation result: the value as JSON when there is one, the
/// description otherwise, falling back to the JavaScript type.
fn render(object: &RemoteObject) -> String {
    if let Some(value) = &object.value {
        return value.to_string();
    }
    if let Some(description) = &object.description {
        return description.clone();
    }
    object.object_type.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Option<serde_json::Value>, description: Option<&str>) -> RemoteObject {
        RemoteObject {
            object_type: "object".to_string(),
            value,
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn renders_value_as_json() {
        assert_eq!(render(&object(Some(json!({"a": 1})), None)), r#"{"a":1}"#);
        assert_eq!(render(&object(Some(json!("hi")), None)), r#""hi""#);
    }

    #[test]
    fn falls_back_to_description_then_type() {
        assert_eq!(render(&object(None, Some("Window"))), "Window");
        assert_eq!(render(&object(None, None)), "object");
    }
}
