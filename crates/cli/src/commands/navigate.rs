//! `cdp navigate` - launch, navigate, wait for load, close.

use crate::cli::Cli;
use anyhow::bail;
use cdp::{Browser, Launched};
use std::time::Duration;
use tracing::warn;

pub async fn run(cli: &Cli, url: &str) -> anyhow::Result<()> {
    let config = super::launch_config(cli, "about:blank", false)?;

    let Launched::Ready(mut browser) = Browser::launch(config).await? else {
        bail!("unexpected setup-mode launch");
    };
    browser.set_load_timeout(Duration::from_secs(cli.timeout));

    let outcome = browser.navigate(url).await;
    if let Err(e) = browser.close().await {
        warn!(error = %e, "failed to close browser");
    }
    outcome?;

    println!("loaded {}", url);
    Ok(())
}
