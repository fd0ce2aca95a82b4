//! `cdp setup` - profile bootstrap: launch once and leave the browser open.

use crate::cli::Cli;
use cdp::{Browser, Launched};
use tracing::warn;

pub async fn run(cli: &Cli, url: Option<&str>) -> anyhow::Result<()> {
    let config = super::launch_config(cli, url.unwrap_or("about:blank"), true)?;

    match Browser::launch(config).await? {
        Launched::SetupComplete(process) => {
            // Dropping the handle leaves the browser running for the user.
            drop(process);
            println!("Browser is up. Set up the profile in the opened window");
            println!("(log in, install extensions), then close it and re-run");
            println!("your command without `setup`.");
            Ok(())
        }
        Launched::Ready(mut browser) => {
            // Launch honors initial_setup, so this arm should be dead; fail
            // loudly rather than silently automating a bootstrap session.
            if let Err(e) = browser.close().await {
                warn!(error = %e, "failed to close browser");
            }
            anyhow::bail!("launch ignored setup mode")
        }
    }
}
