//! Subcommand implementations.

mod eval;
mod navigate;
mod setup;

use crate::chrome;
use crate::cli::{Cli, Command};
use cdp::LaunchConfig;

pub async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Navigate { url } => navigate::run(&cli, url).await,
        Command::Eval { expression, url } => eval::run(&cli, expression, url.as_deref()).await,
        Command::Setup { url } => setup::run(&cli, url.as_deref()).await,
    }
}

/// Build a launch config from the global flags.
fn launch_config(cli: &Cli, url: &str, initial_setup: bool) -> anyhow::Result<LaunchConfig> {
    let executable = chrome::find_chrome(cli.chrome.clone())?;
    let user_data_dir = chrome::profile_dir(cli.profile_dir.clone())?;

    let mut config = LaunchConfig::new(executable, user_data_dir);
    config.port = cli.port;
    config.url = url.to_string();
    config.initial_setup = initial_setup;
    Ok(config)
}
