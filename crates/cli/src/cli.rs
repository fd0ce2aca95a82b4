use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cdp")]
#[command(about = "Drive a Chromium browser over the DevTools protocol")]
#[command(version)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the Chrome/Chromium executable (falls back to $CDP_CHROME,
    /// then to well-known names on PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub chrome: Option<PathBuf>,

    /// Browser profile directory (created if missing)
    #[arg(long, global = true, value_name = "PATH")]
    pub profile_dir: Option<PathBuf>,

    /// Remote debugging port
    #[arg(long, global = true, default_value_t = cdp::DEFAULT_DEBUG_PORT)]
    pub port: u16,

    /// Page load timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the browser and navigate to a URL, waiting for page load
    Navigate {
        /// URL to open
        url: String,
    },
    /// Evaluate a JavaScript expression in the page and print the result
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Navigate here first
        #[arg(long, value_name = "URL")]
        url: Option<String>,
    },
    /// Launch the browser once so the profile can be set up by hand
    Setup {
        /// URL to open (e.g. a login page)
        url: Option<String>,
    },
}
