use clap::Parser;

mod chrome;
mod cli;
mod commands;
mod logging;

use cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(err) = commands::dispatch(cli).await {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}
