//! Harmony CLI - command-line utility for querying a Logitech Harmony hub.
//!
//! Logs in to the Logitech cloud, pairs with the hub on the local network,
//! runs one command and disconnects.

mod cli;
mod commands;
mod error;
mod logging;
mod orchestrator;
mod output;
#[cfg(test)]
mod testing;

use clap::Parser;

use harmony_core::auth::HttpIdentityGateway;
use harmony_core::device::HubConnector;

use cli::Cli;
use error::{exit_codes, CliError};
use logging::LogConfig;
use orchestrator::{ConnectionParams, Orchestrator};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::new(cli.loglevel);
    logging::init(&log_config);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("{}", e.user_message());
            }
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let gateway = HttpIdentityGateway::new()?;
    let orchestrator = Orchestrator::new(gateway, HubConnector::new());
    let params = ConnectionParams::from(cli.common);

    let mut stdout = std::io::stdout();
    orchestrator.run(&params, cli.command, &mut stdout).await
}
