//! batch-gateway - prompt batch submission and synchronization service
//!
//! Serves the batch HTTP API, or runs a single sync cycle from the command line.

use batch_gateway::config::{Config, DEFAULT_CONFIG_PATH};
use batch_gateway::core::batch::BatchService;
use batch_gateway::server;
use batch_gateway::utils::logging::init_logging;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "batch-gateway", version, about)]
struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        env = "BATCH_GATEWAY_CONFIG",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Run one synchronization cycle and print the rows as JSON
    Sync,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> batch_gateway::Result<()> {
    let config = Config::load(&cli.config).await?;
    init_logging(config.logging())?;
    info!("Configuration loaded from {}", cli.config.display());

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::builder::run_server(config).await,
        Command::Sync => {
            let service = BatchService::from_config(&config).await?;
            let outcome = service.run_sync_cycle().await?;
            println!("{}", serde_json::to_string_pretty(&outcome.rows)?);
            Ok(())
        }
    }
}
