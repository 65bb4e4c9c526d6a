use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, Config};
use crate::gateway;

#[derive(Parser)]
#[command(name = "ephemeral")]
#[command(about = "ephemeral - delete old tweets on demand")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP trigger (default)
    Serve {
        /// Listen port, overrides FUNCTIONS_CUSTOMHANDLER_PORT
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run a single purge pass and exit
    Purge,
    /// Display version information
    Version,
}

/// Executes the parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Version => {
            print_version();
            Ok(())
        }
        Commands::Serve { port } => {
            let mut config = load()?;
            if let Some(port) = port {
                config.port = port;
            }
            runtime()?.block_on(gateway::serve(config))
        }
        Commands::Purge => {
            let config = load()?;
            let report = runtime()?.block_on(gateway::run_purge(&config))?;
            println!(
                "examined {} tweets: {} deleted, {} failed, {} whitelisted, {} with ongoing interactions, {} too recent, {} unparsable",
                report.examined,
                report.deleted.len(),
                report.failed,
                report.whitelisted,
                report.interacting,
                report.too_recent,
                report.unparsable
            );
            Ok(())
        }
    }
}

fn load() -> Result<Config> {
    config::load_config().context("Invalid configuration")
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to start async runtime")
}

fn print_version() {
    println!("ephemeral {}", env!("CARGO_PKG_VERSION"));
}
