//! mcprofile CLI - look up Minecraft profiles from the terminal
//!
//! Supports:
//! - profile lookup by current or past name
//! - profile and name history lookup by identifier
//! - skin, cape and body model lookup
//! - batch lookup of up to 100 names

use clap::{Parser, Subcommand};
use colored::*;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::LookupCommands;
use config::CliConfig;
use error::CliResult;
use mcprofile::ProfileClient;

/// mcprofile CLI application
#[derive(Parser)]
#[command(name = "mcprofile")]
#[command(about = "Look up Minecraft profiles, name history and skins", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MCPROFILE_CONFIG")]
    config: Option<String>,

    /// Account API base URL
    #[arg(long, env = "MCPROFILE_API_BASE")]
    api_base: Option<String>,

    /// Session server base URL
    #[arg(long, env = "MCPROFILE_SESSION_BASE")]
    session_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table")]
    output: output::OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Lookup(LookupCommands),

    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    // Load config, flags win over the file
    let mut file = CliConfig::load(cli.config.as_deref())?;
    if cli.api_base.is_some() {
        file.api_base = cli.api_base.clone();
    }
    if cli.session_base.is_some() {
        file.session_base = cli.session_base.clone();
    }
    if cli.timeout.is_some() {
        file.timeout_seconds = cli.timeout;
    }
    let config = file.client_config();

    match cli.command {
        Commands::Config => {
            println!("API base:     {}", config.api_base);
            println!("Session base: {}", config.session_base);
            println!("Timeout:      {}s", config.timeout_seconds);
            println!("User agent:   {}", config.user_agent);
            Ok(())
        }
        Commands::Lookup(command) => {
            // Ctrl-C cancels the in-flight request instead of killing the process mid-write
            let (cancel, signal) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("cancelling request");
                    let _ = cancel.send(true);
                }
            });

            let client = ProfileClient::new(&config)?.with_cancellation(signal);
            commands::execute(command, &client, cli.output).await
        }
    }
}
