//! embed - command line client for embedport providers.

use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::{ConfigCommand, DimsCommand, TextCommand};

/// embed - turn text into embedding vectors with a configured provider.
///
/// Providers (OpenAI, DashScope) and their credentials are configured as
/// named contexts in ~/.embedport/config.yaml.
#[derive(Parser)]
#[command(name = "embed")]
#[command(about = "Embedding provider CLI tool")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.embedport/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Context name to use
    #[arg(short = 'c', long, global = true)]
    pub context: Option<String>,

    /// Output as JSON (for piping)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Embed one or more texts
    Text(TextCommand),
    /// Probe the provider's vector dimensionality
    Dims(DimsCommand),
    /// Manage CLI configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        let filter = if cli.verbose {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::from_default_env()
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }

    match &cli.command {
        Commands::Text(cmd) => cmd.run(&cli).await,
        Commands::Dims(cmd) => cmd.run(&cli).await,
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
