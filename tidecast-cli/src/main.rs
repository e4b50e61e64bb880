//! Tidecast CLI - Command-line interface
//!
//! Provides command-line access to the Tidecast media server.

mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tidecast")]
#[command(about = "A local-network media file server")]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    commands::handle_command(cli.command).await?;

    Ok(())
}
