//! CLI command implementations

use std::path::PathBuf;

use clap::Subcommand;
use tidecast_core::library::{self, Category};
use tidecast_core::{Result, TidecastConfig};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the media server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory to serve
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
    /// Print a category listing without starting the server
    List {
        /// Category to list (VIDEOS, IMAGES, PDF, MUSIC, OTHERS)
        category: String,
        /// Directory to list
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Serve { host, port, root } => serve(host, port, root).await,
        Commands::List { category, root } => list(category, root).await,
    }
}

/// Build the runtime configuration: environment defaults overridden by flags.
fn resolve_config(
    host: Option<String>,
    port: Option<u16>,
    root: Option<PathBuf>,
) -> TidecastConfig {
    let mut config = TidecastConfig::from_env();
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(root) = root {
        config.library.media_root = root;
    }
    config
}

async fn serve(
    host: Option<String>,
    port: Option<u16>,
    root: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(host, port, root);

    println!("Starting Tidecast media server...");
    println!("Root: {}", config.library.media_root.display());
    println!("URL: http://{}", config.bind_address());
    println!("Press Ctrl+C to stop the server");

    tidecast_web::run_server(config).await?;
    Ok(())
}

async fn list(
    category: String,
    root: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_config(None, None, root);
    let category: Category = category.parse()?;

    let descriptors = library::list_category(&config.library.media_root, category).await?;

    if descriptors.is_empty() {
        println!("No {category} files in {}", config.library.media_root.display());
        return Ok(());
    }

    println!("{category} files in {}", config.library.media_root.display());
    println!("{:-<60}", "");
    for descriptor in descriptors {
        println!("{:<40} {}", descriptor.name, descriptor.url);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_env_defaults() {
        let config = resolve_config(
            Some("127.0.0.1".to_string()),
            Some(8080),
            Some(PathBuf::from("/tmp/media")),
        );

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.library.media_root, PathBuf::from("/tmp/media"));
    }
}
