//! Centralized configuration for Tidecast.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Central configuration for all Tidecast components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct TidecastConfig {
    pub library: LibraryConfig,
    pub server: ServerConfig,
    pub streaming: StreamingConfig,
}

/// Media library configuration.
///
/// The media root is always runtime configuration; there is no compiled-in
/// directory path.
#[derive(Debug, Clone)]
pub struct LibraryConfig {
    /// Directory served by the listing and streaming endpoints
    pub media_root: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("."),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

/// File streaming configuration.
///
/// Controls chunk sizing and how long a single disk read may stall before
/// the response is aborted.
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Size of each chunk read from disk while streaming a body
    pub chunk_size: usize,
    /// Upper bound on a single chunk read before the stream is aborted
    pub read_timeout: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 65536, // 64 KiB
            read_timeout: Duration::from_secs(30),
        }
    }
}

impl TidecastConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(root) = std::env::var("TIDECAST_MEDIA_ROOT") {
            if !root.is_empty() {
                config.library.media_root = PathBuf::from(root);
            }
        }

        if let Ok(host) = std::env::var("TIDECAST_HOST") {
            if !host.is_empty() {
                config.server.host = host;
            }
        }

        if let Ok(port) = std::env::var("TIDECAST_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }

        if let Ok(timeout) = std::env::var("TIDECAST_READ_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.streaming.read_timeout = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Socket address string the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
