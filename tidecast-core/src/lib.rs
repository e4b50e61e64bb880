//! Tidecast Core - Media library and streaming functionality
//!
//! This crate provides the building blocks for serving a local media
//! directory over HTTP: category taxonomy, directory listing, byte-range
//! parsing, and chunked file streaming.

pub mod config;
pub mod library;
pub mod streaming;

// Re-export main types for convenient access
pub use config::TidecastConfig;
pub use library::{Category, FileDescriptor, LibraryError};
pub use streaming::{ByteRange, MediaFile, RangeError, StreamError};

/// Core errors that can bubble up from any Tidecast subsystem.
#[derive(Debug, thiserror::Error)]
pub enum TidecastError {
    #[error("Library error: {0}")]
    Library(#[from] LibraryError),

    #[error("Streaming error: {0}")]
    Streaming(#[from] StreamError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TidecastError>;
