//! Tidecast Web - HTTP interface for the media library
//!
//! Serves directory listings as JSON and file bodies as whole or
//! byte-range responses, suitable for in-browser playback.

pub mod handlers;
pub mod server;

pub use server::{AppState, build_router, run_server};
