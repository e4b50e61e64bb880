//! HTTP request handlers.
//!
//! Every failure is translated at this boundary into a status code plus a
//! small JSON body; nothing is retried and no failure escapes to crash the
//! listener.

mod library;
mod streaming;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub use library::{list_category, list_videos};
pub use streaming::{stream_file, stream_video};

/// JSON error body in the `{"error": "..."}` shape the frontend expects.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
