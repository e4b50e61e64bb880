//! Listing handlers: JSON arrays of name/url descriptors.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tidecast_core::library::{self, Category, LibraryError};
use tracing::error;

use super::error_response;
use crate::server::AppState;

/// `GET /videos` - flat listing filtered by the hardcoded media extensions.
pub async fn list_videos(State(state): State<AppState>) -> Response {
    match library::list_videos(&state.config.library.media_root).await {
        Ok(descriptors) => Json(descriptors).into_response(),
        Err(e) => library_error_response(e),
    }
}

/// `GET /files/{category}` - listing scoped to one category.
///
/// An unknown category key fails before any filesystem access.
pub async fn list_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Response {
    let category: Category = match category.parse() {
        Ok(category) => category,
        Err(e) => return library_error_response(e),
    };

    match library::list_category(&state.config.library.media_root, category).await {
        Ok(descriptors) => Json(descriptors).into_response(),
        Err(e) => library_error_response(e),
    }
}

fn library_error_response(error: LibraryError) -> Response {
    match error {
        LibraryError::DirectoryUnreadable { .. } => {
            error!("Listing failed: {error}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cannot read directory")
        }
        LibraryError::UnknownCategory { ref name } => {
            error_response(StatusCode::BAD_REQUEST, &format!("Unknown category: {name}"))
        }
    }
}
