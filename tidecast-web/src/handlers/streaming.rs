//! Streaming handlers: whole-file and byte-range responses.
//!
//! Implements RFC 7233 single-range requests. The file is statted fresh
//! for every request; the statted size backs both the `Content-Range`
//! total and the partial `Content-Length`.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tidecast_core::library::Category;
use tidecast_core::streaming::{MediaFile, RangeError, StreamError};
use tracing::{debug, error};

use super::error_response;
use crate::server::AppState;

/// `GET /video/{filename}` - always range-aware.
pub async fn stream_video(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_file(&state, &filename, true, &headers).await
}

/// `GET /file/{category}/{filename}` - range-aware for VIDEOS only; other
/// categories are served as a plain whole-file response.
pub async fn stream_file(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let category: Category = match category.parse() {
        Ok(category) => category,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    serve_file(&state, &filename, category == Category::Videos, &headers).await
}

async fn serve_file(
    state: &AppState,
    filename: &str,
    range_aware: bool,
    headers: &HeaderMap,
) -> Response {
    // Axum has already percent-decoded the path segment, so a crafted
    // name could carry separators. Reject before touching the filesystem.
    if !is_plain_file_name(filename) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid filename");
    }

    let path = state.config.library.media_root.join(filename);
    let file = match MediaFile::open(&path).await {
        Ok(file) => file,
        Err(StreamError::NotFound { .. }) => {
            return error_response(StatusCode::NOT_FOUND, "File not found");
        }
        Err(e) => {
            error!("Stat failed for {}: {e}", path.display());
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cannot read file");
        }
    };

    let range_header = headers.get(header::RANGE).and_then(|v| v.to_str().ok());

    match range_header {
        Some(raw) if range_aware => serve_range(state, &file, raw).await,
        Some(_) => {
            // Non-video categories ignore the range header entirely.
            debug!("Ignoring range header for non-range-aware route");
            serve_whole(state, &file, range_aware).await
        }
        None => serve_whole(state, &file, range_aware).await,
    }
}

async fn serve_range(state: &AppState, file: &MediaFile, raw_header: &str) -> Response {
    let range = match file.resolve_range(raw_header) {
        Ok(range) => range,
        Err(e @ (RangeError::Malformed { .. } | RangeError::MultipleRanges { .. })) => {
            return error_response(StatusCode::BAD_REQUEST, &e.to_string());
        }
        Err(RangeError::Unsatisfiable { .. }) => {
            return Response::builder()
                .status(StatusCode::RANGE_NOT_SATISFIABLE)
                .header(header::CONTENT_RANGE, format!("bytes */{}", file.size()))
                .body(Body::empty())
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }
    };

    let stream = match file.stream_range(range, &state.config.streaming).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Range stream setup failed: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cannot read file");
        }
    };

    Response::builder()
        .status(StatusCode::PARTIAL_CONTENT)
        .header(header::CONTENT_TYPE, file.content_type())
        .header(header::CONTENT_LENGTH, range.length().to_string())
        .header(header::CONTENT_RANGE, range.content_range())
        .header(header::ACCEPT_RANGES, "bytes")
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

async fn serve_whole(state: &AppState, file: &MediaFile, range_aware: bool) -> Response {
    let stream = match file.stream_all(&state.config.streaming).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("Stream setup failed: {e}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cannot read file");
        }
    };

    let mut response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type())
        .header(header::CONTENT_LENGTH, file.size().to_string());

    if range_aware {
        response = response.header(header::ACCEPT_RANGES, "bytes");
    }

    response
        .body(Body::from_stream(stream))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

/// A servable name is a bare directory entry: no separators, no parent
/// traversal, nothing the root join could escape through.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.contains('/')
        && !name.contains('\\')
        && name != "."
        && name != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_file_names_accepted() {
        assert!(is_plain_file_name("movie.mp4"));
        assert!(is_plain_file_name("home video.mp4"));
        assert!(is_plain_file_name("..hidden.mp4"));
    }

    #[test]
    fn test_traversal_names_rejected() {
        assert!(!is_plain_file_name(""));
        assert!(!is_plain_file_name(".."));
        assert!(!is_plain_file_name("."));
        assert!(!is_plain_file_name("../secret.mp4"));
        assert!(!is_plain_file_name("a/b.mp4"));
        assert!(!is_plain_file_name("a\\b.mp4"));
    }
}
