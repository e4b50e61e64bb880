//! Directory listing over the configured media root.
//!
//! Listings read exactly one directory level, filter by category extension
//! tables, and return name/URL descriptors. Nothing is cached; every
//! request re-reads the directory.

mod category;

use std::path::Path;

use serde::Serialize;

pub use category::Category;

/// Extensions served by the flat `/videos` listing.
const FLAT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg", "mkv"];

/// A servable file as returned by a listing call.
///
/// `name` is the literal directory entry base name; `url` is the
/// percent-encoded retrieval path for the streaming endpoint. Descriptors
/// are produced fresh on every listing request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    pub name: String,
    pub url: String,
}

/// Errors from directory listing.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Cannot read directory {path}: {source}")]
    DirectoryUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown category: {name}")]
    UnknownCategory { name: String },
}

/// Lists files under `root` belonging to `category`.
///
/// Reads one directory level only. Regular files whose extension the
/// category accepts are returned sorted by name, with retrieval URLs of
/// the form `/file/<CATEGORY>/<encoded name>`.
///
/// # Errors
/// - `LibraryError::DirectoryUnreadable` - Root missing or not accessible
pub async fn list_category(
    root: &Path,
    category: Category,
) -> Result<Vec<FileDescriptor>, LibraryError> {
    list_matching(root, |path| category.matches(path), |name| {
        format!("/file/{}/{}", category, urlencoding::encode(name))
    })
    .await
}

/// Lists files under `root` for the flat `/videos` endpoint.
///
/// Filters by the hardcoded media extension set; URLs point at the
/// `/video/<encoded name>` streaming route.
///
/// # Errors
/// - `LibraryError::DirectoryUnreadable` - Root missing or not accessible
pub async fn list_videos(root: &Path) -> Result<Vec<FileDescriptor>, LibraryError> {
    list_matching(
        root,
        |path| {
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| FLAT_VIDEO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        },
        |name| format!("/video/{}", urlencoding::encode(name)),
    )
    .await
}

async fn list_matching<F, U>(
    root: &Path,
    matches: F,
    make_url: U,
) -> Result<Vec<FileDescriptor>, LibraryError>
where
    F: Fn(&Path) -> bool,
    U: Fn(&str) -> String,
{
    let unreadable = |source: std::io::Error| LibraryError::DirectoryUnreadable {
        path: root.display().to_string(),
        source,
    };

    let mut entries = tokio::fs::read_dir(root).await.map_err(unreadable)?;
    let mut descriptors = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(unreadable)? {
        let file_type = entry.file_type().await.map_err(unreadable)?;
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if !matches(&path) {
            continue;
        }

        // Entry names come straight from read_dir, so they can never carry
        // path separators; non-UTF-8 names are skipped rather than mangled.
        match entry.file_name().to_str() {
            Some(name) => descriptors.push(FileDescriptor {
                url: make_url(name),
                name: name.to_string(),
            }),
            None => tracing::warn!("Skipping non-UTF-8 entry in {}", root.display()),
        }
    }

    descriptors.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(descriptors)
}
