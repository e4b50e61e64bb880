//! Chunked file streaming for range-aware HTTP responses.
//!
//! A [`MediaFile`] stats its path once per request and hands out
//! forward-only chunked byte streams, so memory use stays independent of
//! file size and a dropped client releases the file handle with the stream.

mod range;

use std::io::SeekFrom;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures::{Stream, stream};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

pub use range::{ByteRange, RangeError};

use crate::config::StreamingConfig;

/// Errors from opening or streaming a media file.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolves the content type for a path from its extension.
///
/// Unrecognized extensions fall back to `application/octet-stream`.
pub fn content_type_for(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

/// A regular file resolved for one streaming request.
///
/// The size recorded at open time is the single source of truth for the
/// request: both the `Content-Range` total and the partial body length
/// are derived from it. Nothing is cached across requests.
#[derive(Debug)]
pub struct MediaFile {
    path: PathBuf,
    size: u64,
}

impl MediaFile {
    /// Stats `path` and prepares it for streaming.
    ///
    /// # Errors
    /// - `StreamError::NotFound` - Path does not exist or is not a regular file
    /// - `StreamError::Io` - Stat failed for another reason
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StreamError> {
        let path = path.into();
        let not_found = || StreamError::NotFound {
            path: path.display().to_string(),
        };

        let metadata = match tokio::fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(StreamError::Io(e)),
        };

        if !metadata.is_file() {
            return Err(not_found());
        }

        let size = metadata.len();
        Ok(Self { path, size })
    }

    /// File size in bytes as statted for this request.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content type resolved from the file extension.
    pub fn content_type(&self) -> String {
        content_type_for(&self.path)
    }

    /// Validates a raw `Range` header value against this file's size.
    ///
    /// # Errors
    /// Propagates [`RangeError`] from parsing or validation.
    pub fn resolve_range(&self, header: &str) -> Result<ByteRange, RangeError> {
        ByteRange::from_header(header, self.size)
    }

    /// Streams the whole file from offset zero.
    ///
    /// # Errors
    /// - `StreamError::Io` - Opening the file failed
    pub async fn stream_all(
        &self,
        config: &StreamingConfig,
    ) -> Result<impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static, StreamError>
    {
        self.stream_from(0, self.size, config).await
    }

    /// Streams exactly `range.length()` bytes starting at `range.start`.
    ///
    /// # Errors
    /// - `StreamError::Io` - Opening or seeking the file failed
    pub async fn stream_range(
        &self,
        range: ByteRange,
        config: &StreamingConfig,
    ) -> Result<impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static, StreamError>
    {
        self.stream_from(range.start, range.length(), config).await
    }

    /// Builds a forward-only chunked stream over `[start, start + length)`.
    ///
    /// The file is seeked once; every subsequent read is sequential. A
    /// chunk read exceeding the configured timeout, a mid-body read error,
    /// or an early EOF (file shrank under us) aborts the stream with an
    /// error item, which tears the connection down if headers were already
    /// flushed.
    async fn stream_from(
        &self,
        start: u64,
        length: u64,
        config: &StreamingConfig,
    ) -> Result<impl Stream<Item = Result<Bytes, std::io::Error>> + Send + 'static, StreamError>
    {
        let mut file = File::open(&self.path).await?;
        if start > 0 {
            file.seek(SeekFrom::Start(start)).await?;
        }

        let chunk_size = config.chunk_size.max(1);
        let read_timeout = config.read_timeout;

        Ok(stream::unfold(
            (file, length),
            move |(mut file, remaining)| async move {
                if remaining == 0 {
                    return None;
                }

                let mut buffer = vec![0u8; remaining.min(chunk_size as u64) as usize];
                match tokio::time::timeout(read_timeout, file.read(&mut buffer)).await {
                    Err(_) => Some((
                        Err(std::io::Error::new(
                            std::io::ErrorKind::TimedOut,
                            "chunk read timed out",
                        )),
                        (file, 0),
                    )),
                    Ok(Err(e)) => Some((Err(e), (file, 0))),
                    Ok(Ok(0)) => Some((
                        Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "file ended before the declared range",
                        )),
                        (file, 0),
                    )),
                    Ok(Ok(n)) => {
                        buffer.truncate(n);
                        Some((Ok(Bytes::from(buffer)), (file, remaining - n as u64)))
                    }
                }
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    async fn collect(
        stream: impl Stream<Item = Result<Bytes, std::io::Error>>,
    ) -> Result<Vec<u8>, std::io::Error> {
        let mut body = Vec::new();
        let mut stream = std::pin::pin!(stream);
        while let Some(chunk) = stream.next().await {
            body.extend_from_slice(&chunk?);
        }
        Ok(body)
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[tokio::test]
    async fn test_open_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = MediaFile::open(dir.path().join("absent.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, StreamError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_open_directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = MediaFile::open(dir.path()).await.unwrap_err();
        assert!(matches!(err, StreamError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_stream_all_returns_exact_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = pattern(200_000);
        tokio::fs::write(&path, &data).await.unwrap();

        let file = MediaFile::open(&path).await.unwrap();
        assert_eq!(file.size(), 200_000);

        let body = collect(file.stream_all(&StreamingConfig::default()).await.unwrap())
            .await
            .unwrap();
        assert_eq!(body, data);
    }

    #[tokio::test]
    async fn test_stream_range_returns_exact_slice() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = pattern(100_000);
        tokio::fs::write(&path, &data).await.unwrap();

        let file = MediaFile::open(&path).await.unwrap();
        let range = file.resolve_range("bytes=1000-1999").unwrap();
        assert_eq!(range.length(), 1000);

        let body = collect(
            file.stream_range(range, &StreamingConfig::default())
                .await
                .unwrap(),
        )
        .await
        .unwrap();
        assert_eq!(body, &data[1000..2000]);
    }

    #[tokio::test]
    async fn test_sequential_ranges_reassemble_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = pattern(150_001); // not a multiple of the step
        tokio::fs::write(&path, &data).await.unwrap();

        let file = MediaFile::open(&path).await.unwrap();
        let config = StreamingConfig::default();

        let step = 40_000u64;
        let mut reassembled = Vec::new();
        let mut start = 0u64;
        while start < file.size() {
            let end = (start + step - 1).min(file.size() - 1);
            let range = file
                .resolve_range(&format!("bytes={start}-{end}"))
                .unwrap();
            let body = collect(file.stream_range(range, &config).await.unwrap())
                .await
                .unwrap();
            assert_eq!(body.len() as u64, range.length());
            reassembled.extend_from_slice(&body);
            start = end + 1;
        }

        assert_eq!(reassembled, data);
    }

    #[tokio::test]
    async fn test_small_chunk_size_still_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let data = pattern(1000);
        tokio::fs::write(&path, &data).await.unwrap();

        let config = StreamingConfig {
            chunk_size: 7,
            ..Default::default()
        };

        let file = MediaFile::open(&path).await.unwrap();
        let range = file.resolve_range("bytes=100-199").unwrap();
        let body = collect(file.stream_range(range, &config).await.unwrap())
            .await
            .unwrap();
        assert_eq!(body, &data[100..200]);
    }

    #[tokio::test]
    async fn test_truncated_file_aborts_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        tokio::fs::write(&path, pattern(1000)).await.unwrap();

        let file = MediaFile::open(&path).await.unwrap();
        // Shrink the file after stat; the declared range now overruns EOF.
        tokio::fs::write(&path, pattern(100)).await.unwrap();

        let range = file.resolve_range("bytes=0-999").unwrap();
        let result = collect(
            file.stream_range(range, &StreamingConfig::default())
                .await
                .unwrap(),
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_content_type_resolution() {
        assert_eq!(content_type_for(Path::new("a.mp4")), "video/mp4");
        assert_eq!(content_type_for(Path::new("a.pdf")), "application/pdf");
        assert_eq!(content_type_for(Path::new("a.mp3")), "audio/mpeg");
        assert_eq!(
            content_type_for(Path::new("a.unknown-ext")),
            "application/octet-stream"
        );
    }
}
