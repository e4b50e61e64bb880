//! HTTP Range header parsing and validation.
//!
//! Implements the single-range `bytes=start-end` form of RFC 7233.
//! Malformed headers and multi-range requests are rejected outright
//! rather than silently degraded to a full-content response.

/// A validated byte range within a file.
///
/// Invariant: `start <= end < total_size`. Constructed only through
/// [`ByteRange::from_header`], which enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
    pub total_size: u64,
}

/// Errors from Range header parsing and validation.
#[derive(Debug, thiserror::Error)]
pub enum RangeError {
    #[error("Malformed range header: {header}")]
    Malformed { header: String },

    #[error("Multi-range requests are not supported: {header}")]
    MultipleRanges { header: String },

    #[error("Range start {start} not satisfiable for size {total_size}")]
    Unsatisfiable { start: u64, total_size: u64 },
}

impl ByteRange {
    /// Parses and validates a raw `Range` header value against a file size.
    ///
    /// The end offset defaults to `total_size - 1` when omitted and is
    /// clamped to it when the client asks past EOF. A start at or past EOF
    /// is rejected, never clamped into a valid-looking success.
    ///
    /// # Errors
    /// - `RangeError::Malformed` - Header is not a `bytes=<start>-[<end>]` form
    /// - `RangeError::MultipleRanges` - Header carries more than one range
    /// - `RangeError::Unsatisfiable` - Start is past EOF or above the end
    pub fn from_header(header: &str, total_size: u64) -> Result<Self, RangeError> {
        let malformed = || RangeError::Malformed {
            header: header.to_string(),
        };

        let spec = header.strip_prefix("bytes=").ok_or_else(malformed)?;

        if spec.contains(',') {
            return Err(RangeError::MultipleRanges {
                header: header.to_string(),
            });
        }

        let (start_str, end_str) = spec.split_once('-').ok_or_else(malformed)?;

        // Suffix ranges (`bytes=-500`) fall out here: an empty start is
        // not a valid non-negative integer.
        let start = start_str.trim().parse::<u64>().map_err(|_| malformed())?;

        let end = match end_str.trim() {
            "" => total_size.saturating_sub(1),
            s => s
                .parse::<u64>()
                .map_err(|_| malformed())?
                .min(total_size.saturating_sub(1)),
        };

        if start > end || start >= total_size {
            return Err(RangeError::Unsatisfiable { start, total_size });
        }

        Ok(Self {
            start,
            end,
            total_size,
        })
    }

    /// Number of bytes the range covers.
    pub fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value for a 206 response.
    pub fn content_range(&self) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, self.total_size)
    }
}
