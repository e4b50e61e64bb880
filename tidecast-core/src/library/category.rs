//! Category taxonomy mapping file extensions to listing groups.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::LibraryError;

/// Enumerated file grouping used to scope directory listings.
///
/// One shared extension table feeds both the listing and streaming
/// endpoints; categories are never re-declared per endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Videos,
    Images,
    Pdf,
    Music,
    /// Catch-all for files matching no other category's extensions.
    Others,
}

/// Extensions treated as videos (compared case-insensitively).
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm", "mov", "avi", "m4v", "flv", "ogg"];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "svg"];

const PDF_EXTENSIONS: &[&str] = &["pdf"];

const MUSIC_EXTENSIONS: &[&str] = &["mp3", "wav", "flac", "aac", "m4a", "opus"];

impl Category {
    /// All concrete (non catch-all) categories.
    const CONCRETE: &[Category] = &[
        Category::Videos,
        Category::Images,
        Category::Pdf,
        Category::Music,
    ];

    /// Extension allow-list for a concrete category. Empty for `Others`,
    /// which is defined by exclusion instead.
    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Videos => VIDEO_EXTENSIONS,
            Category::Images => IMAGE_EXTENSIONS,
            Category::Pdf => PDF_EXTENSIONS,
            Category::Music => MUSIC_EXTENSIONS,
            Category::Others => &[],
        }
    }

    /// Checks whether a file path belongs to this category.
    ///
    /// Matching is on the extension only, case-insensitive. `Others`
    /// accepts any path no concrete category claims, including files
    /// without an extension.
    pub fn matches(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match self {
            Category::Others => ext
                .map(|e| {
                    Self::CONCRETE
                        .iter()
                        .all(|c| !c.extensions().contains(&e.as_str()))
                })
                .unwrap_or(true),
            concrete => ext
                .map(|e| concrete.extensions().contains(&e.as_str()))
                .unwrap_or(false),
        }
    }

    /// Canonical path-segment form, as used in listing URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Videos => "VIDEOS",
            Category::Images => "IMAGES",
            Category::Pdf => "PDF",
            Category::Music => "MUSIC",
            Category::Others => "OTHERS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = LibraryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "VIDEOS" => Ok(Category::Videos),
            "IMAGES" => Ok(Category::Images),
            "PDF" => Ok(Category::Pdf),
            "MUSIC" => Ok(Category::Music),
            "OTHERS" => Ok(Category::Others),
            _ => Err(LibraryError::UnknownCategory {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_case_insensitive() {
        assert_eq!("VIDEOS".parse::<Category>().unwrap(), Category::Videos);
        assert_eq!("videos".parse::<Category>().unwrap(), Category::Videos);
        assert_eq!("Pdf".parse::<Category>().unwrap(), Category::Pdf);
        assert_eq!("OTHERS".parse::<Category>().unwrap(), Category::Others);
    }

    #[test]
    fn test_parse_unknown_category() {
        let err = "DOCUMENTS".parse::<Category>().unwrap_err();
        assert!(matches!(err, LibraryError::UnknownCategory { name } if name == "DOCUMENTS"));
    }

    #[test]
    fn test_matches_extension_case_insensitive() {
        assert!(Category::Videos.matches(Path::new("movie.MP4")));
        assert!(Category::Videos.matches(Path::new("movie.mkv")));
        assert!(!Category::Videos.matches(Path::new("track.mp3")));
        assert!(Category::Music.matches(Path::new("track.Mp3")));
        assert!(Category::Images.matches(Path::new("photo.jpeg")));
        assert!(Category::Pdf.matches(Path::new("manual.pdf")));
    }

    #[test]
    fn test_others_is_exclusion_of_concrete_categories() {
        assert!(Category::Others.matches(Path::new("archive.zip")));
        assert!(Category::Others.matches(Path::new("notes.txt")));
        assert!(Category::Others.matches(Path::new("README")));
        assert!(!Category::Others.matches(Path::new("movie.mp4")));
        assert!(!Category::Others.matches(Path::new("manual.PDF")));
    }
}
