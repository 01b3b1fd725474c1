/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the library store and the UI layer.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Category prefix naming a library entry by its originating operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A stylized version of a single upload
    Styled,
    /// A combination of two uploads
    Mixed,
    /// A pure text-to-image result
    Generated,
}

impl Kind {
    /// Filename prefix for this kind (e.g. "styled" -> "styled_4.png")
    pub fn prefix(&self) -> &'static str {
        match self {
            Kind::Styled => "styled",
            Kind::Mixed => "mixed",
            Kind::Generated => "generated",
        }
    }

    /// Recover the kind from a filename prefix, if it matches one
    pub fn from_prefix(prefix: &str) -> Option<Kind> {
        match prefix {
            "styled" => Some(Kind::Styled),
            "mixed" => Some(Kind::Mixed),
            "generated" => Some(Kind::Generated),
            _ => None,
        }
    }
}

/// Represents a single PNG file in the result library
///
/// The directory listing is the only index: kind and sequence are parsed
/// back out of the filename, and the timestamp comes from file metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    /// Filename only (e.g. "styled_4.png")
    pub filename: String,
    /// Full path to the PNG file
    pub path: PathBuf,
    /// Originating operation, when the filename follows the convention
    pub kind: Option<Kind>,
    /// Sequence number, when the filename follows the convention
    pub sequence: Option<u32>,
    /// Last-modified time, for status display
    pub created_at: Option<DateTime<Utc>>,
}

impl LibraryEntry {
    /// Build an entry from a library path, parsing the naming convention
    pub fn from_path(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (kind, sequence) = parse_convention(&filename);

        let created_at = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(DateTime::<Utc>::from);

        LibraryEntry {
            filename,
            path,
            kind,
            sequence,
            created_at,
        }
    }
}

/// Split "<kind>_<n>.png" into its parts; both are None for foreign names
fn parse_convention(filename: &str) -> (Option<Kind>, Option<u32>) {
    let Some(stem) = filename.strip_suffix(".png") else {
        return (None, None);
    };
    let Some((prefix, number)) = stem.rsplit_once('_') else {
        return (None, None);
    };
    (Kind::from_prefix(prefix), number.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conventional_names() {
        assert_eq!(parse_convention("styled_4.png"), (Some(Kind::Styled), Some(4)));
        assert_eq!(parse_convention("mixed_12.png"), (Some(Kind::Mixed), Some(12)));
        assert_eq!(
            parse_convention("generated_1.png"),
            (Some(Kind::Generated), Some(1))
        );
    }

    #[test]
    fn test_parse_foreign_names() {
        assert_eq!(parse_convention("holiday.png"), (None, None));
        assert_eq!(parse_convention("styled_4.jpg"), (None, None));
        assert_eq!(parse_convention("other_9.png"), (None, Some(9)));
    }

    #[test]
    fn test_kind_prefix_round_trip() {
        for kind in [Kind::Styled, Kind::Mixed, Kind::Generated] {
            assert_eq!(Kind::from_prefix(kind.prefix()), Some(kind));
        }
    }
}
