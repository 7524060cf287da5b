//! Audio source files selected for a conversion.

use serde::{Deserialize, Serialize};

/// An input MP3 file as selected by the user.
///
/// Identity is the `path` string, compared exactly (case-sensitive, no
/// normalization). Two entries with different spellings of the same
/// filesystem location are considered distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioSource {
    /// Name shown to the user (usually the file name).
    pub display_name: String,
    /// Full path to the file.
    pub path: String,
    /// File size in bytes (0 when unknown).
    pub size_bytes: u64,
}

impl AudioSource {
    /// Creates a source from a path, deriving the display name from the
    /// final path component. Paths are user-selected strings and may use
    /// either separator, so both are split regardless of host platform.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let display_name = path
            .rsplit(['/', '\\'])
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or(&path)
            .to_string();
        Self {
            display_name,
            path,
            size_bytes: 0,
        }
    }
}

/// Returns the subset of `incoming` whose paths are not already present in
/// `existing`, preserving the incoming order.
pub fn dedupe_sources(existing: &[AudioSource], incoming: Vec<AudioSource>) -> Vec<AudioSource> {
    let known: std::collections::HashSet<&str> =
        existing.iter().map(|s| s.path.as_str()).collect();
    incoming
        .into_iter()
        .filter(|s| !known.contains(s.path.as_str()))
        .collect()
}
