//! Types for the probe module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Information about a probed audio file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbedMedia {
    /// File path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Container format (e.g., "mp3").
    pub format: String,
    /// Embedded tags, if any.
    #[serde(default)]
    pub tags: AudioTags,
}

/// Title/artist tags embedded in an audio file.
///
/// Absence of either field is not an error, just "nothing found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTags {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl AudioTags {
    /// Whether no tags were found at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none()
    }
}
