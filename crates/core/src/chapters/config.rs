//! Configuration for the chapters module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the chapter metadata writer.
///
/// The temp directory is injected rather than read from ambient process
/// state so tests can point the writer at a scratch directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterWriterConfig {
    /// Directory the metadata documents are written to.
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir().join("bookbinder")
}

impl Default for ChapterWriterConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
        }
    }
}

impl ChapterWriterConfig {
    /// Sets the temp directory.
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }
}
