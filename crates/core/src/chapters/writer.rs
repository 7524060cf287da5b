//! Persistence of chapter metadata documents.

use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use super::config::ChapterWriterConfig;
use super::error::ChapterError;
use super::synth::{render_ffmetadata, ChapterEntry};

/// A chapter metadata document persisted for one conversion attempt.
///
/// The file is uniquely named per attempt; documents are never reused, so
/// overlapping attempts (or a delayed cleanup from a previous one) cannot
/// collide.
#[derive(Debug, Clone)]
pub struct MetadataDocument {
    path: PathBuf,
}

impl MetadataDocument {
    /// Path of the document on disk.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Removes the document, ignoring errors. Leaking to the OS temp
    /// directory is acceptable; reuse is not.
    pub async fn cleanup(self) {
        let _ = tokio::fs::remove_file(&self.path).await;
    }
}

/// Writes chapter metadata documents to a configured temp directory.
pub struct ChapterWriter {
    config: ChapterWriterConfig,
}

impl ChapterWriter {
    /// Creates a writer with the given configuration.
    pub fn new(config: ChapterWriterConfig) -> Self {
        Self { config }
    }

    /// Renders `entries` and persists them to a uniquely named file.
    ///
    /// The file is fully written and closed before this returns, so the
    /// transcoder can be handed the path without a partial-write race.
    pub async fn write(&self, entries: &[ChapterEntry]) -> Result<MetadataDocument, ChapterError> {
        let path = self
            .config
            .temp_dir
            .join(format!("chapters-{}.ffmeta", Uuid::new_v4()));

        tokio::fs::create_dir_all(&self.config.temp_dir)
            .await
            .map_err(|e| ChapterError::WriteFailed {
                path: self.config.temp_dir.clone(),
                source: e,
            })?;

        let document = render_ffmetadata(entries);
        tokio::fs::write(&path, document)
            .await
            .map_err(|e| ChapterError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;

        debug!("wrote {} chapters to {:?}", entries.len(), path);

        Ok(MetadataDocument { path })
    }
}
