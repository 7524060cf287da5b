//! Error types for the chapters module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during chapter synthesis.
#[derive(Debug, Error)]
pub enum ChapterError {
    /// A source resolved to a zero-length chapter. A chapter must cover a
    /// non-empty time range; this is a data error in the input file, not
    /// something to skip silently.
    #[error("source has zero duration: {path}")]
    ZeroDuration { path: String },

    /// Failed to write the metadata document. Fatal to the attempt.
    #[error("failed to write chapter metadata to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
