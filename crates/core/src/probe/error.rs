//! Error types for the probe module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing media files.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// FFprobe binary not found.
    #[error("ffprobe not found at path: {path}")]
    FfprobeNotFound { path: PathBuf },

    /// A specific file could not be probed.
    #[error("failed to probe {path}: {reason}")]
    ProbeFailed { path: PathBuf, reason: String },

    /// Failed to parse ffprobe output for a file.
    #[error("failed to parse probe output for {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    /// I/O error while invoking the prober.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Creates a new probe failed error.
    pub fn probe_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new parse error.
    pub fn parse_error(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The file this error refers to, when known.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::ProbeFailed { path, .. } | Self::ParseError { path, .. } => Some(path),
            _ => None,
        }
    }
}
