//! Error types for the transcoder module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running the transcoder.
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// FFmpeg binary not found.
    #[error("ffmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// The process ran but exited with a non-zero status.
    #[error("ffmpeg exited with {}{}", code.map_or("unknown code".to_string(), |c| format!("code {c}")), last_line.as_deref().map(|l| format!(": {l}")).unwrap_or_default())]
    ExitFailure {
        code: Option<i32>,
        /// Last line seen on stderr before exit, the usual place ffmpeg
        /// leaves its diagnostic.
        last_line: Option<String>,
    },

    /// The process exceeded the configured timeout and was killed.
    #[error("transcode timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error while spawning or reading from the process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
