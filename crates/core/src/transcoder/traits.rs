//! Trait definitions for the transcoder module.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::TranscoderError;

/// A transcoder that can run a synthesized argument list as a long-lived
/// external operation.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Returns the name of this transcoder implementation.
    fn name(&self) -> &str;

    /// Runs the transcoder with the given arguments.
    ///
    /// Every stdout/stderr line is forwarded verbatim through `line_tx`
    /// as it arrives, not buffered to completion. If the receiver is
    /// dropped, the transcode continues without output relay.
    ///
    /// Returns `Ok(())` on exit code zero; a non-zero exit or spawn
    /// failure is an error carrying the available diagnostics.
    async fn run(
        &self,
        args: &[String],
        line_tx: mpsc::UnboundedSender<String>,
    ) -> Result<(), TranscoderError>;

    /// Validates that the transcoder is available and ready.
    async fn validate(&self) -> Result<(), TranscoderError>;
}
