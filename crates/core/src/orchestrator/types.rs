//! Types for the orchestrator module.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::source::AudioSource;

/// Everything needed for one conversion attempt.
///
/// Built once when the user starts a conversion, from a snapshot of the
/// shell's mutable selection; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRequest {
    /// Ordered input files.
    pub sources: Vec<AudioSource>,
    /// Output path; the audiobook extension is appended during command
    /// synthesis if absent.
    pub output_path: String,
    /// Optional book title.
    pub title: Option<String>,
    /// Optional author.
    pub author: Option<String>,
    /// Optional cover image selected in the shell. Carried with the
    /// request; the fixed transcode argument contract does not consume it.
    pub cover_image_path: Option<String>,
}

impl ConversionRequest {
    /// Ordered source paths.
    pub fn source_paths(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.path.clone()).collect()
    }
}

/// State of the conversion pipeline. One value, owned exclusively by the
/// orchestrator; observers read it but never mutate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum ConversionState {
    /// No attempt in flight.
    Idle,
    /// Checking inputs before any expensive work.
    Validating,
    /// Probing per-file durations.
    ResolvingDurations,
    /// Building chapter metadata and the transcode command.
    Synthesizing,
    /// Transcoder process running.
    Running,
    /// Terminal: conversion finished, message summarizes the output.
    Succeeded(String),
    /// Terminal: the attempt failed, message carries the diagnostic.
    Failed(String),
}

impl ConversionState {
    /// Whether an attempt is currently in flight.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Validating | Self::ResolvingDurations | Self::Synthesizing | Self::Running
        )
    }

    /// Whether this is a terminal state of a finished attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }
}

/// Events emitted by the orchestrator during an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionEvent {
    /// The pipeline entered a new state.
    StateChanged(ConversionState),
    /// One line of transcoder output, verbatim, in arrival order.
    OutputLine(String),
}

/// Errors returned by orchestrator entry points.
///
/// Pipeline-stage failures are not errors here; they surface as
/// [`ConversionState::Failed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrchestratorError {
    /// An attempt is already in flight; only one runs at a time.
    #[error("a conversion attempt is already in progress")]
    AttemptInProgress,

    /// A finished attempt must be reset before starting another.
    #[error("previous attempt finished; reset before starting a new one")]
    ResetRequired,
}
