//! Conversion orchestrator implementation.

use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::chapters::{build_chapters, ChapterWriter, ChapterWriterConfig};
use crate::command::{build_transcode_args, ensure_audiobook_extension};
use crate::probe::MediaProber;
use crate::transcoder::Transcoder;
use crate::validate::validate_inputs;

use super::types::{ConversionEvent, ConversionRequest, ConversionState, OrchestratorError};

/// Drives conversion attempts, one at a time.
///
/// Generic over the probing and transcoding seams so tests can run the
/// whole pipeline against mocks.
pub struct ConversionOrchestrator<P: MediaProber, T: Transcoder> {
    prober: Arc<P>,
    transcoder: Arc<T>,
    writer_config: ChapterWriterConfig,
    state: Arc<RwLock<ConversionState>>,
    output_log: Arc<RwLock<Vec<String>>>,
}

impl<P: MediaProber + 'static, T: Transcoder + 'static> ConversionOrchestrator<P, T> {
    /// Creates a new orchestrator.
    pub fn new(prober: P, transcoder: T, writer_config: ChapterWriterConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            transcoder: Arc::new(transcoder),
            writer_config,
            state: Arc::new(RwLock::new(ConversionState::Idle)),
            output_log: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Current conversion state.
    pub async fn state(&self) -> ConversionState {
        self.state.read().await.clone()
    }

    /// Transcoder output lines captured so far, in arrival order.
    pub async fn output_log(&self) -> Vec<String> {
        self.output_log.read().await.clone()
    }

    /// Starts a conversion attempt.
    ///
    /// Accepted only from `Idle`; returns immediately, the attempt runs in
    /// the background. Every state transition and every transcoder output
    /// line is delivered through `event_tx`. There are no automatic
    /// retries: any stage failure ends the attempt in `Failed`.
    pub async fn start(
        &self,
        request: ConversionRequest,
        event_tx: mpsc::UnboundedSender<ConversionEvent>,
    ) -> Result<(), OrchestratorError> {
        {
            let mut state = self.state.write().await;
            match &*state {
                ConversionState::Idle => {}
                s if s.is_active() => return Err(OrchestratorError::AttemptInProgress),
                _ => return Err(OrchestratorError::ResetRequired),
            }
            *state = ConversionState::Validating;
        }
        let _ = event_tx.send(ConversionEvent::StateChanged(ConversionState::Validating));

        info!(
            files = request.sources.len(),
            output = %request.output_path,
            "starting conversion attempt"
        );

        let prober = Arc::clone(&self.prober);
        let transcoder = Arc::clone(&self.transcoder);
        let writer_config = self.writer_config.clone();
        let state = Arc::clone(&self.state);
        let output_log = Arc::clone(&self.output_log);

        tokio::spawn(async move {
            let terminal = Self::run_attempt(
                request,
                prober,
                transcoder,
                writer_config,
                Arc::clone(&state),
                Arc::clone(&output_log),
                event_tx.clone(),
            )
            .await;

            match &terminal {
                ConversionState::Succeeded(message) => info!("{message}"),
                ConversionState::Failed(message) => warn!("conversion failed: {message}"),
                other => debug!("unexpected terminal state: {other:?}"),
            }

            Self::transition(&state, &event_tx, terminal).await;
        });

        Ok(())
    }

    async fn transition(
        state: &RwLock<ConversionState>,
        event_tx: &mpsc::UnboundedSender<ConversionEvent>,
        next: ConversionState,
    ) {
        *state.write().await = next.clone();
        let _ = event_tx.send(ConversionEvent::StateChanged(next));
    }

    /// Returns to `Idle`, clearing the captured output log.
    ///
    /// Allowed from `Idle` or a terminal state; an active attempt cannot
    /// be reset out from under itself.
    pub async fn reset(&self) -> Result<(), OrchestratorError> {
        let mut state = self.state.write().await;
        if state.is_active() {
            return Err(OrchestratorError::AttemptInProgress);
        }
        *state = ConversionState::Idle;
        self.output_log.write().await.clear();
        Ok(())
    }

    /// Runs the stages after validation admission and returns the terminal
    /// state. Intermediate transitions are emitted on `event_tx`.
    #[allow(clippy::too_many_arguments)]
    async fn run_attempt(
        request: ConversionRequest,
        prober: Arc<P>,
        transcoder: Arc<T>,
        writer_config: ChapterWriterConfig,
        state: Arc<RwLock<ConversionState>>,
        output_log: Arc<RwLock<Vec<String>>>,
        event_tx: mpsc::UnboundedSender<ConversionEvent>,
    ) -> ConversionState {
        let source_paths = request.source_paths();

        if let Err(e) = validate_inputs(&source_paths, &request.output_path) {
            return ConversionState::Failed(e.to_string());
        }

        Self::transition(&state, &event_tx, ConversionState::ResolvingDurations).await;
        let durations = match prober.durations(&source_paths).await {
            Ok(durations) => durations,
            Err(e) => return ConversionState::Failed(e.to_string()),
        };

        Self::transition(&state, &event_tx, ConversionState::Synthesizing).await;
        let entries = match build_chapters(&source_paths, &durations) {
            Ok(entries) => entries,
            Err(e) => return ConversionState::Failed(e.to_string()),
        };

        let writer = ChapterWriter::new(writer_config);
        let document = match writer.write(&entries).await {
            Ok(document) => document,
            Err(e) => return ConversionState::Failed(e.to_string()),
        };

        if let Some(cover) = &request.cover_image_path {
            debug!("cover image selected but not embedded by the transcode step: {cover}");
        }

        let output_file = ensure_audiobook_extension(&request.output_path);
        let args = build_transcode_args(
            &source_paths,
            &request.output_path,
            document.path(),
            request.title.as_deref(),
            request.author.as_deref(),
        );

        Self::transition(&state, &event_tx, ConversionState::Running).await;

        // Relay transcoder output: each line goes to the in-memory log and
        // to the event channel, in arrival order. The relay drains fully
        // once the transcoder drops its sender, so all output events
        // precede the terminal state event.
        let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();
        let relay_log = Arc::clone(&output_log);
        let relay_tx = event_tx.clone();
        let relay = tokio::spawn(async move {
            while let Some(line) = line_rx.recv().await {
                relay_log.write().await.push(line.clone());
                let _ = relay_tx.send(ConversionEvent::OutputLine(line));
            }
        });

        let result = transcoder.run(&args, line_tx).await;
        let _ = relay.await;

        // The document is single-use; a fresh one is written per attempt.
        document.cleanup().await;

        match result {
            Ok(()) => ConversionState::Succeeded(format!(
                "Audiobook created successfully: {output_file}"
            )),
            // Partial output, if any, is left in place: the transcoder owns
            // that file's lifecycle.
            Err(e) => ConversionState::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::AudioSource;
    use crate::testing::{MockProber, MockTranscoder};

    fn request(paths: &[&str], output: &str) -> ConversionRequest {
        ConversionRequest {
            sources: paths.iter().map(|p| AudioSource::from_path(*p)).collect(),
            output_path: output.to_string(),
            title: None,
            author: None,
            cover_image_path: None,
        }
    }

    async fn drain_until_terminal(
        rx: &mut mpsc::UnboundedReceiver<ConversionEvent>,
    ) -> Vec<ConversionEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            let terminal = matches!(
                &event,
                ConversionEvent::StateChanged(s) if s.is_terminal()
            );
            events.push(event);
            if terminal {
                break;
            }
        }
        events
    }

    #[tokio::test]
    async fn test_validation_failure_is_terminal() {
        let prober = MockProber::new();
        let transcoder = MockTranscoder::new();
        let orchestrator =
            ConversionOrchestrator::new(prober, transcoder, ChapterWriterConfig::default());

        let (tx, mut rx) = mpsc::unbounded_channel();
        orchestrator.start(request(&[], "/out/book"), tx).await.unwrap();

        let events = drain_until_terminal(&mut rx).await;
        assert_eq!(
            events.last(),
            Some(&ConversionEvent::StateChanged(ConversionState::Failed(
                "no input files provided".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_start_rejected_while_active() {
        let prober = MockProber::new();
        let transcoder = MockTranscoder::new().with_run_delay_ms(200);
        let orchestrator =
            ConversionOrchestrator::new(prober, transcoder, ChapterWriterConfig::default());

        let (tx, _rx) = mpsc::unbounded_channel();
        orchestrator
            .start(request(&["/in/a.mp3"], "/out/book"), tx)
            .await
            .unwrap();

        let (tx2, _rx2) = mpsc::unbounded_channel();
        let err = orchestrator
            .start(request(&["/in/a.mp3"], "/out/book"), tx2)
            .await
            .unwrap_err();
        assert_eq!(err, OrchestratorError::AttemptInProgress);
    }

    #[tokio::test]
    async fn test_reset_returns_to_idle_and_clears_log() {
        let prober = MockProber::new();
        let transcoder = MockTranscoder::new().with_output_lines(vec!["line".to_string()]);
        let orchestrator =
            ConversionOrchestrator::new(prober, transcoder, ChapterWriterConfig::default());

        let (tx, mut rx) = mpsc::unbounded_channel();
        orchestrator
            .start(request(&["/in/a.mp3"], "/out/book"), tx)
            .await
            .unwrap();
        drain_until_terminal(&mut rx).await;

        assert!(orchestrator.state().await.is_terminal());
        assert!(!orchestrator.output_log().await.is_empty());

        // A finished attempt cannot be restarted without a reset.
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let err = orchestrator
            .start(request(&["/in/a.mp3"], "/out/book"), tx2)
            .await
            .unwrap_err();
        assert_eq!(err, OrchestratorError::ResetRequired);

        orchestrator.reset().await.unwrap();
        assert_eq!(orchestrator.state().await, ConversionState::Idle);
        assert!(orchestrator.output_log().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_rejected_while_active() {
        let prober = MockProber::new();
        let transcoder = MockTranscoder::new().with_run_delay_ms(200);
        let orchestrator =
            ConversionOrchestrator::new(prober, transcoder, ChapterWriterConfig::default());

        let (tx, _rx) = mpsc::unbounded_channel();
        orchestrator
            .start(request(&["/in/a.mp3"], "/out/book"), tx)
            .await
            .unwrap();

        let err = orchestrator.reset().await.unwrap_err();
        assert_eq!(err, OrchestratorError::AttemptInProgress);
    }
}
