//! Mock transcoder for testing.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;
use tokio::time::Duration;

use crate::transcoder::{Transcoder, TranscoderError};

/// Mock implementation of the [`Transcoder`] trait.
///
/// Records every invocation's argument list, emits scripted output lines
/// in order, and optionally fails with a scripted exit diagnostic.
#[derive(Debug, Clone, Default)]
pub struct MockTranscoder {
    invocations: Arc<RwLock<Vec<Vec<String>>>>,
    output_lines: Arc<RwLock<Vec<String>>>,
    failure: Arc<RwLock<Option<(Option<i32>, Option<String>)>>>,
    run_delay_ms: Arc<RwLock<u64>>,
}

impl MockTranscoder {
    /// Creates a new mock transcoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the output lines emitted by each run.
    pub fn with_output_lines(self, lines: Vec<String>) -> Self {
        *self.output_lines.write().unwrap() = lines;
        self
    }

    /// Makes every run fail with the given exit code and last line.
    pub fn with_failure(self, code: Option<i32>, last_line: Option<String>) -> Self {
        *self.failure.write().unwrap() = Some((code, last_line));
        self
    }

    /// Adds a delay to each run, for tests that need the attempt to stay
    /// in flight.
    pub fn with_run_delay_ms(self, delay_ms: u64) -> Self {
        *self.run_delay_ms.write().unwrap() = delay_ms;
        self
    }

    /// Argument lists of all runs so far.
    pub fn invocations(&self) -> Vec<Vec<String>> {
        self.invocations.read().unwrap().clone()
    }

    /// Number of runs so far.
    pub fn invocation_count(&self) -> usize {
        self.invocations.read().unwrap().len()
    }
}

#[async_trait]
impl Transcoder for MockTranscoder {
    fn name(&self) -> &str {
        "mock"
    }

    async fn run(
        &self,
        args: &[String],
        line_tx: mpsc::UnboundedSender<String>,
    ) -> Result<(), TranscoderError> {
        self.invocations.write().unwrap().push(args.to_vec());

        let delay_ms = *self.run_delay_ms.read().unwrap();
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        for line in self.output_lines.read().unwrap().iter() {
            let _ = line_tx.send(line.clone());
        }

        let failure = self.failure.read().unwrap().clone();
        if let Some((code, last_line)) = failure {
            return Err(TranscoderError::ExitFailure { code, last_line });
        }

        Ok(())
    }

    async fn validate(&self) -> Result<(), TranscoderError> {
        Ok(())
    }
}
