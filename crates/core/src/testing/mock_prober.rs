//! Mock prober for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::probe::{AudioTags, MediaProber, ProbeError, ProbedMedia};

/// Mock implementation of the [`MediaProber`] trait.
///
/// Provides controllable behavior for testing:
/// - scripted durations and tags per path,
/// - scripted failure for specific paths,
/// - a record of every probe call.
#[derive(Debug, Clone, Default)]
pub struct MockProber {
    durations: Arc<RwLock<HashMap<String, f64>>>,
    tags: Arc<RwLock<HashMap<String, AudioTags>>>,
    failing_paths: Arc<RwLock<HashMap<String, String>>>,
    probed: Arc<RwLock<Vec<PathBuf>>>,
}

/// Duration returned for paths without a scripted value.
const DEFAULT_DURATION_SECS: f64 = 180.0;

impl MockProber {
    /// Creates a new mock prober.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the duration returned for a path.
    pub fn with_duration(self, path: impl Into<String>, secs: f64) -> Self {
        self.durations.write().unwrap().insert(path.into(), secs);
        self
    }

    /// Scripts the tags returned for a path.
    pub fn with_tags(self, path: impl Into<String>, tags: AudioTags) -> Self {
        self.tags.write().unwrap().insert(path.into(), tags);
        self
    }

    /// Makes probing of a path fail with the given reason.
    pub fn with_failure(self, path: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failing_paths
            .write()
            .unwrap()
            .insert(path.into(), reason.into());
        self
    }

    /// Paths probed so far, in call order.
    pub fn probed_paths(&self) -> Vec<PathBuf> {
        self.probed.read().unwrap().clone()
    }
}

#[async_trait]
impl MediaProber for MockProber {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<ProbedMedia, ProbeError> {
        self.probed.write().unwrap().push(path.to_path_buf());

        let key = path.to_string_lossy().to_string();
        if let Some(reason) = self.failing_paths.read().unwrap().get(&key) {
            return Err(ProbeError::probe_failed(path, reason.clone()));
        }

        let duration_secs = self
            .durations
            .read()
            .unwrap()
            .get(&key)
            .copied()
            .unwrap_or(DEFAULT_DURATION_SECS);
        let tags = self.tags.read().unwrap().get(&key).cloned().unwrap_or_default();

        Ok(ProbedMedia {
            path: path.to_path_buf(),
            size_bytes: 1024 * 1024,
            duration_secs,
            format: "mp3".to_string(),
            tags,
        })
    }
}
