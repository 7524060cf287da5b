//! Trait definitions for the probe module.

use async_trait::async_trait;
use std::path::Path;

use super::error::ProbeError;
use super::types::{AudioTags, ProbedMedia};

/// A prober that can inspect audio files.
#[async_trait]
pub trait MediaProber: Send + Sync {
    /// Returns the name of this prober implementation.
    fn name(&self) -> &str;

    /// Probes a single audio file.
    async fn probe(&self, path: &Path) -> Result<ProbedMedia, ProbeError>;

    /// Resolves durations for an ordered list of files.
    ///
    /// The result has the same length and order as `paths`. Files are
    /// probed concurrently but results are reassembled positionally, so
    /// backend completion order never leaks into the output. A failure on
    /// any single file fails the whole resolution; the error names the
    /// file that could not be probed.
    async fn durations(&self, paths: &[String]) -> Result<Vec<f64>, ProbeError> {
        let probes = paths.iter().map(|p| self.probe(Path::new(p)));
        let infos = futures::future::try_join_all(probes).await?;
        Ok(infos.into_iter().map(|i| i.duration_secs).collect())
    }

    /// Extracts embedded title/artist tags from a file.
    ///
    /// Missing tags are not an error; the default implementation reuses
    /// [`MediaProber::probe`].
    async fn tags(&self, path: &Path) -> Result<AudioTags, ProbeError> {
        Ok(self.probe(path).await?.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct FixedProber;

    #[async_trait]
    impl MediaProber for FixedProber {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn probe(&self, path: &Path) -> Result<ProbedMedia, ProbeError> {
            // Duration derived from the file name so ordering is observable.
            let n: f64 = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| ProbeError::probe_failed(path, "unparseable"))?;
            Ok(ProbedMedia {
                path: path.to_path_buf(),
                size_bytes: 1024,
                duration_secs: n,
                format: "mp3".to_string(),
                tags: AudioTags::default(),
            })
        }
    }

    #[tokio::test]
    async fn test_durations_preserve_order() {
        let prober = FixedProber;
        let paths = vec![
            "/in/30.mp3".to_string(),
            "/in/10.mp3".to_string(),
            "/in/20.mp3".to_string(),
        ];
        let durations = prober.durations(&paths).await.unwrap();
        assert_eq!(durations, vec![30.0, 10.0, 20.0]);
    }

    #[tokio::test]
    async fn test_durations_fail_whole_batch() {
        let prober = FixedProber;
        let paths = vec!["/in/10.mp3".to_string(), "/in/bad.mp3".to_string()];
        let err = prober.durations(&paths).await.unwrap_err();
        assert_eq!(err.path(), Some(&PathBuf::from("/in/bad.mp3")));
    }

    #[tokio::test]
    async fn test_tags_default_impl() {
        let prober = FixedProber;
        let tags = prober.tags(Path::new("/in/5.mp3")).await.unwrap();
        assert!(tags.is_empty());
    }
}
