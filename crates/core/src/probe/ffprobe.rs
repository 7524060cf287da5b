//! FFprobe-based prober implementation.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

use super::config::ProberConfig;
use super::error::ProbeError;
use super::traits::MediaProber;
use super::types::{AudioTags, ProbedMedia};

/// FFprobe-based prober implementation.
pub struct FfprobeProber {
    config: ProberConfig,
}

impl FfprobeProber {
    /// Creates a new prober with the given configuration.
    pub fn new(config: ProberConfig) -> Self {
        Self { config }
    }

    /// Creates a prober with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ProberConfig::default())
    }

    /// Parses ffprobe JSON output into ProbedMedia.
    fn parse_probe_output(path: &Path, output: &str) -> Result<ProbedMedia, ProbeError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: String,
            duration: Option<String>,
            size: Option<String>,
            tags: Option<ProbeTags>,
        }

        #[derive(Deserialize)]
        struct ProbeTags {
            title: Option<String>,
            artist: Option<String>,
        }

        let probe: ProbeOutput = serde_json::from_str(output)
            .map_err(|e| ProbeError::parse_error(path, e.to_string()))?;

        let duration_secs = probe
            .format
            .duration
            .as_ref()
            .and_then(|d| d.parse::<f64>().ok())
            .ok_or_else(|| ProbeError::parse_error(path, "no duration in probe output"))?;

        let size_bytes = probe
            .format
            .size
            .as_ref()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        let format = probe
            .format
            .format_name
            .split(',')
            .next()
            .unwrap_or("unknown")
            .to_string();

        let tags = probe
            .format
            .tags
            .map(|t| AudioTags {
                title: t.title.filter(|s| !s.is_empty()),
                artist: t.artist.filter(|s| !s.is_empty()),
            })
            .unwrap_or_default();

        Ok(ProbedMedia {
            path: path.to_path_buf(),
            size_bytes,
            duration_secs,
            format,
            tags,
        })
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    fn name(&self) -> &str {
        "ffprobe"
    }

    async fn probe(&self, path: &Path) -> Result<ProbedMedia, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::probe_failed(path, "file not found"));
        }

        debug!("probing {:?}", path);

        let output = Command::new(&self.config.ffprobe_path)
            .args(["-v", "quiet", "-print_format", "json", "-show_format"])
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ProbeError::FfprobeNotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    ProbeError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ProbeError::probe_failed(
                path,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }
}
