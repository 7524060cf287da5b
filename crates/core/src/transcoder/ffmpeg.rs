//! FFmpeg-based transcoder implementation.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscoderError;
use super::traits::Transcoder;

/// FFmpeg-based transcoder implementation.
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a new FFmpeg transcoder with the given configuration.
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Creates a transcoder with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(TranscoderConfig::default())
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn run(
        &self,
        args: &[String],
        line_tx: mpsc::UnboundedSender<String>,
    ) -> Result<(), TranscoderError> {
        debug!("running ffmpeg with {} args", args.len());

        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    TranscoderError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    TranscoderError::Io(e)
                }
            })?;

        let stdout = child.stdout.take().expect("stdout should be captured");
        let stderr = child.stderr.take().expect("stderr should be captured");

        // stdout is relayed from its own task; stderr is read here so the
        // last diagnostic line is in hand when the process exits.
        let stdout_tx = line_tx.clone();
        let stdout_task = tokio::spawn(async move {
            let mut reader = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = reader.next_line().await {
                let _ = stdout_tx.send(line);
            }
        });

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let result = timeout(timeout_duration, async {
            let mut last_line = None;
            let mut reader = BufReader::new(stderr).lines();

            while let Ok(Some(line)) = reader.next_line().await {
                if !line.trim().is_empty() {
                    last_line = Some(line.clone());
                }
                let _ = line_tx.send(line);
            }

            let status = child.wait().await?;
            Ok::<(std::process::ExitStatus, Option<String>), std::io::Error>((status, last_line))
        })
        .await;

        match result {
            Ok(Ok((status, last_line))) => {
                let _ = stdout_task.await;
                if status.success() {
                    Ok(())
                } else {
                    Err(TranscoderError::ExitFailure {
                        code: status.code(),
                        last_line,
                    })
                }
            }
            Ok(Err(e)) => {
                let _ = child.kill().await;
                stdout_task.abort();
                Err(TranscoderError::Io(e))
            }
            Err(_) => {
                let _ = child.kill().await;
                stdout_task.abort();
                Err(TranscoderError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                })
            }
        }
    }

    async fn validate(&self) -> Result<(), TranscoderError> {
        let result = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TranscoderError::FfmpegNotFound {
                    path: self.config.ffmpeg_path.clone(),
                })
            }
            Err(e) => Err(TranscoderError::Io(e)),
        }
    }
}
