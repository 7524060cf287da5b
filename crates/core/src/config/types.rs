use serde::{Deserialize, Serialize};

use crate::chapters::ChapterWriterConfig;
use crate::probe::ProberConfig;
use crate::transcoder::TranscoderConfig;

/// Root configuration.
///
/// Every section has working defaults: an empty file (or no file at all)
/// yields a usable configuration that expects `ffmpeg`/`ffprobe` on the
/// PATH and writes metadata documents under the OS temp directory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub probe: ProberConfig,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
    #[serde(default)]
    pub chapters: ChapterWriterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.probe.ffprobe_path, PathBuf::from("ffprobe"));
        assert_eq!(config.transcoder.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.transcoder.timeout_secs, 3600);
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let toml = r#"
[transcoder]
ffmpeg_path = "/opt/ffmpeg/bin/ffmpeg"
timeout_secs = 600

[chapters]
temp_dir = "/var/tmp/bookbinder"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.transcoder.ffmpeg_path,
            PathBuf::from("/opt/ffmpeg/bin/ffmpeg")
        );
        assert_eq!(config.transcoder.timeout_secs, 600);
        assert_eq!(config.chapters.temp_dir, PathBuf::from("/var/tmp/bookbinder"));
        // Untouched section keeps its default.
        assert_eq!(config.probe.ffprobe_path, PathBuf::from("ffprobe"));
    }
}
