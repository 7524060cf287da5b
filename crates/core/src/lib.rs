pub mod chapters;
pub mod command;
pub mod config;
pub mod orchestrator;
pub mod probe;
pub mod source;
pub mod testing;
pub mod transcoder;
pub mod validate;

pub use chapters::{
    build_chapters, render_ffmetadata, ChapterEntry, ChapterError, ChapterWriter,
    ChapterWriterConfig, MetadataDocument,
};
pub use command::build_transcode_args;
pub use config::{load_config, load_config_from_str, Config, ConfigError};
pub use orchestrator::{
    ConversionEvent, ConversionOrchestrator, ConversionRequest, ConversionState, OrchestratorError,
};
pub use probe::{AudioTags, FfprobeProber, MediaProber, ProbeError, ProbedMedia, ProberConfig};
pub use source::{dedupe_sources, AudioSource};
pub use transcoder::{FfmpegTranscoder, Transcoder, TranscoderConfig, TranscoderError};
pub use validate::{validate_inputs, ValidationError};
