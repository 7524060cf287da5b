//! Transcoder seam: the external process that does the actual encode.
//!
//! The pipeline never decodes or encodes audio itself; it hands a fully
//! synthesized argument list to an ffmpeg subprocess and relays that
//! process's output, line by line, to whoever is listening.

mod config;
mod error;
mod ffmpeg;
mod traits;

pub use config::TranscoderConfig;
pub use error::TranscoderError;
pub use ffmpeg::FfmpegTranscoder;
pub use traits::Transcoder;
