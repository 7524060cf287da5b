//! Chapter metadata synthesis.
//!
//! Turns an ordered file list plus per-file durations into a chaptered
//! FFMETADATA document, the side-channel input the transcoder parses to
//! embed chapter markers in the output container. The document layout
//! (header, field order, millisecond timebase) is a wire contract.

mod config;
mod error;
mod synth;
mod writer;

pub use config::ChapterWriterConfig;
pub use error::ChapterError;
pub use synth::{build_chapters, render_ffmetadata, ChapterEntry};
pub use writer::{ChapterWriter, MetadataDocument};
