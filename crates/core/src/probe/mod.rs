//! Media probing: per-file durations and embedded tags.
//!
//! The pipeline needs one number per input file (its duration in seconds)
//! before chapters can be laid out, and the shell wants embedded
//! title/artist tags to pre-fill its form fields. Both come from the same
//! external probing capability, reached through the [`MediaProber`] trait.

mod config;
mod error;
mod ffprobe;
mod traits;
mod types;

pub use config::ProberConfig;
pub use error::ProbeError;
pub use ffprobe::FfprobeProber;
pub use traits::MediaProber;
pub use types::{AudioTags, ProbedMedia};
