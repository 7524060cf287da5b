//! Conversion orchestrator.
//!
//! Drives one conversion attempt end to end:
//! validate → resolve durations → synthesize metadata and command →
//! run the transcoder → report the terminal result. Owns the single
//! source of truth for conversion state; observers receive every state
//! transition and every transcoder output line over an event channel.

mod runner;
mod types;

pub use runner::ConversionOrchestrator;
pub use types::{ConversionEvent, ConversionRequest, ConversionState, OrchestratorError};
