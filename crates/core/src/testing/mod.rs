//! Mock implementations of the external seams for testing.
//!
//! Both mocks are cheaply cloneable; clones share recorded state, so a
//! test can keep a handle for assertions after moving a clone into the
//! orchestrator.

mod mock_prober;
mod mock_transcoder;

pub use mock_prober::MockProber;
pub use mock_transcoder::MockTranscoder;
