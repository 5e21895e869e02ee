//! Fixture documents and the recorder that produces them.

pub mod format;
pub mod naming;
pub mod recorder;

pub use format::FixtureDocument;
pub use recorder::{FixtureRecorder, RecordError, RecordOutcome, SkipReason};
