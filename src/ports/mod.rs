//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the recording core and an
//! external system (time, storage). Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;

pub use clock::Clock;
pub use filesystem::{FileSystem, WriteOutcome};
