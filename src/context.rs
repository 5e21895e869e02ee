//! Service context bundling the port trait objects.

use chrono::{DateTime, Utc};

use crate::adapters::live::{DiskFileSystem, SystemClock};
use crate::adapters::memory::{FixedClock, MemoryFileSystem};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;

/// Bundles the external boundaries the recorder depends on.
///
/// Constructors wire up different adapter implementations (live, in-memory).
pub struct ServiceContext {
    /// Clock used for `recorded_at` stamps.
    pub clock: Box<dyn Clock>,
    /// Storage for fixture documents.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(clock: Box<dyn Clock>, fs: Box<dyn FileSystem>) -> Self {
        Self { clock, fs }
    }

    /// Creates a live context backed by the system clock and the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(SystemClock), Box::new(DiskFileSystem))
    }

    /// Creates a context that keeps every write in memory.
    ///
    /// Used for dry runs: the full pipeline runs but nothing reaches disk.
    #[must_use]
    pub fn in_memory(now: DateTime<Utc>) -> Self {
        Self::new(Box::new(FixedClock::new(now)), Box::new(MemoryFileSystem::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn in_memory_context_is_isolated_from_disk() {
        let now: DateTime<Utc> = "2025-02-01T00:00:00Z".parse().unwrap();
        let ctx = ServiceContext::in_memory(now);
        let dir = std::env::temp_dir().join("fixturecap_context_never_written");

        ctx.fs.write_new(&dir, "a.json", "{}").unwrap();

        assert_eq!(ctx.clock.now(), now);
        assert!(ctx.fs.exists(&dir.join("a.json")));
        assert!(!Path::new(&dir).exists());
    }
}
