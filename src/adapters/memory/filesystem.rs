//! In-memory filesystem adapter.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::ports::filesystem::{FileSystem, WriteOutcome};

/// Filesystem kept entirely in memory.
///
/// Directories are implicit: a path is a directory when some stored file
/// lives beneath it.
#[derive(Default)]
pub struct MemoryFileSystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, replacing any previous content.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.lock().insert(path.into(), contents.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>> {
        // A panic while holding the lock cannot leave the map half-updated.
        self.files.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.lock()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no such file: {}", path.display()).into())
    }

    fn write_new(
        &self,
        dir: &Path,
        file_name: &str,
        contents: &str,
    ) -> Result<WriteOutcome, Box<dyn std::error::Error + Send + Sync>> {
        let path = dir.join(file_name);
        let mut files = self.lock();
        if files.contains_key(&path) {
            return Ok(WriteOutcome::AlreadyExists);
        }
        files.insert(path.clone(), contents.to_string());
        Ok(WriteOutcome::Written(path))
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock().keys().any(|stored| stored.starts_with(path))
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.lock();
        let mut names: Vec<String> = files
            .keys()
            .filter_map(|stored| stored.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| first.as_os_str().to_string_lossy().into_owned())
            .collect();
        if names.is_empty() {
            return Err(format!("not a directory: {}", path.display()).into());
        }
        names.sort();
        names.dedup();
        Ok(names)
    }
}
