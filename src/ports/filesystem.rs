//! Filesystem port for fixture storage.

use std::path::{Path, PathBuf};

/// Result of a create-exclusive write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Written(PathBuf),
    /// A file was already present at the target; nothing was written.
    AlreadyExists,
}

/// Provides filesystem access for reading and persisting fixtures.
///
/// Abstracting the filesystem keeps the recorder testable without touching
/// the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes `contents` to `dir/file_name`, creating `dir` if absent.
    ///
    /// Never overwrites: an existing file yields [`WriteOutcome::AlreadyExists`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the write fails.
    fn write_new(
        &self,
        dir: &Path,
        file_name: &str,
        contents: &str,
    ) -> Result<WriteOutcome, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Lists the entry names in a directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
