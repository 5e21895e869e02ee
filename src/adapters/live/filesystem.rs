//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use crate::ports::filesystem::{FileSystem, WriteOutcome};

/// Filesystem adapter backed by real disk I/O.
///
/// `write_new` opens with `create_new`, so the existence check and the
/// write are a single atomic step on the host filesystem.
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write_new(
        &self,
        dir: &Path,
        file_name: &str,
        contents: &str,
    ) -> Result<WriteOutcome, Box<dyn std::error::Error + Send + Sync>> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(file_name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Ok(WriteOutcome::AlreadyExists);
            }
            Err(err) => return Err(err.into()),
        };
        let written = file.write_all(contents.as_bytes()).and_then(|()| file.sync_all());
        drop(file);
        discard_on_error(&path, written)?;
        Ok(WriteOutcome::Written(path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

/// Removes a file claimed by `create_new` whose contents never landed, so
/// the name is free again for the next attempt.
fn discard_on_error(path: &Path, written: std::io::Result<()>) -> std::io::Result<()> {
    if written.is_err() {
        if let Err(err) = std::fs::remove_file(path) {
            tracing::warn!(path = %path.display(), %err, "failed to remove partial fixture");
        }
    }
    written
}
