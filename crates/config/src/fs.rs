//! Filesystem collaborator.
//!
//! The manager only needs two capabilities from the filesystem: an existence
//! probe and a whole-file UTF-8 read. Keeping them behind a trait lets tests
//! run discovery against an in-memory tree.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Read-only view of the filesystem used during env file discovery.
pub trait Filesystem: Send + Sync {
    /// Returns true if a regular file exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file as UTF-8 text.
    fn read_text(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFilesystem;

impl Filesystem for OsFilesystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory filesystem keyed by absolute path.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_filesystem_reads_registered_files() {
        let fs = MemoryFilesystem::new().with_file("/app/.env", "A=1");
        assert!(fs.exists(Path::new("/app/.env")));
        assert!(!fs.exists(Path::new("/app/.env.local")));
        assert_eq!(fs.read_text(Path::new("/app/.env")).unwrap(), "A=1");

        let err = fs.read_text(Path::new("/missing")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_os_filesystem_treats_directories_as_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(!OsFilesystem.exists(dir.path()));

        let file = dir.path().join(".env");
        std::fs::write(&file, "KEY=value\n").unwrap();
        assert!(OsFilesystem.exists(&file));
        assert_eq!(OsFilesystem.read_text(&file).unwrap(), "KEY=value\n");
    }
}
