//! Filesystem provider seam.
//!
//! The store never performs I/O directly; it delegates to a [`FileSystem`]
//! implementation so tests and alternative backends can swap the provider
//! without touching store logic. [`TokioFs`] is the default, backed by
//! `tokio::fs`.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

/// One entry returned by [`FileSystem::read_dir`].
#[derive(Debug, Clone)]
pub struct DirEntry {
    /// File name of the entry (not the full path).
    pub name: OsString,
    /// Whether the entry is a regular file.
    pub is_file: bool,
}

/// Filesystem operations the store delegates to.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create the directory and all missing parents. Idempotent: succeeds
    /// silently when the directory already exists.
    async fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write UTF-8 text to a file, creating it or fully overwriting any
    /// prior contents.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Read the full text contents of a file. Fails if missing.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check whether a path exists.
    async fn try_exists(&self, path: &Path) -> io::Result<bool>;

    /// Delete a file.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// List the entries of a directory.
    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

/// Default provider backed by `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        fs::write(path, contents).await
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn try_exists(&self, path: &Path) -> io::Result<bool> {
        fs::try_exists(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path).await
    }

    async fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut read_dir = fs::read_dir(path).await?;
        let mut entries = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            let file_type = entry.file_type().await?;
            entries.push(DirEntry {
                name: entry.file_name(),
                is_file: file_type.is_file(),
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn create_dir_all_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/c");

        TokioFs.create_dir_all(&dir).await.unwrap();
        TokioFs.create_dir_all(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn read_dir_reports_file_kind() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("file.txt"), "x").unwrap();
        std::fs::create_dir(tmp.path().join("subdir")).unwrap();

        let entries = TokioFs.read_dir(tmp.path()).await.unwrap();
        assert_eq!(entries.len(), 2);

        let file = entries.iter().find(|e| e.name == "file.txt").unwrap();
        assert!(file.is_file);
        let dir = entries.iter().find(|e| e.name == "subdir").unwrap();
        assert!(!dir.is_file);
    }

    #[tokio::test]
    async fn write_overwrites_existing_contents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("entry");

        TokioFs.write(&path, "first").await.unwrap();
        TokioFs.write(&path, "second").await.unwrap();
        assert_eq!(TokioFs.read_to_string(&path).await.unwrap(), "second");
    }
}
