//! The keyed file store.
//!
//! Each key maps to exactly one file at `base_dir/encode(key)`. Values are
//! opaque text. Operations are single-shot against the filesystem provider:
//! no retries, no internal locking, no partial-completion semantics.
//! Concurrent calls against the same key resolve however the provider
//! resolves them; callers needing read-modify-write atomicity must
//! serialize at a higher layer.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::fs::{FileSystem, TokioFs};
use crate::paths;

/// File-per-key store under one base directory.
///
/// Construction performs no I/O and cannot fail; the base directory is
/// created lazily (and idempotently) on the first write or listing.
#[derive(Debug, Clone)]
pub struct KeyedFileStore<F = TokioFs> {
    base_dir: PathBuf,
    fs: F,
}

impl KeyedFileStore<TokioFs> {
    /// Create a store at the default location and folder.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create a store from configuration, backed by `tokio::fs`.
    pub fn with_config(config: StoreConfig) -> Self {
        Self::with_fs(config, TokioFs)
    }
}

impl Default for KeyedFileStore<TokioFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> KeyedFileStore<F> {
    /// Create a store from configuration with an injected filesystem
    /// provider.
    pub fn with_fs(config: StoreConfig, fs: F) -> Self {
        let base_dir = PathBuf::from(paths::resolve_path(&[
            config.location.to_string_lossy().as_ref(),
            config.folder.as_str(),
        ]));
        Self { base_dir, fs }
    }

    /// The resolved directory all entries live under.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for_key(&self, key: &str) -> PathBuf {
        paths::path_for_key(&self.base_dir, key)
    }

    /// Store `value` under `key`, fully overwriting any prior contents.
    ///
    /// The empty key is not storable: its path resolves to the base
    /// directory itself, so the write fails with an IO error.
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_base_dir().await?;

        let path = self.path_for_key(key);
        self.fs
            .write(&path, value)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!(key = %key, path = %path.display(), "Wrote entry");
        Ok(())
    }

    /// Fetch the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key was never set; absence is not an
    /// error.
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for_key(key);

        let exists = self
            .fs
            .try_exists(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        if !exists {
            return Ok(None);
        }

        let contents = self
            .fs
            .read_to_string(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        Ok(Some(contents))
    }

    /// Remove the entry for `key`.
    ///
    /// Idempotent: removing a key that was never set (or already removed)
    /// succeeds as a no-op.
    pub async fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.path_for_key(key);

        let exists = self
            .fs
            .try_exists(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;
        if !exists {
            return Ok(());
        }

        self.fs
            .remove_file(&path)
            .await
            .map_err(|e| StoreError::io(&path, e))?;

        debug!(key = %key, path = %path.display(), "Removed entry");
        Ok(())
    }

    /// List every key currently stored.
    ///
    /// Order follows the underlying directory listing; no ordering is
    /// guaranteed. Subdirectories and entries whose names do not decode to
    /// a valid key are skipped.
    pub async fn get_all_keys(&self) -> Result<Vec<String>> {
        self.ensure_base_dir().await?;

        let entries = self
            .fs
            .read_dir(&self.base_dir)
            .await
            .map_err(|e| StoreError::io(&self.base_dir, e))?;

        let mut keys = Vec::new();
        for entry in entries {
            if !entry.is_file {
                continue;
            }
            let Some(name) = entry.name.to_str() else {
                warn!(
                    dir = %self.base_dir.display(),
                    name = %entry.name.to_string_lossy(),
                    "Skipping entry with non-UTF-8 name"
                );
                continue;
            };
            match paths::decode_key(name) {
                // Only canonical encodings are entries of this store; a
                // name that decodes but re-encodes differently was placed
                // by another process and cannot be retrieved by its
                // decoded key.
                Some(key) if paths::encode_key(&key) == name => keys.push(key),
                _ => {
                    warn!(
                        dir = %self.base_dir.display(),
                        name = %name,
                        "Skipping foreign entry"
                    );
                }
            }
        }

        debug!(dir = %self.base_dir.display(), count = keys.len(), "Listed keys");
        Ok(keys)
    }

    async fn ensure_base_dir(&self) -> Result<()> {
        self.fs
            .create_dir_all(&self.base_dir)
            .await
            .map_err(|e| StoreError::io(&self.base_dir, e))
    }
}
