//! Store configuration and default locations.
//!
//! Configuration is injected at construction time; the store holds no
//! global mutable state. The default locations come from the platform
//! directory abstraction (`dirs`).

use std::path::PathBuf;

use serde::Deserialize;

/// Default subfolder name under the chosen location.
pub const DEFAULT_FOLDER: &str = "keyed-file-store";

// -----------------------------------------------------------------------------
// StoreConfig
// -----------------------------------------------------------------------------

/// Configuration for a [`KeyedFileStore`](crate::KeyedFileStore).
///
/// Immutable after construction; `location` and `folder` together determine
/// the base directory all entries live under.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base location the store folder is created under.
    #[serde(default = "default_location")]
    pub location: PathBuf,
    /// Subfolder name under the location.
    #[serde(default = "default_folder")]
    pub folder: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            folder: default_folder(),
        }
    }
}

fn default_location() -> PathBuf {
    default_document_dir()
}

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

// -----------------------------------------------------------------------------
// Default locations
// -----------------------------------------------------------------------------

/// Durable application data directory.
///
/// Falls back to the process working directory when the platform reports
/// none, so store construction cannot fail. The fallback must be absolute:
/// a relative `.` would be dropped during base-directory normalization and
/// leave the store rooted at the filesystem root.
pub fn default_document_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"))
}

/// Purgeable cache directory.
///
/// Entries placed here may be removed by the platform under storage
/// pressure. Same fallback behavior as [`default_document_dir`].
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("/"))
}
