//! Keyed file store - file-per-key storage for persistence layers.
//!
//! Maps arbitrary string keys to individual files under one base directory.
//! Keys are percent-encoded into file names, so any key (separators, spaces,
//! unicode) stores safely and round-trips through a directory listing.
//!
//! The store itself is glue: it resolves a safe path for each key and
//! delegates the physical I/O to a [`FileSystem`] provider, [`TokioFs`] by
//! default.

pub mod callback;
pub mod config;
pub mod error;
pub mod fs;
pub mod paths;
pub mod store;

pub use config::{default_cache_dir, default_document_dir, StoreConfig};
pub use error::{Result, StoreError};
pub use fs::{DirEntry, FileSystem, TokioFs};
pub use store::KeyedFileStore;
