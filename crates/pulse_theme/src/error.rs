//! Theme error types

use std::path::PathBuf;

use thiserror::Error;

/// Durable storage failures
///
/// The preference store never surfaces these to its callers; they are
/// logged and the in-memory state stays authoritative.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem or OS-level I/O failure
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (unavailable, quota, injected failure)
    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Theme-related errors
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The theme context was read outside of any `ThemeProvider` scope
    #[error("use_theme must be used within a ThemeProvider")]
    OutsideProvider,

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Config file could not be read
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML or has unexpected fields
    #[error("failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid color scheme '{0}' (expected 'light' or 'dark')")]
    InvalidColorScheme(String),

    #[error("invalid appearance '{0}' (expected 'light', 'dark' or 'no-preference')")]
    InvalidAppearance(String),
}

/// Result type for theme operations
pub type Result<T> = std::result::Result<T, ThemeError>;
