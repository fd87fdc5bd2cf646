//! Database configuration

use std::path::PathBuf;

/// Default checkpoint file, relative to the working directory
pub const DEFAULT_CHECKPOINT_FILE: &str = "db_meta.json";

/// Environment variable overriding the checkpoint path
pub const CHECKPOINT_PATH_ENV: &str = "LITEDB_PATH";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Where the checkpoint is read from and written to
    pub checkpoint_path: PathBuf,
    /// fsync the checkpoint before it replaces the previous one
    pub sync: bool,
    /// Write human-readable (indented) JSON
    pub pretty: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            checkpoint_path: PathBuf::from(DEFAULT_CHECKPOINT_FILE),
            sync: true,
            pretty: true,
        }
    }
}

impl DatabaseConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with the checkpoint path taken from `LITEDB_PATH`, if set
    pub fn from_env() -> Self {
        let config = Self::default();
        match std::env::var_os(CHECKPOINT_PATH_ENV) {
            Some(path) if !path.is_empty() => config.checkpoint_path(path),
            _ => config,
        }
    }

    /// Set the checkpoint path
    pub fn checkpoint_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.checkpoint_path = path.into();
        self
    }

    /// Set whether checkpoints are fsynced
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Set whether checkpoints are pretty-printed
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}
