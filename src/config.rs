//! Solver configuration.

use crate::search::DEFAULT_DEPTH;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Configuration for the solver binary.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Where the memo table is persisted.
    #[serde(default = "default_cache_path")]
    cache_path: PathBuf,

    /// Depth of the fallback search used on memo misses.
    #[serde(default = "default_search_depth")]
    search_depth: u8,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("tictactoe_cache.json")
}

fn default_search_depth() -> u8 {
    DEFAULT_DEPTH
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            search_depth: default_search_depth(),
        }
    }
}

impl SolverConfig {
    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        if config.search_depth == 0 {
            return Err(ConfigError::new("search_depth must be at least 1"));
        }

        info!(cache_path = %config.cache_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the cache path.
    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = cache_path.into();
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.cache_path(), &PathBuf::from("tictactoe_cache.json"));
        assert_eq!(*config.search_depth(), 9);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cache_path = \"memo/table.json\"").unwrap();
        let config = SolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cache_path(), &PathBuf::from("memo/table.json"));
        assert_eq!(*config.search_depth(), 9);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "search_depth = 0").unwrap();
        let err = SolverConfig::from_file(file.path()).unwrap_err();
        assert!(err.message.contains("search_depth"));
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = SolverConfig::from_file("/nonexistent/strictly_minimax.toml");
        assert!(result.is_err());
    }
}
