//! Store configuration.

use crate::error::HistoryError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding [`HistoryConfig::max_items`].
pub const ENV_MAX_ITEMS: &str = "CONNECTION_HISTORY_MAX_ITEMS";
/// Environment variable overriding [`HistoryConfig::history_file`].
pub const ENV_HISTORY_FILE: &str = "CONNECTION_HISTORY_FILE";

/// Configuration for a history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entries kept.
    pub max_items: usize,
    /// History file. `None` means `~/.connection-history/history.json`.
    pub history_file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: 100,
            history_file: None,
        }
    }
}

impl HistoryConfig {
    /// Defaults, overridden by `CONNECTION_HISTORY_MAX_ITEMS` and
    /// `CONNECTION_HISTORY_FILE` when set.
    pub fn from_env() -> Result<Self, HistoryError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, HistoryError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_MAX_ITEMS) {
            config.max_items = raw.trim().parse().map_err(|e| {
                HistoryError::Config(format!(
                    "{} is not a valid count ({}): {}",
                    ENV_MAX_ITEMS, raw, e
                ))
            })?;
        }

        if let Some(path) = lookup(ENV_HISTORY_FILE).filter(|p| !p.is_empty()) {
            config.history_file = Some(PathBuf::from(path));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    pub fn with_history_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_file = Some(path.into());
        self
    }

    pub fn validate(&self) -> Result<(), HistoryError> {
        if self.max_items == 0 {
            return Err(HistoryError::Config("max_items must be at least 1".into()));
        }
        Ok(())
    }
}
