//! Error types for the connection history store.
//!
//! No `anyhow` leakage. Explicit, typed errors.

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("history entry not found: {0}")]
    NotFound(String),

    #[error("no entries in history")]
    NoEntries,

    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl HistoryError {
    /// Whether this error means the requested entry (or any entry) is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, HistoryError::NotFound(_) | HistoryError::NoEntries)
    }

    /// Wrap a loader failure with the operation that triggered it.
    ///
    /// Storage errors keep their original message so context nests instead
    /// of repeating the `storage error:` prefix.
    pub(crate) fn context(self, what: &str) -> Self {
        match self {
            HistoryError::Storage(msg) => HistoryError::Storage(format!("{}: {}", what, msg)),
            other => HistoryError::Storage(format!("{}: {}", what, other)),
        }
    }
}
