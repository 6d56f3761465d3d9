//! [`HistoryLoader`] trait definition.

use crate::error::HistoryError;
use crate::types::HistoryEntryList;
use async_trait::async_trait;

/// Whole-collection persistence for the history store.
///
/// Implementations can use any backend (memory, a file, object storage).
/// There are no partial reads or writes: `load` returns everything and
/// `save` replaces everything.
///
/// # Example
///
/// ```ignore
/// use connection_history::store::HistoryLoader;
///
/// struct MyLoader { /* ... */ }
///
/// #[async_trait]
/// impl HistoryLoader for MyLoader {
///     async fn load(&self) -> Result<HistoryEntryList, HistoryError> {
///         // Read the full list from your backend
///     }
///
///     async fn save(&mut self, list: &HistoryEntryList) -> Result<(), HistoryError> {
///         // Replace the stored list
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait HistoryLoader: Send + Sync {
    /// Load the full collection. A backend with nothing stored yet returns an empty list.
    async fn load(&self) -> Result<HistoryEntryList, HistoryError>;

    /// Persist the full collection, replacing prior contents.
    async fn save(&mut self, list: &HistoryEntryList) -> Result<(), HistoryError>;
}
