//! In-memory loader.
//!
//! Handles are cheap clones over shared state, so a test can keep one handle
//! to inspect what the store saved while the store owns another.

use crate::error::HistoryError;
use crate::store::HistoryLoader;
use crate::types::HistoryEntryList;
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct MemoryState {
    list: HistoryEntryList,
    saves: usize,
    fail_load: bool,
    fail_save: bool,
}

/// Loader that keeps the history in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing collection.
    pub fn with_list(list: HistoryEntryList) -> Self {
        let loader = Self::default();
        loader.lock().list = list;
        loader
    }

    /// Current stored collection.
    pub fn snapshot(&self) -> HistoryEntryList {
        self.lock().list.clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Make every subsequent `load` fail.
    pub fn failing_load(self, fail: bool) -> Self {
        self.lock().fail_load = fail;
        self
    }

    /// Make every subsequent `save` fail.
    pub fn failing_save(self, fail: bool) -> Self {
        self.lock().fail_save = fail;
        self
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HistoryLoader for MemoryLoader {
    async fn load(&self) -> Result<HistoryEntryList, HistoryError> {
        let state = self.lock();
        if state.fail_load {
            return Err(HistoryError::Storage("memory loader: load disabled".into()));
        }
        Ok(state.list.clone())
    }

    async fn save(&mut self, list: &HistoryEntryList) -> Result<(), HistoryError> {
        let mut state = self.lock();
        if state.fail_save {
            return Err(HistoryError::Storage("memory loader: save disabled".into()));
        }
        state.list = list.clone();
        state.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryEntry;

    #[tokio::test]
    async fn test_memory_loader_roundtrip() {
        let mut loader = MemoryLoader::new();
        assert!(loader.load().await.unwrap().is_empty());

        let list = HistoryEntryList::from(vec![HistoryEntry::new("a", "eks", "a")]);
        loader.save(&list).await.unwrap();

        assert_eq!(loader.load().await.unwrap(), list);
        assert_eq!(loader.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_loader_clones_share_state() {
        let observer = MemoryLoader::new();
        let mut writer = observer.clone();

        let list = HistoryEntryList::from(vec![HistoryEntry::new("a", "eks", "a")]);
        writer.save(&list).await.unwrap();

        assert_eq!(observer.snapshot(), list);
        assert_eq!(observer.save_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_loader_failures() {
        let mut loader = MemoryLoader::new().failing_load(true).failing_save(true);
        assert!(matches!(loader.load().await, Err(HistoryError::Storage(_))));
        assert!(matches!(
            loader.save(&HistoryEntryList::new()).await,
            Err(HistoryError::Storage(_))
        ));
        assert_eq!(loader.save_count(), 0);
    }
}
