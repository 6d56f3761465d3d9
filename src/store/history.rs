//! [`HistoryStore`] — bounded, ordered connection history.
//!
//! Every call reloads the collection from the loader. Mutations rewrite the
//! whole collection; a mutation that fails never reaches `save`.

use crate::error::HistoryError;
use crate::store::HistoryLoader;
use crate::types::{HistoryEntry, HistoryEntryList};

/// Capped history of connections, oldest first.
pub struct HistoryStore<L: HistoryLoader> {
    max_items: usize,
    loader: L,
}

impl<L: HistoryLoader> HistoryStore<L> {
    /// Create a store that keeps at most `max_items` entries.
    pub fn new(max_items: usize, loader: L) -> Result<Self, HistoryError> {
        if max_items == 0 {
            return Err(HistoryError::Config("max_items must be at least 1".into()));
        }

        Ok(Self { max_items, loader })
    }

    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Borrow the underlying loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Record a connection.
    ///
    /// An entry whose name is already present leaves the history exactly as
    /// it was. New entries are appended, then the oldest entries are dropped
    /// until the history fits `max_items`.
    pub async fn add(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut list = self.load().await?;

        if list.iter().any(|e| e.same_identity(&entry)) {
            tracing::debug!(name = %entry.name, "entry already in history");
        } else {
            tracing::debug!(name = %entry.name, "appending entry to history");
            list.items.push(entry);
        }

        if list.len() > self.max_items {
            let evicted = list.len() - self.max_items;
            list.items.drain(..evicted);
            tracing::debug!(evicted, max_items = self.max_items, "evicted oldest entries");
        }

        self.save(&list).await
    }

    /// Remove entries by name. All-or-nothing: if any name is missing
    /// nothing is saved.
    pub async fn remove(&mut self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if entries.is_empty() {
            return Err(HistoryError::InvalidInput("no entries to remove".into()));
        }

        let mut list = self.load().await?;
        if list.is_empty() {
            tracing::warn!("remove requested on empty history");
            return Err(HistoryError::NotFound("history is empty".into()));
        }

        for entry in entries {
            match list.items.iter().position(|e| e.same_identity(entry)) {
                Some(idx) => {
                    list.items.remove(idx);
                }
                None => {
                    tracing::warn!(name = %entry.name, "remove target not in history");
                    return Err(HistoryError::NotFound(entry.name.clone()));
                }
            }
        }

        self.save(&list).await
    }

    /// The entry with the newest `last_updated`. Ties go to the earliest entry.
    pub async fn get_last_modified(&self) -> Result<HistoryEntry, HistoryError> {
        let list = self.load().await?;

        let mut latest: Option<&HistoryEntry> = None;
        for entry in &list {
            match latest {
                Some(current) if current.status.last_updated >= entry.status.last_updated => {}
                _ => latest = Some(entry),
            }
        }

        latest.cloned().ok_or(HistoryError::NoEntries)
    }

    /// Full history in stored order.
    pub async fn get_all(&self) -> Result<HistoryEntryList, HistoryError> {
        self.load().await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        let list = self.load().await?;
        Ok(list.items.into_iter().find(|e| e.name == name))
    }

    pub async fn get_by_alias(&self, alias: &str) -> Result<Option<HistoryEntry>, HistoryError> {
        let list = self.load().await?;
        Ok(list
            .items
            .into_iter()
            .find(|e| e.spec.alias.as_deref() == Some(alias)))
    }

    /// Entries made through one provider, in stored order.
    pub async fn get_by_provider(&self, provider: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let list = self.load().await?;
        Ok(list
            .items
            .into_iter()
            .filter(|e| e.spec.provider == provider)
            .collect())
    }

    /// Most recently used first. Equal timestamps keep stored order.
    pub async fn get_all_sorted_by_last_used(&self) -> Result<HistoryEntryList, HistoryError> {
        let mut list = self.load().await?;
        list.items.sort_by(|a, b| b.status.last_updated.cmp(&a.status.last_updated));
        Ok(list)
    }

    /// Mark an existing entry as used now.
    pub async fn touch(&mut self, name: &str) -> Result<(), HistoryError> {
        let mut list = self.load().await?;
        let idx = list
            .position(name)
            .ok_or_else(|| HistoryError::NotFound(name.to_string()))?;
        list.items[idx].touch();
        self.save(&list).await
    }

    /// Give an existing entry an alias. Aliases are unique across the history.
    pub async fn set_alias(&mut self, name: &str, alias: &str) -> Result<(), HistoryError> {
        let mut list = self.load().await?;
        let idx = list
            .position(name)
            .ok_or_else(|| HistoryError::NotFound(name.to_string()))?;

        let taken = list
            .iter()
            .any(|e| e.name != name && e.spec.alias.as_deref() == Some(alias));
        if taken {
            return Err(HistoryError::InvalidInput(format!("alias {} is already in use", alias)));
        }

        list.items[idx].spec.alias = Some(alias.to_string());
        self.save(&list).await
    }

    async fn load(&self) -> Result<HistoryEntryList, HistoryError> {
        let list = self
            .loader
            .load()
            .await
            .map_err(|e| e.context("failed to load history"))?;
        tracing::debug!(entries = list.len(), "loaded history");
        Ok(list)
    }

    async fn save(&mut self, list: &HistoryEntryList) -> Result<(), HistoryError> {
        self.loader
            .save(list)
            .await
            .map_err(|e| e.context("failed to save history"))?;
        tracing::debug!(entries = list.len(), "saved history");
        Ok(())
    }
}

#[cfg(feature = "file-storage")]
impl HistoryStore<crate::store::FileHistoryLoader> {
    /// Build a file-backed store from configuration.
    pub fn from_config(config: &crate::config::HistoryConfig) -> Result<Self, HistoryError> {
        config.validate()?;
        let loader = match &config.history_file {
            Some(path) => crate::store::FileHistoryLoader::new(path.clone()),
            None => crate::store::FileHistoryLoader::new_default()?,
        };
        Self::new(config.max_items, loader)
    }
}
