//! History entry types.
//!
//! An entry is the persisted record of one connection made through a
//! provider. The store only cares about `name` (identity) and
//! `status.last_updated` (recency); everything else is provider payload
//! carried through untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Provider-specific description of a connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntrySpec {
    /// Provider that made the connection (e.g. `eks`, `aks`).
    pub provider: String,
    /// Provider's own identifier for the connected target.
    pub provider_id: String,
    /// Identity provider used to authenticate.
    #[serde(default)]
    pub identity: String,
    /// Optional user-chosen short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Config file the connection was written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    /// Flags the connection was made with.
    #[serde(default)]
    pub flags: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryStatus {
    /// Unix timestamp of the last time this connection was used.
    pub last_updated: u64,
}

/// One tracked connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Unique identifier. Two entries are the same connection iff their names match.
    pub name: String,
    /// Unix timestamp of creation.
    pub created_at: u64,
    pub spec: HistoryEntrySpec,
    #[serde(default)]
    pub status: HistoryEntryStatus,
}

impl HistoryEntry {
    /// Create a new entry stamped with the current time.
    pub fn new(
        name: impl Into<String>,
        provider: impl Into<String>,
        provider_id: impl Into<String>,
    ) -> Self {
        let now = current_unix_time();

        Self {
            name: name.into(),
            created_at: now,
            spec: HistoryEntrySpec {
                provider: provider.into(),
                provider_id: provider_id.into(),
                ..Default::default()
            },
            status: HistoryEntryStatus { last_updated: now },
        }
    }

    /// Set the identity provider.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.spec.identity = identity.into();
        self
    }

    /// Set the alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.spec.alias = Some(alias.into());
        self
    }

    /// Record a flag used for the connection.
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.flags.insert(key.into(), value.into());
        self
    }

    /// Set the config file path.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.spec.config_file = Some(path.into());
        self
    }

    /// Override the last-updated timestamp.
    pub fn with_last_updated(mut self, last_updated: u64) -> Self {
        self.status.last_updated = last_updated;
        self
    }

    /// Whether `other` refers to the same connection.
    pub fn same_identity(&self, other: &HistoryEntry) -> bool {
        self.name == other.name
    }

    /// Mark the entry as used now.
    pub fn touch(&mut self) {
        self.status.last_updated = current_unix_time();
    }
}

/// The full ordered collection, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryList {
    #[serde(default)]
    pub items: Vec<HistoryEntry>,
}

impl HistoryEntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Position of the entry with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|e| e.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.items.iter()
    }
}

impl From<Vec<HistoryEntry>> for HistoryEntryList {
    fn from(items: Vec<HistoryEntry>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a HistoryEntryList {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

pub(crate) fn current_unix_time() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
