//! Connection History Library
//!
//! A capped, ordered history of connections, persisted through a pluggable
//! loader.
//!
//! # Design
//!
//! The store holds no state between calls. Every operation loads the whole
//! history from a [`HistoryLoader`], works on it in memory, and (for
//! mutations) saves the whole history back. You implement the loader for
//! your backend, or use [`FileHistoryLoader`] / [`MemoryLoader`].
//!
//! # Usage
//!
//! ```ignore
//! use connection_history::{FileHistoryLoader, HistoryEntry, HistoryStore};
//!
//! let loader = FileHistoryLoader::new_default()?;
//! let mut store = HistoryStore::new(100, loader)?;
//!
//! store.add(HistoryEntry::new("dev", "eks", "arn:aws:eks:eu-west-1:123:cluster/dev")).await?;
//! let latest = store.get_last_modified().await?;
//! println!("last used: {}", latest.name);
//! ```

pub mod config;
pub mod error;
pub mod store;
pub mod types;

pub use config::HistoryConfig;
pub use error::HistoryError;
#[cfg(feature = "file-storage")]
pub use store::FileHistoryLoader;
pub use store::{HistoryLoader, HistoryStore, MemoryLoader};
pub use types::{HistoryEntry, HistoryEntryList, HistoryEntrySpec, HistoryEntryStatus};
