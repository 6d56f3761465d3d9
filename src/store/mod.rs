//! Persistence layer for connection history.
//!
//! This module contains:
//! - [`HistoryLoader`] trait — whole-collection load/save contract
//! - [`HistoryStore`] — capped, ordered history on top of a loader
//! - [`MemoryLoader`] and (feature `file-storage`) [`FileHistoryLoader`]

mod history;
mod loader;
pub mod memory;

#[cfg(feature = "file-storage")]
pub mod file_backed;

pub use history::HistoryStore;
pub use loader::HistoryLoader;
pub use memory::MemoryLoader;

#[cfg(feature = "file-storage")]
pub use file_backed::FileHistoryLoader;
