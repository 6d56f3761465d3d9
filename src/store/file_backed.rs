//! File-backed history loader.
//!
//! Stores the whole history as one pretty-printed JSON document, by default
//! at `~/.connection-history/history.json`.

use crate::error::HistoryError;
use crate::store::HistoryLoader;
use crate::types::HistoryEntryList;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Default directory under the user's home.
pub const DEFAULT_DIR_NAME: &str = ".connection-history";
/// Default history file name.
pub const DEFAULT_FILE_NAME: &str = "history.json";

/// File-backed implementation of [`HistoryLoader`].
pub struct FileHistoryLoader {
    path: PathBuf,
}

impl FileHistoryLoader {
    /// Loader for the default location (`~/.connection-history/history.json`).
    pub fn new_default() -> Result<Self, HistoryError> {
        Ok(Self::new(default_history_path()?))
    }

    /// Loader for a custom file path. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// Resolve `~/.connection-history/history.json`.
pub fn default_history_path() -> Result<PathBuf, HistoryError> {
    let home = dirs::home_dir()
        .ok_or_else(|| HistoryError::Config("could not determine home directory".into()))?;
    Ok(home.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME))
}

#[async_trait]
impl HistoryLoader for FileHistoryLoader {
    async fn load(&self) -> Result<HistoryEntryList, HistoryError> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no history file yet");
                return Ok(HistoryEntryList::new());
            }
            Err(e) => {
                return Err(HistoryError::Storage(format!("failed to stat history file: {}", e)));
            }
        }

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| HistoryError::Storage(format!("failed to read history file: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(HistoryEntryList::new());
        }

        serde_json::from_str(&content)
            .map_err(|e| HistoryError::Storage(format!("failed to parse history file: {}", e)))
    }

    async fn save(&mut self, list: &HistoryEntryList) -> Result<(), HistoryError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                HistoryError::Storage(format!("failed to create history dir: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(list)
            .map_err(|e| HistoryError::Storage(format!("failed to serialize history: {}", e)))?;

        // Write then rename so a failed write leaves the previous file intact.
        let tmp = self.temp_path();
        tokio::fs::write(&tmp, content)
            .await
            .map_err(|e| HistoryError::Storage(format!("failed to write history file: {}", e)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| HistoryError::Storage(format!("failed to replace history file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistoryEntry;

    fn temp_history_dir() -> PathBuf {
        std::env::temp_dir().join(format!("connection-history-test-{}", rand::random::<u32>()))
    }

    #[tokio::test]
    async fn test_file_loader_missing_file_is_empty() {
        let temp_dir = temp_history_dir();
        let loader = FileHistoryLoader::new(temp_dir.join("history.json"));

        let list = loader.load().await.unwrap();
        assert!(list.is_empty());
        assert!(tokio::fs::metadata(&temp_dir).await.is_err());
    }

    #[tokio::test]
    async fn test_file_loader_lifecycle() {
        let temp_dir = temp_history_dir();
        let path = temp_dir.join("nested").join("history.json");
        let mut loader = FileHistoryLoader::new(path.clone());

        let list = HistoryEntryList::from(vec![
            HistoryEntry::new("a", "eks", "arn:a"),
            HistoryEntry::new("b", "aks", "sub/b").with_alias("bee"),
        ]);
        loader.save(&list).await.unwrap();

        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded, list);

        // Overwrite replaces everything
        let shorter = HistoryEntryList::from(vec![list.items[1].clone()]);
        loader.save(&shorter).await.unwrap();
        let loaded = loader.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.items[0].name, "b");

        // No temp file left behind
        assert!(tokio::fs::metadata(loader.temp_path()).await.is_err());

        let _ = tokio::fs::remove_dir_all(temp_dir).await;
    }

    #[tokio::test]
    async fn test_file_loader_rejects_garbage() {
        let temp_dir = temp_history_dir();
        tokio::fs::create_dir_all(&temp_dir).await.unwrap();
        let path = temp_dir.join("history.json");
        tokio::fs::write(&path, "not valid json").await.unwrap();

        let loader = FileHistoryLoader::new(path);
        let result = loader.load().await;
        assert!(matches!(result, Err(HistoryError::Storage(_))));

        let _ = tokio::fs::remove_dir_all(temp_dir).await;
    }

    #[tokio::test]
    async fn test_file_loader_empty_file_is_empty() {
        let temp_dir = temp_history_dir();
        tokio::fs::create_dir_all(&temp_dir).await.unwrap();
        let path = temp_dir.join("history.json");
        tokio::fs::write(&path, "").await.unwrap();

        let loader = FileHistoryLoader::new(path);
        assert!(loader.load().await.unwrap().is_empty());

        let _ = tokio::fs::remove_dir_all(temp_dir).await;
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let loader = FileHistoryLoader::new("/var/lib/hist/history.json");
        assert_eq!(loader.temp_path(), PathBuf::from("/var/lib/hist/history.json.tmp"));
    }

    #[tokio::test]
    async fn test_file_loader_unreadable_path_is_storage_error() {
        let temp_dir = temp_history_dir();
        tokio::fs::create_dir_all(&temp_dir).await.unwrap();
        // A regular file where a directory is expected: stat fails, but not with NotFound.
        let blocker = temp_dir.join("blocker");
        tokio::fs::write(&blocker, "").await.unwrap();

        let loader = FileHistoryLoader::new(blocker.join("history.json"));
        let result = loader.load().await;
        assert!(matches!(result, Err(HistoryError::Storage(_))));

        let _ = tokio::fs::remove_dir_all(temp_dir).await;
    }
}
