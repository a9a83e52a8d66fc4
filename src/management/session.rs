use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("session storage contains invalid JSON: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Keyed string storage holding the credential material of one login
/// session. The credential manager is written against this trait so that
/// tests can swap the file-backed store for an in-memory one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent or the
    /// backing storage is unreadable.
    async fn get(&self, key: &str) -> Option<String>;

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;

    async fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Session store persisted as a single JSON object in the local data
/// directory, so a login survives across CLI invocations.
pub struct FileSessionStore {
    path: PathBuf,
    // serializes read-modify-write cycles on the backing file
    guard: Mutex<()>,
}

impl FileSessionStore {
    pub fn new() -> Self {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("jamcli/cache/session.json");
        Self::at(path)
    }

    pub fn at(path: PathBuf) -> Self {
        FileSessionStore {
            path,
            guard: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> HashMap<String, String> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => HashMap::new(),
        }
    }

    async fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        let _guard = self.guard.lock().await;
        self.read_all().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let _guard = self.guard.lock().await;
        let mut entries = self.read_all().await;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        let _guard = self.guard.lock().await;
        let mut entries = self.read_all().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries).await
    }
}

/// Volatile session store; state is gone when the process exits.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
