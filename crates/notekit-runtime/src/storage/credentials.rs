use crate::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub const TOKEN_KEY: &str = "token";
pub const USER_INFO_KEY: &str = "userInfo";
pub const USER_ID_KEY: &str = "userId";
pub const USER_PHONE_KEY: &str = "userPhone";

/// Synchronous key-value storage for the session credential and cached user
/// info.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        lock(&store.entries).insert(TOKEN_KEY.to_string(), token.to_string());
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk, rewritten on every mutation.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileCredentialStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_roundtrip() -> Result<()> {
        let store = MemoryCredentialStore::new();
        assert!(store.get(TOKEN_KEY).is_none());

        store.set(TOKEN_KEY, "abc")?;
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("abc"));

        store.remove(TOKEN_KEY)?;
        assert!(store.get(TOKEN_KEY).is_none());
        Ok(())
    }

    #[test]
    fn test_file_store_survives_reopen() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("session.json");

        let store = FileCredentialStore::open(&path)?;
        store.set(TOKEN_KEY, "tok-1")?;
        store.set(USER_ID_KEY, "u1")?;
        drop(store);

        let reopened = FileCredentialStore::open(&path)?;
        assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("tok-1"));

        reopened.remove(TOKEN_KEY)?;
        let again = FileCredentialStore::open(&path)?;
        assert!(again.get(TOKEN_KEY).is_none());
        assert_eq!(again.get(USER_ID_KEY).as_deref(), Some("u1"));
        Ok(())
    }
}
