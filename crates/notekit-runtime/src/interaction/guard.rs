use notekit_types::{InteractionKind, SubjectId};
use std::collections::HashSet;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// Set of keys with an operation in flight.
///
/// The lock is only held to insert or remove a key, never across an await.
#[derive(Debug)]
pub struct BusyRegistry<K = (SubjectId, InteractionKind)>
where
    K: Eq + Hash,
{
    keys: Arc<Mutex<HashSet<K>>>,
}

impl<K: Eq + Hash> Default for BusyRegistry<K> {
    fn default() -> Self {
        Self {
            keys: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

impl<K: Eq + Hash> Clone for BusyRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            keys: Arc::clone(&self.keys),
        }
    }
}

impl<K: Eq + Hash + Clone> BusyRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    fn keys(&self) -> MutexGuard<'_, HashSet<K>> {
        self.keys.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark `key` busy. Returns `None` when it already is.
    pub fn try_acquire(&self, key: K) -> Option<BusyToken<K>> {
        if !self.keys().insert(key.clone()) {
            return None;
        }
        Some(BusyToken {
            registry: self.clone(),
            key: Some(key),
        })
    }

    pub fn is_busy(&self, key: &K) -> bool {
        self.keys().contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Releases its key when dropped, whether the operation finished, failed or
/// its future was cancelled.
#[derive(Debug)]
pub struct BusyToken<K: Eq + Hash + Clone = (SubjectId, InteractionKind)> {
    registry: BusyRegistry<K>,
    key: Option<K>,
}

impl<K: Eq + Hash + Clone> BusyToken<K> {
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }
}

impl<K: Eq + Hash + Clone> Drop for BusyToken<K> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.registry.keys().remove(&key);
        }
    }
}
