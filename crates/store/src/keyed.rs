use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use mediforge_core::DomainError;

/// Failure surfaced by a store backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store backend failure: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::internal(err.to_string())
    }
}

/// Key-indexed durable store abstraction.
///
/// Individual writes are atomic at the record level; there is no cross-record
/// transaction. Iteration order of [`KeyedStore::list`] is unspecified.
pub trait KeyedStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> StoreResult<Option<V>>;
    fn upsert(&self, key: K, value: V) -> StoreResult<()>;
    /// Remove a record, returning the previous value if one existed.
    fn remove(&self, key: &K) -> StoreResult<Option<V>>;
    fn list(&self) -> StoreResult<Vec<V>>;
}

impl<K, V, S> KeyedStore<K, V> for Arc<S>
where
    S: KeyedStore<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> StoreResult<Option<V>> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) -> StoreResult<()> {
        (**self).upsert(key, value)
    }

    fn remove(&self, key: &K) -> StoreResult<Option<V>> {
        (**self).remove(key)
    }

    fn list(&self) -> StoreResult<Vec<V>> {
        (**self).list()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

impl<K, V> KeyedStore<K, V> for InMemoryStore<K, V>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> StoreResult<Option<V>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.get(key).cloned())
    }

    fn upsert(&self, key: K, value: V) -> StoreResult<()> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        map.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &K) -> StoreResult<Option<V>> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        Ok(map.remove(key))
    }

    fn list(&self) -> StoreResult<Vec<V>> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        Ok(map.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_then_get_roundtrips() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.upsert(1, "aspirin".to_string()).unwrap();

        assert_eq!(store.get(&1).unwrap(), Some("aspirin".to_string()));
        assert_eq!(store.get(&2).unwrap(), None);
    }

    #[test]
    fn remove_returns_previous_value() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.upsert(1, "gauze".to_string()).unwrap();

        assert_eq!(store.remove(&1).unwrap(), Some("gauze".to_string()));
        assert_eq!(store.remove(&1).unwrap(), None);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn list_returns_all_values() {
        let store: InMemoryStore<u32, String> = InMemoryStore::new();
        store.upsert(1, "a".to_string()).unwrap();
        store.upsert(2, "b".to_string()).unwrap();

        let mut values = store.list().unwrap();
        values.sort();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn arc_delegation_shares_state() {
        let store = Arc::new(InMemoryStore::new());
        let other = store.clone();

        KeyedStore::upsert(&store, 7u32, "shared".to_string()).unwrap();
        assert_eq!(other.get(&7).unwrap(), Some("shared".to_string()));
    }
}
