//! Key-value store capability interface.
//!
//! The lexicon model only ever needs five primitives: atomic counter
//! increment, point reads, and a string set. `Store` captures exactly that,
//! so the builder, scorer and segmenter never depend on a concrete backend.
//! [`MemoryStore`] is the in-memory fake used by every test in this crate;
//! `loso-store-redis` provides the production backend.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{LosoError, Result};

/// Capability interface the lexicon model needs from its backing store.
///
/// Counters are native atomic increments, sets are native set-add /
/// set-members. Implementations must make `incr` and `set_add` atomic with
/// respect to concurrent callers on the same key; everything else in this
/// crate is built on that guarantee.
pub trait Store {
    /// Add `delta` to the counter at `key` (creating it at 0 first if
    /// absent) and return the new value.
    fn incr(&self, key: &str, delta: i64) -> Result<i64>;

    /// Read the counter at `key`, or `None` if it has never been written.
    fn get(&self, key: &str) -> Result<Option<i64>>;

    /// Add `member` to the set at `key`. Returns `true` if it was newly
    /// inserted, `false` if it was already a member.
    fn set_add(&self, key: &str, member: &str) -> Result<bool>;

    /// All members of the set at `key`, in unspecified order.
    fn set_members(&self, key: &str) -> Result<Vec<String>>;

    /// Remove every key in `keys`, including set and counter keys alike.
    /// Removing a key that does not exist is not an error.
    fn delete(&self, keys: &[String]) -> Result<()>;
}

#[derive(Default)]
struct MemoryStoreInner {
    counters: HashMap<String, i64>,
    sets: HashMap<String, HashSet<String>>,
}

/// In-memory [`Store`] fake. Not persisted, not shared across processes —
/// exists for tests and for `loso-cli`'s `--store=memory` escape hatch.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for MemoryStore {
    fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        let mut inner = self.inner.lock().map_err(|_| LosoError::Store("poisoned lock".into()))?;
        let entry = inner.counters.entry(key.to_string()).or_insert(0);
        *entry += delta;
        Ok(*entry)
    }

    fn get(&self, key: &str) -> Result<Option<i64>> {
        let inner = self.inner.lock().map_err(|_| LosoError::Store("poisoned lock".into()))?;
        Ok(inner.counters.get(key).copied())
    }

    fn set_add(&self, key: &str, member: &str) -> Result<bool> {
        let mut inner = self.inner.lock().map_err(|_| LosoError::Store("poisoned lock".into()))?;
        Ok(inner.sets.entry(key.to_string()).or_default().insert(member.to_string()))
    }

    fn set_members(&self, key: &str) -> Result<Vec<String>> {
        let inner = self.inner.lock().map_err(|_| LosoError::Store("poisoned lock".into()))?;
        Ok(inner.sets.get(key).map(|s| s.iter().cloned().collect()).unwrap_or_default())
    }

    fn delete(&self, keys: &[String]) -> Result<()> {
        let mut inner = self.inner.lock().map_err(|_| LosoError::Store("poisoned lock".into()))?;
        for key in keys {
            inner.counters.remove(key);
            inner.sets.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_creates_and_accumulates() {
        let store = MemoryStore::new();
        assert_eq!(store.incr("k", 3).unwrap(), 3);
        assert_eq!(store.incr("k", 4).unwrap(), 7);
        assert_eq!(store.get("k").unwrap(), Some(7));
    }

    #[test]
    fn get_on_absent_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn set_add_reports_novelty() {
        let store = MemoryStore::new();
        assert!(store.set_add("s", "a").unwrap());
        assert!(!store.set_add("s", "a").unwrap());
        let mut members = store.set_members("s").unwrap();
        members.sort();
        assert_eq!(members, vec!["a".to_string()]);
    }

    #[test]
    fn delete_removes_both_counters_and_sets() {
        let store = MemoryStore::new();
        store.incr("c", 1).unwrap();
        store.set_add("s", "a").unwrap();
        store.delete(&["c".to_string(), "s".to_string()]).unwrap();
        assert_eq!(store.get("c").unwrap(), None);
        assert_eq!(store.set_members("s").unwrap(), Vec::<String>::new());
    }
}
