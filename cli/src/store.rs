//! Backend selection: the real Redis-backed store for day-to-day use, or an
//! in-memory fake for `--store=memory` runs and demos.

use loso_core::{MemoryStore, Result, Store};
use loso_store_redis::RedisStore;

pub enum AnyStore {
    Memory(MemoryStore),
    Redis(RedisStore),
}

impl AnyStore {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    pub fn redis(url: &str) -> Result<Self> {
        Ok(Self::Redis(RedisStore::connect(url)?))
    }
}

impl Store for AnyStore {
    fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        match self {
            Self::Memory(s) => s.incr(key, delta),
            Self::Redis(s) => s.incr(key, delta),
        }
    }

    fn get(&self, key: &str) -> Result<Option<i64>> {
        match self {
            Self::Memory(s) => s.get(key),
            Self::Redis(s) => s.get(key),
        }
    }

    fn set_add(&self, key: &str, member: &str) -> Result<bool> {
        match self {
            Self::Memory(s) => s.set_add(key, member),
            Self::Redis(s) => s.set_add(key, member),
        }
    }

    fn set_members(&self, key: &str) -> Result<Vec<String>> {
        match self {
            Self::Memory(s) => s.set_members(key),
            Self::Redis(s) => s.set_members(key),
        }
    }

    fn delete(&self, keys: &[String]) -> Result<()> {
        match self {
            Self::Memory(s) => s.delete(keys),
            Self::Redis(s) => s.delete(keys),
        }
    }
}
