//! Redis-backed [`loso_core::Store`] implementation.
//!
//! Maps the five store primitives onto their direct Redis analogues: `incr`
//! to `INCRBY`, `get` to `GET`, `set_add` to `SADD`, `set_members` to
//! `SMEMBERS`, `delete` to `DEL`. A single connection is held behind a mutex
//! since the `redis` crate's synchronous `Connection` needs `&mut self` for
//! every command and `Store` is shared across the service facade.

use std::sync::Mutex;

use loso_core::{LosoError, Result, Store};
use redis::Commands;
use tracing::debug;

/// A [`Store`] backed by a single Redis connection.
pub struct RedisStore {
    conn: Mutex<redis::Connection>,
}

impl RedisStore {
    /// Connect to Redis at the given URL (e.g. `redis://127.0.0.1:6379/0`).
    pub fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| LosoError::Store(e.to_string()))?;
        let conn = client.get_connection().map_err(|e| LosoError::Store(e.to_string()))?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, redis::Connection>> {
        self.conn.lock().map_err(|_| LosoError::Store("poisoned connection lock".into()))
    }
}

impl Store for RedisStore {
    fn incr(&self, key: &str, delta: i64) -> Result<i64> {
        let mut conn = self.lock()?;
        let new_value: i64 = conn.incr(key, delta).map_err(|e| LosoError::Store(e.to_string()))?;
        debug!(key, delta, new_value, "incr");
        Ok(new_value)
    }

    fn get(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.lock()?;
        conn.get(key).map_err(|e| LosoError::Store(e.to_string()))
    }

    fn set_add(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let added: i64 = conn.sadd(key, member).map_err(|e| LosoError::Store(e.to_string()))?;
        Ok(added > 0)
    }

    fn set_members(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.lock()?;
        conn.smembers(key).map_err(|e| LosoError::Store(e.to_string()))
    }

    fn delete(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.lock()?;
        let _: i64 = conn.del(keys).map_err(|e| LosoError::Store(e.to_string()))?;
        Ok(())
    }
}
