//! Cache store port and the in-memory / disabled implementations.

use chrono::{DateTime, Utc};
use color_eyre::{eyre::eyre, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// One stored resource: serialized bytes plus the insertion timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
  pub data: Vec<u8>,
  pub cached_at: DateTime<Utc>,
}

/// Trait for cache store backends.
///
/// Implementations must tolerate concurrent calls from multiple in-flight
/// loads (one per visible image is the common case); serialization, where
/// needed, is the store's own concern.
pub trait CacheStore: Send + Sync {
  /// Fetch the entry for a key, if present.
  fn retrieve(&self, key: &str) -> Result<Option<CacheEntry>>;

  /// Insert or overwrite the entry for a key.
  fn insert(&self, key: &str, data: &[u8], timestamp: DateTime<Utc>) -> Result<()>;

  /// Remove the entry for a key. Removing an absent key is not an error.
  fn delete(&self, key: &str) -> Result<()>;
}

/// Store that keeps entries in process memory. Useful for tests and for
/// runs that want caching without persistence.
#[derive(Default)]
pub struct MemoryStore {
  entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CacheStore for MemoryStore {
  fn retrieve(&self, key: &str) -> Result<Option<CacheEntry>> {
    let entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    Ok(entries.get(key).cloned())
  }

  fn insert(&self, key: &str, data: &[u8], timestamp: DateTime<Utc>) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.insert(
      key.to_string(),
      CacheEntry {
        data: data.to_vec(),
        cached_at: timestamp,
      },
    );
    Ok(())
  }

  fn delete(&self, key: &str) -> Result<()> {
    let mut entries = self
      .entries
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;
    entries.remove(key);
    Ok(())
  }
}

/// Store implementation that doesn't cache anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStore;

impl CacheStore for NoopStore {
  fn retrieve(&self, _key: &str) -> Result<Option<CacheEntry>> {
    Ok(None) // Always miss
  }

  fn insert(&self, _key: &str, _data: &[u8], _timestamp: DateTime<Utc>) -> Result<()> {
    Ok(()) // Discard
  }

  fn delete(&self, _key: &str) -> Result<()> {
    Ok(())
  }
}
