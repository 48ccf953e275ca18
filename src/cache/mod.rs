//! Local caching: the narrow store port, store adapters, and the local
//! resource loader that applies the freshness policy.
//!
//! Stores hold opaque serialized bytes keyed by a stable hash of the
//! resource URL. All freshness decisions live in [`LocalLoader`]; stores
//! only record what was written and when.

mod local;
mod sqlite;
mod store;

pub use local::LocalLoader;
pub use sqlite::SqliteStore;
pub use store::{CacheEntry, CacheStore, MemoryStore, NoopStore};

use sha2::{Digest, Sha256};
use url::Url;

/// Stable, fixed-length cache key for a resource URL.
pub fn cache_key(url: &Url) -> String {
  let mut hasher = Sha256::new();
  hasher.update(url.as_str().as_bytes());
  hex::encode(hasher.finalize())
}
