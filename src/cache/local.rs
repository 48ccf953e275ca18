//! Local resource loader: typed reads and writes through the cache store.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::warn;

use crate::loader::{LoadError, LoadResult, ResourceCache, ResourceLoader};

use super::store::CacheStore;

/// Loads and saves one resource kind under a fixed key, serialized as
/// JSON through the store port.
///
/// With no `max_age`, a hit is served regardless of how old it is and
/// freshness is only enforced by `validate_cache`. With a `max_age`, an
/// entry older than the threshold reads as a miss.
pub struct LocalLoader<T, S: CacheStore> {
  store: Arc<S>,
  key: String,
  max_age: Option<Duration>,
  _resource: PhantomData<fn() -> T>,
}

impl<T, S: CacheStore> LocalLoader<T, S> {
  pub fn new(store: Arc<S>, key: impl Into<String>) -> Self {
    Self {
      store,
      key: key.into(),
      max_age: None,
      _resource: PhantomData,
    }
  }

  /// Treat entries older than `max_age` as misses, and delete them during
  /// validation.
  pub fn with_max_age(mut self, max_age: Duration) -> Self {
    self.max_age = Some(max_age);
    self
  }

  fn is_expired(&self, cached_at: chrono::DateTime<Utc>) -> bool {
    match self.max_age {
      Some(max_age) => Utc::now() - cached_at > max_age,
      None => false,
    }
  }

  /// Drop the cached entry if it is expired or unreadable.
  ///
  /// Fire-and-forget: validation problems are logged and swallowed, never
  /// surfaced to an observer.
  pub fn validate_cache(&self) {
    let entry = match self.store.retrieve(&self.key) {
      Ok(entry) => entry,
      Err(e) => {
        warn!(key = %self.key, error = %e, "cache unreadable during validation, deleting");
        if let Err(e) = self.store.delete(&self.key) {
          warn!(key = %self.key, error = %e, "failed to delete unreadable cache entry");
        }
        return;
      }
    };

    if let Some(entry) = entry {
      if self.is_expired(entry.cached_at) {
        if let Err(e) = self.store.delete(&self.key) {
          warn!(key = %self.key, error = %e, "failed to delete expired cache entry");
        }
      }
    }
  }
}

#[async_trait]
impl<T, S> ResourceLoader<T> for LocalLoader<T, S>
where
  T: DeserializeOwned + Send + Sync,
  S: CacheStore,
{
  async fn load(&self) -> LoadResult<T> {
    let entry = self
      .store
      .retrieve(&self.key)
      .map_err(|e| {
        warn!(key = %self.key, error = %e, "cache retrieval failed");
        LoadError::NotFound
      })?
      .ok_or(LoadError::NotFound)?;

    if self.is_expired(entry.cached_at) {
      return Err(LoadError::NotFound);
    }

    serde_json::from_slice(&entry.data).map_err(|e| {
      warn!(key = %self.key, error = %e, "cached payload failed to deserialize");
      LoadError::NotFound
    })
  }
}

#[async_trait]
impl<T, S> ResourceCache<T> for LocalLoader<T, S>
where
  T: Serialize + Send + Sync,
  S: CacheStore,
{
  async fn save(&self, resource: &T) {
    let data = match serde_json::to_vec(resource) {
      Ok(data) => data,
      Err(e) => {
        warn!(key = %self.key, error = %e, "failed to serialize resource for caching");
        return;
      }
    };

    if let Err(e) = self.store.insert(&self.key, &data, Utc::now()) {
      warn!(key = %self.key, error = %e, "cache write failed");
    }
  }
}
