//! Shared fakes for combinator and pipeline tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::loader::{LoadResult, ResourceCache, ResourceLoader};

/// Loader that replays a fixed outcome and counts invocations.
pub struct StubLoader<T> {
  outcome: LoadResult<T>,
  calls: Arc<AtomicUsize>,
}

impl<T: Clone> StubLoader<T> {
  pub fn succeeding(value: T) -> Self {
    Self {
      outcome: Ok(value),
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn failing(error: crate::loader::LoadError) -> Self {
    Self {
      outcome: Err(error),
      calls: Arc::new(AtomicUsize::new(0)),
    }
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

impl<T: Clone> Clone for StubLoader<T> {
  fn clone(&self) -> Self {
    Self {
      outcome: self.outcome.clone(),
      calls: Arc::clone(&self.calls),
    }
  }
}

#[async_trait]
impl<T: Clone + Send + Sync> ResourceLoader<T> for StubLoader<T> {
  async fn load(&self) -> LoadResult<T> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    self.outcome.clone()
  }
}

/// Loader that takes a while before producing its outcome.
pub struct SlowLoader<T> {
  outcome: LoadResult<T>,
  delay: std::time::Duration,
}

impl<T: Clone> SlowLoader<T> {
  pub fn succeeding_after(delay: std::time::Duration, value: T) -> Self {
    Self {
      outcome: Ok(value),
      delay,
    }
  }
}

#[async_trait]
impl<T: Clone + Send + Sync> ResourceLoader<T> for SlowLoader<T> {
  async fn load(&self) -> LoadResult<T> {
    tokio::time::sleep(self.delay).await;
    self.outcome.clone()
  }
}

/// Cache that records every saved value.
pub struct SpyCache<T> {
  saved: Mutex<Vec<T>>,
}

impl<T: Clone> SpyCache<T> {
  pub fn new() -> Self {
    Self {
      saved: Mutex::new(Vec::new()),
    }
  }

  pub fn saved(&self) -> Vec<T> {
    self.saved.lock().unwrap().clone()
  }
}

#[async_trait]
impl<T: Clone + Send + Sync> ResourceCache<T> for SpyCache<T> {
  async fn save(&self, resource: &T) {
    self.saved.lock().unwrap().push(resource.clone());
  }
}
