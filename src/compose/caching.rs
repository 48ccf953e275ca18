//! Caching combinator: persist successful loads as they pass through.

use async_trait::async_trait;
use std::sync::Arc;

use crate::loader::{LoadResult, ResourceCache, ResourceLoader};

/// Decorates a loader so that every successful outcome is written to a
/// cache before being yielded onward.
///
/// The write is initiated before the value is returned, but runs on its
/// own task and is never awaited: a slow or failing cache cannot delay or
/// fail a load that already succeeded. Failures pass through untouched.
pub struct CachingLoader<L, C> {
  inner: L,
  cache: Arc<C>,
}

impl<L, C> CachingLoader<L, C> {
  pub fn new(inner: L, cache: Arc<C>) -> Self {
    Self { inner, cache }
  }
}

#[async_trait]
impl<T, L, C> ResourceLoader<T> for CachingLoader<L, C>
where
  T: Clone + Send + Sync + 'static,
  L: ResourceLoader<T>,
  C: ResourceCache<T> + 'static,
{
  async fn load(&self) -> LoadResult<T> {
    let resource = self.inner.load().await?;

    let cache = Arc::clone(&self.cache);
    let copy = resource.clone();
    tokio::spawn(async move {
      cache.save(&copy).await;
    });

    Ok(resource)
  }
}
