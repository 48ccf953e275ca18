//! Fallback combinator over two resource loaders.

use async_trait::async_trait;
use tracing::debug;

use crate::loader::{LoadResult, ResourceLoader};

/// Runs the primary loader and, only if it fails, adopts the fallback's
/// outcome. The two stages never run concurrently; dropping the composed
/// future drops whichever stage is active, so cancellation propagates.
pub struct FallbackLoader<P, F> {
  primary: P,
  fallback: F,
}

impl<P, F> FallbackLoader<P, F> {
  pub fn new(primary: P, fallback: F) -> Self {
    Self { primary, fallback }
  }
}

#[async_trait]
impl<T, P, F> ResourceLoader<T> for FallbackLoader<P, F>
where
  T: Send + Sync,
  P: ResourceLoader<T>,
  F: ResourceLoader<T>,
{
  async fn load(&self) -> LoadResult<T> {
    match self.primary.load().await {
      Ok(resource) => Ok(resource),
      Err(e) => {
        debug!(error = %e, "primary loader failed, trying fallback");
        self.fallback.load().await
      }
    }
  }
}
