//! Core contracts for the resource-loading pipeline.
//!
//! Every resource (feed page, image bytes, comment list) is produced by
//! something implementing [`ResourceLoader`]. Loaders bind their request
//! (URL or cache key) at construction time, so composition never has to
//! thread request parameters through the chain. The future returned by
//! `load()` is the in-flight handle: dropping it before completion
//! cancels the load and no outcome is ever observed.

use async_trait::async_trait;

/// Failure taxonomy for a load attempt.
///
/// `Connectivity` and `InvalidData` come from the remote stage, `NotFound`
/// from the cache stage. All three are recoverable at a fallback boundary;
/// only the final stage's error ever reaches presentation, and there it is
/// collapsed into a generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
  /// The transport could not reach the server.
  #[error("could not connect to the server")]
  Connectivity,
  /// The server responded, but the payload failed mapping or validation.
  #[error("received invalid data from the server")]
  InvalidData,
  /// The local cache had no usable entry for the key.
  #[error("no cached copy available")]
  NotFound,
}

pub type LoadResult<T> = Result<T, LoadError>;

/// An asynchronous producer of one resource.
#[async_trait]
pub trait ResourceLoader<T>: Send + Sync {
  async fn load(&self) -> LoadResult<T>;
}

#[async_trait]
impl<T, L> ResourceLoader<T> for std::sync::Arc<L>
where
  T: Send + Sync,
  L: ResourceLoader<T> + ?Sized,
{
  async fn load(&self) -> LoadResult<T> {
    (**self).load().await
  }
}

/// A best-effort sink for successfully loaded resources.
///
/// `save` never reports failure to the caller; implementations log and
/// swallow storage errors so a cache problem can never fail a load that
/// already succeeded.
#[async_trait]
pub trait ResourceCache<T>: Send + Sync {
  async fn save(&self, resource: &T);
}
