//! Pipeline composition: combinators plus ready-made remote-with-cache
//! pipelines for each resource kind.
//!
//! The canonical chain is remote → caching → fallback(local): try the
//! network, write successes back to the cache, and serve the cached copy
//! when the network stage fails.

mod caching;
mod fallback;

#[cfg(test)]
pub(crate) mod test_support;

pub use caching::CachingLoader;
pub use fallback::FallbackLoader;

use async_trait::async_trait;
use chrono::Duration;
use color_eyre::{eyre::eyre, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::cache::{cache_key, CacheStore, LocalLoader};
use crate::feed::{map_comments, map_feed, map_image_data, FeedItem, ImageComment};
use crate::http::HttpClient;
use crate::loader::{LoadResult, ResourceLoader};
use crate::remote::{Mapper, RemoteLoader};

/// Cached feed pages older than this read as misses and are deleted at
/// validation time.
pub const FEED_MAX_AGE_DAYS: i64 = 7;

/// A remote loader with cache write-back and cache fallback, sharing one
/// local loader between the write and the fallback read.
pub struct CachedRemotePipeline<T, S: CacheStore> {
  loader: FallbackLoader<CachingLoader<RemoteLoader<T>, LocalLoader<T, S>>, Arc<LocalLoader<T, S>>>,
  local: Arc<LocalLoader<T, S>>,
}

impl<T, S> CachedRemotePipeline<T, S>
where
  T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
  S: CacheStore + 'static,
{
  pub fn new(
    client: Arc<dyn HttpClient>,
    store: Arc<S>,
    url: Url,
    mapper: Mapper<T>,
    max_age: Option<Duration>,
  ) -> Self {
    let mut local = LocalLoader::new(store, cache_key(&url));
    if let Some(max_age) = max_age {
      local = local.with_max_age(max_age);
    }
    let local = Arc::new(local);

    let remote = RemoteLoader::new(client, url, mapper);
    let loader = FallbackLoader::new(
      CachingLoader::new(remote, Arc::clone(&local)),
      Arc::clone(&local),
    );

    Self { loader, local }
  }

  /// Drop the cached copy if it has outlived its maximum age.
  pub fn validate_cache(&self) {
    self.local.validate_cache();
  }
}

#[async_trait]
impl<T, S> ResourceLoader<T> for CachedRemotePipeline<T, S>
where
  T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static,
  S: CacheStore + 'static,
{
  async fn load(&self) -> LoadResult<T> {
    self.loader.load().await
  }
}

/// Pipeline for the feed list. Cached pages older than `max_age` read as
/// misses.
pub fn feed_loader<S: CacheStore + 'static>(
  client: Arc<dyn HttpClient>,
  store: Arc<S>,
  base_url: &Url,
  max_age: Duration,
) -> Result<CachedRemotePipeline<Vec<FeedItem>, S>> {
  Ok(CachedRemotePipeline::new(
    client,
    store,
    feed_url(base_url)?,
    map_feed,
    Some(max_age),
  ))
}

/// Pipeline for one image's comments. Cached copies do not expire on read.
pub fn comments_loader<S: CacheStore + 'static>(
  client: Arc<dyn HttpClient>,
  store: Arc<S>,
  base_url: &Url,
  image_id: Uuid,
) -> Result<CachedRemotePipeline<Vec<ImageComment>, S>> {
  Ok(CachedRemotePipeline::new(
    client,
    store,
    comments_url(base_url, image_id)?,
    map_comments,
    None,
  ))
}

/// Pipeline for one image's raw bytes. Cached copies do not expire on read.
pub fn image_data_loader<S: CacheStore + 'static>(
  client: Arc<dyn HttpClient>,
  store: Arc<S>,
  image_url: Url,
) -> CachedRemotePipeline<Vec<u8>, S> {
  CachedRemotePipeline::new(client, store, image_url, map_image_data, None)
}

/// Endpoint for the feed list under an API base URL.
pub fn feed_url(base: &Url) -> Result<Url> {
  join_path(base, &["feed"])
}

/// Endpoint for an image's comments under an API base URL.
pub fn comments_url(base: &Url, image_id: Uuid) -> Result<Url> {
  join_path(base, &["image", &image_id.to_string(), "comments"])
}

fn join_path(base: &Url, segments: &[&str]) -> Result<Url> {
  let mut url = base.clone();
  url
    .path_segments_mut()
    .map_err(|_| eyre!("API base URL cannot be a base: {}", base))?
    .pop_if_empty()
    .extend(segments);
  Ok(url)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::MemoryStore;
  use crate::loader::LoadError;
  use crate::http::testing::FakeClient;
  use std::time::Duration as StdDuration;

  fn base_url() -> Url {
    Url::parse("https://api.example.com/v1").unwrap()
  }

  fn max_age() -> Duration {
    Duration::days(FEED_MAX_AGE_DAYS)
  }

  fn feed_body() -> &'static [u8] {
    br#"{
      "items": [
        {
          "id": "2239cba9-1f01-4b92-ae04-6bf04d608cc1",
          "description": "a description",
          "location": "a location",
          "image": "https://example.com/image-1.jpg"
        }
      ]
    }"#
  }

  #[test]
  fn test_feed_url_appends_segment() {
    assert_eq!(
      feed_url(&base_url()).unwrap().as_str(),
      "https://api.example.com/v1/feed"
    );
  }

  #[test]
  fn test_comments_url_nests_under_image() {
    let id = Uuid::parse_str("2239cba9-1f01-4b92-ae04-6bf04d608cc1").unwrap();
    assert_eq!(
      comments_url(&base_url(), id).unwrap().as_str(),
      "https://api.example.com/v1/image/2239cba9-1f01-4b92-ae04-6bf04d608cc1/comments"
    );
  }

  #[test]
  fn test_feed_url_handles_trailing_slash() {
    let base = Url::parse("https://api.example.com/v1/").unwrap();
    assert_eq!(
      feed_url(&base).unwrap().as_str(),
      "https://api.example.com/v1/feed"
    );
  }

  #[tokio::test]
  async fn test_remote_success_is_delivered_and_written_back() {
    let client = FakeClient::responding(200, feed_body());
    let store = Arc::new(MemoryStore::new());
    let pipeline = feed_loader(client, store.clone(), &base_url(), max_age()).unwrap();

    let items = pipeline.load().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].location.as_deref(), Some("a location"));

    // Write-back is fire-and-forget; wait for it to land, then a second
    // load with the network down must serve the cached copy.
    tokio::time::sleep(StdDuration::from_millis(10)).await;

    let offline = feed_loader(FakeClient::failing(), store, &base_url(), max_age()).unwrap();
    assert_eq!(offline.load().await.unwrap(), items);
  }

  #[tokio::test]
  async fn test_remote_failure_with_cold_cache_is_not_found() {
    let store = Arc::new(MemoryStore::new());
    let pipeline = feed_loader(FakeClient::failing(), store, &base_url(), max_age()).unwrap();

    assert_eq!(pipeline.load().await, Err(LoadError::NotFound));
  }

  #[tokio::test]
  async fn test_invalid_remote_data_falls_back_to_cache() {
    let store = Arc::new(MemoryStore::new());

    let warm =
      feed_loader(FakeClient::responding(200, feed_body()), store.clone(), &base_url(), max_age())
        .unwrap();
    let items = warm.load().await.unwrap();
    tokio::time::sleep(StdDuration::from_millis(10)).await;

    let garbled =
      feed_loader(FakeClient::responding(500, b"oops"), store, &base_url(), max_age()).unwrap();
    assert_eq!(garbled.load().await.unwrap(), items);
  }

  #[tokio::test]
  async fn test_aborting_inflight_load_delivers_no_outcome() {
    use crate::compose::test_support::{SlowLoader, SpyCache};

    let cache = Arc::new(SpyCache::new());
    let slow = SlowLoader::succeeding_after(StdDuration::from_millis(50), 42);
    let composed = Arc::new(CachingLoader::new(slow, cache.clone()));

    let task = tokio::spawn({
      let composed = Arc::clone(&composed);
      async move { composed.load().await }
    });

    tokio::time::sleep(StdDuration::from_millis(10)).await;
    task.abort();
    tokio::time::sleep(StdDuration::from_millis(100)).await;

    // The cancelled load never reached the caching stage, so nothing was
    // saved and no outcome exists anywhere.
    assert!(cache.saved().is_empty());
    assert!(task.await.unwrap_err().is_cancelled());
  }

  #[tokio::test]
  async fn test_image_pipeline_round_trips_bytes() {
    let url = Url::parse("https://example.com/image-1.jpg").unwrap();
    let store = Arc::new(MemoryStore::new());

    let online = image_data_loader(
      FakeClient::responding(200, b"image bytes"),
      store.clone(),
      url.clone(),
    );
    assert_eq!(online.load().await.unwrap(), b"image bytes".to_vec());
    tokio::time::sleep(StdDuration::from_millis(10)).await;

    let offline = image_data_loader(FakeClient::failing(), store, url);
    assert_eq!(offline.load().await.unwrap(), b"image bytes".to_vec());
  }
}
