//! Remote resource loader: transport call plus result mapping.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::http::{HttpClient, HttpResponse};
use crate::loader::{LoadError, LoadResult, ResourceLoader};

/// Pure mapping step from a raw response to a domain resource.
pub type Mapper<T> = fn(&HttpResponse) -> LoadResult<T>;

/// Loads one resource from a bound URL through the transport port.
///
/// Transport failure maps to `Connectivity`; a received-but-rejected
/// payload maps to whatever the mapper returns (`InvalidData` for all
/// mappers in this crate). Dropping the load future before the transport
/// answers discards the response when it eventually arrives.
pub struct RemoteLoader<T> {
  client: Arc<dyn HttpClient>,
  url: Url,
  mapper: Mapper<T>,
}

impl<T> RemoteLoader<T> {
  pub fn new(client: Arc<dyn HttpClient>, url: Url, mapper: Mapper<T>) -> Self {
    Self {
      client,
      url,
      mapper,
    }
  }
}

#[async_trait]
impl<T: Send + Sync> ResourceLoader<T> for RemoteLoader<T> {
  async fn load(&self) -> LoadResult<T> {
    let response = self.client.get(&self.url).await.map_err(|e| {
      debug!(url = %self.url, error = %e, "transport failure");
      LoadError::Connectivity
    })?;

    (self.mapper)(&response).map_err(|e| {
      debug!(url = %self.url, status = response.status, "mapper rejected response");
      e
    })
  }
}
