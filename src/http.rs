//! HTTP transport port and the reqwest-backed implementation.

use async_trait::async_trait;
use color_eyre::{eyre::eyre, Result};
use std::time::Duration;
use url::Url;

/// A raw transport response: status code plus body bytes.
///
/// Interpretation of the payload belongs to the result mappers, not the
/// transport. The client reports an `HttpError` only when no response was
/// obtained at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
  pub status: u16,
  pub body: Vec<u8>,
}

impl HttpResponse {
  pub fn new(status: u16, body: Vec<u8>) -> Self {
    Self { status, body }
  }

  /// Whether the status is in the 2xx success class.
  pub fn is_success(&self) -> bool {
    (200..=299).contains(&self.status)
  }
}

/// Transport-level failure: the request never produced a response.
#[derive(Debug, Clone, thiserror::Error)]
#[error("request to {url} failed: {reason}")]
pub struct HttpError {
  pub url: Url,
  pub reason: String,
}

/// Narrow transport port. One call, one response or one error.
#[async_trait]
pub trait HttpClient: Send + Sync {
  async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError>;
}

/// Production transport backed by a shared reqwest client.
#[derive(Clone)]
pub struct ReqwestClient {
  client: reqwest::Client,
}

impl ReqwestClient {
  pub fn new() -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self { client })
  }
}


#[async_trait]
impl HttpClient for ReqwestClient {
  async fn get(&self, url: &Url) -> Result<HttpResponse, HttpError> {
    let response = self
      .client
      .get(url.clone())
      .send()
      .await
      .map_err(|e| HttpError {
        url: url.clone(),
        reason: e.to_string(),
      })?;

    let status = response.status().as_u16();
    let body = response
      .bytes()
      .await
      .map_err(|e| HttpError {
        url: url.clone(),
        reason: e.to_string(),
      })?
      .to_vec();

    Ok(HttpResponse { status, body })
  }
}
