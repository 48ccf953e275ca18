//! Domain types for the feed and its comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// One entry in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
  pub id: Uuid,
  pub description: Option<String>,
  pub location: Option<String>,
  /// Where the item's image can be fetched from.
  pub image_url: Url,
}

/// A comment attached to a feed item's image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageComment {
  pub id: Uuid,
  pub message: String,
  pub created_at: DateTime<Utc>,
  pub username: String,
}
