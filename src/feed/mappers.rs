//! Pure result mappers: raw `HttpResponse` in, domain resource out.
//!
//! Mappers are deterministic and side-effect free. They own the validity
//! rules for each resource kind; loaders never inspect payloads
//! themselves. A rejected status is invalid data, not a transport
//! failure, because a response was in fact received. The JSON endpoints
//! accept the whole 2xx class; the image endpoint answers exactly 200.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use url::Url;
use uuid::Uuid;

use crate::http::HttpResponse;
use crate::loader::{LoadError, LoadResult};

use super::types::{FeedItem, ImageComment};

/// Wire shape of the feed endpoint.
#[derive(Debug, Deserialize)]
struct ApiFeed {
  items: Vec<ApiFeedItem>,
}

#[derive(Debug, Deserialize)]
struct ApiFeedItem {
  id: Uuid,
  description: Option<String>,
  location: Option<String>,
  image: Url,
}

impl ApiFeedItem {
  fn into_item(self) -> FeedItem {
    FeedItem {
      id: self.id,
      description: self.description,
      location: self.location,
      image_url: self.image,
    }
  }
}

/// Wire shape of the comments endpoint.
#[derive(Debug, Deserialize)]
struct ApiComments {
  items: Vec<ApiComment>,
}

#[derive(Debug, Deserialize)]
struct ApiComment {
  id: Uuid,
  message: String,
  created_at: DateTime<Utc>,
  author: ApiCommentAuthor,
}

#[derive(Debug, Deserialize)]
struct ApiCommentAuthor {
  username: String,
}

impl ApiComment {
  fn into_comment(self) -> ImageComment {
    ImageComment {
      id: self.id,
      message: self.message,
      created_at: self.created_at,
      username: self.author.username,
    }
  }
}

/// Map a feed-list response into ordered feed items.
pub fn map_feed(response: &HttpResponse) -> LoadResult<Vec<FeedItem>> {
  if !response.is_success() {
    return Err(LoadError::InvalidData);
  }

  let feed: ApiFeed =
    serde_json::from_slice(&response.body).map_err(|_| LoadError::InvalidData)?;

  Ok(feed.items.into_iter().map(ApiFeedItem::into_item).collect())
}

/// Map a comments response into ordered comments.
pub fn map_comments(response: &HttpResponse) -> LoadResult<Vec<ImageComment>> {
  if !response.is_success() {
    return Err(LoadError::InvalidData);
  }

  let comments: ApiComments =
    serde_json::from_slice(&response.body).map_err(|_| LoadError::InvalidData)?;

  Ok(
    comments
      .items
      .into_iter()
      .map(ApiComment::into_comment)
      .collect(),
  )
}

/// Map an image response into its raw bytes.
///
/// The image endpoint answers exactly 200; other statuses, 2xx included,
/// are invalid data. An empty body is also invalid: a zero-byte image
/// renders nothing, so it is rejected here rather than at display time.
pub fn map_image_data(response: &HttpResponse) -> LoadResult<Vec<u8>> {
  if response.status != 200 || response.body.is_empty() {
    return Err(LoadError::InvalidData);
  }

  Ok(response.body.clone())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_feed_mapper_rejects_non_2xx_statuses() {
    for status in [199, 300, 400, 500] {
      let response = HttpResponse::new(status, br#"{"items": []}"#.to_vec());
      assert_eq!(map_feed(&response), Err(LoadError::InvalidData));
    }
  }

  #[test]
  fn test_feed_mapper_rejects_malformed_json() {
    let response = HttpResponse::new(200, b"not json".to_vec());
    assert_eq!(map_feed(&response), Err(LoadError::InvalidData));
  }

  #[test]
  fn test_feed_mapper_delivers_items_on_2xx_with_valid_json() {
    let body = br#"{
      "items": [
        {
          "id": "2239cba9-1f01-4b92-ae04-6bf04d608cc1",
          "description": "a description",
          "location": "a location",
          "image": "https://example.com/image-1.jpg"
        },
        {
          "id": "aa101a28-6a3b-4a6b-a8a1-2ec07ee8c311",
          "image": "https://example.com/image-2.jpg"
        }
      ]
    }"#;
    let response = HttpResponse::new(200, body.to_vec());

    let items = map_feed(&response).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].description.as_deref(), Some("a description"));
    assert_eq!(items[0].location.as_deref(), Some("a location"));
    assert_eq!(items[1].description, None);
    assert_eq!(items[1].image_url.as_str(), "https://example.com/image-2.jpg");
  }

  #[test]
  fn test_feed_mapper_delivers_empty_list_on_empty_items() {
    let response = HttpResponse::new(200, br#"{"items": []}"#.to_vec());
    assert_eq!(map_feed(&response), Ok(vec![]));
  }

  #[test]
  fn test_comments_mapper_delivers_comments_with_author() {
    let body = br#"{
      "items": [
        {
          "id": "7019d8a3-a2a6-4394-8f45-21aaa2f09f11",
          "message": "nice shot",
          "created_at": "2026-08-28T15:07:02+00:00",
          "author": { "username": "a-username" }
        }
      ]
    }"#;
    let response = HttpResponse::new(200, body.to_vec());

    let comments = map_comments(&response).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].message, "nice shot");
    assert_eq!(comments[0].username, "a-username");
  }

  #[test]
  fn test_comments_mapper_rejects_non_2xx_statuses() {
    for status in [199, 300, 400, 500] {
      let response = HttpResponse::new(status, br#"{"items": []}"#.to_vec());
      assert_eq!(map_comments(&response), Err(LoadError::InvalidData));
    }
  }

  #[test]
  fn test_image_mapper_rejects_non_200_statuses() {
    for status in [199, 201, 300, 400, 500] {
      let response = HttpResponse::new(status, b"image bytes".to_vec());
      assert_eq!(map_image_data(&response), Err(LoadError::InvalidData));
    }
  }

  #[test]
  fn test_image_mapper_rejects_empty_body_on_200() {
    let response = HttpResponse::new(200, Vec::new());
    assert_eq!(map_image_data(&response), Err(LoadError::InvalidData));
  }

  #[test]
  fn test_image_mapper_delivers_exact_bytes_on_200() {
    let response = HttpResponse::new(200, b"non-empty data".to_vec());
    assert_eq!(map_image_data(&response), Ok(b"non-empty data".to_vec()));
  }
}
