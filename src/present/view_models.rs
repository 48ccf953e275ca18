//! Presentation-ready shapes for feed items and comments.

use chrono::{DateTime, Duration, Utc};

use crate::feed::{FeedItem, ImageComment};

/// What a feed cell renders: text only, image bytes arrive separately
/// through the per-item image pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItemViewModel {
  pub description: Option<String>,
  pub location: Option<String>,
}

impl FeedItemViewModel {
  pub fn from_item(item: &FeedItem) -> Self {
    Self {
      description: item.description.clone(),
      location: item.location.clone(),
    }
  }

  pub fn has_location(&self) -> bool {
    self.location.is_some()
  }
}

/// A comment with its timestamp already humanized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCommentViewModel {
  pub message: String,
  pub username: String,
  pub date: String,
}

impl ImageCommentViewModel {
  pub fn from_comment(comment: &ImageComment, now: DateTime<Utc>) -> Self {
    Self {
      message: comment.message.clone(),
      username: comment.username.clone(),
      date: relative_date(comment.created_at, now),
    }
  }
}

/// Humanize how long ago `then` was, relative to `now`.
pub fn relative_date(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let elapsed = now - then;

  if elapsed < Duration::minutes(1) {
    "just now".to_string()
  } else if elapsed < Duration::hours(1) {
    plural(elapsed.num_minutes(), "minute")
  } else if elapsed < Duration::days(1) {
    plural(elapsed.num_hours(), "hour")
  } else if elapsed < Duration::days(30) {
    plural(elapsed.num_days(), "day")
  } else if elapsed < Duration::days(365) {
    plural(elapsed.num_days() / 30, "month")
  } else {
    plural(elapsed.num_days() / 365, "year")
  }
}

fn plural(count: i64, unit: &str) -> String {
  if count == 1 {
    format!("1 {} ago", unit)
  } else {
    format!("{} {}s ago", count, unit)
  }
}
