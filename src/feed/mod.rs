//! Feed domain types and the pure mappers that produce them from raw
//! transport responses.

mod mappers;
mod types;

pub use mappers::{map_comments, map_feed, map_image_data};
pub use types::{FeedItem, ImageComment};
