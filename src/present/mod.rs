//! Presentation layer: narrow view traits, the load presenter, and the
//! poll-driven adapter that bridges async loads to view callbacks.

mod adapter;
mod presenter;
mod view_models;
mod views;

pub use adapter::{AdapterState, LoadResourceAdapter};
pub use presenter::{LoadResourcePresenter, LOAD_ERROR_MESSAGE};
pub use view_models::{relative_date, FeedItemViewModel, ImageCommentViewModel};
pub use views::{ErrorView, LoadingView, ResourceView};
