//! Presenter for resource loads: translates load lifecycle events into
//! view callbacks.

use std::sync::Weak;

use crate::loader::LoadResult;

use super::views::{ErrorView, LoadingView, ResourceView};

/// Generic message shown for any terminal failure. The concrete error
/// kind is deliberately not exposed to views.
pub const LOAD_ERROR_MESSAGE: &str = "Couldn't load the data. Please try again.";

type ViewMapper<T, V> = Box<dyn Fn(T) -> LoadResult<V> + Send + Sync>;

/// Drives the three view contracts through a load's lifecycle.
///
/// Views are held weakly: the presenter never keeps a view alive, and a
/// view that has gone away is skipped silently rather than treated as an
/// error. The mapper turns the loaded resource into whatever the resource
/// view renders; a mapper rejection takes the error path.
pub struct LoadResourcePresenter<T, V> {
  resource_view: Weak<dyn ResourceView<V>>,
  loading_view: Weak<dyn LoadingView>,
  error_view: Weak<dyn ErrorView>,
  mapper: ViewMapper<T, V>,
}

impl<T, V> LoadResourcePresenter<T, V> {
  pub fn new(
    resource_view: Weak<dyn ResourceView<V>>,
    loading_view: Weak<dyn LoadingView>,
    error_view: Weak<dyn ErrorView>,
    mapper: impl Fn(T) -> LoadResult<V> + Send + Sync + 'static,
  ) -> Self {
    Self {
      resource_view,
      loading_view,
      error_view,
      mapper: Box::new(mapper),
    }
  }

  /// Clear any previous error, then signal that loading began.
  pub fn did_start_loading(&self) {
    if let Some(view) = self.error_view.upgrade() {
      view.display_error(None);
    }
    if let Some(view) = self.loading_view.upgrade() {
      view.display_loading(true);
    }
  }

  /// Deliver a successful load. The loading=false signal always follows
  /// the content (or error) signal.
  pub fn did_finish_loading(&self, resource: T) {
    match (self.mapper)(resource) {
      Ok(mapped) => {
        if let Some(view) = self.resource_view.upgrade() {
          view.display(mapped);
        }
        if let Some(view) = self.loading_view.upgrade() {
          view.display_loading(false);
        }
      }
      Err(_) => self.did_finish_loading_with_error(),
    }
  }

  /// Deliver a failed load as a generic localized message.
  pub fn did_finish_loading_with_error(&self) {
    if let Some(view) = self.error_view.upgrade() {
      view.display_error(Some(LOAD_ERROR_MESSAGE.to_string()));
    }
    if let Some(view) = self.loading_view.upgrade() {
      view.display_loading(false);
    }
  }
}


#[cfg(test)]
mod tests {
  use super::testing::{presenter_for, SpyView, ViewMessage};
  use super::*;
  use crate::loader::LoadError;
  use std::sync::Arc;

  #[test]
  fn test_start_loading_clears_error_then_shows_loading() {
    let view = SpyView::new();
    let presenter = presenter_for(&view);

    presenter.did_start_loading();

    assert_eq!(
      view.messages(),
      vec![ViewMessage::Error(None), ViewMessage::Loading(true)]
    );
  }

  #[test]
  fn test_finish_loading_displays_mapped_resource_then_stops_loading() {
    let view = SpyView::new();
    let presenter = presenter_for(&view);

    presenter.did_finish_loading("content".to_string());

    assert_eq!(
      view.messages(),
      vec![
        ViewMessage::Display("content".to_string()),
        ViewMessage::Loading(false),
      ]
    );
  }

  #[test]
  fn test_finish_loading_with_error_shows_generic_message() {
    let view = SpyView::new();
    let presenter = presenter_for(&view);

    presenter.did_finish_loading_with_error();

    assert_eq!(
      view.messages(),
      vec![
        ViewMessage::Error(Some(LOAD_ERROR_MESSAGE.to_string())),
        ViewMessage::Loading(false),
      ]
    );
  }

  #[test]
  fn test_mapper_rejection_takes_the_error_path() {
    let view = SpyView::new();
    let resource: Arc<dyn ResourceView<String>> = view.clone();
    let loading: Arc<dyn LoadingView> = view.clone();
    let error: Arc<dyn ErrorView> = view.clone();
    let presenter: LoadResourcePresenter<String, String> = LoadResourcePresenter::new(
      Arc::downgrade(&resource),
      Arc::downgrade(&loading),
      Arc::downgrade(&error),
      |_| Err(LoadError::InvalidData),
    );

    presenter.did_finish_loading("unmappable".to_string());

    assert_eq!(
      view.messages(),
      vec![
        ViewMessage::Error(Some(LOAD_ERROR_MESSAGE.to_string())),
        ViewMessage::Loading(false),
      ]
    );
  }

  #[test]
  fn test_vanished_view_is_a_silent_noop() {
    let view = SpyView::new();
    let presenter = presenter_for(&view);
    drop(view);

    // Nothing to observe; the point is that this neither panics nor errs.
    presenter.did_start_loading();
    presenter.did_finish_loading("content".to_string());
    presenter.did_finish_loading_with_error();
  }

  #[test]
  fn test_partial_observer_only_receives_its_callbacks() {
    let view = SpyView::new();
    let loading: Arc<dyn LoadingView> = view.clone();
    let no_resource_view: Weak<dyn ResourceView<String>> = Weak::<SpyView>::new();
    let no_error_view: Weak<dyn ErrorView> = Weak::<SpyView>::new();
    let presenter: LoadResourcePresenter<String, String> = LoadResourcePresenter::new(
      no_resource_view,
      Arc::downgrade(&loading),
      no_error_view,
      |resource| Ok(resource),
    );

    presenter.did_start_loading();
    presenter.did_finish_loading("content".to_string());

    assert_eq!(
      view.messages(),
      vec![ViewMessage::Loading(true), ViewMessage::Loading(false)]
    );
  }
}
