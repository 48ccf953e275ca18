//! View contracts the presenter calls outward.
//!
//! Three narrow traits rather than one fat observer: a concrete
//! presentation object may implement all of them, and tests can compose
//! partial observers (content-only, error-only) without stubbing the
//! rest.

/// Receives the mapped resource when a load succeeds.
pub trait ResourceView<V>: Send + Sync {
  fn display(&self, resource: V);
}

/// Receives loading-state transitions.
pub trait LoadingView: Send + Sync {
  fn display_loading(&self, is_loading: bool);
}

/// Receives the error message, or `None` to clear a previous one.
pub trait ErrorView: Send + Sync {
  fn display_error(&self, message: Option<String>);
}
