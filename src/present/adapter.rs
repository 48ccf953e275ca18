//! Poll-driven adapter between an async resource producer and the view
//! contracts.
//!
//! The adapter owns the only connection between a spawned load and the
//! views: an unbounded channel whose receiver lives here. Outcomes are
//! delivered from `poll()`, so every view callback runs on whichever
//! thread owns the adapter, no matter where the load itself completed.
//! Cancelling clears the receiver; a cancelled load's outcome has nowhere
//! to go and is dropped, never delivered.
//!
//! # Example
//!
//! ```ignore
//! let mut adapter = LoadResourceAdapter::new(
//!   move || {
//!     let pipeline = pipeline.clone();
//!     async move { pipeline.load().await }
//!   },
//!   presenter,
//! );
//!
//! adapter.load();
//!
//! // In the event loop tick
//! if adapter.poll() {
//!   // Terminal state reached, views are up to date
//! }
//! ```

use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::mpsc;

use crate::loader::LoadResult;

use super::presenter::LoadResourcePresenter;

/// Lifecycle of one adapter instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
  /// No load started, or the last one was cancelled.
  Idle,
  /// A load is in flight; further `load()` calls are no-ops.
  Loading,
  /// The last load delivered its outcome. `load()` starts a fresh cycle.
  Terminated,
}

type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<'static, LoadResult<T>> + Send + Sync>;

/// Single-flight load driver with cancellation.
///
/// At most one fetch is outstanding per adapter, and each fetch delivers
/// at most one outcome. A second `load()` while Loading is a no-op by
/// policy; `retry()` is the explicit cancel-and-restart affordance, used
/// both for whole-list reloads and for per-item retries (each image gets
/// its own adapter instance).
pub struct LoadResourceAdapter<T, V> {
  state: AdapterState,
  fetcher: FetcherFn<T>,
  presenter: LoadResourcePresenter<T, V>,
  receiver: Option<mpsc::UnboundedReceiver<LoadResult<T>>>,
}

impl<T: Send + 'static, V> LoadResourceAdapter<T, V> {
  pub fn new<F, Fut>(fetcher: F, presenter: LoadResourcePresenter<T, V>) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = LoadResult<T>> + Send + 'static,
  {
    Self {
      state: AdapterState::Idle,
      fetcher: Box::new(move || Box::pin(fetcher())),
      presenter,
      receiver: None,
    }
  }

  pub fn state(&self) -> AdapterState {
    self.state
  }

  pub fn is_loading(&self) -> bool {
    self.state == AdapterState::Loading
  }

  /// Start loading unless a load is already in flight.
  pub fn load(&mut self) {
    if self.is_loading() {
      return;
    }
    self.start_load();
  }

  /// Cancel any in-flight load and start over.
  pub fn retry(&mut self) {
    self.receiver = None;
    self.start_load();
  }

  /// Cancel the in-flight load, suppressing its outcome. Idempotent; a
  /// no-op once the outcome has been delivered.
  pub fn cancel(&mut self) {
    self.receiver = None;
    if self.is_loading() {
      self.state = AdapterState::Idle;
    }
  }

  /// Deliver a pending outcome to the views, if one has arrived.
  ///
  /// Returns `true` when a terminal state was reached. Call this from the
  /// thread designated for presentation updates.
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.try_recv() {
      Ok(Ok(resource)) => {
        self.receiver = None;
        self.state = AdapterState::Terminated;
        self.presenter.did_finish_loading(resource);
        true
      }
      Ok(Err(_)) => {
        self.receiver = None;
        self.state = AdapterState::Terminated;
        self.presenter.did_finish_loading_with_error();
        true
      }
      Err(mpsc::error::TryRecvError::Empty) => false,
      Err(mpsc::error::TryRecvError::Disconnected) => {
        // The fetch task went away without an outcome. Nothing may be
        // delivered for it; fall back to Idle so a new load can start.
        self.receiver = None;
        self.state = AdapterState::Idle;
        false
      }
    }
  }

  fn start_load(&mut self) {
    self.presenter.did_start_loading();

    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    self.state = AdapterState::Loading;

    let future = (self.fetcher)();
    tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - the load may have been cancelled
      let _ = tx.send(result);
    });
  }
}
