//! Client library for a remotely-sourced, locally-cached feed.
//!
//! The crate is organized around one idea: a resource load is a
//! composable pipeline. [`remote::RemoteLoader`] fetches and maps a
//! resource over HTTP, [`cache::LocalLoader`] reads and writes the same
//! resource through a narrow store port, and the combinators in
//! [`compose`] chain them so that the network is tried first, successes
//! are written back to the cache, and the cached copy is served when the
//! network fails. [`present`] bridges any such pipeline to view
//! callbacks with single-flight and cancellation semantics.

pub mod cache;
pub mod compose;
pub mod config;
pub mod feed;
pub mod http;
pub mod loader;
pub mod present;
pub mod remote;
