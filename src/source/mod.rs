//! Joke source abstraction layer.
//!
//! This module defines the [`Source`] trait and the common [`JokeItem`]
//! type.  Concrete implementations live in sub-modules (currently only the
//! HTTP joke API in [`http`]).
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory.
//! 2. Define a struct and implement [`Source<JokeItem>`] for it.
//! 3. Add the `mod` line below and re-export your struct in the `pub use`
//!    block.
//! 4. Construct an instance in `main.rs` and hand it to the worker.
//!
//! The polling worker, the bounded list, and the UI are all source-agnostic.

mod http;
mod joke_item;

pub use http::{HttpJokeSource, DEFAULT_JOKE_API};
pub use joke_item::JokeItem;

use async_trait::async_trait;

/// An asynchronous fetch capability, generic over the item it produces.
///
/// The polling worker calls [`fetch()`](Source::fetch) once per tick on a
/// spawned task, so implementations must be `Send + Sync` — fetches from
/// different ticks may run concurrently.  The worker neither knows nor cares
/// whether the implementation does HTTP, disk I/O, or nothing at all.
#[async_trait]
pub trait Source<T>: Send + Sync {
    /// Human-readable label used in log lines and the UI.
    fn name(&self) -> &str;

    /// Produce one item.  Errors are logged by the worker and dropped;
    /// the next tick simply tries again.
    async fn fetch(&self) -> anyhow::Result<T>;
}
