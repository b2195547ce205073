//! Remote client handles.
//!
//! - `handle` - `RemoteHandle` plus the `EntryFetcher` / `ContentTypeCache` capabilities
//! - `cache` - `ClientCache`, one memoized handle per configuration

mod cache;
mod handle;

pub use cache::{ClientCache, Handle};
pub use handle::{ContentTypeCache, EntryFetcher, RemoteHandle, as_published};
