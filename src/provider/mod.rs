//! Remote content-provider API.
//!
//! | Module   | Purpose                                       |
//! |----------|-----------------------------------------------|
//! | `types`  | Spaces, content types, locales, entries       |
//! | `error`  | `ProviderError` and kind classification       |
//! | `http`   | Delivery API over `reqwest`                   |
//! | `mock`   | In-memory provider for tests                  |
//!
//! A [`Connector`] turns credentials into a [`ContentApi`] handle. Building a
//! handle never performs I/O; the first request is the first point of failure.

mod error;
pub mod http;
#[cfg(test)]
pub mod mock;
mod types;

use std::future::Future;

pub use error::{ProviderError, ProviderErrorKind, ProviderResult};
pub use http::HttpConnector;
pub use types::{
    Collection, EntryQuery, EntrySys, LinkRef, LinkSys, RemoteContentType, RemoteEntry,
    RemoteLocale, RemoteSpace,
};

use crate::space::Credentials;

/// Requests against one authenticated space/environment.
pub trait ContentApi: Send + Sync + 'static {
    fn get_space(&self) -> impl Future<Output = ProviderResult<RemoteSpace>> + Send;

    fn get_content_types(
        &self,
    ) -> impl Future<Output = ProviderResult<Vec<RemoteContentType>>> + Send;

    fn get_content_type(
        &self,
        id: &str,
    ) -> impl Future<Output = ProviderResult<RemoteContentType>> + Send;

    fn get_locales(&self) -> impl Future<Output = ProviderResult<Vec<RemoteLocale>>> + Send;

    /// Fetch one entry; `all_locales` returns every locale's field values.
    fn get_entry(
        &self,
        id: &str,
        all_locales: bool,
    ) -> impl Future<Output = ProviderResult<RemoteEntry>> + Send;

    fn get_entries(
        &self,
        query: &EntryQuery,
    ) -> impl Future<Output = ProviderResult<Vec<RemoteEntry>>> + Send;
}

/// Builds API handles from credentials.
pub trait Connector: Send + Sync + 'static {
    type Api: ContentApi;

    fn connect(&self, credentials: &Credentials) -> Self::Api;
}
