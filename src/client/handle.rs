//! Authenticated handle to one space/environment and the narrow
//! capabilities the resolver and picker need from it.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::provider::{ContentApi, ProviderResult, RemoteContentType, RemoteEntry};
use crate::space::Credentials;

/// Content types of a space, fetched at most once per handle.
pub trait ContentTypeCache {
    fn content_types(
        &self,
    ) -> impl Future<Output = ProviderResult<Arc<[RemoteContentType]>>> + Send;

    /// Look up one content type, from the cache when it is already filled.
    fn content_type(
        &self,
        id: &str,
    ) -> impl Future<Output = ProviderResult<RemoteContentType>> + Send;

    /// Content types if a previous call already fetched them.
    fn cached_content_types(&self) -> Option<Arc<[RemoteContentType]>>;
}

/// Fetches entries for display as read-only, live content.
pub trait EntryFetcher {
    /// Fetch an entry with all locales, reported as published.
    fn fetch_entry(&self, id: &str) -> impl Future<Output = ProviderResult<RemoteEntry>> + Send;
}

/// Mark an entry as published at its current revision.
///
/// Cross-space entries are read-only here, so they always render as live.
pub fn as_published(mut entry: RemoteEntry) -> RemoteEntry {
    let revision = entry.sys.revision;
    entry.sys.version = Some(revision);
    entry.sys.published_version = Some(revision);
    entry
}

pub struct RemoteHandle<A> {
    credentials: Credentials,
    api: A,
    content_types: OnceCell<Arc<[RemoteContentType]>>,
}

impl<A: ContentApi> RemoteHandle<A> {
    pub fn new(api: A, credentials: Credentials) -> Self {
        Self {
            credentials,
            api,
            content_types: OnceCell::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }
}

impl<A: ContentApi> ContentTypeCache for RemoteHandle<A> {
    async fn content_types(&self) -> ProviderResult<Arc<[RemoteContentType]>> {
        let types = self
            .content_types
            .get_or_try_init(|| async {
                let types = self.api.get_content_types().await?;
                crate::debug!("client"; "cached {} content types for {}", types.len(), self.credentials.space_id);
                Ok::<_, crate::provider::ProviderError>(Arc::from(types))
            })
            .await?;
        Ok(Arc::clone(types))
    }

    async fn content_type(&self, id: &str) -> ProviderResult<RemoteContentType> {
        if let Some(found) = self
            .content_types
            .get()
            .and_then(|types| types.iter().find(|ct| ct.id == id))
        {
            return Ok(found.clone());
        }
        self.api.get_content_type(id).await
    }

    fn cached_content_types(&self) -> Option<Arc<[RemoteContentType]>> {
        self.content_types.get().cloned()
    }
}

impl<A: ContentApi> EntryFetcher for RemoteHandle<A> {
    async fn fetch_entry(&self, id: &str) -> ProviderResult<RemoteEntry> {
        self.api.get_entry(id, true).await.map(as_published)
    }
}
