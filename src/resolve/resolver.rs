//! Link hydration.
//!
//! ```text
//! link ──lookup──> SpaceConfiguration ──ClientCache──> RemoteHandle
//!                                                         │
//!                         ┌───────────────────────────────┤ (parallel)
//!                     getLocales                    getEntry(*)
//!                         │                               │
//!                   default locale                 getContentType
//!                         └───────────> CrossSpaceEntryData
//! ```

use crate::client::{ClientCache, ContentTypeCache, EntryFetcher, RemoteHandle};
use crate::provider::{ContentApi, Connector, ProviderError, RemoteLocale};
use crate::space::SpaceConfigRegistry;

use super::{CrossSpaceEntryData, CrossSpaceLink, ResolveOutcome};

/// Resolve `link` against `registry`. Never fails; see [`ResolveOutcome`].
pub async fn resolve<C: Connector>(
    link: &CrossSpaceLink,
    registry: &SpaceConfigRegistry,
    clients: &ClientCache<C>,
) -> ResolveOutcome {
    let Some(config) = registry.lookup(link.space_id(), Some(link.environment())) else {
        crate::debug!("resolve"; "no configuration for {}", link.config_id());
        return ResolveOutcome::ConfigMissing {
            id: link.config_id(),
        };
    };

    let handle = clients.handle(config);
    resolve_with(&*handle, link).await
}

/// Resolve `link` through an existing handle.
pub async fn resolve_with<A: ContentApi>(
    handle: &RemoteHandle<A>,
    link: &CrossSpaceLink,
) -> ResolveOutcome {
    let (locales, entry) = tokio::join!(handle.api().get_locales(), handle.fetch_entry(&link.id));

    let entry = match entry {
        Ok(entry) => entry,
        Err(e) => return failure(link, "entry", e),
    };

    let default_locale = match locales.map(default_locale) {
        Ok(Some(locale)) => locale,
        Ok(None) => {
            return ResolveOutcome::Unreachable {
                reason: format!("space {} reports no locales", link.space_id()),
            };
        }
        Err(e) => return failure(link, "locales", e),
    };

    let content_type = match handle.content_type(entry.content_type_id()).await {
        Ok(content_type) => content_type,
        Err(e) => return failure(link, "content type", e),
    };

    crate::debug!("resolve"; "resolved {} in {}", link.id, link.config_id());
    ResolveOutcome::Resolved(Box::new(CrossSpaceEntryData {
        entry,
        content_type,
        default_locale,
    }))
}

/// The locale flagged as default, else the first one listed.
pub fn default_locale(locales: Vec<RemoteLocale>) -> Option<RemoteLocale> {
    let index = locales.iter().position(|l| l.default).unwrap_or(0);
    locales.into_iter().nth(index)
}

fn failure(link: &CrossSpaceLink, what: &str, err: ProviderError) -> ResolveOutcome {
    crate::debug!("resolve"; "{} for {} failed ({}): {}", what, link.id, err.kind.label(), err.message);
    if err.is_not_found() {
        ResolveOutcome::EntryMissing {
            id: link.id.clone(),
        }
    } else {
        ResolveOutcome::Unreachable {
            reason: err.message,
        }
    }
}
