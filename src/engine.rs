//! Engine facade: the registry, the client cache and the operations the
//! host calls.
//!
//! The registry lives in an [`ArcSwap`] and is replaced wholesale on every
//! change. Each replacement bumps a generation counter so watchers know to
//! resolve again.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use url::Url;

use crate::client::ClientCache;
use crate::debug;
use crate::error::{ConfigurationError, EngineError};
use crate::link::{ValidationOutcome, build_link, validate_config};
use crate::provider::{Connector, RemoteEntry};
use crate::resolve::{CrossSpaceLink, ResolveOutcome, resolve};
use crate::search::{ContentTypeFilter, DEBOUNCE_MS, SearchSession};
use crate::space::{
    InstallationParameters, SpaceConfigRegistry, SpaceConfiguration, SpaceDraft, SpaceSummary,
};

pub const DEFAULT_APP_URL: &str = "https://app.contentful.com";

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub debounce: Duration,
    /// Web app root used for edit links
    pub app_url: Url,
}

impl EngineSettings {
    pub fn new(app_url: Url) -> Self {
        Self {
            debounce: Duration::from_millis(DEBOUNCE_MS),
            app_url,
        }
    }
}

/// Registry as of one generation.
#[derive(Debug, Default)]
pub struct RegistrySnapshot {
    pub generation: u64,
    pub registry: SpaceConfigRegistry,
}

pub struct Engine<C: Connector> {
    settings: EngineSettings,
    registry: ArcSwap<RegistrySnapshot>,
    /// Serializes registry writers; readers never take it
    write: Mutex<()>,
    clients: ClientCache<C>,
    active: AtomicBool,
}

impl<C: Connector> Engine<C> {
    /// `parameters` is `None` when the host supplied no configuration; the
    /// engine then stays inactive until a space is saved.
    pub fn new(
        settings: EngineSettings,
        parameters: Option<InstallationParameters>,
        connector: C,
    ) -> Self {
        let active = parameters.is_some();
        let registry = parameters
            .map(|p| p.registry())
            .unwrap_or_default();

        Self {
            settings,
            registry: ArcSwap::from_pointee(RegistrySnapshot {
                generation: 0,
                registry,
            }),
            write: Mutex::new(()),
            clients: ClientCache::new(connector),
            active: AtomicBool::new(active),
        }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn generation(&self) -> u64 {
        self.registry.load().generation
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.registry.load_full()
    }

    pub fn clients(&self) -> &ClientCache<C> {
        &self.clients
    }

    /// Configured spaces in insertion order. Tokens are not included.
    pub fn list_configured_spaces(&self) -> Vec<SpaceSummary> {
        self.registry.load().registry.summaries()
    }

    /// Current parameters, for the host to persist.
    pub fn parameters(&self) -> InstallationParameters {
        InstallationParameters::from_registry(&self.registry.load().registry)
    }

    pub fn check_installable(&self) -> Result<(), EngineError> {
        if !self.is_active() {
            return Err(EngineError::Inactive);
        }
        self.parameters().check_installable()?;
        Ok(())
    }

    pub async fn resolve_link(&self, link: &CrossSpaceLink) -> ResolveOutcome {
        let snapshot = self.snapshot();
        resolve(link, &snapshot.registry, &self.clients).await
    }

    /// Where the linked entry can be edited.
    pub fn edit_url(&self, link: &CrossSpaceLink) -> Option<Url> {
        link.edit_url(&self.settings.app_url)
    }

    fn configuration(&self, id: &str) -> Result<SpaceConfiguration, EngineError> {
        if !self.is_active() {
            return Err(EngineError::Inactive);
        }
        self.registry
            .load()
            .registry
            .get(id)
            .cloned()
            .ok_or_else(|| ConfigurationError::Missing { id: id.to_string() }.into())
    }

    /// Start an empty search session against the configuration `id`.
    pub fn search(&self, id: &str) -> Result<SearchSession<C::Api>, EngineError> {
        let config = self.configuration(id)?;
        let handle = self.clients.handle(&config);
        Ok(SearchSession::start(config, handle, self.settings.debounce))
    }

    /// Start a session with an initial query and filter.
    pub async fn search_with(
        &self,
        id: &str,
        query: &str,
        filter: ContentTypeFilter,
    ) -> Result<SearchSession<C::Api>, EngineError> {
        let session = self.search(id)?;
        session.set_content_type(filter).await;
        session.set_query(query).await;
        Ok(session)
    }

    pub fn build_link_from_selection(
        &self,
        entry: &RemoteEntry,
        config: &SpaceConfiguration,
    ) -> CrossSpaceLink {
        build_link(entry, config)
    }

    /// Validate `draft` and, if accepted, add it (or replace `replacing`).
    ///
    /// Registry conflicts detectable without a round trip are reported
    /// before any request is made.
    pub async fn validate_and_save(
        &self,
        draft: &SpaceDraft,
        replacing: Option<&str>,
    ) -> Result<ValidationOutcome, EngineError> {
        self.precheck(draft, replacing)?;

        let outcome = validate_config(draft, self.clients.connector()).await;
        let ValidationOutcome::Accepted { config } = &outcome else {
            return Ok(outcome);
        };

        let config = config.clone();
        match replacing {
            Some(id) => {
                self.update(|registry| registry.replace(id, config).map(drop))?;
            }
            None => self.update(|registry| registry.add(config))?,
        }
        self.active.store(true, Ordering::Release);
        Ok(outcome)
    }

    fn precheck(&self, draft: &SpaceDraft, replacing: Option<&str>) -> Result<(), EngineError> {
        let snapshot = self.registry.load();
        let registry = &snapshot.registry;
        let id = draft.composite_id();

        if let Some(old) = replacing
            && !registry.contains(old)
        {
            return Err(ConfigurationError::Missing { id: old.to_string() }.into());
        }

        let collides = registry
            .get(&id)
            .is_some_and(|existing| {
                replacing != Some(existing.id.as_str()) && existing.credentials() != draft.credentials()
            });
        if collides {
            return Err(ConfigurationError::Duplicate { id }.into());
        }
        Ok(())
    }

    pub fn remove_space(&self, id: &str) -> Result<SpaceConfiguration, EngineError> {
        self.update(|registry| registry.remove(id))
    }

    /// Apply `change` to a copy of the registry and publish it.
    fn update<T>(
        &self,
        change: impl FnOnce(&mut SpaceConfigRegistry) -> Result<T, ConfigurationError>,
    ) -> Result<T, EngineError> {
        let _guard = self.write.lock();
        let current = self.registry.load_full();

        let mut registry = current.registry.clone();
        let out = change(&mut registry)?;

        let evicted = self.clients.retain(&registry);
        let generation = current.generation + 1;
        self.registry.store(Arc::new(RegistrySnapshot {
            generation,
            registry,
        }));
        debug!("engine"; "registry generation {} ({} handles evicted)", generation, evicted);
        Ok(out)
    }
}
