//! Lazily built, memoized client handles.
//!
//! One handle per configuration. A hit requires the full
//! `(spaceId, token, environment)` tuple to match; any change drops the old
//! handle and the next access builds a new one. Building performs no I/O.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::RemoteHandle;
use crate::provider::Connector;
use crate::space::{SpaceConfigRegistry, SpaceConfiguration};

pub type Handle<C> = Arc<RemoteHandle<<C as Connector>::Api>>;

pub struct ClientCache<C: Connector> {
    connector: C,
    /// Composite id → handle bound to that configuration's credentials
    handles: Mutex<FxHashMap<String, Handle<C>>>,
}

impl<C: Connector> ClientCache<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            handles: Mutex::new(FxHashMap::default()),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Handle for `config`, built on first use.
    pub fn handle(&self, config: &SpaceConfiguration) -> Handle<C> {
        let credentials = config.credentials();
        let mut handles = self.handles.lock();

        if let Some(handle) = handles.get(&config.id)
            && *handle.credentials() == credentials
        {
            return Arc::clone(handle);
        }

        crate::debug!("client"; "new handle for {}", config.id);
        let handle = Arc::new(RemoteHandle::new(
            self.connector.connect(&credentials),
            credentials,
        ));
        handles.insert(config.id.clone(), Arc::clone(&handle));
        handle
    }

    /// Drop handles whose configuration is gone or changed.
    ///
    /// Returns the number of evicted handles.
    pub fn retain(&self, registry: &SpaceConfigRegistry) -> usize {
        let mut handles = self.handles.lock();
        let before = handles.len();
        handles.retain(|id, handle| {
            registry
                .get(id)
                .is_some_and(|config| config.credentials() == *handle.credentials())
        });
        let evicted = before - handles.len();
        if evicted > 0 {
            crate::debug!("client"; "evicted {} stale handles", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.handles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.lock().is_empty()
    }
}
