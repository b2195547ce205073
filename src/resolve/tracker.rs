//! Keeps a field's resolved link fresh.
//!
//! Resolution re-runs whenever the stored link or the registry generation
//! changes, and is served from memory otherwise.

use crate::engine::Engine;
use crate::provider::Connector;

use super::{CrossSpaceLink, ResolveOutcome};

#[derive(Debug, Default)]
pub struct LinkWatcher {
    /// Link and registry generation the current outcome was computed for
    key: Option<(CrossSpaceLink, u64)>,
    outcome: Option<ResolveOutcome>,
}

impl LinkWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current outcome for `link`, resolving again if a dependency changed.
    ///
    /// `None` link (empty field) clears the watcher.
    pub async fn refresh<C: Connector>(
        &mut self,
        link: Option<&CrossSpaceLink>,
        engine: &Engine<C>,
    ) -> Option<&ResolveOutcome> {
        let Some(link) = link else {
            self.key = None;
            self.outcome = None;
            return None;
        };

        let generation = engine.generation();
        let stale = self
            .key
            .as_ref()
            .is_none_or(|(current, seen)| current != link || *seen != generation);

        if stale {
            let outcome = engine.resolve_link(link).await;
            self.key = Some((link.clone(), generation));
            self.outcome = Some(outcome);
        }
        self.outcome.as_ref()
    }

    /// Force the next `refresh` to resolve again.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    pub fn outcome(&self) -> Option<&ResolveOutcome> {
        self.outcome.as_ref()
    }
}
