//! Result of hydrating a link.

use serde::Serialize;

use crate::card::{EntryCard, card_for};
use crate::provider::{RemoteContentType, RemoteEntry, RemoteLocale};

/// Everything needed to render a linked entry. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSpaceEntryData {
    pub entry: RemoteEntry,
    pub content_type: RemoteContentType,
    pub default_locale: RemoteLocale,
}

impl CrossSpaceEntryData {
    pub fn card(&self) -> EntryCard {
        card_for(
            &self.entry,
            &self.content_type,
            Some(&self.default_locale.code),
        )
    }
}

/// Every terminal state of a resolution. Resolution never fails otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ResolveOutcome {
    /// Boxed to keep the missing variants small
    Resolved(Box<CrossSpaceEntryData>),
    /// No configuration for the link's space/environment.
    ConfigMissing { id: String },
    /// The entry or its content type no longer exists.
    EntryMissing { id: String },
    /// Network or authentication failure.
    Unreachable { reason: String },
}

impl ResolveOutcome {
    pub fn data(&self) -> Option<&CrossSpaceEntryData> {
        match self {
            Self::Resolved(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Short label for the "missing entry" card.
    pub fn summary(&self) -> String {
        match self {
            Self::Resolved(data) => data.card().title,
            Self::ConfigMissing { id } => format!("space `{id}` is not configured"),
            Self::EntryMissing { id } => format!("entry `{id}` is missing or inaccessible"),
            Self::Unreachable { reason } => format!("space unreachable: {reason}"),
        }
    }
}
