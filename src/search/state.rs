//! Observable state of one search session.

use super::ContentTypeFilter;
use crate::provider::RemoteEntry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// Empty query, nothing pending
    #[default]
    Idle,
    /// Input received, waiting for the debounce window to close
    Debouncing,
    /// Request issued, waiting for its response
    Querying,
    Results,
    /// The latest request matched nothing
    Empty,
    /// The latest request failed; previous results are kept
    Failed(String),
}

/// What the result list shows when it has no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    TypeToSearch,
    NoEntriesFound,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            Self::TypeToSearch => "Type to search for entries",
            Self::NoEntriesFound => "No entries found.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    pub query: String,
    pub filter: ContentTypeFilter,
    pub phase: SearchPhase,
    pub entries: Vec<RemoteEntry>,
    pub selected: Option<RemoteEntry>,
    /// A request is in flight
    pub loading: bool,
    /// Sequence number of the response currently displayed
    pub applied: Option<u64>,
}

impl SearchView {
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.entries.is_empty() {
            return None;
        }
        if self.query.trim().is_empty() {
            return Some(EmptyState::TypeToSearch);
        }
        (self.phase == SearchPhase::Empty).then_some(EmptyState::NoEntriesFound)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_ref().map(RemoteEntry::id)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            SearchPhase::Failed(message) => Some(message),
            _ => None,
        }
    }
}
