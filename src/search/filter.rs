//! Content-type filter for the picker's dropdown.

use crate::provider::RemoteContentType;

/// Dropdown value meaning "every content type". Never sent to the provider.
pub const ANY_CONTENT_TYPE: &str = "any";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentTypeFilter {
    #[default]
    Any,
    Only(String),
}

impl ContentTypeFilter {
    /// Parse a dropdown value; blank or the `any` sentinel mean [`Self::Any`].
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" | ANY_CONTENT_TYPE => Self::Any,
            id => Self::Only(id.to_string()),
        }
    }

    /// Content type id to send with a search, if any.
    pub fn as_query(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Only(id) => Some(id),
        }
    }

    /// Dropdown value.
    pub fn value(&self) -> &str {
        self.as_query().unwrap_or(ANY_CONTENT_TYPE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub filter: ContentTypeFilter,
    pub label: String,
}

/// Dropdown options: "Any" first, then content types by name.
///
/// Names compare case-sensitively; ids break ties so the order is stable.
pub fn content_type_options(types: &[RemoteContentType]) -> Vec<FilterOption> {
    let mut sorted: Vec<&RemoteContentType> = types.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    std::iter::once(FilterOption {
        filter: ContentTypeFilter::Any,
        label: "Any".to_string(),
    })
    .chain(sorted.into_iter().map(|ct| FilterOption {
        filter: ContentTypeFilter::Only(ct.id.clone()),
        label: ct.name.clone(),
    }))
    .collect()
}
