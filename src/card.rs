//! Display projection of an entry: title, content type name, status.

use serde::Serialize;
use serde_json::Value;

use crate::provider::{RemoteContentType, RemoteEntry};

/// Field read when a content type declares no display field.
const FALLBACK_DISPLAY_FIELD: &str = "title";
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Published,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryCard {
    pub id: String,
    pub title: String,
    pub content_type: String,
    pub status: EntryStatus,
}

/// Build a card, or `None` if the entry's content type is unknown.
pub fn entry_card(
    entry: &RemoteEntry,
    content_types: &[RemoteContentType],
    locale: Option<&str>,
) -> Option<EntryCard> {
    let content_type = content_types
        .iter()
        .find(|ct| ct.id == entry.content_type_id())?;
    Some(card_for(entry, content_type, locale))
}

pub fn card_for(
    entry: &RemoteEntry,
    content_type: &RemoteContentType,
    locale: Option<&str>,
) -> EntryCard {
    EntryCard {
        id: entry.id().to_string(),
        title: entry_title(entry, content_type, locale).unwrap_or_else(|| UNTITLED.to_string()),
        content_type: content_type.name.clone(),
        status: EntryStatus::Published,
    }
}

/// Value of the display field, localized with `locale` when fields carry
/// every locale.
pub fn entry_title(
    entry: &RemoteEntry,
    content_type: &RemoteContentType,
    locale: Option<&str>,
) -> Option<String> {
    let field = content_type
        .display_field
        .as_deref()
        .unwrap_or(FALLBACK_DISPLAY_FIELD);
    entry
        .fields
        .get(field)
        .and_then(|value| field_text(value, locale))
        .filter(|title| !title.trim().is_empty())
}

fn field_text(value: &Value, locale: Option<&str>) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Object(localized) => {
            let picked = locale
                .and_then(|code| localized.get(code))
                .or_else(|| localized.values().next())?;
            // nested objects are rich values, not locale maps
            match picked {
                Value::Object(_) => None,
                other => field_text(other, None),
            }
        }
        _ => None,
    }
}
