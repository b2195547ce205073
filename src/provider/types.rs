//! Data returned by the content provider.
//!
//! Entries keep the provider's `{sys, fields}` shape because both the link
//! builder and the card projection read `sys`. Content types and locales
//! are flattened to the handful of fields the engine uses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A remote space as reported by `getSpace`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteSpace {
    pub name: String,
}

/// Schema of an entry, reduced to identity and display field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ContentTypeWire")]
pub struct RemoteContentType {
    pub id: String,
    pub name: String,
    /// Field id used as the human-readable title.
    pub display_field: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentTypeWire {
    sys: IdSys,
    name: String,
    #[serde(default)]
    display_field: Option<String>,
}

#[derive(Deserialize)]
struct IdSys {
    id: String,
}

impl From<ContentTypeWire> for RemoteContentType {
    fn from(wire: ContentTypeWire) -> Self {
        Self {
            id: wire.sys.id,
            name: wire.name,
            display_field: wire.display_field.filter(|f| !f.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteLocale {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub default: bool,
}

/// `{ "sys": { "id": ..., "type": "Link", "linkType": ... } }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    #[serde(rename = "type", default = "link_type_default")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    pub id: String,
}

fn link_type_default() -> String {
    "Link".to_string()
}

impl LinkRef {
    pub fn new(link_type: &str, id: impl Into<String>) -> Self {
        Self {
            sys: LinkSys {
                kind: link_type_default(),
                link_type: Some(link_type.to_string()),
                id: id.into(),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }
}

/// Bookkeeping block of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySys {
    pub id: String,
    #[serde(default)]
    pub revision: u64,
    pub content_type: LinkRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<LinkRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<LinkRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    pub sys: EntrySys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RemoteEntry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn content_type_id(&self) -> &str {
        self.sys.content_type.id()
    }
}

/// Parameters of a `getEntries` text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EntryQuery {
    pub text: String,
    /// `None` searches every content type.
    pub content_type: Option<String>,
}

/// `{ "items": [...], "total": n }` collection envelope.
#[derive(Debug, Deserialize)]
pub struct Collection<T> {
    pub items: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_wire() {
        let ct: RemoteContentType = serde_json::from_str(
            r#"{"sys":{"id":"article","type":"ContentType"},"name":"Article","displayField":"headline","fields":[]}"#,
        )
        .unwrap();
        assert_eq!(ct.id, "article");
        assert_eq!(ct.name, "Article");
        assert_eq!(ct.display_field.as_deref(), Some("headline"));
    }

    #[test]
    fn test_content_type_empty_display_field() {
        let ct: RemoteContentType =
            serde_json::from_str(r#"{"sys":{"id":"a"},"name":"A","displayField":""}"#).unwrap();
        assert_eq!(ct.display_field, None);
    }

    #[test]
    fn test_entry_from_wire() {
        let entry: RemoteEntry = serde_json::from_str(
            r#"{
                "sys": {
                    "id": "e1", "type": "Entry", "revision": 4,
                    "contentType": {"sys": {"type": "Link", "linkType": "ContentType", "id": "article"}},
                    "space": {"sys": {"type": "Link", "linkType": "Space", "id": "abc"}},
                    "environment": {"sys": {"id": "master", "type": "Link", "linkType": "Environment"}}
                },
                "fields": {"title": "Hello"}
            }"#,
        )
        .unwrap();
        assert_eq!(entry.id(), "e1");
        assert_eq!(entry.content_type_id(), "article");
        assert_eq!(entry.sys.revision, 4);
        assert_eq!(entry.sys.space.as_ref().map(LinkRef::id), Some("abc"));
        assert_eq!(entry.fields["title"], "Hello");
    }
}
