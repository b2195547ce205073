//! Persisted cross-space link record.
//!
//! The field stores `{ "sys": <CrossSpaceLink> }`. Values written before
//! environments were supported lack `environment` and may use the legacy
//! link type `CrossSpaceEntry`; both still read.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::provider::LinkRef;
use crate::space::{DEFAULT_ENVIRONMENT, composite_id, normalize_environment};

pub const LINK_TYPE: &str = "CrossSpaceLink";
const LEGACY_LINK_TYPE: &str = "CrossSpaceEntry";

#[derive(Debug, Error)]
pub enum LinkParseError {
    #[error("field value is not a cross-space link: {0}")]
    Shape(#[from] serde_json::Error),

    #[error("unsupported link `{kind}/{link_type}`")]
    Unsupported { kind: String, link_type: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSpaceLink {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(deserialize_with = "deserialize_link_type")]
    pub link_type: String,
    /// Remote entry id
    pub id: String,
    pub space: LinkRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<LinkRef>,
}

fn deserialize_link_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(if raw == LEGACY_LINK_TYPE {
        LINK_TYPE.to_string()
    } else {
        raw
    })
}

#[derive(Deserialize)]
struct Envelope {
    sys: CrossSpaceLink,
}

impl CrossSpaceLink {
    pub fn new(entry_id: &str, space_id: &str, environment: &str) -> Self {
        Self {
            kind: "Link".to_string(),
            link_type: LINK_TYPE.to_string(),
            id: entry_id.to_string(),
            space: LinkRef::new("Space", space_id),
            environment: Some(LinkRef::new(
                "Environment",
                normalize_environment(Some(environment)),
            )),
        }
    }

    /// Parse a stored field value, enveloped (`{"sys": ...}`) or bare.
    pub fn from_field_value(value: &Value) -> Result<Self, LinkParseError> {
        let link = match value.get("sys") {
            Some(_) => serde_json::from_value::<Envelope>(value.clone())?.sys,
            None => serde_json::from_value::<Self>(value.clone())?,
        };

        if link.kind != "Link" || link.link_type != LINK_TYPE {
            return Err(LinkParseError::Unsupported {
                kind: link.kind,
                link_type: link.link_type,
            });
        }
        Ok(link)
    }

    /// Field value to persist: `{ "sys": link }`.
    pub fn to_field_value(&self) -> Value {
        serde_json::json!({ "sys": self })
    }

    pub fn space_id(&self) -> &str {
        self.space.id()
    }

    pub fn environment(&self) -> &str {
        normalize_environment(self.environment.as_ref().map(LinkRef::id))
    }

    /// Composite id of the space configuration this link needs.
    pub fn config_id(&self) -> String {
        composite_id(self.space_id(), Some(self.environment()))
    }

    /// Web app URL for editing the entry in its own space.
    pub fn edit_url(&self, app_url: &Url) -> Option<Url> {
        let mut url = app_url.clone();
        {
            let mut path = url.path_segments_mut().ok()?;
            path.pop_if_empty().push("spaces").push(self.space_id());
            if self.environment() != DEFAULT_ENVIRONMENT {
                path.push("environments").push(self.environment());
            }
            path.push("entries").push(&self.id);
        }
        Some(url)
    }
}
