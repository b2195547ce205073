//! In-memory provider for tests.
//!
//! Checks credentials the way the delivery API does, records every request,
//! and can delay individual search queries to provoke out-of-order responses.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use super::{
    ContentApi, Connector, EntryQuery, EntrySys, LinkRef, ProviderError, ProviderResult,
    RemoteContentType, RemoteEntry, RemoteLocale, RemoteSpace,
};
use crate::space::Credentials;

pub const INVALID_TOKEN_MESSAGE: &str =
    "The access token you sent could not be found or is invalid.";
pub const NOT_FOUND_MESSAGE: &str = "The resource could not be found.";

#[derive(Debug, Clone)]
pub struct MockSpace {
    pub name: String,
    pub token: String,
    pub environments: Vec<String>,
    pub content_types: Vec<RemoteContentType>,
    pub locales: Vec<RemoteLocale>,
    pub entries: Vec<RemoteEntry>,
}

impl MockSpace {
    pub fn new(name: &str, token: &str) -> Self {
        Self {
            name: name.to_string(),
            token: token.to_string(),
            environments: vec!["master".to_string()],
            content_types: Vec::new(),
            locales: vec![
                RemoteLocale {
                    code: "de-DE".into(),
                    name: "German".into(),
                    default: false,
                },
                RemoteLocale {
                    code: "en-US".into(),
                    name: "English".into(),
                    default: true,
                },
            ],
            entries: Vec::new(),
        }
    }

    pub fn with_environment(mut self, environment: &str) -> Self {
        self.environments.push(environment.to_string());
        self
    }

    pub fn with_content_type(mut self, id: &str, name: &str, display_field: Option<&str>) -> Self {
        self.content_types.push(RemoteContentType {
            id: id.to_string(),
            name: name.to_string(),
            display_field: display_field.map(str::to_string),
        });
        self
    }

    pub fn with_entry(mut self, entry: RemoteEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// Entry fixture without space/environment; the mock fills those in.
pub fn entry(id: &str, content_type: &str, revision: u64, fields: Value) -> RemoteEntry {
    let fields = match fields {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    RemoteEntry {
        sys: EntrySys {
            id: id.to_string(),
            revision,
            content_type: LinkRef::new("ContentType", content_type),
            space: None,
            environment: None,
            created_at: Some("2024-01-01T00:00:00Z".into()),
            updated_at: Some("2024-01-02T00:00:00Z".into()),
            version: None,
            published_version: None,
        },
        fields,
    }
}

#[derive(Default)]
struct MockState {
    spaces: FxHashMap<String, MockSpace>,
    connects: usize,
    requests: Vec<String>,
    latency: FxHashMap<String, Duration>,
    offline: bool,
    fail_search: bool,
}

#[derive(Clone, Default)]
pub struct MockRemote {
    state: Arc<Mutex<MockState>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_space(self, space_id: &str, space: MockSpace) -> Self {
        self.state.lock().spaces.insert(space_id.to_string(), space);
        self
    }

    pub fn connector(&self) -> MockConnector {
        MockConnector {
            remote: self.clone(),
        }
    }

    /// Number of handles built so far.
    pub fn connects(&self) -> usize {
        self.state.lock().connects
    }

    pub fn requests(&self) -> Vec<String> {
        self.state.lock().requests.clone()
    }

    pub fn request_count(&self, prefix: &str) -> usize {
        self.state
            .lock()
            .requests
            .iter()
            .filter(|r| r.starts_with(prefix))
            .count()
    }

    /// Delay responses to the search text `query`.
    pub fn set_latency(&self, query: &str, delay: Duration) {
        self.state.lock().latency.insert(query.to_string(), delay);
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    pub fn set_fail_search(&self, fail: bool) {
        self.state.lock().fail_search = fail;
    }

    pub fn revoke_token(&self, space_id: &str) {
        if let Some(space) = self.state.lock().spaces.get_mut(space_id) {
            space.token = "revoked".into();
        }
    }

    pub fn delete_entry(&self, space_id: &str, entry_id: &str) {
        if let Some(space) = self.state.lock().spaces.get_mut(space_id) {
            space.entries.retain(|e| e.id() != entry_id);
        }
    }
}

pub struct MockConnector {
    remote: MockRemote,
}

impl Connector for MockConnector {
    type Api = MockApi;

    fn connect(&self, credentials: &Credentials) -> MockApi {
        self.remote.state.lock().connects += 1;
        MockApi {
            remote: self.remote.clone(),
            credentials: credentials.clone(),
        }
    }
}

pub struct MockApi {
    remote: MockRemote,
    credentials: Credentials,
}

impl MockApi {
    /// Record the request and authorize it against the stored space.
    fn authorize(&self, request: String, needs_environment: bool) -> ProviderResult<MockSpace> {
        let mut state = self.remote.state.lock();
        state.requests.push(request);

        if state.offline {
            return Err(ProviderError::network("connection refused"));
        }

        let space = state
            .spaces
            .get(&self.credentials.space_id)
            .ok_or_else(|| ProviderError::not_found(NOT_FOUND_MESSAGE))?;

        if space.token != self.credentials.token() {
            return Err(ProviderError::invalid_token(INVALID_TOKEN_MESSAGE));
        }

        if needs_environment && !space.environments.contains(&self.credentials.environment) {
            return Err(ProviderError::not_found(NOT_FOUND_MESSAGE));
        }

        Ok(space.clone())
    }

    fn stamp(&self, mut entry: RemoteEntry) -> RemoteEntry {
        entry
            .sys
            .space
            .get_or_insert_with(|| LinkRef::new("Space", &self.credentials.space_id));
        entry
            .sys
            .environment
            .get_or_insert_with(|| LinkRef::new("Environment", &self.credentials.environment));
        entry
    }
}

fn matches_text(value: &Value, needle: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(needle),
        Value::Object(map) => map.values().any(|v| matches_text(v, needle)),
        Value::Array(items) => items.iter().any(|v| matches_text(v, needle)),
        _ => false,
    }
}

impl ContentApi for MockApi {
    async fn get_space(&self) -> ProviderResult<RemoteSpace> {
        let space = self.authorize("space".into(), false)?;
        Ok(RemoteSpace { name: space.name })
    }

    async fn get_content_types(&self) -> ProviderResult<Vec<RemoteContentType>> {
        Ok(self.authorize("content_types".into(), true)?.content_types)
    }

    async fn get_content_type(&self, id: &str) -> ProviderResult<RemoteContentType> {
        self.authorize(format!("content_type:{id}"), true)?
            .content_types
            .into_iter()
            .find(|ct| ct.id == id)
            .ok_or_else(|| ProviderError::not_found(NOT_FOUND_MESSAGE))
    }

    async fn get_locales(&self) -> ProviderResult<Vec<RemoteLocale>> {
        Ok(self.authorize("locales".into(), true)?.locales)
    }

    async fn get_entry(&self, id: &str, _all_locales: bool) -> ProviderResult<RemoteEntry> {
        let entry = self
            .authorize(format!("entry:{id}"), true)?
            .entries
            .into_iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| ProviderError::not_found(NOT_FOUND_MESSAGE))?;
        Ok(self.stamp(entry))
    }

    async fn get_entries(&self, query: &EntryQuery) -> ProviderResult<Vec<RemoteEntry>> {
        let request = match &query.content_type {
            Some(ct) => format!("entries:{}:{ct}", query.text),
            None => format!("entries:{}", query.text),
        };
        let space = self.authorize(request, true)?;

        let (delay, fail) = {
            let state = self.remote.state.lock();
            (state.latency.get(&query.text).copied(), state.fail_search)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(ProviderError::network("search timed out"));
        }

        let needle = query.text.to_lowercase();
        Ok(space
            .entries
            .into_iter()
            .filter(|e| {
                query
                    .content_type
                    .as_deref()
                    .is_none_or(|ct| e.content_type_id() == ct)
            })
            .filter(|e| e.fields.values().any(|v| matches_text(v, &needle)))
            .map(|e| self.stamp(e))
            .collect())
    }
}
