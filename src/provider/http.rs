//! Content Delivery API over HTTP.
//!
//! One `reqwest::Client` is shared by every handle so connections are pooled
//! for the lifetime of the process. A handle is just that client plus the
//! credentials it sends.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use url::Url;

use super::{
    Collection, ContentApi, Connector, EntryQuery, ProviderError, ProviderResult,
    RemoteContentType, RemoteEntry, RemoteLocale, RemoteSpace,
};
use crate::space::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://cdn.contentful.com";

/// Upper bound on items per collection request.
const PAGE_LIMIT: &str = "1000";
/// Picker results are capped the way the delivery API caps a single page.
const SEARCH_LIMIT: &str = "100";

pub struct HttpConnector {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpConnector {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid provider url `{base_url}`"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("xspace/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;
        Ok(Self { client, base_url })
    }
}

impl Connector for HttpConnector {
    type Api = HttpApi;

    fn connect(&self, credentials: &Credentials) -> HttpApi {
        HttpApi {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            credentials: credentials.clone(),
        }
    }
}

pub struct HttpApi {
    client: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl HttpApi {
    /// `{base}/spaces/{space}/{segments..}`
    fn space_url(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ProviderError::network("provider url cannot carry a path"))?;
            path.pop_if_empty()
                .push("spaces")
                .push(&self.credentials.space_id);
            path.extend(segments);
        }
        Ok(url)
    }

    /// `{base}/spaces/{space}/environments/{env}/{segments..}`
    fn env_url(&self, segments: &[&str]) -> ProviderResult<Url> {
        let mut all = vec!["environments", self.credentials.environment.as_str()];
        all.extend_from_slice(segments);
        self.space_url(&all)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> ProviderResult<T> {
        crate::debug!("provider"; "GET {}", url.path());

        let response = self
            .client
            .get(url)
            .bearer_auth(self.credentials.token())
            .send()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ProviderError::network(format!("unreadable response: {e}")));
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(ProviderError::from_body(status.as_u16(), &body))
    }
}

impl ContentApi for HttpApi {
    async fn get_space(&self) -> ProviderResult<RemoteSpace> {
        let url = self.space_url(&[])?;
        self.fetch(url).await
    }

    async fn get_content_types(&self) -> ProviderResult<Vec<RemoteContentType>> {
        let mut url = self.env_url(&["content_types"])?;
        url.query_pairs_mut().append_pair("limit", PAGE_LIMIT);
        let page: Collection<RemoteContentType> = self.fetch(url).await?;
        Ok(page.items)
    }

    async fn get_content_type(&self, id: &str) -> ProviderResult<RemoteContentType> {
        let url = self.env_url(&["content_types", id])?;
        self.fetch(url).await
    }

    async fn get_locales(&self) -> ProviderResult<Vec<RemoteLocale>> {
        let url = self.env_url(&["locales"])?;
        let page: Collection<RemoteLocale> = self.fetch(url).await?;
        Ok(page.items)
    }

    async fn get_entry(&self, id: &str, all_locales: bool) -> ProviderResult<RemoteEntry> {
        let mut url = self.env_url(&["entries", id])?;
        if all_locales {
            url.query_pairs_mut().append_pair("locale", "*");
        }
        self.fetch(url).await
    }

    async fn get_entries(&self, query: &EntryQuery) -> ProviderResult<Vec<RemoteEntry>> {
        let mut url = self.env_url(&["entries"])?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.text);
            if let Some(content_type) = &query.content_type {
                pairs.append_pair("content_type", content_type);
            }
            pairs.append_pair("limit", SEARCH_LIMIT);
        }
        let page: Collection<RemoteEntry> = self.fetch(url).await?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str, environment: &str) -> HttpApi {
        let connector = HttpConnector::new(base, Duration::from_secs(1)).unwrap();
        connector.connect(&Credentials::new("abc123", "secret", environment))
    }

    #[test]
    fn test_space_url() {
        let api = api("https://cdn.example.com", "master");
        assert_eq!(
            api.space_url(&[]).unwrap().as_str(),
            "https://cdn.example.com/spaces/abc123"
        );
    }

    #[test]
    fn test_env_url_with_base_path() {
        let api = api("https://proxy.example.com/cda/", "staging");
        assert_eq!(
            api.env_url(&["entries", "e 1"]).unwrap().as_str(),
            "https://proxy.example.com/cda/spaces/abc123/environments/staging/entries/e%201"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(HttpConnector::new("not a url", Duration::from_secs(1)).is_err());
    }
}
