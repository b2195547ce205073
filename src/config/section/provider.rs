//! `[provider]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [provider]
//! base_url = "https://cdn.contentful.com"   # Delivery API root
//! app_url = "https://app.contentful.com"    # Web app root for edit links
//! timeout = 10                              # Seconds per request
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::engine::DEFAULT_APP_URL;
use crate::provider::http::DEFAULT_BASE_URL;

const BASE_URL: FieldPath = FieldPath::new("provider.base_url");
const APP_URL: FieldPath = FieldPath::new("provider.app_url");
const TIMEOUT: FieldPath = FieldPath::new("provider.timeout");

/// Remote content provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub app_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            timeout: 10,
        }
    }
}

impl ProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn app_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.app_url)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        for (field, value) in [(BASE_URL, &self.base_url), (APP_URL, &self.app_url)] {
            match Url::parse(value) {
                Ok(url) if url.cannot_be_a_base() => {
                    diag.error(field, format!("`{value}` cannot be used as a base URL"));
                }
                Ok(_) => {}
                Err(e) => diag.error_with_hint(
                    field,
                    format!("invalid URL `{value}`: {e}"),
                    "use an absolute URL such as https://cdn.contentful.com",
                ),
            }
        }
        if self.timeout == 0 {
            diag.error(TIMEOUT, "timeout must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_provider_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.provider.base_url, "https://cdn.contentful.com");
        assert_eq!(config.provider.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_provider_validation() {
        let config = test_parse_config("[provider]\nbase_url = \"nope\"\ntimeout = 0");
        let mut diag = ConfigDiagnostics::new();
        config.provider.validate(&mut diag);

        let fields: Vec<_> = diag.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, [BASE_URL, TIMEOUT]);
    }
}
