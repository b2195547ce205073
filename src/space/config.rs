//! A single remote-space configuration and its composite identity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "master";

/// Normalize an optional environment: blank means [`DEFAULT_ENVIRONMENT`].
pub fn normalize_environment(environment: Option<&str>) -> &str {
    match environment.map(str::trim) {
        Some(env) if !env.is_empty() => env,
        _ => DEFAULT_ENVIRONMENT,
    }
}

/// Composite id of a space configuration: `spaceId-environment`.
pub fn composite_id(space_id: &str, environment: Option<&str>) -> String {
    format!("{}-{}", space_id.trim(), normalize_environment(environment))
}

/// Credentials a client handle is bound to. Also the client cache key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
    pub space_id: String,
    pub environment: String,
    token: String,
}

impl Credentials {
    pub fn new(
        space_id: impl Into<String>,
        token: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            space_id: space_id.into(),
            environment: environment.into(),
            token: token.into(),
        }
    }

    /// Token for the `Authorization` header. Only provider code reads this.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A configured remote space, as persisted in the installation parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceConfiguration {
    /// Display name, taken from the provider during validation.
    #[serde(default)]
    pub name: String,
    /// Composite key, see [`composite_id`].
    #[serde(default)]
    pub id: String,
    pub space_id: String,
    pub token: String,
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

impl SpaceConfiguration {
    pub fn new(name: impl Into<String>, space_id: &str, token: &str, environment: Option<&str>) -> Self {
        let environment = normalize_environment(environment).to_string();
        Self {
            name: name.into(),
            id: composite_id(space_id, Some(environment.as_str())),
            space_id: space_id.trim().to_string(),
            token: token.trim().to_string(),
            environment,
        }
    }

    /// Recompute derived fields. Returns true if anything changed.
    pub fn normalize(&mut self) -> bool {
        let environment = normalize_environment(Some(self.environment.as_str())).to_string();
        let space_id = self.space_id.trim().to_string();
        let id = composite_id(&space_id, Some(environment.as_str()));
        let changed = id != self.id || environment != self.environment || space_id != self.space_id;
        self.environment = environment;
        self.space_id = space_id;
        self.id = id;
        changed
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.space_id, &self.token, &self.environment)
    }

    pub fn summary(&self) -> SpaceSummary {
        SpaceSummary {
            name: self.name.clone(),
            id: self.id.clone(),
            space_id: self.space_id.clone(),
            environment: self.environment.clone(),
        }
    }
}

impl fmt::Debug for SpaceConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpaceConfiguration")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("space_id", &self.space_id)
            .field("environment", &self.environment)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Token-free view of a configuration for lists and dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceSummary {
    pub name: String,
    pub id: String,
    pub space_id: String,
    pub environment: String,
}

impl SpaceSummary {
    /// `name`, or `name (environment)` outside the default environment.
    pub fn label(&self) -> String {
        if self.environment == DEFAULT_ENVIRONMENT {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.environment)
        }
    }
}

/// User-entered fields of a configuration, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceDraft {
    pub space_id: String,
    pub token: String,
    pub environment: String,
}

impl SpaceDraft {
    pub fn new(space_id: &str, token: &str, environment: &str) -> Self {
        Self {
            space_id: space_id.trim().to_string(),
            token: token.trim().to_string(),
            environment: environment.trim().to_string(),
        }
    }

    pub fn environment(&self) -> &str {
        normalize_environment(Some(self.environment.as_str()))
    }

    pub fn composite_id(&self) -> String {
        composite_id(&self.space_id, Some(self.environment()))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.space_id, &self.token, self.environment())
    }

    /// Pre-fill a draft from an existing configuration (edit flow).
    pub fn from_config(config: &SpaceConfiguration) -> Self {
        Self::new(&config.space_id, &config.token, &config.environment)
    }

    pub fn into_config(self, name: impl Into<String>) -> SpaceConfiguration {
        SpaceConfiguration::new(name, &self.space_id, &self.token, Some(self.environment.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_id() {
        assert_eq!(composite_id("abc", Some("staging")), "abc-staging");
        assert_eq!(composite_id("abc", None), "abc-master");
        assert_eq!(composite_id("abc", Some("")), "abc-master");
        assert_eq!(composite_id("abc", Some("   ")), "abc-master");
    }

    #[test]
    fn test_normalize_fixes_stale_id() {
        let mut config = SpaceConfiguration {
            name: "Blog".into(),
            id: "abc".into(),
            space_id: " abc ".into(),
            token: "t".into(),
            environment: String::new(),
        };
        assert!(config.normalize());
        assert_eq!(config.id, "abc-master");
        assert_eq!(config.space_id, "abc");
        assert_eq!(config.environment, "master");
        assert!(!config.normalize());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = SpaceConfiguration::new("Blog", "abc", "super-secret", None);
        let debug = format!("{config:?} {:?}", config.credentials());
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    fn test_label() {
        let master = SpaceConfiguration::new("Blog", "abc", "t", None).summary();
        assert_eq!(master.label(), "Blog");
        let staging = SpaceConfiguration::new("Blog", "abc", "t", Some("staging")).summary();
        assert_eq!(staging.label(), "Blog (staging)");
    }

    #[test]
    fn test_parameters_shape() {
        let config: SpaceConfiguration = serde_json::from_str(
            r#"{"name":"Blog","id":"abc-master","spaceId":"abc","token":"t"}"#,
        )
        .unwrap();
        assert_eq!(config.environment, "master");
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["spaceId"], "abc");
    }
}
