//! Application configuration for `xspace.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── provider   # [provider]
//! │   ├── search     # [search]
//! │   └── storage    # [storage]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # AppConfig (this file)
//! ```
//!
//! The file is optional: without one every section takes its defaults.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{ProviderConfig, SearchConfig, StorageConfig};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::Cli;
use crate::engine::EngineSettings;
use crate::provider::HttpConnector;
use crate::log;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing xspace.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the loaded config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub provider: ProviderConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration for `cli`.
    ///
    /// Searches upward from cwd for the config file. The root is the config
    /// file's directory, or cwd when there is none.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or(cwd);
                config.config_path = Some(path);
                config
            }
            None => {
                crate::debug!("config"; "no {} found, using defaults", cli.config.display());
                Self {
                    root: cwd,
                    ..Self::default()
                }
            }
        };

        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// CLI options override file values.
    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(parameters) = &cli.parameters {
            // relative to cwd, like any other CLI path
            self.storage.parameters = std::env::current_dir()
                .map(|cwd| cwd.join(parameters))
                .unwrap_or_else(|_| parameters.clone());
        }
    }

    /// Absolute path of the installation parameter store.
    pub fn parameters_path(&self) -> PathBuf {
        self.root.join(&self.storage.parameters)
    }

    /// Collect every validation error and return them at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        self.provider.validate(&mut diag);
        self.search.validate(&mut diag);
        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    pub fn engine_settings(&self) -> Result<EngineSettings> {
        let app_url = self
            .provider
            .app_url()
            .with_context(|| format!("invalid app url `{}`", self.provider.app_url))?;
        Ok(EngineSettings {
            debounce: self.search.debounce(),
            app_url,
        })
    }

    pub fn connector(&self) -> Result<HttpConnector> {
        HttpConnector::new(&self.provider.base_url, self.provider.timeout())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_invalid_toml() {
        let result = AppConfig::parse_with_ignored("[provider\nbase_url = 1");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[search]\ndebounce_ms = 300\n[unknown_section]\nfield = \"value\"";
        let (config, ignored) = AppConfig::parse_with_ignored(content).unwrap();

        assert_eq!(config.search.debounce_ms, 300);
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_defaults_validate() {
        let config = test_parse_config("");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.parameters_path(),
            PathBuf::from(".xspace/parameters.json")
        );

        let settings = config.engine_settings().unwrap();
        assert_eq!(settings.debounce.as_millis(), 500);
        assert_eq!(settings.app_url.as_str(), "https://app.contentful.com/");
    }

    #[test]
    fn test_all_errors_collected() {
        let config = test_parse_config(
            "[provider]\napp_url = \"::\"\ntimeout = 0\n[search]\ndebounce_ms = 0",
        );
        let Err(ConfigError::Diagnostics(diag)) = config.validate() else {
            panic!("expected diagnostics");
        };
        let fields: Vec<_> = diag.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["provider.app_url", "provider.timeout", "search.debounce_ms"]
        );
    }

    #[test]
    fn test_parameters_relative_to_root() {
        let mut config = test_parse_config("[storage]\nparameters = \"params.json\"");
        config.root = PathBuf::from("/srv/project");
        assert_eq!(
            config.parameters_path(),
            PathBuf::from("/srv/project/params.json")
        );
    }
}
