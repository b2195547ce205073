//! Installation parameter store.
//!
//! The host owns this data; locally it is a JSON file with the layout
//! `{ "spaceConfigs": [...] }`.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{SpaceConfigRegistry, SpaceConfiguration};
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallationParameters {
    #[serde(default)]
    pub space_configs: Vec<SpaceConfiguration>,
}

impl InstallationParameters {
    pub fn from_registry(registry: &SpaceConfigRegistry) -> Self {
        Self {
            space_configs: registry.all().to_vec(),
        }
    }

    pub fn registry(&self) -> SpaceConfigRegistry {
        SpaceConfigRegistry::from_configs(self.space_configs.iter().cloned())
    }

    /// An installation must carry at least one space configuration.
    pub fn check_installable(&self) -> Result<(), ConfigurationError> {
        if self.space_configs.is_empty() {
            return Err(ConfigurationError::Empty);
        }
        Ok(())
    }
}

/// Check if file content is the same as new content
fn file_content_matches(path: &Path, content: &str) -> bool {
    path.exists() && fs::read_to_string(path).is_ok_and(|existing| existing == content)
}

/// Load parameters. `Ok(None)` means the host supplied nothing.
pub fn load_parameters(path: &Path) -> io::Result<Option<InstallationParameters>> {
    if !path.exists() {
        crate::debug!("params"; "no parameter store at {}", path.display());
        return Ok(None);
    }

    let json = fs::read_to_string(path)?;
    let params: InstallationParameters = serde_json::from_str(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    crate::debug!("params"; "restored {} space configurations", params.space_configs.len());
    Ok(Some(params))
}

/// Persist parameters, skipping the write when nothing changed.
pub fn persist_parameters(params: &InstallationParameters, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(params)?;

    if file_content_matches(path, &json) {
        crate::debug!("params"; "parameters unchanged, skipping write");
        return Ok(());
    }

    fs::write(path, &json)?;
    crate::debug!("params"; "saved {} space configurations", params.space_configs.len());
    Ok(())
}
