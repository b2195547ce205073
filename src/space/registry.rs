//! Ordered, de-duplicated set of space configurations.
//!
//! Pure in-memory bookkeeping: order is insertion order because it drives
//! list and dropdown display, and the composite id is unique.

use super::{SpaceConfiguration, SpaceSummary, composite_id};
use crate::error::ConfigurationError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceConfigRegistry {
    configs: Vec<SpaceConfiguration>,
}

impl SpaceConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted configurations.
    ///
    /// Derived ids are recomputed; a later configuration whose id collides
    /// with an earlier one is dropped.
    pub fn from_configs(configs: impl IntoIterator<Item = SpaceConfiguration>) -> Self {
        let mut registry = Self::new();
        for mut config in configs {
            if config.normalize() {
                crate::debug!("config"; "normalized space configuration id to `{}`", config.id);
            }
            if registry.contains(&config.id) {
                crate::log!("warning"; "ignoring duplicate space configuration `{}`", config.id);
                continue;
            }
            registry.configs.push(config);
        }
        registry
    }

    /// Find the configuration for a space and optional environment.
    pub fn lookup(&self, space_id: &str, environment: Option<&str>) -> Option<&SpaceConfiguration> {
        self.get(&composite_id(space_id, environment))
    }

    /// Find a configuration by composite id.
    pub fn get(&self, id: &str) -> Option<&SpaceConfiguration> {
        self.configs.iter().find(|config| config.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[SpaceConfiguration] {
        &self.configs
    }

    pub fn summaries(&self) -> Vec<SpaceSummary> {
        self.configs.iter().map(SpaceConfiguration::summary).collect()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Append a configuration.
    ///
    /// Re-adding an identical configuration is a no-op; any other
    /// configuration with the same composite id is a duplicate, even if
    /// only the token differs.
    pub fn add(&mut self, mut config: SpaceConfiguration) -> Result<(), ConfigurationError> {
        config.normalize();
        match self.get(&config.id) {
            Some(existing) if *existing == config => Ok(()),
            Some(_) => Err(ConfigurationError::Duplicate { id: config.id }),
            None => {
                self.configs.push(config);
                Ok(())
            }
        }
    }

    /// Replace the configuration `id` in place, keeping its position.
    ///
    /// Returns the previous configuration.
    pub fn replace(
        &mut self,
        id: &str,
        mut config: SpaceConfiguration,
    ) -> Result<SpaceConfiguration, ConfigurationError> {
        config.normalize();

        let index = self.position(id)?;
        if config.id != id && self.contains(&config.id) {
            return Err(ConfigurationError::Duplicate { id: config.id });
        }

        Ok(std::mem::replace(&mut self.configs[index], config))
    }

    pub fn remove(&mut self, id: &str) -> Result<SpaceConfiguration, ConfigurationError> {
        let index = self.position(id)?;
        Ok(self.configs.remove(index))
    }

    fn position(&self, id: &str) -> Result<usize, ConfigurationError> {
        self.configs
            .iter()
            .position(|config| config.id == id)
            .ok_or_else(|| ConfigurationError::Missing { id: id.to_string() })
    }
}
