//! `[storage]` section configuration.
//!
//! ```toml
//! [storage]
//! parameters = ".xspace/parameters.json"   # Installation parameter store
//! ```
//!
//! Relative paths resolve against the directory holding `xspace.toml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub parameters: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            parameters: PathBuf::from(".xspace/parameters.json"),
        }
    }
}
