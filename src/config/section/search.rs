//! `[search]` section configuration.
//!
//! ```toml
//! [search]
//! debounce_ms = 500   # Quiet period before a search request is sent
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::search::DEBOUNCE_MS;

const DEBOUNCE: FieldPath = FieldPath::new("search.debounce_ms");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEBOUNCE_MS,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.debounce_ms == 0 {
            diag.error_with_hint(
                DEBOUNCE,
                "debounce_ms must be greater than 0",
                "the default is 500",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_search_config() {
        let config = test_parse_config("[search]\ndebounce_ms = 250");
        assert_eq!(config.search.debounce().as_millis(), 250);
        assert_eq!(test_parse_config("").search.debounce_ms, 500);
    }
}
