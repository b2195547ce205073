//! Engine error taxonomy.
//!
//! Configuration and credential problems surface on the configuration form;
//! resolution problems collapse into [`ResolveOutcome`](crate::resolve::ResolveOutcome)
//! and never reach the rendering layer as errors.

use thiserror::Error;

use crate::provider::{ProviderError, ProviderErrorKind};

/// Registry bookkeeping failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("a space configuration with id `{id}` already exists")]
    Duplicate { id: String },

    #[error("no space configuration with id `{id}`")]
    Missing { id: String },

    #[error("You must add at least one Cross-Space configuration")]
    Empty,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Invalid or revoked access token.
    #[error("{0}")]
    Credential(String),

    /// Invalid space id or environment.
    #[error("{0}")]
    Identifier(String),

    /// Entry or content type deleted remotely.
    #[error("{0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    /// The host supplied no space configuration at all.
    #[error("no space configuration supplied, cross-space references are inactive")]
    Inactive,
}

impl From<ProviderError> for EngineError {
    fn from(err: ProviderError) -> Self {
        match err.kind {
            ProviderErrorKind::AccessTokenInvalid => Self::Credential(err.message),
            ProviderErrorKind::NotFound => Self::NotFound(err.message),
            ProviderErrorKind::Network => Self::Network(err.message),
            ProviderErrorKind::Other(_) => Self::Identifier(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_classification() {
        let err: EngineError = ProviderError::invalid_token("revoked").into();
        assert_eq!(err, EngineError::Credential("revoked".into()));

        let err: EngineError = ProviderError::not_found("gone").into();
        assert_eq!(err, EngineError::NotFound("gone".into()));

        let err: EngineError = ProviderError::network("timeout").into();
        assert_eq!(err.to_string(), "network error: timeout");
    }

    #[test]
    fn test_configuration_error_display() {
        let err = EngineError::from(ConfigurationError::Duplicate {
            id: "abc-master".into(),
        });
        assert!(err.to_string().contains("abc-master"));
    }
}
