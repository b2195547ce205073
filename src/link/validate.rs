//! Live credential check for new or edited space configurations.

use std::fmt;

use serde::Serialize;

use crate::debug;
use crate::error::EngineError;
use crate::provider::{Connector, ContentApi, ProviderErrorKind};
use crate::space::{SpaceConfiguration, SpaceDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    SpaceId,
    Token,
    Environment,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SpaceId => "spaceId",
            Self::Token => "token",
            Self::Environment => "environment",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DraftField,
    pub message: String,
}

impl FieldError {
    fn new(field: DraftField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Credentials work; `config` carries the space's name and composite id.
    Accepted { config: SpaceConfiguration },
    /// Field-level problems, shown next to the offending inputs.
    Invalid { errors: Vec<FieldError> },
    /// The provider could not be reached; nothing is known about the fields.
    Unreachable { message: String },
}

impl ValidationOutcome {
    fn invalid(field: DraftField, message: impl Into<String>) -> Self {
        Self::Invalid {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Errors attached to `field`.
    pub fn field_errors(&self, field: DraftField) -> impl Iterator<Item = &FieldError> {
        let errors: &[FieldError] = match self {
            Self::Invalid { errors } => errors.as_slice(),
            _ => &[],
        };
        errors.iter().filter(move |e| e.field == field)
    }

    /// Engine error for callers that do not render field state.
    pub fn into_result(self) -> Result<SpaceConfiguration, EngineError> {
        match self {
            Self::Accepted { config } => Ok(config),
            Self::Unreachable { message } => Err(EngineError::Network(message)),
            Self::Invalid { errors } => {
                let message = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                match errors.first().map(|e| e.field) {
                    Some(DraftField::Token) => Err(EngineError::Credential(message)),
                    _ => Err(EngineError::Identifier(message)),
                }
            }
        }
    }
}

/// Required fields, checked without a round trip.
pub fn check_required(draft: &SpaceDraft) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if draft.space_id.trim().is_empty() {
        errors.push(FieldError::new(DraftField::SpaceId, "Space ID is required"));
    }
    if draft.token.trim().is_empty() {
        errors.push(FieldError::new(DraftField::Token, "Access token is required"));
    }
    errors
}

/// Validate `draft` with one live "get space" call.
///
/// An invalid token marks the token field; any other provider error marks
/// the space id. The environment is not part of the "get space" call, so a
/// nonexistent environment passes here and its links resolve as missing.
pub async fn validate_config<C: Connector>(draft: &SpaceDraft, connector: &C) -> ValidationOutcome {
    let errors = check_required(draft);
    if !errors.is_empty() {
        return ValidationOutcome::Invalid { errors };
    }

    let api = connector.connect(&draft.credentials());
    match api.get_space().await {
        Ok(space) => {
            debug!("validate"; "{} accepted as \"{}\"", draft.composite_id(), space.name);
            ValidationOutcome::Accepted {
                config: draft.clone().into_config(space.name),
            }
        }
        Err(e) => {
            debug!("validate"; "{} rejected: {} ({})", draft.composite_id(), e, e.kind.label());
            match e.kind {
                ProviderErrorKind::AccessTokenInvalid => {
                    ValidationOutcome::invalid(DraftField::Token, e.message)
                }
                ProviderErrorKind::Network => ValidationOutcome::Unreachable { message: e.message },
                ProviderErrorKind::NotFound | ProviderErrorKind::Other(_) => {
                    ValidationOutcome::invalid(DraftField::SpaceId, e.message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::{INVALID_TOKEN_MESSAGE, MockRemote, MockSpace, NOT_FOUND_MESSAGE};

    fn remote() -> MockRemote {
        MockRemote::new().with_space(
            "cats",
            MockSpace::new("Cat Facts", "good").with_environment("staging"),
        )
    }

    #[tokio::test]
    async fn test_accepted_carries_name_and_id() {
        let remote = remote();
        let draft = SpaceDraft::new("cats", "good", "staging");

        let outcome = validate_config(&draft, &remote.connector()).await;
        let ValidationOutcome::Accepted { config } = outcome else {
            panic!("expected acceptance, got {outcome:?}");
        };
        assert_eq!(config.name, "Cat Facts");
        assert_eq!(config.id, "cats-staging");
        assert_eq!(config.environment, "staging");
    }

    #[tokio::test]
    async fn test_blank_environment_defaults() {
        let remote = remote();
        let draft = SpaceDraft::new("cats", "good", "  ");

        let config = validate_config(&draft, &remote.connector())
            .await
            .into_result()
            .unwrap();
        assert_eq!(config.id, "cats-master");
    }

    #[tokio::test]
    async fn test_unknown_environment_is_not_checked() {
        let remote = remote();
        let draft = SpaceDraft::new("cats", "good", "nope");

        let outcome = validate_config(&draft, &remote.connector()).await;
        assert!(outcome.is_accepted());
        assert_eq!(remote.requests(), ["space"]);
    }

    #[tokio::test]
    async fn test_revoked_token_marks_token_field() {
        let remote = remote();
        remote.revoke_token("cats");
        let draft = SpaceDraft::new("cats", "good", "");

        let outcome = validate_config(&draft, &remote.connector()).await;
        let errors: Vec<_> = outcome.field_errors(DraftField::Token).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, INVALID_TOKEN_MESSAGE);
        assert_eq!(outcome.field_errors(DraftField::SpaceId).count(), 0);
        assert!(matches!(outcome.into_result(), Err(EngineError::Credential(_))));
    }

    #[tokio::test]
    async fn test_unknown_space_marks_space_id() {
        let remote = remote();
        let draft = SpaceDraft::new("nope", "good", "");

        let outcome = validate_config(&draft, &remote.connector()).await;
        let errors: Vec<_> = outcome.field_errors(DraftField::SpaceId).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, NOT_FOUND_MESSAGE);
        assert_eq!(outcome.field_errors(DraftField::Token).count(), 0);
        assert!(matches!(outcome.into_result(), Err(EngineError::Identifier(_))));
    }

    #[tokio::test]
    async fn test_required_fields_skip_network() {
        let remote = remote();
        let draft = SpaceDraft::new("", "", "");

        let outcome = validate_config(&draft, &remote.connector()).await;
        assert_eq!(outcome.field_errors(DraftField::SpaceId).count(), 1);
        assert_eq!(outcome.field_errors(DraftField::Token).count(), 1);
        assert!(remote.requests().is_empty());
        assert_eq!(remote.connects(), 0);
    }

    #[tokio::test]
    async fn test_offline_is_unreachable() {
        let remote = remote();
        remote.set_offline(true);
        let draft = SpaceDraft::new("cats", "good", "");

        let outcome = validate_config(&draft, &remote.connector()).await;
        assert!(matches!(outcome, ValidationOutcome::Unreachable { .. }));
    }
}
