//! Remote provider error classification.

use serde::Deserialize;
use thiserror::Error;

/// Error kind as reported by the provider in `sys.id` of an error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// `AccessTokenInvalid`: the token was revoked or never existed.
    AccessTokenInvalid,
    /// `NotFound`: space, environment, entry or content type is gone.
    NotFound,
    /// Transport failure, timeout, or an unreadable response.
    Network,
    /// Any other kind, kept verbatim.
    Other(String),
}

impl ProviderErrorKind {
    pub fn from_sys_id(id: &str) -> Self {
        match id {
            "AccessTokenInvalid" => Self::AccessTokenInvalid,
            "NotFound" => Self::NotFound,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::AccessTokenInvalid => "AccessTokenInvalid",
            Self::NotFound => "NotFound",
            Self::Network => "Network",
            Self::Other(id) => id,
        }
    }
}

/// Failure of a single provider call.
///
/// `message` is the provider's own text and is shown to users verbatim.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

pub type ProviderResult<T> = Result<T, ProviderError>;

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NotFound, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Network, message)
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::AccessTokenInvalid, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ProviderErrorKind::NotFound
    }

    /// Decode an error body, falling back to the HTTP status line.
    ///
    /// ```json
    /// {"sys":{"type":"Error","id":"AccessTokenInvalid"},"message":"..."}
    /// ```
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self::new(
                ProviderErrorKind::from_sys_id(&parsed.sys.id),
                parsed
                    .message
                    .unwrap_or_else(|| format!("request failed with status {status}")),
            ),
            Err(_) if status == 404 => Self::not_found(format!("request failed with status {status}")),
            Err(_) => Self::new(
                ProviderErrorKind::Other(format!("Http{status}")),
                format!("request failed with status {status}"),
            ),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    sys: ErrorSys,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorSys {
    id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_body_invalid_token() {
        let body = br#"{"sys":{"type":"Error","id":"AccessTokenInvalid"},"message":"The access token you sent could not be found or is invalid.","requestId":"abc"}"#;
        let err = ProviderError::from_body(401, body);
        assert_eq!(err.kind, ProviderErrorKind::AccessTokenInvalid);
        assert_eq!(
            err.message,
            "The access token you sent could not be found or is invalid."
        );
    }

    #[test]
    fn test_from_body_unknown_kind_kept() {
        let body = br#"{"sys":{"type":"Error","id":"RateLimitExceeded"},"message":"slow down"}"#;
        let err = ProviderError::from_body(429, body);
        assert_eq!(err.kind, ProviderErrorKind::Other("RateLimitExceeded".into()));
        assert_eq!(err.kind.label(), "RateLimitExceeded");
    }

    #[test]
    fn test_from_body_garbage() {
        assert!(ProviderError::from_body(404, b"<html>").is_not_found());
        let err = ProviderError::from_body(502, b"");
        assert_eq!(err.kind, ProviderErrorKind::Other("Http502".into()));
    }
}
