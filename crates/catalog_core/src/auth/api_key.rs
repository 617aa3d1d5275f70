//! Shared-secret API key gate.
//!
//! # Responsibility
//! - Compare the `X-API-Key` header with the configured secret.
//! - Limit enforcement to one path prefix.
//!
//! # Invariants
//! - The secret is set once at construction and is never empty.
//! - Comparison is exact string equality; no trimming or case folding.
//! - Paths outside the prefix are always forwarded.

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

/// Header carrying the client credential.
pub const API_KEY_HEADER: &str = "X-API-Key";
/// Plaintext body sent with every rejection.
pub const UNAUTHORIZED_BODY: &str = "Invalid API Key";
/// Prefix protected when none is configured.
pub const DEFAULT_PROTECTED_PREFIX: &str = "/api";

/// Outcome of evaluating one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Pass the request on unchanged.
    Forward,
    /// Short-circuit with 401 and `UNAUTHORIZED_BODY`.
    Reject(RejectReason),
}

/// Why a protected request was rejected. Used for logging only; clients
/// always see the same body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    MissingHeader,
    KeyMismatch,
}

impl RejectReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing_header",
            Self::KeyMismatch => "key_mismatch",
        }
    }
}

/// Gate construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyGateError {
    EmptyApiKey,
    InvalidPrefix(String),
}

impl Display for ApiKeyGateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyApiKey => write!(f, "api key must not be empty"),
            Self::InvalidPrefix(prefix) => {
                write!(f, "protected prefix must start with `/`, got `{prefix}`")
            }
        }
    }
}

impl Error for ApiKeyGateError {}

/// Immutable API key check bound to a path prefix.
#[derive(Clone)]
pub struct ApiKeyGate {
    api_key: String,
    protected_prefix: String,
}

impl Debug for ApiKeyGate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyGate")
            .field("api_key", &"<redacted>")
            .field("protected_prefix", &self.protected_prefix)
            .finish()
    }
}

impl ApiKeyGate {
    /// Builds a gate protecting `DEFAULT_PROTECTED_PREFIX`.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiKeyGateError> {
        Self::with_prefix(api_key, DEFAULT_PROTECTED_PREFIX)
    }

    /// Builds a gate protecting `prefix`.
    ///
    /// A trailing `/` on `prefix` is ignored, so `/api/` and `/api` behave
    /// the same. `/` alone protects every path.
    ///
    /// # Errors
    /// - `EmptyApiKey` when `api_key` is empty.
    /// - `InvalidPrefix` when `prefix` does not start with `/`.
    pub fn with_prefix(
        api_key: impl Into<String>,
        prefix: &str,
    ) -> Result<Self, ApiKeyGateError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(ApiKeyGateError::EmptyApiKey);
        }
        if !prefix.starts_with('/') {
            return Err(ApiKeyGateError::InvalidPrefix(prefix.to_string()));
        }

        Ok(Self {
            api_key,
            protected_prefix: prefix.trim_end_matches('/').to_string(),
        })
    }

    /// Normalized prefix; empty when every path is protected.
    pub fn protected_prefix(&self) -> &str {
        &self.protected_prefix
    }

    /// Returns whether `path` falls under the protected prefix.
    ///
    /// Matching is segment-aware: `/api` covers `/api` and `/api/...` but not
    /// `/apiary`.
    pub fn is_protected(&self, path: &str) -> bool {
        if self.protected_prefix.is_empty() {
            return true;
        }
        match path.strip_prefix(self.protected_prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// Evaluates one request given its path and raw header value.
    pub fn check(&self, path: &str, header_value: Option<&str>) -> GateDecision {
        if !self.is_protected(path) {
            return GateDecision::Forward;
        }

        match header_value {
            None => GateDecision::Reject(RejectReason::MissingHeader),
            Some(value) if value == self.api_key => GateDecision::Forward,
            Some(_) => GateDecision::Reject(RejectReason::KeyMismatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiKeyGate, ApiKeyGateError};

    #[test]
    fn trailing_slash_is_normalized() {
        let gate = ApiKeyGate::with_prefix("secret", "/api/").expect("valid gate");
        assert_eq!(gate.protected_prefix(), "/api");
    }

    #[test]
    fn root_prefix_protects_everything() {
        let gate = ApiKeyGate::with_prefix("secret", "/").expect("valid gate");
        assert!(gate.is_protected("/"));
        assert!(gate.is_protected("/health"));
    }

    #[test]
    fn rejects_relative_prefix() {
        let err = ApiKeyGate::with_prefix("secret", "api").expect_err("relative prefix");
        assert_eq!(err, ApiKeyGateError::InvalidPrefix("api".to_string()));
    }

    #[test]
    fn debug_output_redacts_secret() {
        let gate = ApiKeyGate::new("top-secret").expect("valid gate");
        let rendered = format!("{gate:?}");
        assert!(!rendered.contains("top-secret"));
        assert!(rendered.contains("redacted"));
    }
}
