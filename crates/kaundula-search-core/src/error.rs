//! Error types for the search engine

use kaundula_core::ConfigError;
use thiserror::Error;

/// Result type alias for search operations
pub type SearchResult<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during a search call
///
/// Collaborator failures abort the whole call; partial results are never
/// returned. The engine performs no retries of its own — transient
/// failures are flagged through [`SearchError::is_retryable`] and left to
/// the host's retry policy.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A runtime setting was malformed at read time
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The name index failed to execute a lookup
    #[error("name index failure: {0}")]
    Index(String),

    /// The record store failed while resolving an identifier
    #[error("record store failure: {0}")]
    RecordStore(String),

    /// The conventional-search collaborator failed
    #[error("conventional search failure: {0}")]
    Conventional(String),

    /// A collaborator timed out
    #[error("collaborator timeout: {0}")]
    Timeout(String),

    /// Internal/unexpected error
    #[error("internal search error: {0}")]
    Internal(String),
}

impl SearchError {
    /// Returns the error type string (for JSON responses)
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Index(_) => "INDEX_ERROR",
            Self::RecordStore(_) => "RECORD_STORE_ERROR",
            Self::Conventional(_) => "CONVENTIONAL_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether the error is transient and the host may retry
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Index(_) | Self::RecordStore(_) | Self::Conventional(_) | Self::Timeout(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaundula_core::config::SQL_LIMIT_KEY;

    fn config_error() -> ConfigError {
        ConfigError::InvalidLimit {
            key: SQL_LIMIT_KEY,
            value: "plenty".to_owned(),
        }
    }

    #[test]
    fn error_type_mapping() {
        let cases: Vec<(SearchError, &str)> = vec![
            (SearchError::Config(config_error()), "CONFIG_ERROR"),
            (SearchError::Index("down".into()), "INDEX_ERROR"),
            (
                SearchError::RecordStore("gone".into()),
                "RECORD_STORE_ERROR",
            ),
            (
                SearchError::Conventional("broken".into()),
                "CONVENTIONAL_ERROR",
            ),
            (SearchError::Timeout("5s".into()), "TIMEOUT"),
            (SearchError::Internal("unexpected".into()), "INTERNAL_ERROR"),
        ];
        for (err, expected) in &cases {
            assert_eq!(
                err.error_type(),
                *expected,
                "Error {err:?} should map to {expected}"
            );
        }
    }

    #[test]
    fn retryable_classification() {
        // Retryable: collaborator-side failures
        assert!(SearchError::Index("x".into()).is_retryable());
        assert!(SearchError::RecordStore("x".into()).is_retryable());
        assert!(SearchError::Conventional("x".into()).is_retryable());
        assert!(SearchError::Timeout("x".into()).is_retryable());

        // Not retryable: the same call would fail again
        assert!(!SearchError::Config(config_error()).is_retryable());
        assert!(!SearchError::Internal("x".into()).is_retryable());
    }

    #[test]
    fn config_error_from_conversion() {
        let err: SearchError = config_error().into();
        assert!(matches!(err, SearchError::Config(_)));
        assert_eq!(err.error_type(), "CONFIG_ERROR");
    }

    #[test]
    fn display_all_non_empty() {
        let all_errors: Vec<SearchError> = vec![
            SearchError::Config(config_error()),
            SearchError::Index(String::new()),
            SearchError::RecordStore(String::new()),
            SearchError::Conventional(String::new()),
            SearchError::Timeout(String::new()),
            SearchError::Internal(String::new()),
        ];
        for err in &all_errors {
            assert!(
                !err.to_string().is_empty(),
                "Error {err:?} should have non-empty Display"
            );
        }
    }
}
