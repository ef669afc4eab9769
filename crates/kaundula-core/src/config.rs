//! Runtime configuration for phonetic search
//!
//! Three settings govern a search: the per-lookup row limit handed to the
//! name index, the cap on the merged result list, and the extra activation
//! alias tried after the fixed query markers. Sources are consulted at the
//! start of every query — nothing is cached — so a changed value applies to
//! the very next search.

use std::env;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment key for the per-lookup row limit passed to the name index.
pub const SQL_LIMIT_KEY: &str = "KAUNDULA_SEARCH_SQL_LIMIT";
/// Environment key for the merged result cap.
pub const RESULT_LIMIT_KEY: &str = "KAUNDULA_SEARCH_RESULT_LIMIT";
/// Environment key for the extra activation alias.
pub const ALIAS_KEY: &str = "KAUNDULA_SEARCH_ALIAS";

/// Default per-lookup row limit.
pub const DEFAULT_SQL_LIMIT: usize = 100;
/// Default merged result cap.
pub const DEFAULT_RESULT_LIMIT: usize = 100;
/// Default extra activation alias.
pub const DEFAULT_ALIAS: &str = ":s";

/// Error raised when a configured value cannot be used.
///
/// A malformed setting fails the query that read it; it is never replaced
/// with a substitute value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A numeric setting did not parse as a non-negative integer.
    #[error("invalid value {value:?} for {key}: expected a non-negative integer")]
    InvalidLimit {
        /// Setting key that carried the bad value.
        key: &'static str,
        /// The raw value as found.
        value: String,
    },
}

/// A point-in-time view of the search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Maximum rows requested from the name index per lookup.
    pub sql_row_limit: usize,
    /// Cap on the merged result list.
    pub result_limit: usize,
    /// Extra activation alias tried after the fixed markers, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub activation_alias: Option<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            sql_row_limit: DEFAULT_SQL_LIMIT,
            result_limit: DEFAULT_RESULT_LIMIT,
            activation_alias: Some(DEFAULT_ALIAS.to_owned()),
        }
    }
}

/// Source of runtime search settings.
///
/// Implementations must return the current value on every call; callers
/// take a [`snapshot`](SettingsSource::snapshot) per query and never cache
/// it across queries.
pub trait SettingsSource: Send + Sync {
    /// Maximum rows requested from the name index per lookup.
    fn sql_row_limit(&self) -> Result<usize, ConfigError>;

    /// Cap on the merged result list.
    fn result_limit(&self) -> Result<usize, ConfigError>;

    /// Extra activation alias, `None` when unset or blank.
    fn activation_alias(&self) -> Result<Option<String>, ConfigError>;

    /// Assemble a full settings snapshot.
    fn snapshot(&self) -> Result<SearchSettings, ConfigError> {
        Ok(SearchSettings {
            sql_row_limit: self.sql_row_limit()?,
            result_limit: self.result_limit()?,
            activation_alias: self.activation_alias()?,
        })
    }
}

/// Settings read from process environment variables on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl SettingsSource for EnvSettings {
    fn sql_row_limit(&self) -> Result<usize, ConfigError> {
        parse_limit(SQL_LIMIT_KEY, env_value(SQL_LIMIT_KEY), DEFAULT_SQL_LIMIT)
    }

    fn result_limit(&self) -> Result<usize, ConfigError> {
        parse_limit(
            RESULT_LIMIT_KEY,
            env_value(RESULT_LIMIT_KEY),
            DEFAULT_RESULT_LIMIT,
        )
    }

    fn activation_alias(&self) -> Result<Option<String>, ConfigError> {
        match env_value(ALIAS_KEY) {
            Some(alias) if alias.trim().is_empty() => Ok(None),
            Some(alias) => Ok(Some(alias)),
            None => Ok(Some(DEFAULT_ALIAS.to_owned())),
        }
    }
}

/// Fixed in-memory settings, for tests and hosts with their own store.
#[derive(Debug, Clone, Default)]
pub struct StaticSettings(pub SearchSettings);

impl StaticSettings {
    /// Wrap a settings value.
    #[must_use]
    pub const fn new(settings: SearchSettings) -> Self {
        Self(settings)
    }
}

impl SettingsSource for StaticSettings {
    fn sql_row_limit(&self) -> Result<usize, ConfigError> {
        Ok(self.0.sql_row_limit)
    }

    fn result_limit(&self) -> Result<usize, ConfigError> {
        Ok(self.0.result_limit)
    }

    fn activation_alias(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.0.activation_alias.clone())
    }
}

fn env_value(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) => Some(value),
        // A non-unicode value surfaces as its lossy form and fails the
        // numeric parse below instead of being silently dropped.
        Err(env::VarError::NotUnicode(raw)) => Some(raw.to_string_lossy().into_owned()),
        Err(env::VarError::NotPresent) => None,
    }
}

/// Parse a limit setting, falling back to `default` only when absent.
fn parse_limit(
    key: &'static str,
    raw: Option<String>,
    default: usize,
) -> Result<usize, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidLimit { key, value }),
        None => Ok(default),
    }
}
