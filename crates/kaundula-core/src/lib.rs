//! Shared foundation for the Kaundula person registry
//!
//! This crate holds the pieces every Kaundula component agrees on:
//! - [`PersonRecord`] / [`PersonName`] — the person registry data model
//! - [`SearchSettings`] / [`SettingsSource`] — runtime search configuration,
//!   read fresh on every query so changes apply immediately
//!
//! The search engine itself lives in `kaundula-search-core`.

#![forbid(unsafe_code)]

pub mod config;
pub mod models;

// Re-export key types
pub use config::{
    ConfigError, DEFAULT_ALIAS, DEFAULT_RESULT_LIMIT, DEFAULT_SQL_LIMIT, EnvSettings,
    SearchSettings, SettingsSource, StaticSettings,
};
pub use models::{PersonId, PersonName, PersonRecord};
