//! Query classification and tokenization
//!
//! A query opts into phonetic search by starting with an activation
//! marker; everything else routes unchanged to the host's conventional
//! search. [`classify`] decides the route, [`tokenize`] splits the
//! remainder of a phonetic query into name tokens.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed activation markers, always recognized and tested in this order
/// before the configured alias.
pub const DEFAULT_MARKERS: [&str; 2] = ["soundex:", "s:"];

/// A literal space pair. Replaced in one non-overlapping pass, so a run of
/// three spaces leaves a pair behind; [`tokenize`] keeps the resulting
/// empty token rather than papering over it.
static DOUBLE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new("  ").expect("space regex"));

/// A classified search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchQuery {
    /// No activation marker; handled by conventional substring search.
    Conventional {
        /// The query exactly as received.
        raw: String,
    },
    /// Activation marker present; handled by the phonetic engine.
    Phonetic {
        /// The query exactly as received, marker included.
        raw: String,
        /// The query with the matched marker stripped and nothing else
        /// removed; trimming happens during tokenization.
        effective: String,
    },
}

impl SearchQuery {
    /// Whether this query routes to the phonetic engine.
    #[must_use]
    pub const fn is_phonetic(&self) -> bool {
        matches!(self, Self::Phonetic { .. })
    }

    /// The query text exactly as received.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Conventional { raw } | Self::Phonetic { raw, .. } => raw,
        }
    }
}

/// Classify a raw query against the fixed markers plus the configured
/// alias.
///
/// Marker matching is an ASCII-case-insensitive prefix test; the fixed
/// markers win over the configured alias. A blank alias is ignored — it
/// would otherwise prefix-match every query.
#[must_use]
pub fn classify(raw: &str, configured_alias: Option<&str>) -> SearchQuery {
    for marker in DEFAULT_MARKERS {
        if let Some(effective) = strip_marker(raw, marker) {
            return SearchQuery::Phonetic {
                raw: raw.to_owned(),
                effective,
            };
        }
    }
    if let Some(alias) = configured_alias {
        if !alias.trim().is_empty() {
            if let Some(effective) = strip_marker(raw, alias) {
                return SearchQuery::Phonetic {
                    raw: raw.to_owned(),
                    effective,
                };
            }
        }
    }
    SearchQuery::Conventional {
        raw: raw.to_owned(),
    }
}

/// Case-insensitive prefix strip; `None` when `marker` does not prefix
/// `raw` (including when `raw` is too short or splits a multi-byte char).
fn strip_marker(raw: &str, marker: &str) -> Option<String> {
    if marker.is_empty() {
        return None;
    }
    let prefix = raw.get(..marker.len())?;
    prefix
        .eq_ignore_ascii_case(marker)
        .then(|| raw[marker.len()..].to_owned())
}

/// Split the effective text of a phonetic query into name tokens.
///
/// Leading/trailing whitespace is trimmed, exactly-double spaces merge in
/// a single pass, `", "` becomes a space, and the result splits on single
/// spaces. Empty tokens produced by the split are kept.
#[must_use]
pub fn tokenize(effective: &str) -> Vec<String> {
    let trimmed = effective.trim();
    let collapsed = DOUBLE_SPACE.replace_all(trimmed, " ");
    let despaced = collapsed.replace(", ", " ");
    despaced.split(' ').map(str::to_owned).collect()
}
