//! Candidate rows and ranked results
//!
//! A [`Candidate`] is the projection of one person's name row as returned
//! by the name index: identifier, name fields, and their stored phonetic
//! codes. The engine never mutates candidates — it only orders, merges,
//! and truncates them into a [`RankedResult`].

use kaundula_core::{PersonId, PersonName};
use serde::{Deserialize, Serialize};

use crate::encoder::{NameEncoder, PhoneticCode};

/// Which name field a single-field lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    /// Given (first) name.
    Given,
    /// Family name; lookups also consider the second family name's code.
    Family,
}

impl std::fmt::Display for NameField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Given => write!(f, "given"),
            Self::Family => write!(f, "family"),
        }
    }
}

/// A candidate row produced by the name index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Person the row belongs to.
    pub person_id: PersonId,
    /// Given name as stored.
    pub given_name: String,
    /// Primary family name as stored.
    pub family_name: String,
    /// Second family name, when recorded.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub family_name2: Option<String>,
    /// Stored code of the given name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub given_code: Option<PhoneticCode>,
    /// Stored code of the primary family name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub family_code: Option<PhoneticCode>,
    /// Stored code of the second family name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub family2_code: Option<PhoneticCode>,
}

impl Candidate {
    /// Build a candidate from a structured name, encoding each searchable
    /// field with `encoder` — the same computation an index performs when
    /// a name row is written.
    #[must_use]
    pub fn from_name(person_id: PersonId, name: &PersonName, encoder: &dyn NameEncoder) -> Self {
        Self {
            person_id,
            given_name: name.given.clone(),
            family_name: name.family.clone(),
            family_name2: name.family2.clone(),
            given_code: encoder.encode(&name.given),
            family_code: encoder.encode(&name.family),
            family2_code: name.family2.as_deref().and_then(|f2| encoder.encode(f2)),
        }
    }
}

/// Ordered, deduplicated, length-capped identifiers produced by a merge.
///
/// Constructed fresh per query and handed back to the caller; there is no
/// persistent state behind it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Identifiers in final rank order.
    pub ids: Vec<PersonId>,
}

impl RankedResult {
    /// Number of ranked identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the result carries no identifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
