//! Person registry data models
//!
//! [`PersonRecord`] is the unit the record store resolves; [`PersonName`]
//! carries the name fields the phonetic index encodes and ranks on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Opaque person identifier assigned by the host registry.
pub type PersonId = i64;

/// A person's structured name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    /// Given (first) name.
    pub given: String,
    /// Middle name; stored and displayed, never searched.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub middle: Option<String>,
    /// Primary family name.
    pub family: String,
    /// Second family name, where the registry records one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub family2: Option<String>,
}

impl PersonName {
    /// Create a name from given and family parts.
    #[must_use]
    pub fn new(given: impl Into<String>, family: impl Into<String>) -> Self {
        Self {
            given: given.into(),
            middle: None,
            family: family.into(),
            family2: None,
        }
    }

    /// Set the middle name.
    #[must_use]
    pub fn with_middle(mut self, middle: impl Into<String>) -> Self {
        self.middle = Some(middle.into());
        self
    }

    /// Set the second family name.
    #[must_use]
    pub fn with_family2(mut self, family2: impl Into<String>) -> Self {
        self.family2 = Some(family2.into());
        self
    }
}

/// A person record as resolved by the host's record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Registry identifier.
    pub id: PersonId,
    /// Structured name.
    pub name: PersonName,
    /// Date of birth, when known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub birthdate: Option<NaiveDate>,
    /// Administrative gender code, when known.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub gender: Option<String>,
    /// Soft-deletion flag; voided records never surface in search results.
    #[serde(default)]
    pub voided: bool,
}

impl PersonRecord {
    /// Create a live (non-voided) record.
    #[must_use]
    pub const fn new(id: PersonId, name: PersonName) -> Self {
        Self {
            id,
            name,
            birthdate: None,
            gender: None,
            voided: false,
        }
    }

    /// Set the birthdate.
    #[must_use]
    pub const fn with_birthdate(mut self, birthdate: NaiveDate) -> Self {
        self.birthdate = Some(birthdate);
        self
    }

    /// Set the gender code.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Mark the record voided (soft-deleted).
    #[must_use]
    pub const fn with_voided(mut self, voided: bool) -> Self {
        self.voided = voided;
        self
    }
}
