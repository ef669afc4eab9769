//! In-memory reference registry
//!
//! Executable reference for the collaborator contracts: name rows are
//! encoded as records are inserted (the equivalent of a code column
//! maintained at write time), lookups apply the [`ranking`](crate::ranking)
//! comparisons directly, and resolution and conventional search run over
//! the same rows. Hosts embed it for tests and small deployments; a
//! database-backed index replaces it without touching the engine.

use kaundula_core::{PersonId, PersonRecord};

use crate::candidate::{Candidate, NameField};
use crate::encoder::{ChichewaSoundex, NameEncoder, PhoneticCode};
use crate::engine::{ConventionalSearch, NameIndex, RecordStore};
use crate::error::SearchResult;
use crate::ranking;

struct IndexedRow {
    record: PersonRecord,
    candidate: Candidate,
}

/// A registry holding records and their phonetic codes in memory.
pub struct InMemoryRegistry {
    encoder: Box<dyn NameEncoder>,
    rows: Vec<IndexedRow>,
}

impl InMemoryRegistry {
    /// Empty registry using the canonical encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::with_encoder(Box::new(ChichewaSoundex))
    }

    /// Empty registry encoding names with `encoder`.
    #[must_use]
    pub fn with_encoder(encoder: Box<dyn NameEncoder>) -> Self {
        Self {
            encoder,
            rows: Vec::new(),
        }
    }

    /// Add a record, computing its name codes.
    pub fn insert(&mut self, record: PersonRecord) {
        let candidate = Candidate::from_name(record.id, &record.name, &*self.encoder);
        self.rows.push(IndexedRow { record, candidate });
    }

    /// Number of stored records, voided ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn live_candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.rows
            .iter()
            .filter(|row| !row.record.voided)
            .map(|row| &row.candidate)
    }
}

impl Default for InMemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep the first row per person, preserving order, then cap at `limit`.
fn distinct_by_person(mut hits: Vec<&Candidate>, limit: usize) -> Vec<Candidate> {
    let mut seen = std::collections::HashSet::new();
    hits.retain(|c| seen.insert(c.person_id));
    hits.truncate(limit);
    hits.into_iter().cloned().collect()
}

fn field_code_matches(c: &Candidate, field: NameField, prefix: &PhoneticCode) -> bool {
    match field {
        NameField::Given => c.given_code.as_ref().is_some_and(|gc| gc.starts_with(prefix)),
        NameField::Family => family_code_matches(c, prefix),
    }
}

fn family_code_matches(c: &Candidate, prefix: &PhoneticCode) -> bool {
    c.family_code.as_ref().is_some_and(|fc| fc.starts_with(prefix))
        || c.family2_code.as_ref().is_some_and(|fc| fc.starts_with(prefix))
}

impl NameIndex for InMemoryRegistry {
    fn lookup_by_field_code(
        &self,
        field: NameField,
        code_prefix: &PhoneticCode,
        literal_token: &str,
        limit: usize,
    ) -> SearchResult<Vec<Candidate>> {
        let mut hits: Vec<&Candidate> = self
            .live_candidates()
            .filter(|c| field_code_matches(c, field, code_prefix))
            .collect();
        hits.sort_by(|a, b| ranking::single_field_cmp(a, b, field, literal_token, code_prefix));
        Ok(distinct_by_person(hits, limit))
    }

    fn lookup_by_combined_code(
        &self,
        given_prefix: &PhoneticCode,
        family_prefix: &PhoneticCode,
        given_literal: &str,
        family_literal: &str,
        limit: usize,
    ) -> SearchResult<Vec<Candidate>> {
        let mut hits: Vec<&Candidate> = self
            .live_candidates()
            .filter(|c| {
                c.given_code
                    .as_ref()
                    .is_some_and(|gc| gc.starts_with(given_prefix))
                    && family_code_matches(c, family_prefix)
            })
            .collect();
        hits.sort_by(|a, b| {
            ranking::combined_cmp(a, b, given_literal, family_literal, given_prefix, family_prefix)
        });
        Ok(distinct_by_person(hits, limit))
    }
}

impl RecordStore for InMemoryRegistry {
    fn resolve(&self, id: PersonId) -> SearchResult<Option<PersonRecord>> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.record.id == id)
            .map(|row| row.record.clone()))
    }
}

impl ConventionalSearch for InMemoryRegistry {
    /// Case-insensitive substring match over every stored name part;
    /// blank queries match nothing. Results order by family name, given
    /// name, then identifier.
    fn find_by_name(&self, raw_query: &str) -> SearchResult<Vec<PersonRecord>> {
        let needle = raw_query.trim();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let needle = needle.to_lowercase();
        let mut matches: Vec<&PersonRecord> = self
            .rows
            .iter()
            .filter(|row| !row.record.voided)
            .map(|row| &row.record)
            .filter(|record| {
                let name = &record.name;
                [
                    Some(name.given.as_str()),
                    name.middle.as_deref(),
                    Some(name.family.as_str()),
                    name.family2.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|part| part.to_lowercase().contains(&needle))
            })
            .collect();
        matches.sort_by(|a, b| {
            a.name
                .family
                .cmp(&b.name.family)
                .then_with(|| a.name.given.cmp(&b.name.given))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matches.into_iter().cloned().collect())
    }
}
