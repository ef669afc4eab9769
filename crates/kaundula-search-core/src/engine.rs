//! Collaborator contracts for the search engine
//!
//! The engine performs no I/O of its own: candidate retrieval, record
//! resolution, and conventional search are injected through these traits.
//! Each call is a synchronous call-and-wait boundary; cancellation, if a
//! host needs it, belongs to the implementation's own contract.

use kaundula_core::{PersonId, PersonRecord};

use crate::candidate::{Candidate, NameField};
use crate::encoder::PhoneticCode;
use crate::error::SearchResult;

/// Source of ranked candidate streams, keyed by stored phonetic codes.
///
/// Implementations must return streams that are already ordered by the
/// comparisons in [`ranking`](crate::ranking), contain at most one row
/// per person (first in rank order wins), and never include voided
/// records.
pub trait NameIndex: Send + Sync {
    /// Candidates whose stored `field` code starts with `code_prefix`,
    /// ordered per [`ranking::single_field_cmp`](crate::ranking::single_field_cmp)
    /// for (`literal_token`, `code_prefix`), at most `limit` rows.
    ///
    /// For [`NameField::Family`] the prefix may match either family
    /// name's code.
    ///
    /// # Errors
    /// Returns `SearchError` when the lookup cannot be executed; the
    /// whole search call is aborted, never partially answered.
    fn lookup_by_field_code(
        &self,
        field: NameField,
        code_prefix: &PhoneticCode,
        literal_token: &str,
        limit: usize,
    ) -> SearchResult<Vec<Candidate>>;

    /// Candidates whose given-name code starts with `given_prefix` and
    /// whose family-side code (either family name) starts with
    /// `family_prefix`, ordered per
    /// [`ranking::combined_cmp`](crate::ranking::combined_cmp), at most
    /// `limit` rows.
    ///
    /// # Errors
    /// Returns `SearchError` when the lookup cannot be executed.
    fn lookup_by_combined_code(
        &self,
        given_prefix: &PhoneticCode,
        family_prefix: &PhoneticCode,
        given_literal: &str,
        family_literal: &str,
        limit: usize,
    ) -> SearchResult<Vec<Candidate>>;
}

/// Resolves ranked identifiers back to full person records.
pub trait RecordStore: Send + Sync {
    /// Fetch one record; `Ok(None)` when the identifier no longer
    /// resolves.
    ///
    /// # Errors
    /// Returns `SearchError` on data access failures.
    fn resolve(&self, id: PersonId) -> SearchResult<Option<PersonRecord>>;
}

/// The host's conventional (exact/substring) name search.
///
/// Queries without an activation marker delegate here verbatim; the
/// result is returned unchanged.
pub trait ConventionalSearch: Send + Sync {
    /// Find records by conventional matching; ordering is the host's.
    ///
    /// # Errors
    /// Returns `SearchError` on data access failures.
    fn find_by_name(&self, raw_query: &str) -> SearchResult<Vec<PersonRecord>>;
}
