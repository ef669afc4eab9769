//! Search orchestration
//!
//! [`SearchOrchestrator::search`] is the single entry point the host
//! calls: classify the raw query, either delegate to conventional search
//! or run the phonetic pipeline (tokenize → encode → index lookups →
//! merge), then resolve the surviving identifiers to records.
//!
//! The orchestrator holds no mutable state; settings are re-read at the
//! start of every call, so concurrent searches need no coordination and
//! configuration changes apply to the next query.

use kaundula_core::{PersonRecord, SearchSettings, SettingsSource};
use tracing::{debug, info, warn};

use crate::candidate::{NameField, RankedResult};
use crate::encoder::{ChichewaSoundex, NameEncoder};
use crate::engine::{ConventionalSearch, NameIndex, RecordStore};
use crate::error::SearchResult;
use crate::merge::{merge_double, merge_single};
use crate::query::{SearchQuery, classify, tokenize};

static DEFAULT_ENCODER: ChichewaSoundex = ChichewaSoundex;

/// The phonetic search service, wired to its collaborators.
pub struct SearchOrchestrator<'a> {
    index: &'a dyn NameIndex,
    records: &'a dyn RecordStore,
    conventional: &'a dyn ConventionalSearch,
    settings: &'a dyn SettingsSource,
    encoder: &'a dyn NameEncoder,
}

impl<'a> SearchOrchestrator<'a> {
    /// Wire an orchestrator using the canonical encoder.
    #[must_use]
    pub fn new(
        index: &'a dyn NameIndex,
        records: &'a dyn RecordStore,
        conventional: &'a dyn ConventionalSearch,
        settings: &'a dyn SettingsSource,
    ) -> Self {
        Self {
            index,
            records,
            conventional,
            settings,
            encoder: &DEFAULT_ENCODER,
        }
    }

    /// Swap in a different encoder rule set.
    #[must_use]
    pub fn with_encoder(mut self, encoder: &'a dyn NameEncoder) -> Self {
        self.encoder = encoder;
        self
    }

    /// Run one search.
    ///
    /// Queries without an activation marker pass through to the
    /// conventional collaborator unchanged. Marked queries run the
    /// phonetic pipeline and resolve the ranked identifiers to records;
    /// identifiers that no longer resolve are skipped.
    ///
    /// # Errors
    /// Any collaborator failure — settings read, index lookup, record
    /// resolution, conventional search — aborts the call; partial
    /// results are never returned.
    pub fn search(&self, raw_query: &str) -> SearchResult<Vec<PersonRecord>> {
        let settings = self.settings.snapshot()?;
        match classify(raw_query, settings.activation_alias.as_deref()) {
            SearchQuery::Conventional { raw } => {
                let results = self.conventional.find_by_name(&raw)?;
                info!(
                    query = %raw,
                    results = results.len(),
                    "conventional search completed"
                );
                Ok(results)
            }
            SearchQuery::Phonetic { raw, effective } => {
                let ranked = self.phonetic(&effective, &settings)?;
                let resolved = self.resolve_all(&ranked)?;
                info!(
                    query = %raw,
                    results = resolved.len(),
                    "phonetic search found records"
                );
                Ok(resolved)
            }
        }
    }

    fn phonetic(&self, effective: &str, settings: &SearchSettings) -> SearchResult<RankedResult> {
        let tokens = tokenize(effective);
        match tokens.as_slice() {
            [] => Ok(RankedResult::default()),
            [token] => self.single_term(token, settings),
            // Tokens beyond the first two are ignored.
            [given, family, ..] => self.double_term(given, family, settings),
        }
    }

    fn single_term(&self, token: &str, settings: &SearchSettings) -> SearchResult<RankedResult> {
        let Some(code) = self.encoder.encode(token) else {
            debug!(token = %token, "token has no phonetic code");
            return Ok(RankedResult::default());
        };
        debug!(token = %token, code = %code, "single-term phonetic lookup");
        let family = self.index.lookup_by_field_code(
            NameField::Family,
            &code,
            token,
            settings.sql_row_limit,
        )?;
        let given = self.index.lookup_by_field_code(
            NameField::Given,
            &code,
            token,
            settings.sql_row_limit,
        )?;
        Ok(merge_single(&family, &given, settings.result_limit))
    }

    fn double_term(
        &self,
        given_token: &str,
        family_token: &str,
        settings: &SearchSettings,
    ) -> SearchResult<RankedResult> {
        let (Some(given_code), Some(family_code)) = (
            self.encoder.encode(given_token),
            self.encoder.encode(family_token),
        ) else {
            debug!(
                given = %given_token,
                family = %family_token,
                "term without phonetic code in two-term query"
            );
            return Ok(RankedResult::default());
        };
        debug!(
            given = %given_token,
            family = %family_token,
            given_code = %given_code,
            family_code = %family_code,
            "two-term phonetic lookup"
        );
        let combined = self.index.lookup_by_combined_code(
            &given_code,
            &family_code,
            given_token,
            family_token,
            settings.sql_row_limit,
        )?;
        Ok(merge_double(&combined, settings.result_limit))
    }

    fn resolve_all(&self, ranked: &RankedResult) -> SearchResult<Vec<PersonRecord>> {
        let mut records = Vec::with_capacity(ranked.len());
        for &id in &ranked.ids {
            match self.records.resolve(id)? {
                Some(record) => records.push(record),
                None => warn!(person_id = id, "ranked identifier did not resolve"),
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRegistry;
    use kaundula_core::{PersonName, SearchSettings, StaticSettings};

    fn registry() -> InMemoryRegistry {
        let mut registry = InMemoryRegistry::new();
        registry.insert(PersonRecord::new(1, PersonName::new("Mary", "Banda")));
        registry.insert(PersonRecord::new(2, PersonName::new("Meri", "Phiri")));
        registry.insert(PersonRecord::new(3, PersonName::new("Banda", "Chirwa")));
        registry
    }

    fn search(registry: &InMemoryRegistry, raw: &str) -> Vec<PersonRecord> {
        let settings = StaticSettings::default();
        SearchOrchestrator::new(registry, registry, registry, &settings)
            .search(raw)
            .unwrap()
    }

    #[test]
    fn unmarked_query_passes_through() {
        let registry = registry();
        let hits = search(&registry, "Mary");
        let ids: Vec<_> = hits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn marked_query_finds_sound_alikes() {
        let registry = registry();
        let hits = search(&registry, "s:Mary");
        let ids: Vec<_> = hits.iter().map(|r| r.id).collect();
        // Family stream: none (no family name sounds like Mary);
        // given stream: Mary then Meri.
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn single_term_interleaves_family_before_given() {
        let registry = registry();
        let hits = search(&registry, "soundex: Banda");
        let ids: Vec<_> = hits.iter().map(|r| r.id).collect();
        // "Banda" the family name (1) ranks in the family block ahead of
        // "Banda" the given name (3).
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn marker_only_query_is_empty() {
        let registry = registry();
        assert!(search(&registry, "soundex:").is_empty());
        assert!(search(&registry, "s:   ").is_empty());
    }

    #[test]
    fn letterless_token_is_empty_not_error() {
        let registry = registry();
        assert!(search(&registry, "s: 1234").is_empty());
        assert!(search(&registry, "s: -").is_empty());
    }

    #[test]
    fn two_term_query_uses_combined_lookup() {
        let registry = registry();
        let hits = search(&registry, "s: Mary Banda");
        let ids: Vec<_> = hits.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn third_token_is_ignored() {
        let registry = registry();
        let with_extra = search(&registry, "s: Mary Banda Ignored");
        let without = search(&registry, "s: Mary Banda");
        assert_eq!(
            with_extra.iter().map(|r| r.id).collect::<Vec<_>>(),
            without.iter().map(|r| r.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn two_term_with_letterless_family_is_empty() {
        let registry = registry();
        assert!(search(&registry, "s: Mary 99").is_empty());
    }

    #[test]
    fn result_limit_caps_phonetic_results() {
        let registry = registry();
        let settings = StaticSettings::new(SearchSettings {
            result_limit: 1,
            ..SearchSettings::default()
        });
        let hits = SearchOrchestrator::new(&registry, &registry, &registry, &settings)
            .search("s:Mary")
            .unwrap();
        assert_eq!(hits.len(), 1);
    }
}
