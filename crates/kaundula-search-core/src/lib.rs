//! Phonetic name matching engine for the Kaundula person registry
//!
//! Given a free-text name query, return the records whose names *sound
//! like* the query even when spelled differently, ranked so closer
//! matches surface first, as a strict superset of plain substring search:
//! - [`encode`] / [`ChichewaSoundex`] — the phonetic encoder
//! - [`classify`] / [`tokenize`] — activation-marker detection and
//!   name tokenization
//! - [`ranking`] — the deterministic ordering contract index backends
//!   must honor
//! - [`merge_single`] / [`merge_double`] — stream merging and capping
//! - [`SearchOrchestrator`] — the host-facing entry point
//! - [`InMemoryRegistry`] — reference implementation of the collaborator
//!   traits
//!
//! The engine is stateless and side-effect-free per call; all I/O lives
//! behind the [`NameIndex`], [`RecordStore`], and [`ConventionalSearch`]
//! collaborator traits.

#![forbid(unsafe_code)]

pub mod candidate;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod memory;
pub mod merge;
pub mod orchestrator;
pub mod query;
pub mod ranking;

// Re-export key types
pub use candidate::{Candidate, NameField, RankedResult};
pub use encoder::{ChichewaSoundex, NameEncoder, PhoneticCode, encode};
pub use engine::{ConventionalSearch, NameIndex, RecordStore};
pub use error::{SearchError, SearchResult};
pub use memory::InMemoryRegistry;
pub use merge::{INTERLEAVE_BLOCK, merge_double, merge_single};
pub use orchestrator::SearchOrchestrator;
pub use query::{DEFAULT_MARKERS, SearchQuery, classify, tokenize};
pub use ranking::{NOT_FOUND, combined_cmp, match_bucket, single_field_cmp, substring_position};
