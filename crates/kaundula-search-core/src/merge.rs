//! Merge engine for ranked candidate streams
//!
//! Two pure entry points combine the name index's ordered streams into a
//! final [`RankedResult`]: [`merge_single`] interleaves the family- and
//! given-name streams of a one-term query in alternating blocks, and
//! [`merge_double`] truncates the combined stream of a two-term query.
//! Candidates are never reordered once accepted.

use std::collections::HashSet;

use kaundula_core::PersonId;

use crate::candidate::{Candidate, RankedResult};

/// Number of candidates drawn from one stream before switching to the
/// other while interleaving. Blocks keep either name field from
/// dominating the top of the result.
pub const INTERLEAVE_BLOCK: usize = 5;

/// Merge the family- and given-name streams of a single-term query.
///
/// Draws up to [`INTERLEAVE_BLOCK`] candidates from the family stream,
/// appending each identifier not already present, then the same from the
/// given stream, repeating until both streams are exhausted or
/// `result_limit` identifiers are collected. The cap is checked before
/// every draw, so a full result stops mid-block.
#[must_use]
pub fn merge_single(
    family: &[Candidate],
    given: &[Candidate],
    result_limit: usize,
) -> RankedResult {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut family_stream = family.iter();
    let mut given_stream = given.iter();

    loop {
        let family_drawn = take_block(&mut family_stream, &mut ids, &mut seen, result_limit);
        let given_drawn = take_block(&mut given_stream, &mut ids, &mut seen, result_limit);
        if ids.len() >= result_limit || (family_drawn == 0 && given_drawn == 0) {
            break;
        }
    }

    RankedResult { ids }
}

/// Draw up to one block from `stream`; returns how many candidates were
/// drawn (not appended), so the caller can tell exhaustion from a block
/// of duplicates.
fn take_block<'a>(
    stream: &mut impl Iterator<Item = &'a Candidate>,
    ids: &mut Vec<PersonId>,
    seen: &mut HashSet<PersonId>,
    result_limit: usize,
) -> usize {
    let mut drawn = 0;
    while drawn < INTERLEAVE_BLOCK && ids.len() < result_limit {
        let Some(candidate) = stream.next() else {
            break;
        };
        drawn += 1;
        if seen.insert(candidate.person_id) {
            ids.push(candidate.person_id);
        }
    }
    drawn
}

/// Truncate the combined stream of a two-term query.
///
/// The combined lookup already encodes the full ranking and returns
/// identifiers distinct by construction, so candidates are taken in
/// stream order, none skipped, until the stream ends or `result_limit`
/// is reached.
#[must_use]
pub fn merge_double(combined: &[Candidate], result_limit: usize) -> RankedResult {
    RankedResult {
        ids: combined
            .iter()
            .take(result_limit)
            .map(|c| c.person_id)
            .collect(),
    }
}
