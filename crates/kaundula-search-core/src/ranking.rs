//! Deterministic ranking contract for candidate streams
//!
//! The name index must hand back candidate streams already ordered by the
//! comparisons defined here; how a backend executes them (index scan,
//! in-memory sort, generated ORDER BY) is its own concern. The in-memory
//! registry applies them directly, which also makes this module the
//! executable reference for the contract.
//!
//! Literal substring tests are case-insensitive; the original registry
//! data lives under a case-insensitive collation and queries routinely
//! arrive lowercased. Alphabetical tie-breaks use plain byte ordering for
//! collation-free determinism.

use std::cmp::Ordering;

use crate::candidate::{Candidate, NameField};
use crate::encoder::PhoneticCode;

/// Sentinel substituted for "substring not found" so failed matches sort
/// after every found position.
pub const NOT_FOUND: u32 = 9999;

/// Byte offset of the first case-insensitive occurrence of `needle`, else
/// [`NOT_FOUND`].
#[must_use]
pub fn substring_position(haystack: &str, needle: &str) -> u32 {
    haystack
        .to_lowercase()
        .find(&needle.to_lowercase())
        .map_or(NOT_FOUND, |pos| u32::try_from(pos).unwrap_or(u32::MAX))
}

/// Whether `haystack` contains `needle`, case-insensitively.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    substring_position(haystack, needle) != NOT_FOUND
}

/// |stored code length − query code length|; an absent stored code counts
/// as length zero.
fn code_len_diff(stored: Option<&PhoneticCode>, query: &PhoneticCode) -> usize {
    stored.map_or(0, PhoneticCode::len).abs_diff(query.len())
}

/// Compare two candidates for a single-field lookup, ascending by:
/// literal position of `token` in the field, position of `code` in the
/// field's stored code, code length difference, the field value, then the
/// other name field.
///
/// For [`NameField::Family`] only the primary family name and its code
/// enter the comparison, even when the row matched through the second
/// family name's code.
#[must_use]
pub fn single_field_cmp(
    a: &Candidate,
    b: &Candidate,
    field: NameField,
    token: &str,
    code: &PhoneticCode,
) -> Ordering {
    single_field_key(a, field, token, code)
        .cmp(&single_field_key(b, field, token, code))
        .then_with(|| {
            let (a_field, a_other) = display_fields(a, field);
            let (b_field, b_other) = display_fields(b, field);
            a_field.cmp(b_field).then_with(|| a_other.cmp(b_other))
        })
}

fn single_field_key(
    c: &Candidate,
    field: NameField,
    token: &str,
    code: &PhoneticCode,
) -> (u32, u32, usize) {
    let (value, stored) = match field {
        NameField::Given => (&c.given_name, c.given_code.as_ref()),
        NameField::Family => (&c.family_name, c.family_code.as_ref()),
    };
    let name_pos = substring_position(value, token);
    let code_pos = stored.map_or(NOT_FOUND, |sc| substring_position(sc.as_str(), code.as_str()));
    (name_pos, code_pos, code_len_diff(stored, code))
}

const fn display_fields(c: &Candidate, field: NameField) -> (&String, &String) {
    match field {
        NameField::Given => (&c.given_name, &c.family_name),
        NameField::Family => (&c.family_name, &c.given_name),
    }
}

/// Priority bucket for the combined two-field lookup.
///
/// 1 — both the family side (either family name) and the given name
/// contain their literal tokens; 2 — only the family side does; 3 — the
/// given name alone, or neither. A given-only literal hit deliberately
/// shares the lowest bucket with a complete miss.
#[must_use]
pub fn match_bucket(c: &Candidate, given_token: &str, family_token: &str) -> u8 {
    let family_hit = contains_ci(&c.family_name, family_token)
        || c.family_name2
            .as_deref()
            .is_some_and(|f2| contains_ci(f2, family_token));
    let given_hit = contains_ci(&c.given_name, given_token);
    match (family_hit, given_hit) {
        (true, true) => 1,
        (true, false) => 2,
        (false, _) => 3,
    }
}

/// Compare two candidates for the combined two-field lookup, ascending by
/// [`match_bucket`], family and given code length differences, then the
/// family, given, and second family names.
#[must_use]
pub fn combined_cmp(
    a: &Candidate,
    b: &Candidate,
    given_token: &str,
    family_token: &str,
    given_code: &PhoneticCode,
    family_code: &PhoneticCode,
) -> Ordering {
    let key = |c: &Candidate| {
        (
            match_bucket(c, given_token, family_token),
            code_len_diff(c.family_code.as_ref(), family_code),
            code_len_diff(c.given_code.as_ref(), given_code),
        )
    };
    key(a)
        .cmp(&key(b))
        .then_with(|| a.family_name.cmp(&b.family_name))
        .then_with(|| a.given_name.cmp(&b.given_name))
        .then_with(|| a.family_name2.cmp(&b.family_name2))
}
