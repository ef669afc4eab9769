//! Phonetic name encoder
//!
//! Maps a name token to a compact phonetic code — one initial symbol plus
//! up to three digit classes — so that differently-spelled but
//! similarly-pronounced names collide. The rule set is tuned for Chichewa
//! naming conventions (prenasalized initial clusters, the `CH`/`THY`
//! phonemes, `W`-glides) and is part of the stored-index contract: codes
//! computed at index time and at query time must come from the identical
//! rules, so the tables here must not be "improved" in place.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading `M` before a consonant is silent: `MZIMBA` sounds like `ZIMBA`.
static LEADING_M: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^M([BDFGJKLMNPQRSTVXZ])").expect("leading-M regex"));

/// Leading `N` before a consonant is silent: `NGOMBE` sounds like `GOMBE`.
static LEADING_N: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^N([BCDFGJKLMNPQRSTVXZ])").expect("leading-N regex"));

/// Leading `D` before a consonant is silent: `DZANJA` sounds like `ZANJA`.
static LEADING_D: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^D([BCDFGJKLMNPQRSTVXZ])").expect("leading-D regex"));

/// `THY`, `CH` and `TCH` are one phoneme; rewritten before any splitting,
/// so an initial `CH` yields a code that starts with the digit `9`.
static PHONEMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("THY|CH|TCH").expect("phoneme regex"));

/// `W` followed by a vowel (or `H`/`Y`) acts as a consonant of its own.
static W_GLIDE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("W[AEIOUHY]").expect("w-glide regex"));

/// A compact phonetic signature: an initial symbol followed by up to three
/// digit classes (1–4 characters total).
///
/// Codes compare byte-wise; index backends match stored codes by prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneticCode(String);

impl PhoneticCode {
    /// Wrap a previously computed code, e.g. one read back from an index.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Code length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for codes produced by [`encode`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this code starts with `prefix` (the index matching rule).
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for PhoneticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneticCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A name-to-code encoder.
///
/// [`ChichewaSoundex`] is the canonical rule set; rule sets for other
/// naming conventions plug in through this trait.
pub trait NameEncoder: Send + Sync {
    /// Encode one name token; `None` when the token carries no letters.
    fn encode(&self, word: &str) -> Option<PhoneticCode>;
}

/// The Chichewa-tuned soundex variant used by the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChichewaSoundex;

impl NameEncoder for ChichewaSoundex {
    fn encode(&self, word: &str) -> Option<PhoneticCode> {
        encode(word)
    }
}

/// Encode one name token.
///
/// Deterministic and case-insensitive: the token is uppercased, stripped
/// to the letters `A`–`Z` (digits, punctuation and spaces all drop), and
/// `None` is returned when nothing remains. Otherwise the rewrites run in
/// a fixed order — silent initial `M`/`N`/`D` clusters, the
/// `THY`/`CH`/`TCH` phoneme, the initial-letter classes, `W`-glides, the
/// digit classes, run collapse, vowel removal — and the code is the
/// transformed initial plus at most three digits of the transformed tail.
#[must_use]
pub fn encode(word: &str) -> Option<PhoneticCode> {
    if word.is_empty() {
        return None;
    }

    let word: String = word
        .to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .collect();
    if word.is_empty() {
        return None;
    }

    let word = LEADING_M.replace(&word, "$1");
    let word = LEADING_N.replace(&word, "$1");
    let word = LEADING_D.replace(&word, "$1");
    let word = PHONEMES.replace_all(&word, "9");

    let mut chars = word.chars();
    let initial = map_initial(chars.next()?);
    let tail = chars.as_str();

    let tail = W_GLIDE.replace_all(tail, "8");
    let tail: String = tail.chars().map(map_tail).collect();
    let tail = collapse_runs(&tail);

    let mut code = String::with_capacity(4);
    code.push(initial);
    code.extend(tail.chars().filter(|&c| c != '0').take(3));
    Some(PhoneticCode(code))
}

/// Initial-letter classes; letters outside every class pass through.
const fn map_initial(c: char) -> char {
    match c {
        'A' | 'E' | 'I' => 'E',
        'C' | 'K' => 'K',
        'J' | 'Y' => 'Y',
        'V' | 'F' => 'F',
        'L' | 'R' => 'R',
        'M' | 'N' => 'N',
        'S' | 'Z' => 'Z',
        other => other,
    }
}

/// Tail digit classes; digits introduced by earlier rewrites pass through.
const fn map_tail(c: char) -> char {
    match c {
        'A' | 'E' | 'I' | 'O' | 'U' | 'H' | 'W' | 'Y' => '0',
        'B' | 'F' | 'P' | 'V' => '1',
        'C' | 'G' | 'K' | 'Q' | 'X' => '2',
        'D' | 'T' => '3',
        'L' | 'R' => '4',
        'M' | 'N' => '5',
        'S' | 'Z' => '6',
        'J' => '7',
        other => other,
    }
}

/// Collapse each maximal run of the same non-zero digit to one occurrence.
/// Runs of `0` are left alone; they are removed wholesale afterwards.
fn collapse_runs(tail: &str) -> String {
    let mut collapsed = String::with_capacity(tail.len());
    let mut prev = None;
    for c in tail.chars() {
        if prev == Some(c) && c != '0' {
            continue;
        }
        collapsed.push(c);
        prev = Some(c);
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn code(word: &str) -> Option<String> {
        encode(word).map(|c| c.as_str().to_owned())
    }

    // ── no-code inputs ──────────────────────────────────────────────────

    #[test]
    fn empty_input_has_no_code() {
        assert_eq!(encode(""), None);
    }

    #[test]
    fn letterless_inputs_have_no_code() {
        assert_eq!(encode(" "), None);
        assert_eq!(encode("-"), None);
        assert_eq!(encode("1234"), None);
        assert_eq!(encode("'''"), None);
    }

    // ── single letters and short words ──────────────────────────────────

    #[test]
    fn single_letter_is_its_own_code() {
        assert_eq!(code("x").as_deref(), Some("X"));
        assert_eq!(code("B").as_deref(), Some("B"));
    }

    #[test]
    fn single_letter_initial_is_remapped() {
        assert_eq!(code("a").as_deref(), Some("E"));
        assert_eq!(code("c").as_deref(), Some("K"));
        assert_eq!(code("s").as_deref(), Some("Z"));
    }

    #[test]
    fn punctuation_is_stripped_before_encoding() {
        assert_eq!(code("kg'g").as_deref(), Some("K2"));
    }

    #[test]
    fn liquid_consonants_share_a_class() {
        assert_eq!(code("XLL").as_deref(), Some("X4"));
        assert_eq!(code("XLR").as_deref(), Some("X4"));
    }

    #[test]
    fn vowel_only_tails_vanish() {
        assert_eq!(code("KAEI").as_deref(), Some("K"));
        assert_eq!(code("KOUW").as_deref(), Some("K"));
        assert_eq!(code("KHAY").as_deref(), Some("K"));
    }

    // ── rule-specific behavior ──────────────────────────────────────────

    #[test]
    fn w_before_vowel_is_a_consonant() {
        assert_eq!(code("KOWALE").as_deref(), Some("K84"));
    }

    #[test]
    fn silent_leading_clusters_drop() {
        assert_eq!(code("DZANJALIMODZI").as_deref(), Some("Z574"));
        assert_eq!(code("MZIMBA").as_deref(), Some("Z51"));
        assert_eq!(code("NGOMBE").as_deref(), Some("G51"));
    }

    #[test]
    fn leading_cluster_rules_can_cascade() {
        // Dropping a silent M can expose a silent N.
        assert_eq!(code("MNKHOMA"), code("KHOMA"));
    }

    #[test]
    fn leading_vowel_before_consonant_is_kept() {
        // M/N/D only drop before a consonant, never before a vowel.
        assert_eq!(code("MALUWA").as_deref(), Some("N48"));
        // Vowel removal runs after run collapse, so the two N-sounds in
        // NAMONDWE stay distinct digits.
        assert_eq!(code("NAMONDWE").as_deref(), Some("N553"));
    }

    #[test]
    fn phoneme_digits_survive_in_the_initial() {
        assert_eq!(code("CHICHEWA").as_deref(), Some("998"));
        assert_eq!(code("THYOLO").as_deref(), Some("94"));
    }

    #[test]
    fn initial_classes_merge_sound_alikes() {
        assert_eq!(code("CAUMA").as_deref(), Some("K5"));
        assert_eq!(code("EVAN").as_deref(), Some("E15"));
        assert_eq!(code("AVAN").as_deref(), Some("E15"));
        assert_eq!(code("IVAN").as_deref(), Some("E15"));
    }

    #[test]
    fn long_tails_truncate_to_three_digits() {
        let c = encode("DZANJALIMODZI").unwrap();
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn codes_match_by_prefix() {
        let stored = encode("KOWALE").unwrap();
        let query = PhoneticCode::new("K8");
        assert!(stored.starts_with(&query));
        assert!(!query.starts_with(&stored));
    }

    #[test]
    fn casing_is_irrelevant() {
        assert_eq!(code("Chichewa"), code("CHICHEWA"));
        assert_eq!(code("mzimba"), code("MZIMBA"));
    }

    #[test]
    fn display_matches_as_str() {
        let c = encode("Banda").unwrap();
        assert_eq!(c.to_string(), c.as_str());
    }

    // ── properties ──────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn encoding_is_deterministic(s in "[ -~]{0,40}") {
            prop_assert_eq!(encode(&s), encode(&s));
        }

        #[test]
        fn encoding_ignores_case(s in "[ -~]{0,40}") {
            prop_assert_eq!(encode(&s), encode(&s.to_uppercase()));
            prop_assert_eq!(encode(&s), encode(&s.to_lowercase()));
        }

        #[test]
        fn codes_are_one_to_four_chars(s in "[A-Za-z]{1,64}") {
            let c = encode(&s).unwrap();
            prop_assert!((1..=4).contains(&c.len()));
        }

        #[test]
        fn tail_digits_never_include_zero(s in "[A-Za-z]{1,64}") {
            let c = encode(&s).unwrap();
            prop_assert!(!c.as_str()[1..].contains('0'));
        }
    }
}
