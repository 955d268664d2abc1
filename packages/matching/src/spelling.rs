//! Longest-match spelling correction for street names.
//!
//! The street name is lowercased, accent-folded and split into word
//! tokens (standalone periods are tokens of their own, so `dr.` becomes
//! `dr` `.`). Scanning left to right, the corrector replaces the known
//! misspelling with the most tokens that starts at the current position,
//! then continues after it. Replacements never overlap.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use callejero_matching_models::MisspellingDictionary;
use callejero_normalize::fold;
use regex::Regex;

/// Word tokens (apostrophes and hyphens included) or a lone period.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[\w'-]+|\.").expect("valid regex"));

#[derive(Debug, Clone)]
struct Misspelling {
    key: String,
    correction: String,
    token_count: usize,
}

/// A misspelling dictionary prepared for repeated corrections.
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    entries: Vec<Misspelling>,
}

impl SpellingCorrector {
    /// Prepares `dictionary`: entries are ordered by descending token
    /// count, ties keeping dictionary order. A repeated key keeps its first
    /// position and takes the last correction.
    ///
    /// Keys are compared verbatim against normalized input, so they should
    /// be lowercase and accent-free. Keys without any token are skipped.
    #[must_use]
    pub fn new(dictionary: &MisspellingDictionary) -> Self {
        let mut entries: Vec<Misspelling> = Vec::with_capacity(dictionary.len());
        let mut positions: BTreeMap<&str, usize> = BTreeMap::new();

        for (key, correction) in dictionary.iter() {
            if let Some(&idx) = positions.get(key) {
                let existing = &mut entries[idx];
                if existing.correction != correction {
                    log::warn!(
                        "Misspelling {key:?} reassigned from {:?} to {correction:?}",
                        existing.correction
                    );
                    existing.correction = correction.to_string();
                }
                continue;
            }

            let token_count = tokenize(key).len();
            if token_count == 0 {
                log::warn!("Skipping misspelling {key:?}: it contains no tokens");
                continue;
            }
            positions.insert(key, entries.len());
            entries.push(Misspelling {
                key: key.to_string(),
                correction: correction.to_string(),
                token_count,
            });
        }

        entries.sort_by_key(|entry| std::cmp::Reverse(entry.token_count));

        log::debug!("Prepared {} misspellings", entries.len());

        Self { entries }
    }

    /// Corrects `street_name`, returning the normalized, space-joined
    /// tokens with every recognized misspelling replaced.
    #[must_use]
    pub fn correct(&self, street_name: &str) -> String {
        let normalized = normalize_street_name(street_name);
        let tokens = tokenize(&normalized);
        let mut corrected: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            match self.longest_match_at(&tokens, i) {
                Some(entry) => {
                    corrected.push(&entry.correction);
                    i += entry.token_count;
                }
                None => {
                    corrected.push(tokens[i]);
                    i += 1;
                }
            }
        }

        corrected.join(" ")
    }

    /// Number of usable entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are usable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn longest_match_at(&self, tokens: &[&str], start: usize) -> Option<&Misspelling> {
        self.entries.iter().find(|entry| {
            tokens
                .get(start..start + entry.token_count)
                .is_some_and(|window| window.join(" ").replace(" .", ".") == entry.key)
        })
    }
}

/// Corrects `street_name` against `misspellings`.
///
/// Prefer building a [`SpellingCorrector`] once when correcting many
/// names with the same dictionary.
#[must_use]
pub fn correct_spelling(street_name: &str, misspellings: &MisspellingDictionary) -> String {
    SpellingCorrector::new(misspellings).correct(street_name)
}

/// Lowercases, unifies quote characters and folds accents.
fn normalize_street_name(street_name: &str) -> String {
    let lower = street_name.to_lowercase().replace(['´', '`'], "'");
    fold(&lower)
}

fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}
