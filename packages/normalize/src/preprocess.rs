//! Preprocessing pipeline shared by dictionary patterns and input text.
//!
//! Both sides of a match go through the same steps so that
//! "C/ Dr. Martínez" and "calle doctor martinez" line up:
//!
//! 1. Fold accents ([`crate::diacritics`])
//! 2. Expand known abbreviations ([`crate::abbreviations`])
//! 3. Turn `-`, `.` and `/` into spaces
//! 4. Collapse whitespace
//! 5. Drop prepositions, when a [`PrepositionSet`] is given
//! 6. Trim

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::abbreviations::AbbreviationTable;
use crate::diacritics::{ProtectedCharacterSet, fold_with};

/// Punctuation that separates words in street names.
static PUNCTUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-./]").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Prepositions and articles commonly dropped from Spanish street names.
pub const SPANISH_PREPOSITIONS: &[&str] = &["a", "en", "al", "de", "del", "la", "el", "los", "las"];

/// A set of words removed during preprocessing. Comparison is
/// case-insensitive and whole-word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepositionSet {
    words: BTreeSet<String>,
}

impl PrepositionSet {
    /// Builds a set from `words`, lowercasing each one.
    #[must_use]
    pub fn new<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The default Spanish set ([`SPANISH_PREPOSITIONS`]).
    #[must_use]
    pub fn spanish() -> Self {
        Self::new(SPANISH_PREPOSITIONS)
    }

    /// Returns `true` if `word` is in the set, ignoring case.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set has no words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over the words in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrepositionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// The preprocessing pipeline with its character and abbreviation tables.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    protected: ProtectedCharacterSet,
    abbreviations: AbbreviationTable,
}

impl Preprocessor {
    /// Creates a preprocessor with custom tables.
    #[must_use]
    pub const fn new(protected: ProtectedCharacterSet, abbreviations: AbbreviationTable) -> Self {
        Self {
            protected,
            abbreviations,
        }
    }

    /// The characters kept verbatim by the folding step.
    #[must_use]
    pub const fn protected(&self) -> &ProtectedCharacterSet {
        &self.protected
    }

    /// The abbreviations expanded after folding.
    #[must_use]
    pub const fn abbreviations(&self) -> &AbbreviationTable {
        &self.abbreviations
    }

    /// Runs the full pipeline over `text`.
    #[must_use]
    pub fn preprocess(&self, text: &str, prepositions: Option<&PrepositionSet>) -> String {
        let folded = fold_with(text, &self.protected);
        let expanded = self.abbreviations.apply(&folded);
        let spaced = PUNCTUATION_RE.replace_all(&expanded, " ");
        let collapsed = WHITESPACE_RE.replace_all(&spaced, " ");

        match prepositions {
            Some(prepositions) if !prepositions.is_empty() => collapsed
                .split_whitespace()
                .filter(|word| !prepositions.contains(word))
                .collect::<Vec<_>>()
                .join(" "),
            _ => collapsed.trim().to_string(),
        }
    }
}

/// Runs the default pipeline over `text`.
///
/// See the [module documentation](self) for the steps.
#[must_use]
pub fn preprocess(text: &str, prepositions: Option<&PrepositionSet>) -> String {
    static DEFAULT: LazyLock<Preprocessor> = LazyLock::new(Preprocessor::default);
    DEFAULT.preprocess(text, prepositions)
}
