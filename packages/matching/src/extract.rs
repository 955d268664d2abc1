//! Earliest-match extraction of canonical street names.
//!
//! A [`PatternExtractor`] compiles every pattern into a case-insensitive
//! word-bounded regex over its preprocessed text. For an input string it
//! runs the same preprocessing and returns the label of the pattern whose
//! first occurrence starts earliest. When several patterns start at the
//! same offset, the one compiled first wins; alias dictionaries are
//! compiled longest alias first, plain phrase lists in declaration order.
//!
//! Patterns that preprocess to the same text share one regex. It keeps the
//! position of the first such pattern and the label of the last.

use std::collections::BTreeMap;

use callejero_matching_models::{AliasDictionary, PatternSource};
use callejero_normalize::{PrepositionSet, Preprocessor};
use regex::{Regex, RegexBuilder};

use crate::MatchingError;
use crate::aliases::{self, AliasLookup};
use crate::registry;

/// Separator between the matched part of a composed pattern and the rest
/// of its label (`"san blas - canillejas"`).
pub const COMPOSED_SEPARATOR: &str = " - ";

/// Options shared by pattern compilation and matching.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Match only the text before [`COMPOSED_SEPARATOR`] in each pattern.
    pub composed: bool,
    /// Words dropped from both patterns and input.
    pub prepositions: Option<PrepositionSet>,
}

impl ExtractOptions {
    /// Options for composed patterns.
    #[must_use]
    pub fn composed(mut self, composed: bool) -> Self {
        self.composed = composed;
        self
    }

    /// Options that drop `prepositions`.
    #[must_use]
    pub fn prepositions(mut self, prepositions: PrepositionSet) -> Self {
        self.prepositions = Some(prepositions);
        self
    }
}

/// A compiled pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    phrase: String,
    match_key: String,
    token_count: usize,
    regex: Regex,
    label: String,
}

impl CompiledPattern {
    /// The lowercase pattern as registered.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// The preprocessed text the regex looks for.
    #[must_use]
    pub fn match_key(&self) -> &str {
        &self.match_key
    }

    /// Number of words in the match key.
    #[must_use]
    pub const fn token_count(&self) -> usize {
        self.token_count
    }

    /// The label emitted when this pattern wins.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The winning pattern for an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternMatch<'a> {
    /// The label of the winning pattern, as registered.
    pub label: &'a str,
    /// Byte offset of the match in the preprocessed input.
    pub start: usize,
    /// Byte offset just past the match in the preprocessed input.
    pub end: usize,
}

/// Finds the earliest of a set of patterns in free text.
///
/// Immutable once built, so a single extractor can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    patterns: Vec<CompiledPattern>,
    preprocessor: Preprocessor,
    prepositions: Option<PrepositionSet>,
}

impl PatternExtractor {
    /// Builds an extractor where each phrase is its own label.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvalidPattern`] if a pattern fails to
    /// compile.
    pub fn from_phrases<S: AsRef<str>>(
        phrases: impl IntoIterator<Item = S>,
        options: &ExtractOptions,
    ) -> Result<Self, MatchingError> {
        Self::from_lookup(&AliasLookup::from_phrases(phrases), options)
    }

    /// Builds an extractor from a canonical → aliases dictionary. Aliases
    /// are tried longest first; the canonical value is the label.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvalidPattern`] if a pattern fails to
    /// compile.
    pub fn from_aliases(
        dictionary: &AliasDictionary,
        options: &ExtractOptions,
    ) -> Result<Self, MatchingError> {
        Self::from_lookup(&aliases::expand(dictionary, true), options)
    }

    /// Builds an extractor from any [`PatternSource`].
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::UnknownDictionary`] for an unregistered
    /// built-in dictionary, or [`MatchingError::InvalidPattern`] if a
    /// pattern fails to compile.
    pub fn from_source(
        source: &PatternSource,
        options: &ExtractOptions,
    ) -> Result<Self, MatchingError> {
        match source {
            PatternSource::List { patterns } => Self::from_phrases(patterns, options),
            PatternSource::Aliases { entries } => Self::from_aliases(
                &AliasDictionary {
                    entries: entries.clone(),
                },
                options,
            ),
            PatternSource::Builtin { name } => {
                Self::from_aliases(&registry::alias_dictionary(name)?, options)
            }
        }
    }

    /// Builds an extractor from an alias lookup, compiling patterns in
    /// lookup order.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvalidPattern`] if a pattern fails to
    /// compile.
    pub fn from_lookup(
        lookup: &AliasLookup,
        options: &ExtractOptions,
    ) -> Result<Self, MatchingError> {
        Self::with_preprocessor(lookup, options, Preprocessor::default())
    }

    /// Like [`Self::from_lookup`], with a custom preprocessing pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`MatchingError::InvalidPattern`] if a pattern fails to
    /// compile.
    pub fn with_preprocessor(
        lookup: &AliasLookup,
        options: &ExtractOptions,
        preprocessor: Preprocessor,
    ) -> Result<Self, MatchingError> {
        let prepositions = options.prepositions.clone();
        let mut patterns: Vec<CompiledPattern> = Vec::new();
        let mut positions: BTreeMap<String, usize> = BTreeMap::new();

        for (phrase, label) in lookup.iter() {
            let key = match_key(
                phrase,
                options.composed,
                &preprocessor,
                prepositions.as_ref(),
            );
            if let Some(&idx) = positions.get(&key) {
                let existing = &mut patterns[idx];
                if existing.label != label {
                    log::warn!(
                        "Pattern {phrase:?} shares match key {key:?} with {:?}, relabeling it {label:?}",
                        existing.phrase
                    );
                    existing.label = label.to_string();
                }
                continue;
            }
            positions.insert(key.clone(), patterns.len());
            patterns.push(compile(phrase, label, key)?);
        }

        log::debug!(
            "Compiled {} patterns (composed: {}, prepositions: {})",
            patterns.len(),
            options.composed,
            prepositions.as_ref().map_or(0, PrepositionSet::len)
        );

        Ok(Self {
            patterns,
            preprocessor,
            prepositions,
        })
    }

    /// Finds the pattern whose first occurrence starts earliest in the
    /// preprocessed `text`.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<PatternMatch<'_>> {
        let processed = self.preprocessor.preprocess(text, self.prepositions.as_ref());
        let mut earliest: Option<PatternMatch<'_>> = None;

        for pattern in &self.patterns {
            let Some(m) = pattern.regex.find(&processed) else {
                continue;
            };
            if earliest.is_none_or(|best| m.start() < best.start) {
                earliest = Some(PatternMatch {
                    label: &pattern.label,
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        earliest
    }

    /// Returns the upper-cased label of the earliest pattern in `text`,
    /// or `None` if no pattern occurs.
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<String> {
        self.find(text).map(|m| m.label.to_uppercase())
    }

    /// Like [`Self::extract`], passing missing input through as missing.
    #[must_use]
    pub fn extract_opt(&self, text: Option<&str>) -> Option<String> {
        text.and_then(|text| self.extract(text))
    }

    /// The compiled patterns in tie-breaking order.
    #[must_use]
    pub fn patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Number of compiled patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if there are no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// The preprocessed text a pattern is matched by. Composed patterns only
/// keep the part before [`COMPOSED_SEPARATOR`].
fn match_key(
    phrase: &str,
    composed: bool,
    preprocessor: &Preprocessor,
    prepositions: Option<&PrepositionSet>,
) -> String {
    let key_source = if composed {
        phrase
            .split_once(COMPOSED_SEPARATOR)
            .map_or(phrase, |(head, _)| head)
    } else {
        phrase
    };

    let key = preprocessor.preprocess(key_source, prepositions);
    if key.is_empty() {
        log::warn!("Pattern {phrase:?} is empty after preprocessing");
    }
    key
}

fn compile(
    phrase: &str,
    label: &str,
    match_key: String,
) -> Result<CompiledPattern, MatchingError> {
    let regex = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&match_key)))
        .case_insensitive(true)
        .build()
        .map_err(|source| MatchingError::InvalidPattern {
            pattern: match_key.clone(),
            source,
        })?;

    Ok(CompiledPattern {
        phrase: phrase.to_string(),
        token_count: match_key.split_whitespace().count(),
        match_key,
        regex,
        label: label.to_string(),
    })
}
