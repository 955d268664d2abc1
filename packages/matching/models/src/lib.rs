#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dictionary and run configuration types for street name matching.
//!
//! Dictionaries are stored as arrays of TOML tables so that the file
//! order is the dictionary order: both the alias expansion and the
//! spelling corrector break ties by declaration order.
//!
//! This crate only holds data types. It has no regex or I/O dependencies.

use serde::{Deserialize, Serialize};

/// One canonical value and the aliases that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// The authoritative spelling, emitted as the match label.
    pub canonical: String,
    /// Alternative spellings and abbreviations.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// An ordered canonical → aliases mapping.
///
/// ```toml
/// [[entry]]
/// canonical = "Avenida"
/// aliases = ["av", "avda"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDictionary {
    /// Entries in declaration order.
    #[serde(default, rename = "entry")]
    pub entries: Vec<AliasEntry>,
}

impl AliasDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    #[must_use]
    pub fn with_entry<S: Into<String>>(
        mut self,
        canonical: impl Into<String>,
        aliases: impl IntoIterator<Item = S>,
    ) -> Self {
        self.entries.push(AliasEntry {
            canonical: canonical.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Number of canonical entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A single misspelled phrase and its correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisspellingEntry {
    /// The misspelled phrase, written lowercase and without accents.
    pub misspelled: String,
    /// The replacement text.
    pub correct: String,
}

/// An ordered misspelling → correction mapping.
///
/// ```toml
/// [[entry]]
/// misspelled = "alacala"
/// correct = "alcala"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MisspellingDictionary {
    /// Entries in declaration order.
    #[serde(default, rename = "entry")]
    pub entries: Vec<MisspellingEntry>,
}

impl MisspellingDictionary {
    /// Creates an empty dictionary.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry.
    #[must_use]
    pub fn with_entry(mut self, misspelled: impl Into<String>, correct: impl Into<String>) -> Self {
        self.entries.push(MisspellingEntry {
            misspelled: misspelled.into(),
            correct: correct.into(),
        });
        self
    }

    /// Iterates over `(misspelled, correct)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.misspelled.as_str(), e.correct.as_str()))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<M: Into<String>, C: Into<String>> FromIterator<(M, C)> for MisspellingDictionary {
    fn from_iter<I: IntoIterator<Item = (M, C)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(misspelled, correct)| MisspellingEntry {
                    misspelled: misspelled.into(),
                    correct: correct.into(),
                })
                .collect(),
        }
    }
}

/// Where the patterns of an extraction run come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternSource {
    /// Plain phrases, each one its own label.
    List {
        /// The phrases, in declaration order.
        patterns: Vec<String>,
    },
    /// An inline canonical → aliases dictionary.
    Aliases {
        /// Dictionary entries, in declaration order.
        #[serde(rename = "entry")]
        entries: Vec<AliasEntry>,
    },
    /// One of the dictionaries embedded in the binary (e.g.
    /// `"street_types"`).
    Builtin {
        /// Registry name of the dictionary.
        name: String,
    },
}

/// Configuration for an extraction run, deserialized from TOML.
///
/// ```toml
/// composed = true
/// prepositions = ["a", "de", "del", "la"]
///
/// [patterns]
/// type = "list"
/// patterns = ["san blas - canillejas", "fuencarral - el pardo"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Match only the part of each pattern before `" - "`, but still
    /// emit the full pattern.
    #[serde(default)]
    pub composed: bool,
    /// Words dropped from both patterns and input before matching.
    #[serde(default)]
    pub prepositions: Option<Vec<String>>,
    /// The patterns to look for.
    pub patterns: PatternSource,
}
