//! Flattening of canonical → aliases dictionaries.
//!
//! Dictionaries are written one canonical value per entry with its
//! aliases. Matching needs the reverse: for every alias, which canonical
//! value it stands for. [`expand`] builds that lookup, keeping insertion
//! order so that downstream tie-breaking stays reproducible.

use std::collections::BTreeMap;

use callejero_matching_models::AliasDictionary;

/// An ordered alias → canonical lookup.
///
/// Keys are lowercase. Re-inserting an existing key replaces its label
/// but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasLookup {
    entries: Vec<(String, String)>,
    positions: BTreeMap<String, usize>,
}

impl AliasLookup {
    /// Creates an empty lookup.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    /// Builds a lookup where each phrase is its own label, keyed by its
    /// lowercase form. Later duplicates replace the label of earlier ones.
    #[must_use]
    pub fn from_phrases<S: AsRef<str>>(phrases: impl IntoIterator<Item = S>) -> Self {
        let mut lookup = Self::new();
        for phrase in phrases {
            let phrase = phrase.as_ref();
            lookup.insert(phrase, phrase);
        }
        lookup
    }

    /// Registers `alias.to_lowercase() → canonical`.
    ///
    /// Returns the label previously registered for this alias, if any.
    pub fn insert(&mut self, alias: &str, canonical: &str) -> Option<String> {
        let key = alias.to_lowercase();
        if let Some(&idx) = self.positions.get(&key) {
            let previous = std::mem::replace(&mut self.entries[idx].1, canonical.to_string());
            return Some(previous);
        }
        self.positions.insert(key.clone(), self.entries.len());
        self.entries.push((key, canonical.to_string()));
        None
    }

    /// Reorders entries by descending alias length in characters. Ties
    /// keep their relative order.
    pub fn sort_by_length_desc(&mut self) {
        self.entries
            .sort_by_key(|(alias, _)| std::cmp::Reverse(alias.chars().count()));
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (alias, _))| (alias.clone(), idx))
            .collect();
    }

    /// Returns the canonical value for `alias`, ignoring case.
    #[must_use]
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.positions
            .get(&alias.to_lowercase())
            .map(|&idx| self.entries[idx].1.as_str())
    }

    /// Iterates over `(alias, canonical)` pairs in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(alias, canonical)| (alias.as_str(), canonical.as_str()))
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the lookup is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Flattens `dictionary` into an alias → canonical lookup.
///
/// Every canonical value is registered under its own lowercase form and
/// under each of its aliases. When two entries claim the same alias, the
/// later entry wins. With `sort_by_length_desc`, longer aliases come
/// first so greedy consumers see the most specific alias first.
#[must_use]
pub fn expand(dictionary: &AliasDictionary, sort_by_length_desc: bool) -> AliasLookup {
    let mut lookup = AliasLookup::new();

    for entry in &dictionary.entries {
        let names = std::iter::once(&entry.canonical).chain(&entry.aliases);
        for alias in names {
            let previous = lookup.insert(alias, &entry.canonical);
            if let Some(previous) = previous.filter(|p| *p != entry.canonical) {
                log::warn!(
                    "Alias {alias:?} of {previous:?} reassigned to {:?}",
                    entry.canonical
                );
            }
        }
    }

    if sort_by_length_desc {
        lookup.sort_by_length_desc();
    }

    log::debug!(
        "Expanded {} dictionary entries into {} aliases",
        dictionary.len(),
        lookup.len()
    );

    lookup
}
