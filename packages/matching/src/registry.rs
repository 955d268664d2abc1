//! Compile-time registry of built-in dictionaries.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a dictionary requires creating a TOML file in `dictionaries/`
//! and adding a corresponding entry here.

use callejero_matching_models::{AliasDictionary, MisspellingDictionary};

use crate::MatchingError;

/// Embedded canonical → aliases dictionaries.
const ALIAS_TOMLS: &[(&str, &str)] = &[(
    "street_types",
    include_str!("../dictionaries/street_types.toml"),
)];

/// Embedded misspelling dictionaries.
const MISSPELLING_TOMLS: &[(&str, &str)] = &[(
    "madrid",
    include_str!("../dictionaries/misspellings_madrid.toml"),
)];

/// The kind of a registered dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DictionaryKind {
    /// Canonical → aliases, used for pattern extraction.
    Aliases,
    /// Misspelling → correction, used for spelling correction.
    Misspellings,
}

impl DictionaryKind {
    /// Human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aliases => "aliases",
            Self::Misspellings => "misspellings",
        }
    }
}

/// Names and kinds of every registered dictionary.
#[must_use]
pub fn all_dictionaries() -> Vec<(&'static str, DictionaryKind)> {
    ALIAS_TOMLS
        .iter()
        .map(|(name, _)| (*name, DictionaryKind::Aliases))
        .chain(
            MISSPELLING_TOMLS
                .iter()
                .map(|(name, _)| (*name, DictionaryKind::Misspellings)),
        )
        .collect()
}

/// Loads the alias dictionary registered as `name`.
///
/// # Errors
///
/// Returns [`MatchingError::UnknownDictionary`] if no alias dictionary has
/// that name, or [`MatchingError::Config`] if the embedded TOML is invalid.
pub fn alias_dictionary(name: &str) -> Result<AliasDictionary, MatchingError> {
    let (_, content) = ALIAS_TOMLS
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| MatchingError::UnknownDictionary(name.to_string()))?;
    Ok(toml::de::from_str(content)?)
}

/// Loads the misspelling dictionary registered as `name`.
///
/// # Errors
///
/// Returns [`MatchingError::UnknownDictionary`] if no misspelling
/// dictionary has that name, or [`MatchingError::Config`] if the embedded
/// TOML is invalid.
pub fn misspelling_dictionary(name: &str) -> Result<MisspellingDictionary, MatchingError> {
    let (_, content) = MISSPELLING_TOMLS
        .iter()
        .find(|(n, _)| *n == name)
        .ok_or_else(|| MatchingError::UnknownDictionary(name.to_string()))?;
    Ok(toml::de::from_str(content)?)
}

/// The Spanish street-type classes (`Calle`, `Avenida`, `Paseo`, ...).
///
/// # Errors
///
/// Returns [`MatchingError::Config`] if the embedded TOML is invalid.
pub fn street_types() -> Result<AliasDictionary, MatchingError> {
    alias_dictionary("street_types")
}

/// Misspellings observed in Madrid street names.
///
/// # Errors
///
/// Returns [`MatchingError::Config`] if the embedded TOML is invalid.
pub fn madrid_misspellings() -> Result<MisspellingDictionary, MatchingError> {
    misspelling_dictionary("madrid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn all_embedded_dictionaries_parse() {
        for (name, kind) in all_dictionaries() {
            match kind {
                DictionaryKind::Aliases => {
                    let dictionary = alias_dictionary(name).unwrap();
                    assert!(!dictionary.is_empty(), "{name} is empty");
                }
                DictionaryKind::Misspellings => {
                    let dictionary = misspelling_dictionary(name).unwrap();
                    assert!(!dictionary.is_empty(), "{name} is empty");
                }
            }
        }
    }

    #[test]
    fn dictionary_names_are_unique() {
        let mut seen = BTreeSet::new();
        for (name, _) in all_dictionaries() {
            assert!(seen.insert(name), "Duplicate dictionary name: {name}");
        }
    }

    #[test]
    fn street_types_have_unique_canonicals() {
        let dictionary = street_types().unwrap();
        let mut seen = BTreeSet::new();
        for entry in &dictionary.entries {
            assert!(
                seen.insert(entry.canonical.to_lowercase()),
                "Duplicate canonical: {}",
                entry.canonical
            );
        }
    }

    #[test]
    fn misspelling_keys_are_normalized() {
        for (key, _) in madrid_misspellings().unwrap().iter() {
            assert_eq!(key, callejero_normalize::fold(key), "{key} is not normalized");
        }
    }

    #[test]
    fn preserves_file_order() {
        let dictionary = street_types().unwrap();
        assert_eq!(dictionary.entries[0].canonical, "Calle");
        assert_eq!(dictionary.entries[1].canonical, "Avenida");
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(
            alias_dictionary("madrid"),
            Err(MatchingError::UnknownDictionary(name)) if name == "madrid"
        ));
        assert!(matches!(
            misspelling_dictionary("nope"),
            Err(MatchingError::UnknownDictionary(_))
        ));
    }
}
