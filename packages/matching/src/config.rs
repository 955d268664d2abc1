//! Loading of run configurations and dictionaries from TOML files.

use std::path::Path;

use callejero_matching_models::{AliasDictionary, MatchingConfig, MisspellingDictionary};

use crate::MatchingError;

/// Parses a [`MatchingConfig`] from TOML text.
///
/// # Errors
///
/// Returns [`MatchingError::Config`] if the TOML is invalid.
pub fn parse_config(content: &str) -> Result<MatchingConfig, MatchingError> {
    Ok(toml::de::from_str(content)?)
}

/// Reads and parses a [`MatchingConfig`] file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(path: impl AsRef<Path>) -> Result<MatchingConfig, MatchingError> {
    let path = path.as_ref();
    log::debug!("Loading matching config from {}", path.display());
    parse_config(&std::fs::read_to_string(path)?)
}

/// Reads an alias dictionary file (`[[entry]]` tables with `canonical`
/// and `aliases`).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_aliases(path: impl AsRef<Path>) -> Result<AliasDictionary, MatchingError> {
    Ok(toml::de::from_str(&std::fs::read_to_string(path)?)?)
}

/// Reads a misspelling dictionary file (`[[entry]]` tables with
/// `misspelled` and `correct`).
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_misspellings(path: impl AsRef<Path>) -> Result<MisspellingDictionary, MatchingError> {
    Ok(toml::de::from_str(&std::fs::read_to_string(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use callejero_matching_models::PatternSource;

    #[test]
    fn parses_list_config() {
        let config = parse_config(
            r#"
composed = true
prepositions = ["a", "de"]

[patterns]
type = "list"
patterns = ["san blas - canillejas", "wad-ras"]
"#,
        )
        .unwrap();

        assert!(config.composed);
        assert_eq!(
            config.prepositions,
            Some(vec!["a".to_string(), "de".to_string()])
        );
        assert_eq!(
            config.patterns,
            PatternSource::List {
                patterns: vec!["san blas - canillejas".to_string(), "wad-ras".to_string()],
            }
        );
    }

    #[test]
    fn parses_inline_aliases_in_order() {
        let config = parse_config(
            r#"
[patterns]
type = "aliases"

[[patterns.entry]]
canonical = "Avenida"
aliases = ["av", "avda"]

[[patterns.entry]]
canonical = "Calle"
"#,
        )
        .unwrap();

        assert!(!config.composed);
        assert_eq!(config.prepositions, None);
        let PatternSource::Aliases { entries } = config.patterns else {
            panic!("expected aliases");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].canonical, "Avenida");
        assert_eq!(entries[0].aliases, ["av", "avda"]);
        assert!(entries[1].aliases.is_empty());
    }

    #[test]
    fn parses_builtin_reference() {
        let config = parse_config(
            r#"
[patterns]
type = "builtin"
name = "street_types"
"#,
        )
        .unwrap();
        assert_eq!(
            config.patterns,
            PatternSource::Builtin {
                name: "street_types".to_string()
            }
        );
    }

    #[test]
    fn rejects_missing_patterns() {
        assert!(matches!(
            parse_config("composed = true"),
            Err(MatchingError::Config(_))
        ));
    }

    #[test]
    fn rejects_unknown_pattern_type() {
        assert!(parse_config("[patterns]\ntype = \"fuzzy\"\n").is_err());
    }
}
