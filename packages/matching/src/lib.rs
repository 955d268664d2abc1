#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dictionary-driven matching of Spanish street names.
//!
//! Everything here is lexical: input text is normalized with
//! [`callejero_normalize`] and compared against caller-supplied
//! dictionaries, never fuzzily.
//!
//! - [`aliases::expand`] flattens a canonical → aliases dictionary into an
//!   ordered alias → canonical lookup.
//! - [`spelling::SpellingCorrector`] replaces the longest known misspelled
//!   token run at each position, left to right.
//! - [`extract::PatternExtractor`] finds which pattern occurs earliest in
//!   a string and returns its canonical label.
//!
//! ```rust
//! use callejero_matching::extract::{ExtractOptions, PatternExtractor};
//!
//! let extractor = PatternExtractor::from_phrases(
//!     ["la corte de faraon", "pico de peña golosa"],
//!     &ExtractOptions::default(),
//! )?;
//! assert_eq!(
//!     extractor.extract("La Corte de Faraon").as_deref(),
//!     Some("LA CORTE DE FARAON")
//! );
//! assert_eq!(extractor.extract("Valleguerra"), None);
//! # Ok::<(), callejero_matching::MatchingError>(())
//! ```

pub mod address;
pub mod aliases;
pub mod config;
pub mod extract;
pub mod registry;
pub mod spelling;

pub use callejero_matching_models::{
    AliasDictionary, AliasEntry, MatchingConfig, MisspellingDictionary, MisspellingEntry,
    PatternSource,
};
pub use callejero_normalize::PrepositionSet;

/// Errors from building matchers or loading their configuration.
#[derive(Debug, thiserror::Error)]
pub enum MatchingError {
    /// A TOML dictionary or configuration file failed to parse.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A pattern failed to compile into a regular expression.
    #[error("Invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The preprocessed pattern text.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// No embedded dictionary is registered under this name.
    #[error("Unknown dictionary: {0}")]
    UnknownDictionary(String),

    /// I/O error while reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
