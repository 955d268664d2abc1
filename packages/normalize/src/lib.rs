#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Text normalization for Spanish street addresses.
//!
//! Raw addresses arrive with inconsistent accents, abbreviations and
//! punctuation. This crate provides the deterministic pipeline that both
//! dictionary patterns and input text go through before matching:
//!
//! - [`diacritics::fold`] lowercases and strips accents while keeping
//!   protected characters (`ñ`, `ü`, `°`, `º`) intact.
//! - [`abbreviations::AbbreviationTable`] expands a small set of known
//!   abbreviations (`dr.` → `doctor`).
//! - [`preprocess::preprocess`] chains the two, turns `-`, `.` and `/`
//!   into spaces, collapses whitespace and optionally drops prepositions.
//!
//! ```rust
//! use callejero_normalize::{PrepositionSet, preprocess};
//!
//! let prepositions = PrepositionSet::spanish();
//! assert_eq!(
//!     preprocess("c/ Dr. Martínez de la riva", Some(&prepositions)),
//!     "c doctor martinez riva"
//! );
//! ```

pub mod abbreviations;
pub mod diacritics;
pub mod preprocess;

pub use abbreviations::AbbreviationTable;
pub use diacritics::{ProtectedCharacterSet, fold, fold_with};
pub use preprocess::{PrepositionSet, Preprocessor, preprocess};
