//! Known abbreviations expanded before punctuation is stripped.
//!
//! Expansion is a literal substring replacement on already-folded text,
//! applied entry by entry in table order. It is not word-bounded: `dr.`
//! also matches inside `andr.es`. Entries that contain other entries
//! (`s.a.r.` contains `r.`) must come first.

/// Abbreviations applied by [`AbbreviationTable::default`].
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    ("s.a.r.", "sar"),
    ("dr.", "doctor"),
    ("r.", "republica"),
];

/// An ordered table of literal abbreviation → expansion pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationTable {
    entries: Vec<(String, String)>,
}

impl AbbreviationTable {
    /// Builds a table from `(abbreviation, expansion)` pairs, kept in the
    /// given order.
    #[must_use]
    pub fn new<A, E>(entries: impl IntoIterator<Item = (A, E)>) -> Self
    where
        A: Into<String>,
        E: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(abbreviation, expansion)| (abbreviation.into(), expansion.into()))
                .filter(|(abbreviation, expansion): &(String, String)| {
                    if abbreviation.is_empty() {
                        log::warn!("Ignoring empty abbreviation for {expansion:?}");
                    }
                    !abbreviation.is_empty()
                })
                .collect(),
        }
    }

    /// Replaces every occurrence of every abbreviation, in table order.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        self.entries
            .iter()
            .fold(text.to_string(), |acc, (abbreviation, expansion)| {
                if acc.contains(abbreviation.as_str()) {
                    acc.replace(abbreviation.as_str(), expansion)
                } else {
                    acc
                }
            })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AbbreviationTable {
    fn default() -> Self {
        Self::new(DEFAULT_ABBREVIATIONS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_known_abbreviations() {
        let table = AbbreviationTable::default();
        assert_eq!(table.apply("dr. fleming"), "doctor fleming");
        assert_eq!(table.apply("s.a.r. borbon"), "sar borbon");
        assert_eq!(table.apply("r. dominicana"), "republica dominicana");
    }

    #[test]
    fn longer_entries_run_first() {
        // `s.a.r.` ends in `r.`; expanding it first keeps it whole.
        assert_eq!(AbbreviationTable::default().apply("s.a.r."), "sar");
    }

    #[test]
    fn matches_inside_words() {
        assert_eq!(AbbreviationTable::default().apply("andr.es"), "andoctores");
    }

    #[test]
    fn respects_caller_order() {
        let table = AbbreviationTable::new([("r.", "republica"), ("dr.", "doctor")]);
        assert_eq!(table.apply("dr. x"), "drepublica x");
    }

    #[test]
    fn skips_empty_abbreviations() {
        let table = AbbreviationTable::new([("", "x"), ("av.", "avenida")]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.apply("av. sur"), "avenida sur");
    }

    #[test]
    fn leaves_text_without_abbreviations_alone() {
        assert_eq!(AbbreviationTable::default().apply("gran via"), "gran via");
    }
}
