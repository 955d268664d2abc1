//! Accent folding with protected characters.
//!
//! Folding lowercases the input, decomposes it (NFKD) and keeps only the
//! ASCII part of the result, so `á` becomes `a` and characters with no
//! ASCII decomposition disappear. Characters in a [`ProtectedCharacterSet`]
//! are lifted out before decomposition and spliced back afterwards, which
//! keeps `ñ` distinct from `n` in street names like "Nuñez".

use unicode_normalization::UnicodeNormalization;

/// Characters kept verbatim by [`fold`].
pub const DEFAULT_PROTECTED: &[char] = &['ñ', 'ü', '°', 'º'];

/// An ordered set of characters that survive folding untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedCharacterSet {
    chars: Vec<char>,
}

impl ProtectedCharacterSet {
    /// Builds a set from the given characters, dropping repeats while
    /// keeping first-seen order.
    #[must_use]
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut unique = Vec::new();
        for c in chars {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Self { chars: unique }
    }

    /// An empty set: every character is folded.
    #[must_use]
    pub const fn empty() -> Self {
        Self { chars: Vec::new() }
    }

    /// Returns `true` if `c` is protected.
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// The protected characters in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }
}

impl Default for ProtectedCharacterSet {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED.iter().copied())
    }
}

/// Folds `input` to lowercase ASCII, preserving the default protected
/// characters.
///
/// ```rust
/// assert_eq!(callejero_normalize::fold("ÁÉÍÓÚ üé ñü"), "aeiou üe ñü");
/// ```
#[must_use]
pub fn fold(input: &str) -> String {
    fold_with(input, &ProtectedCharacterSet::default())
}

/// Folds `input` to lowercase ASCII, preserving the characters in
/// `protected`.
///
/// Protected characters are matched after lowercasing, so an uppercase
/// entry in the set never matches.
#[must_use]
pub fn fold_with(input: &str, protected: &ProtectedCharacterSet) -> String {
    let lower = input.to_lowercase();
    let mut folded = String::with_capacity(lower.len());
    let mut run_start = 0;

    for (idx, c) in lower.char_indices() {
        if protected.contains(c) {
            push_ascii(&mut folded, &lower[run_start..idx]);
            folded.push(c);
            run_start = idx + c.len_utf8();
        }
    }
    push_ascii(&mut folded, &lower[run_start..]);

    folded
}

/// Appends the ASCII part of the NFKD decomposition of `run`.
fn push_ascii(out: &mut String, run: &str) {
    out.extend(run.nfkd().filter(char::is_ascii));
}
