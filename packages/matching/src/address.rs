//! Address helpers that run alongside name matching.

use std::sync::LazyLock;

use regex::Regex;

static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("valid regex"));

/// House number appended to addresses that have none.
pub const DEFAULT_HOUSE_NUMBER: &str = "1";

/// Appends a house number to addresses without any digit.
///
/// The number goes at the end of the first comma-separated segment, so
/// `"calle mayor, madrid"` becomes `"calle mayor 1, madrid"`. Addresses
/// that already contain a digit are returned unchanged.
#[must_use]
pub fn add_house_number(address: &str) -> String {
    if DIGIT_RE.is_match(address) {
        return address.to_string();
    }

    match address.split_once(',') {
        Some((street, rest)) => format!("{street} {DEFAULT_HOUSE_NUMBER},{rest}"),
        None => format!("{address} {DEFAULT_HOUSE_NUMBER}"),
    }
}
