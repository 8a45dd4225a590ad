//! Phone-number extraction
//!
//! Heuristic sweep for phone-number-like substrings in paste text.
//! Accepts international prefixes and common separators; anything with
//! fewer than seven digits (ids, ports, years) is dropped.

use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\(?\d{1,4}\)?(?:[\s.-]?\(?\d{1,4}\)?){1,4}")
        .expect("phone pattern compiles")
});

const MIN_DIGITS: usize = 7;

/// Phone-number-like substrings in `text`, first-seen order,
/// deduplicated.
pub fn phone_numbers(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for candidate in PHONE_PATTERN.find_iter(text) {
        let candidate = candidate.as_str().trim();
        let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
        if digits < MIN_DIGITS {
            continue;
        }
        if !found.iter().any(|seen| seen == candidate) {
            found.push(candidate.to_string());
        }
    }
    found
}
