//! Text canonicalization shared by every matching stage.

/// Collapses whitespace runs to single spaces, lowercases, and trims.
/// Idempotent; empty input yields an empty string, never an error.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Characters that form a token. Includes the symbols that occur inside real
/// skill names ("c++", "c#", "node.js"), so "c" is not a whole-word match
/// inside "c++".
pub fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '-')
}

/// Whole-word containment: `term` occurs in `text` with no token character
/// on either side. Matching is literal, so terms containing regex
/// metacharacters behave as written. Both arguments are expected normalized.
pub fn contains_token(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    for (start, _) in text.match_indices(term) {
        let before = text[..start].chars().next_back();
        let after = text[start + term.len()..].chars().next();
        let bounded_left = before.map_or(true, |c| !is_token_char(c));
        let bounded_right = after.map_or(true, |c| !is_token_char(c));
        if bounded_left && bounded_right {
            return true;
        }
    }
    false
}

/// Rounds to two decimal places. All reported scores go through this.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
