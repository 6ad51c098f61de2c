//! Job-description keyword coverage.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::analysis::normalize::{contains_token, round2};

fn keyword_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[a-z0-9+#.-]+").expect("keyword pattern is valid"))
}

/// Unique candidate keywords from a normalized job text: contiguous token
/// runs longer than two characters.
pub fn job_keywords(job_text: &str) -> HashSet<String> {
    keyword_pattern()
        .find_iter(job_text)
        .map(|m| m.as_str().to_string())
        .filter(|token| token.len() > 2)
        .collect()
}

/// Percentage of unique job keywords present as whole words in the resume,
/// rounded to two decimals. `0.0` when the job text yields no keywords.
pub fn keyword_coverage(resume_text: &str, job_text: &str) -> f64 {
    let keywords = job_keywords(job_text);
    if keywords.is_empty() {
        return 0.0;
    }
    let matched = keywords
        .iter()
        .filter(|keyword| contains_token(resume_text, keyword))
        .count();
    round2(100.0 * matched as f64 / keywords.len() as f64)
}
