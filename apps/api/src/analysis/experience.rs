//! Years-of-experience heuristic.

use std::sync::OnceLock;

use regex::Regex;

fn years_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*\+?\s*(?:years|yrs)").expect("years pattern is valid")
    })
}

/// Estimates years of experience from normalized resume text.
///
/// Numeric "<n> years" / "<n>+ yrs" patterns win and the maximum match is
/// returned; otherwise seniority keywords are tried in priority order.
/// An estimate only; downstream consumers must not treat it as precise.
pub fn estimate_years(resume_text: &str) -> f64 {
    let mut best: Option<f64> = None;
    for capture in years_pattern().captures_iter(resume_text) {
        if let Ok(value) = capture[1].parse::<f64>() {
            best = Some(best.map_or(value, |b: f64| b.max(value)));
        }
    }
    if let Some(years) = best {
        return years;
    }

    if resume_text.contains("senior") {
        5.0
    } else if resume_text.contains("mid") {
        3.0
    } else if resume_text.contains("junior") {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_years_maximum_wins() {
        assert_eq!(estimate_years("3 years at acme, then 8 years at globex"), 8.0);
    }

    #[test]
    fn test_plus_suffix_and_yrs_spelling() {
        assert_eq!(estimate_years("5+ yrs building backends"), 5.0);
    }

    #[test]
    fn test_numeric_beats_seniority_keyword() {
        assert_eq!(estimate_years("senior engineer with 2 years tenure"), 2.0);
    }

    #[test]
    fn test_senior_keyword() {
        assert_eq!(estimate_years("senior backend engineer"), 5.0);
    }

    #[test]
    fn test_mid_level_keyword() {
        assert_eq!(estimate_years("mid-level developer"), 3.0);
    }

    #[test]
    fn test_junior_keyword() {
        assert_eq!(estimate_years("junior developer seeking first role"), 1.0);
    }

    #[test]
    fn test_mid_outranks_junior() {
        assert_eq!(estimate_years("mid to junior roles considered"), 3.0);
    }

    #[test]
    fn test_no_signal_defaults_to_zero() {
        assert_eq!(estimate_years("fresh graduate"), 0.0);
        assert_eq!(estimate_years(""), 0.0);
    }
}
