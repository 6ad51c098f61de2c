//! Rule-based chat over a previously computed report.
//!
//! Not a persistent conversation: each question is classified once against
//! an ordered rule list, first match wins, with a fixed fallback. Responders
//! read only the report.

use crate::analysis::scoring::AnalysisReport;

type Responder = fn(&AnalysisReport) -> String;

struct ChatRule {
    triggers: &'static [&'static str],
    respond: Responder,
}

/// Precedence is array order; within a rule, any trigger substring in the
/// lowercased question fires it.
const CHAT_RULES: &[ChatRule] = &[
    ChatRule {
        triggers: &["improve", "better", "enhance"],
        respond: respond_improvement,
    },
    ChatRule {
        triggers: &["skills", "learn", "study"],
        respond: respond_skills,
    },
    ChatRule {
        triggers: &["ready", "eligible", "apply"],
        respond: respond_readiness,
    },
];

/// Answers a free-text question about the given report.
pub fn respond_to_chat(report: &AnalysisReport, question: &str) -> String {
    let question = question.to_lowercase();
    for rule in CHAT_RULES {
        if rule
            .triggers
            .iter()
            .any(|trigger| question.contains(trigger))
        {
            return (rule.respond)(report);
        }
    }
    respond_fallback()
}

fn respond_improvement(report: &AnalysisReport) -> String {
    let breakdown = &report.score_breakdown;
    if breakdown.skill_match_percent < 40.0 {
        format!(
            "Your biggest gap is skills: only {:.1}% of the job's skills appear in your resume. \
             Action plan: pick the missing skills you can honestly claim ({}), add concrete \
             evidence for each, and rerun the analysis.",
            breakdown.skill_match_percent,
            join_or(&report.missing_skills, "none detected"),
        )
    } else if breakdown.keyword_coverage_percent < 50.0 {
        format!(
            "Your keyword coverage is {:.1}%, which is low for automated screeners. Rewrite your \
             bullet points using the job description's own wording so exact terms match.",
            breakdown.keyword_coverage_percent
        )
    } else if report.years_experience_estimate < 1.0 {
        "Your resume reads as a junior profile. Lead with internships, coursework, and personal \
         projects, and state durations explicitly so your experience is countable."
            .to_string()
    } else {
        "Your profile is broadly aligned. Strengthen it by quantifying achievements and \
         tailoring your summary to this specific role."
            .to_string()
    }
}

fn respond_skills(report: &AnalysisReport) -> String {
    format!(
        "You already cover: {}. Worth studying next: {}. Prioritize the missing skills that \
         recur across the postings you care about.",
        join_or(&report.matched_skills, "no job-listed skills yet"),
        join_or(
            &report.missing_skills,
            "nothing; the job's skills are all covered"
        ),
    )
}

fn respond_readiness(report: &AnalysisReport) -> String {
    if report.score_breakdown.skill_match_percent >= 70.0 {
        "Yes: your skill match is strong enough to apply now. Tailor your summary to the role \
         and go for it."
            .to_string()
    } else {
        format!(
            "You are partway there. Close the gap on {} before applying, or apply now and \
             address it in your cover letter.",
            join_or(&report.missing_skills, "the job's listed skills"),
        )
    }
}

fn respond_fallback() -> String {
    "I can answer questions about your analysis report. Try: \"How can I improve?\", \
     \"What skills should I learn?\", or \"Am I ready to apply?\""
        .to_string()
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
