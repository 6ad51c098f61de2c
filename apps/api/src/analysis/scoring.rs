//! Composite scoring and report assembly.

use serde::{Deserialize, Serialize};

use crate::analysis::experience::estimate_years;
use crate::analysis::keywords::keyword_coverage;
use crate::analysis::model::{model_probability_score, semantic_similarity, MatchModel};
use crate::analysis::normalize::{normalize, round2};
use crate::analysis::recommend::build_recommendations;
use crate::analysis::skills::{extract_skills, SkillVocabulary};
use crate::errors::AppError;

/// Relative weight of each sub-signal in the composite. Weights apply to
/// 0–1-normalized signals and sum to 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub skill_match: f64,
    pub keyword_coverage: f64,
    pub semantic_similarity: f64,
    pub model_probability: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.30,
            keyword_coverage: 0.20,
            semantic_similarity: 0.30,
            model_probability: 0.20,
        }
    }
}

/// The four named sub-scores surfaced alongside the composite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skill_match_percent: f64,
    pub keyword_coverage_percent: f64,
    pub semantic_similarity: f64,
    pub model_probability_score: f64,
}

/// Output of one scoring run. Built fresh per request, never mutated after
/// construction, never stored server-side; chat follow-ups receive it back
/// from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub final_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub years_experience_estimate: f64,
    pub recommendations: Vec<String>,
}

/// Scores a resume against a job description.
///
/// Rejects input that is empty after normalization; everything downstream is
/// total. Matching is job-text-driven: a skill the job never mentions is
/// neither matched nor missing, whatever the resume says.
pub fn analyze(
    resume_text: &str,
    job_text: &str,
    vocabulary: &SkillVocabulary,
    weights: &ScoreWeights,
    model: &dyn MatchModel,
) -> Result<AnalysisReport, AppError> {
    let resume = normalize(resume_text);
    let job = normalize(job_text);

    if resume.is_empty() {
        return Err(AppError::InputMissing(
            "Resume text missing or unable to extract from file".to_string(),
        ));
    }
    if job.is_empty() {
        return Err(AppError::InputMissing(
            "Job description missing or unable to extract from file".to_string(),
        ));
    }

    let job_skills = extract_skills(&job, vocabulary);
    let resume_skills = extract_skills(&resume, vocabulary);

    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = job_skills
        .into_iter()
        .partition(|skill| resume_skills.contains(skill));

    let job_skill_count = matched_skills.len() + missing_skills.len();
    let skill_match_percent =
        round2(100.0 * matched_skills.len() as f64 / job_skill_count.max(1) as f64);

    let keyword_coverage_percent = keyword_coverage(&resume, &job);
    let semantic = semantic_similarity(model, &resume, &job);
    let probability = model_probability_score(model, &resume, &job);
    let years_experience_estimate = estimate_years(&resume);

    let final_score = round2(
        (skill_match_percent / 100.0 * weights.skill_match
            + keyword_coverage_percent / 100.0 * weights.keyword_coverage
            + semantic / 10.0 * weights.semantic_similarity
            + probability / 10.0 * weights.model_probability)
            * 10.0,
    );

    let recommendations = build_recommendations(&resume, &job, &missing_skills);

    Ok(AnalysisReport {
        final_score,
        score_breakdown: ScoreBreakdown {
            skill_match_percent,
            keyword_coverage_percent,
            semantic_similarity: semantic,
            model_probability_score: probability,
        },
        matched_skills,
        missing_skills,
        years_experience_estimate,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::model::NullModel;

    fn test_vocabulary() -> SkillVocabulary {
        SkillVocabulary::new(["python", "sql", "flask"])
    }

    fn run(resume: &str, job: &str) -> AnalysisReport {
        analyze(
            resume,
            job,
            &test_vocabulary(),
            &ScoreWeights::default(),
            &NullModel,
        )
        .unwrap()
    }

    #[test]
    fn test_worked_example() {
        // Job-detected skills are {python, sql}; flask is on the resume but
        // absent from the job text, so it is neither matched nor missing.
        let report = run("python flask api", "backend developer python sql");
        assert_eq!(report.matched_skills, vec!["python"]);
        assert_eq!(report.missing_skills, vec!["sql"]);
        assert_eq!(report.score_breakdown.skill_match_percent, 50.0);
        assert_eq!(report.score_breakdown.keyword_coverage_percent, 25.0);
        assert_eq!(report.score_breakdown.semantic_similarity, 0.0);
        assert_eq!(report.score_breakdown.model_probability_score, 0.0);
        // (0.5 * 0.30 + 0.25 * 0.20) * 10
        assert_eq!(report.final_score, 2.0);
    }

    #[test]
    fn test_matched_and_missing_partition_job_skills() {
        let report = run("sql dba with python scripts", "needs python sql flask");
        let mut union = report.matched_skills.clone();
        union.extend(report.missing_skills.clone());
        for skill in &report.matched_skills {
            assert!(!report.missing_skills.contains(skill));
        }
        union.sort();
        assert_eq!(union, vec!["flask", "python", "sql"]);
    }

    #[test]
    fn test_empty_resume_is_rejected_before_scoring() {
        let result = analyze(
            "   \n ",
            "backend developer",
            &test_vocabulary(),
            &ScoreWeights::default(),
            &NullModel,
        );
        assert!(matches!(result, Err(AppError::InputMissing(_))));
    }

    #[test]
    fn test_empty_job_is_rejected_before_scoring() {
        let result = analyze(
            "python developer",
            "",
            &test_vocabulary(),
            &ScoreWeights::default(),
            &NullModel,
        );
        assert!(matches!(result, Err(AppError::InputMissing(_))));
    }

    #[test]
    fn test_no_job_skills_scores_zero_skill_match() {
        let report = run("python developer", "fast learner wanted");
        assert!(report.matched_skills.is_empty());
        assert!(report.missing_skills.is_empty());
        assert_eq!(report.score_breakdown.skill_match_percent, 0.0);
    }

    #[test]
    fn test_final_score_bounds() {
        let full = run("python sql flask", "python sql flask");
        assert!(full.final_score >= 0.0 && full.final_score <= 10.0);
        // all job skills and keywords covered, model absent: 0.30 + 0.20 halves
        assert_eq!(full.final_score, 5.0);

        let none = run("unrelated words", "python sql flask");
        assert!(none.final_score >= 0.0);
        assert_eq!(none.final_score, 0.0);
    }

    #[test]
    fn test_custom_weights_are_respected() {
        let weights = ScoreWeights {
            skill_match: 1.0,
            keyword_coverage: 0.0,
            semantic_similarity: 0.0,
            model_probability: 0.0,
        };
        let report = analyze(
            "python",
            "python sql",
            &test_vocabulary(),
            &weights,
            &NullModel,
        )
        .unwrap();
        // skill match is 50% and carries all the weight
        assert_eq!(report.final_score, 5.0);
    }

    #[test]
    fn test_report_serializes_with_expected_field_names() {
        let report = run("python flask api", "backend developer python sql");
        let value = serde_json::to_value(&report).unwrap();
        assert!(value.get("final_score").is_some());
        assert!(value["score_breakdown"].get("skill_match_percent").is_some());
        assert!(value["score_breakdown"]
            .get("keyword_coverage_percent")
            .is_some());
        assert!(value["score_breakdown"].get("semantic_similarity").is_some());
        assert!(value["score_breakdown"]
            .get("model_probability_score")
            .is_some());
        assert!(value.get("matched_skills").is_some());
        assert!(value.get("missing_skills").is_some());
        assert!(value.get("years_experience_estimate").is_some());
        assert!(value.get("recommendations").is_some());
    }

    #[test]
    fn test_experience_estimate_flows_into_report() {
        let report = run("python engineer, 6 years experience", "python role");
        assert_eq!(report.years_experience_estimate, 6.0);
    }
}
