//! Improvement suggestions derived from the scored gap.

const CLOUD_TERMS: [&str; 3] = ["aws", "azure", "gcp"];

/// Builds the ordered recommendation list. Every applicable rule fires, in a
/// fixed order; the exact-keyword advice always comes last. Inputs are
/// normalized text.
pub fn build_recommendations(
    resume_text: &str,
    job_text: &str,
    missing_skills: &[String],
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_skills.is_empty() {
        let named: Vec<&str> = missing_skills.iter().take(8).map(|s| s.as_str()).collect();
        recommendations.push(format!(
            "Add the skills the job asks for that your resume does not mention: {}.",
            named.join(", ")
        ));
    }

    if resume_text.contains("project") {
        recommendations.push(
            "Move the projects most relevant to this job to the top of your resume and quantify their impact."
                .to_string(),
        );
    }

    let job_mentions_cloud = CLOUD_TERMS.iter().any(|term| job_text.contains(term));
    let resume_mentions_cloud = CLOUD_TERMS.iter().any(|term| resume_text.contains(term));
    if job_mentions_cloud && !resume_mentions_cloud {
        recommendations.push(
            "The job calls for cloud experience (AWS, Azure, or GCP); surface any cloud work you have done, even coursework or labs."
                .to_string(),
        );
    }

    recommendations.push(
        "Mirror the job description's exact keywords where they truthfully apply; automated screeners match terms literally."
            .to_string(),
    );

    recommendations
}
