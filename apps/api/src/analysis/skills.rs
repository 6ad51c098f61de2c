//! Fixed skill vocabulary and whole-word skill extraction.

use anyhow::{Context, Result};

use crate::analysis::normalize::contains_token;

/// Ordered, de-duplicated, lowercase skill list. Loaded once at startup and
/// immutable afterwards; extraction output is always a subset of it.
#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary, lowercasing and trimming entries and dropping
    /// duplicates while preserving first-seen order.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut skills: Vec<String> = Vec::new();
        for entry in entries {
            let skill = entry.into().trim().to_lowercase();
            if !skill.is_empty() && !skills.contains(&skill) {
                skills.push(skill);
            }
        }
        Self { skills }
    }

    /// Loads a vocabulary from a JSON array of strings.
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skill vocabulary from {path}"))?;
        let entries: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("Skill vocabulary {path} is not a JSON array of strings"))?;
        Ok(Self::new(entries))
    }

    /// The built-in default vocabulary.
    pub fn builtin() -> Self {
        Self::new([
            "python",
            "java",
            "javascript",
            "typescript",
            "c",
            "c++",
            "c#",
            "go",
            "rust",
            "ruby",
            "php",
            "swift",
            "kotlin",
            "scala",
            "sql",
            "html",
            "css",
            "react",
            "angular",
            "vue",
            "node.js",
            "django",
            "flask",
            "spring",
            "express",
            "aws",
            "azure",
            "gcp",
            "docker",
            "kubernetes",
            "terraform",
            "jenkins",
            "git",
            "linux",
            "bash",
            "postgresql",
            "mysql",
            "mongodb",
            "redis",
            "kafka",
            "spark",
            "hadoop",
            "machine learning",
            "deep learning",
            "tensorflow",
            "pytorch",
            "pandas",
            "numpy",
            "excel",
            "tableau",
            "power bi",
            "rest api",
            "graphql",
            "microservices",
            "agile",
            "scrum",
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Returns the vocabulary entries present in `text` as whole words, in
/// vocabulary order, without duplicates.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|skill| contains_token(text, skill))
        .map(|skill| skill.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_dedups_and_preserves_order() {
        let vocabulary = SkillVocabulary::new(["Python", "SQL", "python", "  flask "]);
        let skills: Vec<&str> = vocabulary.iter().collect();
        assert_eq!(skills, vec!["python", "sql", "flask"]);
    }

    #[test]
    fn test_extract_preserves_vocabulary_order() {
        let vocabulary = SkillVocabulary::new(["python", "sql", "flask"]);
        let found = extract_skills("flask apps backed by python", &vocabulary);
        assert_eq!(found, vec!["python", "flask"]);
    }

    #[test]
    fn test_extract_no_false_positives() {
        let vocabulary = SkillVocabulary::new(["java", "sql"]);
        let found = extract_skills("javascript and postgresql experience", &vocabulary);
        assert!(found.is_empty());
    }

    #[test]
    fn test_extract_output_is_subset_of_vocabulary() {
        let vocabulary = SkillVocabulary::new(["python", "go", "rust"]);
        let found = extract_skills("python go rust cobol fortran", &vocabulary);
        for skill in &found {
            assert!(vocabulary.iter().any(|v| v == skill));
        }
    }

    #[test]
    fn test_extract_special_character_skills() {
        let vocabulary = SkillVocabulary::new(["c", "c++", "c#", "node.js"]);
        let found = extract_skills("shipped c++ services on node.js", &vocabulary);
        assert_eq!(found, vec!["c++", "node.js"]);
    }

    #[test]
    fn test_extract_multi_word_skill() {
        let vocabulary = SkillVocabulary::new(["machine learning", "react js"]);
        let found = extract_skills("applied machine learning and react js", &vocabulary);
        assert_eq!(found, vec!["machine learning", "react js"]);
    }

    #[test]
    fn test_builtin_vocabulary_is_nonempty_and_lowercase() {
        let vocabulary = SkillVocabulary::builtin();
        assert!(!vocabulary.is_empty());
        for skill in vocabulary.iter() {
            assert_eq!(skill, skill.to_lowercase());
        }
    }
}
