//! Trained-artifact capability: vectorizer plus optional classifier.
//!
//! The artifact is optional. `TfidfClassifier` wraps a JSON export of a
//! fitted TF-IDF vocabulary, per-column IDF weights, and (optionally) a
//! logistic-regression decision function. `NullModel` stands in when no
//! artifact is configured; every dependent sub-score then degrades to 0.0
//! instead of failing the report.

use std::collections::HashMap;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;

use crate::analysis::normalize::round2;

/// Sparse feature vector over the artifact's vocabulary columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    components: HashMap<usize, f64>,
}

impl FeatureVector {
    fn dot(&self, other: &FeatureVector) -> f64 {
        // iterate the smaller side
        let (small, large) = if self.components.len() <= other.components.len() {
            (&self.components, &other.components)
        } else {
            (&other.components, &self.components)
        };
        small
            .iter()
            .map(|(column, value)| *value * large.get(column).copied().unwrap_or(0.0))
            .sum()
    }

    fn norm(&self) -> f64 {
        self.components.values().map(|v| v * v).sum::<f64>().sqrt()
    }
}

/// Cosine similarity in [0, 1] for non-negative TF-IDF vectors. `0.0` when
/// either vector is empty.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom <= f64::EPSILON {
        0.0
    } else {
        (a.dot(b) / denom).clamp(0.0, 1.0)
    }
}

/// The trained-artifact capability. Both operations are fallible-by-absence:
/// `None` means "no artifact loaded", never an error.
pub trait MatchModel: Send + Sync {
    fn vectorize(&self, text: &str) -> Option<FeatureVector>;
    fn predict_probability(&self, vector: &FeatureVector) -> Option<f64>;
}

/// Null object used when no artifact is configured or loading failed.
pub struct NullModel;

impl MatchModel for NullModel {
    fn vectorize(&self, _text: &str) -> Option<FeatureVector> {
        None
    }

    fn predict_probability(&self, _vector: &FeatureVector) -> Option<f64> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct LinearClassifier {
    coefficients: Vec<f64>,
    intercept: f64,
}

/// On-disk artifact layout: term → column index, per-column IDF, optional
/// classifier head.
#[derive(Debug, Deserialize)]
struct ArtifactFile {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default)]
    classifier: Option<LinearClassifier>,
}

/// TF-IDF vectorizer plus optional logistic-regression head, loaded from a
/// JSON artifact exported by the training pipeline.
pub struct TfidfClassifier {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    classifier: Option<LinearClassifier>,
}

fn term_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Two-plus word characters: the vectorizer's token definition.
    PATTERN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"))
}

impl TfidfClassifier {
    pub fn load(path: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read model artifact from {path}"))?;
        let artifact: ArtifactFile = serde_json::from_str(&raw)
            .with_context(|| format!("Model artifact {path} is not valid JSON"))?;
        Self::from_artifact(artifact)
    }

    fn from_artifact(artifact: ArtifactFile) -> Result<Self> {
        let columns = artifact.vocabulary.len();
        if artifact.idf.len() != columns {
            bail!(
                "artifact idf length {} does not match vocabulary size {columns}",
                artifact.idf.len()
            );
        }
        if let Some(classifier) = &artifact.classifier {
            if classifier.coefficients.len() != columns {
                bail!(
                    "classifier coefficient length {} does not match vocabulary size {columns}",
                    classifier.coefficients.len()
                );
            }
        }
        if let Some(&out_of_range) = artifact.vocabulary.values().find(|&&index| index >= columns) {
            bail!("vocabulary column index {out_of_range} out of range for {columns} columns");
        }
        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            classifier: artifact.classifier,
        })
    }
}

impl MatchModel for TfidfClassifier {
    /// Term-count × IDF, L2-normalized: the transform the artifact was
    /// fitted with. Unknown terms are ignored.
    fn vectorize(&self, text: &str) -> Option<FeatureVector> {
        let lowered = text.to_lowercase();
        let mut components: HashMap<usize, f64> = HashMap::new();
        for term in term_pattern().find_iter(&lowered) {
            if let Some(&column) = self.vocabulary.get(term.as_str()) {
                *components.entry(column).or_insert(0.0) += 1.0;
            }
        }
        for (column, value) in components.iter_mut() {
            *value *= self.idf[*column];
        }

        let mut vector = FeatureVector { components };
        let norm = vector.norm();
        if norm > f64::EPSILON {
            for value in vector.components.values_mut() {
                *value /= norm;
            }
        }
        Some(vector)
    }

    fn predict_probability(&self, vector: &FeatureVector) -> Option<f64> {
        let classifier = self.classifier.as_ref()?;
        let score: f64 = vector
            .components
            .iter()
            .map(|(column, value)| classifier.coefficients[*column] * value)
            .sum::<f64>()
            + classifier.intercept;
        Some(1.0 / (1.0 + (-score).exp()))
    }
}

/// Cosine similarity of the two texts' vectors, scaled to 0–10 and rounded
/// to two decimals. `0.0` when no vectorizer is available or either vector
/// is empty.
pub fn semantic_similarity(model: &dyn MatchModel, resume_text: &str, job_text: &str) -> f64 {
    let (Some(resume_vector), Some(job_vector)) =
        (model.vectorize(resume_text), model.vectorize(job_text))
    else {
        return 0.0;
    };
    round2(cosine_similarity(&resume_vector, &job_vector) * 10.0)
}

/// Classifier positive-class probability for the concatenated texts, scaled
/// to 0–10 and rounded to two decimals. `0.0` when no classifier is
/// available.
pub fn model_probability_score(model: &dyn MatchModel, resume_text: &str, job_text: &str) -> f64 {
    let combined = format!("{resume_text} {job_text}");
    let Some(vector) = model.vectorize(&combined) else {
        return 0.0;
    };
    match model.predict_probability(&vector) {
        Some(probability) => round2(probability.clamp(0.0, 1.0) * 10.0),
        None => 0.0,
    }
}
