use std::sync::Arc;

use sqlx::PgPool;

use crate::analysis::model::MatchModel;
use crate::analysis::scoring::ScoreWeights;
use crate::analysis::skills::SkillVocabulary;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Everything here is read-only after startup; each analysis is a pure
/// function of its request plus these immutables, so concurrent requests
/// share them without synchronization.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Fixed skill vocabulary, loaded once at process start.
    pub vocabulary: Arc<SkillVocabulary>,
    /// Composite-score weights. Injected so tests can substitute their own.
    pub weights: ScoreWeights,
    /// Trained vectorizer/classifier artifact. `NullModel` when none is
    /// loaded; dependent sub-scores then degrade to 0.0.
    pub model: Arc<dyn MatchModel>,
}
