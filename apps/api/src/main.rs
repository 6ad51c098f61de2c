mod analysis;
mod auth;
mod config;
mod db;
mod errors;
mod extract;
mod models;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::model::{MatchModel, NullModel, TfidfClassifier};
use crate::analysis::scoring::ScoreWeights;
use crate::analysis::skills::SkillVocabulary;
use crate::auth::handlers::seed_bootstrap_user;
use crate::config::Config;
use crate::db::{create_pool, init_schema};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and make sure the users table exists
    let db = create_pool(&config.database_url).await?;
    init_schema(&db).await?;

    // Skill vocabulary: built-in unless SKILLS_PATH overrides it
    let vocabulary = Arc::new(load_vocabulary(&config));
    info!("Skill vocabulary loaded ({} entries)", vocabulary.len());

    // Trained artifact: fall back to the null model so dependent sub-scores
    // degrade to 0.0 instead of failing requests
    let model = load_model(&config);

    let state = AppState {
        db,
        config: config.clone(),
        vocabulary,
        weights: ScoreWeights::default(),
        model,
    };

    seed_bootstrap_user(&state).await?;

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn load_vocabulary(config: &Config) -> SkillVocabulary {
    match &config.skills_path {
        Some(path) => match SkillVocabulary::load(path) {
            Ok(vocabulary) => vocabulary,
            Err(e) => {
                warn!("Failed to load skill vocabulary from {path}: {e:#}; using built-in list");
                SkillVocabulary::builtin()
            }
        },
        None => SkillVocabulary::builtin(),
    }
}

fn load_model(config: &Config) -> Arc<dyn MatchModel> {
    match &config.model_path {
        Some(path) => match TfidfClassifier::load(path) {
            Ok(model) => {
                info!("Match model loaded from {path}");
                Arc::new(model)
            }
            Err(e) => {
                warn!("Failed to load match model from {path}: {e:#}; semantic scores will be 0.0");
                Arc::new(NullModel)
            }
        },
        None => {
            warn!("MODEL_PATH not set; semantic scores will be 0.0");
            Arc::new(NullModel)
        }
    }
}
