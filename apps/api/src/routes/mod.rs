pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::auth::handlers as auth_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/signup", post(auth_handlers::handle_signup))
        .route("/login", post(auth_handlers::handle_login))
        .route("/analyze", post(analysis_handlers::handle_analyze))
        .route("/chat", post(analysis_handlers::handle_chat))
        .with_state(state)
}
