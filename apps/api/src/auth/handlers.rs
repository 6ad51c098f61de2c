//! Axum route handlers for signup and login.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::create_token;
use crate::auth::password::{hash_password, verify_password};
use crate::errors::AppError;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /signup
pub async fn handle_signup(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = request.email.trim().to_lowercase();
    if email.is_empty() || request.password.is_empty() {
        return Err(AppError::Validation(
            "email and password are required".to_string(),
        ));
    }

    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&request.password)?;
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("New user registered: {email}");
    let token = create_token(
        user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;
    Ok(Json(TokenResponse { token }))
}

/// POST /login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = request.email.trim().to_lowercase();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;

    // Unknown email and wrong password get the same rejection
    let user = user.ok_or(AppError::Unauthorized)?;
    if !verify_password(&request.password, &user.password_hash) {
        return Err(AppError::Unauthorized);
    }

    let token = create_token(
        user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;
    Ok(Json(TokenResponse { token }))
}

/// Seeds a user from `BOOTSTRAP_EMAIL` / `BOOTSTRAP_PASSWORD` when both are
/// configured and the account does not already exist.
pub async fn seed_bootstrap_user(state: &AppState) -> Result<(), AppError> {
    let (Some(email), Some(password)) = (
        state.config.bootstrap_email.as_deref(),
        state.config.bootstrap_password.as_deref(),
    ) else {
        return Ok(());
    };
    let email = email.trim().to_lowercase();

    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let password_hash = hash_password(password)?;
    sqlx::query("INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(&email)
        .bind(&password_hash)
        .execute(&state.db)
        .await?;

    tracing::info!("Bootstrap user created: {email}");
    Ok(())
}
