use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    /// Path to the trained vectorizer/classifier artifact. Optional: without
    /// it the semantic and probability sub-scores degrade to 0.0.
    pub model_path: Option<String>,
    /// Path to a JSON skill vocabulary. Optional: the built-in list is used
    /// when unset.
    pub skills_path: Option<String>,
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            token_ttl_hours: std::env::var("TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "12".to_string())
                .parse::<i64>()
                .context("TOKEN_TTL_HOURS must be a whole number of hours")?,
            model_path: std::env::var("MODEL_PATH").ok(),
            skills_path: std::env::var("SKILLS_PATH").ok(),
            bootstrap_email: std::env::var("BOOTSTRAP_EMAIL").ok(),
            bootstrap_password: std::env::var("BOOTSTRAP_PASSWORD").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
