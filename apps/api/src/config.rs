use anyhow::{Context, Result};

/// Shared username/password pair guarding the mutating profile endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

/// Application configuration loaded from environment variables.
/// Every field has a default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres URL. `None` selects the in-memory store.
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    /// `None` disables the credential gate entirely.
    pub basic_auth: Option<BasicCredentials>,
    pub cors_origins: Vec<String>,
    pub rate_limit_per_minute: u64,
    pub static_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            basic_auth: basic_auth_from_env()?,
            cors_origins: optional_env("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
            rate_limit_per_minute: std::env::var("RATE_LIMIT_PER_MINUTE")
                .unwrap_or_else(|_| "200".to_string())
                .parse::<u64>()
                .context("RATE_LIMIT_PER_MINUTE must be a positive integer")?,
            static_dir: optional_env("STATIC_DIR"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            basic_auth: None,
            cors_origins: Vec::new(),
            rate_limit_per_minute: 200,
            static_dir: None,
        }
    }
}

fn basic_auth_from_env() -> Result<Option<BasicCredentials>> {
    let Some(username) = optional_env("BASIC_USER") else {
        return Ok(None);
    };
    let password = std::env::var("BASIC_PASS")
        .context("BASIC_PASS must be set when BASIC_USER is set")?;
    Ok(Some(BasicCredentials { username, password }))
}

/// Empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect()
}
