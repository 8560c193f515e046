//! Application configuration loading from environment variables.
//!
//! All configuration is loaded from the environment at startup via standard `std::env::var`.
//! This keeps the service 12-factor friendly and lets deployments configure it through the
//! process environment (optionally seeded from a `.env` file via `dotenvy`).
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `SMTP_HOST`: SMTP relay hostname
//! - `SMTP_USER`: SMTP authentication username
//! - `SMTP_PASS`: SMTP authentication password
//! - `FROM_EMAIL`: Sender address placed on every relayed message
//! - `TO_EMAIL`: Recipient address every submission is delivered to
//! - `ALLOWED_ORIGIN`: The single origin allowed to call the API cross-origin
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging filter (default: "info,contact_api=debug,tower_http=debug")
//! - `HOST`: Server bind address (default: "0.0.0.0")
//! - `PORT`: Server port (default: 3000)
//! - `SMTP_PORT`: SMTP port, TLS-wrapped transport (default: 465)
//! - `SMTP_SEND_TIMEOUT_SECONDS`: Upper bound on one SMTP send (default: 30)
//! - `PUBLIC_DIR`: Directory the front-end is served from (default: "./public")

use serde::Deserialize;

/// Complete server configuration loaded from environment.
///
/// All fields are populated once at startup and the struct is passed by value into the
/// application state; nothing reads the environment after boot.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// SMTP relay hostname (e.g., `smtp.gmail.com`)
    pub smtp_host: String,

    /// SMTP port; 465 keeps the transport TLS-wrapped from the first byte
    pub smtp_port: u16,

    /// SMTP authentication username
    pub smtp_user: String,

    /// SMTP authentication password
    pub smtp_pass: String,

    /// Sender address placed on every relayed message
    pub from_email: String,

    /// Recipient address every submission is delivered to
    pub to_email: String,

    /// The one origin allowed to call the API cross-origin
    pub allowed_origin: String,

    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Upper bound, in seconds, on a single SMTP send
    pub smtp_send_timeout_seconds: u64,

    /// Directory the static front-end is served from
    pub public_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required environment variable is missing or
    /// cannot be parsed to the expected type.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            smtp_host: env_required("SMTP_HOST")?,
            smtp_port: env_or("SMTP_PORT", 465)?,
            smtp_user: env_required("SMTP_USER")?,
            smtp_pass: env_required("SMTP_PASS")?,
            from_email: env_required("FROM_EMAIL")?,
            to_email: env_required("TO_EMAIL")?,
            allowed_origin: env_required("ALLOWED_ORIGIN")?,
            host: env_or("HOST", "0.0.0.0".to_string())?,
            port: env_or("PORT", 3000)?,
            smtp_send_timeout_seconds: env_or("SMTP_SEND_TIMEOUT_SECONDS", 30)?,
            public_dir: env_or("PUBLIC_DIR", "./public".to_string())?,
        })
    }
}

/// Load a required environment variable.
///
/// # Errors
///
/// Returns an error if the variable is not set.
fn env_required(key: &str) -> anyhow::Result<String> {
    std::env::var(key).map_err(|_| anyhow::anyhow!("Missing required environment variable: {}", key))
}

/// Load an environment variable with a default value.
///
/// Returns the parsed environment variable if set, otherwise returns the default.
///
/// # Errors
///
/// Returns an error if the variable is set but cannot be parsed.
fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
