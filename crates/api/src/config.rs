use std::path::PathBuf;

use crate::auth::jwt::JwtConfig;

/// A configuration value that is missing or cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `JWT_SECRET` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// PostgreSQL URL. When absent the server runs on the in-memory store.
    pub database_url: Option<String>,
    /// Directory uploaded images are written to and served from.
    pub images_dir: PathBuf,
    /// Base URL prefixed to stored image paths, without a trailing slash.
    pub public_base_url: String,
    /// Request body limit of the upload route.
    pub max_upload_body_bytes: usize,
    pub jwt: JwtConfig,
}

const DEFAULT_MAX_UPLOAD_BODY_BYTES: usize = 32 * 1024 * 1024;

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `DATABASE_URL`          | unset (in-memory store)    |
    /// | `IMAGES_DIR`            | `images`                   |
    /// | `PUBLIC_BASE_URL`       | `http://localhost:3000`    |
    /// | `MAX_UPLOAD_BODY_BYTES` | `33554432`                 |
    /// | `JWT_SECRET`            | **required**               |
    /// | `JWT_ISSUER`            | `nzwalks-api`              |
    /// | `JWT_AUDIENCE`          | `nzwalks-api`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), 3000u16)?;

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            origin
                .parse::<axum::http::HeaderValue>()
                .map_err(|e| ConfigError::Invalid {
                    var: "CORS_ORIGINS",
                    value: origin.clone(),
                    reason: e.to_string(),
                })?;
        }

        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", var("REQUEST_TIMEOUT_SECS"), 30u64)?;
        let max_upload_body_bytes = parse_or(
            "MAX_UPLOAD_BODY_BYTES",
            var("MAX_UPLOAD_BODY_BYTES"),
            DEFAULT_MAX_UPLOAD_BODY_BYTES,
        )?;

        let public_base_url = var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let jwt = JwtConfig {
            secret: var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            issuer: var("JWT_ISSUER").unwrap_or_else(|| "nzwalks-api".into()),
            audience: var("JWT_AUDIENCE").unwrap_or_else(|| "nzwalks-api".into()),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url: var("DATABASE_URL"),
            images_dir: PathBuf::from(var("IMAGES_DIR").unwrap_or_else(|| "images".into())),
            public_base_url,
            max_upload_body_bytes,
            jwt,
        })
    }
}

fn parse_or<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
