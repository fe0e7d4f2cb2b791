//! API configuration.

use thiserror::Error;

/// Error raised when a required environment variable is absent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// API server configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// MongoDB connection string
    pub database_uri: String,
    /// Database holding the job collection
    pub database_name: String,
    /// Shared secret for signing authentication tokens
    pub jwt_secret: String,
    /// CORS origins (credentials are enabled, so these must be explicit)
    pub cors_origins: Vec<String>,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl ApiConfig {
    /// Create config from environment variables.
    ///
    /// `DATABASE_URI` and `JWT_ACCESS_TOKEN` are required; everything else
    /// has a development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            database_uri: std::env::var("DATABASE_URI")
                .map_err(|_| ConfigError::MissingVar("DATABASE_URI"))?,
            database_name: std::env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "job-portal-db".to_string()),
            jwt_secret: std::env::var("JWT_ACCESS_TOKEN")
                .map_err(|_| ConfigError::MissingVar("JWT_ACCESS_TOKEN"))?,
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| {
                    vec![
                        "http://localhost:5173".to_string(),
                        "http://localhost:5174".to_string(),
                    ]
                }),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        })
    }
}
