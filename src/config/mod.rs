use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

pub mod database;
pub mod mail;
pub mod server;

pub use database::DatabaseConfig;
pub use mail::MailConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub security: SecurityConfig,
    pub mail: MailConfig,
    /// Admin account created at startup when missing
    pub admin: Option<AdminConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `json` or `pretty`
    pub log_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_expiry_days: i64,
    /// Quota shared by the public submission endpoints
    pub rate_limit_per_minute: u32,
    /// Unset means any origin
    pub cors_allowed_origin: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

/// Minimum HS256 secret length in bytes
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Read an environment variable, falling back to `default` when unset
pub(crate) fn var_or<T: FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", key)))
}

/// Read a required environment variable
pub(crate) fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AppError::Configuration(format!("{} not set", key)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let admin = match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) => Some(AdminConfig { username, password }),
            _ => None,
        };

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            security: SecurityConfig {
                jwt_secret: required("JWT_SECRET")?,
                token_expiry_days: var_or("TOKEN_EXPIRY_DAYS", "30")?,
                rate_limit_per_minute: var_or("RATE_LIMIT_PER_MINUTE", "30")?,
                cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                    .ok()
                    .filter(|origin| !origin.trim().is_empty()),
            },
            mail: MailConfig::from_env()?,
            admin,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.security.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::Configuration(format!(
                "JWT_SECRET must be at least {} bytes",
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.security.token_expiry_days <= 0 {
            return Err(AppError::Configuration(
                "Token expiry must be greater than 0 days".to_string(),
            ));
        }

        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(
                "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        if let Some(admin) = &self.admin {
            if admin.username.trim().is_empty() || admin.password.is_empty() {
                return Err(AppError::Configuration(
                    "ADMIN_USERNAME and ADMIN_PASSWORD must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.app.log_format.eq_ignore_ascii_case("json")
    }
}
