//! Environment configuration
//! 
//! Settings come from process environment variables (optionally loaded from a
//! `.env` file by `main`). Everything except `JWT_SECRET` in production has a
//! development default.

use std::env;

use anyhow::{bail, Context, Result};

const DEV_JWT_SECRET: &str = "logitrack-development-secret";

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub bcrypt_cost: u32,
    /// PostgreSQL is used when set, the in-memory store otherwise
    pub database_url: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 8 * 3600,
            cors_origins: Vec::new(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            database_url: None,
        }
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);

        let port = match env::var("PORT") {
            Ok(value) => value.parse().context("PORT must be a valid number")?,
            Err(_) => defaults.port,
        };

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "production" => bail!("JWT_SECRET must be set in production"),
            _ => defaults.jwt_secret,
        };

        let jwt_expiration = match env::var("JWT_EXPIRATION") {
            Ok(value) => value.parse().context("JWT_EXPIRATION must be a valid number")?,
            Err(_) => defaults.jwt_expiration,
        };

        let bcrypt_cost = match env::var("BCRYPT_COST") {
            Ok(value) => value.parse().context("BCRYPT_COST must be a valid number")?,
            Err(_) => defaults.bcrypt_cost,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            environment,
            port,
            host: env::var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration,
            cors_origins,
            bcrypt_cost,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert!(config.database_url.is_none());
    }
}
