//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub rate_limit: RateLimitSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitSettings {
    /// Sustained login attempts allowed per client IP per minute
    pub login_per_minute: u32,
    /// Attempts allowed back-to-back before the per-minute rate kicks in
    pub login_burst: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// When set, logs are also written to a daily rolling file in this directory
    pub directory: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        config.try_deserialize()
    }

    /// Built-in defaults. `database.url` and `jwt.secret` have none and must be supplied.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "portal-server")?
            .set_default("app.cors_origin", "http://localhost:5173")?
            .set_default("database.max_connections", 10)?
            .set_default("database.acquire_timeout_seconds", 3)?
            .set_default("jwt.access_token_expiry", crate::constants::DEFAULT_ACCESS_TOKEN_EXPIRY)?
            .set_default("rate_limit.login_per_minute", 10)?
            .set_default("rate_limit.login_burst", 5)?
            .set_default("log.level", "info")?
            .set_default("log.json", true)
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_required_overrides() {
        let config: AppConfig = AppConfig::defaults()
            .unwrap()
            .set_override("database.url", "postgres://localhost/portal")
            .unwrap()
            .set_override("jwt.secret", "test-secret")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.app.port, 8080);
        assert_eq!(config.rate_limit.login_burst, 5);
        assert_eq!(config.jwt.access_token_expiry, 3600);
        assert!(config.log.directory.is_none());
        assert!(!config.is_production());
    }

    #[test]
    fn test_missing_secret_fails() {
        let result: Result<AppConfig, _> = AppConfig::defaults()
            .unwrap()
            .set_override("database.url", "postgres://localhost/portal")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize();
        assert!(result.is_err());
    }
}
