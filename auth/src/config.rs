use std::env;
use std::fmt;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::token::codec::DEFAULT_ALGORITHM;
use crate::token::SecretKey;
use crate::token::TokenSettings;

/// Placeholder secret used when none is configured. Never deploy with it.
pub const DEFAULT_SECRET_KEY: &str = "change-this-secret";

/// One day.
pub const DEFAULT_EXPIRE_MINUTES: i64 = 60 * 24;

#[derive(Deserialize, Clone)]
pub struct AuthConfig {
    pub secret_key: String,
    pub access_token_expire_minutes: i64,
    pub algorithm: String,
    pub strict_algorithm: bool,
    pub require_expiry: bool,
}

impl AuthConfig {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (SECRET_KEY, ACCESS_TOKEN_EXPIRE_MINUTES, ALGORITHM, ...)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::default())
    }

    /// Same as [`AuthConfig::load`] with an explicit environment source.
    pub fn load_from(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("secret_key", DEFAULT_SECRET_KEY)?
            .set_default("access_token_expire_minutes", DEFAULT_EXPIRE_MINUTES)?
            .set_default("algorithm", DEFAULT_ALGORITHM)?
            .set_default("strict_algorithm", true)?
            .set_default("require_expiry", false)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: AuthConfig = configuration.try_deserialize()?;

        if config.access_token_expire_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "access_token_expire_minutes must be positive, got {}",
                config.access_token_expire_minutes
            )));
        }

        if Duration::try_minutes(config.access_token_expire_minutes).is_none() {
            return Err(ConfigError::Message(format!(
                "access_token_expire_minutes is out of range, got {}",
                config.access_token_expire_minutes
            )));
        }

        if config.secret_key == DEFAULT_SECRET_KEY {
            tracing::warn!("SECRET_KEY is not set; tokens are signed with the placeholder secret");
        }

        tracing::info!(
            algorithm = %config.algorithm,
            access_token_expire_minutes = config.access_token_expire_minutes,
            strict_algorithm = config.strict_algorithm,
            require_expiry = config.require_expiry,
            "Auth configuration loaded"
        );

        Ok(config)
    }

    pub fn secret(&self) -> SecretKey {
        SecretKey::from(self.secret_key.as_str())
    }

    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            algorithm: self.algorithm.clone(),
            default_ttl: Duration::try_minutes(self.access_token_expire_minutes)
                .unwrap_or(Duration::MAX),
            strict_algorithm: self.strict_algorithm,
            require_expiry: self.require_expiry,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret_key", &"<redacted>")
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("algorithm", &self.algorithm)
            .field("strict_algorithm", &self.strict_algorithm)
            .field("require_expiry", &self.require_expiry)
            .finish()
    }
}
