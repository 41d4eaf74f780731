//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `CODEMINT__<SECTION>__<KEY>` pattern

mod storage;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

pub use storage::{FileStorageConfig, StorageBackend, StorageConfig};

/// Toolkit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MintConfig {
    /// Counter storage configuration.
    pub storage: StorageConfig,

    /// Token issuance configuration.
    pub token: TokenConfig,

    /// Sequence counter configuration.
    pub sequence: SequenceConfig,
}

impl MintConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{CODEMINT_PROFILE}.toml` (if `CODEMINT_PROFILE` is set)
    /// 3. Environment variables with `CODEMINT__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let profile =
            std::env::var("CODEMINT_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // CODEMINT__TOKEN__SECRET=... -> token.secret = ...
            .add_source(
                Environment::with_prefix("CODEMINT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mint_config: Self = config.try_deserialize()?;
        mint_config.validate()?;

        Ok(mint_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any section holds an unusable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.secret.is_empty() {
            return Err(ConfigError::Message(
                "token.secret cannot be empty".to_string(),
            ));
        }

        if self.token.magic_token_length == 0 {
            return Err(ConfigError::Message(
                "token.magic_token_length cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Token issuance configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Process-wide secret mixed into action-bound tokens.
    #[serde(default = "default_secret")]
    pub secret: String,

    /// Random byte count for magic tokens (token is twice as many hex chars).
    #[serde(default = "default_magic_token_length")]
    pub magic_token_length: usize,
}

fn default_secret() -> String {
    "mint_secret_change_me_in_production".to_string()
}

const fn default_magic_token_length() -> usize {
    32
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            magic_token_length: default_magic_token_length(),
        }
    }
}

/// Sequence counter configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceConfig {
    /// First value handed out by a counter that has never been written.
    #[serde(default = "default_start")]
    pub start: i64,
}

const fn default_start() -> i64 {
    1000
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MintConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.sequence.start, 1000);
        assert_eq!(config.token.magic_token_length, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_secret() {
        let config = MintConfig {
            token: TokenConfig {
                secret: String::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_magic_token_length() {
        let config = MintConfig {
            token: TokenConfig {
                magic_token_length: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
