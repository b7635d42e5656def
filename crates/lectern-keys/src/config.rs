//! Key source configuration from environment variables.

use crate::KeySourceError;

/// Which key source backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Base64url key components in environment variables.
    Env,
    /// HTTP JSON key store.
    Http,
    /// In-process map, for tests and embedding. The factory builds this
    /// one empty; see [`crate::build_key_source`].
    Memory,
}

impl SourceType {
    /// Parse a source type from its configuration value.
    ///
    /// # Errors
    ///
    /// Returns `KeySourceError::Config` for unknown values.
    pub fn from_str_value(value: &str) -> Result<Self, KeySourceError> {
        match value.to_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "http" => Ok(Self::Http),
            "memory" => Ok(Self::Memory),
            other => Err(KeySourceError::Config {
                detail: format!(
                    "Unknown key source type '{other}' (expected 'env', 'http' or 'memory')"
                ),
            }),
        }
    }
}

/// Key source configuration.
#[derive(Debug, Clone)]
pub struct KeySourceConfig {
    pub source_type: SourceType,
    /// Base URL of the HTTP key store. Required for `http`.
    pub address: Option<String>,
    /// Bearer token for the HTTP key store.
    pub token: Option<String>,
}

impl KeySourceConfig {
    /// Read configuration from `KEY_SOURCE`, `KEY_SOURCE_ADDRESS` and
    /// `KEY_SOURCE_TOKEN`. `KEY_SOURCE` defaults to `env`.
    ///
    /// # Errors
    ///
    /// Returns `KeySourceError::Config` when `KEY_SOURCE` names an unknown
    /// backend or `KEY_SOURCE=http` is missing its address.
    pub fn from_env() -> Result<Self, KeySourceError> {
        let source_type = match std::env::var("KEY_SOURCE") {
            Ok(value) => SourceType::from_str_value(&value)?,
            Err(_) => SourceType::Env,
        };
        let address = std::env::var("KEY_SOURCE_ADDRESS").ok();
        let token = std::env::var("KEY_SOURCE_TOKEN").ok();

        if source_type == SourceType::Http && address.is_none() {
            return Err(KeySourceError::Config {
                detail: "KEY_SOURCE_ADDRESS is required when KEY_SOURCE=http".to_string(),
            });
        }

        Ok(Self {
            source_type,
            address,
            token,
        })
    }
}
