//! Pluggable key material sources and RSA public key export for lectern.
//!
//! This crate provides a `KeyMaterialSource` trait that abstracts RSA
//! public key resolution from multiple backends (environment variables, an
//! HTTP JSON key store, an in-process map), plus a hand-rolled DER/PEM
//! `SubjectPublicKeyInfo` exporter.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lectern_keys::{build_key_source, KeySourceConfig, PublicKeyExporter};
//!
//! let config = KeySourceConfig::from_env()?;
//! let source = build_key_source(&config)?;
//! let exporter = PublicKeyExporter::new(source);
//! let pem = exporter.export("tool-key").await?;
//! ```

pub mod config;
pub mod der;
pub mod export;
pub mod source;

use std::sync::Arc;

use async_trait::async_trait;

pub use config::{KeySourceConfig, SourceType};
pub use der::DerNode;
pub use export::{rsa_public_key_to_pem, PublicKeyExporter};
pub use source::env::EnvKeySource;
pub use source::http::HttpKeySource;
pub use source::memory::MemoryKeySource;

// ── KeySourceError ───────────────────────────────────────────────────────

/// Errors returned by key source operations.
#[derive(Debug, thiserror::Error)]
pub enum KeySourceError {
    /// No key material under the given identifier.
    #[error("Key not found: '{identifier}'")]
    NotFound { identifier: String },

    /// Source is unreachable (network error, auth failure). The field is
    /// named `backend` because thiserror treats a `source` field as the
    /// error's cause.
    #[error("Key source '{backend}' unavailable: {detail}")]
    Unavailable { backend: String, detail: String },

    /// The resolved material is not usable as an RSA public key.
    #[error("Invalid key material for '{identifier}': {detail}")]
    InvalidMaterial { identifier: String, detail: String },

    /// Source configuration error (missing address, bad source type).
    #[error("Key source configuration error: {detail}")]
    Config { detail: String },
}

// ── RsaKeyMaterial ───────────────────────────────────────────────────────

/// Raw RSA public key components.
///
/// Both fields are big-endian unsigned magnitudes, exactly as a JWK's `n`
/// and `e` decode. Material is fetched fresh per export and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKeyMaterial {
    pub modulus: Vec<u8>,
    pub exponent: Vec<u8>,
}

impl RsaKeyMaterial {
    #[must_use]
    pub fn new(modulus: Vec<u8>, exponent: Vec<u8>) -> Self {
        Self { modulus, exponent }
    }
}

// ── KeyMaterialSource Trait ──────────────────────────────────────────────

/// Trait that all key material sources implement.
///
/// Sources resolve opaque key identifiers to raw RSA public key components.
#[async_trait]
pub trait KeyMaterialSource: Send + Sync {
    /// Resolve an identifier to key material.
    ///
    /// Returns `KeySourceError::NotFound` if the source holds no key under
    /// the identifier.
    async fn fetch_key(&self, identifier: &str) -> Result<RsaKeyMaterial, KeySourceError>;

    /// Source type name for logging and diagnostics.
    fn source_type(&self) -> &'static str;
}

// ── Source Factory ───────────────────────────────────────────────────────

/// Build a key material source from the given configuration.
///
/// The `memory` arm builds an empty source, so that tests and local
/// development can select an in-process source through configuration
/// alone; every fetch against it returns `NotFound`. Embeddings that
/// need pre-loaded material construct a [`MemoryKeySource`] directly
/// (see [`MemoryKeySource::with_keys`]) and pass the `Arc` to the
/// exporter instead of going through the factory.
///
/// # Errors
///
/// Returns `KeySourceError::Config` when the configuration is incomplete
/// for the selected source type.
pub fn build_key_source(
    config: &KeySourceConfig,
) -> Result<Arc<dyn KeyMaterialSource>, KeySourceError> {
    let source: Arc<dyn KeyMaterialSource> = match config.source_type {
        SourceType::Env => Arc::new(EnvKeySource::new()),
        SourceType::Http => Arc::new(HttpKeySource::new(config)?),
        SourceType::Memory => Arc::new(MemoryKeySource::new()),
    };
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_env_source() {
        let config = KeySourceConfig {
            source_type: SourceType::Env,
            address: None,
            token: None,
        };
        let source = build_key_source(&config).unwrap();
        assert_eq!(source.source_type(), "env");
    }

    #[test]
    fn test_build_memory_source() {
        let config = KeySourceConfig {
            source_type: SourceType::Memory,
            address: None,
            token: None,
        };
        let source = build_key_source(&config).unwrap();
        assert_eq!(source.source_type(), "memory");
    }

    #[tokio::test]
    async fn test_factory_memory_source_starts_empty() {
        let config = KeySourceConfig {
            source_type: SourceType::Memory,
            address: None,
            token: None,
        };
        let source = build_key_source(&config).unwrap();
        let err = source.fetch_key("tool-key").await.unwrap_err();
        assert!(matches!(err, KeySourceError::NotFound { .. }));
    }

    #[test]
    fn test_build_http_source_requires_address() {
        let config = KeySourceConfig {
            source_type: SourceType::Http,
            address: None,
            token: None,
        };
        let err = build_key_source(&config).err().expect("config error");
        assert!(matches!(err, KeySourceError::Config { .. }));
    }

    #[test]
    fn test_build_http_source_with_address() {
        let config = KeySourceConfig {
            source_type: SourceType::Http,
            address: Some("https://keys.example".to_string()),
            token: Some("token".to_string()),
        };
        let source = build_key_source(&config).unwrap();
        assert_eq!(source.source_type(), "http");
    }

    #[test]
    fn test_key_source_error_display() {
        let err = KeySourceError::NotFound {
            identifier: "tool-key".to_string(),
        };
        assert_eq!(err.to_string(), "Key not found: 'tool-key'");

        let err = KeySourceError::Unavailable {
            backend: "http".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Key source 'http' unavailable: connection refused"
        );

        let err = KeySourceError::InvalidMaterial {
            identifier: "tool-key".to_string(),
            detail: "not base64".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid key material for 'tool-key': not base64"
        );

        let err = KeySourceError::Config {
            detail: "missing KEY_SOURCE_ADDRESS".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Key source configuration error: missing KEY_SOURCE_ADDRESS"
        );
    }

    #[test]
    fn test_unavailable_is_a_leaf_error() {
        // The backend name is payload, not a chained error cause.
        let err = KeySourceError::Unavailable {
            backend: "http".to_string(),
            detail: "connection refused".to_string(),
        };
        assert!(std::error::Error::source(&err).is_none());
    }
}
