//! HTTP JSON key store source.

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;

use crate::config::KeySourceConfig;
use crate::{KeyMaterialSource, KeySourceError, RsaKeyMaterial};

const SOURCE_NAME: &str = "http";

/// Key store response shape: a JWK-style key wrapped in a bundle.
#[derive(Debug, Deserialize)]
struct KeyBundle {
    key: JsonWebKey,
}

#[derive(Debug, Deserialize)]
struct JsonWebKey {
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

/// Fetches key material from an HTTP JSON key store.
///
/// Issues `GET {address}/keys/{identifier}` with bearer authentication
/// when a token is configured, and expects an RSA JWK bundle in response.
pub struct HttpKeySource {
    client: reqwest::Client,
    address: String,
    token: Option<String>,
}

impl HttpKeySource {
    /// Create a source from configuration.
    ///
    /// # Errors
    ///
    /// Returns `KeySourceError::Config` when the address is missing or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &KeySourceConfig) -> Result<Self, KeySourceError> {
        let address = config
            .address
            .clone()
            .ok_or_else(|| KeySourceError::Config {
                detail: "KEY_SOURCE_ADDRESS is required for the http key source".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KeySourceError::Config {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            address: address.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn decode_component(
        identifier: &str,
        name: &str,
        value: Option<&str>,
    ) -> Result<Vec<u8>, KeySourceError> {
        let value = value.ok_or_else(|| KeySourceError::InvalidMaterial {
            identifier: identifier.to_string(),
            detail: format!("Key is missing the '{name}' component"),
        })?;
        URL_SAFE_NO_PAD
            .decode(value)
            .map_err(|e| KeySourceError::InvalidMaterial {
                identifier: identifier.to_string(),
                detail: format!("Component '{name}' is not valid base64url: {e}"),
            })
    }
}

#[async_trait]
impl KeyMaterialSource for HttpKeySource {
    async fn fetch_key(&self, identifier: &str) -> Result<RsaKeyMaterial, KeySourceError> {
        let url = format!("{}/keys/{}", self.address, identifier);
        tracing::debug!(identifier, "Fetching key material from key store");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| KeySourceError::Unavailable {
                backend: SOURCE_NAME.to_string(),
                detail: format!("Request failed: {e}"),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(KeySourceError::NotFound {
                identifier: identifier.to_string(),
            });
        }
        if !response.status().is_success() {
            return Err(KeySourceError::Unavailable {
                backend: SOURCE_NAME.to_string(),
                detail: format!("Key store returned status {}", response.status()),
            });
        }

        let bundle: KeyBundle =
            response
                .json()
                .await
                .map_err(|e| KeySourceError::InvalidMaterial {
                    identifier: identifier.to_string(),
                    detail: format!("Malformed key store response: {e}"),
                })?;

        if bundle.key.kty != "RSA" {
            return Err(KeySourceError::InvalidMaterial {
                identifier: identifier.to_string(),
                detail: format!("Unsupported key type '{}', expected RSA", bundle.key.kty),
            });
        }

        let modulus = Self::decode_component(identifier, "n", bundle.key.n.as_deref())?;
        let exponent = Self::decode_component(identifier, "e", bundle.key.e.as_deref())?;
        Ok(RsaKeyMaterial { modulus, exponent })
    }

    fn source_type(&self) -> &'static str {
        SOURCE_NAME
    }
}

impl std::fmt::Debug for HttpKeySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpKeySource")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
