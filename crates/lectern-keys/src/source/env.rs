//! Environment variable key source.

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::{KeyMaterialSource, KeySourceError, RsaKeyMaterial};

/// Resolves key identifiers to `<PREFIX>_MODULUS` / `<PREFIX>_EXPONENT`
/// environment variables holding base64url (unpadded) magnitudes.
///
/// The prefix is the identifier uppercased with every non-alphanumeric
/// character mapped to `_`, so `tool-key` reads `TOOL_KEY_MODULUS` and
/// `TOOL_KEY_EXPONENT`.
#[derive(Debug, Default)]
pub struct EnvKeySource;

impl EnvKeySource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn env_prefix(identifier: &str) -> String {
        identifier
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn read_component(identifier: &str, var: &str) -> Result<Vec<u8>, KeySourceError> {
        let value = std::env::var(var).map_err(|_| KeySourceError::NotFound {
            identifier: identifier.to_string(),
        })?;
        // Treat empty as unset so a blank assignment does not masquerade
        // as key material.
        if value.trim().is_empty() {
            return Err(KeySourceError::NotFound {
                identifier: identifier.to_string(),
            });
        }
        URL_SAFE_NO_PAD
            .decode(value.trim())
            .map_err(|e| KeySourceError::InvalidMaterial {
                identifier: identifier.to_string(),
                detail: format!("{var} is not valid base64url: {e}"),
            })
    }
}

#[async_trait]
impl KeyMaterialSource for EnvKeySource {
    async fn fetch_key(&self, identifier: &str) -> Result<RsaKeyMaterial, KeySourceError> {
        let prefix = Self::env_prefix(identifier);
        let modulus = Self::read_component(identifier, &format!("{prefix}_MODULUS"))?;
        let exponent = Self::read_component(identifier, &format!("{prefix}_EXPONENT"))?;
        Ok(RsaKeyMaterial { modulus, exponent })
    }

    fn source_type(&self) -> &'static str {
        "env"
    }
}
