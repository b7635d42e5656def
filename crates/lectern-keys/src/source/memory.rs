//! In-process key source for tests and embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{KeyMaterialSource, KeySourceError, RsaKeyMaterial};

/// Holds key material in a map. Nothing is persisted.
///
/// Embeddings that need pre-loaded material construct the source
/// themselves, via [`MemoryKeySource::with_keys`] or [`insert`], and hand
/// the `Arc` to the exporter; the configuration factory builds it empty.
///
/// [`insert`]: MemoryKeySource::insert
#[derive(Debug, Default)]
pub struct MemoryKeySource {
    keys: RwLock<HashMap<String, RsaKeyMaterial>>,
}

impl MemoryKeySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a source pre-populated with key material.
    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = (K, RsaKeyMaterial)>,
        K: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(|(identifier, material)| (identifier.into(), material))
            .collect();
        Self {
            keys: RwLock::new(keys),
        }
    }

    /// Insert or replace key material under `identifier`.
    pub async fn insert(&self, identifier: impl Into<String>, material: RsaKeyMaterial) {
        self.keys.write().await.insert(identifier.into(), material);
    }
}

#[async_trait]
impl KeyMaterialSource for MemoryKeySource {
    async fn fetch_key(&self, identifier: &str) -> Result<RsaKeyMaterial, KeySourceError> {
        self.keys
            .read()
            .await
            .get(identifier)
            .cloned()
            .ok_or_else(|| KeySourceError::NotFound {
                identifier: identifier.to_string(),
            })
    }

    fn source_type(&self) -> &'static str {
        "memory"
    }
}
