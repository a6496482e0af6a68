//! Typed, best-effort preference slots layered over a [`KeyValueMedium`].
//!
//! Values are stored as JSON text. Reads fall back to a caller-supplied
//! default and writes never surface an error: both only log.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::KeyValueMedium;

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference medium failed for '{key}': {source}")]
    Medium { key: String, source: anyhow::Error },
    #[error("stored value for '{key}' is malformed: {source}")]
    Decode {
        key: String,
        source: serde_json::Error,
    },
    #[error("value for '{key}' could not be serialized: {source}")]
    Encode {
        key: String,
        source: serde_json::Error,
    },
}

pub struct PreferenceStore<M> {
    medium: M,
}

impl<M> PreferenceStore<M> {
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }
}

impl<M> PreferenceStore<M>
where
    M: KeyValueMedium,
{
    /// Returns `Ok(None)` when the slot is absent or holds an empty string.
    pub async fn try_load<T>(&self, key: &str) -> Result<Option<T>, PreferenceError>
    where
        T: DeserializeOwned,
    {
        let raw = self
            .medium
            .get(key)
            .await
            .map_err(|source| PreferenceError::Medium {
                key: key.to_string(),
                source,
            })?;
        match raw {
            Some(text) if !text.is_empty() => serde_json::from_str(&text)
                .map(Some)
                .map_err(|source| PreferenceError::Decode {
                    key: key.to_string(),
                    source,
                }),
            _ => Ok(None),
        }
    }

    pub async fn load<T>(&self, key: &str, initial: T) -> T
    where
        T: DeserializeOwned,
    {
        match self.try_load(key).await {
            Ok(Some(value)) => value,
            Ok(None) => {
                debug!(key, "preference absent; using default");
                initial
            }
            Err(err) => {
                warn!(key, error = %err, "failed to load preference; using default");
                initial
            }
        }
    }

    pub async fn try_save<T>(&self, key: &str, value: &T) -> Result<(), PreferenceError>
    where
        T: Serialize + ?Sized,
    {
        let text = serde_json::to_string(value).map_err(|source| PreferenceError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.medium
            .set(key, &text)
            .await
            .map_err(|source| PreferenceError::Medium {
                key: key.to_string(),
                source,
            })
    }

    /// Writes `value` immediately. A failed write leaves the previously
    /// stored value in place.
    pub async fn save<T>(&self, key: &str, value: &T)
    where
        T: Serialize + ?Sized,
    {
        if let Err(err) = self.try_save(key, value).await {
            warn!(key, error = %err, "failed to persist preference; keeping in-memory value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryMedium;

    #[tokio::test]
    async fn absent_key_yields_initial_value() {
        let store = PreferenceStore::new(MemoryMedium::new());
        let value: u32 = store.load("missing", 1000).await;
        assert_eq!(value, 1000);
        assert!(store.try_load::<u32>("missing").await.expect("load").is_none());
    }

    #[tokio::test]
    async fn empty_string_counts_as_absent() {
        let medium = MemoryMedium::new();
        medium.insert_raw("slot", "").await;
        let store = PreferenceStore::new(medium);
        let value: Vec<String> = store.load("slot", vec!["default".into()]).await;
        assert_eq!(value, vec!["default".to_string()]);
    }

    #[tokio::test]
    async fn malformed_value_falls_back_to_initial() {
        let medium = MemoryMedium::new();
        medium.insert_raw("favorites", "{not json").await;
        let store = PreferenceStore::new(medium);

        let err = store
            .try_load::<Vec<String>>("favorites")
            .await
            .expect_err("malformed");
        assert!(matches!(err, PreferenceError::Decode { .. }));

        let favorites: Vec<String> = store.load("favorites", Vec::new()).await;
        assert!(favorites.is_empty());
    }

    #[tokio::test]
    async fn wrong_shape_falls_back_to_initial() {
        let medium = MemoryMedium::new();
        medium.insert_raw("duration", "\"fast\"").await;
        let store = PreferenceStore::new(medium);
        assert_eq!(store.load("duration", 1000u32).await, 1000);
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_initial() {
        let medium = MemoryMedium::new();
        medium.insert_raw("duration", "700").await;
        medium.fail_reads(true);
        let store = PreferenceStore::new(medium);
        assert!(matches!(
            store.try_load::<u32>("duration").await,
            Err(PreferenceError::Medium { .. })
        ));
        assert_eq!(store.load("duration", 1000u32).await, 1000);
    }

    #[tokio::test]
    async fn save_writes_json_text() {
        let store = PreferenceStore::new(MemoryMedium::new());
        store.save("favorites", &["a", "b"]).await;
        assert_eq!(
            store.medium().raw("favorites").await.as_deref(),
            Some(r#"["a","b"]"#)
        );
        let loaded: Vec<String> = store.load("favorites", Vec::new()).await;
        assert_eq!(loaded, ["a", "b"]);
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_value() {
        let medium = MemoryMedium::new();
        let store = PreferenceStore::new(medium.clone());
        store.save("duration", &800u32).await;

        medium.fail_writes(true);
        store.save("duration", &1500u32).await;
        assert!(store.try_save("duration", &1500u32).await.is_err());

        assert_eq!(medium.raw("duration").await.as_deref(), Some("800"));
        assert_eq!(medium.write_count(), 1);
    }
}
