use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Storage medium for a bucket's backing stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageClass {
    /// Durable on-disk storage.
    #[default]
    File,
    /// Volatile in-memory storage.
    Memory,
}

impl std::fmt::Display for StorageClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Configuration for a bucket and its backing stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum age of entries before the substrate may expire them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<Duration>,
    #[serde(default)]
    pub storage: StorageClass,
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    /// Placement hint passed through to the substrate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
}

fn default_replicas() -> usize {
    1
}

impl BucketConfig {
    /// Create a configuration with defaults for everything but the name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            ttl: None,
            storage: StorageClass::default(),
            replicas: 1,
            placement: None,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the entry TTL.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set the storage class.
    pub fn storage(mut self, storage: StorageClass) -> Self {
        self.storage = storage;
        self
    }

    /// Set the replica count.
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Set the placement hint.
    pub fn placement(mut self, placement: impl Into<String>) -> Self {
        self.placement = Some(placement.into());
        self
    }

    /// Bucket names must be non-empty.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.name.trim().is_empty() {
            return Err(TypeError::EmptyBucketName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = BucketConfig::new("bkt");
        assert_eq!(config.name, "bkt");
        assert_eq!(config.replicas, 1);
        assert_eq!(config.storage, StorageClass::File);
        assert!(config.ttl.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn builder_full() {
        let config = BucketConfig::new("bkt")
            .description("d")
            .ttl(Duration::from_secs(86400))
            .storage(StorageClass::Memory)
            .replicas(3)
            .placement("edge");
        assert_eq!(config.ttl, Some(Duration::from_secs(86400)));
        assert_eq!(config.storage, StorageClass::Memory);
        assert_eq!(config.replicas, 3);
        assert_eq!(config.placement.as_deref(), Some("edge"));
    }

    #[test]
    fn empty_name_rejected() {
        assert_eq!(
            BucketConfig::new(" ").validate(),
            Err(TypeError::EmptyBucketName)
        );
    }

    #[test]
    fn serde_roundtrip() {
        let config = BucketConfig::new("bkt").ttl(Duration::from_secs(60));
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BucketConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
