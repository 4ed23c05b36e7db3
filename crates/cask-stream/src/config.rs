use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cask_types::StorageClass;

/// Configuration for one ordered stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Maximum entry age before the substrate may expire entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<Duration>,
    #[serde(default)]
    pub storage: StorageClass,
    #[serde(default = "default_replicas")]
    pub replicas: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<String>,
}

fn default_replicas() -> usize {
    1
}

impl StreamConfig {
    /// Create a configuration with defaults for everything but the name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            max_age: None,
            storage: StorageClass::default(),
            replicas: 1,
            placement: None,
        }
    }
}

/// Metadata reported for one stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamInfo {
    pub config: StreamConfig,
    pub created: DateTime<Utc>,
    /// Sealed streams reject all further appends.
    pub sealed: bool,
    /// Number of retained entries.
    pub entries: u64,
    /// Total payload bytes across retained entries.
    pub bytes: u64,
    /// Sequence of the first retained entry (0 when empty).
    pub first_seq: u64,
    /// Sequence of the most recent entry (0 when empty).
    pub last_seq: u64,
}
