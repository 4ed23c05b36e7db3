use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::link::Link;

/// Multi-valued header map attached to an object.
///
/// Each key maps to an ordered sequence of values: insertion order within a
/// key is preserved, while the key set itself is unordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<String, Vec<String>>);

impl Headers {
    /// Create an empty header map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all values for `key` with a single value.
    pub fn put(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), vec![value.into()]);
        self
    }

    /// Append a value to `key`, preserving any existing values.
    pub fn add(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.entry(key.into()).or_default().push(value.into());
        self
    }

    /// All values for `key`, in insertion order.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// The first value for `key`.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over keys and their value lists.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Every key must carry at least one value.
    pub fn validate(&self) -> Result<(), TypeError> {
        for (key, values) in &self.0 {
            if values.is_empty() {
                return Err(TypeError::EmptyHeaderValues(key.clone()));
            }
        }
        Ok(())
    }
}

/// Caller-supplied identity and attributes of a (prospective) object.
///
/// The name is the unique key within a bucket. The optional chunk size
/// controls payload splitting on put; the optional link is only ever set by
/// the link-creation operations, never by callers of put.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Headers::is_empty")]
    pub headers: Headers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl ObjectMeta {
    /// Create a meta carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            headers: Headers::new(),
            chunk_size: None,
            link: None,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the header map.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Set the chunk size in bytes.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Validate name, headers, and chunk size.
    pub fn validate(&self) -> Result<(), TypeError> {
        if self.name.trim().is_empty() {
            return Err(TypeError::EmptyObjectName);
        }
        if self.chunk_size == Some(0) {
            return Err(TypeError::ZeroChunkSize);
        }
        self.headers.validate()
    }
}
