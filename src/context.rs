//! Linking metadata and the providers that supply it.
//!
//! A [`ContextProvider`] reports whether a compatible agent is present in the
//! host process and, if so, returns the identifiers that tie a log line to
//! the entity, trace and span that produced it.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Key under which the processor stores linking metadata in `extra`.
pub const NEWRELIC_CONTEXT_KEY: &str = "newrelic-context";

/// Linking keys, in the order they are flattened into formatted output.
pub const LINKING_KEYS: [&str; 5] = [
    "hostname",
    "entity.name",
    "entity.type",
    "trace.id",
    "span.id",
];

/// String-to-string mapping returned by a [`ContextProvider`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkingMetadata {
    entries: BTreeMap<String, String>,
}

impl LinkingMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as the JSON object stored under [`NEWRELIC_CONTEXT_KEY`].
    ///
    /// Recognised keys come first in [`LINKING_KEYS`] order, followed by any
    /// other entries the provider returned.
    pub fn to_json(&self) -> Value {
        let mut map = Map::with_capacity(self.entries.len());
        for key in LINKING_KEYS {
            if let Some(value) = self.entries.get(key) {
                map.insert(key.to_owned(), Value::String(value.clone()));
            }
        }
        for (key, value) in &self.entries {
            if !LINKING_KEYS.contains(&key.as_str()) {
                map.insert(key.clone(), Value::String(value.clone()));
            }
        }
        Value::Object(map)
    }
}

impl<K, V> FromIterator<(K, V)> for LinkingMetadata
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Source of linking metadata for the processor.
///
/// `linking_metadata` is only called after `context_available` returned
/// `true` for the same record.
pub trait ContextProvider: Send + Sync {
    /// Whether a compatible context source is present.
    fn context_available(&self) -> bool;

    /// Best-effort retrieval of the current linking metadata.
    fn linking_metadata(&self) -> LinkingMetadata;
}

impl<P: ContextProvider + ?Sized> ContextProvider for Box<P> {
    fn context_available(&self) -> bool {
        (**self).context_available()
    }

    fn linking_metadata(&self) -> LinkingMetadata {
        (**self).linking_metadata()
    }
}

/// Provider that always reports the same metadata.
///
/// Suits processes whose entity identity is fixed at start-up.
#[derive(Clone, Debug, Default)]
pub struct StaticContextProvider {
    metadata: LinkingMetadata,
}

impl StaticContextProvider {
    pub fn new(metadata: LinkingMetadata) -> Self {
        Self { metadata }
    }
}

impl ContextProvider for StaticContextProvider {
    fn context_available(&self) -> bool {
        true
    }

    fn linking_metadata(&self) -> LinkingMetadata {
        self.metadata.clone()
    }
}

/// Provider for processes without a compatible agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoContextProvider;

impl ContextProvider for NoContextProvider {
    fn context_available(&self) -> bool {
        false
    }

    fn linking_metadata(&self) -> LinkingMetadata {
        LinkingMetadata::default()
    }
}
