//! Zero-copy serializable view of a record in New Relic key order.
//!
//! Keys are written explicitly through `serialize_map`, so the output order
//! never depends on map iteration order.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::context::{LINKING_KEYS, NEWRELIC_CONTEXT_KEY};
use crate::log_record::{FemtoLogRecord, RecordMap};

/// Borrowing view of a record with linking fields flattened.
pub(super) struct NormalizedRecord<'a> {
    message: &'a str,
    context: &'a RecordMap,
    level: u16,
    level_name: &'static str,
    channel: &'a str,
    extra: ExtraWithoutContext<'a>,
    datetime: String,
    linking: Option<&'a Map<String, Value>>,
    timestamp: i64,
}

impl NormalizedRecord<'_> {
    fn linking_fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        let linking = self.linking;
        LINKING_KEYS
            .into_iter()
            .filter_map(move |key| linking.and_then(|map| map.get(key)).map(|v| (key, v)))
    }

    /// Count the total number of fields that will be serialized.
    fn count_fields(&self) -> usize {
        8 + self.linking_fields().count()
    }
}

impl<'a> From<&'a FemtoLogRecord> for NormalizedRecord<'a> {
    fn from(record: &'a FemtoLogRecord) -> Self {
        let linking = record
            .extra
            .get(NEWRELIC_CONTEXT_KEY)
            .and_then(Value::as_object);
        Self {
            message: &record.message,
            context: &record.context,
            level: record.level.code(),
            level_name: record.level.as_str(),
            channel: &record.channel,
            extra: ExtraWithoutContext(&record.extra),
            datetime: record.datetime_string(),
            linking,
            timestamp: record.timestamp_millis(),
        }
    }
}

impl Serialize for NormalizedRecord<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.count_fields()))?;
        map.serialize_entry("message", self.message)?;
        map.serialize_entry("context", self.context)?;
        map.serialize_entry("level", &self.level)?;
        map.serialize_entry("level_name", self.level_name)?;
        map.serialize_entry("channel", self.channel)?;
        map.serialize_entry("extra", &self.extra)?;
        map.serialize_entry("datetime", &self.datetime)?;
        for (key, value) in self.linking_fields() {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("timestamp", &self.timestamp)?;
        map.end()
    }
}

/// `extra` with the transient `newrelic-context` entry skipped.
struct ExtraWithoutContext<'a>(&'a RecordMap);

impl Serialize for ExtraWithoutContext<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let len = self.0.len() - usize::from(self.0.contains_key(NEWRELIC_CONTEXT_KEY));
        let mut map = serializer.serialize_map(Some(len))?;
        for (key, value) in self.0 {
            if key != NEWRELIC_CONTEXT_KEY {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}
