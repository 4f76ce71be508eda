//! Log record representation consumed by the New Relic pipeline.
//!
//! This module defines the `FemtoLogRecord` struct that captures a log event
//! along with its channel, severity, and the two free-form maps (`context` and
//! `extra`) carried through to the JSON payload. Records are values: the
//! processor produces modified copies and never mutates the caller's record.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::level::FemtoLevel;

/// Ordered JSON object used for `context` and `extra`.
pub type RecordMap = Map<String, Value>;

#[derive(Clone, Debug, PartialEq)]
pub struct FemtoLogRecord {
    /// Time the record was created, with its original UTC offset.
    pub datetime: DateTime<FixedOffset>,
    /// Name of the logger channel that produced the record.
    pub channel: String,
    /// Severity of the record.
    pub level: FemtoLevel,
    /// The log message content.
    pub message: String,
    /// Caller-supplied structured context.
    pub context: RecordMap,
    /// Data attached by processors.
    pub extra: RecordMap,
}

impl FemtoLogRecord {
    /// Construct a record stamped with the current UTC time.
    pub fn new(channel: &str, level: FemtoLevel, message: &str) -> Self {
        Self::at(Utc::now().fixed_offset(), channel, level, message)
    }

    /// Construct a record with an explicit timestamp.
    pub fn at(
        datetime: DateTime<FixedOffset>,
        channel: &str,
        level: FemtoLevel,
        message: &str,
    ) -> Self {
        Self {
            datetime,
            channel: channel.to_owned(),
            level,
            message: message.to_owned(),
            context: RecordMap::new(),
            extra: RecordMap::new(),
        }
    }

    /// Replace the record's context map.
    pub fn with_context(mut self, context: RecordMap) -> Self {
        self.context = context;
        self
    }

    /// Replace the record's extra map.
    pub fn with_extra(mut self, extra: RecordMap) -> Self {
        self.extra = extra;
        self
    }

    /// RFC 3339 rendering with microsecond precision and a numeric offset,
    /// e.g. `2021-01-01T00:00:00.123456+00:00`.
    pub fn datetime_string(&self) -> String {
        self.datetime.to_rfc3339_opts(SecondsFormat::Micros, false)
    }

    /// Milliseconds since the Unix epoch, floored from microsecond precision.
    pub fn timestamp_millis(&self) -> i64 {
        self.datetime.timestamp_micros().div_euclid(1000)
    }
}

impl fmt::Display for FemtoLogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}: {}", self.channel, self.level, self.message)
    }
}
