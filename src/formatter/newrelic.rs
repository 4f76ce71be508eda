//! JSON formatter producing New Relic Log API payloads.

use std::any::Any;

use super::FemtoFormatter;
use super::record::NormalizedRecord;
use crate::log_record::FemtoLogRecord;

/// How [`NewRelicFormatter::format_batch`] joins records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// One JSON object per line.
    #[default]
    Newlines,
    /// A single JSON array of objects.
    Json,
}

/// Formats records as single-line JSON objects.
///
/// Keys are emitted as `message`, `context`, `level`, `level_name`,
/// `channel`, `extra`, `datetime`, then any linking fields found in
/// `extra["newrelic-context"]` (flattened to the top level and removed from
/// `extra`), and finally `timestamp` in epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewRelicFormatter {
    batch_mode: BatchMode,
    append_newline: bool,
}

impl Default for NewRelicFormatter {
    fn default() -> Self {
        Self::new(BatchMode::Newlines, true)
    }
}

impl NewRelicFormatter {
    pub fn new(batch_mode: BatchMode, append_newline: bool) -> Self {
        Self {
            batch_mode,
            append_newline,
        }
    }

    pub fn batch_mode(&self) -> BatchMode {
        self.batch_mode
    }

    pub fn is_appending_newlines(&self) -> bool {
        self.append_newline
    }

    fn to_json_line(record: &FemtoLogRecord) -> String {
        // Keys are strings and values are already JSON, so writing into
        // memory cannot fail.
        serde_json::to_string(&NormalizedRecord::from(record))
            .expect("record serialization is infallible")
    }

    fn format_batch_json(records: &[FemtoLogRecord]) -> String {
        let lines: Vec<String> = records.iter().map(Self::to_json_line).collect();
        format!("[{}]", lines.join(","))
    }

    fn format_batch_newlines(&self, records: &[FemtoLogRecord]) -> String {
        let lines: Vec<String> = records.iter().map(Self::to_json_line).collect();
        let mut output = lines.join("\n");
        if self.append_newline {
            output.push('\n');
        }
        output
    }
}

impl FemtoFormatter for NewRelicFormatter {
    fn format(&self, record: &FemtoLogRecord) -> String {
        let mut line = Self::to_json_line(record);
        if self.append_newline {
            line.push('\n');
        }
        line
    }

    fn format_batch(&self, records: &[FemtoLogRecord]) -> String {
        match self.batch_mode {
            BatchMode::Json => Self::format_batch_json(records),
            BatchMode::Newlines => self.format_batch_newlines(records),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
