//! A formatter the New Relic handler must refuse.

use std::any::Any;

use crate::formatter::FemtoFormatter;
use crate::log_record::FemtoLogRecord;

/// Renders `channel.LEVEL: message` followed by a newline.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFormatter;

impl FemtoFormatter for PlainFormatter {
    fn format(&self, record: &FemtoLogRecord) -> String {
        format!("{record}\n")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
