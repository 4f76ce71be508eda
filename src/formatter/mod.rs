//! Formatter implementations.
//!
//! Provides the core [`FemtoFormatter`] trait and the JSON
//! [`NewRelicFormatter`] required by the New Relic handler.

use std::any::Any;

use crate::log_record::FemtoLogRecord;

mod newrelic;
mod record;

pub use newrelic::{BatchMode, NewRelicFormatter};

/// Trait for formatting log records into strings.
///
/// Implementors must be thread-safe (`Send + Sync`) so formatters can be
/// moved between threads together with their handler.
pub trait FemtoFormatter: Send + Sync {
    /// Format a log record into a string representation.
    fn format(&self, record: &FemtoLogRecord) -> String;

    /// Format several records into one payload.
    ///
    /// The default concatenates the individual [`format`](Self::format)
    /// outputs.
    fn format_batch(&self, records: &[FemtoLogRecord]) -> String {
        records.iter().map(|record| self.format(record)).collect()
    }

    /// Concrete type access used by handlers that require a specific
    /// formatter.
    fn as_any(&self) -> &dyn Any;

    /// Type name reported in configuration errors.
    fn formatter_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl FemtoFormatter for Box<dyn FemtoFormatter> {
    fn format(&self, record: &FemtoLogRecord) -> String {
        (**self).format(record)
    }

    fn format_batch(&self, records: &[FemtoLogRecord]) -> String {
        (**self).format_batch(records)
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn formatter_name(&self) -> &'static str {
        (**self).formatter_name()
    }
}

#[cfg(test)]
mod tests {
    //! Tests for the formatter trait.

    use super::*;
    use crate::level::FemtoLevel;
    use crate::test_utils::PlainFormatter;
    use static_assertions::assert_impl_all;

    #[test]
    fn formatters_are_send_sync() {
        assert_impl_all!(NewRelicFormatter: Send, Sync);
        assert_impl_all!(Box<dyn FemtoFormatter>: Send, Sync);
    }

    #[test]
    fn default_batch_concatenates_records() {
        let records = vec![
            FemtoLogRecord::new("a", FemtoLevel::Info, "one"),
            FemtoLogRecord::new("b", FemtoLevel::Error, "two"),
        ];
        let batch = PlainFormatter.format_batch(&records);
        assert_eq!(batch, "a.INFO: one\nb.ERROR: two\n");
    }

    #[test]
    fn boxed_formatter_forwards_batches() {
        let boxed: Box<dyn FemtoFormatter> = Box::new(PlainFormatter);
        let records = [FemtoLogRecord::new("a", FemtoLevel::Notice, "hi")];
        assert_eq!(boxed.format_batch(&records), "a.NOTICE: hi\n");
        assert!(boxed.formatter_name().ends_with("PlainFormatter"));
    }

    #[test]
    fn boxed_formatter_exposes_concrete_type() {
        let boxed: Box<dyn FemtoFormatter> = Box::new(NewRelicFormatter::default());
        assert!(boxed.as_any().is::<NewRelicFormatter>());
        assert!(!boxed.as_any().is::<PlainFormatter>());
        assert!(boxed.formatter_name().ends_with("NewRelicFormatter"));
    }
}
