//! Handler trait shared by every log sink in the crate.

use std::any::Any;

use thiserror::Error;

use crate::handlers::HandlerBuildError;
use crate::level::FemtoLevel;
use crate::log_record::FemtoLogRecord;
use crate::newrelic_handler::DeliveryError;

/// Errors returned when a handler fails to process a record.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The payload could not be delivered.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    /// The handler's configuration cannot produce a request.
    #[error(transparent)]
    Config(#[from] HandlerBuildError),
}

/// Trait implemented by all log handlers.
///
/// Handlers run on the caller's thread: `handle` returns once the record has
/// been written (or has failed) and the caller decides what to do with the
/// error.
pub trait FemtoHandlerTrait: Send {
    /// Whether records at `level` are accepted by this handler.
    fn is_handling(&self, level: FemtoLevel) -> bool {
        let _ = level;
        true
    }

    /// Dispatch a log record for handling.
    fn handle(&self, record: &FemtoLogRecord) -> Result<(), HandlerError>;

    /// Dispatch several records. The default handles them one at a time.
    fn handle_batch(&self, records: &[FemtoLogRecord]) -> Result<(), HandlerError> {
        records.iter().try_for_each(|record| self.handle(record))
    }

    /// Flush buffered output. Handlers without a buffer return `true`.
    fn flush(&self) -> bool {
        true
    }

    /// Concrete type access for downcasting boxed handlers.
    fn as_any(&self) -> &dyn Any;
}
