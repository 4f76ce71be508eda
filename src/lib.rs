//! Log-context enrichment and delivery to the New Relic Log API.
//!
//! The crate is made of three cooperating pieces:
//!
//! - [`NewRelicProcessor`] attaches APM linking metadata (trace and span
//!   identifiers, entity and host names) to a record's `extra` map.
//! - [`NewRelicFormatter`] renders records as the JSON objects the Log API
//!   ingests, either one per line or as a JSON array.
//! - [`NewRelicHandler`] POSTs formatted payloads to the region-specific
//!   endpoint derived from the license key.
//!
//! ```no_run
//! use femtologging_newrelic::{
//!     FemtoHandlerTrait, FemtoLevel, FemtoLogRecord, HandlerBuilderTrait,
//!     NewRelicHandlerBuilder, NewRelicProcessor, NoContextProvider,
//! };
//!
//! let handler = NewRelicHandlerBuilder::new()
//!     .with_license_key("eu01xx0000000000000000000000000000000000")
//!     .with_processor(NewRelicProcessor::new(NoContextProvider))
//!     .build_inner()?;
//! handler.handle(&FemtoLogRecord::new("app", FemtoLevel::Warning, "disk low"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod context;
pub mod formatter;
pub mod handler;
pub mod handlers;
mod level;
mod log_record;
pub mod newrelic_handler;
pub mod processor;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use context::{
    ContextProvider, LINKING_KEYS, LinkingMetadata, NEWRELIC_CONTEXT_KEY, NoContextProvider,
    StaticContextProvider,
};
pub use formatter::{BatchMode, FemtoFormatter, NewRelicFormatter};
pub use handler::{FemtoHandlerTrait, HandlerError};
pub use handlers::{HandlerBuildError, HandlerBuilderTrait, NewRelicHandlerBuilder};
pub use level::{FemtoLevel, ParseLevelError};
pub use log_record::{FemtoLogRecord, RecordMap};
pub use newrelic_handler::{
    DeliveryError, DeliveryRequest, EndpointConfig, NewRelicHandler, Transport, UreqTransport,
    default_host, license_key_from_env, license_key_from_ini,
};
pub use processor::{FemtoProcessor, NewRelicProcessor};
