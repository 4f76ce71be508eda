//! Fixtures providing `(CapturingTransport, NewRelicHandler)` pairs for
//! integration tests. The transport keeps requests in memory so handlers can
//! be exercised without touching the network.

use chrono::DateTime;
use femtologging_newrelic::{
    FemtoLevel, FemtoLogRecord, HandlerBuilderTrait, NewRelicHandler, NewRelicHandlerBuilder,
    test_utils::CapturingTransport,
};
use rstest::fixture;

pub const EU_KEY: &str = "eu01xx0000000000000000000000000000000000";

/// Return a handler for the EU region writing into a fresh transport.
#[fixture]
pub fn handler_tuple() -> (CapturingTransport, NewRelicHandler) {
    let transport = CapturingTransport::new();
    let handler = NewRelicHandlerBuilder::new()
        .with_license_key(EU_KEY)
        .with_transport(transport.clone())
        .build_inner()
        .expect("handler should build");
    (transport, handler)
}

/// A WARNING record on channel `test` at a fixed instant.
#[fixture]
pub fn fixed_record() -> FemtoLogRecord {
    let datetime =
        DateTime::parse_from_rfc3339("2021-01-01T00:00:00.123456+00:00").expect("valid datetime");
    FemtoLogRecord::at(datetime, "test", FemtoLevel::Warning, "test")
}
