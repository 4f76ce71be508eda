//! Test helpers shared across unit and integration tests.
//!
//! Compiled for unit tests and, behind the `test-util` feature, for
//! integration tests that need a transport which never touches the network.

mod capturing_transport;
mod fake_context;
mod plain_formatter;

pub use capturing_transport::{CapturedPost, CapturingTransport};
pub use fake_context::FakeContextProvider;
pub use plain_formatter::PlainFormatter;
