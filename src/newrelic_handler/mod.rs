//! Handler shipping formatted records to the New Relic Log API.
//!
//! This module defines [`NewRelicHandler`], which formats
//! [`FemtoLogRecord`](crate::log_record::FemtoLogRecord) values with the
//! [`NewRelicFormatter`](crate::formatter::NewRelicFormatter) and POSTs them
//! to `https://<host>/log/v1`.
//!
//! # Host routing
//!
//! Unless a host is configured explicitly, it is derived from the license
//! key: keys beginning with a region code (`eu01x…`) are routed to
//! `log-api.<region>.newrelic.com`, all others to `log-api.newrelic.com`.
//!
//! # Delivery semantics
//!
//! - One request per `send`/`send_batch` call, on the caller's thread.
//! - A batch is a single request; it succeeds or fails as a whole.
//! - **2xx**: success.
//! - **Anything else or a network error**: returned as
//!   [`DeliveryError`] without retrying.

mod config;
mod handler;
mod transport;
mod url_encoding;


pub use config::{
    DEFAULT_HOST, DEFAULT_TIMEOUT, EndpointConfig, LICENSE_KEY_ENV, LICENSE_KEY_HEADER,
    LICENSE_KEY_INI, LOG_ENDPOINT, default_host, license_key_from_env, license_key_from_ini,
};
pub use handler::NewRelicHandler;
pub use transport::{DeliveryError, DeliveryRequest, Transport, UreqTransport};
