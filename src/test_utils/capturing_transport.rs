//! A transport that records requests instead of sending them.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::handlers::HandlerBuildError;
use crate::newrelic_handler::{DeliveryError, DeliveryRequest, Transport};

/// Owned copy of a [`DeliveryRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedPost {
    pub url: String,
    pub license_key: String,
    pub body: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

/// Transport storing every request it receives for later inspection.
///
/// Clones share the same storage, so a test can keep one clone while the
/// handler owns another.
#[derive(Clone, Debug)]
pub struct CapturingTransport {
    posts: Arc<Mutex<Vec<CapturedPost>>>,
    available: bool,
    fail_status: Option<u16>,
}

impl Default for CapturingTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CapturingTransport {
    /// Create a transport that accepts every request.
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(Vec::new())),
            available: true,
            fail_status: None,
        }
    }

    /// Create a transport whose capability check fails.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Create a transport that records requests and answers with `status`.
    pub fn failing_with_status(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new()
        }
    }

    /// Return a snapshot of all requests received so far.
    pub fn posts(&self) -> Vec<CapturedPost> {
        self.posts.lock().clone()
    }

    /// Bodies of all requests received so far.
    pub fn bodies(&self) -> Vec<String> {
        self.posts.lock().iter().map(|p| p.body.clone()).collect()
    }
}

impl Transport for CapturingTransport {
    fn check_available(&self) -> Result<(), HandlerBuildError> {
        if self.available {
            Ok(())
        } else {
            Err(HandlerBuildError::MissingCapability(
                "transport disabled for this test".into(),
            ))
        }
    }

    fn post(&self, request: &DeliveryRequest<'_>) -> Result<(), DeliveryError> {
        self.posts.lock().push(CapturedPost {
            url: request.url.to_owned(),
            license_key: request.license_key.to_owned(),
            body: request.body.to_owned(),
            timeout: request.timeout,
            proxy: request.proxy.map(str::to_owned),
        });
        match self.fail_status {
            Some(status) => Err(DeliveryError::Status(status)),
            None => Ok(()),
        }
    }
}
