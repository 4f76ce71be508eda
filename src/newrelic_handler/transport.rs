//! Transport primitives for the New Relic handler.
//!
//! [`UreqTransport`] performs a single blocking POST per call using a fresh
//! `ureq::Agent` backed by `native-tls`. Alternative transports implement
//! [`Transport`] and are injected through the handler builder.

use std::{fs, path::Path, sync::Arc, time::Duration};

use native_tls::{Certificate, TlsConnector};
use thiserror::Error;
use ureq::{Agent, AgentBuilder, Proxy};

use crate::handlers::HandlerBuildError;

use super::config::LICENSE_KEY_HEADER;

/// Errors raised while delivering a payload.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection, DNS, proxy or timeout failure.
    #[error("HTTP transport error: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("log API responded with status {0}")]
    Status(u16),
    /// The TLS connector could not be configured.
    #[error("TLS configuration failed: {0}")]
    Tls(String),
    /// Reading local resources (such as the CA bundle) failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A fully prepared POST request.
#[derive(Clone, Copy)]
pub struct DeliveryRequest<'a> {
    pub url: &'a str,
    pub license_key: &'a str,
    pub body: &'a str,
    pub timeout: Duration,
    pub proxy: Option<&'a str>,
    pub ca_bundle: Option<&'a Path>,
}

impl std::fmt::Debug for DeliveryRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeliveryRequest")
            .field("body_len", &self.body.len())
            .field("timeout", &self.timeout)
            .field("proxy", &self.proxy)
            .field("ca_bundle", &self.ca_bundle)
            .finish_non_exhaustive()
    }
}

/// Capability used by the handler to put payloads on the wire.
pub trait Transport: Send + Sync {
    /// Verify the runtime can perform requests at all.
    ///
    /// Called once while the handler is built.
    fn check_available(&self) -> Result<(), HandlerBuildError>;

    /// Perform one POST. No retries.
    fn post(&self, request: &DeliveryRequest<'_>) -> Result<(), DeliveryError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn check_available(&self) -> Result<(), HandlerBuildError> {
        (**self).check_available()
    }

    fn post(&self, request: &DeliveryRequest<'_>) -> Result<(), DeliveryError> {
        (**self).post(request)
    }
}

/// Blocking HTTPS transport built on `ureq` and `native-tls`.
#[derive(Clone, Copy, Debug, Default)]
pub struct UreqTransport;

impl UreqTransport {
    fn tls_connector(ca_bundle: Option<&Path>) -> Result<TlsConnector, DeliveryError> {
        let mut builder = TlsConnector::builder();
        if let Some(path) = ca_bundle {
            let pem = fs::read(path)?;
            let cert = Certificate::from_pem(&pem).map_err(|e| DeliveryError::Tls(e.to_string()))?;
            builder.add_root_certificate(cert);
        }
        builder
            .build()
            .map_err(|e| DeliveryError::Tls(e.to_string()))
    }

    fn agent(request: &DeliveryRequest<'_>) -> Result<Agent, DeliveryError> {
        let connector = Self::tls_connector(request.ca_bundle)?;
        let mut builder = AgentBuilder::new()
            .timeout(request.timeout)
            .tls_connector(Arc::new(connector));
        if let Some(proxy) = request.proxy {
            let proxy = Proxy::new(proxy).map_err(|e| DeliveryError::Transport(e.to_string()))?;
            builder = builder.proxy(proxy);
        }
        Ok(builder.build())
    }
}

impl Transport for UreqTransport {
    fn check_available(&self) -> Result<(), HandlerBuildError> {
        TlsConnector::new().map(drop).map_err(|err| {
            HandlerBuildError::MissingCapability(format!(
                "native TLS support is required to use NewRelicHandler: {err}"
            ))
        })
    }

    fn post(&self, request: &DeliveryRequest<'_>) -> Result<(), DeliveryError> {
        let agent = Self::agent(request)?;
        let result = agent
            .post(request.url)
            .set("Content-Type", "application/json")
            .set(LICENSE_KEY_HEADER, request.license_key)
            .send_string(request.body);

        match result {
            Ok(response) if (200..300).contains(&response.status()) => Ok(()),
            Ok(response) => Err(DeliveryError::Status(response.status())),
            Err(ureq::Error::Status(code, _)) => Err(DeliveryError::Status(code)),
            Err(ureq::Error::Transport(err)) => Err(DeliveryError::Transport(err.to_string())),
        }
    }
}
