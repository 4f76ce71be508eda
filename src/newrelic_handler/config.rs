//! Endpoint configuration consumed by the New Relic handler.
//!
//! [`NewRelicHandlerBuilder`](crate::handlers::NewRelicHandlerBuilder)
//! constructs these values before passing them to
//! [`NewRelicHandler`](super::NewRelicHandler) for runtime use.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::handlers::HandlerBuildError;

/// Log API host used when the license key carries no region.
pub const DEFAULT_HOST: &str = "log-api.newrelic.com";
/// Ingestion path appended to the host.
pub const LOG_ENDPOINT: &str = "log/v1";
/// Header (and query parameter) carrying the license key.
pub const LICENSE_KEY_HEADER: &str = "X-License-Key";
/// Environment variable consulted when no license key is configured.
pub const LICENSE_KEY_ENV: &str = "NEW_RELIC_LICENSE_KEY";
/// INI key holding the license in agent configuration files.
pub const LICENSE_KEY_INI: &str = "newrelic.license";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Region-scoped keys start with the region letters, two digits, then `x`.
static REGION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]{2,3})[0-9]{2}x").expect("failed creating regex"));

/// Where and how log payloads are delivered.
#[derive(Clone)]
pub struct EndpointConfig {
    /// Explicit host override. When `None` the host is derived from the key.
    pub host: Option<String>,
    /// License key sent with every request.
    pub license_key: String,
    /// Optional proxy URL, e.g. `http://proxy.local:3128`.
    pub proxy: Option<String>,
    /// Overall request timeout.
    pub timeout: Duration,
    /// PEM bundle of additional trusted root certificates.
    pub ca_bundle: Option<PathBuf>,
}

impl EndpointConfig {
    pub fn new(license_key: impl Into<String>) -> Self {
        Self {
            host: None,
            license_key: license_key.into(),
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
            ca_bundle: None,
        }
    }

    /// Host requests are sent to: the override, or the region host for the
    /// license key.
    pub fn resolve_host(&self) -> String {
        match &self.host {
            Some(host) => host.clone(),
            None => region_host(&self.license_key),
        }
    }
}

impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("host", &self.host)
            .field("license_key", &"<redacted>")
            .field("proxy", &self.proxy)
            .field("timeout", &self.timeout)
            .field("ca_bundle", &self.ca_bundle)
            .finish()
    }
}

/// Derive the Log API host from a license key.
///
/// Keys such as `eu01xx…` route to `log-api.eu.newrelic.com`; keys without a
/// well-formed region prefix, including the empty string, use
/// [`DEFAULT_HOST`].
///
/// # Errors
///
/// Returns [`HandlerBuildError::InvalidArgument`] when no key is supplied.
pub fn default_host(license_key: Option<&str>) -> Result<String, HandlerBuildError> {
    let key = license_key.ok_or_else(|| {
        HandlerBuildError::InvalidArgument("license key must be a string".into())
    })?;
    Ok(region_host(key))
}

fn region_host(license_key: &str) -> String {
    match REGION_PATTERN.captures(license_key) {
        Some(caps) => format!("log-api.{}.newrelic.com", &caps[1]),
        None => DEFAULT_HOST.to_owned(),
    }
}

/// Read the license key from [`LICENSE_KEY_ENV`], ignoring blank values.
pub fn license_key_from_env() -> Option<String> {
    std::env::var(LICENSE_KEY_ENV)
        .ok()
        .map(|key| key.trim().to_owned())
        .filter(|key| !key.is_empty())
}

/// Read `newrelic.license` from an agent INI file.
///
/// Every section is searched; the first non-empty value wins. Returns
/// `Ok(None)` when the file has no license entry.
///
/// # Errors
///
/// Returns [`HandlerBuildError::Io`] if the file cannot be read and
/// [`HandlerBuildError::InvalidConfig`] if it is not valid INI.
pub fn license_key_from_ini(path: impl AsRef<Path>) -> Result<Option<String>, HandlerBuildError> {
    let path = path.as_ref();
    let ini = Ini::load_from_file(path).map_err(|err| match err {
        ini::Error::Io(io) => HandlerBuildError::Io(io),
        ini::Error::Parse(parse) => {
            HandlerBuildError::InvalidConfig(format!("{} is invalid: {parse}", path.display()))
        }
    })?;
    Ok(ini
        .iter()
        .filter_map(|(_, props)| props.get(LICENSE_KEY_INI))
        .map(|value| value.trim().trim_matches('"').to_owned())
        .find(|value| !value.is_empty()))
}
