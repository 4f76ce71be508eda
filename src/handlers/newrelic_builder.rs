//! Builder for [`NewRelicHandler`](crate::newrelic_handler::NewRelicHandler).
//!
//! Collects the license key, endpoint overrides, timeout, proxy and CA bundle
//! along with the formatter, processors and transport. Everything is
//! validated in [`HandlerBuilderTrait::build_inner`] before any request can
//! be made.

use std::{fmt, path::PathBuf, time::Duration};

use crate::{
    formatter::{BatchMode, FemtoFormatter, NewRelicFormatter},
    level::FemtoLevel,
    newrelic_handler::{
        DEFAULT_TIMEOUT, EndpointConfig, NewRelicHandler, Transport, UreqTransport, default_host,
        license_key_from_env,
    },
    processor::FemtoProcessor,
};

use super::{HandlerBuildError, HandlerBuilderTrait, ensure_non_blank};

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(HandlerBuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`NewRelicHandler`] instances.
#[derive(Default)]
pub struct NewRelicHandlerBuilder {
    license_key: Option<String>,
    host: Option<String>,
    proxy: Option<String>,
    timeout_ms: Option<u64>,
    ca_bundle: Option<PathBuf>,
    level: Option<FemtoLevel>,
    formatter: Option<Box<dyn FemtoFormatter>>,
    processors: Vec<Box<dyn FemtoProcessor>>,
    transport: Option<Box<dyn Transport>>,
}

impl NewRelicHandlerBuilder {
    /// Create a new builder. Without an explicit key the license is read from
    /// `NEW_RELIC_LICENSE_KEY` at build time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the license key used for authentication and region routing.
    pub fn with_license_key(mut self, key: impl Into<String>) -> Self {
        self.license_key = Some(key.into());
        self
    }

    /// Send to `host` instead of the host derived from the license key.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Route requests through a proxy, e.g. `http://proxy.local:3128`.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Trust the root certificates in the PEM file at `path`.
    pub fn with_ca_bundle(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_bundle = Some(path.into());
        self
    }

    option_setter!(
        #[doc = "Set the request timeout in milliseconds."]
        with_timeout_ms,
        timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the minimum level the handler accepts."]
        with_level,
        level,
        FemtoLevel
    );

    /// Attach a formatter. Anything but [`NewRelicFormatter`] is rejected at
    /// build time.
    pub fn with_formatter(mut self, formatter: impl FemtoFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Append a processor run before formatting.
    pub fn with_processor(mut self, processor: impl FemtoProcessor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Replace the default [`UreqTransport`].
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    fn validate(&self) -> Result<(), HandlerBuildError> {
        self.validate_strings()?;
        if let Some(timeout) = self.timeout_ms {
            ensure_positive!(timeout, "timeout_ms")?;
        }
        if let Some(path) = &self.ca_bundle
            && !path.is_file()
        {
            return Err(HandlerBuildError::InvalidConfig(format!(
                "CA bundle {} does not exist",
                path.display()
            )));
        }
        Ok(())
    }

    fn validate_strings(&self) -> Result<(), HandlerBuildError> {
        for (field, value) in [("host", &self.host), ("proxy", &self.proxy)] {
            if let Some(value) = value {
                ensure_non_blank(field, value)?;
            }
        }
        Ok(())
    }

    fn build_config(&mut self) -> Result<EndpointConfig, HandlerBuildError> {
        self.validate()?;

        let license_key = self.license_key.take().or_else(license_key_from_env);
        if self.host.is_none() {
            // Surfaces the missing-key error before anything else is built.
            default_host(license_key.as_deref())?;
        }
        let license_key = license_key.ok_or_else(|| {
            HandlerBuildError::InvalidConfig("New Relic handler requires a license key".into())
        })?;
        if license_key.is_empty() {
            log::warn!("NewRelicHandler configured with an empty license key");
        }

        Ok(EndpointConfig {
            host: self.host.take(),
            license_key,
            proxy: self.proxy.take(),
            timeout: self
                .timeout_ms
                .map_or(DEFAULT_TIMEOUT, Duration::from_millis),
            ca_bundle: self.ca_bundle.take(),
        })
    }
}

impl HandlerBuilderTrait for NewRelicHandlerBuilder {
    type Handler = NewRelicHandler;

    fn build_inner(mut self) -> Result<NewRelicHandler, HandlerBuildError> {
        let config = self.build_config()?;
        let formatter = self
            .formatter
            .unwrap_or_else(|| Box::new(NewRelicFormatter::new(BatchMode::Json, false)));
        let transport = self
            .transport
            .unwrap_or_else(|| Box::new(UreqTransport));
        NewRelicHandler::from_parts(
            config,
            formatter.as_ref(),
            self.processors,
            self.level.unwrap_or(FemtoLevel::Debug),
            transport,
        )
    }
}

impl fmt::Debug for NewRelicHandlerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRelicHandlerBuilder")
            .field("license_key", &self.license_key.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("proxy", &self.proxy)
            .field("timeout_ms", &self.timeout_ms)
            .field("ca_bundle", &self.ca_bundle)
            .field("level", &self.level)
            .field("processors", &self.processors.len())
            .finish_non_exhaustive()
    }
}
