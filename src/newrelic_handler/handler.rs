//! Public handler type exported by the crate.

use std::any::{Any, type_name};
use std::borrow::Cow;

use crate::{
    formatter::{FemtoFormatter, NewRelicFormatter},
    handler::{FemtoHandlerTrait, HandlerError},
    handlers::{HandlerBuildError, ensure_non_blank},
    level::FemtoLevel,
    log_record::FemtoLogRecord,
    processor::FemtoProcessor,
};

use super::{
    config::{EndpointConfig, LICENSE_KEY_HEADER, LOG_ENDPOINT},
    transport::{DeliveryRequest, Transport},
    url_encoding::encode_query_value,
};

/// Handler delivering records to the New Relic Log API.
///
/// Every call to [`send`](Self::send) or [`send_batch`](Self::send_batch)
/// formats the payload and performs exactly one HTTPS POST on the caller's
/// thread. Failures are returned to the caller and never retried.
pub struct NewRelicHandler {
    config: EndpointConfig,
    host: String,
    formatter: NewRelicFormatter,
    processors: Vec<Box<dyn FemtoProcessor>>,
    level: FemtoLevel,
    transport: Box<dyn Transport>,
}

impl NewRelicHandler {
    /// Assemble a handler from validated parts.
    ///
    /// Fails when the transport is unusable or the formatter is not a
    /// [`NewRelicFormatter`].
    pub(crate) fn from_parts(
        config: EndpointConfig,
        formatter: &dyn FemtoFormatter,
        processors: Vec<Box<dyn FemtoProcessor>>,
        level: FemtoLevel,
        transport: Box<dyn Transport>,
    ) -> Result<Self, HandlerBuildError> {
        transport.check_available()?;
        let formatter = Self::require_formatter(formatter)?;
        let host = config.resolve_host();
        Ok(Self {
            config,
            host,
            formatter,
            processors,
            level,
            transport,
        })
    }

    fn require_formatter(
        formatter: &dyn FemtoFormatter,
    ) -> Result<NewRelicFormatter, HandlerBuildError> {
        formatter
            .as_any()
            .downcast_ref::<NewRelicFormatter>()
            .copied()
            .ok_or_else(|| HandlerBuildError::IncompatibleFormatter {
                handler: type_name::<Self>(),
                required: type_name::<NewRelicFormatter>(),
                provided: formatter.formatter_name(),
            })
    }

    /// Replace the formatter. Only [`NewRelicFormatter`] is accepted.
    pub fn set_formatter(
        &mut self,
        formatter: Box<dyn FemtoFormatter>,
    ) -> Result<(), HandlerBuildError> {
        self.formatter = Self::require_formatter(formatter.as_ref())?;
        Ok(())
    }

    pub fn formatter(&self) -> &NewRelicFormatter {
        &self.formatter
    }

    /// Override the host derived from the license key.
    ///
    /// A blank host is rejected and leaves the current host in place.
    pub fn set_host(&mut self, host: impl Into<String>) -> Result<(), HandlerBuildError> {
        let host = host.into();
        ensure_non_blank("host", &host)?;
        self.host.clone_from(&host);
        self.config.host = Some(host);
        Ok(())
    }

    /// Replace the license key, re-deriving the host unless one was set
    /// explicitly.
    pub fn set_license_key(&mut self, license_key: impl Into<String>) {
        self.config.license_key = license_key.into();
        self.host = self.config.resolve_host();
    }

    /// Minimum level accepted by [`handle`](FemtoHandlerTrait::handle).
    pub fn set_level(&mut self, level: FemtoLevel) {
        self.level = level;
    }

    pub fn push_processor(&mut self, processor: impl FemtoProcessor + 'static) {
        self.processors.push(Box::new(processor));
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn endpoint(&self) -> &'static str {
        LOG_ENDPOINT
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Full request URL, including the license key query parameter.
    pub fn url(&self) -> String {
        format!(
            "https://{}/{}?{}={}",
            self.host,
            LOG_ENDPOINT,
            LICENSE_KEY_HEADER,
            encode_query_value(&self.config.license_key)
        )
    }

    /// Format and deliver one record.
    pub fn send(&self, record: &FemtoLogRecord) -> Result<(), HandlerError> {
        let body = self.formatter.format(record);
        self.deliver(&body)
    }

    /// Format and deliver several records as a single request.
    pub fn send_batch(&self, records: &[FemtoLogRecord]) -> Result<(), HandlerError> {
        let body = self.formatter.format_batch(records);
        self.deliver(&body)
    }

    fn deliver(&self, body: &str) -> Result<(), HandlerError> {
        let url = self.url();
        let request = DeliveryRequest {
            url: &url,
            license_key: &self.config.license_key,
            body,
            timeout: self.config.timeout,
            proxy: self.config.proxy.as_deref(),
            ca_bundle: self.config.ca_bundle.as_deref(),
        };
        log::debug!(
            "NewRelicHandler: posting {} bytes to {}/{}",
            body.len(),
            self.host,
            LOG_ENDPOINT
        );
        self.transport.post(&request).map_err(|err| {
            log::warn!("NewRelicHandler: delivery to {} failed: {err}", self.host);
            HandlerError::from(err)
        })
    }

    fn process<'a>(&self, record: &'a FemtoLogRecord) -> Cow<'a, FemtoLogRecord> {
        let mut current = Cow::Borrowed(record);
        for processor in &self.processors {
            let next = match processor.process(&current) {
                Cow::Borrowed(_) => None,
                Cow::Owned(record) => Some(record),
            };
            if let Some(record) = next {
                current = Cow::Owned(record);
            }
        }
        current
    }
}

impl FemtoHandlerTrait for NewRelicHandler {
    fn is_handling(&self, level: FemtoLevel) -> bool {
        level >= self.level
    }

    fn handle(&self, record: &FemtoLogRecord) -> Result<(), HandlerError> {
        if !self.is_handling(record.level) {
            return Ok(());
        }
        let record = self.process(record);
        self.send(&record)
    }

    fn handle_batch(&self, records: &[FemtoLogRecord]) -> Result<(), HandlerError> {
        let processed: Vec<FemtoLogRecord> = records
            .iter()
            .filter(|record| self.is_handling(record.level))
            .map(|record| self.process(record).into_owned())
            .collect();
        if processed.is_empty() {
            return Ok(());
        }
        self.send_batch(&processed)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for NewRelicHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewRelicHandler")
            .field("config", &self.config)
            .field("host", &self.host)
            .field("formatter", &self.formatter)
            .field("processors", &self.processors.len())
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
