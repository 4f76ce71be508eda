//! Handler builders and associated traits.
//!
//! Provides a builder API for constructing handlers in a type-safe manner.
//! Each builder implements [`HandlerBuilderTrait`] which validates the
//! collected options before handing back a ready handler.

use std::io;

use thiserror::Error;

use crate::handler::FemtoHandlerTrait;

pub mod newrelic_builder;

pub use newrelic_builder::NewRelicHandlerBuilder;

/// Errors that may occur while configuring a handler.
#[derive(Debug, Error)]
pub enum HandlerBuildError {
    /// Invalid user supplied configuration.
    #[error("invalid handler configuration: {0}")]
    InvalidConfig(String),
    /// A value of the wrong shape was supplied to a configuration helper.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The handler was given a formatter it cannot work with.
    #[error("{handler} is only compatible with {required}, got {provided}")]
    IncompatibleFormatter {
        handler: &'static str,
        required: &'static str,
        provided: &'static str,
    },
    /// A runtime capability the handler depends on is missing.
    #[error("missing capability: {0}")]
    MissingCapability(String),
    /// Underlying I/O error whilst creating the handler.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reject empty or whitespace-only string options.
pub(crate) fn ensure_non_blank(field: &str, value: &str) -> Result<(), HandlerBuildError> {
    if value.trim().is_empty() {
        return Err(HandlerBuildError::InvalidConfig(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Trait implemented by all handler builders.
pub trait HandlerBuilderTrait {
    /// Concrete handler produced by this builder.
    type Handler: FemtoHandlerTrait + 'static;

    /// Validate the options and build the concrete handler.
    fn build_inner(self) -> Result<Self::Handler, HandlerBuildError>;

    /// Build the handler as a boxed trait object.
    fn build(self) -> Result<Box<dyn FemtoHandlerTrait>, HandlerBuildError>
    where
        Self: Sized,
    {
        Ok(Box::new(self.build_inner()?))
    }
}
