use femtologging_newrelic::{
    BatchMode, FemtoHandlerTrait, FemtoLevel, FemtoLogRecord, HandlerBuildError, HandlerBuilderTrait,
    HandlerError, NewRelicFormatter, NewRelicHandler, NewRelicHandlerBuilder,
    test_utils::{CapturingTransport, PlainFormatter},
};
use std::any::Any;
use std::sync::Mutex;

const EU_KEY: &str = "eu01xx0000000000000000000000000000000000";

#[derive(Default)]
struct DummyHandler {
    handled: Mutex<Vec<String>>,
}

impl FemtoHandlerTrait for DummyHandler {
    fn handle(&self, record: &FemtoLogRecord) -> Result<(), HandlerError> {
        self.handled
            .lock()
            .expect("lock poisoned")
            .push(record.message.clone());
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn default_trait_methods() {
    let handler = DummyHandler::default();
    let trait_obj: &dyn FemtoHandlerTrait = &handler;
    assert!(trait_obj.flush());
    assert!(trait_obj.is_handling(FemtoLevel::Debug));

    let records = [
        FemtoLogRecord::new("a", FemtoLevel::Info, "one"),
        FemtoLogRecord::new("a", FemtoLevel::Info, "two"),
    ];
    trait_obj.handle_batch(&records).expect("batch");
    assert_eq!(*handler.handled.lock().expect("lock poisoned"), ["one", "two"]);
}

#[test]
fn boxed_handler_downcasts() {
    let handler = NewRelicHandlerBuilder::new()
        .with_license_key(EU_KEY)
        .with_transport(CapturingTransport::new())
        .build()
        .expect("build");

    let concrete = handler
        .as_any()
        .downcast_ref::<NewRelicHandler>()
        .expect("NewRelicHandler");
    assert_eq!(concrete.host(), "log-api.eu.newrelic.com");
    assert_eq!(
        concrete.formatter(),
        &NewRelicFormatter::new(BatchMode::Json, false)
    );
}

#[test]
fn build_errors_render_readably() {
    let err = HandlerBuildError::InvalidConfig("timeout_ms must be greater than zero".into());
    assert_eq!(
        err.to_string(),
        "invalid handler configuration: timeout_ms must be greater than zero"
    );

    let wrapped = HandlerError::from(err);
    assert_eq!(
        wrapped.to_string(),
        "invalid handler configuration: timeout_ms must be greater than zero"
    );
}

#[test]
fn builder_rejects_foreign_formatter() {
    let err = NewRelicHandlerBuilder::new()
        .with_license_key(EU_KEY)
        .with_formatter(PlainFormatter)
        .with_transport(CapturingTransport::new())
        .build()
        .err()
        .expect("PlainFormatter is incompatible");
    assert!(matches!(err, HandlerBuildError::IncompatibleFormatter { .. }));
}

#[test]
fn blank_host_override_keeps_previous_host() {
    let mut handler = NewRelicHandlerBuilder::new()
        .with_license_key(EU_KEY)
        .with_transport(CapturingTransport::new())
        .build_inner()
        .expect("build");

    assert!(matches!(
        handler.set_host("  "),
        Err(HandlerBuildError::InvalidConfig(_))
    ));
    assert_eq!(handler.host(), "log-api.eu.newrelic.com");
}
