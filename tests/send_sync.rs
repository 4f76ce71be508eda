//! Send/Sync guarantees for core types.

use femtologging_newrelic::{
    BatchMode, FemtoLogRecord, LinkingMetadata, NewRelicFormatter,
    NewRelicHandler, NewRelicHandlerBuilder, NewRelicProcessor, NoContextProvider,
    StaticContextProvider, UreqTransport,
    test_utils::{CapturingTransport, PlainFormatter},
};
use rstest::rstest;
use static_assertions::assert_impl_all;

#[rstest]
fn builders_are_send() {
    assert_impl_all!(NewRelicHandlerBuilder: Send);
}

#[rstest]
fn components_are_send_sync() {
    assert_impl_all!(NewRelicHandler: Send, Sync);
    assert_impl_all!(NewRelicFormatter: Send, Sync, Copy);
    assert_impl_all!(PlainFormatter: Send, Sync);
    assert_impl_all!(CapturingTransport: Send, Sync);
    assert_impl_all!(BatchMode: Send, Sync, Copy);
    assert_impl_all!(NewRelicProcessor<StaticContextProvider>: Send, Sync);
    assert_impl_all!(NewRelicProcessor<NoContextProvider>: Send, Sync);
    assert_impl_all!(UreqTransport: Send, Sync);
}

#[rstest]
fn records_are_send_sync() {
    assert_impl_all!(FemtoLogRecord: Send, Sync, Clone);
    assert_impl_all!(LinkingMetadata: Send, Sync);
}
