//! Record processors.
//!
//! A processor inspects a record before it is formatted and either passes it
//! through untouched (`Cow::Borrowed`) or returns a modified copy
//! (`Cow::Owned`). Records are never changed in place.

use std::borrow::Cow;

use crate::context::{ContextProvider, NEWRELIC_CONTEXT_KEY};
use crate::log_record::FemtoLogRecord;

/// Trait implemented by record processors attached to a handler.
pub trait FemtoProcessor: Send + Sync {
    /// Process `record`, borrowing it when no change is needed.
    fn process<'a>(&self, record: &'a FemtoLogRecord) -> Cow<'a, FemtoLogRecord>;
}

impl<P: FemtoProcessor + ?Sized> FemtoProcessor for Box<P> {
    fn process<'a>(&self, record: &'a FemtoLogRecord) -> Cow<'a, FemtoLogRecord> {
        (**self).process(record)
    }
}

/// Adds linking metadata to `extra["newrelic-context"]`.
#[derive(Clone, Debug, Default)]
pub struct NewRelicProcessor<P> {
    provider: P,
}

impl<P: ContextProvider> NewRelicProcessor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: ContextProvider> FemtoProcessor for NewRelicProcessor<P> {
    fn process<'a>(&self, record: &'a FemtoLogRecord) -> Cow<'a, FemtoLogRecord> {
        if !self.provider.context_available() {
            log::debug!("NewRelicProcessor: no linking context available");
            return Cow::Borrowed(record);
        }

        let metadata = self.provider.linking_metadata();
        let mut enriched = record.clone();
        // Remove first so a stale entry is replaced at the end of the map.
        enriched.extra.shift_remove(NEWRELIC_CONTEXT_KEY);
        enriched
            .extra
            .insert(NEWRELIC_CONTEXT_KEY.to_owned(), metadata.to_json());
        Cow::Owned(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{LinkingMetadata, NoContextProvider, StaticContextProvider};
    use crate::level::FemtoLevel;
    use crate::test_utils::FakeContextProvider;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn record() -> FemtoLogRecord {
        FemtoLogRecord::new("test", FemtoLevel::Warning, "test")
    }

    fn metadata() -> LinkingMetadata {
        LinkingMetadata::new()
            .with("hostname", "example.host")
            .with("entity.name", "Processor Tests")
            .with("entity.type", "SERVICE")
    }

    #[rstest]
    fn inserts_metadata_when_context_available(record: FemtoLogRecord) {
        let processor = NewRelicProcessor::new(StaticContextProvider::new(metadata()));
        let enriched = processor.process(&record);

        assert!(matches!(enriched, Cow::Owned(_)));
        assert_eq!(enriched.extra[NEWRELIC_CONTEXT_KEY], metadata().to_json());
        assert!(record.extra.is_empty(), "input must not be mutated");
    }

    #[rstest]
    fn passes_record_through_without_context(record: FemtoLogRecord) {
        let processor = NewRelicProcessor::new(NoContextProvider);
        let result = processor.process(&record);

        match result {
            Cow::Borrowed(same) => assert!(std::ptr::eq(same, &record)),
            Cow::Owned(_) => panic!("expected passthrough"),
        }
    }

    #[rstest]
    fn does_not_query_metadata_when_unavailable(record: FemtoLogRecord) {
        let provider = FakeContextProvider::unavailable();
        let processor = NewRelicProcessor::new(provider.clone());
        let _ = processor.process(&record);
        assert_eq!(provider.metadata_calls(), 0);
    }

    #[rstest]
    fn queries_metadata_once_per_record(record: FemtoLogRecord) {
        let provider = FakeContextProvider::available(metadata());
        let processor = NewRelicProcessor::new(provider.clone());
        let first = processor.process(&record);
        let second = processor.process(&record);
        assert_eq!(provider.metadata_calls(), 2);
        assert_eq!(first, second);
    }

    #[rstest]
    fn keeps_existing_extras_and_overwrites_stale_context(record: FemtoLogRecord) {
        let mut extra = crate::log_record::RecordMap::new();
        extra.insert(NEWRELIC_CONTEXT_KEY.into(), json!({"hostname": "stale"}));
        extra.insert("request_id".into(), json!("r-1"));
        let record = record.with_extra(extra);

        let processor = NewRelicProcessor::new(StaticContextProvider::new(metadata()));
        let enriched = processor.process(&record);

        let keys: Vec<&str> = enriched.extra.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["request_id", NEWRELIC_CONTEXT_KEY]);
        assert_eq!(enriched.extra["request_id"], "r-1");
        assert_eq!(
            enriched.extra[NEWRELIC_CONTEXT_KEY]["hostname"],
            "example.host"
        );
    }
}
