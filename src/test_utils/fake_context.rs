//! Context provider with a switchable capability probe.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::context::{ContextProvider, LinkingMetadata};

/// Provider whose availability is fixed at construction and which counts
/// metadata lookups.
#[derive(Clone, Debug, Default)]
pub struct FakeContextProvider {
    available: bool,
    metadata: LinkingMetadata,
    metadata_calls: Arc<AtomicUsize>,
}

impl FakeContextProvider {
    /// A provider reporting `metadata` as available.
    pub fn available(metadata: LinkingMetadata) -> Self {
        Self {
            available: true,
            metadata,
            metadata_calls: Arc::default(),
        }
    }

    /// A provider reporting no compatible context.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Number of times `linking_metadata` has been called.
    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }
}

impl ContextProvider for FakeContextProvider {
    fn context_available(&self) -> bool {
        self.available
    }

    fn linking_metadata(&self) -> LinkingMetadata {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        self.metadata.clone()
    }
}
