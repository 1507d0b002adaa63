//! Extraction settings.

use crate::protocol::FeedFilter;

/// Number of payloads taken from a capture when no bound is given.
pub const DEFAULT_MAX_PAYLOADS: usize = 50;

/// Configuration for a [`PayloadExtractor`](crate::PayloadExtractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Maximum number of payloads to emit. Zero emits nothing.
    pub max_payloads: usize,
    /// Which transport segments count as feed traffic.
    pub filter: FeedFilter,
    /// Surface malformed frames as errors instead of skipping them.
    pub strict: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            max_payloads: DEFAULT_MAX_PAYLOADS,
            filter: FeedFilter::default(),
            strict: false,
        }
    }
}

impl ExtractConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_payloads(mut self, max_payloads: usize) -> Self {
        self.max_payloads = max_payloads;
        self
    }

    pub fn with_filter(mut self, filter: FeedFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Stop with [`Error::MalformedFrame`](crate::Error::MalformedFrame) on the
    /// first corrupt frame.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
