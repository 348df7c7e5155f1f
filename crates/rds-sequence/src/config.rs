#![forbid(unsafe_code)]

//! Configuration for sequences and element-change aggregation.

/// Configuration for an [`ObservableSequence`](crate::ObservableSequence).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SequenceConfig {
    /// Emit events for mutations that change nothing (clearing an empty
    /// sequence, appending an empty batch, replacing an empty range with
    /// nothing). Off by default: a mutation with no effect emits nothing.
    pub emit_noop_events: bool,
}

impl SequenceConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether no-effect mutations still emit (empty-range) events.
    #[must_use]
    pub fn with_noop_events(mut self, emit: bool) -> Self {
        self.emit_noop_events = emit;
        self
    }
}

/// What an element-change aggregator does when one element's
/// `property_changed` stream fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Tear down every subscription and fail the aggregated output. The
    /// error's `inner_index` is the failing element's current position.
    #[default]
    Terminate,
    /// Drop only the failing element's subscription and keep going.
    Isolate,
}

/// Configuration for an
/// [`ElementChangeAggregator`](crate::ElementChangeAggregator).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Reaction to a failing element stream.
    pub failure_policy: FailurePolicy,
}

impl AggregatorConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
