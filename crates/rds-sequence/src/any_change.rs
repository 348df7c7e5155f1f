#![forbid(unsafe_code)]

//! Unified "something changed" signal.
//!
//! [`AnyChangeMerger`] merges a sequence's structural stream with its
//! element-change aggregation, both mapped to `()`. It is a merge, not a
//! combine-latest: every upstream signal produces exactly one unit signal,
//! in arrival order. A structural event is delivered before the aggregator
//! reacts to it.

use rds_stream::{Signal, Stream, Subscription};

use crate::aggregate::ElementChangeAggregator;
use crate::config::AggregatorConfig;
use crate::event::ChangeEvent;
use crate::sequence::ObservableSequence;
use crate::value::ObservableValue;

/// Builds merged unit streams over a sequence and its elements.
pub struct AnyChangeMerger<T> {
    changed: Stream<ChangeEvent<T>>,
    elements: ElementChangeAggregator<T>,
}

impl<T> Clone for AnyChangeMerger<T> {
    fn clone(&self) -> Self {
        Self {
            changed: self.changed.clone(),
            elements: self.elements.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AnyChangeMerger<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnyChangeMerger")
            .field("elements", &self.elements)
            .finish()
    }
}

impl<T: ObservableValue + Clone + 'static> AnyChangeMerger<T> {
    #[must_use]
    pub fn new(sequence: &ObservableSequence<T>) -> Self {
        Self::with_config(sequence, AggregatorConfig::default())
    }

    /// Merger whose element aggregation uses `config`.
    #[must_use]
    pub fn with_config(sequence: &ObservableSequence<T>, config: AggregatorConfig) -> Self {
        Self {
            changed: sequence.changed(),
            elements: ElementChangeAggregator::with_config(sequence, config),
        }
    }

    /// The merged stream. Completes once the sequence is dropped.
    #[must_use]
    pub fn stream(&self) -> Stream<()> {
        self.changed
            .to_unit()
            .merge(&self.elements.stream().to_unit())
    }

    /// Shorthand for `stream().subscribe(observer)`.
    pub fn subscribe(&self, observer: impl Fn(Signal<'_, ()>) + 'static) -> Subscription {
        self.stream().subscribe(observer)
    }
}

impl<T: ObservableValue + Clone + 'static> ObservableSequence<T> {
    /// One `()` per structural event plus one per element change.
    #[must_use]
    pub fn any_change(&self) -> Stream<()> {
        AnyChangeMerger::new(self).stream()
    }
}
