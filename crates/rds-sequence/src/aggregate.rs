#![forbid(unsafe_code)]

//! Aggregation of per-element change notifications.
//!
//! # Design
//!
//! An [`ElementChangeAggregator`] is a recipe; every subscription to its
//! [`stream`](ElementChangeAggregator::stream) builds a fresh
//! `AggregatorState` holding one tracking slot per element *position*:
//!
//! ```text
//! sequence:  [ a ,  b ,  a ]        (two equal `a` values)
//! tracked:   [#0 , #1 , #2 ]        (one slot and subscription each)
//!
//! Removed { 2..3 }  -> drain slot #2, cancel its subscription only
//! Added   { 1..2 }  -> splice a new slot #3 in at position 1
//! ```
//!
//! The table is kept in lockstep with the sequence by folding the same
//! `ChangeEvent`s the sequence publishes, so occurrences are identified by
//! position rather than by value equality.
//!
//! Structural events that arrive while the table is being updated (an
//! element stream emitting synchronously on subscribe, and a downstream
//! handler mutating the sequence in response) are queued and folded after
//! the current update, in arrival order. The structural subscription exists
//! before the initial elements are subscribed, so no event is missed during
//! attach.
//!
//! # Invariants
//!
//! 1. `tracked.len()` equals the sequence length after every delivered
//!    structural event.
//! 2. A removed element's subscription is dropped before the `Removed` event
//!    delivery to the aggregator returns; later notifications from that
//!    element are never forwarded.
//! 3. Dropping the returned [`Subscription`] drops every element
//!    subscription and the structural subscription.
//! 4. Completion of the sequence's `changed` stream completes the output.
//!
//! # Failure Modes
//!
//! | Failure | Policy | Behavior |
//! |---------|--------|----------|
//! | Element stream fails (also while being subscribed) | `Terminate` | Output fails with `inner_index` = element position; all subscriptions dropped |
//! | Element stream fails | `Isolate` | Element's subscription dropped, slot kept, warning logged |
//! | Element stream completes | any | Element's subscription dropped, slot kept |
//! | Structural stream fails | any | Output fails with the same error |

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use rds_stream::{Observer, Signal, Stream, StreamError, Subscription};
use tracing::{debug, warn};

use crate::config::{AggregatorConfig, FailurePolicy};
use crate::event::ChangeEvent;
use crate::sequence::ObservableSequence;
use crate::value::ObservableValue;

/// A property change reported by one element of the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementChange<T> {
    /// The element that changed.
    pub element: T,
    /// Name of the changed property.
    pub property: String,
}

impl<T> ElementChange<T> {
    #[must_use]
    pub fn new(element: T, property: impl Into<String>) -> Self {
        Self {
            element,
            property: property.into(),
        }
    }

    #[must_use]
    pub fn into_pair(self) -> (T, String) {
        (self.element, self.property)
    }
}

/// Builds streams of [`ElementChange`]s for a sequence of
/// [`ObservableValue`] elements, following elements as they are added and
/// removed.
pub struct ElementChangeAggregator<T> {
    storage: Weak<RefCell<Vec<T>>>,
    changed: Stream<ChangeEvent<T>>,
    config: AggregatorConfig,
}

impl<T> Clone for ElementChangeAggregator<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Weak::clone(&self.storage),
            changed: self.changed.clone(),
            config: self.config,
        }
    }
}

impl<T> std::fmt::Debug for ElementChangeAggregator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementChangeAggregator")
            .field("sequence_alive", &(self.storage.strong_count() > 0))
            .field("config", &self.config)
            .finish()
    }
}

impl<T: ObservableValue + Clone + 'static> ElementChangeAggregator<T> {
    /// Aggregator over `sequence` with the default configuration.
    #[must_use]
    pub fn new(sequence: &ObservableSequence<T>) -> Self {
        Self::with_config(sequence, AggregatorConfig::default())
    }

    #[must_use]
    pub fn with_config(sequence: &ObservableSequence<T>, config: AggregatorConfig) -> Self {
        Self {
            storage: sequence.storage(),
            changed: sequence.changed(),
            config,
        }
    }

    /// The aggregated stream. Each subscription tracks elements
    /// independently.
    ///
    /// Subscribing after the sequence was dropped completes immediately.
    #[must_use]
    pub fn stream(&self) -> Stream<ElementChange<T>> {
        let this = self.clone();
        Stream::new(move |observer| this.attach(observer))
    }

    /// Shorthand for `stream().subscribe(observer)`.
    pub fn subscribe(
        &self,
        observer: impl Fn(Signal<'_, ElementChange<T>>) + 'static,
    ) -> Subscription {
        self.attach(Rc::new(observer))
    }

    fn attach(&self, observer: Observer<ElementChange<T>>) -> Subscription {
        let Some(storage) = self.storage.upgrade() else {
            observer(Signal::Completed);
            return Subscription::empty();
        };
        let current: Vec<T> = storage.borrow().clone();
        drop(storage);

        // Busy until the initial elements are tracked; structural events
        // seen meanwhile wait in the backlog.
        let state = Rc::new(RefCell::new(AggregatorState {
            tracked: Vec::new(),
            next_token: 0,
            structural: None,
            terminated: false,
            busy: true,
            backlog: VecDeque::new(),
            unplaced_failures: Vec::new(),
            observer,
            policy: self.config.failure_policy,
        }));
        let weak = Rc::downgrade(&state);

        let structural_weak = Weak::clone(&weak);
        let structural = self.changed.subscribe(move |signal| {
            AggregatorState::on_structural(&structural_weak, signal);
        });
        {
            let mut inner = state.borrow_mut();
            if !inner.terminated {
                inner.structural = Some(structural);
            }
        }

        AggregatorState::track(&weak, 0, &current);
        AggregatorState::drain_backlog(&weak);
        Subscription::from_guard(state)
    }
}

impl<T: ObservableValue + Clone + 'static> ObservableSequence<T> {
    /// Stream of `(element, property)` changes from every element currently
    /// in the sequence.
    #[must_use]
    pub fn element_changed(&self) -> Stream<ElementChange<T>> {
        ElementChangeAggregator::new(self).stream()
    }

    /// [`element_changed`](Self::element_changed) with a custom configuration.
    #[must_use]
    pub fn element_changed_with(&self, config: AggregatorConfig) -> Stream<ElementChange<T>> {
        ElementChangeAggregator::with_config(self, config).stream()
    }
}

/// One tracked element occurrence.
struct TrackedElement {
    token: u64,
    /// `None` once the element's stream ended or was isolated.
    subscription: Option<Subscription>,
}

/// Per-subscription bookkeeping of an aggregated stream.
struct AggregatorState<T> {
    /// One slot per sequence position.
    tracked: Vec<TrackedElement>,
    next_token: u64,
    /// Subscription to the sequence's `changed` stream.
    structural: Option<Subscription>,
    terminated: bool,
    /// Set while the table is being updated.
    busy: bool,
    /// Structural events received while `busy`, in arrival order.
    backlog: VecDeque<ChangeEvent<T>>,
    /// Failures reported by element streams before their slot was spliced in.
    unplaced_failures: Vec<(u64, StreamError)>,
    observer: Observer<ElementChange<T>>,
    policy: FailurePolicy,
}

impl<T: ObservableValue + Clone + 'static> AggregatorState<T> {
    fn on_structural(weak: &Weak<RefCell<Self>>, signal: Signal<'_, ChangeEvent<T>>) {
        match signal {
            Signal::Next(event) => {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                {
                    let mut inner = state.borrow_mut();
                    if inner.terminated {
                        return;
                    }
                    if inner.busy {
                        inner.backlog.push_back(event.clone());
                        return;
                    }
                    inner.busy = true;
                }
                Self::apply(weak, event);
                Self::drain_backlog(weak);
            }
            Signal::Completed => Self::finish(weak, None),
            Signal::Failed(err) => Self::finish(weak, Some(err.clone())),
        }
    }

    fn apply(weak: &Weak<RefCell<Self>>, event: &ChangeEvent<T>) {
        match event {
            ChangeEvent::Added { range, elements } => Self::track(weak, range.start, elements),
            ChangeEvent::Removed { range, .. } => Self::untrack(weak, range.start, range.end),
        }
    }

    /// Fold queued events until none are left, then clear `busy`.
    fn drain_backlog(weak: &Weak<RefCell<Self>>) {
        loop {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let event = {
                let mut inner = state.borrow_mut();
                match inner.backlog.pop_front() {
                    Some(event) if !inner.terminated => event,
                    _ => {
                        inner.busy = false;
                        inner.backlog.clear();
                        return;
                    }
                }
            };
            Self::apply(weak, &event);
        }
    }

    /// Subscribe to `elements` and splice their slots in at `start`.
    fn track(weak: &Weak<RefCell<Self>>, start: usize, elements: &[T]) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let (first_token, observer) = {
            let mut inner = state.borrow_mut();
            if inner.terminated {
                return;
            }
            let first = inner.next_token;
            inner.next_token += elements.len() as u64;
            (first, Rc::clone(&inner.observer))
        };

        // Subscribe without holding the borrow: an element stream that has
        // already ended reports back synchronously.
        let slots: Vec<TrackedElement> = elements
            .iter()
            .zip(first_token..)
            .map(|(element, token)| TrackedElement {
                token,
                subscription: Some(Self::watch(weak, element, token, &observer)),
            })
            .collect();

        let failures = {
            let mut inner = state.borrow_mut();
            if inner.terminated {
                return;
            }
            let len = inner.tracked.len();
            if start > len {
                warn!(start, len, "element aggregator: insertion past tracked range, clamping");
            }
            let at = start.min(len);
            inner.tracked.splice(at..at, slots);
            debug!(
                added = elements.len(),
                tracked = inner.tracked.len(),
                "element aggregator: tracking elements"
            );
            std::mem::take(&mut inner.unplaced_failures)
        };
        // Slots exist now, so each failure resolves to a position.
        for (token, err) in failures {
            Self::element_failed(weak, token, &err);
        }
    }

    fn watch(
        weak: &Weak<RefCell<Self>>,
        element: &T,
        token: u64,
        observer: &Observer<ElementChange<T>>,
    ) -> Subscription {
        let weak = Weak::clone(weak);
        let observer = Rc::clone(observer);
        let element = element.clone();
        element
            .property_changed()
            .subscribe(move |signal| match signal {
                Signal::Next(property) => {
                    observer(Signal::Next(&ElementChange::new(
                        element.clone(),
                        property.clone(),
                    )));
                }
                Signal::Completed => Self::release(&weak, token),
                Signal::Failed(err) => Self::element_failed(&weak, token, err),
            })
    }

    /// Drain the slots in `start..end` and drop their subscriptions.
    fn untrack(weak: &Weak<RefCell<Self>>, start: usize, end: usize) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let removed: Vec<TrackedElement> = {
            let mut inner = state.borrow_mut();
            if inner.terminated {
                return;
            }
            let len = inner.tracked.len();
            if end > len {
                warn!(start, end, len, "element aggregator: removal past tracked range, clamping");
            }
            let end = end.min(len);
            let start = start.min(end);
            inner.tracked.drain(start..end).collect()
        };
        debug!(
            removed = removed.len(),
            "element aggregator: stopped tracking elements"
        );
        // Subscriptions drop here, outside the borrow.
        drop(removed);
    }

    /// The element's stream ended; keep its slot, drop its subscription.
    fn release(weak: &Weak<RefCell<Self>>, token: u64) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let released = {
            let mut inner = state.borrow_mut();
            inner
                .tracked
                .iter_mut()
                .find(|slot| slot.token == token)
                .and_then(|slot| slot.subscription.take())
        };
        drop(released);
    }

    fn element_failed(weak: &Weak<RefCell<Self>>, token: u64, err: &StreamError) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let (position, policy) = {
            let mut inner = state.borrow_mut();
            if inner.terminated {
                return;
            }
            let found = inner.tracked.iter().position(|slot| slot.token == token);
            let Some(position) = found else {
                // Failed while `track` was subscribing; handled after the splice.
                inner.unplaced_failures.push((token, err.clone()));
                return;
            };
            (position, inner.policy)
        };
        match policy {
            FailurePolicy::Isolate => {
                warn!(position, error = %err, "element aggregator: isolating failed element");
                Self::release(weak, token);
            }
            FailurePolicy::Terminate => {
                Self::finish(weak, Some(err.clone().at_inner(position)));
            }
        }
    }

    /// Terminate: drop every subscription, then signal downstream.
    fn finish(weak: &Weak<RefCell<Self>>, error: Option<StreamError>) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let (observer, tracked, structural) = {
            let mut inner = state.borrow_mut();
            if inner.terminated {
                return;
            }
            inner.terminated = true;
            (
                Rc::clone(&inner.observer),
                std::mem::take(&mut inner.tracked),
                inner.structural.take(),
            )
        };
        debug!(
            tracked = tracked.len(),
            failed = error.is_some(),
            "element aggregator: finished"
        );
        drop(tracked);
        drop(structural);
        match &error {
            Some(err) => observer(Signal::Failed(err)),
            None => observer(Signal::Completed),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
