#![forbid(unsafe_code)]

//! Fan-in of several streams into one.
//!
//! # Invariants
//!
//! 1. Every upstream value produces exactly one downstream value, in arrival
//!    order. No coalescing or deduplication.
//! 2. The merged stream completes once every input has completed.
//! 3. The first input failure is forwarded and every other input is
//!    unsubscribed; nothing is forwarded afterwards.
//! 4. Dropping the merged subscription drops every input subscription.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::signal::{Observer, Signal};
use crate::stream::Stream;
use crate::subscription::Subscription;

/// Per-subscription state of a merged stream.
#[derive(Default)]
struct MergeState {
    /// Inputs that have completed so far.
    completed: Cell<usize>,
    /// Set once a terminal signal went downstream.
    terminated: Cell<bool>,
    /// Input subscriptions; released on failure or drop.
    inputs: RefCell<Vec<Subscription>>,
}

impl MergeState {
    fn forward<T>(
        weak: &Weak<MergeState>,
        input_count: usize,
        observer: &Observer<T>,
        signal: Signal<'_, T>,
    ) {
        let Some(state) = weak.upgrade() else {
            return;
        };
        if state.terminated.get() {
            return;
        }
        match signal {
            Signal::Next(_) => observer(signal),
            Signal::Completed => {
                let completed = state.completed.get() + 1;
                state.completed.set(completed);
                if completed == input_count {
                    state.terminated.set(true);
                    observer(Signal::Completed);
                }
            }
            Signal::Failed(_) => {
                state.terminated.set(true);
                let inputs = state.inputs.take();
                observer(signal);
                drop(inputs);
            }
        }
    }
}

impl<T: 'static> Stream<T> {
    /// Merge this stream with `other`.
    #[must_use]
    pub fn merge(&self, other: &Stream<T>) -> Stream<T> {
        Stream::merge_all([self.clone(), other.clone()])
    }

    /// Merge any number of streams. Merging nothing completes immediately.
    #[must_use]
    pub fn merge_all(streams: impl IntoIterator<Item = Stream<T>>) -> Stream<T> {
        let sources: Rc<[Stream<T>]> = streams.into_iter().collect();
        Stream::new(move |observer: Observer<T>| {
            let input_count = sources.len();
            if input_count == 0 {
                observer(Signal::Completed);
                return Subscription::empty();
            }
            let state = Rc::new(MergeState::default());
            for source in sources.iter() {
                let weak = Rc::downgrade(&state);
                let observer = Rc::clone(&observer);
                let sub = source.subscribe(move |signal| {
                    MergeState::forward(&weak, input_count, &observer, signal);
                });
                if state.terminated.get() {
                    // An input failed while subscribing; the rest is moot.
                    break;
                }
                state.inputs.borrow_mut().push(sub);
            }
            Subscription::from_guard(state)
        })
    }
}
