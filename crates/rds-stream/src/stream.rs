#![forbid(unsafe_code)]

//! Cold stream handles and their operators.
//!
//! A [`Stream<T>`] is a recipe, not a channel: it wraps a producer closure
//! that is run on every [`Stream::subscribe`] call. Operators compose
//! producers, so each subscription to a derived stream builds its own chain
//! of upstream subscriptions and its own bookkeeping. Dropping the returned
//! [`Subscription`] tears that chain down.

use std::rc::Rc;

use crate::signal::{Observer, Signal};
use crate::subscription::Subscription;

type Producer<T> = Rc<dyn Fn(Observer<T>) -> Subscription>;

/// A cold, push-based stream.
///
/// Cloning a `Stream` copies the recipe; subscriptions stay independent.
pub struct Stream<T> {
    producer: Producer<T>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
        }
    }
}

impl<T> std::fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stream").finish_non_exhaustive()
    }
}

impl<T: 'static> Stream<T> {
    /// Build a stream from a producer.
    ///
    /// The producer receives the subscriber's observer and returns the guard
    /// that owns everything the subscription needs.
    pub fn new(producer: impl Fn(Observer<T>) -> Subscription + 'static) -> Self {
        Self {
            producer: Rc::new(producer),
        }
    }

    /// A stream that completes immediately without values.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|observer| {
            observer(Signal::Completed);
            Subscription::empty()
        })
    }

    /// Subscribe to every signal.
    pub fn subscribe(&self, observer: impl Fn(Signal<'_, T>) + 'static) -> Subscription {
        self.subscribe_observer(Rc::new(observer))
    }

    /// Subscribe with an already shared observer.
    pub fn subscribe_observer(&self, observer: Observer<T>) -> Subscription {
        (self.producer)(observer)
    }

    /// Subscribe to values only, ignoring terminal signals.
    pub fn subscribe_next(&self, on_next: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe(move |signal| {
            if let Signal::Next(value) = signal {
                on_next(value);
            }
        })
    }

    /// Transform every value with `f`. Terminal signals pass through.
    #[must_use]
    pub fn map<U: 'static>(&self, f: impl Fn(&T) -> U + 'static) -> Stream<U> {
        let source = self.clone();
        let f = Rc::new(f);
        Stream::new(move |observer: Observer<U>| {
            let f = Rc::clone(&f);
            source.subscribe(move |signal| match signal {
                Signal::Next(value) => {
                    let mapped = f(value);
                    observer(Signal::Next(&mapped));
                }
                Signal::Completed => observer(Signal::Completed),
                Signal::Failed(err) => observer(Signal::Failed(err)),
            })
        })
    }

    /// Keep only values for which `predicate` holds.
    #[must_use]
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + 'static) -> Stream<T> {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Stream::new(move |observer: Observer<T>| {
            let predicate = Rc::clone(&predicate);
            source.subscribe(move |signal| {
                if let Signal::Next(value) = signal {
                    if !predicate(value) {
                        return;
                    }
                }
                observer(signal);
            })
        })
    }

    /// Map every value to `()`: one unit signal per upstream value.
    #[must_use]
    pub fn to_unit(&self) -> Stream<()> {
        self.map(|_| ())
    }
}
