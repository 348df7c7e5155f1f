#![forbid(unsafe_code)]

//! Hot multicast subject.
//!
//! # Design
//!
//! [`Subject<T>`] keeps its subscriber list in shared, reference-counted
//! storage (`Rc<RefCell<..>>`). Each subscriber callback is owned by the
//! [`Subscription`] returned from [`Subject::subscribe`]; the subject only
//! stores a `Weak` pointer to it.
//!
//! Delivery snapshots the weak list and releases the borrow before invoking
//! anything, then upgrades each entry right before its call. This gives two
//! guarantees:
//!
//! - Handlers may subscribe, unsubscribe, emit, or terminate from inside a
//!   delivery without hitting a `RefCell` borrow conflict.
//! - A subscription dropped by an earlier handler of the same delivery fails
//!   to upgrade and is skipped.
//!
//! Subscribers registered during a delivery only see later values.
//!
//! A value emitted from inside a handler is queued and delivered once the
//! current value has reached every subscriber. All subscribers therefore see
//! values in emission order, however deeply handlers re-enter.
//!
//! # Failure Modes
//!
//! - **Subscriber leak**: If `Subscription` guards are stored indefinitely
//!   without being dropped, callbacks accumulate. Dead weak references are
//!   pruned lazily on the next `next()`.
//! - **Panicking handler**: A panic unwinding out of a delivery leaves the
//!   subject in its delivering state; later `next` calls only queue.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::signal::{Observer, Signal, StreamError};
use crate::stream::Stream;
use crate::subscription::Subscription;

type ObserverWeak<T> = Weak<dyn Fn(Signal<'_, T>)>;

/// How a subject ended.
#[derive(Debug, Clone)]
enum Terminal {
    Completed,
    Failed(StreamError),
}

impl Terminal {
    fn deliver<T>(&self, observer: &dyn Fn(Signal<'_, T>)) {
        match self {
            Self::Completed => observer(Signal::Completed),
            Self::Failed(err) => observer(Signal::Failed(err)),
        }
    }
}

/// Shared interior for [`Subject<T>`].
struct SubjectInner<T> {
    /// Subscribers stored as weak references. Dead entries are pruned on emit.
    subscribers: Vec<ObserverWeak<T>>,
    /// Set once; the subscriber list is dropped at the same time.
    terminal: Option<Terminal>,
    /// True while `next` is running its delivery loop.
    delivering: bool,
    /// Values emitted by handlers during the current delivery.
    pending: VecDeque<T>,
}

/// A hot, multicast event channel.
///
/// Cloning a `Subject` creates a new handle to the **same** channel.
///
/// # Invariants
///
/// 1. Subscribers are notified in registration order.
/// 2. The subject terminates at most once; later `complete`/`fail` calls are
///    ignored.
/// 3. `next` after termination is a no-op.
/// 4. Every subscriber sees values in the order they were emitted, including
///    values emitted re-entrantly from handlers.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Subject")
            .field("subscriber_count", &inner.subscribers.len())
            .field("terminal", &inner.terminal)
            .finish()
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Subject<T> {
    /// Create a subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                subscribers: Vec::new(),
                terminal: None,
                delivering: false,
                pending: VecDeque::new(),
            })),
        }
    }

    /// Subscribe to every signal of this subject.
    ///
    /// Returns a [`Subscription`] guard; dropping it unsubscribes. If the
    /// subject has already terminated, the terminal signal is delivered before
    /// this returns and the returned handle is inert.
    pub fn subscribe(&self, observer: impl Fn(Signal<'_, T>) + 'static) -> Subscription {
        self.subscribe_observer(Rc::new(observer))
    }

    /// Subscribe with an already shared observer.
    pub fn subscribe_observer(&self, observer: Observer<T>) -> Subscription {
        let terminal = self.inner.borrow().terminal.clone();
        if let Some(terminal) = terminal {
            terminal.deliver(&*observer);
            return Subscription::empty();
        }
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&observer));
        Subscription::from_guard(observer)
    }

    /// Subscribe to values only, ignoring terminal signals.
    pub fn subscribe_next(&self, on_next: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe(move |signal| {
            if let Signal::Next(value) = signal {
                on_next(value);
            }
        })
    }

    /// A cold [`Stream`] view of this subject. Each subscription to the stream
    /// subscribes to the subject.
    #[must_use]
    pub fn stream(&self) -> Stream<T> {
        let subject = self.clone();
        Stream::new(move |observer| subject.subscribe_observer(observer))
    }
}

impl<T> Subject<T> {
    /// Deliver `value` to every live subscriber.
    ///
    /// Ignored after termination. Called from inside a handler, the value is
    /// queued behind the one being delivered and this returns immediately.
    /// If a handler terminates the subject, the remaining subscribers of this
    /// delivery are skipped and queued values are discarded; subscribers
    /// receive the terminal signal instead.
    pub fn next(&self, mut value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.terminal.is_some() {
                return;
            }
            if inner.delivering {
                inner.pending.push_back(value);
                return;
            }
            inner.delivering = true;
        }

        loop {
            self.deliver(&value);
            let queued = {
                let mut inner = self.inner.borrow_mut();
                let queued = if inner.terminal.is_some() {
                    None
                } else {
                    inner.pending.pop_front()
                };
                if queued.is_none() {
                    inner.delivering = false;
                    inner.pending.clear();
                }
                queued
            };
            match queued {
                Some(next) => value = next,
                None => break,
            }
        }
    }

    fn deliver(&self, value: &T) {
        let subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.clone()
        };

        for weak in &subscribers {
            if self.is_terminated() {
                break;
            }
            // Upgrade per call: a guard dropped earlier in this loop is skipped.
            if let Some(observer) = weak.upgrade() {
                observer(Signal::Next(value));
            }
        }
    }

    /// Complete the subject. Subscribers receive [`Signal::Completed`] and the
    /// subscriber list is released.
    pub fn complete(&self) {
        self.terminate(Terminal::Completed);
    }

    /// Fail the subject. Subscribers receive [`Signal::Failed`] and the
    /// subscriber list is released.
    pub fn fail(&self, error: StreamError) {
        self.terminate(Terminal::Failed(error));
    }

    fn terminate(&self, terminal: Terminal) {
        let subscribers = {
            let mut inner = self.inner.borrow_mut();
            if inner.terminal.is_some() {
                return;
            }
            inner.terminal = Some(terminal.clone());
            inner.pending.clear();
            std::mem::take(&mut inner.subscribers)
        };
        debug!(
            subscribers = subscribers.len(),
            failed = matches!(terminal, Terminal::Failed(_)),
            "subject terminated"
        );
        for weak in &subscribers {
            if let Some(observer) = weak.upgrade() {
                terminal.deliver(&*observer);
            }
        }
    }

    /// Whether the subject has completed or failed.
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.inner.borrow().terminal.is_some()
    }

    /// Number of registered subscribers (including dead ones not yet pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// Number of subscribers whose guards are still alive.
    #[must_use]
    pub fn live_subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
