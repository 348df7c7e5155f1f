#![forbid(unsafe_code)]

//! Recording of change event logs.
//!
//! A [`ChangeRecorder`] subscribes to a sequence and keeps every structural
//! event it sees, plus whether the stream has terminated. Together with
//! [`replay_onto`] it lets a consumer rebuild the sequence's contents from
//! the log alone, which is how mirrored views are kept in sync and how the
//! event semantics are verified.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rds_stream::{Signal, Subscription};

use crate::error::SequenceError;
use crate::event::{ChangeEvent, replay_onto};
use crate::sequence::ObservableSequence;

/// Records the change events of one sequence.
///
/// Recording stops when the recorder is dropped.
pub struct ChangeRecorder<T> {
    /// Contents of the sequence when recording started.
    baseline: Vec<T>,
    events: Rc<RefCell<Vec<ChangeEvent<T>>>>,
    completed: Rc<Cell<bool>>,
    _subscription: Subscription,
}

impl<T: std::fmt::Debug> std::fmt::Debug for ChangeRecorder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeRecorder")
            .field("baseline", &self.baseline)
            .field("events", &*self.events.borrow())
            .field("completed", &self.completed.get())
            .finish()
    }
}

impl<T: Clone + 'static> ChangeRecorder<T> {
    /// Start recording `sequence`.
    #[must_use]
    pub fn attach(sequence: &ObservableSequence<T>) -> Self {
        let events = Rc::new(RefCell::new(Vec::new()));
        let completed = Rc::new(Cell::new(false));
        let sink = Rc::clone(&events);
        let done = Rc::clone(&completed);
        let subscription = sequence.changed().subscribe(move |signal| match signal {
            Signal::Next(event) => sink.borrow_mut().push(event.clone()),
            Signal::Completed | Signal::Failed(_) => done.set(true),
        });
        Self {
            baseline: sequence.to_vec(),
            events,
            completed,
            _subscription: subscription,
        }
    }

    /// Clone of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<ChangeEvent<T>> {
        self.events.borrow().clone()
    }

    /// Take the recorded events, leaving the log empty. The baseline moves
    /// forward past the taken events.
    ///
    /// # Errors
    ///
    /// If the taken events do not fold onto the baseline. The log is left
    /// empty and the baseline unchanged.
    pub fn take(&mut self) -> Result<Vec<ChangeEvent<T>>, SequenceError> {
        let taken = std::mem::take(&mut *self.events.borrow_mut());
        self.baseline = replay_onto(self.baseline.clone(), &taken)?;
        Ok(taken)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Whether the sequence's stream has terminated.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed.get()
    }

    /// Rebuild the sequence's contents from the baseline and the log.
    ///
    /// # Errors
    ///
    /// The first event that does not fit the state reached so far.
    pub fn replay(&self) -> Result<Vec<T>, SequenceError> {
        replay_onto(self.baseline.clone(), self.events.borrow().iter())
    }
}
