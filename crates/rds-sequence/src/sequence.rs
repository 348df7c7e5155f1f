#![forbid(unsafe_code)]

//! Observable, mutable sequence.
//!
//! # Design
//!
//! [`ObservableSequence<T>`] owns its elements in an `Rc<RefCell<Vec<T>>>`
//! and a [`Subject`] of [`ChangeEvent`]s. Every mutating operation first
//! brings the storage to its new state, releases the borrow, and only then
//! publishes the event(s) describing the change. Handlers running during
//! delivery therefore read post-mutation contents, even while handling a
//! `Removed` event that describes pre-mutation contents.
//!
//! Operations that replace content (`replace_range`, `set`, `set_range`)
//! publish a `Removed` event followed by an `Added` event.
//!
//! # Invariants
//!
//! 1. Every successful mutation with an effect emits exactly the events that
//!    describe it; batch operations emit one event per side, never one per
//!    element.
//! 2. A failed mutation leaves the storage unchanged and emits nothing.
//! 3. Mutations without effect emit nothing unless
//!    [`SequenceConfig::emit_noop_events`] is set.
//! 4. Dropping the sequence completes [`changed`](ObservableSequence::changed).
//!
//! # Failure Modes
//!
//! - **Mutation inside [`with`](ObservableSequence::with)**: Mutating the
//!   sequence from the closure passed to `with` panics (RefCell borrow
//!   rules). Mutating from a change handler is fine: the events of the nested
//!   mutation are queued behind the event being delivered, so every
//!   subscriber sees events in mutation order.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::{Rc, Weak};

use rds_stream::{Stream, Subject};
use tracing::trace;

use crate::config::SequenceConfig;
use crate::error::{SequenceError, check_index, check_position, check_range};
use crate::event::ChangeEvent;

/// An ordered, indexable collection that publishes a [`ChangeEvent`] for
/// every mutation.
///
/// Mutating operations take `&self` so a change handler may hold an
/// `Rc<ObservableSequence<T>>` and re-read or mutate it during delivery.
pub struct ObservableSequence<T> {
    items: Rc<RefCell<Vec<T>>>,
    changed: Subject<ChangeEvent<T>>,
    config: SequenceConfig,
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableSequence<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableSequence")
            .field("items", &*self.items.borrow())
            .field("changed", &self.changed)
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Clone + 'static> Default for ObservableSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for ObservableSequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Clone + 'static> FromIterator<T> for ObservableSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Drop for ObservableSequence<T> {
    fn drop(&mut self) {
        self.changed.complete();
    }
}

impl<T: Clone + 'static> ObservableSequence<T> {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Create an empty sequence with the given configuration.
    #[must_use]
    pub fn with_config(config: SequenceConfig) -> Self {
        Self::from_vec_with_config(Vec::new(), config)
    }

    /// Create a sequence holding `items`. No event is emitted.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_vec_with_config(items, SequenceConfig::default())
    }

    #[must_use]
    pub fn from_vec_with_config(items: Vec<T>, config: SequenceConfig) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            changed: Subject::new(),
            config,
        }
    }

    // ── Reads ───────────────────────────────────────────────────────────

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Clone of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfBounds`] unless `index < len()`.
    pub fn get(&self, index: usize) -> Result<T, SequenceError> {
        let items = self.items.borrow();
        check_index(index, items.len())?;
        Ok(items[index].clone())
    }

    /// First element, or `None` when empty.
    #[must_use]
    pub fn first(&self) -> Option<T> {
        self.items.borrow().first().cloned()
    }

    /// Last element, or `None` when empty.
    #[must_use]
    pub fn last(&self) -> Option<T> {
        self.items.borrow().last().cloned()
    }

    /// Access the elements by reference without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }

    /// Clone of all elements.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    #[must_use]
    pub fn config(&self) -> SequenceConfig {
        self.config
    }

    // ── Observation ─────────────────────────────────────────────────────

    /// Stream of structural changes.
    ///
    /// Events are delivered synchronously, before the mutating call returns.
    /// The stream completes when the sequence is dropped.
    #[must_use]
    pub fn changed(&self) -> Stream<ChangeEvent<T>> {
        self.changed.stream()
    }

    /// Number of registered change subscribers (including dead ones not yet
    /// pruned).
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.changed.subscriber_count()
    }

    /// Weak handle to the storage for derived streams.
    pub(crate) fn storage(&self) -> Weak<RefCell<Vec<T>>> {
        Rc::downgrade(&self.items)
    }

    // ── Insertion ───────────────────────────────────────────────────────

    /// Insert `element` at the end.
    pub fn append(&self, element: T) {
        let event = {
            let mut items = self.items.borrow_mut();
            items.push(element.clone());
            ChangeEvent::added(items.len() - 1, vec![element])
        };
        self.publish(event);
    }

    /// Insert `element` at `index`, shifting later elements right.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfBounds`] unless `index <= len()`.
    pub fn insert(&self, index: usize, element: T) -> Result<(), SequenceError> {
        {
            let mut items = self.items.borrow_mut();
            check_position(index, items.len())?;
            items.insert(index, element.clone());
        }
        self.publish(ChangeEvent::added(index, vec![element]));
        Ok(())
    }

    /// Append a batch of elements with a single `Added` event.
    pub fn append_all(&self, elements: impl IntoIterator<Item = T>) {
        let elements: Vec<T> = elements.into_iter().collect();
        if elements.is_empty() && !self.config.emit_noop_events {
            return;
        }
        let start = {
            let mut items = self.items.borrow_mut();
            let start = items.len();
            items.extend(elements.iter().cloned());
            start
        };
        self.publish(ChangeEvent::added(start, elements));
    }

    // ── Removal ─────────────────────────────────────────────────────────

    /// Remove and return the element at `index`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfBounds`] unless `index < len()`.
    pub fn remove_at(&self, index: usize) -> Result<T, SequenceError> {
        let removed = {
            let mut items = self.items.borrow_mut();
            check_index(index, items.len())?;
            items.remove(index)
        };
        self.publish(ChangeEvent::removed(index, vec![removed.clone()]));
        Ok(removed)
    }

    /// Remove and return the first element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] when empty.
    pub fn remove_first(&self) -> Result<T, SequenceError> {
        if self.is_empty() {
            return Err(SequenceError::EmptyCollection);
        }
        self.remove_at(0)
    }

    /// Remove and return the last element.
    ///
    /// # Errors
    ///
    /// [`SequenceError::EmptyCollection`] when empty.
    pub fn remove_last(&self) -> Result<T, SequenceError> {
        match self.len() {
            0 => Err(SequenceError::EmptyCollection),
            len => self.remove_at(len - 1),
        }
    }

    /// Remove and return the last element, or `None` (and no event) when
    /// empty.
    pub fn pop_last(&self) -> Option<T> {
        self.remove_last().ok()
    }

    /// Remove every element with a single `Removed` event.
    pub fn remove_all(&self) {
        let removed = std::mem::take(&mut *self.items.borrow_mut());
        if removed.is_empty() && !self.config.emit_noop_events {
            return;
        }
        self.publish(ChangeEvent::removed(0, removed));
    }

    // ── Replacement ─────────────────────────────────────────────────────

    /// Replace the elements in `range` with `elements`.
    ///
    /// Emits `Removed { range, old }` then
    /// `Added { range.start..range.start + new.len(), new }`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfBounds`] unless
    /// `range.start <= range.end <= len()`.
    pub fn replace_range(
        &self,
        range: Range<usize>,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<(), SequenceError> {
        let Range { start, end } = range;
        let new: Vec<T> = elements.into_iter().collect();
        let old: Vec<T> = {
            let mut items = self.items.borrow_mut();
            check_range(start, end, items.len())?;
            items.splice(start..end, new.iter().cloned()).collect()
        };
        if old.is_empty() && new.is_empty() && !self.config.emit_noop_events {
            return Ok(());
        }
        self.publish(ChangeEvent::removed(start, old));
        self.publish(ChangeEvent::added(start, new));
        Ok(())
    }

    /// Overwrite the element at `index`, returning the previous value.
    ///
    /// Emits `Removed { index..index+1, [old] }` then
    /// `Added { index..index+1, [value] }`.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfBounds`] unless `index < len()`.
    pub fn set(&self, index: usize, value: T) -> Result<T, SequenceError> {
        let old = {
            let mut items = self.items.borrow_mut();
            check_index(index, items.len())?;
            std::mem::replace(&mut items[index], value.clone())
        };
        self.publish(ChangeEvent::removed(index, vec![old.clone()]));
        self.publish(ChangeEvent::added(index, vec![value]));
        Ok(old)
    }

    /// Ranged write; identical to [`replace_range`](Self::replace_range).
    ///
    /// # Errors
    ///
    /// See [`replace_range`](Self::replace_range).
    pub fn set_range(
        &self,
        range: Range<usize>,
        values: impl IntoIterator<Item = T>,
    ) -> Result<(), SequenceError> {
        self.replace_range(range, values)
    }

    fn publish(&self, event: ChangeEvent<T>) {
        let range = event.range();
        trace!(
            kind = event.kind(),
            start = range.start,
            end = range.end,
            "sequence change"
        );
        self.changed.next(event);
    }
}

impl<T: Clone + PartialEq + 'static> ObservableSequence<T> {
    /// Whether any element equals `value`.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.items.borrow().contains(value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::ChangeRecorder;
    use rds_stream::{Signal, Subscription};
    use std::cell::Cell;

    type Log = Rc<RefCell<Vec<ChangeEvent<&'static str>>>>;

    fn observed(items: &[&'static str]) -> (ObservableSequence<&'static str>, Log, Subscription) {
        let seq = ObservableSequence::from_vec(items.to_vec());
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = seq
            .changed()
            .subscribe_next(move |e| sink.borrow_mut().push(e.clone()));
        (seq, log, sub)
    }

    #[test]
    fn init_empty_and_from_items() {
        let empty: ObservableSequence<i32> = ObservableSequence::new();
        assert!(empty.is_empty());
        let seq: ObservableSequence<i32> = vec![1, 2].into();
        assert_eq!(seq.len(), 2);
        let seq: ObservableSequence<i32> = (0..3).collect();
        assert_eq!(seq.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn reads() {
        let seq = ObservableSequence::from_vec(vec!["a", "b"]);
        assert_eq!(seq.get(1), Ok("b"));
        assert_eq!(
            seq.get(2),
            Err(SequenceError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert_eq!(seq.first(), Some("a"));
        assert_eq!(seq.last(), Some("b"));
        assert!(seq.contains(&"a"));
        assert_eq!(seq.with(|items| items.len()), 2);

        let empty: ObservableSequence<&str> = ObservableSequence::new();
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
    }

    #[test]
    fn append_emits_added_after_count_increments() {
        let seq = Rc::new(ObservableSequence::from_vec(vec!["stuff", "things"]));
        let seen_len = Rc::new(Cell::new(0usize));
        let reader = Rc::downgrade(&seq);
        let l = Rc::clone(&seen_len);
        let events: Log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let _sub = seq.changed().subscribe_next(move |e| {
            if let Some(seq) = reader.upgrade() {
                l.set(seq.len());
            }
            sink.borrow_mut().push(e.clone());
        });

        seq.append("item");
        assert_eq!(*events.borrow(), vec![ChangeEvent::added(2, vec!["item"])]);
        assert_eq!(seen_len.get(), 3);
        assert_eq!(seq.len(), 3);
    }

    #[test]
    fn insert_then_read() {
        let (seq, log, _sub) = observed(&["stuff", "things"]);
        seq.insert(1, "item").unwrap();
        assert_eq!(seq.get(1), Ok("item"));
        assert_eq!(seq.len(), 3);
        assert_eq!(*log.borrow(), vec![ChangeEvent::added(1, vec!["item"])]);
    }

    #[test]
    fn insert_at_end_is_valid() {
        let (seq, log, _sub) = observed(&["a"]);
        seq.insert(1, "b").unwrap();
        assert_eq!(*log.borrow(), vec![ChangeEvent::added(1, vec!["b"])]);
    }

    #[test]
    fn insert_out_of_bounds_changes_nothing() {
        let (seq, log, _sub) = observed(&["a"]);
        assert_eq!(
            seq.insert(3, "x"),
            Err(SequenceError::IndexOutOfBounds { index: 3, len: 1 })
        );
        assert_eq!(seq.to_vec(), vec!["a"]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn append_all_emits_one_event() {
        let (seq, log, _sub) = observed(&["stuff", "things"]);
        seq.append_all(["item1", "item2"]);
        assert_eq!(
            *log.borrow(),
            vec![ChangeEvent::added(2, vec!["item1", "item2"])]
        );
        assert_eq!(seq.len(), 4);
    }

    #[test]
    fn append_all_empty_emits_nothing() {
        let (seq, log, _sub) = observed(&["a"]);
        seq.append_all(Vec::new());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn remove_at_uses_pre_removal_index() {
        let (seq, log, _sub) = observed(&["stuff", "things", "item"]);
        assert_eq!(seq.remove_at(1), Ok("things"));
        assert_eq!(*log.borrow(), vec![ChangeEvent::removed(1, vec!["things"])]);
        assert_eq!(seq.to_vec(), vec!["stuff", "item"]);
    }

    #[test]
    fn remove_at_out_of_bounds() {
        let (seq, log, _sub) = observed(&["a"]);
        assert_eq!(
            seq.remove_at(1),
            Err(SequenceError::IndexOutOfBounds { index: 1, len: 1 })
        );
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn remove_first_and_last() {
        let (seq, log, _sub) = observed(&["stuff", "things", "more"]);
        assert_eq!(seq.remove_first(), Ok("stuff"));
        assert_eq!(seq.remove_last(), Ok("more"));
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(0, vec!["stuff"]),
                ChangeEvent::removed(1, vec!["more"]),
            ]
        );
    }

    #[test]
    fn remove_last_remaining_element() {
        let (seq, log, _sub) = observed(&["only"]);
        assert_eq!(seq.remove_last(), Ok("only"));
        assert_eq!(*log.borrow(), vec![ChangeEvent::removed(0, vec!["only"])]);
        assert!(seq.is_empty());
    }

    #[test]
    fn remove_on_empty_fails() {
        let (seq, log, _sub) = observed(&[]);
        assert_eq!(seq.remove_first(), Err(SequenceError::EmptyCollection));
        assert_eq!(seq.remove_last(), Err(SequenceError::EmptyCollection));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn remove_all_emits_once_then_nothing() {
        let (seq, log, _sub) = observed(&["a", "b", "c"]);
        seq.remove_all();
        seq.remove_all();
        assert_eq!(
            *log.borrow(),
            vec![ChangeEvent::removed(0, vec!["a", "b", "c"])]
        );
        assert!(seq.is_empty());
    }

    #[test]
    fn noop_events_when_configured() {
        let seq: ObservableSequence<i32> =
            ObservableSequence::with_config(SequenceConfig::new().with_noop_events(true));
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let _sub = seq
            .changed()
            .subscribe_next(move |e| sink.borrow_mut().push(e.clone()));

        seq.remove_all();
        seq.append_all(Vec::new());
        seq.replace_range(0..0, Vec::new()).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(0, vec![]),
                ChangeEvent::added(0, vec![]),
                ChangeEvent::removed(0, vec![]),
                ChangeEvent::added(0, vec![]),
            ]
        );
    }

    #[test]
    fn pop_last() {
        let (seq, log, _sub) = observed(&["stuff", "things"]);
        assert_eq!(seq.pop_last(), Some("things"));
        assert_eq!(seq.pop_last(), Some("stuff"));
        assert_eq!(seq.pop_last(), None);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn pop_last_on_empty_emits_nothing() {
        let (seq, log, _sub) = observed(&[]);
        assert_eq!(seq.pop_last(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_emits_removed_then_added() {
        let (seq, log, _sub) = observed(&["a", "b", "c"]);
        assert_eq!(seq.set(1, "x"), Ok("b"));
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(1, vec!["b"]),
                ChangeEvent::added(1, vec!["x"]),
            ]
        );
        assert_eq!(seq.get(1), Ok("x"));
    }

    #[test]
    fn set_out_of_bounds() {
        let (seq, log, _sub) = observed(&["a"]);
        assert!(seq.set(1, "x").is_err());
        assert!(log.borrow().is_empty());
        assert_eq!(seq.to_vec(), vec!["a"]);
    }

    #[test]
    fn replace_range_grows() {
        let (seq, log, _sub) = observed(&["a", "b", "c"]);
        seq.replace_range(0..2, ["p", "q", "r"]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(0, vec!["a", "b"]),
                ChangeEvent::added(0, vec!["p", "q", "r"]),
            ]
        );
        assert_eq!(seq.to_vec(), vec!["p", "q", "r", "c"]);
    }

    #[test]
    fn replace_range_shrinks() {
        let (seq, log, _sub) = observed(&["a", "b", "c", "d"]);
        seq.set_range(1..4, ["z"]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(1, vec!["b", "c", "d"]),
                ChangeEvent::added(1, vec!["z"]),
            ]
        );
        assert_eq!(seq.to_vec(), vec!["a", "z"]);
    }

    #[test]
    fn replace_empty_range_is_insertion() {
        let (seq, log, _sub) = observed(&["a", "c"]);
        seq.replace_range(1..1, ["b"]).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![ChangeEvent::removed(1, vec![]), ChangeEvent::added(1, vec!["b"])]
        );
        assert_eq!(seq.to_vec(), vec!["a", "b", "c"]);
    }

    #[test]
    fn replace_range_with_nothing_is_removal() {
        let (seq, log, _sub) = observed(&["a", "b", "c"]);
        seq.replace_range(0..3, Vec::new()).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                ChangeEvent::removed(0, vec!["a", "b", "c"]),
                ChangeEvent::added(0, vec![]),
            ]
        );
        assert!(seq.is_empty());
    }

    #[test]
    fn replace_range_noop_emits_nothing() {
        let (seq, log, _sub) = observed(&["a"]);
        seq.replace_range(1..1, Vec::new()).unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn replace_range_invalid() {
        let (seq, log, _sub) = observed(&["a", "b"]);
        assert_eq!(
            seq.replace_range(1..3, ["x"]),
            Err(SequenceError::IndexOutOfBounds { index: 3, len: 2 })
        );
        assert_eq!(
            seq.replace_range(2..1, ["x"]),
            Err(SequenceError::IndexOutOfBounds { index: 2, len: 2 })
        );
        assert!(log.borrow().is_empty());
        assert_eq!(seq.to_vec(), vec!["a", "b"]);
    }

    #[test]
    fn handler_reads_post_mutation_state_during_removed() {
        let seq = Rc::new(ObservableSequence::from_vec(vec!["a", "b", "c"]));
        let snapshots = Rc::new(RefCell::new(Vec::new()));
        let reader = Rc::downgrade(&seq);
        let s = Rc::clone(&snapshots);
        let _sub = seq.changed().subscribe_next(move |e| {
            if let Some(seq) = reader.upgrade() {
                s.borrow_mut().push((e.kind(), seq.to_vec()));
            }
        });

        seq.set(0, "x").unwrap();
        assert_eq!(
            *snapshots.borrow(),
            vec![
                ("removed", vec!["x", "b", "c"]),
                ("added", vec!["x", "b", "c"]),
            ]
        );
    }

    #[test]
    fn handler_may_mutate_sequence() {
        let seq = Rc::new(ObservableSequence::from_vec(vec![1, 2, 3]));
        let writer = Rc::downgrade(&seq);
        let _sub = seq.changed().subscribe_next(move |e| {
            if let (Some(seq), Some((&value, _))) = (writer.upgrade(), e.inserted_element()) {
                if value > 10 {
                    seq.remove_all();
                }
            }
        });

        seq.append(4);
        assert_eq!(seq.len(), 4);
        seq.append(11);
        assert!(seq.is_empty());
    }

    #[test]
    fn nested_mutation_events_reach_later_subscribers_in_order() {
        let seq = Rc::new(ObservableSequence::from_vec(vec![1]));
        let writer = Rc::downgrade(&seq);
        let _undo = seq.changed().subscribe_next(move |e| {
            if let (Some(seq), Some((&value, _))) = (writer.upgrade(), e.inserted_element()) {
                if value > 10 {
                    seq.remove_last().unwrap();
                }
            }
        });
        let recorder = ChangeRecorder::attach(&*seq);

        seq.append(11);
        assert_eq!(
            recorder.events(),
            vec![ChangeEvent::added(1, vec![11]), ChangeEvent::removed(1, vec![11])]
        );
        assert_eq!(recorder.replay(), Ok(seq.to_vec()));
    }

    #[test]
    fn drop_completes_changed() {
        let seq: ObservableSequence<i32> = ObservableSequence::new();
        let completed = Rc::new(Cell::new(false));
        let c = Rc::clone(&completed);
        let _sub = seq.changed().subscribe(move |signal| {
            if let Signal::Completed = signal {
                c.set(true);
            }
        });

        drop(seq);
        assert!(completed.get());
    }

    #[test]
    fn dropped_subscription_stops_events() {
        let (seq, log, sub) = observed(&[]);
        seq.append("a");
        drop(sub);
        seq.append("b");
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn debug_format() {
        let seq = ObservableSequence::from_vec(vec![42]);
        let dbg = format!("{seq:?}");
        assert!(dbg.contains("ObservableSequence"));
        assert!(dbg.contains("42"));
    }
}
