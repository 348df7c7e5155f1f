#![forbid(unsafe_code)]

//! Structural change events.
//!
//! # Indexing
//!
//! A [`ChangeEvent::Removed`] range indexes the collection as it was *before*
//! the removal; a [`ChangeEvent::Added`] range indexes it *after* the
//! insertion. Folding a sequence's events in emission order with
//! [`ChangeEvent::apply_to`] therefore reproduces its contents exactly.
//!
//! ```text
//! ["a","b","c"].replace_range(0..2, ["p","q","r"])
//!
//!   Removed { 0..2, ["a","b"] }      ["a","b","c"] -> ["c"]
//!   Added   { 0..3, ["p","q","r"] }  ["c"] -> ["p","q","r","c"]
//! ```

use std::ops::Range;

use crate::error::{SequenceError, check_extent, check_position, check_range};

/// One structural change to an observable sequence.
///
/// # Invariants
///
/// 1. `range.start <= range.end`.
/// 2. `range.end - range.start == elements.len()`.
///
/// The constructors [`ChangeEvent::added`] and [`ChangeEvent::removed`]
/// derive the range from the elements, so both hold by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent<T> {
    /// `elements` now occupy `range` of the post-mutation sequence.
    Added { range: Range<usize>, elements: Vec<T> },
    /// `elements` occupied `range` of the pre-mutation sequence.
    Removed { range: Range<usize>, elements: Vec<T> },
}

impl<T> ChangeEvent<T> {
    /// An insertion of `elements` starting at `start`.
    #[must_use]
    pub fn added(start: usize, elements: Vec<T>) -> Self {
        Self::Added {
            range: start..start + elements.len(),
            elements,
        }
    }

    /// A removal of `elements` that started at `start`.
    #[must_use]
    pub fn removed(start: usize, elements: Vec<T>) -> Self {
        Self::Removed {
            range: start..start + elements.len(),
            elements,
        }
    }

    /// The affected index range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Added { range, .. } | Self::Removed { range, .. } => range.clone(),
        }
    }

    /// The affected elements, in order.
    #[must_use]
    pub fn elements(&self) -> &[T] {
        match self {
            Self::Added { elements, .. } | Self::Removed { elements, .. } => elements,
        }
    }

    /// Consume the event, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<T> {
        match self {
            Self::Added { elements, .. } | Self::Removed { elements, .. } => elements,
        }
    }

    /// Number of affected elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements().len()
    }

    /// Whether the event affects no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    #[must_use]
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }

    /// Short variant name for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Removed { .. } => "removed",
        }
    }

    /// The element and its index if this is a single-element insertion.
    #[must_use]
    pub fn inserted_element(&self) -> Option<(&T, usize)> {
        match self {
            Self::Added { range, elements } if elements.len() == 1 => {
                Some((&elements[0], range.start))
            }
            _ => None,
        }
    }

    /// The element and its former index if this is a single-element removal.
    #[must_use]
    pub fn removed_element(&self) -> Option<(&T, usize)> {
        match self {
            Self::Removed { range, elements } if elements.len() == 1 => {
                Some((&elements[0], range.start))
            }
            _ => None,
        }
    }
}

impl<T: Clone> ChangeEvent<T> {
    /// Apply this event to a snapshot of the sequence.
    ///
    /// `Removed` drains its range, `Added` splices its elements in at
    /// `range.start`. The snapshot is left untouched on error.
    ///
    /// # Errors
    ///
    /// [`SequenceError::IndexOutOfBounds`] if the range does not fit
    /// `target`, or if its length differs from the number of elements the
    /// event carries.
    pub fn apply_to(&self, target: &mut Vec<T>) -> Result<(), SequenceError> {
        let extent = self.range();
        check_extent(extent.start, extent.end, self.len())?;
        match self {
            Self::Added { range, elements } => {
                check_position(range.start, target.len())?;
                target.splice(range.start..range.start, elements.iter().cloned());
            }
            Self::Removed { range, .. } => {
                check_range(range.start, range.end, target.len())?;
                target.drain(range.clone());
            }
        }
        Ok(())
    }
}

/// Fold an event log, starting from an empty sequence.
///
/// # Errors
///
/// The first event that does not fit the state reached so far.
pub fn replay<'a, T: Clone + 'a>(
    events: impl IntoIterator<Item = &'a ChangeEvent<T>>,
) -> Result<Vec<T>, SequenceError> {
    replay_onto(Vec::new(), events)
}

/// Fold an event log onto an initial snapshot.
///
/// # Errors
///
/// The first event that does not fit the state reached so far.
pub fn replay_onto<'a, T: Clone + 'a>(
    mut initial: Vec<T>,
    events: impl IntoIterator<Item = &'a ChangeEvent<T>>,
) -> Result<Vec<T>, SequenceError> {
    for event in events {
        event.apply_to(&mut initial)?;
    }
    Ok(initial)
}
