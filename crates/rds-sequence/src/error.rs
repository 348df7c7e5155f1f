#![forbid(unsafe_code)]

//! Errors raised by sequence operations.
//!
//! Errors are always reported synchronously to the caller of the failing
//! operation. A failed operation leaves the sequence unchanged and emits no
//! change event.

use std::fmt;

/// Errors from [`ObservableSequence`](crate::ObservableSequence) operations
/// and event replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceError {
    /// An index, or the offending bound of a range, lies outside the valid
    /// bounds for a sequence of length `len`.
    IndexOutOfBounds { index: usize, len: usize },
    /// A removal was requested on an empty sequence.
    EmptyCollection,
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for sequence of length {len}")
            }
            Self::EmptyCollection => write!(f, "sequence is empty"),
        }
    }
}

impl std::error::Error for SequenceError {}

/// Check that `index` addresses an existing element.
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), SequenceError> {
    if index < len {
        Ok(())
    } else {
        Err(SequenceError::IndexOutOfBounds { index, len })
    }
}

/// Check that `index` is a valid insertion point (`0..=len`).
pub(crate) fn check_position(index: usize, len: usize) -> Result<(), SequenceError> {
    if index <= len {
        Ok(())
    } else {
        Err(SequenceError::IndexOutOfBounds { index, len })
    }
}

/// Check `start <= end <= len`.
pub(crate) fn check_range(start: usize, end: usize, len: usize) -> Result<(), SequenceError> {
    check_position(end, len)?;
    if start > end {
        return Err(SequenceError::IndexOutOfBounds { index: start, len });
    }
    Ok(())
}

/// Check that an event's `start..end` spans exactly `count` elements. The
/// error reports `end` against the bound the elements actually reach.
pub(crate) fn check_extent(start: usize, end: usize, count: usize) -> Result<(), SequenceError> {
    match start.checked_add(count) {
        Some(reach) if reach == end => Ok(()),
        reach => Err(SequenceError::IndexOutOfBounds {
            index: end,
            len: reach.unwrap_or(usize::MAX),
        }),
    }
}
