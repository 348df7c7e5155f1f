#![forbid(unsafe_code)]

//! Signals delivered to stream observers.

use std::fmt;
use std::rc::Rc;

/// One notification pushed to an observer.
///
/// A stream delivers any number of [`Signal::Next`] values followed by at
/// most one terminal signal ([`Signal::Completed`] or [`Signal::Failed`]).
pub enum Signal<'a, T> {
    /// A value was produced.
    Next(&'a T),
    /// The producer finished normally. No further signals follow.
    Completed,
    /// The producer failed. No further signals follow.
    Failed(&'a StreamError),
}

// Manual impls: the signal only borrows `T`, so it is `Copy` for any `T`.
impl<T> Clone for Signal<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Signal<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Signal<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Next(value) => f.debug_tuple("Next").field(value).finish(),
            Self::Completed => f.write_str("Completed"),
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
        }
    }
}

impl<'a, T> Signal<'a, T> {
    /// Returns the carried value for [`Signal::Next`].
    #[must_use]
    pub fn value(&self) -> Option<&'a T> {
        match *self {
            Self::Next(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this signal ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }

    /// Re-types a terminal signal for a downstream observer of another item
    /// type. Returns `None` for [`Signal::Next`].
    #[must_use]
    pub fn terminal<U>(&self) -> Option<Signal<'a, U>> {
        match *self {
            Self::Next(_) => None,
            Self::Completed => Some(Signal::Completed),
            Self::Failed(err) => Some(Signal::Failed(err)),
        }
    }
}

/// A shared observer callback.
pub type Observer<T> = Rc<dyn Fn(Signal<'_, T>)>;

/// Failure carried by [`Signal::Failed`].
///
/// When a stream fans in several inner sources, `inner_index` names the
/// position of the source that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamError {
    message: String,
    inner_index: Option<usize>,
}

impl StreamError {
    /// Create an error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            inner_index: None,
        }
    }

    /// Attribute the error to the inner source at `index`.
    #[must_use]
    pub fn at_inner(mut self, index: usize) -> Self {
        self.inner_index = Some(index);
        self
    }

    /// The failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Position of the failing inner source, if attributed.
    #[must_use]
    pub fn inner_index(&self) -> Option<usize> {
        self.inner_index
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner_index {
            Some(index) => write!(f, "inner stream {index} failed: {}", self.message),
            None => write!(f, "stream failed: {}", self.message),
        }
    }
}

impl std::error::Error for StreamError {}
