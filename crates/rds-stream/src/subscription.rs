#![forbid(unsafe_code)]

//! RAII subscription handles.

use std::any::Any;

/// RAII guard for a live subscription.
///
/// The guard owns whatever keeps the subscription alive: for a subject this
/// is the strong `Rc` of the callback (the subject only holds a `Weak`); for
/// a derived stream it is the per-subscription state, which in turn owns the
/// upstream subscriptions. Dropping the guard releases all of it.
pub struct Subscription {
    /// Type-erased owned state. `None` once unsubscribed or for inert handles.
    guard: Option<Box<dyn Any>>,
}

impl Subscription {
    /// Wrap owned state whose lifetime defines the subscription.
    #[must_use]
    pub fn from_guard(guard: impl Any) -> Self {
        Self {
            guard: Some(Box::new(guard)),
        }
    }

    /// An inert handle, returned when there is nothing to cancel (e.g. the
    /// source had already terminated at subscribe time).
    #[must_use]
    pub fn empty() -> Self {
        Self { guard: None }
    }

    /// Cancel the subscription now. Idempotent.
    pub fn unsubscribe(&mut self) {
        self.guard = None;
    }

    /// Whether this handle still holds a subscription.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.guard.is_some()
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
