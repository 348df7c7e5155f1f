#![forbid(unsafe_code)]

//! Capability for elements that announce their own internal changes.

use std::rc::Rc;

use rds_stream::Stream;

/// An element type whose internal properties can change.
///
/// Implementors fire the name of the changed property on
/// [`property_changed`](ObservableValue::property_changed) after the new
/// state is already visible to readers. The sequence layer treats the name
/// as opaque.
///
/// Implementing this trait unlocks
/// [`ObservableSequence::element_changed`](crate::ObservableSequence::element_changed)
/// and [`ObservableSequence::any_change`](crate::ObservableSequence::any_change).
pub trait ObservableValue {
    /// Stream of changed property names.
    fn property_changed(&self) -> Stream<String>;
}

impl<V: ObservableValue + ?Sized> ObservableValue for Rc<V> {
    fn property_changed(&self) -> Stream<String> {
        (**self).property_changed()
    }
}
