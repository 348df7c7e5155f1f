#![forbid(unsafe_code)]

//! Push-based, single-threaded streams for reactive data structures.
//!
//! This crate provides the event-channel primitives the sequence layer is
//! built on:
//!
//! - [`Subject`]: A hot, multicast channel. Every value passed to
//!   [`Subject::next`] is delivered to all live subscribers in registration
//!   order. A subject terminates exactly once, by completion or failure.
//! - [`Stream`]: A cold stream handle. Subscribing runs the stream's producer,
//!   so derived streams ([`Stream::map`], [`Stream::filter`],
//!   [`Stream::merge`]) build fresh per-subscription state every time.
//! - [`Subscription`]: RAII guard that cancels delivery on drop.
//!
//! # Architecture
//!
//! Subjects use `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Subscriber callbacks are owned by their [`Subscription`] and handed to the
//! subject as `Weak` pointers, so dropping a guard detaches the callback even
//! in the middle of a delivery cycle.
//!
//! # Invariants
//!
//! 1. Subscribers are notified in registration order.
//! 2. A callback whose [`Subscription`] was dropped is never invoked again,
//!    including later in the delivery cycle that dropped it.
//! 3. No `next` signal follows a terminal signal.
//! 4. Subscribing to a terminated subject delivers the terminal signal
//!    immediately.

pub mod merge;
pub mod signal;
pub mod stream;
pub mod subject;
pub mod subscription;

pub use signal::{Observer, Signal, StreamError};
pub use stream::Stream;
pub use subject::Subject;
pub use subscription::Subscription;
