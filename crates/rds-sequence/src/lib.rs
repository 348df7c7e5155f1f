#![forbid(unsafe_code)]

//! Observable sequences for reactive state binding.
//!
//! # Role
//! `rds-sequence` turns an ordered collection into an event source. A UI or
//! state-binding layer subscribes to fine-grained structural changes instead
//! of rescanning the collection, and can get one unified "something
//! changed" signal covering both structure and element internals.
//!
//! # Primary responsibilities
//! - **[`ChangeEvent`]**: `Added`/`Removed` with a half-open range and the
//!   affected elements.
//! - **[`ObservableSequence`]**: the mutable container; publishes the exact
//!   events for every mutation on [`changed`](ObservableSequence::changed).
//! - **[`ObservableValue`]**: capability for elements that announce their
//!   own property changes.
//! - **[`ElementChangeAggregator`]**: `(element, property)` changes from
//!   whichever elements are in the sequence at the time.
//! - **[`AnyChangeMerger`]**: merged unit signal over both.
//! - **[`ChangeRecorder`]**: event log capture and replay.
//!
//! # Example
//!
//! ```
//! use rds_sequence::{ChangeEvent, ObservableSequence};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let seq = ObservableSequence::from_vec(vec!["a", "b", "c"]);
//! let log = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&log);
//! let _sub = seq.changed().subscribe_next(move |e| sink.borrow_mut().push(e.clone()));
//!
//! seq.set(1, "x").unwrap();
//! assert_eq!(
//!     *log.borrow(),
//!     vec![ChangeEvent::removed(1, vec!["b"]), ChangeEvent::added(1, vec!["x"])]
//! );
//! ```

pub mod aggregate;
pub mod any_change;
pub mod config;
pub mod error;
pub mod event;
pub mod recorder;
pub mod sequence;
pub mod value;

pub use aggregate::{ElementChange, ElementChangeAggregator};
pub use any_change::AnyChangeMerger;
pub use config::{AggregatorConfig, FailurePolicy, SequenceConfig};
pub use error::SequenceError;
pub use event::{ChangeEvent, replay, replay_onto};
pub use recorder::ChangeRecorder;
pub use sequence::ObservableSequence;
pub use value::ObservableValue;
