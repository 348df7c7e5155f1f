#![forbid(unsafe_code)]

//! Reactive data structures public facade.
//!
//! This crate provides the stable, ergonomic surface area for users.
//!
//! ```
//! use rds::prelude::*;
//!
//! let seq = ObservableSequence::from_vec(vec![1, 2, 3]);
//! let recorder = ChangeRecorder::attach(&seq);
//! seq.replace_range(0..2, [9]).unwrap();
//! assert_eq!(recorder.replay(), Ok(vec![9, 3]));
//! ```

pub use rds_sequence as sequence;
pub use rds_stream as stream;

pub mod prelude {
    pub use rds_sequence::{
        AggregatorConfig, AnyChangeMerger, ChangeEvent, ChangeRecorder, ElementChange,
        ElementChangeAggregator, FailurePolicy, ObservableSequence, ObservableValue,
        SequenceConfig, SequenceError,
    };
    pub use rds_stream::{Signal, Stream, StreamError, Subject, Subscription};
}
