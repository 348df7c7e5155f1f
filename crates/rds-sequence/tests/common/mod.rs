//! Shared fixtures for integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use rds_sequence::{ObservableSequence, ObservableValue, SequenceError};
use rds_stream::{Stream, Subject};
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Once;

/// Install a test tracing subscriber honoring `RUST_LOG`, once per binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// An observable element with an id and a mutable counter property.
pub struct Item {
    pub id: usize,
    pub value: Cell<i64>,
    pub changes: Subject<String>,
}

impl Item {
    pub fn new(id: usize) -> Rc<Self> {
        Rc::new(Self {
            id,
            value: Cell::new(0),
            changes: Subject::new(),
        })
    }

    pub fn bump(&self) {
        self.value.set(self.value.get() + 1);
        self.changes.next("value".to_string());
    }
}

impl ObservableValue for Item {
    fn property_changed(&self) -> Stream<String> {
        self.changes.stream()
    }
}

impl std::fmt::Debug for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item#{}", self.id)
    }
}

/// One mutation of a sequence script. Indices are unconstrained, so scripts
/// exercise the error paths too.
#[derive(Debug, Clone)]
pub enum Op<V> {
    Append(V),
    Insert(usize, V),
    AppendAll(Vec<V>),
    RemoveAt(usize),
    RemoveFirst,
    RemoveLast,
    RemoveAll,
    PopLast,
    Replace(usize, usize, Vec<V>),
    Set(usize, V),
}

pub fn op_strategy<V: Clone + std::fmt::Debug>(
    value: impl Strategy<Value = V> + Clone + 'static,
) -> impl Strategy<Value = Op<V>> {
    let batch = proptest::collection::vec(value.clone(), 0..4);
    prop_oneof![
        4 => value.clone().prop_map(Op::Append),
        3 => (0usize..12, value.clone()).prop_map(|(i, v)| Op::Insert(i, v)),
        2 => batch.clone().prop_map(Op::AppendAll),
        3 => (0usize..12).prop_map(Op::RemoveAt),
        1 => Just(Op::RemoveFirst),
        1 => Just(Op::RemoveLast),
        1 => Just(Op::RemoveAll),
        1 => Just(Op::PopLast),
        3 => (0usize..12, 0usize..12, batch).prop_map(|(a, b, vs)| Op::Replace(a, b, vs)),
        2 => (0usize..12, value).prop_map(|(i, v)| Op::Set(i, v)),
    ]
}

/// Apply `op` to both the sequence and a plain `Vec` model. Returns whether
/// the operation succeeded; on failure the model is untouched.
pub fn apply<V: Clone + 'static>(
    seq: &ObservableSequence<V>,
    model: &mut Vec<V>,
    op: &Op<V>,
) -> Result<(), SequenceError> {
    match op {
        Op::Append(v) => {
            seq.append(v.clone());
            model.push(v.clone());
        }
        Op::Insert(i, v) => {
            seq.insert(*i, v.clone())?;
            model.insert(*i, v.clone());
        }
        Op::AppendAll(vs) => {
            seq.append_all(vs.iter().cloned());
            model.extend(vs.iter().cloned());
        }
        Op::RemoveAt(i) => {
            seq.remove_at(*i)?;
            model.remove(*i);
        }
        Op::RemoveFirst => {
            seq.remove_first()?;
            model.remove(0);
        }
        Op::RemoveLast => {
            seq.remove_last()?;
            model.pop();
        }
        Op::RemoveAll => {
            seq.remove_all();
            model.clear();
        }
        Op::PopLast => {
            if seq.pop_last().is_some() {
                model.pop();
            }
        }
        Op::Replace(a, b, vs) => {
            seq.replace_range(*a..*b, vs.iter().cloned())?;
            model.splice(*a..*b, vs.iter().cloned());
        }
        Op::Set(i, v) => {
            seq.set(*i, v.clone())?;
            model[*i] = v.clone();
        }
    }
    Ok(())
}
