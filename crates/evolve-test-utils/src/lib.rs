//! Testing utilities for the evolve workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use evolve_core::{Change, EvolveError, Evolver};
use evolve_value::{Record, Sequence, Value};
use tracing_subscriber::EnvFilter;

/// Build a [`Value`] from a `serde_json::json!` literal
pub fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

/// Copy every level of `value`, so nothing is shared with the original
pub fn deep_copy(value: &Value) -> Value {
    match value {
        Value::Record(record) => Value::Record(
            record
                .iter()
                .map(|(name, child)| (name, deep_copy(child)))
                .collect::<Record>(),
        ),
        Value::Sequence(sequence) => Value::Sequence(Sequence::from_slots(
            sequence
                .slots()
                .iter()
                .map(|slot| slot.as_ref().map(deep_copy))
                .collect(),
        )),
        scalar => scalar.clone(),
    }
}

/// Evolve and assert that the input was left untouched
///
/// # Panics
/// Panics if `value` differs from its snapshot after the call.
pub fn evolve_checked(
    evolver: &mut Evolver,
    value: &Value,
    change: impl Into<Change>,
) -> Result<Value, EvolveError> {
    let snapshot = deep_copy(value);
    let result = evolver.evolve(value, change);
    assert_eq!(value, &snapshot, "evolve mutated its input");
    result
}

/// Install a test subscriber honouring `RUST_LOG` (once per process)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn users() -> Value {
    v(serde_json::json!([
        {"id": 1, "is_online": false},
        {"id": 2, "is_online": true},
        {"id": 3, "is_online": false},
    ]))
}

pub fn shopping_cart() -> Value {
    v(serde_json::json!([{"id": 1, "amount": 1}, {"id": 2, "amount": 2}]))
}

pub fn added_to_cart() -> Value {
    v(serde_json::json!([{"id": 2, "amount": 1}, {"id": 3, "amount": 3}]))
}

pub fn were_logged_in() -> Value {
    v(serde_json::json!([
        {"id": 1, "last_seen": 1, "session_reference": "lorem"},
        {"id": 2, "last_seen": 1},
    ]))
}

pub fn currently_logged_in() -> Value {
    v(serde_json::json!([{"id": 1}, {"id": 3}, {"id": 4}]))
}
