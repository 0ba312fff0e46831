//! Structural utilities
//!
//! Container-kind-aware primitives the evolution engine is built on:
//! key enumeration, shallow copy, subset extraction, literal
//! classification, deep equality and subtree pattern matching.

use crate::error::ValueError;
use crate::key::Key;
use crate::value::{Record, Sequence, Value};

/// Keys of a container
///
/// Record names in insertion order, or the indices of occupied sequence
/// slots (holes are skipped). Scalars have no keys.
#[must_use]
pub fn enumerate_keys(value: &Value) -> Vec<Key> {
    match value {
        Value::Record(r) => r.names().map(Key::from).collect(),
        Value::Sequence(s) => s.entries().map(|(i, _)| Key::Index(i)).collect(),
        _ => Vec::new(),
    }
}

/// New top-level container with the same bindings; scalars pass through
#[inline]
#[must_use]
pub fn shallow_copy(value: &Value) -> Value {
    match value {
        Value::Record(r) => Value::Record(r.shallow_copy()),
        Value::Sequence(s) => Value::Sequence(s.shallow_copy()),
        scalar => scalar.clone(),
    }
}

/// Container of the same kind holding only `keys`
///
/// Records keep the given names (absent ones become `Undefined`).
/// Sequences are re-packed: the selected values are laid out densely in
/// the order of `keys`.
///
/// # Errors
/// Returns [`ValueError::NotAContainer`] for scalars.
pub fn extract_subset(value: &Value, keys: &[Key]) -> Result<Value, ValueError> {
    match value {
        Value::Record(_) => Ok(Value::Record(
            keys.iter()
                .map(|k| (k.name().into_owned(), value.get_or_undefined(k)))
                .collect::<Record>(),
        )),
        Value::Sequence(_) => Ok(Value::Sequence(
            keys.iter()
                .map(|k| value.get_or_undefined(k))
                .collect::<Sequence>(),
        )),
        scalar => Err(ValueError::NotAContainer(scalar.type_name())),
    }
}

/// Whether a value is opaque to structural descent
///
/// Everything except a record is literal: scalars, null, undefined and
/// sequences. A change descriptor that is a sequence replaces its target
/// wholesale rather than being indexed.
#[inline]
#[must_use]
pub fn is_literal(value: &Value) -> bool {
    !value.is_record()
}

/// Loose structural equality
///
/// - scalars compare by value (NaN never equals itself)
/// - sequences compare element-wise and must have equal length; a hole
///   equals an `Undefined` slot
/// - records compare over the union of both key sets, a missing entry
///   reading as `Undefined`
/// - containers of different kinds are never equal
#[must_use]
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Record(x), Value::Record(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let undefined = Value::Undefined;
            x.names()
                .chain(y.names().filter(|n| !x.contains(n)))
                .all(|name| {
                    deep_equal(
                        x.get(name).unwrap_or(&undefined),
                        y.get(name).unwrap_or(&undefined),
                    )
                })
        }
        (Value::Sequence(x), Value::Sequence(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            x.len() == y.len()
                && x.slots().iter().zip(y.slots()).all(|(l, r)| {
                    let undefined = Value::Undefined;
                    deep_equal(
                        l.as_ref().unwrap_or(&undefined),
                        r.as_ref().unwrap_or(&undefined),
                    )
                })
        }
        (Value::Record(_) | Value::Sequence(_), _) | (_, Value::Record(_) | Value::Sequence(_)) => {
            false
        }
        (x, y) => x == y,
    }
}

/// One-level containment test
///
/// True iff every key of `pattern` is present (not `Undefined`) in
/// `container` and deep-equals the pattern's value there. A scalar or
/// empty pattern has no keys and matches anything.
#[must_use]
pub fn is_subtree(container: &Value, pattern: &Value) -> bool {
    enumerate_keys(pattern).iter().all(|key| {
        match (container.get(key), pattern.get(key)) {
            (Some(found), Some(expected)) if !found.is_undefined() => deep_equal(found, expected),
            _ => false,
        }
    })
}

/// Recursive matcher driven by a pattern tree
///
/// For every key of `pattern`:
/// - a `true` leaf requires `a[key]` and `b[key]` to be deep-equal
/// - any other value requires both `a[key]` and `b[key]` to be present,
///   then recurses with that value as the pattern
///
/// Stops at the first mismatch. A pattern with no keys (empty container
/// or scalar) matches vacuously.
#[must_use]
pub fn subtree_matches(a: &Value, b: &Value, pattern: &Value) -> bool {
    let undefined = Value::Undefined;
    for key in enumerate_keys(pattern) {
        let Some(sub_pattern) = pattern.get(&key) else {
            continue;
        };
        let left = a.get(&key).unwrap_or(&undefined);
        let right = b.get(&key).unwrap_or(&undefined);

        if matches!(sub_pattern, Value::Bool(true)) {
            if !deep_equal(left, right) {
                return false;
            }
            continue;
        }

        if left.is_undefined() || right.is_undefined() {
            return false;
        }
        if !subtree_matches(left, right, sub_pattern) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn enumerate_record_keys_in_order() {
        let keys = enumerate_keys(&v(json!({"z": 1, "a": 2})));
        assert_eq!(keys, vec![Key::from("z"), Key::from("a")]);
    }

    #[test]
    fn enumerate_sequence_skips_holes() {
        let seq = Value::Sequence(Sequence::from_slots(vec![
            Some(Value::from(1)),
            None,
            Some(Value::Undefined),
        ]));
        assert_eq!(enumerate_keys(&seq), vec![Key::Index(0), Key::Index(2)]);
    }

    #[test]
    fn enumerate_scalar_is_empty() {
        assert!(enumerate_keys(&Value::from(5)).is_empty());
        assert!(enumerate_keys(&Value::Null).is_empty());
    }

    #[test]
    fn shallow_copy_is_new_top_level() {
        let original = v(json!({"a": {"b": 1}}));
        let copy = shallow_copy(&original);
        assert_eq!(copy, original);
        assert!(!copy.ptr_eq(&original));
        assert!(copy.field("a").unwrap().ptr_eq(original.field("a").unwrap()));
    }

    #[test]
    fn shallow_copy_scalar_passes_through() {
        assert_eq!(shallow_copy(&Value::from("s")), Value::from("s"));
    }

    #[test]
    fn extract_subset_record() {
        let subset = extract_subset(&v(json!({"a": 1, "b": 2, "c": 3})), &[
            Key::from("c"),
            Key::from("a"),
        ])
        .unwrap();
        assert_eq!(subset, v(json!({"c": 3, "a": 1})));
    }

    #[test]
    fn extract_subset_sequence_repacks() {
        let subset =
            extract_subset(&v(json!([10, 20, 30])), &[Key::Index(0), Key::Index(2)]).unwrap();
        assert_eq!(subset, v(json!([10, 30])));
    }

    #[test]
    fn extract_subset_scalar_fails() {
        assert!(extract_subset(&Value::from(1), &[]).is_err());
    }

    #[test]
    fn literal_classification() {
        assert!(is_literal(&Value::from(1)));
        assert!(is_literal(&Value::Null));
        assert!(is_literal(&Value::Undefined));
        assert!(is_literal(&v(json!([1, 2]))));
        assert!(!is_literal(&v(json!({}))));
    }

    #[test]
    fn deep_equal_records_over_key_union() {
        let with_undefined = Value::Record(Record::new().with("a", 1).with("b", Value::Undefined));
        let without = v(json!({"a": 1}));
        assert!(deep_equal(&with_undefined, &without));
        assert!(deep_equal(&without, &with_undefined));
        assert!(!deep_equal(&v(json!({"a": 1})), &v(json!({"a": 2}))));
    }

    #[test]
    fn deep_equal_sequences() {
        assert!(deep_equal(&v(json!([1, [2, {"f": 8}]])), &v(json!([1, [2, {"f": 8}]]))));
        assert!(!deep_equal(&v(json!([1, 2])), &v(json!([1, 2, 3]))));
        let hole = Value::Sequence(Sequence::from_slots(vec![None]));
        let undefined = Value::Sequence(Sequence::from_slots(vec![Some(Value::Undefined)]));
        assert!(deep_equal(&hole, &undefined));
    }

    #[test]
    fn deep_equal_kind_mismatch() {
        assert!(!deep_equal(&v(json!([])), &v(json!({}))));
        assert!(!deep_equal(&Value::Null, &v(json!({}))));
        assert!(!deep_equal(&Value::from(1), &Value::from("1")));
        assert!(!deep_equal(&Value::Null, &Value::Undefined));
    }

    #[test]
    fn is_subtree_matches_present_keys() {
        let item = v(json!({"a": {"c": 6}, "b": 2, "e": 7}));
        assert!(is_subtree(&item, &v(json!({"a": {"c": 6}, "e": 7}))));
        assert!(!is_subtree(&item, &v(json!({"a": {"c": 6}, "e": 8}))));
        assert!(!is_subtree(&item, &v(json!({"missing": 1}))));
    }

    #[test]
    fn is_subtree_uses_existence_not_truthiness() {
        assert!(is_subtree(&v(json!({"n": 0})), &v(json!({"n": 0}))));
    }

    #[test]
    fn is_subtree_scalar_pattern_is_vacuous() {
        assert!(is_subtree(&Value::from(3), &Value::from(1)));
        assert!(is_subtree(&v(json!({"a": 1})), &v(json!({}))));
    }

    #[test]
    fn is_subtree_scalar_container_fails_keyed_pattern() {
        assert!(!is_subtree(&Value::from(3), &v(json!({"a": 1}))));
    }

    #[test]
    fn subtree_matches_true_leaf() {
        let pattern = v(json!({"id": true}));
        assert!(subtree_matches(&v(json!({"id": 2, "a": 1})), &v(json!({"id": 2, "a": 9})), &pattern));
        assert!(!subtree_matches(&v(json!({"id": 1})), &v(json!({"id": 2})), &pattern));
    }

    #[test]
    fn subtree_matches_checks_every_true_leaf() {
        let pattern = v(json!({"id": true, "kind": true}));
        let a = v(json!({"id": 1, "kind": "x"}));
        let b = v(json!({"id": 1, "kind": "y"}));
        assert!(!subtree_matches(&a, &b, &pattern));
    }

    #[test]
    fn subtree_matches_nested() {
        let pattern = v(json!({"user": {"id": true}}));
        let a = v(json!({"user": {"id": 5, "name": "a"}}));
        let b = v(json!({"user": {"id": 5, "name": "b"}}));
        let c = v(json!({"user": {"id": 6}}));
        assert!(subtree_matches(&a, &b, &pattern));
        assert!(!subtree_matches(&a, &c, &pattern));
        assert!(!subtree_matches(&a, &v(json!({})), &pattern));
    }

    #[test]
    fn subtree_matches_without_true_leaf_is_vacuous_when_present() {
        let pattern = v(json!({"user": {}}));
        assert!(subtree_matches(&v(json!({"user": 1})), &v(json!({"user": 2})), &pattern));
        assert!(!subtree_matches(&v(json!({"user": 1})), &v(json!({})), &pattern));
    }

    #[test]
    fn subtree_matches_empty_pattern() {
        assert!(subtree_matches(&Value::from(1), &Value::from(2), &v(json!({}))));
    }
}
