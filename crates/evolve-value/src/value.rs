//! The value model
//!
//! Provides [`Value`], a closed sum over scalars and the two container
//! kinds, [`Record`] and [`Sequence`].
//!
//! Containers are reference counted. Cloning a container shares it;
//! writing to a container goes through [`Arc::make_mut`], which copies
//! that one level if anyone else still holds it. Evolving a value
//! therefore never touches the caller's containers.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::error::ValueError;
use crate::key::{Key, MAX_INDEX};

/// A node of an evolvable tree
///
/// `Undefined` stands for "absent": a missing record entry, a hole read
/// back from a sequence, or an explicitly assigned absent value.
///
/// Equality is strict: a record holding `Undefined` under a name differs
/// from a record without that name, and a hole differs from an assigned
/// `Undefined`. Use [`crate::deep_equal`] for the loose comparison.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Undefined,

    /// Explicit null
    Null,

    /// Boolean scalar
    Bool(bool),

    /// Numeric scalar
    Number(f64),

    /// String scalar
    String(String),

    /// Ordered, index-addressed container (may contain holes)
    Sequence(Sequence),

    /// Insertion-ordered, name-addressed container
    Record(Record),
}

/// Container kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Name-addressed container
    Record,

    /// Index-addressed container
    Sequence,
}

impl Shape {
    /// Empty container of this kind
    #[inline]
    #[must_use]
    pub fn empty(self) -> Value {
        match self {
            Self::Record => Value::Record(Record::new()),
            Self::Sequence => Value::Sequence(Sequence::new()),
        }
    }
}

impl Value {
    /// Short name of the variant, for diagnostics
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Record(_) => "record",
        }
    }

    /// Container kind, if this is a container
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Option<Shape> {
        match self {
            Self::Record(_) => Some(Shape::Record),
            Self::Sequence(_) => Some(Shape::Sequence),
            _ => None,
        }
    }

    /// Check for `Undefined`
    #[inline]
    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Check for `Null`
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check for `Null` or `Undefined`
    #[inline]
    #[must_use]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Check for a record or a sequence
    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.shape().is_some()
    }

    /// Check for a record
    #[inline]
    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record(_))
    }

    /// Check for a sequence
    #[inline]
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence(_))
    }

    /// Truthiness: `false` for undefined, null, `false`, zero, NaN and the
    /// empty string, `true` for everything else including empty containers
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::String(s) => !s.is_empty(),
            Self::Sequence(_) | Self::Record(_) => true,
        }
    }

    /// Numeric view
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean view
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String view
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Record view
    #[inline]
    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Sequence view
    #[inline]
    #[must_use]
    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Self::Sequence(s) => Some(s),
            _ => None,
        }
    }

    /// Child at `key`
    ///
    /// `None` for missing entries, holes, unaddressable keys and scalars.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        match self {
            Self::Record(r) => r.get(&key.name()),
            Self::Sequence(s) => key.as_index().and_then(|i| s.get(i)),
            _ => None,
        }
    }

    /// Named child of a record
    #[inline]
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|r| r.get(name))
    }

    /// Child at `key`, `Undefined` when absent
    #[inline]
    #[must_use]
    pub fn get_or_undefined(&self, key: &Key) -> Value {
        self.get(key).cloned().unwrap_or_default()
    }

    /// Whether a present, non-`Undefined` child lives at `key`
    #[inline]
    #[must_use]
    pub fn has(&self, key: &Key) -> bool {
        self.get(key).is_some_and(|v| !v.is_undefined())
    }

    /// Assign a child, copying this level first if it is shared
    ///
    /// Assigning past the end of a sequence leaves holes in between.
    ///
    /// # Errors
    /// - [`ValueError::NotAContainer`] on scalars
    /// - [`ValueError::NonIndexKey`] for a non-numeric name on a sequence
    /// - [`ValueError::IndexOutOfRange`] for a slot past [`MAX_INDEX`]
    pub fn set(&mut self, key: &Key, value: Value) -> Result<(), ValueError> {
        match self {
            Self::Record(r) => {
                r.insert(key.name().into_owned(), value);
                Ok(())
            }
            Self::Sequence(s) => {
                let index = key
                    .as_index()
                    .ok_or_else(|| ValueError::NonIndexKey(key.to_string()))?;
                s.set(index, value)
            }
            other => Err(ValueError::NotAContainer(other.type_name())),
        }
    }

    /// Replace `Undefined` with `Null`
    #[inline]
    #[must_use]
    pub fn or_null(self) -> Self {
        if self.is_undefined() {
            Self::Null
        } else {
            self
        }
    }

    /// Check whether two values share the same top-level container
    ///
    /// Always `false` for scalars.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Record(a), Self::Record(b)) => a.ptr_eq(b),
            (Self::Sequence(a), Self::Sequence(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    /// Parse from a JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid
    #[inline]
    pub fn from_json_str(json: &str) -> Result<Self, ValueError> {
        let value: JsonValue = serde_json::from_str(json)?;
        Ok(Self::from(value))
    }

    /// Parse from a YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid
    #[inline]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ValueError> {
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Ok(Self::from(value))
    }

    /// Serialize to a compact JSON string
    ///
    /// # Errors
    /// Returns error if serialization fails (rare for JSON)
    #[inline]
    pub fn to_json_string(&self) -> Result<String, ValueError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Insertion-ordered record of named values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Arc<IndexMap<String, Value>>);

impl Record {
    /// Create an empty record
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(IndexMap::new()))
    }

    /// Entry by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Check for an entry (including `Undefined` entries)
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Insert or overwrite an entry, keeping its position if present
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        Arc::make_mut(&mut self.0).insert(name.into(), value);
    }

    /// Builder form of [`Record::insert`]
    #[inline]
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entry names in insertion order
    #[inline]
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// New top-level record sharing every child with this one
    #[inline]
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        Self(Arc::new((*self.0).clone()))
    }

    /// Check whether both records are the same allocation
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(Arc::new(
            iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        ))
    }
}

/// Ordered sequence of slots
///
/// A slot is either a value or a hole. Holes are what is left behind
/// when a value is assigned past the end; they are skipped by key
/// enumeration and read back as `Undefined`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sequence(Arc<Vec<Option<Value>>>);

impl Sequence {
    /// Create an empty sequence
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(Vec::new()))
    }

    /// Create a sequence from raw slots (`None` is a hole)
    #[inline]
    #[must_use]
    pub fn from_slots(slots: Vec<Option<Value>>) -> Self {
        Self(Arc::new(slots))
    }

    /// Create a sequence of `len` holes
    #[inline]
    #[must_use]
    pub fn holes(len: usize) -> Self {
        Self(Arc::new(vec![None; len]))
    }

    /// Number of slots, holes included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no slots
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index` (`None` for holes and out-of-range)
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Check whether `index` is a hole inside the sequence
    #[inline]
    #[must_use]
    pub fn is_hole(&self, index: usize) -> bool {
        matches!(self.0.get(index), Some(None))
    }

    /// Check whether `index` holds a value
    #[inline]
    #[must_use]
    pub fn is_occupied(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Raw slots
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Option<Value>] {
        &self.0
    }

    /// Present values with their indices, holes skipped
    #[inline]
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|v| (i, v)))
    }

    /// Assign `index`, padding with holes when it lies past the end
    ///
    /// # Errors
    /// Returns [`ValueError::IndexOutOfRange`] past [`MAX_INDEX`] or when
    /// the padding cannot be allocated.
    pub fn set(&mut self, index: usize, value: Value) -> Result<(), ValueError> {
        if index > MAX_INDEX {
            return Err(ValueError::IndexOutOfRange(index));
        }
        let slots = Arc::make_mut(&mut self.0);
        if index >= slots.len() {
            slots
                .try_reserve(index + 1 - slots.len())
                .map_err(|_| ValueError::IndexOutOfRange(index))?;
            slots.resize(index + 1, None);
        }
        slots[index] = Some(value);
        Ok(())
    }

    /// Append a value
    #[inline]
    pub fn push(&mut self, value: Value) {
        Arc::make_mut(&mut self.0).push(Some(value));
    }

    /// Append every slot of `other`, holes included
    #[inline]
    pub fn extend_from(&mut self, other: &Sequence) {
        Arc::make_mut(&mut self.0).extend(other.0.iter().cloned());
    }

    /// New top-level sequence sharing every child with this one
    #[inline]
    #[must_use]
    pub fn shallow_copy(&self) -> Self {
        Self(Arc::new((*self.0).clone()))
    }

    /// Check whether both sequences are the same allocation
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<V: Into<Value>> FromIterator<V> for Sequence {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().map(|v| Some(v.into())).collect()))
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            other => write!(f, "{}", JsonValue::from(other)),
        }
    }
}

// Conversions

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(r)
    }
}

impl From<Sequence> for Value {
    fn from(s: Sequence) -> Self {
        Self::Sequence(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Sequence(values.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<&Key> for Value {
    fn from(key: &Key) -> Self {
        match key {
            Key::Index(i) => Self::from(*i),
            Key::Name(n) => Self::String(n.clone()),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::Bool(b),
            JsonValue::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Self::String(s),
            JsonValue::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            JsonValue::Object(map) => {
                Self::Record(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for JsonValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Undefined | Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Sequence(seq) => JsonValue::Array(
                seq.slots()
                    .iter()
                    .map(|slot| slot.as_ref().map_or(JsonValue::Null, JsonValue::from))
                    .collect(),
            ),
            Value::Record(rec) => JsonValue::Object(
                rec.iter()
                    .filter(|(_, v)| !v.is_undefined())
                    .map(|(k, v)| (k.to_string(), JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        JsonValue::from(&value)
    }
}

/// Integral numbers keep an integer JSON representation
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn number_to_json(n: f64) -> JsonValue {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < (1u64 << 53) as f64 {
        JsonValue::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(JsonValue::Null, JsonValue::Number)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        JsonValue::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonValue::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_from_json_keeps_order() {
        let v = Value::from(json!({"b": 1, "a": [1, null]}));
        let names: Vec<_> = v.as_record().unwrap().names().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(
            v.field("a").unwrap().as_sequence().unwrap().get(1),
            Some(&Value::Null)
        );
    }

    #[test]
    fn value_truthiness() {
        assert!(!Value::Undefined.is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(Value::Record(Record::new()).is_truthy());
        assert!(Value::Sequence(Sequence::new()).is_truthy());
    }

    #[test]
    fn sequence_set_leaves_holes() {
        let mut seq = Sequence::new();
        seq.set(2, Value::from(2)).unwrap();
        assert_eq!(seq.len(), 3);
        assert!(seq.is_hole(0));
        assert!(seq.is_hole(1));
        assert!(!seq.is_hole(2));
        assert_eq!(seq.get(2), Some(&Value::from(2)));
        assert_eq!(seq.get(0), None);

        let mut expected = Sequence::holes(2);
        expected.push(Value::from(2));
        assert_eq!(seq, expected);
    }

    #[test]
    fn hole_differs_from_assigned_undefined() {
        let holes = Sequence::from_slots(vec![None]);
        let undefined = Sequence::from_slots(vec![Some(Value::Undefined)]);
        assert_ne!(holes, undefined);
        assert!(holes.is_hole(0));
        assert!(!undefined.is_hole(0));
    }

    #[test]
    fn record_write_copies_shared_level() {
        let original = Record::new().with("a", 1);
        let mut copy = original.clone();
        assert!(copy.ptr_eq(&original));

        copy.insert("a", Value::from(2));
        assert!(!copy.ptr_eq(&original));
        assert_eq!(original.get("a"), Some(&Value::from(1)));
        assert_eq!(copy.get("a"), Some(&Value::from(2)));
    }

    #[test]
    fn record_shallow_copy_shares_children() {
        let inner = Value::Record(Record::new().with("x", 1));
        let outer = Record::new().with("inner", inner);
        let copy = outer.shallow_copy();

        assert!(!copy.ptr_eq(&outer));
        assert!(copy.get("inner").unwrap().ptr_eq(outer.get("inner").unwrap()));
    }

    #[test]
    fn value_set_by_key() {
        let mut rec = Value::Record(Record::new());
        rec.set(&Key::Index(1), Value::from("one")).unwrap();
        assert_eq!(rec.field("1"), Some(&Value::from("one")));

        let mut seq = Value::Sequence(Sequence::new());
        seq.set(&Key::from("1"), Value::from(true)).unwrap();
        assert!(seq.as_sequence().unwrap().is_hole(0));

        assert!(matches!(
            seq.set(&Key::from("x"), Value::Null),
            Err(ValueError::NonIndexKey(_))
        ));
        assert!(matches!(
            Value::from(1).set(&Key::from("a"), Value::Null),
            Err(ValueError::NotAContainer("number"))
        ));
    }

    #[test]
    fn sequence_set_rejects_out_of_range() {
        let mut seq = Sequence::new();
        assert!(matches!(
            seq.set(MAX_INDEX + 1, Value::Null),
            Err(ValueError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            seq.set(usize::MAX, Value::Null),
            Err(ValueError::IndexOutOfRange(usize::MAX))
        ));
        assert!(seq.is_empty());

        let mut seq = Value::Sequence(seq);
        assert!(matches!(
            seq.set(&Key::Index(usize::MAX), Value::Null),
            Err(ValueError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            seq.set(&Key::from("18446744073709551615"), Value::Null),
            Err(ValueError::NonIndexKey(_))
        ));

        let mut rec = Value::Record(Record::new());
        rec.set(&Key::Index(usize::MAX), Value::from(1)).unwrap();
        assert_eq!(rec.field("18446744073709551615"), Some(&Value::from(1)));
    }

    #[test]
    fn sequence_extend_keeps_holes() {
        let mut seq: Sequence = [1].into_iter().collect();
        seq.extend_from(&Sequence::from_slots(vec![None, Some(Value::from(2))]));
        assert_eq!(seq.len(), 3);
        assert!(seq.is_hole(1));
        assert_eq!(seq.get(2), Some(&Value::from(2)));
    }

    #[test]
    fn value_nullish_and_bool() {
        assert!(Value::Null.is_nullish());
        assert!(Value::Undefined.is_nullish());
        assert!(!Value::from(false).is_nullish());
        assert_eq!(Value::from(false).as_bool(), Some(false));
        assert_eq!(Value::from(0).as_bool(), None);
    }

    #[test]
    fn value_to_json_drops_undefined_entries() {
        let rec = Record::new().with("a", 1).with("b", Value::Undefined);
        let seq = Sequence::from_slots(vec![None, Some(Value::from(1.5))]);
        let v = Value::Sequence(Sequence::from_iter([Value::Record(rec), Value::Sequence(seq)]));

        assert_eq!(JsonValue::from(&v), json!([{"a": 1}, [null, 1.5]]));
        assert_eq!(v.to_json_string().unwrap(), r#"[{"a":1},[null,1.5]]"#);
    }

    #[test]
    fn value_from_yaml() {
        let v = Value::from_yaml_str("a: 1\nb:\n  - x\n  - y\n").unwrap();
        assert_eq!(v, Value::from(json!({"a": 1, "b": ["x", "y"]})));
    }

    #[test]
    fn value_from_invalid_json() {
        assert!(matches!(
            Value::from_json_str("{nope"),
            Err(ValueError::Json(_))
        ));
    }

    #[test]
    fn value_deserialize_roundtrip() {
        let v: Value = serde_json::from_str(r#"{"k": [1, "two", false]}"#).unwrap();
        assert_eq!(v, Value::from(json!({"k": [1, "two", false]})));
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::from(json!({"a": [1, 2]})).to_string(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn value_or_null() {
        assert_eq!(Value::Undefined.or_null(), Value::Null);
        assert_eq!(Value::from(0).or_null(), Value::from(0));
    }
}
