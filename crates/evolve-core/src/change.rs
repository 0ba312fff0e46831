//! Change descriptors
//!
//! A [`Change`] says what to do with a value: keep it, replace it, run a
//! routine on it, descend into it key by key, or apply several changes
//! in order.

use evolve_routine::Handle;
use evolve_value::{Key, Record, Sequence, Shape, Value};

/// Change descriptor node
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Change {
    /// Leave the value as it is (a shallow copy is still returned)
    #[default]
    Keep,

    /// Replace the value wholesale
    ///
    /// A literal sequence handed straight to `Evolver::evolve` is the
    /// exception: it runs as a [`Change::Chain`] of its elements.
    Literal(Value),

    /// Descend into the value, one selector at a time
    Keys(ChangeMap),

    /// Run a registered routine in value position
    Routine(Handle),

    /// Apply each change to the result of the previous one
    Chain(Vec<Change>),
}

impl Change {
    /// Sequential composition of `changes`
    #[must_use]
    pub fn chain<I, C>(changes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Change>,
    {
        Self::Chain(changes.into_iter().map(Into::into).collect())
    }

    /// Check whether this is the identity change
    #[inline]
    #[must_use]
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Check whether this change replaces its subject without looking at it
    #[inline]
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Number of top-level steps this change applies
    #[inline]
    #[must_use]
    pub fn steps(&self) -> usize {
        match self {
            Self::Chain(changes) => changes.len(),
            _ => 1,
        }
    }
}

impl From<Value> for Change {
    fn from(value: Value) -> Self {
        match value {
            Value::Undefined => Self::Keep,
            Value::Record(record) => Self::Keys(ChangeMap::from(record)),
            literal => Self::Literal(literal),
        }
    }
}

impl From<&Value> for Change {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<serde_json::Value> for Change {
    fn from(value: serde_json::Value) -> Self {
        Self::from(Value::from(value))
    }
}

impl From<Handle> for Change {
    fn from(handle: Handle) -> Self {
        Self::Routine(handle)
    }
}

impl From<&Handle> for Change {
    fn from(handle: &Handle) -> Self {
        Self::Routine(handle.clone())
    }
}

impl From<ChangeMap> for Change {
    fn from(map: ChangeMap) -> Self {
        Self::Keys(map)
    }
}

impl From<Vec<Change>> for Change {
    fn from(changes: Vec<Change>) -> Self {
        Self::Chain(changes)
    }
}

impl From<Record> for Change {
    fn from(record: Record) -> Self {
        Self::Keys(ChangeMap::from(record))
    }
}

impl From<Sequence> for Change {
    fn from(sequence: Sequence) -> Self {
        Self::Literal(Value::Sequence(sequence))
    }
}

macro_rules! literal_change {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Change {
                fn from(value: $ty) -> Self {
                    Self::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_change!(bool, f64, i32, u32, i64, usize, &str, String);

/// Key position of a [`ChangeMap`] entry
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Plain key of the subject
    Key(Key),

    /// Routine resolved in key position
    Routine(Handle),
}

impl Selector {
    fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Key(a), Self::Key(b)) => a.same_entry(b),
            (Self::Routine(a), Self::Routine(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Key> for Selector {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

impl From<&str> for Selector {
    fn from(name: &str) -> Self {
        Self::Key(Key::from(name))
    }
}

impl From<String> for Selector {
    fn from(name: String) -> Self {
        Self::Key(Key::from(name))
    }
}

impl From<usize> for Selector {
    fn from(index: usize) -> Self {
        Self::Key(Key::Index(index))
    }
}

impl From<i32> for Selector {
    fn from(index: i32) -> Self {
        match usize::try_from(index) {
            Ok(index) => Self::Key(Key::Index(index)),
            Err(_) => Self::Key(Key::Name(index.to_string())),
        }
    }
}

impl From<Handle> for Selector {
    fn from(handle: Handle) -> Self {
        Self::Routine(handle)
    }
}

impl From<&Handle> for Selector {
    fn from(handle: &Handle) -> Self {
        Self::Routine(handle.clone())
    }
}

/// Insertion-ordered map from [`Selector`] to [`Change`]
///
/// Entries apply in order to the same evolving subject, so a later entry
/// sees what earlier ones wrote. The shape picks the empty container a
/// scalar subject is replaced with before descending.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeMap {
    shape: Shape,
    entries: Vec<(Selector, Change)>,
}

impl Default for ChangeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeMap {
    /// Create an empty record-shaped map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            shape: Shape::Record,
            entries: Vec::new(),
        }
    }

    /// Create an empty sequence-shaped map
    #[inline]
    #[must_use]
    pub fn sequence() -> Self {
        Self {
            shape: Shape::Sequence,
            entries: Vec::new(),
        }
    }

    /// Add an entry (builder style)
    #[inline]
    #[must_use]
    pub fn with(mut self, selector: impl Into<Selector>, change: impl Into<Change>) -> Self {
        self.insert(selector, change);
        self
    }

    /// Add an entry, replacing the change of an equal selector in place
    pub fn insert(&mut self, selector: impl Into<Selector>, change: impl Into<Change>) {
        let selector = selector.into();
        let change = change.into();
        match self.entries.iter_mut().find(|(s, _)| s.same_as(&selector)) {
            Some((_, existing)) => *existing = change,
            None => self.entries.push((selector, change)),
        }
    }

    /// Default container kind
    #[inline]
    #[must_use]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in application order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&Selector, &Change)> {
        self.entries.iter().map(|(s, c)| (s, c))
    }
}

impl From<Record> for ChangeMap {
    fn from(record: Record) -> Self {
        let mut map = Self::new();
        for (name, value) in record.iter() {
            map.insert(name, value);
        }
        map
    }
}

impl<S: Into<Selector>, C: Into<Change>> FromIterator<(S, C)> for ChangeMap {
    fn from_iter<I: IntoIterator<Item = (S, C)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (selector, change) in iter {
            map.insert(selector, change);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evolve_routine::{Criterion, Delete, Filter, RoutineRegistry};
    use serde_json::json;

    #[test]
    fn record_becomes_keys_recursively() {
        let change = Change::from(json!({"a": {"b": 1}, "c": [1, 2]}));
        let Change::Keys(map) = change else {
            panic!("expected a key map");
        };
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries.len(), 2);
        assert!(matches!(entries[0].1, Change::Keys(_)));
        assert!(entries[1].1.is_literal());
    }

    #[test]
    fn scalars_and_sequences_are_literal() {
        assert!(Change::from(2).is_literal());
        assert!(Change::from(json!(null)).is_literal());
        assert!(Change::from(json!([1, 2])).is_literal());
        assert!(Change::from(Value::Undefined).is_keep());
    }

    #[test]
    fn insert_replaces_same_entry() {
        let map = ChangeMap::new().with("1", 1).with(1, 2).with("b", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next().map(|(_, c)| c), Some(&Change::from(2)));
    }

    #[test]
    fn handles_are_distinct_selectors() {
        let mut registry = RoutineRegistry::new();
        let a = registry.register(Filter::new(Criterion::All));
        let b = registry.register(Delete::all());
        let map = ChangeMap::new().with(&a, 1).with(&b, 2).with(&a, 3);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn shapes() {
        assert_eq!(ChangeMap::new().shape(), Shape::Record);
        assert_eq!(ChangeMap::sequence().shape(), Shape::Sequence);
        assert!(ChangeMap::default().is_empty());
    }

    #[test]
    fn chain_counts_steps() {
        let change = Change::chain([Change::Keep, Change::from(1)]);
        assert_eq!(change.steps(), 2);
        assert_eq!(Change::from(1).steps(), 1);
    }
}
