//! Matching criteria shared by filter, delete and reconcile

use std::fmt::{self, Debug, Formatter};

use evolve_value::{is_subtree, subtree_matches, Key, Value};

/// Entry predicate over `(key, value)`
pub type Predicate = Box<dyn Fn(&Key, &Value) -> bool>;

/// Pair predicate over `(old, fresh)`
pub type JoinPredicate = Box<dyn Fn(&Value, &Value) -> bool>;

/// Entry selection criterion for `where` and `remove`
///
/// - `All` matches every entry (the `true` sugar)
/// - `Nothing` matches no entry (the `false` sugar)
/// - `Pattern` matches entries that contain the pattern one level deep
///   (see [`is_subtree`]); a scalar pattern has no keys and matches
///   every entry
/// - `Predicate` calls a function with the key and the entry's value
pub enum Criterion {
    /// Match everything
    All,

    /// Match no entry
    Nothing,

    /// Match entries containing this pattern
    Pattern(Value),

    /// Match entries accepted by the function
    Predicate(Predicate),
}

impl Criterion {
    /// Criterion from a predicate function
    #[inline]
    #[must_use]
    pub fn by<F>(predicate: F) -> Self
    where
        F: Fn(&Key, &Value) -> bool + 'static,
    {
        Self::Predicate(Box::new(predicate))
    }

    /// Test one entry
    #[must_use]
    pub fn matches(&self, key: &Key, value: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Nothing => false,
            Self::Pattern(pattern) => is_subtree(value, pattern),
            Self::Predicate(predicate) => predicate(key, value),
        }
    }
}

impl Debug for Criterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Nothing => write!(f, "Nothing"),
            Self::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl From<bool> for Criterion {
    fn from(all: bool) -> Self {
        if all {
            Self::All
        } else {
            Self::Nothing
        }
    }
}

impl From<Value> for Criterion {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(all) => Self::from(all),
            pattern => Self::Pattern(pattern),
        }
    }
}

impl From<serde_json::Value> for Criterion {
    fn from(value: serde_json::Value) -> Self {
        Self::from(Value::from(value))
    }
}

/// Join criterion for `merge`
///
/// Decides whether an existing entry and an incoming entry describe the
/// same thing.
pub enum Join {
    /// Every pair matches
    All,

    /// Pattern tree for [`subtree_matches`], e.g. `{"id": true}`
    Pattern(Value),

    /// Function of `(old, fresh)`
    Predicate(JoinPredicate),
}

impl Join {
    /// Join from a predicate function
    #[inline]
    #[must_use]
    pub fn by<F>(predicate: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + 'static,
    {
        Self::Predicate(Box::new(predicate))
    }

    /// Test one `(old, fresh)` pair
    #[must_use]
    pub fn matches(&self, old: &Value, fresh: &Value) -> bool {
        match self {
            Self::All => true,
            Self::Pattern(pattern) => subtree_matches(old, fresh, pattern),
            Self::Predicate(predicate) => predicate(old, fresh),
        }
    }
}

impl Debug for Join {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

impl From<Value> for Join {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(true) => Self::All,
            pattern => Self::Pattern(pattern),
        }
    }
}

impl From<serde_json::Value> for Join {
    fn from(value: serde_json::Value) -> Self {
        Self::from(Value::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn criterion_all() {
        let c = Criterion::from(true);
        assert!(c.matches(&Key::from("a"), &Value::Null));
    }

    #[test]
    fn criterion_scalar_pattern_matches_everything() {
        let c = Criterion::from(json!(1));
        assert!(c.matches(&Key::from("a"), &Value::from(5)));
    }

    #[test]
    fn criterion_false_matches_nothing() {
        assert!(!Criterion::from(false).matches(&Key::Index(0), &Value::Null));
        assert!(!Criterion::from(json!(false)).matches(&Key::from("a"), &Value::from(false)));
        assert_eq!(format!("{:?}", Criterion::from(false)), "Nothing");
    }

    #[test]
    fn criterion_pattern() {
        let c = Criterion::from(json!({"a": 3}));
        assert!(c.matches(&Key::Index(2), &Value::from(json!({"a": 3, "b": 1}))));
        assert!(!c.matches(&Key::Index(0), &Value::from(json!({"a": 1}))));
    }

    #[test]
    fn criterion_predicate_sees_key_and_value() {
        let c = Criterion::by(|key, value| key > "a" && value.as_f64() == Some(2.0));
        assert!(c.matches(&Key::from("b"), &Value::from(2)));
        assert!(!c.matches(&Key::from("a"), &Value::from(2)));
        assert!(!c.matches(&Key::from("b"), &Value::from(3)));
    }

    #[test]
    fn join_pattern_and_predicate() {
        let by_id = Join::from(json!({"id": true}));
        let old = Value::from(json!({"id": 2, "amount": 2}));
        let fresh = Value::from(json!({"id": 2, "amount": 1}));
        assert!(by_id.matches(&old, &fresh));
        assert!(!by_id.matches(&old, &Value::from(json!({"id": 3}))));

        let by_fn = Join::by(|a, b| a.field("id") == b.field("id"));
        assert!(by_fn.matches(&old, &fresh));
        assert!(Join::from(json!(true)).matches(&Value::Null, &Value::Null));
    }

    #[test]
    fn debug_hides_closures() {
        assert_eq!(format!("{:?}", Criterion::by(|_, _| true)), "Predicate(..)");
        assert_eq!(format!("{:?}", Join::All), "All");
    }
}
