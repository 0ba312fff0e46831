//! Reconcile routine (`merge`)
//!
//! Pairs every existing entry with the incoming entry it corresponds to,
//! producing `{old, fresh}` records for a following transform to fold.

use evolve_value::{enumerate_keys, Key, Record, Value};

use crate::criterion::Join;
use crate::error::RoutineError;
use crate::routine::{KeySet, Routine, RoutineKind};

/// Name of the existing half of a merge pair
pub const OLD: &str = "old";

/// Name of the incoming half of a merge pair
pub const FRESH: &str = "fresh";

/// Typed view of an `{old, fresh}` record
///
/// A side that has no counterpart is `Null`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergePair {
    /// Existing value
    pub old: Value,

    /// Incoming value
    pub fresh: Value,
}

impl MergePair {
    /// Create a pair, turning `Undefined` sides into `Null`
    #[inline]
    #[must_use]
    pub fn new(old: Value, fresh: Value) -> Self {
        Self {
            old: old.or_null(),
            fresh: fresh.or_null(),
        }
    }

    /// Encode as an `{old, fresh}` record
    #[inline]
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Record(Record::new().with(OLD, self.old).with(FRESH, self.fresh))
    }
}

impl From<MergePair> for Value {
    fn from(pair: MergePair) -> Self {
        pair.into_value()
    }
}

impl TryFrom<Value> for MergePair {
    type Error = RoutineError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match &value {
            Value::Record(record) if record.contains(OLD) || record.contains(FRESH) => Ok(Self::new(
                record.get(OLD).cloned().unwrap_or_default(),
                record.get(FRESH).cloned().unwrap_or_default(),
            )),
            _ => Err(RoutineError::invalid_parameter(
                RoutineKind::Reconcile,
                format!("expected an {{old, fresh}} pair, got {value}"),
            )),
        }
    }
}

/// Reconcile a container with incoming entries
///
/// Without a join the two sides are zipped by key: every key present on
/// either side maps to `{old: subject[key], fresh: incoming[key]}`.
///
/// With a [`Join`], every existing entry is paired with the first
/// incoming entry it matches (or with `null`). Incoming entries that
/// matched nothing are then added as `{old: null, fresh}`: appended to
/// a sequence, or stored under their own key in a record when that key
/// is free.
///
/// In key position the subject is rebuilt and all of its keys are
/// selected, so the descriptor's value is applied to every pair.
#[derive(Debug)]
pub struct Reconcile {
    incoming: Value,
    join: Option<Join>,
}

impl Reconcile {
    /// Create a key-aligned reconcile
    #[inline]
    #[must_use]
    pub fn new(incoming: Value) -> Self {
        Self {
            incoming,
            join: None,
        }
    }

    /// Create a reconcile that pairs entries by `join`
    #[inline]
    #[must_use]
    pub fn with_join(incoming: Value, join: Join) -> Self {
        Self {
            incoming,
            join: Some(join),
        }
    }

    /// Captured incoming entries
    #[inline]
    #[must_use]
    pub fn incoming(&self) -> &Value {
        &self.incoming
    }

    /// Captured join criterion
    #[inline]
    #[must_use]
    pub fn join(&self) -> Option<&Join> {
        self.join.as_ref()
    }

    /// Rebuild `subject` as a container of merge pairs
    ///
    /// # Errors
    /// Returns error if either side is not a container, or if record keys
    /// are zipped into a sequence.
    pub fn reconcile(&self, subject: Value) -> Result<Value, RoutineError> {
        if !subject.is_container() {
            return Err(RoutineError::unsupported_shape(RoutineKind::Reconcile, &subject));
        }
        if !self.incoming.is_container() {
            return Err(RoutineError::invalid_parameter(
                RoutineKind::Reconcile,
                format!("incoming entries must be a container, got {}", self.incoming.type_name()),
            ));
        }
        match &self.join {
            None => self.zip_by_key(subject),
            Some(join) => self.pair_by_join(subject, join),
        }
    }

    fn zip_by_key(&self, subject: Value) -> Result<Value, RoutineError> {
        let mut keys = enumerate_keys(&subject);
        for key in enumerate_keys(&self.incoming) {
            if !keys.iter().any(|k| k.same_entry(&key)) {
                keys.push(key);
            }
        }

        let mut out = subject.clone();
        for key in &keys {
            let pair = MergePair::new(
                subject.get_or_undefined(key),
                self.incoming.get_or_undefined(key),
            );
            out.set(key, pair.into_value())?;
        }
        Ok(out)
    }

    fn pair_by_join(&self, subject: Value, join: &Join) -> Result<Value, RoutineError> {
        let incoming_keys = enumerate_keys(&self.incoming);
        let mut unmatched = vec![true; incoming_keys.len()];
        let mut out = subject.clone();

        for old_key in enumerate_keys(&subject) {
            let old = subject.get_or_undefined(&old_key);
            let matched = incoming_keys.iter().position(|fresh_key| {
                join.matches(&old, &self.incoming.get_or_undefined(fresh_key))
            });
            let fresh = match matched {
                Some(position) => {
                    unmatched[position] = false;
                    self.incoming.get_or_undefined(&incoming_keys[position])
                }
                None => Value::Null,
            };
            out.set(&old_key, MergePair::new(old, fresh).into_value())?;
        }

        for (key, _) in incoming_keys
            .iter()
            .zip(&unmatched)
            .filter(|(_, unmatched)| **unmatched)
        {
            let pair = MergePair::new(Value::Null, self.incoming.get_or_undefined(key)).into_value();
            if let Value::Sequence(sequence) = &mut out {
                sequence.push(pair);
            } else if out.has(key) {
                tracing::warn!(
                    "merge: incoming entry '{}' dropped, key already holds a value",
                    key
                );
            } else {
                out.set(key, pair)?;
            }
        }
        Ok(out)
    }
}

impl Routine for Reconcile {
    fn kind(&self) -> RoutineKind {
        RoutineKind::Reconcile
    }

    fn select(&self, _keys: &[Key], subject: &mut Value) -> Result<KeySet, RoutineError> {
        let rebuilt = self.reconcile(std::mem::take(subject))?;
        *subject = rebuilt;
        Ok(enumerate_keys(subject).into_iter().collect())
    }

    fn produce(&self, _key: Option<&Key>, subject: Value) -> Result<Value, RoutineError> {
        self.reconcile(subject)
    }
}
