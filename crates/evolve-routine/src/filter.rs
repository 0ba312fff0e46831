//! Filter routine (`where`)

use evolve_value::{enumerate_keys, extract_subset, Key, Value};

use crate::criterion::Criterion;
use crate::error::RoutineError;
use crate::routine::{KeySet, Routine, RoutineKind};

/// Keep the entries that satisfy a [`Criterion`]
///
/// In key position it narrows the current key list to the matching
/// keys. In value position it evaluates every key of the subject and
/// returns the filtered container (sequences are re-packed).
///
/// A negated filter keeps the entries that do *not* match; delete is
/// built on it.
#[derive(Debug)]
pub struct Filter {
    criterion: Criterion,
    negated: bool,
}

impl Filter {
    /// Create a filter
    #[inline]
    #[must_use]
    pub fn new(criterion: Criterion) -> Self {
        Self {
            criterion,
            negated: false,
        }
    }

    /// Create a filter that keeps non-matching entries
    #[inline]
    #[must_use]
    pub fn negated(criterion: Criterion) -> Self {
        Self {
            criterion,
            negated: true,
        }
    }

    /// Captured criterion
    #[inline]
    #[must_use]
    pub fn criterion(&self) -> &Criterion {
        &self.criterion
    }

    /// Whether the criterion is inverted
    #[inline]
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    fn keeps(&self, subject: &Value, key: &Key) -> bool {
        let undefined = Value::Undefined;
        let value = subject.get(key).unwrap_or(&undefined);
        self.criterion.matches(key, value) != self.negated
    }

    /// Filtered copy of `subject` over all of its keys
    pub(crate) fn filter_value(&self, subject: &Value) -> Result<Value, RoutineError> {
        if !subject.is_container() {
            return Err(RoutineError::unsupported_shape(RoutineKind::Filter, subject));
        }
        let kept: Vec<Key> = enumerate_keys(subject)
            .into_iter()
            .filter(|key| self.keeps(subject, key))
            .collect();
        Ok(extract_subset(subject, &kept)?)
    }
}

impl Routine for Filter {
    fn kind(&self) -> RoutineKind {
        RoutineKind::Filter
    }

    fn select(&self, keys: &[Key], subject: &mut Value) -> Result<KeySet, RoutineError> {
        Ok(keys
            .iter()
            .filter(|key| self.keeps(subject, key))
            .cloned()
            .collect())
    }

    fn produce(&self, _key: Option<&Key>, subject: Value) -> Result<Value, RoutineError> {
        self.filter_value(&subject)
    }
}
