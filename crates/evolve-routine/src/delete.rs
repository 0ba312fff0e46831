//! Delete routine (`remove`)

use evolve_value::{Key, Value};

use crate::criterion::Criterion;
use crate::error::RoutineError;
use crate::filter::Filter;
use crate::routine::{KeySet, Mode, Routine, RoutineKind};

/// Remove a value or the entries of a container
///
/// Without a criterion the whole subject collapses to `null`; under a
/// selector this nulls out each selected entry in place. With a
/// criterion the matching entries are dropped and the rest kept, which
/// is a negated [`Filter`].
#[derive(Debug)]
pub struct Delete {
    filter: Option<Filter>,
}

impl Delete {
    /// Delete the subject itself
    #[inline]
    #[must_use]
    pub fn all() -> Self {
        Self { filter: None }
    }

    /// Delete the entries matching `criterion`
    #[inline]
    #[must_use]
    pub fn matching(criterion: Criterion) -> Self {
        Self {
            filter: Some(Filter::negated(criterion)),
        }
    }

    /// Captured criterion, if any
    #[inline]
    #[must_use]
    pub fn criterion(&self) -> Option<&Criterion> {
        self.filter.as_ref().map(Filter::criterion)
    }
}

impl Routine for Delete {
    fn kind(&self) -> RoutineKind {
        RoutineKind::Delete
    }

    fn select(&self, _keys: &[Key], _subject: &mut Value) -> Result<KeySet, RoutineError> {
        Err(RoutineError::UnsupportedMode {
            kind: RoutineKind::Delete,
            mode: Mode::Key,
        })
    }

    fn produce(&self, _key: Option<&Key>, subject: Value) -> Result<Value, RoutineError> {
        match &self.filter {
            None => Ok(Value::Null),
            Some(filter) => filter.filter_value(&subject).map_err(|e| match e {
                RoutineError::UnsupportedShape { found, .. } => RoutineError::UnsupportedShape {
                    kind: RoutineKind::Delete,
                    found,
                },
                other => other,
            }),
        }
    }
}
