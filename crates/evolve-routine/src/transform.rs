//! Transform routine (`alter`)

use std::fmt::{self, Debug, Formatter};

use evolve_value::{Key, Value};

use crate::error::{BoxError, RoutineError};
use crate::routine::{KeySet, Mode, Routine, RoutineKind};

/// Callback of a transform: `(key, current) -> next`
pub type TransformFn = Box<dyn Fn(Option<&Key>, Value) -> Result<Value, BoxError>>;

/// Replace a value with the result of a callback
///
/// The callback receives the key the value lives under (`None` at the
/// root) and the current value, already evolved by any earlier entry
/// of the same descriptor. After a reconcile the current value is an
/// `{old, fresh}` pair. The callback's result is used verbatim and its
/// error is propagated unchanged as the source of
/// [`RoutineError::Callback`].
pub struct Transform {
    callback: TransformFn,
}

impl Transform {
    /// Create a transform
    #[inline]
    #[must_use]
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(Option<&Key>, Value) -> Result<Value, BoxError> + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl Debug for Transform {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform").finish_non_exhaustive()
    }
}

impl Routine for Transform {
    fn kind(&self) -> RoutineKind {
        RoutineKind::Transform
    }

    fn select(&self, _keys: &[Key], _subject: &mut Value) -> Result<KeySet, RoutineError> {
        Err(RoutineError::UnsupportedMode {
            kind: RoutineKind::Transform,
            mode: Mode::Key,
        })
    }

    fn produce(&self, key: Option<&Key>, subject: Value) -> Result<Value, RoutineError> {
        (self.callback)(key, subject).map_err(|source| RoutineError::Callback {
            kind: RoutineKind::Transform,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[test]
    fn produce_passes_key_and_value() {
        let t = Transform::new(|key, value| {
            let bump = value.as_f64().unwrap_or(0.0) + 1.0;
            Ok(Value::from(format!("{}={bump}", key.map(|k| k.to_string()).unwrap_or_default())))
        });
        let out = t.produce(Some(&Key::from("a")), Value::from(10)).unwrap();
        assert_eq!(out, Value::from("a=11"));
    }

    #[test]
    fn callback_error_is_the_source() {
        let t = Transform::new(|_, _| Err(Boom.into()));
        let err = t.produce(None, Value::Null).unwrap_err();
        match err {
            RoutineError::Callback { kind, source } => {
                assert_eq!(kind, RoutineKind::Transform);
                assert!(source.downcast_ref::<Boom>().is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn select_is_unsupported() {
        let t = Transform::new(|_, v| Ok(v));
        let mut subject = Value::Null;
        assert!(matches!(
            t.select(&[], &mut subject),
            Err(RoutineError::UnsupportedMode {
                mode: Mode::Key,
                ..
            })
        ));
    }
}
