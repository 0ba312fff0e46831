//! Insert routine (`spread`)

use evolve_value::{Key, Sequence, Value};

use crate::error::RoutineError;
use crate::routine::{KeySet, Routine, RoutineKind};

/// Add keys to a record or elements to a sequence
///
/// Key position (`{ [spread(items)]: change }`):
/// - record subject: every item becomes a key, so one change fans out
///   to many keys; soft mode drops keys already present
/// - sequence subject: every item is a target index; soft mode drops
///   indices already occupied
///
/// Value position (`spread(items)` as the change itself):
/// - sequence subject: hard mode appends the items; soft mode writes
///   each item at its own position only where that slot is unoccupied
/// - record subject: the selected keys are assigned `Undefined`
///   (hard mode overrides existing entries, soft mode only adds)
#[derive(Debug, Clone)]
pub struct Insert {
    items: Vec<Value>,
    soft: bool,
}

impl Insert {
    /// Create an insert
    #[inline]
    #[must_use]
    pub fn new(items: Vec<Value>, soft: bool) -> Self {
        Self { items, soft }
    }

    /// Captured items
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Whether occupied positions are left alone
    #[inline]
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.soft
    }

    fn item_keys(&self) -> Result<Vec<Key>, RoutineError> {
        self.items
            .iter()
            .map(|item| {
                Key::from_value(item)
                    .map_err(|e| RoutineError::invalid_parameter(RoutineKind::Insert, e.to_string()))
            })
            .collect()
    }

    fn record_keys(&self, present: &[Key]) -> Result<KeySet, RoutineError> {
        Ok(self
            .item_keys()?
            .into_iter()
            .filter(|key| !self.soft || !present.iter().any(|p| p.same_entry(key)))
            .collect())
    }

    fn sequence_keys(&self, sequence: &Sequence) -> Result<KeySet, RoutineError> {
        let mut selected = KeySet::new();
        for key in self.item_keys()? {
            let index = key.as_index().ok_or_else(|| {
                RoutineError::invalid_parameter(
                    RoutineKind::Insert,
                    format!("'{key}' is not a sequence index"),
                )
            })?;
            if !self.soft || !sequence.is_occupied(index) {
                selected.push(Key::Index(index));
            }
        }
        Ok(selected)
    }
}

impl Routine for Insert {
    fn kind(&self) -> RoutineKind {
        RoutineKind::Insert
    }

    fn select(&self, keys: &[Key], subject: &mut Value) -> Result<KeySet, RoutineError> {
        match subject {
            Value::Record(_) => self.record_keys(keys),
            Value::Sequence(sequence) => self.sequence_keys(sequence),
            other => Err(RoutineError::unsupported_shape(RoutineKind::Insert, other)),
        }
    }

    fn produce(&self, _key: Option<&Key>, subject: Value) -> Result<Value, RoutineError> {
        match subject {
            Value::Sequence(mut sequence) => {
                if self.soft {
                    for (index, item) in self.items.iter().enumerate() {
                        if !sequence.is_occupied(index) {
                            sequence.set(index, item.clone())?;
                        }
                    }
                } else {
                    for item in &self.items {
                        sequence.push(item.clone());
                    }
                }
                Ok(Value::Sequence(sequence))
            }
            Value::Record(record) => {
                let present: Vec<Key> = record.names().map(Key::from).collect();
                let mut out = Value::Record(record);
                for key in self.record_keys(&present)? {
                    out.set(&key, Value::Undefined)?;
                }
                Ok(out)
            }
            other => Err(RoutineError::unsupported_shape(RoutineKind::Insert, &other)),
        }
    }
}
