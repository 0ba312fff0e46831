//! Recursive evolution driver
//!
//! [`Evolver`] owns the routine registry for one caller. Builders
//! register routines and return handles; [`Evolver::evolve`] walks the
//! value and the change descriptor together, resolving those handles,
//! and resets the registry once the top-level call is over.

use evolve_routine::{
    BoxError, Criterion, Delete, Filter, Handle, Insert, Join, KeySet, Reconcile, RegistryEntry,
    RoutineError, RoutineRegistry, Transform,
};
use evolve_value::{enumerate_keys, shallow_copy, Key, Value};
use smallvec::smallvec;

use crate::change::{Change, ChangeMap, Selector};
use crate::config::EvolverConfig;
use crate::error::EvolveError;

/// Evolution engine with its own routine registry
///
/// # Example
///
/// ```
/// use evolve_core::{ChangeMap, Evolver};
/// use evolve_value::Value;
/// use serde_json::json;
///
/// let mut evolver = Evolver::new();
/// let users = Value::from(json!([{"id": 1, "online": false}, {"id": 2, "online": true}]));
///
/// let change = ChangeMap::new().with(
///     evolver.where_(json!({"id": 2})),
///     json!({"online": false}),
/// );
/// let next = evolver.evolve(&users, change).unwrap();
///
/// assert_eq!(next, Value::from(json!([{"id": 1, "online": false}, {"id": 2, "online": false}])));
/// assert_eq!(users.as_sequence().unwrap().get(1).unwrap().field("online"), Some(&Value::from(true)));
/// ```
#[derive(Debug)]
pub struct Evolver {
    config: EvolverConfig,
    registry: RoutineRegistry,
}

impl Default for Evolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Evolver {
    /// Create an evolver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        let config = EvolverConfig::default();
        let registry = RoutineRegistry::with_prefix(config.handle_prefix.clone());
        Self { config, registry }
    }

    /// Create an evolver from a configuration
    ///
    /// # Errors
    /// Returns [`EvolveError::Config`] if the configuration is invalid
    pub fn with_config(config: EvolverConfig) -> Result<Self, EvolveError> {
        config.validate()?;
        let registry = RoutineRegistry::with_prefix(config.handle_prefix.clone());
        Ok(Self { config, registry })
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EvolverConfig {
        &self.config
    }

    /// Routine registry (for inspection)
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &RoutineRegistry {
        &self.registry
    }

    /// Keep entries matching `criterion`
    ///
    /// As a selector, narrows the subject's keys; as a change, returns
    /// the filtered container.
    pub fn where_(&mut self, criterion: impl Into<Criterion>) -> Handle {
        self.registry.register(Filter::new(criterion.into()))
    }

    /// Add keys or elements, overriding occupied positions
    pub fn spread<I, V>(&mut self, items: I) -> Handle
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.registry.register(Insert::new(items, false))
    }

    /// Add keys or elements, leaving occupied positions alone
    pub fn spread_soft<I, V>(&mut self, items: I) -> Handle
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.registry.register(Insert::new(items, true))
    }

    /// Replace a value with the result of `callback(key, current)`
    pub fn alter<F>(&mut self, callback: F) -> Handle
    where
        F: Fn(Option<&Key>, Value) -> Result<Value, BoxError> + 'static,
    {
        self.registry.register(Transform::new(callback))
    }

    /// Pair existing entries with `incoming` ones by key
    pub fn merge(&mut self, incoming: impl Into<Value>) -> Handle {
        self.registry.register(Reconcile::new(incoming.into()))
    }

    /// Pair existing entries with the first `incoming` entry matching `join`
    pub fn merge_on(&mut self, incoming: impl Into<Value>, join: impl Into<Join>) -> Handle {
        self.registry.register(Reconcile::with_join(incoming.into(), join.into()))
    }

    /// Collapse the value to `null`
    pub fn remove(&mut self) -> Handle {
        self.registry.register(Delete::all())
    }

    /// Drop the entries matching `criterion`
    pub fn remove_where(&mut self, criterion: impl Into<Criterion>) -> Handle {
        self.registry.register(Delete::matching(criterion.into()))
    }

    /// Evolve `value` by `change`
    ///
    /// `value` is never modified; containers are copied level by level
    /// as they are written. A [`Change::Chain`] applies its steps in
    /// order, each to the previous result. A literal sequence passed here
    /// is read the same way, one step per element; below the top level a
    /// sequence is still a plain literal. The registry is reset
    /// afterwards whether or not the call succeeded, so handles must
    /// not be kept across calls.
    ///
    /// # Errors
    /// - [`EvolveError::Routine`] if a routine or an `alter` callback fails
    /// - [`EvolveError::Value`] if a result cannot be assigned
    /// - [`EvolveError::DepthExceeded`] past the configured depth limit
    pub fn evolve(
        &mut self,
        value: &Value,
        change: impl Into<Change>,
    ) -> Result<Value, EvolveError> {
        let change = match change.into() {
            Change::Literal(Value::Sequence(steps)) => Change::Chain(
                steps
                    .slots()
                    .iter()
                    .map(|slot| slot.as_ref().map_or(Change::Keep, Change::from))
                    .collect(),
            ),
            other => other,
        };
        tracing::debug!(
            "evolve: {} step(s), {} registered routine(s)",
            change.steps(),
            self.registry.len()
        );

        let descent = Descent {
            registry: &self.registry,
            max_depth: self.config.max_depth,
        };
        let result = match &change {
            Change::Chain(steps) => descent.fold(value, steps, None, 0),
            single => descent.descend(value, single, None, 0),
        };

        self.registry.reset();
        if let Err(ref err) = result {
            tracing::debug!("evolve: failed: {}", err);
        }
        result
    }
}

/// Borrowed state of one top-level evolution
struct Descent<'a> {
    registry: &'a RoutineRegistry,
    max_depth: Option<usize>,
}

impl Descent<'_> {
    fn fold(
        &self,
        subject: &Value,
        steps: &[Change],
        key: Option<&Key>,
        depth: usize,
    ) -> Result<Value, EvolveError> {
        let mut current = shallow_copy(subject);
        for step in steps {
            current = self.descend(&current, step, key, depth)?;
        }
        Ok(current)
    }

    fn descend(
        &self,
        subject: &Value,
        change: &Change,
        key: Option<&Key>,
        depth: usize,
    ) -> Result<Value, EvolveError> {
        if let Some(limit) = self.max_depth {
            if depth > limit {
                return Err(EvolveError::DepthExceeded { limit });
            }
        }

        match change {
            Change::Keep => Ok(shallow_copy(subject)),
            Change::Literal(value) => Ok(value.clone()),
            Change::Routine(handle) => self.produce(subject, handle, key),
            Change::Keys(map) => {
                let base = if subject.is_container() {
                    shallow_copy(subject)
                } else {
                    tracing::trace!(
                        "evolve: {} replaced by an empty {:?} before descending",
                        subject.type_name(),
                        map.shape()
                    );
                    map.shape().empty()
                };
                self.apply_map(base, map, depth)
            }
            Change::Chain(steps) => self.fold(subject, steps, key, depth),
        }
    }

    fn produce(
        &self,
        subject: &Value,
        handle: &Handle,
        key: Option<&Key>,
    ) -> Result<Value, EvolveError> {
        let Some(entry) = self.registry.resolve(handle) else {
            tracing::warn!("evolve: stale handle {} used as a literal", handle);
            return Ok(Value::from(handle.token()));
        };
        tracing::trace!("evolve: {} {} in value position", entry.kind(), handle);
        entry
            .routine()
            .produce(key, shallow_copy(subject))
            .map_err(|source| routine_error(handle, entry, source))
    }

    fn select(&self, subject: &mut Value, handle: &Handle) -> Result<KeySet, EvolveError> {
        let Some(entry) = self.registry.resolve(handle) else {
            tracing::warn!("evolve: stale handle {} used as a plain key", handle);
            return Ok(smallvec![Key::from(handle.token())]);
        };
        let keys = enumerate_keys(subject);
        let selected = entry
            .routine()
            .select(&keys, subject)
            .map_err(|source| routine_error(handle, entry, source))?;
        tracing::trace!(
            "evolve: {} {} selected {} of {} key(s)",
            entry.kind(),
            handle,
            selected.len(),
            keys.len()
        );
        Ok(selected)
    }

    fn apply_map(
        &self,
        mut subject: Value,
        map: &ChangeMap,
        depth: usize,
    ) -> Result<Value, EvolveError> {
        for (selector, change) in map.iter() {
            let targets = match selector {
                Selector::Key(key) => smallvec![key.clone()],
                Selector::Routine(handle) => self.select(&mut subject, handle)?,
            };
            for target in &targets {
                let current = subject.get_or_undefined(target);
                let next = self.descend(&current, change, Some(target), depth + 1)?;
                subject.set(target, next)?;
            }
        }
        Ok(subject)
    }
}

fn routine_error(
    handle: &Handle,
    entry: &RegistryEntry,
    source: RoutineError,
) -> EvolveError {
    EvolveError::Routine {
        handle: handle.clone(),
        kind: entry.kind(),
        source,
    }
}
