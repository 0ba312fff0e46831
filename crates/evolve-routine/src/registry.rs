//! Routine registry
//!
//! Provides [`RoutineRegistry`], which turns builder calls into
//! [`Handle`]s and resolves them back during evolution.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::handle::{Handle, DEFAULT_HANDLE_PREFIX};
use crate::routine::{Routine, RoutineKind};

/// Process-wide generation source, so handles never collide across
/// registries or resets
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Registered routine with its operation kind
#[derive(Debug)]
pub struct RegistryEntry {
    kind: RoutineKind,
    routine: Box<dyn Routine>,
}

impl RegistryEntry {
    /// Operation kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> RoutineKind {
        self.kind
    }

    /// Routine with its captured parameters
    #[inline]
    #[must_use]
    pub fn routine(&self) -> &dyn Routine {
        self.routine.as_ref()
    }
}

/// Table of routines registered for one evolution
///
/// Entries are looked up, never removed, until [`reset`](Self::reset)
/// discards the whole generation. Handles from an earlier generation
/// never resolve.
#[derive(Debug)]
pub struct RoutineRegistry {
    entries: HashMap<u64, RegistryEntry>,
    counter: u64,
    generation: u64,
    prefix: String,
}

impl Default for RoutineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutineRegistry {
    /// Create empty registry with the default handle prefix
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_HANDLE_PREFIX)
    }

    /// Create empty registry whose handles display as `<prefix><n>`
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            counter: 0,
            generation: next_generation(),
            prefix: prefix.into(),
        }
    }

    /// Issue a fresh handle of the current generation
    pub fn issue_handle(&mut self) -> Handle {
        let handle = Handle::new(self.generation, self.counter, &self.prefix);
        self.counter += 1;
        handle
    }

    /// Store a routine and return its handle
    pub fn register(&mut self, routine: impl Routine + 'static) -> Handle {
        self.register_boxed(Box::new(routine))
    }

    /// Store a boxed routine and return its handle
    pub fn register_boxed(&mut self, routine: Box<dyn Routine>) -> Handle {
        let handle = self.issue_handle();
        let kind = routine.kind();
        tracing::trace!("registry: registered {} as {}", kind, handle);
        self.entries.insert(handle.id(), RegistryEntry { kind, routine });
        handle
    }

    /// Look up a handle
    ///
    /// `None` when the handle belongs to another generation or registry.
    #[must_use]
    pub fn resolve(&self, handle: &Handle) -> Option<&RegistryEntry> {
        if handle.generation() != self.generation {
            return None;
        }
        self.entries.get(&handle.id())
    }

    /// Check whether a handle resolves
    #[inline]
    #[must_use]
    pub fn contains(&self, handle: &Handle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Discard every entry and start a new generation
    pub fn reset(&mut self) {
        self.entries.clear();
        self.counter = 0;
        self.generation = next_generation();
    }

    /// Number of registered routines
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no routine is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current generation
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Handle display prefix
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::Criterion;
    use crate::delete::Delete;
    use crate::filter::Filter;

    #[test]
    fn registry_new_empty() {
        let registry = RoutineRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.prefix(), DEFAULT_HANDLE_PREFIX);
    }

    #[test]
    fn handles_are_monotonic() {
        let mut registry = RoutineRegistry::new();
        let a = registry.register(Filter::new(Criterion::All));
        let b = registry.register(Delete::all());
        assert_eq!(a.id(), 0);
        assert_eq!(b.id(), 1);
        assert_eq!(a.token(), "$evolve$_#0");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn resolve_returns_kind() {
        let mut registry = RoutineRegistry::with_prefix("@");
        let h = registry.register(Delete::all());
        let entry = registry.resolve(&h).unwrap();
        assert_eq!(entry.kind(), RoutineKind::Delete);
        assert_eq!(entry.routine().kind(), RoutineKind::Delete);
        assert_eq!(h.to_string(), "@0");
    }

    #[test]
    fn reset_invalidates_handles() {
        let mut registry = RoutineRegistry::new();
        let stale = registry.register(Delete::all());
        let generation = registry.generation();

        registry.reset();
        assert!(registry.is_empty());
        assert_ne!(registry.generation(), generation);
        assert!(!registry.contains(&stale));

        let fresh = registry.register(Delete::all());
        assert_eq!(fresh.id(), stale.id());
        assert_eq!(fresh.token(), stale.token());
        assert!(registry.contains(&fresh));
        assert!(!registry.contains(&stale));
    }

    #[test]
    fn handles_do_not_cross_registries() {
        let mut first = RoutineRegistry::new();
        let mut second = RoutineRegistry::new();
        let h = first.register(Delete::all());
        second.register(Delete::all());
        assert!(second.resolve(&h).is_none());
    }

    #[test]
    fn issued_handle_without_entry_does_not_resolve() {
        let mut registry = RoutineRegistry::new();
        let h = registry.issue_handle();
        assert!(!registry.contains(&h));
        let next = registry.register(Delete::all());
        assert_eq!(next.id(), 1);
    }
}
