//! Routine trait and core types
//!
//! Provides the [`Routine`] trait implemented by every built-in routine.

use std::fmt::{self, Debug, Display, Formatter};

use evolve_value::{Key, Value};
use smallvec::SmallVec;

use crate::error::RoutineError;

/// Target keys produced by a routine in key position
pub type KeySet = SmallVec<[Key; 4]>;

/// Deferred operation embedded in a change descriptor
///
/// A routine is resolved in one of two positions:
/// - key position ([`Routine::select`]): it stands in for a descriptor
///   key and yields the keys of the subject to descend into
/// - value position ([`Routine::produce`]): it stands in for a
///   descriptor value and yields the replacement value directly
///
/// Implementations must be pure with respect to their captured
/// parameters: the same subject always yields the same result.
pub trait Routine: Debug {
    /// Operation kind
    fn kind(&self) -> RoutineKind;

    /// Resolve in key position
    ///
    /// `keys` are the subject's current keys. Routines that rebuild the
    /// subject (reconcile) write the rebuilt container back through
    /// `subject`.
    ///
    /// # Errors
    /// Returns error if the routine has no key-position meaning or the
    /// subject has an unsupported shape.
    fn select(&self, keys: &[Key], subject: &mut Value) -> Result<KeySet, RoutineError>;

    /// Resolve in value position
    ///
    /// `key` is the key under which the subject lives in its parent, or
    /// `None` at the root.
    ///
    /// # Errors
    /// Returns error if the routine cannot handle the subject or a user
    /// callback fails.
    fn produce(&self, key: Option<&Key>, subject: Value) -> Result<Value, RoutineError>;
}

/// Built-in operation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutineKind {
    /// Keep entries matching a criterion (`where`)
    Filter,

    /// Add keys or elements (`spread`)
    Insert,

    /// Arbitrary callback (`alter`)
    Transform,

    /// Pair old entries with incoming ones (`merge`)
    Reconcile,

    /// Drop entries or collapse to null (`remove`)
    Delete,
}

impl RoutineKind {
    /// Name of the builder that creates this kind
    #[inline]
    #[must_use]
    pub fn builder_name(self) -> &'static str {
        match self {
            Self::Filter => "where",
            Self::Insert => "spread",
            Self::Transform => "alter",
            Self::Reconcile => "merge",
            Self::Delete => "remove",
        }
    }
}

impl Display for RoutineKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.builder_name())
    }
}

/// Resolution position of a routine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Descriptor key position (key-producing)
    Key,

    /// Descriptor value position (value-producing)
    Value,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => write!(f, "key"),
            Self::Value => write!(f, "value"),
        }
    }
}
