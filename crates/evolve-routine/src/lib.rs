//! Evolve Routines
//!
//! Deferred operations that can be embedded in change descriptors, and
//! the registry that hands out [`Handle`]s for them.
//!
//! # Core Concepts
//!
//! - [`Routine`]: Trait resolved in key position ([`Routine::select`])
//!   or value position ([`Routine::produce`])
//! - [`Filter`] (`where`), [`Insert`] (`spread`), [`Transform`] (`alter`),
//!   [`Reconcile`] (`merge`), [`Delete`] (`remove`): the built-in routines
//! - [`Criterion`] and [`Join`]: matching vocabulary shared by the routines
//! - [`RoutineRegistry`]: Per-evolution table from [`Handle`] to routine
//!
//! # Example
//!
//! ```
//! use evolve_routine::{Criterion, Filter, Routine, RoutineRegistry};
//! use evolve_value::Value;
//! use serde_json::json;
//!
//! let mut registry = RoutineRegistry::new();
//! let handle = registry.register(Filter::new(Criterion::by(|_, v| v.as_f64() > Some(1.0))));
//!
//! let routine = registry.resolve(&handle).unwrap().routine();
//! let out = routine.produce(None, Value::from(json!({"a": 1, "b": 2}))).unwrap();
//! assert_eq!(out, Value::from(json!({"b": 2})));
//!
//! registry.reset();
//! assert!(registry.resolve(&handle).is_none());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod criterion;
mod delete;
mod error;
mod filter;
mod handle;
mod insert;
mod reconcile;
mod registry;
mod routine;
mod transform;

// Re-exports
pub use criterion::{Criterion, Join, JoinPredicate, Predicate};
pub use delete::Delete;
pub use error::{BoxError, RoutineError};
pub use filter::Filter;
pub use handle::{Handle, DEFAULT_HANDLE_PREFIX};
pub use insert::Insert;
pub use reconcile::{MergePair, Reconcile, FRESH, OLD};
pub use registry::{RegistryEntry, RoutineRegistry};
pub use routine::{KeySet, Mode, Routine, RoutineKind};
pub use transform::{Transform, TransformFn};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
