//! Evolve Core
//!
//! Declarative, immutable evolution of tree values.
//!
//! # Core Concepts
//!
//! - [`Evolver`]: Entry point; owns the routine registry and runs [`Evolver::evolve`]
//! - [`Change`]: Descriptor node (keep, literal, key map, routine, chain)
//! - [`ChangeMap`]: Ordered `Selector -> Change` entries applied to one subject
//! - [`Selector`]: Plain key or routine handle in key position
//! - Builders: [`Evolver::where_`], [`Evolver::spread`], [`Evolver::alter`],
//!   [`Evolver::merge`], [`Evolver::remove`] and their variants
//!
//! # Example
//!
//! ```
//! use evolve_core::{ChangeMap, Evolver, MergePair};
//! use evolve_value::{Key, Value};
//! use serde_json::json;
//!
//! let mut evolver = Evolver::new();
//! let cart = Value::from(json!([{"id": 1, "amount": 1}, {"id": 2, "amount": 2}]));
//!
//! let fold = evolver.alter(|_, pair| {
//!     let MergePair { old, fresh } = MergePair::try_from(pair)?;
//!     let amount = |v: &Value| v.field("amount").and_then(Value::as_f64).unwrap_or(0.0);
//!     let total = amount(&old) + amount(&fresh);
//!     let mut next = if old.is_null() { fresh } else { old };
//!     next.set(&Key::from("amount"), Value::from(total))?;
//!     Ok(next)
//! });
//! let added = json!([{"id": 2, "amount": 1}, {"id": 3, "amount": 3}]);
//! let merge = evolver.merge_on(Value::from(added), json!({"id": true}));
//!
//! let next = evolver.evolve(&cart, ChangeMap::new().with(merge, fold)).unwrap();
//! assert_eq!(
//!     next,
//!     Value::from(json!([
//!         {"id": 1, "amount": 1},
//!         {"id": 2, "amount": 3},
//!         {"id": 3, "amount": 3},
//!     ]))
//! );
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod change;
mod config;
mod error;
mod evolver;

// Re-exports
pub use change::{Change, ChangeMap, Selector};
pub use config::EvolverConfig;
pub use error::EvolveError;
pub use evolver::Evolver;

pub use evolve_routine::{BoxError, Criterion, Handle, Join, MergePair, RoutineKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
