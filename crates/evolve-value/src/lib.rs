//! Evolve Value Model
//!
//! Tree values made of scalars, records and hole-aware sequences, plus
//! the structural utilities the evolution engine relies on.
//!
//! # Core Concepts
//!
//! - [`Value`]: Closed sum over scalars, [`Record`] and [`Sequence`]
//! - [`Key`]: Address of a child (name or index)
//! - [`Shape`]: Container kind, used to pick default containers
//! - Structural utilities: [`enumerate_keys`], [`shallow_copy`],
//!   [`extract_subset`], [`is_literal`], [`deep_equal`], [`is_subtree`],
//!   [`subtree_matches`]
//!
//! # Example
//!
//! ```
//! use evolve_value::{deep_equal, Value};
//! use serde_json::json;
//!
//! let a = Value::from(json!({"id": 1, "tags": ["x"]}));
//! let b = Value::from_json_str(r#"{"tags": ["x"], "id": 1}"#).unwrap();
//! assert!(deep_equal(&a, &b));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
mod key;
mod structure;
mod value;

// Re-exports
pub use error::ValueError;
pub use key::{Key, MAX_INDEX};
pub use structure::{
    deep_equal, enumerate_keys, extract_subset, is_literal, is_subtree, shallow_copy,
    subtree_matches,
};
pub use value::{Record, Sequence, Shape, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
