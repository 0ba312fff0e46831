//! Error types for routines

use evolve_value::ValueError;

use crate::routine::{Mode, RoutineKind};

/// Boxed error returned by user callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while a routine runs
#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    /// Captured parameter is unusable for the subject
    #[error("invalid {kind} parameter: {message}")]
    InvalidParameter {
        /// Routine that rejected the parameter
        kind: RoutineKind,
        /// What was wrong with it
        message: String,
    },

    /// Subject is not a container kind the routine understands
    #[error("{kind} cannot operate on a {found}")]
    UnsupportedShape {
        /// Routine that was invoked
        kind: RoutineKind,
        /// Type name of the subject
        found: &'static str,
    },

    /// Routine used in a position it has no meaning in
    #[error("{kind} cannot be resolved in {mode} position")]
    UnsupportedMode {
        /// Routine that was invoked
        kind: RoutineKind,
        /// Requested resolution mode
        mode: Mode,
    },

    /// User callback failed; the original error is the source
    #[error("{kind} callback failed: {source}")]
    Callback {
        /// Routine whose callback failed
        kind: RoutineKind,
        /// Error returned by the callback
        #[source]
        source: BoxError,
    },

    /// Value access error
    #[error("value error: {0}")]
    Value(#[from] ValueError),
}

impl RoutineError {
    /// Create invalid parameter error
    #[inline]
    pub fn invalid_parameter(kind: RoutineKind, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            kind,
            message: message.into(),
        }
    }

    /// Create unsupported shape error for `subject`
    #[inline]
    #[must_use]
    pub fn unsupported_shape(kind: RoutineKind, subject: &evolve_value::Value) -> Self {
        Self::UnsupportedShape {
            kind,
            found: subject.type_name(),
        }
    }
}
