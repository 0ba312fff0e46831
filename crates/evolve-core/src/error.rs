//! Error types for the evolution driver

use std::error::Error as StdError;

use evolve_routine::{Handle, RoutineError, RoutineKind};
use evolve_value::ValueError;

/// Main evolution error type
#[derive(Debug, thiserror::Error)]
pub enum EvolveError {
    /// A registered routine failed
    #[error("{kind} routine {handle} failed: {source}")]
    Routine {
        /// Handle the routine was registered under
        handle: Handle,
        /// Operation kind
        kind: RoutineKind,
        /// Underlying routine error
        #[source]
        source: RoutineError,
    },

    /// Value access error while assigning a result
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Descriptor nests deeper than the configured limit
    #[error("maximum evolution depth {limit} exceeded")]
    DepthExceeded {
        /// Configured limit
        limit: usize,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl EvolveError {
    /// Error returned by an `alter` callback, unchanged
    #[must_use]
    pub fn callback_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match self {
            Self::Routine {
                source: RoutineError::Callback { source, .. },
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Operation kind of a failed routine
    #[inline]
    #[must_use]
    pub fn routine_kind(&self) -> Option<RoutineKind> {
        match self {
            Self::Routine { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_message() {
        let err = EvolveError::DepthExceeded { limit: 3 };
        assert_eq!(err.to_string(), "maximum evolution depth 3 exceeded");
        assert!(err.callback_error().is_none());
        assert!(err.routine_kind().is_none());
    }

    #[test]
    fn value_error_converts() {
        let err: EvolveError = ValueError::NotAContainer("number").into();
        assert!(matches!(err, EvolveError::Value(_)));
    }
}
