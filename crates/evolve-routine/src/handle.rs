//! Opaque routine handles

use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Default display prefix of handle tokens
pub const DEFAULT_HANDLE_PREFIX: &str = "$evolve$_#";

/// Opaque reference to a registered routine
///
/// A handle is only meaningful to the registry generation that issued
/// it. Identity is `(generation, id)`; the token (`<prefix><id>`) is
/// what the handle degrades to once that generation has been reset.
#[derive(Debug, Clone)]
pub struct Handle {
    generation: u64,
    id: u64,
    token: Arc<str>,
}

impl Handle {
    pub(crate) fn new(generation: u64, id: u64, prefix: &str) -> Self {
        Self {
            generation,
            id,
            token: Arc::from(format!("{prefix}{id}")),
        }
    }

    /// Registry generation that issued this handle
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sequence number within its generation
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Display token
    #[inline]
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && self.id == other.id
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.generation.hash(state);
        self.id.hash(state);
    }
}

impl Display for Handle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}
