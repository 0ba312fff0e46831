//! Keys for addressing entries of records and sequences
//!
//! Provides [`Key`], the address of one child inside a container value.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use crate::error::ValueError;
use crate::value::Value;

/// Largest addressable sequence slot (`2^32 - 2`)
///
/// Numeric names above it are plain names: they address record entries
/// but never a sequence slot.
pub const MAX_INDEX: usize = 4_294_967_294;

/// Address of a child within a container
///
/// Records are addressed by name and sequences by index, but both
/// variants are accepted by both container kinds:
/// - `Index(2)` on a record addresses the entry named `"2"`
/// - `Name("2")` on a sequence addresses slot 2
/// - `Name("x")` on a sequence is an error
///
/// Equality against `str` and ordering against `str` go through the
/// key's name, so predicates can write `key > "a"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Positional slot of a sequence
    Index(usize),

    /// Named entry of a record
    Name(String),
}

impl Key {
    /// Create a named key
    #[inline]
    #[must_use]
    pub fn name_of(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Key rendered as a record entry name
    #[inline]
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Self::Index(i) => Cow::Owned(i.to_string()),
            Self::Name(n) => Cow::Borrowed(n.as_str()),
        }
    }

    /// Borrow the name of a `Name` key
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Index(_) => None,
            Self::Name(n) => Some(n),
        }
    }

    /// Key as a sequence index (numeric names included)
    #[inline]
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(i) => Some(*i),
            Self::Name(n) => parse_index(n),
        }
    }

    /// Whether two keys address the same entry
    #[inline]
    #[must_use]
    pub fn same_entry(&self, other: &Self) -> bool {
        self.name() == other.name()
    }

    /// Build a key from a value
    ///
    /// Strings become names. Non-negative integral numbers become indices
    /// up to [`MAX_INDEX`] and decimal names beyond it.
    ///
    /// # Errors
    /// Returns [`ValueError::InvalidKey`] for any other value.
    pub fn from_value(value: &Value) -> Result<Self, ValueError> {
        match value {
            Value::String(s) => Ok(Self::Name(s.clone())),
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::cast_precision_loss
            )]
            Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 => {
                if *n <= MAX_INDEX as f64 {
                    Ok(Self::Index(*n as usize))
                } else {
                    Ok(Self::Name(n.to_string()))
                }
            }
            other => Err(ValueError::InvalidKey(other.to_string())),
        }
    }
}

/// Parse a canonical decimal index (`"0"`, `"12"`, but not `"01"` or `"+1"`)
fn parse_index(name: &str) -> Option<usize> {
    if name.is_empty() || (name.len() > 1 && name.starts_with('0')) {
        return None;
    }
    if !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok().filter(|index| *index <= MAX_INDEX)
}

impl Display for Key {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(n) => write!(f, "{n}"),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<&String> for Key {
    fn from(name: &String) -> Self {
        Self::Name(name.clone())
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.name() == other
    }
}

impl PartialOrd<str> for Key {
    fn partial_cmp(&self, other: &str) -> Option<Ordering> {
        Some(self.name().as_ref().cmp(other))
    }
}
