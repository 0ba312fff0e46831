//! Evolver configuration

use evolve_routine::DEFAULT_HANDLE_PREFIX;
use serde::{Deserialize, Serialize};

use crate::error::EvolveError;

/// Configuration for an [`Evolver`](crate::Evolver)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolverConfig {
    /// Maximum descriptor nesting depth (`None` = unbounded)
    pub max_depth: Option<usize>,
    /// Display prefix of routine handles
    pub handle_prefix: String,
}

impl EvolverConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a recursion depth limit
    #[inline]
    #[must_use]
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// With a handle display prefix
    #[inline]
    #[must_use]
    pub fn with_handle_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.handle_prefix = prefix.into();
        self
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or the configuration is rejected
    /// by [`validate`](Self::validate)
    pub fn from_json(json: &str) -> Result<Self, EvolveError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EvolveError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the configuration is rejected
    /// by [`validate`](Self::validate)
    pub fn from_yaml(yaml: &str) -> Result<Self, EvolveError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| EvolveError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration
    ///
    /// An empty or all-digit prefix would make handle tokens
    /// indistinguishable from sequence indices.
    ///
    /// # Errors
    /// Returns [`EvolveError::Config`] describing the rejected field
    pub fn validate(&self) -> Result<(), EvolveError> {
        if self.handle_prefix.is_empty() {
            return Err(EvolveError::Config("handle_prefix must not be empty".into()));
        }
        if self.handle_prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EvolveError::Config(format!(
                "handle_prefix '{}' must contain a non-digit character",
                self.handle_prefix
            )));
        }
        Ok(())
    }
}

impl Default for EvolverConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            handle_prefix: DEFAULT_HANDLE_PREFIX.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = EvolverConfig::new();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.handle_prefix, "$evolve$_#");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder() {
        let config = EvolverConfig::new().with_max_depth(4).with_handle_prefix("@h");
        assert_eq!(config.max_depth, Some(4));
        assert_eq!(config.handle_prefix, "@h");
    }

    #[test]
    fn config_from_json_fills_defaults() {
        let config = EvolverConfig::from_json(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, Some(8));
        assert_eq!(config.handle_prefix, DEFAULT_HANDLE_PREFIX);
    }

    #[test]
    fn config_from_yaml() {
        let config = EvolverConfig::from_yaml("max_depth: 2\nhandle_prefix: \"~\"\n").unwrap();
        assert_eq!(config, EvolverConfig::new().with_max_depth(2).with_handle_prefix("~"));
    }

    #[test]
    fn config_invalid() {
        assert!(matches!(
            EvolverConfig::from_json("not valid json"),
            Err(EvolveError::Config(_))
        ));
        assert!(EvolverConfig::from_json(r#"{"handle_prefix": ""}"#).is_err());
        assert!(EvolverConfig::new().with_handle_prefix("12").validate().is_err());
    }
}
