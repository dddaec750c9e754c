//! Sail configuration
//!
//! ```yaml
//! base_iri: "http://tinkerpop.com/pgm/"
//! first_class_edges: true
//! ```

use super::namespace::DEFAULT_BASE_IRI;
use super::SailResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration fixed for the lifetime of a sail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SailConfig {
    /// Base IRI every generated namespace hangs off
    pub base_iri: String,
    /// Expose edges as resources (`true`) or as single relation statements
    pub first_class_edges: bool,
}

impl Default for SailConfig {
    fn default() -> Self {
        Self {
            base_iri: DEFAULT_BASE_IRI.to_string(),
            first_class_edges: true,
        }
    }
}

impl SailConfig {
    pub fn new(base_iri: impl Into<String>, first_class_edges: bool) -> Self {
        Self {
            base_iri: base_iri.into(),
            first_class_edges,
        }
    }

    /// Default base IRI with edges as relation statements
    pub fn simple() -> Self {
        Self {
            first_class_edges: false,
            ..Self::default()
        }
    }

    pub fn with_first_class_edges(mut self, enabled: bool) -> Self {
        self.first_class_edges = enabled;
        self
    }

    /// Parse from a YAML document; missing fields take their defaults
    pub fn from_yaml_str(yaml: &str) -> SailResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> SailResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::SailError;

    #[test]
    fn test_default_config() {
        let config = SailConfig::default();
        assert_eq!(config.base_iri, "http://tinkerpop.com/pgm/");
        assert!(config.first_class_edges);
        assert!(!SailConfig::simple().first_class_edges);
    }

    #[test]
    fn test_yaml_partial() {
        let config = SailConfig::from_yaml_str("first_class_edges: false\n").unwrap();
        assert_eq!(config.base_iri, DEFAULT_BASE_IRI);
        assert!(!config.first_class_edges);

        let config = SailConfig::from_yaml_str("base_iri: \"http://example.org/g/\"\n").unwrap();
        assert_eq!(config, SailConfig::new("http://example.org/g/", true));
    }

    #[test]
    fn test_yaml_invalid() {
        let result = SailConfig::from_yaml_str("first_class_edges: maybe\n");
        assert!(matches!(result, Err(SailError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SailConfig::from_file("/nonexistent/sail.yaml");
        assert!(matches!(result, Err(SailError::Io(_))));
    }
}
