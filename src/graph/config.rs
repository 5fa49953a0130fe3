//! Graph configuration

use super::store::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Settings applied when a [`Graph`](super::Graph) is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphConfig {
    /// Name reported in log records, useful when a host keeps several graphs
    pub name: String,
    /// Number of entity slots reserved up front
    pub initial_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            initial_capacity: 1024,
        }
    }
}

impl GraphConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> GraphResult<Self> {
        serde_json::from_str(json).map_err(|e| GraphError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GraphConfig::default();
        assert_eq!(config.name, "default");
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn test_from_json_partial() {
        let config = GraphConfig::from_json(r#"{"name": "project"}"#).unwrap();
        assert_eq!(config.name, "project");
        assert_eq!(config.initial_capacity, 1024);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = GraphConfig::from_json(r#"{"capacity": 3}"#).unwrap_err();
        assert!(matches!(err, GraphError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = GraphConfig::from_json(r#"{"initial_capacity": "many"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Invalid graph configuration"));
    }
}
