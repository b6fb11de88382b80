//! Configuration for the relationship engine

use okrgraph_gatekeeper::ValidationConfig;
use serde::{Deserialize, Serialize};

/// What happens to relations when an objective they reference is deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletePolicy {
    /// Refuse to delete an objective that still has active relations
    #[default]
    Restrict,

    /// Retire every active relation touching the objective, then delete it
    CascadeRetire,
}

/// Configuration for the relationship engine
///
/// # Examples
///
/// ```
/// use okrgraph_engine::{DeletePolicy, EngineConfig};
///
/// let config = EngineConfig::default();
/// assert_eq!(config.upsert_retries, 1);
/// assert_eq!(config.delete_policy, DeletePolicy::Restrict);
///
/// let config = EngineConfig::lenient();
/// assert_eq!(config.delete_policy, DeletePolicy::CascadeRetire);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Deepest nesting level the hierarchy builder materializes (roots are 1)
    pub max_depth: usize,

    /// Most nodes (counting repeated multi-parent occurrences) in one forest
    pub max_nodes: usize,

    /// How many times an upsert that lost an insert race re-runs its lookup
    pub upsert_retries: u32,

    /// Behavior of `delete_objective` when relations reference the objective
    #[serde(default)]
    pub delete_policy: DeletePolicy,

    /// Relation validation rules
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Default for EngineConfig {
    /// Balanced limits, one upsert retry, restrict-delete
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_nodes: 10_000,
            upsert_retries: 1,
            delete_policy: DeletePolicy::Restrict,
            validation: ValidationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Tight limits for interactive views
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            max_nodes: 2_000,
            upsert_retries: 1,
            delete_policy: DeletePolicy::Restrict,
            validation: ValidationConfig::strict(),
        }
    }

    /// Generous limits, cascade deletes; suited to imports and migrations
    pub fn lenient() -> Self {
        Self {
            max_depth: 256,
            max_nodes: 100_000,
            upsert_retries: 3,
            delete_policy: DeletePolicy::CascadeRetire,
            validation: ValidationConfig::permissive(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("max_depth must be greater than 0".to_string());
        }
        if self.max_nodes == 0 {
            return Err("max_nodes must be greater than 0".to_string());
        }
        self.validation.validate()
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::strict().validate().is_ok());
        assert!(EngineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = EngineConfig::default();
        config.max_depth = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.max_nodes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::lenient();
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_optional_sections() {
        let parsed = EngineConfig::from_toml(
            r#"
            max_depth = 8
            max_nodes = 50
            upsert_retries = 2
            delete_policy = "cascade_retire"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.delete_policy, DeletePolicy::CascadeRetire);
        assert_eq!(parsed.validation, ValidationConfig::default());
    }
}
