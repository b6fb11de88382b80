//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for relation validation rules
///
/// Structural rules (taxonomy, self-relation, numeric domains) always apply;
/// only the free-text limits are configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Maximum description length in characters
    pub max_description_length: usize,

    /// Trim surrounding whitespace from descriptions; blank ones become `None`
    #[serde(default = "default_true")]
    pub normalize_descriptions: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_description_length: 500,
            normalize_descriptions: true,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (long free-text notes)
    pub fn permissive() -> Self {
        Self {
            max_description_length: 4_000,
            normalize_descriptions: true,
        }
    }

    /// Create a strict configuration (short notes, matching narrow columns)
    pub fn strict() -> Self {
        Self {
            max_description_length: 255,
            normalize_descriptions: true,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_description_length == 0 {
            return Err("max_description_length must be greater than 0".to_string());
        }
        Ok(())
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
