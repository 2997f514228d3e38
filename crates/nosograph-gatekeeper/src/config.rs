//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for disclosure checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisclosureConfig {
    /// Smallest non-zero count that may be published
    #[serde(default = "default_min_cell_size")]
    pub min_cell_size: u64,
}

fn default_min_cell_size() -> u64 {
    5
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            min_cell_size: default_min_cell_size(),
        }
    }
}

impl DisclosureConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_cell_size == 0 {
            return Err("min_cell_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisclosureConfig::default();
        assert_eq!(config.min_cell_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let config = DisclosureConfig { min_cell_size: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: DisclosureConfig = toml::from_str("").unwrap();
        assert_eq!(config.min_cell_size, 5);

        let config: DisclosureConfig = serde_json::from_str(r#"{"min_cell_size": 10}"#).unwrap();
        assert_eq!(config.min_cell_size, 10);
    }
}
