//! Configuration for the builders

use crate::BuildError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which evidence source the relationship hierarchy is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HierarchySource {
    /// Pairwise overlap statistics (flat edge list)
    #[default]
    Overlap,
    /// Declared inclusion lists (parent/children index)
    Inclusion,
}

/// Configuration for hierarchy building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Minimum overlap metric for a partial-subset edge (inclusive)
    #[serde(default = "default_subset_threshold")]
    pub subset_threshold: f64,

    /// Only consider overlap rows where both endpoints are core endpoints
    #[serde(default = "default_restrict_to_core")]
    pub restrict_to_core: bool,

    /// Separator used in definition inclusion lists
    #[serde(default = "default_inclusion_delimiter")]
    pub inclusion_delimiter: char,
}

fn default_subset_threshold() -> f64 {
    0.5
}

fn default_restrict_to_core() -> bool {
    true
}

fn default_inclusion_delimiter() -> char {
    '|'
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            subset_threshold: default_subset_threshold(),
            restrict_to_core: default_restrict_to_core(),
            inclusion_delimiter: default_inclusion_delimiter(),
        }
    }
}

impl BuilderConfig {
    /// Validate the configuration
    ///
    /// A threshold outside 0.0–1.0 is allowed but logged, since the metric's
    /// scale is defined by the source.
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.subset_threshold.is_finite() {
            return Err(BuildError::Config(format!(
                "subset_threshold must be a finite number, got {}",
                self.subset_threshold
            )));
        }
        if !(0.0..=1.0).contains(&self.subset_threshold) {
            warn!(
                threshold = self.subset_threshold,
                "Subset threshold is outside the conventional 0.0-1.0 range"
            );
        }
        if self.inclusion_delimiter.is_whitespace() {
            return Err(BuildError::Config(
                "inclusion_delimiter cannot be whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert_eq!(config.subset_threshold, 0.5);
        assert!(config.restrict_to_core);
        assert_eq!(config.inclusion_delimiter, '|');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_threshold_is_allowed() {
        let config = BuilderConfig {
            subset_threshold: 42.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let config = BuilderConfig {
            subset_threshold: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BuildError::Config(_))));
    }

    #[test]
    fn test_parse_toml() {
        let config: BuilderConfig = toml::from_str(
            r#"
            subset_threshold = 0.3
            inclusion_delimiter = ";"
        "#,
        )
        .unwrap();
        assert_eq!(config.subset_threshold, 0.3);
        assert!(config.restrict_to_core);
        assert_eq!(config.inclusion_delimiter, ';');
    }

    #[test]
    fn test_hierarchy_source_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            source: HierarchySource,
        }
        let w: Wrapper = toml::from_str(r#"source = "inclusion""#).unwrap();
        assert_eq!(w.source, HierarchySource::Inclusion);
        assert_eq!(HierarchySource::default(), HierarchySource::Overlap);
    }
}
