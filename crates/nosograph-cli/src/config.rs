//! Run configuration.
//!
//! Loads source paths and builder settings from a TOML file. Command-line
//! flags override file values.

use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use nosograph_builder::{BuilderConfig, HierarchySource};
use nosograph_gatekeeper::DisclosureConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Full configuration for one build run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory receiving endpoints_info.json and endpoint_tree.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Hierarchy evidence source
    #[serde(default)]
    pub hierarchy: HierarchySource,

    /// Input files
    #[serde(default)]
    pub sources: SourcePaths,

    /// Overlap metric column and output label
    #[serde(default)]
    pub overlap_metric: OverlapMetric,

    /// Builder settings
    #[serde(default)]
    pub builder: BuilderConfig,

    /// Disclosure control settings
    #[serde(default)]
    pub disclosure: DisclosureConfig,
}

/// Paths of the input sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcePaths {
    /// Endpoint definitions (CSV)
    pub definitions: Option<PathBuf>,
    /// Basic case-count statistics (JSON)
    pub basic_stats: Option<PathBuf>,
    /// Endpoint-endpoint correlations (CSV)
    pub correlations: Option<PathBuf>,
    /// UK Biobank meta-analysis results (TSV)
    pub metaresults_ukbb: Option<PathBuf>,
    /// Estonian Biobank meta-analysis results (TSV)
    pub metaresults_est: Option<PathBuf>,
    /// Genetic correlations (CSV)
    pub genetic_correlations: Option<PathBuf>,
    /// Directory of per-endpoint coded-case tallies (optional)
    pub code_tallies: Option<PathBuf>,
}

/// Which correlations column holds the overlap metric, and how to label it.
///
/// The metric's meaning depends on the data release (case-overlap percentage
/// or a Jaccard-like index); it is only ever compared against the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapMetric {
    /// Column name in the correlations CSV
    #[serde(default = "default_metric_column")]
    pub column: String,

    /// Key written in endpoint_tree.json
    #[serde(default = "default_metric_label")]
    pub label: String,
}

fn default_metric_column() -> String {
    "case_overlap_percent".to_string()
}

fn default_metric_label() -> String {
    "case_overlap".to_string()
}

impl Default for OverlapMetric {
    fn default() -> Self {
        Self {
            column: default_metric_column(),
            label: default_metric_label(),
        }
    }
}

impl RunConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: RunConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise start from defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Override file values with command-line flags.
    pub fn apply_args(&mut self, args: BuildArgs) {
        let sources = &mut self.sources;
        override_with(&mut sources.definitions, args.definitions);
        override_with(&mut sources.basic_stats, args.basic_stats);
        override_with(&mut sources.correlations, args.correlations);
        override_with(&mut sources.metaresults_ukbb, args.metaresults_ukbb);
        override_with(&mut sources.metaresults_est, args.metaresults_est);
        override_with(&mut sources.genetic_correlations, args.genetic_correlations);
        override_with(&mut sources.code_tallies, args.code_tallies);
        override_with(&mut self.output_dir, args.output_dir);

        if let Some(threshold) = args.subset_threshold {
            self.builder.subset_threshold = threshold;
        }
        if let Some(hierarchy) = args.hierarchy {
            self.hierarchy = hierarchy.into();
        }
        if let Some(column) = args.metric_column {
            self.overlap_metric.column = column;
        }
        if let Some(label) = args.metric_label {
            self.overlap_metric.label = label;
        }
        if args.all_endpoints {
            self.builder.restrict_to_core = false;
        }
    }

    /// Check that every setting needed for this run is present and valid.
    pub fn validate(&self) -> Result<()> {
        require("definitions", &self.sources.definitions)?;
        require("basic_stats", &self.sources.basic_stats)?;
        require("metaresults_ukbb", &self.sources.metaresults_ukbb)?;
        require("metaresults_est", &self.sources.metaresults_est)?;
        require("genetic_correlations", &self.sources.genetic_correlations)?;
        require("output_dir", &self.output_dir)?;
        if self.hierarchy == HierarchySource::Overlap {
            require("correlations", &self.sources.correlations)?;
        }

        self.builder.validate()?;
        self.disclosure.validate().map_err(CliError::Config)?;
        Ok(())
    }
}

/// Return a required path or a configuration error naming it.
pub fn require<'a>(name: &str, value: &'a Option<PathBuf>) -> Result<&'a Path> {
    value
        .as_deref()
        .ok_or_else(|| CliError::Config(format!("Missing required setting: {}", name)))
}

fn override_with<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
