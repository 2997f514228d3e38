//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use nosograph_builder::HierarchySource;
use std::path::PathBuf;

/// Nosograph - Build endpoint metadata and relationship graphs.
#[derive(Debug, Parser)]
#[command(name = "nosograph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run configuration file (TOML)
    #[arg(short, long, global = true, env = "NOSOGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build endpoints_info.json and endpoint_tree.json
    Build(BuildArgs),
}

/// Arguments for the build command.
///
/// Every flag overrides the matching value from the configuration file.
#[derive(Debug, Default, Parser)]
pub struct BuildArgs {
    /// Endpoint definitions (CSV)
    #[arg(short, long)]
    pub definitions: Option<PathBuf>,

    /// Basic case-count statistics (JSON)
    #[arg(short, long)]
    pub basic_stats: Option<PathBuf>,

    /// Endpoint-endpoint correlations (CSV)
    #[arg(short = 'r', long)]
    pub correlations: Option<PathBuf>,

    /// UK Biobank meta-analysis results (TSV)
    #[arg(short = 'u', long)]
    pub metaresults_ukbb: Option<PathBuf>,

    /// Estonian Biobank meta-analysis results (TSV)
    #[arg(short = 'e', long)]
    pub metaresults_est: Option<PathBuf>,

    /// Genetic correlations (CSV)
    #[arg(short, long)]
    pub genetic_correlations: Option<PathBuf>,

    /// Directory of per-endpoint coded-case tally tables (CSV)
    #[arg(long)]
    pub code_tallies: Option<PathBuf>,

    /// Overlap threshold to consider a partial subset (default: 0.5)
    #[arg(short = 't', long)]
    pub subset_threshold: Option<f64>,

    /// Hierarchy evidence source
    #[arg(long, value_enum)]
    pub hierarchy: Option<HierarchyArg>,

    /// Correlations column holding the overlap metric
    #[arg(long)]
    pub metric_column: Option<String>,

    /// Key used for the overlap metric in endpoint_tree.json
    #[arg(long)]
    pub metric_label: Option<String>,

    /// Consider all endpoints for the overlap hierarchy, not only core ones
    #[arg(long)]
    pub all_endpoints: bool,

    /// Output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Hierarchy source argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum HierarchyArg {
    /// Pairwise overlap statistics (default)
    Overlap,
    /// Declared inclusion lists
    Inclusion,
}

impl From<HierarchyArg> for HierarchySource {
    fn from(arg: HierarchyArg) -> Self {
        match arg {
            HierarchyArg::Overlap => HierarchySource::Overlap,
            HierarchyArg::Inclusion => HierarchySource::Inclusion,
        }
    }
}
