//! Build pipeline.
//!
//! Reads every configured source, runs the metadata passes and the chosen
//! hierarchy builder, then writes both output files. Nothing is written
//! unless every pass succeeded.

use crate::config::{require, RunConfig};
use crate::error::{CliError, Result};
use crate::output::{self, BuildSummary};
use crate::sources;
use nosograph_builder::{
    EndpointRegistry, HierarchySource, InclusionBuilder, MetadataAggregator, OverlapBuilder,
};
use nosograph_domain::MetaAnalysis;
use nosograph_gatekeeper::DisclosureGuard;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Name of the metadata output file.
pub const ENDPOINTS_INFO_FILE: &str = "endpoints_info.json";

/// Name of the hierarchy output file.
pub const ENDPOINT_TREE_FILE: &str = "endpoint_tree.json";

/// Run a complete build.
///
/// # Errors
/// Any source, disclosure, reference or output error aborts the run. When an
/// error is returned, no output file is left behind.
pub fn run_build(config: &RunConfig) -> Result<BuildSummary> {
    config.validate()?;
    let sources = &config.sources;

    let definitions = sources::read_definitions(require("definitions", &sources.definitions)?)?;
    let registry = EndpointRegistry::from_rows(&definitions);
    info!(
        endpoints = registry.len(),
        core = registry.core_codes().len(),
        "Loaded endpoint definitions"
    );

    let guard = DisclosureGuard::new(config.disclosure);
    let mut aggregator = MetadataAggregator::new(&registry, guard);

    let case_counts = sources::read_case_counts(require("basic_stats", &sources.basic_stats)?)?;
    aggregator.apply_case_counts(case_counts)?;

    for (cohort, name, path) in [
        (MetaAnalysis::Ukbb, "metaresults_ukbb", &sources.metaresults_ukbb),
        (MetaAnalysis::Est, "metaresults_est", &sources.metaresults_est),
    ] {
        let codes = sources::read_meta_codes(require(name, path)?)?;
        aggregator.apply_meta_analysis(cohort, codes);
    }

    let hits = sources::read_gws_hits(require(
        "genetic_correlations",
        &sources.genetic_correlations,
    )?)?;
    aggregator.apply_gws_hits(hits);

    if let Some(dir) = &sources.code_tallies {
        let tallies = sources::read_code_tallies(dir)?;
        aggregator.apply_code_tallies(tallies)?;
    }

    let metadata = aggregator.finish();

    let (tree, relationships, hierarchy) = match config.hierarchy {
        HierarchySource::Overlap => {
            let path = require("correlations", &sources.correlations)?;
            let rows = sources::read_overlaps(path, &config.overlap_metric.column)?;
            let graph =
                OverlapBuilder::from_config(&config.builder, registry.core_codes()).build(rows);
            let edges = graph.overlap_edges();
            (
                output::overlap_tree_json(&edges, &config.overlap_metric.label),
                edges.len(),
                "overlap",
            )
        }
        HierarchySource::Inclusion => {
            let index = InclusionBuilder::from_config(&config.builder)
                .build(&definitions)
                .inclusion_index();
            (output::inclusion_tree_json(&index), index.len(), "inclusion")
        }
    };
    info!(hierarchy, relationships, "Built endpoint hierarchy");

    let output_dir = require("output_dir", &config.output_dir)?;
    fs::create_dir_all(output_dir)?;
    let info_path = output_dir.join(ENDPOINTS_INFO_FILE);
    let tree_path = output_dir.join(ENDPOINT_TREE_FILE);

    for path in [&info_path, &tree_path] {
        if path.exists() {
            return Err(CliError::OutputExists(path.clone()));
        }
    }

    write_outputs(&info_path, &output::metadata_json(&metadata), &tree_path, &tree)?;
    info!(
        info = %info_path.display(),
        tree = %tree_path.display(),
        "Wrote output files"
    );

    Ok(BuildSummary {
        endpoints: registry.len(),
        core_endpoints: registry.core_codes().len(),
        relationships,
        hierarchy,
        info_path,
        tree_path,
    })
}

/// Write both output files, or neither.
///
/// If the second file cannot be created, the first one is removed again.
fn write_outputs(info_path: &Path, info: &Value, tree_path: &Path, tree: &Value) -> Result<()> {
    output::write_json_new(info_path, info)?;

    if let Err(e) = output::write_json_new(tree_path, tree) {
        if let Err(cleanup) = fs::remove_file(info_path) {
            warn!(path = %info_path.display(), error = %cleanup, "Could not remove partial output");
        }
        return Err(e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_outputs_writes_both() {
        let dir = TempDir::new().unwrap();
        let info_path = dir.path().join(ENDPOINTS_INFO_FILE);
        let tree_path = dir.path().join(ENDPOINT_TREE_FILE);

        write_outputs(&info_path, &json!([]), &tree_path, &json!({})).unwrap();
        assert_eq!(fs::read_to_string(&info_path).unwrap(), "[]");
        assert_eq!(fs::read_to_string(&tree_path).unwrap(), "{}");
    }

    #[test]
    fn test_failed_tree_write_removes_info_file() {
        let dir = TempDir::new().unwrap();
        let info_path = dir.path().join(ENDPOINTS_INFO_FILE);
        let tree_path = dir.path().join("missing").join(ENDPOINT_TREE_FILE);

        let result = write_outputs(&info_path, &json!([]), &tree_path, &json!({}));
        assert!(matches!(result, Err(CliError::Io(_))));
        assert!(!info_path.exists());
    }

    #[test]
    fn test_tree_appearing_late_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let info_path = dir.path().join(ENDPOINTS_INFO_FILE);
        let tree_path = dir.path().join(ENDPOINT_TREE_FILE);
        fs::write(&tree_path, "existing").unwrap();

        match write_outputs(&info_path, &json!([]), &tree_path, &json!({})) {
            Err(CliError::OutputExists(path)) => assert_eq!(path, tree_path),
            other => panic!("Expected OutputExists, got {:?}", other),
        }
        assert!(!info_path.exists());
        assert_eq!(fs::read_to_string(&tree_path).unwrap(), "existing");
    }
}
