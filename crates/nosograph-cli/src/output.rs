//! Output shaping and writing.

use crate::error::{CliError, Result};
use colored::*;
use nosograph_domain::{CaseCount, EndpointMetadata, HitCount, InclusionIndex, OverlapEdge, TallyCount};
use serde_json::{json, Map, Value};
use std::fs::OpenOptions;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

fn case_count_json(count: CaseCount) -> Value {
    match count {
        CaseCount::Known(n) => json!(n),
        CaseCount::Unknown => Value::Null,
    }
}

fn hit_count_json(hits: &Option<HitCount>) -> Value {
    match hits {
        Some(HitCount::Reported(n)) => json!(n),
        Some(HitCount::Marker(raw)) => json!(raw),
        None => Value::Null,
    }
}

fn tally_json(count: TallyCount) -> Value {
    match count {
        TallyCount::Observed(n) => json!(n),
        TallyCount::BelowThreshold => json!(count.to_string()),
    }
}

/// Shape endpoint metadata as the endpoints_info.json array.
pub fn metadata_json(records: &[EndpointMetadata]) -> Value {
    let items = records
        .iter()
        .map(|m| {
            let mut obj = json!({
                "endpoint": m.code.as_str(),
                "longname": m.display_name,
                "core_endpoint": m.is_core,
                "n_cases_all": case_count_json(m.case_counts.all),
                "n_cases_female": case_count_json(m.case_counts.female),
                "n_cases_male": case_count_json(m.case_counts.male),
                "uk_meta_analysed": m.uk_meta_analysed,
                "est_meta_analysed": m.est_meta_analysed,
                "gwas_hits": hit_count_json(&m.gws_hits)
            });

            if let (Some(tallies), Some(fields)) = (&m.code_tallies, obj.as_object_mut()) {
                let tallies: Map<String, Value> = tallies
                    .iter()
                    .map(|(system, count)| (system.clone(), tally_json(*count)))
                    .collect();
                fields.insert("code_tallies".to_string(), Value::Object(tallies));
            }

            obj
        })
        .collect();

    Value::Array(items)
}

/// Shape overlap edges as the endpoint_tree.json array, keeping input order.
///
/// `metric_label` is the key used for the overlap metric.
pub fn overlap_tree_json(edges: &[OverlapEdge], metric_label: &str) -> Value {
    let items = edges
        .iter()
        .map(|edge| {
            let mut fields = Map::new();
            fields.insert("parent".to_string(), json!(edge.parent.as_str()));
            fields.insert("child".to_string(), json!(edge.child.as_str()));
            fields.insert("subsets".to_string(), json!(edge.subsets));
            fields.insert(metric_label.to_string(), json!(edge.overlap_metric));
            Value::Object(fields)
        })
        .collect();

    Value::Array(items)
}

/// Shape an inclusion index as the endpoint_tree.json object.
pub fn inclusion_tree_json(index: &InclusionIndex) -> Value {
    let fields: Map<String, Value> = index
        .iter()
        .map(|(code, node)| {
            let parents: Vec<&str> = node.parents.iter().map(|c| c.as_str()).collect();
            let children: Vec<&str> = node.children.iter().map(|c| c.as_str()).collect();
            (
                code.to_string(),
                json!({ "parents": parents, "children": children }),
            )
        })
        .collect();

    Value::Object(fields)
}

/// Write `value` to a new file; an existing file is never overwritten.
pub fn write_json_new(path: &Path, value: &Value) -> Result<()> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => CliError::OutputExists(path.to_path_buf()),
            _ => CliError::Io(e),
        })?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Counts reported after a successful build.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Endpoints in the registry
    pub endpoints: usize,
    /// Core endpoints in the registry
    pub core_endpoints: usize,
    /// Edges (overlap) or index entries (inclusion)
    pub relationships: usize,
    /// Hierarchy source name
    pub hierarchy: &'static str,
    /// Path of endpoints_info.json
    pub info_path: PathBuf,
    /// Path of endpoint_tree.json
    pub tree_path: PathBuf,
}

/// Terminal message formatter.
pub struct Formatter {
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(color_enabled: bool) -> Self {
        Self { color_enabled }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format the build summary.
    pub fn build_summary(&self, summary: &BuildSummary) -> String {
        let relationship_kind = match summary.hierarchy {
            "inclusion" => "index entries",
            _ => "edges",
        };

        [
            self.success(&format!(
                "Processed {} endpoint(s), {} core",
                summary.endpoints, summary.core_endpoints
            )),
            self.success(&format!(
                "Built {} hierarchy with {} {}",
                summary.hierarchy, summary.relationships, relationship_kind
            )),
            self.info(&format!("Wrote {}", summary.info_path.display())),
            self.info(&format!("Wrote {}", summary.tree_path.display())),
        ]
        .join("\n")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            _ => text.to_string(),
        }
    }
}
