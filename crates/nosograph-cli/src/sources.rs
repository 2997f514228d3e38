//! Source file readers.
//!
//! Each reader turns one input file into the record shapes the builders
//! consume. Readers only parse; all validation of counts happens later in the
//! disclosure guard.

use crate::error::{CliError, Result};
use nosograph_domain::{
    CaseCountRecord, CodeTallyRecord, DefinitionRow, EndpointCode, GeneticCorrelationRecord,
    HitCount, PairwiseOverlapRecord, RawCount,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct DefinitionCsvRow {
    #[serde(rename = "NAME")]
    name: String,
    #[serde(rename = "LONGNAME")]
    longname: String,
    #[serde(rename = "CORE_ENDPOINTS")]
    core_endpoints: String,
    #[serde(rename = "INCLUDE", default)]
    include: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BasicStats {
    stats: BTreeMap<String, StatsEntry>,
}

#[derive(Debug, Deserialize)]
struct StatsEntry {
    #[serde(default, deserialize_with = "stats_count")]
    nindivs_all: Option<f64>,
    #[serde(default, deserialize_with = "stats_count")]
    nindivs_female: Option<f64>,
    #[serde(default, deserialize_with = "stats_count")]
    nindivs_male: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatsValue {
    Number(f64),
    Token(String),
}

/// Deserialize a count that may be a number, null, or one of the non-finite
/// tokens restored by [`quote_non_finite`].
fn stats_count<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<StatsValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(StatsValue::Number(value)) => Ok(Some(value)),
        Some(StatsValue::Token(token)) => match token.as_str() {
            "NaN" => Ok(Some(f64::NAN)),
            "Infinity" => Ok(Some(f64::INFINITY)),
            "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
            other => Err(serde::de::Error::custom(format!(
                "invalid count '{}'",
                other
            ))),
        },
    }
}

const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Quote bare `NaN`, `Infinity` and `-Infinity` tokens so the text parses as
/// strict JSON. String literals are left untouched.
fn quote_non_finite(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| rest.starts_with(*t)) {
            out.push('"');
            out.push_str(token);
            out.push('"');
            rest = &rest[token.len()..];
            continue;
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

#[derive(Debug, Deserialize)]
struct MetaResultRow {
    phenocode: String,
}

#[derive(Debug, Deserialize)]
struct GeneticCorrelationRow {
    pheno1: String,
    n_gwsig_1: String,
}

#[derive(Debug, Deserialize)]
struct CodeTallyRow {
    coding_system: String,
    n_cases: String,
}

fn parse_code(path: &Path, line: usize, value: &str) -> Result<EndpointCode> {
    EndpointCode::new(value.trim())
        .map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))
}

fn open_csv(path: &Path, delimiter: u8) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| CliError::source_error(path, e.to_string()))
}

/// Read endpoint definitions (CSV).
///
/// The core flag is set when `CORE_ENDPOINTS` is exactly `yes`. The
/// `INCLUDE` column is optional.
pub fn read_definitions(path: &Path) -> Result<Vec<DefinitionRow>> {
    let mut reader = open_csv(path, b',')?;
    let mut rows = Vec::new();

    for (idx, result) in reader.deserialize::<DefinitionCsvRow>().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))?;
        let code = parse_code(path, line, &row.name)?;
        rows.push(
            DefinitionRow::new(code, row.longname, row.core_endpoints == "yes")
                .with_include(row.include.unwrap_or_default()),
        );
    }

    info!(path = %path.display(), rows = rows.len(), "Read endpoint definitions");
    Ok(rows)
}

/// Read basic case-count statistics (JSON).
///
/// Counts may be numbers, `null`, or the bare `NaN`/`Infinity` tokens that
/// statistics exporters write for missing values.
pub fn read_case_counts(path: &Path) -> Result<Vec<CaseCountRecord>> {
    let contents =
        fs::read_to_string(path).map_err(|e| CliError::source_error(path, e.to_string()))?;
    let stats: BasicStats = serde_json::from_str(&quote_non_finite(&contents))?;

    let records = stats
        .stats
        .into_iter()
        .map(|(code, entry)| -> Result<CaseCountRecord> {
            Ok(CaseCountRecord {
                code: EndpointCode::new(code).map_err(|e| CliError::source_error(path, e))?,
                all: entry.nindivs_all,
                female: entry.nindivs_female,
                male: entry.nindivs_male,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!(path = %path.display(), endpoints = records.len(), "Read basic statistics");
    Ok(records)
}

/// Read the endpoint codes of a meta-analysis result file (TSV).
pub fn read_meta_codes(path: &Path) -> Result<Vec<EndpointCode>> {
    let mut reader = open_csv(path, b'\t')?;
    let mut codes = Vec::new();

    for (idx, result) in reader.deserialize::<MetaResultRow>().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))?;
        codes.push(parse_code(path, line, &row.phenocode)?);
    }

    info!(path = %path.display(), rows = codes.len(), "Read meta-analysis results");
    Ok(codes)
}

/// Read GWS hit counts from the genetic correlations (CSV).
///
/// The hit count is kept as reported; non-numeric values become markers.
pub fn read_gws_hits(path: &Path) -> Result<Vec<GeneticCorrelationRecord>> {
    let mut reader = open_csv(path, b',')?;
    let mut records = Vec::new();

    for (idx, result) in reader.deserialize::<GeneticCorrelationRow>().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))?;
        records.push(GeneticCorrelationRecord {
            code_a: parse_code(path, line, &row.pheno1)?,
            hits: HitCount::parse(&row.n_gwsig_1),
        });
    }

    info!(path = %path.display(), rows = records.len(), "Read genetic correlations");
    Ok(records)
}

/// Read pairwise overlap statistics (CSV).
///
/// `metric_column` names the column holding the overlap metric; it changes
/// between data releases.
pub fn read_overlaps(path: &Path, metric_column: &str) -> Result<Vec<PairwiseOverlapRecord>> {
    let mut reader = open_csv(path, b',')?;
    let headers = reader.headers()?.clone();

    let column = |name: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CliError::source_error(path, format!("missing column '{}'", name)))
    };
    let idx_a = column("endpoint_a")?;
    let idx_b = column("endpoint_b")?;
    let idx_ratio = column("ratio_shared_of_b")?;
    let idx_metric = column(metric_column)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let row = result.map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))?;

        let field = |i: usize| row.get(i).unwrap_or("").trim();
        let number = |i: usize, name: &str| -> Result<f64> {
            field(i).parse::<f64>().map_err(|_| {
                CliError::source_error(
                    path,
                    format!("row {}: invalid number '{}' in {}", line, field(i), name),
                )
            })
        };

        let overlap_metric = number(idx_metric, metric_column)?;
        if !overlap_metric.is_finite() {
            return Err(CliError::source_error(
                path,
                format!("row {}: non-finite value '{}' in {}", line, field(idx_metric), metric_column),
            ));
        }

        records.push(PairwiseOverlapRecord {
            code_a: parse_code(path, line, field(idx_a))?,
            code_b: parse_code(path, line, field(idx_b))?,
            full_subset_ratio: number(idx_ratio, "ratio_shared_of_b")?,
            overlap_metric,
        });
    }

    info!(path = %path.display(), rows = records.len(), "Read endpoint correlations");
    Ok(records)
}

/// Read every `<ENDPOINT>.csv` tally table in `dir`.
///
/// Files are read in name order; other files are ignored.
pub fn read_code_tallies(dir: &Path) -> Result<Vec<CodeTallyRecord>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| CliError::source_error(dir, e.to_string()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "csv"))
        .collect();
    paths.sort();

    let mut records = Vec::new();
    for path in &paths {
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CliError::source_error(path, "file name is not valid UTF-8"))?;
        let endpoint = EndpointCode::new(stem).map_err(|e| CliError::source_error(path, e))?;

        let mut reader = open_csv(path, b',')?;
        for (idx, result) in reader.deserialize::<CodeTallyRow>().enumerate() {
            let line = idx + 2;
            let row =
                result.map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))?;
            let count = RawCount::parse(&row.n_cases)
                .map_err(|e| CliError::source_error(path, format!("row {}: {}", line, e)))?;
            records.push(CodeTallyRecord {
                endpoint: endpoint.clone(),
                coding_system: row.coding_system.trim().to_string(),
                count,
            });
        }
        debug!(path = %path.display(), "Read code tally table");
    }

    info!(tables = paths.len(), rows = records.len(), "Read per-code case tallies");
    Ok(records)
}
