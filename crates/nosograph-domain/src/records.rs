//! Input record shapes
//!
//! These are the rows the I/O layer hands to the builders after parsing.
//! They carry only codes and raw values; identity stays with the registry.

use crate::{EndpointCode, HitCount, RawCount};

/// One row of the endpoint definition source
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionRow {
    /// Endpoint code
    pub code: EndpointCode,

    /// Display name
    pub display_name: String,

    /// Core endpoint marker
    pub is_core: bool,

    /// Raw delimiter-separated list of included codes (may be empty)
    pub include: String,
}

impl DefinitionRow {
    /// Create a definition row with no inclusion list
    pub fn new(code: EndpointCode, display_name: impl Into<String>, is_core: bool) -> Self {
        Self {
            code,
            display_name: display_name.into(),
            is_core,
            include: String::new(),
        }
    }

    /// Set the raw inclusion list
    pub fn with_include(mut self, include: impl Into<String>) -> Self {
        self.include = include.into();
        self
    }

    /// Split the inclusion list on `delimiter`
    ///
    /// Tokens are trimmed and empty tokens are dropped, so an empty list
    /// yields nothing.
    pub fn included_codes(&self, delimiter: char) -> impl Iterator<Item = EndpointCode> + '_ {
        self.include
            .split(delimiter)
            .filter_map(|token| EndpointCode::new(token.trim()).ok())
    }
}

/// Case counts for one endpoint from the statistics source
///
/// `None` means the field was missing or null.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseCountRecord {
    /// Endpoint code
    pub code: EndpointCode,
    /// Count over all individuals
    pub all: Option<f64>,
    /// Count over female individuals
    pub female: Option<f64>,
    /// Count over male individuals
    pub male: Option<f64>,
}

/// One row of the genetic-correlation source, keyed by its first phenotype
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticCorrelationRecord {
    /// First phenotype code
    pub code_a: EndpointCode,

    /// Reported number of GWS hits for `code_a`
    pub hits: HitCount,
}

/// One row of the pairwise overlap source
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseOverlapRecord {
    /// Candidate parent
    pub code_a: EndpointCode,

    /// Candidate child
    pub code_b: EndpointCode,

    /// Share of B's cases that are also A's cases (1.0 means B is a full subset)
    pub full_subset_ratio: f64,

    /// Source-defined overlap metric compared against the threshold
    pub overlap_metric: f64,
}

/// One coded-case tally row for an endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct CodeTallyRecord {
    /// Endpoint the tally table belongs to
    pub endpoint: EndpointCode,

    /// Coding system tag (e.g. `ICD10`)
    pub coding_system: String,

    /// Raw count or below-threshold sentinel
    pub count: RawCount,
}
