//! Per-endpoint metadata record

use crate::{CaseCount, Endpoint, EndpointCode, HitCount, TallyCount};
use std::collections::BTreeMap;

/// Meta-analysis collaboration an endpoint may have participated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaAnalysis {
    /// FinnGen + UK Biobank
    Ukbb,

    /// FinnGen + Estonian Biobank
    Est,
}

impl MetaAnalysis {
    /// Get the cohort name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            MetaAnalysis::Ukbb => "ukbb",
            MetaAnalysis::Est => "est",
        }
    }
}

/// Case counts split by sex stratum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CaseCounts {
    /// All individuals
    pub all: CaseCount,
    /// Female individuals
    pub female: CaseCount,
    /// Male individuals
    pub male: CaseCount,
}

/// Metadata gathered for one endpoint
///
/// Every field other than the copied-in endpoint attributes starts at its
/// "not observed" value and is overwritten by the aggregation passes.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointMetadata {
    /// Endpoint code
    pub code: EndpointCode,

    /// Display name (copied from the registry)
    pub display_name: String,

    /// Core flag (copied from the registry)
    pub is_core: bool,

    /// Case counts; unknown until the case-count pass sees this endpoint
    pub case_counts: CaseCounts,

    /// Participated in the UK Biobank meta-analysis
    pub uk_meta_analysed: bool,

    /// Participated in the Estonian Biobank meta-analysis
    pub est_meta_analysed: bool,

    /// GWS hit count; `None` when absent from the genetic-correlation source
    pub gws_hits: Option<HitCount>,

    /// Per coding-system case tallies; `None` when the tally pass did not run
    pub code_tallies: Option<BTreeMap<String, TallyCount>>,
}

impl EndpointMetadata {
    /// Create a metadata record with default "not observed" values
    pub fn from_endpoint(endpoint: &Endpoint) -> Self {
        Self {
            code: endpoint.code.clone(),
            display_name: endpoint.display_name.clone(),
            is_core: endpoint.is_core,
            case_counts: CaseCounts::default(),
            uk_meta_analysed: false,
            est_meta_analysed: false,
            gws_hits: None,
            code_tallies: None,
        }
    }

    /// Check participation in a meta-analysis
    pub fn meta_analysed(&self, cohort: MetaAnalysis) -> bool {
        match cohort {
            MetaAnalysis::Ukbb => self.uk_meta_analysed,
            MetaAnalysis::Est => self.est_meta_analysed,
        }
    }

    /// Mark participation in a meta-analysis
    pub fn set_meta_analysed(&mut self, cohort: MetaAnalysis) {
        match cohort {
            MetaAnalysis::Ukbb => self.uk_meta_analysed = true,
            MetaAnalysis::Est => self.est_meta_analysed = true,
        }
    }

    /// Record a tally for one coding system, replacing any previous value
    pub fn set_code_tally(&mut self, coding_system: impl Into<String>, count: TallyCount) {
        self.code_tallies
            .get_or_insert_with(BTreeMap::new)
            .insert(coding_system.into(), count);
    }
}
