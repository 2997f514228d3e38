//! Overlap hierarchy - parent/child relations from pairwise case overlap

use crate::BuilderConfig;
use nosograph_domain::{EndpointCode, PairwiseOverlapRecord, RelationshipEdge, RelationshipGraph};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Classify one ordered pair
///
/// Returns `Some(true)` for a full subset (ratio exactly 1.0), `Some(false)`
/// for a partial subset (metric at or above `threshold`), and `None` otherwise.
/// The full-subset test runs first, so it wins whatever the metric is.
pub fn classify(record: &PairwiseOverlapRecord, threshold: f64) -> Option<bool> {
    if record.full_subset_ratio == 1.0 {
        Some(true)
    } else if record.overlap_metric >= threshold {
        Some(false)
    } else {
        None
    }
}

/// Builds a flat list of directed edges from pairwise overlap statistics
///
/// Edges are emitted in input row order.
#[derive(Debug, Clone)]
pub struct OverlapBuilder {
    threshold: f64,
    eligible: Option<BTreeSet<EndpointCode>>,
}

impl OverlapBuilder {
    /// Create a builder with the given subset threshold and no eligibility filter
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            eligible: None,
        }
    }

    /// Create a builder from configuration
    ///
    /// `core_codes` is applied as the eligibility filter when the configuration
    /// restricts the hierarchy to core endpoints.
    pub fn from_config(config: &BuilderConfig, core_codes: BTreeSet<EndpointCode>) -> Self {
        let builder = Self::new(config.subset_threshold);
        if config.restrict_to_core {
            builder.with_eligible(core_codes)
        } else {
            builder
        }
    }

    /// Only keep rows where both endpoints are in `eligible`
    pub fn with_eligible(mut self, eligible: BTreeSet<EndpointCode>) -> Self {
        self.eligible = Some(eligible);
        self
    }

    fn is_eligible(&self, code: &EndpointCode) -> bool {
        self.eligible
            .as_ref()
            .map_or(true, |eligible| eligible.contains(code))
    }

    /// Build the overlap graph
    pub fn build<I>(&self, rows: I) -> RelationshipGraph
    where
        I: IntoIterator<Item = PairwiseOverlapRecord>,
    {
        let mut graph = RelationshipGraph::new();
        let mut self_pairs = 0usize;
        let mut ineligible = 0usize;
        let mut unrelated = 0usize;

        for row in rows {
            if row.code_a == row.code_b {
                self_pairs += 1;
                continue;
            }

            if !self.is_eligible(&row.code_a) || !self.is_eligible(&row.code_b) {
                ineligible += 1;
                continue;
            }

            match classify(&row, self.threshold) {
                Some(subsets) => graph.add_edge(RelationshipEdge::overlap(
                    row.code_a,
                    row.code_b,
                    subsets,
                    row.overlap_metric,
                )),
                None => unrelated += 1,
            }
        }

        debug!(self_pairs, ineligible, unrelated, "Skipped overlap rows");
        info!(
            edges = graph.edge_count(),
            threshold = self.threshold,
            "Built overlap hierarchy"
        );
        graph
    }
}
