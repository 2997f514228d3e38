//! Metadata aggregation across independent sources

use crate::{BuildError, EndpointRegistry};
use nosograph_domain::{
    CaseCountRecord, CaseCounts, CodeTallyRecord, EndpointCode, EndpointMetadata,
    GeneticCorrelationRecord, MetaAnalysis,
};
use nosograph_gatekeeper::DisclosureGuard;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Merges per-endpoint facts from several sources into one record per endpoint
///
/// Passes may run in any order and may be re-run; each write overwrites the
/// previous value for the same field (last pass wins).
///
/// # Examples
///
/// ```
/// use nosograph_builder::{EndpointRegistry, MetadataAggregator};
/// use nosograph_domain::{CaseCount, CaseCountRecord, DefinitionRow, EndpointCode};
/// use nosograph_gatekeeper::DisclosureGuard;
///
/// let code = EndpointCode::new("E1").unwrap();
/// let registry = EndpointRegistry::from_rows(&[DefinitionRow::new(code.clone(), "One", true)]);
///
/// let mut aggregator = MetadataAggregator::new(&registry, DisclosureGuard::default());
/// aggregator.apply_case_counts([CaseCountRecord {
///     code,
///     all: Some(120.0),
///     female: Some(0.0),
///     male: None,
/// }])?;
///
/// let records = aggregator.finish();
/// assert_eq!(records[0].case_counts.all, CaseCount::Known(120));
/// assert_eq!(records[0].case_counts.male, CaseCount::Unknown);
/// # Ok::<(), nosograph_builder::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MetadataAggregator {
    guard: DisclosureGuard,
    records: BTreeMap<EndpointCode, EndpointMetadata>,
}

impl MetadataAggregator {
    /// Start from the registry's attributes with every fact unobserved
    pub fn new(registry: &EndpointRegistry, guard: DisclosureGuard) -> Self {
        let records = registry
            .iter()
            .map(|endpoint| (endpoint.code.clone(), EndpointMetadata::from_endpoint(endpoint)))
            .collect();

        Self { guard, records }
    }

    /// Case-count pass
    ///
    /// Every count is checked before the endpoint is looked up, so a
    /// disclosure violation is reported even for an unknown code.
    ///
    /// # Errors
    /// - [`BuildError::Disclosure`] if any count fails the guard
    /// - [`BuildError::MissingEndpointReference`] if a code is not registered
    pub fn apply_case_counts<I>(&mut self, records: I) -> Result<usize, BuildError>
    where
        I: IntoIterator<Item = CaseCountRecord>,
    {
        let mut applied = 0;

        for record in records {
            let counts = CaseCounts {
                all: self
                    .guard
                    .check_count(record.all, &format!("{}/n_cases_all", record.code))?,
                female: self
                    .guard
                    .check_count(record.female, &format!("{}/n_cases_female", record.code))?,
                male: self
                    .guard
                    .check_count(record.male, &format!("{}/n_cases_male", record.code))?,
            };

            let metadata = self
                .records
                .get_mut(record.code.as_str())
                .ok_or_else(|| BuildError::MissingEndpointReference {
                    code: record.code.clone(),
                })?;
            metadata.case_counts = counts;
            applied += 1;
        }

        info!(applied, "Applied case counts");
        Ok(applied)
    }

    /// Meta-analysis participation pass for one cohort
    ///
    /// Codes not in the registry are ignored. Returns the number of endpoints marked.
    pub fn apply_meta_analysis<I>(&mut self, cohort: MetaAnalysis, codes: I) -> usize
    where
        I: IntoIterator<Item = EndpointCode>,
    {
        let mut applied = 0;

        for code in codes {
            match self.records.get_mut(code.as_str()) {
                Some(metadata) => {
                    metadata.set_meta_analysed(cohort);
                    applied += 1;
                }
                None => debug!(%code, cohort = cohort.as_str(), "Skipping meta-analysis row for unknown endpoint"),
            }
        }

        info!(applied, cohort = cohort.as_str(), "Applied meta-analysis participation");
        applied
    }

    /// Genome-wide-significant hits pass
    ///
    /// Keyed by the first phenotype of each row; a later row for the same code
    /// replaces an earlier one. Codes not in the registry are ignored.
    pub fn apply_gws_hits<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = GeneticCorrelationRecord>,
    {
        let mut applied = 0;

        for record in records {
            match self.records.get_mut(record.code_a.as_str()) {
                Some(metadata) => {
                    metadata.gws_hits = Some(record.hits);
                    applied += 1;
                }
                None => debug!(code = %record.code_a, "Skipping GWS hits row for unknown endpoint"),
            }
        }

        info!(applied, "Applied GWS hit counts");
        applied
    }

    /// Per-code case tally pass
    ///
    /// Running this pass gives every endpoint a (possibly empty) tally mapping.
    /// Counts are checked before the endpoint lookup; rows for unknown
    /// endpoints are then ignored.
    ///
    /// # Errors
    /// Returns [`BuildError::Disclosure`] if any count fails the guard
    pub fn apply_code_tallies<I>(&mut self, records: I) -> Result<usize, BuildError>
    where
        I: IntoIterator<Item = CodeTallyRecord>,
    {
        for metadata in self.records.values_mut() {
            metadata.code_tallies.get_or_insert_with(BTreeMap::new);
        }

        let mut applied = 0;

        for record in records {
            let context = format!("{}/{}", record.endpoint, record.coding_system);
            let Some(count) = self.guard.check_tally(record.count, &context)? else {
                debug!(%context, "Skipping not-a-number tally");
                continue;
            };

            match self.records.get_mut(record.endpoint.as_str()) {
                Some(metadata) => {
                    metadata.set_code_tally(record.coding_system, count);
                    applied += 1;
                }
                None => debug!(code = %record.endpoint, "Skipping tally for unknown endpoint"),
            }
        }

        info!(applied, "Applied per-code case tallies");
        Ok(applied)
    }

    /// Look up the current record for a code
    pub fn get(&self, code: &str) -> Option<&EndpointMetadata> {
        self.records.get(code)
    }

    /// Finalize into records sorted by code
    pub fn finish(self) -> Vec<EndpointMetadata> {
        self.records.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nosograph_domain::{CaseCount, DefinitionRow, HitCount, RawCount, TallyCount};
    use nosograph_gatekeeper::DisclosureError;

    fn code(s: &str) -> EndpointCode {
        EndpointCode::new(s).unwrap()
    }

    fn aggregator() -> MetadataAggregator {
        let rows = vec![
            DefinitionRow::new(code("E1"), "One", true),
            DefinitionRow::new(code("E2"), "Two", false),
        ];
        let registry = EndpointRegistry::from_rows(&rows);
        MetadataAggregator::new(&registry, DisclosureGuard::default())
    }

    fn counts(c: &str, all: Option<f64>) -> CaseCountRecord {
        CaseCountRecord {
            code: code(c),
            all,
            female: None,
            male: None,
        }
    }

    #[test]
    fn test_defaults_before_any_pass() {
        let records = aggregator().finish();
        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.case_counts, CaseCounts::default());
            assert!(!record.uk_meta_analysed);
            assert!(!record.est_meta_analysed);
            assert!(record.gws_hits.is_none());
            assert!(record.code_tallies.is_none());
        }
    }

    #[test]
    fn test_case_counts_stored_as_given() {
        let mut agg = aggregator();
        agg.apply_case_counts([counts("E1", Some(0.0)), counts("E2", Some(5.0))])
            .unwrap();

        assert_eq!(agg.get("E1").unwrap().case_counts.all, CaseCount::Known(0));
        assert_eq!(agg.get("E2").unwrap().case_counts.all, CaseCount::Known(5));
    }

    #[test]
    fn test_case_count_violation_is_fatal() {
        let mut agg = aggregator();
        let err = agg.apply_case_counts([counts("E1", Some(3.0))]).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Disclosure(DisclosureError::Violation { .. })
        ));
        assert_eq!(agg.get("E1").unwrap().case_counts.all, CaseCount::Unknown);
    }

    #[test]
    fn test_case_count_unknown_endpoint_is_fatal() {
        let mut agg = aggregator();
        let err = agg.apply_case_counts([counts("E9", Some(10.0))]).unwrap_err();
        match err {
            BuildError::MissingEndpointReference { code } => assert_eq!(code.as_str(), "E9"),
            other => panic!("Expected MissingEndpointReference, got {:?}", other),
        }
    }

    #[test]
    fn test_violation_reported_before_missing_reference() {
        let mut agg = aggregator();
        let err = agg.apply_case_counts([counts("E9", Some(2.0))]).unwrap_err();
        assert!(matches!(err, BuildError::Disclosure(_)));
    }

    #[test]
    fn test_meta_analysis_pass() {
        let mut agg = aggregator();
        let applied = agg.apply_meta_analysis(MetaAnalysis::Ukbb, [code("E1"), code("E9")]);

        assert_eq!(applied, 1);
        assert!(agg.get("E1").unwrap().uk_meta_analysed);
        assert!(!agg.get("E1").unwrap().est_meta_analysed);
        assert!(!agg.get("E2").unwrap().uk_meta_analysed);
    }

    #[test]
    fn test_gws_hits_not_found_vs_zero() {
        let mut agg = aggregator();
        agg.apply_gws_hits([
            GeneticCorrelationRecord {
                code_a: code("E1"),
                hits: HitCount::Reported(0),
            },
            GeneticCorrelationRecord {
                code_a: code("E9"),
                hits: HitCount::Reported(7),
            },
        ]);

        assert_eq!(agg.get("E1").unwrap().gws_hits, Some(HitCount::Reported(0)));
        assert_eq!(agg.get("E2").unwrap().gws_hits, None);
    }

    #[test]
    fn test_gws_hits_last_row_wins() {
        let mut agg = aggregator();
        agg.apply_gws_hits([
            GeneticCorrelationRecord {
                code_a: code("E1"),
                hits: HitCount::Reported(4),
            },
            GeneticCorrelationRecord {
                code_a: code("E1"),
                hits: HitCount::Marker("NA".to_string()),
            },
        ]);

        assert_eq!(
            agg.get("E1").unwrap().gws_hits,
            Some(HitCount::Marker("NA".to_string()))
        );
    }

    #[test]
    fn test_code_tallies() {
        let mut agg = aggregator();
        let applied = agg
            .apply_code_tallies([
                CodeTallyRecord {
                    endpoint: code("E1"),
                    coding_system: "ICD10".to_string(),
                    count: RawCount::Number(25.0),
                },
                CodeTallyRecord {
                    endpoint: code("E1"),
                    coding_system: "ICD9".to_string(),
                    count: RawCount::BelowThreshold,
                },
                CodeTallyRecord {
                    endpoint: code("E9"),
                    coding_system: "ICD10".to_string(),
                    count: RawCount::Number(10.0),
                },
            ])
            .unwrap();

        assert_eq!(applied, 2);
        let tallies = agg.get("E1").unwrap().code_tallies.clone().unwrap();
        assert_eq!(tallies["ICD10"], TallyCount::Observed(25));
        assert_eq!(tallies["ICD9"], TallyCount::BelowThreshold);
        assert_eq!(agg.get("E2").unwrap().code_tallies, Some(BTreeMap::new()));
    }

    #[test]
    fn test_code_tally_violation_is_fatal_even_for_unknown_endpoint() {
        let mut agg = aggregator();
        let result = agg.apply_code_tallies([CodeTallyRecord {
            endpoint: code("E9"),
            coding_system: "ICD10".to_string(),
            count: RawCount::Number(1.0),
        }]);
        assert!(matches!(result, Err(BuildError::Disclosure(_))));
    }

    #[test]
    fn test_rerun_overwrites() {
        let mut agg = aggregator();
        agg.apply_case_counts([counts("E1", Some(10.0))]).unwrap();
        agg.apply_case_counts([counts("E1", Some(12.0))]).unwrap();
        assert_eq!(agg.get("E1").unwrap().case_counts.all, CaseCount::Known(12));
    }
}
