//! Small-cell disclosure checks

use crate::{DisclosureConfig, DisclosureError};
use nosograph_domain::{CaseCount, RawCount, TallyCount};

/// The disclosure guard validates counts before they are stored
#[derive(Debug, Clone, Copy)]
pub struct DisclosureGuard {
    config: DisclosureConfig,
}

impl Default for DisclosureGuard {
    fn default() -> Self {
        Self::new(DisclosureConfig::default())
    }
}

impl DisclosureGuard {
    /// Create a new guard with the given configuration
    pub fn new(config: DisclosureConfig) -> Self {
        Self { config }
    }

    /// Minimum cell size this guard enforces
    pub fn min_cell_size(&self) -> u64 {
        self.config.min_cell_size
    }

    /// Check a single numeric value against the small-cell rule
    ///
    /// Accepts NaN, exactly zero, and anything at or above the minimum cell
    /// size. Everything else, negative values included, is a violation.
    pub fn check_value(&self, value: f64, context: &str) -> Result<(), DisclosureError> {
        if value.is_nan() || value == 0.0 || value >= self.config.min_cell_size as f64 {
            return Ok(());
        }

        Err(DisclosureError::Violation {
            value,
            context: context.to_string(),
            min_cell_size: self.config.min_cell_size,
        })
    }

    /// Check a case count and convert it for storage
    ///
    /// `None` and NaN become [`CaseCount::Unknown`].
    pub fn check_count(&self, value: Option<f64>, context: &str) -> Result<CaseCount, DisclosureError> {
        let Some(value) = value else {
            return Ok(CaseCount::Unknown);
        };

        self.check_value(value, context)?;

        if value.is_nan() {
            return Ok(CaseCount::Unknown);
        }

        Ok(CaseCount::Known(to_whole(value, context)?))
    }

    /// Check a per-code tally and convert it for storage
    ///
    /// The below-threshold sentinel is always safe and is kept as a sentinel.
    /// A NaN tally carries no information and yields `None`.
    pub fn check_tally(&self, raw: RawCount, context: &str) -> Result<Option<TallyCount>, DisclosureError> {
        match raw {
            RawCount::BelowThreshold => Ok(Some(TallyCount::BelowThreshold)),
            RawCount::Number(value) => {
                self.check_value(value, context)?;
                if value.is_nan() {
                    return Ok(None);
                }
                Ok(Some(TallyCount::Observed(to_whole(value, context)?)))
            }
        }
    }
}

/// Convert an already-checked, non-negative value to a whole count
///
/// Values that are not whole or do not fit in a `u64` are invalid.
fn to_whole(value: f64, context: &str) -> Result<u64, DisclosureError> {
    if !value.is_finite() || value.fract() != 0.0 || value >= u64::MAX as f64 {
        return Err(DisclosureError::InvalidCount {
            value,
            context: context.to_string(),
        });
    }

    Ok(value as u64)
}
