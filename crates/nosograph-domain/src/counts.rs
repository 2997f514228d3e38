//! Count value types
//!
//! Individual-level counts move through the system in three shapes:
//! - [`RawCount`]: what a source reported, before any disclosure check
//! - [`CaseCount`] / [`TallyCount`]: what is allowed to be stored after the check
//! - [`HitCount`]: genome-wide-significant hit counts, which are not individual-level
//!   and are stored as reported

use std::fmt;

/// Sentinel text used by sources for "fewer than the disclosure threshold"
pub const BELOW_THRESHOLD_SENTINEL: &str = "<5";

/// A count as reported by a source, before the disclosure check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawCount {
    /// A native number (may be NaN)
    Number(f64),

    /// The source already replaced the value with a "below threshold" sentinel
    BelowThreshold,
}

impl RawCount {
    /// Parse a raw textual count
    ///
    /// The sentinel is recognised verbatim and never decoded into a number.
    ///
    /// # Errors
    /// Returns error if the text is neither the sentinel nor a number
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s == BELOW_THRESHOLD_SENTINEL {
            return Ok(RawCount::BelowThreshold);
        }

        s.parse::<f64>()
            .map(RawCount::Number)
            .map_err(|_| format!("Invalid count: '{}'", s))
    }
}

/// A case count that has passed the disclosure check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseCount {
    /// Not reported, or reported as not-a-number
    #[default]
    Unknown,

    /// Known count: zero or at least the minimum cell size
    Known(u64),
}

impl CaseCount {
    /// Get the known value, if any
    pub fn value(&self) -> Option<u64> {
        match self {
            CaseCount::Unknown => None,
            CaseCount::Known(n) => Some(*n),
        }
    }

    /// Check whether the count is known
    pub fn is_known(&self) -> bool {
        matches!(self, CaseCount::Known(_))
    }
}

/// A per-code case tally that has passed the disclosure check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TallyCount {
    /// Observed count: zero or at least the minimum cell size
    Observed(u64),

    /// Below the disclosure threshold; the underlying number is never kept
    BelowThreshold,
}

impl fmt::Display for TallyCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TallyCount::Observed(n) => write!(f, "{}", n),
            TallyCount::BelowThreshold => f.write_str(BELOW_THRESHOLD_SENTINEL),
        }
    }
}

/// Number of genome-wide-significant hits reported for an endpoint
///
/// "Not found in the source" is modelled outside this type as `Option::None`,
/// so `Reported(0)` always means an explicit zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HitCount {
    /// A whole, non-negative number of hits
    Reported(u64),

    /// A non-numeric or absent marker, kept verbatim
    Marker(String),
}

impl HitCount {
    /// Interpret a raw value from the genetic-correlation source
    pub fn parse(raw: &str) -> Self {
        match raw.trim().parse::<u64>() {
            Ok(n) => HitCount::Reported(n),
            Err(_) => HitCount::Marker(raw.to_string()),
        }
    }
}
