//! Gatekeeper error types

use thiserror::Error;

/// Errors raised by the disclosure guard
///
/// Both variants are fatal: the run must stop without emitting output.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DisclosureError {
    /// A count would reveal individual-level data
    #[error("Individual-level data detected: {value} in {context} (minimum cell size {min_cell_size})")]
    Violation {
        /// Offending value
        value: f64,
        /// Where the value came from (endpoint and field)
        context: String,
        /// Configured minimum cell size
        min_cell_size: u64,
    },

    /// A count passed the small-cell rule but is not a whole number
    #[error("Invalid count: {value} in {context} is not a whole number")]
    InvalidCount {
        /// Offending value
        value: f64,
        /// Where the value came from (endpoint and field)
        context: String,
    },
}
