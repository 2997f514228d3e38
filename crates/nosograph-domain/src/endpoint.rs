//! Endpoint module - the unit of analysis

use std::borrow::Borrow;
use std::fmt;

/// Unique code identifying an endpoint (e.g. `I9_HYPTENS`)
///
/// Codes are compared byte-for-byte; no case folding or trimming is applied here.
/// Readers are expected to hand in already-trimmed values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndpointCode(String);

impl EndpointCode {
    /// Create a new endpoint code
    ///
    /// # Errors
    /// Returns error if the code is empty
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.is_empty() {
            return Err("Endpoint code cannot be empty".to_string());
        }

        Ok(Self(value))
    }

    /// Get the code as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EndpointCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EndpointCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EndpointCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Static attributes of an endpoint
///
/// Created once per unique code by the endpoint registry and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Unique code
    pub code: EndpointCode,

    /// Human-readable display name
    pub display_name: String,

    /// Whether this endpoint is a primary analysis target
    pub is_core: bool,
}

impl Endpoint {
    /// Create a new endpoint
    pub fn new(code: EndpointCode, display_name: impl Into<String>, is_core: bool) -> Self {
        Self {
            code,
            display_name: display_name.into(),
            is_core,
        }
    }
}
