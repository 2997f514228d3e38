//! Nosograph Gatekeeper
//!
//! Statistical-disclosure control for individual-level counts.
//!
//! Every count of individuals must pass through the [`DisclosureGuard`]
//! before it is stored or emitted. A count is safe when it is:
//! - missing or not-a-number
//! - exactly zero
//! - at least the minimum cell size (5 by default)
//!
//! Anything else is a [`DisclosureError::Violation`], which callers must treat
//! as fatal for the whole run.
//!
//! # Examples
//!
//! ```
//! use nosograph_domain::CaseCount;
//! use nosograph_gatekeeper::{DisclosureConfig, DisclosureGuard};
//!
//! let guard = DisclosureGuard::new(DisclosureConfig::default());
//!
//! assert_eq!(guard.check_count(Some(12.0), "E1/all").unwrap(), CaseCount::Known(12));
//! assert!(guard.check_count(Some(3.0), "E1/all").is_err());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod guard;

pub use config::DisclosureConfig;
pub use error::DisclosureError;
pub use guard::DisclosureGuard;
