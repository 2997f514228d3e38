//! Nosograph Builder
//!
//! Derives the endpoint relationship graph and the per-endpoint metadata
//! catalog from already-parsed source records.
//!
//! # Architecture
//!
//! ```text
//! DefinitionRow ─┬─> EndpointRegistry ──> MetadataAggregator ──> Vec<EndpointMetadata>
//!                │          │                    ▲
//!                │          │ core_codes()       └── DisclosureGuard
//!                │          ▼
//!                │   OverlapBuilder <── PairwiseOverlapRecord ──> RelationshipGraph
//!                └─> InclusionBuilder ───────────────────────────> RelationshipGraph
//! ```
//!
//! All components are single-threaded and perform no I/O. The only failures
//! are a disclosure violation and a case-count row for an unknown endpoint;
//! both abort the run.
//!
//! # Example Usage
//!
//! ```
//! use nosograph_builder::{EndpointRegistry, InclusionBuilder};
//! use nosograph_domain::{DefinitionRow, EndpointCode};
//!
//! let rows = vec![
//!     DefinitionRow::new(EndpointCode::new("E1").unwrap(), "One", true).with_include("E2|E3"),
//!     DefinitionRow::new(EndpointCode::new("E2").unwrap(), "Two", false),
//! ];
//!
//! let registry = EndpointRegistry::from_rows(&rows);
//! assert_eq!(registry.len(), 2);
//!
//! let index = InclusionBuilder::default().build(&rows).inclusion_index();
//! assert_eq!(index["E1"].children.len(), 2);
//! assert!(index["E3"].children.is_empty());
//! ```

#![warn(missing_docs)]

mod aggregator;
mod config;
mod error;
mod inclusion;
mod overlap;
mod registry;

pub use aggregator::MetadataAggregator;
pub use config::{BuilderConfig, HierarchySource};
pub use error::BuildError;
pub use inclusion::InclusionBuilder;
pub use overlap::{classify, OverlapBuilder};
pub use registry::EndpointRegistry;
