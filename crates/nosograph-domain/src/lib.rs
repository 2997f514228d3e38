//! Nosograph Domain Layer
//!
//! This crate holds the value types shared by every other layer of Nosograph.
//! It has no external runtime dependencies and performs no I/O.
//!
//! ## Key Concepts
//!
//! - **Endpoint**: A clinical/phenotype definition identified by a unique code
//! - **Case counts**: Per-sex-stratum counts that are either known or unknown
//! - **Endpoint metadata**: One record per endpoint merged from several sources
//! - **Relationship graph**: Directed parent/child edges between endpoints, viewable
//!   either as a flat overlap edge list or as an inclusion index
//! - **Records**: The already-parsed input rows handed in by the I/O layer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counts;
pub mod endpoint;
pub mod metadata;
pub mod records;
pub mod relationship;

// Re-exports for convenience
pub use counts::{CaseCount, HitCount, RawCount, TallyCount};
pub use endpoint::{Endpoint, EndpointCode};
pub use metadata::{CaseCounts, EndpointMetadata, MetaAnalysis};
pub use records::{
    CaseCountRecord, CodeTallyRecord, DefinitionRow, GeneticCorrelationRecord,
    PairwiseOverlapRecord,
};
pub use relationship::{
    EdgeKind, HierarchyNode, InclusionIndex, OverlapEdge, RelationshipEdge, RelationshipGraph,
};
