//! Relationship module - directed parent/child edges between endpoints
//!
//! Both hierarchy sources (declared inclusions and pairwise overlap statistics)
//! produce a [`RelationshipGraph`]. Consumers pick the view they need:
//! - [`RelationshipGraph::overlap_edges`]: flat edge list in insertion order
//! - [`RelationshipGraph::inclusion_index`]: code → {parents, children}

use crate::EndpointCode;
use std::collections::{BTreeMap, BTreeSet};

/// How a relationship edge was derived
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeKind {
    /// The parent declares the child in its inclusion list
    Inclusion,

    /// Derived from pairwise overlap statistics
    Overlap {
        /// The child's case set is fully contained in the parent's
        subsets: bool,
        /// Source-defined overlap metric
        overlap_metric: f64,
    },
}

/// A directed edge from parent to child
#[derive(Debug, Clone, PartialEq)]
pub struct RelationshipEdge {
    /// Parent endpoint
    pub parent: EndpointCode,

    /// Child endpoint
    pub child: EndpointCode,

    /// Evidence source
    pub kind: EdgeKind,
}

impl RelationshipEdge {
    /// Create an inclusion edge
    pub fn inclusion(parent: EndpointCode, child: EndpointCode) -> Self {
        Self {
            parent,
            child,
            kind: EdgeKind::Inclusion,
        }
    }

    /// Create an overlap edge
    pub fn overlap(parent: EndpointCode, child: EndpointCode, subsets: bool, overlap_metric: f64) -> Self {
        Self {
            parent,
            child,
            kind: EdgeKind::Overlap {
                subsets,
                overlap_metric,
            },
        }
    }
}

/// Flat view of an overlap-derived edge
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapEdge {
    /// Parent endpoint
    pub parent: EndpointCode,
    /// Child endpoint
    pub child: EndpointCode,
    /// Full-subset classification
    pub subsets: bool,
    /// Source-defined overlap metric
    pub overlap_metric: f64,
}

/// Parents and children of one endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HierarchyNode {
    /// Endpoints that have this endpoint as a child
    pub parents: BTreeSet<EndpointCode>,
    /// Endpoints this endpoint has as children
    pub children: BTreeSet<EndpointCode>,
}

/// Index view: every known code mapped to its parents and children
pub type InclusionIndex = BTreeMap<EndpointCode, HierarchyNode>;

/// Edge-oriented relationship graph
///
/// Nodes are kept separately from edges so that an endpoint with no
/// relationships still appears in the index view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationshipGraph {
    nodes: BTreeSet<EndpointCode>,
    edges: Vec<RelationshipEdge>,
}

impl RelationshipGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node without any edges
    pub fn add_node(&mut self, code: EndpointCode) {
        self.nodes.insert(code);
    }

    /// Append an edge; both endpoints become nodes
    pub fn add_edge(&mut self, edge: RelationshipEdge) {
        self.nodes.insert(edge.parent.clone());
        self.nodes.insert(edge.child.clone());
        self.edges.push(edge);
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> &[RelationshipEdge] {
        &self.edges
    }

    /// All nodes, sorted by code
    pub fn nodes(&self) -> &BTreeSet<EndpointCode> {
        &self.nodes
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the graph has no edges
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Flat view of the overlap-derived edges, in insertion order
    pub fn overlap_edges(&self) -> Vec<OverlapEdge> {
        self.edges
            .iter()
            .filter_map(|edge| match edge.kind {
                EdgeKind::Overlap {
                    subsets,
                    overlap_metric,
                } => Some(OverlapEdge {
                    parent: edge.parent.clone(),
                    child: edge.child.clone(),
                    subsets,
                    overlap_metric,
                }),
                EdgeKind::Inclusion => None,
            })
            .collect()
    }

    /// Index view over every node
    ///
    /// B is in `children(A)` exactly when A is in `parents(B)`, since both
    /// sides are filled from the same edge.
    pub fn inclusion_index(&self) -> InclusionIndex {
        let mut index: InclusionIndex = self
            .nodes
            .iter()
            .map(|code| (code.clone(), HierarchyNode::default()))
            .collect();

        for edge in &self.edges {
            index
                .entry(edge.parent.clone())
                .or_default()
                .children
                .insert(edge.child.clone());
            index
                .entry(edge.child.clone())
                .or_default()
                .parents
                .insert(edge.parent.clone());
        }

        index
    }

    /// Distinct parents of a code
    pub fn parents_of(&self, code: &str) -> BTreeSet<&EndpointCode> {
        self.edges
            .iter()
            .filter(|edge| edge.child.as_str() == code)
            .map(|edge| &edge.parent)
            .collect()
    }

    /// Distinct children of a code
    pub fn children_of(&self, code: &str) -> BTreeSet<&EndpointCode> {
        self.edges
            .iter()
            .filter(|edge| edge.parent.as_str() == code)
            .map(|edge| &edge.child)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> EndpointCode {
        EndpointCode::new(s).unwrap()
    }

    #[test]
    fn test_isolated_node_in_index() {
        let mut graph = RelationshipGraph::new();
        graph.add_node(code("E9"));

        let index = graph.inclusion_index();
        assert_eq!(index.len(), 1);
        assert_eq!(index["E9"], HierarchyNode::default());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_index_is_inverse() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge(RelationshipEdge::inclusion(code("E1"), code("E2")));
        graph.add_edge(RelationshipEdge::inclusion(code("E1"), code("E3")));
        graph.add_edge(RelationshipEdge::inclusion(code("E4"), code("E3")));

        let index = graph.inclusion_index();
        for (code, node) in &index {
            for child in &node.children {
                assert!(index[child].parents.contains(code));
            }
            for parent in &node.parents {
                assert!(index[parent].children.contains(code));
            }
        }
        assert_eq!(index["E3"].parents.len(), 2);
    }

    #[test]
    fn test_overlap_view_keeps_order() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge(RelationshipEdge::overlap(code("B"), code("A"), false, 0.7));
        graph.add_edge(RelationshipEdge::inclusion(code("X"), code("Y")));
        graph.add_edge(RelationshipEdge::overlap(code("A"), code("C"), true, 0.2));

        let edges = graph.overlap_edges();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].parent, code("B"));
        assert!(!edges[0].subsets);
        assert_eq!(edges[1].child, code("C"));
        assert!(edges[1].subsets);
    }

    #[test]
    fn test_parents_and_children_lookup() {
        let mut graph = RelationshipGraph::new();
        graph.add_edge(RelationshipEdge::inclusion(code("E1"), code("E2")));
        graph.add_edge(RelationshipEdge::inclusion(code("E1"), code("E2")));

        assert_eq!(graph.children_of("E1").len(), 1);
        assert_eq!(graph.parents_of("E2").len(), 1);
        assert!(graph.parents_of("E1").is_empty());
        assert_eq!(graph.edge_count(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: the index view is its own inverse for any edge set
        #[test]
        fn test_index_invertibility(pairs in prop::collection::vec((0u8..8, 0u8..8), 0..40)) {
            let mut graph = RelationshipGraph::new();
            for (p, c) in &pairs {
                let parent = EndpointCode::new(format!("E{}", p)).unwrap();
                let child = EndpointCode::new(format!("E{}", c)).unwrap();
                graph.add_edge(RelationshipEdge::inclusion(parent, child));
            }

            let index = graph.inclusion_index();
            for (a, node) in &index {
                for b in &node.children {
                    prop_assert!(index[b].parents.contains(a));
                }
                for b in &node.parents {
                    prop_assert!(index[b].children.contains(a));
                }
            }
        }
    }
}
