//! Inclusion hierarchy - parent/child relations from declared inclusion lists

use crate::BuilderConfig;
use nosograph_domain::{DefinitionRow, EndpointCode, RelationshipEdge, RelationshipGraph};
use std::collections::BTreeSet;
use tracing::info;

/// Builds the hierarchy implied by each endpoint's list of included endpoints
///
/// A row `A` including `B` yields the edge A → B. Every code seen as a row
/// subject or as an inclusion target becomes a node, so a code referenced but
/// never defined still appears (with no children).
///
/// The result does not depend on row order: nodes and edges are collected
/// into sets first and emitted sorted. Repeated declarations collapse into a
/// single edge. Self-inclusions are kept if the data declares them.
#[derive(Debug, Clone, Copy)]
pub struct InclusionBuilder {
    delimiter: char,
}

impl Default for InclusionBuilder {
    fn default() -> Self {
        Self { delimiter: '|' }
    }
}

impl InclusionBuilder {
    /// Create a builder splitting inclusion lists on `delimiter`
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Create a builder from configuration
    pub fn from_config(config: &BuilderConfig) -> Self {
        Self::new(config.inclusion_delimiter)
    }

    /// Build the inclusion graph
    pub fn build<'a, I>(&self, rows: I) -> RelationshipGraph
    where
        I: IntoIterator<Item = &'a DefinitionRow>,
    {
        let (nodes, pairs) = rows.into_iter().fold(
            (BTreeSet::new(), BTreeSet::new()),
            |(mut nodes, mut pairs): (BTreeSet<EndpointCode>, BTreeSet<(EndpointCode, EndpointCode)>), row| {
                nodes.insert(row.code.clone());
                for child in row.included_codes(self.delimiter) {
                    nodes.insert(child.clone());
                    pairs.insert((row.code.clone(), child));
                }
                (nodes, pairs)
            },
        );

        let mut graph = RelationshipGraph::new();
        for code in nodes {
            graph.add_node(code);
        }
        for (parent, child) in pairs {
            graph.add_edge(RelationshipEdge::inclusion(parent, child));
        }

        info!(
            nodes = graph.nodes().len(),
            edges = graph.edge_count(),
            "Built inclusion hierarchy"
        );
        graph
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rows_strategy() -> impl Strategy<Value = Vec<DefinitionRow>> {
        prop::collection::vec((0u8..10, prop::collection::vec(0u8..10, 0..4)), 0..15).prop_map(
            |specs| {
                specs
                    .into_iter()
                    .map(|(subject, includes)| {
                        let include = includes
                            .iter()
                            .map(|n| format!("E{}", n))
                            .collect::<Vec<_>>()
                            .join("|");
                        DefinitionRow::new(
                            EndpointCode::new(format!("E{}", subject)).unwrap(),
                            "",
                            false,
                        )
                        .with_include(include)
                    })
                    .collect()
            },
        )
    }

    proptest! {
        /// Property: the hierarchy is identical under any permutation of rows
        #[test]
        fn test_permutation_invariance(
            (rows, shuffled) in rows_strategy().prop_flat_map(|rows| {
                let shuffled = Just(rows.clone()).prop_shuffle();
                (Just(rows), shuffled)
            })
        ) {
            let builder = InclusionBuilder::default();
            prop_assert_eq!(
                builder.build(&rows).inclusion_index(),
                builder.build(&shuffled).inclusion_index()
            );
        }

        /// Property: B in children(A) iff A in parents(B)
        #[test]
        fn test_invertibility(rows in rows_strategy()) {
            let index = InclusionBuilder::default().build(&rows).inclusion_index();
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
