//! Endpoint registry - canonical code → attributes mapping

use nosograph_domain::{DefinitionRow, Endpoint, EndpointCode};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Registry of all endpoints declared in the definition source
///
/// The registry is the sole owner of endpoint identity; every other component
/// refers to endpoints by code only.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: BTreeMap<EndpointCode, Endpoint>,
}

impl EndpointRegistry {
    /// Build the registry from definition rows
    ///
    /// A code declared more than once keeps the attributes of its last row.
    /// Conflicting duplicates are logged.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a DefinitionRow>,
    {
        let mut endpoints = BTreeMap::new();

        for row in rows {
            let endpoint = Endpoint::new(row.code.clone(), row.display_name.clone(), row.is_core);
            if let Some(previous) = endpoints.insert(row.code.clone(), endpoint) {
                if previous.display_name != row.display_name || previous.is_core != row.is_core {
                    warn!(
                        code = %row.code,
                        "Duplicate endpoint definition with conflicting attributes, keeping the last one"
                    );
                }
            }
        }

        let registry = Self { endpoints };
        info!(
            endpoints = registry.len(),
            core = registry.core_count(),
            "Built endpoint registry"
        );
        registry
    }

    /// Look up an endpoint by code
    pub fn get(&self, code: &str) -> Option<&Endpoint> {
        self.endpoints.get(code)
    }

    /// Check whether a code is registered
    pub fn contains(&self, code: &str) -> bool {
        self.endpoints.contains_key(code)
    }

    /// Number of registered endpoints
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Iterate over endpoints, sorted by code
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.values()
    }

    /// Codes of all endpoints flagged as core
    pub fn core_codes(&self) -> BTreeSet<EndpointCode> {
        self.endpoints
            .values()
            .filter(|endpoint| endpoint.is_core)
            .map(|endpoint| endpoint.code.clone())
            .collect()
    }

    fn core_count(&self) -> usize {
        self.endpoints.values().filter(|endpoint| endpoint.is_core).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, name: &str, is_core: bool) -> DefinitionRow {
        DefinitionRow::new(EndpointCode::new(code).unwrap(), name, is_core)
    }

    #[test]
    fn test_lookup() {
        let rows = vec![row("E1", "One", true), row("E2", "Two", false)];
        let registry = EndpointRegistry::from_rows(&rows);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("E1").unwrap().display_name, "One");
        assert!(registry.contains("E2"));
        assert!(registry.get("E3").is_none());
    }

    #[test]
    fn test_core_codes() {
        let rows = vec![row("E1", "One", true), row("E2", "Two", false), row("E3", "Three", true)];
        let registry = EndpointRegistry::from_rows(&rows);

        let core: Vec<_> = registry.core_codes().into_iter().map(|c| c.to_string()).collect();
        assert_eq!(core, vec!["E1", "E3"]);
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let rows = vec![row("E1", "Old name", false), row("E1", "New name", true)];
        let registry = EndpointRegistry::from_rows(&rows);

        assert_eq!(registry.len(), 1);
        let endpoint = registry.get("E1").unwrap();
        assert_eq!(endpoint.display_name, "New name");
        assert!(endpoint.is_core);
    }

    #[test]
    fn test_empty_registry() {
        let registry = EndpointRegistry::from_rows(&Vec::<DefinitionRow>::new());
        assert!(registry.is_empty());
        assert!(registry.core_codes().is_empty());
    }
}
