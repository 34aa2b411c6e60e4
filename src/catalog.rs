//! Catalog of exposable collections.
//!
//! The catalog is an external collaborator: other parts of the deployment
//! own and mutate it. The capability pipeline only ever reads it through
//! [`CatalogView`], taking one snapshot per document build. Two reads within
//! the same request are not guaranteed to observe the same state; callers
//! that need joint consistency must take a single snapshot and reuse it.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use crate::codec;
use crate::error::AppResult;

/// One exposable data collection, identified internally by a
/// namespace-qualified name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CollectionEntry {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Internal qualified name, e.g. `ns1:Lakes`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.namespace, self.name)
    }

    /// URL-safe identifier this collection is published under.
    pub fn external_id(&self) -> String {
        codec::encode(&self.qualified_name())
    }
}

/// Read-only snapshot access to the catalog, in a stable enumeration order.
pub trait CatalogView: Send + Sync {
    /// All collections, optionally restricted to one namespace, in
    /// insertion order.
    fn collections(&self, scope: Option<&str>) -> Vec<CollectionEntry>;

    /// Look up a collection by its external identifier.
    fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<CollectionEntry>> {
        let qualified = codec::decode(external_id)?;
        Ok(self
            .collections(None)
            .into_iter()
            .find(|c| c.qualified_name() == qualified))
    }
}

/// In-memory catalog. Administrative mutation happens through `insert` and
/// `remove`; the capability pipeline only uses the `CatalogView` side.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    entries: RwLock<Vec<CollectionEntry>>,
}

impl MemoryCatalog {
    pub fn new(entries: Vec<CollectionEntry>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    pub fn insert(&self, entry: CollectionEntry) {
        let mut entries = self.entries.write().expect("catalog lock poisoned");
        entries.push(entry);
    }

    pub fn remove(&self, namespace: &str, name: &str) -> bool {
        let mut entries = self.entries.write().expect("catalog lock poisoned");
        let before = entries.len();
        entries.retain(|e| !(e.namespace == namespace && e.name == name));
        entries.len() != before
    }
}

impl CatalogView for MemoryCatalog {
    fn collections(&self, scope: Option<&str>) -> Vec<CollectionEntry> {
        let entries = self.entries.read().expect("catalog lock poisoned");
        match scope {
            Some(ns) => entries.iter().filter(|e| e.namespace == ns).cloned().collect(),
            None => entries.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            CollectionEntry::new("ns1", "Lakes"),
            CollectionEntry::new("ns1", "Rivers"),
            CollectionEntry::new("ns2", "Roads"),
        ])
    }

    #[test]
    fn enumeration_preserves_insertion_order() {
        let catalog = sample();
        let names: Vec<String> = catalog
            .collections(None)
            .iter()
            .map(|c| c.qualified_name())
            .collect();
        assert_eq!(names, vec!["ns1:Lakes", "ns1:Rivers", "ns2:Roads"]);
    }

    #[test]
    fn scope_filters_by_namespace() {
        let catalog = sample();
        let names: Vec<String> = catalog
            .collections(Some("ns1"))
            .iter()
            .map(|c| c.qualified_name())
            .collect();
        assert_eq!(names, vec!["ns1:Lakes", "ns1:Rivers"]);
        assert!(catalog.collections(Some("ns3")).is_empty());
    }

    #[test]
    fn find_by_external_id_round_trips() {
        let catalog = sample();
        let id = CollectionEntry::new("ns1", "Lakes").external_id();
        let found = catalog.find_by_external_id(&id).unwrap().unwrap();
        assert_eq!(found.qualified_name(), "ns1:Lakes");
    }

    #[test]
    fn find_by_malformed_id_fails() {
        let catalog = sample();
        assert!(catalog.find_by_external_id("1bad:id").is_err());
    }

    #[test]
    fn insert_and_remove() {
        let catalog = sample();
        catalog.insert(CollectionEntry::new("ns3", "Parcels"));
        assert_eq!(catalog.collections(None).len(), 4);
        assert!(catalog.remove("ns3", "Parcels"));
        assert!(!catalog.remove("ns3", "Parcels"));
        assert_eq!(catalog.collections(None).len(), 3);
    }
}
