//! Read-only item catalog lookup.

use std::path::Path;

use petsim_logic::items::{CatalogItem, ItemId, ItemKind};

use crate::error::StoreError;

// ── Built-in catalog (same JSON the harness prints) ─────────────────────
const BUILTIN_CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// Lookup of food, medicine and clothing definitions.
pub trait Catalog: Send + Sync {
    fn find_item(&self, kind: ItemKind, id: ItemId) -> Option<CatalogItem>;

    fn items(&self, kind: ItemKind) -> Vec<CatalogItem>;
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// The catalog compiled into the crate.
    pub fn builtin() -> Result<Self, StoreError> {
        Self::from_json_str(BUILTIN_CATALOG_JSON)
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Catalog for StaticCatalog {
    fn find_item(&self, kind: ItemKind, id: ItemId) -> Option<CatalogItem> {
        self.items
            .iter()
            .find(|item| item.kind == kind && item.id == id)
            .cloned()
    }

    fn items(&self, kind: ItemKind) -> Vec<CatalogItem> {
        self.items
            .iter()
            .filter(|item| item.kind == kind)
            .cloned()
            .collect()
    }
}
