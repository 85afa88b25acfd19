//! Content catalogs for config resolution
//!
//! Item, liquid, unit and block configs name content symbolically
//! (`"copper"`, `"water"`, ...). The catalog maps those names to the numeric
//! ids the schematic format stores, and lists which block ids exist at all.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing catalogs
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// The content kinds a block config can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Item,
    Block,
    Liquid,
    Unit,
}

impl ContentKind {
    /// Content type discriminant stored next to the id in a content config
    pub fn type_id(self) -> u8 {
        match self {
            ContentKind::Item => 0,
            ContentKind::Block => 1,
            ContentKind::Liquid => 4,
            ContentKind::Unit => 6,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Item => "item",
            ContentKind::Block => "block",
            ContentKind::Liquid => "liquid",
            ContentKind::Unit => "unit",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name -> id tables for every content kind
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Optional name for the catalog
    pub name: Option<String>,
    items: HashMap<String, u16>,
    blocks: HashMap<String, u16>,
    liquids: HashMap<String, u16>,
    units: HashMap<String, u16>,
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    items: HashMap<String, u16>,
    #[serde(default)]
    blocks: HashMap<String, u16>,
    #[serde(default)]
    liquids: HashMap<String, u16>,
    #[serde(default)]
    units: HashMap<String, u16>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Bundled catalog
const DEFAULT_CATALOG: &str = include_str!("catalog.toml");

impl Catalog {
    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;

        Ok(Catalog {
            name: parsed.metadata.and_then(|m| m.name),
            items: parsed.items,
            blocks: parsed.blocks,
            liquids: parsed.liquids,
            units: parsed.units,
        })
    }

    /// Bundled catalog extended by the entries of a TOML file
    pub fn default_with_file(path: &Path) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        catalog.extend(Self::from_file(path)?);
        Ok(catalog)
    }

    /// Add entries from `other`; on conflicts `other` wins
    pub fn extend(&mut self, other: Catalog) {
        if other.name.is_some() {
            self.name = other.name;
        }
        self.items.extend(other.items);
        self.blocks.extend(other.blocks);
        self.liquids.extend(other.liquids);
        self.units.extend(other.units);
    }

    /// Look up the id of a named piece of content
    pub fn lookup(&self, kind: ContentKind, name: &str) -> Option<u16> {
        self.table(kind).get(name).copied()
    }

    /// Whether `id` names a known block
    pub fn has_block(&self, id: &str) -> bool {
        self.blocks.contains_key(id)
    }

    fn table(&self, kind: ContentKind) -> &HashMap<String, u16> {
        match kind {
            ContentKind::Item => &self.items,
            ContentKind::Block => &self.blocks,
            ContentKind::Liquid => &self.liquids,
            ContentKind::Unit => &self.units,
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::from_str(DEFAULT_CATALOG).expect("Bundled catalog should be valid TOML")
    }
}
