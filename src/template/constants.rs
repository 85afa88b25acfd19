//! The constant table used by text substitution

use std::fmt;

use serde::{Deserialize, Serialize};

use super::glyphs::GlyphTable;
use crate::document::SchematicSource;

/// A constant value: a single string, or a list rendered as `a, b, c`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConstValue {
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Text(s) => f.write_str(s),
            ConstValue::List(items) => f.write_str(&items.join(", ")),
        }
    }
}

impl From<&str> for ConstValue {
    fn from(value: &str) -> Self {
        ConstValue::Text(value.to_string())
    }
}

impl From<String> for ConstValue {
    fn from(value: String) -> Self {
        ConstValue::Text(value)
    }
}

impl From<Vec<String>> for ConstValue {
    fn from(value: Vec<String>) -> Self {
        ConstValue::List(value)
    }
}

/// Constants available to `$key` and `$(key)` substitution.
///
/// Entries are always ordered by descending key length, equal lengths in
/// insertion order, so bare-form replacement never lets a short key eat the
/// prefix of a longer one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstantTable {
    entries: Vec<(String, ConstValue)>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a table from document metadata, document constants and glyphs.
    ///
    /// Later sources replace values from earlier ones.
    pub fn from_source(source: &SchematicSource, glyphs: &GlyphTable) -> Self {
        let mut table = Self::new();
        table.insert("name", source.info.name.as_str());
        table.insert("version", source.info.version.as_str());
        table.insert("authors", source.info.authors.clone());
        for (key, value) in source.consts.iter() {
            table.insert(key, value.clone());
        }
        for (key, glyph) in glyphs.iter() {
            table.insert(key, glyph);
        }
        table
    }

    /// Insert or replace a constant
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ConstValue>) {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *slot = value;
            return;
        }
        let position = self
            .entries
            .iter()
            .position(|(k, _)| k.len() < key.len())
            .unwrap_or(self.entries.len());
        self.entries.insert(position, (key, value));
    }

    pub fn get(&self, key: &str) -> Option<&ConstValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate entries, longest key first
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConstValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Info, StringMap, Tiles};

    fn source_with_consts(consts: &[(&str, &str)]) -> SchematicSource {
        SchematicSource {
            info: Info {
                name: "Smelter".to_string(),
                description: None,
                labels: None,
                authors: vec!["alice".to_string(), "bob".to_string()],
                version: "2.1".to_string(),
                tags: None,
            },
            tiles: Tiles {
                grid: vec![],
                blocks: StringMap::new(),
                programs: StringMap::new(),
            },
            consts: consts
                .iter()
                .map(|(k, v)| (k.to_string(), ConstValue::from(*v)))
                .collect(),
        }
    }

    #[test]
    fn test_list_value_joins_with_comma() {
        let value = ConstValue::List(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(value.to_string(), "a, b");
    }

    #[test]
    fn test_seeded_from_metadata() {
        let table = ConstantTable::from_source(&source_with_consts(&[]), &GlyphTable::new());
        assert_eq!(table.get("name"), Some(&ConstValue::from("Smelter")));
        assert_eq!(table.get("version"), Some(&ConstValue::from("2.1")));
        assert_eq!(table.get("authors").unwrap().to_string(), "alice, bob");
    }

    #[test]
    fn test_longest_key_first_and_stable() {
        let table = ConstantTable::from_source(
            &source_with_consts(&[("a", "1"), ("ab", "2"), ("zz", "3"), ("abcdefgh", "4")]),
            &GlyphTable::new(),
        );
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec!["abcdefgh", "version", "authors", "name", "ab", "zz", "a"]
        );
    }

    #[test]
    fn test_later_sources_override() {
        let mut glyphs = GlyphTable::new();
        glyphs.insert("_copper", "\u{F838}");
        let table = ConstantTable::from_source(
            &source_with_consts(&[("name", "override"), ("_copper", "plain")]),
            &glyphs,
        );
        assert_eq!(table.get("name"), Some(&ConstValue::from("override")));
        assert_eq!(table.get("_copper"), Some(&ConstValue::from("\u{F838}")));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_insert_new_key_keeps_length_order() {
        let mut table = ConstantTable::new();
        table.insert("d", "x");
        table.insert("description", "long");
        let keys: Vec<_> = table.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["description", "d"]);
    }
}
