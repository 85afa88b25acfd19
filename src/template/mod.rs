//! Constant templating for schematic documents
//!
//! Text fields of a document may reference constants as `$name` or
//! `$(name)`. Constants come from the document metadata, the document's own
//! `consts` section and the icon glyph table.
//!
//! # Example
//!
//! ```text
//! "info":   { "name": "Smelter v$(version)", "version": "3", ... }
//! "consts": { "ore": "copper" }
//! "blocks": { "s": { "id": "sorter", "config": { "type": "item", "value": "$ore" } } }
//! ```

mod constants;
mod glyphs;
pub mod lexer;
mod substitute;

pub use constants::{ConstValue, ConstantTable};
pub use glyphs::{GlyphError, GlyphTable};
pub use substitute::substitute;

use tracing::debug;

use crate::document::SchematicSource;

/// Substitute constants throughout a document.
///
/// The name is resolved first and stored back into `constants`, then the
/// description, so later fields can reference the finished name and
/// description rather than their raw text. Labels, grid cells, block ids and
/// config values are substituted afterwards. Programs and tags are left
/// untouched.
pub fn substitute_source(mut source: SchematicSource, constants: &mut ConstantTable) -> SchematicSource {
    let name = substitute(&source.info.name, constants);
    constants.insert("name", name.as_str());
    source.info.name = name;

    source.info.description = source
        .info
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| substitute(d, constants));
    if let Some(description) = source.info.description.as_deref().filter(|d| !d.is_empty()) {
        constants.insert("description", description);
    }

    if let Some(labels) = source.info.labels.as_mut() {
        for label in labels.iter_mut() {
            *label = substitute(label, constants);
        }
    }

    for row in source.tiles.grid.iter_mut() {
        for cell in row.iter_mut() {
            *cell = substitute(cell, constants);
        }
    }

    for (name, decl) in source.tiles.blocks.iter_mut() {
        decl.id = substitute(&decl.id, constants);
        if let Some(config) = decl.config.as_mut() {
            config.value = substitute(&config.value, constants);
        }
        debug!(block = name, id = %decl.id, "substituted block declaration");
    }

    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{BlockDecl, ConfigDecl, Info, StringMap, Tiles};

    fn source() -> SchematicSource {
        let mut blocks = StringMap::new();
        blocks.insert(
            "s",
            BlockDecl {
                id: "$kind".to_string(),
                links: None,
                config: Some(ConfigDecl {
                    kind: "string".to_string(),
                    value: "$(description)".to_string(),
                }),
                rotation: None,
            },
        );
        let mut consts = StringMap::new();
        consts.insert("kind", ConstValue::from("sorter"));
        consts.insert("cell", ConstValue::from("s"));
        SchematicSource {
            info: Info {
                name: "Smelter v$(version)".to_string(),
                description: Some("$(name) by $authors".to_string()),
                labels: Some(vec!["$name".to_string()]),
                authors: vec!["alice".to_string()],
                version: "3".to_string(),
                tags: None,
            },
            tiles: Tiles {
                grid: vec![vec!["$cell".to_string(), "".to_string()]],
                blocks,
                programs: StringMap::new(),
            },
            consts,
        }
    }

    #[test]
    fn test_name_feeds_description_and_labels() {
        let src = source();
        let mut constants = ConstantTable::from_source(&src, &GlyphTable::new());
        let out = substitute_source(src, &mut constants);
        assert_eq!(out.info.name, "Smelter v3");
        assert_eq!(out.info.description.as_deref(), Some("Smelter v3 by alice"));
        assert_eq!(out.info.labels, Some(vec!["Smelter v3".to_string()]));
        assert_eq!(constants.get("name"), Some(&ConstValue::from("Smelter v3")));
    }

    #[test]
    fn test_grid_and_blocks_substituted() {
        let src = source();
        let mut constants = ConstantTable::from_source(&src, &GlyphTable::new());
        let out = substitute_source(src, &mut constants);
        assert_eq!(out.tiles.grid, vec![vec!["s".to_string(), "".to_string()]]);
        let decl = out.tiles.blocks.get("s").unwrap();
        assert_eq!(decl.id, "sorter");
        assert_eq!(decl.config.as_ref().unwrap().value, "Smelter v3 by alice");
    }

    #[test]
    fn test_empty_description_not_stored() {
        let mut src = source();
        src.info.description = Some(String::new());
        let mut constants = ConstantTable::from_source(&src, &GlyphTable::new());
        let out = substitute_source(src, &mut constants);
        assert_eq!(out.info.description, None);
        assert_eq!(constants.get("description"), None);
    }
}
