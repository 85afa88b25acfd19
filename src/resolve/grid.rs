//! Grid compilation

use tracing::debug;

use crate::schematic::Tile;

use super::config::resolve_config;
use super::error::ResolveError;
use super::ResolveContext;

/// Resolve every grid cell into a tile, keeping the grid's shape.
///
/// Empty cells become `None`. Row `r` of the grid (top first) lands at
/// `y = height - r - 1`. Cells are resolved row by row, left to right, and
/// the first failure stops compilation.
pub fn compile_grid(ctx: &ResolveContext<'_>) -> Result<Vec<Vec<Option<Tile>>>, ResolveError> {
    let tiles = &ctx.source.tiles;
    let height = tiles.height();

    let mut compiled = Vec::with_capacity(height);
    for (r, row) in tiles.grid.iter().enumerate() {
        let y = height - r - 1;
        let mut out = Vec::with_capacity(row.len());
        for (x, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                out.push(None);
                continue;
            }
            let decl = tiles
                .blocks
                .get(cell)
                .ok_or_else(|| ResolveError::missing_block(cell.as_str()))?;
            if !ctx.catalog.has_block(&decl.id) {
                return Err(ResolveError::unknown_block_id(cell.as_str(), decl.id.as_str()));
            }
            let config = resolve_config(cell, decl, ctx, x, y)?;
            debug!(cell = %cell, block = %decl.id, x, y, "resolved tile");
            out.push(Some(Tile {
                block: decl.id.clone(),
                x,
                y,
                config,
                rotation: decl.rotation.unwrap_or(0),
            }));
        }
        compiled.push(out);
    }
    Ok(compiled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::document::{BlockDecl, Info, SchematicSource, StringMap, Tiles};
    use crate::resolve::program::NoCompiler;
    use crate::schematic::{BlockConfig, JsonCodec};
    use crate::template::ConstantTable;
    use std::path::Path;

    fn source(grid: &[&[&str]], blocks: &[(&str, &str, Option<u8>)]) -> SchematicSource {
        let mut decls = StringMap::new();
        for (name, id, rotation) in blocks {
            decls.insert(
                *name,
                BlockDecl {
                    id: id.to_string(),
                    links: None,
                    config: None,
                    rotation: *rotation,
                },
            );
        }
        SchematicSource {
            info: Info {
                name: "grid".to_string(),
                description: None,
                labels: None,
                authors: vec![],
                version: "1".to_string(),
                tags: None,
            },
            tiles: Tiles {
                grid: grid
                    .iter()
                    .map(|row| row.iter().map(|c| c.to_string()).collect())
                    .collect(),
                blocks: decls,
                programs: StringMap::new(),
            },
            consts: StringMap::new(),
        }
    }

    fn compile(src: &SchematicSource) -> Result<Vec<Vec<Option<Tile>>>, ResolveError> {
        let catalog = Catalog::default();
        let constants = ConstantTable::new();
        let codec = JsonCodec::default();
        let ctx = ResolveContext {
            source: src,
            constants: &constants,
            catalog: &catalog,
            compiler: &NoCompiler,
            codec: &codec,
            base_dir: Path::new("."),
        };
        compile_grid(&ctx)
    }

    #[test]
    fn test_rows_are_inverted() {
        let src = source(
            &[&["x"], &["y"], &["z"]],
            &[("x", "conveyor", None), ("y", "router", None), ("z", "sorter", None)],
        );
        let grid = compile(&src).unwrap();
        let placed: Vec<(String, usize, usize)> = grid
            .iter()
            .flatten()
            .flatten()
            .map(|t| (t.block.clone(), t.x, t.y))
            .collect();
        assert_eq!(
            placed,
            vec![
                ("conveyor".to_string(), 0, 2),
                ("router".to_string(), 0, 1),
                ("sorter".to_string(), 0, 0),
            ]
        );
    }

    #[test]
    fn test_empty_cells_and_rotation() {
        let src = source(&[&["", "c", ""]], &[("c", "conveyor", Some(3))]);
        let grid = compile(&src).unwrap();
        assert_eq!(grid.len(), 1);
        assert!(grid[0][0].is_none());
        assert!(grid[0][2].is_none());
        let tile = grid[0][1].as_ref().unwrap();
        assert_eq!((tile.x, tile.y, tile.rotation), (1, 0, 3));
        assert_eq!(tile.config, BlockConfig::Null);
    }

    #[test]
    fn test_rotation_defaults_to_zero() {
        let src = source(&[&["c"]], &[("c", "conveyor", None)]);
        let grid = compile(&src).unwrap();
        assert_eq!(grid[0][0].as_ref().unwrap().rotation, 0);
    }

    #[test]
    fn test_missing_block() {
        let src = source(&[&["c", "drill"]], &[("c", "conveyor", None)]);
        let err = compile(&src).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing configuration data for block \"drill\"."
        );
    }

    #[test]
    fn test_unknown_block_id() {
        let src = source(&[&["c"]], &[("c", "teleporter", None)]);
        let err = compile(&src).unwrap_err();
        assert!(matches!(err, ResolveError::UnknownBlockId { ref id, .. } if id == "teleporter"));
    }

    #[test]
    fn test_empty_grid() {
        let src = source(&[], &[]);
        assert!(compile(&src).unwrap().is_empty());
    }
}
