//! Per-tile config resolution

use crate::catalog::ContentKind;
use crate::document::{BlockDecl, ConfigKind};
use crate::schematic::{BlockConfig, Point2};

use super::error::ResolveError;
use super::links::resolve_links;
use super::program::load_program;
use super::ResolveContext;

/// Blocks whose `links` are power connections. For these the links replace
/// any declared config.
pub const LINKED_POWER_BLOCKS: [&str; 4] =
    ["power-node", "power-node-large", "power-source", "surge-tower"];

/// Resolve the config of block `name` placed at (`x`, `y`)
pub fn resolve_config(
    name: &str,
    decl: &BlockDecl,
    ctx: &ResolveContext<'_>,
    x: usize,
    y: usize,
) -> Result<BlockConfig, ResolveError> {
    let grid = &ctx.source.tiles.grid;

    if decl.links.is_some() && LINKED_POWER_BLOCKS.contains(&decl.id.as_str()) {
        let points = resolve_links(decl, grid, x, y)
            .into_iter()
            .map(|link| Point2::new(link.x, link.y))
            .collect();
        return Ok(BlockConfig::PointArray(points));
    }

    let Some(config) = &decl.config else {
        return Ok(BlockConfig::Null);
    };

    let kind: ConfigKind = config
        .kind
        .parse()
        .map_err(|kind| ResolveError::UnsupportedConfigKind { kind })?;

    match kind {
        ConfigKind::Item => content(ctx, ContentKind::Item, &config.value),
        ConfigKind::Liquid => content(ctx, ContentKind::Liquid, &config.value),
        ConfigKind::Unit => content(ctx, ContentKind::Unit, &config.value),
        ConfigKind::Block => content(ctx, ContentKind::Block, &config.value),
        ConfigKind::Boolean => Ok(BlockConfig::Boolean(config.value != "false")),
        ConfigKind::Point => parse_point(&config.value).map(BlockConfig::Point),
        ConfigKind::String => Ok(BlockConfig::String(config.value.clone())),
        ConfigKind::Program => {
            let program = ctx.source.tiles.programs.get(&config.value).ok_or_else(|| {
                ResolveError::UnknownProgram {
                    name: config.value.clone(),
                }
            })?;
            let code = load_program(program, ctx.base_dir, ctx.compiler, ctx.constants)?;
            let links = resolve_links(decl, grid, x, y);
            let bytes = ctx
                .codec
                .compress_logic(&links, &code)
                .map_err(|source| ResolveError::Codec {
                    name: name.to_string(),
                    source,
                })?;
            Ok(BlockConfig::Bytes(bytes))
        }
    }
}

fn content(
    ctx: &ResolveContext<'_>,
    kind: ContentKind,
    value: &str,
) -> Result<BlockConfig, ResolveError> {
    ctx.catalog
        .lookup(kind, value)
        .map(|id| BlockConfig::Content { kind, id })
        .ok_or_else(|| ResolveError::unknown_content(kind, value))
}

/// Parse `"x,y"`; whitespace around either number is allowed
fn parse_point(value: &str) -> Result<Point2, ResolveError> {
    let fields: Vec<&str> = value.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [x, y] => match (x.parse(), y.parse()) {
            (Ok(x), Ok(y)) => Ok(Point2::new(x, y)),
            _ => Err(ResolveError::invalid_point(value)),
        },
        _ => Err(ResolveError::invalid_point(value)),
    }
}
