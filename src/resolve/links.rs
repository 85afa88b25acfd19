//! Link resolution between grid cells

use crate::document::BlockDecl;
use crate::schematic::Link;

/// Link name that asks the consumer to work out the real link name itself
pub const AUTO_LINK_NAME: &str = "!!";

/// Compute links from the tile at (`x`, `y`) to every cell named in `decl.links`.
///
/// Offsets are in target coordinates (row 0 at the bottom). Links are emitted
/// per linked name, then row by row from the bottom, then left to right.
pub fn resolve_links(decl: &BlockDecl, grid: &[Vec<String>], x: usize, y: usize) -> Vec<Link> {
    let Some(targets) = &decl.links else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for target in targets {
        for (cell_y, row) in grid.iter().rev().enumerate() {
            for (cell_x, cell) in row.iter().enumerate() {
                if cell == target {
                    links.push(Link {
                        x: offset(cell_x, x),
                        y: offset(cell_y, y),
                        name: AUTO_LINK_NAME.to_string(),
                    });
                }
            }
        }
    }
    links
}

fn offset(to: usize, from: usize) -> i32 {
    to as i32 - from as i32
}
