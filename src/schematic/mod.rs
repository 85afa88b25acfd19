//! The compiled schematic model
//!
//! This is what a build produces and what a [`SchematicCodec`] consumes.
//! Positions use the target coordinate system, where row 0 is the bottom row.

pub mod codec;

pub use codec::{compress_logic_config, CodecError, JsonCodec, SchematicCodec};

use std::fmt;

use base64::Engine;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::catalog::ContentKind;
use crate::document::StringMap;

/// An integer point, used for point configs and power links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point2 {
    pub x: i32,
    pub y: i32,
}

impl Point2 {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A link from a tile to another tile, relative to the owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub x: i32,
    pub y: i32,
    pub name: String,
}

/// A resolved block configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum BlockConfig {
    Null,
    #[serde(serialize_with = "serialize_content")]
    Content { kind: ContentKind, id: u16 },
    Boolean(bool),
    Point(Point2),
    PointArray(Vec<Point2>),
    String(String),
    #[serde(serialize_with = "serialize_base64")]
    Bytes(Vec<u8>),
}

/// Content configs carry the numeric content type next to the readable kind
fn serialize_content<S: Serializer>(
    kind: &ContentKind,
    id: &u16,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut content = serializer.serialize_struct("Content", 3)?;
    content.serialize_field("kind", kind)?;
    content.serialize_field("type_id", &kind.type_id())?;
    content.serialize_field("id", id)?;
    content.end()
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// One placed block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Block id, e.g. `conveyor`
    pub block: String,
    pub x: usize,
    pub y: usize,
    pub config: BlockConfig,
    /// Quarter turns counter-clockwise, 0..=3
    pub rotation: u8,
}

/// A compiled schematic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schematic {
    pub height: usize,
    pub width: usize,
    pub version: u8,
    pub tags: StringMap<String>,
    /// Model-level labels; user labels travel in the `labels` tag
    pub labels: Vec<String>,
    pub tiles: Vec<Tile>,
}

impl Schematic {
    pub const VERSION: u8 = 1;

    /// Assemble a schematic from a compiled grid, top row first.
    ///
    /// Tiles are listed row by row in grid order, empty cells dropped.
    pub fn from_grid(
        height: usize,
        width: usize,
        tags: StringMap<String>,
        grid: Vec<Vec<Option<Tile>>>,
    ) -> Self {
        Self {
            height,
            width,
            version: Self::VERSION,
            tags,
            labels: Vec::new(),
            tiles: grid.into_iter().flatten().flatten().collect(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.tags.get("name").map(String::as_str)
    }

    /// Tile at a target position, if any
    pub fn tile_at(&self, x: usize, y: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.x == x && t.y == y)
    }
}

impl fmt::Display for Schematic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Schematic \"{}\"", self.name().unwrap_or("<unnamed>"))?;
        writeln!(f, "  size: {}x{}", self.width, self.height)?;
        writeln!(f, "  tiles: {}", self.tiles.len())?;
        for (key, value) in self.tags.iter() {
            if key != "name" {
                writeln!(f, "  {key}: {}", value.escape_debug())?;
            }
        }
        Ok(())
    }
}
