//! Typed form of a schematic source document

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::map::StringMap;
use crate::template::ConstValue;

/// A complete schematic source document as authored in JSON
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SchematicSource {
    /// Metadata: name, description, authors, version, labels and tags
    pub info: Info,
    /// Placement grid, block declarations and programs
    pub tiles: Tiles,
    /// User constants substituted into text as `$name` or `$(name)`
    #[serde(default)]
    pub consts: StringMap<ConstValue>,
}

/// Schematic metadata
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Info {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    pub authors: Vec<String>,
    pub version: String,
    /// Extra schematic tags, copied into the output as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<StringMap<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Tiles {
    /// Rows of block names, top row first. `""` is an empty cell.
    pub grid: Vec<Vec<String>>,
    /// Block name -> declaration
    pub blocks: StringMap<BlockDecl>,
    /// Program name -> inline lines or a file path
    #[serde(default)]
    pub programs: StringMap<ProgramSource>,
}

impl Tiles {
    /// Number of rows in the grid
    pub fn height(&self) -> usize {
        self.grid.len()
    }

    /// Length of the longest row; rows may be ragged
    pub fn width(&self) -> usize {
        self.grid.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Declaration of one named block used in the grid
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BlockDecl {
    /// Target block id, e.g. `conveyor` or `micro-processor`
    pub id: String,
    /// Names of other grid cells this block links to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u8>,
}

/// Declared configuration of a block, before resolution
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConfigDecl {
    /// Config kind as written; checked against [`ConfigKind`] at resolve time
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// A program body: inline lines, or a path to a file relative to the document
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ProgramSource {
    Lines(Vec<String>),
    Path(String),
}

/// The kinds of configuration a block declaration can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Item,
    Liquid,
    Unit,
    Block,
    Boolean,
    Point,
    String,
    Program,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 8] = [
        ConfigKind::Item,
        ConfigKind::Liquid,
        ConfigKind::Unit,
        ConfigKind::Block,
        ConfigKind::Boolean,
        ConfigKind::Point,
        ConfigKind::String,
        ConfigKind::Program,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKind::Item => "item",
            ConfigKind::Liquid => "liquid",
            ConfigKind::Unit => "unit",
            ConfigKind::Block => "block",
            ConfigKind::Boolean => "boolean",
            ConfigKind::Point => "point",
            ConfigKind::String => "string",
            ConfigKind::Program => "program",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}
