//! Tile resolution: grid walking, config resolution and links
//!
//! Everything here works on a document whose constants have already been
//! substituted.

mod config;
mod error;
mod grid;
mod links;
pub mod program;

pub use config::{resolve_config, LINKED_POWER_BLOCKS};
pub use error::ResolveError;
pub use grid::compile_grid;
pub use links::{resolve_links, AUTO_LINK_NAME};
pub use program::{CompileError, NoCompiler, ProgramCompiler, ProgramError};

use std::path::Path;

use crate::catalog::Catalog;
use crate::document::SchematicSource;
use crate::schematic::SchematicCodec;
use crate::template::ConstantTable;

/// Everything tile resolution reads from
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    /// The substituted document
    pub source: &'a SchematicSource,
    /// Constants, passed on to the program compiler
    pub constants: &'a ConstantTable,
    pub catalog: &'a Catalog,
    pub compiler: &'a dyn ProgramCompiler,
    pub codec: &'a dyn SchematicCodec,
    /// Directory relative program paths are resolved against
    pub base_dir: &'a Path,
}
