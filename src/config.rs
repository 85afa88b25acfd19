//! Build configuration

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::catalog::Catalog;
use crate::document::default_schema;
use crate::resolve::{NoCompiler, ProgramCompiler};
use crate::schematic::{JsonCodec, SchematicCodec};
use crate::template::GlyphTable;

/// Configuration for the complete build pipeline
#[derive(Clone)]
pub struct BuildConfig {
    /// Directory program paths are resolved against
    pub base_dir: PathBuf,
    /// Content names and ids
    pub catalog: Catalog,
    /// Icon glyphs, exposed as constants
    pub glyphs: GlyphTable,
    /// JSON schema documents are validated against
    pub schema: Value,
    pub compiler: Arc<dyn ProgramCompiler>,
    pub codec: Arc<dyn SchematicCodec>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            catalog: Catalog::default(),
            glyphs: GlyphTable::new(),
            schema: default_schema(),
            compiler: Arc::new(NoCompiler),
            codec: Arc::new(JsonCodec::default()),
        }
    }
}

impl fmt::Debug for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildConfig")
            .field("base_dir", &self.base_dir)
            .field("catalog", &self.catalog.name)
            .field("glyphs", &self.glyphs.len())
            .field("codec", &self.codec.extension())
            .finish_non_exhaustive()
    }
}

impl BuildConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the directory relative program paths resolve against
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_glyphs(mut self, glyphs: GlyphTable) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Replace the bundled document schema
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.schema = schema;
        self
    }

    /// Set the compiler used for `.mlogx` program files
    pub fn with_compiler(mut self, compiler: impl ProgramCompiler + 'static) -> Self {
        self.compiler = Arc::new(compiler);
        self
    }

    pub fn with_codec(mut self, codec: impl SchematicCodec + 'static) -> Self {
        self.codec = Arc::new(codec);
        self
    }
}
