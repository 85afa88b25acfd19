//! msch-build - compile JSON schematic source documents into schematic models
//!
//! A source document describes a schematic as a grid of short cell names plus
//! a declaration for each name. Building validates the document, substitutes
//! constants into its text fields, resolves every cell into a placed block and
//! assembles the result into a [`Schematic`].
//!
//! # Example
//!
//! ```rust
//! use msch_build::{build, default_schema, GlyphTable};
//!
//! let source = r#"{
//!     "info": { "name": "Sorter", "authors": ["me"], "version": "1" },
//!     "tiles": {
//!         "grid": [["s"]],
//!         "blocks": { "s": { "id": "sorter", "config": { "type": "item", "value": "copper" } } }
//!     }
//! }"#;
//!
//! let schematic = build(source, &default_schema(), &GlyphTable::new()).unwrap();
//! assert_eq!(schematic.name(), Some("Sorter"));
//! assert_eq!(schematic.tiles.len(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod document;
pub mod error;
pub mod resolve;
pub mod schematic;
pub mod template;

pub use catalog::{Catalog, CatalogError, ContentKind};
pub use config::BuildConfig;
pub use document::{default_schema, parse_json, starter_document, SchemaError, SchematicSource, StringMap};
pub use error::SourceError;
pub use resolve::{CompileError, NoCompiler, ProgramCompiler, ProgramError, ResolveError};
pub use schematic::{BlockConfig, CodecError, JsonCodec, Schematic, SchematicCodec, Tile};
pub use template::{ConstantTable, GlyphError, GlyphTable};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use resolve::ResolveContext;

/// Errors that can occur during a build
#[derive(Debug, Error)]
pub enum BuildError {
    /// The source is not JSON
    #[error("Schematic file contains invalid JSON: {0}")]
    Json(#[from] SourceError),

    /// The source does not match the schema
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Schematic file can only have data.info.labels or data.info.tags.labels, not both")]
    DuplicateLabels,

    /// Resolving the grid failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A defect rather than a problem with the input
    #[error("internal error: {0}")]
    Internal(String),
}

impl BuildError {
    /// Whether the error describes bad input, as opposed to a defect
    pub fn is_user_facing(&self) -> bool {
        match self {
            BuildError::Json(_) | BuildError::DuplicateLabels => true,
            BuildError::Schema(e) => e.is_user_facing(),
            BuildError::Resolve(e) => e.is_user_facing(),
            BuildError::Internal(_) => false,
        }
    }
}

/// Build a schematic with the default configuration, a given schema and glyphs
pub fn build(raw: &str, schema: &Value, glyphs: &GlyphTable) -> Result<Schematic, BuildError> {
    let config = BuildConfig::new()
        .with_schema(schema.clone())
        .with_glyphs(glyphs.clone());
    build_with_config(raw, &config)
}

/// Build a schematic with a custom configuration
///
/// # Example
///
/// ```rust
/// use msch_build::{build_with_config, BuildConfig, JsonCodec};
///
/// let config = BuildConfig::new().with_codec(JsonCodec { pretty: false });
/// let source = r#"{
///     "info": { "name": "Empty", "authors": [], "version": "1" },
///     "tiles": { "grid": [], "blocks": {} }
/// }"#;
///
/// let schematic = build_with_config(source, &config).unwrap();
/// assert_eq!(schematic.height, 0);
/// ```
pub fn build_with_config(raw: &str, config: &BuildConfig) -> Result<Schematic, BuildError> {
    let value = parse_json(raw)?;

    document::validate(&value, &config.schema)?;

    let source: SchematicSource = serde_json::from_value(value)
        .map_err(|e| BuildError::Internal(format!("validated document did not deserialize: {e}")))?;

    let mut constants = ConstantTable::from_source(&source, &config.glyphs);
    debug!(constants = constants.len(), "built constant table");

    let source = template::substitute_source(source, &mut constants);

    let tag_labels = source.info.tags.as_ref().is_some_and(|t| t.contains_key("labels"));
    if source.info.labels.is_some() && tag_labels {
        return Err(BuildError::DuplicateLabels);
    }

    let tags = assemble_tags(&source)?;

    let ctx = ResolveContext {
        source: &source,
        constants: &constants,
        catalog: &config.catalog,
        compiler: config.compiler.as_ref(),
        codec: config.codec.as_ref(),
        base_dir: &config.base_dir,
    };
    let grid = resolve::compile_grid(&ctx)?;

    let schematic = Schematic::from_grid(source.tiles.height(), source.tiles.width(), tags, grid);
    debug!(
        width = schematic.width,
        height = schematic.height,
        tiles = schematic.tiles.len(),
        "assembled schematic"
    );
    Ok(schematic)
}

/// Base tags from the info block, overridden key by key by `info.tags`
fn assemble_tags(source: &SchematicSource) -> Result<StringMap<String>, BuildError> {
    let info = &source.info;
    let labels = match &info.labels {
        Some(labels) => serde_json::to_string(labels)
            .map_err(|e| BuildError::Internal(format!("failed to serialize labels: {e}")))?,
        None => "[]".to_string(),
    };

    let mut tags = StringMap::new();
    tags.insert("name", info.name.clone());
    tags.insert("description", info.description.clone().unwrap_or_default());
    tags.insert("labels", labels);
    if let Some(overrides) = &info.tags {
        for (key, value) in overrides.iter() {
            tags.insert(key, value.clone());
        }
    }
    Ok(tags)
}
