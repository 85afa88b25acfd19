//! Error types for tile resolution

use thiserror::Error;

use super::program::ProgramError;
use crate::catalog::ContentKind;
use crate::schematic::CodecError;

/// Errors that can occur while resolving the grid into tiles
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A grid cell names a block with no declaration
    #[error("Missing configuration data for block \"{name}\".")]
    MissingBlock { name: String },

    /// A declaration's id is not a known block
    #[error("Unknown block id \"{id}\" (declared by \"{name}\")")]
    UnknownBlockId { name: String, id: String },

    /// A content config names something the catalog does not have
    #[error("Unknown {kind} \"{value}\"")]
    UnknownContent { kind: ContentKind, value: String },

    #[error("Invalid point config \"{value}\", should be of the form \"5,6\"")]
    InvalidPoint { value: String },

    #[error("Unknown program \"{name}\"")]
    UnknownProgram { name: String },

    #[error("Invalid config type \"{kind}\"")]
    UnsupportedConfigKind { kind: String },

    /// Loading or compiling a program failed
    #[error(transparent)]
    Program(#[from] ProgramError),

    /// The codec could not package a program config
    #[error("failed to encode program for block \"{name}\": {source}")]
    Codec {
        name: String,
        #[source]
        source: CodecError,
    },
}

impl ResolveError {
    /// Create a missing block error
    pub fn missing_block(name: impl Into<String>) -> Self {
        Self::MissingBlock { name: name.into() }
    }

    /// Create an unknown block id error
    pub fn unknown_block_id(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::UnknownBlockId {
            name: name.into(),
            id: id.into(),
        }
    }

    /// Create an unknown content error
    pub fn unknown_content(kind: ContentKind, value: impl Into<String>) -> Self {
        Self::UnknownContent {
            kind,
            value: value.into(),
        }
    }

    /// Create an invalid point error
    pub fn invalid_point(value: impl Into<String>) -> Self {
        Self::InvalidPoint {
            value: value.into(),
        }
    }

    /// Codec failures are defects rather than bad input
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Codec { .. })
    }
}
